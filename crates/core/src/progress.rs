//! Rapport de progression injecté par l'appelant

use std::sync::mpsc::Sender;

/// Cadence de rapport: un appel toutes les 1000 itérations
pub const PROGRESS_INTERVAL: u64 = 1000;

/// Puits de progression appelé de façon synchrone par le moteur
///
/// Reçoit un pourcentage 0-100, zéro ou plusieurs fois, puis 100 en fin de
/// recherche. Le passage vers un autre thread est à la charge de
/// l'implémentation (voir l'implémentation pour `Sender<u8>`).
pub trait ProgressReporter {
    fn report(&mut self, percent: u8);
}

/// Ignore toute progression
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

impl<F: FnMut(u8)> ProgressReporter for F {
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

impl ProgressReporter for Sender<u8> {
    fn report(&mut self, percent: u8) {
        // Un récepteur fermé ne doit pas interrompre la recherche
        let _ = self.send(percent);
    }
}

/// Compteur d'itérations qui émet `floor(100 × courant / total)` selon la cadence
pub(crate) struct ProgressTicker<'a> {
    reporter: &'a mut dyn ProgressReporter,
    current: u64,
    total: u64,
}

impl<'a> ProgressTicker<'a> {
    pub(crate) fn new(reporter: &'a mut dyn ProgressReporter, total: u64) -> Self {
        Self {
            reporter,
            current: 0,
            total: total.max(1),
        }
    }

    /// À appeler au début de chaque itération
    #[inline]
    pub(crate) fn tick(&mut self) {
        if self.current % PROGRESS_INTERVAL == 0 {
            let percent = (self.current * 100 / self.total).min(100) as u8;
            self.reporter.report(percent);
        }
        self.current += 1;
    }

    pub(crate) fn finish(self) {
        self.reporter.report(100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_ticker_cadence() {
        let mut seen = Vec::new();
        let mut sink = |p: u8| seen.push(p);
        let mut ticker = ProgressTicker::new(&mut sink, 4000);
        for _ in 0..2500 {
            ticker.tick();
        }
        ticker.finish();
        assert_eq!(seen, vec![0, 25, 50, 100]);
    }

    #[test]
    fn test_ticker_zero_total() {
        let mut seen = Vec::new();
        let mut sink = |p: u8| seen.push(p);
        ProgressTicker::new(&mut sink, 0).finish();
        assert_eq!(seen, vec![100]);
    }

    #[test]
    fn test_channel_reporter() {
        let (tx, rx) = mpsc::channel();
        let mut reporter = tx;
        reporter.report(42);
        reporter.report(100);
        drop(reporter);
        assert_eq!(rx.iter().collect::<Vec<u8>>(), vec![42, 100]);
    }

    #[test]
    fn test_channel_reporter_closed_receiver() {
        let (mut tx, rx) = mpsc::channel::<u8>();
        drop(rx);
        tx.report(10);
    }
}
