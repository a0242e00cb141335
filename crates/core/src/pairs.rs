//! Appariement de sites TALE sous contraintes de spacer et d'orientation

use crate::config::{PairOrientation, PairOrientationSelector, SearchConfig};
use crate::error::Result;
use crate::filters::GCode;
use crate::finder::SiteFinder;
use crate::index::SequenceIndex;
use crate::log_operation;
use crate::progress::{NoProgress, ProgressReporter, ProgressTicker};
use crate::results::{TaleCandidate, TalePairResult};
use crate::sequence::{Sequence, Strand};

/// Combine deux listes de candidats (brins + et -) en paires
#[derive(Debug, Clone, Copy)]
pub struct PairEnumerator<'a> {
    forward: &'a [TaleCandidate],
    reverse: &'a [TaleCandidate],
    min_spacer: usize,
    max_spacer: usize,
    g_code: GCode,
}

impl<'a> PairEnumerator<'a> {
    pub fn new(
        forward: &'a [TaleCandidate],
        reverse: &'a [TaleCandidate],
        config: &SearchConfig,
    ) -> Self {
        Self {
            forward,
            reverse,
            min_spacer: config.min_spacer_length,
            max_spacer: config.max_spacer_length,
            g_code: config.g_code,
        }
    }

    /// Listes source (gauche, droite) d'une orientation
    fn sources(&self, orientation: PairOrientation) -> (&'a [TaleCandidate], &'a [TaleCandidate]) {
        match orientation {
            PairOrientation::Convergent => (self.forward, self.reverse),
            PairOrientation::Divergent => (self.reverse, self.forward),
            PairOrientation::TandemForward => (self.forward, self.forward),
            PairOrientation::TandemReverse => (self.reverse, self.reverse),
        }
    }

    /// Dénominateur de progression: produit complet par orientation
    ///
    /// Les orientations en tandem ne parcourent que le triangle supérieur;
    /// la progression affichée y reste donc en dessous de la réalité.
    pub fn total_combinations(&self, orientations: &[PairOrientation]) -> u64 {
        orientations
            .iter()
            .map(|&o| {
                let (left, right) = self.sources(o);
                (left.len() * right.len()) as u64
            })
            .sum()
    }

    /// Énumère les paires des orientations demandées, triées par
    /// `(left.start, right.start)`
    pub fn enumerate(
        &self,
        orientations: &[PairOrientation],
        progress: &mut dyn ProgressReporter,
    ) -> Vec<TalePairResult> {
        let mut ticker = ProgressTicker::new(progress, self.total_combinations(orientations));
        let mut pairs = Vec::new();

        for &orientation in orientations {
            let (lefts, rights) = self.sources(orientation);
            let tandem = matches!(
                orientation,
                PairOrientation::TandemForward | PairOrientation::TandemReverse
            );

            for (i, left) in lefts.iter().enumerate() {
                // En tandem, seul l'indice droit > indice gauche est essayé
                let rights = if tandem { &rights[i + 1..] } else { rights };

                for right in rights {
                    ticker.tick();
                    if let Some(pair) = self.try_pair(left, right, orientation) {
                        pairs.push(pair);
                    }
                }
            }
        }

        ticker.finish();
        pairs.sort_by_key(|p| (p.left.start, p.right.start));
        pairs
    }

    fn try_pair(
        &self,
        left: &TaleCandidate,
        right: &TaleCandidate,
        orientation: PairOrientation,
    ) -> Option<TalePairResult> {
        if right.start < left.end || left.length != right.length {
            return None;
        }

        let spacer = right.start - left.end;
        if spacer < self.min_spacer || spacer > self.max_spacer {
            return None;
        }

        Some(TalePairResult {
            left: left.clone(),
            right: right.clone(),
            spacer_length: spacer,
            tale_length: left.length,
            orientation,
            g_code: self.g_code,
        })
    }
}

/// Recherche les paires de TALE pour les orientations demandées
///
/// Les candidats de chaque brin sont d'abord filtrés (3 RVD forts au moins),
/// puis appariés. Seuls les brins utiles aux orientations demandées sont
/// indexés.
pub fn find_tale_pairs(
    sequence: &Sequence,
    config: &SearchConfig,
    selector: PairOrientationSelector,
    progress: &mut dyn ProgressReporter,
) -> Result<Vec<TalePairResult>> {
    config.validate()?;

    log_operation!("find_tale_pairs", {
        let orientations = selector.orientations();
        let finder = SiteFinder::for_pairs(config);

        let needs = |strand: Strand| {
            orientations.iter().any(|o| match o {
                PairOrientation::Convergent | PairOrientation::Divergent => true,
                PairOrientation::TandemForward => strand == Strand::Forward,
                PairOrientation::TandemReverse => strand == Strand::Reverse,
            })
        };

        // Le balayage des brins ne rapporte pas de progression
        let mut silent = NoProgress;
        let mut ticker = ProgressTicker::new(&mut silent, 0);
        let mut scan = |strand: Strand| {
            if !needs(strand) {
                return Vec::new();
            }
            let index = SequenceIndex::for_strand(sequence, strand, config.skip_cpg);
            let found = finder.scan_strand(&index, &mut ticker);
            tracing::debug!(strand = %strand, count = found.len(), "Candidats pour appariement");
            found
        };

        let forward = scan(Strand::Forward);
        let reverse = scan(Strand::Reverse);

        let enumerator = PairEnumerator::new(&forward, &reverse, config);
        let pairs = enumerator.enumerate(&orientations, progress);

        tracing::info!(
            sequence_len = sequence.len(),
            orientation = %selector,
            results = pairs.len(),
            "Recherche de paires terminée"
        );

        Ok(pairs)
    })
}
