//! Recherche de sites TALE uniques sur un brin
//!
//! Pour chaque longueur puis chaque décalage `i` de la fenêtre, un site
//! `[i + 1, i + 1 + L)` est retenu si la base `i` est une thymine et si le
//! site passe les filtres CpG, A/T et GC. Le brin - est balayé sur le
//! complément inverse puis ramené en coordonnées du brin +.

use crate::config::{Orientation, SearchConfig};
use crate::error::Result;
use crate::filters::{
    count_strong_rvds, dna_to_rvd, gc_percentage, has_consecutive_at, is_in_cpg_island,
};
use crate::index::SequenceIndex;
use crate::log_operation;
use crate::progress::{ProgressReporter, ProgressTicker};
use crate::results::{round_one_decimal, TaleCandidate};
use crate::sequence::{Sequence, Strand};

/// Nombre minimal de RVD forts exigé en recherche de paires
pub const MIN_STRONG_RVDS: usize = 3;

/// Base d'ancrage attendue juste avant le site
const ANCHOR_BASE: u8 = b'T';

/// Balayeur de sites pour une configuration donnée
#[derive(Debug, Clone, Copy)]
pub struct SiteFinder<'a> {
    config: &'a SearchConfig,
    min_strong_rvds: Option<usize>,
}

impl<'a> SiteFinder<'a> {
    /// Balayeur de la recherche simple
    pub fn new(config: &'a SearchConfig) -> Self {
        Self {
            config,
            min_strong_rvds: None,
        }
    }

    /// Balayeur de la recherche de paires: exige en plus 3 RVD forts
    pub fn for_pairs(config: &'a SearchConfig) -> Self {
        Self {
            config,
            min_strong_rvds: Some(MIN_STRONG_RVDS),
        }
    }

    /// Itérations prévues pour un brin (fenêtre × nombre de longueurs)
    pub fn iterations_per_strand(&self, sequence_len: usize) -> u64 {
        let (start, end) = self.config.search_bounds(sequence_len);
        ((end - start) * self.config.tale_lengths().count()) as u64
    }

    /// Bornes de balayage sur le brin indexé; pour le brin -, la fenêtre
    /// est projetée sur le complément inverse
    fn scan_bounds(&self, index: &SequenceIndex) -> (usize, usize) {
        let n = index.len();
        let (start, end) = self.config.search_bounds(n);
        match index.strand() {
            Strand::Forward => (start, end),
            Strand::Reverse => (n - end, n - start),
        }
    }

    /// Balaye un brin et retourne ses candidats triés par `start`
    pub(crate) fn scan_strand(
        &self,
        index: &SequenceIndex,
        ticker: &mut ProgressTicker<'_>,
    ) -> Vec<TaleCandidate> {
        let n = index.len();
        let bases = index.bases();
        let (scan_start, scan_end) = self.scan_bounds(index);
        let mut candidates = Vec::new();

        for length in self.config.tale_lengths() {
            for i in scan_start..scan_end {
                ticker.tick();

                // Plus aucun site complet ne tient au-delà: on passe à la longueur suivante
                if i + length + 1 > n {
                    break;
                }

                if bases[i] != ANCHOR_BASE {
                    continue;
                }

                if let Some(candidate) = self.evaluate(index, i + 1, i + 1 + length) {
                    candidates.push(candidate);
                }
            }
        }

        candidates.sort_by_key(|c| c.start);
        candidates
    }

    /// Applique les filtres à `[site_start, site_end)` du brin indexé
    fn evaluate(
        &self,
        index: &SequenceIndex,
        site_start: usize,
        site_end: usize,
    ) -> Option<TaleCandidate> {
        let config = self.config;
        let length = site_end - site_start;
        let dna = &index.bases()[site_start..site_end];

        if config.skip_cpg && is_in_cpg_island(site_start, length, index.cpg()) {
            return None;
        }

        if config.skip_consecutive_at && has_consecutive_at(dna) {
            return None;
        }

        let gc = gc_percentage(index.gc(), site_start, site_end);
        if gc < f64::from(config.min_gc) {
            return None;
        }

        let rvd = dna_to_rvd(dna, config.g_code);
        if let Some(min_strong) = self.min_strong_rvds {
            if count_strong_rvds(&rvd) < min_strong {
                return None;
            }
        }

        let n = index.len();
        let (start, end) = match index.strand() {
            Strand::Forward => (site_start, site_end),
            Strand::Reverse => (n - site_end, n - site_start),
        };

        Some(TaleCandidate {
            start,
            end,
            strand: index.strand(),
            dna: String::from_utf8_lossy(dna).into_owned(),
            rvd,
            length,
            gc_content: round_one_decimal(gc),
            g_code: config.g_code,
        })
    }
}

/// Recherche tous les sites TALE uniques
///
/// Avec `Orientation::Any`, les candidats du brin + précèdent ceux du
/// brin -; chaque bloc est trié par `start` mais l'ensemble n'est pas retrié.
pub fn find_single_tales(
    sequence: &Sequence,
    config: &SearchConfig,
    orientation: Orientation,
    progress: &mut dyn ProgressReporter,
) -> Result<Vec<TaleCandidate>> {
    config.validate()?;

    log_operation!("find_single_tales", {
        let finder = SiteFinder::new(config);

        let mut strands = Vec::with_capacity(2);
        if orientation.includes_forward() {
            strands.push(Strand::Forward);
        }
        if orientation.includes_reverse() {
            strands.push(Strand::Reverse);
        }

        let total = finder.iterations_per_strand(sequence.len()) * strands.len() as u64;
        let mut ticker = ProgressTicker::new(progress, total);
        let mut results = Vec::new();

        for strand in strands {
            let index = SequenceIndex::for_strand(sequence, strand, config.skip_cpg);
            let found = finder.scan_strand(&index, &mut ticker);
            tracing::debug!(strand = %strand, count = found.len(), "Sites TALE trouvés");
            results.extend(found);
        }

        ticker.finish();
        tracing::info!(
            sequence_len = sequence.len(),
            %orientation,
            results = results.len(),
            "Recherche simple terminée"
        );

        Ok(results)
    })
}
