//! Résultats de recherche: sites uniques et paires

use crate::config::PairOrientation;
use crate::filters::GCode;
use crate::sequence::Strand;
use serde::Serialize;

/// Site de fixation TALE candidat
///
/// Les coordonnées sont toujours celles du brin +, `[start, end)`,
/// quel que soit le brin balayé.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaleCandidate {
    pub start: usize,
    pub end: usize,
    pub strand: Strand,
    /// Site lu 5'→3' sur son propre brin
    pub dna: String,
    pub rvd: String,
    pub length: usize,
    /// GC% du site, arrondi à une décimale
    pub gc_content: f64,
    pub g_code: GCode,
}

/// Paire de TALE séparés par un spacer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalePairResult {
    pub left: TaleCandidate,
    pub right: TaleCandidate,
    /// `right.start - left.end`
    pub spacer_length: usize,
    pub tale_length: usize,
    pub orientation: PairOrientation,
    pub g_code: GCode,
}

/// Arrondi à une décimale, égalités vers le chiffre pair (31.25 -> 31.2)
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
