//! Filtres de motifs et encodage RVD
//!
//! Fonctions sans état appliquées à chaque site candidat.

use crate::error::{Result, TaleError};
use crate::index::{CpgMembership, GcPrefixArray};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marge (pb) examinée de part et d'autre d'un site pour le test CpG
pub const CPG_BUFFER: usize = 100;

/// Pas d'échantillonnage du test CpG
pub const CPG_SAMPLE_STRIDE: usize = 10;

/// Longueur à partir de laquelle une suite de A/T est rejetée
pub const CONSECUTIVE_AT_LIMIT: usize = 7;

/// Code RVD de repli pour un symbole hors alphabet
pub const UNKNOWN_RVD: &str = "XX";

/// GC% d'une région `[start, end)` via les sommes préfixes
pub fn gc_percentage(gc: &GcPrefixArray, start: usize, end: usize) -> f64 {
    gc.percentage(start, end)
}

/// Test de chevauchement avec un îlot CpG (marge et pas par défaut)
pub fn is_in_cpg_island(position: usize, length: usize, membership: &CpgMembership) -> bool {
    is_in_cpg_island_with(position, length, membership, CPG_BUFFER, CPG_SAMPLE_STRIDE)
}

/// Échantillonne une position sur `stride` dans
/// `[position - buffer, position + length + buffer)`, bornée à la séquence
///
/// L'échantillonnage est volontairement clairsemé: un îlot plus court que
/// le pas peut passer entre deux échantillons.
pub fn is_in_cpg_island_with(
    position: usize,
    length: usize,
    membership: &CpgMembership,
    buffer: usize,
    stride: usize,
) -> bool {
    let start = position.saturating_sub(buffer);
    let end = (position + length + buffer).min(membership.len());
    if start >= end {
        return false;
    }

    (start..end)
        .step_by(stride.max(1))
        .any(|pos| membership.contains(pos))
}

/// Vrai s'il existe une suite d'au moins 7 A/T consécutifs
pub fn has_consecutive_at(dna: &[u8]) -> bool {
    let mut run = 0usize;
    for &base in dna {
        if base == b'A' || base == b'T' {
            run += 1;
            if run >= CONSECUTIVE_AT_LIMIT {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Code utilisé pour la guanine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GCode {
    #[default]
    #[serde(rename = "NH")]
    Nh,
    #[serde(rename = "NN")]
    Nn,
}

impl GCode {
    /// RVD associé à la guanine
    pub fn rvd_for_guanine(self) -> &'static str {
        match self {
            GCode::Nh => "NH",
            GCode::Nn => "NN",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.rvd_for_guanine()
    }
}

impl fmt::Display for GCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GCode {
    type Err = TaleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NH" => Ok(GCode::Nh),
            "NN" => Ok(GCode::Nn),
            other => Err(TaleError::UnknownGCode(other.to_string())),
        }
    }
}

#[inline]
fn rvd_for_base(base: u8, g_code: GCode) -> Option<&'static str> {
    match base {
        b'A' => Some("NI"),
        b'C' => Some("HD"),
        b'T' => Some("NG"),
        b'G' => Some(g_code.rvd_for_guanine()),
        _ => None,
    }
}

/// Encode un fragment d'ADN en RVD (2 caractères par base)
///
/// Un symbole hors {A,C,G,T} donne `XX`: il signale une validation amont
/// manquante et est tracé en avertissement.
pub fn dna_to_rvd(dna: &[u8], g_code: GCode) -> String {
    let mut rvd = String::with_capacity(dna.len() * 2);
    let mut unknown = 0usize;

    for &base in dna {
        match rvd_for_base(base, g_code) {
            Some(code) => rvd.push_str(code),
            None => {
                unknown += 1;
                rvd.push_str(UNKNOWN_RVD);
            }
        }
    }

    if unknown > 0 {
        tracing::warn!(unknown, "Symboles hors alphabet encodés en {}", UNKNOWN_RVD);
    }

    rvd
}

/// Découpe une chaîne RVD en codes de 2 caractères
pub fn rvd_repeats(rvd: &str) -> impl Iterator<Item = &str> + '_ {
    rvd.as_bytes()
        .chunks(2)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(UNKNOWN_RVD))
}

/// Compte les RVD forts (`NN` et `HD`)
pub fn count_strong_rvds(rvd: &str) -> usize {
    rvd_repeats(rvd)
        .filter(|code| *code == "NN" || *code == "HD")
        .count()
}
