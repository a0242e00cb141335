//! Séquences nucléotidiques validées et brins

use crate::error::{Result, TaleError};
use bio::alphabets::dna;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longueur maximale acceptée par défaut (en paires de bases)
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 100_000;

/// Brin d'ADN sur lequel un site est lu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    /// Symbole du brin (`+` ou `-`)
    pub fn symbol(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Séquence ADN immuable, en majuscules, sur l'alphabet {A,T,C,G}
///
/// Toute valeur de ce type a déjà passé la validation: le moteur de
/// recherche ne revérifie jamais l'alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    bases: Vec<u8>,
}

impl Sequence {
    /// Normalise et valide une séquence brute avec la limite par défaut
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_with_limit(raw, DEFAULT_MAX_SEQUENCE_LENGTH)
    }

    /// Normalise (majuscules, sans blancs) puis valide une séquence brute
    pub fn parse_with_limit(raw: &str, max_len: usize) -> Result<Self> {
        // Un seul filtre de blancs pour la longueur, la position et le symbole
        let symbols: Vec<char> = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();

        if symbols.is_empty() {
            return Err(TaleError::EmptySequence);
        }

        if symbols.len() > max_len {
            return Err(TaleError::SequenceTooLong {
                len: symbols.len(),
                max: max_len,
            });
        }

        let mut bases = Vec::with_capacity(symbols.len());
        for (position, &symbol) in symbols.iter().enumerate() {
            match u8::try_from(symbol).map(|b| b.to_ascii_uppercase()) {
                Ok(base) if is_nucleotide(base) => bases.push(base),
                _ => return Err(TaleError::InvalidBase { base: symbol, position }),
            }
        }

        Ok(Self { bases })
    }

    /// Bases de la séquence
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    /// Retourne la longueur de la séquence
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Vérifie si la séquence est vide
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Brin complémentaire lu 5'→3'
    pub fn reverse_complement(&self) -> Self {
        Self {
            bases: reverse_complement(&self.bases),
        }
    }

    /// Sous-séquence `[start, end)` sous forme de chaîne
    pub fn slice_str(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.bases[start..end]).into_owned()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bases))
    }
}

#[inline]
fn is_nucleotide(base: u8) -> bool {
    matches!(base, b'A' | b'T' | b'C' | b'G')
}

/// Complément inverse: A↔T, C↔G, ordre inversé
pub fn reverse_complement(bases: &[u8]) -> Vec<u8> {
    dna::revcomp(bases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let seq = Sequence::parse(" acgt\nTTga\r\n").unwrap();
        assert_eq!(seq.to_string(), "ACGTTTGA");
        assert_eq!(seq.len(), 8);
        assert!(!seq.is_empty());
    }

    #[test]
    fn test_parse_rejects_invalid_base() {
        let err = Sequence::parse("ACGNT").unwrap_err();
        assert_eq!(err, TaleError::InvalidBase { base: 'N', position: 3 });
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Sequence::parse("  \n ").unwrap_err(), TaleError::EmptySequence);
    }

    #[test]
    fn test_parse_reports_non_ascii_symbol() {
        let err = Sequence::parse("ACG\u{00A0}X").unwrap_err();
        assert_eq!(err, TaleError::InvalidBase { base: '\u{00A0}', position: 3 });

        let err = Sequence::parse("AC\nGé T").unwrap_err();
        assert_eq!(err, TaleError::InvalidBase { base: 'é', position: 3 });

        let err = Sequence::parse("acgn").unwrap_err();
        assert_eq!(err, TaleError::InvalidBase { base: 'n', position: 3 });
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let err = Sequence::parse_with_limit("ACGTACGT", 4).unwrap_err();
        assert_eq!(err, TaleError::SequenceTooLong { len: 8, max: 4 });
    }

    #[test]
    fn test_reverse_complement() {
        let seq = Sequence::parse("TACGTACGTACGTACGTACGT").unwrap();
        assert_eq!(seq.reverse_complement().to_string(), "ACGTACGTACGTACGTACGTA");
        assert_eq!(reverse_complement(b"AACG"), b"CGTT".to_vec());
    }

    #[test]
    fn test_reverse_complement_involution() {
        let seq = Sequence::parse("GATTACACCGGTTA").unwrap();
        assert_eq!(seq.reverse_complement().reverse_complement(), seq);
    }

    #[test]
    fn test_strand_display() {
        assert_eq!(Strand::Forward.to_string(), "+");
        assert_eq!(Strand::Reverse.to_string(), "-");
    }
}
