//! Configuration d'une recherche de sites TALE

use crate::error::{Result, TaleError};
use crate::filters::GCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longueur TALE minimale autorisée
pub const MIN_TALE_LENGTH: usize = 10;
/// Longueur TALE maximale autorisée
pub const MAX_TALE_LENGTH: usize = 30;
/// Spacer minimal autorisé
pub const MIN_SPACER_LENGTH: usize = 1;
/// Spacer maximal autorisé
pub const MAX_SPACER_LENGTH: usize = 100;

/// Restriction du balayage autour d'une position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWindow {
    /// Position centrale (coordonnées du brin +)
    pub position: usize,
    /// Rayon autour de la position
    pub range: usize,
}

impl SearchWindow {
    pub fn new(position: usize, range: usize) -> Self {
        Self { position, range }
    }

    /// Bornes `[max(0, position - range), min(len, position + range))`,
    /// vides si la fenêtre tombe après la fin de la séquence
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let end = self.position.saturating_add(self.range).min(len);
        let start = self.position.saturating_sub(self.range).min(end);
        (start, end)
    }
}

/// Paramètres d'une recherche, immuables pendant l'appel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Longueur TALE minimale
    pub min_tale_length: usize,

    /// Longueur TALE maximale
    pub max_tale_length: usize,

    /// Spacer minimal entre deux TALE d'une paire
    pub min_spacer_length: usize,

    /// Spacer maximal entre deux TALE d'une paire
    pub max_spacer_length: usize,

    /// Code de la guanine
    pub g_code: GCode,

    /// Rejeter les sites proches d'un îlot CpG
    pub skip_cpg: bool,

    /// Rejeter les sites contenant 7 A/T consécutifs ou plus
    pub skip_consecutive_at: bool,

    /// GC% minimal d'un site (0-100)
    pub min_gc: u8,

    /// Restriction optionnelle autour d'une position
    pub window: Option<SearchWindow>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_tale_length: 15,
            max_tale_length: 20,
            min_spacer_length: 14,
            max_spacer_length: 20,
            g_code: GCode::Nh,
            skip_cpg: true,
            skip_consecutive_at: true,
            min_gc: 25,
            window: None,
        }
    }
}

impl SearchConfig {
    /// Vérifie la cohérence des paramètres avant tout balayage
    pub fn validate(&self) -> Result<()> {
        for len in [self.min_tale_length, self.max_tale_length] {
            if !(MIN_TALE_LENGTH..=MAX_TALE_LENGTH).contains(&len) {
                return Err(TaleError::LengthOutOfBounds {
                    len,
                    lower: MIN_TALE_LENGTH,
                    upper: MAX_TALE_LENGTH,
                });
            }
        }
        if self.max_tale_length < self.min_tale_length {
            return Err(TaleError::InvalidLengthRange {
                min: self.min_tale_length,
                max: self.max_tale_length,
            });
        }

        for len in [self.min_spacer_length, self.max_spacer_length] {
            if !(MIN_SPACER_LENGTH..=MAX_SPACER_LENGTH).contains(&len) {
                return Err(TaleError::SpacerOutOfBounds {
                    len,
                    lower: MIN_SPACER_LENGTH,
                    upper: MAX_SPACER_LENGTH,
                });
            }
        }
        if self.max_spacer_length < self.min_spacer_length {
            return Err(TaleError::InvalidSpacerRange {
                min: self.min_spacer_length,
                max: self.max_spacer_length,
            });
        }

        if self.min_gc > 100 {
            return Err(TaleError::InvalidMinGc(self.min_gc));
        }

        Ok(())
    }

    /// Longueurs TALE essayées, dans l'ordre croissant
    pub fn tale_lengths(&self) -> std::ops::RangeInclusive<usize> {
        self.min_tale_length..=self.max_tale_length
    }

    /// Bornes du balayage sur le brin + pour une séquence de longueur `len`
    pub fn search_bounds(&self, len: usize) -> (usize, usize) {
        match self.window {
            Some(window) => window.bounds(len),
            None => (0, len),
        }
    }
}

/// Brins balayés en recherche simple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Any,
    Forward,
    Reverse,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Any => "any",
            Orientation::Forward => "forward",
            Orientation::Reverse => "reverse",
        }
    }

    pub fn includes_forward(self) -> bool {
        matches!(self, Orientation::Any | Orientation::Forward)
    }

    pub fn includes_reverse(self) -> bool {
        matches!(self, Orientation::Any | Orientation::Reverse)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = TaleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "any" => Ok(Orientation::Any),
            "forward" => Ok(Orientation::Forward),
            "reverse" => Ok(Orientation::Reverse),
            other if PairOrientation::from_str(other).is_ok() => {
                Err(TaleError::OrientationNotAllowed {
                    orientation: other.to_string(),
                    mode: "single".to_string(),
                })
            }
            other => Err(TaleError::UnknownOrientation(other.to_string())),
        }
    }
}

/// Configuration relative de deux TALE d'une paire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairOrientation {
    /// Gauche sur +, droite sur - (TALEN standard)
    Convergent,
    /// Gauche sur -, droite sur +
    Divergent,
    /// Les deux sur +
    TandemForward,
    /// Les deux sur -
    TandemReverse,
}

impl PairOrientation {
    /// Ordre d'évaluation des orientations
    pub const ALL: [PairOrientation; 4] = [
        PairOrientation::Convergent,
        PairOrientation::Divergent,
        PairOrientation::TandemForward,
        PairOrientation::TandemReverse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PairOrientation::Convergent => "convergent",
            PairOrientation::Divergent => "divergent",
            PairOrientation::TandemForward => "tandem_forward",
            PairOrientation::TandemReverse => "tandem_reverse",
        }
    }
}

impl fmt::Display for PairOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PairOrientation {
    type Err = TaleError;

    fn from_str(s: &str) -> Result<Self> {
        PairOrientation::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| TaleError::UnknownOrientation(s.to_string()))
    }
}

/// Orientations demandées en recherche de paires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairOrientationSelector {
    #[default]
    Any,
    Only(PairOrientation),
}

impl PairOrientationSelector {
    /// Orientations à évaluer, dans l'ordre d'évaluation
    pub fn orientations(self) -> Vec<PairOrientation> {
        match self {
            PairOrientationSelector::Any => PairOrientation::ALL.to_vec(),
            PairOrientationSelector::Only(orientation) => vec![orientation],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PairOrientationSelector::Any => "any",
            PairOrientationSelector::Only(orientation) => orientation.as_str(),
        }
    }
}

impl fmt::Display for PairOrientationSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PairOrientationSelector {
    type Err = TaleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "any" => Ok(PairOrientationSelector::Any),
            "forward" | "reverse" => Err(TaleError::OrientationNotAllowed {
                orientation: s.to_string(),
                mode: "pairs".to_string(),
            }),
            other => PairOrientation::from_str(other).map(PairOrientationSelector::Only),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tale_lengths().count(), 6);
    }

    #[test]
    fn test_validate_rejects_inverted_ranges() {
        let config = SearchConfig {
            min_tale_length: 20,
            max_tale_length: 15,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            TaleError::InvalidLengthRange { min: 20, max: 15 }
        );

        let config = SearchConfig {
            min_spacer_length: 30,
            max_spacer_length: 20,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            TaleError::InvalidSpacerRange { min: 30, max: 20 }
        );
    }

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        let config = SearchConfig {
            min_tale_length: 9,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TaleError::LengthOutOfBounds { len: 9, .. })
        ));

        let config = SearchConfig {
            max_spacer_length: 101,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TaleError::SpacerOutOfBounds { len: 101, .. })
        ));

        let config = SearchConfig {
            min_gc: 101,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err(), TaleError::InvalidMinGc(101));
    }

    #[test]
    fn test_search_window_bounds() {
        assert_eq!(SearchWindow::new(50, 20).bounds(1000), (30, 70));
        assert_eq!(SearchWindow::new(10, 20).bounds(1000), (0, 30));
        assert_eq!(SearchWindow::new(990, 20).bounds(1000), (970, 1000));
        assert_eq!(SearchWindow::new(5000, 20).bounds(1000), (1000, 1000));

        let config = SearchConfig::default();
        assert_eq!(config.search_bounds(500), (0, 500));
    }

    #[test]
    fn test_orientation_parsing() {
        assert_eq!("forward".parse::<Orientation>().unwrap(), Orientation::Forward);
        assert!(matches!(
            "tandem_forward".parse::<Orientation>(),
            Err(TaleError::OrientationNotAllowed { .. })
        ));
        assert!(matches!(
            "sideways".parse::<Orientation>(),
            Err(TaleError::UnknownOrientation(_))
        ));

        assert_eq!(
            "tandem_reverse".parse::<PairOrientationSelector>().unwrap(),
            PairOrientationSelector::Only(PairOrientation::TandemReverse)
        );
        assert!(matches!(
            "forward".parse::<PairOrientationSelector>(),
            Err(TaleError::OrientationNotAllowed { .. })
        ));
    }

    #[test]
    fn test_selector_orientations() {
        assert_eq!(PairOrientationSelector::Any.orientations().len(), 4);
        assert_eq!(
            PairOrientationSelector::Only(PairOrientation::Divergent).orientations(),
            vec![PairOrientation::Divergent]
        );
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"min_tale_length": 18, "g_code": "NN"}"#).unwrap();
        assert_eq!(config.min_tale_length, 18);
        assert_eq!(config.max_tale_length, 20);
        assert_eq!(config.g_code, GCode::Nn);
    }
}
