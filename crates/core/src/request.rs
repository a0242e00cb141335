//! Requête de recherche complète: mode, orientation et paramètres

use crate::config::{Orientation, PairOrientation, PairOrientationSelector, SearchConfig};
use crate::error::{Result, TaleError};
use crate::finder::find_single_tales;
use crate::pairs::find_tale_pairs;
use crate::progress::ProgressReporter;
use crate::results::{TaleCandidate, TalePairResult};
use crate::sequence::Sequence;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// Longueur de l'empreinte d'une requête, en caractères hexadécimaux
pub const FINGERPRINT_LEN: usize = 16;

/// Mode de recherche avec l'orientation qui lui est propre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Single(Orientation),
    Pairs(PairOrientationSelector),
}

impl SearchMode {
    /// Construit le mode depuis ses libellés (`single|pairs` et orientation)
    ///
    /// En mode simple, `convergent` et `divergent` sont ramenés à `any`.
    pub fn parse(mode: &str, orientation: &str) -> Result<Self> {
        match mode {
            "single" => {
                let orientation = match PairOrientation::from_str(orientation) {
                    Ok(PairOrientation::Convergent | PairOrientation::Divergent) => {
                        Orientation::Any
                    }
                    _ => Orientation::from_str(orientation)?,
                };
                Ok(SearchMode::Single(orientation))
            }
            "pairs" => Ok(SearchMode::Pairs(PairOrientationSelector::from_str(
                orientation,
            )?)),
            other => Err(TaleError::UnknownMode(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Single(_) => "single",
            SearchMode::Pairs(_) => "pairs",
        }
    }

    pub fn orientation_str(&self) -> &'static str {
        match self {
            SearchMode::Single(orientation) => orientation.as_str(),
            SearchMode::Pairs(selector) => selector.as_str(),
        }
    }
}

/// Résultat d'une requête, selon son mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    Single(Vec<TaleCandidate>),
    Pairs(Vec<TalePairResult>),
}

impl SearchOutcome {
    pub fn len(&self) -> usize {
        match self {
            SearchOutcome::Single(candidates) => candidates.len(),
            SearchOutcome::Pairs(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub mode: SearchMode,
    pub config: SearchConfig,
}

impl SearchRequest {
    pub fn new(mode: SearchMode, config: SearchConfig) -> Self {
        Self { mode, config }
    }

    /// Exécute la recherche correspondant au mode
    pub fn run(
        &self,
        sequence: &Sequence,
        progress: &mut dyn ProgressReporter,
    ) -> Result<SearchOutcome> {
        match self.mode {
            SearchMode::Single(orientation) => {
                find_single_tales(sequence, &self.config, orientation, progress)
                    .map(SearchOutcome::Single)
            }
            SearchMode::Pairs(selector) => {
                find_tale_pairs(sequence, &self.config, selector, progress)
                    .map(SearchOutcome::Pairs)
            }
        }
    }

    /// Empreinte stable de la requête, utilisable comme clé de cache
    pub fn fingerprint(&self, sequence: &Sequence) -> String {
        let hash = Sha256::digest(self.canonical_params(sequence).as_bytes());
        let mut hex = format!("{:x}", hash);
        hex.truncate(FINGERPRINT_LEN);
        hex
    }

    fn canonical_params(&self, sequence: &Sequence) -> String {
        let config = &self.config;
        let (position, range) = match config.window {
            Some(window) => (window.position.to_string(), window.range.to_string()),
            None => ("None".to_string(), "None".to_string()),
        };

        format!(
            "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
            sequence,
            self.mode.name(),
            self.mode.orientation_str(),
            config.min_tale_length,
            config.max_tale_length,
            config.min_spacer_length,
            config.max_spacer_length,
            config.g_code,
            flag_label(config.skip_cpg),
            flag_label(config.skip_consecutive_at),
            config.min_gc,
            position,
            range,
        )
    }
}

fn flag_label(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
