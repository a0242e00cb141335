//! TALE Core Library
//!
//! Recherche de sites de fixation TALE (Transcription Activator-Like
//! Effector) sur les deux brins d'une séquence d'ADN, en sites uniques ou
//! en paires séparées par un spacer (TALEN).

pub mod config;
pub mod error;
pub mod filters;
pub mod finder;
pub mod index;
pub mod logging;
pub mod pairs;
pub mod progress;
pub mod request;
pub mod results;
pub mod sequence;

// Réexportations principales
pub use config::{
    Orientation, PairOrientation, PairOrientationSelector, SearchConfig, SearchWindow,
};
pub use error::{Result, TaleError};
pub use filters::{count_strong_rvds, dna_to_rvd, GCode};
pub use finder::{find_single_tales, SiteFinder};
pub use index::{CpgMembership, GcPrefixArray, SequenceIndex};
pub use logging::{init_logging, init_logging_with_level};
// La macro log_operation est automatiquement exportée à la racine du crate
pub use pairs::{find_tale_pairs, PairEnumerator};
pub use progress::{NoProgress, ProgressReporter};
pub use request::{SearchMode, SearchOutcome, SearchRequest};
pub use results::{TaleCandidate, TalePairResult};
pub use sequence::{Sequence, Strand};
