//! Types d'erreurs pour la recherche de sites TALE

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaleError {
    #[error("Plage de longueur TALE invalide: min {min} > max {max}")]
    InvalidLengthRange { min: usize, max: usize },

    #[error("Longueur TALE hors limites: {len} pas dans [{lower}, {upper}]")]
    LengthOutOfBounds { len: usize, lower: usize, upper: usize },

    #[error("Plage de spacer invalide: min {min} > max {max}")]
    InvalidSpacerRange { min: usize, max: usize },

    #[error("Longueur de spacer hors limites: {len} pas dans [{lower}, {upper}]")]
    SpacerOutOfBounds { len: usize, lower: usize, upper: usize },

    #[error("GC minimum hors plage: {0} > 100")]
    InvalidMinGc(u8),

    #[error("Orientation inconnue: {0}")]
    UnknownOrientation(String),

    #[error("Orientation {orientation} non valide pour le mode {mode}")]
    OrientationNotAllowed { orientation: String, mode: String },

    #[error("Code G inconnu: {0} (attendu NH ou NN)")]
    UnknownGCode(String),

    #[error("Mode de recherche inconnu: {0} (attendu single ou pairs)")]
    UnknownMode(String),

    #[error("Séquence vide")]
    EmptySequence,

    #[error("Base invalide '{base}' à la position {position}")]
    InvalidBase { base: char, position: usize },

    #[error("Séquence trop longue: {len} > {max}")]
    SequenceTooLong { len: usize, max: usize },
}

impl TaleError {
    /// Vrai pour les erreurs de paramétrage, détectées avant tout balayage
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            TaleError::EmptySequence
                | TaleError::InvalidBase { .. }
                | TaleError::SequenceTooLong { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TaleError>;
