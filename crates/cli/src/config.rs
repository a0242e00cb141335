//! Configuration de la CLI

use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;
use tale_core::sequence::DEFAULT_MAX_SEQUENCE_LENGTH;
use tale_core::SearchConfig;

/// Fichier de configuration cherché par défaut (`tale.toml`, `tale.yaml`, ...)
pub const DEFAULT_CONFIG_NAME: &str = "tale";

/// Préfixe des variables d'environnement (`TALE__SEARCH__MIN_GC=30`)
const ENV_PREFIX: &str = "TALE";

/// Limites appliquées aux entrées
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_sequence_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
        }
    }
}

/// Configuration du logging
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Niveau effectif: chaque `-v` augmente la verbosité
    pub fn effective_level(&self, verbose: u8) -> &str {
        match verbose {
            0 => match self.level.to_lowercase().as_str() {
                "trace" => "trace",
                "debug" => "debug",
                "info" => "info",
                "error" => "error",
                _ => "warn",
            },
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Configuration complète de l'application
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Charge la configuration depuis un fichier optionnel puis l'environnement
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(path, None)
    }

    /// Comme `load_from_file`, avec un environnement explicite à la place
    /// de celui du processus
    pub fn load(path: &str, env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        settings.try_deserialize::<AppConfig>()
    }
}
