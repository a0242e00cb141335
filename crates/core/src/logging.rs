//! Système de logging pour TALE Core

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise le système de logging (filtre lu depuis `RUST_LOG`)
pub fn init_logging() {
    init_logging_with_level("info");
}

/// Initialise le logging avec un niveau par défaut si `RUST_LOG` est absent
///
/// Les traces partent sur stderr: stdout reste réservé aux résultats.
/// Un second appel est sans effet.
pub fn init_logging_with_level(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Macro pour le logging des opérations critiques
#[macro_export]
macro_rules! log_operation {
    ($name:expr, $block:block) => {{
        let span = tracing::span!(tracing::Level::INFO, $name);
        let _enter = span.enter();
        tracing::info!("Début de l'opération: {}", $name);
        let result = $block;
        tracing::info!("Fin de l'opération: {}", $name);
        result
    }};
}
