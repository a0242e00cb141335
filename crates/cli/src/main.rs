//! CLI pour la recherche de sites TALE

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::str::FromStr;
use tale_core::GCode;

mod commands;
mod config;
mod display;

use crate::commands::{rvd, search};
use crate::config::{AppConfig, DEFAULT_CONFIG_NAME};

#[derive(Parser)]
#[command(name = "tale")]
#[command(about = "Recherche de sites de fixation TALE et de paires TALEN", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Fichier de configuration (tale.toml par défaut, optionnel)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_NAME)]
    config: String,

    /// Niveau de verbosité
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Recherche des sites TALE uniques ou des paires
    Search(SearchArgs),

    /// Encode un fragment d'ADN en RVD
    Rvd {
        /// Fragment d'ADN (A, C, G, T)
        dna: String,

        /// Code de la guanine (NH ou NN)
        #[arg(short, long, value_parser = GCode::from_str)]
        g_code: Option<GCode>,
    },
}

#[derive(clap::Args)]
pub struct SearchArgs {
    /// Séquence d'ADN brute
    #[arg(conflicts_with = "input")]
    pub sequence: Option<String>,

    /// Fichier texte contenant la séquence (les lignes '>' sont ignorées)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Mode de recherche: single ou pairs
    #[arg(short, long, default_value = "single")]
    pub mode: String,

    /// Orientation: any, forward, reverse (single) ou any, convergent,
    /// divergent, tandem_forward, tandem_reverse (pairs)
    #[arg(short, long, default_value = "any")]
    pub orientation: String,

    /// Longueur TALE minimale
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Longueur TALE maximale
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Spacer minimal
    #[arg(long)]
    pub min_spacer: Option<usize>,

    /// Spacer maximal
    #[arg(long)]
    pub max_spacer: Option<usize>,

    /// Code de la guanine (NH ou NN)
    #[arg(short, long, value_parser = GCode::from_str)]
    pub g_code: Option<GCode>,

    /// Rejeter les sites proches d'un îlot CpG
    #[arg(long)]
    pub skip_cpg: Option<bool>,

    /// Rejeter les sites avec 7 A/T consécutifs ou plus
    #[arg(long)]
    pub skip_consecutive_at: Option<bool>,

    /// GC% minimal
    #[arg(long)]
    pub min_gc: Option<u8>,

    /// Position centrale de la fenêtre de recherche
    #[arg(long, requires = "range")]
    pub position: Option<usize>,

    /// Demi-largeur de la fenêtre de recherche
    #[arg(long, requires = "position")]
    pub range: Option<usize>,

    /// Format de sortie
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Écrire les résultats dans un fichier
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = AppConfig::load_from_file(&cli.config)?;
    tale_core::init_logging_with_level(app_config.logging.effective_level(cli.verbose));
    tracing::debug!(config = ?app_config, "Configuration chargée");

    match cli.command {
        Commands::Search(args) => {
            search::run(args, &app_config)?;
        }
        Commands::Rvd { dna, g_code } => {
            rvd::run(&dna, g_code.unwrap_or(app_config.search.g_code))?;
        }
    }

    Ok(())
}

/// Crée une barre de progression
pub fn create_progress_bar(length: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(length);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb
}

/// Crée une barre de progression spinner
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb
}
