//! Commande de recherche

use crate::config::AppConfig;
use crate::display::results::{candidates_table, pairs_table, SearchReport};
use crate::{create_progress_bar, create_spinner, OutputFormat, SearchArgs};
use anyhow::{anyhow, bail, Result};
use console::style;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use tale_core::{SearchConfig, SearchMode, SearchOutcome, SearchRequest, SearchWindow, Sequence};

pub fn run(args: SearchArgs, app_config: &AppConfig) -> Result<()> {
    // 1. Lire et valider la séquence
    let spinner = create_spinner("Lecture de la séquence...");
    let raw = read_sequence(args.sequence.as_deref(), args.input.as_deref())?;
    let sequence = Sequence::parse_with_limit(&raw, app_config.limits.max_sequence_length)?;
    spinner.finish_with_message(format!("Séquence lue ({} nt)", sequence.len()));

    // 2. Construire la requête; les paramètres invalides sont rejetés ici
    let mode = SearchMode::parse(&args.mode, &args.orientation)?;
    let config = build_config(&args, &app_config.search);
    config.validate()?;
    let request = SearchRequest::new(mode, config);
    let fingerprint = request.fingerprint(&sequence);
    tracing::info!(%fingerprint, mode = mode.name(), "Requête prête");

    // 3. Rechercher
    let outcome = run_with_progress(request.clone(), sequence.clone())?;

    // 4. Restituer
    let rendered = match args.format {
        OutputFormat::Json => {
            let report = SearchReport::new(&fingerprint, &request, &sequence, &outcome);
            serde_json::to_string_pretty(&report)?
        }
        OutputFormat::Table => match &outcome {
            SearchOutcome::Single(candidates) => candidates_table(candidates).to_string(),
            SearchOutcome::Pairs(pairs) => pairs_table(pairs).to_string(),
        },
    };

    if let Some(output) = args.output {
        std::fs::write(&output, rendered)?;
        eprintln!("Résultats écrits dans: {}", output.display());
    } else {
        println!("{}", rendered);
    }

    eprintln!(
        "\n{} {} résultat(s) [{}]",
        style("✅").green(),
        outcome.len(),
        style(&fingerprint).dim()
    );

    Ok(())
}

/// Exécute la recherche sur un thread dédié; la progression revient par canal
fn run_with_progress(request: SearchRequest, sequence: Sequence) -> Result<SearchOutcome> {
    let (tx, rx) = mpsc::channel::<u8>();

    let worker = thread::spawn(move || {
        let mut reporter = tx;
        request.run(&sequence, &mut reporter)
    });

    let pb = create_progress_bar(100, "Recherche des sites TALE...");
    for percent in rx {
        pb.set_position(u64::from(percent));
    }

    let result = worker
        .join()
        .map_err(|_| anyhow!("Le thread de recherche s'est arrêté anormalement"))?;

    match result {
        Ok(outcome) => {
            pb.finish_with_message(format!("{} résultat(s)", outcome.len()));
            Ok(outcome)
        }
        Err(err) => {
            pb.abandon();
            Err(err.into())
        }
    }
}

/// Séquence brute depuis l'argument ou le fichier
fn read_sequence(sequence: Option<&str>, input: Option<&Path>) -> Result<String> {
    match (sequence, input) {
        (Some(raw), _) => Ok(raw.to_string()),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)?;
            Ok(strip_headers(&text))
        }
        (None, None) => bail!("Aucune séquence fournie: passer SEQUENCE ou --input"),
    }
}

/// Retire les lignes d'en-tête '>' d'un texte de séquence
fn strip_headers(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('>'))
        .collect::<Vec<_>>()
        .join("")
}

/// Paramètres de la configuration, surchargés par la ligne de commande
fn build_config(args: &SearchArgs, base: &SearchConfig) -> SearchConfig {
    let mut config = base.clone();

    if let Some(len) = args.min_length {
        config.min_tale_length = len;
    }
    if let Some(len) = args.max_length {
        config.max_tale_length = len;
    }
    if let Some(len) = args.min_spacer {
        config.min_spacer_length = len;
    }
    if let Some(len) = args.max_spacer {
        config.max_spacer_length = len;
    }
    if let Some(g_code) = args.g_code {
        config.g_code = g_code;
    }
    if let Some(skip) = args.skip_cpg {
        config.skip_cpg = skip;
    }
    if let Some(skip) = args.skip_consecutive_at {
        config.skip_consecutive_at = skip;
    }
    if let Some(min_gc) = args.min_gc {
        config.min_gc = min_gc;
    }
    if let (Some(position), Some(range)) = (args.position, args.range) {
        config.window = Some(SearchWindow::new(position, range));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cli, Commands};
    use clap::Parser;
    use tale_core::GCode;

    fn search_args(extra: &[&str]) -> SearchArgs {
        let mut argv = vec!["tale", "search"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Search(args) => args,
            _ => panic!("sous-commande inattendue"),
        }
    }

    #[test]
    fn test_build_config_keeps_base_values() {
        let base = SearchConfig {
            min_gc: 40,
            ..Default::default()
        };
        let config = build_config(&search_args(&["ACGT"]), &base);
        assert_eq!(config, base);
    }

    #[test]
    fn test_build_config_overrides() {
        let args = search_args(&[
            "ACGT",
            "--min-length",
            "12",
            "--max-length",
            "14",
            "--g-code",
            "NN",
            "--skip-cpg",
            "false",
            "--position",
            "500",
            "--range",
            "50",
        ]);
        let config = build_config(&args, &SearchConfig::default());
        assert_eq!(config.min_tale_length, 12);
        assert_eq!(config.max_tale_length, 14);
        assert_eq!(config.g_code, GCode::Nn);
        assert!(!config.skip_cpg);
        assert!(config.skip_consecutive_at);
        assert_eq!(config.window, Some(SearchWindow::new(500, 50)));
    }

    #[test]
    fn test_position_requires_range() {
        assert!(Cli::try_parse_from(["tale", "search", "ACGT", "--position", "10"]).is_err());
    }

    #[test]
    fn test_strip_headers() {
        let text = ">chr1 fragment\nACGT\n  acgt\n>second\nTTAA\n";
        assert_eq!(strip_headers(text), "ACGT  acgtTTAA");
    }

    #[test]
    fn test_read_sequence_requires_input() {
        assert!(read_sequence(None, None).is_err());
        assert_eq!(read_sequence(Some("ACGT"), None).unwrap(), "ACGT");
    }

    #[test]
    fn test_run_with_progress() {
        let sequence = Sequence::parse("TACGTACGTACGTACGTACGT").unwrap();
        let request = SearchRequest::new(
            SearchMode::parse("single", "forward").unwrap(),
            SearchConfig {
                min_tale_length: 19,
                max_tale_length: 19,
                skip_cpg: false,
                ..Default::default()
            },
        );
        let outcome = run_with_progress(request, sequence).unwrap();
        assert_eq!(outcome.len(), 1);
    }
}
