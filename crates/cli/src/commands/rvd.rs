//! Commande d'encodage RVD

use anyhow::Result;
use console::style;
use tale_core::filters::rvd_repeats;
use tale_core::{count_strong_rvds, dna_to_rvd, GCode, Sequence};

pub fn run(dna: &str, g_code: GCode) -> Result<()> {
    let sequence = Sequence::parse(dna)?;
    let rvd = dna_to_rvd(sequence.as_bytes(), g_code);
    let repeats: Vec<&str> = rvd_repeats(&rvd).collect();

    println!("{} {}", style("ADN:").bold(), sequence);
    println!("{} {}", style(format!("RVD ({}):", g_code)).bold(), repeats.join(" "));
    println!("   Répétitions: {}", repeats.len());
    println!("   RVD forts (NN, HD): {}", count_strong_rvds(&rvd));

    Ok(())
}
