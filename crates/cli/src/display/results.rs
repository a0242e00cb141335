//! Affichage des résultats de recherche

use serde::Serialize;
use tabled::{Table, Tabled};
use tale_core::{SearchConfig, SearchOutcome, SearchRequest, Sequence, TaleCandidate, TalePairResult};

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "Start")]
    start: usize,
    #[tabled(rename = "End")]
    end: usize,
    #[tabled(rename = "Strand")]
    strand: String,
    #[tabled(rename = "Length")]
    length: usize,
    #[tabled(rename = "GC%")]
    gc_percent: String,
    #[tabled(rename = "DNA")]
    dna: String,
    #[tabled(rename = "RVD")]
    rvd: String,
}

#[derive(Tabled)]
struct PairRow {
    #[tabled(rename = "Orientation")]
    orientation: String,
    #[tabled(rename = "Left")]
    left: String,
    #[tabled(rename = "Right")]
    right: String,
    #[tabled(rename = "Spacer")]
    spacer: usize,
    #[tabled(rename = "Length")]
    length: usize,
    #[tabled(rename = "Left RVD")]
    left_rvd: String,
    #[tabled(rename = "Right RVD")]
    right_rvd: String,
}

fn coordinates(candidate: &TaleCandidate) -> String {
    format!("{}..{} ({})", candidate.start, candidate.end, candidate.strand)
}

/// Tableau des sites uniques
pub fn candidates_table(candidates: &[TaleCandidate]) -> Table {
    let rows = candidates.iter().map(|c| CandidateRow {
        start: c.start,
        end: c.end,
        strand: c.strand.to_string(),
        length: c.length,
        gc_percent: format!("{:.1}", c.gc_content),
        dna: c.dna.clone(),
        rvd: c.rvd.clone(),
    });
    Table::new(rows)
}

/// Tableau des paires
pub fn pairs_table(pairs: &[TalePairResult]) -> Table {
    let rows = pairs.iter().map(|p| PairRow {
        orientation: p.orientation.to_string(),
        left: coordinates(&p.left),
        right: coordinates(&p.right),
        spacer: p.spacer_length,
        length: p.tale_length,
        left_rvd: p.left.rvd.clone(),
        right_rvd: p.right.rvd.clone(),
    });
    Table::new(rows)
}

/// Rapport JSON d'une recherche
#[derive(Serialize)]
pub struct SearchReport<'a> {
    pub fingerprint: &'a str,
    pub mode: &'static str,
    pub orientation: &'static str,
    pub sequence_length: usize,
    pub config: &'a SearchConfig,
    pub result_count: usize,
    pub results: &'a SearchOutcome,
}

impl<'a> SearchReport<'a> {
    pub fn new(
        fingerprint: &'a str,
        request: &'a SearchRequest,
        sequence: &Sequence,
        outcome: &'a SearchOutcome,
    ) -> Self {
        Self {
            fingerprint,
            mode: request.mode.name(),
            orientation: request.mode.orientation_str(),
            sequence_length: sequence.len(),
            config: &request.config,
            result_count: outcome.len(),
            results: outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tale_core::{GCode, NoProgress, PairOrientation, SearchMode, Strand};

    fn candidate(start: usize, strand: Strand) -> TaleCandidate {
        TaleCandidate {
            start,
            end: start + 3,
            strand,
            dna: "ACG".to_string(),
            rvd: "NIHDNH".to_string(),
            length: 3,
            gc_content: 66.666,
            g_code: GCode::Nh,
        }
    }

    #[test]
    fn test_candidates_table() {
        let table = candidates_table(&[candidate(4, Strand::Reverse)]).to_string();
        assert!(table.contains("Strand"));
        assert!(table.contains("NIHDNH"));
        assert!(table.contains("66.7"));
    }

    #[test]
    fn test_pairs_table() {
        let pair = TalePairResult {
            left: candidate(0, Strand::Forward),
            right: candidate(20, Strand::Reverse),
            spacer_length: 17,
            tale_length: 3,
            orientation: PairOrientation::Convergent,
            g_code: GCode::Nh,
        };
        let table = pairs_table(&[pair]).to_string();
        assert!(table.contains("convergent"));
        assert!(table.contains("0..3 (+)"));
        assert!(table.contains("20..23 (-)"));
    }

    #[test]
    fn test_report_json() {
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
        let outcome = request.run(&sequence, &mut NoProgress).unwrap();
        let fingerprint = request.fingerprint(&sequence);
        let report = SearchReport::new(&fingerprint, &request, &sequence, &outcome);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "single");
        assert_eq!(json["orientation"], "forward");
        assert_eq!(json["sequence_length"], 21);
        assert_eq!(json["result_count"], 1);
        assert_eq!(json["results"][0]["start"], 1);
        assert_eq!(json["results"][0]["strand"], "+");
        assert_eq!(json["config"]["min_tale_length"], 19);
    }
}
