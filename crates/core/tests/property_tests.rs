//! Tests de propriétés sur les primitives de séquence et les filtres

use bio::seq_analysis::gc::gc_content;
use proptest::prelude::*;
use tale_core::filters::{dna_to_rvd, has_consecutive_at, rvd_repeats};
use tale_core::sequence::reverse_complement;
use tale_core::{find_single_tales, GCode, GcPrefixArray, NoProgress, Orientation, SearchConfig, Sequence, Strand};

fn longest_at_run(dna: &[u8]) -> usize {
    dna.split(|b| !matches!(b, b'A' | b'T'))
        .map(<[u8]>::len)
        .max()
        .unwrap_or(0)
}

fn g_code() -> impl Strategy<Value = GCode> {
    prop_oneof![Just(GCode::Nh), Just(GCode::Nn)]
}

proptest! {
    #[test]
    fn prop_reverse_complement_is_involution(dna in "[ACGT]{0,300}") {
        let once = reverse_complement(dna.as_bytes());
        prop_assert_eq!(reverse_complement(&once), dna.as_bytes());
    }

    #[test]
    fn prop_gc_percentage_matches_brute_force(dna in "[ACGTN]{1,300}") {
        let bytes = dna.as_bytes();
        let gc = GcPrefixArray::build(bytes);
        let expected = bytes.iter().filter(|&&b| b == b'G' || b == b'C').count() as f64
            * 100.0
            / bytes.len() as f64;
        prop_assert!((gc.percentage(0, bytes.len()) - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_gc_percentage_agrees_with_bio(dna in "[ACGT]{1,300}") {
        let bytes = dna.as_bytes();
        let ours = GcPrefixArray::build(bytes).percentage(0, bytes.len());
        let theirs = f64::from(gc_content(bytes)) * 100.0;
        prop_assert!((ours - theirs).abs() < 1e-3);
    }

    #[test]
    fn prop_rvd_has_two_chars_per_base(dna in "[ACGTN]{0,200}", code in g_code()) {
        let rvd = dna_to_rvd(dna.as_bytes(), code);
        prop_assert_eq!(rvd.len(), 2 * dna.len());
        prop_assert_eq!(rvd_repeats(&rvd).count(), dna.len());
    }

    #[test]
    fn prop_consecutive_at_iff_run_of_seven(dna in "[ACGT]{0,60}") {
        let bytes = dna.as_bytes();
        prop_assert_eq!(has_consecutive_at(bytes), longest_at_run(bytes) >= 7);
    }

    #[test]
    fn prop_forward_sites_are_anchored(dna in "[ACGT]{16,120}") {
        let seq = Sequence::parse(&dna).unwrap();
        let config = SearchConfig {
            min_tale_length: 10,
            max_tale_length: 14,
            skip_cpg: false,
            ..Default::default()
        };
        let found = find_single_tales(&seq, &config, Orientation::Forward, &mut NoProgress).unwrap();
        for site in &found {
            prop_assert_eq!(site.strand, Strand::Forward);
            prop_assert_eq!(seq.as_bytes()[site.start - 1], b'T');
            prop_assert_eq!(site.end - site.start, site.length);
        }
    }

    #[test]
    fn prop_reverse_sites_stay_in_bounds(dna in "[ACGT]{1,120}") {
        let seq = Sequence::parse(&dna).unwrap();
        let config = SearchConfig {
            min_tale_length: 10,
            max_tale_length: 12,
            skip_cpg: false,
            skip_consecutive_at: false,
            min_gc: 0,
            ..Default::default()
        };
        let found = find_single_tales(&seq, &config, Orientation::Reverse, &mut NoProgress).unwrap();
        for site in &found {
            prop_assert!(site.start < site.end);
            prop_assert!(site.end < seq.len());
        }
    }
}

#[test]
fn test_at_run_boundary() {
    assert!(!has_consecutive_at(b"GATATATG"));
    assert!(has_consecutive_at(b"GATATATAG"));
    assert!(!has_consecutive_at(b"AAAAAA"));
    assert!(has_consecutive_at(b"AAAAAAA"));
}
