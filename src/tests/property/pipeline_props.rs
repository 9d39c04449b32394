//! Property-based tests for the search validation pipeline
//!
//! Tests invariants:
//! - Settled terms below the minimum length never reach the provider
//! - Admission iff the term is among the suggestions, ignoring case
//! - Any burst of edits inside the debounce window makes one request

use std::time::{Duration, Instant};

use proptest::prelude::*;

use crate::core::search::{Admission, PipelineConfig, SearchValidationPipeline};

const DEBOUNCE: Duration = Duration::from_millis(300);

fn pipeline() -> SearchValidationPipeline {
    SearchValidationPipeline::new(PipelineConfig {
        debounce: DEBOUNCE,
        min_term_chars: 2,
    })
}

/// Terms of at least two chars after trimming, Latin or Devanagari.
fn arb_term() -> impl Strategy<Value = String> {
    prop_oneof!["[a-zA-Z]{2,10}", "[क-ह]{2,6}"]
}

/// Same text with randomly flipped ASCII case.
fn recase(term: &str, mask: &[bool]) -> String {
    term.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_short_terms_never_fetch(term in "[ ]{0,3}[a-zA-Zक-ह]?[ ]{0,3}") {
        let start = Instant::now();
        let mut p = pipeline();
        p.on_input(&term, start);

        prop_assert!(p.poll(start + DEBOUNCE).is_none());
        prop_assert_eq!(p.admission(), Admission::Invalid);
        prop_assert!(p.suggestions().is_empty());
        prop_assert!(p.search().is_none());
    }

    #[test]
    fn prop_admission_iff_case_insensitive_member(
        term in arb_term(),
        mask in prop::collection::vec(any::<bool>(), 1..4),
        others in prop::collection::vec("[a-z]{3,9}", 0..5),
        include in any::<bool>(),
    ) {
        let start = Instant::now();
        let mut p = pipeline();
        p.on_input(&term, start);
        let request = p.poll(start + DEBOUNCE).expect("request for long term");

        let mut candidates: Vec<String> = others
            .into_iter()
            .filter(|o| o.to_lowercase() != term.to_lowercase())
            .collect();
        if include {
            candidates.push(recase(&term, &mask));
        }

        prop_assert!(p.apply_suggestions(request.seq, Ok(candidates)));
        prop_assert_eq!(p.is_admitted(), include);
        prop_assert_eq!(p.search().is_some(), include);
    }

    #[test]
    fn prop_burst_issues_single_request(
        terms in prop::collection::vec(arb_term(), 1..10),
        gaps in prop::collection::vec(0u64..300, 10),
    ) {
        let start = Instant::now();
        let mut p = pipeline();
        let mut now = start;
        let mut requests = Vec::new();

        for (i, term) in terms.iter().enumerate() {
            if i > 0 {
                // Strictly inside the window since the previous keystroke.
                now += Duration::from_millis(gaps[i % gaps.len()].min(299));
            }
            p.on_input(term, now);
            requests.extend(p.poll(now));
        }
        requests.extend(p.poll(now + DEBOUNCE));
        requests.extend(p.poll(now + DEBOUNCE * 2));

        prop_assert_eq!(requests.len(), 1);
        prop_assert_eq!(&requests[0].query.raw_term, terms.last().unwrap());
    }
}
