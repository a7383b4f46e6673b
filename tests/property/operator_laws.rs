// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Operator Laws
//!
//! Verifies the laws every operator must satisfy for all finite inputs:
//! positional mapping, ordered and unordered flattening, combination order,
//! zip truncation, and run isolation. Flows are driven to completion on a
//! test runtime per case.

use proptest::prelude::*;
use tokio_test::block_on;

use cim_streams::{combinators, Flow};

/// Generate a word of lowercase characters
fn word() -> impl Strategy<Value = String> {
    "[a-z]{0,6}"
}

/// Generate a sequence of words
fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word(), 0..6)
}

fn chars_of(words: &[String]) -> Vec<String> {
    words
        .iter()
        .flat_map(|w| w.chars().map(String::from))
        .collect()
}

fn split_chars(word: &str) -> Flow<String> {
    Flow::from_iter(word.chars().map(String::from).collect::<Vec<_>>())
}

proptest! {
    /// Property: map preserves length and applies the function positionally
    #[test]
    fn prop_map_is_positional(values in words()) {
        let flow = Flow::from_iter(values.clone()).map(|s| s.len());

        let output = block_on(flow.collect_to_list()).unwrap();

        let expected: Vec<usize> = values.iter().map(|s| s.len()).collect();
        prop_assert_eq!(output, expected);
    }

    /// Property: filter keeps exactly the matching values, in order
    #[test]
    fn prop_filter_keeps_matching_values(values in words()) {
        let flow = Flow::from_iter(values.clone()).filter(|s| s.len() > 3);

        let output = block_on(flow.collect_to_list()).unwrap();

        let expected: Vec<String> =
            values.into_iter().filter(|s| s.len() > 3).collect();
        prop_assert_eq!(output, expected);
    }

    /// Property: concat_map output equals the ordered concatenation of the
    /// inner outputs
    #[test]
    fn prop_concat_map_concatenates_in_source_order(values in words()) {
        let flow = Flow::from_iter(values.clone()).concat_map(|w| split_chars(&w));

        let output = block_on(flow.collect_to_list()).unwrap();

        prop_assert_eq!(output, chars_of(&values));
    }

    /// Property: flat_map output is the multiset union of the inner outputs
    #[test]
    fn prop_flat_map_emits_the_union_of_inner_outputs(values in words()) {
        let flow = Flow::from_iter(values.clone()).flat_map(|w| split_chars(&w));

        let mut output = block_on(flow.collect_to_list()).unwrap();
        output.sort_unstable();

        let mut expected = chars_of(&values);
        expected.sort_unstable();
        prop_assert_eq!(output, expected);
    }

    /// Property: concat emits all of the first source, then all of the second
    #[test]
    fn prop_concat_appends_sources(first in words(), second in words()) {
        let combined =
            combinators::concat(vec![Flow::from_iter(first.clone()), Flow::from_iter(second.clone())]);

        let output = block_on(combined.collect_to_list()).unwrap();

        let mut expected = first;
        expected.extend(second);
        prop_assert_eq!(output, expected);
    }

    /// Property: merge emits the multiset union of its sources
    #[test]
    fn prop_merge_emits_every_source_value(first in words(), second in words()) {
        let combined =
            combinators::merge(vec![Flow::from_iter(first.clone()), Flow::from_iter(second.clone())]);

        let mut output = block_on(combined.collect_to_list()).unwrap();
        output.sort_unstable();

        let mut expected = first;
        expected.extend(second);
        expected.sort_unstable();
        prop_assert_eq!(output, expected);
    }

    /// Property: merge_sequential output equals concat output
    #[test]
    fn prop_merge_sequential_equals_concat(first in words(), second in words()) {
        let sequential = combinators::merge_sequential(vec![
            Flow::from_iter(first.clone()),
            Flow::from_iter(second.clone()),
        ]);
        let concatenated = combinators::concat(vec![
            Flow::from_iter(first),
            Flow::from_iter(second),
        ]);

        let sequential_output = block_on(sequential.collect_to_list()).unwrap();
        let concatenated_output = block_on(concatenated.collect_to_list()).unwrap();

        prop_assert_eq!(sequential_output, concatenated_output);
    }

    /// Property: zip output length is the minimum of the source lengths
    #[test]
    fn prop_zip_truncates_to_the_shortest(first in words(), second in words()) {
        let expected_len = first.len().min(second.len());
        let combined = combinators::zip(
            Flow::from_iter(first.clone()),
            Flow::from_iter(second.clone()),
            |a, b| format!("{a}{b}"),
        );

        let output = block_on(combined.collect_to_list()).unwrap();

        prop_assert_eq!(output.len(), expected_len);
        for (i, value) in output.iter().enumerate() {
            prop_assert_eq!(value, &format!("{}{}", first[i], second[i]));
        }
    }

    /// Property: subscribing twice to one definition yields the same output
    #[test]
    fn prop_runs_are_isolated(values in words()) {
        let flow = Flow::from_iter(values).map(|s| s.to_uppercase());

        let first = block_on(flow.collect_to_list()).unwrap();
        let second = block_on(flow.collect_to_list()).unwrap();

        prop_assert_eq!(first, second);
    }
}
