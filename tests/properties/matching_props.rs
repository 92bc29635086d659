use std::collections::BTreeSet;

use proptest::prelude::*;

use faqkit::test_utils::fixtures::{memory_engine, tenant};

const WORDS: &[&str] = &[
    "library", "open", "hours", "wifi", "password", "exam", "date", "holiday", "canteen", "close",
    "reset", "login",
];

/// Distinct questions, each a sorted set of words, so no two share a bag of
/// tokens.
fn arb_questions() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(
        prop::collection::btree_set(prop::sample::select(WORDS), 1..5),
        1..12,
    )
    .prop_map(|sets: BTreeSet<BTreeSet<&str>>| {
        sets.into_iter()
            .map(|words| words.into_iter().collect::<Vec<_>>().join(" "))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn stored_question_is_its_own_best_match(questions in arb_questions()) {
        let engine = memory_engine();
        let t = tenant("prop-exact");
        for (i, question) in questions.iter().enumerate() {
            engine.add_or_update(&t, question, &format!("answer {i}")).unwrap();
        }

        for (i, question) in questions.iter().enumerate() {
            let result = engine.query(&t, question).unwrap();
            prop_assert_eq!(result.question.as_deref(), Some(question.as_str()));
            prop_assert_eq!(result.answer, Some(format!("answer {i}")));
            prop_assert_eq!(result.score, 1.0);
        }
    }

    #[test]
    fn ranked_results_are_bounded_and_ordered(
        questions in arb_questions(),
        query in prop::collection::vec(prop::sample::select(WORDS), 1..4),
        min_score in 0.0f64..0.8,
        max_results in 1usize..6,
    ) {
        let engine = memory_engine();
        let t = tenant("prop-rank");
        for question in &questions {
            engine.add_or_update(&t, question, "a").unwrap();
        }

        let query = query.join(" ");
        let matches = engine
            .find_multiple_matches(&t, &query, min_score, max_results)
            .unwrap();
        prop_assert!(matches.len() <= max_results);
        for m in &matches {
            prop_assert!(m.score >= min_score);
            prop_assert!((0.0..=1.0 + 1e-9).contains(&m.score));
        }
        for pair in matches.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn repeated_add_keeps_one_entry(question in "[a-z]{1,12}", answers in prop::collection::vec("[a-z]{1,8}", 1..5)) {
        let engine = memory_engine();
        let t = tenant("prop-idempotent");
        let ids: BTreeSet<_> = answers
            .iter()
            .map(|answer| engine.add_or_update(&t, &question, answer).unwrap())
            .collect();
        prop_assert_eq!(ids.len(), 1);

        let entries = engine.list_all(&t).unwrap();
        prop_assert_eq!(entries.len(), 1);
        prop_assert_eq!(&entries[0].answer, answers.last().unwrap());
    }

    #[test]
    fn best_match_score_is_bounded(questions in arb_questions(), query in "\\PC{0,20}") {
        let engine = memory_engine();
        let t = tenant("prop-bounded");
        for question in &questions {
            engine.add_or_update(&t, question, "a").unwrap();
        }
        let result = engine.query(&t, &query).unwrap();
        prop_assert!(result.score >= 0.0 && result.score <= 1.0 + 1e-9);
        prop_assert_eq!(result.is_match(), result.answer.is_some());
    }
}
