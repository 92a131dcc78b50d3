use std::collections::BTreeSet;

use super::*;
use crate::util::{read_json, write_csv_records};

fn text(label: AuthorId, body: &str) -> LabeledText {
    LabeledText {
        text: body.to_string(),
        label,
    }
}

fn training_fixture() -> Vec<LabeledText> {
    let mut records = Vec::new();
    for idx in 0..12 {
        records.push(text(2, &format!("author two post {idx}")));
        records.push(text(0, &format!("author zero post {idx}")));
        if idx % 2 == 0 {
            records.push(text(1, &format!("author one post {idx}")));
        }
    }
    records
}

fn test_fixture() -> Vec<LabeledText> {
    vec![
        text(1, "query by one"),
        text(0, "query by zero"),
        text(2, "query by two"),
        text(0, "another query by zero"),
    ]
}

#[test]
fn author_groups_partition_input_without_loss_or_duplication() {
    let records = training_fixture();
    let groups = AuthorGroups::from_records(&records);

    assert_eq!(groups.authors(), vec![0, 1, 2]);
    assert_eq!(groups.total_texts(), records.len());

    for (author, texts) in groups.iter() {
        assert!(texts.iter().all(|record| record.label == author));
    }

    let mut grouped = groups
        .iter()
        .flat_map(|(_, texts)| texts.iter().map(|record| record.text.clone()))
        .collect::<Vec<_>>();
    let mut original = records
        .iter()
        .map(|record| record.text.clone())
        .collect::<Vec<_>>();
    grouped.sort();
    original.sort();
    assert_eq!(grouped, original);
}

#[test]
fn author_groups_only_hold_authors_with_texts() {
    let groups = AuthorGroups::from_records(&[text(5, "only post")]);
    assert_eq!(groups.authors(), vec![5]);
    assert!(groups.iter().all(|(_, texts)| !texts.is_empty()));
}

#[test]
fn author_groups_keep_relative_order_within_each_author() {
    let records = vec![
        text(4, "first"),
        text(1, "alpha"),
        text(4, "second"),
        text(1, "beta"),
        text(4, "third"),
    ];
    let groups = AuthorGroups::from_records(&records);

    let fours = groups
        .get(4)
        .expect("author 4 grouped")
        .iter()
        .map(|record| record.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(fours, vec!["first", "second", "third"]);
    assert_eq!(groups.authors(), vec![1, 4]);
}

#[test]
fn author_groups_of_empty_input_are_empty() {
    let groups = AuthorGroups::from_records(&Vec::<LabeledText>::new());
    assert!(groups.is_empty());
    assert_eq!(groups.len(), 0);
    assert!(groups.authors().is_empty());
}

#[test]
fn candidate_sets_are_reproducible_for_a_fixed_seed() {
    let train = AuthorGroups::from_records(&training_fixture());
    let test = test_fixture();

    let mut first_rng = StdRng::seed_from_u64(42);
    let first = build_candidate_sets(&train, &test, &mut first_rng).expect("first build");
    let mut second_rng = StdRng::seed_from_u64(42);
    let second = build_candidate_sets(&train, &test, &mut second_rng).expect("second build");

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec_pretty(&first).expect("serialize first"),
        serde_json::to_vec_pretty(&second).expect("serialize second")
    );
}

#[test]
fn candidate_sets_cover_every_training_author_once_per_test_item() {
    let train_records = training_fixture();
    let train = AuthorGroups::from_records(&train_records);
    let test = test_fixture();

    let mut rng = StdRng::seed_from_u64(42);
    let sets = build_candidate_sets(&train, &test, &mut rng).expect("candidate sets");

    assert_eq!(sets.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    for (position, entry) in &sets {
        let query = &test[*position];
        assert_eq!(entry.query_author, query.label);
        assert_eq!(entry.query_text, query.text);
        assert_eq!(entry.candidate_authors, vec![0, 1, 2]);
        assert_eq!(
            entry.candidate_texts.keys().copied().collect::<Vec<_>>(),
            entry.candidate_authors
        );

        for (author, sampled) in &entry.candidate_texts {
            let pool = train.get(*author).expect("author grouped");
            assert!(pool.iter().any(|record| &record.text == sampled));
        }
        assert!(entry.candidate_texts.contains_key(&entry.query_author));
    }
}

#[test]
fn candidate_sets_draw_varied_exemplars_across_items() {
    let train = AuthorGroups::from_records(&training_fixture());
    let test = (0..30)
        .map(|idx| text(0, &format!("query {idx}")))
        .collect::<Vec<_>>();

    let mut rng = StdRng::seed_from_u64(42);
    let sets = build_candidate_sets(&train, &test, &mut rng).expect("candidate sets");

    let distinct = sets
        .values()
        .map(|entry| entry.candidate_texts[&0].clone())
        .collect::<BTreeSet<_>>();
    assert!(distinct.len() > 1, "sampling should not be constant");
}

#[test]
fn candidate_sets_require_training_authors() {
    let mut rng = StdRng::seed_from_u64(42);
    let error = build_candidate_sets(&AuthorGroups::default(), &test_fixture(), &mut rng)
        .expect_err("empty training grouping should fail");
    assert!(error.to_string().contains("no authors"));
}

#[test]
fn candidate_sets_reject_test_authors_missing_from_training() {
    let train = AuthorGroups::from_records(&[text(0, "zero"), text(1, "one")]);
    let test = vec![text(0, "fine"), text(9, "unknown author")];

    let mut rng = StdRng::seed_from_u64(42);
    let error =
        build_candidate_sets(&train, &test, &mut rng).expect_err("unknown author should fail");
    assert!(error.to_string().contains("author 9"));
}

#[test]
fn candidate_sets_for_empty_test_partition_are_empty() {
    let train = AuthorGroups::from_records(&training_fixture());
    let mut rng = StdRng::seed_from_u64(42);
    let sets = build_candidate_sets(&train, &[], &mut rng).expect("candidate sets");
    assert!(sets.is_empty());
}

#[test]
fn candidate_sets_serialize_with_stringified_index_keys() {
    let train = AuthorGroups::from_records(&[text(0, "zero"), text(1, "one")]);
    let mut rng = StdRng::seed_from_u64(42);
    let sets = build_candidate_sets(&train, &[text(1, "query")], &mut rng).expect("sets");

    let value = serde_json::to_value(&sets).expect("serialize");
    assert_eq!(value["0"]["query_author"], 1);
    assert_eq!(value["0"]["candidate_authors"], serde_json::json!([0, 1]));
    assert_eq!(value["0"]["candidate_texts"]["0"], "zero");
    assert_eq!(value["0"]["candidate_texts"]["1"], "one");
}

#[test]
fn run_writes_candidate_sets_that_load_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let train_path = dir.path().join("blog_train.csv");
    let test_path = dir.path().join("blog_test.csv");
    let output = dir.path().join("out").join("candidate_sets.json");
    let manifest_path = dir.path().join("out").join("sample_manifest.json");
    write_csv_records(&train_path, &training_fixture()).expect("train written");
    write_csv_records(&test_path, &test_fixture()).expect("test written");

    run(SampleArgs {
        train: train_path,
        test: test_path,
        output: output.clone(),
        seed: 42,
        manifest_path: Some(manifest_path.clone()),
    })
    .expect("sample run should succeed");

    let loaded: CandidateSets = read_json(&output).expect("candidate sets load");
    assert_eq!(loaded.len(), 4);
    assert_eq!(loaded[&2].query_text, "query by two");

    let manifest: serde_json::Value = read_json(&manifest_path).expect("manifest load");
    assert_eq!(manifest["entry_count"], 4);
    assert_eq!(manifest["seed"], 42);
}

#[test]
fn run_fails_before_sampling_when_an_input_is_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let train_path = dir.path().join("blog_train.csv");
    write_csv_records(&train_path, &training_fixture()).expect("train written");
    let output = dir.path().join("candidate_sets.json");

    let error = run(SampleArgs {
        train: train_path,
        test: dir.path().join("missing_test.csv"),
        output: output.clone(),
        seed: 42,
        manifest_path: None,
    })
    .expect_err("missing test set should fail");

    assert!(error.to_string().contains("test set does not exist"));
    assert!(!output.exists());
}
