use std::cmp::Ordering;
use std::collections::HashMap;

use anyhow::{Result, bail};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::cli::PrepareArgs;
use crate::model::{AuthorId, BlogPost, LabeledText, PrepareRunManifest};
use crate::util::{
    ensure_input_file, fingerprint, now_utc_string, read_csv_records, utc_compact_string,
    write_csv_records, write_json_pretty,
};

const LINK_PLACEHOLDER: &str = "urlLink";
const HOLDOUT_SHARE: f64 = 0.2;
const TEST_SHARE_OF_HOLDOUT: f64 = 0.5;

pub fn run(args: PrepareArgs) -> Result<()> {
    ensure_input_file(&args.blogtext, "blog corpus")?;
    if args.num_authors == 0 {
        bail!("--num-authors must be at least 1");
    }

    info!(path = %args.blogtext.display(), num_authors = args.num_authors, "loading blog corpus");
    let posts: Vec<BlogPost> = read_csv_records(&args.blogtext)?;
    let corpus = preprocess(posts, args.num_authors)?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let partitions = split_partitions(corpus.records, &mut rng);

    println!("Size of training set: {}", partitions.train.len());
    println!("Size of validation set: {}", partitions.val.len());
    println!("Size of test set: {}", partitions.test.len());

    let train_path = args.output_dir.join("blog_train.csv");
    let val_path = args.output_dir.join("blog_val.csv");
    let test_path = args.output_dir.join("blog_test.csv");
    write_csv_records(&train_path, &partitions.train)?;
    write_csv_records(&val_path, &partitions.val)?;
    write_csv_records(&test_path, &partitions.test)?;
    info!(output_dir = %args.output_dir.display(), "wrote train/validation/test partitions");

    if let Some(manifest_path) = &args.manifest_path {
        let manifest = PrepareRunManifest {
            manifest_version: 1,
            run_id: format!("prepare-{}", utc_compact_string(Utc::now())),
            generated_at: now_utc_string(),
            source: fingerprint(&args.blogtext)?,
            seed: args.seed,
            num_authors: args.num_authors,
            author_ids: corpus.author_ids,
            train_count: partitions.train.len(),
            val_count: partitions.val.len(),
            test_count: partitions.test.len(),
        };
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote prepare manifest");
    }

    Ok(())
}

#[derive(Debug)]
pub struct PreparedCorpus {
    /// Raw author ids, indexed by their assigned label.
    pub author_ids: Vec<String>,
    pub records: Vec<LabeledText>,
}

#[derive(Debug, Default)]
pub struct Partitions {
    pub train: Vec<LabeledText>,
    pub val: Vec<LabeledText>,
    pub test: Vec<LabeledText>,
}

pub fn preprocess(posts: Vec<BlogPost>, num_authors: usize) -> Result<PreparedCorpus> {
    let author_ids = select_top_authors(&posts, num_authors);
    if author_ids.is_empty() {
        bail!("blog corpus contains no posts");
    }

    let label_by_id: HashMap<&str, AuthorId> = author_ids
        .iter()
        .enumerate()
        .map(|(label, id)| (id.as_str(), label as AuthorId))
        .collect();

    let records = posts
        .iter()
        .filter_map(|post| {
            label_by_id.get(post.id.as_str()).map(|label| LabeledText {
                text: post.text.replace(LINK_PLACEHOLDER, ""),
                label: *label,
            })
        })
        .collect::<Vec<_>>();

    info!(
        authors = author_ids.len(),
        records = records.len(),
        "restricted corpus to most prolific authors"
    );

    Ok(PreparedCorpus {
        author_ids,
        records,
    })
}

/// Most prolific author ids first; equal counts fall back to ascending id.
pub fn select_top_authors(posts: &[BlogPost], num_authors: usize) -> Vec<String> {
    let mut counts = HashMap::<&str, usize>::new();
    for post in posts {
        *counts.entry(post.id.as_str()).or_default() += 1;
    }

    let mut ranked = counts.into_iter().collect::<Vec<_>>();
    ranked.sort_by(|left, right| {
        right
            .1
            .cmp(&left.1)
            .then_with(|| compare_author_ids(left.0, right.0))
    });

    ranked
        .into_iter()
        .take(num_authors)
        .map(|(id, _)| id.to_string())
        .collect()
}

fn compare_author_ids(left: &str, right: &str) -> Ordering {
    match (left.trim().parse::<i64>(), right.trim().parse::<i64>()) {
        (Ok(left_num), Ok(right_num)) => left_num.cmp(&right_num),
        _ => left.cmp(right),
    }
}

pub fn split_partitions(mut records: Vec<LabeledText>, rng: &mut StdRng) -> Partitions {
    records.shuffle(rng);

    let holdout_len = share_of(records.len(), HOLDOUT_SHARE);
    let holdout = records.split_off(records.len() - holdout_len);

    let mut val = holdout;
    let test_len = share_of(val.len(), TEST_SHARE_OF_HOLDOUT);
    let test = val.split_off(val.len() - test_len);

    Partitions {
        train: records,
        val,
        test,
    }
}

fn share_of(len: usize, share: f64) -> usize {
    ((len as f64) * share).ceil().min(len as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, text: &str) -> BlogPost {
        BlogPost {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    fn labeled(count: usize) -> Vec<LabeledText> {
        (0..count)
            .map(|idx| LabeledText {
                text: format!("post {idx}"),
                label: (idx % 3) as AuthorId,
            })
            .collect()
    }

    #[test]
    fn select_top_authors_ranks_by_count_then_id() {
        let posts = vec![
            post("900", "a"),
            post("12", "b"),
            post("900", "c"),
            post("7", "d"),
            post("12", "e"),
            post("31", "f"),
        ];

        assert_eq!(select_top_authors(&posts, 3), vec!["12", "900", "7"]);
        assert_eq!(select_top_authors(&posts, 10).len(), 4);
    }

    #[test]
    fn preprocess_relabels_by_rank_and_strips_link_placeholders() {
        let posts = vec![
            post("5", "see urlLink here"),
            post("8", "dropped author"),
            post("5", "second"),
            post("3", "other urlLinkurlLink"),
            post("3", "third"),
            post("3", "fourth"),
        ];

        let corpus = preprocess(posts, 2).expect("corpus should be prepared");
        assert_eq!(corpus.author_ids, vec!["3", "5"]);
        assert_eq!(
            corpus.records,
            vec![
                LabeledText {
                    text: "see  here".to_string(),
                    label: 1
                },
                LabeledText {
                    text: "second".to_string(),
                    label: 1
                },
                LabeledText {
                    text: "other ".to_string(),
                    label: 0
                },
                LabeledText {
                    text: "third".to_string(),
                    label: 0
                },
                LabeledText {
                    text: "fourth".to_string(),
                    label: 0
                },
            ]
        );
    }

    #[test]
    fn preprocess_rejects_empty_corpus() {
        let error = preprocess(Vec::new(), 5).expect_err("empty corpus should fail");
        assert!(error.to_string().contains("no posts"));
    }

    #[test]
    fn split_partitions_uses_eighty_ten_ten_with_ceiling_holdouts() {
        let mut rng = StdRng::seed_from_u64(42);
        let partitions = split_partitions(labeled(10), &mut rng);
        assert_eq!(
            (partitions.train.len(), partitions.val.len(), partitions.test.len()),
            (8, 1, 1)
        );

        let mut rng = StdRng::seed_from_u64(42);
        let partitions = split_partitions(labeled(7), &mut rng);
        assert_eq!(
            (partitions.train.len(), partitions.val.len(), partitions.test.len()),
            (5, 1, 1)
        );
    }

    #[test]
    fn split_partitions_is_disjoint_complete_and_seeded() {
        let mut first_rng = StdRng::seed_from_u64(7);
        let first = split_partitions(labeled(25), &mut first_rng);
        let mut second_rng = StdRng::seed_from_u64(7);
        let second = split_partitions(labeled(25), &mut second_rng);
        assert_eq!(first.train, second.train);
        assert_eq!(first.val, second.val);
        assert_eq!(first.test, second.test);

        let mut texts = first
            .train
            .iter()
            .chain(&first.val)
            .chain(&first.test)
            .map(|record| record.text.clone())
            .collect::<Vec<_>>();
        texts.sort();
        let mut expected = labeled(25)
            .into_iter()
            .map(|record| record.text)
            .collect::<Vec<_>>();
        expected.sort();
        assert_eq!(texts, expected);
    }
}
