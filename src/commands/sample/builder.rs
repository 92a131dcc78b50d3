use super::*;

/// Builds one candidate set per test record, in test order.
///
/// `rng` is consumed author-by-author within each test record, so a given
/// seed reproduces the same exemplar selection for the same inputs. The
/// query's own author stays in the candidate list.
pub fn build_candidate_sets<R: Rng + ?Sized>(
    train: &AuthorGroups,
    test: &[LabeledText],
    rng: &mut R,
) -> Result<CandidateSets> {
    if train.is_empty() {
        bail!("training partition has no authors to sample candidates from");
    }

    if let Some((position, example)) = test
        .iter()
        .enumerate()
        .find(|(_, example)| train.get(example.label).is_none())
    {
        bail!(
            "test example {position} has author {} which is absent from the training partition",
            example.label
        );
    }

    let candidate_authors = train.authors();
    let mut candidate_sets = CandidateSets::new();

    for (position, example) in test.iter().enumerate() {
        let candidate_texts = sample_one_text_per_author(train, rng);

        candidate_sets.insert(
            position,
            CandidateSetEntry {
                query_author: example.label,
                query_text: example.text.clone(),
                candidate_authors: candidate_authors.clone(),
                candidate_texts,
            },
        );
    }

    Ok(candidate_sets)
}

fn sample_one_text_per_author<R: Rng + ?Sized>(
    train: &AuthorGroups,
    rng: &mut R,
) -> BTreeMap<AuthorId, String> {
    train
        .iter()
        .map(|(author, texts)| {
            let pick = rng.gen_range(0..texts.len());
            (author, texts[pick].text.clone())
        })
        .collect()
}
