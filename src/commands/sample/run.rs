use super::*;

pub fn run(args: SampleArgs) -> Result<()> {
    ensure_input_file(&args.train, "training set")?;
    ensure_input_file(&args.test, "test set")?;
    prepare_output_file(&args.output)?;
    if args.output.exists() {
        warn!(path = %args.output.display(), "output file exists and will be overwritten");
    }

    let train_records: Vec<LabeledText> = read_csv_records(&args.train)?;
    let test_records: Vec<LabeledText> = read_csv_records(&args.test)?;
    let train = AuthorGroups::from_records(&train_records);
    info!(
        train_texts = train.total_texts(),
        authors = train.len(),
        test_texts = test_records.len(),
        seed = args.seed,
        "building candidate sets"
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let candidate_sets = build_candidate_sets(&train, &test_records, &mut rng)?;

    write_json_pretty(&args.output, &candidate_sets)?;
    info!(
        path = %args.output.display(),
        entries = candidate_sets.len(),
        "wrote candidate sets"
    );

    if let Some(manifest_path) = &args.manifest_path {
        let manifest = SampleRunManifest {
            manifest_version: 1,
            run_id: format!("sample-{}", utc_compact_string(Utc::now())),
            generated_at: now_utc_string(),
            train: fingerprint(&args.train)?,
            test: fingerprint(&args.test)?,
            seed: args.seed,
            candidate_authors: train.authors(),
            entry_count: candidate_sets.len(),
            output_path: args.output.display().to_string(),
        };
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote sample manifest");
    }

    Ok(())
}
