use super::*;

pub fn run(args: ClassifyArgs) -> Result<()> {
    ensure_input_file(&args.candidate_sets, "candidate set file")?;
    prepare_output_file(&args.output)?;

    let candidate_sets: CandidateSets = read_json(&args.candidate_sets)?;
    let template = match &args.prompt_template {
        Some(path) => PromptTemplate::from_file(path)?,
        None => PromptTemplate::builtin()?,
    };
    let api_key = args
        .api_key
        .clone()
        .context("GEMINI_API_KEY is not set; export it or pass --api-key")?;
    let client = GeminiClient::new(&args.api_base_url, api_key)?;
    let policy = RetryPolicy {
        max_retries: args.max_retries,
        initial_delay: Duration::from_millis(args.initial_backoff_ms),
    };

    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let (_, worst_case_backoff) = policy.total_delay_bounds(policy.max_retries);
    info!(
        path = %args.candidate_sets.display(),
        entries = candidate_sets.len(),
        model = %args.model,
        max_retries = policy.max_retries,
        worst_case_backoff_secs = worst_case_backoff.as_secs(),
        "starting classification"
    );

    let mut classifier = PromptedClassifier::new(&client, &template, args.model.clone(), policy);
    let outcome = classifier.classify_all(&candidate_sets);

    println!("Saving results to CSV");
    write_csv_records(&args.output, &outcome.records)?;
    info!(
        path = %args.output.display(),
        total = outcome.records.len(),
        failed = outcome.failed_indices.len(),
        "wrote classification results"
    );

    if let Some(manifest_path) = &args.manifest_path {
        let manifest = ClassifyRunManifest {
            manifest_version: 1,
            run_id: format!("classify-{}", utc_compact_string(started_ts)),
            started_at,
            finished_at: now_utc_string(),
            model: args.model.clone(),
            candidate_sets: fingerprint(&args.candidate_sets)?,
            prompt_template: args
                .prompt_template
                .as_ref()
                .map(|path| path.display().to_string()),
            max_retries: policy.max_retries,
            initial_backoff_ms: args.initial_backoff_ms,
            total_count: outcome.records.len(),
            succeeded_count: outcome.records.len() - outcome.failed_indices.len(),
            failed_count: outcome.failed_indices.len(),
            output_path: args.output.display().to_string(),
        };
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote classify manifest");
    }

    Ok(())
}
