use super::*;

pub fn run(args: ScoreArgs) -> Result<()> {
    ensure_input_file(&args.input, "results file")?;

    let records: Vec<ResultRecord> = read_csv_records(&args.input)?;
    let parser = PredictionParser::new(args.parse_mode)?;
    let evaluation = evaluate_records(&records, &parser)?;

    for (key, value) in evaluation.report.entries() {
        println!("{key}: {value}");
    }
    info!(
        path = %args.input.display(),
        parse_mode = parser.mode().as_str(),
        total = evaluation.total_count,
        unparseable = evaluation.unparseable_count,
        empty_outputs = evaluation.empty_output_count,
        "scored model responses"
    );

    if let Some(report_path) = &args.report_path {
        let report = ScoreReport {
            manifest_version: 1,
            generated_at: now_utc_string(),
            input: fingerprint(&args.input)?,
            parse_mode: parser.mode().as_str().to_string(),
            total_count: evaluation.total_count,
            unparseable_count: evaluation.unparseable_count,
            empty_output_count: evaluation.empty_output_count,
            metrics: evaluation.report,
            per_class: evaluation.per_class,
        };
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote score report");
    }

    Ok(())
}
