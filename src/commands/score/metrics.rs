use super::*;

#[derive(Debug, Clone, Copy, Default)]
struct ClassCounts {
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
    support: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub total_count: usize,
    pub unparseable_count: usize,
    pub empty_output_count: usize,
    pub report: MetricsReport,
    pub per_class: Vec<ClassMetrics>,
}

/// Accuracy plus macro and micro precision/recall/F1.
///
/// Per-class and macro figures cover the distinct true labels. Micro figures
/// pool every prediction: a mismatch is a false negative for the true class
/// and a false positive for the predicted one, even when that prediction is
/// the unparseable sentinel or an id absent from the labels. Zero
/// denominators score 0.
pub fn compute_metrics(
    predictions: &[AuthorId],
    labels: &[AuthorId],
) -> Result<(MetricsReport, Vec<ClassMetrics>)> {
    if predictions.len() != labels.len() {
        bail!(
            "prediction count {} does not match label count {}",
            predictions.len(),
            labels.len()
        );
    }

    let mut counts = labels
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|label| (label, ClassCounts::default()))
        .collect::<BTreeMap<_, _>>();

    let mut correct = 0usize;
    for (prediction, label) in predictions.iter().zip(labels) {
        if let Some(class) = counts.get_mut(label) {
            class.support += 1;
            if prediction == label {
                class.true_positives += 1;
            } else {
                class.false_negatives += 1;
            }
        }
        if prediction == label {
            correct += 1;
        } else if let Some(class) = counts.get_mut(prediction) {
            class.false_positives += 1;
        }
    }

    let per_class = counts
        .iter()
        .map(|(author, class)| ClassMetrics {
            author: *author,
            precision: ratio(
                class.true_positives,
                class.true_positives + class.false_positives,
            ),
            recall: ratio(
                class.true_positives,
                class.true_positives + class.false_negatives,
            ),
            f1: f_score(
                class.true_positives,
                class.false_positives,
                class.false_negatives,
            ),
            support: class.support,
        })
        .collect::<Vec<_>>();

    let mismatches = labels.len() - correct;
    let pooled = ClassCounts {
        true_positives: correct,
        false_positives: mismatches,
        false_negatives: mismatches,
        support: labels.len(),
    };

    let report = MetricsReport {
        accuracy: ratio(correct, labels.len()),
        macro_precision: mean(per_class.iter().map(|class| class.precision)),
        macro_recall: mean(per_class.iter().map(|class| class.recall)),
        macro_f1: mean(per_class.iter().map(|class| class.f1)),
        micro_precision: ratio(
            pooled.true_positives,
            pooled.true_positives + pooled.false_positives,
        ),
        micro_recall: ratio(
            pooled.true_positives,
            pooled.true_positives + pooled.false_negatives,
        ),
        micro_f1: f_score(
            pooled.true_positives,
            pooled.false_positives,
            pooled.false_negatives,
        ),
    };

    Ok((report, per_class))
}

pub fn evaluate_records(records: &[ResultRecord], parser: &PredictionParser) -> Result<Evaluation> {
    let predictions = records
        .iter()
        .map(|record| parser.parse(&record.raw_model_output))
        .collect::<Vec<_>>();
    let labels = records
        .iter()
        .map(|record| record.true_author)
        .collect::<Vec<_>>();

    let (report, per_class) = compute_metrics(&predictions, &labels)?;

    Ok(Evaluation {
        total_count: records.len(),
        unparseable_count: predictions
            .iter()
            .filter(|prediction| **prediction == UNPARSEABLE_PREDICTION)
            .count(),
        empty_output_count: records
            .iter()
            .filter(|record| record.raw_model_output.trim().is_empty())
            .count(),
        report,
        per_class,
    })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn f_score(true_positives: usize, false_positives: usize, false_negatives: usize) -> f64 {
    ratio(
        2 * true_positives,
        2 * true_positives + false_positives + false_negatives,
    )
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0_f64, 0usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    if count == 0 { 0.0 } else { sum / count as f64 }
}
