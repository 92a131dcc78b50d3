use super::*;

pub const SYSTEM_INSTRUCTION: &str = "Respond with ONLY the label. Do not include additional text. The label MUST be among the provided potential authors.";

/// Attributes candidate sets one at a time through a [`TextGenerator`].
pub struct PromptedClassifier<'a, G> {
    generator: G,
    template: &'a PromptTemplate,
    model: String,
    policy: RetryPolicy,
    sleeper: Box<dyn Sleeper + 'a>,
    jitter: StdRng,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<ResultRecord>,
    pub failed_indices: Vec<usize>,
}

impl<'a, G: TextGenerator> PromptedClassifier<'a, G> {
    pub fn new(
        generator: G,
        template: &'a PromptTemplate,
        model: impl Into<String>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            generator,
            template,
            model: model.into(),
            policy,
            sleeper: Box::new(ThreadSleeper),
            jitter: StdRng::from_entropy(),
        }
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'a) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn with_jitter_seed(mut self, seed: u64) -> Self {
        self.jitter = StdRng::seed_from_u64(seed);
        self
    }

    /// Raw model text for one candidate set, returned verbatim.
    pub fn classify(&mut self, entry: &CandidateSetEntry) -> Result<String> {
        let prompt = self.template.render_entry(entry)?;
        let request = GenerationRequest {
            model: &self.model,
            system_instruction: SYSTEM_INSTRUCTION,
            prompt: &prompt,
        };

        let generator = &self.generator;
        let output = self
            .policy
            .execute(&mut self.jitter, self.sleeper.as_ref(), || {
                generator.generate(&request)
            })?;
        Ok(output)
    }

    /// Classifies every candidate set in index order. A failing item is
    /// logged and recorded with an empty `raw_model_output`; the batch always
    /// yields one record per candidate set.
    pub fn classify_all(&mut self, candidate_sets: &CandidateSets) -> BatchOutcome {
        let mut outcome = BatchOutcome {
            records: Vec::with_capacity(candidate_sets.len()),
            failed_indices: Vec::new(),
        };

        for (idx, entry) in candidate_sets {
            println!("Processing test example {idx}");

            let raw_model_output = match self.classify(entry) {
                Ok(output) => output,
                Err(err) => {
                    let message = format!("{err:#}");
                    warn!(index = *idx, error = %message, "classification failed");
                    println!("Error occurred while processing: {message}");
                    outcome.failed_indices.push(*idx);
                    String::new()
                }
            };

            println!("Model's response: {raw_model_output}");
            println!("Correct label: {}\n", entry.query_author);

            outcome.records.push(ResultRecord {
                input_text: entry.query_text.clone(),
                true_author: entry.query_author,
                raw_model_output,
            });
        }

        outcome
    }
}
