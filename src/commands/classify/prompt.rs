use std::fs;
use std::path::Path;

use handlebars::Handlebars;

use super::*;

const BUILTIN_TEMPLATE: &str = include_str!("../../../prompts/authorship_prompt.hbs");
const TEMPLATE_NAME: &str = "authorship";

/// Handlebars prompt with `query_text` and `example_texts` (`author`, `text`)
/// in scope. Output is not HTML-escaped.
pub struct PromptTemplate {
    registry: Handlebars<'static>,
}

#[derive(Debug, Serialize)]
struct PromptContext<'a> {
    query_text: &'a str,
    example_texts: Vec<PromptExemplar<'a>>,
}

#[derive(Debug, Serialize)]
struct PromptExemplar<'a> {
    author: AuthorId,
    text: &'a str,
}

impl PromptTemplate {
    pub fn builtin() -> Result<Self> {
        Self::from_source(BUILTIN_TEMPLATE)
    }

    pub fn from_source(source: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, source)
            .context("failed to compile prompt template")?;
        Ok(Self { registry })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read prompt template {}", path.display()))?;
        Self::from_source(&source)
            .with_context(|| format!("invalid prompt template {}", path.display()))
    }

    pub fn render(&self, query_text: &str, exemplars: &[(AuthorId, &str)]) -> Result<String> {
        let context = PromptContext {
            query_text,
            example_texts: exemplars
                .iter()
                .map(|(author, text)| PromptExemplar {
                    author: *author,
                    text,
                })
                .collect(),
        };

        self.registry
            .render(TEMPLATE_NAME, &context)
            .context("failed to render prompt")
    }

    pub fn render_entry(&self, entry: &CandidateSetEntry) -> Result<String> {
        self.render(&entry.query_text, &entry.exemplars())
    }
}
