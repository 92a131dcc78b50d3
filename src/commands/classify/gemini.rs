use serde::Deserialize;

use super::*;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            bail!("GEMINI_API_KEY is empty");
        }

        // No client-side deadline: the service enforces its own.
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        debug!(model = request.model, "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint_url(request.model))
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(request))
            .send()
            .map_err(|err| GenerationError::Transport {
                message: err.to_string(),
            })?;

        let status = response.status();
        let body = response.text().map_err(|err| GenerationError::Transport {
            message: format!("failed to read response body: {err}"),
        })?;

        if !status.is_success() {
            return Err(map_http_error(status.as_u16(), &body));
        }

        parse_response_text(&body)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentBody<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

fn request_body<'a>(request: &GenerationRequest<'a>) -> GenerateContentBody<'a> {
    GenerateContentBody {
        system_instruction: Content {
            role: None,
            parts: vec![TextPart {
                text: request.system_instruction,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![TextPart {
                text: request.prompt,
            }],
        }],
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

pub fn map_http_error(status: u16, body: &str) -> GenerationError {
    if status == 429 || body.contains(RESOURCE_EXHAUSTED) {
        return GenerationError::RateLimited {
            message: format!("HTTP {status}: {}", body.trim()),
        };
    }

    GenerationError::Api {
        status,
        message: body.trim().to_string(),
    }
}

/// Concatenated text parts of the first candidate, untrimmed.
pub fn parse_response_text(body: &str) -> Result<String, GenerationError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|err| GenerationError::ResponseParse {
            message: err.to_string(),
        })?;

    let texts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if texts.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    Ok(texts.concat())
}
