//! Ollama HTTP client

use futures::stream::{BoxStream, StreamExt};
use tokio_util::codec::{FramedRead, LinesCodec};
use tokio_util::io::StreamReader;
use uacheck_core::models::{OllamaSettings, Verdict};
use uacheck_core::{Prompt, ResponseSchema};

use crate::types::{GenerateRequest, GenerateResponse, PullProgress, PullRequest};
use crate::{Error, Result};

/// Lazily decoded pull records, one per line, ending when the server
/// closes the connection.
pub type PullStream = BoxStream<'static, Result<PullProgress>>;

/// Ollama client. Built without any default credentials.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &OllamaSettings) -> Result<Self> {
        Self::new(settings.host.clone())
    }

    /// Start a streaming pull of `model`.
    pub async fn pull(&self, model: &str) -> Result<PullStream> {
        let url = format!("{}/api/pull", self.base_url);
        tracing::debug!("POST {} (model {})", url, model);

        let response = self
            .client
            .post(&url)
            .json(&PullRequest {
                model,
                stream: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(std::io::Error::other));
        let lines = FramedRead::new(StreamReader::new(bytes), LinesCodec::new());

        let records = lines.filter_map(|line| async move {
            match line {
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) => Some(serde_json::from_str::<PullProgress>(&line).map_err(Error::from)),
                Err(e) => Some(Err(Error::from(e))),
            }
        });

        Ok(records.boxed())
    }

    /// Run a single non-streaming generation constrained to the verdict
    /// schema.
    ///
    /// Returns the envelope's `response` field, or the whole body when the
    /// field is missing, null, or the body isn't JSON.
    pub async fn generate(&self, model: &str, prompt: &Prompt) -> Result<Verdict> {
        let url = format!("{}/api/generate", self.base_url);
        tracing::debug!("POST {} (model {}, {} byte prompt)", url, model, prompt.as_str().len());

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model,
                stream: false,
                prompt: prompt.as_str(),
                format: ResponseSchema,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(verdict_from_body(body))
    }
}

fn verdict_from_body(body: String) -> Verdict {
    match serde_json::from_str::<GenerateResponse>(&body) {
        Ok(GenerateResponse {
            response: Some(text),
        }) => Verdict::new(text),
        _ => {
            tracing::warn!("Generate response had no `response` field, using raw body");
            Verdict::new(body)
        }
    }
}
