use reqwest::{
    Body, StatusCode, Url,
    multipart::{Form, Part},
};
use serde::de::Error as _;

use crate::{
    config::Config,
    error::{Result, VidaskError},
    session::Submission,
};

const MAX_ERROR_BODY: usize = 300;

/// Client for the inference endpoint
#[derive(Debug, Clone)]
pub struct AskClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl AskClient {
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = config.endpoint_url()?;
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("vidask/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Upload the submission and return the answer text
    pub async fn ask(&self, submission: &Submission) -> Result<String> {
        let form = build_form(submission).await?;

        tracing::debug!(
            generation = submission.generation,
            endpoint = %self.endpoint,
            "posting question"
        );

        let mut request = self.http.post(self.endpoint.clone()).multipart(form);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(
            generation = submission.generation,
            status = status.as_u16(),
            bytes = body.len(),
            "response received"
        );

        decode_answer(status, &body)
    }
}

async fn build_form(submission: &Submission) -> Result<Form> {
    let mut form = Form::new();

    if let Some(file) = &submission.file {
        let handle = tokio::fs::File::open(file.path()).await?;
        let length = handle.metadata().await?.len();
        let part = Part::stream_with_length(Body::from(handle), length)
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())?;
        form = form.part("file", part);
    }

    Ok(form.text("question", submission.question.clone()))
}

/// Turn an endpoint response into the answer text.
///
/// Non-success statuses become [`VidaskError::Upstream`], a body that is not a
/// JSON object becomes [`VidaskError::DecodeError`], and an object whose `answer`
/// is absent or not a string becomes [`VidaskError::MissingAnswer`].
pub fn decode_answer(status: StatusCode, body: &[u8]) -> Result<String> {
    if !status.is_success() {
        return Err(VidaskError::Upstream {
            status: status.as_u16(),
            message: upstream_message(body),
        });
    }

    let payload: serde_json::Value = serde_json::from_slice(body)?;
    if !payload.is_object() {
        return Err(serde_json::Error::custom("expected a JSON object").into());
    }

    payload["answer"]
        .as_str()
        .map(str::to_string)
        .ok_or(VidaskError::MissingAnswer)
}

fn upstream_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["error", "detail", "message"] {
            if let Some(message) = value[key].as_str() {
                return message.to_string();
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return "empty response".to_string();
    }
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
