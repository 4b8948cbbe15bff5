//! Backends
//!
//! Translation-file fetching and question submission against the page's
//! own origin. The in-memory backend serves tests and the demo binary;
//! the optional `http` feature adds a blocking HTTP backend.

use std::collections::HashMap;

use qbox_i18n::I18nError;

use crate::api::{AskRequest, QuestionTransport, TransportResponse};
use crate::AppError;

/// Translation file boundary: GET `<locales_base>/<code>.json`
pub trait LocaleFetcher {
    /// Fetch a translation file by path
    fn fetch(&mut self, path: &str) -> Result<String, I18nError>;
}

/// In-memory backend implementing both boundaries, with request logs the
/// tests assert against.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    locales: HashMap<String, String>,
    /// Canned submission response
    response: Option<TransportResponse>,
    /// Every locale path fetched, in order
    pub locale_requests: Vec<String>,
    /// Every question submitted, in order
    pub questions: Vec<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a translation file at `<base>/<code>.json` for every base
    pub fn add_locale(&mut self, code: &str, json: &str) -> &mut Self {
        self.locales.insert(code.to_string(), json.to_string());
        self
    }

    /// Respond to submissions with this status and body
    pub fn respond_with(&mut self, status: u16, body: &str) -> &mut Self {
        self.response = Some(TransportResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    /// Number of fetches for one locale code
    pub fn fetch_count(&self, code: &str) -> usize {
        let suffix = format!("/{code}.json");
        self.locale_requests
            .iter()
            .filter(|p| p.ends_with(&suffix))
            .count()
    }

    fn code_from_path(path: &str) -> Option<&str> {
        path.rsplit('/').next()?.strip_suffix(".json")
    }
}

impl LocaleFetcher for MemoryBackend {
    fn fetch(&mut self, path: &str) -> Result<String, I18nError> {
        self.locale_requests.push(path.to_string());
        Self::code_from_path(path)
            .and_then(|code| self.locales.get(code))
            .cloned()
            .ok_or_else(|| I18nError::Fetch(format!("404 {path}")))
    }
}

impl QuestionTransport for MemoryBackend {
    fn ask(
        &mut self,
        _endpoint: &str,
        request: &AskRequest,
    ) -> Result<TransportResponse, AppError> {
        self.questions.push(request.question.clone());
        self.response
            .clone()
            .ok_or_else(|| AppError::Transport("no canned response".into()))
    }
}

/// Blocking HTTP backend against a real origin
#[cfg(feature = "http")]
pub mod http {
    use super::*;

    /// HTTP backend rooted at an origin
    #[derive(Debug)]
    pub struct HttpBackend {
        origin: String,
        client: reqwest::blocking::Client,
    }

    impl HttpBackend {
        pub fn new(origin: &str) -> Self {
            Self {
                origin: origin.trim_end_matches('/').to_string(),
                client: reqwest::blocking::Client::new(),
            }
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.origin, path)
        }
    }

    impl LocaleFetcher for HttpBackend {
        fn fetch(&mut self, path: &str) -> Result<String, I18nError> {
            let response = self
                .client
                .get(self.url(path))
                .send()
                .map_err(|e| I18nError::Fetch(e.to_string()))?;
            if !response.status().is_success() {
                return Err(I18nError::Fetch(format!("status {}", response.status())));
            }
            response.text().map_err(|e| I18nError::Fetch(e.to_string()))
        }
    }

    impl QuestionTransport for HttpBackend {
        fn ask(
            &mut self,
            endpoint: &str,
            request: &AskRequest,
        ) -> Result<TransportResponse, AppError> {
            let body = serde_json::to_string(request)
                .map_err(|e| AppError::Transport(e.to_string()))?;
            let response = self
                .client
                .post(self.url(endpoint))
                .header("content-type", "application/json")
                .body(body)
                .send()
                .map_err(|e| AppError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .map_err(|e| AppError::Transport(e.to_string()))?;
            Ok(TransportResponse { status, body })
        }
    }
}
