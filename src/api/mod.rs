//! Client side of the PDF chat backend.
//!
//! The backend exposes two endpoints:
//!
//! - `POST /upload-pdfs/` takes a multipart body with one `pdf_docs` part per file
//! - `POST /ask-question/` takes `{ "user_question": ... }` and answers with `{ "answer": ... }`
//!
//! [`PdfChatBackend`] is the seam the UI talks to; [`HttpBackend`] is the
//! reqwest implementation used at runtime.

mod client;
mod progress;

use async_trait::async_trait;
use std::ops::Deref;
use std::sync::Arc;
use thiserror::Error;

use crate::types::PdfFile;

pub use client::HttpBackend;
pub use progress::{ProgressSink, TransferProgress};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    UploadPdfs,
    AskQuestion,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::UploadPdfs => "/upload-pdfs/",
            Endpoint::AskQuestion => "/ask-question/",
        }
    }
}

/// Multipart field name the backend expects for every uploaded file.
pub const UPLOAD_FIELD: &str = "pdf_docs";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not build upload part for {file}: {source}")]
    InvalidPart {
        file: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PdfChatBackend: Send + Sync {
    /// Uploads every file in one multipart request and returns the server's status message.
    async fn upload_pdfs(&self, files: Vec<PdfFile>, progress: ProgressSink) -> ApiResult<String>;

    /// Sends a question and returns the answer text.
    async fn ask_question(&self, question: &str) -> ApiResult<String>;
}

/// Shared handle to the active backend, handed to the views through context.
#[derive(Clone)]
pub struct BackendHandle(Arc<dyn PdfChatBackend>);

impl BackendHandle {
    pub fn new(backend: impl PdfChatBackend + 'static) -> Self {
        Self(Arc::new(backend))
    }
}

impl Deref for BackendHandle {
    type Target = dyn PdfChatBackend;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
