use super::progress::ByteCounter;
use super::{ApiError, ApiResult, Endpoint, PdfChatBackend, ProgressSink, UPLOAD_FIELD};
use crate::config::AppConfig;
use crate::types::PdfFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const PDF_MIME: &str = "application/pdf";

#[cfg(not(target_arch = "wasm32"))]
const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// reqwest-backed client for the hosted PDF chat service.
///
/// No timeout is configured: a request only fails on a transport error or a
/// non-success status.
pub struct HttpBackend {
    client: Client,
    config: AppConfig,
}

#[derive(Serialize)]
struct AskRequest<'a> {
    user_question: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    message: String,
}

impl HttpBackend {
    pub fn new(config: AppConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, endpoint: Endpoint) -> String {
        self.config.url_for(endpoint.path())
    }
}

fn upload_form(files: Vec<PdfFile>, counter: &ByteCounter) -> ApiResult<Form> {
    let mut form = Form::new();
    for file in files {
        let name = file.name.clone();
        let part = pdf_part(file, counter)
            .file_name(name.clone())
            .mime_str(PDF_MIME)
            .map_err(|source| ApiError::InvalidPart { file: name, source })?;
        form = form.part(UPLOAD_FIELD, part);
    }
    Ok(form)
}

/// Streams the file in chunks, counting each one as the transport pulls it.
#[cfg(not(target_arch = "wasm32"))]
fn pdf_part(file: PdfFile, counter: &ByteCounter) -> Part {
    let length = file.byte_len();
    let counter = counter.clone();
    let bytes = file.bytes;
    let chunks = (0..bytes.len())
        .step_by(UPLOAD_CHUNK_BYTES)
        .map(move |start| {
            let end = (start + UPLOAD_CHUNK_BYTES).min(bytes.len());
            let chunk = bytes[start..end].to_vec();
            counter.advance(chunk.len());
            Ok::<_, std::io::Error>(chunk)
        });
    Part::stream_with_length(reqwest::Body::wrap_stream(futures::stream::iter(chunks)), length)
}

#[cfg(target_arch = "wasm32")]
fn pdf_part(file: PdfFile, _counter: &ByteCounter) -> Part {
    Part::bytes(file.bytes)
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PdfChatBackend for HttpBackend {
    async fn upload_pdfs(&self, files: Vec<PdfFile>, progress: ProgressSink) -> ApiResult<String> {
        let count = files.len();
        let total: u64 = files.iter().map(PdfFile::byte_len).sum();
        let counter = ByteCounter::new(total, progress);
        let form = upload_form(files, &counter)?;

        let url = self.url(Endpoint::UploadPdfs);
        tracing::debug!(%url, files = count, bytes = total, "uploading PDFs");
        let response = self.client.post(&url).multipart(form).send().await?;
        #[cfg(target_arch = "wasm32")]
        counter.complete();

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(ApiError::Status { status, body });
        }
        let parsed: UploadResponse = serde_json::from_str(&body)?;
        Ok(parsed.message)
    }

    async fn ask_question(&self, question: &str) -> ApiResult<String> {
        let url = self.url(Endpoint::AskQuestion);
        tracing::debug!(%url, "asking question");
        let response = self
            .client
            .post(&url)
            .json(&AskRequest {
                user_question: question,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }
        let parsed: AskResponse = serde_json::from_str(&body)?;
        Ok(parsed.answer)
    }
}
