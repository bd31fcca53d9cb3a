//! Integration tests for the HTTP backend
//!
//! Exercises both endpoints against a wiremock server.

use pdfchat::api::{ApiError, HttpBackend, PdfChatBackend, ProgressSink, TransferProgress};
use pdfchat::config::AppConfig;
use pdfchat::types::PdfFile;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(AppConfig::new(&server.uri()).expect("mock server uri"))
}

fn pdf(name: &str, len: usize) -> PdfFile {
    PdfFile::new(name, vec![b'%'; len])
}

mod ask_tests {
    use super::*;

    #[tokio::test]
    async fn test_ask_posts_json_question() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask-question/"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "user_question": "What is X?" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "X is Y" })))
            .expect(1)
            .mount(&server)
            .await;

        let answer = backend_for(&server)
            .ask_question("What is X?")
            .await
            .expect("answer");
        assert_eq!(answer, "X is Y");
    }

    #[tokio::test]
    async fn test_ask_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask-question/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = backend_for(&server)
            .ask_question("anything")
            .await
            .unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ask_missing_answer_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask-question/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "nope" })))
            .mount(&server)
            .await;

        let err = backend_for(&server).ask_question("q").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_ask_transport_error() {
        let backend = HttpBackend::new(AppConfig::new("http://127.0.0.1:1").unwrap());
        let err = backend.ask_question("q").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}

mod upload_tests {
    use super::*;

    async fn upload_server(status: u16, body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload-pdfs/"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_upload_sends_one_part_per_file() {
        for count in [1usize, 2, 5] {
            let server = upload_server(200, json!({ "message": "PDFs processed" })).await;
            let files = (0..count)
                .map(|i| pdf(&format!("doc-{i}.pdf"), 32))
                .collect::<Vec<_>>();

            let message = backend_for(&server)
                .upload_pdfs(files, ProgressSink::discard())
                .await
                .expect("upload");
            assert_eq!(message, "PDFs processed");

            let requests = server.received_requests().await.expect("recording enabled");
            assert_eq!(requests.len(), 1);
            let body = String::from_utf8_lossy(&requests[0].body);
            assert_eq!(body.matches("name=\"pdf_docs\"").count(), count);
            for i in 0..count {
                assert!(body.contains(&format!("filename=\"doc-{i}.pdf\"")));
            }
            assert!(body.contains("application/pdf"));
        }
    }

    #[tokio::test]
    async fn test_upload_reports_byte_progress() {
        let server = upload_server(200, json!({ "message": "ok" })).await;
        let files = vec![pdf("big.pdf", 150_000), pdf("small.pdf", 10_000)];
        let (sink, mut events) = ProgressSink::channel();

        backend_for(&server)
            .upload_pdfs(files, sink)
            .await
            .expect("upload");

        let mut reports = Vec::new();
        while let Ok(Some(report)) = events.try_next() {
            reports.push(report);
        }
        assert!(reports.len() > 1, "expected chunked reports, got {reports:?}");
        assert!(reports.iter().all(|r| r.total == 160_000));
        assert!(reports.windows(2).all(|w| w[0].loaded < w[1].loaded));
        assert_eq!(
            reports.last().copied(),
            Some(TransferProgress::new(160_000, 160_000))
        );
    }

    #[tokio::test]
    async fn test_upload_requires_200() {
        let server = upload_server(201, json!({ "message": "created" })).await;
        let err = backend_for(&server)
            .upload_pdfs(vec![pdf("a.pdf", 8)], ProgressSink::discard())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { .. }));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload-pdfs/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let err = backend_for(&server)
            .upload_pdfs(vec![pdf("a.pdf", 8)], ProgressSink::discard())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
