use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use triage_engine::{
    Attachment, ClientSettings, FailureKind, HistoryCounts, HistoryFilter, Payload,
    ReqwestClient, TriageApi,
};
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestClient {
    client_with(server, ClientSettings::default())
}

fn client_with(server: &MockServer, settings: ClientSettings) -> ReqwestClient {
    ReqwestClient::new(ClientSettings {
        base_url: format!("{}/api", server.uri()),
        ..settings
    })
    .expect("client")
}

fn attachment(name: &str, media_type: &str) -> Attachment {
    Attachment {
        file_name: name.to_string(),
        media_type: media_type.to_string(),
        bytes: b"Dear team, the server is down.".to_vec(),
    }
}

#[tokio::test]
async fn classify_text_posts_email_text_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/process-text"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"email_text\""))
        .and(body_string_contains("Hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "category": "Produtivo",
            "confidence": 0.87,
            "email_type": "support",
            "suggested_response": "Thanks...",
            "input_type": "text",
            "saved_id": 4
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .classify(Payload::Text {
            email_text: "Hello".to_string(),
        })
        .await
        .expect("classify ok");

    assert!(response.is_success());
    assert_eq!(response.category.as_deref(), Some("Produtivo"));
    assert_eq!(response.confidence, Some(0.87));
    assert_eq!(response.suggested_response.as_deref(), Some("Thanks..."));
    assert_eq!(response.saved_id, Some(4));
}

#[tokio::test]
async fn classify_pdf_uploads_named_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/process-pdf"))
        .and(body_string_contains("name=\"file\"; filename=\"report.pdf\""))
        .and(body_string_contains("application/pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "category": "Improdutivo",
            "confidence": 0.6
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .classify(Payload::Pdf(attachment("report.pdf", "application/pdf")))
        .await
        .expect("classify ok");
    assert_eq!(response.category.as_deref(), Some("Improdutivo"));
}

#[tokio::test]
async fn classify_txt_uses_txt_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/process-txt"))
        .and(body_string_contains("filename=\"mail.txt\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "error": "could not read file"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .classify(Payload::Txt(attachment("mail.txt", "text/plain")))
        .await
        .expect("classify ok");
    assert!(!response.is_success());
    assert_eq!(response.error.as_deref(), Some("could not read file"));
}

#[tokio::test]
async fn error_body_detail_is_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/process-pdf"))
        .respond_with(ResponseTemplate::new(413).set_body_json(json!({
            "detail": "file too large"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .classify(Payload::Pdf(attachment("big.pdf", "application/pdf")))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(413));
    assert_eq!(err.detail.as_deref(), Some("file too large"));
}

#[tokio::test]
async fn error_without_body_has_no_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/process-text"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .classify(Payload::Text {
            email_text: "x".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.detail, None);
}

#[tokio::test]
async fn list_all_history_hits_trailing_slash_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 2,
                "text_preview": "Preciso de suporte",
                "category": "Produtivo",
                "ai_confidence": 0.913,
                "response_preview": "Obrigado pelo contato",
                "analyzed_at": "2024-05-01T10:00:00",
                "email_type": "text"
            },
            {
                "id": 1,
                "text_preview": "Feliz natal",
                "category": "Improdutivo",
                "ai_confidence": null,
                "response_preview": "Obrigado!",
                "analyzed_at": null,
                "email_type": "pdf"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let entries = client_for(&server)
        .list_history(HistoryFilter::All)
        .await
        .expect("history ok");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, 2);
    assert_eq!(entries[0].ai_confidence, Some(0.913));
    assert_eq!(entries[1].ai_confidence, None);
    assert_eq!(entries[1].email_type.as_deref(), Some("pdf"));
}

#[tokio::test]
async fn list_history_accepts_camel_case_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history/category/Improdutivo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 9,
                "category": "Improdutivo",
                "aiConfidence": 0.5,
                "textPreview": "oi",
                "responsePreview": "ola"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let entries = client_for(&server)
        .list_history(HistoryFilter::Category("Improdutivo".to_string()))
        .await
        .expect("history ok");
    assert_eq!(entries[0].text_preview.as_deref(), Some("oi"));
    assert_eq!(entries[0].ai_confidence, Some(0.5));
}

#[tokio::test]
async fn history_stats_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 10,
            "produtivos": 7,
            "improdutivos": 3
        })))
        .mount(&server)
        .await;

    let stats = client_for(&server).history_stats().await.expect("stats ok");
    assert_eq!(
        stats,
        HistoryCounts {
            total: 10,
            produtivos: 7,
            improdutivos: 3
        }
    );
}

#[tokio::test]
async fn malformed_json_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_history(HistoryFilter::All)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_classification_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/process-text"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"status": "success"})),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    };
    let err = client_with(&server, settings)
        .classify(Payload::Text {
            email_text: "Hello".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("01234567890"))
        .mount(&server)
        .await;

    let settings = ClientSettings {
        max_bytes: 10,
        ..ClientSettings::default()
    };
    let err = client_with(&server, settings)
        .history_stats()
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn unparsable_base_url_fails_before_sending() {
    let client = ReqwestClient::new(ClientSettings {
        base_url: "not a url".to_string(),
        ..ClientSettings::default()
    })
    .expect("client");

    let err = client.history_stats().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
