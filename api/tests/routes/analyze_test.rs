#[cfg(test)]
mod tests {
    use crate::helpers::{MultipartBody, json_body, make_test_app, make_test_app_with_limits};
    use analyzer::test_helpers::{
        CANNED_ARGUMENTATION, CANNED_STRUKTUR, CANNED_ZUSAMMENFASSUNG, StubModelClient,
        canned_feedback_response, docx_fixture, pdf_fixture,
    };
    use analyzer::{AnalyzerError, PipelineOptions};
    use axum::http::StatusCode;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    const STATEMENT: &str = "Die globale Erwärmung ist ein wichtiges Thema.";

    fn canned_stub() -> Arc<StubModelClient> {
        Arc::new(StubModelClient::new(canned_feedback_response()))
    }

    #[tokio::test]
    async fn inline_text_returns_all_four_sections() {
        let stub = canned_stub();
        let app = make_test_app(stub.clone());

        let req = MultipartBody::new().text("text", STATEMENT).into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Feedback erstellt");

        let data = &json["data"];
        assert!(data["feedback"]["sprache"].as_str().unwrap().contains("Satzbau"));
        assert_eq!(data["feedback"]["struktur"], CANNED_STRUKTUR);
        assert_eq!(data["feedback"]["argumentation"], CANNED_ARGUMENTATION);
        assert_eq!(data["feedback"]["zusammenfassung"], CANNED_ZUSAMMENFASSUNG);
        assert_eq!(data["ai_used"], true);
        assert_eq!(data["source"], "text");
        assert_eq!(data["text_length"], STATEMENT.chars().count() as u64);
        assert!(data["analyzed_at"].is_string());

        assert_eq!(stub.calls(), 1);
        assert!(stub.last_request().unwrap().user().contains(STATEMENT));
    }

    #[tokio::test]
    async fn txt_upload_is_analyzed() {
        let stub = canned_stub();
        let app = make_test_app(stub.clone());

        let req = MultipartBody::new()
            .file("file", "essay.txt", "text/plain", STATEMENT.as_bytes())
            .into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["data"]["source"], "txt");
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn docx_upload_is_analyzed() {
        let stub = canned_stub();
        let app = make_test_app(stub.clone());
        let docx = docx_fixture(&["Erster Absatz über das Klima.", "Zweiter Absatz mit Folgen."]);

        let req = MultipartBody::new()
            .file(
                "file",
                "hausarbeit.docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                &docx,
            )
            .into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["data"]["source"], "docx");
        let prompt = stub.last_request().unwrap();
        assert!(prompt.user().contains("Erster Absatz über das Klima."));
        assert!(prompt.user().contains("Zweiter Absatz mit Folgen."));
    }

    #[tokio::test]
    async fn pdf_upload_carries_page_markers() {
        let stub = canned_stub();
        let app = make_test_app(stub.clone());
        let pdf = pdf_fixture(&[Some("Einleitung zum Thema"), Some("Fazit der Arbeit")]);

        let req = MultipartBody::new()
            .file("file", "arbeit.pdf", "application/pdf", &pdf)
            .into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["data"]["source"], "pdf");
        let prompt = stub.last_request().unwrap();
        assert!(prompt.user().contains("[SEITE 1]"));
        assert!(prompt.user().contains("[SEITE 2]"));
    }

    #[tokio::test]
    async fn file_takes_precedence_over_text() {
        let stub = canned_stub();
        let app = make_test_app(stub.clone());

        let req = MultipartBody::new()
            .text("text", "Dieser Text wird ignoriert.")
            .file("file", "essay.txt", "text/plain", STATEMENT.as_bytes())
            .into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let prompt = stub.last_request().unwrap();
        assert!(prompt.user().contains(STATEMENT));
        assert!(!prompt.user().contains("ignoriert"));
    }

    #[tokio::test]
    async fn empty_file_input_falls_back_to_text() {
        let stub = canned_stub();
        let app = make_test_app(stub.clone());

        let req = MultipartBody::new()
            .file("file", "", "application/octet-stream", b"")
            .text("text", STATEMENT)
            .into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["data"]["source"], "text");
    }

    #[tokio::test]
    async fn scanned_pdf_is_rejected_without_calling_the_model() {
        let stub = canned_stub();
        let app = make_test_app(stub.clone());
        let pdf = pdf_fixture(&[None, None]);

        let req = MultipartBody::new()
            .file("file", "scan.pdf", "application/pdf", &pdf)
            .into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["kind"], "UnsupportedDocument");
        assert_eq!(
            json["message"],
            "Das Dokument enthält keinen auslesbaren Text (zum Beispiel ein eingescanntes PDF)."
        );
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn unsupported_extension_is_rejected() {
        let stub = canned_stub();
        let app = make_test_app(stub.clone());

        let req = MultipartBody::new()
            .file("file", "notes.odt", "application/vnd.oasis.opendocument.text", b"PK\x03\x04")
            .into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let json = json_body(response).await;
        assert_eq!(json["data"]["kind"], "UnsupportedFormat");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let stub = canned_stub();
        let app = make_test_app(stub.clone());

        let req = MultipartBody::new().text("text", "   \n\t ").into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert_eq!(json["data"]["kind"], "EmptySubmission");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn form_without_text_or_file_is_rejected() {
        let app = make_test_app(canned_stub());

        let req = MultipartBody::new().text("comment", "kein Inhalt").into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert_eq!(json["data"]["kind"], "EmptySubmission");
    }

    #[tokio::test]
    async fn text_over_the_character_limit_is_rejected() {
        let stub = canned_stub();
        let options = PipelineOptions {
            max_text_chars: 10,
            ..PipelineOptions::default()
        };
        let app = make_test_app_with_limits(stub.clone(), options, 1024 * 1024);

        let req = MultipartBody::new().text("text", STATEMENT).into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let json = json_body(response).await;
        assert_eq!(json["data"]["kind"], "SubmissionTooLong");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn upload_over_the_body_limit_is_rejected() {
        let stub = canned_stub();
        let app = make_test_app_with_limits(stub.clone(), PipelineOptions::default(), 256);
        let big = "a".repeat(4096);

        let req = MultipartBody::new()
            .file("file", "big.txt", "text/plain", big.as_bytes())
            .into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn model_failures_map_to_gateway_statuses() {
        let cases: Vec<(Arc<StubModelClient>, StatusCode, &str)> = vec![
            (
                Arc::new(StubModelClient::failing(|| {
                    AnalyzerError::ModelUnavailable("connection refused".into())
                })),
                StatusCode::SERVICE_UNAVAILABLE,
                "ModelUnavailable",
            ),
            (
                Arc::new(StubModelClient::failing(|| {
                    AnalyzerError::ModelTimeout(Duration::from_secs(60))
                })),
                StatusCode::GATEWAY_TIMEOUT,
                "ModelTimeout",
            ),
            (
                Arc::new(StubModelClient::failing(|| {
                    AnalyzerError::ModelError("HTTP 500: internal upstream detail".into())
                })),
                StatusCode::BAD_GATEWAY,
                "ModelError",
            ),
        ];

        for (stub, status, kind) in cases {
            let app = make_test_app(stub.clone());
            let req = MultipartBody::new().text("text", STATEMENT).into_request();
            let response = app.oneshot(req).await.unwrap();
            assert_eq!(response.status(), status, "{kind}");

            let json = json_body(response).await;
            assert_eq!(json["success"], false);
            assert_eq!(json["data"]["kind"], kind);
            let message = json["message"].as_str().unwrap();
            assert!(!message.contains("upstream detail"));
            assert!(!message.contains("connection refused"));
            assert_eq!(stub.calls(), 1);
        }
    }

    #[tokio::test]
    async fn response_without_headings_is_a_bad_gateway() {
        let stub = Arc::new(StubModelClient::new("Ich kann dazu leider nichts sagen."));
        let app = make_test_app(stub);

        let req = MultipartBody::new().text("text", STATEMENT).into_request();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = json_body(response).await;
        assert_eq!(json["data"]["kind"], "UnparsableResponse");
    }
}
