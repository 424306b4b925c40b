#[cfg(test)]
mod tests {
    use crate::helpers::{json_body, make_test_app};
    use analyzer::extractors::pdf::PdfExtractor;
    use analyzer::test_helpers::{StubModelClient, canned_feedback_response};
    use analyzer::traits::extractor::TextExtractor;
    use axum::{
        body::Body as AxumBody,
        http::{
            Request, StatusCode,
            header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        },
    };
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn export_request(body: String) -> Request<AxumBody> {
        export_request_to("/api/export/txt", body)
    }

    fn export_request_to(uri: &str, body: String) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(AxumBody::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn export_txt_returns_attachment() {
        let app = make_test_app(Arc::new(StubModelClient::new(canned_feedback_response())));
        let payload = json!({
            "feedback": {
                "sprache": "- Klarer Stil\n- Lange Sätze kürzen",
                "struktur": "- Gute Gliederung",
                "argumentation": "",
                "zusammenfassung": "Solide Arbeit."
            },
            "analyzed_at": "2025-03-01T12:00:00Z"
        });

        let response = app
            .oneshot(export_request(payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION],
            "attachment; filename=\"writewise_feedback.txt\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let txt = String::from_utf8(body.to_vec()).unwrap();
        assert!(txt.contains("Analysezeitpunkt: 2025-03-01T12:00:00+00:00"));
        assert!(txt.contains("SPRACHLICHES FEEDBACK:\n- Klarer Stil\n- Lange Sätze kürzen\n"));
        assert!(txt.contains("STRUKTUR-FEEDBACK:\n- Gute Gliederung\n"));
        assert!(txt.contains("ARGUMENTATION:\n\n"));
        assert!(txt.ends_with("ZUSAMMENFASSUNG:\nSolide Arbeit.\n"));
    }

    #[tokio::test]
    async fn export_accepts_missing_timestamp_and_sections() {
        let app = make_test_app(Arc::new(StubModelClient::new(canned_feedback_response())));
        let payload = json!({ "feedback": { "sprache": "- Nur Sprache" } });

        let response = app
            .oneshot(export_request(payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn export_rejects_invalid_payload() {
        let app = make_test_app(Arc::new(StubModelClient::new(canned_feedback_response())));

        let response = app
            .oneshot(export_request("{\"feedback\": 42}".into()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Ungültige Feedback-Daten.");
    }

    #[tokio::test]
    async fn export_pdf_returns_readable_attachment() {
        let app = make_test_app(Arc::new(StubModelClient::new(canned_feedback_response())));
        let payload = json!({
            "feedback": {
                "sprache": "- Klarer Stil\n- Lange Sätze kürzen",
                "struktur": "- Gute Gliederung",
                "argumentation": "- These begründen",
                "zusammenfassung": "Solide Arbeit."
            },
            "analyzed_at": "2025-03-01T12:00:00Z"
        });

        let response = app
            .oneshot(export_request_to("/api/export/pdf", payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION],
            "attachment; filename=\"writewise_feedback.pdf\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = PdfExtractor::new().extract(&body).unwrap();
        assert!(text.contains("WriteWise – Analyseergebnis"));
        for expected in [
            "- Klarer Stil",
            "- Lange Sätze kürzen",
            "- Gute Gliederung",
            "- These begründen",
            "Solide Arbeit.",
        ] {
            assert!(text.contains(expected), "{expected} missing in {text}");
        }
    }

    #[tokio::test]
    async fn export_pdf_rejects_invalid_payload() {
        let app = make_test_app(Arc::new(StubModelClient::new(canned_feedback_response())));

        let response = app
            .oneshot(export_request_to("/api/export/pdf", "not json".into()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["success"], false);
    }
}
