#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use analyzer::test_helpers::{StubModelClient, canned_feedback_response};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn index_serves_the_submission_form() {
        let app = make_test_app(Arc::new(StubModelClient::new(canned_feedback_response())));

        let req = Request::builder()
            .method("GET")
            .uri("/")
            .body(AxumBody::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("WriteWise"));
        assert!(html.contains("/api/analyze"));
    }
}
