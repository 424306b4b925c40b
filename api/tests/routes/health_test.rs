#[cfg(test)]
mod tests {
    use crate::helpers::{json_body, make_test_app};
    use analyzer::test_helpers::{StubModelClient, canned_feedback_response};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_check_returns_ok_json() {
        let app = make_test_app(Arc::new(StubModelClient::new(canned_feedback_response())));

        let req = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(AxumBody::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
        assert_eq!(json["message"], "Health check passed");
    }
}
