#[cfg(test)]
mod meme_handler_tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use parking_lot::Mutex;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::api::{app_state::AppState, create_router};
    use crate::error::{AppError, Result};
    use crate::models::meme::{MemeView, default_memes};
    use crate::services::gallery::GalleryService;

    /// 记录收到的创建请求，并返回预设结果
    struct StubGallery {
        create_result: Result<MemeView>,
        received: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl GalleryService for StubGallery {
        async fn list(&self) -> Vec<MemeView> {
            default_memes()
        }

        async fn create(&self, title: String, src: String) -> Result<MemeView> {
            self.received.lock().push((title, src));
            self.create_result.clone()
        }
    }

    fn app(create_result: Result<MemeView>) -> (Router, Arc<StubGallery>) {
        let stub = Arc::new(StubGallery {
            create_result,
            received: Mutex::new(Vec::new()),
        });
        let state = AppState {
            gallery_service: stub.clone(),
        };
        (create_router(state, 1024), stub)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_200_with_array() {
        let (app, _) = app(Err(AppError::CreateFailed));

        for uri in ["/api/memes", "/api/memes/"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body.as_array().map(Vec::len), Some(3));
            assert_eq!(body[0], json!({"title": "Cuddle mode: ON 😽", "src": "/date1.jpeg"}));
        }
    }

    #[tokio::test]
    async fn test_create_returns_201() {
        let created = MemeView {
            title: "Us 💞".into(),
            src: "/us.jpg".into(),
        };
        let (app, stub) = app(Ok(created));

        let response = app
            .oneshot(post(
                "/api/memes",
                json!({"title": "Us 💞", "src": "/us.jpg"}).to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({"title": "Us 💞", "src": "/us.jpg"})
        );
        assert_eq!(
            stub.received.lock().as_slice(),
            &[("Us 💞".to_string(), "/us.jpg".to_string())]
        );
    }

    #[tokio::test]
    async fn test_create_maps_errors_to_status() {
        let cases = [
            (AppError::NotConfigured, StatusCode::BAD_REQUEST),
            (
                AppError::Validation("Missing src".into()),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::CreateFailed, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            let expected = error.to_string();
            let (app, _) = app(Err(error));
            let response = app
                .oneshot(post("/api/memes", json!({"title": "Us"}).to_string()))
                .await
                .unwrap();

            assert_eq!(response.status(), status);
            assert_eq!(body_json(response).await, json!({"error": expected}));
        }
    }

    #[tokio::test]
    async fn test_unreadable_body_is_treated_as_empty() {
        let (app, stub) = app(Err(AppError::Validation("Missing title and src".into())));

        let response = app.clone().oneshot(post("/api/memes", "{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/memes")
                    .body(Body::from(r#"{"title":"Us","src":"/us.jpg"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let received = stub.received.lock();
        assert_eq!(received.len(), 2);
        assert!(received.iter().all(|(t, s)| t.is_empty() && s.is_empty()));
    }

    #[tokio::test]
    async fn test_oversized_body_returns_413() {
        let (app, stub) = app(Ok(MemeView {
            title: "Us".into(),
            src: "/us.jpg".into(),
        }));

        let oversized = json!({"title": "x".repeat(4096), "src": "/big.png"}).to_string();
        let response = app.oneshot(post("/api/memes", oversized)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Request body too large"})
        );
        assert!(stub.received.lock().is_empty());
    }
}
