use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tower::ServiceExt;

use social_media_api::database::UserStore;
use social_media_api::errors::{AppError, Result};
use social_media_api::middleware::auth::issue_token;
use social_media_api::models::user::User;
use social_media_api::routes::build_router;
use social_media_api::services::media::{MediaStore, UploadedMedia};
use social_media_api::state::AppState;

pub const JWT_SECRET: &str = "test-secret";

/// Media host double: records calls, optionally fails uploads.
#[derive(Default)]
pub struct FakeMedia {
    pub uploads: Mutex<Vec<(String, String)>>,
    pub destroyed: Mutex<Vec<(String, bool)>>,
    pub fail_uploads: Mutex<Option<String>>,
}

impl FakeMedia {
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn fail_with(&self, message: &str) {
        *self.fail_uploads.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl MediaStore for FakeMedia {
    async fn upload(&self, payload: &str, folder: &str) -> Result<UploadedMedia> {
        if let Some(message) = self.fail_uploads.lock().unwrap().clone() {
            return Err(AppError::cloudinary(message));
        }

        let mut uploads = self.uploads.lock().unwrap();
        uploads.push((payload.to_string(), folder.to_string()));
        let public_id = format!("{}/asset{}", folder, uploads.len());

        Ok(UploadedMedia {
            url: format!("http://res.cloudinary.com/test/image/upload/{}.jpg", public_id),
            public_id,
        })
    }

    async fn destroy(&self, public_id: &str, is_video: bool) -> Result<()> {
        self.destroyed
            .lock()
            .unwrap()
            .push((public_id.to_string(), is_video));
        Ok(())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub media: Arc<FakeMedia>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(|state| state)
    }

    /// Lets a test adjust the in-memory state before the router is built.
    pub fn with(customize: impl FnOnce(AppState) -> AppState) -> Self {
        let media = Arc::new(FakeMedia::default());
        let state = customize(AppState::in_memory(media.clone(), JWT_SECRET));
        let router = build_router(state.clone());

        Self {
            state,
            media,
            router,
        }
    }

    pub async fn seed_user(&self, name: &str) -> User {
        let user = User::new(name);
        self.state.users.insert(&user).await.unwrap();
        user
    }

    pub fn token_for(&self, user_id: ObjectId) -> String {
        issue_token(user_id, JWT_SECRET, 3600).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn call(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = builder
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        self.send(request).await
    }

    /// Creates a post through the API and returns its id.
    pub async fn create_post(&self, token: &str, caption: &str) -> String {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/posts",
                Some(token),
                serde_json::json!({
                    "caption": caption,
                    "postImg": "data:image/png;base64,iVBORw0KGgo=",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["result"]["_id"].as_str().unwrap().to_string()
    }
}
