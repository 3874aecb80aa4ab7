use std::sync::Arc;

use mongodb::Database;

use crate::config::{AppConfig, DEFAULT_MAX_BODY_BYTES};
use crate::database::memory::{InMemoryCommentStore, InMemoryPostStore, InMemoryUserStore};
use crate::database::mongo::{MongoCommentStore, MongoPostStore, MongoUserStore};
use crate::database::{CommentStore, PostStore, UserStore};
use crate::services::cloudinary::CloudinaryService;
use crate::services::media::MediaStore;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub comments: Arc<dyn CommentStore>,
    pub media: Arc<dyn MediaStore>,
    pub jwt_secret: Arc<str>,
    /// Request body cap for the post routes.
    pub max_body_bytes: usize,
    /// Present only when backed by MongoDB; used by the health check.
    pub db: Option<Database>,
}

impl AppState {
    pub fn with_mongo(db: Database, config: &AppConfig) -> Self {
        AppState {
            users: Arc::new(MongoUserStore::new(&db)),
            posts: Arc::new(MongoPostStore::new(&db)),
            comments: Arc::new(MongoCommentStore::new(&db)),
            media: Arc::new(CloudinaryService::new(&config.cloudinary)),
            jwt_secret: config.jwt_secret.as_str().into(),
            max_body_bytes: config.max_body_bytes,
            db: Some(db),
        }
    }

    pub fn in_memory(media: Arc<dyn MediaStore>, jwt_secret: &str) -> Self {
        AppState {
            users: Arc::new(InMemoryUserStore::new()),
            posts: Arc::new(InMemoryPostStore::new()),
            comments: Arc::new(InMemoryCommentStore::new()),
            media,
            jwt_secret: jwt_secret.into(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            db: None,
        }
    }

    pub fn with_body_limit(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
