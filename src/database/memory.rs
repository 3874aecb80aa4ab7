//! In-memory stores - used by tests and by `STORE=memory` local runs.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use tokio::sync::RwLock;

use crate::database::{CommentStore, PostStore, UserStore};
use crate::errors::Result;
use crate::models::comment::Comment;
use crate::models::post::Post;
use crate::models::user::User;

#[derive(Default)]
pub struct InMemoryUserStore {
    store: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<()> {
        self.store.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn push_post(&self, user_id: ObjectId, post_id: ObjectId) -> Result<bool> {
        match self.store.write().await.get_mut(&user_id) {
            Some(user) => {
                user.posts.push(post_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_post(&self, user_id: ObjectId, post_id: ObjectId) -> Result<()> {
        if let Some(user) = self.store.write().await.get_mut(&user_id) {
            user.posts.retain(|id| *id != post_id);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPostStore {
    store: RwLock<HashMap<ObjectId, Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: &Post) -> Result<()> {
        self.store.write().await.insert(post.id, post.clone());
        Ok(())
    }

    async fn set_like(
        &self,
        post_id: ObjectId,
        user_id: ObjectId,
        liked: bool,
    ) -> Result<Option<Post>> {
        let mut store = self.store.write().await;
        let Some(post) = store.get_mut(&post_id) else {
            return Ok(None);
        };

        if liked {
            if !post.likes.contains(&user_id) {
                post.likes.push(user_id);
            }
        } else {
            post.likes.retain(|id| *id != user_id);
        }
        post.updated_at = BsonDateTime::now();

        Ok(Some(post.clone()))
    }

    async fn update_caption(&self, post_id: ObjectId, caption: &str) -> Result<Option<Post>> {
        let mut store = self.store.write().await;
        let Some(post) = store.get_mut(&post_id) else {
            return Ok(None);
        };

        post.caption = caption.to_string();
        post.updated_at = BsonDateTime::now();

        Ok(Some(post.clone()))
    }

    async fn delete(&self, post_id: ObjectId) -> Result<bool> {
        Ok(self.store.write().await.remove(&post_id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryCommentStore {
    store: RwLock<HashMap<ObjectId, Comment>>,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn insert(&self, comment: &Comment) -> Result<()> {
        self.store.write().await.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete_by_post(&self, post_id: ObjectId) -> Result<u64> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|_, comment| comment.post != post_id);
        Ok((before - store.len()) as u64)
    }

    async fn count_by_post(&self, post_id: ObjectId) -> Result<u64> {
        let store = self.store.read().await;
        Ok(store.values().filter(|c| c.post == post_id).count() as u64)
    }
}
