pub mod connection;
pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::errors::Result;
use crate::models::comment::Comment;
use crate::models::post::Post;
use crate::models::user::User;

/// User records. List edits are single-document atomic updates.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>>;

    async fn insert(&self, user: &User) -> Result<()>;

    /// Appends `post_id` to the end of the user's post list. Returns `false`
    /// when no such user exists.
    async fn push_post(&self, user_id: ObjectId, post_id: ObjectId) -> Result<bool>;

    /// Removes `post_id` from the user's post list. No-op if absent.
    async fn remove_post(&self, user_id: ObjectId, post_id: ObjectId) -> Result<()>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>>;

    async fn insert(&self, post: &Post) -> Result<()>;

    /// Adds or removes `user_id` from the liker set and returns the updated
    /// post, or `None` if the post no longer exists.
    async fn set_like(&self, post_id: ObjectId, user_id: ObjectId, liked: bool)
        -> Result<Option<Post>>;

    async fn update_caption(&self, post_id: ObjectId, caption: &str) -> Result<Option<Post>>;

    /// Returns whether a document was deleted.
    async fn delete(&self, post_id: ObjectId) -> Result<bool>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<()>;

    /// Deletes every comment attached to `post_id`, returning the count.
    async fn delete_by_post(&self, post_id: ObjectId) -> Result<u64>;

    async fn count_by_post(&self, post_id: ObjectId) -> Result<u64>;
}
