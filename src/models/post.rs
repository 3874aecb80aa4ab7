use chrono::{DateTime, Datelike, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{OwnerSummary, User};

/// Reference to an asset hosted by the media service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub public_id: String,
    pub url: String,
}

// Main Post model - stored in the `posts` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub owner: ObjectId,
    pub caption: String,
    pub image: MediaRef,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub likes: Vec<ObjectId>,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl Post {
    pub fn new(owner: ObjectId, caption: String, image: MediaRef, is_video: bool) -> Self {
        let now = BsonDateTime::now();
        Self {
            id: ObjectId::new(),
            owner,
            caption,
            image,
            is_video,
            likes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        self.owner == *user_id
    }

    pub fn is_liked_by(&self, user_id: &ObjectId) -> bool {
        self.likes.contains(user_id)
    }
}

// ========== REQUESTS ==========

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(required, length(min = 1))]
    pub caption: Option<String>,
    /// Data URI or remote URL handed straight to the media service.
    #[validate(required, length(min = 1))]
    pub post_img: Option<String>,
    pub is_video: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIdRequest {
    #[serde(default)]
    pub post_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub post_id: String,
    pub caption: Option<String>,
}

// ========== RESPONSES ==========

/// Stored post as returned by create and update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    pub caption: String,
    pub image: MediaRef,
    pub is_video: bool,
    pub likes: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_hex(),
            owner: post.owner.to_hex(),
            caption: post.caption,
            image: post.image,
            is_video: post.is_video,
            likes: post.likes.iter().map(|id| id.to_hex()).collect(),
            created_at: post.created_at.to_chrono().to_rfc3339(),
            updated_at: post.updated_at.to_chrono().to_rfc3339(),
        }
    }
}

/// Post as seen by a particular viewer: owner populated, like state relative
/// to the viewer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOutput {
    #[serde(rename = "_id")]
    pub id: String,
    pub caption: String,
    pub image: MediaRef,
    pub is_video: bool,
    pub owner: OwnerSummary,
    pub likes_count: usize,
    pub is_liked: bool,
    pub time_ago: String,
    pub created_at: String,
    pub updated_at: String,
}

impl PostOutput {
    /// `owner` may be missing if the user document was removed out of band;
    /// the summary then only carries the id.
    pub fn new(post: &Post, owner: Option<&User>, viewer: &ObjectId) -> Self {
        let created_at = post.created_at.to_chrono();
        let owner = match owner {
            Some(user) => OwnerSummary::from(user),
            None => OwnerSummary::unknown(post.owner),
        };

        Self {
            id: post.id.to_hex(),
            caption: post.caption.clone(),
            image: post.image.clone(),
            is_video: post.is_video,
            owner,
            likes_count: post.likes.len(),
            is_liked: post.is_liked_by(viewer),
            time_ago: time_ago(created_at, Utc::now()),
            created_at: created_at.to_rfc3339(),
            updated_at: post.updated_at.to_chrono().to_rfc3339(),
        }
    }
}

/// Short relative timestamp for feed display.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(then);

    if duration.num_minutes() < 1 {
        "just now".to_string()
    } else if duration.num_hours() < 1 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_days() < 1 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_days() == 1 {
        "yesterday".to_string()
    } else if then.year() == now.year() {
        then.format("%b %d").to_string()
    } else {
        then.format("%b %d, %Y").to_string()
    }
}
