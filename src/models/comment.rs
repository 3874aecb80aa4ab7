use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

// Comment documents are written by the comment service; this crate only
// needs enough of the shape to remove them alongside their post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub post: ObjectId,
    pub owner: ObjectId,
    #[serde(default)]
    pub text: String,
    pub created_at: BsonDateTime,
}

impl Comment {
    pub fn new(post: ObjectId, owner: ObjectId, text: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            post,
            owner,
            text: text.into(),
            created_at: BsonDateTime::now(),
        }
    }
}
