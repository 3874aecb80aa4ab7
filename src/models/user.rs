use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::post::MediaRef;

/// Only the fields this service reads or writes; the rest of the user
/// document is owned by the account service and left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<MediaRef>,
    #[serde(default)]
    pub posts: Vec<ObjectId>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            avatar: None,
            posts: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OwnerSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub avatar: Option<MediaRef>,
}

impl OwnerSummary {
    pub fn unknown(id: ObjectId) -> Self {
        Self {
            id: id.to_hex(),
            name: String::new(),
            avatar: None,
        }
    }
}

impl From<&User> for OwnerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Access token payload. Tokens minted by the account service carry the
/// user id as `_id`; `sub` is accepted as well.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(alias = "_id")]
    pub sub: String,
    pub exp: usize,
}
