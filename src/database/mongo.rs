use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::database::connection::{COMMENTS, POSTS, USERS};
use crate::database::{CommentStore, PostStore, UserStore};
use crate::errors::Result;
use crate::models::comment::Comment;
use crate::models::post::Post;
use crate::models::user::User;

#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(USERS),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, user: &User) -> Result<()> {
        self.collection.insert_one(user).await?;
        Ok(())
    }

    async fn push_post(&self, user_id: ObjectId, post_id: ObjectId) -> Result<bool> {
        let result = self
            .collection
            .update_one(doc! { "_id": user_id }, doc! { "$push": { "posts": post_id } })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn remove_post(&self, user_id: ObjectId, post_id: ObjectId) -> Result<()> {
        self.collection
            .update_one(doc! { "_id": user_id }, doc! { "$pull": { "posts": post_id } })
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct MongoPostStore {
    collection: Collection<Post>,
}

impl MongoPostStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(POSTS),
        }
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, post: &Post) -> Result<()> {
        self.collection.insert_one(post).await?;
        Ok(())
    }

    async fn set_like(
        &self,
        post_id: ObjectId,
        user_id: ObjectId,
        liked: bool,
    ) -> Result<Option<Post>> {
        let now = BsonDateTime::now();
        let update = if liked {
            doc! { "$addToSet": { "likes": user_id }, "$set": { "updatedAt": now } }
        } else {
            doc! { "$pull": { "likes": user_id }, "$set": { "updatedAt": now } }
        };

        let post = self
            .collection
            .find_one_and_update(doc! { "_id": post_id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(post)
    }

    async fn update_caption(&self, post_id: ObjectId, caption: &str) -> Result<Option<Post>> {
        let update = doc! {
            "$set": {
                "caption": caption,
                "updatedAt": BsonDateTime::now()
            }
        };

        let post = self
            .collection
            .find_one_and_update(doc! { "_id": post_id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(post)
    }

    async fn delete(&self, post_id: ObjectId) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": post_id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[derive(Clone)]
pub struct MongoCommentStore {
    collection: Collection<Comment>,
}

impl MongoCommentStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COMMENTS),
        }
    }
}

#[async_trait]
impl CommentStore for MongoCommentStore {
    async fn insert(&self, comment: &Comment) -> Result<()> {
        self.collection.insert_one(comment).await?;
        Ok(())
    }

    async fn delete_by_post(&self, post_id: ObjectId) -> Result<u64> {
        let result = self.collection.delete_many(doc! { "post": post_id }).await?;
        Ok(result.deleted_count)
    }

    async fn count_by_post(&self, post_id: ObjectId) -> Result<u64> {
        Ok(self.collection.count_documents(doc! { "post": post_id }).await?)
    }
}
