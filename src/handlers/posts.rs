use axum::extract::{Extension, State};
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::extract::AppJson;
use crate::middleware::auth::CurrentUser;
use crate::models::post::{
    CreatePostRequest, Post, PostIdRequest, PostOutput, PostResponse, UpdatePostRequest,
};
use crate::response::ApiResponse;
use crate::services::media::POST_MEDIA_FOLDER;
use crate::state::AppState;

const POST_NOT_FOUND: &str = "Post not found";

fn parse_post_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::not_found(POST_NOT_FOUND))
}

async fn load_post(state: &AppState, post_id: ObjectId) -> Result<Post> {
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))
}

// ========== POST HANDLERS ==========

pub async fn create_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppJson(payload): AppJson<CreatePostRequest>,
) -> Result<ApiResponse<PostResponse>> {
    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, %user_id, "create_post");

    let missing = || AppError::bad_request("Caption and Media are required");
    payload.validate().map_err(|_| missing())?;
    let (Some(caption), Some(post_img)) = (payload.caption, payload.post_img) else {
        return Err(missing());
    };

    // Checked before uploading so a stale token can't leave orphaned media.
    if state.users.find_by_id(user_id).await?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    let media = state.media.upload(&post_img, POST_MEDIA_FOLDER).await?;

    let post = Post::new(
        user_id,
        caption,
        media.into(),
        payload.is_video.unwrap_or(false),
    );
    state.posts.insert(&post).await?;

    // Not transactional: a failure here leaves the post without a back-reference.
    match state.users.push_post(user_id, post.id).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::error!(%request_id, post_id = %post.id, "owner vanished before post was linked");
            return Err(AppError::not_found("User not found"));
        }
        Err(e) => {
            tracing::error!(%request_id, post_id = %post.id, error = %e, "post created but owner list not updated");
            return Err(e);
        }
    }

    tracing::info!(%request_id, post_id = %post.id, "post created");
    Ok(ApiResponse::created(PostResponse::from(post)))
}

pub async fn like_and_unlike_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppJson(payload): AppJson<PostIdRequest>,
) -> Result<ApiResponse<Value>> {
    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, %user_id, post_id = %payload.post_id, "like_and_unlike_post");

    let post_id = parse_post_id(&payload.post_id)?;
    let post = load_post(&state, post_id).await?;

    let liked = !post.is_liked_by(&user_id);
    let post = state
        .posts
        .set_like(post_id, user_id, liked)
        .await?
        .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))?;

    let owner = state.users.find_by_id(post.owner).await?;
    if owner.is_none() {
        tracing::warn!(%request_id, owner = %post.owner, "post owner missing");
    }

    tracing::debug!(%request_id, liked, likes = post.likes.len(), "like toggled");
    Ok(ApiResponse::ok(json!({
        "post": PostOutput::new(&post, owner.as_ref(), &user_id)
    })))
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppJson(payload): AppJson<UpdatePostRequest>,
) -> Result<ApiResponse<Value>> {
    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, %user_id, post_id = %payload.post_id, "update_post");

    let post_id = parse_post_id(&payload.post_id)?;
    let post = load_post(&state, post_id).await?;

    if !post.is_owned_by(&user_id) {
        return Err(AppError::forbidden("Only owners can update their posts"));
    }

    let post = match payload.caption.as_deref() {
        Some(caption) if !caption.is_empty() => state
            .posts
            .update_caption(post_id, caption)
            .await?
            .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))?,
        _ => post,
    };

    Ok(ApiResponse::ok(json!({ "post": PostResponse::from(post) })))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppJson(payload): AppJson<PostIdRequest>,
) -> Result<ApiResponse<&'static str>> {
    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, %user_id, post_id = %payload.post_id, "delete_post");

    let post_id = parse_post_id(&payload.post_id)?;
    let post = load_post(&state, post_id).await?;

    if !post.is_owned_by(&user_id) {
        return Err(AppError::forbidden("Only owners can delete their posts"));
    }

    let deleted_comments = state.comments.delete_by_post(post_id).await?;
    state.users.remove_post(user_id, post_id).await?;
    state.posts.delete(post_id).await?;

    if let Err(e) = state.media.destroy(&post.image.public_id, post.is_video).await {
        tracing::warn!(%request_id, public_id = %post.image.public_id, error = %e, "failed to delete hosted media");
    }

    tracing::info!(%request_id, %post_id, deleted_comments, "post deleted");
    Ok(ApiResponse::ok("post deleted successfully"))
}
