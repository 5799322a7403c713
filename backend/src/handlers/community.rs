//! HTTP handlers for the community board

use axum::{extract::Query, http::StatusCode, Json};
use serde::Deserialize;
use shared::{CommunityPost, ALL};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::CurrentSession;
use crate::services::{CommunityFilters, CommunityService, PostDraft};

fn all() -> String {
    ALL.to_string()
}

/// Region and crop selectors; both default to "All"
#[derive(Debug, Deserialize)]
pub struct PostFilterQuery {
    #[serde(default = "all")]
    pub region: String,
    #[serde(default = "all")]
    pub crop: String,
}

pub async fn list_posts(
    current: CurrentSession,
    Query(query): Query<PostFilterQuery>,
) -> Json<Vec<CommunityPost>> {
    let session = current.handle.lock().await;
    Json(CommunityService::list(&session, &query.region, &query.crop))
}

pub async fn get_filters(current: CurrentSession) -> Json<CommunityFilters> {
    let session = current.handle.lock().await;
    Json(CommunityService::filters(&session))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,
    #[validate(length(max = 5000, message = "Content must be at most 5000 characters"))]
    pub content: String,
    pub region: Option<String>,
    pub crop: Option<String>,
}

/// Publish a post (experts only)
pub async fn create_post(
    current: CurrentSession,
    Json(input): Json<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<CommunityPost>)> {
    input.validate()?;

    let mut session = current.handle.lock().await;
    let post = CommunityService::publish(
        &mut session,
        PostDraft {
            title: input.title,
            content: input.content,
            region: input.region,
            crop: input.crop,
        },
    )?;

    Ok((StatusCode::CREATED, Json(post)))
}
