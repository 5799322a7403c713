//! Community board operations over a session's posts

use serde::Serialize;
use shared::{
    crop_options, filter_posts, region_options, AppSession, CommunityPost, NewCommunityPost,
    ALL_CROPS,
};

use crate::error::AppResult;

/// Selector choices offered to clients
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommunityFilters {
    pub regions: Vec<String>,
    pub crops: Vec<String>,
}

/// Draft as received from a client; region and crop may be left out
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub region: Option<String>,
    pub crop: Option<String>,
}

pub struct CommunityService;

impl CommunityService {
    /// Posts passing both selectors, newest first
    pub fn list(session: &AppSession, region: &str, crop: &str) -> Vec<CommunityPost> {
        filter_posts(session.community_posts(), region, crop)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn filters(session: &AppSession) -> CommunityFilters {
        let posts = session.community_posts();
        CommunityFilters {
            regions: region_options(posts),
            crops: crop_options(posts),
        }
    }

    /// Publish an expert post. A missing region means the user's location,
    /// a missing crop means every crop.
    pub fn publish(session: &mut AppSession, draft: PostDraft) -> AppResult<CommunityPost> {
        let region =
            non_blank(draft.region).unwrap_or_else(|| session.user_location().to_string());
        let crop = non_blank(draft.crop).unwrap_or_else(|| ALL_CROPS.to_string());

        let post = session
            .publish_post(NewCommunityPost {
                title: draft.title,
                content: draft.content,
                region,
                crop,
            })?
            .clone();

        tracing::info!(
            post_id = %post.id,
            region = %post.region,
            crop = %post.crop,
            "Community post published"
        );
        Ok(post)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
