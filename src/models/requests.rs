//! Request DTOs for the post API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::models::{ContentType, NewPost, Post, PostFilter, PostStatus};

/// Maximum accepted title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;
/// Page size used when a list request gives none
pub const DEFAULT_LIST_LIMIT: usize = 10;
/// Largest page size a list request may ask for
pub const MAX_LIST_LIMIT: usize = 100;

/// Request body for POST /api/v1/posts
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: ContentType,
    pub author_id: i64,
}

impl CreatePostRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Some("Title and content are required".to_string());
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Some(format!(
                "Title exceeds maximum length of {} characters",
                MAX_TITLE_LENGTH
            ));
        }
        None
    }

    /// New posts always start as drafts.
    pub fn into_new_post(self) -> NewPost {
        NewPost {
            title: self.title,
            content: self.content,
            post_type: self.post_type,
            author_id: self.author_id,
            status: PostStatus::Draft,
        }
    }
}

/// Request body for PUT /api/v1/posts/:id
///
/// Every field is optional; absent or empty fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "type")]
    pub post_type: Option<ContentType>,
    #[serde(default)]
    pub status: Option<PostStatus>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Option<String> {
        match &self.title {
            Some(title) if title.chars().count() > MAX_TITLE_LENGTH => Some(format!(
                "Title exceeds maximum length of {} characters",
                MAX_TITLE_LENGTH
            )),
            _ => None,
        }
    }

    /// Applies the provided fields on top of `post`.
    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title.filter(|t| !t.trim().is_empty()) {
            post.title = title;
        }
        if let Some(content) = self.content.filter(|c| !c.trim().is_empty()) {
            post.content = content;
        }
        if let Some(post_type) = self.post_type {
            post.post_type = post_type;
        }
        if let Some(status) = self.status {
            post.status = status;
        }
    }
}

/// Query string for GET /api/v1/posts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    pub status: Option<PostStatus>,
    #[serde(rename = "type")]
    pub post_type: Option<ContentType>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListPostsQuery {
    /// Out-of-range limits fall back to the default page size.
    pub fn into_filter(self) -> PostFilter {
        let limit = self
            .limit
            .filter(|l| (1..=MAX_LIST_LIMIT).contains(l))
            .unwrap_or(DEFAULT_LIST_LIMIT);
        PostFilter {
            status: self.status,
            post_type: self.post_type,
            limit,
            offset: self.offset.unwrap_or(0),
        }
    }
}

/// Query string for GET /api/v1/posts/search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
