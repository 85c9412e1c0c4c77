//! Post domain types shared by the store, the cache and the API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Content Type ==
/// Kind of content a post carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Tutorial,
    Review,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentType::Article => "article",
            ContentType::Tutorial => "tutorial",
            ContentType::Review => "review",
        };
        f.write_str(name)
    }
}

// == Post Status ==
/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        };
        f.write_str(name)
    }
}

// == Post ==
/// A stored blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: ContentType,
    pub author_id: i64,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Case-insensitive substring match against title or content.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

// == New Post ==
/// Fields supplied when creating a post; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub post_type: ContentType,
    pub author_id: i64,
    pub status: PostStatus,
}

// == Post Filter ==
/// Filters and paging for list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub post_type: Option<ContentType>,
    pub limit: usize,
    pub offset: usize,
}

impl PostFilter {
    /// An unfiltered page of at most `limit` posts starting at the newest.
    pub fn unfiltered(limit: usize) -> Self {
        Self {
            status: None,
            post_type: None,
            limit,
            offset: 0,
        }
    }

    /// Returns true if `post` passes the status and type filters.
    pub fn accepts(&self, post: &Post) -> bool {
        self.status.map_or(true, |s| post.status == s)
            && self.post_type.map_or(true, |t| post.post_type == t)
    }
}

impl Default for PostFilter {
    fn default() -> Self {
        Self::unfiltered(10)
    }
}
