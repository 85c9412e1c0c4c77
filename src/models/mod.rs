//! Domain types and request/response models for the post API
//!
//! This module defines the post domain types plus the DTOs (Data Transfer
//! Objects) used for serializing/deserializing HTTP request and response bodies.

pub mod post;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use post::{ContentType, NewPost, Post, PostFilter, PostStatus};
pub use requests::{CreatePostRequest, ListPostsQuery, SearchQuery, UpdatePostRequest};
pub use responses::{DeleteResponse, HealthResponse, SearchResponse, StatsResponse};
