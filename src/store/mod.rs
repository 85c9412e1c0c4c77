//! Post Store Module
//!
//! The synchronous storage contract consumed by the caching proxy and the
//! search gateway, plus an in-memory implementation.

mod memory;

use std::sync::Arc;

use crate::error::StoreError;
use crate::models::{NewPost, Post, PostFilter};

pub use memory::MemoryPostStore;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Post Store ==
/// Synchronous CRUD and scan contract over posts.
///
/// `find_by_id` returning `Ok(None)` means not-found; it is not an error.
pub trait PostStore: Send + Sync {
    /// Persists a new post and returns it with its assigned id and timestamps.
    fn create(&self, post: NewPost) -> StoreResult<Post>;

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Post>>;

    /// Lists posts newest first, honouring the filter's status, type and paging.
    fn find_all(&self, filter: &PostFilter) -> StoreResult<Vec<Post>>;

    /// Replaces the stored fields of `post.id` and returns the stored value.
    fn update(&self, post: &Post) -> StoreResult<Post>;

    /// Removes a post. Removing an absent id is not an error.
    fn delete(&self, id: i64) -> StoreResult<()>;
}

impl<S: PostStore + ?Sized> PostStore for Arc<S> {
    fn create(&self, post: NewPost) -> StoreResult<Post> {
        (**self).create(post)
    }

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Post>> {
        (**self).find_by_id(id)
    }

    fn find_all(&self, filter: &PostFilter) -> StoreResult<Vec<Post>> {
        (**self).find_all(filter)
    }

    fn update(&self, post: &Post) -> StoreResult<Post> {
        (**self).update(post)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        (**self).delete(id)
    }
}
