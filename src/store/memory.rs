//! In-memory post store backed by a BTreeMap.

use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;

use super::{PostStore, StoreResult};
use crate::error::StoreError;
use crate::models::{NewPost, Post, PostFilter};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Post>,
    next_id: i64,
}

// == Memory Post Store ==
/// Thread-safe single-table post store that lives for the process lifetime.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    table: RwLock<Table>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts.
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().rows.is_empty()
    }
}

impl PostStore for MemoryPostStore {
    fn create(&self, post: NewPost) -> StoreResult<Post> {
        let mut table = self.table.write();
        table.next_id += 1;
        let now = Utc::now();
        let stored = Post {
            id: table.next_id,
            title: post.title,
            content: post.content,
            post_type: post.post_type,
            author_id: post.author_id,
            status: post.status,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Post>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    fn find_all(&self, filter: &PostFilter) -> StoreResult<Vec<Post>> {
        let table = self.table.read();
        let mut posts: Vec<&Post> = table.rows.values().filter(|p| filter.accepts(p)).collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(posts
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .cloned()
            .collect())
    }

    fn update(&self, post: &Post) -> StoreResult<Post> {
        let mut table = self.table.write();
        let stored = table
            .rows
            .get_mut(&post.id)
            .ok_or(StoreError::NotFound(post.id))?;

        stored.title = post.title.clone();
        stored.content = post.content.clone();
        stored.post_type = post.post_type;
        stored.status = post.status;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.table.write().rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentType, PostStatus};

    fn new_post(title: &str, status: PostStatus, post_type: ContentType) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: format!("body of {}", title),
            post_type,
            author_id: 1,
            status,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = MemoryPostStore::new();
        let a = store
            .create(new_post("a", PostStatus::Draft, ContentType::Article))
            .unwrap();
        let b = store
            .create(new_post("b", PostStatus::Draft, ContentType::Article))
            .unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_find_by_id_absent_is_none() {
        let store = MemoryPostStore::new();
        assert_eq!(store.find_by_id(42).unwrap(), None);
    }

    #[test]
    fn test_find_all_filters_and_pages_newest_first() {
        let store = MemoryPostStore::new();
        for i in 0..5 {
            store
                .create(new_post(
                    &format!("p{}", i),
                    PostStatus::Published,
                    ContentType::Article,
                ))
                .unwrap();
        }
        store
            .create(new_post("draft", PostStatus::Draft, ContentType::Review))
            .unwrap();

        let filter = PostFilter {
            status: Some(PostStatus::Published),
            post_type: None,
            limit: 2,
            offset: 1,
        };
        let page = store.find_all(&filter).unwrap();
        let ids: Vec<i64> = page.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 3]);

        let reviews = store
            .find_all(&PostFilter {
                post_type: Some(ContentType::Review),
                ..PostFilter::unfiltered(10)
            })
            .unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].title, "draft");
    }

    #[test]
    fn test_update_missing_post() {
        let store = MemoryPostStore::new();
        let mut post = store
            .create(new_post("x", PostStatus::Draft, ContentType::Article))
            .unwrap();
        post.id = 99;

        assert_eq!(store.update(&post), Err(StoreError::NotFound(99)));
    }

    #[test]
    fn test_update_keeps_author_and_created_at() {
        let store = MemoryPostStore::new();
        let original = store
            .create(new_post("x", PostStatus::Draft, ContentType::Article))
            .unwrap();

        let mut changed = original.clone();
        changed.title = "y".to_string();
        changed.author_id = 500;
        let stored = store.update(&changed).unwrap();

        assert_eq!(stored.title, "y");
        assert_eq!(stored.author_id, original.author_id);
        assert_eq!(stored.created_at, original.created_at);
        assert!(stored.updated_at >= original.updated_at);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = MemoryPostStore::new();
        let post = store
            .create(new_post("x", PostStatus::Draft, ContentType::Article))
            .unwrap();

        store.delete(post.id).unwrap();
        store.delete(post.id).unwrap();
        assert!(store.is_empty());
    }
}
