//! Content store for case studies and job posts
//!
//! Kept in memory for the lifetime of the process.

mod types;

pub use types::*;

use chrono::Utc;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContentError {
    #[error("Content item not found: {0}")]
    NotFound(String),
    #[error("Slug already exists: {0}")]
    DuplicateSlug(String),
    #[error("Invalid content: {0}")]
    Invalid(String),
}

pub type ContentResult<T> = Result<T, ContentError>;

/// Thread-safe in-memory content store
#[derive(Default)]
pub struct ContentStore {
    items: RwLock<Vec<ContentItem>>,
}

fn validate(payload: &ContentItemCreate) -> ContentResult<()> {
    if payload.title.trim().is_empty() {
        return Err(ContentError::Invalid("title must not be empty".to_string()));
    }
    if payload.slug.is_empty() {
        return Err(ContentError::Invalid("slug must not be empty".to_string()));
    }
    if !payload
        .slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ContentError::Invalid(format!(
            "slug may only contain lowercase letters, digits and '-': {}",
            payload.slug
        )));
    }
    Ok(())
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<ContentItem>> {
        self.items.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<ContentItem>> {
        self.items.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// List items in insertion order, optionally filtered
    pub fn list(
        &self,
        content_type: Option<ContentType>,
        status: Option<ContentStatus>,
    ) -> Vec<ContentItem> {
        self.read()
            .iter()
            .filter(|i| content_type.map_or(true, |t| i.content_type == t))
            .filter(|i| status.map_or(true, |s| i.status == s))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> ContentResult<ContentItem> {
        self.read()
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(id.to_string()))
    }

    pub fn get_by_slug(
        &self,
        content_type: ContentType,
        slug: &str,
        status: Option<ContentStatus>,
    ) -> ContentResult<ContentItem> {
        self.read()
            .iter()
            .find(|i| {
                i.content_type == content_type
                    && i.slug == slug
                    && status.map_or(true, |s| i.status == s)
            })
            .cloned()
            .ok_or_else(|| ContentError::NotFound(slug.to_string()))
    }

    pub fn create(&self, payload: ContentItemCreate) -> ContentResult<ContentItem> {
        validate(&payload)?;
        let mut items = self.write();
        if items
            .iter()
            .any(|i| i.content_type == payload.content_type && i.slug == payload.slug)
        {
            return Err(ContentError::DuplicateSlug(payload.slug));
        }

        let now = Utc::now();
        let item = ContentItem {
            id: uuid::Uuid::new_v4().to_string(),
            content_type: payload.content_type,
            title: payload.title,
            slug: payload.slug,
            excerpt: payload.excerpt,
            body_rich: payload.body_rich,
            tags: payload.tags,
            meta: payload.meta,
            status: payload.status,
            created_at: now,
            updated_at: now,
        };
        tracing::info!(id = %item.id, slug = %item.slug, "Created content item");
        items.push(item.clone());
        Ok(item)
    }

    /// Replace every editable field of an existing item
    pub fn update(&self, id: &str, payload: ContentItemCreate) -> ContentResult<ContentItem> {
        validate(&payload)?;
        let mut items = self.write();
        if items.iter().any(|i| {
            i.id != id && i.content_type == payload.content_type && i.slug == payload.slug
        }) {
            return Err(ContentError::DuplicateSlug(payload.slug));
        }

        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ContentError::NotFound(id.to_string()))?;
        item.content_type = payload.content_type;
        item.title = payload.title;
        item.slug = payload.slug;
        item.excerpt = payload.excerpt;
        item.body_rich = payload.body_rich;
        item.tags = payload.tags;
        item.meta = payload.meta;
        item.status = payload.status;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    pub fn set_status(&self, id: &str, status: ContentStatus) -> ContentResult<ContentItem> {
        let mut items = self.write();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ContentError::NotFound(id.to_string()))?;
        item.status = status;
        item.updated_at = Utc::now();
        tracing::info!(id, status = ?status, "Changed content status");
        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(content_type: ContentType, slug: &str) -> ContentItemCreate {
        ContentItemCreate {
            content_type,
            title: format!("Title for {slug}"),
            slug: slug.to_string(),
            excerpt: None,
            body_rich: "<p>body</p>".to_string(),
            tags: Some(vec!["retail".to_string()]),
            meta: None,
            status: ContentStatus::Draft,
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = ContentStore::new();
        let item = store.create(payload(ContentType::CaseStudy, "pricing-revamp")).unwrap();
        assert_eq!(item.status, ContentStatus::Draft);
        assert_eq!(store.get(&item.id).unwrap(), item);
    }

    #[test]
    fn test_duplicate_slug_is_per_type() {
        let store = ContentStore::new();
        store.create(payload(ContentType::CaseStudy, "same")).unwrap();
        assert_eq!(
            store.create(payload(ContentType::CaseStudy, "same")),
            Err(ContentError::DuplicateSlug("same".to_string()))
        );
        assert!(store.create(payload(ContentType::JobPost, "same")).is_ok());
    }

    #[test]
    fn test_rejects_bad_slug_and_title() {
        let store = ContentStore::new();
        assert!(matches!(
            store.create(payload(ContentType::JobPost, "Has Spaces")),
            Err(ContentError::Invalid(_))
        ));
        let mut empty_title = payload(ContentType::JobPost, "ok");
        empty_title.title = "  ".to_string();
        assert!(matches!(store.create(empty_title), Err(ContentError::Invalid(_))));
    }

    #[test]
    fn test_publish_filters_listing() {
        let store = ContentStore::new();
        let draft = store.create(payload(ContentType::JobPost, "rust-dev")).unwrap();
        store.create(payload(ContentType::CaseStudy, "case")).unwrap();

        let published = || store.list(Some(ContentType::JobPost), Some(ContentStatus::Published));
        assert!(published().is_empty());
        assert!(store
            .get_by_slug(ContentType::JobPost, "rust-dev", Some(ContentStatus::Published))
            .is_err());

        store.set_status(&draft.id, ContentStatus::Published).unwrap();
        assert_eq!(published().len(), 1);
        assert_eq!(store.list(None, None).len(), 2);

        store.set_status(&draft.id, ContentStatus::Archived).unwrap();
        assert!(published().is_empty());
    }

    #[test]
    fn test_update_replaces_fields() {
        let store = ContentStore::new();
        let item = store.create(payload(ContentType::CaseStudy, "old")).unwrap();
        let other = store.create(payload(ContentType::CaseStudy, "taken")).unwrap();

        let mut change = payload(ContentType::CaseStudy, "new");
        change.title = "Renamed".to_string();
        let updated = store.update(&item.id, change).unwrap();
        assert_eq!(updated.slug, "new");
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.created_at, item.created_at);

        assert!(matches!(
            store.update(&item.id, payload(ContentType::CaseStudy, "taken")),
            Err(ContentError::DuplicateSlug(_))
        ));
        assert!(store.update(&other.id, payload(ContentType::CaseStudy, "taken")).is_ok());
        assert!(matches!(
            store.update("missing", payload(ContentType::CaseStudy, "x")),
            Err(ContentError::NotFound(_))
        ));
    }
}
