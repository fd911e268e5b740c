//! Shared test helpers: an in-memory `BookmarkClientTrait` that records
//! every call it receives and can be told to fail specific operations.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use fusen::services::bookmark_client::BookmarkClientTrait;
use fusen::types::bookmark::{Bookmark, BookmarkInput};
use fusen::types::errors::{Operation, ServiceError, ServiceErrorKind};

pub const CREATED_AT: &str = "2024-01-01T00:00:00Z";
pub const UPDATED_AT: &str = "2024-01-02T00:00:00Z";

/// One recorded call to the fake service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(BookmarkInput),
    List { limit: u32, offset: u32 },
    Get(i64),
    Update(i64, BookmarkInput),
    Delete(i64),
}

impl Call {
    pub fn operation(&self) -> Operation {
        match self {
            Call::Create(_) => Operation::Create,
            Call::List { .. } => Operation::List,
            Call::Get(_) => Operation::Get,
            Call::Update(..) => Operation::Update,
            Call::Delete(_) => Operation::Delete,
        }
    }
}

pub fn bookmark(id: i64, url: &str, title: Option<&str>) -> Bookmark {
    Bookmark {
        id,
        url: url.to_string(),
        title: title.map(str::to_string),
        description: None,
        tags: vec![],
        created_at: Some(CREATED_AT.to_string()),
        updated_at: Some(CREATED_AT.to_string()),
    }
}

/// Three bookmarks with ids 1..=3, in that order.
pub fn sample_bookmarks() -> Vec<Bookmark> {
    vec![
        bookmark(1, "https://example.com/mock1", Some("モックブックマーク 1")),
        bookmark(2, "https://example.com/mock2", Some("モックブックマーク 2")),
        bookmark(3, "https://rust-lang.org", None),
    ]
}

fn not_found(operation: Operation, id: i64) -> ServiceError {
    ServiceError::new(
        operation,
        ServiceErrorKind::Server {
            status: 404,
            error_code: Some("BOOKMARK_NOT_FOUND".to_string()),
            message: Some(format!("Bookmark not found with id: {}", id)),
        },
    )
}

#[derive(Default)]
pub struct FakeClient {
    store: Mutex<Vec<Bookmark>>,
    next_id: Mutex<i64>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<Operation, ServiceError>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::with_bookmarks(Vec::new())
    }

    pub fn with_bookmarks(bookmarks: Vec<Bookmark>) -> Self {
        let next_id = bookmarks.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self {
            store: Mutex::new(bookmarks),
            next_id: Mutex::new(next_id),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Every later call to `operation` fails with `error` until cleared.
    pub fn fail(&self, operation: Operation, error: ServiceError) {
        self.failures.lock().unwrap().insert(operation, error);
    }

    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.calls().iter().filter(|c| c.operation() == operation).count()
    }

    pub fn stored(&self) -> Vec<Bookmark> {
        self.store.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ServiceError> {
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(&operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BookmarkClientTrait for FakeClient {
    async fn create_bookmark(&self, input: &BookmarkInput) -> Result<Bookmark, ServiceError> {
        self.record(Call::Create(input.clone()))?;
        let mut next_id = self.next_id.lock().unwrap();
        let created = Bookmark {
            id: *next_id,
            url: input.url.clone(),
            title: input.title.clone(),
            description: input.description.clone(),
            tags: input.tags.clone().unwrap_or_default(),
            created_at: Some(CREATED_AT.to_string()),
            updated_at: Some(CREATED_AT.to_string()),
        };
        *next_id += 1;
        self.store.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_bookmarks(&self, limit: u32, offset: u32) -> Result<Vec<Bookmark>, ServiceError> {
        self.record(Call::List { limit, offset })?;
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_bookmark(&self, id: i64) -> Result<Bookmark, ServiceError> {
        self.record(Call::Get(id))?;
        self.store
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| not_found(Operation::Get, id))
    }

    async fn update_bookmark(&self, id: i64, input: &BookmarkInput) -> Result<Bookmark, ServiceError> {
        self.record(Call::Update(id, input.clone()))?;
        let mut store = self.store.lock().unwrap();
        let existing = store
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found(Operation::Update, id))?;
        existing.url = input.url.clone();
        existing.title = input.title.clone();
        existing.description = input.description.clone();
        existing.tags = input.tags.clone().unwrap_or_default();
        existing.updated_at = Some(UPDATED_AT.to_string());
        Ok(existing.clone())
    }

    async fn delete_bookmark(&self, id: i64) -> Result<(), ServiceError> {
        self.record(Call::Delete(id))?;
        let mut store = self.store.lock().unwrap();
        let before = store.len();
        store.retain(|b| b.id != id);
        if store.len() == before {
            return Err(not_found(Operation::Delete, id));
        }
        Ok(())
    }
}
