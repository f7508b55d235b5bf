//! In-memory interview session registry.
//!
//! One `Interviewer` per session, each behind its own lock: a single
//! interview only ever has one outstanding turn (the candidate must answer
//! before the next question is generated), while distinct interviews share
//! no mutable state and proceed fully independently.
//!
//! Nothing here is persisted. Durable storage of resumes, transcripts, and
//! results is the caller's responsibility.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::interview::interviewer::Interviewer;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Arc<Mutex<Interviewer>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new interview and returns its id.
    pub async fn insert(&self, interviewer: Interviewer) -> Uuid {
        let id = Uuid::new_v4();
        self.inner
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(interviewer)));
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Interviewer>>> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }
}
