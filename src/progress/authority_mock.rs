#![allow(clippy::unwrap_used)]

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::CoreError;

use super::authority::CompletionAuthority;

/// In-memory completion authority for tests.
///
/// Holds canonical completion sets keyed by `(identity_id, course_id)` and
/// can be switched into a failure mode to exercise the cache-only fallback.
#[derive(Clone)]
pub struct MockCompletionAuthority {
    pub records: Arc<Mutex<HashMap<(String, String), BTreeSet<String>>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockCompletionAuthority {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seeds the canonical record for an identity and course.
    pub fn seed(&self, identity_id: &str, course_id: &str, videos: &[&str]) {
        self.records.lock().unwrap().insert(
            (identity_id.to_owned(), course_id.to_owned()),
            videos.iter().map(|v| (*v).to_owned()).collect(),
        );
    }

    /// Makes every call fail until [`set_available`](Self::set_available).
    pub fn set_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    pub fn set_available(&self) {
        self.unavailable.store(false, Ordering::SeqCst);
    }

    /// Returns the canonical set currently held for an identity and course.
    pub fn canonical(&self, identity_id: &str, course_id: &str) -> BTreeSet<String> {
        self.records
            .lock()
            .unwrap()
            .get(&(identity_id.to_owned(), course_id.to_owned()))
            .cloned()
            .unwrap_or_default()
    }

    fn check_available(&self) -> Result<(), CoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(CoreError::RemoteUnavailable("mock offline".to_owned()))
        } else {
            Ok(())
        }
    }
}

impl Default for MockCompletionAuthority {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionAuthority for MockCompletionAuthority {
    async fn fetch_completion(
        &self,
        identity_id: &str,
        course_id: &str,
    ) -> Result<BTreeSet<String>, CoreError> {
        self.check_available()?;
        Ok(self.canonical(identity_id, course_id))
    }

    async fn mark_completed(
        &self,
        identity_id: &str,
        course_id: &str,
        video_id: &str,
    ) -> Result<(), CoreError> {
        self.check_available()?;

        self.records
            .lock()
            .unwrap()
            .entry((identity_id.to_owned(), course_id.to_owned()))
            .or_default()
            .insert(video_id.to_owned());

        Ok(())
    }
}
