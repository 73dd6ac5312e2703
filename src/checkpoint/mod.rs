//! Durable record of which sites have completed a full crawl.
//!
//! The store is shared by every site worker. `mark_completed` performs the
//! read-modify-write of the completed set and its persistence to disk inside
//! one critical section, so concurrent completions lose no update and a
//! crash loses at most the in-flight site.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tokio::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CheckpointState {
    completed_sites: BTreeSet<String>,
}

#[derive(Debug)]
pub struct CheckpointStore {
    path: PathBuf,
    state: Mutex<CheckpointState>,
}

impl CheckpointStore {
    /// Load prior progress from `path`. A missing, unreadable or corrupt
    /// file means nothing completed yet; loading never fails the process.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => state,
                Err(e) => {
                    warn!(
                        "checkpoint file {} is corrupt ({e}); starting from an empty checkpoint",
                        path.display()
                    );
                    CheckpointState::default()
                }
            },
            Err(_) => CheckpointState::default(),
        };
        Self {
            path,
            state: Mutex::new(state),
        }
    }

    /// True when the named site finished a full crawl in a prior run or this
    /// one.
    pub async fn is_completed(&self, site_name: &str) -> bool {
        self.state.lock().await.completed_sites.contains(site_name)
    }

    /// Record a completed site and persist the whole set before returning.
    pub async fn mark_completed(&self, site_name: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.completed_sites.insert(site_name.to_string());
        let serialized =
            serde_json::to_string_pretty(&*state).context("failed to serialize checkpoint")?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, serialized)
            .await
            .with_context(|| format!("failed to write checkpoint {}", self.path.display()))?;
        Ok(())
    }

    /// Snapshot of every completed site name.
    pub async fn completed_sites(&self) -> BTreeSet<String> {
        self.state.lock().await.completed_sites.clone()
    }
}
