//! Async session access with last-request-wins dataset loading.
//!
//! Loads run on the blocking pool. Every request takes a generation number
//! before it starts; when a load finishes, its result is applied only if no
//! newer request has started since. Older results are dropped and reported
//! as [`LoadOutcome::Superseded`]. The session lock is never held while a
//! load runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use polar_common::{OperatingParameters, PolarError, PolarResult};
use polar_locator::DatasetLocation;
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::loader::DatasetLoader;
use crate::session::PolarSession;

/// Result of a dataset request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The dataset was installed.
    Applied { location: DatasetLocation },
    /// A newer request started while this one was loading; its result,
    /// success or failure, was discarded.
    Superseded { generation: u64 },
}

/// Shared handle to a [`PolarSession`].
#[derive(Clone)]
pub struct SessionHandle {
    session: Arc<Mutex<PolarSession>>,
    loader: Arc<DatasetLoader>,
    generation: Arc<AtomicU64>,
}

impl SessionHandle {
    pub fn new(session: PolarSession, loader: DatasetLoader) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            loader: Arc::new(loader),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Lock the session for reading or editing.
    pub async fn lock(&self) -> MutexGuard<'_, PolarSession> {
        self.session.lock().await
    }

    pub fn loader(&self) -> &DatasetLoader {
        &self.loader
    }

    /// Read the control file and apply it.
    pub async fn load_control_file(&self) -> PolarResult<()> {
        let loader = Arc::clone(&self.loader);
        let control = tokio::task::spawn_blocking(move || loader.load_control_file())
            .await
            .map_err(|e| PolarError::ConfigRead(format!("control file task failed: {}", e)))??;
        self.session.lock().await.apply_control_file(control);
        Ok(())
    }

    /// Set new operating parameters and load the matching dataset.
    ///
    /// On failure the previous dataset stays in place and the error is
    /// returned, unless the request was superseded in the meantime.
    pub async fn request_dataset(&self, params: OperatingParameters) -> PolarResult<LoadOutcome> {
        let generation = {
            let mut session = self.session.lock().await;
            session.ensure_control_loaded()?;
            session.set_parameters(params.clone());
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        debug!(generation = generation, draft = %params.draft_category, "Dataset load started");

        let loader = Arc::clone(&self.loader);
        let result = tokio::task::spawn_blocking(move || loader.load_dataset(&params))
            .await
            .map_err(|e| PolarError::DataRead(format!("dataset load task failed: {}", e)))
            .and_then(|r| r);

        let mut session = self.session.lock().await;
        let latest = self.generation.load(Ordering::SeqCst);
        if generation != latest {
            match &result {
                Ok(loaded) => warn!(
                    generation = generation,
                    latest = latest,
                    file = %loaded.location.file_name,
                    "Discarding superseded dataset load"
                ),
                Err(e) => warn!(
                    generation = generation,
                    latest = latest,
                    error = %e,
                    "Discarding superseded failed load"
                ),
            }
            return Ok(LoadOutcome::Superseded { generation });
        }

        let loaded = result?;
        let location = loaded.location.clone();
        session.apply_dataset(loaded)?;
        Ok(LoadOutcome::Applied { location })
    }
}
