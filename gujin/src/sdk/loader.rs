//! One-time asynchronous SDK acquisition.
//!
//! The loader replaces the ambient "SDK already loaded" global of script-tag
//! style integrations with a single memoized async initializer. Every caller
//! of [`SdkLoader::acquire`] shares one in-flight initialization and receives
//! the same resolved handle, or the same failure. A completed outcome is
//! cached for the loader's lifetime; retry after failure means constructing a
//! new loader (a host remount), never an automatic re-fetch.

use super::types::{SdkHandle, SdkLoadError};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex as StdMutex;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info};

type InitFuture = Pin<Box<dyn Future<Output = Result<SdkHandle, SdkLoadError>> + Send>>;
type LoadOutcome = Result<SdkHandle, SdkLoadError>;

enum LoadState {
    /// No acquisition started yet.
    Idle,
    /// Initialization in flight; receivers observe the outcome when ready.
    Loading(watch::Receiver<Option<LoadOutcome>>),
    /// Initialization finished; outcome memoized for the loader's lifetime.
    Done(LoadOutcome),
}

/// Memoized asynchronous SDK initializer.
pub struct SdkLoader {
    state: Arc<Mutex<LoadState>>,
    init: StdMutex<Option<InitFuture>>,
}

impl SdkLoader {
    /// Creates a loader that will run `init` on the first [`acquire`] call.
    ///
    /// [`acquire`]: SdkLoader::acquire
    pub fn new<F>(init: F) -> Self
    where
        F: Future<Output = Result<SdkHandle, SdkLoadError>> + Send + 'static,
    {
        Self {
            state: Arc::new(Mutex::new(LoadState::Idle)),
            init: StdMutex::new(Some(Box::pin(init))),
        }
    }

    /// Creates a loader whose SDK is already resolved.
    ///
    /// Used when the provider needs no asynchronous bootstrap, e.g. the
    /// in-process headless adapter.
    pub fn ready(handle: SdkHandle) -> Self {
        Self {
            state: Arc::new(Mutex::new(LoadState::Done(Ok(handle)))),
            init: StdMutex::new(None),
        }
    }

    /// Acquires the SDK handle, initializing it on first call.
    ///
    /// Idempotent and safe to call concurrently: all callers share one
    /// initialization and observe the same outcome. A failed initialization
    /// is memoized too and surfaced to every subsequent caller.
    pub async fn acquire(&self) -> Result<SdkHandle, SdkLoadError> {
        let mut rx = {
            let mut state = self.state.lock().await;
            match &*state {
                LoadState::Done(outcome) => return outcome.clone(),
                LoadState::Loading(rx) => rx.clone(),
                LoadState::Idle => self.start_init(&mut state),
            }
        };

        loop {
            if let Some(outcome) = rx.borrow_and_update().clone() {
                return outcome;
            }
            if rx.changed().await.is_err() {
                return Err(SdkLoadError::Initialization(
                    "SDK initializer task dropped before completing".to_string(),
                ));
            }
        }
    }

    /// Returns the memoized outcome without triggering initialization.
    pub async fn try_get(&self) -> Option<Result<SdkHandle, SdkLoadError>> {
        match &*self.state.lock().await {
            LoadState::Done(outcome) => Some(outcome.clone()),
            _ => None,
        }
    }

    /// Spawns the initializer and flips the state to Loading.
    fn start_init(&self, state: &mut LoadState) -> watch::Receiver<Option<LoadOutcome>> {
        let init = self
            .init
            .lock()
            .expect("loader init mutex poisoned")
            .take()
            .expect("loader started twice from Idle state");

        let (tx, rx) = watch::channel(None);
        let shared = Arc::clone(&self.state);

        debug!("starting mapping SDK initialization");
        tokio::spawn(async move {
            let outcome = init.await;
            match &outcome {
                Ok(sdk) => info!(provider = sdk.name(), "mapping SDK initialized"),
                Err(e) => error!(error = %e, "mapping SDK initialization failed"),
            }
            *shared.lock().await = LoadState::Done(outcome.clone());
            // Receivers may all be gone if every caller was cancelled.
            let _ = tx.send(Some(outcome));
        });

        *state = LoadState::Loading(rx.clone());
        rx
    }
}
