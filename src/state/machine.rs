//! Lifecycle of one logical request type.
//!
//! `idle -> loading -> success | error`, with a generation counter so that
//! only the most recently issued request may settle the machine. Responses
//! that arrive after a newer request started are dropped on arrival.
use std::{
    fmt::Debug,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use serde::Serialize;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Snapshot of a machine as seen by view code
///
/// `data` is the last successful payload. It survives later failures and is
/// only cleared by [`QueryMachine::reset`].
#[derive(Debug)]
pub struct AsyncResult<T> {
    pub status: QueryStatus,
    pub data: Option<Arc<T>>,
    pub error: Option<ApiError>,
}

impl<T> Clone for AsyncResult<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
        }
    }
}

impl<T> Default for AsyncResult<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
        }
    }
}

impl<T> AsyncResult<T> {
    pub fn is_idle(&self) -> bool {
        self.status == QueryStatus::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }
}

/// Tag for one request attempt
pub type Generation = u64;

struct MachineState<T> {
    result: AsyncResult<T>,
    generation: Generation,
}

/// Shared handle to one query's state; clones observe the same machine
pub struct QueryMachine<T> {
    name: &'static str,
    inner: Arc<Mutex<MachineState<T>>>,
}

impl<T> Clone for QueryMachine<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Debug for QueryMachine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("QueryMachine")
            .field("name", &self.name)
            .field("status", &state.result.status)
            .field("generation", &state.generation)
            .finish()
    }
}

impl<T> QueryMachine<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(MachineState {
                result: AsyncResult::default(),
                generation: 0,
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    // The lock is never held across an await, so a poisoned guard still
    // holds consistent state.
    fn state(&self) -> MutexGuard<'_, MachineState<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> AsyncResult<T> {
        self.state().result.clone()
    }

    pub fn status(&self) -> QueryStatus {
        self.state().result.status
    }

    pub fn data(&self) -> Option<Arc<T>> {
        self.state().result.data.clone()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.state().result.error.clone()
    }

    pub fn generation(&self) -> Generation {
        self.state().generation
    }

    /// Starts a new attempt: `loading`, previous error cleared, data kept
    pub fn begin(&self) -> Generation {
        let mut state = self.state();
        state.generation += 1;
        state.result.status = QueryStatus::Loading;
        state.result.error = None;

        tracing::debug!(query = self.name, generation = state.generation, "Query started");

        state.generation
    }

    /// Applies an outcome if `generation` is still the latest attempt.
    ///
    /// Returns whether the outcome was applied.
    pub fn settle(&self, generation: Generation, outcome: &ApiResult<Arc<T>>) -> bool {
        let mut state = self.state();

        if generation != state.generation {
            tracing::debug!(
                query = self.name,
                generation,
                latest = state.generation,
                "Discarding superseded response"
            );
            return false;
        }

        match outcome {
            Ok(data) => {
                state.result.data = Some(Arc::clone(data));
                state.result.error = None;
                state.result.status = QueryStatus::Success;
                tracing::debug!(query = self.name, generation, "Query succeeded");
            }
            Err(e) => {
                state.result.error = Some(e.clone());
                state.result.status = QueryStatus::Error;
                tracing::warn!(query = self.name, generation, error = %e, "Query failed");
            }
        }

        true
    }

    /// Back to `idle` with no data; in-flight responses are discarded
    pub fn reset(&self) {
        let mut state = self.state();
        state.generation += 1;
        state.result = AsyncResult::default();
    }

    /// Imperative trigger: runs `request` as a new attempt.
    ///
    /// The caller gets its own outcome back, including failures, even when a
    /// newer attempt has since superseded it in the machine's state.
    pub async fn execute<F>(&self, request: F) -> ApiResult<Arc<T>>
    where
        F: Future<Output = ApiResult<T>>,
    {
        let generation = self.begin();
        let outcome = request.await.map(Arc::new);
        self.settle(generation, &outcome);
        outcome
    }
}
