use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::task::JoinHandle;

use super::machine::QueryMachine;
use crate::error::ApiResult;

/// Boxed request future produced by a fetcher
pub type QueryFuture<T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send + 'static>>;

type Fetcher<I, T> = Arc<dyn Fn(&I) -> Option<QueryFuture<T>> + Send + Sync>;

/// Query re-run automatically when its watched input changes.
///
/// Inputs are compared by value, so rebuilding an equal input is a no-op.
/// The fetcher may return `None` to decline an input (for example an absent
/// id); no request is made and the machine is left as it was.
pub struct ReactiveQuery<I, T> {
    machine: QueryMachine<T>,
    input: Arc<Mutex<Option<I>>>,
    fetcher: Fetcher<I, T>,
}

impl<I, T> Clone for ReactiveQuery<I, T> {
    fn clone(&self) -> Self {
        Self {
            machine: self.machine.clone(),
            input: Arc::clone(&self.input),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<I, T> ReactiveQuery<I, T>
where
    I: PartialEq + Clone + Send + 'static,
    T: Send + Sync + 'static,
{
    pub fn new<F>(name: &'static str, fetcher: F) -> Self
    where
        F: Fn(&I) -> Option<QueryFuture<T>> + Send + Sync + 'static,
    {
        Self {
            machine: QueryMachine::new(name),
            input: Arc::new(Mutex::new(None)),
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn machine(&self) -> &QueryMachine<T> {
        &self.machine
    }

    pub fn input(&self) -> Option<I> {
        self.input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Records a new input and fetches for it if it differs from the last one.
    ///
    /// Returns the spawned fetch, or `None` if nothing was issued. Must be
    /// called from within a tokio runtime.
    pub fn set_input(&self, input: I) -> Option<JoinHandle<()>> {
        // Held through `begin()` so the stored input always has the newest generation
        let mut last = self.input.lock().unwrap_or_else(PoisonError::into_inner);
        if last.as_ref() == Some(&input) {
            tracing::trace!(query = self.machine.name(), "Input unchanged, skipping fetch");
            return None;
        }
        let handle = self.spawn_fetch(&input);
        *last = Some(input);
        handle
    }

    /// Fetches again for the current input regardless of equality
    pub fn refetch(&self) -> Option<JoinHandle<()>> {
        let last = self.input.lock().unwrap_or_else(PoisonError::into_inner);
        let input = last.as_ref()?;
        self.spawn_fetch(input)
    }

    fn spawn_fetch(&self, input: &I) -> Option<JoinHandle<()>> {
        let request = (self.fetcher)(input)?;

        // Generation is taken before spawning so issue order decides the winner
        let generation = self.machine.begin();
        let machine = self.machine.clone();

        Some(tokio::spawn(async move {
            let outcome = request.await.map(Arc::new);
            machine.settle(generation, &outcome);
        }))
    }
}
