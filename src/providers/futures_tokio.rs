//! # Futures implementation using Tokio runtime
//!
//! This module contains [`RuntimeTokio`] type.
//!
//! It requires the [`tokio` feature] to be enabled.
//!
//! [`tokio` feature]: ../../index.html#features

use crate::core::Runtime;
use futures::future::BoxFuture;

/// Tokio-based `async` tasks runtime.
///
/// Tasks are spawned on the tokio runtime the caller is running in. When the
/// caller isn't inside a runtime, a shared multi-threaded runtime is started
/// on first use. If that runtime can't be started either, the task runs on a
/// dedicated thread.
#[derive(Clone, Debug, Default)]
pub struct RuntimeTokio;

impl Runtime for RuntimeTokio {
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(future);
            }
            Err(_) => match shared_runtime() {
                Some(runtime) => {
                    runtime.spawn(future);
                }
                None => spawn_detached(future),
            },
        }
    }
}

fn shared_runtime() -> Option<&'static tokio::runtime::Runtime> {
    static RUNTIME: std::sync::OnceLock<Option<tokio::runtime::Runtime>> =
        std::sync::OnceLock::new();

    RUNTIME
        .get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .thread_name("restcall-worker")
                .build()
                .map_err(|e| log::warn!("Unable to start tokio runtime: {e}"))
                .ok()
        })
        .as_ref()
}

fn spawn_detached(future: BoxFuture<'static, ()>) {
    let task = std::sync::Arc::new(spin::Mutex::new(Some(future)));
    let detached = task.clone();

    let spawned = std::thread::Builder::new()
        .name("restcall-detached".into())
        .spawn(move || {
            if let Some(future) = detached.lock().take() {
                block_on(future);
            }
        });

    if let Err(e) = spawned {
        log::warn!("Unable to start task thread, running task in place: {e}");
        if let Some(future) = task.lock().take() {
            block_on(future);
        }
    }
}

fn block_on(future: BoxFuture<'static, ()>) {
    match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime.block_on(future),
        Err(e) => {
            log::warn!("Unable to start tokio runtime, polling task without it: {e}");
            futures::executor::block_on(future)
        }
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[tokio::test]
    async fn run_spawned_task() {
        let (tx, rx) = tokio::sync::oneshot::channel();

        RuntimeTokio.spawn(Box::pin(async move {
            tx.send(42).unwrap();
        }));

        assert_eq!(rx.await.unwrap(), 42);
    }

    #[test]
    fn run_spawned_task_outside_of_runtime() {
        let (tx, rx) = std::sync::mpsc::channel();

        RuntimeTokio.spawn(Box::pin(async move {
            tx.send(std::thread::current().name().map(String::from))
                .unwrap();
        }));

        let thread_name = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        assert_eq!(thread_name.as_deref(), Some("restcall-worker"));
    }

    #[test]
    fn run_task_on_detached_thread() {
        let (tx, rx) = std::sync::mpsc::channel();

        spawn_detached(Box::pin(async move {
            tokio::task::yield_now().await;
            tx.send(std::thread::current().name().map(String::from))
                .unwrap();
        }));

        let thread_name = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        assert_eq!(thread_name.as_deref(), Some("restcall-detached"));
    }
}
