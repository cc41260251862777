//! Local task spawning for loaders.
//!
//! # Design Decisions
//! - Loader futures are `!Send`; spawners run them on the current thread
//! - The navigator never blocks on a loader

use futures_util::future::LocalBoxFuture;

/// Runs a future to completion on the current thread.
pub trait LocalSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

/// Spawns onto the Tokio `LocalSet` driving the current task.
///
/// Panics, like `tokio::task::spawn_local`, when used outside a `LocalSet`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLocalSpawner;

impl LocalSpawner for TokioLocalSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

/// Spawns onto the browser's microtask queue.
#[cfg(feature = "browser")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmSpawner;

#[cfg(feature = "browser")]
impl LocalSpawner for WasmSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
