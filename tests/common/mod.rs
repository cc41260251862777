//! Shared utilities for navigator integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use spa_router::{
    LoaderError, LoaderResult, MemoryHistory, Navigator, Params, Route, RouterConfig,
    TokioLocalSpawner,
};
use tokio::sync::oneshot;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

pub type View = &'static str;

pub const HOME: View = "home";
pub const ABOUT: View = "about";
pub const NOT_FOUND: View = "not-found";
pub const LOADING: View = "loading";

/// Run `future` inside a `LocalSet` so loaders can be spawned.
pub async fn run_local<F: Future>(future: F) -> F::Output {
    tokio::task::LocalSet::new().run_until(future).await
}

/// Yield enough times for woken loader tasks to finish.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// A navigator over a fresh in-memory history.
pub fn navigator() -> (Rc<MemoryHistory>, Navigator<View>) {
    navigator_with(RouterConfig::default())
}

pub fn navigator_with(config: RouterConfig) -> (Rc<MemoryHistory>, Navigator<View>) {
    let history = Rc::new(MemoryHistory::new());
    let navigator = Navigator::with_config(config, history.clone(), TokioLocalSpawner);
    (history, navigator)
}

pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A loader whose runs are settled by the test, in call order.
#[derive(Clone, Default)]
pub struct ControlledLoader {
    pending: Rc<RefCell<VecDeque<oneshot::Sender<LoaderResult>>>>,
    calls: Rc<RefCell<Vec<Params>>>,
}

impl ControlledLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install this loader on `route`.
    pub fn attach(&self, route: Route<View>) -> Route<View> {
        let pending = self.pending.clone();
        let calls = self.calls.clone();
        route.with_loader(move |params| {
            calls.borrow_mut().push(params);
            let (tx, rx) = oneshot::channel();
            pending.borrow_mut().push_back(tx);
            async move {
                rx.await
                    .unwrap_or_else(|_| Err(LoaderError::msg("loader abandoned")))
            }
        })
    }

    /// Resolve the oldest pending run.
    pub fn resolve(&self) {
        self.finish(Ok(()));
    }

    /// Reject the oldest pending run.
    pub fn reject(&self, message: &str) {
        self.finish(Err(LoaderError::msg(message)));
    }

    fn finish(&self, result: LoaderResult) {
        let tx = self
            .pending
            .borrow_mut()
            .pop_front()
            .expect("no pending loader run");
        let _ = tx.send(result);
    }

    pub fn calls(&self) -> Vec<Params> {
        self.calls.borrow().clone()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

/// An `ERROR` event as seen by [`ErrorEvents`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturedError {
    pub message: String,
    pub route: Option<String>,
}

impl Visit for CapturedError {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "route" => self.route = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

/// Layer collecting every `ERROR` event.
#[derive(Clone, Default)]
pub struct ErrorEvents(Arc<Mutex<Vec<CapturedError>>>);

impl ErrorEvents {
    /// Install as this thread's default subscriber until the guard drops.
    pub fn capture() -> (Self, DefaultGuard) {
        let events = Self::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (events, guard)
    }

    pub fn events(&self) -> Vec<CapturedError> {
        self.0.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl<S: Subscriber> Layer<S> for ErrorEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::ERROR {
            return;
        }
        let mut captured = CapturedError::default();
        event.record(&mut captured);
        if let Ok(mut events) = self.0.lock() {
            events.push(captured);
        }
    }
}
