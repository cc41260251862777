//! Navigation state engine.
//!
//! # Responsibilities
//! - Own the single `NavigationState` and every mutation of it
//! - Push history entries and react to external back/forward
//! - Run the route matcher on location changes
//! - Dispatch loaders and commit only the most recent navigation's result
//! - Notify observers synchronously after each commit
//!
//! # Design Decisions
//! - Single-threaded: `Rc` + `RefCell`, no locks
//! - Every match bumps a sequence number; a loader commits only if the
//!   sequence it captured is still current
//! - No borrow is held while observers, loaders or error hooks run
//! - Loaders are dispatched after the loading state is published
//! - Commits made from inside an observer are delivered after the one in
//!   flight, so every observer ends on the latest state

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use futures_util::FutureExt;

use crate::config::{MatchTrigger, RouterConfig};
use crate::history::HistoryBridge;
use crate::location::{parse_path, Location};
use crate::navigation::loader::{ErrorHook, LoadOutcome, LoaderFn, LoaderResult};
use crate::navigation::spawn::LocalSpawner;
use crate::navigation::state::{ChangeSet, NavigationCause, NavigationState, StateUpdate};
use crate::observability::metrics;
use crate::routing::{match_routes, Params, Route, RouteMatch};
use crate::subscription::{ListenerSet, Subscription};

/// Handle to a navigation engine. Clones share the same state.
pub struct Navigator<V: Clone + 'static> {
    shared: Rc<Shared<V>>,
}

struct Registration<V> {
    routes: Rc<[Route<V>]>,
    not_found: V,
}

impl<V: Clone> Clone for Registration<V> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            not_found: self.not_found.clone(),
        }
    }
}

/// A loader waiting to be dispatched, with what it needs to commit.
struct PendingLoad<V> {
    sequence: u64,
    route_path: String,
    loader: LoaderFn,
    params: Params,
    view: V,
    on_error: Option<ErrorHook>,
}

struct Shared<V: Clone + 'static> {
    config: RouterConfig,
    history: Rc<dyn HistoryBridge>,
    spawner: Rc<dyn LocalSpawner>,
    state: RefCell<NavigationState<V>>,
    registration: RefCell<Option<Registration<V>>>,
    observers: Rc<ListenerSet<StateUpdate<V>>>,
    history_subscription: RefCell<Option<Subscription>>,
    sequence: Cell<u64>,
    disposed: Cell<bool>,
}

impl<V: Clone + 'static> Navigator<V> {
    /// Create a navigator with the default config.
    pub fn new<H, S>(history: Rc<H>, spawner: S) -> Self
    where
        H: HistoryBridge + 'static,
        S: LocalSpawner + 'static,
    {
        Self::with_config(RouterConfig::default(), history, spawner)
    }

    /// Create a navigator and subscribe to external navigation on `history`.
    pub fn with_config<H, S>(config: RouterConfig, history: Rc<H>, spawner: S) -> Self
    where
        H: HistoryBridge + 'static,
        S: LocalSpawner + 'static,
    {
        let location = parse_path(&config.initial_path);
        let history: Rc<dyn HistoryBridge> = history;

        let shared = Rc::new(Shared {
            config,
            history,
            spawner: Rc::new(spawner),
            state: RefCell::new(NavigationState::new(location)),
            registration: RefCell::new(None),
            observers: ListenerSet::new(),
            history_subscription: RefCell::new(None),
            sequence: Cell::new(0),
            disposed: Cell::new(false),
        });

        let weak: Weak<Shared<V>> = Rc::downgrade(&shared);
        let subscription = shared.history.on_external_navigation(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.handle_external_navigation();
            }
        }));
        *shared.history_subscription.borrow_mut() = Some(subscription);

        tracing::debug!(
            initial_location = %shared.state.borrow().location,
            match_trigger = ?shared.config.match_trigger,
            "Navigator created"
        );
        Self { shared }
    }

    /// Push `path` onto the history and make it the current location.
    pub fn navigate(&self, path: &str) {
        if self.shared.rejects_after_dispose("navigate") {
            return;
        }

        let location = parse_path(path);
        tracing::debug!(path, pathname = %location.pathname, "Navigate");
        if !self.shared.history.push_entry(path) {
            tracing::warn!(path, "History entry not recorded; location moves without it");
        }
        self.shared.change_location(location, NavigationCause::Navigate);
    }

    /// Install `routes`, replacing any previous tree, and match the current location.
    pub fn register_routes(&self, routes: Vec<Route<V>>, not_found_view: V) {
        if self.shared.rejects_after_dispose("register_routes") {
            return;
        }

        let previous = self.shared.registration.replace(Some(Registration {
            routes: routes.into(),
            not_found: not_found_view,
        }));
        if previous.is_some() {
            tracing::debug!("Replacing previous route registration");
        }

        let mut changes = ChangeSet::default();
        let pending = self.shared.evaluate(&mut changes, NavigationCause::Registration);
        self.shared.publish(changes, pending);
    }

    /// Replace the active view, e.g. with an error view from a loader error hook.
    pub fn set_active_view(&self, view: V) {
        if self.shared.rejects_after_dispose("set_active_view") {
            return;
        }

        self.shared.state.borrow_mut().active_view = Some(view);
        self.shared.notify(ChangeSet {
            active_view: true,
            ..ChangeSet::default()
        });
    }

    /// Observe every committed state change.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&StateUpdate<V>) + 'static,
    {
        if self.shared.rejects_after_dispose("subscribe") {
            return Subscription::noop();
        }
        self.shared.observers.insert(Rc::new(observer))
    }

    /// Stop reacting to history and drop the route registration.
    ///
    /// Pending loaders keep running but can no longer commit. Calling this
    /// twice is harmless.
    pub fn dispose(&self) {
        if self.shared.disposed.replace(true) {
            tracing::debug!("Navigator already disposed");
            return;
        }

        let subscription = self.shared.history_subscription.borrow_mut().take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }
        self.shared.registration.borrow_mut().take();
        self.shared.sequence.set(self.shared.sequence.get() + 1);
        self.shared.observers.clear();

        tracing::info!("Navigator disposed");
    }

    pub fn location(&self) -> Location {
        self.shared.state.borrow().location.clone()
    }

    pub fn active_view(&self) -> Option<V> {
        self.shared.state.borrow().active_view.clone()
    }

    pub fn params(&self) -> Params {
        self.shared.state.borrow().params.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().is_loading
    }

    /// Snapshot of the whole state.
    pub fn state(&self) -> NavigationState<V> {
        self.shared.state.borrow().clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.disposed.get()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.shared.config
    }

    /// A handle that does not keep the navigator alive.
    ///
    /// Loader error hooks stored in the route tree should capture this
    /// rather than a `Navigator`, which would form a reference cycle.
    pub fn downgrade(&self) -> WeakNavigator<V> {
        WeakNavigator {
            shared: Rc::downgrade(&self.shared),
        }
    }
}

/// Non-owning counterpart of [`Navigator`].
pub struct WeakNavigator<V: Clone + 'static> {
    shared: Weak<Shared<V>>,
}

impl<V: Clone + 'static> WeakNavigator<V> {
    pub fn upgrade(&self) -> Option<Navigator<V>> {
        self.shared.upgrade().map(|shared| Navigator { shared })
    }
}

impl<V: Clone + 'static> Clone for WeakNavigator<V> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<V: Clone + 'static> Clone for Navigator<V> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<V: Clone + 'static> fmt::Debug for Navigator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("location", &self.shared.state.borrow().location)
            .field("is_loading", &self.shared.state.borrow().is_loading)
            .field("sequence", &self.shared.sequence.get())
            .field("registered", &self.shared.registration.borrow().is_some())
            .field("disposed", &self.shared.disposed.get())
            .finish()
    }
}

impl<V: Clone + 'static> Shared<V> {
    fn rejects_after_dispose(&self, operation: &'static str) -> bool {
        if self.disposed.get() {
            tracing::warn!(operation, "Navigator used after dispose; ignoring");
            return true;
        }
        false
    }

    fn metrics_enabled(&self) -> bool {
        self.config.observability.metrics_enabled
    }

    fn handle_external_navigation(self: &Rc<Self>) {
        if self.disposed.get() {
            return;
        }

        let url = self.history.current_url();
        let location = parse_path(&url);
        tracing::debug!(url = %url, pathname = %location.pathname, "External navigation");
        self.change_location(location, NavigationCause::External);
    }

    fn change_location(self: &Rc<Self>, location: Location, cause: NavigationCause) {
        if self.metrics_enabled() {
            metrics::record_navigation(cause);
        }

        let pathname_changed = {
            let mut state = self.state.borrow_mut();
            let changed = state.location.pathname != location.pathname;
            state.location = location;
            changed
        };

        let mut changes = ChangeSet {
            location: true,
            ..ChangeSet::default()
        };
        let rematch = match self.config.match_trigger {
            MatchTrigger::EveryNavigation => true,
            MatchTrigger::PathnameChange => pathname_changed,
        };

        let pending = if rematch {
            self.evaluate(&mut changes, cause)
        } else {
            tracing::trace!("Pathname unchanged; skipping route matching");
            None
        };
        self.publish(changes, pending);
    }

    /// Match the current pathname and stage the resulting state.
    ///
    /// Starts a new navigation sequence, which supersedes any pending loader.
    fn evaluate(&self, changes: &mut ChangeSet, cause: NavigationCause) -> Option<PendingLoad<V>> {
        let sequence = self.sequence.get() + 1;
        self.sequence.set(sequence);

        let registration = self.registration.borrow().clone()?;
        let pathname = self.state.borrow().location.pathname.clone();
        let found = match_routes(&registration.routes, &pathname);
        if self.metrics_enabled() {
            metrics::record_route_match(found.is_some());
        }

        let mut state = self.state.borrow_mut();
        changes.params = true;

        let Some(RouteMatch {
            route,
            full_path,
            params,
        }) = found
        else {
            tracing::debug!(%pathname, sequence, cause = cause.as_str(), "No route matched");
            state.active_view = Some(registration.not_found.clone());
            state.params.clear();
            state.is_loading = false;
            changes.active_view = true;
            changes.is_loading = true;
            return None;
        };

        tracing::debug!(
            %pathname,
            route = %full_path,
            sequence,
            cause = cause.as_str(),
            "Route matched"
        );
        state.params = params.clone();
        changes.is_loading = true;

        let Some(loader) = route.loader() else {
            state.active_view = Some(route.view().clone());
            state.is_loading = false;
            changes.active_view = true;
            return None;
        };

        state.is_loading = true;
        if let Some(loading_view) = route.loading_view() {
            state.active_view = Some(loading_view.clone());
            changes.active_view = true;
        }

        Some(PendingLoad {
            sequence,
            route_path: full_path,
            loader: loader.clone(),
            params,
            view: route.view().clone(),
            on_error: route.loader_error_hook().cloned(),
        })
    }

    fn publish(self: &Rc<Self>, changes: ChangeSet, pending: Option<PendingLoad<V>>) {
        if changes.is_loading && self.metrics_enabled() {
            metrics::record_loading(self.state.borrow().is_loading);
        }
        self.notify(changes);

        if let Some(pending) = pending {
            self.dispatch(pending);
        }
    }

    fn notify(&self, changes: ChangeSet) {
        if changes.is_empty() {
            return;
        }
        let update = StateUpdate {
            state: self.state.borrow().clone(),
            changes,
        };
        self.observers.emit(update);
    }

    fn dispatch(self: &Rc<Self>, pending: PendingLoad<V>) {
        // An observer may have navigated again while being notified.
        if self.disposed.get() || pending.sequence != self.sequence.get() {
            tracing::debug!(
                route = %pending.route_path,
                sequence = pending.sequence,
                "Navigation superseded before its loader started"
            );
            return;
        }

        tracing::debug!(
            route = %pending.route_path,
            sequence = pending.sequence,
            "Loader dispatched"
        );
        let task = (pending.loader)(pending.params.clone());
        let shared = Rc::downgrade(self);

        self.spawner.spawn_local(
            async move {
                let result = task.await;
                if let Some(shared) = shared.upgrade() {
                    shared.complete_load(pending, result);
                }
            }
            .boxed_local(),
        );
    }

    fn complete_load(&self, pending: PendingLoad<V>, result: LoaderResult) {
        let current = self.sequence.get();
        if self.disposed.get() || pending.sequence != current {
            tracing::debug!(
                route = %pending.route_path,
                sequence = pending.sequence,
                current,
                resolved = result.is_ok(),
                "Discarding superseded loader result"
            );
            self.record_outcome(LoadOutcome::Superseded);
            return;
        }

        match result {
            Ok(()) => {
                {
                    let mut state = self.state.borrow_mut();
                    state.active_view = Some(pending.view);
                    state.is_loading = false;
                }
                tracing::debug!(
                    route = %pending.route_path,
                    sequence = pending.sequence,
                    "Loader resolved"
                );
                self.record_outcome(LoadOutcome::Resolved);
                self.notify(ChangeSet {
                    active_view: true,
                    is_loading: true,
                    ..ChangeSet::default()
                });
            }
            Err(error) => {
                self.state.borrow_mut().is_loading = false;
                self.record_outcome(LoadOutcome::Errored);
                self.notify(ChangeSet {
                    is_loading: true,
                    ..ChangeSet::default()
                });

                match pending.on_error {
                    Some(hook) => hook(error),
                    None => tracing::error!(
                        route = %pending.route_path,
                        sequence = pending.sequence,
                        error = %error,
                        "Route loader failed"
                    ),
                }
            }
        }
    }

    fn record_outcome(&self, outcome: LoadOutcome) {
        if !self.metrics_enabled() {
            return;
        }
        metrics::record_loader_outcome(outcome);
        if outcome != LoadOutcome::Superseded {
            metrics::record_loading(false);
        }
    }
}
