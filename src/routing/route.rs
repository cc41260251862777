//! Route tree definitions.
//!
//! # Responsibilities
//! - Describe one node of the route tree: path, view, loader, children
//! - Box loaders and error hooks so trees are cheap to share
//!
//! # Design Decisions
//! - `path` is relative to the parent and may span several segments
//! - Views are opaque (`V`); the router only clones them
//! - Routes are never mutated once handed to the navigator

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures_util::FutureExt;

use crate::navigation::loader::{ErrorHook, LoaderError, LoaderFn, LoaderResult};
use crate::routing::Params;

/// A node of the route tree.
pub struct Route<V> {
    path: String,
    view: V,
    loader: Option<LoaderFn>,
    loading_view: Option<V>,
    on_loader_error: Option<ErrorHook>,
    children: Vec<Route<V>>,
}

impl<V> Route<V> {
    /// Create a route rendering `view` at `path`.
    pub fn new(path: impl Into<String>, view: V) -> Self {
        Self {
            path: path.into(),
            view,
            loader: None,
            loading_view: None,
            on_loader_error: None,
            children: Vec::new(),
        }
    }

    /// Run `loader` with the extracted params before the view becomes active.
    pub fn with_loader<F, Fut>(mut self, loader: F) -> Self
    where
        F: Fn(Params) -> Fut + 'static,
        Fut: Future<Output = LoaderResult> + 'static,
    {
        let boxed: LoaderFn = Rc::new(move |params: Params| loader(params).boxed_local());
        self.loader = Some(boxed);
        self
    }

    /// View shown while the loader is pending.
    pub fn with_loading_view(mut self, view: V) -> Self {
        self.loading_view = Some(view);
        self
    }

    /// Receive loader failures instead of the default error log.
    pub fn on_loader_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(LoaderError) + 'static,
    {
        let boxed: ErrorHook = Rc::new(hook);
        self.on_loader_error = Some(boxed);
        self
    }

    /// Nest `children` under this route.
    pub fn with_children(mut self, children: Vec<Route<V>>) -> Self {
        self.children = children;
        self
    }

    /// Add a single child route.
    pub fn child(mut self, child: Route<V>) -> Self {
        self.children.push(child);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn loader(&self) -> Option<&LoaderFn> {
        self.loader.as_ref()
    }

    pub fn loading_view(&self) -> Option<&V> {
        self.loading_view.as_ref()
    }

    pub fn loader_error_hook(&self) -> Option<&ErrorHook> {
        self.on_loader_error.as_ref()
    }

    pub fn children(&self) -> &[Route<V>] {
        &self.children
    }
}

// Closures have no Debug; report their presence instead.
impl<V: fmt::Debug> fmt::Debug for Route<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("view", &self.view)
            .field("has_loader", &self.loader.is_some())
            .field("loading_view", &self.loading_view)
            .field("has_error_hook", &self.on_loader_error.is_some())
            .field("children", &self.children)
            .finish()
    }
}
