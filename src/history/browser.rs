//! Browser History API bridge.
//!
//! # Responsibilities
//! - `history.pushState(null, "", url)` for new entries
//! - `location.href` for resync after back/forward
//! - `popstate` listener registration and removal

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, Window};

use crate::history::HistoryBridge;
use crate::subscription::Subscription;

/// [`HistoryBridge`] over `window.history` and `window.location`.
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    /// Bind to the global window. Returns `None` outside a browser context.
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl HistoryBridge for BrowserHistory {
    fn push_entry(&self, url: &str) -> bool {
        let history = match self.window.history() {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(url, error = ?e, "History API unavailable");
                return false;
            }
        };
        match history.push_state_with_url(&JsValue::NULL, "", Some(url)) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(url, error = ?e, "pushState rejected");
                false
            }
        }
    }

    fn current_url(&self) -> String {
        self.window.location().href().unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "Failed to read location.href");
            "/".to_string()
        })
    }

    fn on_external_navigation(&self, callback: Box<dyn Fn()>) -> Subscription {
        let listener = Closure::<dyn Fn(Event)>::new(move |_event: Event| callback());

        if let Err(e) = self
            .window
            .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
        {
            tracing::warn!(error = ?e, "Failed to register popstate listener");
            return Subscription::noop();
        }

        let window = self.window.clone();
        Subscription::new(move || {
            if let Err(e) = window
                .remove_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
            {
                tracing::warn!(error = ?e, "Failed to remove popstate listener");
            }
            drop(listener);
        })
    }
}
