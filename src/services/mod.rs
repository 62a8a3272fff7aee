//! Host services the coordinator talks to
//!
//! This module contains the navigation history capability and its backends:
//! - `NullHistory` for headless contexts
//! - `SessionHistory`, an in-memory tab history
//! - `BrowserHistory` (wasm32 only), `window.history` + `popstate`

#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod navigation;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;
pub use navigation::{BackListener, ListenerId, NavigationHistory, NullHistory, SessionHistory};

use std::rc::Rc;

/// History provider for the current environment
///
/// The browser history when a `window` exists, the null provider otherwise.
pub fn default_history() -> Rc<dyn NavigationHistory> {
    #[cfg(target_arch = "wasm32")]
    {
        let browser = BrowserHistory::new();
        if browser.is_available() {
            return Rc::new(browser);
        }
    }
    Rc::new(NullHistory)
}
