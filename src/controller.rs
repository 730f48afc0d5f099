/// Decides what to record when the location or title changes

use std::cell::RefCell;
use std::rc::Rc;

use crate::bridge::{ChangeBridge, NavSignal, Navigator};
use crate::case_path::CasePattern;
use crate::store::RecordStore;

pub struct NavigationController {
    store: Rc<RecordStore>,
    navigator: Navigator,
    pattern: CasePattern,
    bridge: RefCell<ChangeBridge>,
}

impl NavigationController {
    pub fn new(store: Rc<RecordStore>, navigator: Navigator, pattern: CasePattern) -> Self {
        let initial_url = navigator.host().current_url();
        NavigationController {
            store,
            navigator,
            pattern,
            bridge: RefCell::new(ChangeBridge::new(&initial_url)),
        }
    }

    /// Handle one bus signal. Returns whether the panel needs a re-render.
    pub fn handle_signal(&self, signal: NavSignal) -> bool {
        let host = self.navigator.host();
        let url = host.current_url();
        let title = host.current_title();

        // borrow ends before tracking, which may re-enter through the store
        let change = self.bridge.borrow_mut().accept(signal, &url, &title);
        match change {
            Some(change) => {
                log::debug!("{:?} accepted as {:?}", signal, change);
                self.track_current()
            }
            None => false,
        }
    }

    /// Record the current page if it is a case page.
    /// Returns whether the stored list changed.
    pub fn track_current(&self) -> bool {
        let host = self.navigator.host();
        let url = host.current_url();

        let Some(case_id) = self.pattern.case_id(&url) else {
            return false;
        };

        self.store.touch(&case_id, &url, &host.current_title())
    }

    /// Client-side navigation that looks like a user-driven one to every
    /// popstate listener on the page
    pub fn navigate_to(&self, url: &str) {
        self.navigator.push(url);
        self.navigator.host().dispatch_popstate();
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn pattern(&self) -> &CasePattern {
        &self.pattern
    }
}
