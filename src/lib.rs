/// Visited Cases - floating history of the case pages visited in a
/// single-page app. Built with Rust + WASM + Yew

mod bridge;
mod browser;
mod case_path;
mod config;
mod controller;
mod error;
mod host;
mod record;
mod store;
#[cfg(test)]
mod test_support;
pub mod ui;
mod widget;

use wasm_bindgen::prelude::*;

pub use bridge::{Change, NavSignal, NavigationBus, Navigator, Watch};
pub use case_path::{CasePattern, DEFAULT_CASE_PATH_PATTERN};
pub use config::Config;
pub use controller::NavigationController;
pub use error::WidgetError;
pub use host::Host;
pub use record::{VisitedPageList, VisitedPageRecord};
pub use store::{MemoryStorage, RecordStore, StorageBackend};
pub use widget::Widget;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Mount the widget once the document is ready. `config` is an optional
/// object with camelCase fields; an invalid one falls back to the defaults.
#[wasm_bindgen]
pub fn start_visited_cases(config: JsValue) {
    let config = Config::from_js(config).unwrap_or_else(|e| {
        log::error!("Invalid visited cases config, using defaults: {}", e);
        Config::default()
    });

    let result = browser::when_ready(move || {
        if let Err(e) = widget::start(config) {
            log::error!("Failed to mount visited cases widget: {}", e);
        }
    });
    if let Err(e) = result {
        log::error!("Failed to schedule visited cases widget: {}", e);
    }
}

#[wasm_bindgen]
pub fn stop_visited_cases() {
    widget::stop();
}

/// `history.pushState` routed through the navigation bus.
///
/// The widget does not patch `history`, so host routers must navigate
/// through this (or [`replace_state`]). A direct `history.pushState` is only
/// noticed at the next popstate or `<title>` change unless followed by
/// [`notify_location_change`].
#[wasm_bindgen]
pub fn push_state(url: &str) {
    if widget::with_widget(|widget| widget.navigator().push(url)).is_none() {
        log::debug!("push_state({}) before mount, ignored", url);
    }
}

/// `history.replaceState` routed through the navigation bus. Same contract
/// as [`push_state`].
#[wasm_bindgen]
pub fn replace_state(url: &str) {
    if widget::with_widget(|widget| widget.navigator().replace(url)).is_none() {
        log::debug!("replace_state({}) before mount, ignored", url);
    }
}

/// Tell the widget the address changed. Routers that call
/// `history.pushState`/`replaceState` themselves must call this afterwards,
/// otherwise the new page is only recorded at the next popstate or
/// `<title>` change.
#[wasm_bindgen]
pub fn notify_location_change() {
    widget::with_widget(|widget| widget.bus().emit(NavSignal::Announced));
}

/// Current visited list as a JS array of `{id, url, title}`
#[wasm_bindgen]
pub fn visited_cases() -> JsValue {
    let pages = widget::with_widget(|widget| widget.pages()).unwrap_or_default();
    serde_wasm_bindgen::to_value(&pages).unwrap_or(JsValue::NULL)
}

/// Case id of `address` under the active (or default) pattern
#[wasm_bindgen]
pub fn extract_case_id(address: &str) -> Option<String> {
    widget::with_widget(|widget| widget.case_id(address))
        .unwrap_or_else(|| CasePattern::default().case_id(address))
}
