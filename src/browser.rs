/// web-sys adapters: the live page as a [`Host`], localStorage as a
/// [`StorageBackend`], and the native signal sources feeding the bus.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, MutationObserver, MutationObserverInit, Window};

use crate::bridge::{NavSignal, NavigationBus};
use crate::error::{Result, WidgetError};
use crate::host::Host;
use crate::store::{MemoryStorage, StorageBackend};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| WidgetError::Dom("no window".to_string()))
}

pub struct WebHost {
    window: Window,
}

impl WebHost {
    pub fn new(window: Window) -> Self {
        WebHost { window }
    }
}

impl Host for WebHost {
    fn current_url(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn current_title(&self) -> String {
        self.window
            .document()
            .map(|document| document.title())
            .unwrap_or_default()
    }

    fn push_state(&self, url: &str) {
        let result = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(url)));
        if let Err(e) = result {
            log::warn!("pushState to {} failed: {:?}", url, e);
        }
    }

    fn replace_state(&self, url: &str) {
        let result = self
            .window
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(url)));
        if let Err(e) = result {
            log::warn!("replaceState to {} failed: {:?}", url, e);
        }
    }

    fn dispatch_popstate(&self) {
        let result = Event::new("popstate").and_then(|event| self.window.dispatch_event(&event));
        if let Err(e) = result {
            log::warn!("popstate dispatch failed: {:?}", e);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }
}

/// localStorage through web-sys
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl StorageBackend for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(WidgetError::storage_access)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(WidgetError::storage_access)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(WidgetError::storage_access)
    }
}

/// localStorage when the page allows it, otherwise session-only memory
pub fn storage_backend(window: &Window) -> Box<dyn StorageBackend> {
    match window.local_storage() {
        Ok(Some(storage)) => Box::new(LocalStorage { storage }),
        Ok(None) => {
            log::warn!("localStorage unavailable, visited cases will not survive a reload");
            Box::new(MemoryStorage::new())
        }
        Err(e) => {
            log::warn!("localStorage blocked ({:?}), visited cases will not survive a reload", e);
            Box::new(MemoryStorage::new())
        }
    }
}

/// An event listener that is removed again when dropped
pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(target: &EventTarget, kind: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Self> {
        let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(WidgetError::dom)?;

        Ok(EventListener {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Reports changes to the `<title>` element's children on the bus
pub struct TitleObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl TitleObserver {
    /// None when the page has no `<title>` or observing fails; title
    /// tracking is then skipped
    pub fn observe(document: &Document, bus: Rc<NavigationBus>) -> Option<Self> {
        let title = match document.query_selector("title") {
            Ok(Some(title)) => title,
            Ok(None) => {
                log::debug!("no <title> element, title tracking disabled");
                return None;
            }
            Err(e) => {
                log::debug!("title lookup failed: {:?}", e);
                return None;
            }
        };

        let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::wrap(Box::new(
            move |_records: js_sys::Array, _observer: MutationObserver| {
                bus.emit(NavSignal::TitleMutation);
            },
        ));

        let observer = match MutationObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("MutationObserver unavailable: {:?}", e);
                return None;
            }
        };

        let init = MutationObserverInit::new();
        init.set_child_list(true);
        if let Err(e) = observer.observe_with_options(&title, &init) {
            log::warn!("observing <title> failed: {:?}", e);
            return None;
        }

        Some(TitleObserver {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for TitleObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Native signal sources of one mounted widget
pub struct BrowserSignals {
    _popstate: EventListener,
    _title: Option<TitleObserver>,
}

impl BrowserSignals {
    pub fn install(window: &Window, document: &Document, bus: Rc<NavigationBus>) -> Result<Self> {
        let popstate = {
            let bus = bus.clone();
            EventListener::new(window, "popstate", move |_event| bus.emit(NavSignal::PopState))?
        };

        Ok(BrowserSignals {
            _popstate: popstate,
            _title: TitleObserver::observe(document, bus),
        })
    }
}

/// Run `f` once the DOM is parsed
pub fn when_ready(f: impl FnOnce() + 'static) -> Result<()> {
    let document = window()?
        .document()
        .ok_or_else(|| WidgetError::Dom("no document".to_string()))?;

    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }

    let callback = Closure::once_into_js(move |_event: Event| f());
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(WidgetError::dom)
}
