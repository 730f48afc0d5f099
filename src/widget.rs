/// The visited-cases widget: one store, one controller, one panel.
///
/// [`Widget`] wires the pieces together and holds the operations the panel
/// calls. [`start`] and [`stop`] manage the single mounted instance.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use web_sys::Element;
use yew::{AppHandle, Callback};

use crate::bridge::{NavSignal, NavigationBus, Navigator};
use crate::browser::{self, BrowserSignals};
use crate::config::Config;
use crate::controller::NavigationController;
use crate::error::{Result, WidgetError};
use crate::host::Host;
use crate::record::{VisitedPageList, VisitedPageRecord};
use crate::store::{RecordStore, StorageBackend};
use crate::ui::panel::{VisitedPanel, VisitedPanelProps};

pub struct Widget {
    config: Config,
    host: Rc<dyn Host>,
    store: Rc<RecordStore>,
    controller: NavigationController,
    render_hook: RefCell<Option<Callback<()>>>,
    open: Cell<bool>,
}

/// Open state after a row was removed: removing the page on screen or the
/// last row closes the panel, anything else leaves it as it was
fn open_after_removal(open: bool, removed_current: bool, remaining: usize) -> bool {
    open && !removed_current && remaining > 0
}

impl Widget {
    /// Build the widget, subscribe it to its bus and record the page it
    /// starts on.
    pub fn new(config: Config, host: Rc<dyn Host>, backend: Box<dyn StorageBackend>) -> Result<Rc<Self>> {
        config.validate()?;

        let store = Rc::new(RecordStore::new(backend, &config));
        let navigator = Navigator::new(host.clone(), Rc::new(NavigationBus::new()));
        let controller = NavigationController::new(store.clone(), navigator, config.case_pattern()?);

        let widget = Rc::new(Widget {
            config,
            host,
            store,
            controller,
            render_hook: RefCell::new(None),
            open: Cell::new(false),
        });

        // Weak: the bus lives inside the widget
        let weak = Rc::downgrade(&widget);
        widget.bus().subscribe(move |signal| {
            if let Some(widget) = weak.upgrade() {
                widget.on_signal(signal);
            }
        });

        widget.controller.track_current();
        Ok(widget)
    }

    pub fn on_signal(&self, signal: NavSignal) {
        if self.controller.handle_signal(signal) {
            self.request_render();
        }
    }

    /// Ask the mounted panel to rebuild from the store
    pub fn request_render(&self) {
        let hook = self.render_hook.borrow().clone();
        if let Some(hook) = hook {
            hook.emit(());
        }
    }

    pub fn set_render_hook(&self, hook: Option<Callback<()>>) {
        *self.render_hook.borrow_mut() = hook;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fresh snapshot of the stored list
    pub fn pages(&self) -> VisitedPageList {
        self.store.load()
    }

    /// Snapshot the panel renders from. An empty store renders nothing and
    /// closes the panel, so the next visit brings it back collapsed.
    pub fn panel_pages(&self) -> VisitedPageList {
        let pages = self.store.load();
        if pages.is_empty() {
            self.open.set(false);
        }
        pages
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn toggle_panel(&self) {
        self.open.set(!self.open.get());
        self.request_render();
    }

    /// Close after a click outside the panel. No render when already closed.
    pub fn close_panel(&self) {
        if self.open.replace(false) {
            self.request_render();
        }
    }

    pub fn current_url(&self) -> String {
        self.host.current_url()
    }

    pub fn bus(&self) -> &Rc<NavigationBus> {
        self.controller.navigator().bus()
    }

    pub fn navigator(&self) -> &Navigator {
        self.controller.navigator()
    }

    pub fn case_id(&self, address: &str) -> Option<String> {
        self.controller.pattern().case_id(address)
    }

    /// Navigate to a stored page and keep the panel open on it
    pub fn open_page(&self, record: &VisitedPageRecord) {
        self.controller.navigate_to(&record.url);
        self.open.set(true);
        self.request_render();
    }

    /// Remove one record. Returns true when it was the page currently shown;
    /// that closes the panel, as does removing the last record.
    pub fn remove_page(&self, record: &VisitedPageRecord) -> bool {
        self.store.remove(&record.id);
        let removed_current = record.url == self.host.current_url();
        let remaining = self.store.load().len();
        self.open.set(open_after_removal(self.open.get(), removed_current, remaining));
        self.request_render();
        removed_current
    }

    /// Clear everything after the user confirms. Returns whether it happened.
    pub fn clear_all(&self) -> bool {
        if !self.host.confirm(&self.config.confirm_message) {
            return false;
        }
        self.store.clear();
        self.open.set(false);
        self.request_render();
        true
    }
}

/// A widget attached to the live page
struct MountedWidget {
    widget: Rc<Widget>,
    app: AppHandle<VisitedPanel>,
    root: Element,
    _signals: BrowserSignals,
}

thread_local! {
    static MOUNTED: RefCell<Option<MountedWidget>> = const { RefCell::new(None) };
}

/// Mount the widget into the current page. A second call while mounted is
/// ignored.
pub fn start(config: Config) -> Result<()> {
    if MOUNTED.with(|slot| slot.borrow().is_some()) {
        log::warn!("visited cases widget already mounted");
        return Ok(());
    }

    let window = browser::window()?;
    let document = window
        .document()
        .ok_or_else(|| WidgetError::Dom("no document".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| WidgetError::Dom("no body".to_string()))?;

    let host = Rc::new(browser::WebHost::new(window.clone()));
    let widget = Widget::new(config, host, browser::storage_backend(&window))?;
    let signals = BrowserSignals::install(&window, &document, widget.bus().clone())?;

    let root = document.create_element("div").map_err(WidgetError::dom)?;
    root.set_id(&widget.config().root_id);
    body.append_child(&root).map_err(WidgetError::dom)?;

    let props = VisitedPanelProps { widget: widget.clone() };
    let app = yew::Renderer::<VisitedPanel>::with_root_and_props(root.clone(), props).render();

    log::info!("visited cases widget mounted ({} pages)", widget.pages().len());
    MOUNTED.with(|slot| {
        *slot.borrow_mut() = Some(MountedWidget {
            widget,
            app,
            root,
            _signals: signals,
        });
    });
    Ok(())
}

/// Unmount: destroys the panel, removes its root element and drops every
/// listener the widget installed
pub fn stop() {
    let Some(mounted) = MOUNTED.with(|slot| slot.borrow_mut().take()) else {
        return;
    };

    mounted.widget.set_render_hook(None);
    mounted.app.destroy();
    mounted.root.remove();
    log::info!("visited cases widget unmounted");
}

/// Run `f` against the mounted widget, if any. The slot is not borrowed
/// while `f` runs.
pub fn with_widget<R>(f: impl FnOnce(&Widget) -> R) -> Option<R> {
    let widget = MOUNTED.with(|slot| slot.borrow().as_ref().map(|mounted| mounted.widget.clone()))?;
    Some(f(&widget))
}
