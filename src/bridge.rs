/// Navigation event bus and change detection.
///
/// The host's navigation triggers feed a [`NavigationBus`]; a
/// [`ChangeBridge`] turns the raw signals into at most one [`Change`] per
/// real location or title change.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::host::Host;

/// Raw signal from one of the places the visible location or title can change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSignal {
    /// History entry pushed through the [`Navigator`]
    Push,
    /// History entry replaced through the [`Navigator`]
    Replace,
    /// Native back/forward (or a synthesized popstate)
    PopState,
    /// The host changed the address itself and said so
    Announced,
    /// The `<title>` element's children changed
    TitleMutation,
}

impl NavSignal {
    pub fn is_location(self) -> bool {
        !matches!(self, NavSignal::TitleMutation)
    }
}

/// What the bridge lets through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Location(String),
    Title(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Subscriber = Rc<dyn Fn(NavSignal)>;

/// Synchronous publish/subscribe for [`NavSignal`]s.
///
/// Dispatch runs over a snapshot of the subscriber list, so a subscriber may
/// subscribe, unsubscribe or emit again while being called.
#[derive(Default)]
pub struct NavigationBus {
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
    next_id: Cell<usize>,
}

impl NavigationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(NavSignal) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() < before
    }

    pub fn emit(&self, signal: NavSignal) {
        let snapshot: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();

        log::debug!("nav signal {:?} -> {} subscribers", signal, snapshot.len());
        for subscriber in snapshot {
            subscriber(signal);
        }
    }
}

/// Navigation trigger for the host application. Performs the history change
/// exactly as asked, then reports it on the bus.
#[derive(Clone)]
pub struct Navigator {
    host: Rc<dyn Host>,
    bus: Rc<NavigationBus>,
}

impl Navigator {
    pub fn new(host: Rc<dyn Host>, bus: Rc<NavigationBus>) -> Self {
        Navigator { host, bus }
    }

    pub fn push(&self, url: &str) {
        self.host.push_state(url);
        self.bus.emit(NavSignal::Push);
    }

    pub fn replace(&self, url: &str) {
        self.host.replace_state(url);
        self.bus.emit(NavSignal::Replace);
    }

    pub fn bus(&self) -> &Rc<NavigationBus> {
        &self.bus
    }

    pub fn host(&self) -> &Rc<dyn Host> {
        &self.host
    }
}

/// Watches a value and reports when it changed according to `changed`
pub struct Watch<T> {
    last: Option<T>,
    changed: Box<dyn Fn(&T, &T) -> bool>,
}

impl<T> Watch<T> {
    pub fn new(initial: Option<T>, changed: impl Fn(&T, &T) -> bool + 'static) -> Self {
        Watch {
            last: initial,
            changed: Box::new(changed),
        }
    }

    /// Record `value`; true if it counts as a change. The first observation
    /// of an empty watch always does.
    pub fn observe(&mut self, value: T) -> bool {
        let changed = match &self.last {
            Some(last) => (self.changed)(last, &value),
            None => true,
        };
        if changed {
            self.last = Some(value);
        }
        changed
    }

    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }
}

impl<T: PartialEq + 'static> Watch<T> {
    /// Watch that fires only when the value differs from the last one seen
    pub fn distinct(initial: Option<T>) -> Self {
        Watch::new(initial, |last, next| last != next)
    }
}

impl<T: 'static> Watch<T> {
    /// Watch that fires on every observation
    pub fn always(initial: Option<T>) -> Self {
        Watch::new(initial, |_, _| true)
    }
}

/// Location signals pass only when the address really moved; title
/// signals always pass since tracking downstream is idempotent.
pub struct ChangeBridge {
    location: Watch<String>,
    title: Watch<String>,
}

impl ChangeBridge {
    pub fn new(initial_url: &str) -> Self {
        ChangeBridge {
            location: Watch::distinct(Some(initial_url.to_string())),
            title: Watch::always(None),
        }
    }

    pub fn accept(&mut self, signal: NavSignal, url: &str, title: &str) -> Option<Change> {
        if signal.is_location() {
            self.location
                .observe(url.to_string())
                .then(|| Change::Location(url.to_string()))
        } else {
            self.title
                .observe(title.to_string())
                .then(|| Change::Title(title.to_string()))
        }
    }
}
