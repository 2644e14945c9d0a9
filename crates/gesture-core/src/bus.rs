//! Typed gesture event stream.
//!
//! The detector publishes [`GestureEvent`]s to a [`GestureBus`]; consumers
//! subscribe with a [`GestureFilter`] naming the kind and finger bucket they
//! care about. Each subscription is an RAII guard: dropping it removes the
//! listener, so a consumer that goes away cannot leave a dangling callback.
//!
//! Everything runs on one thread. The bus never holds its internal borrow
//! while a listener runs, so listeners may subscribe or unsubscribe from
//! inside a callback.

use crate::event::{GestureEvent, GestureKind};
use crate::touch::FingerBucket;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type Listener = Rc<dyn Fn(&GestureEvent)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Which events a listener receives. `None` matches any value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureFilter {
    pub kind: Option<GestureKind>,
    pub bucket: Option<FingerBucket>,
}

impl GestureFilter {
    pub const ANY: Self = Self {
        kind: None,
        bucket: None,
    };

    pub fn exact(kind: GestureKind, bucket: FingerBucket) -> Self {
        Self {
            kind: Some(kind),
            bucket: Some(bucket),
        }
    }

    #[inline]
    pub fn matches(&self, event: &GestureEvent) -> bool {
        self.kind.map_or(true, |k| k == event.kind())
            && self.bucket.map_or(true, |b| b == event.bucket())
    }
}

struct Entry {
    id: ListenerId,
    filter: GestureFilter,
    listener: Listener,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Cheaply clonable handle to a shared event stream.
#[derive(Clone, Default)]
pub struct GestureBus {
    inner: Rc<RefCell<BusInner>>,
}

impl GestureBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for events matching `filter`.
    ///
    /// The listener stays registered for as long as the returned
    /// [`Subscription`] is alive.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(
        &self,
        filter: GestureFilter,
        listener: impl Fn(&GestureEvent) + 'static,
    ) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push(Entry {
            id,
            filter,
            listener: Rc::new(listener),
        });
        Subscription {
            bus: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver `event` to every matching listener in subscription order.
    pub fn publish(&self, event: &GestureEvent) {
        let targets: SmallVec<[Listener; 4]> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.filter.matches(event))
            .map(|e| Rc::clone(&e.listener))
            .collect();
        for listener in targets {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listener_count() == 0
    }
}

/// Keeps one listener registered; unsubscribes on drop.
#[derive(Debug)]
pub struct Subscription {
    bus: Weak<RefCell<BusInner>>,
    id: ListenerId,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            let mut inner = inner.borrow_mut();
            let before = inner.entries.len();
            inner.entries.retain(|e| e.id != self.id);
            debug_assert_eq!(before, inner.entries.len() + 1, "listener removed twice");
        }
    }
}
