//! Per-view publish/subscribe for semantic events.
//!
//! Listeners run synchronously in registration order when their view fires.
//! There is no error isolation: a panicking listener unwinds through `fire`
//! and skips the listeners registered after it.

use smallvec::SmallVec;

use crate::{EventCx, ViewId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// The view was activated (button released, Enter in a text line).
    Action,
    /// The view's value changed.
    Change,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Payload {
    #[default]
    None,
    Bool(bool),
    Text(String),
    Index(usize),
    Number(f64),
}

impl Payload {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Payload::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Payload::Index(i) => Some(*i),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommandEvent {
    pub kind: CommandKind,
    pub source: ViewId,
    pub payload: Payload,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

pub type Listener = Box<dyn FnMut(&mut EventCx<'_>, &CommandEvent)>;

struct Entry {
    id: ListenerId,
    kind: CommandKind,
    /// `None` while the listener is running.
    callback: Option<Listener>,
}

#[derive(Default)]
pub(crate) struct Listeners {
    entries: Vec<Entry>,
}

impl Listeners {
    pub(crate) fn add(&mut self, id: ListenerId, kind: CommandKind, callback: Listener) {
        self.entries.push(Entry {
            id,
            kind,
            callback: Some(callback),
        });
    }

    pub(crate) fn remove(&mut self, id: ListenerId, kind: CommandKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !(e.id == id && e.kind == kind));
        self.entries.len() != before
    }

    /// Snapshot of the listeners for `kind`, in registration order.
    pub(crate) fn ids(&self, kind: CommandKind) -> SmallVec<[ListenerId; 4]> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.id)
            .collect()
    }

    pub(crate) fn take(&mut self, id: ListenerId) -> Option<Listener> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .and_then(|e| e.callback.take())
    }

    /// Returns a listener after it ran, unless it was removed meanwhile.
    pub(crate) fn restore(&mut self, id: ListenerId, callback: Listener) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.id == id) {
            e.callback = Some(callback);
        }
    }

    pub(crate) fn count(&self, kind: CommandKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

/// Invokes the listeners `event.source` registered for `event.kind`.
///
/// Listeners added while firing are not called for this event; listeners
/// removed while firing are skipped if they have not run yet.
pub(crate) fn dispatch_command(cx: &mut EventCx<'_>, event: &CommandEvent) {
    let ids = match cx.tree.node(event.source) {
        Some(node) => node.listeners.ids(event.kind),
        None => return,
    };
    log::trace!(
        "fire {:?} on {:?} to {} listener(s)",
        event.kind,
        event.source,
        ids.len()
    );
    for id in ids {
        let Some(mut callback) = cx
            .tree
            .node_mut(event.source)
            .and_then(|n| n.listeners.take(id))
        else {
            continue;
        };
        callback(cx, event);
        if let Some(node) = cx.tree.node_mut(event.source) {
            node.listeners.restore(id, callback);
        }
    }
}
