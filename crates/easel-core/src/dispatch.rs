//! Hit-testing, pointer capture and keyboard focus.

use smallvec::SmallVec;

use crate::{EventCx, FocusEvent, InputEvent, Point, PointerButton, ViewId, ViewTree};

/// Views from just below the root down to the deepest hit, outermost first.
pub type HitPath = SmallVec<[ViewId; 8]>;

/// Pointer gesture state. The path captured on press keeps receiving drag and
/// up events until the gesture ends, wherever the pointer goes.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PointerState {
    #[default]
    Idle,
    Pressed {
        path: HitPath,
        button: PointerButton,
        last: Point,
    },
    Dragging {
        path: HitPath,
        button: PointerButton,
        last: Point,
    },
}

impl PointerState {
    pub fn path(&self) -> Option<&HitPath> {
        match self {
            PointerState::Idle => None,
            PointerState::Pressed { path, .. } | PointerState::Dragging { path, .. } => Some(path),
        }
    }

    /// Button that started the current gesture.
    pub fn button(&self) -> Option<PointerButton> {
        match self {
            PointerState::Idle => None,
            PointerState::Pressed { button, .. } | PointerState::Dragging { button, .. } => {
                Some(*button)
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PointerState::Idle)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    None,
    Held(ViewId),
}

impl FocusState {
    pub fn holder(&self) -> Option<ViewId> {
        match self {
            FocusState::None => None,
            FocusState::Held(id) => Some(*id),
        }
    }

    pub(crate) fn set(&mut self, id: ViewId, pending: &mut Pending) {
        if self.holder() == Some(id) {
            return;
        }
        if let Some(prev) = self.holder() {
            log::debug!("focus {prev:?} -> {id:?}");
            pending.focus_notices.push((prev, FocusEvent::Lost));
        } else {
            log::debug!("focus -> {id:?}");
        }
        *self = FocusState::Held(id);
        pending.focus_notices.push((id, FocusEvent::Gained));
    }

    pub(crate) fn release(&mut self, id: ViewId, pending: &mut Pending) -> bool {
        if self.holder() != Some(id) {
            return false;
        }
        log::debug!("focus released by {id:?}");
        *self = FocusState::None;
        pending.focus_notices.push((id, FocusEvent::Lost));
        true
    }

    /// Drops focus without notifying, for a holder that no longer exists.
    pub(crate) fn forget(&mut self, removed: &[ViewId]) {
        if let Some(h) = self.holder() {
            if removed.contains(&h) {
                log::debug!("focus holder {h:?} removed from tree");
                *self = FocusState::None;
            }
        }
    }
}

#[derive(Debug)]
pub(crate) enum TreeOp {
    Attach {
        parent: ViewId,
        child: ViewId,
        index: Option<usize>,
    },
    Remove {
        parent: ViewId,
        child: ViewId,
    },
    Clear {
        parent: ViewId,
    },
}

/// Work queued by handlers, applied once the current dispatch completes.
#[derive(Debug, Default)]
pub(crate) struct Pending {
    pub(crate) repaint: bool,
    pub(crate) ops: Vec<TreeOp>,
    pub(crate) focus_notices: Vec<(ViewId, FocusEvent)>,
}

impl Pending {
    pub(crate) fn is_idle(&self) -> bool {
        self.ops.is_empty() && self.focus_notices.is_empty()
    }
}

/// Finds the views under `pt` (surface coordinates), root first.
///
/// Invisible views are skipped. A container searches its children top-most
/// first; when none of them is hit, the container itself is the hit unless it
/// cannot receive the mouse, in which case the search continues with its
/// siblings.
pub fn hit_test(tree: &ViewTree, pt: Point) -> HitPath {
    let mut path = HitPath::new();
    if let Some(root) = tree.root() {
        hit(tree, root, pt, &mut path);
    }
    path
}

fn hit(tree: &ViewTree, id: ViewId, pt: Point, path: &mut HitPath) -> bool {
    let Some(node) = tree.node(id) else {
        return false;
    };
    if !node.visible() || !node.bounds().contains(pt) {
        return false;
    }
    let local = pt.translate(node.position().x, node.position().y);
    path.push(id);
    for &child in node.children().iter().rev() {
        if hit(tree, child, local, path) {
            return true;
        }
    }
    let has_children = !node.children().is_empty();
    if node
        .view()
        .is_none_or(|v| v.can_receive_mouse(has_children))
    {
        return true;
    }
    path.pop();
    false
}

/// Calls `input` on a single view with a context targeting it.
pub(crate) fn deliver(
    tree: &mut ViewTree,
    focus: &mut FocusState,
    pending: &mut Pending,
    id: ViewId,
    event: &mut InputEvent,
) -> bool {
    let mut view = match tree.take_view(id) {
        Ok(v) => v,
        Err(e) => {
            log::trace!("{} not delivered: {e}", event.type_name());
            return false;
        }
    };
    log::trace!("{} -> {:?} '{}'", event.type_name(), id, tree.name(id).unwrap_or(""));
    {
        let mut cx = EventCx::new(id, tree, focus, pending);
        view.input(&mut cx, event);
    }
    tree.put_view(id, view);
    true
}

/// Walks `path` outer to inner, translating the position into each view's
/// local space, until a handler stops the event. Views removed since the path
/// was captured end the walk. Returns how many views saw the event.
pub(crate) fn propagate(
    tree: &mut ViewTree,
    focus: &mut FocusState,
    pending: &mut Pending,
    path: &[ViewId],
    surface_pt: Point,
    event: &mut InputEvent,
) -> usize {
    let mut delivered = 0;
    for &id in path {
        if event.is_stopped() {
            break;
        }
        if !tree.contains(id) {
            log::trace!("dispatch path ends at removed view {id:?}");
            break;
        }
        event.set_position(tree.surface_to_view(surface_pt, id));
        if deliver(tree, focus, pending, id, event) {
            delivered += 1;
        }
    }
    event.set_position(surface_pt);
    delivered
}

/// What a dispatch call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatched {
    /// Innermost view the event was routed to.
    pub target: Option<ViewId>,
    pub delivered: usize,
    pub stopped: bool,
}
