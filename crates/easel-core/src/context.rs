//! Contexts handed to views during layout, draw and input.
//!
//! Each context exposes only what its phase may touch: layout sets sizes and
//! child positions, draw reads geometry and paints, input mutates state and
//! queues tree edits.

use std::borrow::Cow;

use crate::command::{CommandEvent, CommandKind, Listener, ListenerId, Payload, dispatch_command};
use crate::dispatch::{FocusState, Pending, TreeOp};
use crate::{Canvas, Color, Point, Rect, Result, Size, View, ViewId, ViewTree};

const OVERFLOW_EPSILON: f32 = 0.5;

pub struct LayoutCx<'a> {
    id: ViewId,
    tree: &'a mut ViewTree,
    canvas: &'a dyn Canvas,
    surface_size: Size,
}

/// Lays out `id` against `available` and records the resulting size.
pub(crate) fn layout_view(
    tree: &mut ViewTree,
    canvas: &dyn Canvas,
    surface_size: Size,
    id: ViewId,
    available: Size,
) -> Size {
    debug_assert!(
        available.width >= 0.0 && available.height >= 0.0,
        "negative layout offer {available:?}"
    );
    let mut view = match tree.take_view(id) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("layout skipped: {e}");
            return tree.size(id);
        }
    };
    let size = {
        let mut cx = LayoutCx {
            id,
            tree: &mut *tree,
            canvas,
            surface_size,
        };
        view.layout(&mut cx, available)
    };
    tree.put_view(id, view);
    tree.set_size(id, size);
    if size.width > available.width + OVERFLOW_EPSILON
        || size.height > available.height + OVERFLOW_EPSILON
    {
        log::debug!(
            "'{}' overflows: wants {}x{}, offered {}x{}",
            tree.name(id).unwrap_or("?"),
            size.width,
            size.height,
            available.width,
            available.height
        );
    }
    size
}

impl<'a> LayoutCx<'a> {
    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn children(&self) -> Vec<ViewId> {
        self.tree.children(self.id).to_vec()
    }

    pub fn hflex(&self) -> bool {
        self.tree.node(self.id).is_some_and(|n| n.hflex)
    }

    pub fn vflex(&self) -> bool {
        self.tree.node(self.id).is_some_and(|n| n.vflex)
    }

    pub fn child_hflex(&self, child: ViewId) -> bool {
        self.tree.node(child).is_some_and(|n| n.hflex)
    }

    pub fn child_vflex(&self, child: ViewId) -> bool {
        self.tree.node(child).is_some_and(|n| n.vflex)
    }

    pub fn layout_child(&mut self, child: ViewId, available: Size) -> Size {
        layout_view(self.tree, self.canvas, self.surface_size, child, available)
    }

    pub fn child_size(&self, child: ViewId) -> Size {
        self.tree.size(child)
    }

    /// Overrides a child's size after its layout (used by stretch alignment).
    pub fn set_child_size(&mut self, child: ViewId, size: Size) {
        self.tree.set_size(child, size);
    }

    pub fn child_position(&self, child: ViewId) -> Point {
        self.tree.position(child)
    }

    pub fn set_child_position(&mut self, child: ViewId, position: Point) {
        if let Some(n) = self.tree.node_mut(child) {
            n.position = position;
        }
    }

    pub fn measure_text(&self, text: &str, font: Option<&str>) -> Size {
        self.canvas.measure_text(text, font)
    }

    /// Logical size of the surface being laid out.
    pub fn surface_size(&self) -> Size {
        self.surface_size
    }
}

pub struct DrawCx<'a> {
    id: ViewId,
    tree: &'a ViewTree,
    canvas: &'a mut dyn Canvas,
    focus: Option<ViewId>,
}

impl<'a> DrawCx<'a> {
    pub(crate) fn new(
        id: ViewId,
        tree: &'a ViewTree,
        canvas: &'a mut dyn Canvas,
        focus: Option<ViewId>,
    ) -> Self {
        Self {
            id,
            tree,
            canvas,
            focus,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.tree.size(self.id)
    }

    pub fn bounds(&self) -> Rect {
        self.size().to_rect()
    }

    pub fn tree(&self) -> &ViewTree {
        self.tree
    }

    pub fn has_keyboard_focus(&self) -> bool {
        self.focus == Some(self.id)
    }

    pub fn is_keyboard_focus(&self, id: ViewId) -> bool {
        self.focus == Some(id)
    }

    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    pub fn fill_background(&mut self, color: Color) {
        let r = self.bounds();
        self.canvas.fill_rect(r, color);
    }

    pub fn stroke_background(&mut self, color: Color) {
        let r = self.bounds();
        self.canvas.stroke_rect(r, color);
    }

    pub fn fill_text(&mut self, text: &str, pos: Point, color: Color) {
        self.canvas.fill_text(text, pos, None, color);
    }

    pub fn measure_text(&self, text: &str, font: Option<&str>) -> Size {
        self.canvas.measure_text(text, font)
    }
}

/// Surface services available to input handlers and command listeners.
pub struct EventCx<'a> {
    pub(crate) id: ViewId,
    pub(crate) tree: &'a mut ViewTree,
    pub(crate) focus: &'a mut FocusState,
    pub(crate) pending: &'a mut Pending,
}

impl<'a> EventCx<'a> {
    pub(crate) fn new(
        id: ViewId,
        tree: &'a mut ViewTree,
        focus: &'a mut FocusState,
        pending: &'a mut Pending,
    ) -> Self {
        Self {
            id,
            tree,
            focus,
            pending,
        }
    }

    /// The view receiving the event (or firing the command).
    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.tree.size(self.id)
    }

    pub fn tree(&self) -> &ViewTree {
        self.tree
    }

    /// Asks for a repaint once the current dispatch completes.
    pub fn request_repaint(&mut self) {
        self.pending.repaint = true;
    }

    pub fn set_keyboard_focus(&mut self, id: ViewId) {
        self.focus.set(id, self.pending);
    }

    /// Clears focus if `id` holds it. Returns `false` otherwise.
    pub fn release_keyboard_focus(&mut self, id: ViewId) -> bool {
        self.focus.release(id, self.pending)
    }

    pub fn is_keyboard_focus(&self, id: ViewId) -> bool {
        self.focus.holder() == Some(id)
    }

    pub fn has_keyboard_focus(&self) -> bool {
        self.is_keyboard_focus(self.id)
    }

    /// Fires a command from the current view to its listeners, synchronously.
    pub fn fire(&mut self, kind: CommandKind, payload: Payload) {
        let event = CommandEvent {
            kind,
            source: self.id,
            payload,
        };
        dispatch_command(self, &event);
    }

    /// Fires a command as if `source` had fired it.
    pub fn fire_from(&mut self, source: ViewId, kind: CommandKind, payload: Payload) {
        let saved = std::mem::replace(&mut self.id, source);
        self.fire(kind, payload);
        self.id = saved;
    }

    pub fn on(
        &mut self,
        id: ViewId,
        kind: CommandKind,
        listener: impl FnMut(&mut EventCx<'_>, &CommandEvent) + 'static,
    ) -> Result<ListenerId> {
        self.tree.on(id, kind, Box::new(listener) as Listener)
    }

    pub fn off(&mut self, id: ViewId, kind: CommandKind, listener: ListenerId) -> bool {
        self.tree.off(id, kind, listener)
    }

    pub fn find_by_name(&self, name: &str) -> Option<ViewId> {
        self.tree.find_by_name(name)
    }

    pub fn view_to_surface(&self, pt: Point, id: ViewId) -> Point {
        self.tree.view_to_surface(pt, id)
    }

    pub fn surface_to_view(&self, pt: Point, id: ViewId) -> Point {
        self.tree.surface_to_view(pt, id)
    }

    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.tree.children(id)
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.tree.parent(id)
    }

    pub fn view<T: View>(&self, id: ViewId) -> Result<&T> {
        self.tree.view(id)
    }

    /// Typed access to another view. The view currently handling the event
    /// is checked out and reports [`Error::ViewBusy`](crate::Error::ViewBusy).
    pub fn view_mut<T: View>(&mut self, id: ViewId) -> Result<&mut T> {
        self.tree.view_mut(id)
    }

    /// Runs `f` on another view with a context targeting it, so the view can
    /// fire its own commands.
    pub fn with_view_mut<T: View, R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut T, &mut EventCx<'_>) -> R,
    ) -> Result<R> {
        // Type check before checkout so a mismatch leaves the tree untouched.
        self.tree.view_mut::<T>(id)?;
        let mut boxed = self.tree.take_view(id)?;
        let out = {
            let mut cx = EventCx::new(id, self.tree, self.focus, self.pending);
            crate::view::downcast_mut::<T>(boxed.as_mut()).map(|v| f(v, &mut cx))
        };
        self.tree.put_view(id, boxed);
        out.ok_or(crate::Error::WrongViewType {
            id,
            expected: std::any::type_name::<T>(),
        })
    }

    /// Creates a view now and attaches it to `parent` once dispatch completes.
    pub fn add_child(&mut self, parent: ViewId, view: impl View) -> ViewId {
        let child = self.tree.insert(view);
        self.pending.ops.push(TreeOp::Attach {
            parent,
            child,
            index: None,
        });
        child
    }

    pub fn insert_child(&mut self, parent: ViewId, index: usize, view: impl View) -> ViewId {
        let child = self.tree.insert(view);
        self.pending.ops.push(TreeOp::Attach {
            parent,
            child,
            index: Some(index),
        });
        child
    }

    /// Queues removal of `child`. Returns `false` if it is not currently a
    /// child of `parent`.
    pub fn remove_child(&mut self, parent: ViewId, child: ViewId) -> bool {
        if !self.tree.find_child(parent, child) {
            return false;
        }
        self.pending.ops.push(TreeOp::Remove { parent, child });
        true
    }

    pub fn clear_children(&mut self, parent: ViewId) {
        self.pending.ops.push(TreeOp::Clear { parent });
    }

    pub fn set_visible(&mut self, id: ViewId, visible: bool) -> Result<()> {
        self.tree.set_visible(id, visible)
    }

    pub fn set_position(&mut self, id: ViewId, position: Point) -> Result<()> {
        self.tree.set_position(id, position)
    }

    pub fn set_name(&mut self, id: ViewId, name: impl Into<Cow<'static, str>>) -> Result<()> {
        self.tree.set_name(id, name)
    }
}
