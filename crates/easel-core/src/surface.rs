//! The surface: root view, render loop and input entry points.
//!
//! Hosts translate raw input into calls on [`Surface`]. Each entry point runs
//! one dispatch, then settles: queued tree edits are applied, focus
//! notifications are delivered, and a requested repaint runs before control
//! returns to the host.

use std::any::Any;
use std::borrow::Cow;

use crate::command::{CommandEvent, CommandKind, Listener, ListenerId, Payload, dispatch_command};
use crate::context::layout_view;
use crate::dispatch::{
    Dispatched, FocusState, HitPath, Pending, PointerState, TreeOp, deliver, hit_test, propagate,
};
use crate::{
    Canvas, ClipboardAction, ClipboardEvent, Color, DrawCx, Error, EventCx, InputEvent, InputKind,
    KeyEvent, Modifiers, Point, PointerButton, PointerEvent, PointerPhase, Rect, Result,
    ScrollEvent, Size, View, ViewId, ViewTree, palette,
};

/// Upper bound on settle rounds; handlers that keep bouncing focus between
/// each other are cut off here.
const MAX_SETTLE_ROUNDS: usize = 16;

#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceConfig {
    /// Logical size in pixels; the root is laid out against it.
    pub size: Size,
    /// Device pixels per logical pixel.
    pub scale: f32,
    pub clear_color: Color,
    /// Repaint after every pointer, wheel, keyboard and clipboard dispatch,
    /// whether or not a handler asked for it.
    pub repaint_after_input: bool,
    /// Stroke every view's bounds after drawing it.
    pub debug_bounds: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            size: Size::new(640.0, 480.0),
            scale: 1.0,
            clear_color: palette::CLEAR,
            repaint_after_input: false,
            debug_bounds: false,
        }
    }
}

impl SurfaceConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            ..Default::default()
        }
    }
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }
    pub fn repaint_after_input(mut self, on: bool) -> Self {
        self.repaint_after_input = on;
        self
    }
    pub fn debug_bounds(mut self, on: bool) -> Self {
        self.debug_bounds = on;
        self
    }
}

/// Drawn on top of the view tree at the end of every repaint, in surface
/// logical coordinates.
pub trait Overlay: Any {
    fn draw(&mut self, tree: &ViewTree, focus: Option<ViewId>, canvas: &mut dyn Canvas);
}

type InputObserver = Box<dyn FnMut(&InputEvent)>;

pub struct Surface<C: Canvas> {
    tree: ViewTree,
    canvas: C,
    config: SurfaceConfig,
    pointer: PointerState,
    focus: FocusState,
    pending: Pending,
    observer: Option<InputObserver>,
    overlays: Vec<Box<dyn Overlay>>,
    frames: u64,
}

impl<C: Canvas> Surface<C> {
    pub fn new(config: SurfaceConfig, canvas: C) -> Self {
        log::debug!(
            "surface {}x{} @{}",
            config.size.width,
            config.size.height,
            config.scale
        );
        Self {
            tree: ViewTree::new(),
            canvas,
            config,
            pointer: PointerState::Idle,
            focus: FocusState::None,
            pending: Pending::default(),
            observer: None,
            overlays: Vec::new(),
            frames: 0,
        }
    }

    // ---- tree ----

    /// Makes `view` the root, destroying any previous root.
    pub fn set_root(&mut self, view: impl View) -> ViewId {
        let id = self.tree.insert(view);
        if let Err(e) = self.tree.set_root(id) {
            log::warn!("set_root: {e}");
        }
        self.after_removal();
        id
    }

    /// Makes an existing (detached) view the root.
    pub fn set_root_id(&mut self, id: ViewId) -> Result<()> {
        self.tree.set_root(id)?;
        self.after_removal();
        Ok(())
    }

    pub fn root(&self) -> Option<ViewId> {
        self.tree.root()
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    /// Adds a detached view, to be attached later with [`attach`](Self::attach)
    /// or made the root.
    pub fn insert(&mut self, view: impl View) -> ViewId {
        self.tree.insert(view)
    }

    pub fn attach(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        self.tree.attach(parent, child, None)
    }

    pub fn add_child(&mut self, parent: ViewId, view: impl View) -> Result<ViewId> {
        if !self.tree.contains(parent) {
            return Err(Error::UnknownView(parent));
        }
        let child = self.tree.insert(view);
        self.tree.attach(parent, child, None)?;
        Ok(child)
    }

    pub fn insert_child(&mut self, parent: ViewId, index: usize, view: impl View) -> Result<ViewId> {
        if !self.tree.contains(parent) {
            return Err(Error::UnknownView(parent));
        }
        let child = self.tree.insert(view);
        self.tree.attach(parent, child, Some(index))?;
        Ok(child)
    }

    /// Removes and destroys `child`. Returns `false` if it is not a child of
    /// `parent`.
    pub fn remove_child(&mut self, parent: ViewId, child: ViewId) -> bool {
        match self.tree.remove_child(parent, child) {
            Some(removed) => {
                self.focus.forget(&removed);
                true
            }
            None => false,
        }
    }

    /// Reorders `child` among its siblings; later children draw on top.
    pub fn move_child(&mut self, parent: ViewId, child: ViewId, index: usize) -> Result<()> {
        self.tree.move_child(parent, child, index)
    }

    pub fn clear_children(&mut self, parent: ViewId) {
        let removed = self.tree.clear_children(parent);
        self.focus.forget(&removed);
    }

    pub fn set_visible(&mut self, id: ViewId, visible: bool) -> Result<()> {
        self.tree.set_visible(id, visible)
    }

    pub fn set_hflex(&mut self, id: ViewId, flex: bool) -> Result<()> {
        self.tree.set_hflex(id, flex)
    }

    pub fn set_vflex(&mut self, id: ViewId, flex: bool) -> Result<()> {
        self.tree.set_vflex(id, flex)
    }

    pub fn set_name(&mut self, id: ViewId, name: impl Into<Cow<'static, str>>) -> Result<()> {
        self.tree.set_name(id, name)
    }

    pub fn set_position(&mut self, id: ViewId, position: Point) -> Result<()> {
        self.tree.set_position(id, position)
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

    pub fn view<T: View>(&self, id: ViewId) -> Result<&T> {
        self.tree.view(id)
    }

    pub fn view_mut<T: View>(&mut self, id: ViewId) -> Result<&mut T> {
        self.tree.view_mut(id)
    }

    /// Runs `f` on a view with an event context targeting it, then settles.
    pub fn with_view_mut<T: View, R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut T, &mut EventCx<'_>) -> R,
    ) -> Result<R> {
        let out = {
            let mut cx = EventCx::new(id, &mut self.tree, &mut self.focus, &mut self.pending);
            cx.with_view_mut(id, f)
        };
        self.settle(false);
        out
    }

    // ---- commands ----

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

    /// Fires a command on behalf of `source`, then settles.
    pub fn fire(&mut self, source: ViewId, kind: CommandKind, payload: Payload) -> Result<()> {
        if !self.tree.contains(source) {
            return Err(Error::UnknownView(source));
        }
        let event = CommandEvent {
            kind,
            source,
            payload,
        };
        {
            let mut cx = EventCx::new(source, &mut self.tree, &mut self.focus, &mut self.pending);
            dispatch_command(&mut cx, &event);
        }
        self.settle(false);
        Ok(())
    }

    // ---- focus ----

    pub fn set_keyboard_focus(&mut self, id: ViewId) -> Result<()> {
        if !self.tree.contains(id) {
            return Err(Error::UnknownView(id));
        }
        self.focus.set(id, &mut self.pending);
        self.settle(false);
        Ok(())
    }

    pub fn release_keyboard_focus(&mut self, id: ViewId) -> bool {
        let released = self.focus.release(id, &mut self.pending);
        self.settle(false);
        released
    }

    pub fn is_keyboard_focus(&self, id: ViewId) -> bool {
        self.focus.holder() == Some(id)
    }

    pub fn keyboard_focus(&self) -> Option<ViewId> {
        self.focus.holder()
    }

    // ---- input ----

    /// Registers the global input observer. It sees every dispatched event,
    /// in surface coordinates, after the views have, including stopped ones.
    pub fn on_input(&mut self, observer: impl FnMut(&InputEvent) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn pointer_state(&self) -> &PointerState {
        &self.pointer
    }

    /// Hit-tests `pt` and starts a gesture on the resulting path.
    pub fn pointer_down(&mut self, pt: Point, button: PointerButton, modifiers: Modifiers) -> Dispatched {
        if !self.pointer.is_idle() {
            log::debug!("pointer down during a gesture; releasing the old capture");
            self.end_gesture(pt, modifiers);
        }
        let Some(path) = self.path_at(pt) else {
            return Dispatched::default();
        };
        self.pointer = PointerState::Pressed {
            path: path.clone(),
            button,
            last: pt,
        };
        let event = InputEvent::new(InputKind::Pointer(PointerEvent {
            phase: PointerPhase::Down,
            position: pt,
            delta: None,
            button,
            modifiers,
        }));
        self.run_path(&path, pt, event)
    }

    /// Drags the captured path. Moves with no gesture in progress are ignored.
    pub fn pointer_move(&mut self, pt: Point, modifiers: Modifiers) -> Dispatched {
        let (path, button, last) = match std::mem::take(&mut self.pointer) {
            PointerState::Idle => return Dispatched::default(),
            PointerState::Pressed { path, button, last }
            | PointerState::Dragging { path, button, last } => (path, button, last),
        };
        self.pointer = PointerState::Dragging {
            path: path.clone(),
            button,
            last: pt,
        };
        let event = InputEvent::new(InputKind::Pointer(PointerEvent {
            phase: PointerPhase::Drag,
            position: pt,
            delta: Some(pt - last),
            button,
            modifiers,
        }));
        self.run_path(&path, pt, event)
    }

    /// Ends the gesture, delivering the release to the captured path.
    pub fn pointer_up(&mut self, pt: Point, button: PointerButton, modifiers: Modifiers) -> Dispatched {
        let (path, last) = match std::mem::take(&mut self.pointer) {
            PointerState::Idle => return Dispatched::default(),
            PointerState::Pressed { path, last, .. } | PointerState::Dragging { path, last, .. } => {
                (path, last)
            }
        };
        let event = InputEvent::new(InputKind::Pointer(PointerEvent {
            phase: PointerPhase::Up,
            position: pt,
            delta: Some(pt - last),
            button,
            modifiers,
        }));
        self.run_path(&path, pt, event)
    }

    /// Releases the captured path with the gesture's own button, so views
    /// pressed by an unfinished gesture see their `Up`.
    fn end_gesture(&mut self, pt: Point, modifiers: Modifiers) {
        if let Some(button) = self.pointer.button() {
            self.pointer_up(pt, button, modifiers);
        }
    }

    /// Wheel input is hit-tested fresh every time; it never captures.
    pub fn wheel(&mut self, pt: Point, delta: Point, modifiers: Modifiers) -> Dispatched {
        let Some(path) = self.path_at(pt) else {
            return Dispatched::default();
        };
        let event = InputEvent::new(InputKind::Scroll(ScrollEvent {
            position: pt,
            delta,
            modifiers,
        }));
        self.run_path(&path, pt, event)
    }

    /// Sends a key event to the focus holder, or drops it.
    pub fn key(&mut self, key: KeyEvent) -> Dispatched {
        let mut event = InputEvent::new(InputKind::Keyboard(key));
        let out = self.run_focused(&mut event);
        self.finish_input(&event);
        out
    }

    /// Sends a clipboard event to the focus holder. For copy and cut, returns
    /// the text the holder placed in the event, if any.
    pub fn clipboard(&mut self, action: ClipboardAction, text: Option<String>) -> Option<String> {
        let mut event = InputEvent::new(InputKind::Clipboard(ClipboardEvent { action, text }));
        self.run_focused(&mut event);
        self.finish_input(&event);
        match (action, event.kind) {
            (ClipboardAction::Copy | ClipboardAction::Cut, InputKind::Clipboard(c)) => c.text,
            _ => None,
        }
    }

    fn path_at(&self, pt: Point) -> Option<HitPath> {
        if self.tree.root().is_none() {
            log::warn!("input dispatched before a root view was set");
            return None;
        }
        let mut path = hit_test(&self.tree, pt);
        // The root frames the tree; it is not part of the delivery path.
        if !path.is_empty() {
            path.remove(0);
        }
        Some(path)
    }

    fn run_path(&mut self, path: &[ViewId], pt: Point, mut event: InputEvent) -> Dispatched {
        let delivered = propagate(
            &mut self.tree,
            &mut self.focus,
            &mut self.pending,
            path,
            pt,
            &mut event,
        );
        let out = Dispatched {
            target: path.last().copied(),
            delivered,
            stopped: event.is_stopped(),
        };
        self.finish_input(&event);
        out
    }

    fn run_focused(&mut self, event: &mut InputEvent) -> Dispatched {
        let Some(holder) = self.focus.holder() else {
            log::trace!("{} dropped: nothing has keyboard focus", event.type_name());
            return Dispatched::default();
        };
        let ok = deliver(&mut self.tree, &mut self.focus, &mut self.pending, holder, event);
        Dispatched {
            target: Some(holder),
            delivered: usize::from(ok),
            stopped: event.is_stopped(),
        }
    }

    fn finish_input(&mut self, event: &InputEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
        let force = self.config.repaint_after_input;
        self.settle(force);
    }

    /// Applies queued edits, delivers focus notifications and honors repaint
    /// requests, until nothing is left to do.
    fn settle(&mut self, force_repaint: bool) {
        let mut rounds = 0;
        while !self.pending.is_idle() {
            rounds += 1;
            if rounds > MAX_SETTLE_ROUNDS {
                log::warn!(
                    "dropping {} tree edit(s) and {} focus notice(s) after {MAX_SETTLE_ROUNDS} rounds",
                    self.pending.ops.len(),
                    self.pending.focus_notices.len()
                );
                self.pending.ops.clear();
                self.pending.focus_notices.clear();
                break;
            }
            self.apply_ops();
            self.deliver_focus_notices();
        }
        if force_repaint || std::mem::take(&mut self.pending.repaint) {
            self.repaint();
        }
    }

    fn apply_ops(&mut self) {
        for op in std::mem::take(&mut self.pending.ops) {
            match op {
                TreeOp::Attach {
                    parent,
                    child,
                    index,
                } => {
                    if let Err(e) = self.tree.attach(parent, child, index) {
                        log::warn!("deferred attach failed: {e}");
                        self.tree.destroy(child);
                    }
                }
                TreeOp::Remove { parent, child } => {
                    self.remove_child(parent, child);
                }
                TreeOp::Clear { parent } => self.clear_children(parent),
            }
        }
    }

    fn deliver_focus_notices(&mut self) {
        for (id, change) in std::mem::take(&mut self.pending.focus_notices) {
            let mut event = InputEvent::new(InputKind::Focus(change));
            deliver(&mut self.tree, &mut self.focus, &mut self.pending, id, &mut event);
        }
    }

    fn after_removal(&mut self) {
        let tree = &self.tree;
        if let Some(h) = self.focus.holder() {
            if !tree.contains(h) {
                self.focus = FocusState::None;
            }
        }
    }

    // ---- rendering ----

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn logical_size(&self) -> Size {
        self.config.size
    }

    /// Takes effect on the next repaint.
    pub fn set_logical_size(&mut self, size: Size) {
        self.config.size = size;
    }

    pub fn scale(&self) -> f32 {
        self.config.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.config.scale = scale;
    }

    pub fn set_debug_bounds(&mut self, on: bool) {
        self.config.debug_bounds = on;
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Number of completed repaints.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn add_overlay(&mut self, overlay: impl Overlay) {
        self.overlays.push(Box::new(overlay));
    }

    pub fn overlay<T: Overlay>(&self) -> Option<&T> {
        self.overlays.iter().find_map(|o| {
            let any: &dyn Any = &**o;
            any.downcast_ref::<T>()
        })
    }

    pub fn overlay_mut<T: Overlay>(&mut self) -> Option<&mut T> {
        self.overlays.iter_mut().find_map(|o| {
            let any: &mut dyn Any = &mut **o;
            any.downcast_mut::<T>()
        })
    }

    /// Lays the tree out against the logical size without drawing.
    pub fn layout(&mut self) -> Result<Size> {
        let root = self.tree.root().ok_or(Error::NoRoot)?;
        let size = self.config.size.shrink(0.0);
        Ok(layout_view(&mut self.tree, &self.canvas, size, root, size))
    }

    /// Layout, clear, then draw the whole tree and the overlays.
    pub fn repaint(&mut self) {
        if let Err(e) = self.layout() {
            log::warn!("repaint: {e}");
        }
        let canvas: &mut dyn Canvas = &mut self.canvas;
        canvas.clear(self.config.clear_color);
        canvas.save();
        canvas.scale(self.config.scale);
        if let Some(root) = self.tree.root() {
            draw_view(
                &self.tree,
                root,
                canvas,
                self.focus.holder(),
                self.config.debug_bounds,
            );
        }
        for overlay in &mut self.overlays {
            canvas.save();
            overlay.draw(&self.tree, self.focus.holder(), canvas);
            canvas.restore();
        }
        canvas.restore();
        self.frames += 1;
    }
}

fn draw_view(
    tree: &ViewTree,
    id: ViewId,
    canvas: &mut dyn Canvas,
    focus: Option<ViewId>,
    debug_bounds: bool,
) {
    let Some(node) = tree.node(id) else { return };
    canvas.save();
    canvas.translate(node.position());
    if node.visible() {
        if let Some(view) = node.view() {
            view.draw(&mut DrawCx::new(id, tree, &mut *canvas, focus));
        }
        if !node.children().is_empty() {
            if node.view().is_some_and(|v| v.clip_children()) {
                canvas.clip(node.size().to_rect());
            }
            for &child in node.children() {
                draw_view(tree, child, canvas, focus, debug_bounds);
            }
        }
        if debug_bounds {
            canvas.stroke_rect(
                Rect::from_pos_size(Point::ZERO, node.size()),
                palette::DEBUG_BOUNDS,
            );
        }
    }
    canvas.restore();
}
