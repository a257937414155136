//! Full-surface layers that stack content in z-order, and the frames that
//! popups and dialogs sit in.

use easel_core::*;

use crate::style::{DIALOG_MAX, POPUP_BACKDROP, POPUP_BG, POPUP_MAX};

/// Default name of a [`PopupLayer`], used by views that open popups.
pub const POPUP_LAYER: &str = "popup-layer";
/// Default name of a [`DialogLayer`].
pub const DIALOG_LAYER: &str = "dialog-layer";

fn layout_all(cx: &mut LayoutCx<'_>, available: Size) -> Size {
    for ch in cx.children() {
        cx.layout_child(ch, available);
    }
    available
}

/// Lays every child out at the full available size. The layer itself never
/// takes the pointer, so presses outside its children reach the views below.
#[derive(Default)]
pub struct LayerView;

impl LayerView {
    pub fn new() -> Self {
        Self
    }
}

impl View for LayerView {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        layout_all(cx, available)
    }

    fn can_receive_mouse(&self, _has_children: bool) -> bool {
        false
    }

    fn kind(&self) -> &'static str {
        "layer"
    }
}

/// A layer for transient popups.
///
/// While it holds children it captures the pointer everywhere: a press on the
/// backdrop (outside every popup) dismisses all of them and stops the event.
/// With no children it is transparent like [`LayerView`].
#[derive(Default)]
pub struct PopupLayer;

impl PopupLayer {
    pub fn new() -> Self {
        Self
    }
}

impl View for PopupLayer {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        layout_all(cx, available)
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        if !cx.tree().children(cx.id()).is_empty() {
            cx.fill_background(POPUP_BACKDROP);
        }
    }

    fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
        if !event.is_pointer_down() {
            return;
        }
        let Some(pos) = event.position() else { return };
        if on_child(cx, pos) {
            return;
        }
        log::debug!("popup backdrop pressed; dismissing");
        let me = cx.id();
        cx.clear_children(me);
        event.stop();
        cx.request_repaint();
    }

    fn can_receive_mouse(&self, has_children: bool) -> bool {
        has_children
    }

    fn kind(&self) -> &'static str {
        POPUP_LAYER
    }
}

fn on_child(cx: &EventCx<'_>, pos: Point) -> bool {
    cx.children(cx.id()).iter().any(|&ch| {
        cx.tree()
            .node(ch)
            .is_some_and(|n| n.visible() && n.bounds().contains(pos))
    })
}

/// Lays out the first child against `offer` and takes its size.
fn wrap_first(cx: &mut LayoutCx<'_>, offer: Size) -> Size {
    let children = cx.children();
    let Some((&content, rest)) = children.split_first() else {
        return Size::ZERO;
    };
    if !rest.is_empty() {
        log::debug!("{} extra children not laid out", rest.len());
    }
    let size = cx.layout_child(content, offer);
    cx.set_child_position(content, Point::ZERO);
    size
}

/// Frame for one popup's content, placed in a [`PopupLayer`] at the point
/// it was opened at. Sized to its first child.
#[derive(Default)]
pub struct PopupContainer;

impl PopupContainer {
    pub fn new() -> Self {
        Self
    }
}

impl View for PopupContainer {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, _available: Size) -> Size {
        wrap_first(cx, Size::new(POPUP_MAX, POPUP_MAX))
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        cx.fill_background(POPUP_BG);
    }

    fn kind(&self) -> &'static str {
        "popup-container"
    }
}

/// A layer for modal dialogs.
///
/// Every child is centered on the layer. While a dialog is showing the layer
/// takes every press that misses it, so nothing underneath can be reached
/// until the dialog is removed.
#[derive(Default)]
pub struct DialogLayer;

impl DialogLayer {
    pub fn new() -> Self {
        Self
    }
}

impl View for DialogLayer {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        for ch in cx.children() {
            let size = cx.layout_child(ch, available);
            cx.set_child_position(
                ch,
                Point::new(
                    (available.width - size.width) / 2.0,
                    (available.height - size.height) / 2.0,
                ),
            );
        }
        available
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        if !cx.tree().children(cx.id()).is_empty() {
            cx.fill_background(POPUP_BACKDROP);
        }
    }

    fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
        let Some(pos) = event.position() else { return };
        if !on_child(cx, pos) {
            event.stop();
        }
    }

    fn can_receive_mouse(&self, has_children: bool) -> bool {
        has_children
    }

    fn kind(&self) -> &'static str {
        DIALOG_LAYER
    }
}

/// Frame for a dialog's content. Its first child is offered at most
/// 600x600 and the frame takes the child's size.
#[derive(Default)]
pub struct DialogContainer;

impl DialogContainer {
    pub fn new() -> Self {
        Self
    }
}

impl View for DialogContainer {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let offer = Size::new(available.width.min(DIALOG_MAX), available.height.min(DIALOG_MAX));
        wrap_first(cx, offer)
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        cx.fill_background(POPUP_BG);
    }

    fn kind(&self) -> &'static str {
        "dialog-container"
    }
}
