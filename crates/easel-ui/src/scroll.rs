//! # Scroll model
//!
//! A [`ScrollPane`] is a clipping viewport over its first child. The content
//! offset is stored as a translation of the child (so it is zero or negative
//! while scrolled) and is clamped on every layout:
//!
//! - the content never moves right of or below the viewport origin;
//! - content larger than the viewport never leaves a gap at the far edge;
//! - content smaller than the viewport is centered on that axis.
//!
//! Wheel deltas move the content against the wheel and stop propagation, so
//! nested panes scroll the outermost one that is hit first.
//!
//! A [`ScrollView`] frames a pane with a horizontal and a vertical
//! [`ScrollBar`]. Bar thumbs are sized by viewport / content; the arrows at
//! either end step the content by a fixed distance and dragging moves it by
//! the drag delta scaled back up from gutter to content length.

use easel_core::*;

use crate::stack::Axis;
use crate::style::{
    SCROLL_ARROW, SCROLL_BAR_SIZE, SCROLL_BG, SCROLL_GUTTER, SCROLL_STEP, SCROLL_THUMB,
    SCROLL_VIEW_HEIGHT, SCROLL_VIEW_WIDTH,
};

fn clamp_axis(offset: f32, content: f32, viewport: f32) -> f32 {
    if content < viewport {
        return (viewport - content) / 2.0;
    }
    offset.min(0.0).max(viewport - content)
}

#[derive(Default)]
pub struct ScrollPane {
    offset: Point,
}

impl ScrollPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current translation of the content. Valid after the last layout.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Moves the content by `delta`; clamped on the next layout.
    pub fn scroll_by(&mut self, delta: Point) {
        self.offset = self.offset - delta;
    }
}

impl View for ScrollPane {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let children = cx.children();
        let Some((&content, rest)) = children.split_first() else {
            self.offset = Point::default();
            return available;
        };
        let size = cx.layout_child(content, available);
        self.offset = Point::new(
            clamp_axis(self.offset.x, size.width, available.width),
            clamp_axis(self.offset.y, size.height, available.height),
        );
        cx.set_child_position(content, self.offset);
        if !rest.is_empty() {
            log::debug!("scroll pane ignores {} extra children", rest.len());
        }
        available
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        cx.fill_background(SCROLL_BG);
    }

    fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
        let Some(delta) = event.scroll().map(|s| s.delta) else {
            return;
        };
        self.scroll_by(delta);
        event.stop();
        cx.request_repaint();
    }

    fn clip_children(&self) -> bool {
        true
    }

    fn flex(&self) -> Flex {
        Flex::BOTH
    }

    fn kind(&self) -> &'static str {
        "scroll-pane"
    }
}

fn along(axis: Axis, p: Point) -> f32 {
    match axis {
        Axis::Horizontal => p.x,
        Axis::Vertical => p.y,
    }
}

/// Viewport length, content length and offset of `pane` along `axis`.
fn pane_extent(tree: &ViewTree, pane: ViewId, axis: Axis) -> Option<(f32, f32, f32)> {
    let offset = tree.view::<ScrollPane>(pane).ok()?.offset();
    let content = *tree.children(pane).first()?;
    Some((
        axis.main(tree.size(pane)),
        axis.main(tree.size(content)),
        along(axis, offset),
    ))
}

/// One scroll bar of a [`ScrollView`], driving the pane it was made for.
pub struct ScrollBar {
    axis: Axis,
    pane: ViewId,
}

impl ScrollBar {
    pub fn new(axis: Axis, pane: ViewId) -> Self {
        Self { axis, pane }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    fn gutter(&self, size: Size) -> f32 {
        (self.axis.main(size) - SCROLL_BAR_SIZE * 2.0).max(0.0)
    }

    /// Start and length of the thumb within the gutter.
    fn thumb(&self, tree: &ViewTree, size: Size) -> Option<(f32, f32)> {
        let (viewport, content, offset) = pane_extent(tree, self.pane, self.axis)?;
        if content <= 0.0 {
            return None;
        }
        let gutter = self.gutter(size);
        let len = (gutter * viewport / content).min(gutter);
        let start = (-offset * gutter / content).clamp(0.0, gutter - len);
        Some((start, len))
    }

    fn scroll(&self, cx: &mut EventCx<'_>, amount: f32) {
        match cx.view_mut::<ScrollPane>(self.pane) {
            Ok(pane) => pane.scroll_by(self.axis.point(amount, 0.0)),
            Err(e) => log::warn!("scroll bar lost its pane: {e}"),
        }
        cx.request_repaint();
    }
}

impl View for ScrollBar {
    fn layout(&mut self, _cx: &mut LayoutCx<'_>, available: Size) -> Size {
        available
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        let size = cx.size();
        let len = self.axis.main(size);
        let bar = SCROLL_BAR_SIZE;
        cx.fill_background(SCROLL_GUTTER);
        if let Some((start, thumb)) = self.thumb(cx.tree(), size) {
            let at = self.axis.point(bar + start, 0.0);
            let extent = self.axis.size(thumb, bar);
            cx.canvas()
                .fill_rect(Rect::from_pos_size(at, extent), SCROLL_THUMB);
        }
        let (back, forward) = match self.axis {
            Axis::Horizontal => ("\u{2190}", "\u{2192}"),
            Axis::Vertical => ("\u{2191}", "\u{2193}"),
        };
        let far = self.axis.point((len - bar).max(0.0), 0.0);
        for (at, glyph) in [(Point::ZERO, back), (far, forward)] {
            cx.canvas()
                .fill_rect(Rect::from_pos_size(at, Size::new(bar, bar)), SCROLL_ARROW);
            cx.fill_text(glyph, at, palette::TEXT);
        }
    }

    fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
        if let Some(delta) = event.scroll().map(|s| s.delta) {
            self.scroll(cx, along(self.axis, delta));
            event.stop();
            return;
        }
        let Some(pointer) = event.pointer() else { return };
        let len = self.axis.main(cx.size());
        match pointer.phase {
            PointerPhase::Down => {
                let p = along(self.axis, pointer.position);
                if p < SCROLL_BAR_SIZE {
                    self.scroll(cx, -SCROLL_STEP);
                } else if p > len - SCROLL_BAR_SIZE {
                    self.scroll(cx, SCROLL_STEP);
                }
            }
            PointerPhase::Drag => {
                let Some(delta) = pointer.delta else { return };
                let gutter = self.gutter(cx.size());
                let content = pane_extent(cx.tree(), self.pane, self.axis).map_or(0.0, |e| e.1);
                if gutter > 0.0 && content > 0.0 {
                    self.scroll(cx, along(self.axis, delta) * content / gutter);
                }
            }
            PointerPhase::Up => {}
        }
    }

    fn kind(&self) -> &'static str {
        match self.axis {
            Axis::Horizontal => "h-scroll-bar",
            Axis::Vertical => "v-scroll-bar",
        }
    }
}

/// Ids of the views [`ScrollView::add_to`] creates. Content goes in `pane`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollViewParts {
    pub view: ViewId,
    pub pane: ViewId,
    pub hbar: ViewId,
    pub vbar: ViewId,
}

/// A [`ScrollPane`] with scroll bars along its bottom and right edges.
///
/// Its children are the pane, the horizontal bar and the vertical bar, in
/// that order; build it with [`ScrollView::add_to`]. The view is 300x300
/// unless flexed, in which case it takes the offered extent.
pub struct ScrollView {
    pref_width: f32,
}

impl Default for ScrollView {
    fn default() -> Self {
        Self {
            pref_width: SCROLL_VIEW_WIDTH,
        }
    }
}

impl ScrollView {
    pub fn add_to<C: Canvas>(surface: &mut Surface<C>, parent: ViewId) -> Result<ScrollViewParts> {
        let view = surface.add_child(parent, ScrollView::default())?;
        let pane = surface.add_child(view, ScrollPane::new())?;
        let hbar = surface.add_child(view, ScrollBar::new(Axis::Horizontal, pane))?;
        let vbar = surface.add_child(view, ScrollBar::new(Axis::Vertical, pane))?;
        Ok(ScrollViewParts {
            view,
            pane,
            hbar,
            vbar,
        })
    }

    pub fn set_pref_width(&mut self, width: f32) {
        self.pref_width = width;
    }
}

impl View for ScrollView {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let size = Size::new(
            if cx.hflex() { available.width } else { self.pref_width },
            if cx.vflex() { available.height } else { SCROLL_VIEW_HEIGHT },
        );
        let bar = SCROLL_BAR_SIZE;
        let viewport = Size::new((size.width - bar).max(0.0), (size.height - bar).max(0.0));
        let children = cx.children();
        let slots = [
            (viewport, Point::ZERO),
            (Size::new(viewport.width, bar), Point::new(0.0, viewport.height)),
            (Size::new(bar, viewport.height), Point::new(viewport.width, 0.0)),
        ];
        for (&child, (offer, at)) in children.iter().zip(slots) {
            cx.layout_child(child, offer);
            cx.set_child_position(child, at);
        }
        if children.len() > slots.len() {
            log::debug!("scroll view ignores {} extra children", children.len() - slots.len());
        }
        size
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        cx.fill_background(SCROLL_BG);
    }

    fn kind(&self) -> &'static str {
        "scroll-view"
    }
}
