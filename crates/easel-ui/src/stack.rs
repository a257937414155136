//! Horizontal and vertical stacks.
//!
//! A stack lays its children out in two passes along its main axis: fixed
//! children first, each offered whatever extent is left, then the flexible
//! children (flex along the main axis), which split the remaining extent
//! evenly. Children are then placed in child order, offset by the padding,
//! and aligned on the cross axis.

use easel_core::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub(crate) fn main(self, s: Size) -> f32 {
        match self {
            Axis::Horizontal => s.width,
            Axis::Vertical => s.height,
        }
    }

    pub(crate) fn cross(self, s: Size) -> f32 {
        match self {
            Axis::Horizontal => s.height,
            Axis::Vertical => s.width,
        }
    }

    pub(crate) fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    pub(crate) fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Axis::Horizontal => Point::new(main, cross),
            Axis::Vertical => Point::new(cross, main),
        }
    }
}

/// Cross-axis placement of children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Top for an hbox, left for a vbox.
    #[default]
    Start,
    Center,
    End,
    /// Position at the start and widen every child to the cross extent.
    Stretch,
}

pub struct Stack {
    axis: Axis,
    pad: f32,
    align: Align,
    fill: Option<Color>,
}

pub fn hbox() -> Stack {
    Stack::new(Axis::Horizontal)
}

pub fn vbox() -> Stack {
    Stack::new(Axis::Vertical)
}

impl Stack {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            pad: 0.0,
            align: Align::Start,
            fill: None,
        }
    }

    pub fn pad(mut self, pad: f32) -> Self {
        self.pad = pad;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn set_pad(&mut self, pad: f32) {
        self.pad = pad;
    }

    pub fn set_align(&mut self, align: Align) {
        self.align = align;
    }

    pub fn set_fill(&mut self, fill: Option<Color>) {
        self.fill = fill;
    }

    fn flexes_on_main(&self, cx: &LayoutCx<'_>, child: ViewId) -> bool {
        match self.axis {
            Axis::Horizontal => cx.child_hflex(child),
            Axis::Vertical => cx.child_vflex(child),
        }
    }

    fn flexes_on_cross(&self, cx: &LayoutCx<'_>) -> bool {
        match self.axis {
            Axis::Horizontal => cx.vflex(),
            Axis::Vertical => cx.hflex(),
        }
    }
}

impl View for Stack {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, real_available: Size) -> Size {
        let axis = self.axis;
        let available = real_available.shrink(self.pad);
        let main_avail = axis.main(available);
        let cross_avail = axis.cross(available);

        let children = cx.children();
        let (flexible, fixed): (Vec<ViewId>, Vec<ViewId>) = children
            .iter()
            .partition(|&&ch| self.flexes_on_main(cx, ch));

        let mut total = 0.0;
        let mut leftover = main_avail;
        for ch in fixed {
            let size = cx.layout_child(ch, axis.size(leftover.max(0.0), cross_avail));
            total += axis.main(size);
            leftover -= axis.main(size);
        }
        if !flexible.is_empty() {
            let share = (main_avail - total).max(0.0) / flexible.len() as f32;
            for ch in flexible {
                let size = cx.layout_child(ch, axis.size(share, cross_avail));
                total += axis.main(size);
            }
        }
        if total > main_avail {
            log::debug!("stack children overflow: {total} > {main_avail}");
        }

        let cross_extent = if self.flexes_on_cross(cx) {
            cross_avail
        } else {
            children
                .iter()
                .map(|&ch| axis.cross(cx.child_size(ch)))
                .fold(0.0, f32::max)
        };

        let mut at = self.pad;
        for &ch in &children {
            let size = cx.child_size(ch);
            let slack = cross_extent - axis.cross(size);
            let cross = match self.align {
                Align::Start | Align::Stretch => self.pad,
                Align::Center => self.pad + slack / 2.0,
                Align::End => self.pad + slack,
            };
            if self.align == Align::Stretch {
                cx.set_child_size(ch, axis.size(axis.main(size), cross_extent));
            }
            cx.set_child_position(ch, axis.point(at, cross));
            at += axis.main(size);
        }

        let mut own = axis.size(total + self.pad * 2.0, cross_extent + self.pad * 2.0);
        if cx.hflex() {
            own.width = real_available.width;
        }
        if cx.vflex() {
            own.height = real_available.height;
        }
        own
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        if let Some(fill) = self.fill {
            cx.fill_background(fill);
        }
    }

    fn kind(&self) -> &'static str {
        match self.axis {
            Axis::Horizontal => "hbox",
            Axis::Vertical => "vbox",
        }
    }
}
