use easel_core::*;

/// Fills whatever it is offered, on both axes.
#[derive(Default)]
pub struct GrowPanel {
    fill: Option<Color>,
}

impl GrowPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }
}

impl View for GrowPanel {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        for ch in cx.children() {
            cx.layout_child(ch, available);
        }
        available
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        if let Some(fill) = self.fill {
            cx.fill_background(fill);
        }
    }

    fn flex(&self) -> Flex {
        Flex::BOTH
    }

    fn kind(&self) -> &'static str {
        "grow"
    }
}

/// Empty space that soaks up the leftover extent along one axis.
pub struct Spacer {
    axis: crate::Axis,
}

impl Spacer {
    pub fn horizontal() -> Self {
        Self {
            axis: crate::Axis::Horizontal,
        }
    }

    pub fn vertical() -> Self {
        Self {
            axis: crate::Axis::Vertical,
        }
    }
}

impl View for Spacer {
    fn layout(&mut self, _cx: &mut LayoutCx<'_>, available: Size) -> Size {
        match self.axis {
            crate::Axis::Horizontal => Size::new(available.width, 0.0),
            crate::Axis::Vertical => Size::new(0.0, available.height),
        }
    }

    fn flex(&self) -> Flex {
        match self.axis {
            crate::Axis::Horizontal => Flex::H,
            crate::Axis::Vertical => Flex::V,
        }
    }

    fn can_receive_mouse(&self, _has_children: bool) -> bool {
        false
    }

    fn kind(&self) -> &'static str {
        "spacer"
    }
}
