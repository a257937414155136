use easel_core::*;

use crate::style::PADDING;

/// A caption sized to its text plus the standard padding.
pub struct Label {
    caption: String,
    color: Color,
}

impl Label {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            color: palette::TEXT,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Takes effect on the next repaint.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }
}

impl View for Label {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, _available: Size) -> Size {
        cx.measure_text(&self.caption, None).grow(PADDING)
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        cx.fill_text(&self.caption, Point::new(PADDING, PADDING), self.color);
    }

    fn kind(&self) -> &'static str {
        "label"
    }
}
