use easel_core::*;

use crate::style::{LIST_DEFAULT_WIDTH, LIST_ROW_FILL, LIST_ROW_HEIGHT, PADDING};

/// A column of fixed-height text rows. Pressing a row selects it and fires
/// [`CommandKind::Change`] with the row index.
pub struct SelectList {
    items: Vec<String>,
    selected: Option<usize>,
}

impl SelectList {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            selected: None,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Replaces the rows. A selection past the new end is cleared.
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        if self.selected.is_some_and(|i| i >= self.items.len()) {
            self.selected = None;
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.items.len());
    }

    pub fn row_at(&self, y: f32) -> Option<usize> {
        if y < 0.0 {
            return None;
        }
        let row = (y / LIST_ROW_HEIGHT).floor() as usize;
        (row < self.items.len()).then_some(row)
    }
}

impl View for SelectList {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let width = if cx.hflex() {
            available.width
        } else {
            LIST_DEFAULT_WIDTH
        };
        Size::new(width, available.height)
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        cx.fill_background(palette::FIELD_BG);
        let width = cx.size().width;
        for (i, item) in self.items.iter().enumerate() {
            let top = i as f32 * LIST_ROW_HEIGHT;
            if self.selected == Some(i) {
                cx.canvas()
                    .fill_rect(Rect::new(0.0, top, width, LIST_ROW_FILL), palette::SELECTION);
            }
            cx.fill_text(item, Point::new(PADDING, top + PADDING), palette::TEXT);
        }
    }

    fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
        if !event.is_pointer_down() {
            return;
        }
        let Some(row) = event.position().and_then(|p| self.row_at(p.y)) else {
            return;
        };
        self.selected = Some(row);
        cx.fire(CommandKind::Change, Payload::Index(row));
        cx.request_repaint();
    }

    fn clip_children(&self) -> bool {
        true
    }

    fn flex(&self) -> Flex {
        Flex::V
    }

    fn kind(&self) -> &'static str {
        "select-list"
    }
}
