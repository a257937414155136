//! Push, icon, toggle, check and radio buttons.
//!
//! All of them commit on pointer release, not press; the release is delivered
//! through pointer capture, so it arrives even if the pointer left the button.

use easel_core::*;

use crate::style::{ICON_SIZE, INDICATOR_SIZE, PADDING};

fn caption_size(cx: &LayoutCx<'_>, caption: &str) -> Size {
    cx.measure_text(caption, None).grow(PADDING)
}

fn draw_button(cx: &mut DrawCx<'_>, caption: &str, bg: Color) {
    cx.fill_background(bg);
    cx.stroke_background(palette::BUTTON_BORDER);
    cx.fill_text(caption, Point::new(PADDING, PADDING), palette::TEXT);
}

/// Shows a pressed state between down and up and fires
/// [`CommandKind::Action`] on release.
pub struct ActionButton {
    caption: String,
    active: bool,
}

impl ActionButton {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            active: false,
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl View for ActionButton {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, _available: Size) -> Size {
        caption_size(cx, &self.caption)
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        let bg = if self.active {
            palette::BUTTON_BG_ACTIVE
        } else {
            palette::BUTTON_BG
        };
        draw_button(cx, &self.caption, bg);
    }

    fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
        if event.is_pointer_down() {
            self.active = true;
            cx.request_repaint();
        } else if event.is_pointer_up() {
            self.active = false;
            cx.fire(CommandKind::Action, Payload::None);
            cx.request_repaint();
        }
    }

    fn kind(&self) -> &'static str {
        "button"
    }
}

/// A square button showing a single glyph. Behaves like [`ActionButton`].
pub struct IconButton {
    icon: Option<char>,
    active: bool,
}

impl IconButton {
    pub fn new(icon: char) -> Self {
        Self {
            icon: Some(icon),
            active: false,
        }
    }

    /// A button with no glyph yet.
    pub fn blank() -> Self {
        Self {
            icon: None,
            active: false,
        }
    }

    pub fn icon(&self) -> Option<char> {
        self.icon
    }

    pub fn set_icon(&mut self, icon: char) {
        self.icon = Some(icon);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl View for IconButton {
    fn layout(&mut self, _cx: &mut LayoutCx<'_>, _available: Size) -> Size {
        Size::new(ICON_SIZE, ICON_SIZE).grow(PADDING)
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        let bg = if self.active {
            palette::BUTTON_BG_ACTIVE
        } else {
            palette::BUTTON_BG
        };
        cx.fill_background(bg);
        cx.stroke_background(palette::BUTTON_BORDER);
        if let Some(icon) = self.icon {
            let mut buf = [0u8; 4];
            cx.fill_text(icon.encode_utf8(&mut buf), Point::new(PADDING, PADDING), palette::TEXT);
        }
    }

    fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
        if event.is_pointer_down() {
            self.active = true;
            cx.request_repaint();
        } else if event.is_pointer_up() {
            self.active = false;
            cx.fire(CommandKind::Action, Payload::None);
            cx.request_repaint();
        }
    }

    fn kind(&self) -> &'static str {
        "icon-button"
    }
}

/// Flips `selected` on release and fires [`CommandKind::Action`] with the new
/// state.
pub struct ToggleButton {
    caption: String,
    selected: bool,
    active: bool,
}

impl ToggleButton {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            selected: false,
            active: false,
        }
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }
}

impl View for ToggleButton {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, _available: Size) -> Size {
        caption_size(cx, &self.caption)
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        let bg = if self.active {
            palette::BUTTON_BG_ACTIVE
        } else if self.selected {
            palette::BUTTON_BG_SELECTED
        } else {
            palette::BUTTON_BG
        };
        draw_button(cx, &self.caption, bg);
    }

    fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
        if event.is_pointer_down() {
            self.active = true;
            cx.request_repaint();
        } else if event.is_pointer_up() {
            self.active = false;
            self.selected = !self.selected;
            cx.fire(CommandKind::Action, Payload::Bool(self.selected));
            cx.request_repaint();
        }
    }

    fn kind(&self) -> &'static str {
        "toggle-button"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    Check,
    Radio,
}

/// Caption with a check or radio indicator. Flips on release and fires
/// [`CommandKind::Change`] with the new state.
pub struct SelectButton {
    caption: String,
    selected: bool,
    indicator: Indicator,
}

impl SelectButton {
    pub fn check(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            selected: false,
            indicator: Indicator::Check,
        }
    }

    pub fn radio(caption: impl Into<String>) -> Self {
        Self {
            indicator: Indicator::Radio,
            ..Self::check(caption)
        }
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }
}

impl View for SelectButton {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, _available: Size) -> Size {
        let mut size = caption_size(cx, &self.caption);
        size.width += INDICATOR_SIZE + PADDING;
        size.height = size.height.max(INDICATOR_SIZE + PADDING * 2.0);
        size
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        let boxed = Rect::new(PADDING, PADDING, INDICATOR_SIZE, INDICATOR_SIZE);
        cx.canvas().fill_rect(boxed, palette::FIELD_BG_FOCUSED);
        cx.canvas().stroke_rect(boxed, palette::BUTTON_BORDER);
        if self.selected {
            let inset = match self.indicator {
                Indicator::Check => 3.0,
                Indicator::Radio => 5.0,
            };
            let mark = Rect::new(
                boxed.x + inset,
                boxed.y + inset,
                boxed.w - inset * 2.0,
                boxed.h - inset * 2.0,
            );
            cx.canvas().fill_rect(mark, palette::TEXT);
        }
        let x = PADDING + INDICATOR_SIZE + PADDING;
        cx.fill_text(&self.caption, Point::new(x, PADDING), palette::TEXT);
    }

    fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
        if event.is_pointer_up() {
            self.selected = !self.selected;
            cx.fire(CommandKind::Change, Payload::Bool(self.selected));
            cx.request_repaint();
        }
    }

    fn kind(&self) -> &'static str {
        match self.indicator {
            Indicator::Check => "check-button",
            Indicator::Radio => "radio-button",
        }
    }
}
