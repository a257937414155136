//! Single-line text entry.
//!
//! The caret is a byte offset that always sits on a grapheme boundary, so
//! editing never splits a user-perceived character.

use easel_core::*;
use unicode_segmentation::UnicodeSegmentation;

use crate::style::{CARET_WIDTH, PADDING, TEXT_LINE_HEIGHT, TEXT_LINE_WIDTH};

fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn next_grapheme_boundary(text: &str, byte: usize) -> usize {
    for (i, _) in text.grapheme_indices(true) {
        if i > byte {
            return i;
        }
    }
    text.len()
}

/// Text plus caret.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextLineState {
    pub text: String,
    /// Byte offset of the caret.
    pub cursor: usize,
}

impl TextLineState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    /// Text before and after the caret.
    pub fn parts(&self) -> (&str, &str) {
        self.text.split_at(self.cursor.min(self.text.len()))
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Inserts at the caret. Line breaks are dropped. Returns `false` if
    /// nothing was inserted.
    pub fn insert(&mut self, s: &str) -> bool {
        let clean: String = s.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if clean.is_empty() {
            return false;
        }
        let at = self.cursor.min(self.text.len());
        self.text.insert_str(at, &clean);
        self.cursor = at + clean.len();
        true
    }

    /// Deletes the grapheme before the caret.
    pub fn delete_left(&mut self) -> bool {
        let pos = self.cursor.min(self.text.len());
        if pos == 0 {
            return false;
        }
        let prev = prev_grapheme_boundary(&self.text, pos);
        self.text.replace_range(prev..pos, "");
        self.cursor = prev;
        true
    }

    /// Deletes the grapheme after the caret.
    pub fn delete_right(&mut self) -> bool {
        let pos = self.cursor.min(self.text.len());
        if pos >= self.text.len() {
            return false;
        }
        let next = next_grapheme_boundary(&self.text, pos);
        self.text.replace_range(pos..next, "");
        true
    }

    pub fn left(&mut self) {
        self.cursor = prev_grapheme_boundary(&self.text, self.cursor.min(self.text.len()));
    }

    pub fn right(&mut self) {
        self.cursor = next_grapheme_boundary(&self.text, self.cursor.min(self.text.len()));
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Removes and returns the whole line.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }
}

/// Single-line editor.
///
/// A press takes keyboard focus. While focused, keys edit at the caret and
/// each edit fires [`CommandKind::Change`] with the new text; Enter releases
/// focus and fires [`CommandKind::Action`] with the text. Paste inserts at
/// the caret; copy and cut export the whole line.
pub struct TextLine {
    state: TextLineState,
    pref_width: f32,
}

impl TextLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: TextLineState::new(text),
            pref_width: TEXT_LINE_WIDTH,
        }
    }

    pub fn pref_width(mut self, width: f32) -> Self {
        self.pref_width = width;
        self
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn state(&self) -> &TextLineState {
        &self.state
    }

    /// Replaces the text without notifying listeners.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.set_text(text);
    }

    /// Replaces the text and fires [`CommandKind::Change`].
    pub fn replace_text(&mut self, cx: &mut EventCx<'_>, text: impl Into<String>) {
        self.state.set_text(text);
        self.changed(cx);
    }

    fn changed(&self, cx: &mut EventCx<'_>) {
        cx.fire(CommandKind::Change, Payload::Text(self.state.text.clone()));
        cx.request_repaint();
    }

    fn key_down(&mut self, cx: &mut EventCx<'_>, key: &KeyEvent) {
        let ctrl = key.modifiers.contains(Modifiers::CTRL);
        let command = key.modifiers.intersects(Modifiers::CTRL | Modifiers::META);
        let edited = match &key.key {
            Key::Character('d' | 'D') if ctrl => self.state.delete_right(),
            _ if key.code == "KeyD" && ctrl => self.state.delete_right(),
            Key::Backspace => self.state.delete_left(),
            Key::Delete => self.state.delete_right(),
            Key::ArrowLeft => {
                self.state.left();
                false
            }
            Key::ArrowRight => {
                self.state.right();
                false
            }
            Key::Home => {
                self.state.home();
                false
            }
            Key::End => {
                self.state.end();
                false
            }
            Key::Enter => {
                let me = cx.id();
                cx.release_keyboard_focus(me);
                cx.fire(CommandKind::Action, Payload::Text(self.state.text.clone()));
                cx.request_repaint();
                return;
            }
            Key::Character(c) if !command => self.state.insert(c.encode_utf8(&mut [0; 4])),
            _ => return,
        };
        if edited {
            self.changed(cx);
        } else {
            cx.request_repaint();
        }
    }

    fn clipboard(&mut self, cx: &mut EventCx<'_>, event: &mut ClipboardEvent) {
        match event.action {
            ClipboardAction::Paste => {
                let text = event.text.take().unwrap_or_default();
                if self.state.insert(&text) {
                    self.changed(cx);
                }
            }
            ClipboardAction::Copy => event.text = Some(self.state.text.clone()),
            ClipboardAction::Cut => {
                let text = self.state.take();
                if !text.is_empty() {
                    self.changed(cx);
                }
                event.text = Some(text);
            }
        }
    }
}

impl View for TextLine {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        let width = if cx.hflex() {
            available.width
        } else {
            self.pref_width
        };
        Size::new(width, TEXT_LINE_HEIGHT)
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        let focused = cx.has_keyboard_focus();
        cx.fill_background(if focused {
            palette::FIELD_BG_FOCUSED
        } else {
            palette::FIELD_BG
        });
        cx.stroke_background(palette::BUTTON_BORDER);
        if focused {
            let (before, after) = self.state.parts();
            let caret_x = PADDING + cx.measure_text(before, None).width;
            cx.fill_text(before, Point::new(PADDING, PADDING), palette::TEXT);
            cx.fill_text(after, Point::new(caret_x, PADDING), palette::TEXT);
            cx.canvas().fill_rect(
                Rect::new(caret_x, 2.0, CARET_WIDTH, TEXT_LINE_HEIGHT - 6.0),
                palette::TEXT,
            );
        } else {
            cx.fill_text(&self.state.text, Point::new(PADDING, PADDING), palette::TEXT);
        }
    }

    fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
        match &mut event.kind {
            InputKind::Pointer(p) if p.phase == PointerPhase::Down => {
                let me = cx.id();
                cx.set_keyboard_focus(me);
                cx.request_repaint();
            }
            InputKind::Focus(_) => cx.request_repaint(),
            InputKind::Keyboard(k) if k.phase == KeyPhase::Down => self.key_down(cx, k),
            InputKind::Clipboard(c) => self.clipboard(cx, c),
            _ => {}
        }
    }

    fn kind(&self) -> &'static str {
        "text-line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_at_caret() {
        let mut state = TextLineState::new("held");
        state.left();
        state.insert("l");
        assert_eq!(state.text, "helld");
        assert_eq!(state.cursor, 4);
        assert!(!state.insert("\n"));
    }

    #[test]
    fn delete_left_and_right() {
        let mut state = TextLineState::new("abc");
        assert!(state.delete_left());
        assert_eq!(state.text, "ab");
        assert!(!state.delete_right());
        state.home();
        assert!(!state.delete_left());
        assert!(state.delete_right());
        assert_eq!(state.text, "b");
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn caret_moves_by_grapheme() {
        // "e" + combining acute is one grapheme of three bytes
        let mut state = TextLineState::new("ae\u{301}b");
        state.left();
        assert_eq!(state.parts(), ("ae\u{301}", "b"));
        state.left();
        assert_eq!(state.parts(), ("a", "e\u{301}b"));
        state.right();
        assert_eq!(state.cursor, 4);
        state.delete_left();
        assert_eq!(state.text, "ab");
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn caret_clamps_at_ends() {
        let mut state = TextLineState::new("xy");
        state.right();
        assert_eq!(state.cursor, 2);
        state.home();
        state.left();
        assert_eq!(state.cursor, 0);
        state.end();
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn take_empties_the_line() {
        let mut state = TextLineState::new("cut me");
        assert_eq!(state.take(), "cut me");
        assert_eq!(state, TextLineState::default());
    }
}
