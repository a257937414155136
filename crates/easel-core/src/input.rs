//! Typed input events.
//!
//! Raw host input is normalised by an adapter into one of the [`InputKind`]
//! variants and wrapped in an [`InputEvent`], which carries the shared
//! `stopped` flag used by the dispatch pipeline.

use bitflags::bitflags;

use crate::Point;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        /// Cmd on Mac, Win key on Windows
        const META = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Pointer,
    Keyboard,
    Focus,
    Command,
    Clipboard,
    Scroll,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Primary, // Left mouse, touch
    Secondary, // Right mouse
    Tertiary,  // Middle mouse
    Other(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Drag,
    Up,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Local to the view currently receiving the event.
    pub position: Point,
    /// Movement since the previous pointer event of the same gesture; set on drags.
    pub delta: Option<Point>,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8), // F1-F12
    Unidentified(String),
}

impl Key {
    /// Resolves a key name as hosts spell it (`"Enter"`, `"ArrowLeft"`, `"a"`, `"F5"`).
    pub fn from_name(name: &str) -> Key {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Character(c);
        }
        match name {
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Space" => Key::Character(' '),
            other => match other.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                Some(n) if (1..=24).contains(&n) => Key::F(n),
                _ => Key::Unidentified(other.to_string()),
            },
        }
    }

    /// The character this key would type, if any.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::Character(c) => Some(*c),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyEvent {
    pub phase: KeyPhase,
    pub key: Key,
    /// Physical key code, e.g. `"KeyA"` or `"Backspace"`.
    pub code: String,
    pub modifiers: Modifiers,
    pub repeat: bool,
}

impl KeyEvent {
    pub fn down(key: Key, code: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            phase: KeyPhase::Down,
            key,
            code: code.into(),
            modifiers,
            repeat: false,
        }
    }

    pub fn up(key: Key, code: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            phase: KeyPhase::Up,
            ..Self::down(key, code, modifiers)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusEvent {
    Gained,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipboardAction {
    Copy,
    Cut,
    Paste,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardEvent {
    pub action: ClipboardAction,
    /// Pasted text on the way in; copied/cut text on the way out.
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollEvent {
    pub position: Point,
    pub delta: Point,
    pub modifiers: Modifiers,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    Pointer(PointerEvent),
    Keyboard(KeyEvent),
    Focus(FocusEvent),
    Clipboard(ClipboardEvent),
    Scroll(ScrollEvent),
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    stopped: bool,
}

impl InputEvent {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            stopped: false,
        }
    }

    pub fn category(&self) -> EventCategory {
        match self.kind {
            InputKind::Pointer(_) => EventCategory::Pointer,
            InputKind::Keyboard(_) => EventCategory::Keyboard,
            InputKind::Focus(_) => EventCategory::Focus,
            InputKind::Clipboard(_) => EventCategory::Clipboard,
            InputKind::Scroll(_) => EventCategory::Scroll,
        }
    }

    /// Short type tag, used in logs and by the input observer.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            InputKind::Pointer(p) => match p.phase {
                PointerPhase::Down => "pointer-down",
                PointerPhase::Drag => "pointer-drag",
                PointerPhase::Up => "pointer-up",
            },
            InputKind::Keyboard(k) => match k.phase {
                KeyPhase::Down => "keyboard-down",
                KeyPhase::Up => "keyboard-up",
            },
            InputKind::Focus(FocusEvent::Gained) => "focus-gained",
            InputKind::Focus(FocusEvent::Lost) => "focus-lost",
            InputKind::Clipboard(c) => match c.action {
                ClipboardAction::Copy => "clipboard-copy",
                ClipboardAction::Cut => "clipboard-cut",
                ClipboardAction::Paste => "clipboard-paste",
            },
            InputKind::Scroll(_) => "scroll-wheel",
        }
    }

    /// Halts delivery to the views further down the dispatch path.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn pointer(&self) -> Option<&PointerEvent> {
        match &self.kind {
            InputKind::Pointer(p) => Some(p),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&KeyEvent> {
        match &self.kind {
            InputKind::Keyboard(k) => Some(k),
            _ => None,
        }
    }

    pub fn scroll(&self) -> Option<&ScrollEvent> {
        match &self.kind {
            InputKind::Scroll(s) => Some(s),
            _ => None,
        }
    }

    pub fn clipboard_mut(&mut self) -> Option<&mut ClipboardEvent> {
        match &mut self.kind {
            InputKind::Clipboard(c) => Some(c),
            _ => None,
        }
    }

    pub fn focus(&self) -> Option<FocusEvent> {
        match self.kind {
            InputKind::Focus(f) => Some(f),
            _ => None,
        }
    }

    /// Position local to the current receiver, for positional events.
    pub fn position(&self) -> Option<crate::Point> {
        match &self.kind {
            InputKind::Pointer(p) => Some(p.position),
            InputKind::Scroll(s) => Some(s.position),
            _ => None,
        }
    }

    pub(crate) fn set_position(&mut self, pos: crate::Point) {
        match &mut self.kind {
            InputKind::Pointer(p) => p.position = pos,
            InputKind::Scroll(s) => s.position = pos,
            _ => {}
        }
    }

    pub fn is_pointer_down(&self) -> bool {
        matches!(self.pointer(), Some(p) if p.phase == PointerPhase::Down)
    }

    pub fn is_pointer_up(&self) -> bool {
        matches!(self.pointer(), Some(p) if p.phase == PointerPhase::Up)
    }

    pub fn is_pointer_drag(&self) -> bool {
        matches!(self.pointer(), Some(p) if p.phase == PointerPhase::Drag)
    }

    pub fn is_key_down(&self) -> bool {
        matches!(self.key(), Some(k) if k.phase == KeyPhase::Down)
    }
}
