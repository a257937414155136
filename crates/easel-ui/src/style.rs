//! Metrics shared by the stock views.

use easel_core::Color;

/// Inset between a view's edge and its caption.
pub const PADDING: f32 = 5.0;
/// Side of the check/radio indicator box.
pub const INDICATOR_SIZE: f32 = 16.0;

pub const LIST_ROW_HEIGHT: f32 = 30.0;
pub const LIST_ROW_FILL: f32 = 25.0;
pub const LIST_DEFAULT_WIDTH: f32 = 200.0;

pub const TEXT_LINE_HEIGHT: f32 = 26.0;
pub const TEXT_LINE_WIDTH: f32 = 100.0;
pub const CARET_WIDTH: f32 = 2.0;

pub const POPUP_BACKDROP: Color = Color(255, 255, 255, 178);
pub const SCROLL_BG: Color = Color::from_rgb(0xaa, 0xaa, 0xaa);

/// Side of an icon glyph inside an [`IconButton`](crate::IconButton).
pub const ICON_SIZE: f32 = 16.0;

pub const SCROLL_VIEW_WIDTH: f32 = 300.0;
pub const SCROLL_VIEW_HEIGHT: f32 = 300.0;
/// Thickness of a scroll bar, and the side of its arrow buttons.
pub const SCROLL_BAR_SIZE: f32 = 20.0;
/// Distance an arrow press scrolls.
pub const SCROLL_STEP: f32 = 20.0;
pub const SCROLL_GUTTER: Color = Color::from_rgb(0x88, 0x88, 0x88);
pub const SCROLL_THUMB: Color = Color::from_rgb(0xcc, 0xcc, 0xcc);
pub const SCROLL_ARROW: Color = Color::from_rgb(0x99, 0x99, 0x99);

/// Largest offer a popup's content gets.
pub const POPUP_MAX: f32 = 1000.0;
pub const POPUP_BG: Color = Color::from_rgb(0x80, 0x80, 0x80);
/// Largest offer a dialog's content gets.
pub const DIALOG_MAX: f32 = 600.0;

pub const NUMBER_PAD: f32 = 1.0;
pub const INVALID_BORDER: Color = Color::RED;
