//! Stock views for Easel: stacks, layers, popups and dialogs, buttons,
//! lists, text and number entry, and scrolling.
//!
//! Every view here is an ordinary [`easel_core::View`]; insert them into a
//! [`easel_core::Surface`] and wire them up with command listeners.
//!
//! ```rust
//! use easel_core::*;
//! use easel_ui::*;
//!
//! let mut surface = Surface::new(SurfaceConfig::new(300.0, 100.0), SceneCanvas::new());
//! let root = surface.set_root(hbox().pad(0.0));
//! let ok = surface.add_child(root, ActionButton::new("OK")).unwrap();
//! surface.on(ok, CommandKind::Action, |_cx, _ev| log::info!("ok")).unwrap();
//! surface.repaint();
//! assert!(surface.canvas().scene().find_text("OK").is_some());
//! ```

pub mod button;
pub mod dropdown;
pub mod label;
pub mod layer;
pub mod list;
pub mod number;
pub mod panel;
pub mod scroll;
pub mod stack;
pub mod style;
pub mod textline;

pub use button::{ActionButton, IconButton, Indicator, SelectButton, ToggleButton};
pub use dropdown::DropdownButton;
pub use label::Label;
pub use layer::{
    DIALOG_LAYER, DialogContainer, DialogLayer, LayerView, POPUP_LAYER, PopupContainer, PopupLayer,
};
pub use list::SelectList;
pub use number::{NumberLine, NumberLineParts};
pub use panel::{GrowPanel, Spacer};
pub use scroll::{ScrollBar, ScrollPane, ScrollView, ScrollViewParts};
pub use stack::{Align, Axis, Stack, hbox, vbox};
pub use textline::{TextLine, TextLineState};
