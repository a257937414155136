pub use crate::color::{Color, palette};
pub use crate::command::{CommandEvent, CommandKind, ListenerId, Payload};
pub use crate::context::{DrawCx, EventCx, LayoutCx};
pub use crate::error::{Error, Result};
pub use crate::geometry::{Point, Rect, Size};
pub use crate::input::{
    ClipboardAction, FocusEvent, InputEvent, InputKind, Key, KeyEvent, Modifiers, PointerButton,
    PointerPhase,
};
pub use crate::render_api::Canvas;
pub use crate::scene::SceneCanvas;
pub use crate::surface::{Surface, SurfaceConfig};
pub use crate::tree::ViewId;
pub use crate::view::{Flex, View};
