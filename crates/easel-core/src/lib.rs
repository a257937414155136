//! # Views, layout and input routing
//!
//! Easel is a retained-mode toolkit: the application builds a tree of views
//! once, mutates them in response to input, and lets the [`Surface`] lay out
//! and redraw the tree on demand.
//!
//! ## The tree
//!
//! Views live in an arena ([`ViewTree`]) and are addressed by [`ViewId`].
//! A node owns its children; removing a child destroys its whole subtree.
//!
//! ```rust
//! use easel_core::*;
//!
//! struct Square(f32);
//!
//! impl View for Square {
//!     fn layout(&mut self, _cx: &mut LayoutCx<'_>, _available: Size) -> Size {
//!         Size::new(self.0, self.0)
//!     }
//!     fn draw(&self, cx: &mut DrawCx<'_>) {
//!         cx.fill_background(Color::RED);
//!     }
//! }
//!
//! let mut surface = Surface::new(SurfaceConfig::new(200.0, 100.0), SceneCanvas::new());
//! let root = surface.set_root(Square(50.0));
//! surface.repaint();
//! assert_eq!(surface.tree().size(root), Size::new(50.0, 50.0));
//! ```
//!
//! ## Input
//!
//! Pointer presses are hit-tested against the laid-out tree. The path from
//! just below the root to the deepest hit view is captured for the whole
//! gesture, so drags and the release reach the same views even when the
//! pointer leaves them. Keyboard and clipboard input go straight to the view
//! holding keyboard focus.
//!
//! Handlers get an [`EventCx`] for surface services: focus, repaint requests,
//! firing commands, and tree edits (which are applied once dispatch ends).
//!
//! ## Commands
//!
//! Views publish semantic events ([`CommandKind::Action`],
//! [`CommandKind::Change`]) to listeners registered with [`Surface::on`]:
//!
//! ```rust
//! use easel_core::*;
//! # struct Square;
//! # impl View for Square {
//! #     fn layout(&mut self, _cx: &mut LayoutCx<'_>, _a: Size) -> Size { Size::new(10.0, 10.0) }
//! # }
//! let mut surface = Surface::new(SurfaceConfig::default(), SceneCanvas::new());
//! let root = surface.set_root(Square);
//! let id = surface.on(root, CommandKind::Action, |_cx, ev| {
//!     log::info!("action from {:?}", ev.source);
//! }).unwrap();
//! surface.fire(root, CommandKind::Action, Payload::None).unwrap();
//! assert!(surface.off(root, CommandKind::Action, id));
//! ```

pub mod color;
pub mod command;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod input;
pub mod prelude;
pub mod render_api;
pub mod scene;
pub mod surface;
pub mod tree;
pub mod view;

mod tests;

pub use color::*;
pub use command::{CommandEvent, CommandKind, Listener, ListenerId, Payload};
pub use context::{DrawCx, EventCx, LayoutCx};
pub use dispatch::{Dispatched, FocusState, HitPath, PointerState, hit_test};
pub use error::{Error, Result};
pub use geometry::*;
pub use input::*;
pub use render_api::*;
pub use scene::{GlyphMetrics, Scene, SceneCanvas, SceneNode};
pub use surface::{Overlay, Surface, SurfaceConfig};
pub use tree::{Node, ViewId, ViewTree};
pub use view::{Flex, View};
