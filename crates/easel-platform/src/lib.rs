//! Input adapters for Easel.
//!
//! The core only understands typed input calls on a [`Surface`]. This crate
//! turns host input into those calls: [`Script`] replays a line-oriented
//! input script (handy for headless tests and bug reports), and with the
//! `winit` feature [`WinitInput`] translates window events.
//!
//! ```rust
//! use easel_core::*;
//! use easel_platform::Script;
//!
//! struct Pad;
//! impl View for Pad {
//!     fn layout(&mut self, _cx: &mut LayoutCx<'_>, available: Size) -> Size {
//!         available
//!     }
//! }
//!
//! let mut surface = Surface::new(SurfaceConfig::new(100.0, 100.0), SceneCanvas::new());
//! surface.set_root(Pad);
//! let script: Script = "resize 200 150\nrepaint".parse().unwrap();
//! script.replay(&mut surface).unwrap();
//! assert_eq!(surface.logical_size(), Size::new(200.0, 150.0));
//! ```
//!
//! [`Surface`]: easel_core::Surface

pub mod script;
#[cfg(feature = "winit")]
pub mod winit_input;

pub use script::{Replay, Script, Step};
#[cfg(feature = "winit")]
pub use winit_input::WinitInput;

/// Installs `env_logger`, honoring `RUST_LOG` and defaulting to `warn`.
/// Calling it more than once is harmless.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("logger already installed");
    }
}
