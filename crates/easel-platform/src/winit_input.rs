//! Translation of winit window events into [`Surface`] input.

use easel_core::*;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key as WinitKey, PhysicalKey};

/// Pixels per wheel line.
const LINE_DELTA: f32 = 40.0;

/// Tracks the cursor and modifier state winit reports separately from the
/// events that need them.
pub struct WinitInput {
    cursor: Point,
    modifiers: Modifiers,
    scale: f64,
}

impl WinitInput {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            cursor: Point::ZERO,
            modifiers: Modifiers::empty(),
            scale: scale_factor,
        }
    }

    /// Last cursor position in logical pixels.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    fn logical(&self, x: f64, y: f64) -> Point {
        Point::new((x / self.scale) as f32, (y / self.scale) as f32)
    }

    /// Applies one window event. Returns `false` for events that have no
    /// meaning for the surface.
    pub fn handle<C: Canvas>(&mut self, surface: &mut Surface<C>, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Resized(size) => {
                let logical = self.logical(size.width.into(), size.height.into());
                surface.set_logical_size(Size::new(logical.x, logical.y));
                surface.repaint();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::debug!("scale factor {} -> {scale_factor}", self.scale);
                self.scale = *scale_factor;
                surface.set_scale(*scale_factor as f32);
            }
            WindowEvent::RedrawRequested => surface.repaint(),
            WindowEvent::ModifiersChanged(mods) => {
                let state = mods.state();
                let mut m = Modifiers::empty();
                m.set(Modifiers::SHIFT, state.shift_key());
                m.set(Modifiers::CTRL, state.control_key());
                m.set(Modifiers::ALT, state.alt_key());
                m.set(Modifiers::META, state.super_key());
                self.modifiers = m;
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = self.logical(position.x, position.y);
                surface.pointer_move(self.cursor, self.modifiers);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_button(*button);
                match state {
                    ElementState::Pressed => {
                        surface.pointer_down(self.cursor, button, self.modifiers);
                    }
                    ElementState::Released => {
                        surface.pointer_up(self.cursor, button, self.modifiers);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => Point::new(-x * LINE_DELTA, -y * LINE_DELTA),
                    MouseScrollDelta::PixelDelta(p) => {
                        let p = self.logical(p.x, p.y);
                        Point::new(-p.x, -p.y)
                    }
                };
                surface.wheel(self.cursor, delta, self.modifiers);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let key = map_key(&event.logical_key);
                let code = match event.physical_key {
                    PhysicalKey::Code(code) => format!("{code:?}"),
                    PhysicalKey::Unidentified(_) => String::new(),
                };
                let mut ev = match event.state {
                    ElementState::Pressed => KeyEvent::down(key, code, self.modifiers),
                    ElementState::Released => KeyEvent::up(key, code, self.modifiers),
                };
                ev.repeat = event.repeat;
                surface.key(ev);
            }
            _ => return false,
        }
        true
    }
}

pub fn map_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Tertiary,
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(n) => PointerButton::Other(n),
    }
}

/// Maps winit's logical key. Named keys go through [`Key::from_name`], which
/// shares winit's spelling for the keys Easel knows.
pub fn map_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => Key::from_name(&format!("{named:?}")),
        WinitKey::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Character(c),
                _ => Key::Unidentified(s.to_string()),
            }
        }
        other => Key::Unidentified(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;
    use winit::keyboard::{ModifiersState, NamedKey};

    struct Fixed;

    impl View for Fixed {
        fn layout(&mut self, _cx: &mut LayoutCx<'_>, available: Size) -> Size {
            available
        }
    }

    #[test]
    fn named_keys_share_easel_spelling() {
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Enter)), Key::Enter);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::ArrowLeft)), Key::ArrowLeft);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Space)), Key::Character(' '));
        assert_eq!(map_key(&WinitKey::Named(NamedKey::F7)), Key::F(7));
        assert_eq!(map_key(&WinitKey::Character("q".into())), Key::Character('q'));
        assert!(matches!(
            map_key(&WinitKey::Named(NamedKey::CapsLock)),
            Key::Unidentified(_)
        ));
    }

    #[test]
    fn resize_divides_by_scale() {
        let mut surface = Surface::new(SurfaceConfig::default(), SceneCanvas::new());
        surface.set_root(Fixed);
        let mut input = WinitInput::new(2.0);
        assert!(input.handle(&mut surface, &WindowEvent::Resized(PhysicalSize::new(800, 600))));
        assert_eq!(surface.logical_size(), Size::new(400.0, 300.0));
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn modifiers_are_tracked() {
        let mut surface = Surface::new(SurfaceConfig::default(), SceneCanvas::new());
        let mut input = WinitInput::new(1.0);
        let state = ModifiersState::CONTROL | ModifiersState::SHIFT;
        input.handle(&mut surface, &WindowEvent::ModifiersChanged(state.into()));
        assert_eq!(input.modifiers(), Modifiers::CTRL | Modifiers::SHIFT);
        assert!(!input.handle(&mut surface, &WindowEvent::Focused(true)));
    }
}
