#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);
    pub const RED: Color = Color(255, 0, 0, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }
    /// Parses `#rrggbb` or `#rrggbbaa`. Anything else becomes opaque black.
    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let channel = |i: usize, default: u8| {
            s.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(default)
        };
        match s.len() {
            6 => Color(channel(0, 0), channel(2, 0), channel(4, 0), 255),
            8 => Color(channel(0, 0), channel(2, 0), channel(4, 0), channel(6, 255)),
            _ => Color::BLACK,
        }
    }
    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }

    pub fn to_linear(self) -> [f32; 4] {
        fn srgb_to_linear(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        let r = srgb_to_linear(self.0 as f32 / 255.0);
        let g = srgb_to_linear(self.1 as f32 / 255.0);
        let b = srgb_to_linear(self.2 as f32 / 255.0);
        let a = self.3 as f32 / 255.0;
        [r, g, b, a]
    }
}

/// Stock palette shared by the built-in views.
pub mod palette {
    use super::Color;

    pub const CLEAR: Color = Color::from_rgb(0xf0, 0xf0, 0xf0);
    pub const TEXT: Color = Color::BLACK;
    pub const BUTTON_BG: Color = Color::from_rgb(0xee, 0xee, 0xee);
    pub const BUTTON_BG_ACTIVE: Color = Color::from_rgb(0xaa, 0xaa, 0xaa);
    pub const BUTTON_BG_SELECTED: Color = Color::from_rgb(0xcc, 0xcc, 0xff);
    pub const BUTTON_BORDER: Color = Color::BLACK;
    pub const SELECTION: Color = Color::from_rgb(0x88, 0xaa, 0xff);
    pub const FIELD_BG: Color = Color::from_rgb(0xdd, 0xdd, 0xdd);
    pub const FIELD_BG_FOCUSED: Color = Color::WHITE;
    pub const DEBUG_BOUNDS: Color = Color::RED;
}
