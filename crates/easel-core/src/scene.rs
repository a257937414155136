//! A recording [`Canvas`] that keeps a flattened display list.
//!
//! Every command is resolved against the current transform, so recorded
//! rectangles are in surface coordinates (device pixels once the surface
//! scale is applied). Headless hosts and tests use it to assert what was drawn
//! and where.

use std::collections::HashMap;

use crate::{Canvas, Color, ImageHandle, Point, Rect, Size};

/// Renderable scene
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
    },
    Border {
        rect: Rect,
        color: Color,
    },
    Text {
        rect: Rect,
        text: String,
        color: Color,
    },
    Image {
        image: ImageHandle,
        rect: Rect,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}

impl Scene {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Bounds of the first text run equal to `text`.
    pub fn find_text(&self, text: &str) -> Option<Rect> {
        self.nodes.iter().find_map(|n| match n {
            SceneNode::Text { rect, text: t, .. } if t == text => Some(*rect),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Rect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
    }

    pub fn borders(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Border { rect, color } => Some((*rect, *color)),
            _ => None,
        })
    }
}

/// Fixed-advance text metrics for a named font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self {
            advance: 8.0,
            line_height: 16.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct State {
    origin: Point,
    scale: f32,
    clips: usize,
}

impl Default for State {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            scale: 1.0,
            clips: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct SceneCanvas {
    scene: Scene,
    state: State,
    stack: Vec<State>,
    standard: GlyphMetrics,
    fonts: HashMap<String, GlyphMetrics>,
}

impl SceneCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, name: impl Into<String>, metrics: GlyphMetrics) -> Self {
        self.fonts.insert(name.into(), metrics);
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Depth of the save stack; zero between frames.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn metrics(&self, font: Option<&str>) -> GlyphMetrics {
        font.and_then(|f| self.fonts.get(f))
            .copied()
            .unwrap_or(self.standard)
    }

    fn map(&self, rect: Rect) -> Rect {
        let s = self.state.scale;
        Rect::new(
            self.state.origin.x + rect.x * s,
            self.state.origin.y + rect.y * s,
            rect.w * s,
            rect.h * s,
        )
    }
}

impl Canvas for SceneCanvas {
    fn clear(&mut self, color: Color) {
        self.scene.nodes.clear();
        self.scene.clear_color = color;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.map(rect);
        self.scene.nodes.push(SceneNode::Rect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.map(rect);
        self.scene.nodes.push(SceneNode::Border { rect, color });
    }

    fn measure_text(&self, text: &str, font: Option<&str>) -> Size {
        let m = self.metrics(font);
        Size::new(text.chars().count() as f32 * m.advance, m.line_height)
    }

    fn fill_text(&mut self, text: &str, pos: Point, font: Option<&str>, color: Color) {
        let size = self.measure_text(text, font);
        let rect = self.map(Rect::from_pos_size(pos, size));
        self.scene.nodes.push(SceneNode::Text {
            rect,
            text: text.to_string(),
            color,
        });
    }

    fn draw_image(&mut self, image: ImageHandle, pos: Point, scale: f32) {
        // Image sizes are unknown to a recorder; only the anchor is kept.
        let rect = self.map(Rect::new(pos.x, pos.y, 0.0, 0.0));
        let rect = Rect { w: scale, h: scale, ..rect };
        self.scene.nodes.push(SceneNode::Image { image, rect });
    }

    fn save(&mut self) {
        self.stack.push(self.state);
        self.state.clips = 0;
    }

    fn restore(&mut self) {
        for _ in 0..self.state.clips {
            self.scene.nodes.push(SceneNode::PopClip);
        }
        match self.stack.pop() {
            Some(prev) => self.state = prev,
            None => {
                log::warn!("SceneCanvas: restore without matching save");
                self.state = State::default();
            }
        }
    }

    fn translate(&mut self, by: Point) {
        let s = self.state.scale;
        self.state.origin = self.state.origin + Point::new(by.x * s, by.y * s);
    }

    fn scale(&mut self, factor: f32) {
        self.state.scale *= factor;
    }

    fn clip(&mut self, rect: Rect) {
        let rect = self.map(rect);
        self.state.clips += 1;
        self.scene.nodes.push(SceneNode::PushClip { rect });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transforms_accumulate_and_restore() {
        let mut c = SceneCanvas::new();
        c.save();
        c.scale(2.0);
        c.translate(Point::new(10.0, 5.0));
        c.fill_rect(Rect::new(1.0, 1.0, 4.0, 4.0), Color::RED);
        c.restore();
        c.fill_rect(Rect::new(1.0, 1.0, 4.0, 4.0), Color::BLACK);

        let fills: Vec<_> = c.scene().fills().collect();
        assert_eq!(fills[0].0, Rect::new(22.0, 12.0, 8.0, 8.0));
        assert_eq!(fills[1].0, Rect::new(1.0, 1.0, 4.0, 4.0));
        assert_eq!(c.depth(), 0);
    }

    #[test]
    fn clip_is_popped_on_restore() {
        let mut c = SceneCanvas::new();
        c.save();
        c.clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        c.restore();
        assert_eq!(
            c.scene().nodes,
            vec![
                SceneNode::PushClip {
                    rect: Rect::new(0.0, 0.0, 10.0, 10.0)
                },
                SceneNode::PopClip
            ]
        );
    }

    #[test]
    fn named_fonts_use_their_metrics() {
        let c = SceneCanvas::new().with_font(
            "big",
            GlyphMetrics {
                advance: 10.0,
                line_height: 20.0,
            },
        );
        assert_eq!(c.measure_text("abc", None), Size::new(24.0, 16.0));
        assert_eq!(c.measure_text("abc", Some("big")), Size::new(30.0, 20.0));
        assert_eq!(c.measure_text("abc", Some("missing")), Size::new(24.0, 16.0));
    }
}
