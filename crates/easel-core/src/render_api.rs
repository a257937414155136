use crate::{Color, Point, Rect, Size};

/// Opaque handle to an image the backend knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// The drawing surface the toolkit renders onto.
///
/// Coordinates are logical pixels relative to the current transform. The
/// surface pushes a `save`/`translate`/`restore` frame around every view, so a
/// view always draws with its own top-left corner at the origin.
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color);

    /// Size of `text` in the named font, or the standard font when `font` is `None`
    /// or unknown.
    fn measure_text(&self, text: &str, font: Option<&str>) -> Size;
    /// Draws text with its top-left corner at `pos`.
    fn fill_text(&mut self, text: &str, pos: Point, font: Option<&str>, color: Color);
    fn draw_image(&mut self, image: ImageHandle, pos: Point, scale: f32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, by: Point);
    fn scale(&mut self, factor: f32);
    /// Intersects the current clip with `rect`, until the matching `restore`.
    fn clip(&mut self, rect: Rect);
}
