use std::fmt::Write as _;

use web_time::Instant;

use easel_core::{Canvas, Color, Overlay, Point, Rect, Surface, ViewId, ViewTree};

const HUD_TEXT: Color = Color(0xaa, 0xaa, 0xaa, 0xff);
const HUD_BG: Color = Color(0x20, 0x20, 0x20, 0xc0);
const LENS_OUTLINE: Color = Color(0x44, 0xaa, 0xff, 0xff);
const LENS_FOCUS: Color = Color(0xff, 0x88, 0x00, 0xff);

/// Frame counter with a smoothed frame rate, drawn in the top-left corner.
pub struct Hud {
    frame_count: u64,
    last_frame: Option<Instant>,
    fps_smooth: f32,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            last_frame: None,
            fps_smooth: 0.0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frame_count
    }

    pub fn fps(&self) -> f32 {
        self.fps_smooth
    }

    /// Counts a frame presented at `now`.
    pub fn tick(&mut self, now: Instant) {
        self.frame_count += 1;
        if let Some(prev) = self.last_frame.replace(now) {
            let dt = (now - prev).as_secs_f32();
            if dt > 0.0 {
                let fps = 1.0 / dt;
                // simple EMA
                let a = 0.2;
                self.fps_smooth = if self.fps_smooth == 0.0 {
                    fps
                } else {
                    (1.0 - a) * self.fps_smooth + a * fps
                };
            }
        }
    }

    pub fn text(&self) -> String {
        format!("frame: {}  |  fps: {:.1}", self.frame_count, self.fps_smooth)
    }
}

impl Overlay for Hud {
    fn draw(&mut self, _tree: &ViewTree, _focus: Option<ViewId>, canvas: &mut dyn Canvas) {
        self.tick(Instant::now());
        let text = self.text();
        let size = canvas.measure_text(&text, None);
        canvas.fill_rect(
            Rect::new(4.0, 4.0, size.width + 8.0, size.height + 8.0),
            HUD_BG,
        );
        canvas.fill_text(&text, Point::new(8.0, 8.0), None, HUD_TEXT);
    }
}

/// Outlines every visible view, optionally labelled with its name, size and
/// flex flags. The focus holder gets a second, inset outline.
pub struct DebugLens {
    pub labels: bool,
    pub outline: Color,
    pub focus: Color,
}

impl Default for DebugLens {
    fn default() -> Self {
        Self {
            labels: true,
            outline: LENS_OUTLINE,
            focus: LENS_FOCUS,
        }
    }
}

impl DebugLens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_labels(mut self) -> Self {
        self.labels = false;
        self
    }
}

fn shown(tree: &ViewTree, id: ViewId) -> bool {
    let mut cur = Some(id);
    while let Some(c) = cur {
        if !tree.visible(c) {
            return false;
        }
        cur = tree.parent(c);
    }
    true
}

fn flags(hflex: bool, vflex: bool) -> &'static str {
    match (hflex, vflex) {
        (true, true) => " hv",
        (true, false) => " h",
        (false, true) => " v",
        (false, false) => "",
    }
}

impl Overlay for DebugLens {
    fn draw(&mut self, tree: &ViewTree, focus: Option<ViewId>, canvas: &mut dyn Canvas) {
        let mut outlined = 0usize;
        tree.walk(|id, node, _depth| {
            if !shown(tree, id) {
                return;
            }
            let rect = Rect::from_pos_size(tree.origin(id), node.size());
            canvas.stroke_rect(rect, self.outline);
            outlined += 1;
            if focus == Some(id) {
                canvas.stroke_rect(
                    Rect::new(rect.x + 1.0, rect.y + 1.0, rect.w - 2.0, rect.h - 2.0),
                    self.focus,
                );
            }
            if self.labels {
                let size = node.size();
                let label = format!(
                    "{} {}x{}{}",
                    node.name(),
                    size.width,
                    size.height,
                    flags(node.hflex(), node.vflex())
                );
                canvas.fill_text(&label, Point::new(rect.x + 2.0, rect.y + 2.0), None, self.outline);
            }
        });
        log::trace!("debug lens outlined {outlined} views");
    }
}

/// One line per view, indented by depth:
/// `name @(x, y) WxH` followed by any of `hflex`, `vflex`, `hidden`, `focus`.
pub fn dump_tree<C: Canvas>(surface: &Surface<C>) -> String {
    let focus = surface.keyboard_focus();
    let mut lines = Vec::new();
    surface.tree().walk(|id, node, depth| {
        let mut line = String::new();
        let pos = node.position();
        let size = node.size();
        let _ = write!(
            line,
            "{:indent$}{} @({}, {}) {}x{}",
            "",
            node.name(),
            pos.x,
            pos.y,
            size.width,
            size.height,
            indent = depth * 2
        );
        for (on, flag) in [
            (node.hflex(), "hflex"),
            (node.vflex(), "vflex"),
            (!node.visible(), "hidden"),
            (focus == Some(id), "focus"),
        ] {
            if on {
                line.push(' ');
                line.push_str(flag);
            }
        }
        lines.push(line);
    });
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use easel_core::*;
    use easel_ui::*;

    fn sample() -> (Surface<SceneCanvas>, ViewId, ViewId) {
        let mut s = Surface::new(SurfaceConfig::new(300.0, 200.0), SceneCanvas::new());
        let root = s.set_root(vbox());
        s.add_child(root, Label::new("Hi")).unwrap();
        let row = s.add_child(root, hbox()).unwrap();
        s.set_name(row, "row").unwrap();
        let ok = s.add_child(row, ActionButton::new("OK")).unwrap();
        let grow = s.add_child(row, GrowPanel::new()).unwrap();
        s.set_visible(grow, false).unwrap();
        s.set_keyboard_focus(ok).unwrap();
        s.layout().unwrap();
        (s, ok, grow)
    }

    #[test]
    fn dump_lists_geometry_and_flags() {
        let (s, _, _) = sample();
        insta::assert_snapshot!(dump_tree(&s), @r"
        vbox @(0, 0) 300x200
          label @(0, 0) 26x26
          row @(0, 26) 300x174
            button @(0, 0) 26x26 focus
            grow @(26, 0) 274x174 hflex vflex hidden
        ");
    }

    #[test]
    fn hud_smooths_frame_rate() {
        let mut hud = Hud::new();
        let t0 = Instant::now();
        hud.tick(t0);
        assert_eq!(hud.fps(), 0.0);
        hud.tick(t0 + Duration::from_millis(100));
        assert!((hud.fps() - 10.0).abs() < 0.01);
        hud.tick(t0 + Duration::from_millis(150));
        assert!((hud.fps() - 12.0).abs() < 0.01);
        assert_eq!(hud.frames(), 3);
        assert!(hud.text().starts_with("frame: 3  |  fps: 12.0"));
    }

    #[test]
    fn overlays_draw_after_the_tree() {
        let (mut s, ok, grow) = sample();
        s.add_overlay(DebugLens::new());
        s.add_overlay(Hud::new());
        s.repaint();

        let scene = s.canvas().scene();
        let outlines = scene.borders().filter(|(_, c)| *c == LENS_OUTLINE).count();
        assert_eq!(outlines, 4);
        assert_eq!(scene.borders().filter(|(_, c)| *c == LENS_FOCUS).count(), 1);
        assert!(scene.texts().any(|t| t == "button 26x26"));
        assert!(scene.texts().all(|t| !t.starts_with("grow")));
        assert!(scene.texts().last().is_some_and(|t| t.starts_with("frame: 1")));
        assert_eq!(s.overlay::<Hud>().map(Hud::frames), Some(1));

        s.set_visible(grow, true).unwrap();
        s.overlay_mut::<DebugLens>().unwrap().labels = false;
        s.repaint();
        let scene = s.canvas().scene();
        assert_eq!(scene.borders().filter(|(_, c)| *c == LENS_OUTLINE).count(), 5);
        assert!(!scene.texts().any(|t| t.starts_with("button")));
        assert!(s.is_keyboard_focus(ok));
    }
}
