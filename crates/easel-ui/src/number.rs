//! Integer entry: a text line with step buttons.

use easel_core::*;

use crate::button::IconButton;
use crate::stack::{Stack, hbox};
use crate::style::{INVALID_BORDER, NUMBER_PAD};
use crate::textline::TextLine;

/// Ids of the views [`NumberLine::add_to`] creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberLineParts {
    pub view: ViewId,
    pub line: ViewId,
    pub up: ViewId,
    pub down: ViewId,
}

impl NumberLineParts {
    /// Replaces the text with `value`, as if it had been typed.
    pub fn set_value<C: Canvas>(&self, surface: &mut Surface<C>, value: i64) -> Result<()> {
        surface.with_view_mut::<TextLine, _>(self.line, |line, cx| {
            line.replace_text(cx, value.to_string())
        })
    }
}

/// A [`TextLine`] holding an integer, followed by up and down
/// [`IconButton`]s that step it by one.
///
/// Every edit that parses as an integer updates the value and fires
/// [`CommandKind::Change`] with [`Payload::Number`] from the number line.
/// Text that does not parse keeps the last value and draws a red border until
/// it is fixed.
pub struct NumberLine {
    stack: Stack,
    value: i64,
    valid: bool,
}

impl Default for NumberLine {
    fn default() -> Self {
        Self {
            stack: hbox().pad(NUMBER_PAD),
            value: 0,
            valid: true,
        }
    }
}

impl NumberLine {
    pub fn add_to<C: Canvas>(surface: &mut Surface<C>, parent: ViewId) -> Result<NumberLineParts> {
        let view = surface.add_child(parent, NumberLine::default())?;
        let line = surface.add_child(view, TextLine::new("0"))?;
        let up = surface.add_child(view, IconButton::new('\u{2191}'))?;
        let down = surface.add_child(view, IconButton::new('\u{2193}'))?;

        surface.on(line, CommandKind::Change, move |cx, ev| {
            let Some(text) = ev.payload.as_text() else { return };
            let parsed = text.trim().parse::<i64>().ok();
            match cx.view_mut::<NumberLine>(view) {
                Ok(number) => {
                    number.valid = parsed.is_some();
                    if let Some(v) = parsed {
                        number.value = v;
                    }
                }
                Err(e) => {
                    log::warn!("number line: {e}");
                    return;
                }
            }
            match parsed {
                Some(v) => cx.fire_from(view, CommandKind::Change, Payload::Number(v as f64)),
                None => log::debug!("not a number: {text:?}"),
            }
        })?;
        surface.on(up, CommandKind::Action, move |cx, _| step(cx, view, line, 1))?;
        surface.on(down, CommandKind::Action, move |cx, _| step(cx, view, line, -1))?;

        Ok(NumberLineParts {
            view,
            line,
            up,
            down,
        })
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Whether the text currently parses as an integer.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

fn step(cx: &mut EventCx<'_>, view: ViewId, line: ViewId, by: i64) {
    let Ok(current) = cx.view::<NumberLine>(view).map(NumberLine::value) else {
        return;
    };
    let next = current.saturating_add(by);
    if let Err(e) = cx.with_view_mut::<TextLine, _>(line, |line, cx| {
        line.replace_text(cx, next.to_string())
    }) {
        log::warn!("number line step: {e}");
    }
}

impl View for NumberLine {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
        self.stack.layout(cx, available)
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        self.stack.draw(cx);
        if !self.valid {
            cx.stroke_background(INVALID_BORDER);
        }
    }

    fn kind(&self) -> &'static str {
        "number-line"
    }
}
