//! A button that opens a menu of choices in the popup layer.

use easel_core::*;

use crate::button::ActionButton;
use crate::layer::{POPUP_LAYER, PopupContainer};
use crate::stack::vbox;
use crate::style::PADDING;

/// Fires [`CommandKind::Action`] on release, then opens its items as a column
/// of buttons in the surface's [`PopupLayer`](crate::PopupLayer), just below
/// itself. Picking an item closes the menu and fires
/// [`CommandKind::Change`] with the item's index.
pub struct DropdownButton {
    caption: String,
    items: Vec<String>,
    selected: Option<usize>,
    active: bool,
}

impl DropdownButton {
    pub fn new<I, S>(caption: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            caption: caption.into(),
            items: items.into_iter().map(Into::into).collect(),
            selected: None,
            active: false,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.selected = None;
    }

    /// Index of the last item picked.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn open(&self, cx: &mut EventCx<'_>) {
        let Some(layer) = cx.find_by_name(POPUP_LAYER) else {
            log::warn!("dropdown has no {POPUP_LAYER} to open in");
            return;
        };
        let me = cx.id();
        let below = cx.view_to_surface(Point::new(0.0, cx.size().height), me);
        let at = cx.surface_to_view(below, layer);

        let popup = cx.add_child(layer, PopupContainer::new());
        if let Err(e) = cx.set_position(popup, at) {
            log::warn!("dropdown popup: {e}");
        }
        let column = cx.add_child(popup, vbox());
        for (index, item) in self.items.iter().enumerate() {
            let button = cx.add_child(column, ActionButton::new(item.clone()));
            let hooked = cx.on(button, CommandKind::Action, move |cx, _| {
                if let Ok(dropdown) = cx.view_mut::<DropdownButton>(me) {
                    dropdown.selected = Some(index);
                }
                cx.fire_from(me, CommandKind::Change, Payload::Index(index));
                cx.remove_child(layer, popup);
                cx.request_repaint();
            });
            if let Err(e) = hooked {
                log::warn!("dropdown item {index}: {e}");
            }
        }
        log::debug!("dropdown opened {} items at {at:?}", self.items.len());
    }
}

impl View for DropdownButton {
    fn layout(&mut self, cx: &mut LayoutCx<'_>, _available: Size) -> Size {
        cx.measure_text(&self.caption, None).grow(PADDING)
    }

    fn draw(&self, cx: &mut DrawCx<'_>) {
        let bg = if self.active {
            palette::BUTTON_BG_ACTIVE
        } else {
            palette::BUTTON_BG
        };
        cx.fill_background(bg);
        cx.stroke_background(palette::BUTTON_BORDER);
        cx.fill_text(&self.caption, Point::new(PADDING, PADDING), palette::TEXT);
    }

    fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
        if event.is_pointer_down() {
            self.active = true;
            cx.request_repaint();
        } else if event.is_pointer_up() {
            self.active = false;
            cx.fire(CommandKind::Action, Payload::None);
            self.open(cx);
            cx.request_repaint();
        }
    }

    fn kind(&self) -> &'static str {
        "dropdown-button"
    }
}
