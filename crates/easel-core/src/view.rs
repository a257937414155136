use std::any::Any;

use crate::{DrawCx, EventCx, InputEvent, LayoutCx, Size};

/// Whether a view starts out flexible along each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flex {
    pub h: bool,
    pub v: bool,
}

impl Flex {
    pub const NONE: Flex = Flex { h: false, v: false };
    pub const H: Flex = Flex { h: true, v: false };
    pub const V: Flex = Flex { h: false, v: true };
    pub const BOTH: Flex = Flex { h: true, v: true };
}

/// The unit of the UI tree.
///
/// A view is stored in the [`ViewTree`](crate::ViewTree) arena; identity,
/// geometry, visibility, flex flags, name, children and listeners live on the
/// arena node, so implementors only carry their own state. Containers are
/// ordinary views whose node has children; they override the container hooks
/// (`clip_children`, `can_receive_mouse`) where the defaults don't fit.
pub trait View: Any {
    /// Computes and returns this view's size for the offered `available`
    /// size, positioning children through `cx`. The returned size is stored on
    /// the node by the caller.
    fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size;

    /// Paints the view with its top-left corner at the origin. Children are
    /// painted afterwards by the surface.
    fn draw(&self, _cx: &mut DrawCx<'_>) {}

    /// Handles one input event. Set `event.stop()` to keep it from the views
    /// further down the dispatch path.
    fn input(&mut self, _cx: &mut EventCx<'_>, _event: &mut InputEvent) {}

    /// Clip children to this view's bounds while drawing.
    fn clip_children(&self) -> bool {
        false
    }

    /// Whether the view may terminate a hit-test path when none of its
    /// children contain the pointer.
    fn can_receive_mouse(&self, _has_children: bool) -> bool {
        true
    }

    /// Flex flags the node starts with.
    fn flex(&self) -> Flex {
        Flex::NONE
    }

    /// Default node name, used until [`set_name`](crate::ViewTree::set_name) is called.
    fn kind(&self) -> &'static str {
        "view"
    }
}

pub(crate) fn downcast_ref<T: View>(view: &dyn View) -> Option<&T> {
    let any: &dyn Any = view;
    any.downcast_ref::<T>()
}

pub(crate) fn downcast_mut<T: View>(view: &mut dyn View) -> Option<&mut T> {
    let any: &mut dyn Any = view;
    any.downcast_mut::<T>()
}
