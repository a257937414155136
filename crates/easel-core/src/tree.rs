//! Arena storage for the view tree.
//!
//! Views are owned by a [`ViewTree`] and addressed by [`ViewId`] handles.
//! Parent/child links are ids, so a child is owned through its parent's child
//! list and destroyed with it. While a view's own callback runs, its boxed
//! `View` is checked out of the node; lookups of that view report
//! [`Error::ViewBusy`] until it is put back.

use std::borrow::Cow;

use slotmap::{SlotMap, new_key_type};

use crate::command::{CommandKind, Listener, ListenerId, Listeners};
use crate::view::{downcast_mut, downcast_ref};
use crate::{Error, Point, Rect, Result, Size, View};

new_key_type! {
    /// Stable handle to a view in a [`ViewTree`].
    pub struct ViewId;
}

pub struct Node {
    pub(crate) view: Option<Box<dyn View>>,
    pub(crate) parent: Option<ViewId>,
    pub(crate) children: Vec<ViewId>,
    pub(crate) size: Size,
    pub(crate) position: Point,
    pub(crate) visible: bool,
    pub(crate) hflex: bool,
    pub(crate) vflex: bool,
    pub(crate) name: Cow<'static, str>,
    pub(crate) listeners: Listeners,
}

impl Node {
    fn new(view: Box<dyn View>) -> Self {
        let flex = view.flex();
        let name = Cow::Borrowed(view.kind());
        Self {
            view: Some(view),
            parent: None,
            children: Vec::new(),
            size: Size::ZERO,
            position: Point::ZERO,
            visible: true,
            hflex: flex.h,
            vflex: flex.v,
            name,
            listeners: Listeners::default(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }
    pub fn position(&self) -> Point {
        self.position
    }
    /// Bounds in the parent's coordinate space.
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }
    pub fn visible(&self) -> bool {
        self.visible
    }
    pub fn hflex(&self) -> bool {
        self.hflex
    }
    pub fn vflex(&self) -> bool {
        self.vflex
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }
    pub fn children(&self) -> &[ViewId] {
        &self.children
    }
    /// The view, unless it is checked out for one of its own callbacks.
    pub fn view(&self) -> Option<&dyn View> {
        self.view.as_deref()
    }
}

#[derive(Default)]
pub struct ViewTree {
    nodes: SlotMap<ViewId, Node>,
    root: Option<ViewId>,
    next_listener: u64,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a detached view to the arena.
    pub fn insert(&mut self, view: impl View) -> ViewId {
        self.insert_boxed(Box::new(view))
    }

    pub fn insert_boxed(&mut self, view: Box<dyn View>) -> ViewId {
        self.nodes.insert(Node::new(view))
    }

    pub fn root(&self) -> Option<ViewId> {
        self.root
    }

    /// Replaces the root, destroying the previous root's subtree.
    pub fn set_root(&mut self, id: ViewId) -> Result<()> {
        let node = self.nodes.get(id).ok_or(Error::UnknownView(id))?;
        if node.parent.is_some() {
            self.detach_from_parent(id);
        }
        if let Some(old) = self.root.replace(id) {
            if old != id {
                self.destroy(old);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: ViewId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: ViewId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    fn get(&self, id: ViewId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::UnknownView(id))
    }

    fn get_mut(&mut self, id: ViewId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::UnknownView(id))
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `child` is a direct child of `parent`.
    pub fn find_child(&self, parent: ViewId, child: ViewId) -> bool {
        self.children(parent).contains(&child)
    }

    pub fn is_ancestor(&self, ancestor: ViewId, mut id: ViewId) -> bool {
        while let Some(p) = self.parent(id) {
            if p == ancestor {
                return true;
            }
            id = p;
        }
        false
    }

    /// Attaches `child` under `parent` at `index` (clamped), or at the end.
    /// A child that already has a parent is moved.
    pub fn attach(&mut self, parent: ViewId, child: ViewId, index: Option<usize>) -> Result<()> {
        self.get(parent)?;
        self.get(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::Cycle { parent, child });
        }
        if self.root == Some(child) {
            self.root = None;
        }
        self.detach_from_parent(child);
        let node = self.get_mut(parent)?;
        let at = index.unwrap_or(node.children.len()).min(node.children.len());
        node.children.insert(at, child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Moves `child` to `index` (clamped) among its siblings, changing its
    /// z-order.
    pub fn move_child(&mut self, parent: ViewId, child: ViewId, index: usize) -> Result<()> {
        let node = self.get_mut(parent)?;
        let from = node
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(Error::NotAChild { parent, child })?;
        node.children.remove(from);
        let at = index.min(node.children.len());
        node.children.insert(at, child);
        Ok(())
    }

    fn detach_from_parent(&mut self, child: ViewId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = None;
        }
    }

    /// Removes `child` from `parent` and destroys its subtree. Returns the
    /// destroyed ids, or `None` when `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: ViewId, child: ViewId) -> Option<Vec<ViewId>> {
        if !self.find_child(parent, child) {
            return None;
        }
        self.detach_from_parent(child);
        Some(self.destroy(child))
    }

    /// Destroys every child of `parent`. Returns the destroyed ids.
    pub fn clear_children(&mut self, parent: ViewId) -> Vec<ViewId> {
        let children = match self.nodes.get_mut(parent) {
            Some(n) => std::mem::take(&mut n.children),
            None => return Vec::new(),
        };
        let mut removed = Vec::new();
        for child in children {
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
            }
            removed.extend(self.destroy(child));
        }
        removed
    }

    /// Drops `id` and all of its descendants from the arena.
    pub(crate) fn destroy(&mut self, id: ViewId) -> Vec<ViewId> {
        self.detach_from_parent(id);
        if self.root == Some(id) {
            self.root = None;
        }
        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
                removed.push(next);
            }
        }
        removed
    }

    pub fn size(&self, id: ViewId) -> Size {
        self.nodes.get(id).map(|n| n.size).unwrap_or_default()
    }

    pub fn position(&self, id: ViewId) -> Point {
        self.nodes.get(id).map(|n| n.position).unwrap_or_default()
    }

    pub fn visible(&self, id: ViewId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.visible)
    }

    pub fn name(&self, id: ViewId) -> Option<&str> {
        self.nodes.get(id).map(|n| n.name())
    }

    pub(crate) fn set_size(&mut self, id: ViewId, size: Size) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.size = size;
        }
    }

    pub fn set_position(&mut self, id: ViewId, position: Point) -> Result<()> {
        self.get_mut(id)?.position = position;
        Ok(())
    }

    pub fn set_visible(&mut self, id: ViewId, visible: bool) -> Result<()> {
        self.get_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn set_hflex(&mut self, id: ViewId, flex: bool) -> Result<()> {
        self.get_mut(id)?.hflex = flex;
        Ok(())
    }

    pub fn set_vflex(&mut self, id: ViewId, flex: bool) -> Result<()> {
        self.get_mut(id)?.vflex = flex;
        Ok(())
    }

    pub fn set_name(&mut self, id: ViewId, name: impl Into<Cow<'static, str>>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Depth-first search from the root; later children are searched first,
    /// so the top-most match wins.
    pub fn find_by_name(&self, name: &str) -> Option<ViewId> {
        self.root.and_then(|root| self.find_by_name_from(root, name))
    }

    pub fn find_by_name_from(&self, id: ViewId, name: &str) -> Option<ViewId> {
        let node = self.nodes.get(id)?;
        if node.name == name {
            return Some(id);
        }
        node.children
            .iter()
            .rev()
            .find_map(|&ch| self.find_by_name_from(ch, name))
    }

    /// Surface-space offset of `id`'s local origin: the sum of its own
    /// position and every ancestor's.
    pub fn origin(&self, id: ViewId) -> Point {
        let mut acc = Point::ZERO;
        let mut cur = Some(id);
        while let Some(c) = cur {
            let Some(node) = self.nodes.get(c) else { break };
            acc = acc + node.position;
            cur = node.parent;
        }
        acc
    }

    pub fn view_to_surface(&self, pt: Point, id: ViewId) -> Point {
        pt + self.origin(id)
    }

    pub fn surface_to_view(&self, pt: Point, id: ViewId) -> Point {
        pt - self.origin(id)
    }

    /// Ancestors of `id`, outermost first, followed by `id` itself.
    pub fn path_to(&self, id: ViewId) -> Vec<ViewId> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            if !self.contains(c) {
                break;
            }
            path.push(c);
            cur = self.parent(c);
        }
        path.reverse();
        path
    }

    pub fn view<T: View>(&self, id: ViewId) -> Result<&T> {
        let node = self.get(id)?;
        let view = node.view.as_deref().ok_or(Error::ViewBusy(id))?;
        downcast_ref::<T>(view).ok_or(Error::WrongViewType {
            id,
            expected: std::any::type_name::<T>(),
        })
    }

    pub fn view_mut<T: View>(&mut self, id: ViewId) -> Result<&mut T> {
        let node = self.get_mut(id)?;
        let view = node.view.as_deref_mut().ok_or(Error::ViewBusy(id))?;
        downcast_mut::<T>(view).ok_or(Error::WrongViewType {
            id,
            expected: std::any::type_name::<T>(),
        })
    }

    pub(crate) fn take_view(&mut self, id: ViewId) -> Result<Box<dyn View>> {
        self.get_mut(id)?.view.take().ok_or(Error::ViewBusy(id))
    }

    /// Puts a checked-out view back. A view whose node was destroyed while it
    /// was out is dropped here.
    pub(crate) fn put_view(&mut self, id: ViewId, view: Box<dyn View>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.view = Some(view);
        }
    }

    pub fn on(&mut self, id: ViewId, kind: CommandKind, listener: Listener) -> Result<ListenerId> {
        self.get(id)?;
        self.next_listener += 1;
        let lid = ListenerId(self.next_listener);
        self.get_mut(id)?.listeners.add(lid, kind, listener);
        Ok(lid)
    }

    /// Unregisters a listener. Returns `false` if it was not registered on `id`
    /// for `kind`.
    pub fn off(&mut self, id: ViewId, kind: CommandKind, listener: ListenerId) -> bool {
        self.nodes
            .get_mut(id)
            .is_some_and(|n| n.listeners.remove(listener, kind))
    }

    pub fn listener_count(&self, id: ViewId, kind: CommandKind) -> usize {
        self.nodes.get(id).map_or(0, |n| n.listeners.count(kind))
    }

    /// Pre-order walk from the root, with each node's depth.
    pub fn walk(&self, mut f: impl FnMut(ViewId, &Node, usize)) {
        let Some(root) = self.root else { return };
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            f(id, node, depth);
            for &ch in node.children.iter().rev() {
                stack.push((ch, depth + 1));
            }
        }
    }
}
