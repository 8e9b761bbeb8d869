//! Rotations and the insert/erase fixup loops.
//!
//! `rotate` and `zigzag` only rewire links. The fixups recolor and then
//! restore subtree sizes: the promoted node inherits the size of the position
//! it took over, the demoted nodes are recounted from their new children.

use super::handle::Handle;
use super::node::{Color, Direction};
use super::raw_osrbtree_map::RawOSRBTreeMap;
use super::size::Size;
use crate::tracing_helpers::trace_log;

impl<K, V> RawOSRBTreeMap<K, V> {
    /// `h`'s child on side `dir`, if there is one and it is red.
    #[inline]
    fn red_child(&self, h: Handle, dir: Direction) -> Option<Handle> {
        self.child(h, dir).filter(|&c| self.link(c).is_red())
    }

    #[inline]
    fn set_color(&mut self, h: Handle, color: Color) {
        self.link_mut(h).color = color;
    }

    #[inline]
    pub(crate) fn size_of(&self, h: Option<Handle>) -> Size {
        h.map_or(Size::ZERO, |h| self.link(h).size)
    }

    /// Recomputes `h`'s size from its children.
    #[inline]
    pub(crate) fn recount(&mut self, h: Handle) {
        let left = self.size_of(self.child(h, Direction::Left));
        let right = self.size_of(self.child(h, Direction::Right));
        self.link_mut(h).size = Size::of_children(left, right);
    }

    /// Applies `f` to the size of `from` and of every ancestor up to and
    /// including the sentinel, whose size is the entry count.
    pub(crate) fn update_sizes_to_header(&mut self, from: Handle, f: impl Fn(Size) -> Size) {
        let mut h = from;
        loop {
            let link = self.link_mut(h);
            link.size = f(link.size);
            if h == Handle::HEADER {
                return;
            }
            h = link.parent;
        }
    }

    /// Promotes `x`, the `dir`-side child of `p`, above `p`.
    ///
    /// `x`'s inner subtree (on side `!dir`, possibly empty) becomes `p`'s
    /// `dir`-side child and `p` becomes `x`'s `!dir`-side child.
    pub(crate) fn rotate(&mut self, x: Handle, dir: Direction) {
        trace_log!(?x, ?dir, "rotate");
        let p = self.parent(x);
        self.relink_parent(p, x);
        let inner = self.child(x, !dir);
        self.try_link_child(p, dir, inner);
        self.link_child(x, !dir, p);
    }

    /// Promotes `x` above its grandparent `g`, where `x` is the `dir`-side
    /// child of `p` and `p` is the `!dir`-side child of `g`.
    ///
    /// `g` ends up as `x`'s `dir`-side child, `p` as its `!dir`-side child.
    pub(crate) fn zigzag(&mut self, x: Handle, dir: Direction) {
        trace_log!(?x, ?dir, "zigzag");
        let p = self.parent(x);
        let g = self.parent(p);
        self.relink_parent(g, x);
        let outer = self.child(x, dir);
        let inner = self.child(x, !dir);
        self.try_link_child(g, !dir, outer);
        self.try_link_child(p, dir, inner);
        self.link_child(x, dir, g);
        self.link_child(x, !dir, p);
    }

    /// Restores the red-black properties after `x` was linked in as a red leaf.
    pub(crate) fn insert_fixup(&mut self, mut x: Handle) {
        loop {
            let p = self.parent(x);
            if self.is_header(p) {
                self.set_color(x, Color::Black);
                return;
            }
            if !self.link(p).is_red() {
                return;
            }

            // A red parent is never the root, so the grandparent is a real node.
            let g = self.parent(p);
            let p_dir = self.direction(p);

            if let Some(u) = self.sibling(p).filter(|&u| self.link(u).is_red()) {
                self.set_color(p, Color::Black);
                self.set_color(u, Color::Black);
                self.set_color(g, Color::Red);
                x = g;
                continue;
            }

            let top = self.link(g).size;
            let x_dir = self.direction(x);
            self.set_color(g, Color::Red);
            if x_dir == p_dir {
                self.set_color(p, Color::Black);
                self.rotate(p, p_dir);
                self.link_mut(p).size = top;
                self.recount(g);
            } else {
                self.set_color(x, Color::Black);
                self.zigzag(x, x_dir);
                self.link_mut(x).size = top;
                self.recount(p);
                self.recount(g);
            }
            return;
        }
    }

    /// Repairs the missing black on the `dir` side of `parent` after a black
    /// node was removed from that slot. Sizes must already reflect the removal.
    pub(crate) fn erase_fixup(&mut self, mut parent: Handle, mut dir: Direction) {
        loop {
            if let Some(x) = self.red_child(parent, dir) {
                self.set_color(x, Color::Black);
                return;
            }

            let mut sibling = self.child(parent, !dir).expect("`erase_fixup()` - black-height deficit without a sibling!");

            if self.link(sibling).is_red() {
                let top = self.link(parent).size;
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(sibling, !dir);
                self.link_mut(sibling).size = top;
                self.recount(parent);
                sibling = self.child(parent, !dir).expect("`erase_fixup()` - red sibling without black children!");
            }

            let parent_color = self.link(parent).color;
            let top = self.link(parent).size;

            if let Some(near) = self.red_child(sibling, dir) {
                self.set_color(near, parent_color);
                self.set_color(parent, Color::Black);
                self.zigzag(near, dir);
                self.link_mut(near).size = top;
                self.recount(parent);
                self.recount(sibling);
                return;
            }

            if let Some(far) = self.red_child(sibling, !dir) {
                self.set_color(sibling, parent_color);
                self.set_color(parent, Color::Black);
                self.set_color(far, Color::Black);
                self.rotate(sibling, !dir);
                self.link_mut(sibling).size = top;
                self.recount(parent);
                return;
            }

            self.set_color(sibling, Color::Red);
            if parent_color == Color::Red {
                self.set_color(parent, Color::Black);
                return;
            }

            let grandparent = self.parent(parent);
            if self.is_header(grandparent) {
                return;
            }
            dir = self.direction(parent);
            parent = grandparent;
        }
    }
}
