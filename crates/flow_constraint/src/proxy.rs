//! The narrow contract through which the solver sees a child node.

use crate::axis::Orientation;

/// Intrinsic sizing of one child plus a sink for its computed geometry.
///
/// Implementations must tolerate a node that has been destroyed or detached:
/// sizes then read as zero and writes are dropped, never a panic.
pub trait LayoutProxy {
    /// Smallest size the node can be laid out at along `axis`.
    fn minimum_size(&self, axis: Orientation) -> f32;

    /// Size the node would like along `axis`.
    fn preferred_size(&self, axis: Orientation) -> f32;

    /// Largest size the node accepts along `axis`; `None` when unbounded.
    fn maximum_size(&self, axis: Orientation) -> Option<f32>;

    /// Distance from the bounds' start edge to the node's local origin along `axis`.
    fn origin_offset(&self, _axis: Orientation) -> f32 {
        0.0
    }

    /// Whether the node takes part in layout when invisible children are excluded.
    fn is_visible(&self) -> bool {
        true
    }

    /// Move the node's bounds start edge along `axis`.
    fn set_position(&mut self, axis: Orientation, value: f32);

    /// Resize the node's bounds along `axis`.
    fn set_size(&mut self, axis: Orientation, value: f32);
}

impl<P: LayoutProxy + ?Sized> LayoutProxy for Box<P> {
    fn minimum_size(&self, axis: Orientation) -> f32 {
        (**self).minimum_size(axis)
    }

    fn preferred_size(&self, axis: Orientation) -> f32 {
        (**self).preferred_size(axis)
    }

    fn maximum_size(&self, axis: Orientation) -> Option<f32> {
        (**self).maximum_size(axis)
    }

    fn origin_offset(&self, axis: Orientation) -> f32 {
        (**self).origin_offset(axis)
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }

    fn set_position(&mut self, axis: Orientation, value: f32) {
        (**self).set_position(axis, value);
    }

    fn set_size(&mut self, axis: Orientation, value: f32) {
        (**self).set_size(axis, value);
    }
}
