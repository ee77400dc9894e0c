//! A minimal scene node and the layout proxy that writes into it.
//!
//! The container never owns nodes. It holds a [`NodeProxy`], a weak handle that
//! reads the node's intrinsic sizes and writes its bounds for as long as the node
//! lives. Once the node is dropped every read reports zero and every write is
//! dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use flow_constraint::{LayoutProxy, Orientation};
use log::trace;

/// A stable key for scene nodes, used to correlate child notifications.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeKey(pub u64);

/// Intrinsic sizing of a node along one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Intrinsic {
    pub minimum: f32,
    pub preferred: f32,
    /// `None` when unbounded.
    pub maximum: Option<f32>,
}

impl Intrinsic {
    /// Preferred size with no minimum and no maximum.
    #[inline]
    pub const fn preferred(preferred: f32) -> Self {
        Self {
            minimum: 0.0,
            preferred,
            maximum: None,
        }
    }
}

/// Bounds rectangle in the parent's coordinate space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug)]
struct NodeState {
    width: Intrinsic,
    height: Intrinsic,
    origin: (f32, f32),
    visible: bool,
    bounds: Bounds,
}

/// Strong handle to a scene node. Clones share the same node.
#[derive(Clone, Debug)]
pub struct SceneNode {
    key: NodeKey,
    state: Rc<RefCell<NodeState>>,
}

impl SceneNode {
    pub fn new(key: NodeKey, width: Intrinsic, height: Intrinsic) -> Self {
        Self {
            key,
            state: Rc::new(RefCell::new(NodeState {
                width,
                height,
                origin: (0.0, 0.0),
                visible: true,
                bounds: Bounds::default(),
            })),
        }
    }

    #[inline]
    pub const fn key(&self) -> NodeKey {
        self.key
    }

    /// A weak proxy the layout container can hold without keeping the node alive.
    pub fn proxy(&self) -> NodeProxy {
        NodeProxy {
            key: self.key,
            state: Rc::downgrade(&self.state),
        }
    }

    /// Bounds last written by a layout pass.
    pub fn bounds(&self) -> Bounds {
        self.state
            .try_borrow()
            .map_or_else(|_| Bounds::default(), |state| state.bounds)
    }

    pub fn set_intrinsic(&self, axis: Orientation, intrinsic: Intrinsic) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            match axis {
                Orientation::Horizontal => state.width = intrinsic,
                Orientation::Vertical => state.height = intrinsic,
            }
        }
    }

    /// Position of the local origin inside the bounds.
    pub fn set_origin(&self, x: f32, y: f32) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.origin = (x, y);
        }
    }

    pub fn set_visible(&self, visible: bool) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.visible = visible;
        }
    }
}

/// Weak layout proxy of a [`SceneNode`].
#[derive(Clone, Debug)]
pub struct NodeProxy {
    key: NodeKey,
    state: Weak<RefCell<NodeState>>,
}

impl NodeProxy {
    #[inline]
    pub const fn key(&self) -> NodeKey {
        self.key
    }

    /// Whether the node is still alive.
    pub fn is_attached(&self) -> bool {
        self.state.strong_count() > 0
    }

    fn read<T>(&self, fallback: T, read: impl FnOnce(&NodeState) -> T) -> T {
        let Some(state) = self.state.upgrade() else {
            return fallback;
        };
        let Ok(borrowed) = state.try_borrow() else {
            return fallback;
        };
        read(&borrowed)
    }

    fn write(&self, write: impl FnOnce(&mut NodeState)) {
        let Some(state) = self.state.upgrade() else {
            trace!(target: "flow::box", "write to detached node {:?} dropped", self.key);
            return;
        };
        if let Ok(mut borrowed) = state.try_borrow_mut() {
            write(&mut borrowed);
        }
    }

    fn intrinsic(&self, axis: Orientation) -> Intrinsic {
        self.read(Intrinsic::default(), |state| axis.pick(state.width, state.height))
    }
}

impl LayoutProxy for NodeProxy {
    fn minimum_size(&self, axis: Orientation) -> f32 {
        self.intrinsic(axis).minimum
    }

    fn preferred_size(&self, axis: Orientation) -> f32 {
        self.intrinsic(axis).preferred
    }

    fn maximum_size(&self, axis: Orientation) -> Option<f32> {
        self.intrinsic(axis).maximum
    }

    fn origin_offset(&self, axis: Orientation) -> f32 {
        self.read(0.0, |state| axis.pick(state.origin.0, state.origin.1))
    }

    fn is_visible(&self) -> bool {
        self.read(false, |state| state.visible)
    }

    fn set_position(&mut self, axis: Orientation, value: f32) {
        self.write(|state| match axis {
            Orientation::Horizontal => state.bounds.x = value,
            Orientation::Vertical => state.bounds.y = value,
        });
    }

    fn set_size(&mut self, axis: Orientation, value: f32) {
        self.write(|state| match axis {
            Orientation::Horizontal => state.bounds.width = value,
            Orientation::Vertical => state.bounds.height = value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if the proxy does not read and write through to a live node.
    fn proxy_reads_and_writes_live_node() {
        let node = SceneNode::new(
            NodeKey(1),
            Intrinsic {
                minimum: 5.0,
                preferred: 20.0,
                maximum: Some(40.0),
            },
            Intrinsic::preferred(10.0),
        );
        let mut proxy = node.proxy();
        assert!(proxy.is_attached());
        assert!((proxy.minimum_size(Orientation::Horizontal) - 5.0).abs() < 0.001);
        assert!((proxy.preferred_size(Orientation::Vertical) - 10.0).abs() < 0.001);
        assert_eq!(proxy.maximum_size(Orientation::Horizontal), Some(40.0));
        proxy.set_position(Orientation::Horizontal, 3.0);
        proxy.set_size(Orientation::Vertical, 7.0);
        let bounds = node.bounds();
        assert!((bounds.x - 3.0).abs() < 0.001);
        assert!((bounds.height - 7.0).abs() < 0.001);
    }

    #[test]
    /// # Panics
    /// Panics if a proxy of a dropped node does anything but read zeros and drop writes.
    fn detached_proxy_is_inert() {
        let node = SceneNode::new(NodeKey(2), Intrinsic::preferred(20.0), Intrinsic::preferred(10.0));
        let mut proxy = node.proxy();
        drop(node);
        assert!(!proxy.is_attached());
        assert!(proxy.preferred_size(Orientation::Horizontal).abs() < 0.001);
        assert_eq!(proxy.maximum_size(Orientation::Vertical), None);
        assert!(!proxy.is_visible());
        proxy.set_position(Orientation::Horizontal, 3.0);
        proxy.set_size(Orientation::Horizontal, 3.0);
    }
}
