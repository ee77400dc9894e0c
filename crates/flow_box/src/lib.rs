//! Flow container coordination.
//!
//! [`FlowBox`] mirrors a child collection into a [`flow_constraint::FlowConstraint`]:
//! it turns typed [`ChildUpdate`] notifications into cell insertions, removals and
//! reorders, keeps the node to cell index, and forwards container options in
//! batches so that a bulk change costs a single layout pass.

#![forbid(unsafe_code)]

pub mod container;
pub mod node;
pub mod update;

pub use container::{FlowBox, FlowBoxOptions};
pub use node::{Bounds, Intrinsic, NodeKey, NodeProxy, SceneNode};
pub use update::{ChildSubscriber, ChildUpdate};
