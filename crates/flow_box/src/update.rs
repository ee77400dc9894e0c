//! Typed child-collection notifications.

use flow_constraint::CellOptions;

use crate::node::NodeKey;

/// A change to the child collection of a flow container.
#[derive(Debug)]
pub enum ChildUpdate<P> {
    /// A child was inserted at `index` of the collection.
    Inserted {
        node: NodeKey,
        proxy: P,
        index: usize,
        options: CellOptions,
    },
    /// A tracked child left the collection.
    Removed { node: NodeKey },
    /// The children at `min_index..=max_index` now appear in the order of `nodes`.
    Reordered {
        min_index: usize,
        max_index: usize,
        nodes: Vec<NodeKey>,
    },
    /// A tracked child's layout options were replaced.
    OptionsChanged { node: NodeKey, options: CellOptions },
    /// Something affecting layout changed without a structural change, such as
    /// a child's intrinsic size or visibility.
    Changed,
}

/// A subscriber that receives [`ChildUpdate`] values and mirrors them into its own state.
pub trait ChildSubscriber<P> {
    /// Apply a single update to the subscriber state.
    ///
    /// # Errors
    /// Returns an error when the update carries invalid options.
    fn apply_update(&mut self, update: ChildUpdate<P>) -> anyhow::Result<()>;
}
