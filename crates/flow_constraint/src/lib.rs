//! Flow layout solver: lines of cells along a main axis with optional wrapping.
//!
//! The solver never touches a node tree directly. Every child is seen through a
//! [`LayoutProxy`], wrapped in a [`FlowCell`] that carries its layout options, and
//! stored in the [`FlowConstraint`] cell arena. A layout pass measures the cells,
//! assigns them to lines, distributes main-axis space (grow, then `justify`),
//! aligns each cell inside its line on the cross axis, packs the lines, writes
//! the geometry back through the proxies and publishes the container's own
//! minimum and preferred size.

#![forbid(unsafe_code)]

pub mod axis;
pub mod cell;
pub mod constraint;
pub mod error;
pub mod options;
pub mod proxy;

pub use axis::Orientation;
pub use cell::{CellId, FlowCell, SizeBounds};
pub use constraint::{AvailableSize, BatchGuard, ContainerSizes, FlowConfig, FlowConstraint};
pub use error::FlowError;
pub use options::{Align, CellOptions, Justify, Margins};
pub use proxy::LayoutProxy;
