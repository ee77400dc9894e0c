//! Per-pass snapshot of everything the solver needs from a cell.

use crate::axis::Orientation;
use crate::cell::{CellId, FlowCell, SizeBounds};
use crate::options::{Align, CellOptions};
use crate::proxy::LayoutProxy;

/// Resolved, axis-relative inputs of one cell for a single layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellMetrics {
    pub id: CellId,
    pub main: SizeBounds,
    pub cross: SizeBounds,
    pub grow: f32,
    /// Effective alignment inside the line.
    pub align: Align,
    pub stretch: bool,
    pub main_leading: f32,
    pub main_trailing: f32,
    pub cross_leading: f32,
    pub cross_trailing: f32,
    /// Origin distance from the cross-start bounds edge.
    pub origin_offset: f32,
}

impl CellMetrics {
    /// Snapshot `cell` for a container whose main axis is `main_axis`.
    pub fn measure<P: LayoutProxy>(
        id: CellId,
        cell: &FlowCell<P>,
        main_axis: Orientation,
        defaults: &CellOptions,
    ) -> Self {
        let cross_axis = main_axis.opposite();
        let margins = cell.effective_margins(defaults);
        Self {
            id,
            main: cell.size_bounds(main_axis, defaults),
            cross: cell.size_bounds(cross_axis, defaults),
            grow: cell.effective_grow(defaults),
            align: cell.effective_cell_align(defaults),
            stretch: cell.effective_stretch(defaults),
            main_leading: margins.leading(main_axis),
            main_trailing: margins.trailing(main_axis),
            cross_leading: margins.leading(cross_axis),
            cross_trailing: margins.trailing(cross_axis),
            origin_offset: cell.proxy().origin_offset(cross_axis),
        }
    }

    #[inline]
    pub fn main_margins(&self) -> f32 {
        self.main_leading + self.main_trailing
    }

    #[inline]
    pub fn cross_margins(&self) -> f32 {
        self.cross_leading + self.cross_trailing
    }

    /// Base main size including margins.
    #[inline]
    pub fn outer_main_base(&self) -> f32 {
        self.main.base + self.main_margins()
    }

    /// Minimum main size including margins.
    #[inline]
    pub fn outer_main_minimum(&self) -> f32 {
        self.main.minimum + self.main_margins()
    }

    /// Base cross size including margins.
    #[inline]
    pub fn outer_cross_base(&self) -> f32 {
        self.cross.base + self.cross_margins()
    }

    /// Minimum cross size including margins.
    #[inline]
    pub fn outer_cross_minimum(&self) -> f32 {
        self.cross.minimum + self.cross_margins()
    }

    /// Whether the cell participates in the line's shared origin reference.
    #[inline]
    pub fn aligns_by_origin(&self) -> bool {
        self.align == Align::Origin && !self.stretch
    }
}
