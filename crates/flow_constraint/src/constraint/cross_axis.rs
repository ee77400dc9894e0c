//! Cross-axis sizing of a line and alignment of cells inside it.

use super::measure::CellMetrics;
use crate::options::Align;

/// Cross-axis extent of one line.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LineCross {
    /// Cross size of the line, possibly enlarged when lines stretch.
    pub extent: f32,
    /// Distance from the line's start to the shared origin of origin-aligned cells.
    pub origin_ref: f32,
}

/// Cross size and offset (from the line's start) of one cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CrossPlacement {
    pub size: f32,
    pub offset: f32,
}

/// Cross size of a line: the tallest outer cell, or the combined ascent and
/// descent of the origin-aligned cells when that is larger.
pub fn measure_line(metrics: &[CellMetrics]) -> LineCross {
    let mut extent = 0.0f32;
    let mut ascent = 0.0f32;
    let mut descent = 0.0f32;
    for cell in metrics {
        if cell.aligns_by_origin() {
            ascent = ascent.max(cell.cross_leading + cell.origin_offset);
            descent = descent.max(cell.cross.base - cell.origin_offset + cell.cross_trailing);
        } else {
            extent = extent.max(cell.outer_cross_base());
        }
    }
    LineCross {
        extent: extent.max(ascent + descent),
        origin_ref: ascent,
    }
}

/// Place `cell` inside `line` according to its effective alignment.
pub fn align_in_line(cell: &CellMetrics, line: LineCross) -> CrossPlacement {
    if cell.stretch {
        let size = (line.extent - cell.cross_margins())
            .max(cell.cross.minimum)
            .min(cell.cross.maximum);
        return CrossPlacement {
            size,
            offset: cell.cross_leading,
        };
    }
    let size = cell.cross.base;
    let offset = match cell.align {
        Align::Start | Align::Stretch => cell.cross_leading,
        Align::End => line.extent - cell.cross_trailing - size,
        Align::Center => cell.cross_leading + (line.extent - cell.outer_cross_base()) * 0.5,
        Align::Origin => line.origin_ref - cell.origin_offset,
    };
    CrossPlacement { size, offset }
}
