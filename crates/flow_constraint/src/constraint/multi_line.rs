//! Line breaking and cross-axis packing of lines.

use log::debug;

use super::cross_axis::LineCross;
use super::distribution::{gaps_total, justify_params};
use super::measure::CellMetrics;
use crate::options::Justify;

/// Line start/end indices into the measured cells: `[start, end)`.
pub type LineRange = (usize, usize);

/// Break cells into lines by accumulating outer base sizes and `spacing` until the
/// next cell would exceed `available`. A line always receives at least one cell.
pub fn break_into_lines(available: f32, spacing: f32, metrics: &[CellMetrics]) -> Vec<LineRange> {
    let mut line_ranges: Vec<LineRange> = Vec::new();
    let mut start = 0usize;
    let mut cursor = 0.0f32;
    for (idx, cell) in metrics.iter().enumerate() {
        let size = cell.outer_main_base();
        let is_first_in_line = idx == start;
        let gap = if is_first_in_line { 0.0 } else { spacing };
        let next = cursor + gap + size;
        if next <= available || is_first_in_line {
            cursor = next;
        } else {
            line_ranges.push((start, idx));
            start = idx;
            cursor = size;
        }
    }
    if start < metrics.len() {
        line_ranges.push((start, metrics.len()));
    }
    line_ranges
}

/// Cross-axis packing inputs for the lines of a container.
#[derive(Copy, Clone, Debug)]
pub struct PackPlan {
    /// Distribution across lines; `None` stretches every line by an equal share.
    pub justify_lines: Option<Justify>,
    /// Container cross size, `None` when hugging content.
    pub available: Option<f32>,
    pub line_spacing: f32,
}

/// Distribute surplus cross space over `lines` and return each line's offset.
///
/// Stretching enlarges the `extent` of every line in place.
pub fn pack_lines(plan: &PackPlan, lines: &mut [LineCross]) -> Vec<f32> {
    let count = lines.len();
    let natural: f32 =
        lines.iter().map(|line| line.extent).sum::<f32>() + gaps_total(count, plan.line_spacing);
    let free = plan
        .available
        .map_or(0.0, |available| available - natural)
        .max(0.0);
    let (start_offset, between_spacing) = match plan.justify_lines {
        Some(justify) => justify_params(justify, free, count),
        None => {
            if count > 0 {
                let add_each = free / count as f32;
                for line in lines.iter_mut() {
                    line.extent += add_each;
                }
            }
            (0.0, 0.0)
        }
    };
    debug!(
        target: "flow::lines",
        "[JUSTIFY-LINES] mode={:?} lines={count} natural={natural:.3} free={free:.3} start={start_offset:.3} between={between_spacing:.3}",
        plan.justify_lines
    );
    let mut cursor = start_offset;
    let mut offsets = Vec::with_capacity(count);
    for line in lines.iter() {
        offsets.push(cursor);
        cursor += line.extent + plan.line_spacing + between_spacing;
    }
    offsets
}
