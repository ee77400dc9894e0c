//! Main-axis sizing and placement within one line.
//!
//! Surplus space first goes to growing cells in proportion to their grow factor.
//! Whatever is left is handed to `justify`. A line that is already too long keeps
//! its base sizes and overflows: there is no shrink step.

use super::measure::CellMetrics;
use crate::options::Justify;

/// Total spacing between `count` adjacent items.
#[inline]
pub fn gaps_total(count: usize, spacing: f32) -> f32 {
    if count > 1 {
        (count as f32 - 1.0) * spacing
    } else {
        0.0
    }
}

/// Outer base sizes of a line plus the spacing between them.
pub fn line_base_total(metrics: &[CellMetrics], spacing: f32) -> f32 {
    let outer: f32 = metrics.iter().map(CellMetrics::outer_main_base).sum();
    outer + gaps_total(metrics.len(), spacing)
}

/// Distribute positive free space to cells by grow factor.
///
/// Cells that reach their maximum freeze and the remainder is offered again to
/// the cells still growing. Returns the space actually handed out.
pub fn distribute_grow(free_space: f32, metrics: &[CellMetrics], sizes: &mut [f32]) -> f32 {
    debug_assert!(free_space >= 0.0, "grow called with negative free space");
    let mut remaining = free_space;
    let mut saturated: Vec<bool> = metrics
        .iter()
        .map(|cell| cell.grow <= 0.0 || cell.main.base >= cell.main.maximum)
        .collect();
    // Each round freezes at least one cell or finishes.
    for _ in 0..metrics.len() {
        let sum_grow: f32 = metrics
            .iter()
            .zip(&saturated)
            .filter(|&(_, is_saturated)| !*is_saturated)
            .map(|(cell, _)| cell.grow)
            .sum();
        if sum_grow <= 0.0 || remaining <= 0.0 {
            break;
        }
        let unit = remaining / sum_grow;
        let mut any_saturated = false;
        let mut applied_total = 0.0f32;
        for ((size_ref, cell), sat_ref) in sizes.iter_mut().zip(metrics).zip(saturated.iter_mut()) {
            if *sat_ref {
                continue;
            }
            let grown = (*size_ref + cell.grow * unit).min(cell.main.maximum);
            applied_total += grown - *size_ref;
            *size_ref = grown;
            if grown >= cell.main.maximum {
                *sat_ref = true;
                any_saturated = true;
            }
        }
        remaining -= applied_total;
        if !any_saturated {
            break;
        }
    }
    free_space - remaining.max(0.0)
}

/// Leading offset and extra between-spacing for `count` items sharing `free_space`.
///
/// A lone item under `SpaceBetween` or `SpaceAround` is centered.
pub fn justify_params(justify: Justify, free_space: f32, count: usize) -> (f32, f32) {
    let remaining = free_space.max(0.0);
    match (justify, count) {
        (_, 0) | (Justify::Start, _) => (0.0, 0.0),
        (Justify::SpaceBetween | Justify::SpaceAround, 1) | (Justify::Center, _) => {
            (remaining * 0.5, 0.0)
        }
        (Justify::End, _) => (remaining, 0.0),
        (Justify::SpaceBetween, many) => (0.0, remaining / (many as f32 - 1.0)),
        (Justify::SpaceAround, many) => (remaining / (many as f32 * 2.0), remaining / many as f32),
        (Justify::SpaceEvenly, many) => {
            let slots = many as f32 + 1.0;
            (remaining / slots, remaining / slots)
        }
    }
}

/// Parameters for accumulating main-axis positions along a line.
#[derive(Copy, Clone, Debug)]
pub struct MainOffsetPlan {
    /// Offset of the first item's outer box from main-start.
    pub start_offset: f32,
    /// Extra spacing from `justify`, on top of the configured spacing.
    pub between_spacing: f32,
    /// Configured spacing between adjacent cells.
    pub spacing: f32,
}

/// Bounds start of every cell in the line (leading margin already applied).
pub fn accumulate_main_offsets(
    plan: &MainOffsetPlan,
    metrics: &[CellMetrics],
    sizes: &[f32],
) -> Vec<f32> {
    let mut cursor = plan.start_offset;
    let mut offsets = Vec::with_capacity(sizes.len());
    let mut iter = metrics.iter().zip(sizes).peekable();
    while let Some((cell, size)) = iter.next() {
        cursor += cell.main_leading;
        offsets.push(cursor);
        cursor += *size + cell.main_trailing;
        if iter.peek().is_some() {
            cursor += plan.spacing + plan.between_spacing;
        }
    }
    offsets
}
