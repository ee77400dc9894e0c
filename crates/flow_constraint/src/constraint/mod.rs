//! The flow constraint: cell ordering, lock state and the layout pass.
//!
//! A pass runs in seven steps over the visible cells, always in stored order:
//! measure, break into lines, grow, justify, size lines on the cross axis,
//! align cells and pack lines, then write geometry back and publish the
//! container's own sizes.

mod arena;
mod batch;
mod cross_axis;
mod distribution;
mod measure;
mod multi_line;
#[cfg(test)]
mod tests;

use log::{debug, trace};

use self::arena::CellArena;
use self::cross_axis::{LineCross, align_in_line, measure_line};
use self::distribution::{
    MainOffsetPlan, accumulate_main_offsets, distribute_grow, gaps_total, justify_params,
    line_base_total,
};
use self::measure::CellMetrics;
use self::multi_line::{LineRange, PackPlan, break_into_lines, pack_lines};
use crate::axis::Orientation;
use crate::cell::{CellId, FlowCell};
use crate::error::{FlowError, non_negative, optional_non_negative};
use crate::options::{CellOptions, Justify};
use crate::proxy::LayoutProxy;

pub use self::batch::BatchGuard;

/// Container-level layout configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowConfig {
    pub orientation: Orientation,
    /// Gap between adjacent cells on the main axis.
    pub spacing: f32,
    /// Gap between adjacent lines on the cross axis.
    pub line_spacing: f32,
    pub justify: Justify,
    /// Distribution of lines; `None` stretches lines into the surplus.
    pub justify_lines: Option<Justify>,
    pub wrap: bool,
    /// Skip cells whose proxy reports itself invisible.
    pub exclude_invisible: bool,
    pub min_content_width: Option<f32>,
    pub min_content_height: Option<f32>,
    pub max_content_width: Option<f32>,
    pub max_content_height: Option<f32>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            spacing: 0.0,
            line_spacing: 0.0,
            justify: Justify::Start,
            justify_lines: None,
            wrap: false,
            exclude_invisible: true,
            min_content_width: None,
            min_content_height: None,
            max_content_width: None,
            max_content_height: None,
        }
    }
}

impl FlowConfig {
    /// Reject negative or non-finite numbers.
    ///
    /// # Errors
    /// Returns the first invalid option found.
    pub fn validate(&self) -> Result<(), FlowError> {
        non_negative("spacing", self.spacing)?;
        non_negative("lineSpacing", self.line_spacing)?;
        optional_non_negative("minContentWidth", self.min_content_width)?;
        optional_non_negative("minContentHeight", self.min_content_height)?;
        optional_non_negative("maxContentWidth", self.max_content_width)?;
        optional_non_negative("maxContentHeight", self.max_content_height)?;
        Ok(())
    }

    /// Apply the container's content floor and ceiling along `axis`; the floor wins.
    fn bound(&self, axis: Orientation, value: f32) -> f32 {
        let floor = axis.pick(self.min_content_width, self.min_content_height);
        let ceiling = axis.pick(self.max_content_width, self.max_content_height);
        let capped = ceiling.map_or(value, |ceiling| value.min(ceiling));
        floor.map_or(capped, |floor| capped.max(floor))
    }
}

/// Space offered to the container; `None` on an axis means "hug the content".
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AvailableSize {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl AvailableSize {
    #[inline]
    pub fn along(self, axis: Orientation) -> Option<f32> {
        axis.pick(self.width, self.height)
    }
}

/// Sizes published for the container after a pass, for an ancestor layout to use.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContainerSizes {
    pub minimum_width: f32,
    pub minimum_height: f32,
    pub preferred_width: f32,
    pub preferred_height: f32,
}

impl ContainerSizes {
    pub fn minimum(&self, axis: Orientation) -> f32 {
        axis.pick(self.minimum_width, self.minimum_height)
    }

    pub fn preferred(&self, axis: Orientation) -> f32 {
        axis.pick(self.preferred_width, self.preferred_height)
    }
}

/// Flow layout solver over an ordered set of cells.
#[derive(Debug)]
pub struct FlowConstraint<P> {
    cells: CellArena<P>,
    order: Vec<CellId>,
    config: FlowConfig,
    defaults: CellOptions,
    available: AvailableSize,
    lock_count: usize,
    disposed: bool,
    layout_count: u64,
    lines: Vec<Vec<CellId>>,
    published: ContainerSizes,
}

impl<P: LayoutProxy> Default for FlowConstraint<P> {
    fn default() -> Self {
        Self {
            cells: CellArena::new(),
            order: Vec::new(),
            config: FlowConfig::default(),
            defaults: CellOptions::default(),
            available: AvailableSize::default(),
            lock_count: 0,
            disposed: false,
            layout_count: 0,
            lines: Vec::new(),
            published: ContainerSizes::default(),
        }
    }
}

impl<P: LayoutProxy> FlowConstraint<P> {
    /// Create an empty constraint with `config`.
    ///
    /// # Errors
    /// Returns the first invalid option of `config`.
    pub fn new(config: FlowConfig) -> Result<Self, FlowError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    // ---- cells ----

    /// Insert `cell` at `index` in the layout order (clamped to the end).
    ///
    /// Returns `None` and drops the cell once the constraint is disposed.
    pub fn insert_cell(&mut self, index: usize, cell: FlowCell<P>) -> Option<CellId> {
        if self.disposed {
            debug!(target: "flow::constraint", "insert ignored after dispose");
            return None;
        }
        let id = self.cells.insert(cell);
        let index = index.min(self.order.len());
        self.order.insert(index, id);
        debug_assert_eq!(self.cells.len(), self.order.len(), "order and arena out of sync");
        trace!(target: "flow::constraint", "inserted {id:?} at {index}");
        self.update_layout_automatically();
        Some(id)
    }

    /// Remove a tracked cell and hand it back.
    ///
    /// # Panics
    /// Panics when `id` is not tracked by this constraint (unless disposed).
    pub fn remove_cell(&mut self, id: CellId) -> Option<FlowCell<P>> {
        if self.disposed {
            return None;
        }
        let position = self.order.iter().position(|&tracked| tracked == id);
        assert!(
            position.is_some(),
            "remove_cell: {id:?} is not tracked by this constraint"
        );
        if let Some(position) = position {
            self.order.remove(position);
        }
        let cell = self.cells.remove(id);
        trace!(target: "flow::constraint", "removed {id:?}");
        self.update_layout_automatically();
        cell
    }

    /// Re-present the order slice `[min_index, max_index]` as `ids`.
    ///
    /// Cells keep their identity and state; only their order changes.
    ///
    /// # Panics
    /// Panics when the range is out of bounds or `ids` is not a permutation of the
    /// cells currently in that range.
    pub fn reorder_cells(&mut self, ids: &[CellId], min_index: usize, max_index: usize) {
        if self.disposed {
            return;
        }
        assert!(
            min_index <= max_index && max_index < self.order.len(),
            "reorder_cells: range {min_index}..={max_index} outside {} cells",
            self.order.len()
        );
        let Some(slice) = self.order.get_mut(min_index..=max_index) else {
            return;
        };
        let mut expected = slice.to_vec();
        let mut given = ids.to_vec();
        expected.sort_unstable();
        given.sort_unstable();
        assert!(
            expected == given,
            "reorder_cells: {ids:?} is not a permutation of the cells in {min_index}..={max_index}"
        );
        slice.copy_from_slice(ids);
        self.update_layout_automatically();
    }

    /// Replace the options of a tracked cell.
    ///
    /// # Errors
    /// Returns the first invalid option; the previous options are kept.
    ///
    /// # Panics
    /// Panics when `id` is not tracked by this constraint (unless disposed).
    pub fn set_cell_options(&mut self, id: CellId, options: CellOptions) -> Result<(), FlowError> {
        options.validate()?;
        if self.disposed {
            return Ok(());
        }
        assert!(
            self.cells.contains(id),
            "set_cell_options: {id:?} is not tracked by this constraint"
        );
        if let Some(cell) = self.cells.get_mut(id) {
            cell.set_options(options)?;
        }
        self.update_layout_automatically();
        Ok(())
    }

    pub fn cell(&self, id: CellId) -> Option<&FlowCell<P>> {
        self.cells.get(id)
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut FlowCell<P>> {
        self.cells.get_mut(id)
    }

    /// Cell ids in layout order.
    pub fn order(&self) -> &[CellId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ---- configuration ----

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn cell_defaults(&self) -> &CellOptions {
        &self.defaults
    }

    pub fn available(&self) -> AvailableSize {
        self.available
    }

    /// Replace the whole configuration.
    ///
    /// # Errors
    /// Returns the first invalid option; nothing is applied then.
    pub fn set_config(&mut self, config: FlowConfig) -> Result<(), FlowError> {
        config.validate()?;
        self.reconfigure(|current| *current = config);
        Ok(())
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.reconfigure(|config| config.orientation = orientation);
    }

    /// # Errors
    /// Returns an error for negative or non-finite spacing.
    pub fn set_spacing(&mut self, spacing: f32) -> Result<(), FlowError> {
        let spacing = non_negative("spacing", spacing)?;
        self.reconfigure(|config| config.spacing = spacing);
        Ok(())
    }

    /// # Errors
    /// Returns an error for negative or non-finite spacing.
    pub fn set_line_spacing(&mut self, line_spacing: f32) -> Result<(), FlowError> {
        let line_spacing = non_negative("lineSpacing", line_spacing)?;
        self.reconfigure(|config| config.line_spacing = line_spacing);
        Ok(())
    }

    pub fn set_justify(&mut self, justify: Justify) {
        self.reconfigure(|config| config.justify = justify);
    }

    pub fn set_justify_lines(&mut self, justify_lines: Option<Justify>) {
        self.reconfigure(|config| config.justify_lines = justify_lines);
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.reconfigure(|config| config.wrap = wrap);
    }

    pub fn set_exclude_invisible(&mut self, exclude_invisible: bool) {
        self.reconfigure(|config| config.exclude_invisible = exclude_invisible);
    }

    /// Set the container's content floor along `axis`.
    ///
    /// # Errors
    /// Returns an error for negative or non-finite values.
    pub fn set_min_content(&mut self, axis: Orientation, value: Option<f32>) -> Result<(), FlowError> {
        let value = optional_non_negative(axis.pick("minContentWidth", "minContentHeight"), value)?;
        self.reconfigure(|config| match axis {
            Orientation::Horizontal => config.min_content_width = value,
            Orientation::Vertical => config.min_content_height = value,
        });
        Ok(())
    }

    /// Set the container's content ceiling along `axis`.
    ///
    /// # Errors
    /// Returns an error for negative or non-finite values.
    pub fn set_max_content(&mut self, axis: Orientation, value: Option<f32>) -> Result<(), FlowError> {
        let value = optional_non_negative(axis.pick("maxContentWidth", "maxContentHeight"), value)?;
        self.reconfigure(|config| match axis {
            Orientation::Horizontal => config.max_content_width = value,
            Orientation::Vertical => config.max_content_height = value,
        });
        Ok(())
    }

    /// Set the space offered by the parent; `None` hugs the content on that axis.
    ///
    /// # Errors
    /// Returns an error for negative or non-finite sizes.
    pub fn set_available_size(
        &mut self,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<(), FlowError> {
        let available = AvailableSize {
            width: optional_non_negative("width", width)?,
            height: optional_non_negative("height", height)?,
        };
        if self.disposed || available == self.available {
            return Ok(());
        }
        self.available = available;
        self.update_layout_automatically();
        Ok(())
    }

    /// Replace the container defaults every cell falls back to.
    ///
    /// # Errors
    /// Returns the first invalid option; the previous defaults are kept.
    pub fn set_cell_defaults(&mut self, defaults: CellOptions) -> Result<(), FlowError> {
        defaults.validate()?;
        if self.disposed {
            return Ok(());
        }
        self.defaults = defaults;
        self.update_layout_automatically();
        Ok(())
    }

    fn reconfigure(&mut self, apply: impl FnOnce(&mut FlowConfig)) {
        if self.disposed {
            return;
        }
        let before = self.config.clone();
        apply(&mut self.config);
        if before != self.config {
            self.update_layout_automatically();
        }
    }

    // ---- lock state ----

    /// Acquire one lock; layout requests are ignored until every lock is released.
    pub fn lock(&mut self) {
        self.lock_count += 1;
    }

    /// Release one lock. Does not run a layout by itself.
    ///
    /// # Panics
    /// Panics when no lock is held.
    pub fn unlock(&mut self) {
        if self.disposed {
            return;
        }
        assert!(self.lock_count > 0, "unlock called without a matching lock");
        self.lock_count -= 1;
    }

    /// Lock for the lifetime of the returned guard, then lay out once.
    pub fn batch(&mut self) -> BatchGuard<'_, P> {
        BatchGuard::acquire(self)
    }

    pub fn is_locked(&self) -> bool {
        self.disposed || self.lock_count > 0
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Take the lock for good and drop every cell.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.lock();
        self.disposed = true;
        self.order.clear();
        self.cells.clear();
        self.lines.clear();
        debug!(target: "flow::constraint", "disposed after {} layouts", self.layout_count);
    }

    // ---- results ----

    /// Sizes published by the last pass.
    pub fn published(&self) -> ContainerSizes {
        self.published
    }

    /// Cells of each line of the last pass, in order.
    pub fn lines(&self) -> &[Vec<CellId>] {
        &self.lines
    }

    /// Number of completed layout passes.
    pub fn layout_count(&self) -> u64 {
        self.layout_count
    }

    // ---- layout ----

    /// Event-driven entry point: lay out now unless a lock is held.
    pub fn update_layout_automatically(&mut self) {
        if self.is_locked() {
            trace!(target: "flow::constraint", "automatic layout deferred (locks={})", self.lock_count);
            return;
        }
        self.update_layout();
    }

    /// Run a full layout pass. Does nothing while locked or disposed.
    pub fn update_layout(&mut self) {
        if self.is_locked() {
            debug!(
                target: "flow::constraint",
                "layout skipped: locks={} disposed={}",
                self.lock_count,
                self.disposed
            );
            return;
        }
        let main_axis = self.config.orientation;
        let cross_axis = main_axis.opposite();
        let spacing = self.config.spacing;
        let line_spacing = self.config.line_spacing;
        let metrics = self.measure_cells();
        let main_available = self.available.along(main_axis);

        // 1) Line assignment
        let line_ranges: Vec<LineRange> = match main_available {
            Some(available) if self.config.wrap => break_into_lines(available, spacing, &metrics),
            _ if metrics.is_empty() => Vec::new(),
            _ => vec![(0, metrics.len())],
        };

        // 2-3) Main-axis sizing and placement per line
        let line_bases: Vec<f32> = line_ranges
            .iter()
            .map(|&(start, end)| {
                metrics
                    .get(start..end)
                    .map_or(0.0, |line| line_base_total(line, spacing))
            })
            .collect();
        let widest_base = line_bases.iter().copied().fold(0.0f32, f32::max);
        let line_available = main_available.unwrap_or(widest_base);
        let mut main_sizes: Vec<f32> = metrics.iter().map(|cell| cell.main.base).collect();
        let mut main_offsets: Vec<f32> = vec![0.0; metrics.len()];
        let mut laid_out_main = 0.0f32;
        for (&(start, end), &base_total) in line_ranges.iter().zip(&line_bases) {
            let (Some(line), Some(line_sizes)) =
                (metrics.get(start..end), main_sizes.get_mut(start..end))
            else {
                continue;
            };
            let free_space = line_available - base_total;
            let granted = if free_space > 0.0 {
                distribute_grow(free_space, line, line_sizes)
            } else {
                if free_space < 0.0 {
                    debug!(
                        target: "flow::constraint",
                        "[OVERFLOW] line [{start}..{end}) needs {base_total:.3}, has {line_available:.3}"
                    );
                }
                0.0
            };
            let (start_offset, between_spacing) =
                justify_params(self.config.justify, free_space - granted, line.len());
            debug!(
                target: "flow::constraint",
                "[FLOW-JUSTIFY] line [{start}..{end}) base={base_total:.3} available={line_available:.3} granted={granted:.3} start={start_offset:.3} between={between_spacing:.3}"
            );
            let plan = MainOffsetPlan {
                start_offset,
                between_spacing,
                spacing,
            };
            let offsets = accumulate_main_offsets(&plan, line, line_sizes);
            if let Some(slot) = main_offsets.get_mut(start..end) {
                slot.copy_from_slice(&offsets);
            }
            laid_out_main = laid_out_main.max(base_total + granted);
        }

        // 4-6) Cross-axis line sizes and packing
        let mut line_cross: Vec<LineCross> = line_ranges
            .iter()
            .map(|&(start, end)| metrics.get(start..end).map_or_else(LineCross::default, measure_line))
            .collect();
        let natural_cross = line_cross.iter().map(|line| line.extent).sum::<f32>()
            + gaps_total(line_cross.len(), line_spacing);
        let pack = PackPlan {
            justify_lines: self.config.justify_lines,
            available: self.available.along(cross_axis),
            line_spacing,
        };
        let line_offsets = pack_lines(&pack, &mut line_cross);
        let laid_out_cross = line_cross.iter().map(|line| line.extent).sum::<f32>()
            + gaps_total(line_cross.len(), line_spacing);

        // Write geometry back through the proxies
        for ((&(start, end), &line), &line_offset) in
            line_ranges.iter().zip(&line_cross).zip(&line_offsets)
        {
            for index in start..end {
                let (Some(cell), Some(&main_size), Some(&main_offset)) = (
                    metrics.get(index),
                    main_sizes.get(index),
                    main_offsets.get(index),
                ) else {
                    continue;
                };
                let placement = align_in_line(cell, line);
                let cross_offset = line_offset + placement.offset;
                trace!(
                    target: "flow::constraint",
                    "{:?}: main {main_offset:.3}+{main_size:.3} cross {cross_offset:.3}+{:.3}",
                    cell.id,
                    placement.size
                );
                if let Some(flow_cell) = self.cells.get_mut(cell.id) {
                    let proxy = flow_cell.proxy_mut();
                    proxy.set_position(main_axis, main_offset);
                    proxy.set_size(main_axis, main_size);
                    proxy.set_position(cross_axis, cross_offset);
                    proxy.set_size(cross_axis, placement.size);
                }
            }
        }

        // 7) Publication
        let (minimum_main, minimum_cross) = if self.config.wrap {
            let widest = metrics
                .iter()
                .map(CellMetrics::outer_main_minimum)
                .fold(0.0f32, f32::max);
            (widest, natural_cross)
        } else {
            let sum = metrics.iter().map(CellMetrics::outer_main_minimum).sum::<f32>()
                + gaps_total(metrics.len(), spacing);
            let tallest = metrics
                .iter()
                .map(CellMetrics::outer_cross_minimum)
                .fold(0.0f32, f32::max);
            (sum, tallest)
        };
        let (minimum_width, minimum_height) = main_axis.pick(
            (minimum_main, minimum_cross),
            (minimum_cross, minimum_main),
        );
        let (preferred_width, preferred_height) = main_axis.pick(
            (laid_out_main, laid_out_cross),
            (laid_out_cross, laid_out_main),
        );
        self.published = ContainerSizes {
            minimum_width: self.config.bound(Orientation::Horizontal, minimum_width),
            minimum_height: self.config.bound(Orientation::Vertical, minimum_height),
            preferred_width: self.config.bound(Orientation::Horizontal, preferred_width),
            preferred_height: self.config.bound(Orientation::Vertical, preferred_height),
        };
        self.lines = line_ranges
            .iter()
            .map(|&(start, end)| {
                metrics
                    .get(start..end)
                    .map(|line| line.iter().map(|cell| cell.id).collect::<Vec<_>>())
                    .unwrap_or_default()
            })
            .collect();
        self.layout_count += 1;
        debug!(
            target: "flow::constraint",
            "[FLOW-LAYOUT] pass={} cells={} lines={} published={:?}",
            self.layout_count,
            metrics.len(),
            self.lines.len(),
            self.published
        );
    }

    /// Snapshot the cells taking part in this pass, in stored order.
    fn measure_cells(&self) -> Vec<CellMetrics> {
        let main_axis = self.config.orientation;
        self.order
            .iter()
            .filter_map(|&id| {
                let cell = self.cells.get(id)?;
                if self.config.exclude_invisible && !cell.proxy().is_visible() {
                    return None;
                }
                Some(CellMetrics::measure(id, cell, main_axis, &self.defaults))
            })
            .collect()
    }
}
