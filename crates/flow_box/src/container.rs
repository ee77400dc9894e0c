//! The flow container: child bookkeeping and option forwarding.

use std::collections::HashMap;

use anyhow::Context as _;
use flow_constraint::{
    Align, BatchGuard, CellId, CellOptions, ContainerSizes, FlowCell, FlowConstraint, FlowError,
    Justify, LayoutProxy, Orientation,
};
use flow_constraint::error::{non_negative, optional_non_negative};
use log::{debug, trace};
use serde::{Deserialize, Deserializer, Serialize};

use crate::node::NodeKey;
use crate::update::{ChildSubscriber, ChildUpdate};

/// Deserialize a field that distinguishes "absent" from an explicit `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Container option bag. Absent fields leave the current setting untouched.
///
/// Fields holding an `Option<Option<_>>` can be reset: `Some(None)` (a JSON
/// `null`) clears the setting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowBoxOptions {
    pub orientation: Option<Orientation>,
    pub spacing: Option<f32>,
    pub line_spacing: Option<f32>,
    pub justify: Option<Justify>,
    /// `Some(None)` stretches lines into the surplus cross space.
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub justify_lines: Option<Option<Justify>>,
    pub wrap: Option<bool>,
    pub exclude_invisible: Option<bool>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub min_content_width: Option<Option<f32>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub min_content_height: Option<Option<f32>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub max_content_width: Option<Option<f32>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub max_content_height: Option<Option<f32>>,
    // Defaults for cells that do not set their own.
    pub align: Option<Align>,
    pub cell_align: Option<Align>,
    pub stretch: Option<bool>,
    pub grow: Option<f32>,
    pub margin: Option<f32>,
    pub x_margin: Option<f32>,
    pub y_margin: Option<f32>,
    pub left_margin: Option<f32>,
    pub right_margin: Option<f32>,
    pub top_margin: Option<f32>,
    pub bottom_margin: Option<f32>,
}

impl FlowBoxOptions {
    /// Reject negative or non-finite numbers before anything is applied.
    ///
    /// # Errors
    /// Returns the first invalid option found.
    pub fn validate(&self) -> Result<(), FlowError> {
        optional_non_negative("spacing", self.spacing)?;
        optional_non_negative("lineSpacing", self.line_spacing)?;
        let limits = [
            ("minContentWidth", self.min_content_width),
            ("minContentHeight", self.min_content_height),
            ("maxContentWidth", self.max_content_width),
            ("maxContentHeight", self.max_content_height),
        ];
        for (option, limit) in limits {
            if let Some(Some(value)) = limit {
                non_negative(option, value)?;
            }
        }
        self.cell_defaults().validate()
    }

    /// The cell-default fields of this bag as a [`CellOptions`] patch.
    pub fn cell_defaults(&self) -> CellOptions {
        CellOptions {
            align: self.align,
            cell_align: self.cell_align,
            stretch: self.stretch,
            grow: self.grow,
            margin: self.margin,
            x_margin: self.x_margin,
            y_margin: self.y_margin,
            left_margin: self.left_margin,
            right_margin: self.right_margin,
            top_margin: self.top_margin,
            bottom_margin: self.bottom_margin,
            ..CellOptions::default()
        }
    }

    /// Forward every present field to `constraint`.
    ///
    /// # Errors
    /// Returns the first option the constraint rejects.
    pub fn apply<P: LayoutProxy>(&self, constraint: &mut FlowConstraint<P>) -> Result<(), FlowError> {
        if let Some(orientation) = self.orientation {
            constraint.set_orientation(orientation);
        }
        if let Some(spacing) = self.spacing {
            constraint.set_spacing(spacing)?;
        }
        if let Some(line_spacing) = self.line_spacing {
            constraint.set_line_spacing(line_spacing)?;
        }
        if let Some(justify) = self.justify {
            constraint.set_justify(justify);
        }
        if let Some(justify_lines) = self.justify_lines {
            constraint.set_justify_lines(justify_lines);
        }
        if let Some(wrap) = self.wrap {
            constraint.set_wrap(wrap);
        }
        if let Some(exclude_invisible) = self.exclude_invisible {
            constraint.set_exclude_invisible(exclude_invisible);
        }
        let floors = [
            (Orientation::Horizontal, self.min_content_width),
            (Orientation::Vertical, self.min_content_height),
        ];
        for (axis, floor) in floors {
            if let Some(floor) = floor {
                constraint.set_min_content(axis, floor)?;
            }
        }
        let ceilings = [
            (Orientation::Horizontal, self.max_content_width),
            (Orientation::Vertical, self.max_content_height),
        ];
        for (axis, ceiling) in ceilings {
            if let Some(ceiling) = ceiling {
                constraint.set_max_content(axis, ceiling)?;
            }
        }
        let patch = self.cell_defaults();
        if patch != CellOptions::default() {
            let merged = overlay(constraint.cell_defaults(), &patch);
            constraint.set_cell_defaults(merged)?;
        }
        Ok(())
    }
}

/// Fields set in `patch` win over `base`.
fn overlay(base: &CellOptions, patch: &CellOptions) -> CellOptions {
    CellOptions {
        align: patch.align.or(base.align),
        cell_align: patch.cell_align.or(base.cell_align),
        stretch: patch.stretch.or(base.stretch),
        grow: patch.grow.or(base.grow),
        margin: patch.margin.or(base.margin),
        x_margin: patch.x_margin.or(base.x_margin),
        y_margin: patch.y_margin.or(base.y_margin),
        left_margin: patch.left_margin.or(base.left_margin),
        right_margin: patch.right_margin.or(base.right_margin),
        top_margin: patch.top_margin.or(base.top_margin),
        bottom_margin: patch.bottom_margin.or(base.bottom_margin),
        min_content_width: patch.min_content_width.or(base.min_content_width),
        min_content_height: patch.min_content_height.or(base.min_content_height),
        max_content_width: patch.max_content_width.or(base.max_content_width),
        max_content_height: patch.max_content_height.or(base.max_content_height),
    }
}

/// A flow layout container tracking its children by [`NodeKey`].
#[derive(Debug)]
pub struct FlowBox<P: LayoutProxy> {
    constraint: FlowConstraint<P>,
    cells: HashMap<NodeKey, CellId>,
}

impl<P: LayoutProxy> FlowBox<P> {
    /// Create an empty container configured by `options`.
    ///
    /// # Errors
    /// Returns the first invalid option.
    pub fn new(options: &FlowBoxOptions) -> Result<Self, FlowError> {
        let mut flow_box = Self {
            constraint: FlowConstraint::default(),
            cells: HashMap::new(),
        };
        flow_box.mutate(options)?;
        Ok(flow_box)
    }

    /// Apply `options` in one batch: at most one layout pass runs.
    ///
    /// Everything is validated first, so a rejected bag changes nothing.
    ///
    /// # Errors
    /// Returns the first invalid option.
    pub fn mutate(&mut self, options: &FlowBoxOptions) -> Result<(), FlowError> {
        options.validate()?;
        if self.constraint.is_disposed() {
            return Ok(());
        }
        let mut batch = self.constraint.batch();
        options.apply(&mut *batch)
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
        self.constraint.set_available_size(width, height)
    }

    /// Apply several updates with a single layout pass at the end.
    ///
    /// # Errors
    /// Returns the first failing update; the ones before it stay applied.
    pub fn apply_updates<I>(&mut self, updates: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = ChildUpdate<P>>,
    {
        self.constraint.lock();
        let result = updates
            .into_iter()
            .try_for_each(|update| self.apply_update(update));
        self.constraint.unlock();
        self.constraint.update_layout_automatically();
        result
    }

    pub fn lock(&mut self) {
        self.constraint.lock();
    }

    /// Release one lock without laying out.
    pub fn unlock(&mut self) {
        self.constraint.unlock();
    }

    /// Lock until the guard drops, then lay out once.
    pub fn batch(&mut self) -> BatchGuard<'_, P> {
        self.constraint.batch()
    }

    /// Release every child and lock the container for good.
    pub fn dispose(&mut self) {
        self.constraint.dispose();
        self.cells.clear();
        debug!(target: "flow::box", "flow box disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.constraint.is_disposed()
    }

    pub fn constraint(&self) -> &FlowConstraint<P> {
        &self.constraint
    }

    pub fn published(&self) -> ContainerSizes {
        self.constraint.published()
    }

    pub fn line_count(&self) -> usize {
        self.constraint.lines().len()
    }

    pub fn layout_count(&self) -> u64 {
        self.constraint.layout_count()
    }

    pub fn cell_for(&self, node: NodeKey) -> Option<CellId> {
        self.cells.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Children of each line of the last pass, in order.
    pub fn line_nodes(&self) -> Vec<Vec<NodeKey>> {
        let nodes: HashMap<CellId, NodeKey> =
            self.cells.iter().map(|(&node, &id)| (id, node)).collect();
        self.constraint
            .lines()
            .iter()
            .map(|line| line.iter().filter_map(|id| nodes.get(id).copied()).collect())
            .collect()
    }

    fn tracked(&self, node: NodeKey, operation: &str) -> Option<CellId> {
        let id = self.cells.get(&node).copied();
        assert!(
            id.is_some(),
            "{operation}: node {node:?} is not tracked by this flow box"
        );
        id
    }
}

impl<P: LayoutProxy> ChildSubscriber<P> for FlowBox<P> {
    fn apply_update(&mut self, update: ChildUpdate<P>) -> anyhow::Result<()> {
        if self.constraint.is_disposed() {
            debug!(target: "flow::box", "update ignored after dispose");
            return Ok(());
        }
        match update {
            ChildUpdate::Inserted {
                node,
                proxy,
                index,
                options,
            } => {
                assert!(
                    !self.cells.contains_key(&node),
                    "inserted: node {node:?} is already tracked by this flow box"
                );
                let cell = FlowCell::new(proxy, options)
                    .with_context(|| format!("invalid layout options for node {node:?}"))?;
                if let Some(id) = self.constraint.insert_cell(index, cell) {
                    trace!(target: "flow::box", "node {node:?} -> {id:?} at {index}");
                    self.cells.insert(node, id);
                }
            }
            ChildUpdate::Removed { node } => {
                if let Some(id) = self.tracked(node, "removed") {
                    self.cells.remove(&node);
                    self.constraint.remove_cell(id);
                    trace!(target: "flow::box", "node {node:?} released {id:?}");
                }
            }
            ChildUpdate::Reordered {
                min_index,
                max_index,
                nodes,
            } => {
                let ids: Vec<CellId> = nodes
                    .iter()
                    .filter_map(|&node| self.tracked(node, "reordered"))
                    .collect();
                self.constraint.reorder_cells(&ids, min_index, max_index);
            }
            ChildUpdate::OptionsChanged { node, options } => {
                if let Some(id) = self.tracked(node, "options changed") {
                    self.constraint
                        .set_cell_options(id, options)
                        .with_context(|| format!("invalid layout options for node {node:?}"))?;
                }
            }
            ChildUpdate::Changed => self.constraint.update_layout_automatically(),
        }
        Ok(())
    }
}
