//! Tests for the flow constraint solver.

use super::*;

mod publication_tests;

/// Proxy recording the geometry written by the solver.
#[derive(Clone, Debug)]
pub struct TestProxy {
    pub minimum: (f32, f32),
    pub preferred: (f32, f32),
    pub maximum: (Option<f32>, Option<f32>),
    pub origin: (f32, f32),
    pub visible: bool,
    pub position: (f32, f32),
    pub size: (f32, f32),
    pub writes: usize,
}

impl LayoutProxy for TestProxy {
    fn minimum_size(&self, axis: Orientation) -> f32 {
        axis.pick(self.minimum.0, self.minimum.1)
    }

    fn preferred_size(&self, axis: Orientation) -> f32 {
        axis.pick(self.preferred.0, self.preferred.1)
    }

    fn maximum_size(&self, axis: Orientation) -> Option<f32> {
        axis.pick(self.maximum.0, self.maximum.1)
    }

    fn origin_offset(&self, axis: Orientation) -> f32 {
        axis.pick(self.origin.0, self.origin.1)
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_position(&mut self, axis: Orientation, value: f32) {
        self.writes += 1;
        match axis {
            Orientation::Horizontal => self.position.0 = value,
            Orientation::Vertical => self.position.1 = value,
        }
    }

    fn set_size(&mut self, axis: Orientation, value: f32) {
        self.writes += 1;
        match axis {
            Orientation::Horizontal => self.size.0 = value,
            Orientation::Vertical => self.size.1 = value,
        }
    }
}

/// Helper to create a proxy with no minimum, no maximum and the given preferred size.
#[inline]
pub fn sized(width: f32, height: f32) -> TestProxy {
    TestProxy {
        minimum: (0.0, 0.0),
        preferred: (width, height),
        maximum: (None, None),
        origin: (0.0, 0.0),
        visible: true,
        position: (0.0, 0.0),
        size: (0.0, 0.0),
        writes: 0,
    }
}

/// Helper to build a constraint holding one cell per `(proxy, options)` pair, in order.
///
/// # Errors
/// Returns an error when the config or any option bag is invalid.
pub fn build(
    config: FlowConfig,
    available: (Option<f32>, Option<f32>),
    cells: Vec<(TestProxy, CellOptions)>,
) -> Result<(FlowConstraint<TestProxy>, Vec<CellId>), FlowError> {
    let mut constraint = FlowConstraint::new(config)?;
    let mut ids = Vec::with_capacity(cells.len());
    {
        let mut batch = constraint.batch();
        batch.set_available_size(available.0, available.1)?;
        for (proxy, options) in cells {
            let index = batch.len();
            if let Some(id) = batch.insert_cell(index, FlowCell::new(proxy, options)?) {
                ids.push(id);
            }
        }
    }
    Ok((constraint, ids))
}

/// Helper to build a constraint of plain cells with the given preferred sizes.
///
/// # Errors
/// Returns an error when the config is invalid.
pub fn build_sized(
    config: FlowConfig,
    available: (Option<f32>, Option<f32>),
    sizes: &[(f32, f32)],
) -> Result<(FlowConstraint<TestProxy>, Vec<CellId>), FlowError> {
    let cells = sizes
        .iter()
        .map(|&(width, height)| (sized(width, height), CellOptions::default()))
        .collect();
    build(config, available, cells)
}

/// Geometry last written to the cell: `(x, y, width, height)`.
pub fn frame(constraint: &FlowConstraint<TestProxy>, id: CellId) -> (f32, f32, f32, f32) {
    constraint.cell(id).map_or((f32::NAN, f32::NAN, f32::NAN, f32::NAN), |cell| {
        let proxy = cell.proxy();
        (proxy.position.0, proxy.position.1, proxy.size.0, proxy.size.1)
    })
}

#[inline]
pub fn approx(got: f32, expected: f32) -> bool {
    (got - expected).abs() < 0.001
}

/// Assert every cell's frame, in the order of `ids`.
///
/// # Panics
/// Panics on the first frame differing from `expected`.
pub fn assert_frames(
    constraint: &FlowConstraint<TestProxy>,
    ids: &[CellId],
    expected: &[(f32, f32, f32, f32)],
) {
    assert_eq!(ids.len(), expected.len(), "frame count mismatch");
    for (id, want) in ids.iter().zip(expected) {
        let got = frame(constraint, *id);
        assert!(
            approx(got.0, want.0) && approx(got.1, want.1) && approx(got.2, want.2) && approx(got.3, want.3),
            "{id:?}: got {got:?}, expected {want:?}"
        );
    }
}
