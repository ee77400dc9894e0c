//! Tests for the container sizes published after a pass.

use super::*;

fn stiff(minimum: (f32, f32), preferred: (f32, f32)) -> TestProxy {
    let mut proxy = sized(preferred.0, preferred.1);
    proxy.minimum = minimum;
    proxy
}

fn assert_published(got: ContainerSizes, expected: (f32, f32, f32, f32)) {
    let (minimum_width, minimum_height, preferred_width, preferred_height) = expected;
    assert!(
        approx(got.minimum_width, minimum_width)
            && approx(got.minimum_height, minimum_height)
            && approx(got.preferred_width, preferred_width)
            && approx(got.preferred_height, preferred_height),
        "got {got:?}, expected {expected:?}"
    );
}

#[test]
/// # Panics
/// Panics if a single line does not publish summed minimums and its natural size.
fn single_line_sizes() -> Result<(), FlowError> {
    let config = FlowConfig {
        spacing: 4.0,
        ..FlowConfig::default()
    };
    let margined = CellOptions {
        x_margin: Some(1.0),
        ..CellOptions::default()
    };
    let (constraint, _) = build(
        config,
        (None, None),
        vec![
            (stiff((10.0, 5.0), (30.0, 12.0)), margined),
            (stiff((20.0, 8.0), (25.0, 9.0)), CellOptions::default()),
        ],
    )?;
    // min: 10 + 2 + 4 + 20; preferred: 32 + 4 + 25.
    assert_published(constraint.published(), (36.0, 8.0, 61.0, 12.0));
    Ok(())
}

#[test]
/// # Panics
/// Panics if a wrapping container does not publish its widest cell and laid-out height.
fn wrapping_sizes() -> Result<(), FlowError> {
    let config = FlowConfig {
        spacing: 10.0,
        line_spacing: 2.0,
        wrap: true,
        ..FlowConfig::default()
    };
    let (constraint, _) = build(
        config,
        (Some(140.0), None),
        vec![
            (stiff((15.0, 0.0), (60.0, 20.0)), CellOptions::default()),
            (stiff((40.0, 0.0), (60.0, 20.0)), CellOptions::default()),
            (stiff((25.0, 0.0), (60.0, 30.0)), CellOptions::default()),
        ],
    )?;
    assert_published(constraint.published(), (40.0, 52.0, 130.0, 52.0));
    Ok(())
}

#[test]
/// # Panics
/// Panics if the preferred main size leaves out space granted to growing cells.
fn preferred_includes_grow() -> Result<(), FlowError> {
    let options = CellOptions {
        grow: Some(1.0),
        ..CellOptions::default()
    };
    let (constraint, _) = build(
        FlowConfig::default(),
        (Some(90.0), None),
        vec![(sized(30.0, 10.0), options)],
    )?;
    assert!(approx(constraint.published().preferred_width, 90.0));
    Ok(())
}

#[test]
/// # Panics
/// Panics if the container content limits are not applied, floor winning.
fn container_content_limits() -> Result<(), FlowError> {
    let (mut constraint, _) = build_sized(
        FlowConfig::default(),
        (None, None),
        &[(50.0, 20.0), (50.0, 20.0)],
    )?;
    constraint.set_max_content(Orientation::Horizontal, Some(80.0))?;
    assert!(approx(constraint.published().preferred_width, 80.0));
    constraint.set_min_content(Orientation::Vertical, Some(30.0))?;
    assert!(approx(constraint.published().preferred_height, 30.0));
    assert!(approx(constraint.published().minimum_height, 30.0));
    constraint.set_min_content(Orientation::Horizontal, Some(120.0))?;
    assert!(approx(constraint.published().preferred_width, 120.0));
    assert!(constraint.set_max_content(Orientation::Vertical, Some(-1.0)).is_err());
    Ok(())
}

#[test]
/// # Panics
/// Panics if a vertical flow does not swap main and cross sizes in the publication.
fn vertical_sizes() -> Result<(), FlowError> {
    let config = FlowConfig {
        orientation: Orientation::Vertical,
        spacing: 5.0,
        ..FlowConfig::default()
    };
    let (constraint, ids) = build_sized(config, (None, None), &[(10.0, 20.0), (30.0, 40.0)])?;
    assert_published(constraint.published(), (0.0, 5.0, 30.0, 65.0));
    // Per-axis lookups.
    assert!(approx(constraint.published().preferred(Orientation::Vertical), 65.0));
    assert!(approx(constraint.published().minimum(Orientation::Vertical), 5.0));
    assert_frames(
        &constraint,
        &ids,
        &[(10.0, 0.0, 10.0, 20.0), (0.0, 25.0, 30.0, 40.0)],
    );
    Ok(())
}

#[test]
/// # Panics
/// Panics if an empty container publishes anything but zeros.
fn empty_container_publishes_zero() {
    let mut constraint: FlowConstraint<TestProxy> = FlowConstraint::default();
    constraint.update_layout();
    assert_eq!(constraint.layout_count(), 1);
    assert!(constraint.lines().is_empty());
    assert_published(constraint.published(), (0.0, 0.0, 0.0, 0.0));
}
