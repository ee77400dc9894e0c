//! Flow cells: one child plus its layout options.
//!
//! A cell resolves its effective attributes by merging the child's options over
//! the container defaults, field by field. Nothing here depends on the line or
//! pass the cell ends up in.

use crate::axis::Orientation;
use crate::error::FlowError;
use crate::options::{Align, CellOptions, Margins};
use crate::proxy::LayoutProxy;

/// Stable handle of a cell inside a [`crate::FlowConstraint`] arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

/// Minimum, base and maximum size of a cell along one axis, margins excluded.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SizeBounds {
    pub minimum: f32,
    /// Preferred size clamped into `[minimum, maximum]`.
    pub base: f32,
    /// `f32::INFINITY` when unbounded.
    pub maximum: f32,
}

/// A child as seen by the solver.
#[derive(Debug)]
pub struct FlowCell<P> {
    proxy: P,
    options: CellOptions,
}

impl<P: LayoutProxy> FlowCell<P> {
    /// Wrap `proxy` with the child's own layout options.
    ///
    /// # Errors
    /// Returns the first invalid numeric option.
    pub fn new(proxy: P, options: CellOptions) -> Result<Self, FlowError> {
        options.validate()?;
        Ok(Self { proxy, options })
    }

    pub fn proxy(&self) -> &P {
        &self.proxy
    }

    pub fn proxy_mut(&mut self) -> &mut P {
        &mut self.proxy
    }

    /// Release the proxy, consuming the cell.
    pub fn into_proxy(self) -> P {
        self.proxy
    }

    pub fn options(&self) -> &CellOptions {
        &self.options
    }

    /// Replace the child's options.
    ///
    /// # Errors
    /// Returns the first invalid numeric option; the previous options are kept.
    pub fn set_options(&mut self, options: CellOptions) -> Result<(), FlowError> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub fn effective_align(&self, defaults: &CellOptions) -> Align {
        self.options.align.or(defaults.align).unwrap_or_default()
    }

    /// Alignment used inside a line: the `cell_align` override if either side sets
    /// one, otherwise [`Self::effective_align`].
    pub fn effective_cell_align(&self, defaults: &CellOptions) -> Align {
        self.options
            .cell_align
            .or(defaults.cell_align)
            .unwrap_or_else(|| self.effective_align(defaults))
    }

    /// Whether the cell fills its line's cross size.
    pub fn effective_stretch(&self, defaults: &CellOptions) -> bool {
        self.options
            .stretch
            .or(defaults.stretch)
            .unwrap_or(false)
            || self.effective_cell_align(defaults) == Align::Stretch
    }

    pub fn effective_grow(&self, defaults: &CellOptions) -> f32 {
        self.options.grow.or(defaults.grow).unwrap_or(0.0)
    }

    pub fn effective_margins(&self, defaults: &CellOptions) -> Margins {
        let leading = |axis| {
            self.options
                .leading_margin(axis)
                .or_else(|| defaults.leading_margin(axis))
                .unwrap_or(0.0)
        };
        let trailing = |axis| {
            self.options
                .trailing_margin(axis)
                .or_else(|| defaults.trailing_margin(axis))
                .unwrap_or(0.0)
        };
        Margins {
            left: leading(Orientation::Horizontal),
            right: trailing(Orientation::Horizontal),
            top: leading(Orientation::Vertical),
            bottom: trailing(Orientation::Vertical),
        }
    }

    /// Size bounds along `axis` from the proxy and the content limits.
    ///
    /// A content maximum below the minimum is raised to the minimum.
    pub fn size_bounds(&self, axis: Orientation, defaults: &CellOptions) -> SizeBounds {
        let min_content = self
            .options
            .min_content(axis)
            .or_else(|| defaults.min_content(axis))
            .unwrap_or(0.0);
        let max_content = self
            .options
            .max_content(axis)
            .or_else(|| defaults.max_content(axis));
        let minimum = self.proxy.minimum_size(axis).max(min_content).max(0.0);
        let maximum = [self.proxy.maximum_size(axis), max_content]
            .into_iter()
            .flatten()
            .fold(f32::INFINITY, f32::min)
            .max(minimum);
        let base = self.proxy.preferred_size(axis).max(minimum).min(maximum);
        SizeBounds {
            minimum,
            base,
            maximum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Fixed {
        minimum: f32,
        preferred: f32,
        maximum: Option<f32>,
    }

    impl LayoutProxy for Fixed {
        fn minimum_size(&self, _axis: Orientation) -> f32 {
            self.minimum
        }

        fn preferred_size(&self, _axis: Orientation) -> f32 {
            self.preferred
        }

        fn maximum_size(&self, _axis: Orientation) -> Option<f32> {
            self.maximum
        }

        fn set_position(&mut self, _axis: Orientation, _value: f32) {}

        fn set_size(&mut self, _axis: Orientation, _value: f32) {}
    }

    fn cell(options: CellOptions) -> Option<FlowCell<Fixed>> {
        FlowCell::new(
            Fixed {
                minimum: 10.0,
                preferred: 30.0,
                maximum: Some(80.0),
            },
            options,
        )
        .ok()
    }

    #[test]
    /// # Panics
    /// Panics if child options do not win over container defaults.
    fn child_options_take_precedence() {
        let defaults = CellOptions {
            align: Some(Align::End),
            grow: Some(1.0),
            stretch: Some(true),
            ..CellOptions::default()
        };
        let Some(flow_cell) = cell(CellOptions {
            align: Some(Align::Start),
            stretch: Some(false),
            ..CellOptions::default()
        }) else {
            return;
        };
        assert_eq!(flow_cell.effective_align(&defaults), Align::Start);
        assert!(!flow_cell.effective_stretch(&defaults));
        assert!((flow_cell.effective_grow(&defaults) - 1.0).abs() < 0.001);
    }

    #[test]
    /// # Panics
    /// Panics if `cell_align` does not override `align`, or stretch alignment does not imply stretch.
    fn cell_align_overrides_align() {
        let defaults = CellOptions {
            cell_align: Some(Align::Stretch),
            ..CellOptions::default()
        };
        let Some(flow_cell) = cell(CellOptions {
            align: Some(Align::Start),
            ..CellOptions::default()
        }) else {
            return;
        };
        assert_eq!(flow_cell.effective_cell_align(&defaults), Align::Stretch);
        assert!(flow_cell.effective_stretch(&defaults));
        assert_eq!(
            flow_cell.effective_cell_align(&CellOptions::default()),
            Align::Start
        );
    }

    #[test]
    /// # Panics
    /// Panics if per-side margins do not fall back from child to container.
    fn margins_merge_per_side() {
        let defaults = CellOptions {
            margin: Some(2.0),
            ..CellOptions::default()
        };
        let Some(flow_cell) = cell(CellOptions {
            y_margin: Some(5.0),
            ..CellOptions::default()
        }) else {
            return;
        };
        let margins = flow_cell.effective_margins(&defaults);
        assert_eq!(
            margins,
            Margins {
                left: 2.0,
                right: 2.0,
                top: 5.0,
                bottom: 5.0
            }
        );
    }

    #[test]
    /// # Panics
    /// Panics if content limits are not folded into the proxy sizes.
    fn size_bounds_apply_content_limits() {
        let Some(flow_cell) = cell(CellOptions {
            min_content_width: Some(40.0),
            max_content_height: Some(20.0),
            ..CellOptions::default()
        }) else {
            return;
        };
        let defaults = CellOptions::default();
        let width = flow_cell.size_bounds(Orientation::Horizontal, &defaults);
        assert!((width.minimum - 40.0).abs() < 0.001);
        assert!((width.base - 40.0).abs() < 0.001);
        assert!((width.maximum - 80.0).abs() < 0.001);
        let height = flow_cell.size_bounds(Orientation::Vertical, &defaults);
        assert!((height.base - 20.0).abs() < 0.001);
        assert!((height.maximum - 20.0).abs() < 0.001);
    }

    #[test]
    /// # Panics
    /// Panics if an invalid option bag is accepted.
    fn construction_validates_options() {
        let invalid = CellOptions {
            left_margin: Some(-3.0),
            ..CellOptions::default()
        };
        assert!(cell(invalid).is_none());
    }
}
