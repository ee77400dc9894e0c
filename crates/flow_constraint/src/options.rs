//! Alignment keywords, margins and the per-cell option bag.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::axis::Orientation;
use crate::error::{FlowError, optional_non_negative};

/// Cross-axis placement of a cell inside its line.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    /// Against the line's cross-start edge.
    #[serde(alias = "top", alias = "left")]
    Start,
    /// Against the line's cross-end edge.
    #[serde(alias = "bottom", alias = "right")]
    End,
    /// Centered in the line.
    #[default]
    Center,
    /// Sized to the line's cross size minus margins.
    Stretch,
    /// Local origins of all origin-aligned cells share one reference line.
    Origin,
}

impl FromStr for Align {
    type Err = FlowError;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword {
            "start" | "top" | "left" => Ok(Self::Start),
            "end" | "bottom" | "right" => Ok(Self::End),
            "center" => Ok(Self::Center),
            "stretch" => Ok(Self::Stretch),
            "origin" => Ok(Self::Origin),
            _ => Err(FlowError::UnknownKeyword {
                option: "align",
                keyword: keyword.to_owned(),
            }),
        }
    }
}

/// Distribution of free space among cells (main axis) or lines (cross axis).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Justify {
    /// Packed at the start.
    #[default]
    #[serde(alias = "top", alias = "left")]
    Start,
    /// Packed at the end.
    #[serde(alias = "bottom", alias = "right")]
    End,
    /// Packed in the middle.
    Center,
    /// Free space only between items.
    SpaceBetween,
    /// Equal space around each item, so half-gaps at the ends.
    SpaceAround,
    /// Equal gaps everywhere, ends included.
    SpaceEvenly,
}

impl FromStr for Justify {
    type Err = FlowError;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword {
            "start" | "top" | "left" => Ok(Self::Start),
            "end" | "bottom" | "right" => Ok(Self::End),
            "center" => Ok(Self::Center),
            "spaceBetween" => Ok(Self::SpaceBetween),
            "spaceAround" => Ok(Self::SpaceAround),
            "spaceEvenly" => Ok(Self::SpaceEvenly),
            _ => Err(FlowError::UnknownKeyword {
                option: "justify",
                keyword: keyword.to_owned(),
            }),
        }
    }
}

/// Resolved margins of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margins {
    /// Margin before the cell along `axis` (left or top).
    #[inline]
    pub const fn leading(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }

    /// Margin after the cell along `axis` (right or bottom).
    #[inline]
    pub const fn trailing(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.right,
            Orientation::Vertical => self.bottom,
        }
    }
}

/// Layout options of a child, or the container defaults they fall back to.
///
/// Every field is optional; an absent field defers to the container default and
/// finally to the built-in default. Margin shorthands resolve from the most
/// specific key (`leftMargin`) through the axis key (`xMargin`) to `margin`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellOptions {
    pub align: Option<Align>,
    /// Cross-axis alignment override that wins over `align`.
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
    pub min_content_width: Option<f32>,
    pub min_content_height: Option<f32>,
    pub max_content_width: Option<f32>,
    pub max_content_height: Option<f32>,
}

impl CellOptions {
    /// Reject negative or non-finite numbers.
    ///
    /// # Errors
    /// Returns the first invalid option found.
    pub fn validate(&self) -> Result<(), FlowError> {
        let numeric = [
            ("grow", self.grow),
            ("margin", self.margin),
            ("xMargin", self.x_margin),
            ("yMargin", self.y_margin),
            ("leftMargin", self.left_margin),
            ("rightMargin", self.right_margin),
            ("topMargin", self.top_margin),
            ("bottomMargin", self.bottom_margin),
            ("minContentWidth", self.min_content_width),
            ("minContentHeight", self.min_content_height),
            ("maxContentWidth", self.max_content_width),
            ("maxContentHeight", self.max_content_height),
        ];
        for (option, value) in numeric {
            optional_non_negative(option, value)?;
        }
        Ok(())
    }

    /// Margin before the cell along `axis`, if any key in the shorthand chain sets it.
    pub fn leading_margin(&self, axis: Orientation) -> Option<f32> {
        let side = axis.pick(self.left_margin, self.top_margin);
        side.or_else(|| self.axis_margin(axis)).or(self.margin)
    }

    /// Margin after the cell along `axis`, if any key in the shorthand chain sets it.
    pub fn trailing_margin(&self, axis: Orientation) -> Option<f32> {
        let side = axis.pick(self.right_margin, self.bottom_margin);
        side.or_else(|| self.axis_margin(axis)).or(self.margin)
    }

    /// Content minimum along `axis`.
    pub fn min_content(&self, axis: Orientation) -> Option<f32> {
        axis.pick(self.min_content_width, self.min_content_height)
    }

    /// Content maximum along `axis`.
    pub fn max_content(&self, axis: Orientation) -> Option<f32> {
        axis.pick(self.max_content_width, self.max_content_height)
    }

    fn axis_margin(&self, axis: Orientation) -> Option<f32> {
        axis.pick(self.x_margin, self.y_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if aliases or camelCase keywords fail to parse.
    fn keywords_and_aliases() {
        assert_eq!("top".parse::<Align>(), Ok(Align::Start));
        assert_eq!("right".parse::<Align>(), Ok(Align::End));
        assert_eq!("origin".parse::<Align>(), Ok(Align::Origin));
        assert_eq!("spaceEvenly".parse::<Justify>(), Ok(Justify::SpaceEvenly));
        assert!("space-between".parse::<Justify>().is_err());
    }

    #[test]
    /// # Panics
    /// Panics if the margin shorthand chain resolves in the wrong order.
    fn margin_shorthands_resolve_most_specific_first() {
        let options = CellOptions {
            margin: Some(1.0),
            x_margin: Some(2.0),
            left_margin: Some(3.0),
            ..CellOptions::default()
        };
        assert_eq!(options.leading_margin(Orientation::Horizontal), Some(3.0));
        assert_eq!(options.trailing_margin(Orientation::Horizontal), Some(2.0));
        assert_eq!(options.leading_margin(Orientation::Vertical), Some(1.0));
        assert_eq!(CellOptions::default().leading_margin(Orientation::Vertical), None);
    }

    #[test]
    /// # Panics
    /// Panics if negative grow passes validation.
    fn validation_rejects_negative_grow() {
        let options = CellOptions {
            grow: Some(-1.0),
            ..CellOptions::default()
        };
        assert_eq!(
            options.validate(),
            Err(FlowError::NegativeValue {
                option: "grow",
                value: -1.0
            })
        );
    }

    #[test]
    /// # Panics
    /// Panics if the option bag does not deserialize from camelCase keys.
    fn deserializes_camel_case_bag() {
        let options: CellOptions = serde_json::from_str(
            r#"{"align":"bottom","cellAlign":"stretch","grow":2,"xMargin":4,"minContentWidth":10}"#,
        )
        .unwrap_or_default();
        assert_eq!(options.align, Some(Align::End));
        assert_eq!(options.cell_align, Some(Align::Stretch));
        assert_eq!(options.grow, Some(2.0));
        assert_eq!(options.x_margin, Some(4.0));
        assert_eq!(options.min_content_width, Some(10.0));
    }
}
