//! Axis resolution.
//!
//! A container's orientation names its main axis; the cross axis is the other one.
//! The same enum doubles as the axis argument of [`crate::LayoutProxy`].

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// Layout direction of a container, or an axis of a node.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// Main axis runs left to right; widths are main sizes.
    #[default]
    Horizontal,
    /// Main axis runs top to bottom; heights are main sizes.
    Vertical,
}

impl Orientation {
    /// The perpendicular axis.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Select the value that belongs to this axis out of a `(horizontal, vertical)` pair.
    #[inline]
    pub fn pick<T>(self, horizontal: T, vertical: T) -> T {
        match self {
            Self::Horizontal => horizontal,
            Self::Vertical => vertical,
        }
    }
}

impl FromStr for Orientation {
    type Err = FlowError;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(FlowError::UnknownKeyword {
                option: "orientation",
                keyword: keyword.to_owned(),
            }),
        }
    }
}
