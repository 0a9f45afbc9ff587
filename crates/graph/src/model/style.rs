//! Edge rendering styles.

use std::fmt;
use std::str::FromStr;

use mindmap_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Connector path drawn between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorShape {
    Default,
    Straight,
    Step,
    #[default]
    Smoothstep,
    Bezier,
}

impl ConnectorShape {
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::Straight,
        Self::Step,
        Self::Smoothstep,
        Self::Bezier,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Straight => "straight",
            Self::Step => "step",
            Self::Smoothstep => "smoothstep",
            Self::Bezier => "bezier",
        }
    }
}

impl fmt::Display for ConnectorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str() == lowered)
            .ok_or_else(|| {
                Error::invalid_field(
                    "style",
                    format!("expected default, straight, step, smoothstep or bezier, got '{s}'"),
                )
            })
    }
}

/// Stroke treatment applied to every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Animated,
}

impl LineMode {
    pub const ALL: [Self; 4] = [Self::Solid, Self::Dashed, Self::Dotted, Self::Animated];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Animated => "animated",
        }
    }

    /// Whether edges drawn in this mode are animated.
    pub const fn is_animated(self) -> bool {
        matches!(self, Self::Animated)
    }

    /// SVG `stroke-dasharray` hint for this mode, if it has one.
    pub const fn dash_array(self) -> Option<&'static str> {
        match self {
            Self::Dashed => Some("6 4"),
            Self::Dotted => Some("2 3"),
            Self::Solid | Self::Animated => None,
        }
    }
}

impl fmt::Display for LineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == lowered)
            .ok_or_else(|| {
                Error::invalid_field(
                    "line",
                    format!("expected solid, dashed, dotted or animated, got '{s}'"),
                )
            })
    }
}

/// Defaults handed to the renderer for edges it creates, and stamped onto
/// edges the engine creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeOptions {
    pub style: ConnectorShape,
    pub animated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<&'static str>,
}

impl EdgeOptions {
    pub const fn new(style: ConnectorShape, line: LineMode) -> Self {
        Self {
            style,
            animated: line.is_animated(),
            stroke_dasharray: line.dash_array(),
        }
    }
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self::new(ConnectorShape::default(), LineMode::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_only_animated_mode_animates() {
        assert!(LineMode::Animated.is_animated());
        assert!(!LineMode::Solid.is_animated());
        assert!(!LineMode::Dashed.is_animated());
        assert!(!LineMode::Dotted.is_animated());
    }

    #[test]
    fn test_dash_hints() {
        assert_eq!(LineMode::Solid.dash_array(), None);
        assert_eq!(LineMode::Animated.dash_array(), None);
        assert!(LineMode::Dashed.dash_array().is_some());
        assert_ne!(LineMode::Dashed.dash_array(), LineMode::Dotted.dash_array());
    }

    #[test]
    fn test_connector_parse_round_trip() {
        for shape in ConnectorShape::ALL {
            assert_eq!(shape.as_str().parse::<ConnectorShape>().unwrap(), shape);
        }
        assert_eq!("SmoothStep".parse::<ConnectorShape>().unwrap(), ConnectorShape::Smoothstep);
        assert!("curvy".parse::<ConnectorShape>().is_err());
    }

    #[test]
    fn test_default_options() {
        let options = EdgeOptions::default();
        assert_eq!(options.style, ConnectorShape::Smoothstep);
        assert!(!options.animated);
        assert_eq!(options.stroke_dasharray, None);
    }

    #[test]
    fn test_options_serialization() {
        let json = serde_json::to_value(EdgeOptions::new(ConnectorShape::Step, LineMode::Dotted))
            .unwrap();
        assert_eq!(json["style"], "step");
        assert_eq!(json["animated"], false);
        assert_eq!(json["strokeDasharray"], "2 3");
    }
}
