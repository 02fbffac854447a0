// File: crates/line-core/src/options.rs
// Summary: Chart configuration with defaults; deserializable from JSON overrides.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::line::Curve;
use crate::types::{Insets, HEIGHT, PLUGIN_HEIGHT, PLUGIN_WIDTH, WIDTH};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

impl fmt::Display for LineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        })
    }
}

impl fmt::Display for LineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        })
    }
}

/// Everything that shapes one rendered chart. Missing JSON fields take the
/// defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineOptions {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
    /// `[xmin, xmax]` in epoch millis; the raw extent of the dates when unset.
    pub x_domain: Option<Domain>,
    /// `[ymin, ymax]`; `[0, max]` when unset.
    pub y_domain: Option<Domain>,
    pub y_label: Option<String>,
    /// Fixed decimals for y tick labels.
    pub y_precision: Option<usize>,
    pub curve: Curve,
    pub color: String,
    pub stroke_linecap: LineCap,
    pub stroke_linejoin: LineJoin,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            x_domain: None,
            y_domain: None,
            y_label: None,
            y_precision: None,
            curve: Curve::Linear,
            color: "currentColor".to_string(),
            stroke_linecap: LineCap::Round,
            stroke_linejoin: LineJoin::Round,
            stroke_width: 1.5,
            stroke_opacity: 1.0,
        }
    }
}

impl LineOptions {
    /// Settings used by the wiki line plugin.
    pub fn plugin() -> Self {
        Self { width: PLUGIN_WIDTH, height: PLUGIN_HEIGHT, color: "steelblue".to_string(), ..Self::default() }
    }

    pub fn with_domains(mut self, x: Domain, y: Domain) -> Self {
        self.x_domain = Some(x);
        self.y_domain = Some(y);
        self
    }

    /// Pixel span of the x range: `[left, width - right]`.
    pub fn x_range(&self) -> (f64, f64) {
        (f64::from(self.insets.left), f64::from(self.width) - f64::from(self.insets.right))
    }

    /// Pixel span of the y range: `[height - bottom, top]`.
    pub fn y_range(&self) -> (f64, f64) {
        (f64::from(self.height) - f64::from(self.insets.bottom), f64::from(self.insets.top))
    }

    pub fn x_tick_count(&self) -> f64 {
        f64::from(self.width) / 80.0
    }

    pub fn y_tick_count(&self) -> f64 {
        f64::from(self.height) / 40.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_overrides_keep_defaults() {
        let o: LineOptions = serde_json::from_str(r#"{"width": 500, "color": "tomato", "strokeLinecap": "square"}"#).unwrap();
        assert_eq!(o.width, 500);
        assert_eq!(o.height, HEIGHT);
        assert_eq!(o.color, "tomato");
        assert_eq!(o.stroke_linecap, LineCap::Square);
        assert_eq!(o.insets, Insets::new(40, 30, 20, 30));
    }

    #[test]
    fn plugin_preset() {
        let o = LineOptions::plugin();
        assert_eq!((o.width, o.height), (430, 355));
        assert_eq!(o.x_range(), (40.0, 400.0));
        assert_eq!(o.y_range(), (325.0, 20.0));
        assert_eq!(o.color, "steelblue");
    }
}
