// File: crates/line-core/src/lib.rs
// Summary: Core library entry point; exports the line chart plugin API.

pub mod error;
pub mod types;
pub mod series;
pub mod domain;
pub mod ticks;
pub mod scale;
pub mod axis;
pub mod line;
pub mod svg;
pub mod marker;
pub mod highlight;
pub mod options;
pub mod chart;
pub mod plugin;

pub use error::{LineError, Result};
pub use series::{normalize, Point, SeriesShape};
pub use domain::{extent, raw_extent, time_extent, Domain};
pub use scale::{LinearScale, Scale, TimeScale};
pub use axis::{Axis, Orient, Tick};
pub use line::{Curve, LineGenerator, LinePath};
pub use svg::{Element, Node};
pub use marker::{Marker, MarkerLayer, HIGHLIGHT_RADIUS, NORMAL_RADIUS};
pub use highlight::{ChannelRegistry, Thumb, ThumbChannel, MAIN_SCOPE};
pub use options::{LineCap, LineJoin, LineOptions};
pub use chart::{ChartLayout, LineChart, PointerEvent};
pub use plugin::{DataSource, ItemModel, ItemView, LinePlugin, Plugin, PluginRegistry, LINE_PLUGIN};
pub use types::Insets;
