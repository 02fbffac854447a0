// File: crates/line-core/src/plugin.rs
// Summary: Wiki plugin contract (emit/bind), the line plugin, and the host-side item view.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::chart::{LineChart, PointerEvent};
use crate::domain::{extent, time_extent};
use crate::error::{LineError, Result};
use crate::highlight::ThumbChannel;
use crate::options::LineOptions;
use crate::series::{normalize, Point};
use crate::svg::Element;

/// Name the line plugin registers under.
pub const LINE_PLUGIN: &str = "line";

/// A story item as the wiki stores it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemModel {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
}

impl ItemModel {
    pub fn new(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self { item_type: item_type.into(), id: id.into(), text: String::new() }
    }
}

/// Where a plugin gets its series from; the host's page-level data lookup.
pub trait DataSource {
    fn get_data(&self) -> Result<Value>;
}

impl DataSource for Value {
    fn get_data(&self) -> Result<Value> {
        Ok(self.clone())
    }
}

/// Host container for one item: the DOM element plugins append into, the
/// thumb channel of the page region it sits in, and its data source.
pub struct ItemView {
    element: Element,
    channel: ThumbChannel,
    source: Box<dyn DataSource>,
    charts: Vec<LineChart>,
}

impl ItemView {
    pub fn new(item: &ItemModel, channel: ThumbChannel, source: impl DataSource + 'static) -> Self {
        let element = Element::new("div")
            .attr("class", format!("item {}", item.item_type))
            .attr("data-id", &item.id);
        Self { element, channel, source: Box::new(source), charts: Vec::new() }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn channel(&self) -> &ThumbChannel {
        &self.channel
    }

    pub fn data(&self) -> Result<Value> {
        self.source.get_data()
    }

    pub fn charts(&self) -> &[LineChart] {
        &self.charts
    }

    /// Append the chart's element to the container and keep the chart alive.
    pub fn mount(&mut self, chart: LineChart) {
        self.element.append(chart.element());
        self.charts.push(chart);
    }

    /// Route a pointer event to a mounted chart.
    pub fn dispatch(&self, chart: usize, event: PointerEvent) -> Result<()> {
        let target = self
            .charts
            .get(chart)
            .ok_or(LineError::ChartOutOfRange { index: chart, len: self.charts.len() })?;
        target.handle_event(event)
    }

    /// Empty the container. Dropped charts leave their channel.
    pub fn clear(&mut self) {
        self.element.clear();
        self.charts.clear();
    }

    pub fn to_html(&self) -> String {
        self.element.to_string()
    }
}

/// A renderer the host looks up by item type.
pub trait Plugin {
    fn name(&self) -> &'static str;
    /// Render `item` into `view`.
    fn emit(&self, view: &mut ItemView, item: &ItemModel) -> Result<()>;
    /// Attach editing behavior after emit.
    fn bind(&self, _view: &mut ItemView, _item: &ItemModel) -> Result<()> {
        Ok(())
    }
}

/// Line chart of the page's numeric series.
#[derive(Clone, Debug)]
pub struct LinePlugin {
    pub options: LineOptions,
}

impl Default for LinePlugin {
    fn default() -> Self {
        Self { options: LineOptions::plugin() }
    }
}

impl LinePlugin {
    /// Normalize the series and lay out a chart with both domains rounded
    /// outward to a power-of-ten step.
    pub fn chart(&self, series: &Value, channel: Option<ThumbChannel>) -> Result<LineChart> {
        let points = normalize(series)?;
        let x = time_extent(points.iter().map(Point::t_millis))?;
        let y = extent(points.iter().map(|p| p.y))?;
        let options = self.options.clone().with_domains(x, y);
        LineChart::new(&points, options, channel)
    }
}

impl Plugin for LinePlugin {
    fn name(&self) -> &'static str {
        LINE_PLUGIN
    }

    fn emit(&self, view: &mut ItemView, item: &ItemModel) -> Result<()> {
        let series = view.data()?;
        let chart = self.chart(&series, Some(view.channel().clone()))?;
        debug!(item = %item.id, markers = chart.markers().len(), "line plugin emit");
        view.mount(chart);
        Ok(())
    }
}

/// Plugins known to the host, keyed by item type.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<&'static str, Box<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the line plugin installed.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(LinePlugin::default());
        reg
    }

    pub fn register(&mut self, plugin: impl Plugin + 'static) {
        info!(plugin = plugin.name(), "plugin registered");
        self.plugins.insert(plugin.name(), Box::new(plugin));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins.get(name).map(|p| p.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.plugins.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Emit then bind `item` with the plugin registered for its type.
    pub fn emit(&self, view: &mut ItemView, item: &ItemModel) -> Result<()> {
        let plugin = self
            .get(&item.item_type)
            .ok_or_else(|| LineError::UnknownPlugin(item.item_type.clone()))?;
        plugin.emit(view, item)?;
        plugin.bind(view, item)
    }
}
