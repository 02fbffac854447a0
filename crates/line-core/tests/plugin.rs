// File: crates/line-core/tests/plugin.rs
// Purpose: Plugin registry dispatch, emit into item views, and views sharing a page channel.

use line_core::{
    ChannelRegistry, DataSource, ItemModel, ItemView, LineError, PluginRegistry, PointerEvent, Result, Scale,
    HIGHLIGHT_RADIUS, LINE_PLUGIN, NORMAL_RADIUS,
};
use serde_json::{json, Value};

struct Unavailable;

impl DataSource for Unavailable {
    fn get_data(&self) -> Result<Value> {
        Err(LineError::DataSource("no data item above".into()))
    }
}

fn item(id: &str) -> ItemModel {
    serde_json::from_value(json!({"type": "line", "id": id, "text": ""})).expect("item json")
}

#[test]
fn builtins_include_the_line_plugin() {
    let registry = PluginRegistry::with_builtins();
    assert_eq!(registry.names(), vec![LINE_PLUGIN]);
    assert!(registry.get("line").is_some());
    assert!(registry.get("chart").is_none());
}

#[test]
fn emit_appends_one_svg_into_the_item() {
    let registry = PluginRegistry::with_builtins();
    let mut channels = ChannelRegistry::new();
    let data = json!([[1_700_000_000i64, 12], [1_700_086_400i64, 40], [1_700_172_800i64, 87]]);
    let model = item("a1");
    let mut view = ItemView::new(&model, channels.main(), data);

    registry.emit(&mut view, &model).expect("emit");

    assert_eq!(view.charts().len(), 1);
    let root = view.element();
    assert_eq!(root.get_attr("class"), Some("item line"));
    assert_eq!(root.get_attr("data-id"), Some("a1"));
    assert_eq!(root.find_all("svg", None).len(), 1);

    let chart = &view.charts()[0];
    assert_eq!(chart.y_scale().domain().min, 10.0);
    assert_eq!(chart.y_scale().domain().max, 90.0);
    assert_eq!(chart.options().width, 430);
    assert_eq!(view.to_html().matches("<circle").count(), 3);
}

#[test]
fn charts_in_different_items_share_the_page_channel() {
    let registry = PluginRegistry::with_builtins();
    let mut channels = ChannelRegistry::new();
    let first = json!([[1_700_000_000i64, 1], [1_700_086_400i64, 2], [1_700_172_800i64, 3]]);
    let second = json!([[1_700_086_400i64, 5], [1_700_172_800i64, 7]]);

    let (ma, mb) = (item("a"), item("b"));
    let mut a = ItemView::new(&ma, channels.main(), first);
    let mut b = ItemView::new(&mb, channels.main(), second);
    registry.emit(&mut a, &ma).unwrap();
    registry.emit(&mut b, &mb).unwrap();

    a.dispatch(0, PointerEvent::Enter { index: 1 }).unwrap();
    assert_eq!(b.charts()[0].markers().radii(), vec![HIGHLIGHT_RADIUS, NORMAL_RADIUS]);
    assert!(b.to_html().contains("r=\"8\""));

    assert!(matches!(
        a.dispatch(3, PointerEvent::Leave { index: 0 }),
        Err(LineError::ChartOutOfRange { index: 3, len: 1 })
    ));

    b.clear();
    assert!(b.charts().is_empty());
    assert_eq!(a.channel().subscriber_count(), 1);
}

#[test]
fn emit_errors_surface() {
    let registry = PluginRegistry::with_builtins();
    let mut channels = ChannelRegistry::new();

    let model = item("x");
    let mut view = ItemView::new(&model, channels.main(), Unavailable);
    assert!(matches!(registry.emit(&mut view, &model), Err(LineError::DataSource(_))));

    let mut view = ItemView::new(&model, channels.main(), json!([]));
    assert!(matches!(registry.emit(&mut view, &model), Err(LineError::EmptySeries)));
    assert!(view.charts().is_empty());

    let other = ItemModel::new("paragraph", "p1");
    let mut view = ItemView::new(&other, channels.main(), json!([]));
    assert!(matches!(registry.emit(&mut view, &other), Err(LineError::UnknownPlugin(t)) if t == "paragraph"));
}

#[test]
fn single_point_series_spans_days() {
    let mut channels = ChannelRegistry::new();
    let model = item("one");
    let mut view = ItemView::new(&model, channels.main(), json!([[1_700_000_000i64, 5]]));
    PluginRegistry::with_builtins().emit(&mut view, &model).expect("emit");

    let x = view.charts()[0].x_scale().domain();
    assert_eq!((x.min, x.max), (1_699_900_000_000.0, 1_700_100_000_000.0));
    assert_eq!(view.to_html().matches("<circle").count(), 1);
}
