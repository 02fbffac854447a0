// File: crates/line-render-skia/tests/raster.rs
// Purpose: Rasterize a line plugin chart and check the PNG decodes at the chart size.

use line_core::{LinePlugin, PointerEvent};
use line_render_skia::{parse_color, render_png, render_png_bytes, RasterOptions};
use serde_json::json;
use skia_safe as skia;

fn series() -> serde_json::Value {
    json!([
        { "Date": "2024-01-01T00:00:00Z", "Price": 20 },
        { "Date": "2024-01-02T00:00:00Z", "Price": 40 },
        { "Date": "2024-01-03T00:00:00Z", "Price": 100 },
        { "Date": "2024-01-04T00:00:00Z", "Price": 60 }
    ])
}

#[test]
fn png_matches_chart_size() {
    let chart = LinePlugin::default().chart(&series(), None).unwrap();
    let bytes = render_png_bytes(&chart.layout(), &RasterOptions::default()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&bytes).expect("decode png");
    assert_eq!((img.width(), img.height()), (430, 355));
}

#[test]
fn highlighted_marker_changes_pixels() {
    let chart = LinePlugin::default().chart(&series(), None).unwrap();
    let opts = RasterOptions { draw_labels: false, ..RasterOptions::default() };
    let before = render_png_bytes(&chart.layout(), &opts).unwrap();
    chart.handle_event(PointerEvent::Enter { index: 2 }).unwrap();
    let after = render_png_bytes(&chart.layout(), &opts).unwrap();
    assert_ne!(before, after);
}

#[test]
fn writes_png_file() {
    let chart = LinePlugin::default().chart(&series(), None).unwrap();
    let out = std::path::PathBuf::from("target/test_out/line_plugin.png");
    render_png(&chart.layout(), &RasterOptions::default(), &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}

#[test]
fn css_colors() {
    let fg = skia::Color::BLACK;
    assert_eq!(parse_color("steelblue", fg), skia::Color::from_rgb(70, 130, 180));
    assert_eq!(parse_color("#ff8000", fg), skia::Color::from_rgb(255, 128, 0));
    assert_eq!(parse_color("#fff", fg), skia::Color::WHITE);
    assert_eq!(parse_color("currentColor", fg), fg);
    assert_eq!(parse_color("#zzz", fg), fg);
}
