// File: crates/line-demo/src/main.rs
// Summary: Demo emits two line plugin items on one page, hovers a marker in the first, and writes the page.

use anyhow::{Context, Result};
use line_core::{ChannelRegistry, ItemModel, ItemView, LineOptions, LinePlugin, PluginRegistry, PointerEvent, LINE_PLUGIN};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("line_core=info".parse()?))
        .with_target(true)
        .init();

    // Series path from CLI, optional options JSON second.
    let raw = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "crates/line-demo/data/prices.json".to_string());
    let path = PathBuf::from(&raw);
    let series = load_series(&path).with_context(|| format!("failed to load series '{}'", path.display()))?;
    info!(input = %path.display(), "loaded series");

    let mut plugins = PluginRegistry::new();
    match std::env::args().nth(2) {
        Some(opts_path) => {
            let text = std::fs::read_to_string(&opts_path).with_context(|| format!("reading {opts_path}"))?;
            let options: LineOptions = serde_json::from_str(&text).with_context(|| format!("parsing {opts_path}"))?;
            plugins.register(LinePlugin { options });
        }
        None => plugins.register(LinePlugin::default()),
    }

    // Two items in the same page region share the main thumb channel.
    let mut channels = ChannelRegistry::new();
    let mut views = Vec::new();
    for id in ["a1", "b2"] {
        let item = ItemModel::new(LINE_PLUGIN, id);
        let mut view = ItemView::new(&item, channels.main(), series.clone());
        plugins.emit(&mut view, &item)?;
        views.push(view);
    }

    // Hover the tallest point of the first chart; the second follows.
    if let Some(first) = views.first() {
        let peak = first.charts().first().and_then(|chart| {
            chart
                .markers()
                .snapshot()
                .iter()
                .enumerate()
                .filter(|(_, m)| m.y.is_finite())
                .max_by(|a, b| a.1.y.total_cmp(&b.1.y))
                .map(|(i, _)| i)
        });
        match peak {
            Some(index) => first.dispatch(0, PointerEvent::Enter { index })?,
            None => warn!("no finite values to hover"),
        }
    }
    for view in &views {
        let highlighted: usize = view
            .charts()
            .iter()
            .map(|chart| chart.markers().snapshot().iter().filter(|m| m.is_highlighted()).count())
            .sum();
        info!(item = %view.element().get_attr("data-id").unwrap_or_default(), highlighted, "hover state");
    }

    let page: String = views.iter().map(ItemView::to_html).collect::<Vec<_>>().join("\n");
    let out_html = out_name_with(&path, "line", "html");
    std::fs::write(&out_html, format!("<!doctype html>\n<html><body>\n{page}\n</body></html>\n"))?;
    println!("Wrote {}", out_html.display());

    if let Some(chart) = views.first().and_then(|v| v.charts().first()) {
        let out_svg = out_name_with(&path, "line", "svg");
        std::fs::write(&out_svg, chart.to_svg_string())?;
        println!("Wrote {}", out_svg.display());

        #[cfg(feature = "raster")]
        {
            let out_png = out_name_with(&path, "line", "png");
            line_render_skia::render_png(&chart.layout(), &line_render_skia::RasterOptions::default(), &out_png)?;
            println!("Wrote {}", out_png.display());
        }
    }
    Ok(())
}

fn out_name_with(input: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("series");
    let name = format!("{stem}_{suffix}.{ext}");
    match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// JSON files are passed through; CSV rows become `[epoch_ms, value]` pairs.
fn load_series(path: &Path) -> Result<Value> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        let text = std::fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&text)?);
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["date", "time", "timestamp", "datetime"])
        .with_context(|| format!("no date column in {headers:?}"))?;
    let i_value = idx(&["price", "close", "value", "y"])
        .with_context(|| format!("no value column in {headers:?}"))?;

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let Some(t) = rec.get(i_time).and_then(|s| line_core::series::parse_date(&json!(s.trim()))) else {
            warn!(row = ?rec.position().map(|p| p.line()), "skipping row with unreadable date");
            continue;
        };
        // Left as text; the plugin coerces it, and non-numeric cells become gaps.
        let y = rec.get(i_value).map(str::trim).unwrap_or("");
        out.push(json!([t.timestamp_millis(), y]));
    }
    Ok(Value::Array(out))
}
