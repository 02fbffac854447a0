// File: crates/line-render-skia/src/lib.rs
// Summary: Headless PNG rendering of a line chart layout using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;
use tracing::debug;

use line_core::axis::Axis;
use line_core::{ChartLayout, Curve};

pub struct RasterOptions {
    pub background: skia::Color,
    /// Stands in for `currentColor` in axes, labels and gridlines.
    pub foreground: skia::Color,
    pub draw_labels: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            background: skia::Color::WHITE,
            foreground: skia::Color::from_argb(255, 34, 34, 34),
            draw_labels: true,
        }
    }
}

/// Encode `layout` as PNG bytes.
pub fn render_png_bytes(layout: &ChartLayout, opts: &RasterOptions) -> Result<Vec<u8>> {
    let o = &layout.options;
    let mut surface = skia::surfaces::raster_n32_premul((o.width as i32, o.height as i32))
        .ok_or_else(|| anyhow::anyhow!("failed to create {}x{} raster surface", o.width, o.height))?;
    let canvas = surface.canvas();
    canvas.clear(opts.background);

    let stroke = parse_color(&o.color, opts.foreground);
    draw_x_axis(canvas, layout, opts);
    draw_y_axis(canvas, layout, opts);
    draw_line(canvas, layout, stroke);
    draw_markers(canvas, layout, stroke);

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    debug!(bytes = data.len(), markers = layout.markers.len(), "rasterized line chart");
    Ok(data.as_bytes().to_vec())
}

/// Render `layout` to a PNG at `output_png_path`, creating parent directories.
pub fn render_png(layout: &ChartLayout, opts: &RasterOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
    let bytes = render_png_bytes(layout, opts)?;
    if let Some(parent) = output_png_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_png_path, bytes)?;
    Ok(())
}

/// `#rrggbb`, `#rgb` or one of the few CSS names charts use; anything else
/// (including `currentColor`) falls back to `current`.
pub fn parse_color(css: &str, current: skia::Color) -> skia::Color {
    let hex = |s: &str| u8::from_str_radix(s, 16).ok();
    if let Some(h) = css.strip_prefix('#') {
        let rgb = match h.len() {
            6 => (hex(&h[0..2]), hex(&h[2..4]), hex(&h[4..6])),
            3 => (
                hex(&h[0..1]).map(|v| v * 17),
                hex(&h[1..2]).map(|v| v * 17),
                hex(&h[2..3]).map(|v| v * 17),
            ),
            _ => (None, None, None),
        };
        if let (Some(r), Some(g), Some(b)) = rgb {
            return skia::Color::from_rgb(r, g, b);
        }
        return current;
    }
    match css.to_ascii_lowercase().as_str() {
        "steelblue" => skia::Color::from_rgb(70, 130, 180),
        "black" => skia::Color::BLACK,
        "white" => skia::Color::WHITE,
        "red" => skia::Color::from_rgb(255, 0, 0),
        "green" => skia::Color::from_rgb(0, 128, 0),
        "blue" => skia::Color::from_rgb(0, 0, 255),
        "orange" => skia::Color::from_rgb(255, 165, 0),
        "gray" | "grey" => skia::Color::from_rgb(128, 128, 128),
        _ => current,
    }
}

// ---- helpers ----------------------------------------------------------------

fn hairline(color: skia::Color, alpha: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(1.0);
    paint.set_color(color);
    paint.set_alpha_f(alpha);
    paint
}

fn label_font() -> skia::Font {
    let mut font = skia::Font::default();
    font.set_size(10.0);
    font
}

fn draw_x_axis(canvas: &skia::Canvas, layout: &ChartLayout, opts: &RasterOptions) {
    let o = &layout.options;
    let base = o.height as f32 - o.insets.bottom as f32;
    let reach = -(o.height as f32) + o.insets.top as f32;
    let tick = hairline(opts.foreground, 1.0);
    let grid = hairline(opts.foreground, 0.1);
    draw_ticks(canvas, &layout.x_axis, opts, |c, t| {
        let x = t.offset as f32;
        c.draw_line((x, base), (x, base + 6.0), &tick);
        c.draw_line((x, base), (x, base + reach), &grid);
        (x, base + 9.0 + 10.0 * 0.71, Anchor::Middle)
    });
}

fn draw_y_axis(canvas: &skia::Canvas, layout: &ChartLayout, opts: &RasterOptions) {
    let o = &layout.options;
    let left = o.insets.left as f32;
    let reach = o.width as f32 - o.insets.hsum() as f32;
    let tick = hairline(opts.foreground, 1.0);
    let grid = hairline(opts.foreground, 0.1);
    draw_ticks(canvas, &layout.y_axis, opts, |c, t| {
        let y = t.offset as f32;
        c.draw_line((left, y), (left - 6.0, y), &tick);
        c.draw_line((left, y), (left + reach, y), &grid);
        (left - 9.0, y + 10.0 * 0.32, Anchor::End)
    });
    if let (true, Some(label)) = (opts.draw_labels, &layout.y_axis.label) {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_color(opts.foreground);
        canvas.draw_str(label, (0.0, 10.0), &label_font(), &paint);
    }
}

enum Anchor {
    Middle,
    End,
}

fn draw_ticks<F>(canvas: &skia::Canvas, axis: &Axis, opts: &RasterOptions, mut draw_tick: F)
where
    F: FnMut(&skia::Canvas, &line_core::Tick) -> (f32, f32, Anchor),
{
    let font = label_font();
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(opts.foreground);
    for t in &axis.ticks {
        let (x, y, anchor) = draw_tick(canvas, t);
        if !opts.draw_labels {
            continue;
        }
        let (w, _) = font.measure_str(&t.label, Some(&paint));
        let x = match anchor {
            Anchor::Middle => x - w * 0.5,
            Anchor::End => x - w,
        };
        canvas.draw_str(&t.label, (x, y), &font, &paint);
    }
}

fn draw_line(canvas: &skia::Canvas, layout: &ChartLayout, color: skia::Color) {
    let o = &layout.options;
    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(o.stroke_width as f32);
    stroke.set_stroke_cap(match o.stroke_linecap {
        line_core::LineCap::Butt => skia::paint::Cap::Butt,
        line_core::LineCap::Round => skia::paint::Cap::Round,
        line_core::LineCap::Square => skia::paint::Cap::Square,
    });
    stroke.set_stroke_join(match o.stroke_linejoin {
        line_core::LineJoin::Miter => skia::paint::Join::Miter,
        line_core::LineJoin::Round => skia::paint::Join::Round,
        line_core::LineJoin::Bevel => skia::paint::Join::Bevel,
    });
    stroke.set_color(color);
    stroke.set_alpha_f(o.stroke_opacity.clamp(0.0, 1.0) as f32);

    let mut path = skia::Path::new();
    for seg in &layout.line.segments {
        let Some(&(x0, y0)) = seg.first() else { continue };
        path.move_to((x0 as f32, y0 as f32));
        let mut prev_y = y0;
        for &(x, y) in &seg[1..] {
            if layout.line.curve == Curve::StepAfter {
                path.line_to((x as f32, prev_y as f32));
            }
            path.line_to((x as f32, y as f32));
            prev_y = y;
        }
        if seg.len() == 1 {
            path.close();
        }
    }
    canvas.draw_path(&path, &stroke);
}

fn draw_markers(canvas: &skia::Canvas, layout: &ChartLayout, color: skia::Color) {
    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(skia::Color::WHITE);

    let mut ring = skia::Paint::default();
    ring.set_anti_alias(true);
    ring.set_style(skia::paint::Style::Stroke);
    ring.set_stroke_width(1.0);
    ring.set_color(color);

    for m in &layout.markers {
        if !m.cx.is_finite() || !m.cy.is_finite() {
            continue;
        }
        let center = (m.cx as f32, m.cy as f32);
        canvas.draw_circle(center, m.r as f32, &fill);
        canvas.draw_circle(center, m.r as f32, &ring);
    }
}
