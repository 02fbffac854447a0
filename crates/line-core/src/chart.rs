// File: crates/line-core/src/chart.rs
// Summary: LineChart: scales, axes, path and markers for one series, plus hover handling.

use tracing::debug;

use crate::axis::Axis;
use crate::domain::{raw_extent, Domain};
use crate::error::{LineError, Result};
use crate::highlight::{Thumb, ThumbChannel};
use crate::line::{LineGenerator, LinePath};
use crate::marker::{Marker, MarkerLayer, HIGHLIGHT_RADIUS, NORMAL_RADIUS};
use crate::options::LineOptions;
use crate::scale::{LinearScale, Scale, TimeScale};
use crate::series::Point;
use crate::svg::{num, Element, SVG_NS};

/// Pointer input on a marker, addressed by the marker's index in input order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Enter { index: usize },
    Leave { index: usize },
}

/// Static geometry of a chart, for backends that draw without the SVG tree.
#[derive(Clone, Debug)]
pub struct ChartLayout {
    pub options: LineOptions,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub line: LinePath,
    pub markers: Vec<Marker>,
}

pub struct LineChart {
    options: LineOptions,
    x: TimeScale,
    y: LinearScale,
    x_axis: Axis,
    y_axis: Axis,
    line: LinePath,
    markers: MarkerLayer,
    channel: Option<ThumbChannel>,
}

impl LineChart {
    /// Lay out `points` and, when a channel is given, subscribe the markers
    /// to its thumbs.
    pub fn new(points: &[Point], options: LineOptions, channel: Option<ThumbChannel>) -> Result<Self> {
        if points.is_empty() {
            return Err(LineError::EmptySeries);
        }
        let x_domain = match options.x_domain {
            Some(d) => d,
            None => raw_extent(points.iter().map(Point::t_millis)).ok_or(LineError::NoFiniteValues)?,
        };
        let y_domain = match options.y_domain {
            Some(d) => d,
            None => {
                let hi = raw_extent(points.iter().map(|p| p.y)).ok_or(LineError::NoFiniteValues)?.max;
                Domain::new(0.0, hi)
            }
        };

        let x = TimeScale::new(x_domain, options.x_range());
        let y = LinearScale::new(y_domain, options.y_range()).with_precision(options.y_precision);
        let x_axis = Axis::bottom(&x, options.x_tick_count());
        let y_axis = Axis::left(&y, options.y_tick_count()).with_label(options.y_label.clone());

        let line = LineGenerator::new(move |p: &Point| x.map(p.t_millis()), move |p: &Point| y.map(p.y))
            .defined(Point::is_defined)
            .curve(options.curve)
            .generate(points);

        let markers = points
            .iter()
            .map(|p| Marker {
                x: p.x,
                t: p.t,
                y: p.y,
                cx: x.map(p.t_millis()),
                cy: y.map(p.y),
                r: NORMAL_RADIUS,
            })
            .collect();
        let markers = MarkerLayer::new(markers, &options.color);
        if let Some(ch) = &channel {
            ch.subscribe(&markers);
        }
        debug!(
            points = points.len(),
            segments = line.segments.len(),
            x_ticks = x_axis.ticks.len(),
            y_ticks = y_axis.ticks.len(),
            "line chart laid out"
        );

        Ok(Self { options, x, y, x_axis, y_axis, line, markers, channel })
    }

    pub fn options(&self) -> &LineOptions {
        &self.options
    }

    pub fn x_scale(&self) -> &TimeScale {
        &self.x
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    pub fn line(&self) -> &LinePath {
        &self.line
    }

    /// Marker state in input order.
    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    pub fn channel(&self) -> Option<&ThumbChannel> {
        self.channel.as_ref()
    }

    /// The `<svg>` root: x axis, y axis, line path, then markers. Markers are
    /// live, so serializing later reflects hover state.
    pub fn element(&self) -> Element {
        let o = &self.options;
        let (w, h) = (f64::from(o.width), f64::from(o.height));
        let (left, right, top, bottom) = (
            f64::from(o.insets.left),
            f64::from(o.insets.right),
            f64::from(o.insets.top),
            f64::from(o.insets.bottom),
        );

        Element::new("svg")
            .attr("xmlns", SVG_NS)
            .attr("width", o.width)
            .attr("height", o.height)
            .attr("viewBox", format!("0,0,{},{}", o.width, o.height))
            .attr("style", "max-width: 100%; height: auto; height: intrinsic;")
            .child(self.x_axis.element((0.0, h - bottom), -h + top, (0.0, 0.0)))
            .child(self.y_axis.element((left, 0.0), w - left - right, (-left, 10.0)))
            .child(
                Element::new("path")
                    .attr("fill", "none")
                    .attr("stroke", &o.color)
                    .attr("stroke-width", num(o.stroke_width))
                    .attr("stroke-linecap", o.stroke_linecap)
                    .attr("stroke-linejoin", o.stroke_linejoin)
                    .attr("stroke-opacity", num(o.stroke_opacity))
                    .attr("d", self.line.to_path_data()),
            )
            .child(self.markers.clone())
    }

    pub fn to_svg_string(&self) -> String {
        self.element().to_string()
    }

    pub fn layout(&self) -> ChartLayout {
        ChartLayout {
            options: self.options.clone(),
            x_axis: self.x_axis.clone(),
            y_axis: self.y_axis.clone(),
            line: self.line.clone(),
            markers: self.markers.snapshot(),
        }
    }

    /// Topmost marker whose current circle contains the pixel `(px, py)`.
    pub fn marker_at(&self, px: f64, py: f64) -> Option<usize> {
        self.markers
            .borrow()
            .iter()
            .enumerate()
            .rev()
            .find(|(_, m)| (m.cx - px).hypot(m.cy - py) <= m.r)
            .map(|(i, _)| i)
    }

    /// Enter broadcasts the marker's identity and enlarges the marker; leave
    /// only shrinks the marker and leaves the channel alone.
    pub fn handle_event(&self, event: PointerEvent) -> Result<()> {
        match event {
            PointerEvent::Enter { index } => {
                let marker = self.marker(index)?;
                if let Some(ch) = &self.channel {
                    ch.publish(Thumb(marker.x));
                }
                self.markers.set_radius(index, HIGHLIGHT_RADIUS);
            }
            PointerEvent::Leave { index } => {
                self.marker(index)?;
                self.markers.set_radius(index, NORMAL_RADIUS);
            }
        }
        Ok(())
    }

    fn marker(&self, index: usize) -> Result<Marker> {
        self.markers
            .get(index)
            .ok_or(LineError::MarkerOutOfRange { index, len: self.markers.len() })
    }
}
