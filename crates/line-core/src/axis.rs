// File: crates/line-core/src/axis.rs
// Summary: Bottom/left axes with tick labels and cloned low-opacity gridlines.

use crate::scale::Scale;
use crate::svg::{num, Element};

/// Outer tick length, in pixels.
pub const TICK_SIZE: f64 = 6.0;
/// Gap between tick line and label, in pixels.
pub const TICK_PADDING: f64 = 3.0;
/// Half-pixel shift so 1px tick lines land on whole device pixels.
pub const CRISP_OFFSET: f64 = 0.5;
/// Stroke opacity of gridlines.
pub const GRID_OPACITY: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Pixel position along the axis, crisp offset included.
    pub offset: f64,
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub orient: Orient,
    pub ticks: Vec<Tick>,
    /// Caption drawn at the top-left of a left axis.
    pub label: Option<String>,
}

impl Axis {
    pub fn new(orient: Orient, scale: &dyn Scale, count: f64) -> Self {
        let format = scale.tick_format(count);
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|value| Tick { value, offset: scale.map(value) + CRISP_OFFSET, label: format(value) })
            .collect();
        Self { orient, ticks, label: None }
    }

    pub fn bottom(scale: &dyn Scale, count: f64) -> Self {
        Self::new(Orient::Bottom, scale, count)
    }

    pub fn left(scale: &dyn Scale, count: f64) -> Self {
        Self::new(Orient::Left, scale, count)
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    /// Axis group positioned by `transform`. Each tick line is cloned into a
    /// gridline reaching `grid` pixels across the plot (negative is upward
    /// for a bottom axis).
    pub fn element(&self, transform: (f64, f64), grid: f64, label_at: (f64, f64)) -> Element {
        let (anchor, k_attr, dy) = match self.orient {
            Orient::Bottom => ("middle", "y", "0.71em"),
            Orient::Left => ("end", "x", "0.32em"),
        };
        let sign = if self.orient == Orient::Bottom { 1.0 } else { -1.0 };

        let mut g = Element::new("g")
            .attr("transform", format!("translate({},{})", num(transform.0), num(transform.1)))
            .attr("fill", "none")
            .attr("font-size", 10)
            .attr("font-family", "sans-serif")
            .attr("text-anchor", anchor);

        for tick in &self.ticks {
            let position = match self.orient {
                Orient::Bottom => format!("translate({},0)", num(tick.offset)),
                Orient::Left => format!("translate(0,{})", num(tick.offset)),
            };
            let line = Element::new("line")
                .attr("stroke", "currentColor")
                .attr(&format!("{k_attr}2"), num(sign * TICK_SIZE));
            let mut gridline = line.clone();
            match self.orient {
                Orient::Bottom => {
                    gridline.set_attr("y1", 0);
                    gridline.set_attr("y2", num(grid));
                }
                Orient::Left => gridline.set_attr("x2", num(grid)),
            }
            gridline.set_attr("stroke-opacity", GRID_OPACITY);

            let text = Element::new("text")
                .attr("fill", "currentColor")
                .attr(k_attr, num(sign * (TICK_SIZE + TICK_PADDING)))
                .attr("dy", dy)
                .text(tick.label.clone());

            g.append(
                Element::new("g")
                    .attr("class", "tick")
                    .attr("opacity", 1)
                    .attr("transform", position)
                    .child(line)
                    .child(gridline)
                    .child(text),
            );
        }

        if self.orient == Orient::Left {
            let mut caption = Element::new("text")
                .attr("x", num(label_at.0))
                .attr("y", num(label_at.1))
                .attr("fill", "currentColor")
                .attr("text-anchor", "start");
            if let Some(label) = &self.label {
                caption = caption.text(label.clone());
            }
            g.append(caption);
        }
        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::scale::LinearScale;

    #[test]
    fn left_axis_ticks_and_grid() {
        let y = LinearScale::new(Domain::new(0.0, 100.0), (325.0, 20.0));
        let axis = Axis::left(&y, 355.0 / 40.0).with_label(Some("price".into()));
        assert_eq!(axis.ticks.first().map(|t| t.label.as_str()), Some("0"));
        assert_eq!(axis.ticks.last().map(|t| t.label.as_str()), Some("100"));

        let g = axis.element((40.0, 0.0), 360.0, (-40.0, 10.0));
        let ticks = g.find_all("g", Some("tick"));
        assert_eq!(ticks.len(), axis.ticks.len());
        let lines = ticks[0].find_all("line", None);
        assert_eq!(lines[0].get_attr("x2"), Some("-6"));
        assert_eq!(lines[1].get_attr("x2"), Some("360"));
        assert_eq!(lines[1].get_attr("stroke-opacity"), Some("0.1"));
        assert!(g.to_string().ends_with("<text x=\"-40\" y=\"10\" fill=\"currentColor\" text-anchor=\"start\">price</text></g>"));
    }
}
