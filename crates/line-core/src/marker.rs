// File: crates/line-core/src/marker.rs
// Summary: Per-point circle markers and the shared layer that hover and thumb events repaint.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};

use crate::highlight::Thumb;

/// Marker radius in the normal state.
pub const NORMAL_RADIUS: f64 = 3.5;
/// Marker radius while highlighted.
pub const HIGHLIGHT_RADIUS: f64 = 8.0;

/// One drawn point. Pixel coordinates may be NaN for points with missing data;
/// the marker is still part of the layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub x: Option<f64>,
    pub t: Option<DateTime<Utc>>,
    pub y: f64,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Marker {
    pub fn is_highlighted(&self) -> bool {
        self.r == HIGHLIGHT_RADIUS
    }
}

/// Markers of one chart, shared between the chart's element tree and the
/// thumb channel it subscribes to.
#[derive(Clone, Debug)]
pub struct MarkerLayer {
    markers: Rc<RefCell<Vec<Marker>>>,
    stroke: Rc<str>,
}

/// Subscription handle held by a channel; does not keep the chart alive.
#[derive(Clone, Debug)]
pub(crate) struct WeakLayer(Weak<RefCell<Vec<Marker>>>);

impl WeakLayer {
    pub(crate) fn repaint(&self, thumb: Thumb) -> bool {
        match self.0.upgrade() {
            Some(markers) => {
                repaint(&mut markers.borrow_mut(), thumb);
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

fn repaint(markers: &mut [Marker], thumb: Thumb) {
    for m in markers {
        m.r = if thumb.matches(m.x) { HIGHLIGHT_RADIUS } else { NORMAL_RADIUS };
    }
}

impl MarkerLayer {
    pub fn new(markers: Vec<Marker>, stroke: &str) -> Self {
        Self { markers: Rc::new(RefCell::new(markers)), stroke: Rc::from(stroke) }
    }

    pub fn len(&self) -> usize {
        self.markers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Marker> {
        self.markers.borrow().get(index).copied()
    }

    /// Copy of all markers in input order. Later hover or thumb repaints
    /// do not show up in the copy.
    pub fn snapshot(&self) -> Vec<Marker> {
        self.markers.borrow().clone()
    }

    /// Short-lived borrow for serialization and hit testing; never held
    /// across a repaint.
    pub(crate) fn borrow(&self) -> Ref<'_, Vec<Marker>> {
        self.markers.borrow()
    }

    pub fn radii(&self) -> Vec<f64> {
        self.markers.borrow().iter().map(|m| m.r).collect()
    }

    pub fn stroke(&self) -> &str {
        &self.stroke
    }

    /// Returns false when `index` is out of range.
    pub fn set_radius(&self, index: usize, r: f64) -> bool {
        match self.markers.borrow_mut().get_mut(index) {
            Some(m) => {
                m.r = r;
                true
            }
            None => false,
        }
    }

    /// Highlight markers matching `thumb`, reset everything else.
    pub fn repaint(&self, thumb: Thumb) {
        repaint(&mut self.markers.borrow_mut(), thumb);
    }

    pub(crate) fn downgrade(&self) -> WeakLayer {
        WeakLayer(Rc::downgrade(&self.markers))
    }
}
