// File: crates/line-core/src/highlight.rs
// Summary: "thumb" channel: the shared highlighted-point identity for charts in one scope.
// Notes:
// - Everything here runs on the UI thread. Shared state is `Rc<RefCell<_>>`,
//   not a global: each scope owns its own channel and charts are handed one
//   at construction.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::marker::{MarkerLayer, WeakLayer};

/// Scope shared by charts that sit in the main page region.
pub const MAIN_SCOPE: &str = "main";

/// Identity value carried by a thumb notification. `Thumb(None)` is what a
/// marker without an identity key broadcasts; it never matches any marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thumb(pub Option<f64>);

impl Thumb {
    pub fn matches(&self, x: Option<f64>) -> bool {
        matches!((self.0, x), (Some(a), Some(b)) if a == b)
    }
}

impl From<f64> for Thumb {
    fn from(v: f64) -> Self {
        Thumb(Some(v))
    }
}

#[derive(Debug)]
struct ChannelState {
    scope: String,
    last: Option<Thumb>,
    subscribers: Vec<WeakLayer>,
    repaints: u64,
}

/// Publish/subscribe handle for one scope. Clones share state.
#[derive(Clone, Debug)]
pub struct ThumbChannel {
    state: Rc<RefCell<ChannelState>>,
}

impl ThumbChannel {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ChannelState {
                scope: scope.into(),
                last: None,
                subscribers: Vec::new(),
                repaints: 0,
            })),
        }
    }

    pub fn scope(&self) -> String {
        self.state.borrow().scope.clone()
    }

    /// Last value published, `None` before the first publish.
    pub fn last(&self) -> Option<Thumb> {
        self.state.borrow().last
    }

    /// Number of publishes that actually repainted markers.
    pub fn repaint_count(&self) -> u64 {
        self.state.borrow().repaints
    }

    /// Live subscribers; charts that were dropped no longer count.
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.iter().filter(|s| s.is_alive()).count()
    }

    pub fn subscribe(&self, layer: &MarkerLayer) {
        let mut state = self.state.borrow_mut();
        state.subscribers.retain(WeakLayer::is_alive);
        state.subscribers.push(layer.downgrade());
        debug!(scope = %state.scope, subscribers = state.subscribers.len(), "chart subscribed to thumb");
    }

    pub fn same_channel(&self, other: &ThumbChannel) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Broadcast `thumb` to every subscribed chart.
    ///
    /// Repeating the last value is a no-op and returns `false`. Otherwise
    /// markers whose identity equals the thumb get the highlight radius and
    /// every other marker in every subscribed chart is reset.
    pub fn publish(&self, thumb: impl Into<Thumb>) -> bool {
        let thumb = thumb.into();
        let mut state = self.state.borrow_mut();
        if state.last == Some(thumb) {
            trace!(scope = %state.scope, ?thumb, "thumb unchanged");
            return false;
        }
        state.last = Some(thumb);
        state.repaints += 1;
        state.subscribers.retain(|layer| layer.repaint(thumb));
        debug!(scope = %state.scope, ?thumb, charts = state.subscribers.len(), "thumb repaint");
        true
    }
}

/// Channels keyed by an explicit scope name. Charts in different scopes
/// never see each other's thumbs.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, ThumbChannel>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The channel for `scope`, created on first use.
    pub fn channel(&mut self, scope: &str) -> ThumbChannel {
        self.channels
            .entry(scope.to_string())
            .or_insert_with(|| ThumbChannel::new(scope))
            .clone()
    }

    pub fn main(&mut self) -> ThumbChannel {
        self.channel(MAIN_SCOPE)
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb_without_identity_never_matches() {
        assert!(!Thumb(None).matches(None));
        assert!(!Thumb(None).matches(Some(1.0)));
        assert!(Thumb::from(2.0).matches(Some(2.0)));
        assert!(!Thumb::from(f64::NAN).matches(Some(f64::NAN)));
    }

    #[test]
    fn registry_reuses_channels_per_scope() {
        let mut reg = ChannelRegistry::new();
        let a = reg.channel("main");
        let b = reg.main();
        let c = reg.channel("sidebar");
        assert!(a.same_channel(&b));
        assert!(!a.same_channel(&c));
        assert_eq!(reg.scopes().count(), 2);
    }
}
