// File: crates/line-core/src/types.rs
// Summary: Shared sizes and margins.

use serde::{Deserialize, Serialize};

/// Default chart width in pixels.
pub const WIDTH: u32 = 640;
/// Default chart height in pixels.
pub const HEIGHT: u32 = 400;

/// Width the wiki line plugin renders at.
pub const PLUGIN_WIDTH: u32 = 430;
/// Height the wiki line plugin renders at.
pub const PLUGIN_HEIGHT: u32 = 355;

/// Margins around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(40, 30, 20, 30)
    }
}
