//! Wheel layout geometry
//!
//! Maps between a continuous scroll offset and a discrete item index.
//! Offsets grow downward from 0 (first item) to `max_offset`.

use serde::{Deserialize, Serialize};

/// Interaction and layout mode of a wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelMode {
    /// Selected item pinned mid-viewport by symmetric spacers
    Centered,
    /// Plain list, offset mapped proportionally onto the item range
    #[default]
    Linear,
}

/// Sizes that determine a wheel's scroll range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub mode: WheelMode,
    /// Height of one row in pixels
    pub item_height: f32,
    /// Rows visible at once (odd, at least 3)
    pub visible_rows: usize,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            mode: WheelMode::Linear,
            item_height: 40.0,
            visible_rows: 5,
        }
    }
}

impl WheelGeometry {
    pub fn new(mode: WheelMode, item_height: f32, visible_rows: usize) -> Self {
        Self {
            mode,
            item_height,
            visible_rows,
        }
    }

    /// Height of the visible window
    ///
    /// The window shows `visible_rows` rows in both modes. Row count only
    /// changes behaviour in centered mode, where it also sizes the spacers;
    /// in linear mode it is just the list's viewport.
    pub fn viewport_height(&self) -> f32 {
        self.visible_rows as f32 * self.item_height
    }

    /// Padding above the first and below the last item
    pub fn spacer_height(&self) -> f32 {
        match self.mode {
            WheelMode::Centered => (self.visible_rows / 2) as f32 * self.item_height,
            WheelMode::Linear => 0.0,
        }
    }

    /// Total scrollable content height for `count` items
    pub fn content_height(&self, count: usize) -> f32 {
        2.0 * self.spacer_height() + count as f32 * self.item_height
    }

    /// Largest reachable scroll offset for `count` items
    pub fn max_offset(&self, count: usize) -> f32 {
        match self.mode {
            // The spacers cancel out against the viewport
            WheelMode::Centered => count.saturating_sub(1) as f32 * self.item_height,
            WheelMode::Linear => (self.content_height(count) - self.viewport_height()).max(0.0),
        }
    }

    /// Nearest item index for a scroll offset
    pub fn index_for_offset(&self, offset: f32, max_offset: f32, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        let last = (count - 1) as f32;

        let raw = match self.mode {
            WheelMode::Centered => {
                if self.item_height <= 0.0 {
                    0.0
                } else {
                    (offset / self.item_height).round()
                }
            }
            WheelMode::Linear => {
                if max_offset <= 0.0 {
                    0.0
                } else {
                    (offset / max_offset * last).round()
                }
            }
        };

        raw.clamp(0.0, last) as usize
    }

    /// Exact resting offset of an item
    pub fn offset_for_index(&self, index: usize, max_offset: f32, count: usize) -> f32 {
        let index = index.min(count.saturating_sub(1));
        match self.mode {
            WheelMode::Centered => index as f32 * self.item_height,
            WheelMode::Linear => {
                if count <= 1 || max_offset <= 0.0 {
                    0.0
                } else {
                    index as f32 / (count - 1) as f32 * max_offset
                }
            }
        }
    }
}
