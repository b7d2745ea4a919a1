//! Plane index for multi-dimensional images.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which 2D plane (channel, z-slice, timepoint) a region belongs to.
///
/// A channel of `-1` means the region applies to all channels. The index is
/// opaque to the coordinate mapper and is carried through conversions as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaneIndex {
    #[serde(default = "PlaneIndex::all_channels")]
    pub c: i32,
    #[serde(default)]
    pub z: u32,
    #[serde(default)]
    pub t: u32,
}

impl PlaneIndex {
    /// Channel value meaning "every channel".
    pub const ALL_CHANNELS: i32 = -1;

    pub fn new(c: i32, z: u32, t: u32) -> Self {
        Self { c, z, t }
    }

    /// A plane covering all channels at the given z-slice and timepoint.
    pub fn all_channels_at(z: u32, t: u32) -> Self {
        Self::new(Self::ALL_CHANNELS, z, t)
    }

    /// Returns a copy with the channel replaced.
    pub fn with_channel(self, c: i32) -> Self {
        Self { c, ..self }
    }

    pub fn applies_to_all_channels(&self) -> bool {
        self.c == Self::ALL_CHANNELS
    }

    fn all_channels() -> i32 {
        Self::ALL_CHANNELS
    }
}

impl Default for PlaneIndex {
    fn default() -> Self {
        Self::all_channels_at(0, 0)
    }
}

impl fmt::Display for PlaneIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c={}, z={}, t={}", self.c, self.z, self.t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plane_is_all_channels_at_origin() {
        let plane = PlaneIndex::default();
        assert!(plane.applies_to_all_channels());
        assert_eq!((plane.z, plane.t), (0, 0));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let plane: PlaneIndex = serde_json::from_str(r#"{"z": 3}"#).expect("parse plane");
        assert_eq!(plane, PlaneIndex::new(-1, 3, 0));
    }

    #[test]
    fn with_channel_keeps_z_and_t() {
        let plane = PlaneIndex::all_channels_at(2, 5).with_channel(1);
        assert_eq!(plane, PlaneIndex::new(1, 2, 5));
        assert_eq!(plane.to_string(), "c=1, z=2, t=5");
    }
}
