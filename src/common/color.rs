//! This module contains the normalized color type carried by every sample and its packed 24-bit
//! representation used in point cloud files.

use serde::{Deserialize, Serialize};

/// An RGB color with each channel normalized to the range [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channel values.
    pub fn from_u8(rgb: [u8; 3]) -> Self {
        Self::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
        )
    }

    /// Converts the color to 8-bit channels. Each channel is clamped to [0, 1] and then scaled
    /// and truncated, so a channel of 0.999 becomes 254 rather than 255.
    pub fn to_u8(&self) -> [u8; 3] {
        [channel_u8(self.r), channel_u8(self.g), channel_u8(self.b)]
    }

    /// Packs the color into a single integer as `(r << 16) | (g << 8) | b` using the truncated
    /// 8-bit channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use lidarsweep::Rgb;
    /// assert_eq!(Rgb::new(1.0, 0.0, 0.0).packed(), 0xFF0000);
    /// ```
    pub fn packed(&self) -> u32 {
        let [r, g, b] = self.to_u8();
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }
}

fn channel_u8(c: f32) -> u8 {
    // NaN clamps to NaN, and the saturating cast turns it into 0
    (c.clamp(0.0, 1.0) * 255.0) as u8
}
