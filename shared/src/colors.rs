use serde::Serialize;

/// 8-bit RGBA color. Alpha is 0..=255 like the rest of the channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string, alpha written as a 0..1 fraction.
    pub fn css(&self) -> String {
        let alpha = self.a as f64 / 255.0;
        format!("rgba({},{},{},{})", self.r, self.g, self.b, round3(alpha))
    }

    /// `#rrggbb` hex string (alpha dropped).
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a 0..1 opacity, for SVG `fill-opacity` and friends.
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Linear interpolation between two opaque colors, channel by channel.
/// `t` is clamped to `[0, 1]`.
pub fn lerp_rgb(from: Rgba, to: Rgba, t: f64) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Rgba::rgb(mix(from.r, to.r), mix(from.g, to.g), mix(from.b, to.b))
}
