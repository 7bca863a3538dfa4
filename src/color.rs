//! Time-driven palette generation.
//!
//! The palette is a small set of related hues that rotate slowly around the
//! color wheel while saturation and lightness "breathe" on their own periods.

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 6;

/// Hue offset in degrees between neighbouring palette entries.
pub const HUE_STEP: f64 = 20.0;

pub const SATURATION_RANGE: (f64, f64) = (40.0, 100.0);
pub const LIGHTNESS_RANGE: (f64, f64) = (40.0, 80.0);

/// A hue/saturation/lightness color.
///
/// `hue` is in degrees and may lie outside `[0, 360)`; it is wrapped when the
/// color is converted. `saturation` and `lightness` are percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    #[inline]
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Hue wrapped into `[0, 360)`.
    #[inline]
    pub fn normalized_hue(&self) -> f64 {
        let hue = self.hue.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if hue >= 360.0 { 0.0 } else { hue }
    }

    pub fn to_rgb(&self) -> [u8; 3] {
        let h = self.normalized_hue() / 360.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let m2 = if l < 0.5 { l * (s + 1.0) } else { l + s - l * s };
        let m1 = l * 2.0 - m2;

        [h + 1.0 / 3.0, h, h - 1.0 / 3.0].map(|channel_hue| {
            let value = hue_to_channel(m1, m2, channel_hue);
            (value * 255.0).round().clamp(0.0, 255.0) as u8
        })
    }
}

fn hue_to_channel(m1: f64, m2: f64, h: f64) -> f64 {
    let h = if h < 0.0 {
        h + 1.0
    } else if h > 1.0 {
        h - 1.0
    } else {
        h
    };
    if h * 6.0 < 1.0 {
        m1 + (m2 - m1) * h * 6.0
    } else if h * 2.0 < 1.0 {
        m2
    } else if h * 3.0 < 2.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - h) * 6.0
    } else {
        m1
    }
}

pub type Palette = [Hsl; PALETTE_SIZE];

/// Base hue at `time_ms`, always in `[0, 360)`.
#[inline]
pub fn base_hue(time_ms: f64) -> f64 {
    let hue = ((time_ms / 3000.0).sin() * 180.0 + 180.0) % 360.0;
    if hue < 0.0 { hue + 360.0 } else { hue }
}

#[inline]
pub fn base_saturation(time_ms: f64) -> f64 {
    ((time_ms / 2000.0).sin() * 20.0 + 40.0).clamp(SATURATION_RANGE.0, SATURATION_RANGE.1)
}

#[inline]
pub fn base_lightness(time_ms: f64) -> f64 {
    ((time_ms / 1000.0).sin() * 20.0 + 60.0).clamp(LIGHTNESS_RANGE.0, LIGHTNESS_RANGE.1)
}

/// Computes the palette for `time_ms` milliseconds after the animation started.
pub fn palette_at(time_ms: f64) -> Palette {
    let mut palette = [Hsl::new(0.0, 0.0, 0.0); PALETTE_SIZE];
    fill_palette(time_ms, &mut palette);
    palette
}

pub fn fill_palette(time_ms: f64, palette: &mut Palette) {
    let hue = base_hue(time_ms);
    let saturation = base_saturation(time_ms);
    let lightness = base_lightness(time_ms);

    for (i, color) in palette.iter_mut().enumerate() {
        *color = Hsl::new(hue + i as f64 * HUE_STEP, saturation, lightness);
    }
}
