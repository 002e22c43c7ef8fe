//! RGB colors and the contact mixing rule
//!
//! Mixing is non-linear: the blend is weighted by brightness and darkened
//! by a multiplicative term, then re-normalized and pushed away from
//! near-white.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{RANDOM_CHANNEL_MAX, RANDOM_CHANNEL_MIN};

/// An RGB color with channels in [0, 255]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Build a color, clamping each channel into [0, 255]
    pub fn new(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// A random color with every channel in [50, 255]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let range = RANDOM_CHANNEL_MIN..=RANDOM_CHANNEL_MAX;
        Self::new(
            rng.random_range(range.clone()),
            rng.random_range(range.clone()),
            rng.random_range(range),
        )
    }

    #[inline]
    pub fn r(&self) -> u8 {
        self.r
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.g
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn to_tuple(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Mean of the three channels (not a perceptual luminance)
    pub fn brightness(&self) -> f64 {
        (self.r as f64 + self.g as f64 + self.b as f64) / 3.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({}, {}, {})", self.r, self.g, self.b)
    }
}

#[inline]
fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Lower bound on the brightness sum used as the weight denominator
const MIN_TOTAL_BRIGHTNESS: f64 = 0.1;
/// Share of the brightness-weighted linear blend
const LINEAR_SHARE: f64 = 0.8;
/// Share of the multiplicative (darkening) term
const MULTIPLY_SHARE: f64 = 0.2;
/// Results whose brightest channel is below this get rescaled upward
const DARK_THRESHOLD: i32 = 128;
const DARK_RESCALE: f64 = 0.7;
const CONTRAST_BOOST: f64 = 1.1;
/// Near-white detection: low spread and high mean
const WASHED_OUT_SPREAD: f64 = 30.0;
const WASHED_OUT_MEAN: f64 = 200.0;
const DOMINANT_BOOST: f64 = 1.2;
const RECESSIVE_DAMP: f64 = 0.7;

/// Mix two colors on contact
///
/// Pure and deterministic. Every intermediate is non-negative, so `as i32`
/// truncation is truncation toward zero. The result is never near-white
/// (channel spread < 30 with mean > 200).
pub fn mix_colors(c1: Color, c2: Color) -> Color {
    let b1 = c1.brightness();
    let b2 = c2.brightness();

    let total = (b1 + b2).max(MIN_TOTAL_BRIGHTNESS);
    let w1 = b1 / total;
    let w2 = b2 / total;

    let blend = |a: u8, b: u8| -> i32 {
        let (a, b) = (a as f64, b as f64);
        ((a * w1 + b * w2) * LINEAR_SHARE + (a * b / 255.0) * MULTIPLY_SHARE) as i32
    };

    let mut rgb = [blend(c1.r, c2.r), blend(c1.g, c2.g), blend(c1.b, c2.b)];

    let max_component = rgb.iter().copied().fold(1, i32::max);
    if max_component < DARK_THRESHOLD {
        let scale = 255.0 / max_component as f64;
        for ch in &mut rgb {
            *ch = ((*ch as f64 * scale * DARK_RESCALE) as i32).min(255);
        }
    } else {
        for ch in &mut rgb {
            *ch = ((*ch as f64 * CONTRAST_BOOST) as i32).min(255);
        }
    }

    let [r, g, b] = rgb;
    let avg = (r + g + b) as f64 / 3.0;
    let spread = (r as f64 - avg).abs() + (g as f64 - avg).abs() + (b as f64 - avg).abs();

    if spread < WASHED_OUT_SPREAD && avg > WASHED_OUT_MEAN {
        // Ties fall through to blue
        let dominant = if r > g && r > b {
            0
        } else if g > r && g > b {
            1
        } else {
            2
        };
        for (i, ch) in rgb.iter_mut().enumerate() {
            *ch = if i == dominant {
                ((*ch as f64 * DOMINANT_BOOST) as i32).min(255)
            } else {
                ((*ch as f64 * RECESSIVE_DAMP) as i32).max(0)
            };
        }
    }

    let [r, g, b] = rgb;
    Color::new(r, g, b)
}
