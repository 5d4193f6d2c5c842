use image::{Rgb, RgbImage};
use crate::models::{BoundingBox, CandidateRegion, CardCategory};

/// Pixel and fraction thresholds for the color classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorThresholds {
    /// Share of red pixels needed for heart_or_diamond
    pub red_fraction: f32,
    /// Share of dark pixels needed for spade_or_club
    pub black_fraction: f32,
    /// Hue distance from 0° (degrees) still counted as red
    pub red_hue_span: f32,
    pub red_min_saturation: f32,
    pub red_min_value: f32,
    /// HSV value at or below which a pixel counts as dark
    pub black_max_value: f32,
    /// Sample every n-th pixel in both directions
    pub sample_step: u32,
}

impl Default for ColorThresholds {
    fn default() -> Self {
        Self {
            red_fraction: 0.5,
            black_fraction: 0.5,
            red_hue_span: 20.0,
            red_min_saturation: 0.4,
            red_min_value: 0.45,
            black_max_value: 0.2,
            sample_step: 1,
        }
    }
}

/// Pixel tallies for one sampled region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorSample {
    pub sampled: u64,
    pub red: u64,
    pub black: u64,
}

impl ColorSample {
    pub fn red_fraction(&self) -> f32 {
        if self.sampled == 0 {
            return 0.0;
        }
        self.red as f32 / self.sampled as f32
    }

    pub fn black_fraction(&self) -> f32 {
        if self.sampled == 0 {
            return 0.0;
        }
        self.black as f32 / self.sampled as f32
    }
}

/// RGB to (hue in degrees [0, 360), saturation [0, 1], value [0, 1])
pub fn rgb_to_hsv(pixel: &Rgb<u8>) -> (f32, f32, f32) {
    let r = pixel[0] as f32 / 255.0;
    let g = pixel[1] as f32 / 255.0;
    let b = pixel[2] as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    (hue, saturation, max)
}

impl ColorThresholds {
    pub fn is_red(&self, pixel: &Rgb<u8>) -> bool {
        let (h, s, v) = rgb_to_hsv(pixel);
        let near_zero_hue = h <= self.red_hue_span || h >= 360.0 - self.red_hue_span;
        near_zero_hue && s >= self.red_min_saturation && v >= self.red_min_value
    }

    pub fn is_black(&self, pixel: &Rgb<u8>) -> bool {
        let (_, _, v) = rgb_to_hsv(pixel);
        v <= self.black_max_value
    }

    /// Apply the ordered rules. Red is checked first, so it wins when both pass.
    pub fn decide(&self, sample: &ColorSample) -> CardCategory {
        if sample.sampled == 0 {
            return CardCategory::UnknownCard;
        }
        if sample.red_fraction() >= self.red_fraction {
            CardCategory::HeartOrDiamond
        } else if sample.black_fraction() >= self.black_fraction {
            CardCategory::SpadeOrClub
        } else {
            CardCategory::UnknownCard
        }
    }
}

/// Tally red and dark pixels inside a box, clipped to the image bounds
pub fn sample_region(img: &RgbImage, bbox: &BoundingBox, thresholds: &ColorThresholds) -> ColorSample {
    let mut sample = ColorSample::default();
    let step = thresholds.sample_step.max(1) as usize;

    let x_end = bbox.x.saturating_add(bbox.width).min(img.width());
    let y_end = bbox.y.saturating_add(bbox.height).min(img.height());

    for y in (bbox.y..y_end).step_by(step) {
        for x in (bbox.x..x_end).step_by(step) {
            let pixel = img.get_pixel(x, y);
            sample.sampled += 1;
            if thresholds.is_red(pixel) {
                sample.red += 1;
            } else if thresholds.is_black(pixel) {
                sample.black += 1;
            }
        }
    }

    sample
}

/// Classify one candidate from the colors inside its bounding rectangle.
/// Never fails: no confident signal (or nothing to sample) gives unknown_card.
pub fn classify(region: &CandidateRegion, img: &RgbImage, thresholds: &ColorThresholds) -> CardCategory {
    let sample = sample_region(img, &region.bbox, thresholds);
    thresholds.decide(&sample)
}
