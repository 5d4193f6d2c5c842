use image::{DynamicImage, RgbImage};
use imageproc::point::Point;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::time::Instant;

/// A captured RGB image plus the instant it was grabbed
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbImage,
    pub captured_at: Instant,
}

impl Frame {
    pub fn new(image: RgbImage, captured_at: Instant) -> Self {
        Self { image, captured_at }
    }

    /// Convert any decoded image (RGBA screenshots, grayscale files, ...) to an RGB frame
    pub fn from_dynamic(image: DynamicImage, captured_at: Instant) -> Self {
        Self {
            image: image.to_rgb8(),
            captured_at,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Closed boundary traced from the edge map, reduced to its corner points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Minimal axis-aligned rectangle enclosing every point (inclusive of both ends).
    /// Returns None for an empty contour.
    pub fn bounding_rect(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        // Edge maps only produce non-negative coordinates
        if min_x < 0 || min_y < 0 {
            return None;
        }

        Some(BoundingBox {
            x: min_x as u32,
            y: min_y as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }
}

/// Bounding box in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Longer side over shorter side, so always >= 1.0 (0.0 for a degenerate box)
    pub fn aspect_ratio(&self) -> f32 {
        let long = self.width.max(self.height) as f32;
        let short = self.width.min(self.height) as f32;
        if short == 0.0 {
            return 0.0;
        }
        long / short
    }
}

/// A contour's bounding rectangle that passed the card-shape filters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateRegion {
    pub bbox: BoundingBox,
    pub area: u64,
    pub aspect_ratio: f32,
}

impl CandidateRegion {
    pub fn from_bbox(bbox: BoundingBox) -> Self {
        Self {
            bbox,
            area: bbox.area(),
            aspect_ratio: bbox.aspect_ratio(),
        }
    }
}

/// Category a card candidate is sorted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardCategory {
    HeartOrDiamond,
    SpadeOrClub,
    UnknownCard,
}

impl CardCategory {
    pub const COUNT: usize = 3;

    /// Every variant, in report order
    pub const ALL: [CardCategory; Self::COUNT] = [
        CardCategory::HeartOrDiamond,
        CardCategory::SpadeOrClub,
        CardCategory::UnknownCard,
    ];

    pub fn index(self) -> usize {
        match self {
            CardCategory::HeartOrDiamond => 0,
            CardCategory::SpadeOrClub => 1,
            CardCategory::UnknownCard => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CardCategory::HeartOrDiamond => "heart_or_diamond",
            CardCategory::SpadeOrClub => "spade_or_club",
            CardCategory::UnknownCard => "unknown_card",
        }
    }
}

impl fmt::Display for CardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count per category. Every category is always present, zero by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    counts: [u64; CardCategory::COUNT],
}

/// Counts scoped to a single frame
pub type FrameCounts = CategoryCounts;

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: CardCategory) -> u64 {
        self.counts[category.index()]
    }

    pub fn increment(&mut self, category: CardCategory) {
        self[category] = self[category].saturating_add(1);
    }

    /// Elementwise add of another mapping
    pub fn merge(&mut self, other: &CategoryCounts) {
        for category in CardCategory::ALL {
            self[category] = self[category].saturating_add(other[category]);
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|c| *c == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardCategory, u64)> + '_ {
        CardCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

impl Index<CardCategory> for CategoryCounts {
    type Output = u64;

    fn index(&self, category: CardCategory) -> &u64 {
        &self.counts[category.index()]
    }
}

impl IndexMut<CardCategory> for CategoryCounts {
    fn index_mut(&mut self, category: CardCategory) -> &mut u64 {
        &mut self.counts[category.index()]
    }
}
