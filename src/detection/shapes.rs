use crate::models::{CandidateRegion, Contour};

/// Geometric bounds a bounding rectangle must satisfy to count as a card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeThresholds {
    pub min_area: u64,
    pub max_area: u64,
    pub min_aspect: f32,
    pub max_aspect: f32,
}

impl Default for ShapeThresholds {
    fn default() -> Self {
        // Roughly playing-card proportions (63x88mm is 1.40)
        Self {
            min_area: 1500,
            max_area: 50_000,
            min_aspect: 1.2,
            max_aspect: 1.6,
        }
    }
}

impl ShapeThresholds {
    pub fn accepts(&self, region: &CandidateRegion) -> bool {
        region.area >= self.min_area
            && region.area <= self.max_area
            && region.aspect_ratio >= self.min_aspect
            && region.aspect_ratio <= self.max_aspect
    }
}

/// Turn a contour into a candidate if its bounding rectangle looks like a card.
/// Degenerate contours (no points, zero-width boxes) yield None.
pub fn to_candidate(contour: &Contour, thresholds: &ShapeThresholds) -> Option<CandidateRegion> {
    let bbox = contour.bounding_rect()?;
    let region = CandidateRegion::from_bbox(bbox);
    thresholds.accepts(&region).then_some(region)
}

/// Filter contours down to card-shaped candidates, preserving contour order.
///
/// Overlapping or nested regions are all kept; one physical card may be counted twice
/// when its outline is traced as separate outer borders.
pub fn filter_cards(contours: &[Contour], thresholds: &ShapeThresholds) -> Vec<CandidateRegion> {
    contours
        .iter()
        .filter_map(|c| to_candidate(c, thresholds))
        .collect()
}
