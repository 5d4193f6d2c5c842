pub mod preprocessing;
pub mod contours;
pub mod shapes;
pub mod color;

use tracing::{debug, trace};
use crate::models::{CandidateRegion, CardCategory, Contour, Frame, FrameCounts};
use crate::stats::aggregate;
use color::ColorThresholds;
use preprocessing::EdgeMap;
use shapes::ShapeThresholds;

/// Every threshold the per-frame pipeline uses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    pub canny_low: f32,
    pub canny_high: f32,
    pub shape: ShapeThresholds,
    pub color: ColorThresholds,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            shape: ShapeThresholds::default(),
            color: ColorThresholds::default(),
        }
    }
}

/// What one pass over a frame produced
#[derive(Debug, Clone)]
pub struct FrameDetection {
    pub candidates: Vec<CandidateRegion>,
    pub labels: Vec<CardCategory>,
    pub counts: FrameCounts,
}

/// Per-frame orchestrator: edges, contours, shape filter, color classifier, counts
#[derive(Debug, Clone, Default)]
pub struct DetectionPipeline {
    config: DetectorConfig,
}

impl DetectionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn with_canny_thresholds(mut self, low: f32, high: f32) -> Self {
        self.config.canny_low = low;
        self.config.canny_high = high;
        self
    }

    pub fn with_shape_thresholds(mut self, shape: ShapeThresholds) -> Self {
        self.config.shape = shape;
        self
    }

    pub fn with_color_thresholds(mut self, color: ColorThresholds) -> Self {
        self.config.color = color;
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run the full pipeline on a frame
    pub fn detect(&self, frame: &Frame) -> FrameDetection {
        let contours = self.get_contours(frame);
        let candidates = shapes::filter_cards(&contours, &self.config.shape);

        debug!(
            contours = contours.len(),
            candidates = candidates.len(),
            "Filtered contours for card shapes"
        );

        let labels: Vec<CardCategory> = candidates
            .iter()
            .map(|region| self.classify(region, frame))
            .collect();
        let counts = aggregate(labels.iter().copied());

        FrameDetection {
            candidates,
            labels,
            counts,
        }
    }

    /// Classify a single candidate against the frame it came from
    pub fn classify(&self, region: &CandidateRegion, frame: &Frame) -> CardCategory {
        let category = color::classify(region, &frame.image, &self.config.color);
        trace!(
            x = region.bbox.x,
            y = region.bbox.y,
            width = region.bbox.width,
            height = region.bbox.height,
            %category,
            "Classified candidate"
        );
        category
    }

    /// Get the edge map for a frame (for debugging)
    pub fn get_edges(&self, frame: &Frame) -> EdgeMap {
        preprocessing::edge_map(&frame.image, self.config.canny_low, self.config.canny_high)
    }

    /// Get all contours from a frame (for debugging)
    pub fn get_contours(&self, frame: &Frame) -> Vec<Contour> {
        let edges = self.get_edges(frame);
        contours::find_contours(&edges)
    }

    /// Get card-shaped candidates from a frame (for debugging)
    pub fn get_candidates(&self, frame: &Frame) -> Vec<CandidateRegion> {
        let all_contours = self.get_contours(frame);
        shapes::filter_cards(&all_contours, &self.config.shape)
    }
}
