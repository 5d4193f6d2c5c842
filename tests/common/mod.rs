mod fixtures;
#[allow(unused_imports)]
pub use fixtures::*;

// Re-export commonly used types from cardwatch for tests
#[allow(unused_imports)]
pub use cardwatch::{
    BoundingBox, CandidateRegion, CardCategory, CategoryCounts, Contour, DetectionPipeline, Frame,
    FrameCounts, SessionStats, StatsSnapshot,
};
