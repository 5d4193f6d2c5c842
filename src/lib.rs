pub mod capture;
pub mod detection;
pub mod models;
pub mod report;
pub mod session;
pub mod stats;

pub use models::{BoundingBox, CandidateRegion, CardCategory, CategoryCounts, Contour, Frame, FrameCounts};
pub use detection::{DetectionPipeline, DetectorConfig, FrameDetection};
pub use capture::{CaptureError, FrameSource, ReplaySource};
pub use report::{CollectingReporter, Reporter, TextReporter};
pub use session::{Session, SessionConfig, SessionError};
pub use stats::{aggregate, SessionState, SessionStats, StatsError, StatsSnapshot};
