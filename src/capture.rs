use image::{ImageFormat, ImageReader, RgbImage};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use crate::models::Frame;

/// Failure to obtain a frame. Always fatal for the capture loop.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no capture backend available: {0}")]
    Unavailable(String),

    #[error("monitor {requested} not found ({available} available)")]
    MonitorNotFound { requested: usize, available: usize },

    #[error("capture backend failed: {0}")]
    Backend(String),

    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
}

/// Supplier of frames for the capture loop
pub trait FrameSource {
    /// Block until the next frame is available
    fn next_frame(&mut self) -> Result<Frame, CaptureError>;

    /// Human-readable name for logging
    fn name(&self) -> &str {
        "frame source"
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        (**self).next_frame()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Replays a directory of still images in path order, looping forever
pub struct ReplaySource {
    images: Vec<RgbImage>,
    position: usize,
    label: String,
}

impl ReplaySource {
    /// Load every decodable image in `dir`
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, CaptureError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            CaptureError::Unavailable(format!("cannot read replay directory {}: {}", dir.display(), e))
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && ImageFormat::from_path(path).is_ok())
            .collect();
        paths.sort();

        let mut images = Vec::with_capacity(paths.len());
        for path in &paths {
            let img = ImageReader::open(path)
                .map_err(|e| CaptureError::Decode { path: path.clone(), message: e.to_string() })?
                .decode()
                .map_err(|e| CaptureError::Decode { path: path.clone(), message: e.to_string() })?;
            debug!(path = %path.display(), width = img.width(), height = img.height(), "Loaded replay frame");
            images.push(img.to_rgb8());
        }

        let source = Self::from_images(images, format!("replay:{}", dir.display()))?;
        info!(frames = source.images.len(), dir = %dir.display(), "Replay source ready");
        Ok(source)
    }

    /// Cycle through images already in memory
    pub fn from_images(images: Vec<RgbImage>, label: impl Into<String>) -> Result<Self, CaptureError> {
        let label = label.into();
        if images.is_empty() {
            return Err(CaptureError::Unavailable(format!("{} contains no images", label)));
        }
        Ok(Self {
            images,
            position: 0,
            label,
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        let image = self.images[self.position].clone();
        self.position = (self.position + 1) % self.images.len();
        Ok(Frame::new(image, Instant::now()))
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Live screen capture of one monitor
#[cfg(feature = "screen")]
pub struct ScreenSource {
    monitor: xcap::Monitor,
    label: String,
}

#[cfg(feature = "screen")]
impl ScreenSource {
    /// Open the 1-based monitor index (1 = primary/first)
    pub fn open(monitor_number: usize) -> Result<Self, CaptureError> {
        let monitors = xcap::Monitor::all().map_err(|e| CaptureError::Unavailable(e.to_string()))?;
        if monitors.is_empty() {
            return Err(CaptureError::Unavailable("no monitors detected".to_string()));
        }

        let available = monitors.len();
        let monitor = monitor_number
            .checked_sub(1)
            .and_then(|idx| monitors.into_iter().nth(idx))
            .ok_or(CaptureError::MonitorNotFound { requested: monitor_number, available })?;

        Ok(Self {
            monitor,
            label: format!("monitor {}", monitor_number),
        })
    }
}

#[cfg(feature = "screen")]
impl FrameSource for ScreenSource {
    fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        let screenshot = self
            .monitor
            .capture_image()
            .map_err(|e| CaptureError::Backend(e.to_string()))?;
        Ok(Frame::from_dynamic(image::DynamicImage::ImageRgba8(screenshot), Instant::now()))
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Open the screen capture backend for a monitor, if one was compiled in
pub fn open_screen(monitor_number: usize) -> Result<Box<dyn FrameSource>, CaptureError> {
    #[cfg(feature = "screen")]
    {
        Ok(Box::new(ScreenSource::open(monitor_number)?))
    }

    #[cfg(not(feature = "screen"))]
    {
        Err(CaptureError::Unavailable(format!(
            "screen capture for monitor {} needs the `screen` feature; use --replay <DIR> instead",
            monitor_number
        )))
    }
}
