use image::{GrayImage, RgbImage};
use imageproc::edges::canny;

/// Binary edge image: 255 where an edge was found, 0 elsewhere
pub type EdgeMap = GrayImage;

/// Convert frame to a single intensity channel
pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    image::imageops::grayscale(img)
}

/// Detect edges using Canny edge detector (includes its own Gaussian smoothing)
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> EdgeMap {
    if img.width() == 0 || img.height() == 0 {
        return GrayImage::new(img.width(), img.height());
    }
    canny(img, low_threshold, high_threshold)
}

/// Frame to edge map in one pass
pub fn edge_map(img: &RgbImage, low_threshold: f32, high_threshold: f32) -> EdgeMap {
    let gray = to_grayscale(img);
    detect_edges(&gray, low_threshold, high_threshold)
}
