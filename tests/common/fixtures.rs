#![allow(dead_code)]

use cardwatch::capture::{CaptureError, FrameSource};
use cardwatch::{BoundingBox, CandidateRegion, Contour, Frame};
use image::{Rgb, RgbImage};
use imageproc::point::Point;
use std::time::Instant;

/// Color constants for tests
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const CARD_RED: Rgb<u8> = Rgb([220, 30, 30]);
pub const CARD_BLACK: Rgb<u8> = Rgb([20, 20, 20]);
pub const GRAY: Rgb<u8> = Rgb([100, 100, 100]);

/// Creates a frame filled with one color
pub fn solid_frame(width: u32, height: u32, color: Rgb<u8>) -> Frame {
    Frame::new(RgbImage::from_pixel(width, height, color), Instant::now())
}

/// Paints a filled rectangle onto an existing image
pub fn paint_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    for py in y..(y + height).min(img.height()) {
        for px in x..(x + width).min(img.width()) {
            img.put_pixel(px, py, color);
        }
    }
}

/// Creates a frame with solid "cards" painted on a background
pub fn frame_with_cards(width: u32, height: u32, background: Rgb<u8>, cards: &[(BoundingBox, Rgb<u8>)]) -> Frame {
    let mut img = RgbImage::from_pixel(width, height, background);
    for (bbox, color) in cards {
        paint_rect(&mut img, bbox.x, bbox.y, bbox.width, bbox.height, *color);
    }
    Frame::new(img, Instant::now())
}

pub fn bbox(x: u32, y: u32, width: u32, height: u32) -> BoundingBox {
    BoundingBox { x, y, width, height }
}

pub fn region(x: u32, y: u32, width: u32, height: u32) -> CandidateRegion {
    CandidateRegion::from_bbox(bbox(x, y, width, height))
}

/// Contour made of the four corners of a rectangle covering `width` x `height` pixels
pub fn rect_contour(x: i32, y: i32, width: i32, height: i32) -> Contour {
    let (x2, y2) = (x + width - 1, y + height - 1);
    Contour::new(vec![
        Point::new(x, y),
        Point::new(x, y2),
        Point::new(x2, y2),
        Point::new(x2, y),
    ])
}

/// Frame source producing small blank frames stamped with the (possibly paused)
/// tokio clock. Fails with a backend error once `fail_after` frames were served.
pub struct ScriptedSource {
    pub served: usize,
    pub fail_after: Option<usize>,
}

impl ScriptedSource {
    pub fn endless() -> Self {
        Self { served: 0, fail_after: None }
    }

    pub fn failing_after(frames: usize) -> Self {
        Self { served: 0, fail_after: Some(frames) }
    }
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        if self.fail_after.is_some_and(|limit| self.served >= limit) {
            return Err(CaptureError::Backend("display went away".to_string()));
        }
        self.served += 1;
        let img = RgbImage::from_pixel(32, 32, WHITE);
        Ok(Frame::new(img, tokio::time::Instant::now().into_std()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
