//! Integration tests for color-based classification.

mod common;

use cardwatch::detection::color::{classify, rgb_to_hsv, sample_region, ColorSample, ColorThresholds};
use cardwatch::detection::shapes::ShapeThresholds;
use image::{Rgb, RgbImage};

use common::*;

fn classify_solid(color: Rgb<u8>) -> CardCategory {
    let frame = solid_frame(40, 56, color);
    classify(&region(0, 0, 40, 56), &frame.image, &ColorThresholds::default())
}

#[test]
fn test_red_card_scenario() {
    // 42x59: area 2478, aspect ~1.40, 36 of 59 rows red (~61%)
    let mut img = RgbImage::from_pixel(42, 59, WHITE);
    paint_rect(&mut img, 0, 0, 42, 36, CARD_RED);
    let candidate = region(0, 0, 42, 59);

    assert!(ShapeThresholds::default().accepts(&candidate));

    let sample = sample_region(&img, &candidate.bbox, &ColorThresholds::default());
    assert!(sample.red_fraction() >= 0.6);
    assert_eq!(
        classify(&candidate, &img, &ColorThresholds::default()),
        CardCategory::HeartOrDiamond
    );

    // Exactly 60% red against the 50% threshold
    let sixty_percent = ColorSample { sampled: 10, red: 6, black: 0 };
    assert_eq!(sixty_percent.red_fraction(), 0.6);
    assert_eq!(
        ColorThresholds::default().decide(&sixty_percent),
        CardCategory::HeartOrDiamond
    );
}

#[test]
fn test_basic_colors() {
    assert_eq!(classify_solid(Rgb([200, 50, 50])), CardCategory::HeartOrDiamond);
    assert_eq!(classify_solid(Rgb([30, 30, 30])), CardCategory::SpadeOrClub);
    assert_eq!(classify_solid(Rgb([100, 100, 100])), CardCategory::UnknownCard);
    assert_eq!(classify_solid(WHITE), CardCategory::UnknownCard);
    // Saturated but blue, not red
    assert_eq!(classify_solid(Rgb([40, 60, 220])), CardCategory::UnknownCard);
}

#[test]
fn test_black_majority_without_enough_red() {
    let mut img = RgbImage::from_pixel(40, 60, CARD_BLACK);
    paint_rect(&mut img, 0, 0, 40, 15, CARD_RED);

    assert_eq!(
        classify(&region(0, 0, 40, 60), &img, &ColorThresholds::default()),
        CardCategory::SpadeOrClub
    );
}

#[test]
fn test_red_wins_ties() {
    let thresholds = ColorThresholds::default();
    let tie = ColorSample { sampled: 10, red: 5, black: 5 };
    assert_eq!(thresholds.decide(&tie), CardCategory::HeartOrDiamond);

    // Both rules satisfied with lower thresholds: red is still checked first
    let lenient = ColorThresholds {
        red_fraction: 0.3,
        black_fraction: 0.3,
        ..ColorThresholds::default()
    };
    let both = ColorSample { sampled: 10, red: 4, black: 6 };
    assert_eq!(lenient.decide(&both), CardCategory::HeartOrDiamond);
}

#[test]
fn test_region_outside_frame_is_unknown() {
    let frame = solid_frame(20, 20, CARD_RED);
    let far_away = region(100, 100, 40, 56);

    let sample = sample_region(&frame.image, &far_away.bbox, &ColorThresholds::default());
    assert_eq!(sample.sampled, 0);
    assert_eq!(
        classify(&far_away, &frame.image, &ColorThresholds::default()),
        CardCategory::UnknownCard
    );
}

#[test]
fn test_region_is_clipped_to_frame() {
    let frame = solid_frame(30, 30, CARD_BLACK);
    let sample = sample_region(&frame.image, &bbox(20, 20, 40, 40), &ColorThresholds::default());
    assert_eq!(sample.sampled, 100);
    assert_eq!(sample.black, 100);
}

#[test]
fn test_sample_step_thins_sampling() {
    let frame = solid_frame(40, 40, CARD_RED);
    let thresholds = ColorThresholds {
        sample_step: 2,
        ..ColorThresholds::default()
    };
    let sample = sample_region(&frame.image, &bbox(0, 0, 40, 40), &thresholds);
    assert_eq!(sample.sampled, 400);
    assert_eq!(sample.red, 400);
}

#[test]
fn test_classification_is_pure() {
    let frame = frame_with_cards(200, 200, WHITE, &[(bbox(30, 30, 100, 140), CARD_RED)]);
    let pipeline = DetectionPipeline::new();
    let candidate = region(30, 30, 100, 140);

    let first = pipeline.classify(&candidate, &frame);
    for _ in 0..5 {
        assert_eq!(pipeline.classify(&candidate, &frame), first);
    }
}

#[test]
fn test_hsv_conversion() {
    let (h, s, v) = rgb_to_hsv(&Rgb([255, 0, 0]));
    assert_eq!((h, s, v), (0.0, 1.0, 1.0));

    let (h, _, _) = rgb_to_hsv(&Rgb([0, 0, 255]));
    assert!((h - 240.0).abs() < 1e-3);

    let (h, _, _) = rgb_to_hsv(&Rgb([255, 0, 40]));
    assert!(h > 340.0 && h < 360.0, "crimson wraps around to just below 360, got {}", h);

    let (_, s, v) = rgb_to_hsv(&Rgb([0, 0, 0]));
    assert_eq!((s, v), (0.0, 0.0));
}
