//! Unit tests for camera smoothing

use glam::Vec2;
use platformer_core::camera::{Camera, DEFAULT_TAKE, DEFAULT_VIEW_SIZE};
use platformer_core::tests::test_helpers::{approx_eq_f32, approx_eq_vec2};

#[test]
fn test_follow_blends_per_axis() {
    let mut camera = Camera::new(Vec2::ZERO, DEFAULT_VIEW_SIZE, DEFAULT_TAKE);
    let center = camera.follow(Vec2::new(100.0, 200.0));

    assert!(approx_eq_f32(center.x, 3.0, 1e-5));
    assert!(approx_eq_f32(center.y, 6.0, 1e-5));
    assert_eq!(camera.center, center);
}

#[test]
fn test_follow_matches_blend_formula() {
    let previous = Vec2::new(110.0, 964.0);
    let target = Vec2::new(300.0, 700.0);
    let take = 0.03;
    let mut camera = Camera::new(previous, DEFAULT_VIEW_SIZE, take);

    camera.follow(target);

    let expected = previous * (1.0 - take) + target * take;
    assert_eq!(camera.center, expected);
}

#[test]
fn test_follow_converges_on_still_target() {
    let target = Vec2::new(500.0, -250.0);
    let mut camera = Camera::new(Vec2::ZERO, DEFAULT_VIEW_SIZE, DEFAULT_TAKE);

    for _ in 0..1000 {
        camera.follow(target);
    }

    assert!(approx_eq_vec2(camera.center, target, 1e-2));
}

#[test]
fn test_follow_is_per_call_not_per_second() {
    // Two calls cover more distance than one, whatever the frame time.
    let target = Vec2::new(100.0, 0.0);
    let mut once = Camera::new(Vec2::ZERO, DEFAULT_VIEW_SIZE, DEFAULT_TAKE);
    let mut twice = once;

    once.follow(target);
    twice.follow(target);
    twice.follow(target);

    assert!(twice.center.x > once.center.x);
    assert!(approx_eq_f32(twice.center.x, 100.0 * (1.0 - 0.97 * 0.97), 1e-3));
}

#[test]
fn test_take_of_zero_and_one() {
    let target = Vec2::new(40.0, 50.0);

    let mut frozen = Camera::new(Vec2::new(1.0, 2.0), DEFAULT_VIEW_SIZE, 0.0);
    frozen.follow(target);
    assert_eq!(frozen.center, Vec2::new(1.0, 2.0));

    let mut snapping = Camera::new(Vec2::new(1.0, 2.0), DEFAULT_VIEW_SIZE, 1.0);
    snapping.follow(target);
    assert_eq!(snapping.center, target);
}

#[test]
fn test_visible_rect_is_centered() {
    let camera = Camera::new(Vec2::new(110.0, 964.0), Vec2::new(512.0, 384.0), DEFAULT_TAKE);
    let view = camera.visible_rect();

    assert_eq!(view.left(), 110.0 - 256.0);
    assert_eq!(view.top(), 964.0 - 192.0);
    assert_eq!(view.width(), 512.0);
    assert_eq!(view.height(), 384.0);
    assert_eq!(view.center(), camera.center);
}
