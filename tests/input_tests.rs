// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn short_press_counts_as_click() {
    let mut p = PressState::default();
    p.press(Vec2::new(100.0, 100.0));
    p.drag_to(Vec2::new(102.0, 101.0));
    assert!(p.release(Vec2::new(101.0, 100.0), 6.0));
    assert!(!p.down);
}

#[test]
fn drag_beyond_slop_is_not_a_click_even_if_it_returns() {
    let mut p = PressState::default();
    p.press(Vec2::new(100.0, 100.0));
    p.drag_to(Vec2::new(140.0, 100.0));
    p.drag_to(Vec2::new(100.0, 100.0));
    assert!(p.travel >= 40.0);
    assert!(!p.release(Vec2::new(100.0, 100.0), 6.0));
}

#[test]
fn drag_reports_incremental_deltas_only_while_pressed() {
    let mut p = PressState::default();
    assert_eq!(p.drag_to(Vec2::new(5.0, 5.0)), None);
    p.press(Vec2::ZERO);
    assert_eq!(p.drag_to(Vec2::new(3.0, 4.0)), Some(Vec2::new(3.0, 4.0)));
    assert_eq!(p.drag_to(Vec2::new(4.0, 2.0)), Some(Vec2::new(1.0, -2.0)));
    p.release(Vec2::new(4.0, 2.0), 6.0);
    assert_eq!(p.drag_to(Vec2::new(9.0, 9.0)), None);
}

#[test]
fn release_without_press_is_ignored() {
    let mut p = PressState::default();
    assert!(!p.release(Vec2::ZERO, 6.0));
}

#[test]
fn client_coords_scale_into_backing_store() {
    // 400x300 CSS canvas at (10, 20) with a 2x backing store
    let px = client_to_canvas_px(Vec2::new(210.0, 170.0), (10.0, 20.0, 400.0, 300.0), (800, 600))
        .expect("laid out");
    assert!((px.x - 400.0).abs() < 1e-4);
    assert!((px.y - 300.0).abs() < 1e-4);
}

#[test]
fn unlaid_canvas_yields_no_position() {
    assert!(client_to_canvas_px(Vec2::ZERO, (0.0, 0.0, 0.0, 300.0), (1, 1)).is_none());
}

#[test]
fn wheel_down_zooms_out() {
    assert!((wheel_notches(100.0, 100.0) + 1.0).abs() < 1e-6);
    assert!(wheel_notches(-250.0, 100.0) > 2.4);
    assert_eq!(wheel_notches(f64::NAN, 100.0), 0.0);
    assert_eq!(wheel_notches(100.0, 0.0), 0.0);
}
