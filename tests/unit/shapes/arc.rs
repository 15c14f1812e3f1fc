use std::collections::BTreeSet;

use super::*;
use crate::foundation::core::Rgba8;
use crate::foundation::math::CENTER_CORRECTION;
use crate::shapes::model::CircleShape;
use crate::shapes::test_support::Canvas;

const ORANGE: Rgba8 = Rgba8::opaque(255, 140, 0);

fn arc(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> ArcShape {
    ArcShape {
        circle: CircleShape {
            center: Point::new(cx, cy),
            radius: r,
            stroke_width: 0.0,
            stroke_color: None,
            fill_color: None,
            clipping_only: false,
        },
        start_angle_deg: start,
        end_angle_deg: end,
    }
}

fn filled(mut a: ArcShape) -> ArcShape {
    a.circle.fill_color = Some(ORANGE);
    a
}

fn stroked(mut a: ArcShape, width: f64, color: Rgba8) -> ArcShape {
    a.circle.stroke_width = width;
    a.circle.stroke_color = Some(color);
    a
}

#[test]
fn full_range_fill_is_inset_disk_around_shifted_center() {
    let mut c = Canvas::new(40, 40);
    draw(&mut c.comp(1.0), &filled(arc(20.5, 20.5, 8.0, 0.0, 360.0)));
    let set = c.painted();
    // Radius 7.5 around index-space (19.5, 19.5).
    assert!(set.contains(&(13, 20)));
    assert!(set.contains(&(26, 20)));
    assert!(!set.contains(&(12, 20)));
    assert!(!set.contains(&(27, 20)));
    for &(x, y) in &set {
        let (dx, dy) = (f64::from(x) - 19.5, f64::from(y) - 19.5);
        assert!(dx * dx + dy * dy <= 7.5 * 7.5);
        assert!(set.contains(&(39 - x, y)), "x-mirror of ({x}, {y})");
        assert!(set.contains(&(x, 39 - y)), "y-mirror of ({x}, {y})");
    }
}

#[test]
fn arc_sits_half_a_pixel_up_left_of_circle() {
    let center = Point::new(20.5, 20.5);
    let arc_set = {
        let mut c = Canvas::new(40, 40);
        draw(&mut c.comp(1.0), &filled(arc(center.x, center.y, 6.0, 0.0, 360.0)));
        c.painted()
    };
    let circle_set = {
        let mut c = Canvas::new(40, 40);
        let mut runs: Vec<PixelRun> = Vec::new();
        let limit = c.comp(1.0).bounds();
        fill_into(
            Point::new(center.x + CENTER_CORRECTION, center.y + CENTER_CORRECTION),
            6.0,
            AngleRange::from_degrees(0.0, 360.0),
            limit,
            &mut runs,
        );
        c.comp(1.0).set_pixel_runs(&runs, ORANGE);
        c.painted()
    };
    // Circle placement is symmetric about pixel 20, arc placement about 19.5.
    for &(x, y) in &circle_set {
        assert!(circle_set.contains(&(40 - x, 40 - y)));
    }
    for &(x, y) in &arc_set {
        assert!(arc_set.contains(&(39 - x, 39 - y)));
    }
    let row = |s: &BTreeSet<(i32, i32)>| -> (i32, i32) {
        let xs: Vec<i32> = s.iter().filter(|p| p.1 == 20).map(|p| p.0).collect();
        (xs[0], xs[xs.len() - 1])
    };
    assert_eq!(row(&circle_set), (15, 25));
    assert_eq!(row(&arc_set), (15, 24));
    assert_eq!(origin(center), Point::new(19.5, 19.5));
}

#[test]
fn quarter_fill_stays_in_its_quadrant() {
    let mut c = Canvas::new(40, 40);
    draw(&mut c.comp(1.0), &filled(arc(20.5, 20.5, 10.0, 0.0, 90.0)));
    let set = c.painted();
    assert!(set.contains(&(24, 24)));
    assert!(!set.contains(&(16, 24)));
    assert!(!set.contains(&(24, 16)));
    assert!(set.iter().all(|&(x, y)| x >= 20 && y >= 20));
}

#[test]
fn wrapping_range_passes_through_zero() {
    let mut c = Canvas::new(40, 40);
    draw(&mut c.comp(1.0), &filled(arc(20.5, 20.5, 12.0, 350.0, 10.0)));
    let set = c.painted();
    assert!(set.contains(&(28, 20)));
    assert!(!set.contains(&(12, 20)));
    assert!(!set.contains(&(20, 28)));
    assert!(!set.contains(&(20, 12)));
}

#[test]
fn quarter_stroke_is_filtered_by_angle() {
    let mut c = Canvas::new(40, 40);
    draw(&mut c.comp(1.0), &stroked(arc(20.5, 20.5, 10.0, 0.0, 90.0), 1.0, ORANGE));
    let set = c.painted();
    assert!(!set.is_empty());
    assert!(set.iter().all(|&(x, y)| x >= 20 && y >= 20));
    // Octant diagonal of a radius-10 outline anchored at 19 / 20.
    assert!(set.contains(&(26, 26)));
}

#[test]
fn thick_translucent_stroke_blends_once() {
    let mut c = Canvas::new(40, 40);
    let shape = stroked(arc(20.0, 20.0, 10.0, 45.0, 300.0), 3.0, Rgba8::new(0, 0, 0, 90));
    draw(&mut c.comp(1.0), &shape);
    let alphas: BTreeSet<u8> = c.painted().iter().map(|&(x, y)| c.at(x, y).a).collect();
    assert_eq!(alphas, BTreeSet::from([90]));
}

#[test]
fn stroke_paints_over_fill() {
    let mut c = Canvas::new(40, 40);
    let shape = stroked(filled(arc(20.5, 20.5, 10.0, 0.0, 360.0)), 1.0, Rgba8::BLACK);
    draw(&mut c.comp(1.0), &shape);
    assert_eq!(c.at(20, 20), ORANGE);
    assert_eq!(c.at(28, 20), ORANGE);
    assert_eq!(c.at(29, 20), Rgba8::BLACK);
    assert_eq!(c.at(30, 20), Rgba8::TRANSPARENT);
}

#[test]
fn zero_radius_writes_one_pixel() {
    let mut c = Canvas::new(10, 10);
    draw(&mut c.comp(1.0), &stroked(arc(4.0, 4.0, 0.0, 0.0, 90.0), 1.0, ORANGE));
    assert_eq!(c.painted(), BTreeSet::from([(4, 4)]));
}

#[test]
fn clipping_only_marks_slice() {
    let mut c = Canvas::new(40, 40);
    let mut shape = filled(arc(20.5, 20.5, 10.0, 0.0, 180.0));
    shape.circle.clipping_only = true;
    draw(&mut c.comp(1.0), &shape);
    assert!(c.painted().is_empty());
    let marked = c.scratch_set();
    assert!(marked.contains(&(20, 25)));
    assert!(!marked.contains(&(20, 15)));
}

#[test]
fn huge_stroke_width_is_clipped_to_the_canvas() {
    let mut c = Canvas::new(30, 30);
    let shape = stroked(arc(15.0, 15.0, 6.0, 0.0, 90.0), 1e10, Rgba8::new(0, 0, 0, 90));
    draw(&mut c.comp(1.0), &shape);
    assert_eq!(c.painted().len(), 900);
}
