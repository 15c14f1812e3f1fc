use super::*;
use crate::foundation::core::Rgba8;

const LIMIT: PixelRect = PixelRect {
    x0: 0,
    y0: 0,
    x1: 64,
    y1: 64,
};

fn spans(x0: f64, y0: f64, x1: f64, y1: f64, thickness: f64) -> Vec<PixelRun> {
    let line = Line {
        start: Point::new(x0, y0),
        end: Point::new(x1, y1),
        thickness,
        color: Rgba8::BLACK,
    };
    let mut runs: Vec<PixelRun> = Vec::new();
    spans_into(&line, LIMIT, &mut runs);
    runs
}

fn pixel_count(runs: &[PixelRun]) -> u32 {
    runs.iter().map(|r| r.len).sum()
}

#[test]
fn horizontal_hairline_is_half_open() {
    assert_eq!(spans(2.0, 5.5, 10.0, 5.5, 1.0), vec![PixelRun::new(2, 5, 8)]);
    // Direction does not matter.
    assert_eq!(spans(10.0, 5.5, 2.0, 5.5, 1.0), vec![PixelRun::new(2, 5, 8)]);
}

#[test]
fn vertical_hairline_is_half_open() {
    let runs = spans(3.5, 1.0, 3.5, 4.0, 1.0);
    assert_eq!(
        runs,
        vec![
            PixelRun::new(3, 1, 1),
            PixelRun::new(3, 2, 1),
            PixelRun::new(3, 3, 1),
        ]
    );
}

#[test]
fn diagonal_hairline_includes_both_ends() {
    let runs = spans(0.0, 0.0, 5.0, 5.0, 1.0);
    assert_eq!(pixel_count(&runs), 6);
    assert_eq!(runs.first(), Some(&PixelRun::new(0, 0, 1)));
    assert_eq!(runs.last(), Some(&PixelRun::new(5, 5, 1)));
}

#[test]
fn shallow_hairline_batches_into_runs() {
    let runs = spans(0.0, 0.0, 9.0, 1.0, 1.0);
    assert_eq!(pixel_count(&runs), 10);
    assert_eq!(runs.len(), 2);
}

#[test]
fn thick_horizontal_line_is_a_crisp_band() {
    let runs = spans(4.0, 10.0, 12.0, 10.0, 4.0);
    assert_eq!(runs.len(), 4);
    for (i, r) in runs.iter().enumerate() {
        assert_eq!(*r, PixelRun::new(4, 8 + i as i32, 8));
    }
}

#[test]
fn thick_diagonal_line_covers_its_quad() {
    let runs = spans(10.0, 10.0, 30.0, 30.0, 4.0);
    let area = 20.0 * 2f64.sqrt() * 4.0;
    let count = f64::from(pixel_count(&runs));
    assert!((count - area).abs() < area * 0.15, "count={count} area={area}");
}

#[test]
fn extend_and_shorten_move_along_direction() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    assert_eq!(extend_line(a, b, 2.0), Point::new(12.0, 0.0));
    assert_eq!(shorten_line(a, b, 2.0), Point::new(8.0, 0.0));
    assert_eq!(extend_line(a, a, 2.0), a);
}

#[test]
fn zero_length_line_draws_nothing() {
    assert!(spans(5.0, 5.0, 5.0, 5.0, 1.0).is_empty());
    assert!(spans(5.0, 5.0, 5.0, 5.0, 3.0).is_empty());
}
