use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_css_color("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(parse_css_color("#0a0").unwrap(), Rgba8::opaque(0, 170, 0));
    assert_eq!(parse_css_color("#FF8000").unwrap(), Rgba8::opaque(255, 128, 0));
    assert_eq!(parse_css_color("  #000000 ").unwrap(), Rgba8::BLACK);
}

#[test]
fn parses_functional_forms() {
    assert_eq!(
        parse_css_color("rgb(1, 2, 3)").unwrap(),
        Rgba8::opaque(1, 2, 3)
    );
    assert_eq!(
        parse_css_color("rgba(0,0,255,1)").unwrap(),
        Rgba8::opaque(0, 0, 255)
    );
    assert_eq!(
        parse_css_color("RGBA(10, 20, 30, 0.5)").unwrap(),
        Rgba8::new(10, 20, 30, 128)
    );
}

#[test]
fn out_of_range_channels_are_clamped() {
    assert_eq!(
        parse_css_color("rgba(300, -5, 12.4, 2)").unwrap(),
        Rgba8::new(255, 0, 12, 255)
    );
    assert_eq!(
        parse_css_color("rgba(0, 0, 0, -1)").unwrap(),
        Rgba8::TRANSPARENT
    );
}

#[test]
fn malformed_strings_are_errors() {
    for bad in [
        "",
        "red",
        "#12",
        "#12345",
        "#ggg",
        "rgb(1,2)",
        "rgb(1,2,3,4)",
        "rgba(1,2,3)",
        "rgb(a,b,c)",
        "rgb 1,2,3",
        "hsl(0, 0%, 0%)",
    ] {
        let err = parse_css_color(bad).unwrap_err();
        assert!(matches!(err, CanvasError::Color(_)), "{bad}");
        assert!(err.to_string().starts_with("color error:"));
    }
}

#[test]
fn parser_memoizes_results() {
    let mut p = CssColorParser::new();
    let a = p.parse("#123456").unwrap();
    let b = p.parse("#123456").unwrap();
    assert_eq!(a, b);
    assert_eq!(p.cached(), 1);
    assert!(p.parse("nope").is_err());
    assert_eq!(p.cached(), 1);
}
