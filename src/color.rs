use std::fmt;

use crate::error::SvgShapeError;
use crate::named_colors;

// Alpha keeps the scale of the notation it came from: hex, rgb() and packed integers
// yield 0-255 values, rgba()/hsla() may yield 0-1 fractions, and an hsla() alpha
// written as a percentage is kept as that percentage. Callers comparing alphas across
// notations have to account for this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alpha {
    Value(f64),
    Percent(f64),
}

impl Alpha {
    pub const OPAQUE: Alpha = Alpha::Value(255.0);
}

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alpha::Value(v) => write!(f, "{}", v),
            Alpha::Percent(v) => write!(f, "{}%", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Alpha,
}

impl ColorValue {
    pub const BLACK: ColorValue = ColorValue {
        r: 0,
        g: 0,
        b: 0,
        a: Alpha::OPAQUE,
    };

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: Alpha::Value(a as f64),
        }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: Alpha) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

// One channel of a caller-supplied color tuple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    // 0-255 scale, truncated.
    Absolute(f64),
    // 0-1 scale, multiplied by 255 and truncated.
    Fraction(f64),
}

impl Component {
    fn to_channel(self) -> u8 {
        // `as` truncates toward zero and saturates (NaN maps to 0).
        match self {
            Component::Absolute(v) => v as u8,
            Component::Fraction(v) => (v * 255.0) as u8,
        }
    }

    fn to_alpha(self) -> Alpha {
        match self {
            Component::Absolute(v) | Component::Fraction(v) => Alpha::Value(v),
        }
    }
}

// Color input, tagged by notation before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorLiteral {
    Hex(String),
    Functional(String),
    Named(String),
    Tuple(Vec<Component>),
    Packed(i64),
}

impl ColorLiteral {
    // Tags web color text: `#...` is hex, `rgb...`/`hsl...` is functional and
    // anything else is treated as a keyword.
    pub fn classify(text: &str) -> ColorLiteral {
        let v = text.trim().to_ascii_lowercase();
        if v.starts_with('#') {
            ColorLiteral::Hex(v)
        } else if v.starts_with("rgb") || v.starts_with("hsl") {
            ColorLiteral::Functional(v)
        } else {
            ColorLiteral::Named(v)
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ColorLiteral::Hex(_) => "hex",
            ColorLiteral::Functional(_) => "functional",
            ColorLiteral::Named(_) => "named",
            ColorLiteral::Tuple(_) => "tuple",
            ColorLiteral::Packed(_) => "packed",
        }
    }
}

impl From<&str> for ColorLiteral {
    fn from(value: &str) -> Self {
        ColorLiteral::classify(value)
    }
}

impl From<i64> for ColorLiteral {
    fn from(value: i64) -> Self {
        ColorLiteral::Packed(value)
    }
}

impl From<Vec<Component>> for ColorLiteral {
    fn from(value: Vec<Component>) -> Self {
        ColorLiteral::Tuple(value)
    }
}

pub fn normalize(literal: &ColorLiteral) -> Result<ColorValue, SvgShapeError> {
    match literal {
        ColorLiteral::Hex(hex) => parse_hex(hex),
        ColorLiteral::Functional(text) => {
            let v = text.trim().to_ascii_lowercase();
            if v.starts_with("rgb") {
                parse_rgb(&v)
            } else if v.starts_with("hsl") {
                parse_hsl(&v)
            } else {
                Err(SvgShapeError::UnsupportedFormat(format!(
                    "unknown color function in '{}'",
                    text
                )))
            }
        }
        ColorLiteral::Named(name) => {
            // Unknown keywords fall back to opaque black instead of failing.
            let name = name.trim().to_ascii_lowercase();
            Ok(match named_colors::lookup(&name) {
                Some([r, g, b]) => ColorValue::rgba(r, g, b, 255),
                None => ColorValue::BLACK,
            })
        }
        ColorLiteral::Tuple(components) => match components.as_slice() {
            [r, g, b] => Ok(finalize([*r, *g, *b], None)),
            [r, g, b, a] => Ok(finalize([*r, *g, *b], Some(a.to_alpha()))),
            other => Err(SvgShapeError::UnsupportedFormat(format!(
                "color tuple needs 3 or 4 components (got {})",
                other.len()
            ))),
        },
        ColorLiteral::Packed(value) => Ok(ColorValue::rgba(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
            255,
        )),
    }
}

pub fn normalize_str(text: &str) -> Result<ColorValue, SvgShapeError> {
    normalize(&ColorLiteral::classify(text))
}

fn finalize(rgb: [Component; 3], alpha: Option<Alpha>) -> ColorValue {
    let [r, g, b] = rgb.map(Component::to_channel);
    ColorValue::with_alpha(r, g, b, alpha.unwrap_or(Alpha::OPAQUE))
}

fn parse_hex(input: &str) -> Result<ColorValue, SvgShapeError> {
    let hex = input.trim().trim_start_matches('#');
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SvgShapeError::InvalidSyntax(format!(
            "'{}' contains non-hex digits",
            input
        )));
    }
    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        _ => hex.to_string(),
    };
    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16);
    let invalid = |_| SvgShapeError::InvalidSyntax(format!("invalid hex color '{}'", input));
    match expanded.len() {
        6 => Ok(ColorValue::rgba(
            byte(0).map_err(invalid)?,
            byte(2).map_err(invalid)?,
            byte(4).map_err(invalid)?,
            255,
        )),
        8 => Ok(ColorValue::rgba(
            byte(0).map_err(invalid)?,
            byte(2).map_err(invalid)?,
            byte(4).map_err(invalid)?,
            byte(6).map_err(invalid)?,
        )),
        n => Err(SvgShapeError::InvalidSyntax(format!(
            "hex color '{}' has {} digits (expected 3, 4, 6 or 8)",
            input, n
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct NumToken {
    value: f64,
    percent: bool,
    decimal: bool,
}

// Unsigned `digits[.digits][%]` runs, left to right.
fn numeric_tokens(input: &str) -> Vec<NumToken> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let decimal = i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit();
        if decimal {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
        let end = i;
        let percent = i < bytes.len() && bytes[i] == b'%';
        if percent {
            i += 1;
        }
        if let Ok(value) = input[start..end].parse::<f64>() {
            out.push(NumToken {
                value,
                percent,
                decimal,
            });
        }
    }
    out
}

fn parse_rgb(input: &str) -> Result<ColorValue, SvgShapeError> {
    let tokens = numeric_tokens(input);
    if tokens.len() != 3 && tokens.len() != 4 {
        return Err(SvgShapeError::InvalidSyntax(format!(
            "'{}' needs 3 or 4 numeric components (got {})",
            input,
            tokens.len()
        )));
    }
    // Integers are 0-255 channel values; decimals ("0.5") and percentages are fractions.
    let channel = |t: NumToken| {
        if t.percent {
            Component::Fraction(t.value / 100.0)
        } else if t.decimal {
            Component::Fraction(t.value)
        } else {
            Component::Absolute(t.value)
        }
    };
    let alpha = match tokens.get(3) {
        Some(t) if t.percent => Alpha::Value(t.value / 100.0),
        Some(t) => Alpha::Value(t.value),
        None => Alpha::OPAQUE,
    };
    Ok(finalize(
        [channel(tokens[0]), channel(tokens[1]), channel(tokens[2])],
        Some(alpha),
    ))
}

fn parse_hsl(input: &str) -> Result<ColorValue, SvgShapeError> {
    let tokens = numeric_tokens(input);
    if tokens.len() != 3 && tokens.len() != 4 {
        return Err(SvgShapeError::InvalidSyntax(format!(
            "'{}' needs 3 or 4 numeric components (got {})",
            input,
            tokens.len()
        )));
    }
    let h = tokens[0].value / 360.0;
    // Saturation and lightness are read on a 0-100 scale with or without '%'.
    let s = tokens[1].value / 100.0;
    let l = tokens[2].value / 100.0;
    let (r, g, b) = hls_to_rgb(h, l, s);
    let alpha = match tokens.get(3) {
        Some(t) if t.percent => Alpha::Percent(t.value),
        Some(t) => Alpha::Value(t.value),
        None => Alpha::OPAQUE,
    };
    Ok(finalize(
        [
            Component::Fraction(r),
            Component::Fraction(g),
            Component::Fraction(b),
        ],
        Some(alpha),
    ))
}

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRD: f64 = 2.0 / 3.0;

// Note the (hue, lightness, saturation) parameter order.
fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hue_channel(m1, m2, h + ONE_THIRD),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - ONE_THIRD),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        return m1 + (m2 - m1) * hue * 6.0;
    }
    if hue < 0.5 {
        return m2;
    }
    if hue < TWO_THIRD {
        return m1 + (m2 - m1) * (TWO_THIRD - hue) * 6.0;
    }
    m1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_hex_agree() {
        let short = normalize_str("#fff").expect("short hex");
        let long = normalize_str("#ffffff").expect("long hex");
        assert_eq!(short, long);
        assert_eq!(short, ColorValue::rgba(255, 255, 255, 255));
    }

    #[test]
    fn eight_digit_hex_carries_alpha() {
        assert_eq!(
            normalize_str("#00000080").unwrap(),
            ColorValue::rgba(0, 0, 0, 128)
        );
        assert_eq!(
            normalize_str("#f008").unwrap(),
            ColorValue::rgba(255, 0, 0, 136)
        );
    }

    #[test]
    fn hex_is_case_insensitive() {
        assert_eq!(
            normalize_str("  #FF8000 ").unwrap(),
            ColorValue::rgba(255, 128, 0, 255)
        );
    }

    #[test]
    fn bad_hex_lengths_are_invalid_syntax() {
        for input in ["#", "#ff", "#fffff", "#fffffff", "#fffffffff"] {
            let err = normalize_str(input).unwrap_err();
            assert!(
                matches!(err, SvgShapeError::InvalidSyntax(_)),
                "{input}: {err}"
            );
        }
    }

    #[test]
    fn non_hex_digits_are_invalid_syntax() {
        assert!(matches!(
            normalize_str("#ggg"),
            Err(SvgShapeError::InvalidSyntax(_))
        ));
    }

    #[test]
    fn rgb_with_three_components_is_opaque() {
        assert_eq!(
            normalize_str("rgb(255,0,0)").unwrap(),
            ColorValue::rgba(255, 0, 0, 255)
        );
    }

    #[test]
    fn rgba_keeps_fractional_alpha() {
        let color = normalize_str("rgba(0,128,0,0.5)").unwrap();
        assert_eq!((color.r, color.g, color.b), (0, 128, 0));
        assert_eq!(color.a, Alpha::Value(0.5));
        assert_eq!(color.to_string(), "(0, 128, 0, 0.5)");
    }

    #[test]
    fn rgb_percentages_scale_to_bytes() {
        let color = normalize_str("rgb(100%, 50%, 0%)").unwrap();
        assert_eq!((color.r, color.g, color.b), (255, 127, 0));
        assert_eq!(color.a, Alpha::OPAQUE);
    }

    #[test]
    fn rgb_decimal_components_scale_as_fractions() {
        assert_eq!(
            normalize_str("rgb(0.5, 0.5, 0.5)").unwrap(),
            ColorValue::rgba(127, 127, 127, 255)
        );
        assert_eq!(
            normalize_str("rgb(1.0, 0.0, 0.0)").unwrap(),
            ColorValue::rgba(255, 0, 0, 255)
        );
        assert_eq!(
            normalize_str("rgb(255, 0.5, 0)").unwrap(),
            ColorValue::rgba(255, 127, 0, 255)
        );
    }

    #[test]
    fn rgb_with_wrong_token_count_is_invalid_syntax() {
        assert!(matches!(
            normalize_str("rgb(1,2)"),
            Err(SvgShapeError::InvalidSyntax(_))
        ));
        assert!(matches!(
            normalize_str("rgb(1,2,3,4,5)"),
            Err(SvgShapeError::InvalidSyntax(_))
        ));
    }

    #[test]
    fn hsl_primary_hues() {
        assert_eq!(
            normalize_str("hsl(0, 100%, 50%)").unwrap(),
            ColorValue::rgba(255, 0, 0, 255)
        );
        assert_eq!(
            normalize_str("hsl(240, 100%, 50%)").unwrap(),
            ColorValue::rgba(0, 0, 255, 255)
        );
    }

    #[test]
    fn hsl_without_saturation_is_gray() {
        assert_eq!(
            normalize_str("hsl(90, 0%, 50%)").unwrap(),
            ColorValue::rgba(127, 127, 127, 255)
        );
    }

    #[test]
    fn hsla_alpha_keeps_its_notation() {
        let pct = normalize_str("hsla(120, 100%, 50%, 50%)").unwrap();
        assert_eq!((pct.r, pct.g, pct.b), (0, 255, 0));
        assert_eq!(pct.a, Alpha::Percent(50.0));
        assert_eq!(pct.to_string(), "(0, 255, 0, 50%)");

        let frac = normalize_str("hsla(120, 100%, 50%, 0.25)").unwrap();
        assert_eq!(frac.a, Alpha::Value(0.25));
    }

    #[test]
    fn hsl_with_wrong_token_count_is_invalid_syntax() {
        assert!(matches!(
            normalize_str("hsl(10)"),
            Err(SvgShapeError::InvalidSyntax(_))
        ));
    }

    #[test]
    fn named_colors_resolve() {
        assert_eq!(
            normalize_str("Orange").unwrap(),
            ColorValue::rgba(255, 165, 0, 255)
        );
    }

    #[test]
    fn unknown_names_fall_back_to_opaque_black() {
        assert_eq!(normalize_str("notacolor").unwrap(), ColorValue::BLACK);
        assert_eq!(normalize_str("").unwrap(), ColorValue::rgba(0, 0, 0, 255));
    }

    #[test]
    fn packed_integer_is_rrggbb() {
        assert_eq!(
            normalize(&ColorLiteral::Packed(16711680)).unwrap(),
            ColorValue::rgba(255, 0, 0, 255)
        );
        assert_eq!(
            normalize(&0x123456i64.into()).unwrap(),
            ColorValue::rgba(0x12, 0x34, 0x56, 255)
        );
    }

    #[test]
    fn tuples_scale_fractions_and_pass_alpha_through() {
        let rgb = ColorLiteral::Tuple(vec![
            Component::Fraction(1.0),
            Component::Fraction(0.5),
            Component::Absolute(10.0),
        ]);
        assert_eq!(normalize(&rgb).unwrap(), ColorValue::rgba(255, 127, 10, 255));

        let rgba = ColorLiteral::Tuple(vec![
            Component::Fraction(0.0),
            Component::Fraction(0.0),
            Component::Fraction(0.0),
            Component::Fraction(0.3),
        ]);
        assert_eq!(normalize(&rgba).unwrap().a, Alpha::Value(0.3));
    }

    #[test]
    fn tuple_with_wrong_length_is_unsupported() {
        let two = ColorLiteral::Tuple(vec![Component::Absolute(1.0), Component::Absolute(2.0)]);
        assert!(matches!(
            normalize(&two),
            Err(SvgShapeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn unknown_function_is_unsupported() {
        let lit = ColorLiteral::Functional("lab(50% 40 59)".to_string());
        assert!(matches!(
            normalize(&lit),
            Err(SvgShapeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn classify_tags_by_prefix() {
        assert_eq!(ColorLiteral::classify("#abc").kind(), "hex");
        assert_eq!(ColorLiteral::classify(" RGBA(1,2,3,4)").kind(), "functional");
        assert_eq!(ColorLiteral::classify("hsl(1,2,3)").kind(), "functional");
        assert_eq!(ColorLiteral::classify("tomato").kind(), "named");
    }

    #[test]
    fn numeric_tokens_follow_digit_runs() {
        let tokens = numeric_tokens("rgb(.5, 1.25%, 7)");
        let values: Vec<(f64, bool)> = tokens.iter().map(|t| (t.value, t.percent)).collect();
        assert_eq!(values, vec![(5.0, false), (1.25, true), (7.0, false)]);
        let decimals: Vec<bool> = tokens.iter().map(|t| t.decimal).collect();
        assert_eq!(decimals, vec![false, true, false]);
    }
}
