//! Geometry strings and the autofit ratio.
//!
//! The engine's `autofit` option is a `<W>[%]x<H>[%]` box. Given the screen
//! size it resolves to pixel dimensions, and together with the video's native
//! size it yields the scale factor applied to the window when a new file
//! starts playing.

/// Pixel dimensions. Values may be zero (unspecified) or negative (garbage in
/// the geometry string is passed through as-is).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: i64,
    pub height: i64,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
}

/// Parses a geometry string against the screen size.
///
/// # Parsing Rules
///
/// - The string is split on `x` into at most two tokens; anything past the
///   second `x` stays part of the height token.
/// - Each token contributes its leading integer (sign, `0x` hex and leading-zero
///   octal prefixes are honoured, trailing junk is ignored, no digits means 0).
/// - A token ending in `%` is a percentage of the matching screen dimension.
/// - If the width is nonzero and the height is zero, the height becomes the
///   full screen height. Autofit always preserves aspect ratio, so this
///   leaves the width as the only constraint.
///
/// Malformed input never fails; it degrades to zero values.
///
/// # Parameters
///
/// * `geometry` - `W[xH]` with optional `%` suffixes, e.g. `50%x50%`
/// * `screen` - Size percentages are taken of
///
/// # Example
///
/// ```
/// use mpv_mirror::options::{parse_geometry, Dimensions};
///
/// let screen = Dimensions::new(1920, 1080);
/// assert_eq!(parse_geometry("640x480", screen), Dimensions::new(640, 480));
/// assert_eq!(parse_geometry("50%x50%", screen), Dimensions::new(960, 540));
/// assert_eq!(parse_geometry("800x", screen), Dimensions::new(800, 1080));
/// ```
#[must_use]
pub fn parse_geometry(geometry: &str, screen: Dimensions) -> Dimensions {
    let mut tokens = geometry.splitn(2, 'x');
    let width = tokens
        .next()
        .map_or(0, |token| resolve_token(token, screen.width));
    let mut height = tokens
        .next()
        .map_or(0, |token| resolve_token(token, screen.height));

    if width != 0 && height == 0 {
        height = screen.height;
    }

    Dimensions { width, height }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn resolve_token(token: &str, screen_extent: i64) -> i64 {
    let value = parse_leading_integer(token);

    if token.ends_with('%') {
        let multiplier = value as f64 / 100.0;
        (multiplier * screen_extent as f64) as i64
    } else {
        value
    }
}

/// Parses the leading integer of `text` the way C's `strtoll(text, NULL, 0)`
/// does, saturating on overflow.
fn parse_leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = if let Some(hex) = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .filter(|h| h.starts_with(|c: char| c.is_ascii_hexdigit()))
    {
        (16, hex)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    };

    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Computes the window scale factor for a video of `native` size inside the
/// `bounds` box.
///
/// Returns `Some(1.0)` when the video fits on both axes (never scale up) and
/// the smaller of the two axis ratios otherwise, which keeps the aspect ratio
/// while shrinking the video into the box.
///
/// Returns `None` when the ratio is undefined: a missing (non-positive) native
/// dimension or a non-positive box. Callers keep their previous ratio.
///
/// # Parameters
///
/// * `bounds` - Box from [`parse_geometry`]
/// * `native` - Video size reported by the engine
///
/// # Example
///
/// ```
/// use mpv_mirror::options::{autofit_ratio, Dimensions};
///
/// let hd = Dimensions::new(1920, 1080);
/// let uhd = Dimensions::new(3840, 2160);
/// assert_eq!(autofit_ratio(uhd, hd), Some(1.0));
/// assert_eq!(autofit_ratio(hd, uhd), Some(0.5));
/// assert_eq!(autofit_ratio(hd, Dimensions::new(0, 1080)), None);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn autofit_ratio(bounds: Dimensions, native: Dimensions) -> Option<f64> {
    if native.width <= 0 || native.height <= 0 {
        return None;
    }

    let width_ratio = bounds.width as f64 / native.width as f64;
    let height_ratio = bounds.height as f64 / native.height as f64;

    if width_ratio <= 0.0 || height_ratio <= 0.0 {
        return None;
    }

    if width_ratio > 1.0 && height_ratio > 1.0 {
        Some(1.0)
    } else {
        Some(width_ratio.min(height_ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Dimensions = Dimensions::new(1920, 1080);

    #[test]
    fn absolute_dimensions_ignore_screen() {
        assert_eq!(parse_geometry("640x480", SCREEN), Dimensions::new(640, 480));
        assert_eq!(
            parse_geometry("640x480", Dimensions::new(800, 600)),
            Dimensions::new(640, 480)
        );
    }

    #[test]
    fn percentages_scale_against_screen() {
        assert_eq!(parse_geometry("50%x50%", SCREEN), Dimensions::new(960, 540));
        assert_eq!(parse_geometry("25%x480", SCREEN), Dimensions::new(480, 480));
    }

    #[test]
    fn missing_height_defaults_to_screen_height() {
        assert_eq!(parse_geometry("800x", SCREEN), Dimensions::new(800, 1080));
        assert_eq!(parse_geometry("800", SCREEN), Dimensions::new(800, 1080));
        assert_eq!(parse_geometry("50%", SCREEN), Dimensions::new(960, 1080));
    }

    #[test]
    fn malformed_input_degrades_to_zero() {
        assert_eq!(parse_geometry("", SCREEN), Dimensions::new(0, 0));
        assert_eq!(parse_geometry("abc", SCREEN), Dimensions::new(0, 0));
        assert_eq!(parse_geometry("x480", SCREEN), Dimensions::new(0, 480));
    }

    #[test]
    fn only_two_tokens_are_considered() {
        // "480x200" is a single height token; its leading integer wins
        assert_eq!(parse_geometry("640x480x200", SCREEN), Dimensions::new(640, 480));
    }

    #[test]
    fn leading_integer_follows_c_prefixes() {
        assert_eq!(parse_leading_integer("0x10"), 16);
        assert_eq!(parse_leading_integer("010"), 8);
        assert_eq!(parse_leading_integer("0"), 0);
        assert_eq!(parse_leading_integer("-12px"), -12);
        assert_eq!(parse_leading_integer("  7"), 7);
        assert_eq!(parse_leading_integer("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn autofit_never_scales_up() {
        let hd = Dimensions::new(1920, 1080);
        assert_eq!(autofit_ratio(Dimensions::new(3840, 2160), hd), Some(1.0));
    }

    #[test]
    fn autofit_shrinks_to_tighter_axis() {
        assert_eq!(
            autofit_ratio(Dimensions::new(1920, 1080), Dimensions::new(3840, 2160)),
            Some(0.5)
        );
        assert_eq!(
            autofit_ratio(Dimensions::new(1920, 2160), Dimensions::new(1920, 1080)),
            Some(1.0)
        );
        assert_eq!(
            autofit_ratio(Dimensions::new(960, 2160), Dimensions::new(1920, 1080)),
            Some(0.5)
        );
    }

    #[test]
    fn autofit_undefined_without_video_dimensions() {
        assert_eq!(autofit_ratio(SCREEN, Dimensions::new(0, 0)), None);
        assert_eq!(autofit_ratio(Dimensions::new(0, 0), SCREEN), None);
    }
}
