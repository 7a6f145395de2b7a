//! Deterministic color derivation for free-text tags
//!
//! Markers (and any other string-tagged entity) that share a tag must render
//! with the same color without a separate type registry, so the color is a
//! pure function of the tag string.

/// Simple RGB triple decoded from a hex color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Derive a stable HSL css color from an arbitrary tag string.
///
/// Hash: `hash = code + ((hash << 5) - hash)` over UTF-16 code units, with the
/// shift wrapping at 32 bits, then hue = hash mod 360 at fixed 70% saturation
/// and 50% lightness. Two calls with the same string always agree.
pub fn tag_color(tag: &str) -> String {
    let hue = tag_hue(tag);
    format!("hsl({}, 70%, 50%)", hue)
}

fn tag_hue(tag: &str) -> i64 {
    let mut hash: i64 = 0;
    for code in tag.encode_utf16() {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        hash = code as i64 + shifted - hash;
    }
    hash % 360
}

/// Decode a `#rrggbb` string; malformed input falls back to the panel default.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let fallback = Rgb {
        r: 30,
        g: 41,
        b: 59,
    };
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return fallback;
    }
    let component = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).unwrap_or_default()
    };
    Rgb {
        r: component(0..2),
        g: component(2..4),
        b: component(4..6),
    }
}
