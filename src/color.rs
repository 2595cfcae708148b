//! CSS color string parsing and normalization.
//!
//! Themes and callers supply colors as CSS strings (`#rrggbb`, `rgb(..)`,
//! `rgba(..)`); the paint stage needs raw channel values. Parsed colors are
//! normalized to lowercase `#rrggbb` when serialized back out.

/// An 8-bit RGBA color.
pub type Rgba8 = (u8, u8, u8, u8);

/// True when `s` is a `#`-prefixed hex color of length 3, 6 or 8 digits.
pub fn is_valid_hex(s: &str) -> bool {
    let Some(body) = s.strip_prefix('#') else {
        return false;
    };
    matches!(body.len(), 3 | 6 | 8) && body.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse a CSS color string. Supports `#rgb`, `#rrggbb`, `#rrggbbaa`,
/// `rgb(r, g, b)` and `rgba(r, g, b, a)`. Returns `None` on anything else.
pub fn parse(s: &str) -> Option<Rgba8> {
    let s = s.trim();
    if let Some(body) = s.strip_prefix('#') {
        return parse_hex_body(body);
    }
    if let Some(inner) = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() < 3 || parts.len() > 4 {
            return None;
        }
        let r = parts[0].parse::<u8>().ok()?;
        let g = parts[1].parse::<u8>().ok()?;
        let b = parts[2].parse::<u8>().ok()?;
        let a = if parts.len() == 4 {
            let alpha = parts[3].parse::<f32>().ok()?;
            (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            255
        };
        return Some((r, g, b, a));
    }
    None
}

fn parse_hex_body(body: &str) -> Option<Rgba8> {
    let expand = |c: char| {
        let d = c.to_digit(16)? as u8;
        Some(d << 4 | d)
    };
    match body.len() {
        3 => {
            let mut it = body.chars();
            Some((
                expand(it.next()?)?,
                expand(it.next()?)?,
                expand(it.next()?)?,
                255,
            ))
        }
        6 | 8 => {
            let byte = |i: usize| u8::from_str_radix(body.get(i..i + 2)?, 16).ok();
            let r = byte(0)?;
            let g = byte(2)?;
            let b = byte(4)?;
            let a = if body.len() == 8 { byte(6)? } else { 255 };
            Some((r, g, b, a))
        }
        _ => None,
    }
}

/// Canonical lowercase `#rrggbb` form of a color (alpha dropped).
pub fn to_hex((r, g, b, _): Rgba8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Convert a hex color plus an alpha scalar into an `rgba(..)` string.
/// Returns the empty string when the hex color is not valid, so callers can
/// pass user input straight through.
pub fn hex_alpha_to_rgba(hex: &str, alpha: f32) -> String {
    if !is_valid_hex(hex) {
        return String::new();
    }
    match parse(hex) {
        Some((r, g, b, _)) => format!("rgba({r}, {g}, {b}, {})", alpha.clamp(0.0, 1.0)),
        None => String::new(),
    }
}

/// Linear mix of two colors; `t == 0.0` yields `a`, `t == 1.0` yields `b`.
pub fn mix(a: Rgba8, b: Rgba8, t: f32) -> Rgba8 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    (
        lerp(a.0, b.0),
        lerp(a.1, b.1),
        lerp(a.2, b.2),
        lerp(a.3, b.3),
    )
}
