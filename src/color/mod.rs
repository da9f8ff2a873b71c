use crate::types::Rgb;

/// Resolves a configured color string into an RGB triple.
///
/// Accepts `#rgb` shorthand, `#rrggbb`, and `hsl(h s% l%)`-style strings
/// (comma separators work too). Anything unrecognized falls back to opaque
/// white: this path is purely decorative and never fails loudly.
pub fn resolve(input: &str) -> Rgb {
    let input = input.trim();
    if let Some(hex) = input.strip_prefix('#') {
        if let Some(rgb) = parse_hex(hex) {
            return rgb;
        }
    }
    let is_hsl = input
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("hsl("));
    if is_hsl {
        if let Some(rgb) = parse_hsl(input) {
            return rgb;
        }
    }
    Rgb::WHITE
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    let expanded;
    let hex = match hex.len() {
        // Shorthand: each digit duplicated, "09c" -> "0099cc"
        3 => {
            expanded = hex.chars().flat_map(|c| [c, c]).collect::<String>();
            expanded.as_str()
        }
        6 => hex,
        _ => return None,
    };
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

fn parse_hsl(input: &str) -> Option<Rgb> {
    let mut values = [0.0_f32; 3];
    let mut found = 0;
    for token in input.split(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-')) {
        if token.is_empty() {
            continue;
        }
        if found == 3 {
            break;
        }
        values[found] = token.parse().ok()?;
        found += 1;
    }
    if found < 3 {
        return None;
    }
    let [h, s, l] = values;
    Some(hsl_to_rgb(h, s / 100.0, l / 100.0))
}

/// Standard HSL→RGB conversion over six 60°-wide hue sectors.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Rgb::new(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}
