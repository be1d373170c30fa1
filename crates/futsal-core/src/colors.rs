//! Team colour palettes for charts.
//!
//! Colours come from the configured `team_colors` table (looked up by FIFA
//! abbreviation, then by upper-cased team name). Teams missing from the
//! table get a deterministic colour derived from their name. When the home
//! and away colours are too close, the away side switches to its home kit
//! and, if still too close, is darkened.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// ΔE76 below which two colours count as clashing
const SIMILARITY_DELTA: f64 = 20.0;

/// Darkening applied to a clashing away colour and to fallback away kits
const DARKEN_FACTOR: f64 = -0.25;

/// Luminance from which a colour needs a dark outline to stay visible
const LIGHT_LUMINANCE: f64 = 0.90;

/// Kit colours of one team, as `#RRGGBB`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamColors {
    pub home: String,
    pub away: String,
}

/// Colours used for the two sides of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchPalette {
    pub home_color: String,
    pub away_color: String,
}

fn hex_to_rgb(hex: &str) -> Option<(f64, f64, f64)> {
    let h = hex.trim().trim_start_matches('#');
    if h.len() < 6 || !h.is_char_boundary(6) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok().map(|v| v as f64 / 255.0);
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0) as u8;
    format!("#{:02X}{:02X}{:02X}", c(r), c(g), c(b))
}

/// sRGB -> CIE Lab (D65)
fn rgb_to_lab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let lin = |u: f64| if u <= 0.04045 { u / 12.92 } else { ((u + 0.055) / 1.055).powf(2.4) };
    let (r, g, b) = (lin(r), lin(g), lin(b));
    let x = r * 0.4124 + g * 0.3576 + b * 0.1805;
    let y = r * 0.2126 + g * 0.7152 + b * 0.0722;
    let z = r * 0.0193 + g * 0.1192 + b * 0.9505;

    let f = |t: f64| if t > 0.008856 { t.cbrt() } else { 7.787 * t + 16.0 / 116.0 };
    let (fx, fy, fz) = (f(x / 0.95047), f(y / 1.0), f(z / 1.08883));
    (116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

fn delta_e76(c1: &str, c2: &str) -> Option<f64> {
    let (r1, g1, b1) = hex_to_rgb(c1)?;
    let (r2, g2, b2) = hex_to_rgb(c2)?;
    let (l1, a1, bb1) = rgb_to_lab(r1, g1, b1);
    let (l2, a2, bb2) = rgb_to_lab(r2, g2, b2);
    Some(((l1 - l2).powi(2) + (a1 - a2).powi(2) + (bb1 - bb2).powi(2)).sqrt())
}

/// Whether two colours are perceptually close
pub fn similar(c1: &str, c2: &str) -> bool {
    match delta_e76(c1, c2) {
        Some(d) => d < SIMILARITY_DELTA,
        None => c1.eq_ignore_ascii_case(c2),
    }
}

/// Positive factor lightens towards white, negative darkens towards black
pub fn lighten_or_darken(hex: &str, factor: f64) -> String {
    let Some((r, g, b)) = hex_to_rgb(hex) else {
        return hex.to_string();
    };
    let adjust = |v: f64| {
        if factor >= 0.0 {
            v + (1.0 - v) * factor
        } else {
            v * (1.0 + factor)
        }
    };
    rgb_to_hex(adjust(r), adjust(g), adjust(b))
}

/// Very light colours get an outline in charts
pub fn is_light_color(hex: &str) -> bool {
    hex_to_rgb(hex)
        .map(|(r, g, b)| 0.2126 * r + 0.7152 * g + 0.0722 * b >= LIGHT_LUMINANCE)
        .unwrap_or(false)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// FNV-1a, stable across runs and platforms
fn stable_hash(s: &str) -> u64 {
    s.bytes().fold(0xcbf29ce484222325, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x100000001b3)
    })
}

/// Deterministic kit for a team missing from the table
fn fallback_colors(name: &str) -> TeamColors {
    let hue = (stable_hash(name) % 360) as f64 / 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 0.65, 0.95);
    let base = rgb_to_hex(r, g, b);
    TeamColors {
        away: lighten_or_darken(&base, DARKEN_FACTOR),
        home: base,
    }
}

fn lookup<'a>(table: &'a HashMap<String, TeamColors>, name: &str, abbr: Option<&str>) -> Option<&'a TeamColors> {
    let find = move |key: &str| {
        let key = key.trim().to_uppercase();
        table
            .iter()
            .find(|(k, _)| k.trim().to_uppercase() == key)
            .map(|(_, v)| v)
    };
    abbr.filter(|a| !a.trim().is_empty())
        .and_then(find)
        .or_else(|| Some(name).filter(|n| !n.trim().is_empty()).and_then(find))
}

/// Choose home and away colours for a match
pub fn pick_match_colors(
    table: &HashMap<String, TeamColors>,
    home_name: &str,
    away_name: &str,
    home_abbr: Option<&str>,
    away_abbr: Option<&str>,
) -> MatchPalette {
    let home = lookup(table, home_name, home_abbr)
        .cloned()
        .unwrap_or_else(|| fallback_colors(home_name));
    let away = lookup(table, away_name, away_abbr)
        .cloned()
        .unwrap_or_else(|| fallback_colors(away_name));

    let home_color = home.home;
    let mut away_color = away.away;

    if similar(&home_color, &away_color) {
        away_color = away.home;
    }
    if similar(&home_color, &away_color) {
        away_color = lighten_or_darken(&away_color, DARKEN_FACTOR);
    }

    MatchPalette { home_color, away_color }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kit(home: &str, away: &str) -> TeamColors {
        TeamColors { home: home.into(), away: away.into() }
    }

    #[test]
    fn test_lighten_or_darken() {
        assert_eq!(lighten_or_darken("#FFFFFF", -0.5), "#7F7F7F");
        assert_eq!(lighten_or_darken("#000000", 0.5), "#7F7F7F");
        assert_eq!(lighten_or_darken("not-a-colour", 0.5), "not-a-colour");
    }

    #[test]
    fn test_similar() {
        assert!(similar("#FF0000", "#FE0101"));
        assert!(!similar("#FF0000", "#0000FF"));
        assert!(similar("bad", "BAD"));
    }

    #[test]
    fn test_is_light_color() {
        assert!(is_light_color("#FFFFFF"));
        assert!(!is_light_color("#1B1F3B"));
        assert!(!is_light_color("garbage"));
    }

    #[test]
    fn test_table_lookup_by_abbreviation_then_name() {
        let table = HashMap::from([
            ("ARG".to_string(), kit("#75AADB", "#1B1F3B")),
            ("brazil".to_string(), kit("#FFDF00", "#0033A0")),
        ]);
        let palette = pick_match_colors(&table, "Argentina", "Brazil", Some("arg"), None);
        assert_eq!(palette.home_color, "#75AADB");
        assert_eq!(palette.away_color, "#0033A0");
    }

    #[test]
    fn test_clash_switches_to_away_home_kit() {
        let table = HashMap::from([
            ("AAA".to_string(), kit("#FF0000", "#FFFFFF")),
            ("BBB".to_string(), kit("#00AA00", "#FE0000")),
        ]);
        let palette = pick_match_colors(&table, "A", "B", Some("AAA"), Some("BBB"));
        assert_eq!(palette.away_color, "#00AA00");
    }

    #[test]
    fn test_double_clash_darkens() {
        let table = HashMap::from([
            ("AAA".to_string(), kit("#FF0000", "#FFFFFF")),
            ("BBB".to_string(), kit("#FE0000", "#FF0101")),
        ]);
        let palette = pick_match_colors(&table, "A", "B", Some("AAA"), Some("BBB"));
        assert_eq!(palette.away_color, lighten_or_darken("#FE0000", -0.25));
        assert!(!similar(&palette.home_color, &palette.away_color));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let table = HashMap::new();
        let a = pick_match_colors(&table, "Morocco", "Panama", None, None);
        let b = pick_match_colors(&table, "Morocco", "Panama", None, None);
        assert_eq!(a, b);
        assert!(a.home_color.starts_with('#'));
        assert_eq!(a.home_color.len(), 7);
    }
}
