//! CSS color grammar.
//!
//! Accepts the color syntaxes a stop editor is expected to take:
//!
//! - hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - `rgb()` / `rgba()`: comma or space separated, numbers or percentages,
//!   optional alpha (`, a` or `/ a`)
//! - `hsl()` / `hsla()`: hue in `deg`/`rad`/`grad`/`turn` or bare degrees
//! - the CSS named colors and `transparent`
//!
//! Everything is case-insensitive. Channel values outside their range are
//! clamped, matching how CSS computes them.

pub mod error;
pub mod lexer;
pub mod named;
pub mod parser;
pub mod rgba;

pub use error::ColorError;
pub use parser::parse_color;
pub use rgba::Rgba;

use rand::Rng;

/// `true` when `input` parses as a CSS color.
pub fn is_valid_color(input: &str) -> bool {
    parse_color(input).is_ok()
}

/// A random opaque color as `#rrggbb`.
pub fn random_hex(rng: &mut impl Rng) -> String {
    let [_, r, g, b] = rng.random_range(0..=0x00ff_ffff_u32).to_be_bytes();
    Rgba::opaque(r, g, b).to_hex()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn ok(src: &str) -> Rgba { parse_color(src).unwrap() }
    fn err(src: &str) { parse_color(src).unwrap_err(); }

    // ── hex ───────────────────────────────────────────────────────────────

    #[test] fn hex_3() { assert_eq!(ok("#f0a"), Rgba::opaque(0xff, 0x00, 0xaa)); }
    #[test] fn hex_4() { assert_eq!(ok("#f0a8"), Rgba::new(0xff, 0x00, 0xaa, 0x88)); }
    #[test] fn hex_6() { assert_eq!(ok("#FF0080"), Rgba::opaque(0xff, 0x00, 0x80)); }
    #[test] fn hex_8() { assert_eq!(ok("#7928ca80"), Rgba::new(0x79, 0x28, 0xca, 0x80)); }
    #[test] fn hex_bad_length() { err("#12345"); }
    #[test] fn hex_bad_digit() { err("#xyz"); }
    #[test] fn hex_empty() { err("#"); }

    // ── rgb ───────────────────────────────────────────────────────────────

    #[test] fn rgb_commas() { assert_eq!(ok("rgb(255, 0, 128)"), Rgba::opaque(255, 0, 128)); }
    #[test] fn rgba_commas() { assert_eq!(ok("rgba(0, 0, 0, 0.5)"), Rgba::new(0, 0, 0, 128)); }
    #[test] fn rgb_spaces_slash_alpha() { assert_eq!(ok("rgb(10 20 30 / 25%)"), Rgba::new(10, 20, 30, 64)); }
    #[test] fn rgb_percentages() { assert_eq!(ok("rgb(100%, 50%, 0%)"), Rgba::opaque(255, 128, 0)); }
    #[test] fn rgb_clamps() { assert_eq!(ok("rgb(300, -5, 12.4)"), Rgba::opaque(255, 0, 12)); }
    #[test] fn rgb_uppercase_function() { assert_eq!(ok("RGB(1,2,3)"), Rgba::opaque(1, 2, 3)); }
    #[test] fn rgb_alpha_in_rgb_name() { assert_eq!(ok("rgb(1, 2, 3, 1)"), Rgba::opaque(1, 2, 3)); }
    #[test] fn rgb_mixed_legacy_units() { err("rgb(255, 50%, 0)"); }
    #[test] fn rgb_missing_channel() { err("rgb(1, 2)"); }
    #[test] fn rgb_trailing_comma() { err("rgb(1, 2, 3,)"); }
    #[test] fn rgb_unclosed() { err("rgb(1, 2, 3"); }
    #[test] fn rgb_degrees_rejected() { err("rgb(10deg, 0, 0)"); }
    #[test] fn rgb_mixed_separators() { err("rgb(1 2, 3)"); }
    #[test] fn rgb_trailing_garbage() { err("rgb(1, 2, 3) red"); }
    #[test] fn rgb_space_before_paren() { err("rgb (1,2,3)"); err("hsl (0, 100%, 50%)"); }
    #[test] fn rgb_exponent() { assert_eq!(ok("rgb(1e2, 0, 2.55E2)"), Rgba::opaque(100, 0, 255)); }

    // ── hsl ───────────────────────────────────────────────────────────────

    #[test] fn hsl_red() { assert_eq!(ok("hsl(0, 100%, 50%)"), Rgba::opaque(255, 0, 0)); }
    #[test] fn hsl_green_deg() { assert_eq!(ok("hsl(120deg 100% 25%)"), Rgba::opaque(0, 128, 0)); }
    #[test] fn hsl_turn() { assert_eq!(ok("hsl(0.5turn, 100%, 50%)"), Rgba::opaque(0, 255, 255)); }
    #[test] fn hsl_negative_hue_wraps() { assert_eq!(ok("hsl(-120, 100%, 50%)"), Rgba::opaque(0, 0, 255)); }
    #[test] fn hsla_alpha() { assert_eq!(ok("hsla(0, 0%, 100%, 0)"), Rgba::new(255, 255, 255, 0)); }
    #[test] fn hsl_gray() { assert_eq!(ok("hsl(200, 0%, 50%)"), Rgba::opaque(128, 128, 128)); }
    #[test] fn hsl_legacy_needs_percent() { err("hsl(0, 100, 50)"); }

    // ── named ─────────────────────────────────────────────────────────────

    #[test] fn named_basic() { assert_eq!(ok("rebeccapurple"), Rgba::opaque(0x66, 0x33, 0x99)); }
    #[test] fn named_case_insensitive() { assert_eq!(ok("  DodgerBlue "), Rgba::opaque(0x1e, 0x90, 0xff)); }
    #[test] fn named_transparent() { assert_eq!(ok("transparent"), Rgba::TRANSPARENT); }
    #[test] fn named_unknown() { err("blurple"); }
    #[test] fn empty_input() { err(""); err("   "); }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn error_reports_column() {
        let e = parse_color("rgb(1, 2, x)").unwrap_err();
        assert_eq!(e.col, 11);
    }

    #[test]
    fn validity_helper() {
        assert!(is_valid_color("#7928CA"));
        assert!(!is_valid_color("#7928CG"));
    }

    #[test]
    fn random_hex_is_valid() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let c = random_hex(&mut rng);
            assert_eq!(c.len(), 7);
            assert!(is_valid_color(&c), "{c}");
        }
    }
}
