use super::error::ColorError;
use super::lexer::{Lexer, Token, TokenWithPos, Unit};
use super::named;
use super::rgba::{Rgba, unit_to_u8};

/// How the arguments of a color function are separated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Syntax {
    /// `rgb(1, 2, 3, 0.5)`
    Legacy,
    /// `rgb(1 2 3 / 0.5)`
    Modern,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Func {
    Rgb,
    Hsl,
}

/// Function arguments: three channels, optional alpha.
struct Args {
    channels: [(f64, Unit, usize); 3],
    alpha: Option<(f64, Unit, usize)>,
    syntax: Syntax,
}

// ── Parser ────────────────────────────────────────────────────────────────

struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_col(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.col)
            .unwrap_or(1)
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos).map(|t| t.token.clone()).unwrap_or(Token::Eof);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> ColorError {
        ColorError::new(msg, self.current_col())
    }

    /// Like [`err`](Self::err), but for the token just consumed.
    fn err_prev(&self, msg: impl Into<String>) -> ColorError {
        let col = self.tokens.get(self.pos.saturating_sub(1)).map(|t| t.col).unwrap_or(1);
        ColorError::new(msg, col)
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ColorError> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected {expected:?}, got {:?}", self.peek())))
        }
    }

    fn number(&mut self) -> Result<(f64, Unit, usize), ColorError> {
        let col = self.current_col();
        match self.advance() {
            Token::Number(v, unit) => Ok((v, unit, col)),
            tok => Err(self.err_prev(format!("expected a number, got {tok:?}"))),
        }
    }

    // ── Color ─────────────────────────────────────────────────────────────

    fn parse_color(&mut self) -> Result<Rgba, ColorError> {
        let color = match self.advance() {
            Token::Hash(digits) => self.hex(&digits)?,
            Token::Function(name) => {
                let func = match name.as_str() {
                    "rgb" | "rgba" => Func::Rgb,
                    "hsl" | "hsla" => Func::Hsl,
                    other => return Err(self.err_prev(format!("unsupported color function {other:?}"))),
                };
                let args = self.args()?;
                match func {
                    Func::Rgb => rgb(&args)?,
                    Func::Hsl => hsl(&args)?,
                }
            }
            Token::Ident(name) => named::lookup(&name)
                .ok_or_else(|| self.err_prev(format!("unknown color name {name:?}")))?,
            Token::Eof => return Err(self.err("empty color")),
            tok => return Err(self.err_prev(format!("expected a color, got {tok:?}"))),
        };

        match self.peek() {
            Token::Eof => Ok(color),
            tok => Err(self.err(format!("unexpected {tok:?} after color"))),
        }
    }

    fn hex(&self, digits: &str) -> Result<Rgba, ColorError> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(self.err_prev(format!("invalid hex digits in #{digits}")));
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).unwrap_or(0);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
        Ok(match digits.len() {
            3 => Rgba::opaque(nibble(0) * 17, nibble(1) * 17, nibble(2) * 17),
            4 => Rgba::new(nibble(0) * 17, nibble(1) * 17, nibble(2) * 17, nibble(3) * 17),
            6 => Rgba::opaque(byte(0), byte(2), byte(4)),
            8 => Rgba::new(byte(0), byte(2), byte(4), byte(6)),
            n => {
                return Err(self.err_prev(format!(
                    "hex color must have 3, 4, 6 or 8 digits, got {n}"
                )));
            }
        })
    }

    // ── Arguments ─────────────────────────────────────────────────────────

    /// Parses everything after `(` up to and including `)`.
    fn args(&mut self) -> Result<Args, ColorError> {
        let first = self.number()?;
        let syntax = if self.peek() == &Token::Comma { Syntax::Legacy } else { Syntax::Modern };

        let mut channels = [first; 3];
        for slot in channels.iter_mut().skip(1) {
            if syntax == Syntax::Legacy {
                self.expect(&Token::Comma)?;
            }
            *slot = self.number()?;
        }

        let alpha = match (syntax, self.peek()) {
            (Syntax::Legacy, Token::Comma) | (Syntax::Modern, Token::Slash) => {
                self.advance();
                Some(self.number()?)
            }
            _ => None,
        };

        self.expect(&Token::RParen)?;
        Ok(Args { channels, alpha, syntax })
    }
}

// ── Function evaluation ───────────────────────────────────────────────────

fn alpha_of(args: &Args) -> Result<f64, ColorError> {
    match args.alpha {
        None => Ok(1.0),
        Some((v, Unit::None, _)) => Ok(v),
        Some((v, Unit::Percent, _)) => Ok(v / 100.0),
        Some((_, _, col)) => Err(ColorError::new("alpha must be a number or percentage", col)),
    }
}

fn rgb(args: &Args) -> Result<Rgba, ColorError> {
    let mut unit_values = [0.0; 3];
    for (out, &(v, unit, col)) in unit_values.iter_mut().zip(&args.channels) {
        *out = match unit {
            Unit::None => v / 255.0,
            Unit::Percent => v / 100.0,
            _ => return Err(ColorError::new("rgb channels must be numbers or percentages", col)),
        };
    }

    if args.syntax == Syntax::Legacy {
        let first = args.channels[0].1;
        if let Some(&(_, _, col)) = args.channels.iter().find(|c| c.1 != first) {
            return Err(ColorError::new("comma-separated rgb() cannot mix numbers and percentages", col));
        }
    }

    let [r, g, b] = unit_values;
    Ok(Rgba::from_unit(r, g, b, alpha_of(args)?))
}

fn hsl(args: &Args) -> Result<Rgba, ColorError> {
    let (h, h_unit, h_col) = args.channels[0];
    let hue = match h_unit {
        Unit::None | Unit::Deg => h,
        Unit::Rad => h.to_degrees(),
        Unit::Grad => h * 0.9,
        Unit::Turn => h * 360.0,
        Unit::Percent => return Err(ColorError::new("hue cannot be a percentage", h_col)),
    };

    let mut sl = [0.0; 2];
    for (out, &(v, unit, col)) in sl.iter_mut().zip(&args.channels[1..]) {
        *out = match (unit, args.syntax) {
            (Unit::Percent, _) | (Unit::None, Syntax::Modern) => (v / 100.0).clamp(0.0, 1.0),
            _ => return Err(ColorError::new("saturation and lightness must be percentages", col)),
        };
    }

    let [s, l] = sl;
    let (r, g, b) = hsl_to_rgb(hue, s, l);
    Ok(Rgba::from_unit(r, g, b, alpha_of(args)?))
}

/// CSS Color 4 `hslToRgb`. `hue` in degrees, `s`/`l` in `[0, 1]`.
fn hsl_to_rgb(hue: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let hue = hue.rem_euclid(360.0);
    let a = s * l.min(1.0 - l);
    let f = |n: f64| {
        let k = (n + hue / 30.0).rem_euclid(12.0);
        l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
    };
    (f(0.0), f(8.0), f(4.0))
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parses a CSS color into straight-alpha bytes.
///
/// ```rust
/// use spektra_core::{parse_color, Rgba};
///
/// assert_eq!(parse_color("#7928CA").unwrap(), Rgba::opaque(0x79, 0x28, 0xca));
/// assert_eq!(parse_color("hsl(0 100% 50% / 50%)").unwrap(), Rgba::new(255, 0, 0, 128));
/// assert!(parse_color("not-a-color").is_err());
/// ```
pub fn parse_color(input: &str) -> Result<Rgba, ColorError> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser::new(tokens).parse_color()
}
