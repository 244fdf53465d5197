use super::error::ColorError;

// ── Token ─────────────────────────────────────────────────────────────────

/// Unit attached to a numeric token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Unit {
    None,
    Percent,
    Deg,
    Rad,
    Grad,
    Turn,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Characters following `#`, not yet checked for hex validity.
    Hash(String),
    /// Color name or other bare word, lowercased.
    Ident(String),
    /// Name immediately followed by `(`, lowercased. The `(` is consumed.
    Function(String),
    Number(f64, Unit),
    LParen,
    RParen,
    Comma,
    Slash,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos {
    pub token: Token,
    /// 1-based column of the token's first character.
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithPos>, ColorError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let col = self.col();
            let token = self.next_token()?;
            let eof = token == Token::Eof;
            tokens.push(TokenWithPos { token, col });
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn col(&self) -> usize {
        self.src[..self.pos].chars().count() + 1
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut it = self.src[self.pos..].chars();
        it.next();
        it.next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn take_while(&mut self, f: impl Fn(char) -> bool) -> &'s str {
        let src = self.src;
        let start = self.pos;
        while matches!(self.peek(), Some(c) if f(c)) {
            self.advance();
        }
        &src[start..self.pos]
    }

    fn next_token(&mut self) -> Result<Token, ColorError> {
        let ch = match self.peek() {
            None => return Ok(Token::Eof),
            Some(c) => c,
        };

        match ch {
            '(' => { self.advance(); Ok(Token::LParen) }
            ')' => { self.advance(); Ok(Token::RParen) }
            ',' => { self.advance(); Ok(Token::Comma) }
            '/' => { self.advance(); Ok(Token::Slash) }
            '#' => {
                self.advance();
                Ok(Token::Hash(self.take_while(|c| c.is_ascii_alphanumeric()).to_string()))
            }
            c if c.is_ascii_digit() || c == '.' => self.lex_number(),
            '+' | '-' if matches!(self.peek_second(), Some(c) if c.is_ascii_digit() || c == '.') => {
                self.lex_number()
            }
            c if c.is_ascii_alphabetic() => {
                let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '-').to_ascii_lowercase();
                if self.peek() == Some('(') {
                    self.advance();
                    Ok(Token::Function(word))
                } else {
                    Ok(Token::Ident(word))
                }
            }
            other => Err(ColorError::new(format!("unexpected character {other:?}"), self.col())),
        }
    }

    /// `e`/`E` then digits, optionally signed. A bare `e` is left for units.
    fn exponent_follows(&self) -> bool {
        let mut it = self.src[self.pos..].chars();
        match (it.next(), it.next(), it.next()) {
            (Some('e' | 'E'), Some(d), _) if d.is_ascii_digit() => true,
            (Some('e' | 'E'), Some('+' | '-'), Some(d)) => d.is_ascii_digit(),
            _ => false,
        }
    }

    fn lex_number(&mut self) -> Result<Token, ColorError> {
        let col = self.col();
        let start = self.pos;
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }
        self.take_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.advance();
            self.take_while(|c| c.is_ascii_digit());
        }
        if self.exponent_follows() {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            self.take_while(|c| c.is_ascii_digit());
        }
        let text = &self.src[start..self.pos];
        let value = text
            .parse::<f64>()
            .map_err(|_| ColorError::new(format!("invalid number {text:?}"), col))?;

        let unit = if self.peek() == Some('%') {
            self.advance();
            Unit::Percent
        } else {
            let unit_col = self.col();
            match self.take_while(|c| c.is_ascii_alphabetic()).to_ascii_lowercase().as_str() {
                "" => Unit::None,
                "deg" => Unit::Deg,
                "rad" => Unit::Rad,
                "grad" => Unit::Grad,
                "turn" => Unit::Turn,
                other => return Err(ColorError::new(format!("unknown unit {other:?}"), unit_col)),
            }
        };
        Ok(Token::Number(value, unit))
    }
}
