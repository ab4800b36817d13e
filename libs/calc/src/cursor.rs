//! Read-only cursor over one expression string.
//!
//! The cursor keeps an offset into the input instead of rewriting it; every
//! consumer advances the offset past the text it recognized.

/// Cursor over the raw expression text.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    /// Unconsumed tail of the input.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Next unconsumed character.
    pub fn first(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Character `n` places past the cursor.
    pub fn peek(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Advance past `n` bytes of recognized text.
    pub fn consume(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.first() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Whether the cursor sits on the textual start of a numeric literal: a
    /// digit, or a leading `-` or `.` immediately followed by a digit.
    /// Variable names do not count; they resolve through name lookup.
    pub fn starts_number(&self) -> bool {
        let rest = self.remaining();
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('-') | Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    pub fn starts_alpha(&self) -> bool {
        self.first().is_some_and(|c| c.is_ascii_alphabetic())
    }

    /// Leading run of ASCII letters, without consuming it.
    pub fn alpha_run(&self) -> &'a str {
        let rest = self.remaining();
        let end = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        &rest[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_and_trim() {
        let mut cur = Cursor::new("  25C::F");
        cur.skip_whitespace();
        assert_eq!(cur.remaining(), "25C::F");
        cur.consume(2);
        assert_eq!(cur.remaining(), "C::F");
        assert!(!cur.is_empty());
    }

    #[test]
    fn textual_number_detection() {
        assert!(Cursor::new("25C").starts_number());
        assert!(Cursor::new("-4.2").starts_number());
        assert!(Cursor::new(".5/7").starts_number());
        // A sign or dot not followed by a digit is an operator or noise.
        assert!(!Cursor::new("-y").starts_number());
        assert!(!Cursor::new(".x").starts_number());
        assert!(!Cursor::new("pi").starts_number());
        assert!(!Cursor::new("").starts_number());
    }

    #[test]
    fn alpha_run_stops_at_nonletter() {
        assert_eq!(Cursor::new("y=3.2").alpha_run(), "y");
        assert_eq!(Cursor::new("pi/180").alpha_run(), "pi");
        assert_eq!(Cursor::new("2x").alpha_run(), "");
    }
}
