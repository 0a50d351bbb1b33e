//! Parser for the driver-spec mini-language.
//!
//! A driver string is a whitespace-separated token list. An identifier starts a new driver
//! entry; every int, float, char or string literal after it becomes a positional argument of
//! that entry. `softpwm raspi_gpio 17` names the `softpwm` encoder with no arguments, bound to
//! the `raspi_gpio` transport with argument `17`.

use crate::{DriverError, Result};
use core::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// One driver name and its positional arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DriverSpec {
    pub name: String,
    pub args: Vec<String>,
}

impl DriverSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

impl fmt::Display for DriverSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for arg in &self.args {
            write!(f, " {arg:?}")?;
        }
        Ok(())
    }
}

/// A parsed driver string: an encoder, optionally followed by the transport to bind to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DriverChain {
    pub encoder: DriverSpec,
    pub transport: Option<DriverSpec>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Token {
    Ident(String),
    Literal(String),
}

/// Parse a driver string into its entries, in order, without checking how many there are.
pub fn parse_entries(input: &str) -> Result<Vec<DriverSpec>> {
    let mut entries: Vec<DriverSpec> = Vec::new();
    let mut lexer = Lexer::new(input);
    while let Some((column, token)) = lexer.next_token()? {
        match token {
            Token::Ident(name) => entries.push(DriverSpec::new(name)),
            Token::Literal(value) => match entries.last_mut() {
                Some(entry) => entry.args.push(value),
                None => {
                    return Err(DriverError::Syntax {
                        column,
                        message: format!("argument {value:?} before any driver name"),
                    })
                }
            },
        }
    }
    Ok(entries)
}

/// Parse a driver string that must name one encoder and at most one transport.
pub fn parse_driver_spec(input: &str) -> Result<DriverChain> {
    let entries = parse_entries(input)?;
    let count = entries.len();
    let mut iter = entries.into_iter();
    match (iter.next(), iter.next(), iter.next()) {
        (Some(encoder), transport, None) => Ok(DriverChain { encoder, transport }),
        _ => Err(DriverError::DriverCount(count)),
    }
}

struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            column: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        self.column += 1;
        Some(c)
    }

    fn error(&self, column: usize, message: impl Into<String>) -> DriverError {
        DriverError::Syntax {
            column,
            message: message.into(),
        }
    }

    /// Next token and the 1-based column it starts at.
    fn next_token(&mut self) -> Result<Option<(usize, Token)>> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let column = self.column + 1;
        let token = if c.is_alphabetic() || c == '_' {
            Token::Ident(self.ident())
        } else if c.is_ascii_digit() || c == '.' {
            Token::Literal(self.number(column)?)
        } else if c == '"' {
            Token::Literal(self.quoted('"', column)?)
        } else if c == '\'' {
            Token::Literal(self.char_literal(column)?)
        } else if c == '`' {
            Token::Literal(self.raw_string(column)?)
        } else {
            return Err(self.error(column, format!("unexpected character {c:?}")));
        };
        Ok(Some((column, token)))
    }

    fn ident(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }
        out
    }

    fn take_digits(&mut self, out: &mut String, radix: u32) -> usize {
        let mut n = 0;
        while let Some(c) = self.peek() {
            if c.is_digit(radix) || c == '_' {
                out.push(c);
                self.bump();
                n += 1;
            } else {
                break;
            }
        }
        n
    }

    /// Integers (decimal, `0x`, `0o`, `0b`) and decimal floats with optional exponent.
    fn number(&mut self, column: usize) -> Result<String> {
        let mut out = String::new();
        if self.peek() == Some('0') {
            out.push('0');
            self.bump();
            let radix = match self.peek() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                if let Some(prefix) = self.bump() {
                    out.push(prefix);
                }
                if self.take_digits(&mut out, radix) == 0 {
                    return Err(self.error(column, format!("malformed number {out:?}")));
                }
                return Ok(out);
            }
        }
        let mut digits = out.len() + self.take_digits(&mut out, 10);
        if self.peek() == Some('.') {
            out.push('.');
            self.bump();
            digits += self.take_digits(&mut out, 10);
        }
        if digits == 0 {
            return Err(self.error(column, "expected digits after '.'"));
        }
        if let Some(e @ ('e' | 'E')) = self.peek() {
            out.push(e);
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                out.push(sign);
                self.bump();
            }
            if self.take_digits(&mut out, 10) == 0 {
                return Err(self.error(column, format!("malformed exponent in {out:?}")));
            }
        }
        Ok(out)
    }

    fn escape(&mut self, column: usize) -> Result<char> {
        match self.bump() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('0') => Ok('\0'),
            Some(c @ ('\\' | '"' | '\'')) => Ok(c),
            Some(c) => Err(self.error(column, format!("unknown escape sequence \\{c}"))),
            None => Err(self.error(column, "unterminated literal")),
        }
    }

    /// A double-quoted string; the argument is the unescaped contents.
    fn quoted(&mut self, quote: char, column: usize) -> Result<String> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => out.push(self.escape(column)?),
                Some('\n') | None => return Err(self.error(column, "unterminated string")),
                Some(c) => out.push(c),
            }
        }
    }

    fn char_literal(&mut self, column: usize) -> Result<String> {
        let value = self.quoted('\'', column)?;
        if value.chars().count() != 1 {
            return Err(self.error(column, format!("invalid char literal {value:?}")));
        }
        Ok(value)
    }

    /// A backquoted string, taken verbatim.
    fn raw_string(&mut self, column: usize) -> Result<String> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('`') => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error(column, "unterminated raw string")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, args: &[&str]) -> DriverSpec {
        DriverSpec {
            name: name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn encoder_and_transport() {
        let chain = parse_driver_spec("softpwm raspi_gpio 17").unwrap();
        assert_eq!(chain.encoder, spec("softpwm", &[]));
        assert_eq!(chain.transport, Some(spec("raspi_gpio", &["17"])));
    }

    #[test]
    fn encoder_alone() {
        let chain = parse_driver_spec("  log  ").unwrap();
        assert_eq!(chain.encoder, spec("log", &[]));
        assert_eq!(chain.transport, None);
    }

    #[test]
    fn literal_kinds() {
        let entries =
            parse_entries(r#"drv 17 0x1F 2.5 1e-3 .5 'a' "two words" `raw\n` "q\"uote""#).unwrap();
        assert_eq!(
            entries,
            vec![spec(
                "drv",
                &["17", "0x1F", "2.5", "1e-3", ".5", "a", "two words", "raw\\n", "q\"uote"]
            )]
        );
    }

    #[test]
    fn number_followed_by_ident_splits() {
        let entries = parse_entries("softpwm 250mock").unwrap();
        assert_eq!(entries, vec![spec("softpwm", &["250"]), spec("mock", &[])]);
    }

    #[test]
    fn argument_before_name_is_rejected() {
        let err = parse_driver_spec("17 softpwm").unwrap_err();
        assert!(matches!(err, DriverError::Syntax { column: 1, .. }));
    }

    #[test]
    fn unexpected_characters_are_rejected() {
        for input in ["softpwm -17", "softpwm, mock", "a/b", "softpwm \"open", "x 'ab'", "x 0x"] {
            assert!(
                matches!(parse_entries(input), Err(DriverError::Syntax { .. })),
                "{input}"
            );
        }
    }

    #[test]
    fn syntax_error_reports_column() {
        let err = parse_entries("softpwm mock #").unwrap_err();
        assert!(matches!(err, DriverError::Syntax { column: 14, .. }));
    }

    #[test]
    fn driver_count_must_be_one_or_two() {
        assert!(matches!(
            parse_driver_spec(""),
            Err(DriverError::DriverCount(0))
        ));
        assert!(matches!(
            parse_driver_spec("softpwm mock extra"),
            Err(DriverError::DriverCount(3))
        ));
    }

    #[test]
    fn display_parses_back() {
        let original = spec("raspi_gpio", &["17"]);
        assert_eq!(original.to_string(), "raspi_gpio \"17\"");
        let reparsed = parse_entries(&original.to_string()).unwrap();
        assert_eq!(reparsed, vec![original]);

        let quoted = spec("mock", &["two words", "q\"uote"]);
        assert_eq!(parse_entries(&quoted.to_string()).unwrap(), vec![quoted]);
    }
}
