use std::fmt;

use crate::errors::LiteralError;

/// Containers nested deeper than this are rejected instead of recursing further.
pub const MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    None,
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
    Set,
    Mapping,
}

impl LiteralKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiteralKind::None => "none",
            LiteralKind::Bool => "bool",
            LiteralKind::Int => "int",
            LiteralKind::Float => "float",
            LiteralKind::Str => "string",
            LiteralKind::List => "list",
            LiteralKind::Tuple => "tuple",
            LiteralKind::Set => "set",
            LiteralKind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value written in dict-literal notation, as found in job-board dumps:
/// `{'from': 100, 'to': None, 'currency': 'USD', 'gross': True}`.
///
/// Only literals are understood. Names other than `True`, `False` and `None`
/// (plus their JSON spellings) are rejected, so nothing in a cell is ever executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    Set(Vec<Literal>),
    Mapping(Vec<(Literal, Literal)>),
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::None => LiteralKind::None,
            Literal::Bool(_) => LiteralKind::Bool,
            Literal::Int(_) => LiteralKind::Int,
            Literal::Float(_) => LiteralKind::Float,
            Literal::Str(_) => LiteralKind::Str,
            Literal::List(_) => LiteralKind::List,
            Literal::Tuple(_) => LiteralKind::Tuple,
            Literal::Set(_) => LiteralKind::Set,
            Literal::Mapping(_) => LiteralKind::Mapping,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Literal::None)
    }

    /// Looks up a string key in a mapping. A repeated key resolves to its last value.
    pub fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Literal::Mapping(entries) => entries.iter().rev().find_map(|(k, v)| match k {
                Literal::Str(name) if name == key => Some(v),
                _ => None,
            }),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(value) => Some(*value as f64),
            Literal::Float(value) => Some(*value),
            _ => None,
        }
    }
}

pub fn parse_literal(input: &str) -> Result<Literal, LiteralError> {
    let mut parser = LiteralParser::new(input);
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos < input.len() {
        return Err(LiteralError::TrailingInput { offset: parser.pos });
    }
    Ok(value)
}

struct LiteralParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn expect(&mut self, wanted: char, expected: &'static str) -> Result<(), LiteralError> {
        match self.peek() {
            Some(ch) if ch == wanted => {
                self.pos += ch.len_utf8();
                Ok(())
            }
            Some(found) => Err(LiteralError::UnexpectedChar {
                offset: self.pos,
                found,
                expected,
            }),
            None => Err(LiteralError::UnexpectedEnd {
                offset: self.pos,
                expected,
            }),
        }
    }

    fn parse_value(&mut self) -> Result<Literal, LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd {
                offset: self.pos,
                expected: "a literal",
            }),
            Some('{') => self.parse_mapping(),
            Some('[') => {
                let (items, _) = self.parse_items(']', "',' or ']'")?;
                Ok(Literal::List(items))
            }
            Some('(') => {
                let (mut items, trailing_comma) = self.parse_items(')', "',' or ')'")?;
                // `(x)` is a parenthesized value, `(x,)` a one-element tuple
                if items.len() == 1 && !trailing_comma {
                    Ok(items.remove(0))
                } else {
                    Ok(Literal::Tuple(items))
                }
            }
            Some(quote @ ('\'' | '"')) => self.parse_string(quote).map(Literal::Str),
            Some(ch) if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.') => {
                self.parse_number()
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.parse_name(),
            Some(found) => Err(LiteralError::UnexpectedChar {
                offset: self.pos,
                found,
                expected: "a literal",
            }),
        }
    }

    fn enter(&mut self) -> Result<(), LiteralError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(LiteralError::TooDeep {
                offset: self.pos,
                limit: MAX_NESTING_DEPTH,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_mapping(&mut self) -> Result<Literal, LiteralError> {
        self.enter()?;
        self.bump();

        let mut entries = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.bump();
                break;
            }

            let key = self.parse_value()?;
            self.skip_whitespace();
            // `{a, b}` is a set; only the first element can tell
            if entries.is_empty() && matches!(self.peek(), Some(',' | '}')) {
                return self.parse_set_rest(key);
            }
            self.expect(':', "':'")?;
            let value = self.parse_value()?;
            entries.push((key, value));

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(found) => {
                    return Err(LiteralError::UnexpectedChar {
                        offset: self.pos,
                        found,
                        expected: "',' or '}'",
                    })
                }
                None => {
                    return Err(LiteralError::UnexpectedEnd {
                        offset: self.pos,
                        expected: "',' or '}'",
                    })
                }
            }
        }

        self.leave();
        Ok(Literal::Mapping(entries))
    }

    fn parse_set_rest(&mut self, first: Literal) -> Result<Literal, LiteralError> {
        let mut items = vec![first];
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    self.skip_whitespace();
                    if self.peek() == Some('}') {
                        self.bump();
                        break;
                    }
                    items.push(self.parse_value()?);
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(found) => {
                    return Err(LiteralError::UnexpectedChar {
                        offset: self.pos,
                        found,
                        expected: "',' or '}'",
                    })
                }
                None => {
                    return Err(LiteralError::UnexpectedEnd {
                        offset: self.pos,
                        expected: "',' or '}'",
                    })
                }
            }
        }

        self.leave();
        Ok(Literal::Set(items))
    }

    /// Reads a bracketed, comma separated sequence. The flag reports whether the
    /// last item was followed by a comma.
    fn parse_items(
        &mut self,
        close: char,
        expected: &'static str,
    ) -> Result<(Vec<Literal>, bool), LiteralError> {
        self.enter()?;
        self.bump();

        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.bump();
                break;
            }

            items.push(self.parse_value()?);
            trailing_comma = false;

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    trailing_comma = true;
                }
                Some(ch) if ch == close => {
                    self.bump();
                    break;
                }
                Some(found) => {
                    return Err(LiteralError::UnexpectedChar {
                        offset: self.pos,
                        found,
                        expected,
                    })
                }
                None => {
                    return Err(LiteralError::UnexpectedEnd {
                        offset: self.pos,
                        expected,
                    })
                }
            }
        }

        self.leave();
        Ok((items, trailing_comma))
    }

    fn parse_string(&mut self, quote: char) -> Result<String, LiteralError> {
        let start = self.pos;
        self.bump();

        let mut out = String::new();
        loop {
            let Some(ch) = self.bump() else {
                return Err(LiteralError::UnterminatedString { offset: start });
            };
            match ch {
                c if c == quote => return Ok(out),
                '\n' => return Err(LiteralError::UnterminatedString { offset: start }),
                '\\' => self.parse_escape(start, &mut out)?,
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, start: usize, out: &mut String) -> Result<(), LiteralError> {
        let offset = self.pos - 1;
        let Some(ch) = self.bump() else {
            return Err(LiteralError::UnterminatedString { offset: start });
        };

        match ch {
            '\\' | '\'' | '"' => out.push(ch),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            // escaped newline continues the string
            '\n' => {}
            '0'..='7' => {
                let mut value = ch as u32 - '0' as u32;
                for _ in 0..2 {
                    match self.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            self.pos += 1;
                        }
                        None => break,
                    }
                }
                out.push(code_point(value, offset)?);
            }
            'x' => out.push(self.read_hex_escape(2, offset)?),
            'u' => out.push(self.read_hex_escape(4, offset)?),
            'U' => out.push(self.read_hex_escape(8, offset)?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn read_hex_escape(&mut self, len: usize, offset: usize) -> Result<char, LiteralError> {
        let end = self.pos + len;
        let digits = self
            .input
            .get(self.pos..end)
            .filter(|digits| digits.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| LiteralError::InvalidEscape {
                offset,
                message: format!("expected {len} hex digits"),
            })?;
        let value = u32::from_str_radix(digits, 16).map_err(|err| LiteralError::InvalidEscape {
            offset,
            message: err.to_string(),
        })?;
        let ch = code_point(value, offset)?;
        self.pos = end;
        Ok(ch)
    }

    fn parse_number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        let mut prev: Option<char> = None;
        while let Some(ch) = self.peek() {
            let accepted = ch.is_ascii_digit()
                || matches!(ch, '.' | '_' | 'e' | 'E')
                || (matches!(ch, '+' | '-') && matches!(prev, None | Some('e') | Some('E')));
            if !accepted {
                break;
            }
            prev = Some(ch);
            self.pos += 1;
        }

        let text = &self.input[start..self.pos];
        let invalid = || LiteralError::InvalidNumber {
            offset: start,
            text: text.to_string(),
        };

        let cleaned = strip_digit_separators(text).ok_or_else(invalid)?;
        let is_float = cleaned.contains(|c: char| matches!(c, '.' | 'e' | 'E'));
        if !is_float {
            let digits = cleaned.trim_start_matches(['+', '-']);
            if digits.starts_with('0') && digits.contains(|c: char| c != '0') {
                // `010` is not a decimal literal; `00` still is
                return Err(invalid());
            }
            // integers beyond i64 fall through to a float approximation
            if let Ok(value) = cleaned.parse::<i64>() {
                return Ok(Literal::Int(value));
            }
        }

        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Literal::Float(value)),
            _ => Err(invalid()),
        }
    }

    fn parse_name(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !(ch.is_alphanumeric() || ch == '_') {
                break;
            }
            self.pos += ch.len_utf8();
        }

        match &self.input[start..self.pos] {
            "True" | "true" => Ok(Literal::Bool(true)),
            "False" | "false" => Ok(Literal::Bool(false)),
            "None" | "null" => Ok(Literal::None),
            name => Err(LiteralError::UnknownName {
                offset: start,
                name: name.to_string(),
            }),
        }
    }
}

fn code_point(value: u32, offset: usize) -> Result<char, LiteralError> {
    char::from_u32(value).ok_or_else(|| LiteralError::InvalidEscape {
        offset,
        message: format!("invalid code point U+{value:X}"),
    })
}

/// Removes `_` separators that sit between two digits; any other underscore is invalid.
fn strip_digit_separators(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut cleaned = String::with_capacity(text.len());
    for (idx, &ch) in chars.iter().enumerate() {
        if ch == '_' {
            let before = idx.checked_sub(1).and_then(|i| chars.get(i));
            let after = chars.get(idx + 1);
            match (before, after) {
                (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => continue,
                _ => return None,
            }
        }
        cleaned.push(ch);
    }
    Some(cleaned)
}
