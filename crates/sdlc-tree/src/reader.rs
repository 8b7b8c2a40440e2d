//! Pull reader over JSON text
//!
//! Emits structural events with an explicit container stack, so nesting
//! depth is bounded only by memory. Scalars (strings, numbers, literals) are
//! cut out of the input and handed to `serde_json`, which owns escaping and
//! number grammar.

use crate::error::DecodeError;
use serde_json::Value;

/// One step through a JSON document
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Key(String),
    Scalar(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Value,
    KeyOrEnd,
    Key,
    ValueOrEnd,
    CommaOrEnd,
    Eof,
}

#[derive(Debug)]
pub(crate) struct EventReader<'a> {
    text: &'a str,
    pos: usize,
    open: Vec<Container>,
    expect: Expect,
}

impl<'a> EventReader<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            open: Vec::new(),
            expect: Expect::Value,
        }
    }

    /// Next event, or `None` once the single top-level value is complete
    pub(crate) fn next_event(&mut self) -> Result<Option<Event>, DecodeError> {
        loop {
            self.skip_whitespace();
            match self.expect {
                Expect::Eof => {
                    return if self.pos == self.text.len() {
                        Ok(None)
                    } else {
                        Err(self.unexpected("end of input"))
                    };
                }
                Expect::Value => return self.value().map(Some),
                Expect::ValueOrEnd => {
                    if self.eat(b']') {
                        return Ok(Some(self.close()));
                    }
                    return self.value().map(Some);
                }
                Expect::KeyOrEnd => {
                    if self.eat(b'}') {
                        return Ok(Some(self.close()));
                    }
                    return self.key().map(Some);
                }
                Expect::Key => return self.key().map(Some),
                Expect::CommaOrEnd => {
                    let (close, next) = match self.open.last() {
                        Some(Container::Object) => (b'}', Expect::Key),
                        Some(Container::Array) => (b']', Expect::Value),
                        None => return Err(self.unexpected("end of input")),
                    };
                    if self.eat(close) {
                        return Ok(Some(self.close()));
                    }
                    if !self.eat(b',') {
                        return Err(self.unexpected("',' or a closing bracket"));
                    }
                    self.expect = next;
                }
            }
        }
    }

    /// Next event where end of input is an error
    pub(crate) fn require(&mut self) -> Result<Event, DecodeError> {
        self.next_event()?
            .ok_or_else(|| self.unexpected("more input"))
    }

    /// Consume the rest of a value whose first event was `first`
    pub(crate) fn skip_value(&mut self, first: &Event) -> Result<(), DecodeError> {
        let mut depth = match first {
            Event::StartObject | Event::StartArray => 1usize,
            _ => return Ok(()),
        };
        while depth > 0 {
            match self.require()? {
                Event::StartObject | Event::StartArray => depth += 1,
                Event::EndObject | Event::EndArray => depth -= 1,
                Event::Key(_) | Event::Scalar(_) => {}
            }
        }
        Ok(())
    }

    /// Error unless only whitespace remains
    pub(crate) fn finish(&mut self) -> Result<(), DecodeError> {
        match self.next_event()? {
            None => Ok(()),
            Some(_) => Err(self.unexpected("end of input")),
        }
    }

    pub(crate) fn unexpected(&self, expected: &'static str) -> DecodeError {
        DecodeError::Unexpected {
            offset: self.pos,
            expected,
        }
    }

    fn value(&mut self) -> Result<Event, DecodeError> {
        match self.peek() {
            Some(b'{') => {
                self.pos += 1;
                self.open.push(Container::Object);
                self.expect = Expect::KeyOrEnd;
                Ok(Event::StartObject)
            }
            Some(b'[') => {
                self.pos += 1;
                self.open.push(Container::Array);
                self.expect = Expect::ValueOrEnd;
                Ok(Event::StartArray)
            }
            Some(b'"') => {
                let text = self.string()?;
                self.after_value();
                Ok(Event::Scalar(Value::String(text)))
            }
            Some(_) => {
                let start = self.pos;
                while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')) {
                    self.pos += 1;
                }
                if start == self.pos {
                    return Err(self.unexpected("a value"));
                }
                let scalar: Value = serde_json::from_str(&self.text[start..self.pos])?;
                self.after_value();
                Ok(Event::Scalar(scalar))
            }
            None => Err(self.unexpected("a value")),
        }
    }

    fn key(&mut self) -> Result<Event, DecodeError> {
        if self.peek() != Some(b'"') {
            return Err(self.unexpected("an object key"));
        }
        let key = self.string()?;
        self.skip_whitespace();
        if !self.eat(b':') {
            return Err(self.unexpected("':'"));
        }
        self.expect = Expect::Value;
        Ok(Event::Key(key))
    }

    fn string(&mut self) -> Result<String, DecodeError> {
        let bytes = self.text.as_bytes();
        let start = self.pos;
        let mut end = start + 1;
        loop {
            match bytes.get(end) {
                Some(b'"') => break,
                Some(b'\\') => end += 2,
                Some(_) => end += 1,
                None => {
                    self.pos = bytes.len();
                    return Err(self.unexpected("closing '\"'"));
                }
            }
        }
        self.pos = end + 1;
        Ok(serde_json::from_str(&self.text[start..self.pos])?)
    }

    fn close(&mut self) -> Event {
        let event = match self.open.pop() {
            Some(Container::Array) => Event::EndArray,
            _ => Event::EndObject,
        };
        self.after_value();
        event
    }

    fn after_value(&mut self) {
        self.expect = if self.open.is_empty() {
            Expect::Eof
        } else {
            Expect::CommaOrEnd
        };
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn events(text: &str) -> Result<Vec<Event>, DecodeError> {
        let mut reader = EventReader::new(text);
        let mut out = Vec::new();
        while let Some(event) = reader.next_event()? {
            out.push(event);
        }
        Ok(out)
    }

    #[test]
    fn emits_structure_and_scalars() {
        let out = events(r#" {"a": [1, "x\"y", null], "b": {}} "#).unwrap();
        assert_eq!(
            out,
            [
                Event::StartObject,
                Event::Key("a".into()),
                Event::StartArray,
                Event::Scalar(Value::from(1)),
                Event::Scalar(Value::from("x\"y")),
                Event::Scalar(Value::Null),
                Event::EndArray,
                Event::Key("b".into()),
                Event::StartObject,
                Event::EndObject,
                Event::EndObject,
            ]
        );
    }

    #[test]
    fn rejects_malformed_structure() {
        for bad in ["", "{", "[1,]", "{\"a\" 1}", "{1:2}", "[1 2]", "{} {}", "\"open", "nul"] {
            let err = events(bad).unwrap_err();
            assert_eq!(err.code(), "SYNTAX", "input: {bad:?}");
        }
    }

    #[test]
    fn unicode_strings_pass_through() {
        let out = events(r#"["ü/?=#", "ü"]"#).unwrap();
        assert_eq!(out[1], Event::Scalar(Value::from("ü/?=#")));
        assert_eq!(out[2], Event::Scalar(Value::from("ü")));
    }

    #[test]
    fn deep_nesting_needs_no_stack() {
        let depth = 100_000;
        let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        assert_eq!(events(&text).unwrap().len(), 2 * depth);
    }
}
