//! Structural edits over a tokenized attribute list.

use std::fmt;

use crate::scanner::Scanner;
use crate::token::{Attribute, Token};

/// An owned, editable attribute list for one tag occurrence.
///
/// Index-based operations address the underlying token vector, whitespace
/// tokens included. Nothing here reorders or rewrites tokens it was not asked
/// to touch, so an unedited list serializes back to its source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    tokens: Vec<Token>,
}

impl AttributeList {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Tokenize attribute text into an editable list.
    pub fn parse(source: &str) -> Self {
        Self::new(Scanner::tokenize(source))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Index of the first attribute called `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.tokens
            .iter()
            .position(|t| t.as_attribute().is_some_and(|a| a.name == name))
    }

    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.tokens.get(index).and_then(Token::as_attribute)
    }

    pub fn attribute_mut(&mut self, index: usize) -> Option<&mut Attribute> {
        self.tokens.get_mut(index).and_then(Token::as_attribute_mut)
    }

    /// First attribute called `name`.
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.find(name).and_then(|i| self.attribute(i))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        let index = self.find(name)?;
        self.attribute_mut(index)
    }

    /// Remove one token. Neighbouring whitespace is left alone.
    pub fn remove(&mut self, index: usize) -> Token {
        self.tokens.remove(index)
    }

    /// Splice `attrs` in at `index`, separating every pair of attributes that
    /// would otherwise touch with a single space.
    pub fn insert_at(&mut self, index: usize, attrs: Vec<Attribute>) {
        if attrs.is_empty() {
            return;
        }
        let index = index.min(self.tokens.len());
        let mut spliced = Vec::with_capacity(attrs.len() * 2 + 1);
        if index > 0 && self.tokens[index - 1].is_attribute() {
            spliced.push(Token::space());
        }
        for (i, attr) in attrs.into_iter().enumerate() {
            if i > 0 {
                spliced.push(Token::space());
            }
            spliced.push(Token::Attribute(attr));
        }
        if self.tokens.get(index).is_some_and(Token::is_attribute) {
            spliced.push(Token::space());
        }
        self.tokens.splice(index..index, spliced);
    }

    /// Rename the first attribute called `from`. Returns whether one was found.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        match self.get_mut(from) {
            Some(attr) => {
                attr.name = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Tidy the gap left by a removal at `index`.
    ///
    /// Two whitespace runs left side by side are merged by dropping the first
    /// (the later run carries the indentation of the following line). A gap at
    /// the end of the list drops the whitespace before it.
    pub fn collapse_whitespace_at(&mut self, index: usize) {
        if index == 0 || index > self.tokens.len() {
            return;
        }
        let before_is_ws = self.tokens[index - 1].is_whitespace();
        let after_is_ws = self.tokens.get(index).map(Token::is_whitespace);
        match after_is_ws {
            Some(true) | None if before_is_ws => {
                self.tokens.remove(index - 1);
            }
            _ => {}
        }
    }

    /// Guarantee that no two attributes are adjacent without whitespace between
    /// them. Idempotent.
    pub fn normalize_separation(&mut self) {
        let mut i = 1;
        while i < self.tokens.len() {
            if self.tokens[i - 1].is_attribute() && self.tokens[i].is_attribute() {
                self.tokens.insert(i, Token::space());
                i += 1;
            }
            i += 1;
        }
    }

    pub fn serialize(&self) -> String {
        serialize(&self.tokens)
    }
}

impl fmt::Display for AttributeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Render tokens back to attribute text.
pub fn serialize(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.write_to(&mut out);
    }
    out
}
