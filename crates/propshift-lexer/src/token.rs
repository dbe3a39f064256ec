/// Quote character of a literal attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
}

impl Quote {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '"' => Some(Quote::Double),
            '\'' => Some(Quote::Single),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }
}

/// Value of an attribute.
///
/// Data-carrying variants hold the raw text exactly as it appeared in source
/// (escape sequences are kept, not decoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// `name="value"` or `name='value'`.
    Literal { value: String, quote: Quote },
    /// `name={value}`, outer braces stripped.
    Expression(String),
    /// `name=value`, unquoted.
    BareWord(String),
    /// `name` with no value.
    Boolean,
}

/// Coarse classification of an [`AttrValue`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Literal,
    Expression,
    BareWord,
    Boolean,
}

impl AttrValue {
    /// Double-quoted literal.
    pub fn literal(value: impl Into<String>) -> Self {
        AttrValue::Literal {
            value: value.into(),
            quote: Quote::Double,
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            AttrValue::Literal { .. } => ValueKind::Literal,
            AttrValue::Expression(_) => ValueKind::Expression,
            AttrValue::BareWord(_) => ValueKind::BareWord,
            AttrValue::Boolean => ValueKind::Boolean,
        }
    }

    /// The literal text, if this is a quoted literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            AttrValue::Literal { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Whitespace found around the `=` of an attribute (`name = "x"`).
///
/// Empty for attributes written as `name="x"` and for attributes created by
/// the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EqSpacing {
    pub before: String,
    pub after: String,
}

/// A single `name[=value]` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
    pub spacing: EqSpacing,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: AttrValue) -> Self {
        Self {
            name: name.into(),
            value,
            spacing: EqSpacing::default(),
        }
    }

    /// `name="value"` with double quotes.
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, AttrValue::literal(value))
    }

    /// Replace the text of a literal value, keeping its quote character.
    /// Non-literal values become a double-quoted literal.
    pub fn set_literal(&mut self, text: impl Into<String>) {
        let text = text.into();
        match &mut self.value {
            AttrValue::Literal { value, .. } => *value = text,
            _ => {
                self.value = AttrValue::literal(text);
                self.spacing = EqSpacing::default();
            }
        }
    }

    /// Append the source form of this attribute to `out`.
    pub fn write_to(&self, out: &mut String) {
        out.push_str(&self.name);
        if self.value == AttrValue::Boolean {
            return;
        }
        out.push_str(&self.spacing.before);
        out.push('=');
        out.push_str(&self.spacing.after);
        match &self.value {
            AttrValue::Literal { value, quote } => {
                out.push(quote.as_char());
                out.push_str(value);
                out.push(quote.as_char());
            }
            AttrValue::Expression(expr) => {
                out.push('{');
                out.push_str(expr);
                out.push('}');
            }
            AttrValue::BareWord(word) => out.push_str(word),
            AttrValue::Boolean => {}
        }
    }
}

/// One lexical unit of an attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of whitespace, kept verbatim.
    Whitespace(String),
    Attribute(Attribute),
    /// A lone `/` (self-closing marker).
    BareSlash,
}

impl Token {
    /// A single space separator.
    pub fn space() -> Self {
        Token::Whitespace(" ".into())
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self, Token::Attribute(_))
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace(_))
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Token::Attribute(attr) => Some(attr),
            _ => None,
        }
    }

    pub fn as_attribute_mut(&mut self) -> Option<&mut Attribute> {
        match self {
            Token::Attribute(attr) => Some(attr),
            _ => None,
        }
    }

    /// Append the source form of this token to `out`.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Token::Whitespace(ws) => out.push_str(ws),
            Token::Attribute(attr) => attr.write_to(out),
            Token::BareSlash => out.push('/'),
        }
    }
}
