use crate::token::{AttrValue, Attribute, EqSpacing, Quote, Token};

/// Attribute-list scanner.
///
/// Tokenizes the text between a tag name and its closing `>` into whitespace
/// runs, attributes and bare slashes. Scanning never fails: input that does
/// not fit the attribute grammar degrades to bare-word or boolean attributes
/// so that serializing the tokens always reproduces the input.
///
/// - `Vec<char>` source for index-based navigation
/// - Brace-depth counting for `{expr}` values and `{...spread}` names, with
///   braces inside string literals ignored
/// - Backslash escapes inside quoted literals are copied, never decoded
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    /// Create a new scanner for the given attribute text.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenize an entire attribute list.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens();
        scanner.tokens
    }

    fn scan_tokens(&mut self) {
        while !self.is_at_end() {
            self.scan_token();
        }
    }

    fn scan_token(&mut self) {
        match self.peek() {
            c if c.is_whitespace() => self.scan_whitespace(),
            '/' => {
                self.advance();
                self.tokens.push(Token::BareSlash);
            }
            '{' => self.scan_spread(),
            _ => self.scan_attribute(),
        }
    }

    // --- Scanners ---

    fn scan_whitespace(&mut self) {
        let start = self.pos;
        self.skip_whitespace();
        let run = self.text(start, self.pos);
        self.tokens.push(Token::Whitespace(run));
    }

    /// `{...props}` in name position. Kept whole as a valueless attribute.
    fn scan_spread(&mut self) {
        let start = self.pos;
        if !self.skip_braces() {
            self.pos = self.chars.len();
        }
        let name = self.text(start, self.pos);
        self.tokens
            .push(Token::Attribute(Attribute::new(name, AttrValue::Boolean)));
    }

    fn scan_attribute(&mut self) {
        let start = self.pos;
        // The first character always belongs to the name, even a stray `=`.
        self.advance();
        while !self.is_at_end() && self.peek() != '=' && !self.peek().is_whitespace() {
            self.advance();
        }
        let name = self.text(start, self.pos);

        let name_end = self.pos;
        self.skip_whitespace();
        if self.is_at_end() || self.peek() != '=' {
            // Boolean attribute: any whitespace we looked past is its own token.
            self.pos = name_end;
            self.tokens
                .push(Token::Attribute(Attribute::new(name, AttrValue::Boolean)));
            return;
        }

        let before = self.text(name_end, self.pos);
        self.advance(); // consume `=`
        let after_start = self.pos;
        self.skip_whitespace();
        let after = self.text(after_start, self.pos);

        let value = if self.is_at_end() {
            // `name=` with nothing after it
            AttrValue::BareWord(String::new())
        } else {
            match self.peek() {
                '"' | '\'' => self.scan_literal(),
                '{' => self.scan_expression(),
                _ => self.scan_bare_word(),
            }
        };

        self.tokens.push(Token::Attribute(Attribute {
            name,
            value,
            spacing: EqSpacing { before, after },
        }));
    }

    /// Scan a quoted literal. An escaped character (including an escaped quote)
    /// is copied as-is and never terminates the value.
    fn scan_literal(&mut self) -> AttrValue {
        let open = self.pos;
        let quote_char = self.peek();
        let quote = Quote::from_char(quote_char).unwrap_or(Quote::Double);
        self.advance(); // consume opening quote
        let value_start = self.pos;

        while !self.is_at_end() && self.peek() != quote_char {
            if self.peek() == '\\' && self.pos + 1 < self.chars.len() {
                self.advance();
            }
            self.advance();
        }

        if self.is_at_end() {
            // Unterminated: keep the raw text, opening quote included.
            return AttrValue::BareWord(self.text(open, self.pos));
        }

        let value = self.text(value_start, self.pos);
        self.advance(); // consume closing quote
        AttrValue::Literal { value, quote }
    }

    /// Scan `{...}` by brace depth; the stored value excludes the outer braces.
    fn scan_expression(&mut self) -> AttrValue {
        let open = self.pos;
        if self.skip_braces() {
            AttrValue::Expression(self.text(open + 1, self.pos - 1))
        } else {
            self.pos = self.chars.len();
            AttrValue::BareWord(self.text(open, self.pos))
        }
    }

    fn scan_bare_word(&mut self) -> AttrValue {
        let start = self.pos;
        while !self.is_at_end() && !self.peek().is_whitespace() {
            self.advance();
        }
        AttrValue::BareWord(self.text(start, self.pos))
    }

    // --- Helpers ---

    /// Advance past a balanced `{...}` group starting at the cursor. Braces
    /// inside `"`, `'` or `` ` `` strings are not counted.
    /// Returns false (cursor at end) when the group never closes.
    fn skip_braces(&mut self) -> bool {
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        while !self.is_at_end() {
            let c = self.peek();
            match quote {
                Some(q) => {
                    if c == '\\' {
                        self.advance();
                    } else if c == q {
                        quote = None;
                    }
                }
                None => match c {
                    '"' | '\'' | '`' => quote = Some(c),
                    '{' => depth += 1,
                    '}' => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            self.advance();
                            return true;
                        }
                    }
                    _ => {}
                },
            }
            self.advance();
        }
        false
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos]
        }
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}
