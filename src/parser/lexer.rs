//! Character-level tokenizer for `/*: ... */` comment blocks.
//!
//! Goal directed: it knows nothing about C++ beyond what it takes to find
//! comment blocks, split their headers into identifiers and symbols, pull
//! out free attribute text, and grab the declaration that follows a block.
//! It never fails; malformed input degrades to `Null` or `EndOfFile` tokens.

/// Kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Null,
    EndOfFile,
    Symbol,
    Identifier,
    Text,
}

/// A token with its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn null() -> Self {
        Self::new(TokenKind::Null, "")
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::EndOfFile, "")
    }

    pub fn symbol(text: &str) -> Self {
        Self::new(TokenKind::Symbol, text)
    }

    pub fn identifier(text: &str) -> Self {
        Self::new(TokenKind::Identifier, text)
    }

    pub fn text(text: &str) -> Self {
        Self::new(TokenKind::Text, text)
    }

    fn new(kind: TokenKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }

    /// True for a symbol token spelled exactly `sym`.
    pub fn is_symbol(&self, sym: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == sym
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }
}

pub const START_SYMBOL: &str = "/*:";
pub const END_SYMBOL: &str = "*/";

/// Characters that may follow `operator` in an operator function name.
const OPERATOR_SYMBOLS: &str = "+-*/%^&|~!=<>[]";

/// Comment margin characters skipped at the start of an attribute line.
const MARGIN: &[char] = &[' ', '\t', '\x0c', '\x0b', '*', '/'];

fn is_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '~'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextState {
    LeadingWhitespace,
    CheckingForKeyword,
    Copying,
    Finished,
}

/// Token stream over one source text with a single pushback slot.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    pending: Option<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            pending: None,
        }
    }

    /// 1-based line of the cursor.
    pub fn line(&self) -> usize {
        self.line
    }

    fn peek_char(&self) -> Option<char> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn at_end_symbol(&self) -> bool {
        self.peek_char() == Some('*') && self.peek_nth(1) == Some('/')
    }

    /// Skips to just past the next `/*:`. Clears the pushback slot, since
    /// this is also how the parser bails out of a broken block.
    pub fn get_start_symbol(&mut self) -> Token {
        self.pending = None;
        while let Some(c) = self.bump() {
            if c == '/' && self.peek_char() == Some('*') && self.peek_nth(1) == Some(':') {
                self.bump();
                self.bump();
                return Token::symbol(START_SYMBOL);
            }
        }
        Token::eof()
    }

    /// Next token, taken from the pushback slot when one is pending.
    pub fn get_token(&mut self) -> Token {
        match self.pending.take() {
            Some(tok) => tok,
            None => self.scan_token(),
        }
    }

    /// Next token without consuming it.
    pub fn peek_token(&mut self) -> Token {
        if self.pending.is_none() {
            let tok = self.scan_token();
            self.pending = Some(tok);
        }
        self.pending.clone().unwrap_or_else(Token::eof)
    }

    fn scan_token(&mut self) -> Token {
        let mut in_leading_whitespace = false;
        let first = loop {
            let Some(c) = self.bump() else {
                return Token::eof();
            };
            match c {
                ' ' | '\t' | '\x0c' | '\x0b' => {}
                '\n' | '\r' => in_leading_whitespace = true,
                // margin stars are decoration, but `*/` always terminates
                '*' if in_leading_whitespace && self.peek_char() != Some('/') => {}
                '/' if in_leading_whitespace => {}
                _ => break c,
            }
        };

        let mut text = String::from(first);
        if is_identifier_start(first) {
            self.take_while_into(&mut text, is_identifier_char);
            if text == "operator" {
                self.scan_operator_name(&mut text);
            }
            return Token::identifier(&text);
        }

        let merges = matches!(
            (first, self.peek_char()),
            ('*', Some('/')) | (':', Some(':')) | ('(', Some(')'))
        );
        if merges {
            if let Some(c) = self.bump() {
                text.push(c);
            }
        }
        Token::symbol(&text)
    }

    fn take_while_into(&mut self, out: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek_char().filter(|&c| pred(c)) {
            out.push(c);
            self.bump();
        }
    }

    /// Extends `operator` to `operator==`, `operator()`, `operator char*()`
    /// and friends.
    fn scan_operator_name(&mut self, text: &mut String) {
        if self.peek_char() == Some('(') {
            if let Some(c) = self.bump() {
                text.push(c);
            }
            self.take_while_into(text, |c| is_identifier_char(c) || c == '*' || c == '&');
            if self.peek_char() == Some(')') {
                self.bump();
                text.push(')');
            }
        } else {
            self.take_while_into(text, |c| OPERATOR_SYMBOLS.contains(c));
        }
    }

    /// Raw declaration text up to `;`, `{`, a lone `:` or end of input.
    /// None of the terminators is consumed; `::` is kept as text. The start
    /// of the next documentation block also ends the scan so that block
    /// survives.
    pub fn get_prototype(&mut self) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            match c {
                ';' | '{' => break,
                '/' if self.peek_nth(1) == Some('*') && self.peek_nth(2) == Some(':') => break,
                ':' if self.peek_nth(1) == Some(':') => {
                    self.bump();
                    self.bump();
                    text.push_str("::");
                }
                ':' => break,
                _ => {
                    self.bump();
                    text.push(c);
                }
            }
        }
        if text.is_empty() {
            Token::null()
        } else {
            Token::text(&text)
        }
    }

    /// Free text forming one attribute value.
    ///
    /// Stops right before the next `Keyword:` label, at `*/`, or at end of
    /// input. A label found while scanning is left in the pushback slot as an
    /// identifier with its colon still unread; `*/` is consumed and left
    /// pending as a symbol; end of input is left pending as `EndOfFile`.
    /// Qualified names like `Foo::Bar` at the start of a line are prose, not
    /// labels.
    pub fn get_attribute_text(&mut self) -> Token {
        let mut out = String::new();
        let mut state = TextState::LeadingWhitespace;

        if let Some(tok) = self.pending.take() {
            match tok.kind {
                TokenKind::EndOfFile => {
                    self.pending = Some(tok.clone());
                    return tok;
                }
                TokenKind::Symbol if tok.text == END_SYMBOL => {
                    self.pending = Some(tok);
                    return Token::null();
                }
                TokenKind::Symbol if tok.text == "*" || tok.text == "/" => {}
                TokenKind::Identifier if self.peek_char() == Some(':') => {
                    if self.peek_nth(1) != Some(':') {
                        // already the next label
                        self.pending = Some(tok);
                        return Token::null();
                    }
                    self.bump();
                    self.bump();
                    out.push_str(&tok.text);
                    out.push_str("::");
                    state = TextState::Copying;
                }
                _ => {
                    out.push_str(&tok.text);
                    state = TextState::Copying;
                }
            }
        }

        let mut word = String::new();
        while state != TextState::Finished {
            if self.at_end_symbol() || self.peek_char().is_none() {
                out.push_str(&word);
                word.clear();
                let terminator = if self.at_end_symbol() {
                    self.bump();
                    self.bump();
                    Token::symbol(END_SYMBOL)
                } else {
                    Token::eof()
                };
                self.pending = Some(terminator);
                state = TextState::Finished;
                continue;
            }
            let Some(c) = self.bump() else {
                break;
            };

            match state {
                TextState::Copying => {
                    out.push(c);
                    if is_newline(c) {
                        state = TextState::LeadingWhitespace;
                    }
                }
                TextState::LeadingWhitespace => {
                    if MARGIN.contains(&c) {
                        continue;
                    }
                    if is_newline(c) {
                        out.push(c);
                        continue;
                    }
                    if is_identifier_start(c) {
                        word.push(c);
                        state = self.after_word_char(&mut word, &mut out);
                    } else {
                        out.push(c);
                        state = TextState::Copying;
                    }
                }
                TextState::CheckingForKeyword => {
                    word.push(c);
                    state = self.after_word_char(&mut word, &mut out);
                }
                TextState::Finished => {}
            }
        }

        Token::text(&out)
    }

    /// Decides what a buffered line-leading word turns into once its latest
    /// character has been consumed.
    fn after_word_char(&mut self, word: &mut String, out: &mut String) -> TextState {
        match self.peek_char() {
            Some(c) if is_identifier_char(c) => TextState::CheckingForKeyword,
            Some(':') if self.peek_nth(1) == Some(':') => {
                self.bump();
                self.bump();
                out.push_str(word);
                out.push_str("::");
                word.clear();
                TextState::Copying
            }
            Some(':') => {
                self.pending = Some(Token::identifier(word));
                word.clear();
                TextState::Finished
            }
            _ => {
                out.push_str(word);
                word.clear();
                TextState::Copying
            }
        }
    }
}
