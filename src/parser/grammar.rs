//! Recursive-descent grammar for documentation comment blocks.
//!
//! ```text
//! DocItem          := StartSymbol Starter AttributeList EndSymbol [Prototype]
//! Starter          := [TypeKeyword] [":"] QualifiedName ["#" LinkName]
//! QualifiedName    := Name | "::" Name | Class "::" Name     (functions: optional "()")
//! AttributeList    := [ImpliedAttribute] KeywordAttribute*
//! KeywordAttribute := Identifier ":" AttributeText
//! ```
//!
//! Each rule hands the [`ItemRef`] it resolved to the next one instead of
//! keeping a "current item" in the parser.

use crate::error::SyntaxError;
use crate::model::{DocumentModel, ItemRef, GLOBAL_CLASS};
use crate::parser::lexer::{Lexer, Token, TokenKind, END_SYMBOL};

/// What a starter's type keyword selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StarterKind {
    Project,
    Class,
    Function,
    Variable,
}

const TYPE_KEYWORDS: &[(&str, StarterKind)] = &[
    ("Project", StarterKind::Project),
    ("Class", StarterKind::Class),
    ("Variable", StarterKind::Variable),
    ("Function", StarterKind::Function),
    ("Member", StarterKind::Function),
    ("Routine", StarterKind::Function),
];

impl StarterKind {
    fn from_keyword(word: &str) -> Option<Self> {
        TYPE_KEYWORDS
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(word))
            .map(|&(_, kind)| kind)
    }
}

/// Parses every comment block of one source into a shared model.
pub struct CommentBlockParser<'m> {
    lexer: Lexer,
    model: &'m mut DocumentModel,
    diagnostics: Vec<SyntaxError>,
}

impl<'m> CommentBlockParser<'m> {
    pub fn new(source: &str, model: &'m mut DocumentModel) -> Self {
        Self {
            lexer: Lexer::new(source),
            model,
            diagnostics: Vec::new(),
        }
    }

    /// Parses to the end of the source and returns the syntax errors met on
    /// the way. A broken block is skipped; the next one is parsed normally.
    pub fn run(mut self) -> Vec<SyntaxError> {
        while !self.lexer.get_start_symbol().is_eof() {
            self.doc_item();
        }
        self.diagnostics
    }

    fn doc_item(&mut self) {
        let line = self.lexer.line();
        let item = match self.starter() {
            Ok(item) => item,
            Err(err) => {
                self.report(err);
                return;
            }
        };
        tracing::trace!(line, ?item, "doc item");

        let terminator = match self
            .attribute_list(&item)
            .and_then(|()| self.end_symbol())
        {
            Ok(tok) => tok,
            Err(err) => {
                self.report(err);
                self.skip_to_end_symbol()
            }
        };

        let needs_prototype = self
            .model
            .item(&item)
            .is_some_and(|doc| doc.needs_prototype());
        if !terminator.is_eof() && needs_prototype {
            let proto = self.lexer.get_prototype();
            let text = proto.text.trim();
            let target = self.model.item_mut(&item);
            if proto.kind == TokenKind::Text && !text.is_empty() {
                target.set_prototype(text);
            } else {
                target.set_default_prototype();
            }
        }
    }

    fn starter(&mut self) -> Result<ItemRef, SyntaxError> {
        let item = self.item_type_and_name()?;
        self.link_name(&item);
        Ok(item)
    }

    fn item_type_and_name(&mut self) -> Result<ItemRef, SyntaxError> {
        let mut kind = StarterKind::Function;

        let tok = self.lexer.peek_token();
        if tok.kind == TokenKind::Identifier {
            if let Some(found) = StarterKind::from_keyword(&tok.text) {
                kind = found;
                self.lexer.get_token();
                if self.lexer.peek_token().is_symbol(":") {
                    self.lexer.get_token();
                }
            }
        }

        match kind {
            StarterKind::Project => {
                let name = self.identifier("ProjectName")?;
                Ok(self.model.set_project_name(&name))
            }
            StarterKind::Class => {
                let name = self.identifier("ClassName")?;
                Ok(self.model.get_class(&name))
            }
            StarterKind::Function => {
                let (class, name) = self.member_name()?;
                if self.lexer.peek_token().is_symbol("()") {
                    self.lexer.get_token();
                }
                Ok(self.model.get_function(&class, &name))
            }
            StarterKind::Variable => {
                let (class, name) = self.member_name()?;
                Ok(self.model.get_variable(&class, &name))
            }
        }
    }

    /// `Name`, `::Name` or `Class::Name`, as (class, member).
    fn member_name(&mut self) -> Result<(String, String), SyntaxError> {
        let tok = self.lexer.get_token();
        if tok.is_symbol("::") {
            let name = self.identifier("MemberName")?;
            return Ok((GLOBAL_CLASS.to_string(), name));
        }
        if tok.kind != TokenKind::Identifier {
            return Err(self.error("MemberName", &tok));
        }
        if self.lexer.peek_token().is_symbol("::") {
            self.lexer.get_token();
            let name = self.identifier("MemberName")?;
            return Ok((tok.text, name));
        }
        Ok((GLOBAL_CLASS.to_string(), tok.text))
    }

    /// An optional `#link`. Without one the item's link name is reset to
    /// its own name; a `#` not followed by an identifier is reported and
    /// otherwise ignored.
    fn link_name(&mut self, item: &ItemRef) {
        if self.lexer.peek_token().is_symbol("#") {
            self.lexer.get_token();
            let tok = self.lexer.peek_token();
            if tok.kind == TokenKind::Identifier {
                self.lexer.get_token();
                self.model.item_mut(item).set_link_name(tok.text);
                return;
            }
            let err = self.error("LinkName", &tok);
            self.report(err);
        }
        self.model.item_mut(item).set_default_link_name();
    }

    fn attribute_list(&mut self, item: &ItemRef) -> Result<(), SyntaxError> {
        self.implied_attribute(item);
        while self.keyword_attribute(item)? {}
        Ok(())
    }

    fn implied_attribute(&mut self, item: &ItemRef) {
        let tok = self.lexer.get_attribute_text();
        let target = self.model.item_mut(item);
        if tok.kind == TokenKind::Text {
            target.set_implied_description(tok.text.trim());
        } else {
            target.set_default_implied_description();
        }
    }

    /// One `Keyword: text` pair. Returns false when no keyword follows.
    fn keyword_attribute(&mut self, item: &ItemRef) -> Result<bool, SyntaxError> {
        let keyword = self.lexer.peek_token();
        if keyword.kind != TokenKind::Identifier {
            return Ok(false);
        }
        self.lexer.get_token();

        let colon = self.lexer.peek_token();
        if !colon.is_symbol(":") {
            return Err(self.error("Colon", &colon));
        }
        self.lexer.get_token();

        let text = self.lexer.get_attribute_text();
        self.model
            .item_mut(item)
            .add_attribute(keyword.text, text.text.trim());
        Ok(true)
    }

    fn end_symbol(&mut self) -> Result<Token, SyntaxError> {
        let tok = self.lexer.get_token();
        if tok.is_symbol(END_SYMBOL) {
            Ok(tok)
        } else {
            Err(self.error("EndSymbol", &tok))
        }
    }

    /// Resynchronizes after a syntax error: drops tokens up to and including
    /// the next `*/`, or to the end of input.
    ///
    /// The attribute scanner stops only at `*/`, end of input or `Keyword:`,
    /// so a failed `end_symbol` normally lands here at end of input. The loop
    /// still handles any other token stream.
    fn skip_to_end_symbol(&mut self) -> Token {
        loop {
            let tok = self.lexer.get_token();
            if tok.is_eof() || tok.is_symbol(END_SYMBOL) {
                return tok;
            }
        }
    }

    fn identifier(&mut self, expected: &'static str) -> Result<String, SyntaxError> {
        let tok = self.lexer.get_token();
        if tok.kind == TokenKind::Identifier {
            Ok(tok.text)
        } else {
            Err(self.error(expected, &tok))
        }
    }

    fn error(&self, expected: &'static str, found: &Token) -> SyntaxError {
        let found = match found.kind {
            TokenKind::EndOfFile => "end of file".to_string(),
            _ => found.text.clone(),
        };
        SyntaxError {
            expected,
            found,
            line: self.lexer.line(),
        }
    }

    fn report(&mut self, err: SyntaxError) {
        tracing::debug!(%err, "syntax error");
        self.diagnostics.push(err);
    }
}
