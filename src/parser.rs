use thiserror::Error;

use crate::ast::Regexp;
use crate::symbol::Symbol;
use crate::token::{Token, TokenKind};

/// Everything that can go wrong while compiling a pattern. Parsing is
/// all-or-nothing: the first violation aborts with its cause and no
/// partial expression is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected symbols but found none")]
    ExpectedSymbols,
    #[error("unclosed group")]
    UnclosedGroup,
    #[error("unclosed character class")]
    UnclosedClass,
    #[error("empty character class")]
    EmptyClass,
    #[error("no character after a backslash")]
    DanglingBackslash,
    #[error("invalid character after a backslash: \\{0}")]
    InvalidEscape(char),
    #[error("quantifiers cannot be stacked")]
    StackedModifiers,
    #[error("incomplete range in character class")]
    IncompleteRange,
    #[error("character range is not ascending: {0}-{1}")]
    DescendingRange(char, char),
    #[error("unexpected token: {0}")]
    UnexpectedToken(char),
    #[error("tokens left over after parse")]
    LeftoverTokens,
}

/// Parse a token sequence into an expression tree.
///
/// Grammar, by descending precedence:
///
/// ```text
/// expression    := or | ε                    (ε for an empty pattern or group)
/// or            := concatenation ('|' concatenation)*
/// concatenation := unit+
/// unit          := atom ('*' | '+' | '?')?
/// atom          := CHAR | '.' | '(' expression ')' | '\' escaped | '[' class ']'
/// ```
pub fn parse(tokens: &[Token]) -> Result<Regexp, ParseError> {
    Parser::new(tokens).parse()
}

/// Recursive-descent parser over the token slice. The cursor is a plain
/// index with one token of lookahead; each `parse` call owns its own
/// parser, so nothing survives between invocations.
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse(mut self) -> Result<Regexp, ParseError> {
        let expression = self.parse_expression()?;
        if self.peek().is_some() {
            return Err(ParseError::LeftoverTokens);
        }
        Ok(expression)
    }

    /// Peek at the next token without advancing.
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Advance the cursor by one token and return it.
    fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    /// Advance past the next token if it has the expected kind.
    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Entry point. Empty input is the empty expression; so is an empty
    /// group body, which is why `)` is allowed to follow immediately.
    fn parse_expression(&mut self) -> Result<Regexp, ParseError> {
        match self.peek_kind() {
            None | Some(TokenKind::RightParen) => Ok(Regexp::empty()),
            Some(_) => self.parse_or(),
        }
    }

    /// Parse alternation, folding to the left.
    ///
    /// Example: `a|b|c` → `Or(Or(a, b), c)`
    fn parse_or(&mut self) -> Result<Regexp, ParseError> {
        let mut expression = self.parse_concatenation()?;
        while self.expect(TokenKind::Or) {
            let right = self.parse_concatenation()?;
            expression = Regexp::Or(Box::new(expression), Box::new(right));
        }
        Ok(expression)
    }

    /// Parse one or more units in sequence. A single unit stays bare, so
    /// `a` parses to a matcher and not a one-element concatenation.
    fn parse_concatenation(&mut self) -> Result<Regexp, ParseError> {
        let mut subexpressions = Vec::new();
        while self.next_starts_unit() {
            subexpressions.push(self.parse_unit()?);
        }
        if subexpressions.is_empty() {
            return Err(ParseError::ExpectedSymbols);
        }
        if subexpressions.len() == 1 {
            return Ok(subexpressions.pop().unwrap());
        }
        Ok(Regexp::Concatenation(subexpressions))
    }

    fn next_starts_unit(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(
                TokenKind::Character
                    | TokenKind::Dot
                    | TokenKind::LeftParen
                    | TokenKind::Backslash
                    | TokenKind::LeftBracket
            )
        )
    }

    fn parse_unit(&mut self) -> Result<Regexp, ParseError> {
        let atom = self.parse_atom()?;
        self.apply_modifier(atom)
    }

    /// Wrap `atom` in the quantifier that follows it, if any. At most one
    /// quantifier may apply to a unit; `a**` and friends are rejected.
    fn apply_modifier(&mut self, atom: Regexp) -> Result<Regexp, ParseError> {
        let modified = match self.peek_kind() {
            Some(TokenKind::Star) => Regexp::ZeroOrMoreTimes(Box::new(atom)),
            Some(TokenKind::Plus) => Regexp::OneOrMoreTimes(Box::new(atom)),
            Some(TokenKind::Question) => Regexp::ZeroOrOneTime(Box::new(atom)),
            _ => return Ok(atom),
        };
        self.advance();
        if matches!(
            self.peek_kind(),
            Some(TokenKind::Star | TokenKind::Plus | TokenKind::Question)
        ) {
            return Err(ParseError::StackedModifiers);
        }
        Ok(modified)
    }

    fn parse_atom(&mut self) -> Result<Regexp, ParseError> {
        let token = match self.advance() {
            Some(token) => token,
            None => return Err(ParseError::ExpectedSymbols),
        };
        match token.kind {
            TokenKind::Character => Ok(Regexp::CharMatcher(Symbol::RawCharacter(token.raw))),
            TokenKind::Dot => Ok(Regexp::CharMatcher(Symbol::Dot)),
            TokenKind::LeftParen => self.parse_group(),
            TokenKind::Backslash => self.parse_escape(),
            TokenKind::LeftBracket => self.parse_class(),
            _ => Err(ParseError::UnexpectedToken(token.raw)),
        }
    }

    /// Parse a group body after its `(`. The group node survives into the
    /// tree but only ever mattered for precedence.
    fn parse_group(&mut self) -> Result<Regexp, ParseError> {
        let subexpression = self.parse_expression()?;
        if !self.expect(TokenKind::RightParen) {
            return Err(ParseError::UnclosedGroup);
        }
        Ok(Regexp::Group(Box::new(subexpression)))
    }

    /// Parse what follows a backslash outside a class: an escaped special
    /// turns back into a literal, a class letter becomes its predefined
    /// symbol, anything else is an error.
    ///
    /// Example: `\(` → literal `(`; `\d` → digit class; `\a` → error
    fn parse_escape(&mut self) -> Result<Regexp, ParseError> {
        let token = self.advance().ok_or(ParseError::DanglingBackslash)?;
        if token.kind != TokenKind::Character {
            return Ok(Regexp::CharMatcher(Symbol::RawCharacter(token.raw)));
        }
        predefined_class(token.raw)
            .map(Regexp::CharMatcher)
            .ok_or(ParseError::InvalidEscape(token.raw))
    }

    /// Parse a character class body after its `[`.
    ///
    /// Examples:
    /// - `[abc]` → any of `a`, `b`, `c`
    /// - `[^abc]` → anything but `a`, `b`, `c`
    /// - `[a0-9b]` → any of `a`, `b`, `0`..`9`
    fn parse_class(&mut self) -> Result<Regexp, ParseError> {
        let negated = match self.peek() {
            Some(token) if token.kind == TokenKind::Character && token.raw == '^' => {
                self.advance();
                true
            }
            _ => false,
        };
        let mut characters: Vec<char> = Vec::new();
        // Last plain character literal, still usable as a range lower bound.
        let mut range_start: Option<char> = None;
        loop {
            let token = self.peek().ok_or(ParseError::UnclosedClass)?;
            match token.kind {
                TokenKind::RightBracket => {
                    self.advance();
                    break;
                }
                TokenKind::Backslash => {
                    self.advance();
                    characters.push(self.parse_class_escape()?);
                    range_start = None;
                }
                TokenKind::Character if token.raw == '-' => {
                    self.advance();
                    // A hyphen is only valid as the middle of a range with
                    // both bounds present as plain characters.
                    let start = range_start.take().ok_or(ParseError::IncompleteRange)?;
                    let bound = self.peek().ok_or(ParseError::UnclosedClass)?;
                    if bound.kind != TokenKind::Character || bound.raw == '-' {
                        return Err(ParseError::IncompleteRange);
                    }
                    self.advance();
                    if bound.raw < start {
                        return Err(ParseError::DescendingRange(start, bound.raw));
                    }
                    characters.pop();
                    characters.extend(start..=bound.raw);
                }
                _ => {
                    // Any other token, special or not, is taken literally.
                    self.advance();
                    characters.push(token.raw);
                    range_start = (token.kind == TokenKind::Character).then_some(token.raw);
                }
            }
        }
        if characters.is_empty() {
            return Err(ParseError::EmptyClass);
        }
        let symbol = if negated {
            Symbol::none_of(characters)
        } else {
            Symbol::any_of(characters)
        };
        Ok(Regexp::CharMatcher(symbol))
    }

    /// Escapes inside a class only ever produce a literal character; class
    /// letters like `d` have no meaning there.
    fn parse_class_escape(&mut self) -> Result<char, ParseError> {
        let token = self.advance().ok_or(ParseError::DanglingBackslash)?;
        if token.kind != TokenKind::Character || token.raw == '^' || token.raw == '-' {
            Ok(token.raw)
        } else {
            Err(ParseError::InvalidEscape(token.raw))
        }
    }
}

/// The class letters recognized after a backslash.
fn predefined_class(letter: char) -> Option<Symbol> {
    const WHITESPACE: &str = " \t\r\n\x0B\x0C";
    const DIGITS: &str = "0123456789";
    const OCTAL: &str = "01234567";
    let word = || {
        ('a'..='z')
            .chain('A'..='Z')
            .chain('0'..='9')
            .chain(std::iter::once('_'))
    };
    let hex = || ('0'..='9').chain('a'..='f').chain('A'..='F');
    Some(match letter {
        's' => Symbol::any_of(WHITESPACE.chars()),
        'S' => Symbol::none_of(WHITESPACE.chars()),
        'd' => Symbol::any_of(DIGITS.chars()),
        'D' => Symbol::none_of(DIGITS.chars()),
        'w' => Symbol::any_of(word()),
        'W' => Symbol::none_of(word()),
        'x' => Symbol::any_of(hex()),
        'O' => Symbol::any_of(OCTAL.chars()),
        'n' => Symbol::RawCharacter('\n'),
        'r' => Symbol::RawCharacter('\r'),
        't' => Symbol::RawCharacter('\t'),
        'v' => Symbol::RawCharacter('\x0B'),
        'f' => Symbol::RawCharacter('\x0C'),
        _ => return None,
    })
}
