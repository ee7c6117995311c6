/// The kinds of tokens a pattern string breaks down into.
///
/// Every character of a pattern is exactly one token: either one of the
/// special syntax characters below, or a plain character literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Character,
    LeftParen,
    RightParen,
    Star,
    Plus,
    Question,
    Or,
    Dot,
    LeftBracket,
    RightBracket,
    Backslash,
}

/// A single pattern character, classified. `raw` always holds the original
/// character, so escaped specials can fall back to their literal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub raw: char,
}

impl Token {
    pub fn new(kind: TokenKind, raw: char) -> Self {
        Self { kind, raw }
    }

    fn classify(raw: char) -> Self {
        let kind = match raw {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '*' => TokenKind::Star,
            '+' => TokenKind::Plus,
            '?' => TokenKind::Question,
            '|' => TokenKind::Or,
            '.' => TokenKind::Dot,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '\\' => TokenKind::Backslash,
            _ => TokenKind::Character,
        };
        Self { kind, raw }
    }
}

/// Turn a pattern string into its token sequence. Total: every character
/// maps to a token, so this never fails. An empty pattern yields no tokens.
pub fn tokenize(pattern: &str) -> Vec<Token> {
    pattern.chars().map(Token::classify).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(raw: char) -> Token {
        Token::new(TokenKind::Character, raw)
    }

    #[test]
    fn tokenize_empty_string() {
        assert_eq!(Vec::<Token>::new(), tokenize(""));
    }

    #[test]
    fn tokenize_mix_of_specials_and_characters() {
        assert_eq!(
            vec![
                character('a'),
                character('h'),
                Token::new(TokenKind::LeftParen, '('),
                Token::new(TokenKind::RightParen, ')'),
                Token::new(TokenKind::Star, '*'),
                character('e'),
            ],
            tokenize("ah()*e")
        );
    }

    #[test]
    fn tokenize_does_not_interpret_escapes() {
        // Escape handling belongs to the parser; the backslash is just
        // another token here.
        assert_eq!(
            vec![
                Token::new(TokenKind::Backslash, '\\'),
                Token::new(TokenKind::LeftParen, '('),
                Token::new(TokenKind::Backslash, '\\'),
                character('d'),
            ],
            tokenize("\\(\\d")
        );
    }

    #[test]
    fn tokenize_repeated_special() {
        assert_eq!(
            vec![
                Token::new(TokenKind::LeftParen, '('),
                Token::new(TokenKind::LeftParen, '('),
                Token::new(TokenKind::LeftParen, '('),
            ],
            tokenize("(((")
        );
    }

    #[test]
    fn tokenize_all_special_kinds() {
        let kinds: Vec<TokenKind> = tokenize("()*+?|.[]\\")
            .into_iter()
            .map(|token| token.kind)
            .collect();
        assert_eq!(
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Star,
                TokenKind::Plus,
                TokenKind::Question,
                TokenKind::Or,
                TokenKind::Dot,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Backslash,
            ],
            kinds
        );
    }
}
