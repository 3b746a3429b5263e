//! Sable language keywords.
//!
//! Reserved words cannot be used as identifiers. `true` and `false` live in
//! the same table but lex as boolean literals.

use crate::token::TokenKind;

/// All Sable keywords.
///
/// `for` is reserved with no statement form. `print` and `input` are NOT
/// keywords; they are ordinary names bound to builtin functions.
pub const KEYWORDS: &[&str] = &[
    "let", "if", "then", "else", "end", "while", "do", "for", "function",
    "return", "int", "float", "bool", "string", "void", "true", "false",
];

/// Number of keywords.
pub const KEYWORD_COUNT: usize = KEYWORDS.len();

/// Resolves an identifier-shaped word to its keyword token, if it is one.
///
/// ```
/// use sable_syntax::keywords::keyword;
/// use sable_syntax::token::TokenKind;
///
/// assert_eq!(keyword("while"), Some(TokenKind::While));
/// assert_eq!(keyword("true"), Some(TokenKind::BoolLiteral(true)));
/// assert_eq!(keyword("print"), None);
/// ```
#[must_use]
pub fn keyword(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "let" => TokenKind::Let,
        "if" => TokenKind::If,
        "then" => TokenKind::Then,
        "else" => TokenKind::Else,
        "end" => TokenKind::End,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "return" => TokenKind::Return,
        "int" => TokenKind::IntType,
        "float" => TokenKind::FloatType,
        "bool" => TokenKind::BoolType,
        "string" => TokenKind::StringType,
        "void" => TokenKind::VoidType,
        "true" => TokenKind::BoolLiteral(true),
        "false" => TokenKind::BoolLiteral(false),
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_count() {
        assert_eq!(KEYWORD_COUNT, 17);
    }

    #[test]
    fn test_every_keyword_resolves() {
        for word in KEYWORDS {
            assert!(keyword(word).is_some(), "'{word}' should be a keyword");
        }
    }

    #[test]
    fn test_builtin_names_are_not_keywords() {
        assert_eq!(keyword("print"), None);
        assert_eq!(keyword("input"), None);
        assert_eq!(keyword("null"), None);
    }

    #[test]
    fn test_no_duplicates() {
        let unique_keywords: std::collections::HashSet<_> =
            KEYWORDS.iter().collect();
        assert_eq!(unique_keywords.len(), KEYWORDS.len());
    }
}
