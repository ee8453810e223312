// tests/lexer_tests.rs

use crossweb_filter::ast::Token;
use crossweb_filter::lexer::Lexer;
use crossweb_filter::parser::ParseError;

fn tokens(input: &str) -> Vec<Token> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|s| s.token)
        .collect()
}

// ============================================================================
// Operators and Delimiters
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("=", Token::Eq),
        ("<", Token::Lt),
        (">", Token::Gt),
        ("(", Token::LParen),
        (")", Token::RParen),
        (",", Token::Comma),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap().token;
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
    }
}

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![("!=", Token::NotEq), ("<=", Token::LtEq), (">=", Token::GtEq)];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap().token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
    }
}

#[test]
fn test_operators_without_spaces() {
    assert_eq!(
        tokens("age>=20"),
        vec![
            Token::Identifier("age".into()),
            Token::GtEq,
            Token::Integer(20),
            Token::Eof
        ]
    );
}

#[test]
fn test_unknown_operators() {
    for (input, found, position) in [
        ("sex == 1", "==", 4),
        ("sex <> 1", "<>", 4),
        ("sex ! 1", "!", 4),
    ] {
        let err = Lexer::new(input).tokenize().unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownOperator {
                found: found.to_string(),
                position
            },
            "Failed for input: {}",
            input
        );
    }
}

// ============================================================================
// Keywords and Identifiers
// ============================================================================

#[test]
fn test_keywords_are_uppercase_only() {
    assert_eq!(
        tokens("AND OR IN and or in"),
        vec![
            Token::And,
            Token::Or,
            Token::In,
            Token::Identifier("and".into()),
            Token::Identifier("or".into()),
            Token::Identifier("in".into()),
            Token::Eof
        ]
    );
}

#[test]
fn test_identifier_with_digits() {
    assert_eq!(
        tokens("region2 ANDROID"),
        vec![
            Token::Identifier("region2".into()),
            Token::Identifier("ANDROID".into()),
            Token::Eof
        ]
    );
}

#[test]
fn test_underscore_is_not_an_identifier_character() {
    let err = Lexer::new("age_group = 1").tokenize().unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedCharacter {
            found: '_',
            position: 3
        }
    );
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_integers() {
    assert_eq!(
        tokens("0 1067 -3"),
        vec![
            Token::Integer(0),
            Token::Integer(1067),
            Token::Integer(-3),
            Token::Eof
        ]
    );
}

#[test]
fn test_lone_minus_is_rejected() {
    let err = Lexer::new("age > - 3").tokenize().unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnexpectedCharacter {
            found: '-',
            position: 6
        }
    ));
}

#[test]
fn test_integer_overflow() {
    let err = Lexer::new("id = 99999999999999999999").tokenize().unwrap_err();
    assert_eq!(
        err,
        ParseError::IntegerOverflow {
            found: "99999999999999999999".to_string(),
            position: 5
        }
    );
}

#[test]
fn test_strings_with_both_quotes() {
    assert_eq!(
        tokens(r#"'Moscow' "Saint Petersburg""#),
        vec![
            Token::String("Moscow".into()),
            Token::String("Saint Petersburg".into()),
            Token::Eof
        ]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        tokens(r#"'O\'Hara' "say \"hi\"" 'a\\b'"#),
        vec![
            Token::String("O'Hara".into()),
            Token::String("say \"hi\"".into()),
            Token::String("a\\b".into()),
            Token::Eof
        ]
    );
}

#[test]
fn test_other_quote_needs_no_escape() {
    assert_eq!(
        tokens(r#""O'Hara""#),
        vec![Token::String("O'Hara".into()), Token::Eof]
    );
}

#[test]
fn test_invalid_escape() {
    let err = Lexer::new(r"city = 'a\nb'").tokenize().unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidEscape {
            found: 'n',
            position: 9
        }
    );
}

#[test]
fn test_unterminated_string() {
    let err = Lexer::new("city = 'Mosc").tokenize().unwrap_err();
    assert_eq!(
        err,
        ParseError::UnterminatedString {
            fragment: "'Mosc".to_string(),
            position: 7
        }
    );
    assert_eq!(err.fragment(), "'Mosc");
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_token_positions() {
    let spanned = Lexer::new("  sex = 1").tokenize().unwrap();
    let positions: Vec<usize> = spanned.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![2, 6, 8, 9]);
}

#[test]
fn test_positions_count_characters_not_bytes() {
    let err = Lexer::new("city = 'Пермь' #").tokenize().unwrap_err();
    assert_eq!(err.position(), 15);
}

#[test]
fn test_whitespace_variants() {
    assert_eq!(
        tokens("sex\t=\n1"),
        vec![Token::Identifier("sex".into()), Token::Eq, Token::Integer(1), Token::Eof]
    );
}
