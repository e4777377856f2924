use fissure::lexer::{LexErrorKind, Payload, Token, TokenKind};
use num_bigint::BigInt;

fn kinds(input: &str) -> Vec<TokenKind> {
    Token::lex(input)
        .expect("lexing failed")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn single(input: &str) -> Token {
    let mut tokens = Token::lex(input).expect("lexing failed");
    assert_eq!(tokens.len(), 2, "expected one token before end of input");
    tokens.remove(0)
}

#[test]
fn lex_keywords_and_identifiers() {
    use TokenKind::*;
    assert_eq!(
        kinds("struct let do if else for in while and or xor new name"),
        vec![
            Struct, Let, Do, If, Else, For, In, While, And, Or, Xor, New, Identifier, EndOfInput
        ]
    );
}

#[test]
fn keyword_prefixes_are_identifiers() {
    let token = single("double");
    assert_eq!(token.kind, TokenKind::Identifier);
    assert_eq!(token.payload, Payload::String("double".into()));
}

#[test]
fn lex_punctuation() {
    use TokenKind::*;
    assert_eq!(
        kinds(": :: ( ) [ ] { } = == != > >= < <= ! + - / // * . .. , _"),
        vec![
            Colon,
            DoubleColon,
            LParen,
            RParen,
            LBracket,
            RBracket,
            LBrace,
            RBrace,
            Assign,
            Equal,
            NotEqual,
            GreaterThan,
            GreaterThanOrEqual,
            LessThan,
            LessThanOrEqual,
            Not,
            Plus,
            Minus,
            Slash,
            DoubleSlash,
            Star,
            Period,
            DoublePeriod,
            Comma,
            Ignore,
            EndOfInput,
        ]
    );
}

#[test]
fn newlines_are_tokens() {
    use TokenKind::*;
    assert_eq!(
        kinds("a\n\n  b\n"),
        vec![Identifier, EndOfLine, EndOfLine, Identifier, EndOfLine, EndOfInput]
    );
}

#[test]
fn lex_numbers() {
    assert_eq!(single("42").payload, Payload::Int(BigInt::from(42)));
    assert_eq!(single("0xff").payload, Payload::Int(BigInt::from(255)));
    assert_eq!(single("0b101").payload, Payload::Int(BigInt::from(5)));
    assert_eq!(single("1.5").payload, Payload::Float(1.5));
    assert_eq!(single("2e3").payload, Payload::Float(2000.0));

    let huge = single("123456789012345678901234567890");
    let Payload::Int(value) = huge.payload else {
        panic!("expected integer payload");
    };
    assert_eq!(value.to_string(), "123456789012345678901234567890");
}

#[test]
fn range_dots_are_not_part_of_numbers() {
    use TokenKind::*;
    assert_eq!(kinds("1..3"), vec![Int, DoublePeriod, Int, EndOfInput]);
    assert_eq!(kinds("x.y"), vec![Identifier, Period, Identifier, EndOfInput]);
}

#[test]
fn lex_strings_and_chars() {
    assert_eq!(
        single(r#""a \"quoted\"\tline\n""#).payload,
        Payload::String("a \"quoted\"\tline\n".into())
    );
    assert_eq!(single(r"'\n'").payload, Payload::Char('\n'));
    assert_eq!(single("'ß'").payload, Payload::Char('ß'));
    assert_eq!(single("true").payload, Payload::Bool(true));
    assert_eq!(single("false").payload, Payload::Bool(false));
}

#[test]
fn locations_are_one_based() {
    let tokens = Token::lex_file("demo.fs", "struct Foo:\n  x").expect("lexing failed");
    let x = &tokens[4];
    assert_eq!(x.kind, TokenKind::Identifier);
    assert_eq!(x.location.file(), "demo.fs");
    assert_eq!(x.location.row(), Some(2));
    assert_eq!(x.location.column(), Some(3));
    assert_eq!(x.location.to_string(), "demo.fs:2:3");

    let end = tokens.last().expect("no tokens");
    assert_eq!(end.kind, TokenKind::EndOfInput);
    assert_eq!(end.location.row(), Some(2));
    assert_eq!(end.location.column(), Some(4));
}

#[test]
fn lex_errors() {
    let err = Token::lex("a $ b").expect_err("expected a lex error");
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter);
    assert_eq!(err.location.column(), Some(3));

    let err = Token::lex("\"open").expect_err("expected a lex error");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);

    let err = Token::lex(r#""bad \q""#).expect_err("expected a lex error");
    assert_eq!(err.kind, LexErrorKind::UnknownEscape);
}

#[test]
fn out_of_range_floats_are_rejected() {
    let err = Token::lex("x = 1e400").expect_err("expected a lex error");
    assert_eq!(err.kind, LexErrorKind::InvalidNumber);
    assert_eq!(err.location.column(), Some(5));

    let err = Token::lex("2.5e-400 9.9e999").expect_err("expected a lex error");
    assert_eq!(err.location.column(), Some(10));

    assert_eq!(single("1e300").payload, Payload::Float(1e300));
}

#[test]
fn lone_underscore_is_ignore() {
    assert_eq!(single("_").kind, TokenKind::Ignore);
    assert_eq!(single("_x").kind, TokenKind::Identifier);
}

#[test]
fn unterminated_literals_name_their_kind() {
    let err = Token::lex("'ab'").expect_err("expected a lex error");
    assert_eq!(err.kind, LexErrorKind::MalformedChar);

    let err = Token::lex("let s = \"open\nx").expect_err("expected a lex error");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.location.column(), Some(9));
}
