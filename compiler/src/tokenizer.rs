use regex::Regex;
use lazy_static::lazy_static;
use crate::error::ConvertError;

lazy_static! {
    pub static ref TOKEN_REGEX:   Regex = Regex::new(r"\w+<?|[>,@]").unwrap();
    pub static ref IDENTIFIER_RX: Regex = Regex::new(r"^\w+$").unwrap();
    pub static ref NUMBER_RX:     Regex = Regex::new(r"^[0-9]+$").unwrap();
}

pub const PRIMITIVE_KEYWORDS: [&str; 5] = ["int", "long", "string", "float", "bool"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    PrimitiveKeyword,
    BeginList,
    BeginDict,
    BeginStruct,
    BeginEnum,
    ClosingBracket,
    Comma,
    ReferenceMarker,
    Identifier,
    Number,
    Eof,
}

impl TokenKind {
    /// Classifies one regex match, or `None` when it is not a token of the
    /// grammar (for instance `Foo<`).
    fn classify(text: &str) -> Option<TokenKind> {
        if PRIMITIVE_KEYWORDS.contains(&text) {
            return Some(TokenKind::PrimitiveKeyword);
        }
        let kind = match text {
            "List<"   => TokenKind::BeginList,
            "Map<"    => TokenKind::BeginDict,
            "Struct<" => TokenKind::BeginStruct,
            "Enum<"   => TokenKind::BeginEnum,
            ">"       => TokenKind::ClosingBracket,
            ","       => TokenKind::Comma,
            "@"       => TokenKind::ReferenceMarker,
            _ if NUMBER_RX.is_match(text)     => TokenKind::Number,
            _ if IDENTIFIER_RX.is_match(text) => TokenKind::Identifier,
            _ => return None,
        };
        Some(kind)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::PrimitiveKeyword => "primitive type",
            TokenKind::BeginList        => "\"List<\"",
            TokenKind::BeginDict        => "\"Map<\"",
            TokenKind::BeginStruct      => "\"Struct<\"",
            TokenKind::BeginEnum        => "\"Enum<\"",
            TokenKind::ClosingBracket   => "\">\"",
            TokenKind::Comma            => "\",\"",
            TokenKind::ReferenceMarker  => "\"@\"",
            TokenKind::Identifier       => "identifier",
            TokenKind::Number           => "number",
            TokenKind::Eof              => "end of definition",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind:   TokenKind,
    pub text:   String,
    pub column: usize,
}

/// Splits a type definition such as `Map<int,Struct<string,name,int,hp>>`
/// into tokens. Whitespace is not part of the grammar and is rejected like
/// any other stray text.
pub fn tokenize_definition(text: &str) -> Result<Vec<Token>, ConvertError> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for mat in TOKEN_REGEX.find_iter(text) {
        if mat.start() > last_end {
            return Err(ConvertError::Lex {
                text:   text[last_end..mat.start()].to_string(),
                column: last_end + 1,
            });
        }

        let part = mat.as_str();
        let kind = TokenKind::classify(part).ok_or_else(|| ConvertError::Lex {
            text:   part.to_string(),
            column: mat.start() + 1,
        })?;
        tokens.push(Token {
            kind,
            text:   part.to_string(),
            column: mat.start() + 1,
        });
        last_end = mat.end();
    }

    if last_end != text.len() {
        return Err(ConvertError::Lex {
            text:   text[last_end..].to_string(),
            column: last_end + 1,
        });
    }

    // Append EOF token
    tokens.push(Token {
        kind:   TokenKind::Eof,
        text:   "".to_string(),
        column: text.len() + 1,
    });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize_definition(text).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_nested() {
        use TokenKind::*;
        assert_eq!(
            kinds("Map<int,Struct<string,name,int,hp>>"),
            vec![
                BeginDict, PrimitiveKeyword, Comma, BeginStruct, PrimitiveKeyword, Comma,
                Identifier, Comma, PrimitiveKeyword, Comma, Identifier, ClosingBracket,
                ClosingBracket, Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_columns() {
        let got = tokenize_definition("List<int>").unwrap();
        let expected = vec![
            Token { kind: TokenKind::BeginList,        text: "List<".into(), column: 1 },
            Token { kind: TokenKind::PrimitiveKeyword, text: "int".into(),   column: 6 },
            Token { kind: TokenKind::ClosingBracket,   text: ">".into(),     column: 9 },
            Token { kind: TokenKind::Eof,              text: "".into(),      column: 10 },
        ];
        assert_eq!(got, expected);
    }

    #[test]
    fn test_tokenize_enum_and_reference() {
        use TokenKind::*;
        assert_eq!(
            kinds("Enum<Red,0,Green,12>"),
            vec![BeginEnum, Identifier, Comma, Number, Comma, Identifier, Comma, Number, ClosingBracket, Eof]
        );
        assert_eq!(
            kinds("@Items,SReward"),
            vec![ReferenceMarker, Identifier, Comma, Identifier, Eof]
        );
    }

    #[test]
    fn test_tokenize_unknown_opener() {
        let err = tokenize_definition("Set<int>").unwrap_err();
        assert!(
            matches!(&err, ConvertError::Lex { text, column: 1 } if text == "Set<"),
            "expected a Lex error but got {:?}",
            err
        );
    }

    #[test]
    fn test_tokenize_rejects_whitespace() {
        let err = tokenize_definition("List< int>").unwrap_err();
        assert!(
            matches!(&err, ConvertError::Lex { text, column: 6 } if text == " "),
            "expected a Lex error but got {:?}",
            err
        );
        assert!(matches!(
            tokenize_definition("int;").unwrap_err(),
            ConvertError::Lex { .. }
        ));
    }
}
