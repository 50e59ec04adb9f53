use std::sync::Arc;
use tracing::debug;
use crate::{
    error::ConvertError,
    naming::{singularize_with, synthetic_type_name, English, Inflector},
    tokenizer::{tokenize_definition, Token, TokenKind},
    types::{EnumDef, EnumValue, Field, FieldKind, PrimitiveKind, ReferenceDef, StructDef},
    utils::{error, quote},
    verifier::{verify_enum, verify_struct},
};

/// Tokenizes and parses the type definition of one column.
pub fn parse_definition(table: &str, name: &str, definition: &str) -> Result<Field, ConvertError> {
    let tokens = tokenize_definition(definition)?;
    let field = parse_field(table, name, &tokens)?;
    debug!(table, field = name, definition, "parsed field");
    Ok(field)
}

/// Parses a whole token stream (ending in the EOF token) into one field.
pub fn parse_field(table: &str, name: &str, tokens: &[Token]) -> Result<Field, ConvertError> {
    parse_field_with(table, name, tokens, &English)
}

pub fn parse_field_with(
    table: &str,
    name: &str,
    tokens: &[Token],
    inflector: &dyn Inflector,
) -> Result<Field, ConvertError> {
    let mut parser = Parser {
        table,
        tokens,
        index: 0,
        inflector,
    };
    let field = parser.parse_type(name)?;
    parser.expect(TokenKind::Eof)?;
    Ok(field)
}

struct Parser<'a> {
    table:     &'a str,
    tokens:    &'a [Token],
    index:     usize,
    inflector: &'a dyn Inflector,
}

impl<'a> Parser<'a> {
    fn current_token(&self) -> Result<&'a Token, ConvertError> {
        self.tokens
            .get(self.index)
            .ok_or_else(|| error("Unexpected end of definition", self.index))
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        match self.tokens.get(self.index) {
            Some(tok) if tok.kind == kind => {
                self.index += 1;
                true
            }
            _ => false,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ConvertError> {
        let tok = self.current_token()?;
        if !self.eat(kind) {
            return Err(error(
                &format!("Expected {} but found {}", kind.describe(), describe_token(tok)),
                self.index,
            ));
        }
        Ok(tok)
    }

    fn unexpected_token(&self) -> ConvertError {
        match self.tokens.get(self.index) {
            Some(tok) => error(&format!("Unexpected {}", describe_token(tok)), self.index),
            None => error("Unexpected end of definition", self.index),
        }
    }

    fn field(&self, name: &str, kind: FieldKind) -> Field {
        Field::new(self.table, name, kind)
    }

    fn parse_type(&mut self, name: &str) -> Result<Field, ConvertError> {
        match self.current_token()?.kind {
            TokenKind::PrimitiveKeyword => self.parse_primitive(name),
            TokenKind::BeginList        => self.parse_list(name),
            TokenKind::BeginDict        => self.parse_dictionary(name),
            TokenKind::BeginStruct      => self.parse_struct(name),
            TokenKind::BeginEnum        => self.parse_enum(name),
            TokenKind::ReferenceMarker  => self.parse_reference(name),
            _ => Err(self.unexpected_token()),
        }
    }

    fn parse_primitive(&mut self, name: &str) -> Result<Field, ConvertError> {
        let tok = self.expect(TokenKind::PrimitiveKeyword)?;
        let primitive = PrimitiveKind::from_keyword(&tok.text)
            .ok_or_else(|| error(&format!("Unknown primitive {}", quote(&tok.text)), self.index - 1))?;
        Ok(self.field(name, FieldKind::Primitive(primitive)))
    }

    fn parse_list(&mut self, name: &str) -> Result<Field, ConvertError> {
        self.expect(TokenKind::BeginList)?;
        let element_name = singularize_with(self.inflector, name);
        let element = self.parse_type(&element_name)?;
        self.expect(TokenKind::ClosingBracket)?;
        Ok(self.field(name, FieldKind::List(Box::new(element))))
    }

    fn parse_dictionary(&mut self, name: &str) -> Result<Field, ConvertError> {
        self.expect(TokenKind::BeginDict)?;
        let key = self.parse_type("")?;
        self.expect(TokenKind::Comma)?;
        let value = self.parse_type("")?;
        self.expect(TokenKind::ClosingBracket)?;
        Ok(self.field(
            name,
            FieldKind::Dictionary {
                key:   Box::new(key),
                value: Box::new(value),
            },
        ))
    }

    /// `Struct<` (type `,` name)+ `>`. Each subfield type is parsed with an
    /// empty name, so nested structs and enums are named `S` and `E`; the
    /// subfield name is filled in afterwards.
    fn parse_struct(&mut self, name: &str) -> Result<Field, ConvertError> {
        self.expect(TokenKind::BeginStruct)?;
        let mut fields = Vec::new();
        loop {
            let mut field = self.parse_type("")?;
            self.expect(TokenKind::Comma)?;
            field.name = self.expect(TokenKind::Identifier)?.text.clone();
            fields.push(field);

            if self.eat(TokenKind::ClosingBracket) {
                break;
            }
            self.expect(TokenKind::Comma)?;
        }

        let type_name = synthetic_type_name("S", name);
        verify_struct(self.table, &type_name, &fields)?;
        Ok(self.field(name, FieldKind::Struct(Arc::new(StructDef { type_name, fields }))))
    }

    fn parse_enum(&mut self, name: &str) -> Result<Field, ConvertError> {
        self.expect(TokenKind::BeginEnum)?;
        let mut values = Vec::new();
        loop {
            let member = self.expect(TokenKind::Identifier)?;
            self.expect(TokenKind::Comma)?;
            let number = self.expect(TokenKind::Number)?;
            let value = number.text.parse::<i64>().map_err(|_| {
                error(&format!("Invalid enum value {}", quote(&number.text)), self.index - 1)
            })?;
            values.push(EnumValue {
                name: member.text.clone(),
                value,
            });

            if self.eat(TokenKind::ClosingBracket) {
                break;
            }
            self.expect(TokenKind::Comma)?;
        }

        let type_name = synthetic_type_name("E", name);
        verify_enum(self.table, &type_name, &values)?;
        Ok(self.field(name, FieldKind::Enum(Arc::new(EnumDef::new(type_name, values)))))
    }

    fn parse_reference(&mut self, name: &str) -> Result<Field, ConvertError> {
        self.expect(TokenKind::ReferenceMarker)?;
        let table = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Comma)?;
        let type_name = self.expect(TokenKind::Identifier)?;
        Ok(self.field(
            name,
            FieldKind::Reference(ReferenceDef::new(table.text.clone(), type_name.text.clone())),
        ))
    }
}

fn describe_token(tok: &Token) -> String {
    match tok.kind {
        TokenKind::Eof => "end of definition".to_string(),
        _ => quote(&tok.text),
    }
}
