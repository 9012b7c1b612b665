use std::collections::HashMap;

use crate::error::IdlError;
use crate::lexer::{lex, strip_comments, Tok, Token};
use crate::model::{ErrorDef, Field, Fields, Interface, Kind, Member, MethodDef, TypeDef};

pub fn parse(src: &str) -> Result<Interface, IdlError> {
    let (code, doc_for_line) = strip_comments(src);
    let tokens = lex(&code);
    let mut parser = Parser { tokens, pos: 0, doc_for_line };
    parser.parse_interface()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    doc_for_line: HashMap<usize, String>,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        self.pos += 1;
        tok
    }

    fn expect_ident(&mut self, expected: &str) -> Result<String, IdlError> {
        match self.advance() {
            Some(Token { tok: Tok::Ident(s), .. }) => Ok(s.clone()),
            Some(Token { line, .. }) => {
                Err(IdlError::UnexpectedToken { line: *line, expected: expected.to_string() })
            }
            None => Err(IdlError::UnexpectedEof { expected: expected.to_string() }),
        }
    }

    fn expect(&mut self, tok: Tok, expected: &str) -> Result<(), IdlError> {
        match self.advance() {
            Some(t) if t.tok == tok => Ok(()),
            Some(Token { line, .. }) => {
                Err(IdlError::UnexpectedToken { line: *line, expected: expected.to_string() })
            }
            None => Err(IdlError::UnexpectedEof { expected: expected.to_string() }),
        }
    }

    fn peek_keyword(&self) -> Option<&str> {
        match self.peek() {
            Some(Token { tok: Tok::Ident(s), .. }) => Some(s.as_str()),
            _ => None,
        }
    }

    fn current_line(&self) -> usize {
        self.peek().map(|t| t.line).unwrap_or(0)
    }

    fn take_doc(&mut self) -> Option<String> {
        let line = self.current_line();
        self.doc_for_line.remove(&line)
    }

    /// `name` or `a.b.c` — a dotted sequence of identifiers.
    fn parse_dotted_name(&mut self) -> Result<String, IdlError> {
        let mut name = self.expect_ident("identifier")?;
        while matches!(self.peek().map(|t| &t.tok), Some(Tok::Dot)) {
            self.advance();
            name.push('.');
            name.push_str(&self.expect_ident("identifier after '.'")?);
        }
        Ok(name)
    }

    fn parse_kind(&mut self) -> Result<Kind, IdlError> {
        if matches!(self.peek().map(|t| &t.tok), Some(Tok::LBracket)) {
            self.advance();
            if matches!(self.peek().map(|t| &t.tok), Some(Tok::RBracket)) {
                self.advance();
                let inner = self.parse_kind()?;
                return Ok(Kind::Array(Box::new(inner)));
            }
            let key = self.expect_ident("'string' inside '[...]'")?;
            if key != "string" {
                return Err(IdlError::UnexpectedToken {
                    line: self.current_line(),
                    expected: "'string'".to_string(),
                });
            }
            self.expect(Tok::RBracket, "']'")?;
            let inner = self.parse_kind()?;
            return Ok(Kind::Map(Box::new(inner)));
        }

        let name = self.parse_dotted_name()?;
        Ok(match name.as_str() {
            "bool" => Kind::Bool,
            "int" => Kind::Int,
            "float" => Kind::Float,
            "string" => Kind::String,
            "object" => Kind::Object,
            _ => Kind::TypeRef(name),
        })
    }

    fn parse_field(&mut self) -> Result<Field, IdlError> {
        let name = self.expect_ident("field name")?;
        self.expect(Tok::Colon, "':'")?;
        let kind = self.parse_kind()?;
        let optional = if matches!(self.peek().map(|t| &t.tok), Some(Tok::Question)) {
            self.advance();
            true
        } else {
            false
        };
        Ok(Field { name, kind, optional })
    }

    fn parse_fields(&mut self) -> Result<Fields, IdlError> {
        self.expect(Tok::LParen, "'('")?;
        let mut fields = Vec::new();
        if !matches!(self.peek().map(|t| &t.tok), Some(Tok::RParen)) {
            fields.push(self.parse_field()?);
            while matches!(self.peek().map(|t| &t.tok), Some(Tok::Comma)) {
                self.advance();
                if matches!(self.peek().map(|t| &t.tok), Some(Tok::RParen)) {
                    break;
                }
                fields.push(self.parse_field()?);
            }
        }
        self.expect(Tok::RParen, "')'")?;
        Ok(Fields(fields))
    }

    fn parse_interface(&mut self) -> Result<Interface, IdlError> {
        let doc = self.take_doc();
        match self.peek_keyword() {
            Some("interface") => {
                self.advance();
            }
            _ => return Err(IdlError::MissingInterface),
        }
        let name = self.parse_dotted_name()?;

        let mut members = Vec::new();
        while self.peek().is_some() {
            members.push(self.parse_member()?);
        }

        Ok(Interface { name, doc, members })
    }

    fn parse_member(&mut self) -> Result<Member, IdlError> {
        let doc = self.take_doc();
        let line = self.current_line();
        let keyword = self.peek_keyword().map(str::to_string).ok_or_else(|| {
            IdlError::UnexpectedEof { expected: "'type', 'method', or 'error'".to_string() }
        })?;
        self.advance();

        match keyword.as_str() {
            "type" => {
                let name = self.expect_ident("type name")?;
                let fields = self.parse_fields()?;
                Ok(Member::Type(TypeDef { name, doc, fields }))
            }
            "method" => {
                let name = self.expect_ident("method name")?;
                let input = self.parse_fields()?;
                self.expect(Tok::Arrow, "'->'")?;
                let output = self.parse_fields()?;
                Ok(Member::Method(MethodDef { name, doc, input, output }))
            }
            "error" => {
                let name = self.expect_ident("error name")?;
                let fields = self.parse_fields()?;
                Ok(Member::Error(ErrorDef { name, doc, fields }))
            }
            other => Err(IdlError::UnknownMember { line, keyword: other.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_interface() {
        let src = "interface vsh.builtin\n\nmethod Count() -> (count: int)\n";
        let iface = parse(src).unwrap();
        assert_eq!(iface.name, "vsh.builtin");
        assert_eq!(iface.methods().count(), 1);
        let m = iface.method("Count").unwrap();
        assert!(m.input.0.is_empty());
        assert_eq!(m.output.0[0].name, "count");
        assert_eq!(m.output.0[0].kind, Kind::Int);
    }

    #[test]
    fn doc_comment_attaches_to_following_method() {
        let src = "interface vsh.builtin\n\n# Counts all input records.\n# Returns {count}.\nmethod Count() -> (count: int)\n";
        let iface = parse(src).unwrap();
        let m = iface.method("Count").unwrap();
        assert_eq!(m.doc.as_deref(), Some("Counts all input records.\nReturns {count}."));
    }

    #[test]
    fn doc_comment_survives_blank_line_before_member() {
        let src = "interface vsh.builtin\n\n# doc\n\nmethod Count() -> (count: int)\n";
        let iface = parse(src).unwrap();
        assert_eq!(iface.method("Count").unwrap().doc.as_deref(), Some("doc"));
    }

    #[test]
    fn array_and_map_kinds() {
        let src = "interface x\nmethod M(a: []int, b: [string]string) -> ()\n";
        let iface = parse(src).unwrap();
        let m = iface.method("M").unwrap();
        assert_eq!(m.input.0[0].kind, Kind::Array(Box::new(Kind::Int)));
        assert_eq!(m.input.0[1].kind, Kind::Map(Box::new(Kind::String)));
    }

    #[test]
    fn optional_field() {
        let src = "interface x\nmethod M(a: string?) -> ()\n";
        let iface = parse(src).unwrap();
        assert!(iface.method("M").unwrap().input.0[0].optional);
    }

    #[test]
    fn error_member() {
        let src = "interface x\nerror NotFound (method: string)\n";
        let iface = parse(src).unwrap();
        assert_eq!(iface.members.len(), 1);
    }
}
