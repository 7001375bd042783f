//! Type string parser.
//!
//! Grammar:
//! - `Ident` or `Ident<T, ..>` for builtins, generics and registered names
//! - `(A, B, ..)` for tuples, `()` for `Null`
//! - `[T; N]` for fixed-length vectors
//!
//! `Vec<u8>` is read as `Bytes` and `Box<T>` as `T`.

use super::{MAX_TYPE_DEPTH, TypeDef};
use crate::error::{Error, Result};
use crate::types::Int;

pub fn parse_type(s: &str) -> Result<TypeDef> {
    let mut p = Parser {
        src: s,
        pos: 0,
        depth: 0,
    };
    let def = p.parse_type()?;
    p.skip_ws();
    if p.pos != s.len() {
        return Err(p.error("trailing characters"));
    }
    Ok(def)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: &str) -> Error {
        Error::TypeDef(format!("{message} at offset {} in {:?}", self.pos, self.src))
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n')) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, ch: u8) -> Result<()> {
        self.skip_ws();
        if self.peek() == Some(ch) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", ch as char)))
        }
    }

    fn eat(&mut self, ch: u8) -> bool {
        self.skip_ws();
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Result<&'a str> {
        self.skip_ws();
        let start = self.pos;
        let b = self.src.as_bytes();
        while self.pos < b.len() {
            let c = b[self.pos];
            if c.is_ascii_alphanumeric() || c == b'_' {
                self.pos += 1;
            } else if c == b':' && b.get(self.pos + 1) == Some(&b':') {
                self.pos += 2;
            } else {
                break;
            }
        }
        if start == self.pos || b[start].is_ascii_digit() {
            return Err(self.error("expected a type name"));
        }
        Ok(&self.src[start..self.pos])
    }

    fn number(&mut self) -> Result<usize> {
        self.skip_ws();
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.src[start..self.pos]
            .parse()
            .map_err(|_| self.error("expected a length"))
    }

    fn type_list(&mut self, close: u8) -> Result<Vec<TypeDef>> {
        let mut items = Vec::new();
        if self.eat(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_type()?);
            if self.eat(close) {
                return Ok(items);
            }
            self.expect(b',')?;
        }
    }

    fn parse_type(&mut self) -> Result<TypeDef> {
        if self.depth >= MAX_TYPE_DEPTH {
            return Err(self.error(&format!("type nests deeper than {MAX_TYPE_DEPTH}")));
        }
        self.depth += 1;
        let def = self.parse_type_inner();
        self.depth -= 1;
        def
    }

    fn parse_type_inner(&mut self) -> Result<TypeDef> {
        self.skip_ws();
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                let mut items = self.type_list(b')')?;
                Ok(match items.len() {
                    0 => TypeDef::Null,
                    1 => items.remove(0),
                    _ => TypeDef::Tuple(items),
                })
            }
            Some(b'[') => {
                self.pos += 1;
                let elem = self.parse_type()?;
                self.expect(b';')?;
                let len = self.number()?;
                self.expect(b']')?;
                Ok(TypeDef::VecFixed(Box::new(elem), len))
            }
            _ => {
                let name = self.ident()?;
                let params = if self.eat(b'<') {
                    self.type_list(b'>')?
                } else {
                    Vec::new()
                };
                self.named(name, params)
            }
        }
    }

    fn named(&self, name: &str, mut params: Vec<TypeDef>) -> Result<TypeDef> {
        let arity = |n: usize| -> Result<()> {
            if params.len() == n {
                Ok(())
            } else {
                Err(self.error(&format!("{name} takes {n} type parameter(s), got {}", params.len())))
            }
        };
        let def = match name {
            "Compact" | "Option" | "Vec" | "BTreeSet" | "Box" => {
                arity(1)?;
                let inner = params.remove(0);
                match name {
                    "Compact" => TypeDef::Compact(Box::new(inner)),
                    "Option" => TypeDef::Option(Box::new(inner)),
                    "Vec" if inner == (TypeDef::Int { bits: 8, signed: false }) => TypeDef::Bytes,
                    "Vec" => TypeDef::Vec(Box::new(inner)),
                    "BTreeSet" => TypeDef::BTreeSet(Box::new(inner)),
                    _ => inner,
                }
            }
            "Result" | "BTreeMap" | "HashMap" => {
                arity(2)?;
                let second = Box::new(params.remove(1));
                let first = Box::new(params.remove(0));
                match name {
                    "Result" => TypeDef::Result(first, second),
                    "BTreeMap" => TypeDef::BTreeMap(first, second),
                    _ => TypeDef::HashMap(first, second),
                }
            }
            _ => {
                arity(0)?;
                builtin(name).unwrap_or_else(|| TypeDef::Named(name.to_string()))
            }
        };
        Ok(def)
    }
}

fn builtin(name: &str) -> Option<TypeDef> {
    let def = match name {
        "Null" => TypeDef::Null,
        "bool" => TypeDef::Bool,
        "Text" | "String" | "str" => TypeDef::Text,
        "Bytes" => TypeDef::Bytes,
        "Json" => TypeDef::Json,
        "H256" | "Hash" => TypeDef::H256,
        "AccountId" => TypeDef::AccountId,
        _ => {
            let (signed, digits) = match name.as_bytes().first()? {
                b'u' => (false, &name[1..]),
                b'i' => (true, &name[1..]),
                _ => return None,
            };
            let bits: u16 = digits.parse().ok()?;
            if !Int::WIDTHS.contains(&bits) {
                return None;
            }
            TypeDef::Int { bits, signed }
        }
    };
    Some(def)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(bits: u16) -> TypeDef {
        TypeDef::Int { bits, signed: false }
    }

    #[test]
    fn test_builtins() {
        assert_eq!(parse_type("u128").unwrap(), int(128));
        assert_eq!(parse_type("i8").unwrap(), TypeDef::Int { bits: 8, signed: true });
        assert_eq!(parse_type("Text").unwrap(), TypeDef::Text);
        assert_eq!(parse_type("()").unwrap(), TypeDef::Null);
        // not an integer width, so a registered name
        assert_eq!(parse_type("u7").unwrap(), TypeDef::Named("u7".to_string()));
    }

    #[test]
    fn test_generics() {
        assert_eq!(
            parse_type("Compact<u128>").unwrap(),
            TypeDef::Compact(Box::new(int(128)))
        );
        assert_eq!(parse_type("Vec<u8>").unwrap(), TypeDef::Bytes);
        assert_eq!(
            parse_type("BTreeMap<AccountId, Option<u32>>").unwrap(),
            TypeDef::BTreeMap(
                Box::new(TypeDef::AccountId),
                Box::new(TypeDef::Option(Box::new(int(32))))
            )
        );
        assert_eq!(parse_type("Box<T::Balance>").unwrap(), TypeDef::Named("T::Balance".to_string()));
    }

    #[test]
    fn test_tuples_and_fixed() {
        assert_eq!(
            parse_type("(u32, Text)").unwrap(),
            TypeDef::Tuple(vec![int(32), TypeDef::Text])
        );
        assert_eq!(
            parse_type("[u8; 4]").unwrap(),
            TypeDef::VecFixed(Box::new(int(8)), 4)
        );
    }

    #[test]
    fn test_display_round_trips() {
        for s in ["Compact<u128>", "Result<u32, Text>", "[u64; 2]", "(bool, i16)"] {
            assert_eq!(parse_type(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_errors() {
        assert!(parse_type("Vec<").is_err());
        assert!(parse_type("Option<u8, u8>").is_err());
        assert!(parse_type("u32 junk").is_err());
        assert!(parse_type("[u8; x]").is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |n: usize| format!("{}u32{}", "Vec<".repeat(n), ">".repeat(n));
        assert!(parse_type(&nested(MAX_TYPE_DEPTH - 1)).is_ok());

        let err = parse_type(&nested(100_000)).unwrap_err();
        assert!(matches!(err, Error::TypeDef(_)));
        assert!(err.to_string().contains("deeper than"));

        let tuples = format!("{}u8{}", "(u8, ".repeat(100_000), ")".repeat(100_000));
        assert!(parse_type(&tuples).is_err());
    }
}
