//! Parsers for interface files, type expressions and textual values

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::lexer::{tokenize, Spanned, Token};
use super::signature::{Annotation, MethodSignature, ServiceInterface};
use super::types::{Field, IdlType};
use super::value::IdlValue;
use crate::error::{Error, Result};

/// Cursor over a token slice
struct Parser<'t> {
    tokens: &'t [Spanned],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Spanned]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn peek_at(&self, offset: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + offset).map(|s| &s.token)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos).map(|s| &s.token);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn is_ident(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(s)) if s == keyword)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_ident(&mut self, keyword: &str) -> bool {
        if self.is_ident(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Error positioned at the current token, or just past the last one
    fn error(&self, message: impl Into<String>) -> Error {
        let (line, column) = match self.tokens.get(self.pos) {
            Some(s) => (s.line, s.column),
            None => self
                .tokens
                .last()
                .map(|s| (s.line, s.column + 1))
                .unwrap_or((1, 1)),
        };
        Error::parse(line, column, message)
    }

    fn unexpected(&self, expected: &str) -> Error {
        match self.peek() {
            Some(token) => self.error(format!("expected {}, found {}", expected, token)),
            None => self.error(format!("expected {}, found end of input", expected)),
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if self.eat(&token) {
            Ok(())
        } else {
            Err(self.unexpected(&token.to_string()))
        }
    }

    fn expect_end(&self) -> Result<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    /// Identifier or quoted name
    fn name(&mut self) -> Result<String> {
        match self.peek() {
            Some(Token::Ident(s)) | Some(Token::Text(s)) => {
                self.pos += 1;
                Ok(s.clone())
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    /// Label before `sep` in `label : T` or `label = v`, if present
    fn label_before(&mut self, sep: &Token) -> Option<String> {
        if self.peek_at(1) != Some(sep) {
            return None;
        }
        let label = match self.peek()? {
            Token::Ident(s) | Token::Text(s) | Token::Number(s) => s.clone(),
            _ => return None,
        };
        self.pos += 2;
        Some(label)
    }
}

// ─────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────

/// Named type definitions, resolved on first use
#[derive(Default)]
struct TypeEnv<'t> {
    defs: HashMap<String, &'t [Spanned]>,
    resolved: HashMap<String, IdlType>,
    resolving: Vec<String>,
}

impl<'t> TypeEnv<'t> {
    fn resolve(&mut self, name: &str, parser: &Parser<'_>) -> Result<IdlType> {
        if let Some(ty) = self.resolved.get(name) {
            return Ok(ty.clone());
        }
        let Some(tokens) = self.defs.get(name).copied() else {
            return Err(parser.error(format!("unknown type `{}`", name)));
        };
        if self.resolving.iter().any(|n| n == name) {
            return Err(parser.error(format!("recursive type `{}` is not supported", name)));
        }

        self.resolving.push(name.to_string());
        let mut inner = Parser::new(tokens);
        let ty = parse_type(&mut inner, self)?;
        inner.expect_end()?;
        self.resolving.pop();

        self.resolved.insert(name.to_string(), ty.clone());
        Ok(ty)
    }
}

fn parse_type(p: &mut Parser<'_>, env: &mut TypeEnv<'_>) -> Result<IdlType> {
    let name = match p.peek() {
        Some(Token::Ident(name)) => name.clone(),
        _ => return Err(p.unexpected("a type")),
    };
    p.next();

    match name.as_str() {
        "opt" => Ok(IdlType::opt(parse_type(p, env)?)),
        "vec" => Ok(IdlType::vec(parse_type(p, env)?)),
        "blob" => Ok(IdlType::vec(IdlType::Nat8)),
        "record" => Ok(IdlType::Record(parse_fields(p, env, false)?)),
        "variant" => Ok(IdlType::Variant(parse_fields(p, env, true)?)),
        "func" | "service" | "principal" => {
            p.pos -= 1;
            Err(p.error(format!("`{}` types are not supported", name)))
        }
        _ => match IdlType::primitive(&name) {
            Some(ty) => Ok(ty),
            None => {
                p.pos -= 1;
                let ty = env.resolve(&name, p)?;
                p.pos += 1;
                Ok(ty)
            }
        },
    }
}

/// Fields of `record { ... }` or arms of `variant { ... }`
fn parse_fields(p: &mut Parser<'_>, env: &mut TypeEnv<'_>, variant: bool) -> Result<Vec<Field>> {
    p.expect(Token::LBrace)?;
    let mut fields: Vec<Field> = Vec::new();
    let mut seen = HashSet::new();

    while !p.eat(&Token::RBrace) {
        let label_pos = p.pos;
        let field = match p.label_before(&Token::Colon) {
            Some(label) => Field::new(label, parse_type(p, env)?),
            None if variant => Field::new(p.name()?, IdlType::Null),
            None => Field::new(fields.len().to_string(), parse_type(p, env)?),
        };

        if !seen.insert(field.label.clone()) {
            p.pos = label_pos;
            return Err(p.error(format!("duplicate field `{}`", field.label)));
        }
        fields.push(field);

        if !p.eat(&Token::Semi) && p.peek() != Some(&Token::RBrace) {
            return Err(p.unexpected("`;` or `}`"));
        }
    }
    Ok(fields)
}

/// Parse a standalone type expression such as `vec record { nat; text }`
pub fn parse_type_expr(src: &str) -> Result<IdlType> {
    let tokens = tokenize(src)?;
    let mut p = Parser::new(&tokens);
    let ty = parse_type(&mut p, &mut TypeEnv::default())?;
    p.expect_end()?;
    Ok(ty)
}

// ─────────────────────────────────────────────────────────────────
// Interface files
// ─────────────────────────────────────────────────────────────────

/// Parse an interface description file
///
/// Type definitions may appear in any order; the service block lists the
/// methods in declaration order. Duplicate method names are rejected.
pub fn parse_interface(src: &str) -> Result<ServiceInterface> {
    let tokens = tokenize(src)?;
    let mut env = TypeEnv::default();
    let mut service_at = None;

    let mut p = Parser::new(&tokens);
    while !p.at_end() {
        if p.eat_ident("type") {
            let name = p.name()?;
            if env.defs.contains_key(&name) {
                p.pos -= 1;
                return Err(p.error(format!("duplicate type `{}`", name)));
            }
            p.expect(Token::Equals)?;
            let start = p.pos;
            skip_to_semi(&mut p)?;
            env.defs.insert(name, &tokens[start..p.pos]);
            p.expect(Token::Semi)?;
        } else if p.is_ident("service") {
            if service_at.is_some() {
                return Err(p.error("more than one service declaration"));
            }
            service_at = Some(p.pos);
            p.next();
            skip_to_semi(&mut p)?;
            p.eat(&Token::Semi);
        } else if p.eat(&Token::Semi) {
            continue;
        } else {
            return Err(p.unexpected("`type` or `service`"));
        }
    }

    let Some(at) = service_at else {
        return Err(Error::interface("no service declaration found"));
    };
    let mut p = Parser::new(&tokens);
    p.pos = at;
    parse_service(&mut p, &mut env)
}

/// Advance to the next `;` outside any braces or parentheses
fn skip_to_semi(p: &mut Parser<'_>) -> Result<()> {
    let mut depth = 0usize;
    loop {
        match p.peek() {
            None if depth == 0 => return Ok(()),
            None => return Err(p.unexpected("`}`")),
            Some(Token::Semi) if depth == 0 => return Ok(()),
            Some(Token::LBrace) | Some(Token::LParen) => depth += 1,
            Some(Token::RBrace) | Some(Token::RParen) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| p.error("unbalanced closing bracket"))?;
                if depth == 0 && p.peek_at(1) != Some(&Token::Semi) && is_service_end(p) {
                    p.next();
                    return Ok(());
                }
            }
            _ => {}
        }
        p.next();
    }
}

/// A service block may end at its closing brace without a trailing `;`
fn is_service_end(p: &Parser<'_>) -> bool {
    p.peek() == Some(&Token::RBrace)
        && matches!(p.peek_at(1), None | Some(Token::Ident(_)))
}

fn parse_service(p: &mut Parser<'_>, env: &mut TypeEnv<'_>) -> Result<ServiceInterface> {
    p.next(); // `service`
    let name = match p.peek() {
        Some(Token::Ident(_)) | Some(Token::Text(_)) => Some(p.name()?),
        _ => None,
    };
    p.expect(Token::Colon)?;

    // Init arguments of a service constructor are not needed to call it
    if p.peek() == Some(&Token::LParen) {
        parse_type_list(p, env)?;
        p.expect(Token::Arrow)?;
    }

    p.expect(Token::LBrace)?;
    let mut methods: Vec<Arc<MethodSignature>> = Vec::new();
    while !p.eat(&Token::RBrace) {
        let name_pos = p.pos;
        let method = parse_method(p, env)?;
        if methods.iter().any(|m| m.name == method.name) {
            p.pos = name_pos;
            return Err(p.error(format!("duplicate method `{}`", method.name)));
        }
        methods.push(Arc::new(method));
        if !p.eat(&Token::Semi) && p.peek() != Some(&Token::RBrace) {
            return Err(p.unexpected("`;` or `}`"));
        }
    }

    Ok(ServiceInterface { name, methods })
}

fn parse_method(p: &mut Parser<'_>, env: &mut TypeEnv<'_>) -> Result<MethodSignature> {
    let name = p.name()?;
    p.expect(Token::Colon)?;
    p.eat_ident("func");

    let (args, arg_names) = parse_named_type_list(p, env)?;
    p.expect(Token::Arrow)?;
    let rets = parse_type_list(p, env)?;

    let mut method = MethodSignature {
        name,
        args,
        arg_names,
        rets,
        annotations: Vec::new(),
    };
    while let Some(Token::Ident(keyword)) = p.peek() {
        let Some(annotation) = Annotation::from_keyword(keyword) else {
            return Err(p.error(format!("unknown annotation `{}`", keyword)));
        };
        p.next();
        method = method.with_annotation(annotation);
    }
    Ok(method)
}

/// `(T, name : T, ...)`
fn parse_named_type_list(
    p: &mut Parser<'_>,
    env: &mut TypeEnv<'_>,
) -> Result<(Vec<IdlType>, Vec<Option<String>>)> {
    p.expect(Token::LParen)?;
    let mut types = Vec::new();
    let mut names = Vec::new();
    while !p.eat(&Token::RParen) {
        names.push(p.label_before(&Token::Colon));
        types.push(parse_type(p, env)?);
        if !p.eat(&Token::Comma) && p.peek() != Some(&Token::RParen) {
            return Err(p.unexpected("`,` or `)`"));
        }
    }
    Ok((types, names))
}

fn parse_type_list(p: &mut Parser<'_>, env: &mut TypeEnv<'_>) -> Result<Vec<IdlType>> {
    parse_named_type_list(p, env).map(|(types, _)| types)
}

// ─────────────────────────────────────────────────────────────────
// Values
// ─────────────────────────────────────────────────────────────────

fn parse_typed_value(p: &mut Parser<'_>, ty: &IdlType) -> Result<IdlValue> {
    match ty {
        IdlType::Null | IdlType::Reserved => {
            if p.eat_ident("null") {
                Ok(if *ty == IdlType::Null {
                    IdlValue::Null
                } else {
                    IdlValue::Reserved
                })
            } else {
                Err(p.unexpected("`null`"))
            }
        }
        IdlType::Bool => {
            if p.eat_ident("true") {
                Ok(IdlValue::Bool(true))
            } else if p.eat_ident("false") {
                Ok(IdlValue::Bool(false))
            } else {
                Err(p.unexpected("`true` or `false`"))
            }
        }
        ty if ty.is_nat() => {
            p.eat(&Token::Plus);
            let digits = integer_literal(p, "a natural number")?;
            let n: u128 = digits
                .parse()
                .map_err(|_| p.error("natural number out of range"))?;
            if n > ty.nat_max() {
                return Err(p.error(format!("{} is out of range for {}", n, ty)));
            }
            p.next();
            Ok(IdlValue::Nat(n))
        }
        ty if ty.is_int() => {
            let negative = if p.eat(&Token::Minus) {
                true
            } else {
                p.eat(&Token::Plus);
                false
            };
            let digits = integer_literal(p, "an integer")?;
            let text = if negative {
                format!("-{}", digits)
            } else {
                digits
            };
            let n: i128 = text.parse().map_err(|_| p.error("integer out of range"))?;
            let (min, max) = ty.int_bounds();
            if n < min || n > max {
                return Err(p.error(format!("{} is out of range for {}", n, ty)));
            }
            p.next();
            Ok(IdlValue::Int(n))
        }
        ty if ty.is_float() => {
            let negative = if p.eat(&Token::Minus) {
                true
            } else {
                p.eat(&Token::Plus);
                false
            };
            let Some(Token::Number(digits)) = p.peek() else {
                return Err(p.unexpected("a number"));
            };
            let x: f64 = digits.parse().map_err(|_| p.error("malformed number"))?;
            p.next();
            Ok(IdlValue::Float(if negative { -x } else { x }))
        }
        IdlType::Text => match p.peek() {
            Some(Token::Text(s)) => {
                p.next();
                Ok(IdlValue::Text(s.clone()))
            }
            _ => Err(p.unexpected("a text literal")),
        },
        // `null` is always the empty option, even for `opt null`
        IdlType::Opt(inner) => {
            if p.eat_ident("opt") {
                Ok(IdlValue::some(parse_typed_value(p, inner)?))
            } else if p.eat_ident("null") {
                Ok(IdlValue::none())
            } else {
                Ok(IdlValue::some(parse_typed_value(p, inner)?))
            }
        }
        IdlType::Vec(inner) => {
            if **inner == IdlType::Nat8 {
                let blob = p.eat_ident("blob");
                if let Some(Token::Text(s)) = p.peek() {
                    p.next();
                    return Ok(IdlValue::Vec(
                        s.bytes().map(|b| IdlValue::Nat(b as u128)).collect(),
                    ));
                }
                if blob {
                    return Err(p.unexpected("a text literal"));
                }
            }
            if !p.eat_ident("vec") {
                return Err(p.unexpected("`vec`"));
            }
            p.expect(Token::LBrace)?;
            let mut items = Vec::new();
            while !p.eat(&Token::RBrace) {
                items.push(parse_typed_value(p, inner)?);
                if !p.eat(&Token::Semi) && p.peek() != Some(&Token::RBrace) {
                    return Err(p.unexpected("`;` or `}`"));
                }
            }
            Ok(IdlValue::Vec(items))
        }
        IdlType::Record(fields) => parse_record_value(p, fields),
        IdlType::Variant(arms) => {
            if !p.eat_ident("variant") {
                return Err(p.unexpected("`variant`"));
            }
            p.expect(Token::LBrace)?;
            let label_pos = p.pos;
            let label = match p.next() {
                Some(Token::Ident(s)) | Some(Token::Text(s)) | Some(Token::Number(s)) => s.clone(),
                _ => {
                    p.pos = label_pos;
                    return Err(p.unexpected("a variant label"));
                }
            };
            let Some(arm) = arms.iter().find(|a| a.label == label) else {
                p.pos = label_pos;
                return Err(p.error(format!("unknown variant `{}`", label)));
            };
            let payload = if p.eat(&Token::Equals) {
                parse_typed_value(p, &arm.ty)?
            } else if arm.ty == IdlType::Null {
                IdlValue::Null
            } else {
                return Err(p.unexpected("`=`"));
            };
            p.eat(&Token::Semi);
            p.expect(Token::RBrace)?;
            Ok(IdlValue::Variant(label, Box::new(payload)))
        }
        _ => Err(p.error(format!("cannot parse values of type {}", ty))),
    }
}

/// Current token as an integer literal, without consuming it
fn integer_literal(p: &Parser<'_>, expected: &str) -> Result<String> {
    match p.peek() {
        Some(Token::Number(digits)) if digits.chars().all(|c| c.is_ascii_digit()) => {
            Ok(digits.clone())
        }
        _ => Err(p.unexpected(expected)),
    }
}

fn parse_record_value(p: &mut Parser<'_>, fields: &[Field]) -> Result<IdlValue> {
    if !p.eat_ident("record") {
        return Err(p.unexpected("`record`"));
    }
    p.expect(Token::LBrace)?;

    let mut given: HashMap<String, IdlValue> = HashMap::new();
    let mut position = 0usize;
    while !p.eat(&Token::RBrace) {
        let entry_pos = p.pos;
        let label = p
            .label_before(&Token::Equals)
            .unwrap_or_else(|| position.to_string());
        let Some(field) = fields.iter().find(|f| f.label == label) else {
            p.pos = entry_pos;
            return Err(p.error(format!("unknown field `{}`", label)));
        };
        let value = parse_typed_value(p, &field.ty)?;
        if given.insert(label.clone(), value).is_some() {
            p.pos = entry_pos;
            return Err(p.error(format!("field `{}` given twice", label)));
        }
        position += 1;
        if !p.eat(&Token::Semi) && p.peek() != Some(&Token::RBrace) {
            return Err(p.unexpected("`;` or `}`"));
        }
    }

    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let value = match given.remove(&field.label) {
            Some(value) => value,
            None if matches!(field.ty, IdlType::Opt(_)) => IdlValue::none(),
            None if field.ty == IdlType::Null => IdlValue::Null,
            None => return Err(p.error(format!("missing field `{}`", field.label))),
        };
        out.push((field.label.clone(), value));
    }
    Ok(IdlValue::Record(out))
}

/// Parse a single value of the given type
pub fn parse_value(ty: &IdlType, src: &str) -> Result<IdlValue> {
    let tokens = tokenize(src)?;
    let mut p = Parser::new(&tokens);
    let value = parse_typed_value(&mut p, ty)?;
    p.expect_end()?;
    Ok(value)
}

fn parse_value_list(p: &mut Parser<'_>, types: &[IdlType]) -> Result<Vec<IdlValue>> {
    p.expect(Token::LParen)?;
    let mut values = Vec::with_capacity(types.len());
    while !p.eat(&Token::RParen) {
        let Some(ty) = types.get(values.len()) else {
            return Err(p.error(format!("expected {} argument(s)", types.len())));
        };
        values.push(parse_typed_value(p, ty)?);
        if !p.eat(&Token::Comma) && p.peek() != Some(&Token::RParen) {
            return Err(p.unexpected("`,` or `)`"));
        }
    }
    if values.len() != types.len() {
        return Err(p.error(format!(
            "expected {} argument(s), found {}",
            types.len(),
            values.len()
        )));
    }
    Ok(values)
}

/// Parse an argument list such as `(2, 3)` against the given types
pub fn parse_args(types: &[IdlType], src: &str) -> Result<Vec<IdlValue>> {
    let tokens = tokenize(src)?;
    let mut p = Parser::new(&tokens);
    let values = parse_value_list(&mut p, types)?;
    p.expect_end()?;
    Ok(values)
}

/// Parse a call expression such as `add(2, 3)` against an interface
pub fn parse_call(
    interface: &ServiceInterface,
    src: &str,
) -> Result<(Arc<MethodSignature>, Vec<IdlValue>)> {
    let tokens = tokenize(src)?;
    let mut p = Parser::new(&tokens);
    let name = p.name()?;
    let method = interface
        .get(&name)
        .cloned()
        .ok_or_else(|| Error::unknown_method(&name))?;
    let values = parse_value_list(&mut p, &method.args)?;
    p.expect_end()?;
    Ok((method, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE: &str = r#"
        // people service
        type Person = record { name : text; age : nat8 };
        type People = vec Person;
        service : {
          add : (nat, nat) -> (nat) query;
          greet : (who : Person) -> (text);
          noop : () -> ();
          "list-all" : () -> (People) composite_query;
          swap : (text, int) -> (int, text);
        }
    "#;

    #[test]
    fn test_parse_interface_in_declaration_order() {
        let iface = parse_interface(SERVICE).unwrap();
        let names: Vec<_> = iface.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["add", "greet", "noop", "list-all", "swap"]);

        let add = iface.get("add").unwrap();
        assert_eq!(add.to_string(), "(nat, nat) -> (nat) query");

        let greet = iface.get("greet").unwrap();
        assert_eq!(greet.arg_names, vec![Some("who".to_string())]);
        assert_eq!(
            greet.args[0].to_string(),
            "record { name : text; age : nat8 }"
        );

        let list = iface.get("list-all").unwrap();
        assert!(list.is_query());
        assert_eq!(
            list.rets[0],
            IdlType::vec(IdlType::Record(vec![
                Field::new("name", IdlType::Text),
                Field::new("age", IdlType::Nat8),
            ]))
        );
    }

    #[test]
    fn test_named_service_with_init_args() {
        let iface =
            parse_interface("service counter : (nat) -> { get : () -> (nat) query }").unwrap();
        assert_eq!(iface.name.as_deref(), Some("counter"));
        assert_eq!(iface.len(), 1);
    }

    #[test]
    fn test_duplicate_methods_rejected() {
        let err =
            parse_interface("service : { a : () -> (); a : (nat) -> (); }").unwrap_err();
        assert!(err.to_string().contains("duplicate method `a`"));
    }

    #[test]
    fn test_recursive_alias_rejected() {
        let src = "type List = opt record { head : nat; tail : List }; service : { f : (List) -> () }";
        let err = parse_interface(src).unwrap_err();
        assert!(err.to_string().contains("recursive type `List`"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = parse_interface("service : { f : (Thing) -> () }").unwrap_err();
        assert!(err.to_string().contains("unknown type `Thing`"));
    }

    #[test]
    fn test_missing_service() {
        let err = parse_interface("type A = nat;").unwrap_err();
        assert!(matches!(err, Error::Interface { .. }));
    }

    #[test]
    fn test_type_expressions() {
        assert_eq!(
            parse_type_expr("record { nat; text }").unwrap(),
            IdlType::tuple(vec![IdlType::Nat, IdlType::Text])
        );
        assert_eq!(
            parse_type_expr("variant { ok : nat; err }").unwrap(),
            IdlType::Variant(vec![
                Field::new("ok", IdlType::Nat),
                Field::new("err", IdlType::Null),
            ])
        );
        assert_eq!(parse_type_expr("blob").unwrap(), IdlType::vec(IdlType::Nat8));
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse_value(&IdlType::Nat, "1_000").unwrap(), IdlValue::Nat(1000));
        assert_eq!(parse_value(&IdlType::Int, "-7").unwrap(), IdlValue::Int(-7));
        assert_eq!(
            parse_value(&IdlType::Float64, "-2.5").unwrap(),
            IdlValue::Float(-2.5)
        );
        assert_eq!(
            parse_value(&IdlType::Bool, "true").unwrap(),
            IdlValue::Bool(true)
        );
        assert_eq!(
            parse_value(&IdlType::Text, "\"hi\"").unwrap(),
            IdlValue::text("hi")
        );
    }

    #[test]
    fn test_sized_range_checks() {
        assert!(parse_value(&IdlType::Nat8, "255").is_ok());
        assert!(parse_value(&IdlType::Nat8, "256").is_err());
        assert!(parse_value(&IdlType::Int8, "-128").is_ok());
        assert!(parse_value(&IdlType::Int8, "128").is_err());
        assert!(parse_value(&IdlType::Nat, "-1").is_err());
        assert!(parse_value(&IdlType::Nat, "1.5").is_err());
    }

    #[test]
    fn test_parse_opt_forms() {
        let ty = IdlType::opt(IdlType::Nat);
        assert_eq!(parse_value(&ty, "null").unwrap(), IdlValue::none());
        assert_eq!(
            parse_value(&ty, "opt 4").unwrap(),
            IdlValue::some(IdlValue::Nat(4))
        );
        assert_eq!(parse_value(&ty, "4").unwrap(), IdlValue::some(IdlValue::Nat(4)));
    }

    #[test]
    fn test_parse_record_with_defaults() {
        let ty = IdlType::Record(vec![
            Field::new("name", IdlType::Text),
            Field::new("nick", IdlType::opt(IdlType::Text)),
        ]);
        assert_eq!(
            parse_value(&ty, "record { name = \"Ada\" }").unwrap(),
            IdlValue::Record(vec![
                ("name".into(), IdlValue::text("Ada")),
                ("nick".into(), IdlValue::none()),
            ])
        );
        let err = parse_value(&ty, "record { nick = \"A\" }").unwrap_err();
        assert!(err.to_string().contains("missing field `name`"));
    }

    #[test]
    fn test_parse_tuple_and_vec() {
        let ty = IdlType::vec(IdlType::tuple(vec![IdlType::Nat, IdlType::Text]));
        let value = parse_value(&ty, "vec { record { 1; \"a\" }; record { 2; \"b\" } }").unwrap();
        assert_eq!(
            value,
            IdlValue::Vec(vec![
                IdlValue::tuple(vec![IdlValue::Nat(1), IdlValue::text("a")]),
                IdlValue::tuple(vec![IdlValue::Nat(2), IdlValue::text("b")]),
            ])
        );
    }

    #[test]
    fn test_parse_variant() {
        let ty = IdlType::Variant(vec![
            Field::new("ok", IdlType::Nat),
            Field::new("err", IdlType::Null),
        ]);
        assert_eq!(
            parse_value(&ty, "variant { ok = 5 }").unwrap(),
            IdlValue::variant("ok", IdlValue::Nat(5))
        );
        assert_eq!(
            parse_value(&ty, "variant { err }").unwrap(),
            IdlValue::variant("err", IdlValue::Null)
        );
        assert!(parse_value(&ty, "variant { nope }").is_err());
    }

    #[test]
    fn test_display_output_parses_back() {
        let ty = IdlType::Record(vec![
            Field::new("tags", IdlType::vec(IdlType::Text)),
            Field::new("score", IdlType::opt(IdlType::Int)),
        ]);
        let value = IdlValue::Record(vec![
            (
                "tags".into(),
                IdlValue::Vec(vec![IdlValue::text("x"), IdlValue::text("y")]),
            ),
            ("score".into(), IdlValue::some(IdlValue::Int(-3))),
        ]);
        assert_eq!(parse_value(&ty, &value.to_string()).unwrap(), value);
    }

    #[test]
    fn test_parse_args() {
        let values = parse_args(&[IdlType::Nat, IdlType::Nat], "(2, 3)").unwrap();
        assert_eq!(values, vec![IdlValue::Nat(2), IdlValue::Nat(3)]);
        assert!(parse_args(&[IdlType::Nat], "(2, 3)").is_err());
        assert!(parse_args(&[IdlType::Nat, IdlType::Nat], "(2)").is_err());
        assert_eq!(parse_args(&[], "()").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_call() {
        let iface = parse_interface(SERVICE).unwrap();
        let (method, args) = parse_call(&iface, "add(2, 3)").unwrap();
        assert_eq!(method.name, "add");
        assert_eq!(args, vec![IdlValue::Nat(2), IdlValue::Nat(3)]);

        let (method, _) = parse_call(&iface, "\"list-all\"()").unwrap();
        assert_eq!(method.name, "list-all");

        let err = parse_call(&iface, "missing()").unwrap_err();
        assert!(matches!(err, Error::UnknownMethod { .. }));
    }

    #[test]
    fn test_error_position() {
        let err = parse_value(&IdlType::Nat, "  x").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, column: 3, .. }));
    }
}
