use serde_json::{Map, Number, Value};

use super::token::{CmpOp, Token};
use super::ExprError;
use crate::value::{as_number, loose_eq};

/// Recursive-descent parser that evaluates while it parses.
///
/// ```text
/// or         := and ("OR" and)*
/// and        := comparison ("AND" comparison)*
/// comparison := "(" or ")" | literal (op literal)?
/// ```
///
/// Both operands of AND/OR are always evaluated, so an error on either side
/// surfaces regardless of the other side's value.
pub(crate) struct Parser<'t, 'c> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    context: &'c Map<String, Value>,
}

/// Deepest parenthesis nesting accepted.
const MAX_DEPTH: usize = 64;

impl<'t, 'c> Parser<'t, 'c> {
    pub(crate) fn new(tokens: &'t [Token], context: &'c Map<String, Value>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            context,
        }
    }

    pub(crate) fn evaluate(mut self) -> Result<bool, ExprError> {
        let result = self.or_expr()?;
        match self.peek() {
            None => Ok(result),
            Some(Token::RParen) => Err(ExprError::new(format!(
                "unbalanced parentheses: unexpected ')' at token {}",
                self.pos
            ))),
            Some(token) => Err(ExprError::new(format!(
                "unexpected token {} at token {}",
                token, self.pos
            ))),
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        let tokens = self.tokens;
        tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn or_expr(&mut self) -> Result<bool, ExprError> {
        let mut left = self.and_expr()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let right = self.and_expr()?;
            left = left || right;
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<bool, ExprError> {
        let mut left = self.comparison()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let right = self.comparison()?;
            left = left && right;
        }
        Ok(left)
    }

    fn comparison(&mut self) -> Result<bool, ExprError> {
        match self.advance() {
            Some(Token::LParen) => {
                if self.depth >= MAX_DEPTH {
                    return Err(ExprError::new("expression nested too deeply"));
                }
                self.depth += 1;
                let inner = self.or_expr()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    Some(token) => Err(ExprError::new(format!(
                        "expected ')', found {}",
                        token
                    ))),
                    None => Err(ExprError::new(
                        "unbalanced parentheses: missing closing ')'",
                    )),
                }
            }
            Some(Token::Literal(left)) => {
                let op = match self.peek() {
                    Some(Token::Op(op)) => *op,
                    _ => return Ok(self.truthy(left)),
                };
                self.pos += 1;
                match self.advance() {
                    Some(Token::Literal(right)) => self.compare(left, op, right),
                    Some(token) => Err(ExprError::new(format!(
                        "operator '{}' expects a value, found {}",
                        op, token
                    ))),
                    None => Err(ExprError::new(format!(
                        "operator '{}' is missing its right operand",
                        op
                    ))),
                }
            }
            Some(token) => Err(ExprError::new(format!("unexpected token {}", token))),
            None => Err(ExprError::new("unexpected end of expression")),
        }
    }

    /// A literal standing alone: boolean text, or a field that is true or
    /// merely present and non-null.
    fn truthy(&self, literal: &str) -> bool {
        match literal {
            "true" => true,
            "false" => false,
            name => match self.context.get(field_name(name).as_str()) {
                Some(Value::Bool(b)) => *b,
                Some(Value::Null) | None => false,
                Some(_) => true,
            },
        }
    }

    fn compare(&self, left: &str, op: CmpOp, right: &str) -> Result<bool, ExprError> {
        let expected = parse_literal(right);
        let actual = match self.context.get(field_name(left).as_str()) {
            Some(value) => value,
            None => return Ok(op == CmpOp::Eq && expected.is_null()),
        };

        match op {
            CmpOp::Eq => Ok(loose_eq(actual, &expected)),
            CmpOp::Ne => Ok(!loose_eq(actual, &expected)),
            CmpOp::Gt | CmpOp::Lt | CmpOp::Ge | CmpOp::Le => {
                let (a, b) = match (as_number(actual), as_number(&expected)) {
                    (Some(a), Some(b)) => (a, b),
                    _ => {
                        return Err(ExprError::new(format!(
                            "cannot compare non-numeric values: {} {} {}",
                            left, op, right
                        )))
                    }
                };
                Ok(match op {
                    CmpOp::Gt => a > b,
                    CmpOp::Lt => a < b,
                    CmpOp::Ge => a >= b,
                    _ => a <= b,
                })
            }
        }
    }
}

fn is_quoted(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => (first == '"' || first == '\'') && first == last,
        _ => false,
    }
}

/// Strip the surrounding quotes and collapse doubled quotes.
fn unquote(text: &str) -> String {
    let quote = &text[..1];
    let inner = &text[1..text.len() - 1];
    inner.replace(&format!("{}{}", quote, quote), quote)
}

fn field_name(text: &str) -> String {
    if is_quoted(text) {
        unquote(text)
    } else {
        text.to_string()
    }
}

/// Interpret the right-hand side of a comparison.
fn parse_literal(text: &str) -> Value {
    match text {
        "null" | "nil" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if is_quoted(text) {
        return Value::String(unquote(text));
    }
    if let Ok(int) = text.parse::<i64>() {
        return Value::Number(int.into());
    }
    // `f64::from_str` also accepts "inf" and "NaN"; require a digit.
    if text.chars().any(|c| c.is_ascii_digit()) {
        if let Some(num) = text.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(num);
        }
    }
    Value::String(text.to_string())
}
