//! Pricing helpers for moving items between CSFloat and the domestic markets.
//! None of this touches the ledger.

use crate::error::{LedgerError, Result};

pub const DEFAULT_EXCHANGE_RATE: f64 = 7.34233;

const FLOAT_FEE_MULTIPLIER: f64 = 1.028;
const FLOAT_FIXED_FEE: f64 = 2.18;
const FLOAT_RATE_FEE: f64 = 0.005;

/// Domestic (¥) cost of buying at `price` USD on CSFloat.
pub fn float_to_domestic(price: f64, rate: f64) -> f64 {
    price * FLOAT_FEE_MULTIPLIER + FLOAT_FIXED_FEE + FLOAT_RATE_FEE * rate
}

/// CSFloat price equivalent to a domestic total.
pub fn domestic_to_float(total: f64, rate: f64) -> f64 {
    (total - FLOAT_FIXED_FEE - FLOAT_RATE_FEE * rate) / FLOAT_FEE_MULTIPLIER
}

pub struct BatchProfit {
    pub unit: f64,
    pub total: f64,
}

pub fn batch_profit(market: f64, pickup: f64, quantity: u32) -> Result<BatchProfit> {
    if market <= 0.0 || pickup <= 0.0 {
        return Err(LedgerError::Calc("market and pickup prices must be positive".to_string()));
    }
    if quantity == 0 {
        return Err(LedgerError::Calc("quantity must be at least 1".to_string()));
    }
    let unit = market - pickup;
    Ok(BatchProfit {
        unit,
        total: unit * quantity as f64,
    })
}

// ---------------------------------------------------------------------------
// Expression evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => {
                i += 1;
                continue;
            }
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Pow);
                i += 1;
            }
            '*' => tokens.push(Token::Star),
            '/' => tokens.push(Token::Slash),
            '%' => tokens.push(Token::Percent),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                if i < chars.len() && matches!(chars[i], 'e' | 'E') {
                    i += 1;
                    if i < chars.len() && matches!(chars[i], '+' | '-') {
                        i += 1;
                    }
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| LedgerError::Calc(format!("invalid number '{literal}'")))?;
                tokens.push(Token::Num(value));
                continue;
            }
            other => return Err(LedgerError::Calc(format!("unexpected character '{other}'"))),
        }
        i += 1;
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.peek();
        self.pos += 1;
        t
    }

    fn expr(&mut self) -> Result<f64> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash | Token::Percent)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = match op {
                Token::Star => value * rhs,
                _ if rhs == 0.0 => return Err(LedgerError::Calc("division by zero".to_string())),
                Token::Slash => value / rhs,
                // Floor modulo: the result takes the divisor's sign.
                _ => value - rhs * (value / rhs).floor(),
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64> {
        let base = self.atom()?;
        if self.peek() == Some(Token::Pow) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64> {
        match self.next() {
            Some(Token::Num(v)) => Ok(v),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(LedgerError::Calc("missing closing parenthesis".to_string())),
                }
            }
            Some(t) => Err(LedgerError::Calc(format!("unexpected token {t:?}"))),
            None => Err(LedgerError::Calc("unexpected end of expression".to_string())),
        }
    }
}

/// Evaluate a plain arithmetic expression such as `120 + 30 * 0.95`.
pub fn evaluate(expr: &str) -> Result<f64> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(LedgerError::Calc("empty expression".to_string()));
    }
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(LedgerError::Calc("trailing input after expression".to_string()));
    }
    Ok(value)
}
