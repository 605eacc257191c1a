use crate::eval::EvalError;
use crate::eval::expr::{BinaryOp, Expr};
use crate::eval::lexer::Token;

/// Binding powers of the grammar. Unary minus sits between the
/// multiplicative tier and exponentiation, so `-x^2` reads as `-(x^2)`
/// while `-2*x` reads as `(-2)*x`.
const ADDITIVE_BP: u8 = 10;
const MULTIPLICATIVE_BP: u8 = 20;
const NEGATION_BP: u8 = 25;
const POWER_BP: u8 = 30;

/// Nesting guard so pathological input degrades into a typed error instead
/// of exhausting the stack.
const MAX_DEPTH: usize = 256;

/// Parses a token stream into an expression tree via precedence climbing.
pub(crate) fn parse_tokens(tokens: Vec<Token>) -> Result<Expr, EvalError> {
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expression(0, 0)?;
    match parser.peek() {
        Some(token) => Err(EvalError::UnexpectedToken(token.to_string())),
        None => Ok(expr),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_close_paren(&mut self) -> Result<(), EvalError> {
        match self.advance() {
            Some(Token::CloseParen) => Ok(()),
            Some(token) => Err(EvalError::UnexpectedToken(token.to_string())),
            None => Err(EvalError::ParenMismatch),
        }
    }

    fn parse_expression(&mut self, min_bp: u8, depth: usize) -> Result<Expr, EvalError> {
        if depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }

        let mut lhs = self.parse_prefix(depth)?;
        loop {
            let Some((op, bp, right_assoc)) = self.peek().and_then(binary_binding) else {
                break;
            };
            if bp < min_bp {
                break;
            }
            self.advance();
            let next_min = if right_assoc { bp } else { bp + 1 };
            let rhs = self.parse_expression(next_min, depth + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_prefix(&mut self, depth: usize) -> Result<Expr, EvalError> {
        if depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }

        match self.advance() {
            Some(Token::Minus) => {
                let operand = self.parse_expression(NEGATION_BP, depth + 1)?;
                Ok(Expr::Neg(Box::new(operand)))
            }
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Ident(name)) => self.parse_ident(&name, depth),
            Some(Token::OpenParen) => {
                let inner = self.parse_expression(0, depth + 1)?;
                self.expect_close_paren()?;
                Ok(inner)
            }
            Some(token) => Err(EvalError::UnexpectedToken(token.to_string())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn parse_ident(&mut self, name: &str, depth: usize) -> Result<Expr, EvalError> {
        match name {
            "x" => Ok(Expr::Variable),
            "pi" => Ok(Expr::Number(std::f64::consts::PI)),
            "e" => Ok(Expr::Number(std::f64::consts::E)),
            _ => {
                let Some(builtin) = crate::eval::Builtin::from_name(name) else {
                    return Err(EvalError::UnknownIdent(name.to_owned()));
                };
                match self.advance() {
                    Some(Token::OpenParen) => {}
                    Some(token) => return Err(EvalError::UnexpectedToken(token.to_string())),
                    None => return Err(EvalError::UnexpectedEnd),
                }
                let argument = self.parse_expression(0, depth + 1)?;
                self.expect_close_paren()?;
                Ok(Expr::Call(builtin, Box::new(argument)))
            }
        }
    }
}

fn binary_binding(token: &Token) -> Option<(BinaryOp, u8, bool)> {
    match token {
        Token::Plus => Some((BinaryOp::Add, ADDITIVE_BP, false)),
        Token::Minus => Some((BinaryOp::Sub, ADDITIVE_BP, false)),
        Token::Star => Some((BinaryOp::Mul, MULTIPLICATIVE_BP, false)),
        Token::Slash => Some((BinaryOp::Div, MULTIPLICATIVE_BP, false)),
        Token::Caret => Some((BinaryOp::Pow, POWER_BP, true)),
        _ => None,
    }
}
