//! Recursive descent parser for the Sable language.
//!
//! The parser pulls tokens from a [`Lexer`] on demand and builds a
//! [`Program`]. Expressions use precedence climbing for binary operators.
//! Errors never abort the parse: each failed statement is recorded and the
//! parser resynchronizes at the next `;` or statement keyword.

use crate::ast::expr::{BinaryOp, Expr, Literal, UnaryOp};
use crate::ast::stmt::{FunctionDecl, Param, Program, Stmt, TypeName};
use crate::diagnostic::Diagnostic;
use crate::error::{ParserError, SyntaxError, SyntaxResult};
use crate::lexer::Lexer;
use crate::span::{Span, Spanned};
use crate::token::{Token, TokenKind};
use sable_log::{debug, trace};
use std::mem;
use std::rc::Rc;

/// Minimum precedence for parsing.
const MIN_PRECEDENCE: u8 = 1;

/// Parser for the Sable language.
///
/// # Examples
///
/// ```
/// use sable_syntax::Parser;
///
/// let mut parser = Parser::new("let x = 1; print(x);");
/// let program = parser.parse();
///
/// assert!(!parser.has_errors());
/// assert_eq!(program.statements.len(), 2);
/// ```
pub struct Parser<'input> {
    /// Token source
    lexer: Lexer<'input>,
    /// The token being looked at
    current: Token,
    /// The most recently consumed token
    previous: Token,
    /// Number of tokens consumed so far
    consumed: usize,
    /// Accumulated lexical and parsing errors
    errors: Vec<SyntaxError>,
}

impl<'input> Parser<'input> {
    /// Creates a new parser over `source`.
    #[must_use]
    pub fn new(source: &'input str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: Token::new(TokenKind::EOF, Span::point(0, 1, 1)),
            consumed: 0,
            errors: Vec::new(),
        }
    }

    /// Parses the whole source into a program.
    ///
    /// Always returns a program; statements that failed to parse are left
    /// out and their errors are available through [`Parser::errors`].
    pub fn parse(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        debug!(
            "parsed {} statements with {} errors",
            statements.len(),
            self.errors.len()
        );
        Program::new(statements)
    }

    /// Parses a single expression (entry point for tests and tooling).
    ///
    /// # Errors
    ///
    /// Returns the first error that stops the expression from parsing.
    /// Non-fatal errors are still recorded on [`Parser::errors`].
    pub fn parse_expression(&mut self) -> SyntaxResult<Expr> {
        self.expression()
    }

    /// Returns all accumulated errors.
    #[must_use]
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Checks if any errors were encountered during parsing.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the accumulated errors as diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(Diagnostic::from).collect()
    }

    // ===== Token Handling =====

    /// Advances to the next token and returns the consumed one.
    fn advance(&mut self) -> &Token {
        if !self.current.is_eof() {
            let next = self.lexer.next_token();
            self.previous = mem::replace(&mut self.current, next);
            self.consumed += 1;
        }
        &self.previous
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        self.current.kind == *kind
    }

    /// Consumes the current token if it matches.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Checks if we're at EOF.
    fn is_at_end(&self) -> bool {
        self.current.is_eof()
    }

    /// Expects the current token to be of the given kind and consumes it.
    fn expect(&mut self, kind: &TokenKind, expected: &str) -> SyntaxResult<Span> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.error_at_current(expected))
        }
    }

    /// Expects and returns an identifier.
    fn expect_identifier(&mut self, expected: &str) -> SyntaxResult<(String, Span)> {
        if let TokenKind::Ident(name) = &self.current.kind {
            let name = name.clone();
            let span = self.advance().span;
            Ok((name, span))
        } else {
            Err(self.error_at_current(expected))
        }
    }

    /// Builds an error for the current token.
    ///
    /// A lexical error token is reported as itself and consumed, so it is
    /// never reported twice.
    fn error_at_current(&mut self, expected: &str) -> SyntaxError {
        if let Some(err) = self.take_lexical_error() {
            return err;
        }
        ParserError::UnexpectedToken {
            expected: vec![expected.to_string()],
            found: self.current.kind.to_string(),
            span: self.current.span,
        }
        .into()
    }

    fn take_lexical_error(&mut self) -> Option<SyntaxError> {
        if let TokenKind::Error(err) = &self.current.kind {
            let err = err.clone();
            self.advance();
            Some(SyntaxError::Lexer(err))
        } else {
            None
        }
    }

    // ===== Error Recovery =====

    /// Parses one statement, recording its error and resynchronizing on
    /// failure.
    fn declaration(&mut self) -> Option<Stmt> {
        let start = self.consumed;
        match self.statement() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                debug!("recovering from syntax error at {}: {}", err.span(), err);
                self.errors.push(err);
                self.synchronize(start);
                None
            }
        }
    }

    /// Discards tokens until just past a `;`, or up to a statement keyword
    /// or end of input. Always consumes at least one token when the failed
    /// statement consumed none.
    fn synchronize(&mut self, start: usize) {
        if self.consumed == start && !self.is_at_end() {
            self.skip_token();
        }

        while !self.is_at_end() {
            if self.previous.kind == TokenKind::Semicolon && self.consumed > start {
                return;
            }
            if self.current.kind.starts_statement() {
                return;
            }
            self.skip_token();
        }
    }

    /// Consumes a token during recovery, still reporting lexical errors.
    fn skip_token(&mut self) {
        if let Some(err) = self.take_lexical_error() {
            self.errors.push(err);
        } else {
            trace!("skipping '{}' during recovery", self.current.kind);
            self.advance();
        }
    }

    // ===== Statement Parsing =====

    fn statement(&mut self) -> SyntaxResult<Stmt> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Function => self.parse_function_decl(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::LBrace => self.parse_block(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// `let name [= expr];`
    fn parse_let_stmt(&mut self) -> SyntaxResult<Stmt> {
        let start = self.advance().span;
        let (name, name_span) = self.expect_identifier("variable name")?;

        let init = if self.eat(&TokenKind::Eq) {
            Some(self.expression()?)
        } else {
            None
        };

        let end = self.expect(&TokenKind::Semicolon, "';' after variable declaration")?;
        Ok(Stmt::Let {
            name,
            name_span,
            init,
            span: Span::merge(start, end),
        })
    }

    /// `if (cond) then body [else body] end;`
    fn parse_if_stmt(&mut self) -> SyntaxResult<Stmt> {
        let start = self.advance().span;
        let condition = self.parse_condition("if")?;
        self.expect(&TokenKind::Then, "'then' after if condition")?;

        let then_branch = self.parse_body(&[TokenKind::Else, TokenKind::End], "if");
        let else_branch = if self.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_body(&[TokenKind::End], "else")))
        } else {
            None
        };

        self.expect(&TokenKind::End, "'end' to close if")?;
        let end = self.expect(&TokenKind::Semicolon, "';' after 'end'")?;

        Ok(Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
            span: Span::merge(start, end),
        })
    }

    /// `while (cond) do body end;`
    fn parse_while_stmt(&mut self) -> SyntaxResult<Stmt> {
        let start = self.advance().span;
        let condition = self.parse_condition("while")?;
        self.expect(&TokenKind::Do, "'do' after while condition")?;

        let body = self.parse_body(&[TokenKind::End], "while");

        self.expect(&TokenKind::End, "'end' to close while")?;
        let end = self.expect(&TokenKind::Semicolon, "';' after 'end'")?;

        Ok(Stmt::While {
            condition,
            body: Box::new(body),
            span: Span::merge(start, end),
        })
    }

    /// `( expr )` after `if`/`while`.
    fn parse_condition(&mut self, construct: &str) -> SyntaxResult<Expr> {
        self.expect(&TokenKind::LParen, &format!("'(' after '{construct}'"))?;
        let condition = self.expression()?;
        self.expect(&TokenKind::RParen, "')' after condition")?;
        Ok(condition)
    }

    /// Parses the statements of an `if`/`else`/`while` body up to one of
    /// `terminators`, grouped into a block so the body gets its own scope.
    fn parse_body(&mut self, terminators: &[TokenKind], construct: &'static str) -> Stmt {
        let start = self.current.span;
        let errors_before = self.errors.len();
        let mut stmts = Vec::new();

        while !self.is_at_end() && !terminators.contains(&self.current.kind) {
            if let Some(stmt) = self.declaration() {
                stmts.push(stmt);
            }
        }

        if stmts.is_empty() && self.errors.len() == errors_before {
            self.errors
                .push(ParserError::EmptyBody { construct, span: start }.into());
        }

        let span = match (stmts.first(), stmts.last()) {
            (Some(first), Some(last)) => Span::merge(first.span(), last.span()),
            _ => start,
        };
        Stmt::Block { stmts, span }
    }

    /// `function name(p: type, ...) [: type] { stmts }`
    fn parse_function_decl(&mut self) -> SyntaxResult<Stmt> {
        let start = self.advance().span;
        let (name, name_span) = self.expect_identifier("function name")?;

        self.expect(&TokenKind::LParen, "'(' after function name")?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                params.push(self.parse_param()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')' after parameters")?;

        let return_type = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?.0)
        } else {
            None
        };

        self.expect(&TokenKind::LBrace, "'{' before function body")?;
        let (body, end) = self.parse_block_contents()?;

        Ok(Stmt::Function(Rc::new(FunctionDecl {
            name,
            name_span,
            params,
            return_type,
            body,
            span: Span::merge(start, end),
        })))
    }

    fn parse_param(&mut self) -> SyntaxResult<Param> {
        let (name, name_span) = self.expect_identifier("parameter name")?;
        self.expect(&TokenKind::Colon, "':' after parameter name")?;
        let (ty, ty_span) = self.parse_type()?;
        Ok(Param {
            name,
            ty,
            span: Span::merge(name_span, ty_span),
        })
    }

    fn parse_type(&mut self) -> SyntaxResult<(TypeName, Span)> {
        let ty = match self.current.kind {
            TokenKind::IntType => TypeName::Int,
            TokenKind::FloatType => TypeName::Float,
            TokenKind::BoolType => TypeName::Bool,
            TokenKind::StringType => TypeName::String,
            TokenKind::VoidType => TypeName::Void,
            _ => {
                if let Some(err) = self.take_lexical_error() {
                    return Err(err);
                }
                return Err(ParserError::ExpectedType {
                    found: self.current.kind.to_string(),
                    span: self.current.span,
                }
                .into());
            }
        };
        let span = self.advance().span;
        Ok((ty, span))
    }

    /// `return [expr];`
    fn parse_return_stmt(&mut self) -> SyntaxResult<Stmt> {
        let start = self.advance().span;
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        let end = self.expect(&TokenKind::Semicolon, "';' after return value")?;
        Ok(Stmt::Return {
            value,
            span: Span::merge(start, end),
        })
    }

    /// `{ stmts }`
    fn parse_block(&mut self) -> SyntaxResult<Stmt> {
        let start = self.advance().span;
        let (stmts, end) = self.parse_block_contents()?;
        Ok(Stmt::Block {
            stmts,
            span: Span::merge(start, end),
        })
    }

    /// Parses statements up to and including the closing `}`.
    fn parse_block_contents(&mut self) -> SyntaxResult<(Vec<Stmt>, Span)> {
        let mut stmts = Vec::new();
        while !self.is_at_end() && !self.check(&TokenKind::RBrace) {
            if let Some(stmt) = self.declaration() {
                stmts.push(stmt);
            }
        }
        let end = self.expect(&TokenKind::RBrace, "'}' after block")?;
        Ok((stmts, end))
    }

    /// `expr;`
    fn parse_expr_stmt(&mut self) -> SyntaxResult<Stmt> {
        let expr = self.expression()?;
        let end = self.expect(&TokenKind::Semicolon, "';' after expression")?;
        let span = Span::merge(expr.span(), end);
        Ok(Stmt::Expr { expr, span })
    }

    // ===== Expression Parsing =====

    fn expression(&mut self) -> SyntaxResult<Expr> {
        self.parse_assignment()
    }

    /// Assignment is right-associative and only legal on a bare variable.
    fn parse_assignment(&mut self) -> SyntaxResult<Expr> {
        let target = self.parse_binary(MIN_PRECEDENCE)?;

        if !self.check(&TokenKind::Eq) {
            return Ok(target);
        }
        let eq_span = self.advance().span;
        let value = self.parse_assignment()?;

        match target {
            Expr::Variable { name, span } => Ok(Expr::Assign {
                name,
                name_span: span,
                span: Span::merge(span, value.span()),
                value: Box::new(value),
            }),
            other => {
                self.errors
                    .push(ParserError::InvalidAssignmentTarget { span: eq_span }.into());
                Ok(other)
            }
        }
    }

    /// Parses an expression with the given minimum precedence.
    ///
    /// This implements precedence climbing for handling binary operators.
    fn parse_binary(&mut self, precedence: u8) -> SyntaxResult<Expr> {
        let mut left = self.parse_unary()?;

        while let Some(token_prec) = self.current.precedence() {
            if token_prec < precedence {
                break;
            }

            let Some(op) = token_kind_to_binary_op(&self.current.kind) else {
                break;
            };
            let op_span = self.advance().span;

            // Parse right operand with higher precedence
            let right = self.parse_binary(token_prec + 1)?;

            let span = Span::merge(left.span(), right.span());
            left = Expr::Binary {
                left: Box::new(left),
                op,
                op_span,
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> SyntaxResult<Expr> {
        let op = match self.current.kind {
            TokenKind::Minus => UnaryOp::Minus,
            TokenKind::Bang => UnaryOp::Negate,
            _ => return self.parse_call(),
        };
        let op_span = self.advance().span;
        let operand = self.parse_unary()?;
        let span = Span::merge(op_span, operand.span());

        Ok(Expr::Unary {
            op,
            op_span,
            operand: Box::new(operand),
            span,
        })
    }

    /// A primary followed by any number of `( args )` suffixes.
    fn parse_call(&mut self) -> SyntaxResult<Expr> {
        let mut expr = self.parse_primary()?;

        while self.eat(&TokenKind::LParen) {
            let args = self.parse_arguments()?;
            let close = self.previous.span;

            expr = match expr {
                Expr::Variable { name, span } => Expr::Call {
                    callee: name,
                    callee_span: span,
                    args,
                    span: Span::merge(span, close),
                },
                other => {
                    self.errors
                        .push(ParserError::InvalidCallTarget { span: other.span() }.into());
                    other
                }
            };
        }

        Ok(expr)
    }

    /// Parses call arguments up to and including the closing `)`.
    fn parse_arguments(&mut self) -> SyntaxResult<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.expression()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')' after arguments")?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> SyntaxResult<Expr> {
        let span = self.current.span;

        let literal = match &self.current.kind {
            TokenKind::IntLiteral(value) => Some(Literal::Integer(*value)),
            TokenKind::FloatLiteral(value) => Some(Literal::Float(*value)),
            TokenKind::BoolLiteral(value) => Some(Literal::Boolean(*value)),
            TokenKind::StringLiteral(value) => Some(Literal::String(value.clone())),
            _ => None,
        };
        if let Some(value) = literal {
            self.advance();
            return Ok(Expr::Literal { value, span });
        }

        if let TokenKind::Ident(name) = &self.current.kind {
            let name = name.clone();
            self.advance();
            return Ok(Expr::Variable { name, span });
        }

        if self.eat(&TokenKind::LParen) {
            let inner = self.expression()?;
            self.expect(&TokenKind::RParen, "')' after expression")?;
            return Ok(inner);
        }

        if let Some(err) = self.take_lexical_error() {
            return Err(err);
        }
        Err(ParserError::ExpectedExpression {
            found: self.current.kind.to_string(),
            span,
        }
        .into())
    }
}

/// Converts a `TokenKind` to a `BinaryOp`.
fn token_kind_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::BangEq => BinaryOp::Neq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::LtEq => BinaryOp::Lte,
        TokenKind::GtEq => BinaryOp::Gte,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::PipePipe => BinaryOp::Or,
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexerError;

    fn parse_expr(source: &str) -> Expr {
        let mut parser = Parser::new(source);
        let expr = parser.parse_expression().unwrap();
        assert!(!parser.has_errors(), "unexpected errors: {:?}", parser.errors());
        expr
    }

    fn parse_ok(source: &str) -> Program {
        let mut parser = Parser::new(source);
        let program = parser.parse();
        assert!(!parser.has_errors(), "unexpected errors: {:?}", parser.errors());
        program
    }

    fn parse_errors(source: &str) -> (Program, Vec<SyntaxError>) {
        let mut parser = Parser::new(source);
        let program = parser.parse();
        (program, parser.errors().to_vec())
    }

    #[test]
    fn test_parse_integer_literal() {
        match parse_expr("42") {
            Expr::Literal { value: Literal::Integer(42), .. } => {}
            other => panic!("Expected integer literal, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unary_minus() {
        match parse_expr("-x") {
            Expr::Unary { op: UnaryOp::Minus, operand, .. } => {
                assert!(matches!(*operand, Expr::Variable { .. }));
            }
            other => panic!("Expected unary minus, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_parenthesized_returns_inner() {
        match parse_expr("(1 + 2)") {
            Expr::Binary { op: BinaryOp::Add, .. } => {}
            other => panic!("Expected binary add, got {:?}", other),
        }
    }

    #[test]
    fn test_operator_precedence() {
        // 1 + (2 * 3)
        match parse_expr("1 + 2 * 3") {
            Expr::Binary { op: BinaryOp::Add, left, right, .. } => {
                assert!(matches!(*left, Expr::Literal { .. }));
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("Expected binary add, got {:?}", other),
        }
    }

    #[test]
    fn test_logical_precedence() {
        // a || (b && (c == d))
        match parse_expr("a || b && c == d") {
            Expr::Binary { op: BinaryOp::Or, right, .. } => match *right {
                Expr::Binary { op: BinaryOp::And, right, .. } => {
                    assert!(matches!(*right, Expr::Binary { op: BinaryOp::Eq, .. }));
                }
                other => panic!("Expected &&, got {:?}", other),
            },
            other => panic!("Expected ||, got {:?}", other),
        }
    }

    #[test]
    fn test_left_associativity() {
        // (10 - 4) - 3
        match parse_expr("10 - 4 - 3") {
            Expr::Binary { op: BinaryOp::Sub, left, right, .. } => {
                assert!(matches!(*left, Expr::Binary { op: BinaryOp::Sub, .. }));
                assert!(matches!(*right, Expr::Literal { value: Literal::Integer(3), .. }));
            }
            other => panic!("Expected subtraction, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_is_right_associative() {
        match parse_expr("a = b = 3") {
            Expr::Assign { name, value, .. } => {
                assert_eq!(name, "a");
                assert!(matches!(*value, Expr::Assign { .. }));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_keeps_operator_span() {
        match parse_expr("true + 1") {
            Expr::Binary { op_span, .. } => {
                assert_eq!(op_span.start, 5);
                assert_eq!(op_span.start_col, 6);
            }
            other => panic!("Expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_call() {
        match parse_expr("add(1, x * 2)") {
            Expr::Call { callee, args, .. } => {
                assert_eq!(callee, "add");
                assert_eq!(args.len(), 2);
            }
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_assignment_target() {
        let mut parser = Parser::new("1 + 2 = 3");
        let expr = parser.parse_expression().unwrap();

        assert!(matches!(expr, Expr::Binary { op: BinaryOp::Add, .. }));
        assert_eq!(parser.errors().len(), 1);
        assert_eq!(
            parser.errors()[0],
            SyntaxError::Parser(ParserError::InvalidAssignmentTarget {
                span: Span::new(6, 7, 1, 7, 1, 8)
            })
        );
    }

    #[test]
    fn test_invalid_call_target() {
        let mut parser = Parser::new("1(2)");
        parser.parse_expression().unwrap();
        assert!(matches!(
            parser.errors()[0],
            SyntaxError::Parser(ParserError::InvalidCallTarget { .. })
        ));
    }

    #[test]
    fn test_parse_let_with_and_without_init() {
        let program = parse_ok("let x = 1; let y;");
        assert!(matches!(&program.statements[0], Stmt::Let { init: Some(_), .. }));
        assert!(matches!(&program.statements[1], Stmt::Let { init: None, .. }));
    }

    #[test]
    fn test_parse_if_else() {
        let program = parse_ok("if (x > 1) then print(1); else print(2); end;");
        match &program.statements[0] {
            Stmt::If { then_branch, else_branch, .. } => {
                assert!(matches!(&**then_branch, Stmt::Block { stmts, .. } if stmts.len() == 1));
                assert!(else_branch.is_some());
            }
            other => panic!("Expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_while_groups_multiple_statements() {
        let program = parse_ok("let i = 1; while (i <= 3) do print(i); i = i + 1; end;");
        match &program.statements[1] {
            Stmt::While { body, .. } => match &**body {
                Stmt::Block { stmts, .. } => assert_eq!(stmts.len(), 2),
                other => panic!("Expected block body, got {:?}", other),
            },
            other => panic!("Expected while, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_function_decl() {
        let program = parse_ok("function add(a: int, b: float): float { return a + b; }");
        match &program.statements[0] {
            Stmt::Function(decl) => {
                assert_eq!(decl.name, "add");
                assert_eq!(decl.params.len(), 2);
                assert_eq!(decl.params[1].ty, TypeName::Float);
                assert_eq!(decl.return_type, Some(TypeName::Float));
                assert_eq!(decl.body.len(), 1);
            }
            other => panic!("Expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_function_without_return_type() {
        let program = parse_ok("function hello() { print(\"hi\"); return; }");
        match &program.statements[0] {
            Stmt::Function(decl) => {
                assert!(decl.params.is_empty());
                assert_eq!(decl.return_type, None);
                assert!(matches!(decl.body[1], Stmt::Return { value: None, .. }));
            }
            other => panic!("Expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_blocks() {
        let program = parse_ok("let x = 1; { let x = 2; { print(x); } } print(x);");
        assert_eq!(program.statements.len(), 3);
        assert!(matches!(&program.statements[1], Stmt::Block { stmts, .. } if stmts.len() == 2));
    }

    #[test]
    fn test_two_malformed_statements_yield_two_errors() {
        let (program, errors) = parse_errors("let = 5; print(1 +); print(2);");
        assert_eq!(errors.len(), 2);
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_missing_semicolon_recovers_at_keyword() {
        let (program, errors) = parse_errors("let x = 1 let y = 2;");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "parser error: expected ';' after variable declaration, found 'let'"
        );
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_block_recovers_per_statement() {
        let (program, errors) = parse_errors("{ let = 1; print(2); }");
        assert_eq!(errors.len(), 1);
        match &program.statements[0] {
            Stmt::Block { stmts, .. } => assert_eq!(stmts.len(), 1),
            other => panic!("Expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_lexical_error_reported_once() {
        let (_, errors) = parse_errors("let x = @; print(x);");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            SyntaxError::Lexer(LexerError::UnknownChar { ch: '@', .. })
        ));
    }

    #[test]
    fn test_lexical_error_skipped_during_recovery_is_reported() {
        let (_, errors) = parse_errors("let = $;");
        assert_eq!(errors.len(), 2);
        assert!(!errors[0].is_lexical());
        assert!(errors[1].is_lexical());
    }

    #[test]
    fn test_empty_while_body() {
        let (_, errors) = parse_errors("while (true) do end;");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            SyntaxError::Parser(ParserError::EmptyBody { construct: "while", .. })
        ));
    }

    #[test]
    fn test_garbage_always_terminates() {
        let (program, errors) = parse_errors(") ) end else } ;");
        assert!(program.is_empty());
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_diagnostics_carry_stage() {
        let mut parser = Parser::new("let 1 = x;");
        parser.parse();
        let diagnostics = parser.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].to_string(),
            "[Syntax Error] (Parser) expected variable name, found '1' at line 1:5"
        );
    }
}
