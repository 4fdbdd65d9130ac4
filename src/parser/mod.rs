//! PEST-based parser for Stave script
//!
//! Produces the executor AST, with span information for error reporting.

use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::executor::types::ast::{
    AssignOp, BinaryOp, Expr, ForLoopKind, MemberAccess, Span, Stmt, UnaryOp, VarKind,
};

pub mod semantic_validator;

#[cfg(test)]
mod tests;

/* ===================== Unit Definition ===================== */

/// Unit definition - one `function name(params) { ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitDef {
    /// Entry point name
    pub name: String,
    /// Parameter names, in order
    pub params: Vec<String>,
    /// Function body (a Block)
    pub body: Stmt,
    /// Span of the entire unit
    #[serde(default, skip_serializing_if = "is_default_span")]
    pub span: Span,
}

fn is_default_span(span: &Span) -> bool {
    *span == Span::default()
}

/* ===================== PEST Parser ===================== */

#[derive(Parser)]
#[grammar = "parser/stave.pest"]
struct StaveParser;

/* ===================== Error Types ===================== */

#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Source does not match the grammar
    #[error("{0}")]
    PestError(String, Option<Span>),
    /// Source matched the grammar but could not be turned into an AST
    #[error("{0}")]
    BuildError(String, Option<Span>),
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::PestError(_, span) => *span,
            ParseError::BuildError(_, span) => *span,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::PestError(msg, _) => msg,
            ParseError::BuildError(msg, _) => msg,
        }
    }

    /// 1-based (line, column) of the error, (1, 1) when unknown
    pub fn line_col(&self) -> (usize, usize) {
        self.span()
            .map(|span| (span.start_line + 1, span.start_col + 1))
            .unwrap_or((1, 1))
    }

    fn build(message: impl Into<String>, span: Span) -> Self {
        ParseError::BuildError(message.into(), Some(span))
    }
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        let span = match err.line_col {
            pest::error::LineColLocation::Pos((line, col)) => Span {
                start: 0,
                end: 0,
                start_line: line.saturating_sub(1),
                start_col: col.saturating_sub(1),
                end_line: line.saturating_sub(1),
                end_col: col,
            },
            pest::error::LineColLocation::Span((start_line, start_col), (end_line, end_col)) => {
                Span {
                    start: 0,
                    end: 0,
                    start_line: start_line.saturating_sub(1),
                    start_col: start_col.saturating_sub(1),
                    end_line: end_line.saturating_sub(1),
                    end_col: end_col.saturating_sub(1),
                }
            }
        };
        let message = match &err.variant {
            pest::error::ErrorVariant::ParsingError {
                positives,
                negatives,
            } => syntax_message(positives, negatives),
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };
        ParseError::PestError(message, Some(span))
    }
}

/// "expected a, b, or c" from the rules pest attempted, one entry per name
fn syntax_message(positives: &[Rule], negatives: &[Rule]) -> String {
    let expected = describe_rules(positives);
    let unexpected = describe_rules(negatives);

    match (unexpected.is_empty(), expected.is_empty()) {
        (true, true) => "unknown parsing error".to_string(),
        (true, false) => format!("expected {}", expected),
        (false, true) => format!("unexpected {}", unexpected),
        (false, false) => format!("unexpected {}; expected {}", unexpected, expected),
    }
}

fn describe_rules(rules: &[Rule]) -> String {
    let mut names: Vec<String> = Vec::new();
    for rule in rules {
        let name = describe_rule(rule);
        if !names.contains(&name) {
            names.push(name);
        }
    }

    match names.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} or {}", first, second),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
    }
}

/// Human-readable names for grammar rules in syntax errors
fn describe_rule(rule: &Rule) -> String {
    let name = match rule {
        Rule::EOI => "end of input",
        Rule::identifier => "identifier",
        Rule::property_name => "property name",
        Rule::statement => "statement",
        Rule::block => "block",
        Rule::expression | Rule::ternary_expr | Rule::return_value => "expression",
        Rule::assign_op | Rule::assign_path_segment => "assignment",
        Rule::var_kind => "'let' or 'const'",
        Rule::for_kind => "'of' or 'in'",
        Rule::else_clause | Rule::kw_else => "'else'",
        Rule::kw_function => "'function'",
        Rule::kw_catch => "'catch'",
        Rule::kw_if => "'if'",
        Rule::kw_while => "'while'",
        Rule::kw_for => "'for'",
        Rule::kw_return => "'return'",
        Rule::kw_break => "'break'",
        Rule::kw_continue => "'continue'",
        Rule::kw_try => "'try'",
        Rule::kw_throw => "'throw'",
        Rule::postfix
        | Rule::call_suffix
        | Rule::regular_access
        | Rule::optional_access
        | Rule::index_access => "call or member access",
        Rule::op_nullish => "'??'",
        Rule::op_or => "'||'",
        Rule::op_and => "'&&'",
        Rule::op_eq | Rule::op_ne => "equality operator",
        Rule::op_lt | Rule::op_lte | Rule::op_gt | Rule::op_gte => "comparison operator",
        Rule::op_add | Rule::op_sub | Rule::op_mul | Rule::op_div | Rule::op_mod => {
            "arithmetic operator"
        }
        Rule::number | Rule::string | Rule::boolean | Rule::null_lit | Rule::literal => "literal",
        other => return format!("{:?}", other),
    };
    name.to_string()
}

pub type ParseResult<T> = Result<T, ParseError>;

/* ===================== Span Helpers ===================== */

/// Convert a PEST pair's span to our Span type
fn pair_to_span(pair: &Pair<Rule>) -> Span {
    let pest_span = pair.as_span();
    let (start_line, start_col) = pest_span.start_pos().line_col();
    let (end_line, end_col) = pest_span.end_pos().line_col();

    Span::new(
        pest_span.start(),
        pest_span.end(),
        start_line - 1,
        start_col - 1,
        end_line - 1,
        end_col - 1,
    )
}

/// Take the next child pair, failing with a build error if the grammar
/// produced fewer children than expected
fn next_pair<'i>(inner: &mut Pairs<'i, Rule>, span: Span, what: &str) -> ParseResult<Pair<'i, Rule>> {
    inner
        .next()
        .ok_or_else(|| ParseError::build(format!("Expected {}", what), span))
}

/* ===================== Public API ===================== */

/// Parse a compiled unit: exactly one `function name(params) { ... }`
pub fn parse_unit(source: &str) -> ParseResult<UnitDef> {
    let mut pairs = StaveParser::parse(Rule::program, source)?;
    let program = next_pair(&mut pairs, Span::default(), "program")?;
    let program_span = pair_to_span(&program);

    let mut inner = program.into_inner();
    let function = next_pair(&mut inner, program_span, "function")?;
    build_unit_function(function, program_span)
}

/// Parse a bare statement list into a Block (testing API)
pub fn parse(source: &str) -> ParseResult<Stmt> {
    let mut pairs = StaveParser::parse(Rule::statements, source)?;
    let list = next_pair(&mut pairs, Span::default(), "statements")?;
    let span = pair_to_span(&list);

    let body = list
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::statement)
        .map(build_statement)
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(Stmt::Block { body, span })
}

/* ===================== AST Builder ===================== */

fn build_unit_function(pair: Pair<Rule>, program_span: Span) -> ParseResult<UnitDef> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let name = next_pair(&mut inner, span, "function name")?.as_str().to_string();

    let mut params = Vec::new();
    let mut next = next_pair(&mut inner, span, "function body")?;
    if next.as_rule() == Rule::param_list {
        params = next.into_inner().map(|p| p.as_str().to_string()).collect();
        next = next_pair(&mut inner, span, "function body")?;
    }

    let body = build_block(next)?;

    Ok(UnitDef {
        name,
        params,
        body,
        span: program_span,
    })
}

fn build_block(pair: Pair<Rule>) -> ParseResult<Stmt> {
    let span = pair_to_span(&pair);
    let statements = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::statement)
        .map(build_statement)
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(Stmt::Block {
        body: statements,
        span,
    })
}

fn build_var_kind(pair: &Pair<Rule>) -> ParseResult<VarKind> {
    match pair.as_str() {
        "let" => Ok(VarKind::Let),
        "const" => Ok(VarKind::Const),
        other => Err(ParseError::build(
            format!("Expected 'let' or 'const', got: {}", other),
            pair_to_span(pair),
        )),
    }
}

fn build_if_stmt(pair: Pair<Rule>) -> ParseResult<Stmt> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let test = build_expression(next_pair(&mut inner, span, "condition")?)?;
    let then_s = build_statement(next_pair(&mut inner, span, "statement")?)?;

    let else_s = match inner.next() {
        Some(else_clause) => {
            let else_span = pair_to_span(&else_clause);
            let mut else_inner = else_clause.into_inner();
            let stmt = next_pair(&mut else_inner, else_span, "statement after 'else'")?;
            Some(Box::new(build_statement(stmt)?))
        }
        None => None,
    };

    Ok(Stmt::If {
        test,
        then_s: Box::new(then_s),
        else_s,
        span,
    })
}

fn build_while_stmt(pair: Pair<Rule>) -> ParseResult<Stmt> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let test = build_expression(next_pair(&mut inner, span, "condition")?)?;
    let body = build_statement(next_pair(&mut inner, span, "loop body")?)?;

    Ok(Stmt::While {
        test,
        body: Box::new(body),
        span,
    })
}

fn build_for_loop_stmt(pair: Pair<Rule>) -> ParseResult<Stmt> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let var_kind = build_var_kind(&next_pair(&mut inner, span, "'let' or 'const'")?)?;

    let binding_pair = next_pair(&mut inner, span, "loop variable")?;
    let binding_span = pair_to_span(&binding_pair);
    let binding = binding_pair.as_str().to_string();

    let kind_pair = next_pair(&mut inner, span, "'of' or 'in'")?;
    let kind = match kind_pair.as_str() {
        "of" => ForLoopKind::Of,
        "in" => ForLoopKind::In,
        other => {
            return Err(ParseError::build(
                format!("Expected 'of' or 'in', got: {}", other),
                pair_to_span(&kind_pair),
            ))
        }
    };

    let iterable = build_expression(next_pair(&mut inner, span, "iterable")?)?;
    let body = build_statement(next_pair(&mut inner, span, "loop body")?)?;

    Ok(Stmt::ForLoop {
        kind,
        var_kind,
        binding,
        binding_span,
        iterable,
        body: Box::new(body),
        span,
    })
}

fn build_declare_stmt(pair: Pair<Rule>) -> ParseResult<Stmt> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let var_kind = build_var_kind(&next_pair(&mut inner, span, "'let' or 'const'")?)?;
    let name = next_pair(&mut inner, span, "variable name")?.as_str().to_string();

    let init = match inner.next() {
        Some(expr_pair) => Some(build_expression(expr_pair)?),
        None => None,
    };

    if var_kind == VarKind::Const && init.is_none() {
        return Err(ParseError::build(
            format!("Missing initializer in const declaration of '{}'", name),
            span,
        ));
    }

    Ok(Stmt::Declare {
        var_kind,
        name,
        init,
        span,
    })
}

fn build_try_stmt(pair: Pair<Rule>) -> ParseResult<Stmt> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let body = build_block(next_pair(&mut inner, span, "try block")?)?;

    let catch_var_pair = next_pair(&mut inner, span, "catch variable")?;
    let catch_var_span = pair_to_span(&catch_var_pair);
    let catch_var = catch_var_pair.as_str().to_string();

    let catch_body = build_block(next_pair(&mut inner, span, "catch block")?)?;

    Ok(Stmt::Try {
        body: Box::new(body),
        catch_var,
        catch_var_span,
        catch_body: Box::new(catch_body),
        span,
    })
}

fn build_assign_stmt(pair: Pair<Rule>) -> ParseResult<Stmt> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let var_pair = next_pair(&mut inner, span, "variable name")?;
    let var_span = pair_to_span(&var_pair);
    let var = var_pair.as_str().to_string();

    let mut path = Vec::new();
    let mut op = None;

    for pair in inner.by_ref() {
        match pair.as_rule() {
            Rule::assign_path_segment => {
                let segment_span = pair_to_span(&pair);
                let mut segment_inner = pair.into_inner();
                let segment = next_pair(&mut segment_inner, segment_span, "property or index")?;
                match segment.as_rule() {
                    Rule::property_name => path.push(MemberAccess::Prop {
                        property: segment.as_str().to_string(),
                        span: segment_span,
                    }),
                    _ => path.push(MemberAccess::Index {
                        expr: build_expression(segment)?,
                        span: segment_span,
                    }),
                }
            }
            Rule::assign_op => {
                op = Some(match pair.as_str() {
                    "+=" => AssignOp::Add,
                    "-=" => AssignOp::Sub,
                    "*=" => AssignOp::Mul,
                    "/=" => AssignOp::Div,
                    _ => AssignOp::Set,
                });
                break;
            }
            other => {
                return Err(ParseError::build(
                    format!("Unexpected assignment content: {:?}", other),
                    pair_to_span(&pair),
                ))
            }
        }
    }

    let op = op.ok_or_else(|| ParseError::build("Expected assignment operator", span))?;
    let value = build_expression(next_pair(&mut inner, span, "assigned value")?)?;

    Ok(Stmt::Assign {
        var,
        var_span,
        path,
        op,
        value,
        span,
    })
}

fn build_statement(pair: Pair<Rule>) -> ParseResult<Stmt> {
    let span = pair_to_span(&pair);

    match pair.as_rule() {
        Rule::statement => {
            let mut inner = pair.into_inner();
            build_statement(next_pair(&mut inner, span, "statement")?)
        }
        Rule::return_stmt => {
            let value = match pair.into_inner().next() {
                Some(expr_pair) => Some(build_expression(expr_pair)?),
                None => None,
            };
            Ok(Stmt::Return { value, span })
        }
        Rule::throw_stmt => {
            let mut inner = pair.into_inner();
            let value = build_expression(next_pair(&mut inner, span, "thrown value")?)?;
            Ok(Stmt::Throw { value, span })
        }
        Rule::if_stmt => build_if_stmt(pair),
        Rule::while_stmt => build_while_stmt(pair),
        Rule::for_loop_stmt => build_for_loop_stmt(pair),
        Rule::try_stmt => build_try_stmt(pair),
        Rule::break_stmt => Ok(Stmt::Break { span }),
        Rule::continue_stmt => Ok(Stmt::Continue { span }),
        Rule::block => build_block(pair),
        Rule::declare_stmt => build_declare_stmt(pair),
        Rule::assign_stmt => build_assign_stmt(pair),
        Rule::expr_stmt => {
            let mut inner = pair.into_inner();
            let expr = build_expression(next_pair(&mut inner, span, "expression")?)?;
            Ok(Stmt::Expr { expr, span })
        }
        _ => Err(ParseError::build(
            format!("Unexpected statement rule: {:?}", pair.as_rule()),
            span,
        )),
    }
}

fn binary_op_for(rule: Rule) -> Option<BinaryOp> {
    let op = match rule {
        Rule::op_and => BinaryOp::And,
        Rule::op_or => BinaryOp::Or,
        Rule::op_nullish => BinaryOp::Nullish,
        Rule::op_eq => BinaryOp::Eq,
        Rule::op_ne => BinaryOp::Ne,
        Rule::op_lt => BinaryOp::Lt,
        Rule::op_lte => BinaryOp::Lte,
        Rule::op_gt => BinaryOp::Gt,
        Rule::op_gte => BinaryOp::Gte,
        Rule::op_add => BinaryOp::Add,
        Rule::op_sub => BinaryOp::Sub,
        Rule::op_mul => BinaryOp::Mul,
        Rule::op_div => BinaryOp::Div,
        Rule::op_mod => BinaryOp::Mod,
        _ => return None,
    };
    Some(op)
}

/// Fold `operand (op operand)*` left-associatively
fn build_binary_expr(pair: Pair<Rule>) -> ParseResult<Expr> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let mut left = build_expression(next_pair(&mut inner, span, "operand")?)?;

    while let Some(op_pair) = inner.next() {
        let op = binary_op_for(op_pair.as_rule()).ok_or_else(|| {
            ParseError::build(
                format!("Expected operator, got {:?}", op_pair.as_rule()),
                pair_to_span(&op_pair),
            )
        })?;

        let right = build_expression(next_pair(&mut inner, span, "right operand")?)?;
        let new_span = left.span().merge(&right.span());

        left = Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span: new_span,
        };
    }

    Ok(left)
}

fn build_expression(pair: Pair<Rule>) -> ParseResult<Expr> {
    let span = pair_to_span(&pair);

    match pair.as_rule() {
        Rule::expression | Rule::return_value | Rule::primary | Rule::literal => {
            let mut inner = pair.into_inner();
            build_expression(next_pair(&mut inner, span, "expression")?)
        }
        Rule::ternary_expr => {
            let mut inner = pair.into_inner();
            let condition = build_expression(next_pair(&mut inner, span, "condition")?)?;

            match inner.next() {
                Some(consequent_pair) => {
                    let consequent = build_expression(consequent_pair)?;
                    let alternate =
                        build_expression(next_pair(&mut inner, span, "':' branch")?)?;
                    Ok(Expr::Ternary {
                        condition: Box::new(condition),
                        consequent: Box::new(consequent),
                        alternate: Box::new(alternate),
                        span,
                    })
                }
                None => Ok(condition),
            }
        }
        Rule::nullish_expr
        | Rule::logical_or_expr
        | Rule::logical_and_expr
        | Rule::equality_expr
        | Rule::comparison_expr
        | Rule::additive_expr
        | Rule::multiplicative_expr => build_binary_expr(pair),
        Rule::unary_expr => {
            let mut inner = pair.into_inner();
            let first = next_pair(&mut inner, span, "operand")?;

            let op = match first.as_rule() {
                Rule::op_not => UnaryOp::Not,
                Rule::op_neg => UnaryOp::Neg,
                _ => return build_expression(first),
            };
            let operand = build_expression(next_pair(&mut inner, span, "operand")?)?;
            Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
                span,
            })
        }
        Rule::call_expr => build_call_expr(pair),
        Rule::identifier => Ok(Expr::Ident {
            name: pair.as_str().to_string(),
            span,
        }),
        Rule::number => {
            let num_str = pair.as_str();
            let value = num_str.parse::<f64>().map_err(|e| {
                ParseError::build(format!("Failed to parse number '{}': {}", num_str, e), span)
            })?;
            Ok(Expr::LitNum { v: value, span })
        }
        Rule::boolean => Ok(Expr::LitBool {
            v: pair.as_str() == "true",
            span,
        }),
        Rule::string => Ok(Expr::LitStr {
            v: build_string(pair)?,
            span,
        }),
        Rule::null_lit => Ok(Expr::LitNull { span }),
        Rule::object_lit => build_object_literal(pair),
        Rule::array_lit => build_array_literal(pair),
        _ => Err(ParseError::build(
            format!("Unexpected expression rule: {:?}", pair.as_rule()),
            span,
        )),
    }
}

fn build_call_expr(pair: Pair<Rule>) -> ParseResult<Expr> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();
    let mut expr = build_expression(next_pair(&mut inner, span, "expression")?)?;

    for postfix_pair in inner {
        let postfix_span = pair_to_span(&postfix_pair);
        let mut postfix_inner = postfix_pair.into_inner();
        let postfix = next_pair(&mut postfix_inner, postfix_span, "postfix")?;
        let new_span = expr.span().merge(&postfix_span);

        expr = match postfix.as_rule() {
            Rule::call_suffix => {
                let args = match postfix.into_inner().next() {
                    Some(arg_list) => build_expression_list(arg_list)?,
                    None => vec![],
                };
                Expr::Call {
                    callee: Box::new(expr),
                    args,
                    span: new_span,
                }
            }
            Rule::optional_access | Rule::regular_access => {
                let optional = postfix.as_rule() == Rule::optional_access;
                let mut access_inner = postfix.into_inner();
                let prop_pair = next_pair(&mut access_inner, postfix_span, "property name")?;
                Expr::Member {
                    object: Box::new(expr),
                    property: prop_pair.as_str().to_string(),
                    property_span: pair_to_span(&prop_pair),
                    optional,
                    span: new_span,
                }
            }
            Rule::index_access => {
                let mut access_inner = postfix.into_inner();
                let index = build_expression(next_pair(&mut access_inner, postfix_span, "index")?)?;
                Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                    span: new_span,
                }
            }
            other => {
                return Err(ParseError::build(
                    format!("Unexpected postfix rule: {:?}", other),
                    postfix_span,
                ))
            }
        };
    }

    Ok(expr)
}

fn build_expression_list(pair: Pair<Rule>) -> ParseResult<Vec<Expr>> {
    pair.into_inner().map(build_expression).collect()
}

/// Decode a string literal's contents, resolving backslash escapes
fn build_string(pair: Pair<Rule>) -> ParseResult<String> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();
    let raw = next_pair(&mut inner, span, "string contents")?.as_str();
    unescape(raw).map_err(|c| ParseError::build(format!("Unknown escape sequence '\\{}'", c), span))
}

/// Resolve backslash escapes, failing with the first unknown escape character
fn unescape(raw: &str) -> Result<String, char> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(c @ ('\\' | '"' | '\'')) => out.push(c),
            Some(other) => return Err(other),
            None => out.push('\\'),
        }
    }

    Ok(out)
}

fn build_object_literal(pair: Pair<Rule>) -> ParseResult<Expr> {
    let span = pair_to_span(&pair);

    let properties = match pair.into_inner().next() {
        Some(property_list) => property_list
            .into_inner()
            .map(build_property)
            .collect::<ParseResult<Vec<_>>>()?,
        None => vec![],
    };

    Ok(Expr::LitObj { properties, span })
}

fn build_property(pair: Pair<Rule>) -> ParseResult<(String, Span, Expr)> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();
    let property = next_pair(&mut inner, span, "property")?;
    let property_span = pair_to_span(&property);

    match property.as_rule() {
        Rule::property_pair => {
            let mut pair_inner = property.into_inner();
            let key_pair = next_pair(&mut pair_inner, property_span, "property key")?;
            let key_span = pair_to_span(&key_pair);
            let key = match key_pair.as_rule() {
                Rule::string => build_string(key_pair)?,
                _ => key_pair.as_str().to_string(),
            };
            let value = build_expression(next_pair(&mut pair_inner, property_span, "property value")?)?;
            Ok((key, key_span, value))
        }
        Rule::property_shorthand => {
            let key = property.as_str().to_string();
            let value = Expr::Ident {
                name: key.clone(),
                span: property_span,
            };
            Ok((key, property_span, value))
        }
        other => Err(ParseError::build(
            format!("Unexpected property rule: {:?}", other),
            property_span,
        )),
    }
}

fn build_array_literal(pair: Pair<Rule>) -> ParseResult<Expr> {
    let span = pair_to_span(&pair);

    let elements = match pair.into_inner().next() {
        Some(element_list) => build_expression_list(element_list)?,
        None => vec![],
    };

    Ok(Expr::LitList { elements, span })
}
