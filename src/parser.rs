use std::collections::BTreeSet;
use std::iter::Peekable;
use std::slice::Iter;

use itertools::Itertools;
use log::debug;

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::normalizer::{normalize, OperatorKind, Token, TokenKind};
use crate::tokenizer::tokenize;
use crate::truth_table::TruthTable;
use crate::Variable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,
    Or,
    Xor,
}

/// A parsed boolean expression.
///
/// The remaining connectives are expanded while parsing:
///
/// | connective      | tree               |
/// |-----------------|--------------------|
/// | `a NAND b`      | `Not(And(a, b))`   |
/// | `a NOR b`       | `Not(Or(a, b))`    |
/// | `a IMPLIES b`   | `Or(Not(a), b)`    |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Constant(bool),
    Var(Variable),
    Not(Box<Expr>),
    BinaryOp(BinaryOperator, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn not(operand: Self) -> Self {
        Self::Not(Box::new(operand))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Self::BinaryOp(BinaryOperator::And, Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Self::BinaryOp(BinaryOperator::Or, Box::new(lhs), Box::new(rhs))
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Self::BinaryOp(BinaryOperator::Xor, Box::new(lhs), Box::new(rhs))
    }

    pub fn nand(lhs: Self, rhs: Self) -> Self {
        Self::not(Self::and(lhs, rhs))
    }

    pub fn nor(lhs: Self, rhs: Self) -> Self {
        Self::not(Self::or(lhs, rhs))
    }

    /// Material implication: `Or(Not(lhs), rhs)`.
    pub fn implies(lhs: Self, rhs: Self) -> Self {
        Self::or(Self::not(lhs), rhs)
    }

    /// Builds the tree for a binary connective, together with its height given
    /// the heights of the operands.
    fn binary(op: OperatorKind, (lhs, lh): Node, (rhs, rh): Node) -> Node {
        match op {
            OperatorKind::And => (Self::and(lhs, rhs), lh.max(rh) + 1),
            OperatorKind::Or => (Self::or(lhs, rhs), lh.max(rh) + 1),
            OperatorKind::Xor => (Self::xor(lhs, rhs), lh.max(rh) + 1),
            OperatorKind::Nand => (Self::nand(lhs, rhs), lh.max(rh) + 2),
            OperatorKind::Nor => (Self::nor(lhs, rhs), lh.max(rh) + 2),
            OperatorKind::Implies => (Self::implies(lhs, rhs), (lh + 1).max(rh) + 1),
            OperatorKind::Not => unreachable!("NOT is only ever parsed as a prefix operator"),
        }
    }

    /// The distinct variables occurring in the expression, in ascending order.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<Variable>) {
        match self {
            Self::Constant(_) => {}
            Self::Var(v) => {
                vars.insert(*v);
            }
            Self::Not(e) => e.collect_variables(vars),
            Self::BinaryOp(_, l, r) => {
                l.collect_variables(vars);
                r.collect_variables(vars);
            }
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Self::Constant(_) | Self::Var(_) => 1,
            Self::Not(e) => 1 + e.size(),
            Self::BinaryOp(_, l, r) => 1 + l.size() + r.size(),
        }
    }
}

/// A statement that passed every front-end stage and is ready for evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStatement {
    vars: Vec<Variable>,
    label: String,
    expr: Expr,
}

impl ParsedStatement {
    /// Tokenizes, normalizes and parses `src`, then checks the variable count
    /// against `limits`.
    pub fn new(src: &str, limits: &Limits) -> Result<Self> {
        let lexemes = tokenize(src)?;
        let normalized = normalize(&lexemes);

        let vars: Vec<Variable> = normalized.variables().unique().sorted().collect();
        if vars.is_empty() {
            return Err(Error::EmptyStatement);
        }

        let expr = Parser::new(&normalized.tokens, src.len())
            .with_limits(limits)
            .parse_formula()?;

        if vars.len() > limits.max_variables {
            return Err(Error::TooManyVariables {
                count: vars.len(),
                limit: limits.max_variables,
            });
        }

        debug!("parsed {:?} over {} variables", normalized.label, vars.len());

        Ok(Self {
            vars,
            label: normalized.label,
            expr,
        })
    }

    /// The distinct variables of the statement, in ascending alphabetical order.
    pub fn variables(&self) -> &[Variable] {
        &self.vars
    }

    /// The statement re-printed in canonical notation.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn truth_table(&self) -> Result<TruthTable> {
        TruthTable::assemble(&self.expr, self.vars.clone(), self.label.clone())
    }
}

type TokenReader<'a> = Peekable<Iter<'a, Token>>;

/// A subtree and its height.
type Node = (Expr, usize);

/// Recursive-descent parser over canonical tokens.
///
/// ```text
/// implication := disjunction ( IMPLIES implication )?
/// disjunction := conjunction ( (OR | NOR | XOR) conjunction )*
/// conjunction := primary ( (AND | NAND) primary )*
/// primary     := Variable | Constant | '(' implication ')' | NOT primary
/// ```
///
/// Unlike the iterated AND and OR levels, IMPLIES recurses on its right
/// operand, so `a = b = c` reads as `a = (b = c)`.
///
/// Nesting of parentheses, negations and implications, as well as the height
/// of the resulting tree, are bounded by [`Limits::max_depth`].
pub struct Parser<'a> {
    tokens: TokenReader<'a>,
    end: usize,
    max_depth: usize,
    nesting: usize,
}

impl<'a> Parser<'a> {
    /// `end` is the position reported when the token stream runs out.
    pub fn new(tokens: &'a [Token], end: usize) -> Self {
        Self {
            tokens: tokens.iter().peekable(),
            end,
            max_depth: Limits::default().max_depth,
            nesting: 0,
        }
    }

    pub fn with_limits(mut self, limits: &Limits) -> Self {
        self.max_depth = limits.max_depth;
        self
    }

    /// Parses a complete expression; every token must be consumed.
    pub fn parse_formula(mut self) -> Result<Expr> {
        let (result, _) = self.parse_implication()?;

        match self.tokens.next() {
            None => Ok(result),
            Some(t) => Err(match t.kind {
                TokenKind::RightParen => Error::syntax("unmatched `)`", t.position),
                TokenKind::Operator(op) if op.is_binary() => {
                    Error::syntax(format!("unexpected operator `{op}`"), t.position)
                }
                _ => Error::syntax(
                    format!("missing operator before `{}`", t.kind),
                    t.position,
                ),
            }),
        }
    }

    fn parse_implication(&mut self) -> Result<Node> {
        let antecedent = self.parse_disjunction()?;

        if let Some((op, position)) = self.next_if_operator(&[OperatorKind::Implies]) {
            self.descend(position)?;
            let consequent = self.parse_implication()?;
            self.nesting -= 1;
            self.checked(Expr::binary(op, antecedent, consequent), position)
        } else {
            Ok(antecedent)
        }
    }

    fn parse_disjunction(&mut self) -> Result<Node> {
        let mut left = self.parse_conjunction()?;

        while let Some((op, position)) =
            self.next_if_operator(&[OperatorKind::Or, OperatorKind::Nor, OperatorKind::Xor])
        {
            let right = self.parse_conjunction()?;
            left = self.checked(Expr::binary(op, left, right), position)?;
        }

        Ok(left)
    }

    fn parse_conjunction(&mut self) -> Result<Node> {
        let mut left = self.parse_primary()?;

        while let Some((op, position)) =
            self.next_if_operator(&[OperatorKind::And, OperatorKind::Nand])
        {
            let right = self.parse_primary()?;
            left = self.checked(Expr::binary(op, left, right), position)?;
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Node> {
        let Some(token) = self.tokens.next() else {
            return Err(Error::syntax(
                "expected an operand, found end of statement",
                self.end,
            ));
        };

        match token.kind {
            TokenKind::Variable(v) => Ok((Expr::Var(v), 0)),
            TokenKind::Constant(value) => Ok((Expr::Constant(value), 0)),
            TokenKind::Operator(OperatorKind::Not) => {
                self.descend(token.position)?;
                let (operand, height) = self.parse_primary()?;
                self.nesting -= 1;
                self.checked((Expr::not(operand), height + 1), token.position)
            }
            TokenKind::LeftParen => {
                self.descend(token.position)?;
                let inner = self.parse_implication()?;
                self.expect_close(token.position)?;
                self.nesting -= 1;
                Ok(inner)
            }
            TokenKind::Operator(op) => Err(Error::syntax(
                format!("missing operand before `{op}`"),
                token.position,
            )),
            TokenKind::RightParen => Err(Error::syntax(
                "expected an operand, found `)`",
                token.position,
            )),
        }
    }

    fn descend(&mut self, position: usize) -> Result<()> {
        self.nesting += 1;
        if self.nesting > self.max_depth {
            return Err(Error::TooDeep {
                limit: self.max_depth,
                position,
            });
        }
        Ok(())
    }

    fn checked(&self, node: Node, position: usize) -> Result<Node> {
        if node.1 > self.max_depth {
            return Err(Error::TooDeep {
                limit: self.max_depth,
                position,
            });
        }
        Ok(node)
    }

    fn expect_close(&mut self, opened_at: usize) -> Result<()> {
        match self.tokens.next() {
            Some(Token {
                kind: TokenKind::RightParen,
                ..
            }) => Ok(()),
            Some(t) => Err(Error::syntax(
                format!("expected `)` to close `(` at {opened_at}, found `{}`", t.kind),
                t.position,
            )),
            None => Err(Error::syntax(
                format!("unmatched `(` at {opened_at}"),
                self.end,
            )),
        }
    }

    fn next_if_operator(&mut self, ops: &[OperatorKind]) -> Option<(OperatorKind, usize)> {
        match self.tokens.peek() {
            Some(Token {
                kind: TokenKind::Operator(op),
                position,
            }) if ops.contains(op) => {
                let found = (*op, *position);
                self.tokens.next();
                Some(found)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use test_log::test;

    fn parse(src: &str) -> Result<Expr> {
        parse_with(src, &Limits::default())
    }

    fn parse_with(src: &str, limits: &Limits) -> Result<Expr> {
        let normalized = normalize(&tokenize(src)?);
        Parser::new(&normalized.tokens, src.len())
            .with_limits(limits)
            .parse_formula()
    }

    fn var(c: char) -> Expr {
        Expr::Var(Variable::new(c).expect("letter"))
    }

    fn syntax_position(src: &str) -> usize {
        match parse(src) {
            Err(Error::Syntax { position, .. }) => position,
            other => panic!("expected a syntax error for {src:?}, got {other:?}"),
        }
    }

    #[test]
    fn precedence() {
        // NOT > AND > OR > IMPLIES
        assert_eq!(
            parse("a + b * 'c = d").expect("valid statement"),
            Expr::implies(
                Expr::or(var('A'), Expr::and(var('B'), Expr::not(var('C')))),
                var('D')
            )
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(
            parse("(a + b) * c").expect("valid statement"),
            Expr::and(Expr::or(var('A'), var('B')), var('C'))
        );
        assert_eq!(parse("((a))").expect("valid statement"), var('A'));
    }

    #[test]
    fn left_associative_chains() {
        assert_eq!(
            parse("a * b * c").expect("valid statement"),
            Expr::and(Expr::and(var('A'), var('B')), var('C'))
        );
        assert_eq!(
            parse("a nand b nand c").expect("valid statement"),
            Expr::nand(Expr::nand(var('A'), var('B')), var('C'))
        );
    }

    #[test]
    fn implication_is_right_associative() {
        assert_eq!(
            parse("a = b = c").expect("valid statement"),
            Expr::implies(var('A'), Expr::implies(var('B'), var('C')))
        );
    }

    #[test]
    fn implication_negates_antecedent() {
        assert_eq!(
            parse("a implies b").expect("valid statement"),
            Expr::or(Expr::not(var('A')), var('B'))
        );
    }

    #[test]
    fn nand_and_nor_wrap_compound_operands() {
        assert_eq!(
            parse("(a + b) nand c").expect("valid statement"),
            Expr::not(Expr::and(Expr::or(var('A'), var('B')), var('C')))
        );
        assert_eq!(
            parse("a * b nor c").expect("valid statement"),
            Expr::not(Expr::or(Expr::and(var('A'), var('B')), var('C')))
        );
    }

    #[test]
    fn not_binds_to_primary() {
        assert_eq!(
            parse("not a and b").expect("valid statement"),
            Expr::and(Expr::not(var('A')), var('B'))
        );
        assert_eq!(
            parse("''a").expect("valid statement"),
            Expr::not(Expr::not(var('A')))
        );
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(syntax_position("A AND"), 5);
        assert_eq!(syntax_position("(A"), 2);
        assert_eq!(syntax_position("A)"), 1);
        assert_eq!(syntax_position("A B"), 2);
        assert_eq!(syntax_position("AB"), 1);
        assert_eq!(syntax_position("* A"), 0);
        assert_eq!(syntax_position("A + * B"), 4);
        assert_eq!(syntax_position("()"), 1);
        assert_eq!(syntax_position("(A B)"), 3);
        assert_eq!(syntax_position(""), 0);
    }

    #[test]
    fn not_is_never_infix() {
        assert_eq!(syntax_position("a ' b"), 2);
        assert_eq!(syntax_position("a not b"), 2);
    }

    #[test]
    #[should_panic(expected = "prefix operator")]
    fn folding_not_as_binary_panics() {
        Expr::binary(OperatorKind::Not, (var('A'), 0), (var('B'), 0));
    }

    #[test]
    fn variables_are_sorted_and_distinct() {
        let expr = parse("c + a * c + b").expect("valid statement");
        let names: String = expr.variables().into_iter().map(char::from).collect();
        assert_eq!(names, "ABC");
    }

    #[test]
    fn parsed_statement_checks_limits() {
        assert_eq!(
            ParsedStatement::new("a + b + c", &Limits::new(2)),
            Err(Error::TooManyVariables { count: 3, limit: 2 })
        );
        assert!(ParsedStatement::new("a + b", &Limits::new(2)).is_ok());
    }

    #[test]
    fn parsed_statement_rejects_statements_without_variables() {
        assert_eq!(
            ParsedStatement::new("1+1", &Limits::default()),
            Err(Error::EmptyStatement)
        );
        assert_eq!(
            ParsedStatement::new("   ", &Limits::default()),
            Err(Error::EmptyStatement)
        );
    }

    #[test]
    fn parsed_statement_exposes_label_and_variables() {
        let stmt = ParsedStatement::new("b or a", &Limits::default()).expect("valid statement");
        assert_eq!(stmt.label(), "B + A");
        let names: String = stmt.variables().iter().copied().map(char::from).collect();
        assert_eq!(names, "AB");
    }

    #[test]
    fn xor_is_a_single_node() {
        assert_eq!(
            parse("a ^ b").expect("valid statement"),
            Expr::xor(var('A'), var('B'))
        );

        // each XOR adds one node, the operands are never duplicated
        let chain = format!("a{}", " ^ a".repeat(100));
        let expr = parse(&chain).expect("valid statement");
        assert_eq!(expr.size(), 201);
    }

    #[test]
    fn deep_parentheses_are_rejected() {
        let src = format!("{}a{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(
            parse(&src),
            Err(Error::TooDeep {
                limit: 256,
                position: 256
            })
        );
    }

    #[test]
    fn long_negation_chain_is_rejected() {
        let src = format!("{}a", "'".repeat(100_000));
        assert_eq!(
            parse(&src),
            Err(Error::TooDeep {
                limit: 256,
                position: 256
            })
        );
    }

    #[test]
    fn long_operator_chain_is_rejected() {
        // the 257th `*` makes the left-leaning tree one level too tall
        let src = format!("a{}", " * a".repeat(1000));
        assert_eq!(
            parse(&src),
            Err(Error::TooDeep {
                limit: 256,
                position: 2 + 4 * 256
            })
        );
        assert!(parse(&format!("a{}", " * a".repeat(256))).is_ok());
    }

    #[test]
    fn depth_limit_is_inclusive() {
        let limits = Limits::default().with_max_depth(2);

        assert!(parse_with("((a))", &limits).is_ok());
        assert!(parse_with("''a", &limits).is_ok());
        assert!(parse_with("a = b", &limits).is_ok());

        assert_eq!(
            parse_with("(((a)))", &limits),
            Err(Error::TooDeep {
                limit: 2,
                position: 2
            })
        );
        assert_eq!(
            parse_with("'''a", &limits),
            Err(Error::TooDeep {
                limit: 2,
                position: 2
            })
        );
        // NAND is a negated conjunction, two levels tall
        assert_eq!(
            parse_with("(a nand b) * c", &limits),
            Err(Error::TooDeep {
                limit: 2,
                position: 11
            })
        );
    }
}
