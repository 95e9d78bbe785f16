//! Abstract syntax tree for the pseudocode dialect.
//!
//! A closed tagged union per spec §3: every node kind below is an
//! exhaustive variant, and every engine that walks the tree matches on
//! all of them. Ownership is strictly hierarchical (`Box<Expr>` /
//! `Vec<Stmt>`): a node reachable under a function belongs to that
//! function alone, never shared, matching the "tree ownership, no
//! sharing" invariant. Traversal after construction is read-only.

use serde::{Deserialize, Serialize};

pub type Ident = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub functions: Vec<Function>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareKind {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolOpKind {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOpKind {
    Not,
    Neg,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    Var {
        name: Ident,
    },
    Number {
        value: i64,
    },
    Boolean {
        value: bool,
    },
    BinOp {
        op: BinOpKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOpKind,
        operand: Box<Expr>,
    },
    Condition {
        op: CompareKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    BoolOp {
        op: BoolOpKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        name: Ident,
        args: Vec<Expr>,
    },
    ArrayAccess {
        name: Ident,
        index: Box<Expr>,
    },
    MatrixAccess {
        name: Ident,
        row: Box<Expr>,
        col: Box<Expr>,
    },
}

impl Expr {
    /// True for the expression shapes a condition position accepts
    /// (spec §3 invariant: `If.cond | While.cond | Repeat.cond` must be
    /// `Condition | BoolOp | UnaryOp | Boolean | Var`).
    pub fn is_condition_shaped(&self) -> bool {
        matches!(
            self,
            Expr::Condition { .. }
                | Expr::BoolOp { .. }
                | Expr::UnaryOp {
                    op: UnaryOpKind::Not,
                    ..
                }
                | Expr::Boolean { .. }
                | Expr::Var { .. }
        )
    }

    /// Every `Call` reachable directly under this expression, without
    /// descending into nested function bodies (there are none; calls
    /// are leaves).
    pub fn calls<'a>(&'a self, out: &mut Vec<&'a Expr>) {
        match self {
            Expr::Call { .. } => out.push(self),
            Expr::BinOp { left, right, .. }
            | Expr::Condition { left, right, .. }
            | Expr::BoolOp { left, right, .. } => {
                left.calls(out);
                right.calls(out);
            }
            Expr::UnaryOp { operand, .. } => operand.calls(out),
            Expr::ArrayAccess { index, .. } => index.calls(out),
            Expr::MatrixAccess { row, col, .. } => {
                row.calls(out);
                col.calls(out);
            }
            Expr::Var { .. } | Expr::Number { .. } | Expr::Boolean { .. } => {}
        }
        if let Expr::Call { args, .. } = self {
            for a in args {
                a.calls(out);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    Assignment {
        target: Expr,
        expr: Expr,
    },
    For {
        var: Ident,
        start: Expr,
        end: Expr,
        body: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    Repeat {
        body: Vec<Stmt>,
        cond: Expr,
    },
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },
    Return {
        expr: Option<Expr>,
    },
    ArrayDecl {
        name: Ident,
        size: Expr,
    },
    MatrixDecl {
        name: Ident,
        rows: Expr,
        cols: Expr,
    },
    ExprStmt {
        expr: Expr,
    },
}

impl Stmt {
    /// Every `Call` expression reachable anywhere under this statement,
    /// including inside nested control structures.
    pub fn calls<'a>(&'a self, out: &mut Vec<&'a Expr>) {
        match self {
            Stmt::Assignment { target, expr } => {
                target.calls(out);
                expr.calls(out);
            }
            Stmt::For { start, end, body, .. } => {
                start.calls(out);
                end.calls(out);
                for s in body {
                    s.calls(out);
                }
            }
            Stmt::While { cond, body } => {
                cond.calls(out);
                for s in body {
                    s.calls(out);
                }
            }
            Stmt::Repeat { body, cond } => {
                for s in body {
                    s.calls(out);
                }
                cond.calls(out);
            }
            Stmt::If {
                cond,
                then_body,
                else_body,
            } => {
                cond.calls(out);
                for s in then_body {
                    s.calls(out);
                }
                if let Some(else_body) = else_body {
                    for s in else_body {
                        s.calls(out);
                    }
                }
            }
            Stmt::Return { expr } => {
                if let Some(e) = expr {
                    e.calls(out);
                }
            }
            Stmt::ArrayDecl { size, .. } => size.calls(out),
            Stmt::MatrixDecl { rows, cols, .. } => {
                rows.calls(out);
                cols.calls(out);
            }
            Stmt::ExprStmt { expr } => expr.calls(out),
        }
    }

    /// Maximum loop (`For`/`While`/`Repeat`) nesting depth within this
    /// statement and its descendants, used by the Asymptotic Engine
    /// when no recursion is present (spec §4.4).
    pub fn max_loop_depth(&self) -> u32 {
        fn body_depth(body: &[Stmt]) -> u32 {
            body.iter().map(Stmt::max_loop_depth).max().unwrap_or(0)
        }
        match self {
            Stmt::For { body, .. } => 1 + body_depth(body),
            Stmt::While { body, .. } => 1 + body_depth(body),
            Stmt::Repeat { body, .. } => 1 + body_depth(body),
            Stmt::If {
                then_body,
                else_body,
                ..
            } => {
                let then_depth = body_depth(then_body);
                let else_depth = else_body.as_deref().map(body_depth).unwrap_or(0);
                then_depth.max(else_depth)
            }
            Stmt::Assignment { .. }
            | Stmt::Return { .. }
            | Stmt::ArrayDecl { .. }
            | Stmt::MatrixDecl { .. }
            | Stmt::ExprStmt { .. } => 0,
        }
    }
}

pub fn max_loop_depth(body: &[Stmt]) -> u32 {
    body.iter().map(Stmt::max_loop_depth).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::Var { name: name.into() }
    }

    #[test]
    fn condition_shapes_accept_only_boolean_like_expressions() {
        assert!(Expr::Boolean { value: true }.is_condition_shaped());
        assert!(var("flag").is_condition_shaped());
        assert!(!Expr::Number { value: 1 }.is_condition_shaped());
    }

    #[test]
    fn max_loop_depth_counts_nested_for_loops() {
        let inner = Stmt::For {
            var: "j".into(),
            start: Expr::Number { value: 0 },
            end: var("n"),
            body: vec![Stmt::ExprStmt { expr: var("x") }],
        };
        let outer = Stmt::For {
            var: "i".into(),
            start: Expr::Number { value: 0 },
            end: var("n"),
            body: vec![inner],
        };
        assert_eq!(outer.max_loop_depth(), 2);
    }

    #[test]
    fn calls_collects_nested_recursive_invocations() {
        let stmt = Stmt::Return {
            expr: Some(Expr::BinOp {
                op: BinOpKind::Add,
                left: Box::new(Expr::Call {
                    name: "fib".into(),
                    args: vec![var("n")],
                }),
                right: Box::new(Expr::Call {
                    name: "fib".into(),
                    args: vec![var("n")],
                }),
            }),
        };
        let mut out = Vec::new();
        stmt.calls(&mut out);
        assert_eq!(out.len(), 2);
    }
}
