//! Pseudocode-faithful rendering of [`Expr`] back to source text, used
//! by every engine that needs to quote a condition or argument in a
//! human-readable explanation (spec §4.5 "example"/"scenario" fields).

use crate::ast::{BinOpKind, BoolOpKind, CompareKind, Expr, UnaryOpKind};

pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Var { name } => name.clone(),
        Expr::Number { value } => value.to_string(),
        Expr::Boolean { value } => value.to_string(),
        Expr::BinOp { op, left, right } => {
            format!("{} {} {}", render_expr(left), bin_op_str(*op), render_expr(right))
        }
        Expr::UnaryOp { op, operand } => match op {
            UnaryOpKind::Not => format!("not {}", render_expr(operand)),
            UnaryOpKind::Neg => format!("-{}", render_expr(operand)),
        },
        Expr::Condition { op, left, right } => {
            format!("{} {} {}", render_expr(left), compare_op_str(*op), render_expr(right))
        }
        Expr::BoolOp { op, left, right } => {
            let op_str = match op {
                BoolOpKind::And => "and",
                BoolOpKind::Or => "or",
            };
            format!("{} {} {}", render_expr(left), op_str, render_expr(right))
        }
        Expr::Call { name, args } => {
            format!("{}({})", name, args.iter().map(render_expr).collect::<Vec<_>>().join(", "))
        }
        Expr::ArrayAccess { name, index } => format!("{}[{}]", name, render_expr(index)),
        Expr::MatrixAccess { name, row, col } => {
            format!("{}[{}][{}]", name, render_expr(row), render_expr(col))
        }
    }
}

fn bin_op_str(op: BinOpKind) -> &'static str {
    match op {
        BinOpKind::Add => "+",
        BinOpKind::Sub => "-",
        BinOpKind::Mul => "*",
        BinOpKind::Div => "/",
        BinOpKind::Mod => "%",
    }
}

fn compare_op_str(op: CompareKind) -> &'static str {
    match op {
        CompareKind::Lt => "<",
        CompareKind::Le => "<=",
        CompareKind::Gt => ">",
        CompareKind::Ge => ">=",
        CompareKind::Eq => "=",
        CompareKind::Ne => "<>",
    }
}

/// True if `expr` contains a division anywhere in its tree: the
/// signal the classifier uses to tell a divide-and-conquer argument
/// (`n / 2`) from a simple decrement (`n - 1`).
pub fn contains_div(expr: &Expr) -> bool {
    match expr {
        Expr::BinOp { op: BinOpKind::Div, .. } => true,
        Expr::BinOp { left, right, .. }
        | Expr::Condition { left, right, .. }
        | Expr::BoolOp { left, right, .. } => contains_div(left) || contains_div(right),
        Expr::UnaryOp { operand, .. } => contains_div(operand),
        Expr::ArrayAccess { index, .. } => contains_div(index),
        Expr::MatrixAccess { row, col, .. } => contains_div(row) || contains_div(col),
        Expr::Call { args, .. } => args.iter().any(contains_div),
        Expr::Var { .. } | Expr::Number { .. } | Expr::Boolean { .. } => false,
    }
}

/// True if `expr` references a variable whose name contains "mid"
/// (case-insensitive): the lexical hint spec §4.2/§4.4 use to tell a
/// divide-and-conquer midpoint split from a Fibonacci-shape decrement.
pub fn contains_mid_hint(expr: &Expr) -> bool {
    match expr {
        Expr::Var { name } => name.to_ascii_lowercase().contains("mid"),
        Expr::BinOp { left, right, .. }
        | Expr::Condition { left, right, .. }
        | Expr::BoolOp { left, right, .. } => contains_mid_hint(left) || contains_mid_hint(right),
        Expr::UnaryOp { operand, .. } => contains_mid_hint(operand),
        Expr::ArrayAccess { index, .. } => contains_mid_hint(index),
        Expr::MatrixAccess { row, col, .. } => contains_mid_hint(row) || contains_mid_hint(col),
        Expr::Call { args, .. } => args.iter().any(contains_mid_hint),
        Expr::Number { .. } | Expr::Boolean { .. } => false,
    }
}

/// The constant `k` of the first `- k` found in `expr`, e.g. `1` for
/// `n - 1`. Distinguishes `T(n-1)+T(n-2)` (different decrements) from
/// `2T(n-1)` (same decrement) when building a binary relation string.
pub fn find_sub_constant(expr: &Expr) -> Option<i64> {
    match expr {
        Expr::BinOp {
            op: BinOpKind::Sub,
            right,
            ..
        } => match right.as_ref() {
            Expr::Number { value } => Some(*value),
            _ => None,
        },
        Expr::BinOp { left, right, .. }
        | Expr::Condition { left, right, .. }
        | Expr::BoolOp { left, right, .. } => find_sub_constant(left).or_else(|| find_sub_constant(right)),
        Expr::UnaryOp { operand, .. } => find_sub_constant(operand),
        Expr::ArrayAccess { index, .. } => find_sub_constant(index),
        Expr::MatrixAccess { row, col, .. } => find_sub_constant(row).or_else(|| find_sub_constant(col)),
        Expr::Call { args, .. } => args.iter().find_map(find_sub_constant),
        Expr::Var { .. } | Expr::Number { .. } | Expr::Boolean { .. } => None,
    }
}

/// The argument that plausibly carries the shrinking problem size: the
/// first one that divides, subtracts a constant, or looks like a
/// midpoint, falling back to the first argument when none does. Needed
/// because a call's size-changing argument isn't always first, e.g.
/// `busqueda_binaria(arr, izq, mid - 1, x)` shrinks its third argument.
pub fn pick_size_arg(args: &[Expr]) -> Option<&Expr> {
    args.iter()
        .find(|a| contains_div(a) || contains_mid_hint(a) || find_sub_constant(a).is_some())
        .or_else(|| args.first())
}

/// The integer divisor of the first `Div` found in `expr`, e.g. `2` for
/// `n / 2`. Used to build the `b` parameter of a Master Theorem recurrence.
pub fn find_divisor(expr: &Expr) -> Option<u32> {
    match expr {
        Expr::BinOp {
            op: BinOpKind::Div,
            right,
            ..
        } => match right.as_ref() {
            Expr::Number { value } if *value > 0 => Some(*value as u32),
            _ => None,
        },
        Expr::BinOp { left, right, .. }
        | Expr::Condition { left, right, .. }
        | Expr::BoolOp { left, right, .. } => find_divisor(left).or_else(|| find_divisor(right)),
        Expr::UnaryOp { operand, .. } => find_divisor(operand),
        Expr::ArrayAccess { index, .. } => find_divisor(index),
        Expr::MatrixAccess { row, col, .. } => find_divisor(row).or_else(|| find_divisor(col)),
        Expr::Call { args, .. } => args.iter().find_map(find_divisor),
        Expr::Var { .. } | Expr::Number { .. } | Expr::Boolean { .. } => None,
    }
}
