//! Recursion Pattern Classifier (spec §4.2).
//!
//! Adapted from the teacher's `big_o_analyzer` call-graph walk: instead
//! of matching named library calls, this walks a function body looking
//! for calls back to its own name, tagging each with the `if`-branch it
//! sits in so [`classify`] can tell a binary split (`fib(n-1)+fib(n-2)`)
//! from a mutually exclusive one (`binary_search`'s two branches) from
//! a balanced divide (`n / 2` on both sides).

use std::collections::BTreeMap;

use crate::ast::{Expr, Function, Stmt};
use crate::models::{CallSite, RecursionInfo, RecursionPattern};
use crate::services::render::{
    contains_div, contains_mid_hint, find_divisor, find_sub_constant, pick_size_arg, render_expr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Then,
    Else,
}

struct Found {
    args: Vec<Expr>,
    branch: Option<Branch>,
}

pub fn classify(func: &Function) -> RecursionInfo {
    let mut found = Vec::new();
    walk_stmts(&func.body, &func.name, None, &mut found);

    if found.is_empty() {
        return RecursionInfo::none();
    }

    let pattern = classify_pattern(&found);
    let exclusive_branch_calls = matches!(pattern, RecursionPattern::BinaryExclusive);
    let relation = build_relation(pattern, &found);
    let base_cases = find_base_cases(&func.body, &func.name);

    let calls = found
        .into_iter()
        .map(|f| CallSite {
            args: f.args,
            in_exclusive_branch: f.branch.is_some(),
        })
        .collect();

    RecursionInfo {
        has_recursion: true,
        calls,
        pattern,
        exclusive_branch_calls,
        relation,
        base_cases,
    }
}

fn walk_stmts(body: &[Stmt], fn_name: &str, branch: Option<Branch>, out: &mut Vec<Found>) {
    for stmt in body {
        match stmt {
            Stmt::If {
                cond,
                then_body,
                else_body,
            } => {
                walk_expr(cond, fn_name, branch, out);
                walk_stmts(then_body, fn_name, Some(Branch::Then), out);
                if let Some(else_body) = else_body {
                    walk_stmts(else_body, fn_name, Some(Branch::Else), out);
                }
            }
            Stmt::For { start, end, body, .. } => {
                walk_expr(start, fn_name, branch, out);
                walk_expr(end, fn_name, branch, out);
                walk_stmts(body, fn_name, branch, out);
            }
            Stmt::While { cond, body } => {
                walk_expr(cond, fn_name, branch, out);
                walk_stmts(body, fn_name, branch, out);
            }
            Stmt::Repeat { body, cond } => {
                walk_stmts(body, fn_name, branch, out);
                walk_expr(cond, fn_name, branch, out);
            }
            Stmt::Assignment { target, expr } => {
                walk_expr(target, fn_name, branch, out);
                walk_expr(expr, fn_name, branch, out);
            }
            Stmt::Return { expr } => {
                if let Some(e) = expr {
                    walk_expr(e, fn_name, branch, out);
                }
            }
            Stmt::ArrayDecl { size, .. } => walk_expr(size, fn_name, branch, out),
            Stmt::MatrixDecl { rows, cols, .. } => {
                walk_expr(rows, fn_name, branch, out);
                walk_expr(cols, fn_name, branch, out);
            }
            Stmt::ExprStmt { expr } => walk_expr(expr, fn_name, branch, out),
        }
    }
}

fn walk_expr(expr: &Expr, fn_name: &str, branch: Option<Branch>, out: &mut Vec<Found>) {
    if let Expr::Call { name, args } = expr {
        if name == fn_name {
            out.push(Found {
                args: args.clone(),
                branch,
            });
        }
        for a in args {
            walk_expr(a, fn_name, branch, out);
        }
        return;
    }
    match expr {
        Expr::BinOp { left, right, .. }
        | Expr::Condition { left, right, .. }
        | Expr::BoolOp { left, right, .. } => {
            walk_expr(left, fn_name, branch, out);
            walk_expr(right, fn_name, branch, out);
        }
        Expr::UnaryOp { operand, .. } => walk_expr(operand, fn_name, branch, out),
        Expr::ArrayAccess { index, .. } => walk_expr(index, fn_name, branch, out),
        Expr::MatrixAccess { row, col, .. } => {
            walk_expr(row, fn_name, branch, out);
            walk_expr(col, fn_name, branch, out);
        }
        Expr::Var { .. } | Expr::Number { .. } | Expr::Boolean { .. } | Expr::Call { .. } => {}
    }
}

fn classify_pattern(found: &[Found]) -> RecursionPattern {
    let any_div = found.iter().any(|f| f.args.iter().any(contains_div));
    let any_mid_hint = found.iter().any(|f| f.args.iter().any(contains_mid_hint));

    match found.len() {
        1 => {
            if any_div {
                RecursionPattern::DivideConquer
            } else {
                RecursionPattern::Linear
            }
        }
        2 => {
            let branches: Vec<_> = found.iter().map(|f| f.branch).collect();
            let is_exclusive_split = matches!(
                (branches[0], branches[1]),
                (Some(Branch::Then), Some(Branch::Else)) | (Some(Branch::Else), Some(Branch::Then))
            );
            if is_exclusive_split {
                RecursionPattern::BinaryExclusive
            } else if any_div || any_mid_hint {
                RecursionPattern::DivideConquer
            } else {
                RecursionPattern::Binary
            }
        }
        n if n > 2 => RecursionPattern::Multiple,
        _ => RecursionPattern::None,
    }
}

fn build_relation(pattern: RecursionPattern, found: &[Found]) -> String {
    match pattern {
        RecursionPattern::Linear => {
            let c = pick_size_arg(&found[0].args).and_then(find_sub_constant).unwrap_or(1);
            format!("T(n) = T(n-{c}) + O(1)")
        }
        RecursionPattern::Binary => {
            let c0 = pick_size_arg(&found[0].args).and_then(find_sub_constant);
            let c1 = pick_size_arg(&found[1].args).and_then(find_sub_constant);
            match (c0, c1) {
                (Some(a), Some(b)) if a == b => format!("T(n) = 2T(n-{a}) + O(1)"),
                (Some(a), Some(b)) => format!("T(n) = T(n-{a}) + T(n-{b}) + O(1)"),
                _ => format!(
                    "T(n) = T({}) + T({}) + O(1)",
                    arg_summary(&found[0]),
                    arg_summary(&found[1])
                ),
            }
        }
        // The halving is structural, not textual: the argument AST may
        // read `mid - 1` or `mid + 1`, never literally `n/2`.
        RecursionPattern::BinaryExclusive => "T(n) = T(n/2) + O(1)".to_string(),
        RecursionPattern::DivideConquer => {
            let b = pick_size_arg(&found[0].args).and_then(find_divisor).unwrap_or(2);
            format!("T(n) = {}T(n/{b}) + O(n)", found.len())
        }
        RecursionPattern::Multiple => {
            let c = pick_size_arg(&found[0].args).and_then(find_sub_constant).unwrap_or(1);
            format!("T(n) = {}T(n-{c}) + O(1)", found.len())
        }
        RecursionPattern::None => "T(n) = c".to_string(),
    }
}

fn arg_summary(found: &Found) -> String {
    pick_size_arg(&found.args)
        .map(render_expr)
        .unwrap_or_else(|| "n".to_string())
}

/// Looks for `if <cond> then return <non-recursive-expr> [else ...]`
/// shapes at any nesting depth and records them as base cases (spec
/// §3 `RecursionInfo.base_cases`). A heuristic, not a proof: any return
/// whose expression contains no self-call is treated as a base case.
fn find_base_cases(body: &[Stmt], fn_name: &str) -> BTreeMap<String, String> {
    let mut cases = BTreeMap::new();
    collect_base_cases(body, fn_name, &mut cases);
    cases
}

fn collect_base_cases(body: &[Stmt], fn_name: &str, cases: &mut BTreeMap<String, String>) {
    for stmt in body {
        match stmt {
            Stmt::If {
                cond,
                then_body,
                else_body,
            } => {
                if is_base_case_body(then_body, fn_name) {
                    cases.insert(render_expr(cond), describe_body(then_body));
                }
                if let Some(else_body) = else_body {
                    if is_base_case_body(else_body, fn_name) {
                        cases.insert(format!("not ({})", render_expr(cond)), describe_body(else_body));
                    }
                    collect_base_cases(else_body, fn_name, cases);
                }
                collect_base_cases(then_body, fn_name, cases);
            }
            Stmt::For { body, .. } | Stmt::While { body, .. } | Stmt::Repeat { body, .. } => {
                collect_base_cases(body, fn_name, cases);
            }
            _ => {}
        }
    }
}

fn is_base_case_body(body: &[Stmt], fn_name: &str) -> bool {
    let mut calls = Vec::new();
    for stmt in body {
        stmt.calls(&mut calls);
    }
    let has_return = body.iter().any(|s| matches!(s, Stmt::Return { .. }));
    let has_self_call = calls
        .iter()
        .any(|c| matches!(c, Expr::Call { name, .. } if name == fn_name));
    has_return && !has_self_call
}

fn describe_body(body: &[Stmt]) -> String {
    body.iter()
        .find_map(|s| match s {
            Stmt::Return { expr: Some(e) } => Some(render_expr(e)),
            Stmt::Return { expr: None } => Some("return".to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "base case".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn classify_src(src: &str) -> RecursionInfo {
        let program = parse(src).unwrap();
        classify(&program.functions[0])
    }

    #[test]
    fn factorial_is_linear() {
        let info = classify_src(
            "function fact(n) begin if n <= 1 then return 1 else return n * fact(n - 1) end end",
        );
        assert_eq!(info.pattern, RecursionPattern::Linear);
        assert!(info.has_recursion);
    }

    #[test]
    fn fibonacci_is_binary() {
        let info = classify_src(
            "function fib(n) begin if n <= 1 then return n else return fib(n - 1) + fib(n - 2) end end",
        );
        assert_eq!(info.pattern, RecursionPattern::Binary);
    }

    #[test]
    fn binary_search_is_binary_exclusive() {
        let info = classify_src(
            "function bsearch(arr, lo, hi, x) begin \
             mid = (lo + hi) / 2 \
             if arr[mid] = x then return mid \
             else if arr[mid] < x then return bsearch(arr, mid + 1, hi, x) \
             else return bsearch(arr, lo, mid - 1, x) end end",
        );
        assert_eq!(info.pattern, RecursionPattern::BinaryExclusive);
    }

    #[test]
    fn no_self_call_is_none() {
        let info = classify_src("function id(n) begin return n end");
        assert!(!info.has_recursion);
        assert_eq!(info.pattern, RecursionPattern::None);
    }
}
