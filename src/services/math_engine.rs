//! Symbolic Mathematical Engine (spec §4.3).
//!
//! Builds a textual cost expression bottom-up from a function's AST,
//! independent of the [`crate::services::classifier`]'s pattern
//! detection. The two engines are allowed to diverge (spec §9
//! "Reconciliation across engines"), and this one walks statement
//! structure directly rather than trusting a `RecursionInfo.relation`
//! string. `solve_recurrence` is shared with
//! [`crate::services::asymptotic`], which drives it from the
//! classifier's pattern instead of a fresh AST walk.

use rustc_hash::FxHashMap;

use crate::ast::{Expr, Function, Stmt};
use crate::models::{BigOClass, ComplexityBound, Notation};
use crate::services::render::{find_divisor, find_sub_constant, pick_size_arg, render_expr};

/// Per-function polynomial degree, populated by a prior pass over the
/// whole program (spec §4.3 "per-function cost table") so a call to an
/// already-analyzed non-recursive helper substitutes its known cost
/// instead of a blind default.
pub type CostTable = FxHashMap<String, u32>;

pub struct MathResult {
    pub expr: String,
    pub complexity: ComplexityBound,
}

/// Shape extracted from a bottom-up walk: the polynomial degree
/// contributed by loops, the argument expressions of any self-calls,
/// and whether an unbounded (`while`/`repeat`) loop was seen.
struct CostShape {
    degree: u32,
    recursive_args: Vec<Expr>,
    has_unbounded_loop: bool,
}

pub fn analyze(func: &Function, cost_table: &CostTable) -> MathResult {
    let shape = walk_body(&func.body, &func.name, cost_table);
    let expr = render_cost_expr(&shape, &func.name);

    if shape.recursive_args.is_empty() {
        let complexity = if shape.has_unbounded_loop {
            ComplexityBound::unknown("loop bound is not a literal range; degree not inferred")
        } else if shape.degree == 0 {
            ComplexityBound::constant()
        } else {
            ComplexityBound::polynomial(shape.degree)
        };
        return MathResult { expr, complexity };
    }

    let complexity = solve_from_shape(&shape, &func.name);
    MathResult { expr, complexity }
}

fn walk_body(body: &[Stmt], fn_name: &str, cost_table: &CostTable) -> CostShape {
    let mut shape = CostShape {
        degree: 0,
        recursive_args: Vec::new(),
        has_unbounded_loop: false,
    };
    for stmt in body {
        merge(&mut shape, walk_stmt(stmt, fn_name, cost_table));
    }
    shape
}

fn merge(acc: &mut CostShape, other: CostShape) {
    acc.degree = acc.degree.max(other.degree);
    acc.recursive_args.extend(other.recursive_args);
    acc.has_unbounded_loop |= other.has_unbounded_loop;
}

fn walk_stmt(stmt: &Stmt, fn_name: &str, cost_table: &CostTable) -> CostShape {
    match stmt {
        Stmt::Assignment { target, expr } => {
            let mut s = walk_expr(expr, fn_name, cost_table);
            merge(&mut s, walk_expr(target, fn_name, cost_table));
            s
        }
        Stmt::For { body, .. } => {
            let inner = walk_body(body, fn_name, cost_table);
            CostShape {
                degree: inner.degree + 1,
                recursive_args: inner.recursive_args,
                has_unbounded_loop: inner.has_unbounded_loop,
            }
        }
        Stmt::While { cond, body } => {
            let mut inner = walk_body(body, fn_name, cost_table);
            merge(&mut inner, walk_expr(cond, fn_name, cost_table));
            inner.has_unbounded_loop = true;
            inner
        }
        Stmt::Repeat { body, cond } => {
            let mut inner = walk_body(body, fn_name, cost_table);
            merge(&mut inner, walk_expr(cond, fn_name, cost_table));
            inner.has_unbounded_loop = true;
            inner
        }
        Stmt::If {
            cond,
            then_body,
            else_body,
        } => {
            let mut s = walk_expr(cond, fn_name, cost_table);
            let then_shape = walk_body(then_body, fn_name, cost_table);
            let else_shape = else_body
                .as_deref()
                .map(|b| walk_body(b, fn_name, cost_table));
            let branch = match else_shape {
                Some(else_shape) => pick_branch(then_shape, else_shape),
                None => then_shape,
            };
            merge(&mut s, branch);
            s
        }
        Stmt::Return { expr } => expr
            .as_ref()
            .map(|e| walk_expr(e, fn_name, cost_table))
            .unwrap_or(CostShape {
                degree: 0,
                recursive_args: Vec::new(),
                has_unbounded_loop: false,
            }),
        Stmt::ArrayDecl { size, .. } => walk_expr(size, fn_name, cost_table),
        Stmt::MatrixDecl { rows, cols, .. } => {
            let mut s = walk_expr(rows, fn_name, cost_table);
            merge(&mut s, walk_expr(cols, fn_name, cost_table));
            s
        }
        Stmt::ExprStmt { expr } => walk_expr(expr, fn_name, cost_table),
    }
}

/// Prefers whichever branch carries recursive terms, so a base-case
/// branch with no self-call never hides the `T(·)` side (spec §4.3 "If").
fn pick_branch(then_shape: CostShape, else_shape: CostShape) -> CostShape {
    match (
        then_shape.recursive_args.is_empty(),
        else_shape.recursive_args.is_empty(),
    ) {
        (false, _) | (true, true) => CostShape {
            degree: then_shape.degree.max(else_shape.degree),
            has_unbounded_loop: then_shape.has_unbounded_loop || else_shape.has_unbounded_loop,
            recursive_args: {
                let mut v = then_shape.recursive_args;
                v.extend(else_shape.recursive_args);
                v
            },
        },
        (true, false) => else_shape,
    }
}

fn walk_expr(expr: &Expr, fn_name: &str, cost_table: &CostTable) -> CostShape {
    let mut shape = CostShape {
        degree: 0,
        recursive_args: Vec::new(),
        has_unbounded_loop: false,
    };
    match expr {
        Expr::Call { name, args } => {
            if name == fn_name {
                shape.recursive_args.push(expr_only_call_target(args));
            } else {
                shape.degree = shape.degree.max(*cost_table.get(name).unwrap_or(&0));
            }
            for a in args {
                merge(&mut shape, walk_expr(a, fn_name, cost_table));
            }
        }
        Expr::BinOp { left, right, .. }
        | Expr::Condition { left, right, .. }
        | Expr::BoolOp { left, right, .. } => {
            merge(&mut shape, walk_expr(left, fn_name, cost_table));
            merge(&mut shape, walk_expr(right, fn_name, cost_table));
        }
        Expr::UnaryOp { operand, .. } => merge(&mut shape, walk_expr(operand, fn_name, cost_table)),
        Expr::ArrayAccess { index, .. } => merge(&mut shape, walk_expr(index, fn_name, cost_table)),
        Expr::MatrixAccess { row, col, .. } => {
            merge(&mut shape, walk_expr(row, fn_name, cost_table));
            merge(&mut shape, walk_expr(col, fn_name, cost_table));
        }
        Expr::Var { .. } | Expr::Number { .. } | Expr::Boolean { .. } => {}
    }
    shape
}

/// The single argument we key `T(·)` by: the one that plausibly carries
/// the shrinking problem size, not necessarily the first one (spec
/// §4.3 "T(·)" keyed by the recursive call's size argument).
fn expr_only_call_target(args: &[Expr]) -> Expr {
    pick_size_arg(args)
        .cloned()
        .unwrap_or(Expr::Var { name: "n".to_string() })
}

fn render_cost_expr(shape: &CostShape, _fn_name: &str) -> String {
    let mut terms = Vec::new();
    for arg in &shape.recursive_args {
        terms.push(format!("T({})", render_expr(arg)));
    }
    if shape.has_unbounded_loop {
        terms.push("k * c".to_string());
    } else if shape.degree > 0 {
        terms.push(if shape.degree == 1 {
            "c*n".to_string()
        } else {
            format!("c*n^{}", shape.degree)
        });
    } else {
        terms.push("c".to_string());
    }
    terms.join(" + ")
}

fn solve_from_shape(shape: &CostShape, fn_name: &str) -> ComplexityBound {
    let f_degree = shape.degree;
    match shape.recursive_args.len() {
        1 => {
            let arg = &shape.recursive_args[0];
            if let Some(b) = find_divisor(arg) {
                master_theorem(1, b, f_degree, 1e-6)
            } else {
                linear_decrement(f_degree)
            }
        }
        2 => {
            let c0 = find_sub_constant(&shape.recursive_args[0]);
            let c1 = find_sub_constant(&shape.recursive_args[1]);
            let div0 = find_divisor(&shape.recursive_args[0]);
            if div0.is_some() {
                master_theorem(2, div0.unwrap(), f_degree, 1e-6)
            } else {
                match (c0, c1) {
                    (Some(a), Some(b)) if a == b => multiplicative(2, fn_name),
                    _ => additive_two_term(),
                }
            }
        }
        n => multiplicative(n as u32, fn_name),
    }
}

/// Master Theorem three-case comparison (spec §4.3 Solver step 1).
pub fn master_theorem(a: u32, b: u32, f_degree: u32, epsilon: f64) -> ComplexityBound {
    if b < 2 {
        return ComplexityBound::unknown("divide factor b must be >= 2 for the Master Theorem");
    }
    let log_b_a = (a as f64).ln() / (b as f64).ln();
    let c = f_degree as f64;

    if c < log_b_a - epsilon {
        let k = log_b_a.round();
        if (log_b_a - k).abs() < 1e-3 && k >= 0.0 {
            ComplexityBound::polynomial(k as u32).with_explanation(format!(
                "Master Theorem case 1: a={a}, b={b}, f(n) degree {f_degree} < log_{b}({a}) = {log_b_a:.3}"
            ))
        } else {
            ComplexityBound::unknown(format!(
                "Master Theorem case 1 yields Θ(n^{log_b_a:.3}), not an integer exponent"
            ))
        }
    } else if (c - log_b_a).abs() < epsilon {
        match f_degree {
            0 => ComplexityBound::logarithmic()
                .with_explanation(format!("Master Theorem case 2: a={a}, b={b}, c=log_{b}({a})")),
            1 => ComplexityBound::linearithmic()
                .with_explanation(format!("Master Theorem case 2: a={a}, b={b}, c=log_{b}({a})")),
            _ => ComplexityBound::new(BigOClass::Polynomial(f_degree), Notation::Theta, 80).with_explanation(
                format!("Master Theorem case 2: Θ(n^{f_degree} log n), a={a}, b={b}"),
            ),
        }
    } else {
        ComplexityBound::polynomial(f_degree)
            .with_explanation(format!("Master Theorem case 3: Θ(f(n)), a={a}, b={b}, c={f_degree}"))
    }
}

/// `T(n) = T(n-k) + f(n)` via substitution (spec §4.3 Solver step 2).
pub fn linear_decrement(f_degree: u32) -> ComplexityBound {
    ComplexityBound::polynomial(f_degree + 1)
        .with_explanation("substitution: T(n) = T(n-1) + f(n) unrolls to n * f(n)".to_string())
}

/// `T(n) = T(n-1) + T(n-2) + c`, solved by the recurrence-tree method
/// (spec §4.3 Solver step 3): reports Θ(2^n) with a note on the exact
/// golden-ratio base, per the Open Question resolution in DESIGN.md.
pub fn additive_two_term() -> ComplexityBound {
    ComplexityBound::exponential(2).with_explanation(
        "recurrence tree: T(n)=T(n-1)+T(n-2)+c grows as φ^n (φ=(1+√5)/2 ≈ 1.618); reported as Θ(2^n)"
            .to_string(),
    )
}

/// `T(n) = a*T(n-1) + c`, `a >= 2` (spec §4.3 Solver step 4).
pub fn multiplicative(a: u32, fn_name: &str) -> ComplexityBound {
    ComplexityBound::exponential(a.max(2))
        .with_explanation(format!("{fn_name}: T(n) = {a}T(n-1) + c"))
}
