//! Formal Asymptotic Engine (spec §4.4).
//!
//! Drives the same solver as [`crate::services::math_engine`], but from
//! the Recursion Classifier's [`RecursionInfo`] rather than a fresh
//! bottom-up AST walk. This is the "heuristic" engine whose output
//! populates `AnalysisResult.heur_*`, reported alongside (and allowed
//! to diverge from) the Mathematical Engine's `math_*` fields.

use crate::ast::{max_loop_depth, Function};
use crate::models::{
    AsymptoticBound, ComplexityBound, RecurrenceEquation, RecursionInfo, RecursionPattern, SolveMethod,
};
use crate::services::math_engine::{additive_two_term, linear_decrement, master_theorem, multiplicative};
use crate::services::render::{find_divisor, pick_size_arg};

pub struct AsymptoticResult {
    pub equation: RecurrenceEquation,
    pub bound: AsymptoticBound,
    pub raw_bound: ComplexityBound,
}

/// Lexical markers that force/tie-break a bound per spec §4.4 edge
/// cases; matched case-insensitively against the function name.
const BINARY_SEARCH_MARKERS: [&str; 3] = ["busqueda_binaria", "binary_search", "bsearch"];
const QUICKSORT_MARKERS: [&str; 2] = ["quick", "qsort"];

pub fn analyze(func: &Function, info: &RecursionInfo, epsilon: f64) -> AsymptoticResult {
    if !info.has_recursion {
        return analyze_iterative(func);
    }

    let name_lower = func.name.to_ascii_lowercase();
    let forced_binary_search = BINARY_SEARCH_MARKERS.iter().any(|m| name_lower.contains(m));
    let adjacent_loop_degree = max_loop_depth(&func.body);

    let (bound, method, a, b, f_n) = if forced_binary_search {
        (
            ComplexityBound::logarithmic()
                .with_explanation(format!("'{}' matches a binary-search name marker", func.name)),
            SolveMethod::Master,
            Some(1),
            Some(2),
            "O(1)".to_string(),
        )
    } else {
        solve_by_pattern(info, adjacent_loop_degree, epsilon, &func.name)
    };

    let bound = if QUICKSORT_MARKERS.iter().any(|m| name_lower.contains(m))
        && matches!(info.pattern, RecursionPattern::DivideConquer)
    {
        ComplexityBound::linearithmic().with_explanation(format!(
            "'{}' matches a quicksort name marker; tight bound Θ(n log n) reported here, worst case Θ(n^2) handled by the case analyzer",
            func.name
        ))
    } else {
        bound
    };

    let equation = RecurrenceEquation {
        equation: info.relation.clone(),
        a,
        b,
        f_n,
        base_cases: info.base_cases.clone(),
        method,
    };

    AsymptoticResult {
        equation,
        bound: AsymptoticBound::from(&bound),
        raw_bound: bound,
    }
}

fn analyze_iterative(func: &Function) -> AsymptoticResult {
    let d = max_loop_depth(&func.body);
    let bound = if d == 0 {
        ComplexityBound::constant()
    } else {
        ComplexityBound::polynomial(d)
    };
    let equation = RecurrenceEquation {
        equation: if d == 0 {
            "T(n) = c".to_string()
        } else {
            format!("T(n) = c * n^{d}")
        },
        a: None,
        b: None,
        f_n: "c".to_string(),
        base_cases: Default::default(),
        method: SolveMethod::LoopAnalysis,
    };
    AsymptoticResult {
        equation,
        bound: AsymptoticBound::from(&bound),
        raw_bound: bound,
    }
}

fn solve_by_pattern(
    info: &RecursionInfo,
    adjacent_loop_degree: u32,
    epsilon: f64,
    fn_name: &str,
) -> (ComplexityBound, SolveMethod, Option<u32>, Option<u32>, String) {
    match info.pattern {
        RecursionPattern::Linear => {
            let f_degree = adjacent_loop_degree;
            (
                linear_decrement(f_degree),
                SolveMethod::Substitution,
                None,
                None,
                poly_label(f_degree),
            )
        }
        RecursionPattern::BinaryExclusive => (
            ComplexityBound::logarithmic()
                .with_explanation("mutually exclusive recursive branches halve the problem per call"),
            SolveMethod::Master,
            Some(1),
            Some(2),
            "O(1)".to_string(),
        ),
        RecursionPattern::DivideConquer => {
            let b = info
                .calls
                .iter()
                .find_map(|c| pick_size_arg(&c.args).and_then(find_divisor))
                .unwrap_or(2);
            // Two balanced recursive calls plus any loop over the input
            // contribute the +O(n) adjacent work spec §4.4 calls out.
            let f_degree = adjacent_loop_degree.max(if info.calls.len() >= 2 { 1 } else { 0 });
            (
                master_theorem(info.calls.len().max(1) as u32, b, f_degree, epsilon),
                SolveMethod::Master,
                Some(info.calls.len() as u32),
                Some(b),
                poly_label(f_degree),
            )
        }
        RecursionPattern::Binary => (
            additive_two_term(),
            SolveMethod::Tree,
            None,
            None,
            "c".to_string(),
        ),
        RecursionPattern::Multiple => (
            multiplicative(info.calls.len() as u32, fn_name),
            SolveMethod::Tree,
            Some(info.calls.len() as u32),
            Some(1),
            "c".to_string(),
        ),
        RecursionPattern::None => (ComplexityBound::constant(), SolveMethod::Derived, None, None, "c".to_string()),
    }
}

fn poly_label(degree: u32) -> String {
    match degree {
        0 => "O(1)".to_string(),
        1 => "O(n)".to_string(),
        d => format!("O(n^{d})"),
    }
}

/// Per-level textual cost breakdown for display (spec §4.4 "core uses
/// it to populate `level_costs`"), using the tree-height heuristics of
/// §4.6 step 5.
pub fn estimate_level_costs(info: &RecursionInfo, depth_bound: u32) -> Vec<String> {
    let branching = match info.pattern {
        RecursionPattern::Binary | RecursionPattern::Multiple => info.calls.len().max(2) as u64,
        RecursionPattern::DivideConquer => info.calls.len().max(2) as u64,
        _ => 1,
    };
    (0..depth_bound)
        .map(|level| {
            let nodes = branching.saturating_pow(level);
            format!("level {level}: {nodes} node(s)")
        })
        .collect()
}
