//! Property tests for the quantified invariants of §8: generated
//! loop-nesting-only functions reduce to `Θ(n^d)`, zero-loop/no-recursion
//! functions reduce to `Θ(1)`, and `constant`-typed functions report
//! `Θ(1)` for all three cases.

use proptest::prelude::*;

use pcx::config::Config;
use pcx::services::Orchestrator;

/// Builds a function with `depth` nested `for` loops around a single
/// assignment, e.g. depth 2: `for i=1 to n do for j=1 to n do begin s = s + 1 end`.
fn nested_loops_source(depth: u32) -> String {
    let mut src = String::from("function f(n) begin\ns = 0\n");
    for i in 0..depth {
        src.push_str(&format!("for i{i} = 1 to n do "));
    }
    if depth == 0 {
        src.push_str("s = s + 1\n");
    } else {
        src.push_str("begin s = s + 1 end\n");
    }
    src.push_str("return s\nend");
    src
}

fn expected_notation(degree: u32) -> String {
    match degree {
        0 => "Θ(1)".to_string(),
        1 => "Θ(n)".to_string(),
        d => format!("Θ(n^{d})"),
    }
}

proptest! {
    #[test]
    fn loop_nesting_only_yields_theta_n_to_the_d(depth in 1u32..6) {
        let source = nested_loops_source(depth);
        let result = Orchestrator::new(Config::default()).process_code(&source, "f");
        prop_assert!(result.error.is_none(), "source failed to analyze: {:?}\n{source}", result.error);
        prop_assert!(!result.is_recursive);
        prop_assert_eq!(&result.heur_complexity, &expected_notation(depth));
        prop_assert_eq!(&result.math_complexity, &expected_notation(depth));
    }

    #[test]
    fn zero_loops_and_no_recursion_yields_theta_one(n_statements in 1usize..5) {
        let mut src = String::from("function f(n) begin\n");
        for i in 0..n_statements {
            src.push_str(&format!("x{i} = {i}\n"));
        }
        src.push_str("return n\nend");
        let result = Orchestrator::new(Config::default()).process_code(&src, "f");
        prop_assert!(result.error.is_none());
        prop_assert!(!result.is_recursive);
        prop_assert_eq!(&result.heur_complexity, "Θ(1)");
        prop_assert!(result.cases.iter().all(|c| c.complexity == "Θ(1)"));
    }
}

#[test]
fn single_self_call_linear_recursion_is_theta_n() {
    for decrement in 1..=4i64 {
        let source = format!(
            "function f(n) begin if n <= 0 then return 0 else return n + call f(n - {decrement}) end end"
        );
        let result = Orchestrator::new(Config::default()).process_code(&source, "f");
        assert!(result.error.is_none());
        assert_eq!(result.recursion_pattern, "linear");
        assert_eq!(result.heur_complexity, "Θ(n)");
    }
}

#[test]
fn constant_algorithm_type_has_all_three_cases_theta_one() {
    let source = "function f(n) begin x = 1; y = 2; return x + y end";
    let result = Orchestrator::new(Config::default()).process_code(source, "f");
    assert!(result.error.is_none());
    assert_eq!(result.cases.len(), 3);
    assert!(result.cases.iter().all(|c| c.complexity == "Θ(1)"));
}
