//! End-to-end reproductions of the six worked scenarios, run through
//! `Orchestrator::process_code` exactly as a caller would.

use pcx::config::Config;
use pcx::services::Orchestrator;

fn analyze(source: &str, hint: &str) -> std::sync::Arc<pcx::models::AnalysisResult> {
    Orchestrator::new(Config::default()).process_code(source, hint)
}

#[test]
fn factorial_is_linear_recursion() {
    let result = analyze(
        "function factorial(n)
         begin
           if n <= 1 then begin return 1 end
           else begin return n * call factorial(n - 1) end
         end",
        "factorial",
    );
    assert!(result.error.is_none());
    assert_eq!(result.recursion_pattern, "linear");
    assert_eq!(result.heur_equation, "T(n) = T(n-1) + O(1)");
    assert_eq!(result.heur_complexity, "Θ(n)");
    for case in &result.cases {
        assert_eq!(case.complexity, "Θ(n)");
    }
}

#[test]
fn binary_search_is_binary_exclusive() {
    let result = analyze(
        "function busqueda_binaria(arr, izq, der, x)
         begin
           if izq > der then begin return -1 end
           mid = (izq + der) / 2
           if arr[mid] == x then begin return mid end
           if arr[mid] > x then begin return call busqueda_binaria(arr, izq, mid - 1, x) end
           else begin return call busqueda_binaria(arr, mid + 1, der, x) end
         end",
        "busqueda_binaria",
    );
    assert!(result.error.is_none());
    assert_eq!(result.recursion_pattern, "binary_exclusive");
    assert_eq!(result.heur_equation, "T(n) = T(n/2) + O(1)");
    assert_eq!(result.heur_complexity, "Θ(log n)");

    let best = result.cases.iter().find(|c| c.case_type.as_str() == "best").unwrap();
    assert_eq!(best.complexity, "Θ(1)");
    let worst = result.cases.iter().find(|c| c.case_type.as_str() == "worst").unwrap();
    assert_eq!(worst.complexity, "Θ(log n)");
    let average = result.cases.iter().find(|c| c.case_type.as_str() == "average").unwrap();
    assert_eq!(average.complexity, "Θ(log n)");
}

#[test]
fn merge_sort_like_is_master_theorem_n_log_n() {
    let result = analyze(
        "function merge_sort(n)
         begin
           if n <= 1 then begin return 1 end
           call merge_sort(n/2)
           call merge_sort(n/2)
           for i = 0 to n do begin a = 1 end
         end",
        "merge_sort",
    );
    assert!(result.error.is_none());
    assert_eq!(result.recursion_pattern, "divide_conquer");
    assert_eq!(result.heur_equation, "T(n) = 2T(n/2) + O(n)");
    assert_eq!(result.heur_complexity, "Θ(n log n)");
    assert_eq!(result.heur_method, "Master Theorem");
}

#[test]
fn fibonacci_is_additive_binary_recursion() {
    let result = analyze(
        "function fib(n)
         begin
           if n <= 1 then begin return n end
           return call fib(n-1) + call fib(n-2)
         end",
        "fib",
    );
    assert!(result.error.is_none());
    assert_eq!(result.recursion_pattern, "binary");
    assert_eq!(result.heur_equation, "T(n) = T(n-1) + T(n-2) + O(1)");
    assert_eq!(result.heur_complexity, "Θ(2^n)");
    assert_eq!(result.heur_method, "Recurrence Tree");
    for case in &result.cases {
        assert_eq!(case.complexity, "Θ(2^n)");
    }
}

#[test]
fn quadruple_nested_loop_is_n_to_the_fourth() {
    let result = analyze(
        "function stress(n)
         begin
           s = 0
           for i=1 to n do for j=1 to n do for k=1 to n do for t=1 to n do begin s = s + 1 end
           return s
         end",
        "stress",
    );
    assert!(result.error.is_none());
    assert!(!result.is_recursive);
    assert_eq!(result.heur_complexity, "Θ(n^4)");
    assert_eq!(result.math_complexity, "Θ(n^4)");
}

#[test]
fn constant_time_function_is_theta_one_everywhere() {
    let result = analyze("function c(n) begin x = 5; y = x + 10; return y end", "c");
    assert!(result.error.is_none());
    assert!(!result.is_recursive);
    assert_eq!(result.heur_equation, "T(n) = c");
    assert_eq!(result.heur_complexity, "Θ(1)");
    assert_eq!(result.cases.len(), 3);
    assert!(result.cases.iter().all(|c| c.complexity == "Θ(1)"));
}

#[test]
fn unresolved_function_hint_surfaces_as_error() {
    let result = analyze("function only(n) begin return n end", "missing");
    assert!(result.error.is_none(), "hint falls back to the last declared function");
    assert_eq!(result.function_name, "only");
}

#[test]
fn malformed_source_never_panics_and_is_reported_as_error() {
    let result = analyze("function f(n begin return 1 end", "f");
    assert!(result.error.is_some());
    assert_eq!(result.math_complexity, "N/A");
    assert_eq!(result.heur_complexity, "N/A");
    assert!(result.cases.is_empty());
}

#[test]
fn analyzing_the_same_source_twice_is_idempotent_modulo_elapsed() {
    let orchestrator = Orchestrator::new(Config::default());
    let src = "function fact(n) begin if n <= 1 then return 1 else return n * fact(n - 1) end end";
    let first = orchestrator.process_code(src, "fact");
    let second = orchestrator.process_code(src, "fact");
    assert_eq!(first.heur_equation, second.heur_equation);
    assert_eq!(first.heur_complexity, second.heur_complexity);
    assert_eq!(first.math_complexity, second.math_complexity);
    assert_eq!(first.recursion_pattern, second.recursion_pattern);
}
