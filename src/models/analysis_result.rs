//! Output data model: the structures every engine in `services/`
//! produces and the Orchestrator assembles into [`AnalysisResult`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ast::Expr;
use crate::models::complexity_bound::{ComplexityBound, Notation};

/// One of the six recurrence pattern families a function's self-calls
/// can fall into (spec §4.2, GLOSSARY "Pattern family").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecursionPattern {
    None,
    Linear,
    Binary,
    BinaryExclusive,
    DivideConquer,
    Multiple,
}

impl RecursionPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecursionPattern::None => "none",
            RecursionPattern::Linear => "linear",
            RecursionPattern::Binary => "binary",
            RecursionPattern::BinaryExclusive => "binary_exclusive",
            RecursionPattern::DivideConquer => "divide_conquer",
            RecursionPattern::Multiple => "multiple",
        }
    }
}

impl std::fmt::Display for RecursionPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recursive call site discovered by the classifier, keeping
/// the raw argument AST so later passes can inspect its shape (e.g.
/// subtraction constant, division factor) without re-walking the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSite {
    pub args: Vec<Expr>,
    pub in_exclusive_branch: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecursionInfo {
    pub has_recursion: bool,
    pub calls: Vec<CallSite>,
    pub pattern: RecursionPattern,
    pub exclusive_branch_calls: bool,
    pub relation: String,
    pub base_cases: BTreeMap<String, String>,
}

impl RecursionInfo {
    pub fn none() -> Self {
        Self {
            has_recursion: false,
            calls: Vec::new(),
            pattern: RecursionPattern::None,
            exclusive_branch_calls: false,
            relation: "T(n) = c".to_string(),
            base_cases: BTreeMap::new(),
        }
    }
}

/// The method a [`RecurrenceEquation`] was solved with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveMethod {
    Master,
    Substitution,
    Tree,
    LoopAnalysis,
    Derived,
}

impl SolveMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolveMethod::Master => "Master Theorem",
            SolveMethod::Substitution => "Substitution",
            SolveMethod::Tree => "Recurrence Tree",
            SolveMethod::LoopAnalysis => "Loop Analysis",
            SolveMethod::Derived => "Derived",
        }
    }
}

impl std::fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrenceEquation {
    pub equation: String,
    pub a: Option<u32>,
    pub b: Option<u32>,
    pub f_n: String,
    pub base_cases: BTreeMap<String, String>,
    pub method: SolveMethod,
}

/// Wire/display form of a [`ComplexityBound`] (spec §3: "all strings
/// are UTF-8... confidence 0..1").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsymptoticBound {
    pub complexity: String,
    pub notation: String,
    pub confidence: f32,
    pub explanation: String,
}

impl From<&ComplexityBound> for AsymptoticBound {
    fn from(bound: &ComplexityBound) -> Self {
        Self {
            complexity: bound.display(),
            notation: bound.notation.glyph().to_string(),
            confidence: bound.confidence as f32 / 100.0,
            explanation: bound.explanation.clone(),
        }
    }
}

impl AsymptoticBound {
    pub fn unknown(explanation: impl Into<String>) -> Self {
        Self {
            complexity: "O(?)".to_string(),
            notation: Notation::BigO.glyph().to_string(),
            confidence: 0.0,
            explanation: explanation.into(),
        }
    }
}

/// One of best/worst/average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseKind {
    Best,
    Worst,
    Average,
}

impl CaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseKind::Best => "best",
            CaseKind::Worst => "worst",
            CaseKind::Average => "average",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseAnalysis {
    pub case_type: CaseKind,
    pub complexity: String,
    pub scenario: String,
    pub example: String,
    pub explanation: String,
}

/// The refined algorithm shape the Case Analyzer detects (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlgorithmType {
    Fibonacci,
    BinarySearch,
    DivideConquer,
    Recursive,
    LinearSearch,
    LinearProcessing,
    NestedLoops,
    PrimeTest,
    Constant,
}

impl AlgorithmType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::Fibonacci => "fibonacci",
            AlgorithmType::BinarySearch => "binary_search",
            AlgorithmType::DivideConquer => "divide_conquer",
            AlgorithmType::Recursive => "recursive",
            AlgorithmType::LinearSearch => "linear_search",
            AlgorithmType::LinearProcessing => "linear_processing",
            AlgorithmType::NestedLoops => "nested_loops",
            AlgorithmType::PrimeTest => "prime_test",
            AlgorithmType::Constant => "constant",
        }
    }
}

/// A node in the recurrence-tree topology (spec §4.6). Nodes are keyed
/// by a process-unique id rather than shared by reference, matching
/// the "no reuse of tree nodes across subtrees" contract.
pub type NodeKey = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeKey,
    pub problem_size: String,
    pub work: String,
    pub level: u32,
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrenceTree {
    pub root: Option<TreeNode>,
    pub level_costs: Vec<String>,
}

/// The full per-function analysis packed by the Orchestrator (spec §3).
/// Every field is populated with a best-effort value or an explicit
/// sentinel (`"N/A"`) when a pipeline stage failed; `error` is the only
/// field callers should branch on to detect failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub function_name: String,
    pub code: String,
    pub ast: Option<crate::ast::Function>,

    pub math_expr: String,
    pub math_complexity: String,

    pub heur_equation: String,
    pub heur_base_cases: BTreeMap<String, String>,
    pub heur_complexity: String,
    pub heur_notation: String,
    pub heur_method: String,
    pub heur_explanation: String,

    pub is_recursive: bool,
    pub recursion_pattern: String,

    pub tree: Option<TreeNode>,
    pub level_costs: Vec<String>,
    pub cases: Vec<CaseAnalysis>,

    pub elapsed_ms: f64,
    pub error: Option<String>,
}

impl AnalysisResult {
    /// A result carrying nothing but the error: every other field is
    /// set to the sentinels spec §4.7 / §7 prescribe ("N/A", empty
    /// maps) so presentation layers can render a stable shape.
    pub fn failed(filename: &str, hint: &str, code: &str, error: impl Into<String>) -> Self {
        Self {
            filename: filename.to_string(),
            function_name: hint.to_string(),
            code: code.to_string(),
            ast: None,
            math_expr: "N/A".to_string(),
            math_complexity: "N/A".to_string(),
            heur_equation: "N/A".to_string(),
            heur_base_cases: BTreeMap::new(),
            heur_complexity: "N/A".to_string(),
            heur_notation: "N/A".to_string(),
            heur_method: "N/A".to_string(),
            heur_explanation: "N/A".to_string(),
            is_recursive: false,
            recursion_pattern: "N/A".to_string(),
            tree: None,
            level_costs: Vec::new(),
            cases: Vec::new(),
            elapsed_ms: 0.0,
            error: Some(error.into()),
        }
    }
}
