pub mod analysis_result;
pub mod complexity_bound;

pub use analysis_result::{
    AlgorithmType, AnalysisResult, AsymptoticBound, CallSite, CaseAnalysis, CaseKind, NodeKey,
    RecurrenceEquation, RecurrenceTree, RecursionInfo, RecursionPattern, SolveMethod, TreeNode,
};
pub use complexity_bound::{BigOClass, ComplexityBound, Notation};
