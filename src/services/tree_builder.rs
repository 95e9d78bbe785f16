//! Recurrence-Tree Builder (spec §4.6).
//!
//! Materializes the first few levels of a recursion's call tree for
//! display. Every node is freshly allocated with a process-unique id;
//! none are shared across branches, matching the "no reuse of tree
//! nodes across subtrees" contract.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::models::{NodeKey, RecursionInfo, RecursionPattern, TreeNode};

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

fn next_id() -> NodeKey {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Branching factor per pattern and the label each child's problem
/// size should carry, e.g. `"n/2"` for a divide-and-conquer call.
fn branch_spec(info: &RecursionInfo) -> (u32, &'static str) {
    match info.pattern {
        RecursionPattern::Linear => (1, "n-1"),
        RecursionPattern::BinaryExclusive => (1, "n/2"),
        RecursionPattern::DivideConquer => (info.calls.len().max(2) as u32, "n/2"),
        RecursionPattern::Binary => (2, "n-k"),
        RecursionPattern::Multiple => (info.calls.len().max(3) as u32, "n-1"),
        RecursionPattern::None => (0, "n"),
    }
}

/// Builds only the tree topology; per-level cost strings for
/// `AnalysisResult.level_costs` come from
/// [`crate::services::asymptotic::estimate_level_costs`] instead, so
/// the two engines that both compute level costs (spec §4.4 step and
/// §4.6 step 4) don't disagree silently in the same result.
pub fn build(info: &RecursionInfo, depth_bound: u32) -> Option<TreeNode> {
    if !info.has_recursion || depth_bound == 0 {
        return None;
    }

    let (branching, child_label) = branch_spec(info);
    if branching == 0 {
        return None;
    }

    Some(build_node("n".to_string(), 0, branching, child_label, depth_bound))
}

fn build_node(problem_size: String, level: u32, branching: u32, child_label: &str, depth_bound: u32) -> TreeNode {
    let children = if level + 1 < depth_bound {
        (0..branching)
            .map(|_| build_node(child_label.to_string(), level + 1, branching, child_label, depth_bound))
            .collect()
    } else {
        Vec::new()
    };
    TreeNode {
        id: next_id(),
        problem_size,
        work: "O(1) per node".to_string(),
        level,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CallSite;

    fn info_with(pattern: RecursionPattern, n_calls: usize) -> RecursionInfo {
        RecursionInfo {
            has_recursion: true,
            calls: (0..n_calls)
                .map(|_| CallSite { args: Vec::new(), in_exclusive_branch: false })
                .collect(),
            pattern,
            exclusive_branch_calls: false,
            relation: String::new(),
            base_cases: Default::default(),
        }
    }

    #[test]
    fn linear_recursion_builds_a_chain() {
        let info = info_with(RecursionPattern::Linear, 1);
        let root = build(&info, 3).unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].children.len(), 1);
    }

    #[test]
    fn binary_recursion_doubles_each_level() {
        let info = info_with(RecursionPattern::Binary, 2);
        let root = build(&info, 3).unwrap();
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].children.len(), 2);
    }

    #[test]
    fn no_recursion_builds_no_tree() {
        let info = RecursionInfo::none();
        assert!(build(&info, 4).is_none());
    }
}
