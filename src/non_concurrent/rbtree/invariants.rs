use super::{Link, RBTree, is_red};

/// A broken red-black invariant, as found by [`RBTree::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("the root is red")]
    RedRoot,

    #[error("node {key} has a red right child")]
    RightLeaningRed { key: i32 },

    #[error("node {key} and its left child are both red")]
    ConsecutiveReds { key: i32 },

    #[error("node {key} has {left} black links below its left side but {right} below its right")]
    UnbalancedBlacks { key: i32, left: usize, right: usize },

    #[error("key {key} is on the wrong side of {bound}")]
    OutOfOrder { key: i32, bound: i32 },

    #[error("node {key} claims a subtree of {stored} nodes, but has {actual}")]
    SizeMismatch { key: i32, stored: usize, actual: usize },
}

impl RBTree {
    /// Walks the whole tree, checking ordering, coloring, black balance, and subtree sizes.
    ///
    /// Complexity: O(n)
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if is_red(&self.root) {
            return Err(InvariantViolation::RedRoot)
        }
        check_subtree(&self.root, None, None).map(|_| ())
    }

    /// The amount of nodes on the longest path from the root, or 0 for an empty tree.
    ///
    /// Complexity: O(n)
    pub fn height(&self) -> usize {
        fn height(node: &Link) -> usize {
            node.as_ref().map_or(0, |n| 1 + height(&n.left).max(height(&n.right)))
        }
        height(&self.root)
    }

    /// The amount of black nodes on any path from the root.
    ///
    /// Only meaningful when the tree is balanced, since it just follows the left spine.
    pub fn black_height(&self) -> usize {
        let mut blacks = 0;
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            blacks += !n.red as usize;
            node = n.left.as_deref();
        }
        blacks
    }
}

/// Returns `(black height, node count)` of the subtree, with every key strictly between `lower` and `upper`.
fn check_subtree(node: &Link, lower: Option<i32>, upper: Option<i32>) -> Result<(usize, usize), InvariantViolation> {
    let Some(node) = node.as_deref() else { return Ok((0, 0)) };
    let (key, red, size) = (node.key, node.red, node.size);

    if let Some(bound) = lower.filter(|&b| key <= b) {
        return Err(InvariantViolation::OutOfOrder { key, bound })
    }
    if let Some(bound) = upper.filter(|&b| key >= b) {
        return Err(InvariantViolation::OutOfOrder { key, bound })
    }
    if is_red(&node.right) {
        return Err(InvariantViolation::RightLeaningRed { key })
    }
    if red && is_red(&node.left) {
        return Err(InvariantViolation::ConsecutiveReds { key })
    }

    let (left, left_count) = check_subtree(&node.left, lower, Some(key))?;
    let (right, right_count) = check_subtree(&node.right, Some(key), upper)?;
    if left != right {
        return Err(InvariantViolation::UnbalancedBlacks { key, left, right })
    }

    let actual = 1 + left_count + right_count;
    if size != actual {
        return Err(InvariantViolation::SizeMismatch { key, stored: size, actual })
    }

    Ok((left + !red as usize, actual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::RBTreeNode;

    fn leaf(key: i32, red: bool) -> Link {
        Some(Box::new(RBTreeNode { key, red, size: 1, left: None, right: None }))
    }

    fn node(key: i32, red: bool, left: Link, right: Link) -> Link {
        let mut n = Box::new(RBTreeNode { key, red, size: 0, left, right });
        n.update_size();
        Some(n)
    }

    #[test]
    fn accepts_valid_trees() {
        assert_eq!(RBTree::new().check_invariants(), Ok(()));

        let tree: RBTree = (0..64).collect();
        assert_eq!(tree.check_invariants(), Ok(()));
        assert!(tree.black_height() > 0);
        assert!(tree.height() >= tree.black_height());
        assert!(tree.height() <= 2 * tree.black_height());
    }

    #[test]
    fn rejects_red_root() {
        let tree = RBTree { root: leaf(1, true) };
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot));
    }

    #[test]
    fn rejects_right_leaning_red() {
        let tree = RBTree { root: node(1, false, None, leaf(2, true)) };
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RightLeaningRed { key: 1 }));
    }

    #[test]
    fn rejects_consecutive_reds() {
        let tree = RBTree { root: node(3, false, node(2, true, leaf(1, true), None), leaf(4, false)) };
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::ConsecutiveReds { key: 2 }));
    }

    #[test]
    fn rejects_unbalanced_blacks() {
        let tree = RBTree { root: node(2, false, leaf(1, false), None) };
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::UnbalancedBlacks { key: 2, left: 1, right: 0 })
        );
    }

    #[test]
    fn rejects_misordered_keys() {
        let tree = RBTree {
            root: node(4, false, node(2, false, leaf(1, false), leaf(3, false)), node(6, false, leaf(5, false), leaf(7, false))),
        };
        assert_eq!(tree.check_invariants(), Ok(()));

        // 5 is greater than its parent 2, but it still sits left of 4
        let tree = RBTree {
            root: node(4, false, node(2, false, leaf(1, false), leaf(5, false)), node(6, false, leaf(3, false), leaf(7, false))),
        };
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::OutOfOrder { key: 5, bound: 4 }));
    }

    #[test]
    fn rejects_stale_sizes() {
        let mut root = node(2, false, leaf(1, false), leaf(3, false));
        if let Some(r) = root.as_mut() {
            r.size = 7;
        }
        let tree = RBTree { root };
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::SizeMismatch { key: 2, stored: 7, actual: 3 })
        );
    }
}
