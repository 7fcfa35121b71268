use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::set::Set;

mod invariants;

pub use invariants::InvariantViolation;

/// An ordered set of `i32` keys, stored in a left-leaning red-black tree.
///
/// Red links only ever lean left, so every node is either a 2-node (black left link) or
/// the upper half of a 3-node (red left link) in the equivalent 2-3 tree.
pub struct RBTree {
    root: Link,
}

// PROVE: any node with height `h` has black height at least `h/2`
// PROVE: the subtree located at any node `x` contains at least `2^bh(x) - 1` nodes (use induction)
// LEMMA: An RBTree with `n` internal nodes has height at most `2*log₂(n+1)`

type Link = Option<Box<RBTreeNode>>;

struct RBTreeNode {
    key: i32,
    // the color of the link from the parent to this node
    red: bool,
    // number of nodes in this subtree, including this one
    size: usize,
    left: Link,
    right: Link,
}

impl RBTreeNode {
    fn new(key: i32) -> Box<Self> {
        Box::new(Self {
            key,
            red: true,
            size: 1,
            left: None,
            right: None,
        })
    }

    fn update_size(&mut self) {
        self.size = 1 + size(&self.left) + size(&self.right);
    }

    fn left_left_is_red(&self) -> bool {
        self.left.as_ref().is_some_and(|left| is_red(&left.left))
    }

    fn right_left_is_red(&self) -> bool {
        self.right.as_ref().is_some_and(|right| is_red(&right.left))
    }

    fn min_key(&self) -> i32 {
        let mut node = self;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        node.key
    }
}

fn is_red(node: &Link) -> bool {
    node.as_ref().is_some_and(|n| n.red)
}

fn size(node: &Link) -> usize {
    node.as_ref().map_or(0, |n| n.size)
}

//          node                  x
//          /  \                 / \
//         a   (x)     →     (node) c
//             / \            /  \
//            b   c          a    b
//
// `x` takes the color and size of `node`, and `node` becomes red.
// Without a right child there is nothing to rotate, so `node` comes back unchanged.
fn rotate_left(mut node: Box<RBTreeNode>) -> Box<RBTreeNode> {
    let Some(mut x) = node.right.take() else { return node };
    node.right = x.left.take();
    x.red = node.red;
    node.red = true;
    x.size = node.size;
    node.update_size();
    x.left = Some(node);
    x
}

//          node                x
//          /  \               / \
//        (x)   c     →       a  (node)
//        / \                     /  \
//       a   b                   b    c
//
fn rotate_right(mut node: Box<RBTreeNode>) -> Box<RBTreeNode> {
    let Some(mut x) = node.left.take() else { return node };
    node.left = x.right.take();
    x.red = node.red;
    node.red = true;
    x.size = node.size;
    node.update_size();
    x.right = Some(node);
    x
}

// toggles, so the same flip splits a 4-node on the way up and merges 2-nodes on the way down
fn flip_colors(node: &mut RBTreeNode) {
    node.red = !node.red;
    if let Some(left) = node.left.as_mut() {
        left.red = !left.red;
    }
    if let Some(right) = node.right.as_mut() {
        right.red = !right.red;
    }
}

/// Restores the left-leaning invariants at `node` on the way back up, and recomputes its size.
fn fix_up(mut node: Box<RBTreeNode>) -> Box<RBTreeNode> {
    if is_red(&node.right) && !is_red(&node.left) {
        node = rotate_left(node);
    }
    if is_red(&node.left) && node.left_left_is_red() {
        node = rotate_right(node);
    }
    if is_red(&node.left) && is_red(&node.right) {
        flip_colors(&mut node);
    }
    node.update_size();
    node
}

// Assuming `node` is red and both `node.left` and `node.left.left` are black,
// makes `node.left` or one of its children red.
fn move_red_left(mut node: Box<RBTreeNode>) -> Box<RBTreeNode> {
    flip_colors(&mut node);
    if node.right_left_is_red() {
        node.right = node.right.take().map(rotate_right);
        node = rotate_left(node);
        flip_colors(&mut node);
    }
    node
}

// Assuming `node` is red and both `node.right` and `node.right.left` are black,
// makes `node.right` or one of its children red.
fn move_red_right(mut node: Box<RBTreeNode>) -> Box<RBTreeNode> {
    flip_colors(&mut node);
    if node.left_left_is_red() {
        node = rotate_right(node);
        flip_colors(&mut node);
    }
    node
}

fn insert_into(node: Link, key: i32) -> Box<RBTreeNode> {
    let Some(mut node) = node else {
        trace!("Creating node for {key}");
        return RBTreeNode::new(key)
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert_into(node.left.take(), key)),
        Ordering::Greater => node.right = Some(insert_into(node.right.take(), key)),
        // keys are their own payload, so this changes nothing observable
        Ordering::Equal => node.key = key,
    }

    fix_up(node)
}

/// Removes the smallest node in the subtree.
fn remove_min(mut node: Box<RBTreeNode>) -> Link {
    if node.left.is_none() {
        // a node with no left child can't have a right child either, or the black heights would differ
        debug_assert!(node.right.is_none());
        return None
    }

    if !is_red(&node.left) && !node.left_left_is_red() {
        node = move_red_left(node);
    }
    node.left = node.left.take().and_then(remove_min);

    Some(fix_up(node))
}

/// Removes `key` from the subtree. `key` must be present in it.
fn remove_from(mut node: Box<RBTreeNode>, key: i32) -> Link {
    if key < node.key {
        if !is_red(&node.left) && !node.left_left_is_red() {
            node = move_red_left(node);
        }
        node.left = node.left.take().and_then(|left| remove_from(left, key));
    } else {
        if is_red(&node.left) {
            node = rotate_right(node);
        }
        if key == node.key && node.right.is_none() {
            debug_assert!(node.left.is_none());
            trace!("Splicing out node {key}");
            return None
        }
        if !is_red(&node.right) && !node.right_left_is_red() {
            node = move_red_right(node);
        }
        if key == node.key {
            // replace the key with its in-order successor, then drop the successor's node
            if let Some(right) = node.right.take() {
                node.key = right.min_key();
                trace!("Replacing {key} with its successor {}", node.key);
                node.right = remove_min(right);
            }
        } else {
            node.right = node.right.take().and_then(|right| remove_from(right, key));
        }
    }

    Some(fix_up(node))
}

impl RBTree {
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// The amount of keys in the tree.
    ///
    /// Complexity: O(1)
    pub fn len(&self) -> usize {
        size(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Complexity: O(log(n))
    pub fn contains(&self, key: i32) -> bool {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            node = match key.cmp(&n.key) {
                Ordering::Less => n.left.as_deref(),
                Ordering::Greater => n.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Inserts `key` into the tree. Inserting a key that is already there does nothing.
    ///
    /// Complexity: O(log(n))
    pub fn insert(&mut self, key: i32) {
        trace!("Inserting {key}");

        let mut root = insert_into(self.root.take(), key);
        root.red = false;
        self.root = Some(root);
    }

    /// Removes `key` from the tree, if it is there.
    ///
    /// Complexity: O(log(n))
    pub fn remove(&mut self, key: i32) {
        if !self.contains(key) {
            debug!("Ignoring removal of {key}, which isn't in the tree");
            return
        }
        trace!("Removing {key}");

        let Some(mut root) = self.root.take() else { return };

        // the deletion needs to start from a red root, so it always has something to borrow from
        if !is_red(&root.left) && !is_red(&root.right) {
            debug!("Recoloring root {} red before deletion", root.key);
            root.red = true;
        }

        self.root = remove_from(root, key);

        if let Some(root) = self.root.as_mut() {
            root.red = false;
        }
    }

    /// Removes every key from the tree.
    pub fn clear(&mut self) {
        debug!("Clearing tree of {} keys", self.len());
        // children are dropped before their parents, since each node owns its subtrees
        self.root = None;
    }
}

impl Default for RBTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RBTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RBTree")
            .field("len", &self.len())
            .field("height", &self.height())
            .finish()
    }
}

impl Extend<i32> for RBTree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<i32> for RBTree {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl Set for RBTree {
    fn size(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        RBTree::is_empty(self)
    }

    fn insert(&mut self, key: i32) {
        RBTree::insert(self, key)
    }

    fn contains(&self, key: i32) -> bool {
        RBTree::contains(self, key)
    }

    fn remove(&mut self, key: i32) {
        RBTree::remove(self, key)
    }
}
