//! AVL Ordered Map
//!
//! A key-value map kept height-balanced with AVL rotations.
//!
//! Structure:
//! - All nodes live in a single Vec and refer to each other by u32 index
//! - Erased nodes are reclaimed with swap_remove; the node that moves into
//!   the hole is re-linked by searching for its key from the root
//!
//! Operations:
//! - insert / erase: O(log n)
//! - contains / find / get: O(log n)
//! - predecessor / successor (inclusive): O(log n)
//! - iter: O(n) in key order

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

/// Index into the node array.
type NodeIdx = u32;
/// Sentinel value for no child / empty tree.
const NONE: u32 = u32::MAX;

/// Debug builds audit the whole tree after each mutation up to this many
/// nodes.
#[cfg(debug_assertions)]
const AUDIT_LIMIT: usize = 1 << 10;

#[derive(Clone, Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: NodeIdx,
    right: NodeIdx,
    /// Height of the subtree rooted here; a lone node has height 1.
    height: u8,
}

/// An ordered map backed by an AVL tree.
///
/// ```
/// use lazyseg::AvlMap;
///
/// let mut map = AvlMap::new();
/// map.insert(10, "ten");
/// map.insert(20, "twenty");
/// assert_eq!(map.predecessor(&15), Some((&10, &"ten")));
/// assert_eq!(map.successor(&15), Some((&20, &"twenty")));
/// assert_eq!(map.successor(&20), Some((&20, &"twenty")));
/// ```
#[derive(Clone)]
pub struct AvlMap<K, V> {
    nodes: Vec<Node<K, V>>,
    root: NodeIdx,
}

impl<K: Ord, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Create a new empty map.
    pub fn new() -> AvlMap<K, V> {
        return AvlMap {
            nodes: Vec::new(),
            root: NONE,
        };
    }

    #[inline]
    pub fn len(&self) -> usize {
        return self.nodes.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.nodes.is_empty();
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NONE;
    }

    /// Insert a key-value pair. If the key was present its value is replaced
    /// and the old value returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, old) = self.insert_at(self.root, key, value);
        self.root = root;
        self.check_invariants();
        return old;
    }

    /// Remove a key, returning its value if it was present.
    pub fn erase(&mut self, key: &K) -> Option<V> {
        let (root, removed) = self.erase_at(self.root, key);
        self.root = root;
        if removed == NONE {
            return None;
        }
        let node = self.reclaim(removed);
        self.check_invariants();
        return Some(node.value);
    }

    pub fn contains(&self, key: &K) -> bool {
        return self.locate(key) != NONE;
    }

    /// The stored key and value for `key`.
    pub fn find(&self, key: &K) -> Option<(&K, &V)> {
        return self.entry(self.locate(key));
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        return self.find(key).map(|(_, value)| value);
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.locate(key);
        if idx == NONE {
            return None;
        }
        return Some(&mut self.nodes[idx as usize].value);
    }

    /// The entry with the greatest key `<= key`.
    pub fn predecessor(&self, key: &K) -> Option<(&K, &V)> {
        let mut best = NONE;
        let mut idx = self.root;
        while idx != NONE {
            let node = self.node(idx);
            match key.cmp(&node.key) {
                Ordering::Equal => return self.entry(idx),
                Ordering::Greater => {
                    best = idx;
                    idx = node.right;
                }
                Ordering::Less => idx = node.left,
            }
        }
        return self.entry(best);
    }

    /// The entry with the least key `>= key`.
    pub fn successor(&self, key: &K) -> Option<(&K, &V)> {
        let mut best = NONE;
        let mut idx = self.root;
        while idx != NONE {
            let node = self.node(idx);
            match key.cmp(&node.key) {
                Ordering::Equal => return self.entry(idx),
                Ordering::Less => {
                    best = idx;
                    idx = node.left;
                }
                Ordering::Greater => idx = node.right,
            }
        }
        return self.entry(best);
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            map: self,
            stack: SmallVec::new(),
        };
        iter.push_left_spine(self.root);
        return iter;
    }

    // --- Node access ---

    #[inline(always)]
    fn node(&self, idx: NodeIdx) -> &Node<K, V> {
        return &self.nodes[idx as usize];
    }

    #[inline(always)]
    fn node_mut(&mut self, idx: NodeIdx) -> &mut Node<K, V> {
        return &mut self.nodes[idx as usize];
    }

    #[inline]
    fn entry(&self, idx: NodeIdx) -> Option<(&K, &V)> {
        if idx == NONE {
            return None;
        }
        let node = self.node(idx);
        return Some((&node.key, &node.value));
    }

    fn locate(&self, key: &K) -> NodeIdx {
        let mut idx = self.root;
        while idx != NONE {
            let node = self.node(idx);
            idx = match key.cmp(&node.key) {
                Ordering::Equal => return idx,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        return NONE;
    }

    // --- Balancing ---

    #[inline(always)]
    fn height(&self, idx: NodeIdx) -> u8 {
        if idx == NONE {
            return 0;
        }
        return self.node(idx).height;
    }

    /// Right height minus left height.
    #[inline]
    fn balance_factor(&self, idx: NodeIdx) -> i16 {
        if idx == NONE {
            return 0;
        }
        let node = self.node(idx);
        return self.height(node.right) as i16 - self.height(node.left) as i16;
    }

    #[inline]
    fn update(&mut self, idx: NodeIdx) {
        let node = self.node(idx);
        let height = 1 + self.height(node.left).max(self.height(node.right));
        self.node_mut(idx).height = height;
    }

    /// Returns the new subtree root.
    fn rotate_left(&mut self, idx: NodeIdx) -> NodeIdx {
        let right = self.node(idx).right;
        self.node_mut(idx).right = self.node(right).left;
        self.node_mut(right).left = idx;
        self.update(idx);
        self.update(right);
        return right;
    }

    /// Returns the new subtree root.
    fn rotate_right(&mut self, idx: NodeIdx) -> NodeIdx {
        let left = self.node(idx).left;
        self.node_mut(idx).left = self.node(left).right;
        self.node_mut(left).right = idx;
        self.update(idx);
        self.update(left);
        return left;
    }

    /// Restore the AVL property at `idx`, whose children are balanced.
    /// Returns the new subtree root.
    fn rebalance(&mut self, idx: NodeIdx) -> NodeIdx {
        self.update(idx);
        let factor = self.balance_factor(idx);

        if factor < -1 {
            let left = self.node(idx).left;
            if self.balance_factor(left) > 0 {
                let new_left = self.rotate_left(left);
                self.node_mut(idx).left = new_left;
            }
            return self.rotate_right(idx);
        }
        if factor > 1 {
            let right = self.node(idx).right;
            if self.balance_factor(right) < 0 {
                let new_right = self.rotate_right(right);
                self.node_mut(idx).right = new_right;
            }
            return self.rotate_left(idx);
        }
        return idx;
    }

    // --- Core operations ---

    /// Returns the new subtree root and the replaced value, if any.
    fn insert_at(&mut self, idx: NodeIdx, key: K, value: V) -> (NodeIdx, Option<V>) {
        if idx == NONE {
            let new = self.nodes.len();
            assert!(new < NONE as usize, "AvlMap is full");
            self.nodes.push(Node {
                key,
                value,
                left: NONE,
                right: NONE,
                height: 1,
            });
            return (new as NodeIdx, None);
        }

        match key.cmp(&self.node(idx).key) {
            Ordering::Equal => {
                let old = std::mem::replace(&mut self.node_mut(idx).value, value);
                return (idx, Some(old));
            }
            Ordering::Less => {
                let (child, old) = self.insert_at(self.node(idx).left, key, value);
                self.node_mut(idx).left = child;
                if old.is_some() {
                    return (idx, old);
                }
            }
            Ordering::Greater => {
                let (child, old) = self.insert_at(self.node(idx).right, key, value);
                self.node_mut(idx).right = child;
                if old.is_some() {
                    return (idx, old);
                }
            }
        }
        return (self.rebalance(idx), None);
    }

    /// Unlink the node holding `key` from the subtree at `idx`.
    /// Returns the new subtree root and the unlinked node (NONE if absent).
    /// The unlinked node stays in the arena until `reclaim`.
    fn erase_at(&mut self, idx: NodeIdx, key: &K) -> (NodeIdx, NodeIdx) {
        if idx == NONE {
            return (NONE, NONE);
        }

        match key.cmp(&self.node(idx).key) {
            Ordering::Less => {
                let (child, removed) = self.erase_at(self.node(idx).left, key);
                if removed == NONE {
                    return (idx, NONE);
                }
                self.node_mut(idx).left = child;
                return (self.rebalance(idx), removed);
            }
            Ordering::Greater => {
                let (child, removed) = self.erase_at(self.node(idx).right, key);
                if removed == NONE {
                    return (idx, NONE);
                }
                self.node_mut(idx).right = child;
                return (self.rebalance(idx), removed);
            }
            Ordering::Equal => {
                let Node { left, right, .. } = *self.node(idx);
                if left == NONE {
                    return (right, idx);
                }
                if right == NONE {
                    return (left, idx);
                }
                // The in-order successor takes this node's place.
                let (rest, heir) = self.detach_min(right);
                self.node_mut(heir).left = left;
                self.node_mut(heir).right = rest;
                return (self.rebalance(heir), idx);
            }
        }
    }

    /// Unlink the leftmost node of the subtree at `idx`.
    /// Returns the new subtree root and the unlinked node.
    fn detach_min(&mut self, idx: NodeIdx) -> (NodeIdx, NodeIdx) {
        let left = self.node(idx).left;
        if left == NONE {
            return (self.node(idx).right, idx);
        }
        let (rest, min) = self.detach_min(left);
        self.node_mut(idx).left = rest;
        return (self.rebalance(idx), min);
    }

    /// Remove an unlinked node from the arena. The last node moves into its
    /// slot, so the link pointing at the last node is redirected.
    fn reclaim(&mut self, removed: NodeIdx) -> Node<K, V> {
        let last = (self.nodes.len() - 1) as NodeIdx;
        let node = self.nodes.swap_remove(removed as usize);
        if removed == last {
            return node;
        }

        if self.root == last {
            self.root = removed;
            return node;
        }
        let mut idx = self.root;
        loop {
            let parent = self.node(idx);
            let go_left = self.node(removed).key < parent.key;
            let next = if go_left { parent.left } else { parent.right };
            if next == last {
                if go_left {
                    self.node_mut(idx).left = removed;
                } else {
                    self.node_mut(idx).right = removed;
                }
                return node;
            }
            idx = next;
        }
    }

    // --- Invariant checking ---

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        if self.nodes.len() > AUDIT_LIMIT {
            return;
        }

        // Invariant 1: every arena slot is reachable exactly once
        let reachable = self.audit(self.root, None, None);
        assert_eq!(
            reachable,
            self.nodes.len(),
            "INVARIANT VIOLATED: reachable nodes={} != arena len={}",
            reachable,
            self.nodes.len()
        );
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_invariants(&self) {}

    /// Check ordering, stored heights and balance below `idx`.
    /// Returns the number of nodes in the subtree.
    #[cfg(debug_assertions)]
    fn audit(&self, idx: NodeIdx, lower: Option<&K>, upper: Option<&K>) -> usize {
        if idx == NONE {
            return 0;
        }
        let node = self.node(idx);
        if let Some(lower) = lower {
            assert!(*lower < node.key, "INVARIANT VIOLATED: node {} out of order", idx);
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper, "INVARIANT VIOLATED: node {} out of order", idx);
        }

        let count = 1
            + self.audit(node.left, lower, Some(&node.key))
            + self.audit(node.right, Some(&node.key), upper);

        let expected = 1 + self.height(node.left).max(self.height(node.right));
        assert_eq!(node.height, expected, "INVARIANT VIOLATED: node {} height", idx);
        let factor = self.balance_factor(idx);
        assert!(
            (-1..=1).contains(&factor),
            "INVARIANT VIOLATED: node {} balance factor {}",
            idx,
            factor
        );
        return count;
    }
}

/// In-order iterator over an `AvlMap`.
pub struct Iter<'a, K, V> {
    map: &'a AvlMap<K, V>,
    /// Ancestors whose key has not been yielded yet.
    stack: SmallVec<[NodeIdx; 32]>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut idx: NodeIdx) {
        while idx != NONE {
            self.stack.push(idx);
            idx = self.map.nodes[idx as usize].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = &self.map.nodes[idx as usize];
        self.push_left_spine(node.right);
        return Some((&node.key, &node.value));
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a AvlMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        return self.iter();
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = AvlMap::new();
        map.extend(iter);
        return map;
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for AvlMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_map().entries(self.iter()).finish();
    }
}
