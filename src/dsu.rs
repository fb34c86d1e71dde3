//! Disjoint-set (union-find) structure.
//!
//! Connectivity queries for network-based variants. Owned explicitly by
//! the component that needs grouping — typically a [`search::Network`] —
//! and passed around rather than held in process-wide state.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 21
//!
//! [`search::Network`]: crate::search::Network

/// Union-find with union by rank and path compression.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
    sets: usize,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether the structure is empty.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets remaining.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Representative of `v`'s set, compressing the path.
    pub fn find(&mut self, v: usize) -> usize {
        if self.parent[v] != v {
            self.parent[v] = self.find(self.parent[v]);
        }
        self.parent[v]
    }

    /// Representative of `v`'s set without compression.
    ///
    /// Read-only variant for shared-borrow contexts.
    pub fn root(&self, mut v: usize) -> usize {
        while self.parent[v] != v {
            v = self.parent[v];
        }
        v
    }

    /// Merges the sets of `a` and `b`. Returns `false` if already merged.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return false;
        }
        if self.rank[ra] < self.rank[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        if self.rank[ra] == self.rank[rb] {
            self.rank[ra] += 1;
        }
        self.sets -= 1;
        true
    }

    /// Whether `a` and `b` are in the same set.
    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.root(a) == self.root(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let dsu = DisjointSet::new(4);
        assert_eq!(dsu.set_count(), 4);
        assert!(!dsu.connected(0, 1));
        assert!(dsu.connected(2, 2));
    }

    #[test]
    fn test_union_merges() {
        let mut dsu = DisjointSet::new(5);
        assert!(dsu.union(0, 1));
        assert!(dsu.union(1, 2));
        assert!(!dsu.union(0, 2));
        assert_eq!(dsu.set_count(), 3);
        assert!(dsu.connected(0, 2));
        assert!(!dsu.connected(0, 3));
    }

    #[test]
    fn test_find_compresses() {
        let mut dsu = DisjointSet::new(6);
        for i in 0..5 {
            dsu.union(i, i + 1);
        }
        let root = dsu.find(5);
        assert_eq!(dsu.find(0), root);
        assert_eq!(dsu.root(3), root);
        assert_eq!(dsu.set_count(), 1);
    }
}
