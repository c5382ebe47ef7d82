//! Union-Find over element positions.
//!
//! Used to merge strings into connected components when a pairwise
//! relation (such as a shared substring) links them transitively.

/// Disjoint-set forest with path compression and union-by-rank.
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Create a forest of `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Find the representative of the set containing `x`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Second pass points every node on the path at the root.
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets containing `x` and `y`.
    ///
    /// Returns true if they were previously disjoint.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);

        if rx == ry {
            return false;
        }

        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }

        true
    }

    /// Check if `x` and `y` share a set.
    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// All sets as position lists.
    ///
    /// Positions inside a group are ascending and groups are ordered by
    /// their lowest position, so the output follows input order.
    #[must_use]
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        // slot[root] = index into `groups` once the root has been seen
        let mut slot = vec![usize::MAX; n];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for i in 0..n {
            let root = self.find(i);
            if slot[root] == usize::MAX {
                slot[root] = groups.len();
                groups.push(Vec::new());
            }
            groups[slot[root]].push(i);
        }

        groups
    }

    /// Number of disjoint sets.
    pub fn num_sets(&mut self) -> usize {
        (0..self.parent.len()).filter(|&i| self.find(i) == i).count()
    }

    /// Total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Check if the forest has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_initial() {
        let mut uf = UnionFind::new(5);
        for i in 0..5 {
            assert_eq!(uf.find(i), i);
        }
        assert_eq!(uf.num_sets(), 5);
    }

    #[test]
    fn test_union_basic() {
        let mut uf = UnionFind::new(5);

        assert!(uf.union(0, 1));
        assert!(uf.connected(0, 1));
        assert!(!uf.union(1, 0));
    }

    #[test]
    fn test_union_is_transitive() {
        let mut uf = UnionFind::new(5);

        uf.union(0, 1);
        uf.union(1, 2);

        assert!(uf.connected(0, 2));
        assert!(!uf.connected(0, 3));
        assert_eq!(uf.num_sets(), 3);
    }

    #[test]
    fn test_groups_follow_input_order() {
        let mut uf = UnionFind::new(6);

        uf.union(4, 1);
        uf.union(5, 0);
        uf.union(1, 2);

        assert_eq!(uf.groups(), vec![vec![0, 5], vec![1, 2, 4], vec![3]]);
    }

    #[test]
    fn test_path_compression() {
        let mut uf = UnionFind::new(10);

        for i in 0..9 {
            uf.union(i, i + 1);
        }

        let root = uf.find(0);
        for i in 0..10 {
            uf.find(i);
            assert_eq!(uf.parent[i], root);
        }
    }

    #[test]
    fn test_empty() {
        let mut uf = UnionFind::new(0);
        assert!(uf.is_empty());
        assert_eq!(uf.len(), 0);
        assert!(uf.groups().is_empty());
    }

    #[test]
    fn test_large_union_find() {
        let n = 10_000;
        let mut uf = UnionFind::new(n);

        for i in 0..n - 2 {
            uf.union(i, i + 2);
        }

        assert_eq!(uf.num_sets(), 2);
        assert!(uf.connected(0, 100));
        assert!(uf.connected(1, 101));
        assert!(!uf.connected(0, 1));
    }
}
