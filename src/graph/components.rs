//! Bridge pruning and connected components
//!
//! Both traversals are iterative (explicit queue / stack), so cluster size
//! never turns into recursion depth.

use super::cooccurrence::CooccurrenceGraph;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

impl<N, W> CooccurrenceGraph<N, W>
where
    N: Eq + Hash + Clone + Debug,
    W: Copy,
{
    /// Remove every bridge edge, keeping edges that lie on a cycle.
    ///
    /// Each edge of a snapshot is taken out and the graph is searched for
    /// another path between its endpoints. With such a path the edge is
    /// put back; without one it stays removed. Removing a bridge never turns
    /// another edge into a bridge, so the result does not depend on the
    /// snapshot order and a second call prunes nothing.
    ///
    /// Returns the number of pruned edges.
    pub fn prune_weak_edges(&mut self) -> usize {
        let mut pruned = 0;

        for (a, b) in self.sorted_edge_keys() {
            let Some(weight) = self.take_edge(a, b) else {
                continue;
            };
            if self.reachable(a, b) {
                self.insert_edge(a, b, weight);
            } else {
                pruned += 1;
            }
        }

        pruned
    }

    /// Check if a path of current edges joins two nodes.
    ///
    /// Returns `false` when either node is absent.
    pub fn is_connected(&self, a: &N, b: &N) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(ia), Some(ib)) => self.reachable(ia, ib),
            _ => false,
        }
    }

    /// Partition the nodes into connected components.
    ///
    /// Isolated nodes form singleton components. Components are ordered by
    /// their earliest inserted member and members by insertion order.
    pub fn connected_components(&self) -> Vec<Vec<&N>> {
        let n = self.node_count();
        let mut visited = vec![false; n];
        let mut components = Vec::new();

        for start in 0..n {
            if visited[start] {
                continue;
            }

            let mut members = Vec::new();
            let mut stack = vec![start];
            visited[start] = true;

            while let Some(current) = stack.pop() {
                members.push(current);
                for &next in self.adjacent(current) {
                    if !visited[next] {
                        visited[next] = true;
                        stack.push(next);
                    }
                }
            }

            members.sort_unstable();
            components.push(
                members
                    .into_iter()
                    .filter_map(|idx| self.node(idx))
                    .collect(),
            );
        }

        components
    }

    /// Breadth-first search over current edges
    fn reachable(&self, from: usize, to: usize) -> bool {
        if from == to {
            return true;
        }

        let mut visited = vec![false; self.node_count()];
        let mut queue = VecDeque::new();
        visited[from] = true;
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for &next in self.adjacent(current) {
                if next == to {
                    return true;
                }
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        false
    }
}
