//! Word counting and lexicographic word ranks.
//!
//! `count[i]` is the number of words spelled by paths that start at node
//! `i` or at any later node of the same sibling list. With these counts the
//! rank of a word is found in one descent, skipping whole subtrees instead
//! of enumerating them.

use log::debug;

use super::format::NodeFormat;
use super::graph::WordGraph;
use crate::tilemapping::MachineLetter;

const UNSET: u32 = u32::MAX;
const IN_PROGRESS: u32 = u32::MAX - 1;

impl<F: NodeFormat> WordGraph<F> {
    /// Computes the word count of every node.
    ///
    /// Runs once per graph, before the graph is shared. Nodes are visited
    /// from the highest index down with an explicit stack, so deep graphs
    /// cannot overflow the call stack.
    ///
    /// # Panics
    ///
    /// Panics if the graph contains a cycle, which means the node array is
    /// corrupt.
    pub fn count_words(&mut self) {
        let len = self.nodes.len();
        let mut counts = vec![UNSET; len].into_boxed_slice();
        let mut stack: Vec<(u32, bool)> = Vec::new();

        for start in (0..len as u32).rev() {
            if counts[start as usize] != UNSET {
                continue;
            }
            stack.push((start, false));
            while let Some((p, expanded)) = stack.pop() {
                let node = self.nodes[p as usize];
                let arc = F::arc_index(node);
                let next = (!F::is_end(node)).then(|| p + 1);
                if expanded {
                    let count_at = |q: u32| counts.get(q as usize).copied().unwrap_or(0);
                    let total = F::accepts(node) as u32
                        + (arc != 0).then(|| count_at(arc)).unwrap_or(0)
                        + next.map_or(0, count_at);
                    counts[p as usize] = total;
                    continue;
                }
                match counts[p as usize] {
                    UNSET => {}
                    IN_PROGRESS => panic!("word graph has a cycle through node {p}"),
                    _ => continue,
                }
                counts[p as usize] = IN_PROGRESS;
                stack.push((p, true));
                for dep in [(arc != 0).then_some(arc), next].into_iter().flatten() {
                    match counts.get(dep as usize) {
                        Some(&UNSET) => stack.push((dep, false)),
                        Some(&IN_PROGRESS) => panic!("word graph has a cycle through node {dep}"),
                        _ => {}
                    }
                }
            }
        }

        debug!(
            "counted words for {:?}: {} words in {} nodes",
            self.lexicon_name(),
            counts.get(self.dawg_root_node_index() as usize).copied().unwrap_or(0),
            len
        );
        self.word_counts = Some(counts);
    }

    /// The per-node word counts, if [`count_words`](WordGraph::count_words)
    /// has run.
    pub fn word_counts(&self) -> Option<&[u32]> {
        self.word_counts.as_deref()
    }

    /// Number of words in the lexicon, if counts have been computed.
    pub fn word_count(&self) -> Option<u32> {
        let root = self.dawg_root_node_index();
        let counts = self.word_counts()?;
        Some(match root {
            0 => 0,
            _ => counts.get(root as usize).copied().unwrap_or(0),
        })
    }

    /// Returns the 0-based rank of `letters` among all words below the
    /// sibling list at `node_idx`, in the graph's letter order, or `None`
    /// if it is not a word. Blank designations are ignored.
    ///
    /// # Panics
    ///
    /// Panics if [`count_words`](WordGraph::count_words) has not been
    /// called.
    pub fn word_index_of(&self, mut node_idx: u32, letters: &[MachineLetter]) -> Option<u32> {
        let counts = self
            .word_counts
            .as_deref()
            .expect("count_words() must run before word_index_of()");
        let mut idx = 0u32;
        let mut lidx = 0;
        while node_idx != 0 && lidx < letters.len() {
            idx += counts[node_idx as usize];
            let letter = letters[lidx].unblank();
            while self.tile(node_idx) != letter.0 {
                if self.is_end(node_idx) {
                    return None;
                }
                node_idx += 1;
            }
            idx -= counts[node_idx as usize];
            lidx += 1;
            if lidx == letters.len() {
                return self.accepts(node_idx).then_some(idx);
            }
            if self.accepts(node_idx) {
                idx += 1;
            }
            node_idx = self.arc_index(node_idx);
        }
        None
    }
}
