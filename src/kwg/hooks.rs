//! Hook queries: letters that extend a word into another word.
//!
//! Back hooks are read off the DAWG. Front hooks use the GADDAG half of the
//! graph, where every word is also stored reversed, so they take a single
//! descent as well.

use smallvec::SmallVec;

use super::format::NodeFormat;
use super::graph::WordGraph;
use crate::tilemapping::{MachineLetter, MachineWord};

/// The end of a word a hook attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookSide {
    /// A letter placed before the first letter.
    Front,
    /// A letter placed after the last letter.
    Back,
}

/// Returns the letters that can be added on `side` of `word` to form
/// another word, in code order.
///
/// Returns `None` if `word` is not in the lexicon and an empty list if it
/// is a word without hooks. Designated blanks are treated as the letter they
/// stand for.
pub fn find_hooks<F: NodeFormat>(
    graph: &WordGraph<F>,
    word: &[MachineLetter],
    side: HookSide,
) -> Option<MachineWord> {
    let path: SmallVec<[MachineLetter; 16]> = match side {
        HookSide::Back => word.iter().map(|ml| ml.unblank()).collect(),
        HookSide::Front => word.iter().rev().map(|ml| ml.unblank()).collect(),
    };
    let root = match side {
        HookSide::Back => graph.dawg_root_node_index(),
        HookSide::Front => graph.root_node_index(),
    };

    let (&last, init) = path.split_last()?;
    let mut node = root;
    for &ml in init {
        node = graph.next_node_idx(node, ml);
        if node == 0 {
            return None;
        }
    }
    let matched = graph.siblings(node).find(|&i| graph.tile(i) == last.0)?;
    if !graph.accepts(matched) {
        return None;
    }

    Some(
        graph
            .siblings(graph.arc_index(matched))
            .filter(|&i| graph.accepts(i))
            .map(|i| MachineLetter(graph.tile(i)))
            .collect(),
    )
}

/// True if `word` stays a word with its letter on `side` removed.
///
/// Words of fewer than two letters have no inner hooks.
pub fn find_inner_hook<F: NodeFormat>(
    graph: &WordGraph<F>,
    word: &[MachineLetter],
    side: HookSide,
) -> bool {
    if word.len() < 2 {
        return false;
    }
    let rest = match side {
        HookSide::Front => &word[1..],
        HookSide::Back => &word[..word.len() - 1],
    };
    graph.contains(rest)
}
