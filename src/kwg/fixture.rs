//! Packs small word lists into node arrays for the unit tests.
//!
//! Builds a minimal DAWG and a minimal GADDAG with an incremental,
//! suffix-sharing builder, then lays both out breadth first behind the two
//! root pointers at nodes 0 and 1.

use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::ptr;

use hashbrown::{HashMap, HashSet};
use itertools::{Itertools, Position};
use typed_arena::Arena;

use super::format::NodeFormat;
use super::graph::WordGraph;
use crate::tilemapping::{MachineLetter, MachineWord, TileMapping};

/// Separator between the reversed prefix and the suffix of a GADDAG path.
const SEPARATOR: u8 = 0;

pub(crate) const WORDS: &[&str] = &[
    "AA", "AB", "AD", "AE", "AG", "AH", "AN", "AR", "AS", "AT",
    // Front hooks of AE.
    "BAE", "DAE", "FAE", "GAE", "HAE", "KAE", "MAE", "NAE", "SAE", "TAE", "VAE", "WAE", "YAE",
    "EA", "EAN", "EAR", "EAS", "EAT", "EAU", "KEA", "LEA", "PEA", "SEA", "TEA", "YEA", "ZEA",
    "CRAW", "CRAWL", "CRAWLS", "CRAWLY", "SCRAWL", "ACRAWL",
    "FADDY", "ADDY", "ADD", "ADDS", "FAD", "FADS", "FADE", "FADED",
    "ARE", "ERA", "ERAS", "EARS", "SEAR", "SERA", "ARES", "RASE", "RATE", "TEAR", "TARE",
    "TEARS", "RATES", "STARE", "ASTER", "TARES", "EATS", "SATE", "SEAT", "ETAS", "TAES",
    "TEAS", "EAST", "ATE", "ETA", "SAT", "TAS",
];

struct BuildNode<'a> {
    word: bool,
    children: Vec<(u8, &'a BuildNode<'a>)>,
}

impl BuildNode<'_> {
    fn new(word: bool) -> Self {
        BuildNode {
            word,
            children: Vec::new(),
        }
    }
}

// Children are canonical by the time a node is hashed, so identity of the
// child pointers is enough.
impl PartialEq for BuildNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|((a, an), (b, bn))| a == b && ptr::eq(*an, *bn))
    }
}

impl Eq for BuildNode<'_> {}

impl Hash for BuildNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
        for &(ch, node) in &self.children {
            ch.hash(state);
            ptr::hash(node, state);
        }
    }
}

struct Builder<'a> {
    arena: &'a Arena<BuildNode<'a>>,
    classes: HashSet<&'a BuildNode<'a>>,
    build_state: Vec<(u8, BuildNode<'a>)>,
}

impl<'a> Builder<'a> {
    fn new(arena: &'a Arena<BuildNode<'a>>) -> Self {
        Builder {
            arena,
            classes: HashSet::new(),
            build_state: Vec::new(),
        }
    }

    /// Builds one automaton from sorted, distinct letter sequences.
    fn build(&mut self, sequences: &[Vec<u8>]) -> &'a BuildNode<'a> {
        self.build_state.push((0, BuildNode::new(false)));
        for seq in sequences {
            let prefix_len = seq
                .iter()
                .zip(self.build_state.iter().skip(1))
                .take_while(|(ch, (prev, _))| *ch == prev)
                .count();
            self.canonicalize_suffix(prefix_len);
            for (pos, &ch) in seq[prefix_len..].iter().with_position() {
                let last = matches!(pos, Position::Last | Position::Only);
                self.build_state.push((ch, BuildNode::new(last)));
            }
        }
        self.canonicalize_suffix(0);
        let (_, root) = self
            .build_state
            .pop()
            .expect("build state always holds the root");
        self.canonicalize(root)
    }

    fn canonicalize_suffix(&mut self, prefix_len: usize) {
        while self.build_state.len() > prefix_len + 1 {
            let (ch, node) = self
                .build_state
                .pop()
                .expect("build state always holds the root");
            let child = self.canonicalize(node);
            self.build_state
                .last_mut()
                .expect("build state always holds the root")
                .1
                .children
                .push((ch, child));
        }
    }

    fn canonicalize(&mut self, node: BuildNode<'a>) -> &'a BuildNode<'a> {
        if let Some(&canonical) = self.classes.get(&node) {
            canonical
        } else {
            let canonical: &'a BuildNode<'a> = self.arena.alloc(node);
            self.classes.insert(canonical);
            canonical
        }
    }
}

fn codes(word: &str) -> Vec<u8> {
    word.bytes().map(|b| b - b'A' + 1).collect()
}

fn sorted(mut sequences: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
    sequences.sort();
    sequences.dedup();
    sequences
}

fn gaddag_sequences(words: &[&str]) -> Vec<Vec<u8>> {
    let mut sequences = Vec::new();
    for w in words.iter().map(|w| codes(w)) {
        sequences.push(w.iter().rev().copied().collect());
        for i in 1..w.len() {
            let mut seq: Vec<u8> = w[..i].iter().rev().copied().collect();
            seq.push(SEPARATOR);
            seq.extend_from_slice(&w[i..]);
            sequences.push(seq);
        }
    }
    sorted(sequences)
}

fn pack<'a, F: NodeFormat>(dawg: &'a BuildNode<'a>, gaddag: &'a BuildNode<'a>) -> Vec<u32> {
    let mut starts: HashMap<*const BuildNode<'a>, u32> = HashMap::new();
    let mut order = Vec::new();
    let mut next = 2u32;
    let mut queue = VecDeque::from([dawg, gaddag]);
    while let Some(node) = queue.pop_front() {
        if node.children.is_empty() || starts.contains_key(&ptr::from_ref(node)) {
            continue;
        }
        starts.insert(ptr::from_ref(node), next);
        next += node.children.len() as u32;
        order.push(node);
        queue.extend(node.children.iter().map(|&(_, child)| child));
    }

    let arc = |node: &'a BuildNode<'a>| starts.get(&ptr::from_ref(node)).copied().unwrap_or(0);
    let mut nodes = Vec::with_capacity(next as usize);
    nodes.push(F::pack(0, false, true, arc(dawg)));
    nodes.push(F::pack(0, false, true, arc(gaddag)));
    for node in order {
        for (pos, &(ch, child)) in node.children.iter().with_position() {
            let is_end = matches!(pos, Position::Last | Position::Only);
            nodes.push(F::pack(ch, child.word, is_end, arc(child)));
        }
    }
    nodes
}

/// Packs `words` (upper-case A-Z) into a node array.
pub(crate) fn build_nodes<F: NodeFormat>(words: &[&str]) -> Vec<u32> {
    let arena = Arena::new();
    let mut builder = Builder::new(&arena);
    let dawg = builder.build(&sorted(words.iter().map(|w| codes(w)).collect()));
    let gaddag = builder.build(&gaddag_sequences(words));
    pack::<F>(dawg, gaddag)
}

/// A word graph over `words` with the English alphabet.
pub(crate) fn word_graph<F: NodeFormat>(words: &[&str]) -> WordGraph<F> {
    WordGraph::from_nodes(build_nodes::<F>(words)).with_lexicon("TEST", TileMapping::english())
}

/// Converts upper-case A-Z to machine letters.
pub(crate) fn word(w: &str) -> MachineWord {
    codes(w).into_iter().map(MachineLetter).collect()
}

/// The distinct words of [`WORDS`] in alphabetical order.
pub(crate) fn sorted_words() -> Vec<String> {
    WORDS.iter().map(|w| w.to_string()).sorted().dedup().collect()
}

#[test]
fn shares_common_suffixes() {
    let shared = build_nodes::<super::Kwg>(&["CATS", "RATS"]);
    let unshared = build_nodes::<super::Kwg>(&["CATS", "RATE"]);
    assert!(shared.len() < unshared.len());
}
