/// Bit layouts of a packed node.
pub mod format;
/// The in-memory word graph and its traversal primitives.
pub mod graph;
/// Iteration over one sibling list.
pub mod siblings;
mod count;
pub mod anagram;
pub mod hooks;
/// Runtime layout selection and the query facade.
pub mod lexicon;
pub mod loader;

#[cfg(test)]
mod fixture;

pub use anagram::{AnagramMode, Anagrammer, AnagrammerPool, PooledAnagrammer};
pub use format::{Kbwg, Kwg, NodeFormat};
pub use graph::WordGraph;
pub use hooks::{find_hooks, find_inner_hook, HookSide};
pub use lexicon::{AnyWordGraph, Lexicon};
pub use loader::{get, kwg_path, load_word_graph};
pub use siblings::Siblings;
