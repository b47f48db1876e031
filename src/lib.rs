//! # libkwg
//!
//! Read-only word graphs for word games, stored as flat arrays of bit-packed
//! 32-bit nodes (the KWG format), with the queries a word game needs:
//! membership, anagrams, hooks and alphabetical word ranks.
//!
//! A word graph file holds two automatons in one node array: a
//! [DAWG](https://en.wikipedia.org/wiki/Deterministic_acyclic_finite_state_automaton)
//! of the lexicon reached through node 0, and a GADDAG reached through node
//! 1, which also stores every word reversed. Each node packs a letter code,
//! an "accepts" flag, an "end of sibling list" flag and the index of its
//! first child. Two layouts exist: [`Kwg`](kwg::Kwg) with a 22-bit child
//! pointer and [`Kbwg`](kwg::Kbwg) with a 24-bit one.
//!
//! ## Quick Start
//!
//! ```
//! use libkwg::kwg::{Kwg, WordGraph};
//! use libkwg::tilemapping::TileMapping;
//!
//! // A lexicon of two words, AB and AT.
//! let bytes: Vec<u8> = [0x0040_0002u32, 0x0040_0002, 0x0140_0003, 0x0280_0000, 0x14C0_0000]
//!     .iter()
//!     .flat_map(|n| n.to_le_bytes())
//!     .collect();
//! let alphabet = TileMapping::english();
//! let mut graph = WordGraph::<Kwg>::scan(&bytes[..], bytes.len() as u64)?
//!     .with_lexicon("TINY", alphabet.clone());
//!
//! let at = alphabet.to_machine_letters("AT")?;
//! assert!(graph.contains(&at));
//! assert!(!graph.contains(&alphabet.to_machine_letters("TA")?));
//!
//! graph.count_words();
//! assert_eq!(graph.word_count(), Some(2));
//! assert_eq!(graph.word_index_of(graph.dawg_root_node_index(), &at), Some(1));
//! # Ok::<(), libkwg::Error>(())
//! ```
//!
//! ## Queries
//!
//! A [`Lexicon`](kwg::Lexicon) wraps a graph of either layout and can be
//! shared between threads:
//!
//! ```
//! # use libkwg::kwg::{Kwg, WordGraph};
//! # use libkwg::tilemapping::TileMapping;
//! # let bytes: Vec<u8> = [0x0040_0002u32, 0x0040_0002, 0x0140_0003, 0x0280_0000, 0x14C0_0000]
//! #     .iter()
//! #     .flat_map(|n| n.to_le_bytes())
//! #     .collect();
//! # let graph = WordGraph::<Kwg>::scan(&bytes[..], bytes.len() as u64)?
//! #     .with_lexicon("TINY", TileMapping::english());
//! use libkwg::kwg::Lexicon;
//!
//! let lexicon = Lexicon::new(graph);
//! let alphabet = lexicon.alphabet().unwrap();
//! let found = lexicon.anagrams("TA")?;
//! assert_eq!(alphabet.user_visible(&found[0]), "AT");
//! assert!(lexicon.has_anagram(&alphabet.to_machine_letters("BA")?));
//! # Ok::<(), libkwg::Error>(())
//! ```
//!
//! Lexica on disk are found through a [`Config`](config::Config):
//!
//! ```no_run
//! use libkwg::config::Config;
//!
//! let cfg = Config::new("/usr/share/word-game-data");
//! let lexicon = libkwg::kwg::get(&cfg, "NWL23")?;
//! println!("{} has {:?} words", lexicon.name(), lexicon.word_count());
//! # Ok::<(), libkwg::Error>(())
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod config;
mod error;
/// Packed word graphs and the queries over them.
pub mod kwg;
pub mod tilemapping;

pub use error::{Error, Result};
