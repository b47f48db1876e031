use std::fmt;
use std::io::{self, Read};
use std::marker::PhantomData;

use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use super::format::{Kwg, NodeFormat};
use super::siblings::Siblings;
use crate::error::{Error, Result};
use crate::tilemapping::{LetterSet, MachineLetter, TileMapping};

const NODE_SIZE: u64 = 4;

/// A word graph loaded into memory: a flat array of 32-bit nodes.
///
/// The array holds two automatons. The child list of node 0 is the root of
/// a DAWG of the lexicon, used for plain lookups and anagrams. The child
/// list of node 1 is the root of a GADDAG, which also contains every word
/// reversed and is used for front hooks.
///
/// The node array, alphabet and lexicon name are fixed once loading is
/// done. Word counts are added by an explicit
/// [`count_words`](WordGraph::count_words) call; after that the graph is
/// only read, and can be shared across threads behind an `Arc`.
pub struct WordGraph<F: NodeFormat = Kwg> {
    pub(super) nodes: Box<[u32]>,
    alphabet: Option<TileMapping>,
    lexicon_name: String,
    pub(super) word_counts: Option<Box<[u32]>>,
    format: PhantomData<F>,
}

impl<F: NodeFormat> WordGraph<F> {
    /// Reads `byte_len / 4` little-endian nodes from `data`.
    ///
    /// The alphabet and lexicon name are left unset; the binary format
    /// carries neither.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if `byte_len` is not a multiple of 4 or the
    /// stream ends early, and [`Error::Io`] for other read failures.
    pub fn scan(mut data: impl Read, byte_len: u64) -> Result<Self> {
        if byte_len % NODE_SIZE != 0 {
            return Err(Error::Format(format!(
                "length {byte_len} is not a multiple of {NODE_SIZE}"
            )));
        }
        let count = usize::try_from(byte_len / NODE_SIZE)
            .map_err(|_| Error::Format(format!("length {byte_len} is too large")))?;
        let mut nodes = vec![0u32; count];
        data.read_u32_into::<LittleEndian>(&mut nodes)
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => Error::Format(format!(
                    "stream ended before {byte_len} bytes were read"
                )),
                _ => Error::Io(e),
            })?;
        debug!("loaded {} with {} nodes", F::EXTENSION, nodes.len());
        Ok(Self::from_nodes(nodes))
    }

    /// Wraps an already decoded node array.
    pub fn from_nodes(nodes: Vec<u32>) -> Self {
        WordGraph {
            nodes: nodes.into_boxed_slice(),
            alphabet: None,
            lexicon_name: String::new(),
            word_counts: None,
            format: PhantomData,
        }
    }

    /// Assigns the alphabet and lexicon name.
    pub fn with_lexicon(mut self, name: impl Into<String>, alphabet: TileMapping) -> Self {
        self.lexicon_name = name.into();
        self.alphabet = Some(alphabet);
        self
    }

    /// Assigns the alphabet.
    pub fn set_alphabet(&mut self, alphabet: TileMapping) {
        self.alphabet = Some(alphabet);
    }

    /// Assigns the lexicon name.
    pub fn set_lexicon_name(&mut self, name: impl Into<String>) {
        self.lexicon_name = name.into();
    }

    /// The alphabet, if one has been assigned.
    pub fn alphabet(&self) -> Option<&TileMapping> {
        self.alphabet.as_ref()
    }

    /// The alphabet, or [`Error::MissingAlphabet`].
    pub(crate) fn require_alphabet(&self) -> Result<&TileMapping> {
        self.alphabet.as_ref().ok_or(Error::MissingAlphabet)
    }

    /// The lexicon name, empty if none has been assigned.
    pub fn lexicon_name(&self) -> &str {
        &self.lexicon_name
    }

    /// The raw node array.
    pub fn nodes(&self) -> &[u32] {
        &self.nodes
    }

    /// Number of nodes, including the two root pointers.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the node array is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root of the GADDAG.
    #[inline]
    pub fn root_node_index(&self) -> u32 {
        self.arc_index(1)
    }

    /// Root of the DAWG.
    #[inline]
    pub fn dawg_root_node_index(&self) -> u32 {
        self.arc_index(0)
    }

    /// Letter code of node `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is past the end of the node array. In the extended
    /// layout an accepting or end node's child index includes the flag bits,
    /// so following it from such a node panics here.
    #[inline]
    pub fn tile(&self, idx: u32) -> u8 {
        F::tile(self.nodes[idx as usize])
    }

    /// True if the letter at node `idx` completes a word.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is past the end of the node array. In the extended
    /// layout an accepting or end node's child index includes the flag bits,
    /// so following it from such a node panics here.
    #[inline]
    pub fn accepts(&self, idx: u32) -> bool {
        F::accepts(self.nodes[idx as usize])
    }

    /// True if node `idx` is the last of its sibling list.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is past the end of the node array. In the extended
    /// layout an accepting or end node's child index includes the flag bits,
    /// so following it from such a node panics here.
    #[inline]
    pub fn is_end(&self, idx: u32) -> bool {
        F::is_end(self.nodes[idx as usize])
    }

    /// First child of node `idx`, or 0 if it has none.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is past the end of the node array. In the extended
    /// layout an accepting or end node's child index includes the flag bits,
    /// so following it from such a node panics here.
    #[inline]
    pub fn arc_index(&self, idx: u32) -> u32 {
        F::arc_index(self.nodes[idx as usize])
    }

    /// Iterates over the sibling list starting at `idx`.
    #[inline]
    pub fn siblings(&self, idx: u32) -> Siblings<'_, F> {
        Siblings::new(self, idx)
    }

    /// Follows the edge labelled `letter` out of the sibling list starting
    /// at `node_idx`, returning the child list it leads to, or 0 if there is
    /// no such edge or it has no children.
    #[inline]
    pub fn next_node_idx(&self, node_idx: u32, letter: MachineLetter) -> u32 {
        self.siblings(node_idx)
            .find(|&i| self.tile(i) == letter.0)
            .map_or(0, |i| self.arc_index(i))
    }

    /// True if `letter` appears in the sibling list starting at `node_idx`
    /// and completes a word there. Blank designations are ignored.
    #[inline]
    pub fn in_letter_set(&self, letter: MachineLetter, node_idx: u32) -> bool {
        let letter = letter.unblank();
        self.siblings(node_idx)
            .find(|&i| self.tile(i) == letter.0)
            .is_some_and(|i| self.accepts(i))
    }

    /// The set of letters that complete a word in the sibling list starting
    /// at `node_idx`.
    pub fn letter_set(&self, node_idx: u32) -> LetterSet {
        self.siblings(node_idx)
            .filter(|&i| self.accepts(i))
            .fold(0, |ls, i| {
                ls | 1u64.checked_shl(self.tile(i) as u32).unwrap_or(0)
            })
    }

    /// True if `word` spells a word starting from the sibling list at
    /// `node_idx`. An empty word never matches.
    pub fn match_word(&self, node_idx: u32, word: &[MachineLetter]) -> bool {
        let Some((&last, init)) = word.split_last() else {
            return false;
        };
        let mut node = node_idx;
        for &ml in init {
            node = self.next_node_idx(node, ml.unblank());
            if node == 0 {
                return false;
            }
        }
        self.in_letter_set(last, node)
    }

    /// True if `word` is in the lexicon.
    pub fn contains(&self, word: &[MachineLetter]) -> bool {
        self.match_word(self.dawg_root_node_index(), word)
    }
}

impl<F: NodeFormat> fmt::Debug for WordGraph<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordGraph")
            .field("format", &F::EXTENSION)
            .field("lexicon_name", &self.lexicon_name)
            .field("nodes", &self.nodes.len())
            .field("counted", &self.word_counts.is_some())
            .finish()
    }
}
