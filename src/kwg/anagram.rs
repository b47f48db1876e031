//! Anagram search over the DAWG half of a word graph.
//!
//! An [`Anagrammer`] holds the rack being searched: a count per letter, a
//! count of blanks, and the word built so far. The search walks sibling
//! lists depth first, spending a rack letter (or a blank) on each edge and
//! undoing the spend on the way back, so every word is reported once and
//! nothing is allocated per result.

use std::mem;
use std::ops::{ControlFlow, Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

use smallvec::SmallVec;

use super::format::NodeFormat;
use super::graph::WordGraph;
use crate::error::{Error, Result};
use crate::tilemapping::MachineLetter;

/// Blank count used by super-anagram search, large enough to never run out.
const UNLIMITED_BLANKS: u8 = u8::MAX;

/// The kind of anagram search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnagramMode {
    /// Words that use every tile of the rack.
    Exact,
    /// Words that use some of the tiles of the rack.
    Sub,
    /// Words at least as long as the rack that contain all of its letters.
    Super,
}

/// Reusable anagram search state.
///
/// One anagrammer serves one search at a time. Initialize it with
/// [`init_for_string`](Anagrammer::init_for_string) or
/// [`init_for_machine_word`](Anagrammer::init_for_machine_word), then run
/// any of the searches; the rack is left intact afterwards, so several
/// searches can follow one initialization. Use an [`AnagrammerPool`] to
/// share anagrammers between threads.
#[derive(Clone, Debug, Default)]
pub struct Anagrammer {
    ans: SmallVec<[MachineLetter; 16]>,
    freq: Vec<u8>,
    blanks: u8,
    query_length: usize,
}

impl Anagrammer {
    /// Creates an anagrammer with an empty rack.
    pub fn new() -> Self {
        Self::default()
    }

    fn common_init(&mut self, num_letters: u8) {
        self.freq.clear();
        self.freq.resize(num_letters as usize, 0);
        self.blanks = 0;
        self.ans.clear();
        self.query_length = 0;
    }

    /// Loads a rack written in the graph's alphabet, with `?` for blanks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAlphabet`] if the graph has no alphabet and
    /// [`Error::UnknownLetter`] if the rack cannot be decoded. The rack is
    /// empty after an error.
    pub fn init_for_string<F: NodeFormat>(
        &mut self,
        graph: &WordGraph<F>,
        tiles: &str,
    ) -> Result<()> {
        self.common_init(0);
        let alphabet = graph.require_alphabet()?;
        let tiles = alphabet.to_machine_letters(tiles)?;
        self.init_for_machine_word(graph, &tiles)
    }

    /// Loads a rack of letter codes. Code 0 is a blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAlphabet`] if the graph has no alphabet and
    /// [`Error::InvalidLetter`] for a code outside the alphabet, including
    /// designated blanks. The rack is empty after an error.
    pub fn init_for_machine_word<F: NodeFormat>(
        &mut self,
        graph: &WordGraph<F>,
        tiles: &[MachineLetter],
    ) -> Result<()> {
        self.common_init(0);
        let num_letters = graph.require_alphabet()?.num_letters();
        self.common_init(num_letters);
        self.query_length = tiles.len();
        for &ml in tiles {
            if ml.is_blank() {
                self.blanks = self.blanks.saturating_add(1);
            } else if ml.0 < num_letters {
                let n = &mut self.freq[ml.0 as usize];
                *n = n.saturating_add(1);
            } else {
                self.common_init(num_letters);
                return Err(Error::InvalidLetter(ml));
            }
        }
        Ok(())
    }

    /// Number of tiles in the current rack, blanks included.
    pub fn query_length(&self) -> usize {
        self.query_length
    }

    /// Number of blanks in the current rack.
    pub fn blanks(&self) -> u8 {
        self.blanks
    }

    /// Reports every word that uses all tiles of the rack.
    ///
    /// `f` receives each word as a slice that is only valid for the call;
    /// returning [`ControlFlow::Break`] stops the search and the break value
    /// is returned. Blanks are reported as the letter they stand for.
    pub fn anagram<F, B>(
        &mut self,
        graph: &WordGraph<F>,
        mut f: impl FnMut(&[MachineLetter]) -> ControlFlow<B>,
    ) -> ControlFlow<B>
    where
        F: NodeFormat,
    {
        self.search(graph, self.query_length as isize, 0, &mut f)
    }

    /// Reports every word of at least one letter that the rack can spell.
    pub fn subanagram<F, B>(
        &mut self,
        graph: &WordGraph<F>,
        mut f: impl FnMut(&[MachineLetter]) -> ControlFlow<B>,
    ) -> ControlFlow<B>
    where
        F: NodeFormat,
    {
        self.search(graph, 1, 0, &mut f)
    }

    /// Reports every word at least as long as the rack that contains all of
    /// the rack's letters. Blanks only add length.
    pub fn superanagram<F, B>(
        &mut self,
        graph: &WordGraph<F>,
        mut f: impl FnMut(&[MachineLetter]) -> ControlFlow<B>,
    ) -> ControlFlow<B>
    where
        F: NodeFormat,
    {
        let min_exact = self.query_length as isize - self.blanks as isize;
        let blanks = mem::replace(&mut self.blanks, UNLIMITED_BLANKS);
        let flow = self.search(graph, self.query_length as isize, min_exact, &mut f);
        self.blanks = blanks;
        flow
    }

    /// Runs the search selected by `mode`.
    pub fn run<F, B>(
        &mut self,
        mode: AnagramMode,
        graph: &WordGraph<F>,
        f: impl FnMut(&[MachineLetter]) -> ControlFlow<B>,
    ) -> ControlFlow<B>
    where
        F: NodeFormat,
    {
        match mode {
            AnagramMode::Exact => self.anagram(graph, f),
            AnagramMode::Sub => self.subanagram(graph, f),
            AnagramMode::Super => self.superanagram(graph, f),
        }
    }

    /// True if the letters of `word` can be rearranged into a word.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HasBlanks`] if `word` contains a blank, and the
    /// errors of [`init_for_machine_word`](Anagrammer::init_for_machine_word).
    pub fn is_valid_jumble<F: NodeFormat>(
        &mut self,
        graph: &WordGraph<F>,
        word: &[MachineLetter],
    ) -> Result<bool> {
        self.init_for_machine_word(graph, word)?;
        if self.blanks > 0 {
            return Err(Error::HasBlanks);
        }
        Ok(self.anagram(graph, |_| ControlFlow::Break(())).is_break())
    }

    fn search<F, B>(
        &mut self,
        graph: &WordGraph<F>,
        min_len: isize,
        min_exact: isize,
        f: &mut impl FnMut(&[MachineLetter]) -> ControlFlow<B>,
    ) -> ControlFlow<B>
    where
        F: NodeFormat,
    {
        let root = graph.dawg_root_node_index();
        if root == 0 {
            return ControlFlow::Continue(());
        }
        self.iterate(graph, root, min_len, min_exact, f)
    }

    fn iterate<F, B>(
        &mut self,
        graph: &WordGraph<F>,
        node_idx: u32,
        min_len: isize,
        min_exact: isize,
        f: &mut impl FnMut(&[MachineLetter]) -> ControlFlow<B>,
    ) -> ControlFlow<B>
    where
        F: NodeFormat,
    {
        for i in graph.siblings(node_idx) {
            let j = graph.tile(i);
            let flow = if self.freq.get(j as usize).is_some_and(|&n| n > 0) {
                self.freq[j as usize] -= 1;
                self.ans.push(MachineLetter(j));
                let flow = self.step(graph, i, min_len, min_exact, 1, f);
                self.ans.pop();
                self.freq[j as usize] += 1;
                flow
            } else if self.blanks > 0 {
                self.blanks -= 1;
                self.ans.push(MachineLetter(j));
                let flow = self.step(graph, i, min_len, min_exact, 0, f);
                self.ans.pop();
                self.blanks += 1;
                flow
            } else {
                ControlFlow::Continue(())
            };
            flow?;
        }
        ControlFlow::Continue(())
    }

    /// Reports the word ending at node `idx` if it qualifies, then descends.
    /// `exact` is 1 when the letter came from the rack and 0 for a blank.
    fn step<F, B>(
        &mut self,
        graph: &WordGraph<F>,
        idx: u32,
        min_len: isize,
        min_exact: isize,
        exact: isize,
        f: &mut impl FnMut(&[MachineLetter]) -> ControlFlow<B>,
    ) -> ControlFlow<B>
    where
        F: NodeFormat,
    {
        if min_len <= 1 && min_exact <= exact && graph.accepts(idx) {
            f(&self.ans)?;
        }
        let arc = graph.arc_index(idx);
        if arc != 0 {
            self.iterate(graph, arc, min_len - 1, min_exact - exact, f)?;
        }
        ControlFlow::Continue(())
    }
}

/// A pool of anagrammers for concurrent queries against shared graphs.
///
/// Anagrammers keep their buffers between searches; the pool hands each
/// caller its own and takes it back when the guard is dropped.
#[derive(Debug, Default)]
pub struct AnagrammerPool {
    free: Mutex<Vec<Anagrammer>>,
}

impl AnagrammerPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes an anagrammer from the pool, creating one if none is free.
    pub fn get(&self) -> PooledAnagrammer<'_> {
        let inner = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default();
        PooledAnagrammer { pool: self, inner }
    }

    /// Number of anagrammers waiting in the pool.
    pub fn idle(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// An anagrammer on loan from an [`AnagrammerPool`].
pub struct PooledAnagrammer<'p> {
    pool: &'p AnagrammerPool,
    inner: Anagrammer,
}

impl Deref for PooledAnagrammer<'_> {
    type Target = Anagrammer;

    fn deref(&self) -> &Anagrammer {
        &self.inner
    }
}

impl DerefMut for PooledAnagrammer<'_> {
    fn deref_mut(&mut self) -> &mut Anagrammer {
        &mut self.inner
    }
}

impl Drop for PooledAnagrammer<'_> {
    fn drop(&mut self) {
        let inner = mem::take(&mut self.inner);
        self.pool
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(inner);
    }
}
