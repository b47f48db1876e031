use std::ops::ControlFlow;
use std::sync::Arc;

use log::{debug, warn};

use super::anagram::{AnagramMode, AnagrammerPool};
use super::format::{Kbwg, Kwg, NodeFormat};
use super::graph::WordGraph;
use super::hooks::{self, HookSide};
use crate::error::Result;
use crate::tilemapping::{MachineLetter, MachineWord, TileMapping};

/// A word graph in either layout, chosen when the file is loaded.
#[derive(Clone, Debug)]
pub enum AnyWordGraph {
    /// A graph in the standard layout.
    Kwg(Arc<WordGraph<Kwg>>),
    /// A graph in the extended layout.
    Kbwg(Arc<WordGraph<Kbwg>>),
}

/// Runs `$body` with `$g` bound to the `&WordGraph<F>` inside an
/// [`AnyWordGraph`], whichever layout it has.
macro_rules! with_graph {
    ($any:expr, |$g:ident| $body:expr) => {
        match $any {
            AnyWordGraph::Kwg(graph) => {
                let $g: &WordGraph<Kwg> = graph;
                $body
            }
            AnyWordGraph::Kbwg(graph) => {
                let $g: &WordGraph<Kbwg> = graph;
                $body
            }
        }
    };
}

impl AnyWordGraph {
    /// File extension of the layout, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            AnyWordGraph::Kwg(_) => Kwg::EXTENSION,
            AnyWordGraph::Kbwg(_) => Kbwg::EXTENSION,
        }
    }

    /// The lexicon name.
    pub fn lexicon_name(&self) -> &str {
        with_graph!(self, |g| g.lexicon_name())
    }

    /// The alphabet, if one has been assigned.
    pub fn alphabet(&self) -> Option<&TileMapping> {
        with_graph!(self, |g| g.alphabet())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        with_graph!(self, |g| g.len())
    }

    /// True if the node array is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `word` is in the lexicon.
    pub fn contains(&self, word: &[MachineLetter]) -> bool {
        with_graph!(self, |g| g.contains(word))
    }

    /// Number of words, if counts have been computed.
    pub fn word_count(&self) -> Option<u32> {
        with_graph!(self, |g| g.word_count())
    }
}

impl From<WordGraph<Kwg>> for AnyWordGraph {
    fn from(graph: WordGraph<Kwg>) -> Self {
        AnyWordGraph::Kwg(Arc::new(graph))
    }
}

impl From<WordGraph<Kbwg>> for AnyWordGraph {
    fn from(graph: WordGraph<Kbwg>) -> Self {
        AnyWordGraph::Kbwg(Arc::new(graph))
    }
}

/// A loaded lexicon: a word graph plus the scratch state its queries need.
///
/// All queries take `&self`, so one lexicon can serve many threads; each
/// anagram query borrows its own [`Anagrammer`](super::Anagrammer) from
/// an internal pool.
#[derive(Debug)]
pub struct Lexicon {
    graph: AnyWordGraph,
    pool: AnagrammerPool,
}

impl Lexicon {
    /// Wraps a word graph. Compute word counts on the graph first if
    /// [`word_index_of`](Lexicon::word_index_of) will be used.
    pub fn new(graph: impl Into<AnyWordGraph>) -> Self {
        Lexicon {
            graph: graph.into(),
            pool: AnagrammerPool::new(),
        }
    }

    /// The lexicon name, e.g. `NWL23`.
    pub fn name(&self) -> &str {
        self.graph.lexicon_name()
    }

    /// The lexicon's alphabet, if one has been assigned.
    pub fn alphabet(&self) -> Option<&TileMapping> {
        self.graph.alphabet()
    }

    /// The underlying word graph.
    pub fn word_graph(&self) -> &AnyWordGraph {
        &self.graph
    }

    /// True if `word` is in the lexicon.
    pub fn has_word(&self, word: &[MachineLetter]) -> bool {
        self.graph.contains(word)
    }

    /// True if the letters of `word` can be rearranged into a word.
    ///
    /// A rack with blanks or letters outside the alphabet is logged and
    /// reported as `false`.
    pub fn has_anagram(&self, word: &[MachineLetter]) -> bool {
        debug!("has-anagram? {}", self.visible(word));
        let mut anagrammer = self.pool.get();
        match with_graph!(&self.graph, |g| anagrammer.is_valid_jumble(g, word)) {
            Ok(found) => found,
            Err(e) => {
                warn!("has-anagram? {}: {e}", self.visible(word));
                false
            }
        }
    }

    /// Words that use every tile of `rack`, in alphabet order.
    ///
    /// `rack` is written in the lexicon's alphabet with `?` for blanks.
    /// Letters filled in by blanks are returned undesignated.
    pub fn anagrams(&self, rack: &str) -> Result<Vec<MachineWord>> {
        self.collect(rack, AnagramMode::Exact)
    }

    /// Words spelled by some of the tiles of `rack`.
    pub fn subanagrams(&self, rack: &str) -> Result<Vec<MachineWord>> {
        self.collect(rack, AnagramMode::Sub)
    }

    /// Words at least as long as `rack` containing all of its letters.
    pub fn superanagrams(&self, rack: &str) -> Result<Vec<MachineWord>> {
        self.collect(rack, AnagramMode::Super)
    }

    fn collect(&self, rack: &str, mode: AnagramMode) -> Result<Vec<MachineWord>> {
        let mut anagrammer = self.pool.get();
        let mut words = Vec::new();
        with_graph!(&self.graph, |g| {
            anagrammer.init_for_string(g, rack)?;
            let _: ControlFlow<()> = anagrammer.run(mode, g, |w| {
                words.push(w.to_vec());
                ControlFlow::Continue(())
            });
        });
        debug!("{mode:?} anagrams of {rack:?}: {} words", words.len());
        Ok(words)
    }

    /// Letters that hook onto `side` of `word`; `None` if `word` is not a
    /// word.
    pub fn find_hooks(&self, word: &[MachineLetter], side: HookSide) -> Option<MachineWord> {
        with_graph!(&self.graph, |g| hooks::find_hooks(g, word, side))
    }

    /// True if `word` stays a word with its letter on `side` removed.
    pub fn find_inner_hook(&self, word: &[MachineLetter], side: HookSide) -> bool {
        with_graph!(&self.graph, |g| hooks::find_inner_hook(g, word, side))
    }

    /// The 0-based alphabetical rank of `word`, or `None` if it is not a
    /// word.
    ///
    /// # Panics
    ///
    /// Panics if word counts were not computed before the graph was
    /// wrapped.
    pub fn word_index_of(&self, word: &[MachineLetter]) -> Option<u32> {
        with_graph!(&self.graph, |g| g.word_index_of(g.dawg_root_node_index(), word))
    }

    /// Number of words, if counts have been computed.
    pub fn word_count(&self) -> Option<u32> {
        self.graph.word_count()
    }

    fn visible(&self, word: &[MachineLetter]) -> String {
        match self.alphabet() {
            Some(alphabet) => alphabet.user_visible(word),
            None => format!("{word:?}"),
        }
    }
}
