//! Loading word graphs from the data directory.
//!
//! The binary files carry no metadata: the layout comes from the file
//! extension, the lexicon name from the file stem, and the alphabet from the
//! letter distribution that the lexicon name implies.

use std::ffi::OsStr;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;

use super::format::{Kbwg, Kwg, NodeFormat};
use super::graph::WordGraph;
use super::lexicon::{AnyWordGraph, Lexicon};
use crate::cache::{self, Cache};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::tilemapping::{probable_letter_distribution, TileMapping};

static LEXICA: Lazy<Cache<Lexicon>> = Lazy::new(Cache::new);

/// Loads the word graph at `path`, bypassing the cache.
///
/// `.kwg` files use the standard layout and `.kbwg` files the extended
/// one. Word counts are computed before the graph is returned.
///
/// # Errors
///
/// Returns [`Error::Format`] for any other file name or a malformed node
/// array, [`Error::UnknownLexicon`] if no alphabet can be derived from the
/// name, and [`Error::Io`] if the file cannot be read.
pub fn load_word_graph(cfg: &Config, path: impl AsRef<Path>) -> Result<AnyWordGraph> {
    let path = path.as_ref();
    let bad_name = || {
        Error::Format(format!(
            "{} is not a .{} or .{} file",
            path.display(),
            Kwg::EXTENSION,
            Kbwg::EXTENSION
        ))
    };
    let name = path
        .file_stem()
        .and_then(OsStr::to_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(bad_name)?;
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .filter(|&ext| ext == Kwg::EXTENSION || ext == Kbwg::EXTENSION)
        .ok_or_else(bad_name)?;

    // The binary has no alphabet; it is derived from the lexicon name.
    let alphabet = probable_letter_distribution(cfg, name)?.tile_mapping().clone();

    debug!("Loading {} ...", path.display());
    let (file, len) = cache::open(path)?;
    let data = BufReader::new(file);
    Ok(if extension == Kbwg::EXTENSION {
        scan::<Kbwg>(data, len, name, alphabet)?.into()
    } else {
        scan::<Kwg>(data, len, name, alphabet)?.into()
    })
}

fn scan<F: NodeFormat>(
    data: impl Read,
    len: u64,
    name: &str,
    alphabet: TileMapping,
) -> Result<WordGraph<F>> {
    let mut graph = WordGraph::<F>::scan(data, len)?.with_lexicon(name, alphabet);
    graph.count_words();
    Ok(graph)
}

/// Path of the word graph for lexicon `name`.
///
/// Prefers `<name>.kwg`; falls back to `<name>.kbwg` when only that exists.
pub fn kwg_path(cfg: &Config, name: &str) -> Result<PathBuf> {
    let dir = cfg.kwg_dir()?;
    let standard = dir.join(format!("{name}.{}", Kwg::EXTENSION));
    if !standard.exists() {
        let extended = dir.join(format!("{name}.{}", Kbwg::EXTENSION));
        if extended.exists() {
            return Ok(extended);
        }
    }
    Ok(standard)
}

/// Returns the lexicon called `name`, loading it on first use.
///
/// Lexica are cached for the life of the process and shared by all
/// callers. A failed load is not cached.
pub fn get(cfg: &Config, name: &str) -> Result<Arc<Lexicon>> {
    LEXICA.load(name, |name| {
        let path = kwg_path(cfg, name)?;
        Ok(Lexicon::new(load_word_graph(cfg, path)?))
    })
}
