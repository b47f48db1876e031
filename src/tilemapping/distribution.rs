use std::io::Read;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use once_cell::sync::Lazy;

use super::mapping::{MachineLetter, TileMapping};
use crate::cache::{self, Cache};
use crate::config::Config;
use crate::error::{Error, Result};

static DISTRIBUTIONS: Lazy<Cache<LetterDistribution>> = Lazy::new(Cache::new);

/// The tiles of a game: which letters exist, how many of each, what they
/// score and which are vowels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterDistribution {
    name: String,
    tile_mapping: TileMapping,
    vowels: Vec<MachineLetter>,
    distribution: Vec<u8>,
    scores: Vec<i32>,
    num_total_letters: u32,
}

impl LetterDistribution {
    /// Parses a distribution table with rows `letter,quantity,value,vowel`.
    ///
    /// The first row is the blank. Row order defines the letter codes.
    pub fn scan(data: impl Read, name: impl Into<String>) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(data);

        let mut letters = Vec::new();
        let mut distribution = Vec::new();
        let mut scores = Vec::new();
        let mut vowels = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let letter = field(&record, 0)?;
            let quantity: u8 = parse_field(&record, 1)?;
            let value: i32 = parse_field(&record, 2)?;
            let vowel: u8 = parse_field(&record, 3)?;
            if vowel == 1 {
                vowels.push(MachineLetter(idx as u8));
            }
            letters.push(letter.to_string());
            distribution.push(quantity);
            scores.push(value);
        }

        let tile_mapping = TileMapping::new(letters)?;
        let num_total_letters = distribution.iter().map(|&n| n as u32).sum();
        Ok(LetterDistribution {
            name: name.into(),
            tile_mapping,
            vowels,
            distribution,
            scores,
            num_total_letters,
        })
    }

    /// Name of this distribution, such as `english`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alphabet defined by this distribution.
    pub fn tile_mapping(&self) -> &TileMapping {
        &self.tile_mapping
    }

    /// Number of tiles of each letter code, blank included.
    pub fn distribution(&self) -> &[u8] {
        &self.distribution
    }

    /// Letter codes flagged as vowels.
    pub fn vowels(&self) -> &[MachineLetter] {
        &self.vowels
    }

    /// Total number of tiles, blanks included.
    pub fn num_total_letters(&self) -> u32 {
        self.num_total_letters
    }

    /// Score of a single tile. Designated blanks score as the blank; codes
    /// outside the alphabet score zero.
    #[inline]
    pub fn score(&self, ml: MachineLetter) -> i32 {
        let code = if ml.is_blanked() { 0 } else { ml.0 as usize };
        self.scores.get(code).copied().unwrap_or(0)
    }

    /// Sum of the tile scores of `word`.
    pub fn word_score(&self, word: &[MachineLetter]) -> i32 {
        word.iter().map(|&ml| self.score(ml)).sum()
    }
}

fn field(record: &StringRecord, i: usize) -> Result<&str> {
    record.get(i).ok_or_else(|| {
        Error::Distribution(format!("row {:?} is missing column {}", record, i + 1))
    })
}

fn parse_field<T: std::str::FromStr>(record: &StringRecord, i: usize) -> Result<T> {
    let raw = field(record, i)?;
    raw.parse()
        .map_err(|_| Error::Distribution(format!("bad number {raw:?} in row {record:?}")))
}

/// Loads `<data_path>/letterdistributions/<name>.csv`, bypassing the cache.
pub fn named_letter_distribution(cfg: &Config, name: &str) -> Result<LetterDistribution> {
    let name = name.to_lowercase();
    let path = cfg.letter_distribution_dir()?.join(format!("{name}.csv"));
    let (file, _) = cache::open(&path)?;
    let dist = LetterDistribution::scan(file, name)?;
    debug!(
        "Loaded letter distribution {} ({} letters)",
        dist.name,
        dist.tile_mapping.num_letters()
    );
    Ok(dist)
}

/// Returns the named distribution, loading it on first use.
pub fn get_distribution(cfg: &Config, name: &str) -> Result<Arc<LetterDistribution>> {
    DISTRIBUTIONS.load(&name.to_lowercase(), |key| named_letter_distribution(cfg, key))
}

/// Guesses the standard distribution name for a lexicon, e.g. `english` for
/// `CSW21`.
pub fn distribution_name_for(lexicon: &str) -> Result<&'static str> {
    let lex = lexicon.to_lowercase();
    let starts = |prefixes: &[&str]| prefixes.iter().any(|p| lex.starts_with(p));
    let name = if starts(&["nwl", "nswl", "twl", "owl", "csw", "america", "cel", "ecwl"]) {
        "english"
    } else if starts(&["osps"]) {
        "polish"
    } else if starts(&["nsf"]) {
        "norwegian"
    } else if starts(&["fra"]) {
        "french"
    } else if starts(&["rd", "deutsch"]) {
        "german"
    } else if starts(&["disc"]) {
        "catalan"
    } else if starts(&["fise"]) {
        "spanish"
    } else {
        return Err(Error::UnknownLexicon(lex));
    };
    Ok(name)
}

/// Returns the standard distribution for a lexicon, loading it on first use.
pub fn probable_letter_distribution(
    cfg: &Config,
    lexicon: &str,
) -> Result<Arc<LetterDistribution>> {
    get_distribution(cfg, distribution_name_for(lexicon)?)
}

#[cfg(test)]
pub(crate) const ENGLISH_CSV: &str = "\
?,2,0,0
A,9,1,1
B,2,3,0
C,2,3,0
D,4,2,0
E,12,1,1
F,2,4,0
G,3,2,0
H,2,4,0
I,9,1,1
J,1,8,0
K,1,5,0
L,4,1,0
M,2,3,0
N,6,1,0
O,8,1,1
P,2,3,0
Q,1,10,0
R,6,1,0
S,4,1,0
T,6,1,0
U,4,1,1
V,2,4,0
W,2,4,0
X,1,8,0
Y,2,4,0
Z,1,10,0
";
