use std::borrow::Cow;
use std::fmt;

use hashbrown::HashMap;

use crate::error::{Error, Result};

/// A letter as stored in a word graph: a small integer code.
///
/// Code 0 is the undesignated blank. Setting the high bit marks a blank
/// that has been designated as the letter in the low bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MachineLetter(pub u8);

const BLANK_MASK: u8 = 0x80;

impl MachineLetter {
    /// The undesignated blank.
    pub const BLANK: MachineLetter = MachineLetter(0);

    /// Returns this letter designated as a blank.
    #[inline]
    pub const fn blank(self) -> Self {
        MachineLetter(self.0 | BLANK_MASK)
    }

    /// Strips the blank designation, leaving the plain letter.
    #[inline]
    pub const fn unblank(self) -> Self {
        MachineLetter(self.0 & !BLANK_MASK)
    }

    /// True if this is a designated blank.
    #[inline]
    pub const fn is_blanked(self) -> bool {
        self.0 & BLANK_MASK != 0
    }

    /// True if this is the undesignated blank.
    #[inline]
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for MachineLetter {
    fn from(code: u8) -> Self {
        MachineLetter(code)
    }
}

impl fmt::Display for MachineLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A word as a sequence of letter codes.
pub type MachineWord = Vec<MachineLetter>;

/// A set of letter codes, one bit per code.
pub type LetterSet = u64;

/// Converts raw codes into a [`MachineWord`].
pub fn machine_word(codes: &[u8]) -> MachineWord {
    codes.iter().copied().map(MachineLetter).collect()
}

/// Maps between human-readable letters and letter codes.
///
/// Code 0 is the blank; its symbol is conventionally `?`. Letters may be
/// longer than one character (`CH`, `L·L`). The lower-case form of a letter
/// denotes a designated blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMapping {
    letters: Vec<String>,
    vals: HashMap<String, MachineLetter>,
    max_letter_chars: usize,
}

impl TileMapping {
    /// Creates a mapping from letters listed in code order, blank first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Distribution`] if the list is empty, too long to fit
    /// in the 7 bits available to letter codes, or contains duplicates.
    pub fn new<I, S>(letters: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let letters: Vec<String> = letters.into_iter().map(Into::into).collect();
        if letters.is_empty() {
            return Err(Error::Distribution("no letters".into()));
        }
        if letters.len() > BLANK_MASK as usize {
            return Err(Error::Distribution(format!(
                "{} letters do not fit in a letter code",
                letters.len()
            )));
        }
        let mut vals = HashMap::with_capacity(letters.len() * 2);
        let mut max_letter_chars = 0;
        for (code, letter) in letters.iter().enumerate() {
            let ml = MachineLetter(code as u8);
            if letter.is_empty() || vals.insert(letter.clone(), ml).is_some() {
                return Err(Error::Distribution(format!("bad or duplicate letter {letter:?}")));
            }
            max_letter_chars = max_letter_chars.max(letter.chars().count());
        }
        for (code, letter) in letters.iter().enumerate().skip(1) {
            let lower = letter.to_lowercase();
            if lower != *letter {
                vals.entry(lower)
                    .or_insert(MachineLetter(code as u8).blank());
            }
        }
        Ok(TileMapping {
            letters,
            vals,
            max_letter_chars,
        })
    }

    /// The English alphabet: blank `?` followed by `A`..`Z` as codes 1..26.
    pub fn english() -> Self {
        let letters = std::iter::once("?".to_string())
            .chain(('A'..='Z').map(String::from));
        Self::new(letters).expect("the English alphabet is well formed")
    }

    /// Number of letter codes, including the blank.
    #[inline]
    pub fn num_letters(&self) -> u8 {
        self.letters.len() as u8
    }

    /// Returns the human-readable form of `ml`, or `None` if it is outside
    /// the alphabet. Designated blanks are rendered in lower case.
    pub fn letter(&self, ml: MachineLetter) -> Option<Cow<'_, str>> {
        let letter = self.letters.get(ml.unblank().0 as usize)?;
        if ml.is_blanked() {
            Some(Cow::Owned(letter.to_lowercase()))
        } else {
            Some(Cow::Borrowed(letter))
        }
    }

    /// Returns the code for a single human-readable letter.
    pub fn val(&self, letter: &str) -> Result<MachineLetter> {
        self.vals
            .get(letter)
            .copied()
            .ok_or_else(|| Error::UnknownLetter(letter.to_string()))
    }

    /// Decodes a human-readable word, matching the longest known letter at
    /// each position.
    pub fn to_machine_letters(&self, word: &str) -> Result<MachineWord> {
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .collect();
        let nchars = bounds.len() - 1;
        let mut out = MachineWord::with_capacity(nchars);
        let mut i = 0;
        while i < nchars {
            let longest = self.max_letter_chars.min(nchars - i);
            let found = (1..=longest).rev().find_map(|len| {
                self.vals
                    .get(&word[bounds[i]..bounds[i + len]])
                    .map(|&ml| (ml, len))
            });
            match found {
                Some((ml, len)) => {
                    out.push(ml);
                    i += len;
                }
                None => {
                    return Err(Error::UnknownLetter(
                        word[bounds[i]..bounds[i + 1]].to_string(),
                    ))
                }
            }
        }
        Ok(out)
    }

    /// Renders a word for display. Codes outside the alphabet render as
    /// U+FFFD.
    pub fn user_visible(&self, word: &[MachineLetter]) -> String {
        word.iter()
            .map(|&ml| self.letter(ml).unwrap_or(Cow::Borrowed("\u{fffd}")))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blank_designation() {
        let a = MachineLetter(1);
        assert!(!a.is_blanked());
        assert_eq!(a.blank(), MachineLetter(0x81));
        assert!(a.blank().is_blanked());
        assert_eq!(a.blank().unblank(), a);
        assert!(MachineLetter::BLANK.is_blank());
        assert!(!MachineLetter::BLANK.is_blanked());
    }

    #[test]
    fn english_round_trip() {
        let alph = TileMapping::english();
        assert_eq!(alph.num_letters(), 27);
        let word = alph.to_machine_letters("CRAWL").unwrap();
        assert_eq!(word, machine_word(&[3, 18, 1, 23, 12]));
        assert_eq!(alph.user_visible(&word), "CRAWL");
    }

    #[test]
    fn blanks_and_designated_blanks() {
        let alph = TileMapping::english();
        let word = alph.to_machine_letters("Q?iZ").unwrap();
        assert_eq!(
            word,
            vec![
                MachineLetter(17),
                MachineLetter::BLANK,
                MachineLetter(9).blank(),
                MachineLetter(26)
            ]
        );
        assert_eq!(alph.user_visible(&word), "Q?iZ");
    }

    #[test]
    fn unknown_letters_are_rejected() {
        let alph = TileMapping::english();
        assert!(matches!(
            alph.to_machine_letters("AB3"),
            Err(Error::UnknownLetter(l)) if l == "3"
        ));
        assert!(matches!(alph.val("Å"), Err(Error::UnknownLetter(_))));
        assert_eq!(alph.user_visible(&[MachineLetter(1), MachineLetter(60)]), "A\u{fffd}");
    }

    #[test]
    fn multi_character_letters_match_longest() {
        let alph = TileMapping::new(["?", "A", "C", "CH", "H", "L", "LL", "L·L"]).unwrap();
        let word = alph.to_machine_letters("CHACLLAL·L").unwrap();
        assert_eq!(word, machine_word(&[3, 1, 2, 6, 1, 7]));
        assert_eq!(alph.to_machine_letters("ch").unwrap(), vec![MachineLetter(3).blank()]);
        assert_eq!(alph.user_visible(&word), "CHACLLAL·L");
    }

    #[test]
    fn duplicate_letters_are_rejected() {
        assert!(TileMapping::new(["?", "A", "A"]).is_err());
        assert!(TileMapping::new(Vec::<String>::new()).is_err());
    }
}
