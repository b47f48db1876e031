//! Letters, alphabets and letter distributions.
//!
//! Word graphs store letters as small integer codes ([`MachineLetter`]).
//! A [`TileMapping`] converts between those codes and human-readable
//! letters, and a [`LetterDistribution`] adds tile counts and scores.

mod distribution;
mod mapping;

pub use distribution::{
    distribution_name_for, get_distribution, named_letter_distribution,
    probable_letter_distribution, LetterDistribution,
};
pub use mapping::{machine_word, LetterSet, MachineLetter, MachineWord, TileMapping};

#[cfg(test)]
pub(crate) use distribution::ENGLISH_CSV;
