use std::fmt::Debug;
use std::hash::Hash;

/// Bit 23: this letter completes a word.
pub const ACCEPTS_BIT: u32 = 0x80_0000;
/// Bit 22: last node of its sibling list.
pub const IS_END_BIT: u32 = 0x40_0000;

/// Bit layout of a 32-bit word graph node.
///
/// Both layouts keep the letter in the top byte and the two flags in bits
/// 23 and 22; they differ in how many letter bits are significant and how
/// wide the child pointer is. Implemented by the zero-sized markers [`Kwg`]
/// and [`Kbwg`], so a [`WordGraph`](super::WordGraph) picks its layout at
/// compile time and the accessors inline to a shift and a mask.
///
/// - `Copy + Default`: markers are zero-sized values
/// - `Send + Sync + 'static`: graphs are shared read-only between threads
/// - `Debug + Eq + Hash`: graphs can be compared and printed
pub trait NodeFormat: Copy + Default + Debug + Eq + Hash + Send + Sync + 'static {
    /// Mask applied to the top byte to get the letter code.
    const TILE_MASK: u8;
    /// Mask selecting the child pointer.
    const ARC_MASK: u32;
    /// File extension of graphs stored in this layout, without the dot.
    const EXTENSION: &'static str;

    /// Letter code of a node.
    #[inline(always)]
    fn tile(node: u32) -> u8 {
        (node >> 24) as u8 & Self::TILE_MASK
    }

    /// True if the path ending in this node spells a word.
    #[inline(always)]
    fn accepts(node: u32) -> bool {
        node & ACCEPTS_BIT != 0
    }

    /// True if this node is the last of its sibling list.
    #[inline(always)]
    fn is_end(node: u32) -> bool {
        node & IS_END_BIT != 0
    }

    /// Index of the first child, or 0 if the node has no children.
    #[inline(always)]
    fn arc_index(node: u32) -> u32 {
        node & Self::ARC_MASK
    }

    /// Packs the four fields into a node.
    ///
    /// The letter is masked to the significant bits and the pointer to
    /// [`ARC_MASK`](NodeFormat::ARC_MASK).
    fn pack(tile: u8, accepts: bool, is_end: bool, arc_index: u32) -> u32 {
        debug_assert!(arc_index <= Self::ARC_MASK, "arc index {arc_index} out of range");
        let mut node = ((tile & Self::TILE_MASK) as u32) << 24 | (arc_index & Self::ARC_MASK);
        if accepts {
            node |= ACCEPTS_BIT;
        }
        if is_end {
            node |= IS_END_BIT;
        }
        node
    }
}

/// The standard layout: 8-bit letter, 22-bit child pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Kwg;

impl NodeFormat for Kwg {
    const TILE_MASK: u8 = 0xff;
    const ARC_MASK: u32 = 0x3f_ffff;
    const EXTENSION: &'static str = "kwg";
}

/// The extended layout: 6-bit letter, 24-bit child pointer, for graphs with
/// more than 2^22 nodes.
///
/// The pointer's top two bits share storage with the flag bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Kbwg;

impl NodeFormat for Kbwg {
    const TILE_MASK: u8 = 0x3f;
    const ARC_MASK: u32 = 0xff_ffff;
    const EXTENSION: &'static str = "kbwg";
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fields_round_trip() {
        for tile in [0u8, 1, 26, 63] {
            for accepts in [false, true] {
                for is_end in [false, true] {
                    for arc in [0u32, 1, 2, 12345, 0x3f_ffff] {
                        let n = Kwg::pack(tile, accepts, is_end, arc);
                        assert_eq!(Kwg::tile(n), tile);
                        assert_eq!(Kwg::accepts(n), accepts);
                        assert_eq!(Kwg::is_end(n), is_end);
                        assert_eq!(Kwg::arc_index(n), arc);
                    }
                }
            }
        }
    }

    #[test]
    fn extended_layout_masks_letter_and_widens_pointer() {
        let n = 0xc1_80_00_05;
        assert_eq!(Kwg::tile(n), 0xc1);
        assert_eq!(Kbwg::tile(n), 0x01);
        assert!(Kwg::accepts(n) && Kbwg::accepts(n));
        assert!(!Kwg::is_end(n) && !Kbwg::is_end(n));
        assert_eq!(Kwg::arc_index(n), 0x00_0005);
        assert_eq!(Kbwg::arc_index(n), 0x80_0005);

        let big = Kbwg::pack(5, false, false, 0x3f_ffff);
        assert_eq!(Kbwg::arc_index(big), 0x3f_ffff);
        assert_eq!(Kbwg::pack(0x45, false, false, 0), 0x05_00_00_00);
    }

    #[test]
    fn layouts_agree_on_small_graphs() {
        let nodes = [0x01000000u32, 0x02800000, 0x03400000, 0x04C00000, 0x05000001];
        for &n in &nodes {
            assert_eq!(Kwg::tile(n), Kbwg::tile(n));
            assert_eq!(Kwg::accepts(n), Kbwg::accepts(n));
            assert_eq!(Kwg::is_end(n), Kbwg::is_end(n));
        }
        assert_eq!(Kbwg::arc_index(0x05000001), 1);
        assert_eq!(Kbwg::arc_index(0x03400000), 0x40_0000);
    }

    #[test]
    fn extended_pointer_shares_the_flag_bits() {
        let n = Kbwg::pack(1, true, false, 2);
        assert!(Kbwg::accepts(n));
        assert_eq!(Kbwg::arc_index(n), ACCEPTS_BIT | 2);
        assert_eq!(Kwg::arc_index(n), 2);
    }
}
