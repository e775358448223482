//! Mapping sparse code points onto dense glyph storage
//!
//! Glyphs are stored in blocks of 256 consecutive code points. Only the blocks
//! whose bit is set in the range mask have storage, and that storage is packed
//! densely in ascending block order: the `n`th materialized block occupies
//! slot `n`. This module maintains the block -> slot translation table.

use types::GLYPHS_PER_BLOCK;

/// The block -> storage slot table derived from a range mask.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeIndex {
    // one entry per mask bit
    positions: Vec<Option<u32>>,
    materialized: usize,
}

impl RangeIndex {
    /// Build the table for a range mask.
    pub fn from_mask(mask: &[u8]) -> Self {
        let mut positions = Vec::with_capacity(mask.len() * 8);
        let mut next = 0;
        for byte in mask {
            for bit in 0..8 {
                if byte & (1 << bit) != 0 {
                    positions.push(Some(next));
                    next += 1;
                } else {
                    positions.push(None);
                }
            }
        }
        RangeIndex {
            positions,
            materialized: next as usize,
        }
    }

    /// The block containing `code_point`.
    pub fn block_of(code_point: u32) -> usize {
        code_point as usize / GLYPHS_PER_BLOCK
    }

    /// The storage slot of `block`, if it is materialized.
    pub fn slot(&self, block: usize) -> Option<usize> {
        self.positions
            .get(block)
            .copied()
            .flatten()
            .map(|slot| slot as usize)
    }

    /// The index of `code_point` in the dense glyph arrays.
    pub fn lookup(&self, code_point: u32) -> Option<usize> {
        self.slot(Self::block_of(code_point))
            .map(|slot| slot * GLYPHS_PER_BLOCK + code_point as usize % GLYPHS_PER_BLOCK)
    }

    /// The number of blocks with storage.
    pub fn materialized_count(&self) -> usize {
        self.materialized
    }

    /// The number of blocks the mask can address.
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Iterate over `(block, slot)` pairs in ascending block order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(block, slot)| slot.map(|slot| (block, slot as usize)))
    }

    /// Give `block` storage, growing `mask` if needed.
    ///
    /// Returns the slot the new block occupies, or `None` if the block was
    /// already materialized. Every block after the new one moves up a slot;
    /// the caller is responsible for inserting storage at the returned slot.
    pub(crate) fn materialize(&mut self, mask: &mut Vec<u8>, block: usize) -> Option<usize> {
        if self.slot(block).is_some() {
            return None;
        }
        let byte = block / 8;
        if byte >= mask.len() {
            mask.resize(byte + 1, 0);
        }
        if self.positions.len() < mask.len() * 8 {
            self.positions.resize(mask.len() * 8, None);
        }
        mask[byte] |= 1 << (block % 8);

        let slot = self.positions[..block].iter().flatten().count();
        for later in self.positions[block + 1..].iter_mut().flatten() {
            *later += 1;
        }
        self.positions[block] = Some(slot as u32);
        self.materialized += 1;
        debug_assert_eq!(*self, RangeIndex::from_mask(mask));
        Some(slot)
    }
}
