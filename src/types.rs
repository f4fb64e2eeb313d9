//! Core table types for the pentakis dodecahedron.

use crate::PentakisError;

/// Number of top-level triangular faces (and of symbols bound to them).
pub const FACE_COUNT: usize = 60;

/// Number of recursive subdivision levels below a face.
pub const LEVELS: usize = 7;

/// Sub-triangles produced by one subdivision step (an 8x8 barycentric grid).
pub const SUB_TRIANGLES: usize = 64;

/// Vertices of the icosahedron / dodecahedron vertex sets.
pub(crate) const ICO_VERTICES: usize = 12;
pub(crate) const DOD_VERTICES: usize = 20;

/// One face of the polyhedron: an icosahedron vertex (the pyramid apex) and
/// two dodecahedron vertices, ordered clockwise when viewed from outside the
/// sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceEntry {
    pub ico: usize,
    pub dod_a: usize,
    pub dod_b: usize,
}

/// The 60-entry face lookup table.
///
/// Entry `k` belongs to symbol id `k + 1` (symbol ids are 1-based, matching
/// the ids assigned during starmapping). The table is external input: it
/// differs per world seed, and the only property the solver relies on is that
/// adjacent symbols sit on adjacent faces. That consistency is assumed here,
/// not checked; the constructor only validates counts and index ranges.
#[derive(Debug, Clone)]
pub struct FaceTable {
    entries: [FaceEntry; FACE_COUNT],
}

impl FaceTable {
    /// Build a table from exactly 60 entries, validating vertex indices.
    pub fn new(entries: Vec<FaceEntry>) -> Result<Self, PentakisError> {
        let entries: [FaceEntry; FACE_COUNT] = entries
            .try_into()
            .map_err(|v: Vec<FaceEntry>| PentakisError::WrongFaceCount(v.len()))?;

        for (idx, e) in entries.iter().enumerate() {
            if e.ico >= ICO_VERTICES || e.dod_a >= DOD_VERTICES || e.dod_b >= DOD_VERTICES {
                return Err(PentakisError::VertexOutOfRange {
                    symbol: idx as u32 + 1,
                    ico: e.ico,
                    dod_a: e.dod_a,
                    dod_b: e.dod_b,
                });
            }
        }

        Ok(Self { entries })
    }

    /// Look up the entry for a 1-based symbol id.
    pub fn entry(&self, symbol: u32) -> Result<&FaceEntry, PentakisError> {
        if symbol == 0 || symbol as usize > FACE_COUNT {
            return Err(PentakisError::SymbolOutOfRange(symbol));
        }
        Ok(&self.entries[symbol as usize - 1])
    }

    /// Iterate entries together with their 1-based symbol ids.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &FaceEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i as u32 + 1, e))
    }
}

/// The 64-entry leaf symbol map.
///
/// Maps a linear sub-triangle slot (0..64, in the fixed traversal order of
/// the subdivision table) to the symbol identifier drawn at that position.
#[derive(Debug, Clone)]
pub struct SymbolMap {
    symbols: [u32; SUB_TRIANGLES],
}

impl SymbolMap {
    /// Build a map from exactly 64 symbol identifiers.
    pub fn new(symbols: Vec<u32>) -> Result<Self, PentakisError> {
        let symbols: [u32; SUB_TRIANGLES] = symbols
            .try_into()
            .map_err(|v: Vec<u32>| PentakisError::WrongSymbolCount(v.len()))?;
        Ok(Self { symbols })
    }

    /// Symbol identifier for one sub-triangle slot.
    #[inline]
    pub fn symbol(&self, slot: u8) -> u32 {
        self.symbols[slot as usize]
    }

    /// Translate a full 7-level slot path into symbol identifiers.
    pub fn translate(&self, path: &[u8; LEVELS]) -> [u32; LEVELS] {
        path.map(|slot| self.symbol(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modular_entries() -> Vec<FaceEntry> {
        (0..FACE_COUNT)
            .map(|k| FaceEntry {
                ico: k % ICO_VERTICES,
                dod_a: k % DOD_VERTICES,
                dod_b: (k + 1) % DOD_VERTICES,
            })
            .collect()
    }

    #[test]
    fn test_face_table_count_validation() {
        let mut entries = modular_entries();
        entries.pop();
        assert!(matches!(
            FaceTable::new(entries),
            Err(PentakisError::WrongFaceCount(59))
        ));
    }

    #[test]
    fn test_face_table_range_validation() {
        let mut entries = modular_entries();
        entries[3].ico = ICO_VERTICES;
        let err = FaceTable::new(entries).unwrap_err();
        assert!(matches!(
            err,
            PentakisError::VertexOutOfRange { symbol: 4, .. }
        ));
    }

    #[test]
    fn test_symbol_id_lookup() {
        let table = FaceTable::new(modular_entries()).unwrap();
        assert_eq!(*table.entry(1).unwrap(), FaceEntry { ico: 0, dod_a: 0, dod_b: 1 });
        assert!(table.entry(0).is_err());
        assert!(table.entry(61).is_err());
        assert_eq!(table.iter().count(), FACE_COUNT);
    }

    #[test]
    fn test_symbol_map_translate() {
        let map = SymbolMap::new((100..164).collect()).unwrap();
        assert_eq!(map.symbol(0), 100);
        assert_eq!(map.symbol(63), 163);
        let path = [0u8, 1, 2, 3, 4, 5, 63];
        assert_eq!(map.translate(&path), [100, 101, 102, 103, 104, 105, 163]);
    }

    #[test]
    fn test_symbol_map_count_validation() {
        assert!(matches!(
            SymbolMap::new((0..63).collect()),
            Err(PentakisError::WrongSymbolCount(63))
        ));
    }
}
