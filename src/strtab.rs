//! The `.shstrtab`/`.strtab` payload: an append-only NUL-terminated string
//! blob indexed by byte offset.

use crate::enums::section::ShType;
use crate::error::{Error, Result};

/// Backing store always begins with a single NUL byte so offset 0 is the
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    bytes: Vec<u8>,
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StringTable {
    pub fn new() -> Self {
        StringTable { bytes: vec![0] }
    }

    /// Wraps an already-serialized string-table payload (e.g. one read back
    /// from a file) without re-validating its contents.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        StringTable { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Appends `s` followed by a NUL byte, returning the offset at which it
    /// begins. Rejects strings containing an interior NUL.
    pub fn append(&mut self, s: &str) -> Result<u32> {
        self.append_with(s, true)
    }

    /// Like [`append`](Self::append), but lets a caller opt out of the
    /// interior-NUL check (`Options::reject_interior_nul = false`) to
    /// reproduce the historically permissive behavior for compatibility
    /// testing.
    pub fn append_with(&mut self, s: &str, reject_interior_nul: bool) -> Result<u32> {
        if reject_interior_nul && s.contains('\0') {
            return Err(Error::InvalidString {
                value: s.to_string(),
            });
        }
        let offset = self.bytes.len() as u32;
        self.bytes.extend_from_slice(s.as_bytes());
        self.bytes.push(0);
        log::trace!("strtab: appended {s:?} at offset {offset}");
        Ok(offset)
    }

    /// Returns the offset of the first occurrence of `sub` (including a
    /// match against a trailing NUL boundary), or `None` if absent.
    pub fn find(&self, sub: &str) -> Option<u32> {
        if sub.is_empty() {
            return Some(0);
        }
        let needle = sub.as_bytes();
        self.bytes
            .windows(needle.len())
            .position(|w| w == needle)
            .map(|p| p as u32)
    }

    /// Reads the NUL-terminated string starting at `offset`, if any.
    pub fn get(&self, offset: u32) -> Option<&str> {
        let start = offset as usize;
        if start >= self.bytes.len() {
            return None;
        }
        let end = self.bytes[start..].iter().position(|&b| b == 0)? + start;
        std::str::from_utf8(&self.bytes[start..end]).ok()
    }

    pub const SH_TYPE: ShType = ShType::StrTab;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_has_a_leading_nul() {
        let table = StringTable::new();
        assert_eq!(table.as_bytes(), &[0]);
        assert_eq!(table.get(0), Some(""));
    }

    #[test]
    fn append_returns_offset_and_is_retrievable() {
        let mut table = StringTable::new();
        let off = table.append(".shstrtab").unwrap();
        assert_eq!(off, 1);
        assert_eq!(table.get(1), Some(".shstrtab"));
    }

    #[test]
    fn find_locates_a_substring() {
        let mut table = StringTable::new();
        table.append("main").unwrap();
        assert_eq!(table.find("main"), Some(1));
        assert_eq!(table.find("nope"), None);
    }

    #[test]
    fn append_with_false_allows_interior_nul() {
        let mut table = StringTable::new();
        assert!(table.append_with("a\0b", false).is_ok());
    }

    #[test]
    fn append_rejects_interior_nul() {
        let mut table = StringTable::new();
        assert_eq!(
            table.append("a\0b").unwrap_err(),
            Error::InvalidString {
                value: "a\0b".to_string()
            }
        );
    }

    #[test]
    fn scenario_strtab_contains_main_at_expected_offsets() {
        let mut table = StringTable::new();
        table.append("main").unwrap();
        assert_eq!(&table.as_bytes()[0..6], b"\0main\0");
    }
}
