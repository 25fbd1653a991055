//! The in-memory ELF model: header, program-header list, section-header
//! list, and a parallel payload list.

use std::collections::HashMap;

use crate::dynarray::DynamicArray;
use crate::header::ehdr::ElfHeader;
use crate::header::phdr::ProgramHeader;
use crate::header::shdr::SectionHeader;
use crate::strtab::StringTable;
use crate::symtab::SymbolTable;

/// A section's payload, either opaque bytes (the default after
/// deserialization) or one of the structured payloads a caller has
/// upgraded it to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Bytes(Vec<u8>),
    StringTable(StringTable),
    SymbolTable(SymbolTable),
    DynamicArray(DynamicArray),
}

impl Payload {
    pub fn len(&self) -> usize {
        match self {
            Payload::Bytes(b) => b.len(),
            Payload::StringTable(t) => t.len(),
            Payload::SymbolTable(t) => t.len() * crate::symtab::ENTRY_SIZE,
            Payload::DynamicArray(a) => a.entries().len() * crate::dynarray::ENTRY_SIZE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn encode(&self, little: bool) -> Vec<u8> {
        match self {
            Payload::Bytes(b) => b.clone(),
            Payload::StringTable(t) => t.as_bytes().to_vec(),
            Payload::SymbolTable(t) => t.encode(little),
            Payload::DynamicArray(a) => a.encode(little),
        }
    }

    /// Like [`encode`](Self::encode), but falls back to the payload's own
    /// bytes verbatim if it's still opaque. `little` only matters for a
    /// typed `SymbolTable`/`DynamicArray`; pass the owning container's
    /// [`Elf::little`].
    pub fn as_bytes(&self, little: bool) -> Vec<u8> {
        match self {
            Payload::Bytes(b) => b.clone(),
            other => other.encode(little),
        }
    }

    /// Upgrades an opaque payload to a string table, parsing its current
    /// bytes verbatim. No-op if already a string table.
    pub fn upgrade_to_string_table(&mut self) {
        if let Payload::Bytes(bytes) = self {
            *self = Payload::StringTable(StringTable::from_bytes(std::mem::take(bytes)));
        }
    }

    pub fn as_string_table_mut(&mut self) -> Option<&mut StringTable> {
        self.upgrade_to_string_table();
        match self {
            Payload::StringTable(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_string_table(&self) -> Option<&StringTable> {
        match self {
            Payload::StringTable(t) => Some(t),
            _ => None,
        }
    }

    /// Upgrades an opaque payload to a symbol table, decoding its current
    /// bytes with the given `little`. No-op if already a symbol table.
    /// Callers must pass the owning container's actual endianness (see
    /// `facade::as_symbol_table`) rather than guessing, since an opaque
    /// payload carries no endianness of its own.
    pub fn as_symbol_table_mut(&mut self, little: bool) -> Option<&mut SymbolTable> {
        if let Payload::Bytes(bytes) = self {
            if let Ok(table) = SymbolTable::decode(bytes, little) {
                *self = Payload::SymbolTable(table);
            }
        }
        match self {
            Payload::SymbolTable(t) => Some(t),
            _ => None,
        }
    }
}

/// The full in-memory ELF model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elf {
    pub header: ElfHeader,
    pub program_headers: Vec<ProgramHeader>,
    pub section_headers: Vec<SectionHeader>,
    pub payloads: Vec<Payload>,
    /// Maps a program-header index to the section index its `p_offset`
    /// should track at serialization time (the REDESIGN FLAG pass).
    pub segment_bindings: HashMap<usize, usize>,
}

impl Elf {
    pub fn little(&self) -> bool {
        self.header.little()
    }

    /// Index of the `.shstrtab` section named in the header.
    pub fn shstrtab_index(&self) -> usize {
        self.header.shstrndx as usize
    }

    /// Reads `.shstrtab` if it's already a typed string table. Use
    /// [`shstrtab_mut`](Self::shstrtab_mut) to upgrade a still-opaque
    /// payload (e.g. straight out of `assemble::deserialize`) first.
    pub fn shstrtab(&self) -> Option<&StringTable> {
        self.payloads
            .get(self.shstrtab_index())
            .and_then(Payload::as_string_table)
    }

    /// Upgrades `.shstrtab` to a typed string table if it's still opaque,
    /// then returns it. A freshly deserialized container's `.shstrtab` is
    /// always `Payload::Bytes`, so name lookups must go through this rather
    /// than [`shstrtab`](Self::shstrtab).
    pub fn shstrtab_mut(&mut self) -> Option<&mut StringTable> {
        let index = self.shstrtab_index();
        self.payloads.get_mut(index).and_then(Payload::as_string_table_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_len_matches_bytes_len() {
        let payload = Payload::Bytes(vec![1, 2, 3]);
        assert_eq!(payload.len(), 3);
    }

    #[test]
    fn upgrade_to_string_table_preserves_bytes() {
        let mut payload = Payload::Bytes(vec![0, b'a', 0]);
        payload.upgrade_to_string_table();
        assert_eq!(payload.as_string_table().unwrap().get(1), Some("a"));
    }

    #[test]
    fn shstrtab_mut_upgrades_an_opaque_payload() {
        let mut elf = Elf {
            header: ElfHeader::builder().shstrndx(1).build(),
            program_headers: vec![],
            section_headers: vec![SectionHeader::builder().build(), SectionHeader::builder().build()],
            payloads: vec![Payload::Bytes(vec![]), Payload::Bytes(vec![0, b'x', 0])],
            segment_bindings: Default::default(),
        };
        assert!(elf.shstrtab().is_none());
        assert_eq!(elf.shstrtab_mut().unwrap().get(1), Some("x"));
        assert!(elf.shstrtab().is_some());
    }
}
