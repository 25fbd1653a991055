//! The symbol entry record and the `.symtab` payload.

use crate::enums::section::ShType;
use crate::enums::symbol::{self, SymBind, SymType, SymVisibility};
use crate::error::{Error, Result};
use crate::primitive;

pub const ENTRY_SIZE: usize = 16;

/// One `Elf32_Sym` entry.
#[derive(typed_builder::TypedBuilder, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    #[builder(default = 0)]
    pub st_name: u32,
    #[builder(default = 0)]
    pub st_value: u32,
    #[builder(default = 0)]
    pub st_size: u32,
    #[builder(default = SymBind::Local)]
    pub binding: SymBind,
    #[builder(default = SymType::NoType)]
    pub kind: SymType,
    #[builder(default = SymVisibility::Default)]
    pub visibility: SymVisibility,
    #[builder(default = 0)]
    pub st_shndx: u16,
}

impl Symbol {
    pub fn encode(&self, little: bool) -> [u8; ENTRY_SIZE] {
        let mut out = [0u8; ENTRY_SIZE];
        out[0..4].copy_from_slice(&primitive::encode_u32(self.st_name, little));
        out[4..8].copy_from_slice(&primitive::encode_u32(self.st_value, little));
        out[8..12].copy_from_slice(&primitive::encode_u32(self.st_size, little));
        out[12] = symbol::pack_st_info(self.binding, self.kind);
        out[13] = self.visibility.bits();
        out[14..16].copy_from_slice(&primitive::encode_u16(self.st_shndx, little));
        out
    }

    pub fn decode(bytes: &[u8], little: bool) -> Result<(Self, &[u8])> {
        if bytes.len() < ENTRY_SIZE {
            return Err(Error::ShortInput {
                needed: ENTRY_SIZE,
                available: bytes.len(),
            });
        }
        let (head, tail) = bytes.split_at(ENTRY_SIZE);
        let (st_name, rest) = primitive::decode_u32(head, little)?;
        let (st_value, rest) = primitive::decode_u32(rest, little)?;
        let (st_size, rest) = primitive::decode_u32(rest, little)?;
        let (binding, kind) = symbol::unpack_st_info(rest[0]);
        let visibility = SymVisibility::from_raw((rest[1] & 0x3) as u32);
        let (st_shndx, _) = primitive::decode_u16(&rest[2..], little)?;
        let sym = Symbol::builder()
            .st_name(st_name)
            .st_value(st_value)
            .st_size(st_size)
            .binding(binding)
            .kind(kind)
            .visibility(visibility)
            .st_shndx(st_shndx)
            .build();
        Ok((sym, tail))
    }
}

/// The `.symtab` payload: an ordered sequence of symbol entries, index 0
/// always being the zeroed `STN_UNDEF` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            entries: vec![Symbol::builder().build()],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Symbol] {
        &self.entries
    }

    /// Appends `entry` and returns its index.
    pub fn append(&mut self, entry: Symbol) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn encode(&self, little: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.entries.len() * ENTRY_SIZE);
        for entry in &self.entries {
            out.extend_from_slice(&entry.encode(little));
        }
        out
    }

    pub fn decode(bytes: &[u8], little: bool) -> Result<Self> {
        let mut entries = Vec::new();
        let mut rest = bytes;
        while !rest.is_empty() {
            let (entry, tail) = Symbol::decode(rest, little)?;
            entries.push(entry);
            rest = tail;
        }
        if entries.is_empty() {
            entries.push(Symbol::builder().build());
        }
        Ok(SymbolTable { entries })
    }

    pub const SH_TYPE: ShType = ShType::SymTab;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_starts_with_the_undef_entry() {
        let table = SymbolTable::new();
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0], Symbol::builder().build());
    }

    #[test]
    fn append_returns_the_new_index() {
        let mut table = SymbolTable::new();
        let idx = table.append(Symbol::builder().st_value(10).build());
        assert_eq!(idx, 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn entry_round_trips_both_endiannesses() {
        for little in [true, false] {
            let sym = Symbol::builder()
                .st_name(1)
                .st_value(0)
                .st_size(16)
                .binding(SymBind::Global)
                .kind(SymType::Func)
                .st_shndx(2)
                .build();
            let encoded = sym.encode(little);
            assert_eq!(encoded.len(), ENTRY_SIZE);
            let (decoded, rest) = Symbol::decode(&encoded, little).unwrap();
            assert_eq!(decoded, sym);
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn table_encode_decode_round_trips() {
        let mut table = SymbolTable::new();
        table.append(
            Symbol::builder()
                .st_name(1)
                .st_size(16)
                .binding(SymBind::Global)
                .kind(SymType::Func)
                .st_shndx(2)
                .build(),
        );
        let bytes = table.encode(true);
        let decoded = SymbolTable::decode(&bytes, true).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn scenario_main_symbol_packs_expected_info_byte() {
        let sym = Symbol::builder()
            .st_name(1)
            .st_value(0)
            .st_size(16)
            .binding(SymBind::Global)
            .kind(SymType::Func)
            .st_shndx(2)
            .build();
        let encoded = sym.encode(true);
        assert_eq!(encoded[12], 0x12);
        assert_eq!(encoded[13], 0);
    }
}
