//! The `.dynamic` entry record and payload.

use crate::enums::dynamic::{self, DynTag};
use crate::enums::section::ShType;
use crate::error::{Error, Result};
use crate::primitive;

pub const ENTRY_SIZE: usize = 8;

/// One `Elf32_Dyn` entry. The ABI stores `d_un` as a union of `d_val`/
/// `d_ptr`; this codec keeps the raw 32-bit payload and exposes it through
/// whichever accessor matches the tag's conventional interpretation (see
/// `enums::dynamic::carries_pointer`), without losing information either
/// way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicEntry {
    pub tag: DynTag,
    raw: u32,
}

impl DynamicEntry {
    pub fn new(tag: DynTag, raw: u32) -> Self {
        DynamicEntry { tag, raw }
    }

    pub fn d_val(&self) -> u32 {
        self.raw
    }

    pub fn d_ptr(&self) -> u32 {
        self.raw
    }

    pub fn carries_pointer(&self) -> bool {
        dynamic::carries_pointer(self.tag)
    }

    pub fn encode(&self, little: bool) -> [u8; ENTRY_SIZE] {
        let mut out = [0u8; ENTRY_SIZE];
        out[0..4].copy_from_slice(&primitive::encode_u32(self.tag.to_raw(), little));
        out[4..8].copy_from_slice(&primitive::encode_u32(self.raw, little));
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
        let (tag, rest) = primitive::decode_u32(head, little)?;
        let (val, _) = primitive::decode_u32(rest, little)?;
        Ok((DynamicEntry::new(DynTag::from_raw(tag), val), tail))
    }
}

/// The `.dynamic` payload: an ordered sequence of tag/value entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DynamicArray {
    entries: Vec<DynamicEntry>,
}

impl DynamicArray {
    pub fn new() -> Self {
        DynamicArray::default()
    }

    pub fn entries(&self) -> &[DynamicEntry] {
        &self.entries
    }

    pub fn append(&mut self, entry: DynamicEntry) -> usize {
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
            let (entry, tail) = DynamicEntry::decode(rest, little)?;
            entries.push(entry);
            rest = tail;
        }
        Ok(DynamicArray { entries })
    }

    pub const SH_TYPE: ShType = ShType::Dynamic;
}
