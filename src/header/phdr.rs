//! The 32-byte (32-bit layout) program header.
//!
//! The teacher crate never implemented this record (its `header::program`
//! module was declared but left unwritten); this codec follows the same
//! shape as its sibling `ElfHeader`/`ElfSectionHeader` codecs: a
//! `TypedBuilder` record plus a pair of free `encode`/`decode` functions
//! threading an explicit `little` flag.

use crate::enums::segment::{PFlags, PType};
use crate::error::{Error, Result};
use crate::primitive;

pub const SIZE: usize = 32;

#[derive(typed_builder::TypedBuilder, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramHeader {
    #[builder(default = PType::Null)]
    pub p_type: PType,
    #[builder(default = 0)]
    pub p_offset: u32,
    #[builder(default = 0)]
    pub p_vaddr: u32,
    #[builder(default = 0)]
    pub p_paddr: u32,
    #[builder(default = 0)]
    pub p_filesz: u32,
    #[builder(default = 0)]
    pub p_memsz: u32,
    #[builder(default = PFlags::empty())]
    pub p_flags: PFlags,
    #[builder(default = 1)]
    pub p_align: u32,
}

impl ProgramHeader {
    pub fn encode(&self, little: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIZE);
        out.extend_from_slice(&primitive::encode_u32(self.p_type.to_raw(), little));
        out.extend_from_slice(&primitive::encode_u32(self.p_offset, little));
        out.extend_from_slice(&primitive::encode_u32(self.p_vaddr, little));
        out.extend_from_slice(&primitive::encode_u32(self.p_paddr, little));
        out.extend_from_slice(&primitive::encode_u32(self.p_filesz, little));
        out.extend_from_slice(&primitive::encode_u32(self.p_memsz, little));
        out.extend_from_slice(&primitive::encode_u32(self.p_flags.bits(), little));
        out.extend_from_slice(&primitive::encode_u32(self.p_align, little));
        debug_assert_eq!(out.len(), SIZE);
        out
    }

    pub fn decode(bytes: &[u8], little: bool) -> Result<(Self, &[u8])> {
        if bytes.len() < SIZE {
            return Err(Error::ShortInput {
                needed: SIZE,
                available: bytes.len(),
            });
        }
        let (p_type, rest) = primitive::decode_u32(bytes, little)?;
        let (p_offset, rest) = primitive::decode_u32(rest, little)?;
        let (p_vaddr, rest) = primitive::decode_u32(rest, little)?;
        let (p_paddr, rest) = primitive::decode_u32(rest, little)?;
        let (p_filesz, rest) = primitive::decode_u32(rest, little)?;
        let (p_memsz, rest) = primitive::decode_u32(rest, little)?;
        let (p_flags, rest) = primitive::decode_u32(rest, little)?;
        let (p_align, rest) = primitive::decode_u32(rest, little)?;
        let header = ProgramHeader::builder()
            .p_type(PType::from_raw(p_type))
            .p_offset(p_offset)
            .p_vaddr(p_vaddr)
            .p_paddr(p_paddr)
            .p_filesz(p_filesz)
            .p_memsz(p_memsz)
            .p_flags(PFlags::from_bits_truncate(p_flags))
            .p_align(p_align)
            .build();
        Ok((header, rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_both_endiannesses() {
        for little in [true, false] {
            let phdr = ProgramHeader::builder()
                .p_type(PType::Load)
                .p_offset(0x1000)
                .p_vaddr(0xdeadbeef)
                .p_filesz(16)
                .p_memsz(16)
                .p_flags(PFlags::R | PFlags::X)
                .build();
            let encoded = phdr.encode(little);
            assert_eq!(encoded.len(), SIZE);
            let (decoded, rest) = ProgramHeader::decode(&encoded, little).unwrap();
            assert_eq!(decoded, phdr);
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn unknown_flags_bits_are_dropped_not_rejected() {
        let (phdr, _) = ProgramHeader::decode(&[0u8; SIZE], true).unwrap();
        assert_eq!(phdr.p_flags, PFlags::empty());
    }
}
