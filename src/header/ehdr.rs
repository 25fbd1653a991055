//! The 52-byte ELF header.

use crate::enums::class::ElfVersion;
use crate::enums::machine::ElfMachine;
use crate::enums::object_type::ElfType;
use crate::error::{Error, Result};
use crate::header::ident::{self, Identification};
use crate::primitive;

pub const SIZE: usize = 52;

#[derive(typed_builder::TypedBuilder, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElfHeader {
    pub identification: Identification,
    #[builder(default = ElfType::None)]
    pub e_type: ElfType,
    #[builder(default = ElfMachine::None)]
    pub machine: ElfMachine,
    #[builder(default = ElfVersion::Current)]
    pub version: ElfVersion,
    #[builder(default = 0)]
    pub entry: u32,
    #[builder(default = 0)]
    pub phoff: u32,
    #[builder(default = 0)]
    pub shoff: u32,
    #[builder(default = 0)]
    pub flags: u32,
    #[builder(default = SIZE as u16)]
    pub ehsize: u16,
    #[builder(default = 0)]
    pub phentsize: u16,
    #[builder(default = 0)]
    pub phnum: u16,
    #[builder(default = 0)]
    pub shentsize: u16,
    #[builder(default = 0)]
    pub shnum: u16,
    #[builder(default = 0)]
    pub shstrndx: u16,
}

impl ElfHeader {
    pub fn little(&self) -> bool {
        self.identification.little()
    }

    pub fn encode(&self) -> Vec<u8> {
        let little = self.little();
        let mut out = Vec::with_capacity(SIZE);
        out.extend_from_slice(&self.identification.encode());
        out.extend_from_slice(&primitive::encode_u16(self.e_type.to_raw() as u16, little));
        out.extend_from_slice(&primitive::encode_u16(self.machine.to_raw() as u16, little));
        out.extend_from_slice(&primitive::encode_u32(self.version.to_raw(), little));
        out.extend_from_slice(&primitive::encode_u32(self.entry, little));
        out.extend_from_slice(&primitive::encode_u32(self.phoff, little));
        out.extend_from_slice(&primitive::encode_u32(self.shoff, little));
        out.extend_from_slice(&primitive::encode_u32(self.flags, little));
        out.extend_from_slice(&primitive::encode_u16(self.ehsize, little));
        out.extend_from_slice(&primitive::encode_u16(self.phentsize, little));
        out.extend_from_slice(&primitive::encode_u16(self.phnum, little));
        out.extend_from_slice(&primitive::encode_u16(self.shentsize, little));
        out.extend_from_slice(&primitive::encode_u16(self.shnum, little));
        out.extend_from_slice(&primitive::encode_u16(self.shstrndx, little));
        debug_assert_eq!(out.len(), SIZE);
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<(Self, &[u8])> {
        if bytes.len() < SIZE {
            return Err(Error::ShortInput {
                needed: SIZE,
                available: bytes.len(),
            });
        }
        let (identification, rest) = Identification::decode(bytes)?;
        let little = identification.little();
        let (e_type, rest) = primitive::decode_u16(rest, little)?;
        let (machine, rest) = primitive::decode_u16(rest, little)?;
        let (version, rest) = primitive::decode_u32(rest, little)?;
        let (entry, rest) = primitive::decode_u32(rest, little)?;
        let (phoff, rest) = primitive::decode_u32(rest, little)?;
        let (shoff, rest) = primitive::decode_u32(rest, little)?;
        let (flags, rest) = primitive::decode_u32(rest, little)?;
        let (ehsize, rest) = primitive::decode_u16(rest, little)?;
        let (phentsize, rest) = primitive::decode_u16(rest, little)?;
        let (phnum, rest) = primitive::decode_u16(rest, little)?;
        let (shentsize, rest) = primitive::decode_u16(rest, little)?;
        let (shnum, rest) = primitive::decode_u16(rest, little)?;
        let (shstrndx, rest) = primitive::decode_u16(rest, little)?;

        let header = ElfHeader::builder()
            .identification(identification)
            .e_type(ElfType::from_raw(e_type as u32))
            .machine(ElfMachine::from_raw(machine as u32))
            .version(ElfVersion::from_raw(version))
            .entry(entry)
            .phoff(phoff)
            .shoff(shoff)
            .flags(flags)
            .ehsize(ehsize)
            .phentsize(phentsize)
            .phnum(phnum)
            .shentsize(shentsize)
            .shnum(shnum)
            .shstrndx(shstrndx)
            .build();
        Ok((header, rest))
    }
}
