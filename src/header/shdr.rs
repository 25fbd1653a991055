//! The 40-byte section header.

use crate::enums::section::{ShFlags, ShType};
use crate::error::{Error, Result};
use crate::primitive;

pub const SIZE: usize = 40;

#[derive(typed_builder::TypedBuilder, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    #[builder(default = 0)]
    pub sh_name: u32,
    #[builder(default = ShType::Null)]
    pub sh_type: ShType,
    #[builder(default = ShFlags::empty())]
    pub sh_flags: ShFlags,
    #[builder(default = 0)]
    pub sh_addr: u32,
    #[builder(default = 0)]
    pub sh_offset: u32,
    #[builder(default = 0)]
    pub sh_size: u32,
    #[builder(default = 0)]
    pub sh_link: u32,
    #[builder(default = 0)]
    pub sh_info: u32,
    #[builder(default = 0)]
    pub sh_addralign: u32,
    #[builder(default = 0)]
    pub sh_entsize: u32,
}

impl SectionHeader {
    pub fn encode(&self, little: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIZE);
        out.extend_from_slice(&primitive::encode_u32(self.sh_name, little));
        out.extend_from_slice(&primitive::encode_u32(self.sh_type.to_raw(), little));
        out.extend_from_slice(&primitive::encode_u32(self.sh_flags.bits(), little));
        out.extend_from_slice(&primitive::encode_u32(self.sh_addr, little));
        out.extend_from_slice(&primitive::encode_u32(self.sh_offset, little));
        out.extend_from_slice(&primitive::encode_u32(self.sh_size, little));
        out.extend_from_slice(&primitive::encode_u32(self.sh_link, little));
        out.extend_from_slice(&primitive::encode_u32(self.sh_info, little));
        out.extend_from_slice(&primitive::encode_u32(self.sh_addralign, little));
        out.extend_from_slice(&primitive::encode_u32(self.sh_entsize, little));
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
        let (sh_name, rest) = primitive::decode_u32(bytes, little)?;
        let (sh_type, rest) = primitive::decode_u32(rest, little)?;
        let (sh_flags, rest) = primitive::decode_u32(rest, little)?;
        let (sh_addr, rest) = primitive::decode_u32(rest, little)?;
        let (sh_offset, rest) = primitive::decode_u32(rest, little)?;
        let (sh_size, rest) = primitive::decode_u32(rest, little)?;
        let (sh_link, rest) = primitive::decode_u32(rest, little)?;
        let (sh_info, rest) = primitive::decode_u32(rest, little)?;
        let (sh_addralign, rest) = primitive::decode_u32(rest, little)?;
        let (sh_entsize, rest) = primitive::decode_u32(rest, little)?;
        let header = SectionHeader::builder()
            .sh_name(sh_name)
            .sh_type(ShType::from_raw(sh_type))
            .sh_flags(ShFlags::from_bits_truncate(sh_flags))
            .sh_addr(sh_addr)
            .sh_offset(sh_offset)
            .sh_size(sh_size)
            .sh_link(sh_link)
            .sh_info(sh_info)
            .sh_addralign(sh_addralign)
            .sh_entsize(sh_entsize)
            .build();
        Ok((header, rest))
    }
}
