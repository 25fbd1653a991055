//! The 16-byte identification prefix shared by every ELF file.

use crate::enums::class::{ElfClass, ElfDataEncoding, ElfOsAbi, ElfVersion};
use crate::error::{Error, Result};
use crate::primitive;

pub const MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];
pub const SIZE: usize = 16;

/// The identification prefix: magic, class, data encoding, version, OS/ABI,
/// ABI version, and zero padding out to 16 bytes.
///
/// This is the only authoritative source of endianness in the crate: every
/// other record's `little` flag is derived from `data` at the point a
/// container is assembled, and overwritten from it again at serialization
/// time (see `container::Elf::little`).
#[derive(typed_builder::TypedBuilder, Debug, Clone, Copy)]
pub struct Identification {
    #[builder(default = ElfClass::Elf32)]
    pub class: ElfClass,
    #[builder(default = ElfDataEncoding::Msb)]
    pub data: ElfDataEncoding,
    #[builder(default = ElfVersion::Current)]
    pub version: ElfVersion,
    #[builder(default = ElfOsAbi::SystemV)]
    pub os_abi: ElfOsAbi,
    #[builder(default = 0)]
    pub abi_version: u8,
}

impl PartialEq for Identification {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
            && self.data == other.data
            && self.version == other.version
            && self.os_abi == other.os_abi
            && self.abi_version == other.abi_version
    }
}
impl Eq for Identification {}

impl Identification {
    pub fn little(&self) -> bool {
        self.data.is_little()
    }

    pub fn encode(&self) -> [u8; SIZE] {
        let mut out = [0u8; SIZE];
        out[0..4].copy_from_slice(&MAGIC);
        out[4] = self.class.to_raw() as u8;
        out[5] = self.data.to_raw() as u8;
        out[6] = self.version.to_raw() as u8;
        out[7] = self.os_abi.to_raw() as u8;
        out[8] = self.abi_version;
        // out[9..16] stays zero padding.
        log::trace!("encoded identification prefix: {out:02x?}");
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<(Self, &[u8])> {
        if bytes.len() < SIZE {
            return Err(Error::ShortInput {
                needed: SIZE,
                available: bytes.len(),
            });
        }
        let (head, tail) = bytes.split_at(SIZE);
        if head[0..4] != MAGIC {
            return Err(Error::WrongType);
        }
        let class = ElfClass::from_raw(head[4] as u32);
        if !matches!(class, ElfClass::Elf32) {
            return Err(Error::UnsupportedClass {
                class: head[4],
            });
        }
        let ident = Identification::builder()
            .class(class)
            .data(ElfDataEncoding::from_raw(head[5] as u32))
            .version(ElfVersion::from_raw(head[6] as u32))
            .os_abi(ElfOsAbi::from_raw(head[7] as u32))
            .abi_version(head[8])
            .build();
        Ok((ident, tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_little_endian_prefix() {
        let ident = Identification::builder()
            .class(ElfClass::Elf32)
            .data(ElfDataEncoding::Lsb)
            .version(ElfVersion::Current)
            .os_abi(ElfOsAbi::SystemV)
            .abi_version(0)
            .build();
        let encoded = ident.encode();
        assert_eq!(&encoded[0..4], &MAGIC);
        assert_eq!(encoded[4], 1);
        assert_eq!(encoded[5], 1);
        let (decoded, rest) = Identification::decode(&encoded).unwrap();
        assert_eq!(decoded, ident);
        assert!(rest.is_empty());
    }

    #[test]
    fn rejects_bad_magic() {
        let bytes = [0u8; SIZE];
        assert_eq!(Identification::decode(&bytes).unwrap_err(), Error::WrongType);
    }

    #[test]
    fn scenario_big_endian_prefix_round_trips_byte_for_byte() {
        let bytes: [u8; 16] = [
            0x7f, 0x45, 0x4c, 0x46, 0x01, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        let (ident, _) = Identification::decode(&bytes).unwrap();
        assert_eq!(ident.encode(), bytes);
    }
}
