//! Round-trip codec and assembly engine for 32-bit ELF object files.
//!
//! The crate is organized leaves-first: [`primitive`] encodes fixed-width
//! integers, [`enums`] layers tagged enumerations on top of them,
//! `header`/[`strtab`]/[`symtab`]/[`dynarray`] are the per-record codecs,
//! [`container`] holds the in-memory model those codecs produce, and
//! [`assemble`] is the engine that turns a container into bytes and back.
//! [`facade`] re-exports the ergonomic entry points most callers want.

pub mod assemble;
pub mod container;
pub mod dynarray;
pub mod enums;
pub mod error;
pub mod facade;
pub mod header;
pub mod primitive;
pub mod strtab;
pub mod symtab;

pub use container::{Elf, Payload};
pub use error::{Error, Result};

/// Deserialization leniency knobs. `Options::default()` is strict: an
/// unknown enum value in a required field or a short trailing payload both
/// fail with an error rather than degrading silently.
#[derive(typed_builder::TypedBuilder, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    #[builder(default = true)]
    pub strict: bool,
    #[builder(default = true)]
    pub reject_interior_nul: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enums::class::{ElfClass, ElfDataEncoding};
    use enums::machine::ElfMachine;
    use enums::object_type::ElfType;

    #[test]
    fn options_default_is_strict() {
        let options = Options::default();
        assert!(options.strict);
        assert!(options.reject_interior_nul);
    }

    #[test]
    fn scenario_section_append_little_endian_header_bytes() {
        let mut container = facade::new(
            ElfClass::Elf32,
            ElfDataEncoding::Lsb,
            ElfType::Executable,
            ElfMachine::None,
        )
        .unwrap();
        facade::append_section(
            &mut container,
            ".dynamic",
            vec![
                0x20, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x00, 0x00, 0x00, 0x05, 0x37,
                0x13, 0x00, 0x00,
            ],
            0x1337,
        )
        .unwrap();

        let bytes = assemble::serialize(&mut container);

        let mut expected = vec![0x7f, b'E', b'L', b'F', 0x01, 0x01, 0x01, 0x00];
        expected.extend_from_slice(&[0u8; 8]); // identification padding
        expected.extend_from_slice(&[0x02, 0x00]); // e_type = EXEC
        expected.extend_from_slice(&[0x00, 0x00]); // e_machine = NONE
        expected.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]); // e_version
        expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // e_entry
        expected.extend_from_slice(&[0x34, 0x00, 0x00, 0x00]); // e_phoff
        expected.extend_from_slice(&[0x54, 0x00, 0x00, 0x00]); // e_shoff
        expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // e_flags
        expected.extend_from_slice(&[0x34, 0x00]); // e_ehsize
        expected.extend_from_slice(&[0x20, 0x00]); // e_phentsize
        expected.extend_from_slice(&[0x01, 0x00]); // e_phnum
        expected.extend_from_slice(&[0x28, 0x00]); // e_shentsize
        expected.extend_from_slice(&[0x03, 0x00]); // e_shnum
        expected.extend_from_slice(&[0x01, 0x00]); // e_shstrndx

        assert_eq!(&bytes[..expected.len()], expected.as_slice());
    }
}
