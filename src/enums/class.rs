//! Identification-prefix enums: class, data encoding, version, OS/ABI.

crate::elf_enum! {
    /// `EI_CLASS`: the ELF pointer/offset width.
    pub enum ElfClass {
        None = 0,
        Elf32 = 1,
        Elf64 = 2,
    }
}

crate::elf_enum! {
    /// `EI_DATA`: the endianness of multi-byte fields in the file.
    pub enum ElfDataEncoding {
        None = 0,
        Lsb = 1,
        Msb = 2,
    }
}

impl ElfDataEncoding {
    /// Whether this encoding denotes little-endian byte order. Defaults to
    /// big-endian for `None`/`Unknown`, matching the façade's MSB default.
    pub fn is_little(self) -> bool {
        matches!(self, ElfDataEncoding::Lsb)
    }

    pub fn from_little(little: bool) -> Self {
        if little {
            ElfDataEncoding::Lsb
        } else {
            ElfDataEncoding::Msb
        }
    }
}

crate::elf_enum! {
    /// Shared by `EI_VERSION` (1 byte) and `e_version` (4 bytes); the two
    /// only known values are `None` and `Current`.
    pub enum ElfVersion {
        None = 0,
        Current = 1,
    }
}

crate::elf_enum! {
    /// `EI_OSABI`.
    pub enum ElfOsAbi {
        SystemV = 0,
        HpUx = 1,
        NetBsd = 2,
        Gnu = 3,
        Solaris = 6,
        Aix = 7,
        Irix = 8,
        FreeBsd = 9,
        Tru64 = 10,
        Modesto = 11,
        OpenBsd = 12,
        OpenVms = 13,
        Nsk = 14,
        Aros = 15,
        FenixOs = 16,
        CloudAbi = 17,
        OpenVos = 18,
        ArmAeabi = 64,
        Arm = 97,
        Standalone = 255,
    }
}
