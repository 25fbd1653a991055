//! Section-header enums: `sh_type`, `sh_flags`, and the reserved
//! (non-index) `SHN_*` section indices.

crate::elf_enum! {
    pub enum ShType {
        Null = 0,
        ProgBits = 1,
        SymTab = 2,
        StrTab = 3,
        Rela = 4,
        Hash = 5,
        Dynamic = 6,
        Note = 7,
        NoBits = 8,
        Rel = 9,
        ShLib = 10,
        DynSym = 11,
        InitArray = 14,
        FiniArray = 15,
        PreinitArray = 16,
        Group = 17,
        SymTabShndx = 18,
        Relr = 19,
        GnuAttributes = 0x6fff_fff5,
        GnuHash = 0x6fff_fff6,
        GnuLiblist = 0x6fff_fff7,
        GnuVerdef = 0x6fff_fffd,
        GnuVerneed = 0x6fff_fffe,
        GnuVersym = 0x6fff_ffff,
        LoProc = 0x7000_0000,
        HiProc = 0x7fff_ffff,
        LoUser = 0x8000_0000,
        HiUser = 0xffff_ffff,
    }
}

bitflags::bitflags! {
    /// `sh_flags`: section attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShFlags: u32 {
        const WRITE = 0x1;
        const ALLOC = 0x2;
        const EXECINSTR = 0x4;
        const MERGE = 0x10;
        const STRINGS = 0x20;
        const INFO_LINK = 0x40;
        const LINK_ORDER = 0x80;
        const OS_NONCONFORMING = 0x100;
        const GROUP = 0x200;
        const TLS = 0x400;
        const COMPRESSED = 0x800;
    }
}

crate::elf_enum! {
    /// Reserved values of `st_shndx`/`sh_link`-adjacent indices that do not
    /// name an actual section-header table entry.
    pub enum SpecialSectionIndex {
        Undef = 0,
        LoProc = 0xff00,
        HiProc = 0xff1f,
        LoOs = 0xff20,
        HiOs = 0xff3f,
        Abs = 0xfff1,
        Common = 0xfff2,
        Xindex = 0xffff,
    }
}
