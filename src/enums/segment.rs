//! Program-header enums: `p_type` and `p_flags`.

crate::elf_enum! {
    pub enum PType {
        Null = 0,
        Load = 1,
        Dynamic = 2,
        Interp = 3,
        Note = 4,
        Shlib = 5,
        Phdr = 6,
        Tls = 7,
        LoOs = 0x6000_0000,
        GnuEhFrame = 0x6474_e550,
        GnuStack = 0x6474_e551,
        GnuRelro = 0x6474_e552,
        HiOs = 0x6fff_ffff,
        LoProc = 0x7000_0000,
        HiProc = 0x7fff_ffff,
    }
}

bitflags::bitflags! {
    /// `p_flags`: the segment's runtime access permissions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PFlags: u32 {
        const X = 0x1;
        const W = 0x2;
        const R = 0x4;
    }
}

impl PFlags {
    /// Parses the `"rwx"`-subset strings `append_segment` accepts, e.g.
    /// `"rx"` or `"rw"`. Unrecognized characters are ignored.
    pub fn from_rwx(spec: &str) -> Self {
        let mut flags = PFlags::empty();
        for c in spec.chars() {
            match c {
                'r' | 'R' => flags |= PFlags::R,
                'w' | 'W' => flags |= PFlags::W,
                'x' | 'X' => flags |= PFlags::X,
                _ => {}
            }
        }
        flags
    }
}
