//! `e_type`: the kind of object the file holds.

crate::elf_enum! {
    pub enum ElfType {
        None = 0,
        Relocatable = 1,
        Executable = 2,
        Dynamic = 3,
        Core = 4,
        LoOs = 0xfe00,
        HiOs = 0xfeff,
        LoProc = 0xff00,
        HiProc = 0xffff,
    }
}

impl ElfType {
    /// Whether `append_segment` is permitted for this object type.
    pub fn accepts_segments(self) -> bool {
        matches!(self, ElfType::Executable | ElfType::Dynamic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_two_bytes() {
        assert_eq!(ElfType::WIDTH, 2);
    }

    #[test]
    fn only_exec_and_dyn_accept_segments() {
        assert!(ElfType::Executable.accepts_segments());
        assert!(ElfType::Dynamic.accepts_segments());
        assert!(!ElfType::Relocatable.accepts_segments());
        assert!(!ElfType::Core.accepts_segments());
    }
}
