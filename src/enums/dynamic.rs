//! `d_tag`: the `.dynamic` array's tag domain, plus the tag→variant table
//! that decides whether a tag's `d_un` union holds `d_val` or `d_ptr`
//! (see DESIGN.md for the open question this resolves).

crate::elf_enum! {
    pub enum DynTag {
        Null = 0,
        Needed = 1,
        PltRelSz = 2,
        PltGot = 3,
        Hash = 4,
        StrTab = 5,
        SymTab = 6,
        Rela = 7,
        RelaSz = 8,
        RelaEnt = 9,
        StrSz = 10,
        SymEnt = 11,
        Init = 12,
        Fini = 13,
        SoName = 14,
        RPath = 15,
        Symbolic = 16,
        Rel = 17,
        RelSz = 18,
        RelEnt = 19,
        PltRel = 20,
        Debug = 21,
        TextRel = 22,
        JmpRel = 23,
        BindNow = 24,
        InitArray = 25,
        FiniArray = 26,
        InitArraySz = 27,
        FiniArraySz = 28,
        RunPath = 29,
        Flags = 30,
        Encoding = 32,
        PreinitArraySz = 33,
        GnuHash = 0x6fff_fef5,
        VerSym = 0x6fff_fff0,
        RelaCount = 0x6fff_fff9,
        RelCount = 0x6fff_fffa,
        Flags1 = 0x6fff_fffb,
        VerDef = 0x6fff_fffc,
        VerDefNum = 0x6fff_fffd,
        VerNeed = 0x6fff_fffe,
        VerNeedNum = 0x6fff_ffff,
    }
}

/// True when `d_tag`'s union member is conventionally read as `d_ptr`
/// (an address) rather than `d_val` (a plain integer). Tags absent from
/// this table default to `d_val`; the raw 4 bytes round-trip identically
/// either way, this only picks which accessor name is natural.
pub fn carries_pointer(tag: DynTag) -> bool {
    matches!(
        tag,
        DynTag::PltGot
            | DynTag::Hash
            | DynTag::StrTab
            | DynTag::SymTab
            | DynTag::Rela
            | DynTag::Rel
            | DynTag::Init
            | DynTag::Fini
            | DynTag::JmpRel
            | DynTag::InitArray
            | DynTag::FiniArray
            | DynTag::GnuHash
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_four_bytes() {
        assert_eq!(DynTag::WIDTH, 4);
    }

    #[test]
    fn encoding_tag_round_trips() {
        let (v, _) = DynTag::decode(&DynTag::Encoding.encode()).unwrap();
        assert_eq!(v, DynTag::Encoding);
    }

    #[test]
    fn pointer_classification_matches_the_design_note_examples() {
        assert!(carries_pointer(DynTag::PltGot));
        assert!(carries_pointer(DynTag::StrTab));
        assert!(!carries_pointer(DynTag::Needed));
        assert!(!carries_pointer(DynTag::StrSz));
        assert!(!carries_pointer(DynTag::SoName));
    }
}
