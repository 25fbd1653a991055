//! `e_machine`: target instruction-set architecture.
//!
//! The full ABI list runs into the hundreds; this carries the
//! architectures that actually show up in the wild, matching the breadth
//! the teacher crate's own `ElfMachine` enum covers. Anything else
//! round-trips through `Unknown(raw)`.

crate::elf_enum! {
    pub enum ElfMachine {
        None = 0,
        M32 = 1,
        Sparc = 2,
        I386 = 3,
        M68K = 4,
        M88K = 5,
        I860 = 7,
        Mips = 8,
        S370 = 9,
        MipsRs3Le = 10,
        PaRisc = 15,
        SparC32Plus = 18,
        PpC = 20,
        PpC64 = 21,
        S390 = 22,
        Arm = 40,
        Sh = 42,
        SparcV9 = 43,
        Ia64 = 50,
        X8664 = 62,
        Vax = 75,
        Cris = 76,
        Avr = 83,
        FR30 = 84,
        M32R = 88,
        Blackfin = 106,
        AlteraNios2 = 113,
        TileGx = 191,
        Aarch64 = 183,
        Tilepro = 188,
        Riscv = 243,
        Bpf = 247,
        Csky = 252,
        LoongArch = 258,
    }
}
