//! Fixed-layout records for the ELF header, program header, and section
//! header.

pub mod ehdr;
pub mod ident;
pub mod phdr;
pub mod shdr;
