//! Crate-wide error type.

use std::io::ErrorKind;

/// Error type for errors during ELF object handling.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("value is not one of the accepted representations for this constructor")]
    WrongType,
    #[error("{name} is not a known variant name for this enum")]
    UnknownEnumName { name: String },
    #[error("only ELFCLASS32 is supported, got class value {class}")]
    UnsupportedClass { class: u8 },
    #[error("operation requires an executable or shared-object ELF type")]
    WrongElfType,
    #[error("binding/type/visibility value {value} does not fit its field")]
    WrongEnumType { value: u32 },
    #[error("no section named {name:?} in .shstrtab")]
    SectionNotFound { name: String },
    #[error("section-header list and payload list have different lengths ({headers} vs {payloads})")]
    InconsistentContainer { headers: usize, payloads: usize },
    #[error("name {name:?} found in .shstrtab but no section header refers to offset {offset}")]
    Corrupted { name: String, offset: u32 },
    #[error("{name:?} is not a recognized special section")]
    UnsupportedSpecialSection { name: String },
    #[error("expected at least {needed} bytes, found {available}")]
    ShortInput { needed: usize, available: usize },
    #[error("string {value:?} contains an interior NUL byte")]
    InvalidString { value: String },
    #[error("I/O error: {kind}")]
    Io { kind: ErrorKind },
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io { kind: e.kind() }
    }
}

/// Crate-local `Result` alias.
pub type Result<T> = std::result::Result<T, Error>;
