//! Convenience operations for constructing and editing an [`Elf`] container
//! without hand-assembling every header field.

use std::path::Path;

use crate::assemble;
use crate::container::{Elf, Payload};
use crate::dynarray::DynamicArray;
use crate::enums::class::{ElfClass, ElfDataEncoding};
use crate::enums::machine::ElfMachine;
use crate::enums::object_type::ElfType;
use crate::enums::section::ShType;
use crate::enums::segment::{PFlags, PType};
use crate::enums::symbol::{SymBind, SymType, SymVisibility};
use crate::error::{Error, Result};
use crate::header::ehdr::ElfHeader;
use crate::header::ident::Identification;
use crate::header::phdr::ProgramHeader;
use crate::header::shdr::SectionHeader;
use crate::strtab::StringTable;
use crate::symtab::{Symbol, SymbolTable};

const SHSTRTAB_INDEX: usize = 1;

fn new_impl(
    class: ElfClass,
    data: ElfDataEncoding,
    e_type: ElfType,
    machine: ElfMachine,
    with_placeholder_segment: bool,
) -> Result<Elf> {
    if !matches!(class, ElfClass::Elf32) {
        return Err(Error::UnsupportedClass {
            class: class.to_raw() as u8,
        });
    }

    let header = ElfHeader::builder()
        .identification(Identification::builder().class(class).data(data).build())
        .e_type(e_type)
        .machine(machine)
        .shstrndx(SHSTRTAB_INDEX as u16)
        .build();

    let mut shstrtab = StringTable::new();
    shstrtab.append(".shstrtab")?;

    let section_headers = vec![
        SectionHeader::builder().build(),
        SectionHeader::builder().sh_type(ShType::StrTab).build(),
    ];
    let payloads = vec![Payload::Bytes(Vec::new()), Payload::StringTable(shstrtab)];

    let mut program_headers = Vec::new();
    if with_placeholder_segment && e_type.accepts_segments() {
        program_headers.push(
            ProgramHeader::builder()
                .p_type(PType::Load)
                .p_flags(PFlags::R | PFlags::X)
                .build(),
        );
    }

    Ok(Elf {
        header,
        program_headers,
        section_headers,
        payloads,
        segment_bindings: Default::default(),
    })
}

/// Builds a container with the UNDEF section, a `.shstrtab` containing its
/// own name, and (for `EXEC`/`DYN` types) a placeholder `PT_LOAD` segment.
pub fn new(
    class: ElfClass,
    data: ElfDataEncoding,
    e_type: ElfType,
    machine: ElfMachine,
) -> Result<Elf> {
    new_impl(class, data, e_type, machine, true)
}

/// Like [`new`] but never inserts the placeholder segment, for callers who
/// will add their own from the start (see DESIGN.md's Open Question
/// resolution).
pub fn new_unlinked(
    class: ElfClass,
    data: ElfDataEncoding,
    e_type: ElfType,
    machine: ElfMachine,
) -> Result<Elf> {
    new_impl(class, data, e_type, machine, false)
}

/// Appends `name` to `.shstrtab` and a new `SHT_PROGBITS` section carrying
/// `data`. Returns the new section's index.
pub fn append_section(container: &mut Elf, name: &str, data: Vec<u8>, addr: u32) -> Result<usize> {
    if container.section_headers.len() != container.payloads.len() {
        return Err(Error::InconsistentContainer {
            headers: container.section_headers.len(),
            payloads: container.payloads.len(),
        });
    }

    let shstrtab_index = container.shstrtab_index();
    let name_offset = container.payloads[shstrtab_index]
        .as_string_table_mut()
        .expect("shstrtab index always names a string table")
        .append(name)?;

    let header = SectionHeader::builder()
        .sh_name(name_offset)
        .sh_type(ShType::ProgBits)
        .sh_addr(addr)
        .sh_addralign(1)
        .sh_size(data.len() as u32)
        .build();

    container.section_headers.push(header);
    container.payloads.push(Payload::Bytes(data));
    Ok(container.section_headers.len() - 1)
}

/// Appends the empty `.strtab` or `.symtab` special section. Fails with
/// `UnsupportedSpecialSection` for any other name.
pub fn append_special_section(container: &mut Elf, name: &str) -> Result<usize> {
    match name {
        ".strtab" => {
            let shstrtab_index = container.shstrtab_index();
            let name_offset = container.payloads[shstrtab_index]
                .as_string_table_mut()
                .expect("shstrtab index always names a string table")
                .append(name)?;
            let header = SectionHeader::builder()
                .sh_name(name_offset)
                .sh_type(ShType::StrTab)
                .build();
            container.section_headers.push(header);
            container
                .payloads
                .push(Payload::StringTable(StringTable::new()));
            Ok(container.section_headers.len() - 1)
        }
        ".symtab" => {
            let strtab_index = find_section_index(container, ".strtab")?;
            let shstrtab_index = container.shstrtab_index();
            let name_offset = container.payloads[shstrtab_index]
                .as_string_table_mut()
                .expect("shstrtab index always names a string table")
                .append(name)?;
            let header = SectionHeader::builder()
                .sh_name(name_offset)
                .sh_type(ShType::SymTab)
                .sh_link(strtab_index as u32)
                .sh_addralign(4)
                .sh_entsize(crate::symtab::ENTRY_SIZE as u32)
                .build();
            container.section_headers.push(header);
            container
                .payloads
                .push(Payload::SymbolTable(SymbolTable::new()));
            Ok(container.section_headers.len() - 1)
        }
        other => Err(Error::UnsupportedSpecialSection {
            name: other.to_string(),
        }),
    }
}

/// Looks a section's index up by name in `.shstrtab`, upgrading it from an
/// opaque payload to a typed string table first if the container just came
/// out of `assemble::deserialize` (matching `append_section`'s similar
/// `.shstrtab`-upgrading writes).
fn find_section_index(container: &mut Elf, name: &str) -> Result<usize> {
    let shstrtab = container
        .shstrtab_mut()
        .ok_or_else(|| Error::SectionNotFound {
            name: name.to_string(),
        })?;
    let offset = shstrtab.find(name).ok_or_else(|| Error::SectionNotFound {
        name: name.to_string(),
    })?;
    container
        .section_headers
        .iter()
        .position(|sh| sh.sh_name == offset)
        .ok_or_else(|| Error::Corrupted {
            name: name.to_string(),
            offset,
        })
}

/// Looks a section up by name via `.shstrtab`. Returns its index, header,
/// and payload. Takes `&mut Elf` since a `.shstrtab` still holding its raw
/// deserialized bytes is upgraded to a typed string table on the way.
pub fn get_section_by_name<'a>(
    container: &'a mut Elf,
    name: &str,
) -> Result<(usize, &'a SectionHeader, &'a Payload)> {
    let index = find_section_index(container, name)?;
    Ok((
        index,
        &container.section_headers[index],
        &container.payloads[index],
    ))
}

/// Appends a `PT_LOAD` segment bound to `section_id`, whose `p_offset` will
/// be rewritten to that section's final `sh_offset` at serialization time.
/// Only valid for `EXEC`/`DYN` object types.
pub fn append_segment(
    container: &mut Elf,
    section_id: usize,
    addr: Option<u32>,
    mem_size: Option<u32>,
    flags: &str,
) -> Result<usize> {
    if !container.header.e_type.accepts_segments() {
        return Err(Error::WrongElfType);
    }
    let section = container
        .section_headers
        .get(section_id)
        .ok_or(Error::SectionNotFound {
            name: format!("section index {section_id}"),
        })?;
    let addr = addr.unwrap_or(section.sh_addr);
    let mem_size = mem_size.unwrap_or(section.sh_size);
    let filesz = section.sh_size;

    let ph = ProgramHeader::builder()
        .p_type(PType::Load)
        .p_offset(0)
        .p_vaddr(addr)
        .p_paddr(0)
        .p_filesz(filesz)
        .p_memsz(mem_size)
        .p_flags(PFlags::from_rwx(flags))
        .p_align(1)
        .build();
    container.program_headers.push(ph);
    let index = container.program_headers.len() - 1;
    container.segment_bindings.insert(index, section_id);
    Ok(index)
}

/// Ensures `.strtab`/`.symtab` exist, appends `name` to `.strtab`, and
/// appends the resulting symbol to `.symtab`.
#[allow(clippy::too_many_arguments)]
pub fn append_symbol(
    container: &mut Elf,
    name: &str,
    section_index: u16,
    offset: u32,
    size: u32,
    binding: SymBind,
    kind: SymType,
    visibility: SymVisibility,
) -> Result<usize> {
    let strtab_index = match find_section_index(container, ".strtab") {
        Ok(i) => i,
        Err(Error::SectionNotFound { .. }) => append_special_section(container, ".strtab")?,
        Err(e) => return Err(e),
    };
    let symtab_index = match find_section_index(container, ".symtab") {
        Ok(i) => i,
        Err(Error::SectionNotFound { .. }) => append_special_section(container, ".symtab")?,
        Err(e) => return Err(e),
    };

    let name_offset = if name.is_empty() {
        0
    } else {
        container.payloads[strtab_index]
            .as_string_table_mut()
            .expect(".strtab index always names a string table")
            .append(name)?
    };

    let symbol = Symbol::builder()
        .st_name(name_offset)
        .st_value(offset)
        .st_size(size)
        .binding(binding)
        .kind(kind)
        .visibility(visibility)
        .st_shndx(section_index)
        .build();

    let little = container.little();
    let table = container.payloads[symtab_index]
        .as_symbol_table_mut(little)
        .expect(".symtab index always names a symbol table");
    let new_index = table.append(symbol);
    container.section_headers[symtab_index].sh_info = (new_index + 1) as u32;
    Ok(new_index)
}

/// Upgrades the named section's payload to a [`SymbolTable`], decoding its
/// current bytes with the container's own endianness.
pub fn as_symbol_table<'a>(container: &'a mut Elf, section_index: usize) -> Result<&'a mut SymbolTable> {
    let little = container.little();
    container
        .payloads
        .get_mut(section_index)
        .ok_or(Error::SectionNotFound {
            name: format!("section index {section_index}"),
        })?
        .as_symbol_table_mut(little)
        .ok_or(Error::WrongType)
}

/// Upgrades the named section's payload to a [`DynamicArray`], parsing its
/// current bytes with the container's own endianness.
pub fn as_dynamic_array<'a>(container: &'a mut Elf, section_index: usize) -> Result<&'a mut DynamicArray> {
    let little = container.little();
    let payload = container
        .payloads
        .get_mut(section_index)
        .ok_or(Error::SectionNotFound {
            name: format!("section index {section_index}"),
        })?;
    if let Payload::Bytes(bytes) = payload {
        let array = DynamicArray::decode(bytes, little)?;
        *payload = Payload::DynamicArray(array);
    }
    match payload {
        Payload::DynamicArray(a) => Ok(a),
        _ => Err(Error::WrongType),
    }
}

/// Reads an entire file and deserializes it.
pub fn from_file(path: impl AsRef<Path>) -> Result<Elf> {
    let bytes = std::fs::read(path)?;
    assemble::deserialize(&bytes)
}

/// Serializes `container` and writes it to `path`.
pub fn to_file(container: &mut Elf, path: impl AsRef<Path>) -> Result<()> {
    let bytes = assemble::serialize(container);
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::serialize;

    fn fresh_exec_le() -> Elf {
        new(
            ElfClass::Elf32,
            ElfDataEncoding::Lsb,
            ElfType::Executable,
            ElfMachine::None,
        )
        .unwrap()
    }

    #[test]
    fn new_builds_the_documented_skeleton() {
        let container = fresh_exec_le();
        assert_eq!(container.section_headers.len(), 2);
        assert_eq!(container.header.shstrndx, 1);
        assert_eq!(container.program_headers.len(), 1);
        assert_eq!(container.program_headers[0].p_type, PType::Load);
        assert_eq!(container.program_headers[0].p_flags, PFlags::R | PFlags::X);
    }

    #[test]
    fn new_unlinked_skips_the_placeholder_segment() {
        let container = new_unlinked(
            ElfClass::Elf32,
            ElfDataEncoding::Lsb,
            ElfType::Executable,
            ElfMachine::None,
        )
        .unwrap();
        assert!(container.program_headers.is_empty());
    }

    #[test]
    fn rejects_class_64() {
        let err = new(
            ElfClass::Elf64,
            ElfDataEncoding::Lsb,
            ElfType::Executable,
            ElfMachine::None,
        )
        .unwrap_err();
        assert_eq!(err, Error::UnsupportedClass { class: 2 });
    }

    #[test]
    fn append_section_then_lookup_round_trips_data() {
        let mut container = fresh_exec_le();
        let data = b"hello".to_vec();
        let idx = append_section(&mut container, ".data", data.clone(), 0x2000).unwrap();
        let (found_idx, header, payload) = get_section_by_name(&mut container, ".data").unwrap();
        assert_eq!(found_idx, idx);
        assert_eq!(header.sh_size as usize, data.len());
        assert_eq!(payload.as_bytes(true), data);
    }

    #[test]
    fn get_section_by_name_reports_missing_sections() {
        let mut container = fresh_exec_le();
        assert_eq!(
            get_section_by_name(&mut container, ".text").unwrap_err(),
            Error::SectionNotFound {
                name: ".text".to_string()
            }
        );
    }

    #[test]
    fn scenario_symbol_append_produces_expected_entry() {
        let mut container = fresh_exec_le();
        let text_idx = append_section(&mut container, ".text", vec![0u8; 16], 0).unwrap();
        append_symbol(
            &mut container,
            "main",
            text_idx as u16,
            0,
            16,
            SymBind::Global,
            SymType::Func,
            SymVisibility::Default,
        )
        .unwrap();

        let (_, _, strtab_payload) = get_section_by_name(&mut container, ".strtab").unwrap();
        assert_eq!(&strtab_payload.as_bytes(true)[0..6], b"\0main\0");

        let (symtab_idx, symtab_header, symtab_payload) =
            get_section_by_name(&mut container, ".symtab").unwrap();
        let table = match symtab_payload {
            Payload::SymbolTable(t) => t,
            _ => panic!("expected a typed symbol table"),
        };
        assert_eq!(table.len(), 2);
        let main_sym = table.entries()[1];
        assert_eq!(main_sym.st_name, 1);
        assert_eq!(main_sym.st_value, 0);
        assert_eq!(main_sym.st_size, 16);
        assert_eq!(main_sym.st_shndx, text_idx as u16);
        assert_eq!(symtab_header.sh_info, 2);
        let _ = symtab_idx;
    }

    #[test]
    fn scenario_segment_binds_to_section_and_tracks_its_offset() {
        let mut container = fresh_exec_le();
        let text_idx = append_section(&mut container, ".text", vec![0u8; 16], 0).unwrap();
        append_symbol(
            &mut container,
            "main",
            text_idx as u16,
            0,
            16,
            SymBind::Global,
            SymType::Func,
            SymVisibility::Default,
        )
        .unwrap();
        let seg_idx =
            append_segment(&mut container, text_idx, Some(0xDEADBEEF), Some(16), "rx").unwrap();

        assert_eq!(container.program_headers[0].p_type, PType::Load);
        assert_eq!(container.program_headers[seg_idx].p_vaddr, 0xDEADBEEF);
        assert_eq!(container.program_headers[seg_idx].p_filesz, 16);
        assert_eq!(container.program_headers[seg_idx].p_memsz, 16);
        assert_eq!(container.program_headers[seg_idx].p_flags.bits(), 5);

        serialize(&mut container);
        assert_eq!(
            container.program_headers[seg_idx].p_offset,
            container.section_headers[text_idx].sh_offset
        );
    }

    #[test]
    fn append_segment_rejects_non_executable_types() {
        let mut container = new(
            ElfClass::Elf32,
            ElfDataEncoding::Lsb,
            ElfType::Relocatable,
            ElfMachine::None,
        )
        .unwrap();
        let idx = append_section(&mut container, ".text", vec![0u8; 4], 0).unwrap();
        assert_eq!(
            append_segment(&mut container, idx, None, None, "rx").unwrap_err(),
            Error::WrongElfType
        );
    }
}
