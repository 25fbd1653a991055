//! The assembly engine: computes offsets/sizes and emits a serialized file
//! from a [`Elf`] container, and the inverse deserializer.

use crate::container::{Elf, Payload};
use crate::enums::section::ShType;
use crate::error::{Error, Result};
use crate::header::ehdr::{self, ElfHeader};
use crate::header::phdr::{self, ProgramHeader};
use crate::header::shdr::{self, SectionHeader};
use crate::primitive;
use std::collections::HashMap;

fn write_xor(buffer: &mut [u8], offset: usize, bytes: &[u8]) {
    let slice = &mut buffer[offset..offset + bytes.len()];
    let xored = primitive::bytes_xor(slice, bytes);
    slice.copy_from_slice(&xored);
}

/// Recomputes every derived offset/count in `container.header` and in its
/// section/program headers, rewrites `p_offset` for every segment bound to
/// a section (the REDESIGN FLAG pass), and emits the resulting bytes.
///
/// This mutates `container` in place: after `serialize` returns, the
/// container's own headers hold the same offsets that were just written.
pub fn serialize(container: &mut Elf) -> Vec<u8> {
    let little = container.little();
    let mut cursor = ehdr::SIZE;

    let Elf {
        header,
        program_headers,
        section_headers,
        payloads,
        segment_bindings,
    } = container;

    if program_headers.is_empty() {
        header.phoff = 0;
        header.phentsize = 0;
        header.phnum = 0;
    } else {
        header.phoff = cursor as u32;
        header.phentsize = phdr::SIZE as u16;
        header.phnum = program_headers.len() as u16;
        cursor += phdr::SIZE * program_headers.len();
    }

    if section_headers.is_empty() {
        header.shoff = 0;
        header.shentsize = 0;
        header.shnum = 0;
    } else {
        header.shoff = cursor as u32;
        header.shentsize = shdr::SIZE as u16;
        header.shnum = section_headers.len() as u16;
        cursor += shdr::SIZE * section_headers.len();
    }

    for (i, shdr) in section_headers.iter_mut().enumerate() {
        let payload = &payloads[i];
        let size = payload.len() as u32;
        if payload.is_empty() || shdr.sh_type == ShType::NoBits {
            shdr.sh_offset = 0;
            shdr.sh_size = size;
            continue;
        }
        shdr.sh_offset = cursor as u32;
        shdr.sh_size = size;
        log::debug!("assigned sh_offset {} to section {i}", shdr.sh_offset);
        cursor += size as usize;
    }

    for (&ph_idx, &sec_idx) in segment_bindings.iter() {
        if let (Some(ph), Some(sh)) = (
            program_headers.get_mut(ph_idx),
            section_headers.get(sec_idx),
        ) {
            ph.p_offset = sh.sh_offset;
            log::debug!("rewrote p_offset of segment {ph_idx} to {} (bound to section {sec_idx})", sh.sh_offset);
        }
    }

    let mut buffer = vec![0u8; cursor];
    write_xor(&mut buffer, 0, &header.encode());
    for (i, ph) in program_headers.iter().enumerate() {
        write_xor(
            &mut buffer,
            header.phoff as usize + i * phdr::SIZE,
            &ph.encode(little),
        );
    }
    for (i, sh) in section_headers.iter().enumerate() {
        write_xor(
            &mut buffer,
            header.shoff as usize + i * shdr::SIZE,
            &sh.encode(little),
        );
    }
    for (i, sh) in section_headers.iter().enumerate() {
        let payload = &payloads[i];
        if payload.is_empty() {
            continue;
        }
        write_xor(&mut buffer, sh.sh_offset as usize, &payload.encode(little));
    }
    buffer
}

/// Rebuilds a container from a serialized file, under strict deserialization
/// (see [`deserialize_with`]). Payloads always come back opaque; upgrade
/// them to a typed payload via the façade or `Payload::upgrade_to_*` as
/// needed.
pub fn deserialize(bytes: &[u8]) -> Result<Elf> {
    deserialize_with(bytes, crate::Options::default())
}

/// Rebuilds a container from a serialized file. Under `options.strict`, a
/// section whose `sh_offset`/`sh_size` runs past the end of `bytes` is a
/// hard `Error::ShortInput`; otherwise the payload is truncated to whatever
/// bytes are actually available and a warning is logged.
pub fn deserialize_with(bytes: &[u8], options: crate::Options) -> Result<Elf> {
    let (header, _) = ElfHeader::decode(bytes)?;
    let little = header.little();

    let mut program_headers = Vec::with_capacity(header.phnum as usize);
    for i in 0..header.phnum as usize {
        let offset = header.phoff as usize + i * phdr::SIZE;
        let slice = bytes.get(offset..).unwrap_or(&[]);
        let (ph, _) = ProgramHeader::decode(slice, little)?;
        program_headers.push(ph);
    }

    let mut section_headers = Vec::with_capacity(header.shnum as usize);
    for i in 0..header.shnum as usize {
        let offset = header.shoff as usize + i * shdr::SIZE;
        let slice = bytes.get(offset..).unwrap_or(&[]);
        let (sh, _) = SectionHeader::decode(slice, little)?;
        section_headers.push(sh);
    }

    let mut payloads = Vec::with_capacity(section_headers.len());
    for sh in &section_headers {
        if sh.sh_type == ShType::NoBits || sh.sh_size == 0 {
            payloads.push(Payload::Bytes(Vec::new()));
            continue;
        }
        let start = sh.sh_offset as usize;
        let end = start + sh.sh_size as usize;
        if end > bytes.len() {
            if options.strict {
                return Err(Error::ShortInput {
                    needed: sh.sh_size as usize,
                    available: bytes.len().saturating_sub(start),
                });
            }
            log::warn!(
                "section payload at offset {start} truncated: wanted {} bytes, {} available",
                sh.sh_size,
                bytes.len().saturating_sub(start)
            );
            let clamped_start = start.min(bytes.len());
            payloads.push(Payload::Bytes(bytes[clamped_start..].to_vec()));
            continue;
        }
        payloads.push(Payload::Bytes(bytes[start..end].to_vec()));
    }

    Ok(Elf {
        header,
        program_headers,
        section_headers,
        payloads,
        segment_bindings: HashMap::new(),
    })
}
