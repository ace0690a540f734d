use anyhow::{anyhow, Context, Result};
use faultview_core::memory::Segment;
use faultview_core::snapshot::ExceptionSnapshot;
use faultview_core::symbols::{SymbolEntry, SymbolTable};
use goblin::elf::program_header::PT_LOAD;
use goblin::elf::sym::{STT_FUNC, STT_OBJECT};
use goblin::elf::Elf;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Extract the loadable segments of the crashed program's ELF so the memory
/// reader can serve reads against the same bytes the target ran.
pub fn load_segments(path: &Path) -> Result<Vec<Segment>> {
    let buffer = fs::read(path).with_context(|| format!("Failed to read ELF file: {:?}", path))?;

    let elf = Elf::parse(&buffer).context("Failed to parse ELF binary")?;

    let mut segments = Vec::new();

    for ph in elf.program_headers {
        if ph.p_type == PT_LOAD {
            let start_addr = ph.p_vaddr;
            let size = ph.p_filesz as usize;
            let offset = ph.p_offset as usize;

            if size == 0 {
                continue;
            }

            debug!(
                "Found loadable segment: Addr={:#x}, Size={} bytes, Offset={:#x}",
                start_addr, size, offset
            );

            if offset + size > buffer.len() {
                return Err(anyhow!("Segment out of bounds in ELF file"));
            }

            segments.push(Segment {
                start_addr: start_addr as u32,
                data: buffer[offset..offset + size].to_vec(),
            });
        }
    }

    if segments.is_empty() {
        warn!("No loadable segments found in ELF file");
    }

    Ok(segments)
}

/// Build the address-sorted symbol table from the ELF symtab. Only named
/// function and object symbols are kept; everything else is noise for
/// address annotation.
pub fn load_symbols(path: &Path) -> Result<SymbolTable> {
    let buffer =
        fs::read(path).with_context(|| format!("Failed to read ELF for symbols: {:?}", path))?;

    let elf = Elf::parse(&buffer).context("Failed to parse ELF for symbols")?;

    let mut entries = Vec::new();

    for sym in elf.syms.iter() {
        if sym.st_name == 0 {
            continue;
        }
        if sym.st_type() != STT_FUNC && sym.st_type() != STT_OBJECT {
            continue;
        }

        let Some(name) = elf.strtab.get_at(sym.st_name) else {
            continue;
        };

        entries.push(SymbolEntry {
            addr: sym.st_value as u32,
            size: sym.st_size as u32,
            name: name.to_string(),
        });
    }

    let table = SymbolTable::new(entries);

    if table.is_empty() {
        warn!("No usable symbols found in ELF file");
    } else {
        info!("Loaded {} symbols", table.len());
    }

    Ok(table)
}

/// Read a captured exception snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<ExceptionSnapshot> {
    let f = std::fs::File::open(path)
        .with_context(|| format!("Failed to open snapshot at {:?}", path))?;
    let snapshot: ExceptionSnapshot =
        serde_json::from_reader(f).context("Failed to parse snapshot JSON")?;
    Ok(snapshot)
}
