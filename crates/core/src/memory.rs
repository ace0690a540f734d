use crate::{CoreError, CoreResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub start_addr: u32,
    pub data: Vec<u8>,
}

/// One contiguous readable span of the crashed address space.
#[derive(Debug)]
pub struct MemoryRegion {
    pub name: String,
    pub base: u32,
    pub data: Vec<u8>,
}

impl MemoryRegion {
    pub fn new(name: impl Into<String>, base: u32, size: usize) -> Self {
        Self {
            name: name.into(),
            base,
            data: vec![0; size],
        }
    }

    pub fn end(&self) -> u64 {
        self.base as u64 + self.data.len() as u64
    }

    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.base && (addr as u64) < self.end()
    }
}

/// Bounds-checked view of the crashed process's memory.
///
/// Every read validates the address against the region table before touching
/// storage, so a bad address comes back as `None` instead of a second-level
/// fault. Callers render a placeholder and move on.
#[derive(Debug, Default)]
pub struct MemoryMap {
    regions: Vec<MemoryRegion>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// RDRAM only, zero-filled. Used when no layout descriptor is given.
    pub fn with_default_regions() -> Self {
        let mut map = Self::new();
        map.add_region(MemoryRegion::new("rdram", 0x8000_0000, 4 * 1024 * 1024))
            .expect("default region table is overlap-free");
        map
    }

    pub fn from_layout(layout: &faultview_config::MemoryLayout) -> Result<Self> {
        let mut map = Self::new();
        for region in &layout.regions {
            let size = faultview_config::parse_size(&region.size)
                .with_context(|| format!("Region '{}' has an invalid size", region.name))?;
            map.add_region(MemoryRegion::new(
                region.name.clone(),
                region.base as u32,
                size as usize,
            ))?;
        }
        Ok(map)
    }

    pub fn add_region(&mut self, region: MemoryRegion) -> CoreResult<()> {
        for existing in &self.regions {
            if (region.base as u64) < existing.end() && (existing.base as u64) < region.end() {
                return Err(CoreError::RegionOverlap {
                    name: region.name,
                    base: existing.base,
                });
            }
        }
        self.regions.push(region);
        Ok(())
    }

    pub fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    /// Copy a captured segment into whichever region fully contains it.
    /// Returns false when no region does; the caller decides how loud to be.
    pub fn load_segment(&mut self, segment: &Segment) -> bool {
        let seg_end = segment.start_addr as u64 + segment.data.len() as u64;
        for region in &mut self.regions {
            if segment.start_addr >= region.base && seg_end <= region.end() {
                let offset = (segment.start_addr - region.base) as usize;
                region.data[offset..offset + segment.data.len()].copy_from_slice(&segment.data);
                return true;
            }
        }
        false
    }

    pub fn try_read_byte(&self, addr: u32) -> Option<u8> {
        let region = self.regions.iter().find(|r| r.contains(addr))?;
        Some(region.data[(addr - region.base) as usize])
    }

    /// Word reads are aligned and big-endian, matching the MIPS targets
    /// these snapshots come from. Misaligned or unmapped addresses would
    /// have re-faulted on hardware; here they return `None`.
    pub fn try_read_word(&self, addr: u32) -> Option<u32> {
        if addr % 4 != 0 {
            return None;
        }
        let region = self.regions.iter().find(|r| r.contains(addr))?;
        if (addr as u64) + 4 > region.end() {
            return None;
        }
        let offset = (addr - region.base) as usize;
        let bytes = &region.data[offset..offset + 4];
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
