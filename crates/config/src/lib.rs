use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegionConfig {
    pub name: String,
    pub base: u64,
    pub size: String, // e.g. "4MB"
}

/// Describes the readable address space of the crashed target.
/// Every region listed here is considered safe to dereference; anything
/// outside is reported as unreadable instead of being touched.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MemoryLayout {
    pub name: String,
    pub regions: Vec<RegionConfig>,
}

impl MemoryLayout {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open memory layout at {:?}", path.as_ref()))?;
        let layout: Self =
            serde_yaml::from_reader(f).context("Failed to parse Memory Layout YAML")?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            anyhow::bail!("Memory layout '{}' declares no regions", self.name);
        }

        for region in &self.regions {
            if region.name.trim().is_empty() {
                anyhow::bail!("Region name cannot be empty");
            }

            let size = parse_size(&region.size)
                .with_context(|| format!("Region '{}' has an invalid size", region.name))?;
            if size == 0 {
                anyhow::bail!("Region '{}' has zero size", region.name);
            }

            let end = region.base.checked_add(size);
            if end.map_or(true, |end| end > u32::MAX as u64 + 1) {
                anyhow::bail!(
                    "Region '{}' extends past the 32-bit address space",
                    region.name
                );
            }
        }

        Ok(())
    }
}

pub fn parse_size(size_str: &str) -> Result<u64> {
    use human_size::{Byte, Size, SpecificSize};
    let s: Size = size_str
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid size format: {}", e))?;
    let bytes: SpecificSize<Byte> = s.into();
    Ok(bytes.value() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_layout() {
        let yaml = r#"
name: "console"
regions:
  - name: "rdram"
    base: 0x80000000
    size: "4MiB"
  - name: "stack"
    base: 0x803B0000
    size: "64KiB"
"#;
        let layout: MemoryLayout = serde_yaml::from_str(yaml).unwrap();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.regions.len(), 2);
        assert_eq!(layout.regions[0].base, 0x8000_0000);
    }

    #[test]
    fn test_empty_regions() {
        let yaml = r#"
name: "empty"
regions: []
"#;
        let layout: MemoryLayout = serde_yaml::from_str(yaml).unwrap();
        let err = layout.validate().unwrap_err();
        assert!(err.to_string().contains("no regions"));
    }

    #[test]
    fn test_invalid_size() {
        let yaml = r#"
name: "bad"
regions:
  - name: "rdram"
    base: 0x80000000
    size: "lots"
"#;
        let layout: MemoryLayout = serde_yaml::from_str(yaml).unwrap();
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_region_past_address_space() {
        let yaml = r#"
name: "bad"
regions:
  - name: "high"
    base: 0xFFFFF000
    size: "64KiB"
"#;
        let layout: MemoryLayout = serde_yaml::from_str(yaml).unwrap();
        let err = layout.validate().unwrap_err();
        assert!(err.to_string().contains("32-bit address space"));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("4MB").unwrap(), 4_000_000);
        assert_eq!(parse_size("64KiB").unwrap(), 65_536);
        assert!(parse_size("banana").is_err());
    }
}
