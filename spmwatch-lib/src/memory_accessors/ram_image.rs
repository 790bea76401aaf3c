use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use tracing::debug;

use super::{mem1_offset, MemoryAccessor, MEM1_SIZE};

/// MEM1 held in host memory, either blank or loaded from a dump file.
///
/// It is always hooked, which makes it usable for offline edits of a
/// `mem1.raw` dump as well as a deterministic stand-in for a live process.
pub struct RamImage {
    ram: Vec<u8>,
}

impl RamImage {
    pub fn new() -> Self {
        Self {
            ram: vec![0; MEM1_SIZE],
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let mut ram =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        if ram.len() > MEM1_SIZE {
            bail!(
                "{} is {:#x} bytes, larger than MEM1 ({:#x})",
                path.display(),
                ram.len(),
                MEM1_SIZE
            );
        }
        if ram.len() < MEM1_SIZE {
            debug!("padding {} from {:#x} bytes", path.display(), ram.len());
            ram.resize(MEM1_SIZE, 0);
        }
        Ok(Self { ram })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.ram).with_context(|| format!("failed to write {}", path.display()))
    }
}

impl Default for RamImage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAccessor for RamImage {
    fn hook(&mut self) -> Result<()> {
        Ok(())
    }

    fn unhook(&mut self) {}

    fn is_hooked(&self) -> bool {
        true
    }

    fn read(&self, address: u32, buffer: &mut [u8]) -> Result<()> {
        let offset = mem1_offset(address, buffer.len())?;
        buffer.copy_from_slice(&self.ram[offset..offset + buffer.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, buffer: &[u8]) -> Result<()> {
        let offset = mem1_offset(address, buffer.len())?;
        self.ram[offset..offset + buffer.len()].copy_from_slice(buffer);
        Ok(())
    }
}
