#[cfg(target_os = "windows")]
mod external_process;
#[cfg(target_os = "linux")]
mod proc_mem;
mod ram_image;

use std::{thread::sleep, time::Duration};

use anyhow::Result;
use tracing::{debug, info};

#[cfg(target_os = "windows")]
pub use external_process::ExternalProcess;
#[cfg(target_os = "linux")]
pub use proc_mem::ProcMem;
pub use ram_image::RamImage;

/// Emulated address of the first byte of MEM1.
pub const MEM1_START: u32 = 0x8000_0000;
/// Size of MEM1 as seen by the game.
pub const MEM1_SIZE: usize = 0x0180_0000;
/// Size of the host mapping Dolphin reserves for MEM1.
pub const MEM1_MAPPING_SIZE: usize = 0x0200_0000;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("not hooked to the emulator")]
    NotHooked,
    #[error("process not found: {0}")]
    ProcessNotFound(String),
    #[error("emulated RAM not found in process {0}")]
    RamNotFound(u32),
    #[error("invalid address: {address:#010x} (+{len:#x})")]
    InvalidAddress { address: u32, len: usize },
    #[error("transferred {actual} of {expected} bytes at {address:#010x}")]
    ShortTransfer {
        address: u32,
        expected: usize,
        actual: usize,
    },
}

/// Translates an emulated MEM1 range into an offset from the start of MEM1.
pub fn mem1_offset(address: u32, len: usize) -> Result<usize, EngineError> {
    let invalid = || EngineError::InvalidAddress { address, len };
    let offset = address.checked_sub(MEM1_START).ok_or_else(invalid)? as usize;
    let end = offset.checked_add(len).ok_or_else(invalid)?;
    if end > MEM1_SIZE {
        return Err(invalid());
    }
    Ok(offset)
}

/// Raw access to the emulated RAM of a running game.
///
/// Implementors provide hooking and the two byte-slice primitives; the typed
/// helpers decode values in the console's big-endian byte order.
pub trait MemoryAccessor {
    fn hook(&mut self) -> Result<()>;
    fn unhook(&mut self);
    fn is_hooked(&self) -> bool;

    fn read(&self, address: u32, buffer: &mut [u8]) -> Result<()>;
    fn write(&mut self, address: u32, buffer: &[u8]) -> Result<()>;

    fn read_byte(&self, address: u32) -> Result<u8> {
        let mut buffer = [0; 1];
        self.read(address, &mut buffer)?;
        Ok(buffer[0])
    }

    fn write_byte(&mut self, address: u32, value: u8) -> Result<()> {
        self.write(address, &[value])
    }

    fn read_word(&self, address: u32) -> Result<u32> {
        let mut buffer = [0; 4];
        self.read(address, &mut buffer)?;
        Ok(u32::from_be_bytes(buffer))
    }

    fn write_word(&mut self, address: u32, value: u32) -> Result<()> {
        self.write(address, &value.to_be_bytes())
    }

    fn read_float(&self, address: u32) -> Result<f32> {
        let mut buffer = [0; 4];
        self.read(address, &mut buffer)?;
        Ok(f32::from_be_bytes(buffer))
    }

    fn write_float(&mut self, address: u32, value: f32) -> Result<()> {
        self.write(address, &value.to_be_bytes())
    }

    fn read_double(&self, address: u32) -> Result<f64> {
        let mut buffer = [0; 8];
        self.read(address, &mut buffer)?;
        Ok(f64::from_be_bytes(buffer))
    }

    fn write_double(&mut self, address: u32, value: f64) -> Result<()> {
        self.write(address, &value.to_be_bytes())
    }

    fn read_bytes(&self, address: u32, len: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0; len];
        self.read(address, &mut buffer)?;
        Ok(buffer)
    }

    fn write_bytes(&mut self, address: u32, bytes: &[u8]) -> Result<()> {
        self.write(address, bytes)
    }
}

fn try_hook<M: MemoryAccessor + ?Sized>(memory: &mut M) -> bool {
    if let Err(err) = memory.hook() {
        debug!("hook failed: {}", err);
    }
    memory.is_hooked()
}

/// Blocks until `memory` is hooked, retrying every `interval`.
pub fn wait_for_hook<M: MemoryAccessor + ?Sized>(memory: &mut M, interval: Duration) {
    if !try_hook(memory) {
        info!("Not hooked, waiting for connection to Dolphin");
        while !try_hook(memory) {
            sleep(interval);
        }
    }
    info!("Hooked");
}
