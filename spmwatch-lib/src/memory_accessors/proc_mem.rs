use std::{
    fs::{self, File, OpenOptions},
    os::unix::fs::FileExt,
};

use anyhow::{Context, Result};
use tracing::debug;

use super::{mem1_offset, EngineError, MemoryAccessor, MEM1_MAPPING_SIZE};

const SHM_PREFIXES: [&str; 2] = ["/dev/shm/dolphinmem", "/dev/shm/dolphin-emu"];

fn find_process_id(comm: &str) -> Result<u32> {
    for entry in fs::read_dir("/proc")? {
        let entry = entry?;
        let Some(pid) = entry
            .file_name()
            .to_str()
            .and_then(|x| x.parse::<u32>().ok())
        else {
            continue;
        };
        let Ok(current) = fs::read_to_string(entry.path().join("comm")) else {
            continue;
        };
        if current.trim_end() == comm {
            return Ok(pid);
        }
    }
    Err(EngineError::ProcessNotFound(comm.to_owned()).into())
}

/// Returns the start of the shared-memory view backing MEM1, given one line
/// of `/proc/<pid>/maps`.
fn parse_mem1_mapping(line: &str) -> Option<u64> {
    let mut fields = line.split_whitespace();
    let range = fields.next()?;
    let offset = fields.nth(1)?;
    let path = fields.nth(2)?;
    if !SHM_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return None;
    }
    if u64::from_str_radix(offset, 16).ok()? != 0 {
        return None;
    }
    let (start, end) = range.split_once('-')?;
    let start = u64::from_str_radix(start, 16).ok()?;
    let end = u64::from_str_radix(end, 16).ok()?;
    (end.checked_sub(start)? == MEM1_MAPPING_SIZE as u64).then_some(start)
}

struct Hooked {
    mem: File,
    mem1: u64,
}

/// A Dolphin process attached through `/proc/<pid>/mem`.
pub struct ProcMem {
    comm: String,
    hooked: Option<Hooked>,
}

impl ProcMem {
    pub fn new(comm: &str) -> Self {
        Self {
            comm: comm.to_owned(),
            hooked: None,
        }
    }

    fn hooked(&self) -> Result<&Hooked, EngineError> {
        self.hooked.as_ref().ok_or(EngineError::NotHooked)
    }
}

impl MemoryAccessor for ProcMem {
    fn hook(&mut self) -> Result<()> {
        if self.hooked.is_some() {
            return Ok(());
        }
        let pid = find_process_id(&self.comm)?;
        let maps = fs::read_to_string(format!("/proc/{}/maps", pid))
            .with_context(|| format!("failed to read maps of pid {}", pid))?;
        let mem1 = maps
            .lines()
            .find_map(parse_mem1_mapping)
            .ok_or(EngineError::RamNotFound(pid))?;
        let mem = OpenOptions::new()
            .read(true)
            .write(true)
            .open(format!("/proc/{}/mem", pid))
            .with_context(|| format!("failed to open memory of pid {}", pid))?;
        debug!("pid {} maps MEM1 at {:#x}", pid, mem1);
        self.hooked = Some(Hooked { mem, mem1 });
        Ok(())
    }

    fn unhook(&mut self) {
        if self.hooked.take().is_some() {
            debug!("unhooked from {}", self.comm);
        }
    }

    fn is_hooked(&self) -> bool {
        self.hooked.is_some()
    }

    fn read(&self, address: u32, buffer: &mut [u8]) -> Result<()> {
        let hooked = self.hooked()?;
        let offset = mem1_offset(address, buffer.len())?;
        hooked
            .mem
            .read_exact_at(buffer, hooked.mem1 + offset as u64)
            .with_context(|| format!("failed to read {:#010x}", address))
    }

    fn write(&mut self, address: u32, buffer: &[u8]) -> Result<()> {
        let hooked = self.hooked()?;
        let offset = mem1_offset(address, buffer.len())?;
        hooked
            .mem
            .write_all_at(buffer, hooked.mem1 + offset as u64)
            .with_context(|| format!("failed to write {:#010x}", address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_mem1_view_in_maps() {
        let line = "7f3a40000000-7f3a42000000 rw-s 00000000 00:19 1047 /dev/shm/dolphin-emu.4242 (deleted)";
        assert_eq!(parse_mem1_mapping(line), Some(0x7f3a_4000_0000));
    }

    #[test]
    fn ignores_other_mappings() {
        let wrong_size = "7f3a40000000-7f3a41000000 rw-s 00000000 00:19 1047 /dev/shm/dolphin-emu.4242";
        let wrong_offset = "7f3a40000000-7f3a42000000 rw-s 02000000 00:19 1047 /dev/shm/dolphin-emu.4242";
        let anonymous = "7f3a40000000-7f3a42000000 rw-p 00000000 00:00 0";
        let library = "7f3a40000000-7f3a42000000 r-xp 00000000 08:01 77 /usr/lib/libc.so.6";
        for line in [wrong_size, wrong_offset, anonymous, library] {
            assert_eq!(parse_mem1_mapping(line), None, "{}", line);
        }
    }

    #[test]
    fn unhooked_access_fails() {
        let memory = ProcMem::new("dolphin-emu");
        let err = memory.read_byte(0x8000_0000).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::NotHooked)
        ));
    }
}
