use std::{ffi::c_void, mem::size_of};

use anyhow::Result;
use tracing::debug;
use windows::Win32::{
    Foundation::{CloseHandle, FALSE, HANDLE},
    System::{
        Diagnostics::{
            Debug::{ReadProcessMemory, WriteProcessMemory},
            ToolHelp::{
                CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
                TH32CS_SNAPPROCESS,
            },
        },
        Memory::{VirtualQueryEx, MEMORY_BASIC_INFORMATION, MEM_MAPPED},
        Threading::{
            OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_OPERATION, PROCESS_VM_READ,
            PROCESS_VM_WRITE,
        },
    },
};

use super::{mem1_offset, EngineError, MemoryAccessor, MEM1_MAPPING_SIZE};

struct SafeHandle(HANDLE);

impl Drop for SafeHandle {
    fn drop(&mut self) {
        let _ = unsafe { CloseHandle(self.0) };
    }
}

fn find_process_id_in_snapshot(snapshot: &SafeHandle, exe_file: &str) -> Option<u32> {
    let mut pe = PROCESSENTRY32W {
        dwSize: size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };
    if unsafe { Process32FirstW(snapshot.0, &mut pe) }.is_err() {
        return None;
    }
    loop {
        let len = pe
            .szExeFile
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(pe.szExeFile.len());
        let current = String::from_utf16_lossy(&pe.szExeFile[..len]);
        if current.eq_ignore_ascii_case(exe_file) {
            return Some(pe.th32ProcessID);
        }

        if unsafe { Process32NextW(snapshot.0, &mut pe) }.is_err() {
            return None;
        }
    }
}

fn find_process_id(exe_file: &str) -> Result<u32> {
    let snapshot = SafeHandle(unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }?);
    let process_id = find_process_id_in_snapshot(&snapshot, exe_file)
        .ok_or_else(|| EngineError::ProcessNotFound(exe_file.to_owned()))?;
    Ok(process_id)
}

/// Walks the address space of `process` looking for the view Dolphin maps
/// MEM1 into.
fn find_mem1(process: &SafeHandle) -> Option<usize> {
    let mut info = MEMORY_BASIC_INFORMATION::default();
    let mut addr = 0usize;
    loop {
        let len = unsafe {
            VirtualQueryEx(
                process.0,
                Some(addr as *const c_void),
                &mut info,
                size_of::<MEMORY_BASIC_INFORMATION>(),
            )
        };
        if len != size_of::<MEMORY_BASIC_INFORMATION>() {
            return None;
        }
        if info.RegionSize == MEM1_MAPPING_SIZE && info.Type == MEM_MAPPED {
            return Some(info.BaseAddress as usize);
        }
        addr = (info.BaseAddress as usize).checked_add(info.RegionSize)?;
    }
}

struct Hooked {
    process: SafeHandle,
    mem1: usize,
}

/// A Dolphin process attached through `ReadProcessMemory`/`WriteProcessMemory`.
pub struct ExternalProcess {
    exe_file: String,
    hooked: Option<Hooked>,
}

impl ExternalProcess {
    pub fn new(exe_file: &str) -> Self {
        Self {
            exe_file: exe_file.to_owned(),
            hooked: None,
        }
    }

    fn hooked(&self) -> Result<&Hooked, EngineError> {
        self.hooked.as_ref().ok_or(EngineError::NotHooked)
    }
}

impl MemoryAccessor for ExternalProcess {
    fn hook(&mut self) -> Result<()> {
        if self.hooked.is_some() {
            return Ok(());
        }
        let process_id = find_process_id(&self.exe_file)?;
        let process = SafeHandle(unsafe {
            OpenProcess(
                PROCESS_QUERY_INFORMATION
                    | PROCESS_VM_OPERATION
                    | PROCESS_VM_READ
                    | PROCESS_VM_WRITE,
                FALSE,
                process_id,
            )
        }?);
        let mem1 = find_mem1(&process).ok_or(EngineError::RamNotFound(process_id))?;
        debug!("pid {} maps MEM1 at {:#x}", process_id, mem1);
        self.hooked = Some(Hooked { process, mem1 });
        Ok(())
    }

    fn unhook(&mut self) {
        if self.hooked.take().is_some() {
            debug!("unhooked from {}", self.exe_file);
        }
    }

    fn is_hooked(&self) -> bool {
        self.hooked.is_some()
    }

    fn read(&self, address: u32, buffer: &mut [u8]) -> Result<()> {
        let hooked = self.hooked()?;
        let offset = mem1_offset(address, buffer.len())?;
        let mut number_of_bytes_read: usize = 0;
        unsafe {
            ReadProcessMemory(
                hooked.process.0,
                (hooked.mem1 + offset) as *const c_void,
                buffer.as_mut_ptr() as *mut c_void,
                buffer.len(),
                Some(&mut number_of_bytes_read),
            )
        }?;
        if number_of_bytes_read != buffer.len() {
            return Err(EngineError::ShortTransfer {
                address,
                expected: buffer.len(),
                actual: number_of_bytes_read,
            }
            .into());
        }
        Ok(())
    }

    fn write(&mut self, address: u32, buffer: &[u8]) -> Result<()> {
        let hooked = self.hooked()?;
        let offset = mem1_offset(address, buffer.len())?;
        let mut number_of_bytes_written: usize = 0;
        unsafe {
            WriteProcessMemory(
                hooked.process.0,
                (hooked.mem1 + offset) as *const c_void,
                buffer.as_ptr() as *const c_void,
                buffer.len(),
                Some(&mut number_of_bytes_written),
            )
        }?;
        if number_of_bytes_written != buffer.len() {
            return Err(EngineError::ShortTransfer {
                address,
                expected: buffer.len(),
                actual: number_of_bytes_written,
            }
            .into());
        }
        Ok(())
    }
}
