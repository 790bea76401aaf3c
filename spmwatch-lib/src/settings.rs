use std::{fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{Datatype, Watch};

#[cfg(target_os = "windows")]
pub const DEFAULT_PROCESS_NAME: &str = "Dolphin.exe";
#[cfg(not(target_os = "windows"))]
pub const DEFAULT_PROCESS_NAME: &str = "dolphin-emu";

/// A catalog entry declared in the settings file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WatchDef {
    pub name: String,
    pub address: u32,
    pub datatype: Datatype,
    pub size: Option<usize>,
    pub mask: Option<u8>,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum WatchDefError {
    #[error("watch {0:?}: bitfield needs a nonzero mask")]
    MissingMask(String),
    #[error("watch {name:?}: {datatype} does not take {key}")]
    UnusedKey {
        name: String,
        datatype: Datatype,
        key: &'static str,
    },
}

fn unused_key(def: &WatchDef, key: &'static str) -> WatchDefError {
    WatchDefError::UnusedKey {
        name: def.name.clone(),
        datatype: def.datatype,
        key,
    }
}

/// Only `bytearray` takes `size`; only `bitfield` takes `mask`, and requires
/// it to be nonzero.
impl TryFrom<WatchDef> for Watch {
    type Error = WatchDefError;

    fn try_from(def: WatchDef) -> Result<Self, Self::Error> {
        match (def.datatype, def.size, def.mask) {
            (Datatype::ByteArray, size, None) => {
                Ok(Watch::byte_array(def.name, def.address, size.unwrap_or(0)))
            }
            (Datatype::BitField, None, Some(mask)) if mask != 0 => {
                Ok(Watch::bit_field(def.name, def.address, mask))
            }
            (Datatype::BitField, Some(_), _) => Err(unused_key(&def, "size")),
            (Datatype::BitField, None, _) => Err(WatchDefError::MissingMask(def.name)),
            (_, Some(_), _) => Err(unused_key(&def, "size")),
            (_, None, Some(_)) => Err(unused_key(&def, "mask")),
            (datatype, None, None) => Ok(Watch::new(def.name, def.address, datatype)),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub process_name: String,
    pub hook_poll_interval_ms: u64,
    pub log_dir: Option<String>,
    pub watches: Vec<WatchDef>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            process_name: DEFAULT_PROCESS_NAME.to_owned(),
            hook_poll_interval_ms: 10,
            log_dir: None,
            watches: Vec::new(),
        }
    }
}

impl Settings {
    /// Loads `path`, falling back to the defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(file) => Self::parse(&file).with_context(|| format!("in {}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    pub fn parse(file: &str) -> Result<Self> {
        let settings: Self = toml::from_str(file)?;
        settings.user_watches()?;
        Ok(settings)
    }

    /// The `[[watches]]` entries as catalog watches, in file order.
    pub fn user_watches(&self) -> Result<Vec<Watch>, WatchDefError> {
        self.watches.iter().cloned().map(Watch::try_from).collect()
    }

    pub fn hook_poll_interval(&self) -> Duration {
        Duration::from_millis(self.hook_poll_interval_ms)
    }
}
