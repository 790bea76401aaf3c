use std::io::Write;

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::{json, Map};
use spmwatch_lib::{
    gswf::{self, GSWF_COUNT},
    memory_accessors::MemoryAccessor,
    Catalog, Datatype, WatchKind,
};
use tracing::{info, warn};

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    address: String,
    datatype: Datatype,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mask: Option<u8>,
}

pub fn list(out: &mut impl Write, catalog: &Catalog, json: bool) -> Result<()> {
    let entries = catalog
        .iter()
        .map(|watch| {
            let (size, mask) = match watch.kind() {
                WatchKind::ByteArray { size } => (Some(size), None),
                WatchKind::BitField { mask } => (None, Some(mask)),
                _ => (None, None),
            };
            Entry {
                name: watch.name(),
                address: format!("{:#010x}", watch.address()),
                datatype: watch.datatype(),
                size,
                mask,
            }
        })
        .collect::<Vec<_>>();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }
    for entry in entries {
        let extra = match (entry.size, entry.mask) {
            (Some(size), _) => format!(" size={}", size),
            (_, Some(mask)) => format!(" mask={:#04x}", mask),
            _ => String::new(),
        };
        writeln!(
            out,
            "{} {:<9} {}{}",
            entry.address, entry.datatype, entry.name, extra
        )?;
    }
    Ok(())
}

pub fn read<M: MemoryAccessor + ?Sized>(
    out: &mut impl Write,
    catalog: &Catalog,
    memory: &M,
    names: &[String],
    json: bool,
) -> Result<bool> {
    let mut values = Map::new();
    let mut all_found = true;
    for name in names {
        let Some(watch) = catalog.find(name) else {
            warn!("unknown watch: {}", name);
            all_found = false;
            continue;
        };
        let value = watch.read(memory)?;
        if json {
            values.insert(name.clone(), serde_json::to_value(&value)?);
        } else {
            writeln!(out, "{}: {}", name, value)?;
        }
    }
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&values)?)?;
    }
    Ok(all_found)
}

pub fn write<M: MemoryAccessor + ?Sized>(
    catalog: &Catalog,
    memory: &mut M,
    name: &str,
    input: &str,
) -> Result<bool> {
    let Some(watch) = catalog.find(name) else {
        warn!("unknown watch: {}", name);
        return Ok(false);
    };
    let mut watch = watch.clone();
    let value = watch.datatype().parse_value(input)?;
    watch.write(memory, &value)?;
    info!("{} <- {}", name, value);
    Ok(true)
}

pub fn gswf<M: MemoryAccessor + ?Sized>(
    out: &mut impl Write,
    memory: &mut M,
    index: u32,
    input: Option<&str>,
    json: bool,
) -> Result<()> {
    if index >= GSWF_COUNT {
        bail!("GSWF {} is out of range (0..{})", index, GSWF_COUNT);
    }
    let mut flag = gswf::watch(format!("GSWF {}", index), index);
    if let Some(input) = input {
        let value = Datatype::BitField.parse_value(input)?;
        flag.write(memory, &value)?;
        info!("{} <- {}", flag.name(), value);
        return Ok(());
    }
    let value = flag.read(memory)?;
    if json {
        writeln!(out, "{}", json!({ "index": index, "value": value }))?;
    } else {
        writeln!(out, "{}: {}", flag.name(), value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value as Json;
    use spmwatch_lib::{catalog, memory_accessors::RamImage};

    use super::*;

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_one_line_per_watch() {
        let catalog = catalog::builtin();
        let text = output(|out| list(out, catalog, false));
        assert_eq!(text.lines().count(), catalog.len());
        assert!(text.lines().any(|line| line == "0x804cea44 word      Coins"));
    }

    #[test]
    fn lists_json_entries() {
        let catalog = catalog::builtin();
        let entries: Json = serde_json::from_str(&output(|out| list(out, catalog, true))).unwrap();
        let entries = entries.as_array().unwrap();
        assert_eq!(entries.len(), catalog.len());
        let coins = entries.iter().find(|e| e["name"] == "Coins").unwrap();
        assert_eq!(
            *coins,
            json!({ "name": "Coins", "address": "0x804cea44", "datatype": "word" })
        );
    }

    #[test]
    fn write_then_read_by_name() {
        let mut ram = RamImage::new();
        let catalog = catalog::builtin();
        assert!(write(catalog, &mut ram, "Coins", "999").unwrap());
        assert_eq!(ram.read_word(0x804cea44).unwrap(), 999);

        let mut out = Vec::new();
        assert!(read(&mut out, catalog, &ram, &["Coins".to_owned()], false).unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "Coins: 999\n");
    }

    #[test]
    fn reads_json_map() {
        let mut ram = RamImage::new();
        let catalog = catalog::builtin();
        ram.write_word(0x804cea44, 42).unwrap();
        let mut out = Vec::new();
        assert!(read(&mut out, catalog, &ram, &["Coins".to_owned()], true).unwrap());
        let values: Json = serde_json::from_slice(&out).unwrap();
        assert_eq!(values, json!({ "Coins": 42 }));
    }

    #[test]
    fn unknown_names_fail_without_error() {
        let mut ram = RamImage::new();
        let catalog = catalog::builtin();
        let names = ["Coins".to_owned(), "Nope".to_owned()];
        assert!(!read(&mut Vec::new(), catalog, &ram, &names, true).unwrap());
        assert!(!write(catalog, &mut ram, "Nope", "1").unwrap());
    }

    #[test]
    fn bad_input_is_an_error() {
        let mut ram = RamImage::new();
        assert!(write(catalog::builtin(), &mut ram, "Coins", "lots").is_err());
    }

    #[test]
    fn gswf_sets_flag() {
        let mut ram = RamImage::new();
        gswf(&mut Vec::new(), &mut ram, 534, Some("true"), false).unwrap();
        assert_eq!(ram.read_byte(0x804e26d5).unwrap(), 0x40);
        assert_eq!(
            output(|out| gswf(out, &mut ram, 534, None, false)),
            "GSWF 534: true\n"
        );
        assert!(gswf(&mut Vec::new(), &mut ram, GSWF_COUNT, None, false).is_err());
    }
}
