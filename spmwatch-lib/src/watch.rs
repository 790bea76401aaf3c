use std::fmt;

use anyhow::Result;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::{
    memory_accessors::{EngineError, MemoryAccessor},
    Value,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    Byte,
    Halfword,
    Word,
    Float,
    Double,
    String,
    ByteArray,
    BitField,
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Datatype::Byte => "byte",
            Datatype::Halfword => "halfword",
            Datatype::Word => "word",
            Datatype::Float => "float",
            Datatype::Double => "double",
            Datatype::String => "string",
            Datatype::ByteArray => "bytearray",
            Datatype::BitField => "bitfield",
        })
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum WatchError {
    #[error("{datatype} watch cannot hold {value:?}")]
    TypeMismatch { datatype: Datatype, value: Value },
    #[error("{0:?} cannot be stored as a single byte")]
    UnencodableChar(char),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WatchKind {
    Byte,
    Halfword,
    Word,
    Float,
    Double,
    String,
    /// `size` follows the length of the last payload written.
    ByteArray { size: usize },
    BitField { mask: u8 },
}

impl WatchKind {
    pub fn datatype(self) -> Datatype {
        match self {
            WatchKind::Byte => Datatype::Byte,
            WatchKind::Halfword => Datatype::Halfword,
            WatchKind::Word => Datatype::Word,
            WatchKind::Float => Datatype::Float,
            WatchKind::Double => Datatype::Double,
            WatchKind::String => Datatype::String,
            WatchKind::ByteArray { .. } => Datatype::ByteArray,
            WatchKind::BitField { .. } => Datatype::BitField,
        }
    }
}

impl From<Datatype> for WatchKind {
    fn from(datatype: Datatype) -> Self {
        match datatype {
            Datatype::Byte => WatchKind::Byte,
            Datatype::Halfword => WatchKind::Halfword,
            Datatype::Word => WatchKind::Word,
            Datatype::Float => WatchKind::Float,
            Datatype::Double => WatchKind::Double,
            Datatype::String => WatchKind::String,
            Datatype::ByteArray => WatchKind::ByteArray { size: 0 },
            Datatype::BitField => WatchKind::BitField { mask: 0 },
        }
    }
}

/// A named memory cell of the game.
#[derive(Clone, CopyGetters, Debug, Getters, PartialEq)]
pub struct Watch {
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    address: u32,
    #[getset(get_copy = "pub")]
    kind: WatchKind,
}

impl Watch {
    pub fn new(name: impl Into<String>, address: u32, datatype: Datatype) -> Self {
        Self {
            name: name.into(),
            address,
            kind: datatype.into(),
        }
    }

    pub fn byte_array(name: impl Into<String>, address: u32, size: usize) -> Self {
        Self {
            name: name.into(),
            address,
            kind: WatchKind::ByteArray { size },
        }
    }

    pub fn bit_field(name: impl Into<String>, address: u32, mask: u8) -> Self {
        Self {
            name: name.into(),
            address,
            kind: WatchKind::BitField { mask },
        }
    }

    pub fn datatype(&self) -> Datatype {
        self.kind.datatype()
    }

    pub fn read<M: MemoryAccessor + ?Sized>(&self, memory: &M) -> Result<Value> {
        let address = self.address;
        Ok(match self.kind {
            WatchKind::Byte => Value::Byte(memory.read_byte(address)?),
            WatchKind::Halfword => Value::Halfword(read_halfword(memory, address)?),
            WatchKind::Word => Value::Word(memory.read_word(address)?),
            WatchKind::Float => Value::Float(memory.read_float(address)?),
            WatchKind::Double => Value::Double(memory.read_double(address)?),
            WatchKind::String => Value::String(read_string(memory, address)?),
            WatchKind::ByteArray { size } => Value::Bytes(memory.read_bytes(address, size)?),
            WatchKind::BitField { mask } => {
                Value::Bool((memory.read_byte(address)? & mask) == mask)
            }
        })
    }

    /// Writes `value`, rejecting values of the wrong shape before any memory
    /// is touched. Integers are wrapped to the width of the cell.
    pub fn write<M: MemoryAccessor + ?Sized>(
        &mut self,
        memory: &mut M,
        value: &Value,
    ) -> Result<()> {
        let address = self.address;
        let datatype = self.datatype();
        let mismatch = || WatchError::TypeMismatch {
            datatype,
            value: value.clone(),
        };
        match &mut self.kind {
            WatchKind::Byte => {
                let value = value.as_integer().ok_or_else(mismatch)?;
                memory.write_byte(address, value as u8)
            }
            WatchKind::Halfword => {
                let value = value.as_integer().ok_or_else(mismatch)?;
                write_halfword(memory, address, value)
            }
            WatchKind::Word => {
                let value = value.as_integer().ok_or_else(mismatch)?;
                memory.write_word(address, value)
            }
            WatchKind::Float => {
                let value = value.as_float().ok_or_else(mismatch)?;
                memory.write_float(address, value as f32)
            }
            WatchKind::Double => {
                let value = value.as_float().ok_or_else(mismatch)?;
                memory.write_double(address, value)
            }
            WatchKind::String => {
                let Value::String(value) = value else {
                    return Err(mismatch().into());
                };
                write_string(memory, address, value)
            }
            WatchKind::ByteArray { size } => {
                let Value::Bytes(value) = value else {
                    return Err(mismatch().into());
                };
                *size = value.len();
                memory.write_bytes(address, value)
            }
            WatchKind::BitField { mask } => {
                let Value::Bool(value) = *value else {
                    return Err(mismatch().into());
                };
                let byte = memory.read_byte(address)?;
                let byte = if value { byte | *mask } else { byte & !*mask };
                memory.write_byte(address, byte)
            }
        }
    }
}

/// The address `n` bytes into a `len`-byte access starting at `address`.
fn byte_at(address: u32, n: usize, len: usize) -> Result<u32, EngineError> {
    u32::try_from(n)
        .ok()
        .and_then(|n| address.checked_add(n))
        .ok_or(EngineError::InvalidAddress { address, len })
}

fn read_halfword<M: MemoryAccessor + ?Sized>(memory: &M, address: u32) -> Result<u16> {
    let high = memory.read_byte(address)? as u16;
    let low = memory.read_byte(byte_at(address, 1, 2)?)? as u16;
    Ok((high << 8) | low)
}

fn write_halfword<M: MemoryAccessor + ?Sized>(
    memory: &mut M,
    address: u32,
    value: u32,
) -> Result<()> {
    let value = value % 0x10000;
    let low = byte_at(address, 1, 2)?;
    memory.write_byte(address, (value >> 8) as u8)?;
    memory.write_byte(low, (value & 0xff) as u8)
}

/// Reads bytes up to, not including, the next NUL.
fn read_string<M: MemoryAccessor + ?Sized>(memory: &M, address: u32) -> Result<String> {
    let mut s = String::new();
    for n in 0.. {
        let byte = memory.read_byte(byte_at(address, n, n + 1)?)?;
        if byte == 0 {
            break;
        }
        s.push(byte as char);
    }
    Ok(s)
}

/// Writes `value` followed by a NUL. The capacity of the destination is not
/// checked.
fn write_string<M: MemoryAccessor + ?Sized>(
    memory: &mut M,
    address: u32,
    value: &str,
) -> Result<()> {
    let bytes = value
        .chars()
        .map(|c| u8::try_from(c).map_err(|_| WatchError::UnencodableChar(c)))
        .collect::<Result<Vec<_>, _>>()?;
    let len = bytes.len() + 1;
    byte_at(address, bytes.len(), len)?;
    for (i, byte) in bytes.iter().enumerate() {
        memory.write_byte(byte_at(address, i, len)?, *byte)?;
    }
    memory.write_byte(byte_at(address, bytes.len(), len)?, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_accessors::RamImage;

    const SCRATCH: u32 = 0x80fb_0000;

    fn round_trip(watch: &mut Watch, ram: &mut RamImage, value: Value) -> Value {
        watch.write(ram, &value).unwrap();
        watch.read(ram).unwrap()
    }

    #[test]
    fn scalars_round_trip() {
        let mut ram = RamImage::new();
        let mut byte = Watch::new("some byte", SCRATCH, Datatype::Byte);
        let mut word = Watch::new("some word", SCRATCH + 4, Datatype::Word);
        let mut float = Watch::new("some float", SCRATCH + 8, Datatype::Float);
        let mut double = Watch::new("some double", SCRATCH + 0xc, Datatype::Double);

        for x in [0u8, 0x7f, 0xea, 0xff] {
            assert_eq!(
                round_trip(&mut byte, &mut ram, Value::Byte(x)),
                Value::Byte(x)
            );
        }
        for x in [0u32, 1, 0x804cd458, u32::MAX] {
            assert_eq!(
                round_trip(&mut word, &mut ram, Value::Word(x)),
                Value::Word(x)
            );
        }
        for x in [0.0f32, 1.5, -3.25, f32::MAX, f32::MIN_POSITIVE] {
            assert_eq!(
                round_trip(&mut float, &mut ram, Value::Float(x)),
                Value::Float(x)
            );
        }
        for x in [0.0f64, 3.0, -1e300, f64::EPSILON] {
            assert_eq!(
                round_trip(&mut double, &mut ram, Value::Double(x)),
                Value::Double(x)
            );
        }
    }

    #[test]
    fn halfword_wraps_modulo_65536() {
        let mut ram = RamImage::new();
        let mut halfword = Watch::new("some halfword", SCRATCH + 2, Datatype::Halfword);
        assert_eq!(
            round_trip(&mut halfword, &mut ram, Value::Word(0x19225)),
            Value::Halfword(0x9225)
        );
        assert_eq!(ram.read_byte(SCRATCH + 2).unwrap(), 0x92);
        assert_eq!(ram.read_byte(SCRATCH + 3).unwrap(), 0x25);
        assert_eq!(ram.read_byte(SCRATCH + 4).unwrap(), 0);
    }

    #[test]
    fn byte_wraps_modulo_256() {
        let mut ram = RamImage::new();
        let mut byte = Watch::new("some byte", SCRATCH, Datatype::Byte);
        assert_eq!(
            round_trip(&mut byte, &mut ram, Value::Word(0x1ea)),
            Value::Byte(0xea)
        );
    }

    #[test]
    fn shorter_string_is_terminated_at_new_length() {
        let mut ram = RamImage::new();
        let mut string = Watch::new("some string", SCRATCH + 0x14, Datatype::String);
        string
            .write(&mut ram, &Value::String("this is a string".to_owned()))
            .unwrap();
        string
            .write(&mut ram, &Value::String("smaller string".to_owned()))
            .unwrap();
        assert_eq!(
            string.read(&ram).unwrap(),
            Value::String("smaller string".to_owned())
        );
        assert_eq!(ram.read_byte(SCRATCH + 0x14 + 14).unwrap(), 0);
        // the tail of the longer string is left behind the terminator
        assert_eq!(ram.read_byte(SCRATCH + 0x14 + 15).unwrap(), b'g');
    }

    #[test]
    fn string_with_wide_char_is_rejected_before_writing() {
        let mut ram = RamImage::new();
        let mut string = Watch::new("some string", SCRATCH + 0x14, Datatype::String);
        let err = string
            .write(&mut ram, &Value::String("ab\u{3042}".to_owned()))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<WatchError>(),
            Some(&WatchError::UnencodableChar('\u{3042}'))
        );
        assert_eq!(ram.read_byte(SCRATCH + 0x14).unwrap(), 0);
    }

    #[test]
    fn latin1_string_round_trips() {
        let mut ram = RamImage::new();
        let mut string = Watch::new("File name", SCRATCH + 0x14, Datatype::String);
        assert_eq!(
            round_trip(&mut string, &mut ram, Value::String("Mário".to_owned())),
            Value::String("Mário".to_owned())
        );
    }

    #[test]
    fn bit_field_toggles_only_masked_bits() {
        let mut ram = RamImage::new();
        let address = 0x804e26d5;
        ram.write_byte(address, 0b1011_0101).unwrap();
        let mut pipe = Watch::bit_field("FlipFlop Pipe", address, 0x40);

        pipe.write(&mut ram, &Value::Bool(true)).unwrap();
        assert_eq!(ram.read_byte(address).unwrap(), 0b1111_0101);
        assert_eq!(pipe.read(&ram).unwrap(), Value::Bool(true));

        pipe.write(&mut ram, &Value::Bool(false)).unwrap();
        assert_eq!(ram.read_byte(address).unwrap(), 0b1011_0101);
        assert_eq!(pipe.read(&ram).unwrap(), Value::Bool(false));

        pipe.write(&mut ram, &Value::Bool(true)).unwrap();
        assert_eq!(ram.read_byte(address).unwrap(), 0b1111_0101);
    }

    #[test]
    fn bit_field_requires_every_mask_bit() {
        let mut ram = RamImage::new();
        ram.write_byte(SCRATCH, 0b0000_0001).unwrap();
        let flags = Watch::bit_field("two bits", SCRATCH, 0b0000_0011);
        assert_eq!(flags.read(&ram).unwrap(), Value::Bool(false));
        ram.write_byte(SCRATCH, 0b0000_0011).unwrap();
        assert_eq!(flags.read(&ram).unwrap(), Value::Bool(true));
    }

    #[test]
    fn byte_array_size_follows_writes() {
        let mut ram = RamImage::new();
        let mut bytes = Watch::byte_array("some byte array", SCRATCH + 0x50, 5);
        assert_eq!(bytes.read(&ram).unwrap(), Value::Bytes(vec![0; 5]));

        let payload = vec![
            0xeb, 0xe4, 0x2a, 0x22, 0x5e, 0x85, 0x93, 0xe4, 0x48, 0xd9, 0xc5, 0x45, 0x73, 0x81,
            0xaa, 0xf7,
        ];
        bytes.write(&mut ram, &Value::Bytes(payload.clone())).unwrap();
        assert_eq!(bytes.kind(), WatchKind::ByteArray { size: 16 });
        assert_eq!(bytes.read(&ram).unwrap(), Value::Bytes(payload));
    }

    #[test]
    fn unsized_byte_array_reads_nothing() {
        let ram = RamImage::new();
        let bytes = Watch::new("unsized", SCRATCH + 0x50, Datatype::ByteArray);
        assert_eq!(bytes.read(&ram).unwrap(), Value::Bytes(vec![]));
    }

    #[test]
    fn mismatched_value_is_rejected() {
        let mut ram = RamImage::new();
        let mut word = Watch::new("Coins", 0x804cea44, Datatype::Word);
        let err = word
            .write(&mut ram, &Value::String("999".to_owned()))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<WatchError>(),
            Some(&WatchError::TypeMismatch {
                datatype: Datatype::Word,
                value: Value::String("999".to_owned()),
            })
        );

        let mut pipe = Watch::bit_field("FlipFlop Pipe", 0x804e26d5, 0x40);
        assert!(pipe.write(&mut ram, &Value::Word(1)).is_err());
    }

    #[test]
    fn engine_failure_is_surfaced() {
        let mut ram = RamImage::new();
        let mut word = Watch::new("nowhere", 0x9000_0000, Datatype::Word);
        let err = word.write(&mut ram, &Value::Word(1)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::InvalidAddress { .. })
        ));
        assert!(word.read(&ram).is_err());
    }

    /// Accepts every address, so only the watch's own arithmetic can fail.
    #[derive(Default)]
    struct AnyAddress {
        bytes: std::collections::HashMap<u32, u8>,
    }

    impl MemoryAccessor for AnyAddress {
        fn hook(&mut self) -> Result<()> {
            Ok(())
        }

        fn unhook(&mut self) {}

        fn is_hooked(&self) -> bool {
            true
        }

        fn read(&self, address: u32, buffer: &mut [u8]) -> Result<()> {
            for (i, byte) in buffer.iter_mut().enumerate() {
                *byte = *self.bytes.get(&(address + i as u32)).unwrap_or(&b'x');
            }
            Ok(())
        }

        fn write(&mut self, address: u32, buffer: &[u8]) -> Result<()> {
            for (i, byte) in buffer.iter().enumerate() {
                self.bytes.insert(address + i as u32, *byte);
            }
            Ok(())
        }
    }

    fn is_invalid_address(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::InvalidAddress { .. })
        )
    }

    #[test]
    fn halfword_at_top_of_address_space_is_an_error() {
        let mut memory = AnyAddress::default();
        let mut halfword = Watch::new("last", u32::MAX, Datatype::Halfword);
        assert!(is_invalid_address(&halfword.read(&memory).unwrap_err()));
        assert!(is_invalid_address(
            &halfword.write(&mut memory, &Value::Word(0x1234)).unwrap_err()
        ));
        assert!(memory.bytes.is_empty());
    }

    #[test]
    fn string_running_past_address_space_is_an_error() {
        let mut memory = AnyAddress::default();
        let mut string = Watch::new("last", u32::MAX - 2, Datatype::String);
        let err = string
            .write(&mut memory, &Value::String("abc".to_owned()))
            .unwrap_err();
        assert!(is_invalid_address(&err));
        assert!(memory.bytes.is_empty());

        // no terminator before the end of the address space
        assert!(is_invalid_address(&string.read(&memory).unwrap_err()));
    }
}
