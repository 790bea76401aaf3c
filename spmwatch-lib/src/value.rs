use std::fmt;

use serde::Serialize;

use crate::Datatype;

/// A value read from or written to a watch.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Byte(u8),
    Halfword(u16),
    Word(u32),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    Bool(bool),
}

impl Value {
    /// The value as an unsigned integer, for the integer variants only.
    pub fn as_integer(&self) -> Option<u32> {
        match *self {
            Value::Byte(x) => Some(x as u32),
            Value::Halfword(x) => Some(x as u32),
            Value::Word(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Value::Float(x) => Some(x as f64),
            Value::Double(x) => Some(x),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(x) => write!(f, "{}", x),
            Value::Halfword(x) => write!(f, "{}", x),
            Value::Word(x) => write!(f, "{}", x),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Double(x) => write!(f, "{:?}", x),
            Value::String(x) => write!(f, "{}", x),
            Value::Bytes(x) => {
                let hex = x.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>();
                write!(f, "[{}]", hex.join(" "))
            }
            Value::Bool(x) => write!(f, "{}", x),
        }
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValueParseError {
    #[error("{0:?} is not an integer")]
    Integer(String),
    #[error("{0:?} is not a number")]
    Float(String),
    #[error("{0:?} is not a boolean")]
    Bool(String),
    #[error("{0:?} is not a hex byte string")]
    Bytes(String),
}

/// Accepts `i32::MIN..=u32::MAX`; negative values wrap to their
/// two's-complement bit pattern.
fn parse_integer(s: &str) -> Result<u32, ValueParseError> {
    let err = || ValueParseError::Integer(s.to_owned());
    let digits = s.trim().replace('_', "");
    let (negative, digits) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits.as_str()),
    };
    let (radix, body) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    if body.starts_with(|c: char| c == '+' || c == '-') {
        return Err(err());
    }
    let magnitude = i64::from_str_radix(body, radix).map_err(|_| err())?;
    let value = if negative { -magnitude } else { magnitude };
    if !(i32::MIN as i64..=u32::MAX as i64).contains(&value) {
        return Err(err());
    }
    Ok(value.rem_euclid(1 << 32) as u32)
}

fn parse_bytes(s: &str) -> Result<Vec<u8>, ValueParseError> {
    let err = || ValueParseError::Bytes(s.to_owned());
    let digits = s.split_whitespace().collect::<String>();
    if digits.len() % 2 != 0 {
        return Err(err());
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(err)
        })
        .collect()
}

impl Datatype {
    /// Parses user input into a value this datatype accepts.
    ///
    /// Integers are parsed as 32-bit and narrowed on write, so `0x19225`
    /// is a valid halfword input.
    pub fn parse_value(self, s: &str) -> Result<Value, ValueParseError> {
        Ok(match self {
            Datatype::Byte | Datatype::Halfword | Datatype::Word => {
                Value::Word(parse_integer(s)?)
            }
            Datatype::Float => Value::Float(
                s.trim()
                    .parse()
                    .map_err(|_| ValueParseError::Float(s.to_owned()))?,
            ),
            Datatype::Double => Value::Double(
                s.trim()
                    .parse()
                    .map_err(|_| ValueParseError::Float(s.to_owned()))?,
            ),
            Datatype::String => Value::String(s.to_owned()),
            Datatype::ByteArray => Value::Bytes(parse_bytes(s)?),
            Datatype::BitField => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "on" => Value::Bool(true),
                "false" | "0" | "off" => Value::Bool(false),
                _ => return Err(ValueParseError::Bool(s.to_owned())),
            },
        })
    }
}
