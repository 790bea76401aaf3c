//! Global saved work flags: the game's persistent one-bit story flags.

use crate::Watch;

/// Start of the flag array, stored as big-endian 32-bit words.
pub const GSWF_BASE: u32 = 0x804e_2694;
pub const GSWF_COUNT: u32 = 8192;

/// Address of the byte holding flag `index` and the bit within it.
pub fn locate(index: u32) -> (u32, u8) {
    let word = index / 32;
    let bit = index % 32;
    let address = GSWF_BASE + word * 4 + 3 - bit / 8;
    (address, 1 << (bit % 8))
}

pub fn watch(name: impl Into<String>, index: u32) -> Watch {
    let (address, mask) = locate(index);
    Watch::bit_field(name, address, mask)
}
