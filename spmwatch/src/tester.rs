use std::io::{self, Write};

use anyhow::Result;
use spmwatch_lib::{gswf, memory_accessors::MemoryAccessor, Datatype, Value, Watch};

const SCRATCH: u32 = 0x80fb_0000;

fn read_line() -> Result<String> {
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_owned())
}

/// Writes one value of every datatype into an unused area of MEM1, prints
/// what reads back, then flips the FlipFlop Pipe flag on request.
pub fn run<M: MemoryAccessor + ?Sized>(memory: &mut M) -> Result<()> {
    let mut byte_array = Watch::byte_array("some byte array", SCRATCH + 0x50, 5);
    println!("{}", byte_array.read(memory)?);

    let mut writes = vec![
        (
            Watch::new("some byte", SCRATCH, Datatype::Byte),
            Value::Byte(0xea),
        ),
        (
            Watch::new("some halfword", SCRATCH + 0x2, Datatype::Halfword),
            Value::Halfword(0x9225),
        ),
        (
            Watch::new("some word", SCRATCH + 0x4, Datatype::Word),
            Value::Word(0x804cd458),
        ),
        (
            Watch::new("some float", SCRATCH + 0x8, Datatype::Float),
            Value::Float(1.5),
        ),
        (
            Watch::new("some double", SCRATCH + 0xc, Datatype::Double),
            Value::Double(3.0),
        ),
        (
            Watch::new("some string", SCRATCH + 0x14, Datatype::String),
            Value::String("this is a string".to_owned()),
        ),
    ];
    for (watch, value) in &mut writes {
        watch.write(memory, value)?;
    }
    let (string, _) = &mut writes[5];
    string.write(memory, &Value::String("smaller string".to_owned()))?;
    byte_array.write(
        memory,
        &Value::Bytes(vec![
            0xeb, 0xe4, 0x2a, 0x22, 0x5e, 0x85, 0x93, 0xe4, 0x48, 0xd9, 0xc5, 0x45, 0x73, 0x81,
            0xaa, 0xf7,
        ]),
    )?;

    for (watch, _) in &writes {
        println!("{}: {}", watch.name(), watch.read(memory)?);
    }
    println!("{}: {}", byte_array.name(), byte_array.read(memory)?);

    let mut pipe = gswf::watch("FlipFlop Pipe", 534);
    pipe.write(memory, &Value::Bool(false))?;
    print!("Press enter to set it to 1");
    read_line()?;
    pipe.write(memory, &Value::Bool(true))?;
    print!("Press enter to set it to 0");
    read_line()?;
    pipe.write(memory, &Value::Bool(false))?;
    Ok(())
}
