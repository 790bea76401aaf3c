mod commands;
mod tester;
mod tracing_helper;

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use spmwatch_lib::{
    catalog,
    memory_accessors::{wait_for_hook, MemoryAccessor, RamImage},
    settings::Settings,
    Catalog,
};

#[derive(Parser)]
#[command(version, about = "Read and write Super Paper Mario memory in Dolphin")]
struct Cli {
    /// Settings file
    #[arg(long, default_value = "spmwatch.toml")]
    config: PathBuf,
    /// Work on a MEM1 dump instead of a running emulator
    #[arg(long)]
    dump: Option<PathBuf>,
    /// Write the dump back after the command
    #[arg(long, requires = "dump")]
    save: bool,
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every known watch
    List,
    /// Read watches by name
    Read {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Write a value to a watch
    Write { name: String, value: String },
    /// Read or write a global saved work flag
    Gswf { index: u32, value: Option<String> },
    /// Exercise every datatype in a scratch area
    Tester,
}

#[cfg(target_os = "windows")]
fn live_process(process_name: &str) -> Result<Box<dyn MemoryAccessor>> {
    use spmwatch_lib::memory_accessors::ExternalProcess;
    Ok(Box::new(ExternalProcess::new(process_name)))
}

#[cfg(target_os = "linux")]
fn live_process(process_name: &str) -> Result<Box<dyn MemoryAccessor>> {
    use spmwatch_lib::memory_accessors::ProcMem;
    Ok(Box::new(ProcMem::new(process_name)))
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
fn live_process(_process_name: &str) -> Result<Box<dyn MemoryAccessor>> {
    anyhow::bail!("attaching to a running emulator is not supported on this platform; use --dump")
}

fn run<M: MemoryAccessor + ?Sized>(
    out: &mut impl Write,
    cli: &Cli,
    catalog: &Catalog,
    memory: &mut M,
) -> Result<bool> {
    match &cli.command {
        Command::List => unreachable!("list runs before any memory is attached"),
        Command::Read { names } => commands::read(out, catalog, memory, names, cli.json),
        Command::Write { name, value } => commands::write(catalog, memory, name, value),
        Command::Gswf { index, value } => {
            commands::gswf(out, memory, *index, value.as_deref(), cli.json)?;
            Ok(true)
        }
        Command::Tester => {
            tester::run(memory)?;
            Ok(true)
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;
    tracing_helper::init_tracing(
        settings.log_dir.as_deref(),
        concat!(env!("CARGO_PKG_NAME"), ".log"),
        true,
    )?;

    let mut catalog = catalog::builtin().clone();
    catalog.extend(settings.user_watches()?);

    let mut out = io::stdout().lock();
    if let Command::List = cli.command {
        commands::list(&mut out, &catalog, cli.json)?;
        return Ok(ExitCode::SUCCESS);
    }

    let ok = match &cli.dump {
        Some(path) => {
            let mut ram = RamImage::load(path)?;
            let ok = run(&mut out, &cli, &catalog, &mut ram)?;
            if cli.save {
                ram.save(path)?;
            }
            ok
        }
        None => {
            let mut process = live_process(&settings.process_name)?;
            wait_for_hook(&mut *process, settings.hook_poll_interval());
            run(&mut out, &cli, &catalog, &mut *process)?
        }
    };
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
