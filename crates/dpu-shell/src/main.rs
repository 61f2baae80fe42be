//! Interactive DPU simulator shell (C9).
//!
//! Loads an optional memory image, then drives the command loop of §6:
//! dump memory, run or single-step, edit bytes, inspect registers, and
//! persist memory to disk.

mod commands;
mod error;
mod fileio;
mod hexdump;
mod machine;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::commands::Outcome;
use crate::machine::Machine;

/// DPU instruction-set simulator.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Memory image to load at offset 0 before the prompt starts.
    image: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut machine = Machine::new();
    if let Some(path) = &args.image {
        let n = fileio::load_image(&mut machine.mem, path)
            .with_context(|| format!("loading initial image {}", path.display()))?;
        println!("loaded {n} bytes from {}", path.display());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    println!("    |=-=-=-=-=-=-=-=-=--->>DPU<<---=-=-=-=-=-=-=-=-=|");
    println!("{}", commands::HELP);
    loop {
        write!(output, "> ")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let Some(cmd) = line.trim().chars().next().map(|c| c.to_ascii_lowercase()) else {
            continue;
        };
        let outcome = commands::dispatch(cmd, &mut machine, &mut input, &mut output);
        if matches!(outcome, Outcome::Quit) {
            println!("Goodbye.");
            break;
        }
    }
    Ok(())
}
