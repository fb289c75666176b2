use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gameboj::{Cartridge, GameBoy};

#[derive(Parser, Debug)]
#[command(name = "gameboj", about = "Run a 32 KiB cartridge image on the SM83 core.")]
struct Args {
    /// Cartridge image (type 0, exactly 32 KiB).
    #[arg(value_name = "ROM")]
    rom: PathBuf,

    /// Number of logical cycles to simulate.
    #[arg(long, default_value_t = 1_000_000)]
    cycles: u64,

    /// Optional 256-byte boot image mapped over $0000-$00FF until $FF50 is written.
    #[arg(long, value_name = "PATH")]
    boot_rom: Option<PathBuf>,

    /// Print the registers every N cycles while running.
    #[arg(long, value_name = "N")]
    trace_interval: Option<u64>,
}

fn print_registers(gb: &GameBoy) {
    let [pc, sp, a, f, b, c, d, e, h, l] = gb.cpu().registers_snapshot();
    println!(
        "cycle={:>10} PC={pc:04X} SP={sp:04X} A={a:02X} F={f:02X} B={b:02X} C={c:02X} D={d:02X} E={e:02X} H={h:02X} L={l:02X} IME={} halted={}",
        gb.cycles(),
        gb.cpu().ime() as u8,
        gb.cpu().is_idle() as u8,
    );
}

/// Cycle of the next register dump, never past `end`.
fn next_trace_point(now: u64, interval: u64, end: u64) -> u64 {
    now.saturating_add(interval).min(end)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let cartridge = Cartridge::from_file(&args.rom)?;
    info!(rom = %args.rom.display(), title = cartridge.title(), "loaded cartridge");

    let mut gb = match &args.boot_rom {
        Some(path) => GameBoy::with_boot_rom(cartridge, &fs::read(path)?)?,
        None => GameBoy::new(cartridge),
    };

    match args.trace_interval {
        Some(interval) if interval > 0 => {
            while gb.cycles() < args.cycles {
                let target = next_trace_point(gb.cycles(), interval, args.cycles);
                gb.run_until(target)?;
                print_registers(&gb);
            }
        }
        _ => gb.run_until(args.cycles)?,
    }

    info!(cycles = gb.cycles(), "run complete");
    print_registers(&gb);
    Ok(())
}

fn main() {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("info"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_points_stop_at_the_end() {
        assert_eq!(next_trace_point(0, 10, 25), 10);
        assert_eq!(next_trace_point(20, 10, 25), 25);
        assert_eq!(next_trace_point(5, u64::MAX, 1_000), 1_000);
        assert_eq!(next_trace_point(u64::MAX - 1, u64::MAX, u64::MAX), u64::MAX);
    }
}
