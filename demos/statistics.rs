//! Prints count, average, median and the neighbors of 42 for the distinct
//! numbers in a file.
//!
//! ```text
//! cargo run --example statistics -- numbers.txt [error|warn|info|debug|trace]
//! ```

use std::{env, fs, io, process};

use crimson_tree::Summary;
use log::{LevelFilter, info};
use simplelog::{Config, SimpleLogger};

fn main() -> io::Result<()> {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: statistics <file> [log level]");
        process::exit(2);
    };
    let level = args.next().and_then(|level| level.parse().ok()).unwrap_or(LevelFilter::Warn);
    // Only fails if a logger is already installed.
    let _ = SimpleLogger::init(level, Config::default());

    let input = fs::read_to_string(&path)?;
    info!("read {} bytes from {path}", input.len());

    print!("{}", Summary::parse(&input));
    Ok(())
}
