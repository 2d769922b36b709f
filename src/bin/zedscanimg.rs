//! Command-line barcode scanner
//!
//! Runs image files through the same path a capture host uses: the RGBA
//! pixels are staged in the scanner's reusable buffer, converted to luma in
//! place and handed to the decoding session.
//!
//! Build with: `cargo build --features cli --bin zedscanimg`

use clap::Parser;
use std::io::Write;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zedscan::{Emitted, RqrrBackend, Scanner, ScannerConfig};

/// Scan and decode bar codes from one or more image files
#[derive(Parser)]
#[command(name = "zedscanimg")]
#[command(version)]
#[command(about = "Scan and decode bar codes from one or more image files", long_about = None)]
struct Args {
    /// Minimal output, only print decoded symbol data
    #[arg(short, long)]
    quiet: bool,

    /// Output decoded symbol data only, without the symbol type
    #[arg(long)]
    raw: bool,

    /// Append the symbol outline as x,y pairs
    #[arg(long)]
    polygon: bool,

    /// Scan every n-th column
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    x_density: u32,

    /// Scan every n-th row
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    y_density: u32,

    /// Log scanner activity (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Image files to scan
    #[arg(required = true)]
    files: Vec<String>,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_symbol(args: &Args, symbol: &Emitted<'_>) {
    let mut out = std::io::stdout().lock();
    if !args.raw {
        write!(out, "{}:", symbol.kind_name()).ok();
    }
    out.write_all(symbol.payload()).ok();
    if args.polygon {
        for (x, y) in symbol.points() {
            write!(out, " {x},{y}").ok();
        }
    }
    writeln!(out).ok();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = ScannerConfig::new().scan_density(args.x_density, args.y_density);
    let mut scanner = Scanner::with_config(RqrrBackend, config);
    let mut total_symbols = 0;

    for filename in &args.files {
        let img = match ::image::open(filename) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                if !args.quiet {
                    eprintln!("Failed to load image '{}': {}", filename, e);
                }
                process::exit(1);
            }
        };
        let (width, height) = img.dimensions();

        match scanner.create_buffer(width, height) {
            Ok(region) => region.copy_from_slice(img.as_raw()),
            Err(e) => {
                if !args.quiet {
                    eprintln!("Failed to stage image '{}': {}", filename, e);
                }
                process::exit(1);
            }
        }

        let found = scanner.scan_buffer_rgba(width, height, &mut |symbol: &Emitted<'_>| {
            print_symbol(&args, symbol)
        });
        debug!(file = %filename, found, "image scanned");
        total_symbols += found;
    }

    scanner.destroy_scanner();
    scanner.destroy_buffer();

    // Print statistics unless quiet mode
    if !args.quiet {
        if total_symbols == 0 {
            eprintln!("No barcodes found");
            process::exit(1);
        } else {
            eprintln!(
                "scanned {} barcode symbols from {} image(s)",
                total_symbols,
                args.files.len()
            );
        }
    } else if total_symbols == 0 {
        // In quiet mode, still exit with error if no barcodes found
        process::exit(1);
    }
}
