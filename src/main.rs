//! drlhl - print Drools rule files with syntax highlighting

use std::env;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use drl_highlight::config::Config;
use drl_highlight::error::Result;
use drl_highlight::file_type;
use drl_highlight::render;
use drl_highlight::syntax::SourceBuffer;

/// What to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Highlight,
    Plain,
    Tokens,
}

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by `DRLHL_LOG` (default: warnings only)
fn init_tracing() {
    let filter = match env::var("DRLHL_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::new("warn"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let mut mode = Mode::Highlight;
    let mut path = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("drlhl {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--tokens" | "-t" => mode = Mode::Tokens,
            "--plain" | "-p" => mode = Mode::Plain,
            _ if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                print_usage();
                process::exit(2);
            }
            _ => path = Some(PathBuf::from(arg)),
        }
    }

    let Some(path) = path else {
        print_usage();
        process::exit(2);
    };

    let config = Config::load()?;
    if file_type::detect(&path).is_none() {
        warn!(path = %path.display(), "not a .drl file, highlighting anyway");
    }

    let bytes = fs::read(&path)?;
    let text = String::from_utf8_lossy(&bytes);
    let source = SourceBuffer::new(&text);
    debug!(path = %path.display(), bytes = source.len(), ?mode, "scanning file");
    if let Some(token) = source.scan().find(|t| t.kind.is_unterminated()) {
        warn!(offset = token.start, kind = %token.kind, "unterminated token runs to end of file");
    }

    let stdout = io::stdout();
    let colored = config.color && stdout.is_terminal();
    let mut out = stdout.lock();
    match mode {
        Mode::Tokens => render::write_token_dump(&mut out, &text, config.tab_width)?,
        Mode::Highlight if colored => render::write_highlighted(&mut out, &text, &config.theme)?,
        Mode::Highlight | Mode::Plain => {
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
    }

    Ok(())
}

fn print_usage() {
    println!("drlhl {} - Drools rule file highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: drlhl [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -t, --tokens   Print one line per token (line:col kind text)");
    println!("  -p, --plain    Print the file without colors");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Environment:");
    println!("  DRLHL_CONFIG   Config file (default ~/.drlhl.toml)");
    println!("  DRLHL_LOG      Log filter, e.g. debug");
}
