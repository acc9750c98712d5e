//! `gldispatch` - regenerate the GL dispatch source and header.
//!
//! Usage: `gldispatch <API_XML> <SOURCE_OUT> <HEADER_OUT>`

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug, Clone)]
#[command(name = "gldispatch", version, about = "Generate lazily bound GL dispatch code")]
struct Args {
    /// Root XML declaration file
    #[arg(value_name = "API_XML")]
    input: PathBuf,
    /// Generated C source to write
    #[arg(value_name = "SOURCE_OUT")]
    source_out: PathBuf,
    /// Generated C header to write
    #[arg(value_name = "HEADER_OUT")]
    header_out: PathBuf,
}

fn main() {
    init_tracing();
    std::process::exit(run(&Args::parse()));
}

fn run(args: &Args) -> i32 {
    match gldispatch_core::run(&args.input, &args.source_out, &args.header_out) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn init_tracing() {
    // GLDISPATCH_LOG is either a plain level ("debug") applied to both crates,
    // or a full filter spec like "gldispatch_core=trace"
    let filter = match std::env::var("GLDISPATCH_LOG") {
        Ok(level) if is_plain_level(&level) => {
            format!("gldispatch={level},gldispatch_core={level}")
        }
        Ok(spec) => spec,
        Err(_) => "gldispatch=warn,gldispatch_core=warn".to_string(),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
