use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Root folder to scan for image files.
    #[arg(short, long)]
    pub folder: PathBuf,

    /// Resize percentage passed to the external tool (1-100).
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub perc: u32,

    /// Skip files at or below this many bytes. [default: 1 MiB]
    #[arg(long, default_value_t = 1024 * 1024)]
    pub min_size: u64,

    /// Log every discovered file before dispatch.
    #[arg(long)]
    pub debug: bool,

    /// External resize tool to invoke for each file.
    #[arg(long, default_value = "magick")]
    pub tool: String,
}
