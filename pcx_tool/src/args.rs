//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pcx-tool", version, about = "Inspect, convert and pack PCX and DCX images")]
pub struct Args {
    /// Log codec details down to debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the header of every page in a PCX or DCX file
    Info {
        input: PathBuf,
    },
    /// Write every page of a PCX or DCX file as PNG into a directory
    Extract {
        input: PathBuf,
        out_dir: PathBuf,
    },
    /// Bundle PCX pages or other images into one DCX file
    Pack {
        output: PathBuf,
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Convert any readable image into a single PCX page
    Convert {
        input: PathBuf,
        output: PathBuf,
    },
}
