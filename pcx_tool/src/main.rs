mod args;
mod commands;
mod filemanager;

use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};

use args::{Args, Command};

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = lib_pcx::init_logging(args.log_file.as_deref(), level) {
        eprintln!("Cannot set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    let result = match &args.command {
        Command::Info { input } => commands::info(input),
        Command::Extract { input, out_dir } => commands::extract(input, out_dir),
        Command::Pack { output, inputs } => commands::pack(output, inputs),
        Command::Convert { input, output } => commands::convert(input, output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("pcx-tool: {}", e);
            ExitCode::FAILURE
        }
    }
}
