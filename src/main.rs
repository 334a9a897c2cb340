#![allow(clippy::cargo_common_metadata)]
use anyhow::Result;
use fncli::{cli, setup_logging};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    // Diagnostics on stderr, debug level when FNCLI_DEBUG is set
    setup_logging(std::env::var_os("FNCLI_DEBUG").is_some())?;

    let app = cli::build_app()?;

    // Dispatch everything after the program name; non-UTF-8 bytes are replaced
    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    Ok(app.execute(args))
}
