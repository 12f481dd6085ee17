// SPDX-License-Identifier: MPL-2.0
use iced_reel::app::{self, App, Flags};
use std::convert::Infallible;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Usage: iced_reel [OPTIONS] [MEDIA_FILE]

Opens a media viewer session over MEDIA_FILE (a TOML catalog with
[[items]] entries) or over a built-in sample catalog.

Options:
  --type <photo|video>   Media type of the session
  --index <N>            Starting item (default 0)
  --config <PATH>        Settings file to use
  --block-autoplay       Refuse autoplay, as browsers do without a gesture
  -h, --help             Print this help
";

fn to_path(s: &OsStr) -> Result<PathBuf, Infallible> {
    Ok(PathBuf::from(s))
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        kind: args.opt_value_from_str("--type")?,
        index: args.opt_value_from_str("--index")?.unwrap_or(0),
        config_path: args.opt_value_from_os_str("--config", to_path)?,
        block_autoplay: args.contains("--block-autoplay"),
        media_file: args.opt_free_from_os_str(to_path)?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unexpected arguments");
    }
    Ok(Some(flags))
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("iced_reel=info")),
        )
        .try_init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    let (app, startup) = match App::new(flags) {
        Ok(opened) => opened,
        Err(err) => {
            tracing::error!(%err, "failed to open viewer");
            return ExitCode::FAILURE;
        }
    };

    match app::run(app, startup) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "viewer exited with an error");
            ExitCode::FAILURE
        }
    }
}
