use std::path::PathBuf;
use std::process::ExitCode;

use log::error;

use scrollshot::config::GameConfig;
use scrollshot::engine;

/// `--config <path>` from the command line, if given.
fn config_path() -> Result<Option<PathBuf>, String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return match args.next() {
                Some(path) => Ok(Some(PathBuf::from(path))),
                None => Err("--config needs a path".to_owned()),
            };
        }
    }
    Ok(None)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match config_path() {
        Ok(Some(path)) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        Ok(None) => GameConfig::default(),
        Err(msg) => {
            error!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    match engine::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
