use std::process::ExitCode;

use photo_collector::ConfigError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match photo_collector::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ConfigError>() {
            Some(config_err) => {
                eprintln!("ERROR: {} -- program terminated", config_err);
                ExitCode::from(2)
            }
            None => {
                eprintln!("ERROR: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}
