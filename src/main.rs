use clap::Parser;

use time_mosaic::app::{self, MirrorOptions};
use time_mosaic::cli::{self, Args, Command};
use time_mosaic::config::Config;

/// Load `.env` and start logging.
///
/// Existing environment variables win over `.env`. Log level defaults to
/// `warn`; the terminal is in raw mode while the mirror runs, so set
/// `RUST_LOG` and redirect stderr to a file when debugging.
fn load_env() {
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

fn main() {
    load_env();

    let args = Args::parse();

    match args.command {
        Some(Command::ListCameras) => {
            if let Err(e) = cli::list_cameras() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Command::Config { ref action }) => {
            if let Err(e) = cli::handle_config_action(action.clone(), args.config.as_deref()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            let config = match Config::load(args.config.as_deref()) {
                Ok(config) => args.apply(config),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let options = MirrorOptions::from_config(&config, args.image.clone());
            if let Err(e) = app::run(options) {
                if e.is_permission_denied() {
                    println!("{}", e);
                } else {
                    eprintln!("Error: {}", e);
                }
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_env_var_not_overridden() {
        std::env::set_var("TIME_MOSAIC_TEST_VAR", "original_value");
        let _ = dotenv::dotenv();
        assert_eq!(
            std::env::var("TIME_MOSAIC_TEST_VAR").unwrap(),
            "original_value",
            "Existing env vars should not be overridden by dotenv"
        );
        std::env::remove_var("TIME_MOSAIC_TEST_VAR");
    }
}
