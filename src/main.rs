use std::error::Error;

use plum_checkers::console::console_config::{ConsoleConfig, Invocation, USAGE};
use plum_checkers::console::console_top::run_stdio_loop;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let config = match ConsoleConfig::resolve(std::env::args().skip(1))? {
        Invocation::Run(config) => config,
        Invocation::Help => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    // stdout carries the command protocol, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run_stdio_loop(&config)?;
    Ok(())
}
