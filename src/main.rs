//! Main entry point for pwstore.

use clap::Parser;
use pwstore::cli::Cli;
use pwstore::interactive::InteractiveStore;
use pwstore::logging::init_logging;
use pwstore::utils::error_exit;

fn main() {
    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => error_exit(&e.to_string(), 2),
    };

    match InteractiveStore::new(config) {
        Ok(mut shell) => {
            if let Err(e) = shell.run() {
                error_exit(&format!("{e:#}"), 1);
            }
        }
        Err(e) => error_exit(&format!("{e:#}"), 1),
    }
}
