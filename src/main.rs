use std::process;
use todos::commands::Cli;
use todos::libs::messages::macros::is_debug_mode;
use todos::msg_error;
use tracing_subscriber::EnvFilter;

/// Installs a log subscriber in debug mode (`TODOS_DEBUG` or `RUST_LOG` set).
///
/// `RUST_LOG` selects the levels; with only `TODOS_DEBUG` everything from
/// this crate at debug and above is shown.
fn init_logging() {
    if !is_debug_mode() {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("todos=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .init();
}

fn main() {
    init_logging();

    if let Err(e) = Cli::menu() {
        msg_error!(format!("{:#}", e));
        process::exit(1);
    }
}
