//! `kilo` binary: parse arguments, set up logging, run the editor.

use clap::Parser;
use kilo::{EditorConfig, EditorError};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Mutex, Once};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kilo", version, about = "A small terminal text editor")]
struct Args {
    /// File to open. Starts with an empty buffer when omitted.
    file: Option<PathBuf>,

    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Extra Ctrl-Q presses required to quit with unsaved changes.
    #[arg(long = "quit-times", value_name = "N", default_value_t = 3)]
    quit_times: usize,
}

fn configure_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed; logging is best effort.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// Log panics and put the terminal back before the default hook prints.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", %info, "panic");
            kilo::app::reset_screen(&mut std::io::stdout());
            let _ = kilo::restore_terminal();
            default_panic(info);
        }));
    });
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(e) = configure_logging(path) {
            eprintln!("kilo: cannot open log file {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }
    install_panic_hook();

    let config = EditorConfig {
        quit_times: args.quit_times,
        ..EditorConfig::default()
    };

    match kilo::run(config, args.file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(EditorError::Signal(signal)) => {
            // The terminal is restored by now; die the way the signal would have.
            tracing::info!(target: "editor", signal, "terminated");
            let _ = signal_hook::low_level::emulate_default_handler(signal);
            ExitCode::from(u8::try_from(128 + signal).unwrap_or(u8::MAX))
        }
        Err(e) => {
            tracing::error!(target: "editor", error = %e, "fatal");
            eprintln!("kilo: {e}");
            ExitCode::FAILURE
        }
    }
}
