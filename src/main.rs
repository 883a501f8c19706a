// allocviz: interactive visualizer for one large memory allocation

use std::io;
use std::process::ExitCode;

use clap::Parser;
use ratatui::{backend::CrosstermBackend, Terminal};

use allocviz::config::Args;
use allocviz::errors::AppError;
use allocviz::input::CrosstermInput;
use allocviz::memory::allocator::SystemAllocator;
use allocviz::memory::engine::AllocationEngine;
use allocviz::signals::{self, ShutdownFlag};
use allocviz::terminal::TerminalGuard;
use allocviz::ui::{exit_status, App};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = args.init_logging() {
        eprintln!(
            "Warning: cannot open log file '{}': {}",
            args.log_file.display(),
            e
        );
    }
    log::info!("allocviz starting with {:?}", args);

    let shutdown = ShutdownFlag::new();
    if let Err(e) = signals::install(&shutdown) {
        log::warn!("Signal handlers not installed: {}", e);
    }

    let engine = AllocationEngine::new(SystemAllocator, args.engine_config());
    let mut app = App::new(
        engine,
        CrosstermInput,
        shutdown,
        args.unit,
        args.poll_interval(),
    );

    // Set up terminal
    let guard = match TerminalGuard::enter() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: cannot switch the terminal to raw mode: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let res = Terminal::new(CrosstermBackend::new(io::stdout()))
        .map_err(AppError::from)
        .and_then(|mut terminal| app.run(&mut terminal));

    // Restore terminal before anything is printed
    guard.restore();
    drop(app);

    match &res {
        Ok(reason) => {
            log::info!("Exiting after {:?}", reason);
            println!("Memory freed");
        }
        Err(err) => {
            log::error!("Exiting with error: {}", err);
            eprintln!("Error: {}", err);
        }
    }
    ExitCode::from(exit_status(&res))
}
