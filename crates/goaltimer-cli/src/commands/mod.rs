pub mod config;
pub mod format;
pub mod run;
pub mod shell;

/// Exit status of a finished command.
pub type ExitCode = i32;

/// Exit status after Ctrl-C, as a shell reports SIGINT.
pub const INTERRUPTED: ExitCode = 130;

pub type CommandResult = Result<ExitCode, Box<dyn std::error::Error>>;

/// Current-thread runtime: every state change happens on one task.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
