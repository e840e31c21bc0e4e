//! CLI error handling with user-friendly messages.

use gujin::resolver::ResolverError;
use gujin::sdk::SdkLoadError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Place name resolution failed
    Resolve(ResolverError),
    /// Map bootstrap failed
    Map(SdkLoadError),
    /// Terminal I/O failed
    Io(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Resolve(ResolverError::Http(_)) = self {
            eprintln!();
            eprintln!("The resolution backend appears unreachable. Either:");
            eprintln!("  1. Start the backend and pass --backend-url");
            eprintln!("  2. Use --offline to query the builtin gazetteer");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Resolve(e) => write!(f, "{}", e),
            CliError::Map(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl From<ResolverError> for CliError {
    fn from(e: ResolverError) -> Self {
        Self::Resolve(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
