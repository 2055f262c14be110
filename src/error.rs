//! Application error type.
//!
//! Every failure carries the process exit code it should map to:
//!
//! - `2`: user input or configuration
//! - `3`: fitting / numerical failure
//! - `4`: terminal or I/O failure

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub const INPUT: u8 = 2;
    pub const FIT: u8 = 3;
    pub const IO: u8 = 4;

    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Bad user input or configuration.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(Self::INPUT, message)
    }

    /// The solver or a numerical post-processing step failed.
    pub fn fit(message: impl Into<String>) -> Self {
        Self::new(Self::FIT, message)
    }

    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: &str, err: std::io::Error) -> Self {
        Self::new(Self::IO, format!("{context}: {err}"))
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
