use decor_library::diag::EcoString;
use std::fmt;

pub enum CliError {
    /// The diagnostics were already printed.
    Execution,
    /// A command line argument could not be read.
    Input(EcoString),
    IoError(std::io::Error),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError(err)
    }
}

// `main` prints the error with `Debug`, so it doubles as the user-facing form.
impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Execution => f.write_str("the call failed"),
            CliError::Input(message) => write!(f, "invalid input: {message}"),
            CliError::IoError(err) => write!(f, "i/o error: {err}"),
        }
    }
}
