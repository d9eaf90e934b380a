//! Error types for the `allee-sim` binary.
//!
//! [`SimError`] is what `main` propagates. [`CommandError`] describes a bad
//! input line; the command loop reports it and keeps reading.

/// Top-level error for the simulator binary.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: allee_core::ConfigError,
    },

    /// Reading commands or writing output failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing an export failed.
    #[error("export error: {source}")]
    Export {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// A command line that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("unknown command `{word}` (try `help`)")]
    UnknownCommand {
        /// The unrecognized word.
        word: String,
    },

    /// A required argument is missing.
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        /// The command being parsed.
        command: &'static str,
        /// What was expected.
        expected: &'static str,
    },

    /// An argument is not a usable number.
    #[error("`{value}` is not a valid {expected}")]
    InvalidNumber {
        /// The offending text.
        value: String,
        /// What was expected.
        expected: &'static str,
    },

    /// `tech` was given an unknown upgrade.
    #[error("unknown technology `{name}` (cull, frenzy, nanny)")]
    UnknownTechnology {
        /// The offending name.
        name: String,
    },

    /// `set` was given an unknown parameter.
    #[error("unknown parameter `{name}` (x, r, a)")]
    UnknownParameter {
        /// The offending name.
        name: String,
    },
}
