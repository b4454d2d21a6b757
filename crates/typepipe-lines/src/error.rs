use thiserror::Error;

/// Errors that abort the line loop
#[derive(Debug, Error)]
pub enum PipeError {
    #[error("failed to read input line")]
    Read {
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write output")]
    Write {
        #[source]
        source: std::io::Error,
    },
    #[error("command `{program}` could not be spawned")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write to stdin of `{program}`")]
    ChildInput {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for `{program}`")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PipeError>;
