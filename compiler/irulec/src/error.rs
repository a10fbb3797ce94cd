//! Driver failures. Problems in the iRule itself are diagnostics, not
//! `CliError`s.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown option '{0}'")]
    UnknownFlag(String),
    #[error("invalid --color value '{0}' (expected auto, always or never)")]
    InvalidColor(String),
    #[error("more than one input file: '{first}' and '{second}'")]
    ExtraPath { first: String, second: String },
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
