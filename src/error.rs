//! The error type returned by the file-level loaders.
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::lex::ParseError;

/// Everything that can stop a load.
#[derive(Debug, Error)]
pub enum Error {
  /// A required file could not be read.
  #[error("failed to read `{}`: {source}", .path.display())]
  Io {
    /// The file that was being read.
    path: PathBuf,
    /// The underlying I/O failure.
    source: io::Error,
  },
  /// The content of an `.obj` or `.mtl` file is malformed.
  #[error("`{}` {source}", .path.display())]
  Parse {
    /// The file the malformed line belongs to.
    path: PathBuf,
    /// Where and what.
    source: ParseError,
  },
  /// Load options could not be read.
  #[error("invalid load options: {0}")]
  Config(#[from] toml::de::Error),
}

impl Error {
  pub(crate) fn io(path: &Path, source: io::Error) -> Self {
    Error::Io {
      path: path.to_path_buf(),
      source,
    }
  }

  pub(crate) fn parse(path: &Path, source: ParseError) -> Self {
    Error::Parse {
      path: path.to_path_buf(),
      source,
    }
  }

  /// The line the problem was found on, for content errors.
  pub fn line_number(&self) -> Option<usize> {
    match self {
      Error::Parse { source, .. } => Some(source.line_number),
      _ => None,
    }
  }
}
