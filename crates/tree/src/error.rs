use derive_more::{Display, Error};
use miette::Diagnostic;
use std::{io, path::PathBuf};

/// Error type of [`Tree`](crate::Tree) operations.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum TreeError {
    #[display("No file was found at {path}")]
    #[diagnostic(code(spartan_tree::not_found))]
    NotFound {
        #[error(not(source))]
        path: String,
    },

    #[display("Failed to read file at {file_path:?}: {error}")]
    #[diagnostic(code(spartan_tree::read_file))]
    ReadFile {
        file_path: PathBuf,
        #[error(source)]
        error: io::Error,
    },

    #[display("Failed to create the parent directory at {parent_dir:?}: {error}")]
    #[diagnostic(code(spartan_tree::create_dir))]
    CreateDir {
        parent_dir: PathBuf,
        #[error(source)]
        error: io::Error,
    },

    #[display("Failed to write to file at {file_path:?}: {error}")]
    #[diagnostic(code(spartan_tree::write_file))]
    WriteFile {
        file_path: PathBuf,
        #[error(source)]
        error: io::Error,
    },

    #[display("Failed to parse {path} as JSON: {error}")]
    #[diagnostic(code(spartan_tree::parse_json))]
    ParseJson {
        path: String,
        #[error(source)]
        error: serde_json::Error,
    },
}
