use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Failed to prepare iconset directory {p}: {source}", p = path.display())]
    Staging { path: PathBuf, source: io::Error },
    #[error("Failed to write vector template {p}: {source}", p = path.display())]
    Template { path: PathBuf, source: io::Error },
    #[error("Failed to move {p} into the iconset: {source}", p = path.display())]
    Stage { path: PathBuf, source: io::Error },
    #[error("Iconset directory {p} must end in .iconset", p = .0.display())]
    NotAnIconset(PathBuf),
    #[error("No icon sizes configured")]
    EmptySizes,
    #[error("Icon {0} has a size of 0px")]
    ZeroSize(String),
    #[error("File name {0} is used by more than one icon size")]
    DuplicateFileName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
