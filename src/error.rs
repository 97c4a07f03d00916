use std::io;

use thiserror::Error;

use crate::env::RenderMode;

/// Errors produced by environments, agents and the interaction task
#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported render mode `{0}` (expected one of: ansi, rgb_array, human, human2)")]
    UnsupportedRenderMode(String),
    #[error("render mode `{0}` needs the `viz` feature")]
    RenderBackendUnavailable(RenderMode),
    #[error("invalid action index {0}, must be in 0..4")]
    InvalidAction(usize),
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("invalid decay schedule: {0}")]
    InvalidDecay(&'static str),
    #[error("terminal surface error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
