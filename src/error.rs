use std::io;
use std::path::PathBuf;

/// Errors raised while loading stock, validating a search or rendering a schematic.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("target resistance must be a number greater than zero (got {0})")]
    InvalidTarget(f64),
    #[error("the number of resistors must be between 1 and {available} (got {max_units})")]
    InvalidMaxUnits { max_units: usize, available: usize },
    #[error("the stopping percentage must be between 0 and 100 (got {0})")]
    InvalidTolerance(f64),
    #[error("parallel or series combination has no finite resistance")]
    DegenerateNetwork,
    #[error("malformed topology at position {pos}: {reason}")]
    MalformedTopology { pos: usize, reason: &'static str },
    #[error("line {line} is not formatted as `value,quantity`: {content:?}")]
    BadInventoryFormat { line: usize, content: String },
    #[error("inventory file {0:?} was not found")]
    InventoryNotFound(PathBuf),
    #[error("unknown resistor series {0:?}, expected one of E3, E6, E12 or E24")]
    UnknownSeries(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("could not evaluate {0:?} to a resistance")]
    BadExpression(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;
