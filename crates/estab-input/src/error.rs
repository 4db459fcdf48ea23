use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid species {name:?}: {reason}")]
    InvalidSpecies { name: String, reason: String },

    #[error("invalid site on row {row}: {reason}")]
    InvalidSite { row: usize, reason: String },

    #[error("invalid {table} entry for class {class}: {reason}")]
    InvalidTolerance {
        table:  &'static str,
        class:  u8,
        reason: String,
    },

    #[error("duplicate {kind} name {name:?}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("unknown climate region {0:?}")]
    UnknownRegion(String),

    #[error("input parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type InputResult<T> = Result<T, InputError>;
