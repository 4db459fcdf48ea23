use estab_core::Year;
use estab_input::InputError;
use estab_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("no climate supplied for region {region:?} in {year}")]
    MissingClimate { region: String, year: Year },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("site input error: {0}")]
    Input(#[from] InputError),
}

pub type SimResult<T> = Result<T, SimError>;
