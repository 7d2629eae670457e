/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*             Public API              */
/***************************************/

/// Errors a `Request` can be rejected with. Rejecting a request never
/// mutates `ElevatorSystem` state; the caller may correct and re-submit.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    #[error("invalid call_type {0:?}, expected \"in\" or \"out\"")]
    InvalidCallType(String),

    #[error("invalid sense {0:?}, expected \"upward\" or \"downward\"")]
    InvalidSense(String),

    #[error("floor {floor} out of range, n_floors is {n_floors}")]
    FloorOutOfRange { floor: u32, n_floors: u32 },

    #[error("floor must be a positive integer, got {0}")]
    NonPositiveFloor(i64),

    #[error("state is missing elevator id {0}")]
    MissingElevatorState(u32),

    #[error("an \"in\" call requires elevator_id to be set")]
    MissingElevatorId,

    #[error("state key {0:?} is not a valid elevator id")]
    InvalidStateKey(String),
}

/// Errors loading `config.toml` — kept separate from `DispatchError` since
/// these are process-bootstrap failures, not rejected dispatcher input.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
