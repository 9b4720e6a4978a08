#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout has non-finite coordinates at node {node}")]
    NonFiniteCoordinates { node: String },
    #[error("{what}: parabola fit is implausible ({issues})")]
    ImplausibleFit { what: &'static str, issues: String },
    #[error("invalid calibration options: {0}")]
    InvalidOptions(String),
    #[error("unknown stress mode: {0}")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
