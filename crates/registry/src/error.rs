use derive_more::{Display, Error};
use miette::Diagnostic;
use reqwest::StatusCode;

#[derive(Debug, Display, Error, Diagnostic)]
#[display("Failed to fetch {url}: {error}")]
pub struct NetworkError {
    pub url: String,
    #[error(source)]
    pub error: reqwest::Error,
}

#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum RegistryError {
    #[diagnostic(code(spartan_registry::network_error))]
    Network(NetworkError),

    #[display("The registry responded to {url} with {status}")]
    #[diagnostic(code(spartan_registry::unsuccessful_status))]
    UnsuccessfulStatus {
        url: String,
        #[error(not(source))]
        status: StatusCode,
    },

    #[display("Failed to parse the metadata from {url}: {error}")]
    #[diagnostic(code(spartan_registry::deserialization_error))]
    Deserialization {
        url: String,
        #[error(source)]
        error: reqwest::Error,
    },
}
