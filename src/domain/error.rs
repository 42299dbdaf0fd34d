// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Malformed response body: {0}")]
    MalformedBody(String),
    #[error("Invalid custom element name: {0}")]
    InvalidElementName(String),
    #[error("Element already defined: {0}")]
    ElementAlreadyDefined(String),
}
