use log::warn;
use rocket::catch;
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde_json::{json, Value};

use std::sync::PoisonError;

use crate::analysis::gateway::GatewayError;
use crate::documents::tree::TreeError;
use crate::sessions::book::SessionError;

#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Deal not found: {0}")]
    DealNotFound(String),
    #[error("Deal already exists: {0}")]
    DealExists(String),
    #[error("Generic internal error: {0}")]
    Generic(String),
}

impl InternalError {
    pub fn status(&self) -> Status {
        match self {
            InternalError::Tree(TreeError::CategoryNotFound(_))
            | InternalError::Tree(TreeError::ItemNotFound(_))
            | InternalError::Session(_)
            | InternalError::DealNotFound(_) => Status::NotFound,
            InternalError::Tree(TreeError::InvalidParent(_))
            | InternalError::Tree(TreeError::NotADocument(_)) => Status::UnprocessableEntity,
            InternalError::Tree(TreeError::DuplicateId(_)) | InternalError::DealExists(_) => {
                Status::Conflict
            }
            InternalError::Gateway(e) => Status::new(e.status_code()),
            InternalError::Generic(_) => Status::InternalServerError,
        }
    }
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Generic(e.to_string())
    }
}

impl From<rocket::figment::Error> for InternalError {
    fn from(e: rocket::figment::Error) -> InternalError {
        InternalError::Generic(e.to_string())
    }
}

impl From<&str> for InternalError {
    fn from(s: &str) -> InternalError {
        InternalError::Generic(s.to_string())
    }
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        warn!("{} {} failed with {}: {}", request.method(), request.uri(), status, self);

        (status, Json(json!({ "error": self.to_string() }))).respond_to(request)
    }
}

pub type InternalResult<T> = Result<T, InternalError>;

/// Gives requests rejected before any handler runs (malformed or mistyped
/// bodies, unmatched routes) the same `{error}` body as handler failures.
#[catch(default)]
pub fn json_catcher(status: Status, request: &Request<'_>) -> (Status, Json<Value>) {
    warn!("{} {} rejected with {}", request.method(), request.uri(), status);

    let message = status.reason().unwrap_or("Unknown error");
    (status, Json(json!({ "error": message })))
}
