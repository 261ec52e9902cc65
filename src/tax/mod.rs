use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod api;
pub mod model;
pub mod policy;
pub mod service;

type Result<T> = std::result::Result<T, Error>;

pub const PAGE_SIZE: u32 = 10;

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Id(pub String);

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("tax case not found: {0}")]
    NotFound(Id),
    #[error("not allowed to modify this tax case")]
    Forbidden,

    #[error(transparent)]
    _Api(#[from] crate::api::Error),
}
