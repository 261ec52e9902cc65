use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod api;
pub mod conversation;
pub mod model;
pub mod service;

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Id(pub String);

impl Id {
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("message content is empty")]
    EmptyContent,
    #[error("message not found: {0}")]
    NotFound(Id),

    #[error(transparent)]
    _Api(#[from] crate::api::Error),
}
