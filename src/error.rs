use std::io;
use thiserror::Error;

/// Errors surfaced by the client.
///
/// Bodies that fail to decompress or decode are not errors here: the
/// transport turns them into empty values and logs the raw body.
#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("could not read file: {0}")]
    Io(#[from] io::Error),

    #[error("could not parse json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("synset {synset}: missing field `{field}`")]
    MissingField { synset : String, field : &'static str },

    #[error("{given} target languages requested, at most {max} are allowed")]
    TooManyTargetLangs { given : usize, max : usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn missing(synset : &str, field : &'static str) -> Error {
        Error::MissingField { synset : synset.to_string(), field : field }
    }
}
