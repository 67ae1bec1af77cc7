//! Client for the BabelNet HTTP API.
//!
//! Requests go out through [`Transport`], which asks for gzip bodies and
//! decodes them into the typed records of [`types`]. [`BabelNet`] wraps the
//! results into [`Synset`] and [`SynsetList`], which fetch edges and full
//! synset records on demand and cache them for as long as they live.
extern crate flate2;
extern crate handlebars;
extern crate regex;
extern crate reqwest;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate thiserror;
extern crate tracing;

pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod synset;
pub mod synset_list;
pub mod transport;
pub mod types;

pub use client::{is_synset_id, BabelNet};
pub use config::Config;
pub use error::{Error, Result};
pub use synset::{Connection, GlossInfo, SenseInfo, Synset};
pub use synset_list::{MainSense, SynsetList};
pub use transport::{BabelNetApi, Endpoint, SearchOptions, Transport};
pub use types::{Edge, Pos, RelationGroup, SynsetRecord, SynsetRef};
