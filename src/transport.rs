//! HTTP access to the BabelNet REST endpoints.
//!
//! Every call is one blocking GET that asks for a gzip body. A body that
//! cannot be decompressed or decoded never fails the call: it is logged and
//! replaced by an empty value.
use std::io;
use std::io::prelude::*;
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT_ENCODING;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{Edge, Pos, SynsetRecord, SynsetRef};

/// The service answers with an error message for more than three.
pub const MAX_TARGET_LANGS : usize = 3;

/// Source used by resource lookups when none is given.
pub const DEFAULT_RESOURCE_SOURCE : &str = "WIKI";

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Endpoint {
    SynsetIds,
    Synset,
    Senses,
    OutgoingEdges,
    SynsetIdsFromResourceId
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match *self {
            Endpoint::SynsetIds => "getSynsetIds",
            Endpoint::Synset => "getSynset",
            Endpoint::Senses => "getSenses",
            Endpoint::OutgoingEdges => "getOutgoingEdges",
            Endpoint::SynsetIdsFromResourceId => "getSynsetIdsFromResourceID"
        }
    }
}

/// Ordered query parameters, without the API key.
#[derive(Debug,Clone,Default,PartialEq)]
pub struct Query(Vec<(&'static str, String)>);

impl Query {
    pub fn new() -> Query { Query(Vec::new()) }

    pub fn param(mut self, name : &'static str, value : &str) -> Query {
        self.0.push((name, value.to_string()));
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn opt_param(self, name : &'static str, value : Option<&str>) -> Query {
        match value {
            Some(v) => self.param(name, v),
            None => self
        }
    }

    /// Repeats the parameter once per value, e.g. `targetLang=DE&targetLang=FR`.
    pub fn repeated(mut self, name : &'static str, values : &[String]) -> Query {
        for v in values {
            self.0.push((name, v.clone()));
        }
        self
    }

    pub fn pairs(&self) -> &[(&'static str, String)] { &self.0 }
}

/// Options shared by the two synset search endpoints.
#[derive(Debug,Clone,PartialEq)]
pub struct SearchOptions {
    pub lang : String,
    pub pos : Option<Pos>,
    pub source : Option<String>,
    pub target_langs : Vec<String>
}

impl Default for SearchOptions {
    fn default() -> SearchOptions {
        SearchOptions {
            lang : "EN".to_string(),
            pos : None,
            source : None,
            target_langs : Vec::new()
        }
    }
}

impl SearchOptions {
    pub fn new() -> SearchOptions { SearchOptions::default() }

    pub fn lang(mut self, lang : &str) -> SearchOptions {
        self.lang = lang.to_string();
        self
    }

    pub fn pos(mut self, pos : Pos) -> SearchOptions {
        self.pos = Some(pos);
        self
    }

    pub fn source(mut self, source : &str) -> SearchOptions {
        self.source = Some(source.to_string());
        self
    }

    pub fn target_lang(mut self, lang : &str) -> SearchOptions {
        self.target_langs.push(lang.to_string());
        self
    }
}

/// The raw operations of the service. `Synset` and `SynsetList` call back
/// through this trait when they need edges or full synset records.
pub trait BabelNetApi {
    fn synset_ids(&self, lemma : &str, options : &SearchOptions) -> Result<Vec<SynsetRef>>;

    fn synset(&self, id : &str, target_langs : &[String]) -> Result<SynsetRecord>;

    /// Raw `getSenses` document; the same data is available, typed, from
    /// `Synset::get_senses`.
    fn senses(&self, word : &str, lang : &str) -> Result<Value>;

    fn outgoing_edges(&self, id : &str) -> Result<Vec<Edge>>;

    fn synset_ids_from_resource(&self, resource_id : &str, options : &SearchOptions)
        -> Result<Vec<SynsetRef>>;
}

/// Failure to turn a response body into a value. Handled inside this module.
#[derive(Debug,Error)]
pub enum DecodeError {
    #[error("body is not gzip data: {0}")]
    Gzip(#[from] io::Error),
    #[error("body is not valid json: {source}")]
    Json { source : serde_json::Error, text : String }
}

pub fn try_decode<T : DeserializeOwned>(body : &[u8]) -> ::std::result::Result<T, DecodeError> {
    let mut text = String::new();
    GzDecoder::new(body).read_to_string(&mut text)?;
    serde_json::from_str(&text).map_err(|e| DecodeError::Json { source : e, text : text })
}

/// Decompress and decode a response body, falling back to `T::default()`.
pub fn decode_gzip_json<T : DeserializeOwned + Default>(body : &[u8]) -> T {
    match try_decode(body) {
        Ok(value) => value,
        Err(DecodeError::Json { source, text }) => {
            warn!(error = %source, body = %text, "could not decode response, using empty result");
            T::default()
        },
        Err(e) => {
            warn!(error = %e, body = %String::from_utf8_lossy(body),
                  "could not decompress response, using empty result");
            T::default()
        }
    }
}

pub struct Transport {
    config : Config,
    base : Url,
    http : Client
}

impl Transport {
    pub fn new(config : Config) -> Result<Transport> {
        config.validate()?;
        let base = config.base()?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Transport { config : config, base : base, http : http })
    }

    pub fn config(&self) -> &Config { &self.config }

    /// The full request URL, key included.
    pub fn url(&self, endpoint : Endpoint, query : &Query) -> Result<Url> {
        let mut url = self.base.join(endpoint.path())
            .map_err(|e| Error::Config(format!("bad endpoint url: {}", e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            for &(name, ref value) in query.pairs() {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("key", &self.config.key);
        }
        Ok(url)
    }

    fn get<T : DeserializeOwned + Default>(&self, endpoint : Endpoint, query : Query) -> Result<T> {
        let url = self.url(endpoint, &query)?;
        debug!(endpoint = endpoint.path(), params = ?query.pairs(), "requesting");
        let response = self.http.get(url)
            .header(ACCEPT_ENCODING, "gzip")
            .send()?
            .error_for_status()?;
        let body = response.bytes()?;
        Ok(decode_gzip_json(&body))
    }
}

impl BabelNetApi for Transport {
    fn synset_ids(&self, lemma : &str, options : &SearchOptions) -> Result<Vec<SynsetRef>> {
        let query = Query::new()
            .param("lemma", lemma)
            .param("searchLang", &options.lang)
            .opt_param("pos", options.pos.map(|p| p.as_str()))
            .opt_param("source", options.source.as_deref())
            .repeated("targetLang", &options.target_langs);
        self.get(Endpoint::SynsetIds, query)
    }

    fn synset(&self, id : &str, target_langs : &[String]) -> Result<SynsetRecord> {
        let query = Query::new()
            .param("id", id)
            .repeated("targetLang", target_langs);
        self.get(Endpoint::Synset, query)
    }

    fn senses(&self, word : &str, lang : &str) -> Result<Value> {
        let query = Query::new()
            .param("word", word)
            .param("lang", lang);
        let value : Value = self.get(Endpoint::Senses, query)?;
        if value.is_null() {
            Ok(Value::Object(Map::new()))
        } else {
            Ok(value)
        }
    }

    fn outgoing_edges(&self, id : &str) -> Result<Vec<Edge>> {
        self.get(Endpoint::OutgoingEdges, Query::new().param("id", id))
    }

    fn synset_ids_from_resource(&self, resource_id : &str, options : &SearchOptions)
            -> Result<Vec<SynsetRef>> {
        let query = Query::new()
            .param("id", resource_id)
            .param("lang", &options.lang)
            .opt_param("pos", options.pos.map(|p| p.as_str()))
            .param("source", options.source.as_deref().unwrap_or(DEFAULT_RESOURCE_SOURCE))
            .repeated("targetLang", &options.target_langs);
        self.get(Endpoint::SynsetIdsFromResourceId, query)
    }
}
