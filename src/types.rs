//! Typed records for the JSON documents returned by the BabelNet API.
//!
//! Every field the service may leave out is optional, so an empty response
//! decodes to the `Default` value and the accessors on `Synset` can report
//! exactly which field was missing.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One hit of `getSynsetIds` or `getSynsetIdsFromResourceID`.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SynsetRef {
    pub id : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source : Option<String>,
    /// Number of outgoing edges, filled in by `SynsetList::sort_by_relevance`.
    #[serde(rename = "semRels", default, skip_serializing_if = "Option::is_none")]
    pub sem_rels : Option<usize>
}

impl SynsetRef {
    pub fn new(id : &str) -> SynsetRef {
        SynsetRef { id : id.to_string(), pos : None, source : None, sem_rels : None }
    }
}

/// The document returned by `getSynset`.
#[derive(Debug,Clone,Default,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynsetRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senses : Option<Vec<Sense>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glosses : Option<Vec<Gloss>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories : Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations : Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_sense : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synset_type : Option<String>,
    /// Everything else the service sends (domains, images, wnOffsets, ...).
    #[serde(flatten)]
    pub extra : Map<String, Value>
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Sense {
    pub properties : SenseProperties
}

#[derive(Debug,Clone,Default,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenseProperties {
    #[serde(default)]
    pub full_lemma : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_lemma : Option<String>,
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub id_sense : Option<String>,
    #[serde(default)]
    pub language : String,
    #[serde(default)]
    pub source : String,
    #[serde(default)]
    pub frequency : f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sense_key : Option<String>
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gloss {
    #[serde(default)]
    pub source : String,
    #[serde(default, deserialize_with = "sense_id")]
    pub source_sense : String,
    #[serde(default)]
    pub language : String,
    pub gloss : String
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Category {
    pub category : String,
    #[serde(default)]
    pub language : String
}

/// One outgoing edge from `getOutgoingEdges`.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub target : String,
    #[serde(default)]
    pub language : String,
    pub pointer : Pointer,
    #[serde(default)]
    pub weight : f64,
    #[serde(default)]
    pub normalized_weight : f64
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pointer {
    pub relation_group : RelationGroup,
    #[serde(default)]
    pub name : String,
    #[serde(default)]
    pub short_name : String,
    #[serde(default)]
    pub f_symbol : String
}

/// Relation groups that get their own accessor; any other label is kept
/// verbatim in `Other`.
#[derive(Debug,Clone,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationGroup {
    Hypernym,
    Hyponym,
    Holonym,
    Meronym,
    Other(String)
}

impl RelationGroup {
    pub fn as_str(&self) -> &str {
        match *self {
            RelationGroup::Hypernym => "HYPERNYM",
            RelationGroup::Hyponym => "HYPONYM",
            RelationGroup::Holonym => "HOLONYM",
            RelationGroup::Meronym => "MERONYM",
            RelationGroup::Other(ref label) => label
        }
    }
}

impl From<String> for RelationGroup {
    fn from(label : String) -> RelationGroup {
        match label.as_str() {
            "HYPERNYM" => RelationGroup::Hypernym,
            "HYPONYM" => RelationGroup::Hyponym,
            "HOLONYM" => RelationGroup::Holonym,
            "MERONYM" => RelationGroup::Meronym,
            _ => RelationGroup::Other(label)
        }
    }
}

impl From<RelationGroup> for String {
    fn from(group : RelationGroup) -> String {
        match group {
            RelationGroup::Other(label) => label,
            g => g.as_str().to_string()
        }
    }
}

impl fmt::Display for RelationGroup {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Part-of-speech tags accepted by the search endpoints.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv
}

impl Pos {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Pos::Noun => "NOUN",
            Pos::Verb => "VERB",
            Pos::Adj => "ADJ",
            Pos::Adv => "ADV"
        }
    }
}

impl FromStr for Pos {
    type Err = String;
    fn from_str(s : &str) -> Result<Pos, String> {
        match s.to_uppercase().as_str() {
            "NOUN" | "N" => Ok(Pos::Noun),
            "VERB" | "V" => Ok(Pos::Verb),
            "ADJ" | "ADJECTIVE" | "A" => Ok(Pos::Adj),
            "ADV" | "ADVERB" | "R" => Ok(Pos::Adv),
            _ => Err(format!("Unknown part of speech: {}", s))
        }
    }
}

// Sense ids (idSense, sourceSense) come as numbers in v5 responses and as
// strings in older ones; both are kept as strings so they can be matched.
fn string_or_number<'de, D>(deserializer : D) -> Result<Option<String>, D::Error>
        where D : Deserializer<'de> {
    let value : Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None
    })
}

fn sense_id<'de, D>(deserializer : D) -> Result<String, D::Error>
        where D : Deserializer<'de> {
    Ok(string_or_number(deserializer)?.unwrap_or_default())
}
