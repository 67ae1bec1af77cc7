use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::transport::BabelNetApi;
use crate::types::{Edge, RelationGroup, SynsetRecord};

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct SenseInfo {
    pub lemma : String,
    pub language : String,
    pub source : String
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct GlossInfo {
    /// Lemma of the sense the gloss was taken from, or the raw sense id
    /// when the synset has no such sense.
    pub lemma : String,
    pub source_sense : String,
    pub gloss : String,
    pub source : String
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct Connection {
    pub target : String,
    pub group : RelationGroup
}

/// A single BabelNet synset together with a handle on the API it came from.
///
/// The outgoing edges are fetched on the first relation query and kept for
/// the lifetime of the value, even if the service returned nothing.
#[derive(Clone)]
pub struct Synset<'a> {
    api : &'a dyn BabelNetApi,
    id : String,
    record : SynsetRecord,
    sense_lemmas : HashMap<String, String>,
    edges : OnceCell<Vec<Edge>>
}

impl<'a> Synset<'a> {
    pub fn new(api : &'a dyn BabelNetApi, id : &str, record : SynsetRecord) -> Synset<'a> {
        // glosses refer to their senses by id, so this map must exist
        // before any gloss is resolved
        let mut sense_lemmas = HashMap::new();
        for sense in record.senses.iter().flatten() {
            if let Some(ref id_sense) = sense.properties.id_sense {
                sense_lemmas.insert(id_sense.clone(), sense.properties.full_lemma.clone());
            }
        }
        Synset {
            api : api,
            id : id.to_string(),
            record : record,
            sense_lemmas : sense_lemmas,
            edges : OnceCell::new()
        }
    }

    pub fn id(&self) -> &str { &self.id }

    pub fn record(&self) -> &SynsetRecord { &self.record }

    /// Any top-level field of the response by its JSON name, typed or not.
    /// Sense ids come back as strings.
    pub fn field(&self, name : &str) -> Option<Value> {
        if let Some(value) = self.record.extra.get(name) {
            return Some(value.clone());
        }
        match serde_json::to_value(&self.record) {
            Ok(Value::Object(mut fields)) => fields.remove(name),
            _ => None
        }
    }

    pub fn get_main_sense(&self) -> Result<&str> {
        self.record.main_sense.as_deref()
            .ok_or_else(|| Error::missing(&self.id, "mainSense"))
    }

    pub fn synset_type(&self) -> Result<&str> {
        self.record.synset_type.as_deref()
            .ok_or_else(|| Error::missing(&self.id, "synsetType"))
    }

    /// All senses, most frequent first. Equal frequencies keep the order
    /// the service sent them in.
    pub fn get_senses(&self) -> Result<Vec<SenseInfo>> {
        let senses = self.record.senses.as_ref()
            .ok_or_else(|| Error::missing(&self.id, "senses"))?;
        let mut props : Vec<_> = senses.iter().map(|s| &s.properties).collect();
        props.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));
        Ok(props.into_iter().map(|p| SenseInfo {
            lemma : p.full_lemma.clone(),
            language : p.language.clone(),
            source : p.source.clone()
        }).collect())
    }

    pub fn get_categories(&self) -> Result<Vec<String>> {
        let categories = self.record.categories.as_ref()
            .ok_or_else(|| Error::missing(&self.id, "categories"))?;
        Ok(categories.iter().map(|c| c.category.clone()).collect())
    }

    pub fn get_glosses(&self) -> Result<Vec<GlossInfo>> {
        let glosses = self.record.glosses.as_ref()
            .ok_or_else(|| Error::missing(&self.id, "glosses"))?;
        Ok(glosses.iter().map(|g| GlossInfo {
            lemma : self.sense_lemma(&g.source_sense).to_string(),
            source_sense : g.source_sense.clone(),
            gloss : g.gloss.clone(),
            source : g.source.clone()
        }).collect())
    }

    /// Exact id first, then the lower-cased id, then the id itself.
    fn sense_lemma<'s>(&'s self, source_sense : &'s str) -> &'s str {
        if let Some(lemma) = self.sense_lemmas.get(source_sense) {
            return lemma.as_str();
        }
        match self.sense_lemmas.get(&source_sense.to_lowercase()) {
            Some(lemma) => lemma.as_str(),
            None => source_sense
        }
    }

    pub fn get_translations(&self) -> Result<&[Value]> {
        self.record.translations.as_deref()
            .ok_or_else(|| Error::missing(&self.id, "translations"))
    }

    /// The outgoing edges, fetched on first use. A transport error is
    /// returned and nothing is cached, so a later call tries again.
    pub fn edges(&self) -> Result<&[Edge]> {
        if let Some(edges) = self.edges.get() {
            return Ok(edges.as_slice());
        }
        debug!(synset = %self.id, "fetching outgoing edges");
        let fetched = self.api.outgoing_edges(&self.id)?;
        Ok(self.edges.get_or_init(|| fetched).as_slice())
    }

    pub fn get_connections(&self) -> Result<Vec<Connection>> {
        Ok(self.edges()?.iter().map(|e| Connection {
            target : e.target.clone(),
            group : e.pointer.relation_group.clone()
        }).collect())
    }

    /// Targets of the edges in `group`. An empty edge list (including one
    /// caused by an undecodable response) gives an empty result.
    pub fn related(&self, group : &RelationGroup) -> Result<Vec<String>> {
        Ok(self.edges()?.iter()
            .filter(|e| &e.pointer.relation_group == group)
            .map(|e| e.target.clone())
            .collect())
    }

    pub fn get_hypernyms(&self) -> Result<Vec<String>> { self.related(&RelationGroup::Hypernym) }

    pub fn get_hyponyms(&self) -> Result<Vec<String>> { self.related(&RelationGroup::Hyponym) }

    pub fn get_holonyms(&self) -> Result<Vec<String>> { self.related(&RelationGroup::Holonym) }

    pub fn get_meronyms(&self) -> Result<Vec<String>> { self.related(&RelationGroup::Meronym) }
}

impl<'a> fmt::Debug for Synset<'a> {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Synset")
            .field("id", &self.id)
            .field("record", &self.record)
            .field("edges", &self.edges.get())
            .finish()
    }
}

impl<'a> fmt::Display for Synset<'a> {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        let text = serde_json::to_string_pretty(&self.record).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
