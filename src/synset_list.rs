use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Bound, Index, IndexMut, RangeBounds};
use std::slice;

use tracing::debug;

use crate::error::Result;
use crate::synset::Synset;
use crate::transport::BabelNetApi;
use crate::types::{Edge, SynsetRef};

/// The main sense of one entry, as listed by `SynsetList::list_main_senses`.
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct MainSense {
    pub id : String,
    pub synset_type : String,
    pub main_sense : String
}

/// A ranked list of synset references returned by a search.
///
/// Full synsets and edge lists resolved through the list are cached by id,
/// so asking twice about the same entry costs one request. Both enrichment
/// methods still make one request per unresolved entry.
pub struct SynsetList<'a> {
    api : &'a dyn BabelNetApi,
    entries : Vec<SynsetRef>,
    synsets : HashMap<String, Synset<'a>>,
    edges : HashMap<String, Vec<Edge>>
}

impl<'a> SynsetList<'a> {
    pub fn new(api : &'a dyn BabelNetApi, entries : Vec<SynsetRef>) -> SynsetList<'a> {
        SynsetList {
            api : api,
            entries : entries,
            synsets : HashMap::new(),
            edges : HashMap::new()
        }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn entries(&self) -> &[SynsetRef] { &self.entries }

    pub fn get(&self, index : usize) -> Option<&SynsetRef> { self.entries.get(index) }

    pub fn iter(&self) -> slice::Iter<SynsetRef> { self.entries.iter() }

    pub fn contains(&self, item : &SynsetRef) -> bool { self.entries.contains(item) }

    pub fn contains_id(&self, id : &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    /// A new list over `range`. Out of range bounds are clamped, and cached
    /// data for the kept entries carries over.
    pub fn slice<R : RangeBounds<usize>>(&self, range : R) -> SynsetList<'a> {
        let len = self.entries.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0
        }.min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len
        }.min(len).max(start);
        self.with_entries(self.entries[start..end].to_vec())
    }

    fn with_entries(&self, entries : Vec<SynsetRef>) -> SynsetList<'a> {
        let mut list = SynsetList::new(self.api, entries);
        for e in &list.entries {
            if let Some(s) = self.synsets.get(&e.id) {
                list.synsets.insert(e.id.clone(), s.clone());
            }
            if let Some(edges) = self.edges.get(&e.id) {
                list.edges.insert(e.id.clone(), edges.clone());
            }
        }
        list
    }

    /// Append the entries of `other`, keeping both lists' caches.
    pub fn extend_from(&mut self, other : SynsetList<'a>) {
        self.entries.extend(other.entries);
        for (id, synset) in other.synsets {
            self.synsets.entry(id).or_insert(synset);
        }
        for (id, edges) in other.edges {
            self.edges.entry(id).or_insert(edges);
        }
    }

    /// The full synset for `id`, fetched once and then served from the cache.
    pub fn synset(&mut self, id : &str) -> Result<&Synset<'a>> {
        match self.synsets.entry(id.to_string()) {
            Entry::Occupied(o) => {
                debug!(synset = id, "synset cache hit");
                Ok(&*o.into_mut())
            },
            Entry::Vacant(v) => {
                let record = self.api.synset(id, &[])?;
                Ok(&*v.insert(Synset::new(self.api, id, record)))
            }
        }
    }

    /// Id, synset type and main sense of the first `limit` entries (all
    /// entries for `None`). Every entry not yet resolved costs one request.
    pub fn list_main_senses(&mut self, limit : Option<usize>) -> Result<Vec<MainSense>> {
        let n = limit.map_or(self.entries.len(), |l| l.min(self.entries.len()));
        let ids : Vec<String> = self.entries[..n].iter().map(|e| e.id.clone()).collect();
        let mut main_senses = Vec::with_capacity(n);
        for id in ids {
            let synset = self.synset(&id)?;
            main_senses.push(MainSense {
                synset_type : synset.synset_type()?.to_string(),
                main_sense : synset.get_main_sense()?.to_string(),
                id : id
            });
        }
        Ok(main_senses)
    }

    /// Annotate every entry with its number of outgoing edges and reorder
    /// the list by that count, highest first. Ties keep their order.
    pub fn sort_by_relevance(&mut self) -> Result<()> {
        for entry in self.entries.iter_mut() {
            let count = match self.edges.get(&entry.id) {
                Some(edges) => edges.len(),
                None => {
                    let edges = self.api.outgoing_edges(&entry.id)?;
                    let n = edges.len();
                    self.edges.insert(entry.id.clone(), edges);
                    n
                }
            };
            entry.sem_rels = Some(count);
        }
        self.entries.sort_by(|a, b| b.sem_rels.cmp(&a.sem_rels));
        Ok(())
    }
}

impl<'a> Index<usize> for SynsetList<'a> {
    type Output = SynsetRef;
    fn index(&self, index : usize) -> &SynsetRef { &self.entries[index] }
}

impl<'a> IndexMut<usize> for SynsetList<'a> {
    fn index_mut(&mut self, index : usize) -> &mut SynsetRef { &mut self.entries[index] }
}

impl<'a> Add for SynsetList<'a> {
    type Output = SynsetList<'a>;
    fn add(mut self, other : SynsetList<'a>) -> SynsetList<'a> {
        self.extend_from(other);
        self
    }
}

impl<'a> Extend<SynsetRef> for SynsetList<'a> {
    fn extend<I : IntoIterator<Item = SynsetRef>>(&mut self, iter : I) {
        self.entries.extend(iter);
    }
}

impl<'a, 'b> IntoIterator for &'b SynsetList<'a> {
    type Item = &'b SynsetRef;
    type IntoIter = slice::Iter<'b, SynsetRef>;
    fn into_iter(self) -> slice::Iter<'b, SynsetRef> { self.entries.iter() }
}

impl<'a> fmt::Debug for SynsetList<'a> {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SynsetList")
            .field("entries", &self.entries)
            .field("resolved_synsets", &self.synsets.len())
            .field("resolved_edges", &self.edges.len())
            .finish()
    }
}

impl<'a> fmt::Display for SynsetList<'a> {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        let text = serde_json::to_string_pretty(&self.entries).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
