extern crate babelnet;
extern crate flate2;
extern crate serde;
extern crate serde_json;

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use babelnet::transport::decode_gzip_json;
use babelnet::{BabelNet, BabelNetApi, Edge, Error, Result, SearchOptions, SynsetRecord, SynsetRef};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::{json, Value};

/// Serves canned gzip bodies through the same decoder the HTTP transport
/// uses, and records every call.
struct FixtureApi {
    bodies : HashMap<String, Vec<u8>>,
    calls : Rc<RefCell<Vec<String>>>
}

impl FixtureApi {
    fn new(calls : Rc<RefCell<Vec<String>>>) -> FixtureApi {
        FixtureApi { bodies : HashMap::new(), calls : calls }
    }

    fn body(mut self, call : &str, value : Value) -> FixtureApi {
        self.bodies.insert(call.to_string(), gzip(&value.to_string()));
        self
    }

    fn raw(mut self, call : &str, body : &[u8]) -> FixtureApi {
        self.bodies.insert(call.to_string(), body.to_vec());
        self
    }

    fn serve<T : serde::de::DeserializeOwned + Default>(&self, call : String) -> T {
        let body = self.bodies.get(&call).cloned().unwrap_or_default();
        self.calls.borrow_mut().push(call);
        decode_gzip_json(&body)
    }
}

impl BabelNetApi for FixtureApi {
    fn synset_ids(&self, lemma : &str, options : &SearchOptions) -> Result<Vec<SynsetRef>> {
        Ok(self.serve(format!("getSynsetIds {} {}", lemma, options.lang)))
    }
    fn synset(&self, id : &str, _ : &[String]) -> Result<SynsetRecord> {
        Ok(self.serve(format!("getSynset {}", id)))
    }
    fn senses(&self, word : &str, lang : &str) -> Result<Value> {
        Ok(self.serve(format!("getSenses {} {}", word, lang)))
    }
    fn outgoing_edges(&self, id : &str) -> Result<Vec<Edge>> {
        Ok(self.serve(format!("getOutgoingEdges {}", id)))
    }
    fn synset_ids_from_resource(&self, resource_id : &str, _ : &SearchOptions) -> Result<Vec<SynsetRef>> {
        Ok(self.serve(format!("getSynsetIdsFromResourceID {}", resource_id)))
    }
}

fn gzip(text : &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn edges(targets : &[(&str, &str)]) -> Value {
    Value::Array(targets.iter().map(|&(target, group)| json!({
        "language": "EN",
        "pointer": {"fSymbol": "@", "name": group.to_lowercase(), "shortName": "", "relationGroup": group},
        "target": target,
        "weight": 0.0,
        "normalizedWeight": 0.0
    })).collect())
}

fn synset_body(main_sense : &str, lemma : &str) -> Value {
    json!({
        "mainSense": main_sense,
        "synsetType": "CONCEPT",
        "senses": [{"type": "BabelSense", "properties": {
            "fullLemma": lemma, "simpleLemma": lemma, "source": "WN", "language": "EN",
            "frequency": 10, "idSense": 1001, "pos": "NOUN"}}],
        "glosses": [{"source": "WN", "sourceSense": "1001", "language": "EN", "gloss": "a fruit"}],
        "categories": [{"category": "Apples", "language": "EN"}],
        "translations": []
    })
}

fn fixture(calls : Rc<RefCell<Vec<String>>>) -> BabelNet {
    let api = FixtureApi::new(calls)
        .body("getSynsetIds apple EN", json!([
            {"id": "bn:00005054n", "pos": "NOUN", "source": "BABELNET"},
            {"id": "bn:00005055n", "pos": "NOUN", "source": "BABELNET"},
            {"id": "bn:03739345n", "pos": "NOUN", "source": "WIKI"}
        ]))
        .body("getSynset bn:00005054n", synset_body("apple", "apple"))
        .body("getSynset bn:00005055n", synset_body("apple_tree", "apple tree"))
        .body("getSynset bn:03739345n", synset_body("Apple_Inc.", "Apple Inc."))
        .body("getOutgoingEdges bn:00005054n", edges(&[
            ("bn:00021445n", "HYPERNYM"), ("bn:00005055n", "OTHER")]))
        .body("getOutgoingEdges bn:00005055n", edges(&[]))
        .body("getOutgoingEdges bn:03739345n", edges(&[
            ("bn:00021445n", "HYPERNYM"), ("bn:1n", "OTHER"), ("bn:2n", "MERONYM")]))
        .raw("getSynsetIdsFromResourceID Apple", b"Your key is not valid");
    BabelNet::with_api(Box::new(api))
}

fn count(calls : &Rc<RefCell<Vec<String>>>, prefix : &str) -> usize {
    calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
}

#[test]
fn test_search_sort_and_list() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let babelnet = fixture(calls.clone());

    let mut synsets = babelnet.synsets_by_word("apple", &SearchOptions::new()).unwrap();
    assert_eq!(synsets.len(), 3);
    assert!(synsets.contains_id("bn:03739345n"));

    synsets.sort_by_relevance().unwrap();
    assert_eq!(synsets.ids(), vec!["bn:03739345n", "bn:00005054n", "bn:00005055n"]);
    assert_eq!(synsets[0].sem_rels, Some(3));
    assert_eq!(synsets[2].sem_rels, Some(0));

    let senses = synsets.list_main_senses(Some(2)).unwrap();
    assert_eq!(senses[0].main_sense, "Apple_Inc.");
    assert_eq!(senses[1].main_sense, "apple");
    synsets.list_main_senses(None).unwrap();

    assert_eq!(count(&calls, "getOutgoingEdges"), 3);
    assert_eq!(count(&calls, "getSynset "), 3);
}

#[test]
fn test_synset_accessors_and_edge_cache() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let babelnet = fixture(calls.clone());

    let synset = babelnet.synset("bn:00005054n", &[]).unwrap();
    assert_eq!(synset.get_main_sense().unwrap(), "apple");
    let glosses = synset.get_glosses().unwrap();
    assert_eq!(glosses[0].lemma, "apple");
    assert_eq!(glosses[0].source_sense, "1001");

    assert_eq!(synset.get_hypernyms().unwrap(), vec!["bn:00021445n"]);
    assert!(synset.get_hyponyms().unwrap().is_empty());
    assert_eq!(synset.get_connections().unwrap().len(), 2);
    assert_eq!(count(&calls, "getOutgoingEdges"), 1);
}

#[test]
fn test_undecodable_response_is_empty() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let babelnet = fixture(calls.clone());

    let synsets = babelnet.synsets_from_resource("Apple", &SearchOptions::new()).unwrap();
    assert!(synsets.is_empty());

    let missing = babelnet.synset("bn:99999999n", &[]).unwrap();
    assert!(matches!(missing.get_main_sense(), Err(Error::MissingField { field : "mainSense", .. })));
    assert!(missing.get_meronyms().unwrap().is_empty());
    assert!(missing.get_meronyms().unwrap().is_empty());
    assert_eq!(count(&calls, "getOutgoingEdges bn:99999999n"), 1);
}

#[test]
fn test_slices_of_search_results() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let babelnet = fixture(calls);

    let synsets = babelnet.synsets_by_word("apple", &SearchOptions::new()).unwrap();
    let tail = synsets.slice(1..);
    assert_eq!(tail.len(), 2);
    assert_eq!(tail.entries(), &synsets.entries()[1..]);
    let joined = synsets.slice(..1) + tail;
    assert_eq!(joined.ids(), synsets.ids());
}

#[test]
fn test_too_many_target_langs() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let babelnet = fixture(calls.clone());

    let options = SearchOptions::new()
        .target_lang("DE").target_lang("FR").target_lang("IT").target_lang("ES");
    assert!(matches!(babelnet.synsets_by_word("apple", &options),
                     Err(Error::TooManyTargetLangs { given : 4, .. })));
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_raw_senses_pass_through() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let api = FixtureApi::new(calls)
        .body("getSenses apple EN", json!([{"type": "BabelSense", "properties": {"fullLemma": "apple"}}]));
    let babelnet = BabelNet::with_api(Box::new(api));
    let senses = babelnet.senses_by_word("apple", "EN").unwrap();
    assert_eq!(senses[0]["properties"]["fullLemma"], "apple");
}
