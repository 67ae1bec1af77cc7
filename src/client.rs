use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::synset::Synset;
use crate::synset_list::SynsetList;
use crate::transport::{BabelNetApi, SearchOptions, Transport, MAX_TARGET_LANGS};
use crate::types::Edge;

/// Entry point of the library: wraps the raw API calls into `Synset` and
/// `SynsetList` values that can call back for more data.
///
/// ```no_run
/// use babelnet::{BabelNet, Config, Pos, SearchOptions};
///
/// let babelnet = BabelNet::new(Config::new("<key>")).unwrap();
/// let mut synsets = babelnet.synsets_by_word("Israeli", &SearchOptions::new().pos(Pos::Adj)).unwrap();
/// for sense in synsets.list_main_senses(None).unwrap() {
///     println!("{} {} {}", sense.id, sense.synset_type, sense.main_sense);
/// }
/// ```
pub struct BabelNet {
    api : Box<dyn BabelNetApi>
}

impl BabelNet {
    pub fn new(config : Config) -> Result<BabelNet> {
        Ok(BabelNet::with_api(Box::new(Transport::new(config)?)))
    }

    pub fn with_api(api : Box<dyn BabelNetApi>) -> BabelNet {
        BabelNet { api : api }
    }

    pub fn api(&self) -> &dyn BabelNetApi { &*self.api }

    /// All synsets denoted by `word`, in the service's ranking order.
    pub fn synsets_by_word(&self, word : &str, options : &SearchOptions) -> Result<SynsetList> {
        check_target_langs(&options.target_langs)?;
        let refs = self.api.synset_ids(word, options)?;
        Ok(SynsetList::new(self.api(), refs))
    }

    /// The full synset `id`, with lemmas restricted to `target_langs` when
    /// any are given.
    pub fn synset(&self, id : &str, target_langs : &[String]) -> Result<Synset> {
        check_target_langs(target_langs)?;
        let record = self.api.synset(id, target_langs)?;
        Ok(Synset::new(self.api(), id, record))
    }

    pub fn senses_by_word(&self, word : &str, lang : &str) -> Result<Value> {
        self.api.senses(word, lang)
    }

    pub fn outgoing_edges(&self, id : &str) -> Result<Vec<Edge>> {
        self.api.outgoing_edges(id)
    }

    /// Synsets linked to an external resource, by default a Wikipedia page
    /// title.
    pub fn synsets_from_resource(&self, resource_id : &str, options : &SearchOptions)
            -> Result<SynsetList> {
        check_target_langs(&options.target_langs)?;
        let refs = self.api.synset_ids_from_resource(resource_id, options)?;
        Ok(SynsetList::new(self.api(), refs))
    }
}

fn check_target_langs(langs : &[String]) -> Result<()> {
    if langs.len() > MAX_TARGET_LANGS {
        Err(Error::TooManyTargetLangs { given : langs.len(), max : MAX_TARGET_LANGS })
    } else {
        Ok(())
    }
}

/// Whether `s` has the shape of a BabelNet synset id, e.g. `bn:00005054n`.
pub fn is_synset_id(s : &str) -> bool {
    static ID_REGEX : OnceLock<Regex> = OnceLock::new();
    ID_REGEX.get_or_init(|| Regex::new("^bn:[0-9]{8}[nvar]$").expect("Synset id regex did not compile"))
        .is_match(s)
}
