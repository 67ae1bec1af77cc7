//! Plain-text reports for the command line tool.
use handlebars::Handlebars;

use crate::synset::{Connection, GlossInfo, SenseInfo, Synset};
use crate::synset_list::MainSense;

pub static SYNSET : &str = "{{id}}  {{main_sense}} ({{synset_type}})
{{#if senses}}
Senses:
{{#each senses}}  {{lemma}} [{{language}}, {{source}}]
{{/each}}{{/if}}{{#if glosses}}
Glosses:
{{#each glosses}}  {{lemma}}: {{gloss}} [{{source}}]
{{/each}}{{/if}}{{#if categories}}
Categories: {{#each categories}}{{this}}{{#unless @last}}, {{/unless}}{{/each}}
{{/if}}{{#if connections}}
Connections:
{{#each connections}}  {{group}} -> {{target}}
{{/each}}{{/if}}";

pub static SYNSET_LIST : &str = "{{#each main_senses}}{{id}}\t{{synset_type}}\t{{main_sense}}
{{else}}No synsets found.
{{/each}}";

#[derive(Debug,Serialize)]
struct SynsetView<'s> {
    id : &'s str,
    main_sense : &'s str,
    synset_type : &'s str,
    senses : Vec<SenseInfo>,
    glosses : Vec<GlossInfo>,
    categories : Vec<String>,
    connections : Vec<Connection>
}

#[derive(Debug,Serialize)]
struct SynsetListView<'s> {
    main_senses : &'s [MainSense]
}

pub struct Reports {
    handlebars : Handlebars<'static>
}

impl Reports {
    pub fn new() -> Result<Reports, String> {
        let mut hbars = Handlebars::new();
        hbars.register_escape_fn(handlebars::no_escape);
        hbars.register_template_string("synset", SYNSET)
            .map_err(|e| format!("Failed to load synset template: {}", e))?;
        hbars.register_template_string("synset-list", SYNSET_LIST)
            .map_err(|e| format!("Failed to load synset list template: {}", e))?;
        Ok(Reports { handlebars : hbars })
    }

    /// Summary of one synset. Fields the response lacks are left out rather
    /// than failing the report.
    pub fn synset(&self, synset : &Synset, connections : Vec<Connection>) -> Result<String, String> {
        let view = SynsetView {
            id : synset.id(),
            main_sense : synset.get_main_sense().unwrap_or("?"),
            synset_type : synset.synset_type().unwrap_or("?"),
            senses : synset.get_senses().unwrap_or_default(),
            glosses : synset.get_glosses().unwrap_or_default(),
            categories : synset.get_categories().unwrap_or_default(),
            connections : connections
        };
        self.handlebars.render("synset", &view).map_err(|e| e.to_string())
    }

    pub fn synset_list(&self, main_senses : &[MainSense]) -> Result<String, String> {
        self.handlebars.render("synset-list", &SynsetListView { main_senses : main_senses })
            .map_err(|e| e.to_string())
    }
}
