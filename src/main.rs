extern crate babelnet;
extern crate clap;
extern crate serde_json;
extern crate tracing;
extern crate tracing_subscriber;

use std::process;

use babelnet::report::Reports;
use babelnet::{is_synset_id, BabelNet, Config, Pos, SearchOptions};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn run(args : &ArgMatches) -> Result<(), String> {
    let mut config = match args.get_one::<String>("config") {
        Some(f) => Config::from_file(f).map_err(|e| format!("Could not load config: {}", e))?,
        None => Config::new("")
    };
    if let Some(key) = args.get_one::<String>("key") {
        config.key = key.to_string();
    }

    let term = args.get_one::<String>("term").ok_or("No term given")?;
    let lang = args.get_one::<String>("lang").map(|s| s.as_str()).unwrap_or("EN");
    let targets : Vec<String> = args.get_many::<String>("target")
        .map(|v| v.map(|s| s.to_uppercase()).collect())
        .unwrap_or_default();
    let limit = args.get_one::<usize>("limit").cloned();

    let babelnet = BabelNet::new(config).map_err(|e| e.to_string())?;
    let reports = Reports::new()?;

    if args.get_flag("raw-senses") {
        let senses = babelnet.senses_by_word(term, lang).map_err(|e| e.to_string())?;
        println!("{}", serde_json::to_string_pretty(&senses).map_err(|e| e.to_string())?);
        return Ok(());
    }

    if is_synset_id(term) {
        info!("Loading synset {}", term);
        let synset = babelnet.synset(term, &targets).map_err(|e| e.to_string())?;
        let connections = if args.get_flag("edges") {
            synset.get_connections().map_err(|e| e.to_string())?
        } else {
            Vec::new()
        };
        print!("{}", reports.synset(&synset, connections)?);
        return Ok(());
    }

    let mut options = SearchOptions::new().lang(lang);
    options.target_langs = targets;
    if let Some(pos) = args.get_one::<String>("pos") {
        options = options.pos(pos.parse::<Pos>()?);
    }
    if let Some(source) = args.get_one::<String>("source") {
        options = options.source(source);
    }

    let mut synsets = if args.get_flag("wiki") {
        info!("Looking up Wikipedia page {}", term);
        babelnet.synsets_from_resource(term, &options)
    } else {
        info!("Looking up {}", term);
        babelnet.synsets_by_word(term, &options)
    }.map_err(|e| e.to_string())?;
    info!("Found {} synsets", synsets.len());

    if args.get_flag("relevance") {
        synsets.sort_by_relevance().map_err(|e| e.to_string())?;
    }
    let main_senses = synsets.list_main_senses(limit).map_err(|e| e.to_string())?;
    print!("{}", reports.synset_list(&main_senses)?);
    Ok(())
}

fn main() {
    let args = Command::new("BabelNet lookup")
        .version("0.1")
        .author("John P. McCrae <john@mccr.ae>")
        .about("Look up words, Wikipedia pages and synsets in BabelNet")
        .arg(Arg::new("term")
             .value_name("TERM")
             .help("A word, a Wikipedia page title (with --wiki) or a synset id such as bn:00005054n")
             .required(true))
        .arg(Arg::new("key")
             .short('k')
             .long("key")
             .value_name("KEY")
             .help("The BabelNet API key, see http://babelnet.org/register"))
        .arg(Arg::new("config")
             .long("config")
             .value_name("babelnet.json")
             .help("A JSON file with the key and optionally base_url and timeout_secs"))
        .arg(Arg::new("lang")
             .short('l')
             .long("lang")
             .value_name("LANG")
             .default_value("EN")
             .help("The language of the search term"))
        .arg(Arg::new("pos")
             .long("pos")
             .value_name("POS")
             .help("Restrict to a part of speech: NOUN, VERB, ADJ or ADV"))
        .arg(Arg::new("source")
             .long("source")
             .value_name("SOURCE")
             .help("Restrict to a source, e.g., WN or WIKI"))
        .arg(Arg::new("target")
             .short('t')
             .long("target")
             .value_name("LANG")
             .action(ArgAction::Append)
             .help("Also retrieve senses in this language (up to three times)"))
        .arg(Arg::new("limit")
             .short('n')
             .long("limit")
             .value_name("N")
             .value_parser(value_parser!(usize))
             .help("Only resolve the first N synsets"))
        .arg(Arg::new("relevance")
             .long("sort-by-relevance")
             .action(ArgAction::SetTrue)
             .help("Order synsets by their number of outgoing edges"))
        .arg(Arg::new("wiki")
             .long("wiki")
             .action(ArgAction::SetTrue)
             .help("Treat the term as a Wikipedia page title"))
        .arg(Arg::new("edges")
             .long("edges")
             .action(ArgAction::SetTrue)
             .help("Also list the outgoing edges of a synset"))
        .arg(Arg::new("raw-senses")
             .long("raw-senses")
             .action(ArgAction::SetTrue)
             .help("Print the raw getSenses response for the term"))
        .arg(Arg::new("verbose")
             .short('v')
             .long("verbose")
             .action(ArgAction::SetTrue)
             .help("Log requests and cache hits"))
        .get_matches();

    let level = if args.get_flag("verbose") { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(msg) = run(&args) {
        eprintln!("{}", msg);
        process::exit(1);
    }
}
