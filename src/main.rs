// --- Timetable generator - command line entry point ---
//
// Usage: quicktable [--config FILE] [--prefs JSON] LECTURE_NO...
//
// Without --config the settings come from QUICKTABLE_* variables (or .env).
// --prefs takes a JSON preference record, e.g. '{"no_class_days":["금"]}'.

use std::process::ExitCode;

use quicktable::Config;
use quicktable::preferences::{CachedParser, JsonFileCache, JsonPreferenceParser, PreferenceParser};
use quicktable::service::{TimetableRequest, TimetableResponse, generate_from_source};
use tracing::error;
use tracing_subscriber::EnvFilter;

struct Args {
    config: Option<String>,
    prefs: String,
    lecture_nos: Vec<u32>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args { config: None, prefs: String::new(), lecture_nos: Vec::new() };
    let mut it = std::env::args().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--config" => args.config = Some(it.next().ok_or("--config needs a path")?),
            "--prefs" => args.prefs = it.next().ok_or("--prefs needs a JSON value")?,
            other => {
                let no = other.parse::<u32>().map_err(|_| format!("not a lecture number: {}", other))?;
                args.lecture_nos.push(no);
            }
        }
    }
    Ok(args)
}

fn run_with<P: PreferenceParser>(config: &Config, request: &TimetableRequest, parser: &P) -> Result<TimetableResponse, String> {
    generate_from_source(&config.data_path, request, parser, &config.weights, config.max_combinations)
        .map_err(|e| e.to_string())
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => Config::load(path),
        None => Config::from_env(),
    }
    .map_err(|e| e.to_string())?;

    let request = TimetableRequest { lecture_nos: args.lecture_nos, user_preference_text: args.prefs };
    let response = match &config.cache_path {
        Some(path) => run_with(&config, &request, &CachedParser::new(JsonPreferenceParser, JsonFileCache::open(path)))?,
        None => run_with(&config, &request, &JsonPreferenceParser)?,
    };

    let out = serde_json::to_string_pretty(&response).map_err(|e| e.to_string())?;
    println!("{}", out);
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
