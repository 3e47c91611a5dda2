pub mod extract;
pub mod scan;

use std::path::Path;

use getcomments::{ExtractOptions, Extractor, Lookback};

use crate::config::{self, Profile};
use crate::output::OutputFormat;

pub enum Command {
    Extract { inputs: Vec<String>, no_cache: bool },
    Scan { dir: String },
}

/// Settings given on the command line; each one beats the profile.
#[derive(Debug, Default)]
pub struct Overrides {
    pub func_lookback: Option<Lookback>,
    pub decl_lookback: Option<Lookback>,
    pub unbounded: bool,
    pub format: Option<OutputFormat>,
}

pub fn run(command: Command, profile_name: &str, overrides: &Overrides) -> Result<(), String> {
    let profile = config::load_config(profile_name)?;
    let options = resolve_options(&profile, overrides);
    let format = overrides
        .format
        .or(profile.format)
        .unwrap_or(OutputFormat::Json);
    tracing::debug!(
        profile = profile_name,
        func_lookback = %options.func_lookback,
        decl_lookback = %options.decl_lookback,
        "resolved options"
    );

    match command {
        Command::Extract { inputs, no_cache } => {
            if no_cache {
                extract::run_uncached(&inputs, &options, format)
            } else {
                with_extractor(&options, |extractor| extract::run(&inputs, extractor, format))
            }
        }
        Command::Scan { dir } => {
            with_extractor(&options, |extractor| scan::run(Path::new(&dir), extractor, format))
        }
    }
}

/// Defaults, then the profile, then command-line flags.
pub fn resolve_options(profile: &Profile, overrides: &Overrides) -> ExtractOptions {
    let mut options = ExtractOptions::default();
    if let Some(lookback) = overrides.func_lookback.or(profile.func_lookback) {
        options.func_lookback = lookback;
    }
    if let Some(lookback) = overrides.decl_lookback.or(profile.decl_lookback) {
        options.decl_lookback = lookback;
    }
    if let Some(name) = &profile.literal_name {
        options.literal_name = name.clone();
    }
    if overrides.unbounded {
        options.func_lookback = Lookback::Unbounded;
        options.decl_lookback = Lookback::Unbounded;
    }
    options
}

/// Run `f` with the process-wide extractor when the options are the defaults.
fn with_extractor<T>(options: &ExtractOptions, f: impl FnOnce(&Extractor) -> T) -> T {
    if *options == ExtractOptions::default() {
        f(Extractor::shared())
    } else {
        f(&Extractor::new(options.clone()))
    }
}
