use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use derivate::binary::decompress;
use derivate::{Compression, DerivateConfig, DerivateGroup, Dictionary, Lang, SourceDictionary};

mod cli;
use cli::{display, Cli, Commands};

/// One word's result in `--json` output.
#[derive(Serialize)]
struct Lookup<'a> {
    word: &'a str,
    groups: Vec<&'a DerivateGroup>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match Cli::parse().command {
        Commands::Build {
            input,
            output,
            compression,
        } => run_build(&input, &output, compression),
        Commands::Inspect { file } => run_inspect(&file),
        Commands::Find {
            file,
            words,
            lang,
            eager,
            no_create,
            json,
        } => run_find(&file, &words, lang.unwrap_or_default(), !eager, !no_create, json),
        Commands::Lookup {
            config,
            words,
            lang,
            json,
        } => run_lookup(&config, &words, lang.unwrap_or_default(), json),
    }
}

fn run_build(input: &Path, output: &Path, compression: Compression) -> Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("failed to read source {}", input.display()))?;
    let source = SourceDictionary::from_json(&json)
        .with_context(|| format!("invalid source {}", input.display()))?;
    let language = source.language;
    let builder = source.into_builder()?;
    let bytes = builder.to_container(compression)?;
    fs::write(output, &bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    eprintln!(
        "✓ {} groups ({}) → {} [{}, {}]",
        builder.group_count(),
        language,
        output.display(),
        compression.name(),
        display::format_size(bytes.len())
    );
    Ok(())
}

fn read_dictionary(path: &Path, lazy: bool) -> Result<(Dictionary, Vec<u8>)> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let dict = Dictionary::default();
    dict.load(&raw, lazy)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok((dict, raw))
}

fn run_inspect(path: &Path) -> Result<()> {
    let (dict, raw) = read_dictionary(path, false)?;
    let Some(mut summary) = dict.summary() else {
        bail!("{} did not load", path.display());
    };
    // An eager load keeps no body around; report its size anyway.
    summary.buffer_bytes = decompress(&raw)?.len();

    display::print_summary(
        &path.display().to_string(),
        raw.len(),
        Compression::sniff(&raw).name(),
        &summary,
    );
    Ok(())
}

fn run_find(
    path: &Path,
    words: &[String],
    lang: Lang,
    lazy: bool,
    try_create: bool,
    json: bool,
) -> Result<()> {
    let (dict, _) = read_dictionary(path, lazy)?;
    let mut results = Vec::with_capacity(words.len());
    for word in words {
        let word = word.to_uppercase();
        let found = dict
            .find(&word, try_create, lang)
            .with_context(|| format!("lookup of {} failed", word))?;
        results.push((word, found));
    }
    let stats = dict.stats();
    log::info!(
        "{} nodes and {} groups materialized",
        stats.nodes_materialized,
        stats.groups_materialized
    );
    print_results(&results, json)
}

fn run_lookup(config: &Path, words: &[String], lang: Lang, json: bool) -> Result<()> {
    let config = DerivateConfig::from_file(config)?;
    let service = config
        .open_service()
        .with_context(|| format!("failed to open {}", config.resource_dir.display()))?;
    if service.languages().is_undefined() {
        bail!(
            "no dictionaries for {} in {}",
            config.languages,
            config.resource_dir.display()
        );
    }

    let mut results = Vec::with_capacity(words.len());
    for word in words {
        let word = word.to_uppercase();
        let found = service.find_derivates(Some(&word), true, lang)?;
        results.push((word, found));
    }
    print_results(&results, json)
}

fn print_results(results: &[(String, Option<derivate::Groups>)], json: bool) -> Result<()> {
    if json {
        let out: Vec<Lookup<'_>> = results
            .iter()
            .map(|(word, found)| Lookup {
                word,
                groups: found
                    .iter()
                    .flatten()
                    .map(|g| g.as_ref())
                    .collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    for (word, found) in results {
        display::print_groups(word, found.as_deref());
    }
    Ok(())
}
