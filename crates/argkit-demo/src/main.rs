use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use argkit::{ArgOption, ArgParser, LayoutConfig, ParseOutcome, ParserConfig};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    init_tracing();
    let mut parser = build_parser()?;

    let outcome = parser.parse(argkit::process_args());
    if let Err(err) = apply_layout(&mut parser) {
        // help and version still print, with the default layout
        if outcome == ParseOutcome::Continue {
            return Err(err);
        }
        tracing::warn!("{err:#}; using the default help layout");
    }

    parser.report(&outcome, &mut io::stdout().lock(), &mut io::stderr().lock())?;
    if let Some(code) = outcome.exit_code() {
        io::stdout().flush()?;
        std::process::exit(code);
    }

    summarize(&parser, &mut io::stdout().lock())
}

fn build_parser() -> Result<ArgParser> {
    let config = ParserConfig {
        program_name: "argkit-demo".to_string(),
        description: "This is description for the program.".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ..Default::default()
    };
    let mut parser = ArgParser::with_config(config)?;

    parser.add_positional("INPUT", "Some positional input for the example");
    parser.add_positional("OUTPUT", "Some positional output for the example");
    parser.add_help_option()?;
    parser.add_version_option()?;
    parser.add_option(
        ArgOption::new(["-f", "--file"], "Some argument that expects input").value_name("file"),
    )?;
    parser.add_option(ArgOption::new(
        ["-l", "--longer"],
        "This is an option to represent really long and verbose descriptions, \
         it serves as an example and test for wrapping in the help layout.",
    ))?;
    parser.add_option(ArgOption::new(
        ["-L", "--longer2"],
        "WhatHappensIfThereAreNoBreaksForTheDescription?\
         WrappingShouldJustSplitWhenTheLimitIsReached",
    ))?;
    parser.add_option(
        ArgOption::new(["-w", "--width"], "Total width of help lines")
            .value_name("columns")
            .default_value("80"),
    )?;
    parser.add_option(
        ArgOption::new(
            ["--layout"],
            "JSON file with layout settings (indentation, spacing, line-length, \
             maximum-left-length)",
        )
        .value_name("file"),
    )?;

    Ok(parser)
}

/// Help layout from `--layout`, resized by `--width` unless only a layout
/// file was given.
fn apply_layout(parser: &mut ArgParser) -> Result<()> {
    let mut layout = match parser.values("--layout")?.first() {
        Some(path) => load_layout(Path::new(path))?,
        None => LayoutConfig::default(),
    };
    if parser.is_set("--width") || !parser.is_set("--layout") {
        let width: usize = parser.value_as("--width")?;
        layout = layout.with_line_length(width);
    }
    parser.set_layout(layout).context("invalid help layout")?;
    Ok(())
}

fn load_layout(path: &Path) -> Result<LayoutConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout file `{}`", path.display()))?;
    let layout = LayoutConfig::from_json(&json)
        .with_context(|| format!("failed to parse layout file `{}`", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded layout");
    Ok(layout)
}

fn summarize(parser: &ArgParser, out: &mut impl Write) -> Result<()> {
    let file = parser
        .values("--file")?
        .first()
        .map(String::as_str)
        .unwrap_or("-");

    writeln!(out, "input: {}", parser.positional("INPUT").unwrap_or("-"))?;
    writeln!(out, "output: {}", parser.positional("OUTPUT").unwrap_or("-"))?;
    writeln!(out, "file: {file}")?;
    writeln!(out, "longer: {}", parser.is_set("--longer"))?;

    let extra = parser.positional_values().iter().skip(parser.positionals().len());
    let extra: Vec<&str> = extra.map(String::as_str).collect();
    if !extra.is_empty() {
        writeln!(out, "extra: {}", extra.join(", "))?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
