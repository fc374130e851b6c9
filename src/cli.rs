//! CLI domain: parse, route, and presentation for the replay tool.
//!
//! The binary replays a shortcut script against a fixture document snapshot,
//! which is how strategy changes are exercised against captured document
//! shapes without a live host shell.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;

use crate::config::ChatnavConfig;
use crate::dispatch::{Engine, ShortcutMessage};
use crate::dom::fixture::FixtureDocument;
use crate::resolver::strategies;
use crate::resolver::Resolver;

/// Chatnav CLI - replay shortcut actions against a chat document fixture
#[derive(Parser)]
#[command(name = "chatnav")]
#[command(about = "Replay shortcut actions against a chat document fixture")]
pub struct Cli {
    /// Fixture document snapshot (JSON node tree)
    pub fixture: PathBuf,

    /// Shortcut script file, one action per line; reads stdin when omitted
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Suppress all logging
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

/// Run the replay against the fixture. Returns the number of failed actions.
pub fn run(cli: &Cli, config: &ChatnavConfig) -> anyhow::Result<usize> {
    let raw = fs::read_to_string(&cli.fixture)
        .with_context(|| format!("failed to read fixture {}", cli.fixture.display()))?;
    let doc = FixtureDocument::from_json(&raw)
        .with_context(|| format!("failed to parse fixture {}", cli.fixture.display()))?;

    let engine = Engine::new(
        Resolver::new(strategies::messenger_set()),
        config.validator.clone(),
    );

    let script = match &cli.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => {
            let mut lines = String::new();
            for line in io::stdin().lock().lines() {
                lines.push_str(&line.context("failed to read stdin")?);
                lines.push('\n');
            }
            lines
        }
    };

    let mut failures = 0;
    for line in script.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let msg =
            parse_script_line(line).with_context(|| format!("unparseable script line: {}", line))?;
        let ok = engine.dispatch(&doc, &msg);
        if !ok {
            failures += 1;
        }
        println!("{}\t{}", if ok { "ok" } else { "fail" }, line);
    }

    for effect in doc.effects() {
        println!("effect\t{:?}", effect);
    }

    Ok(failures)
}

/// Parse one script line: either a JSON message object or a bare
/// `action [arg...]` form where numeric tokens become numbers.
fn parse_script_line(line: &str) -> anyhow::Result<ShortcutMessage> {
    if line.starts_with('{') {
        return serde_json::from_str(line).context("invalid JSON message");
    }

    let mut parts = line.split_whitespace();
    let action = parts.next().context("empty action")?;
    let args = parts
        .map(|token| match token.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(token),
        })
        .collect();

    Ok(ShortcutMessage {
        action: action.to_string(),
        args,
    })
}
