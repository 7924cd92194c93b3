//! Minimal CLI: JSON → (elm | artifacts)
use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use json_elm::{convert_value, Artifacts, Options};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer an Elm model from one JSON document and emit types, decoders and encoders
#[derive(Parser, Debug)]
#[command(version)]
pub struct CommandLineInterface {
    /// more logging on stderr (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit a complete Elm module
    Elm(ElmOut),
    /// print the type, decoder and encoder lists as JSON
    Artifacts(ArtifactsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON document to read ('-' or omitted for stdin)
    input: Option<PathBuf>,

    /// JSON Pointer to select a subnode before conversion (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter; must yield exactly one document
    #[arg(long)]
    jq_expr: Option<String>,

    /// label of the root node, and so the name of the top-level type
    #[arg(long, default_value = json_elm::path::DEFAULT_ROOT)]
    root: String,

    /// run the three generators in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(clap::Parser, Debug)]
struct ElmOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// Elm module name
    #[arg(long, default_value = "Decoder")]
    module: String,

    /// output .elm file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct ArtifactsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Value> {
        let (source, origin) = match &self.input {
            Some(path) if path.as_os_str() != "-" => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                (source, path.display().to_string())
            }
            _ => {
                let mut source = String::new();
                std::io::stdin()
                    .read_to_string(&mut source)
                    .context("failed to read stdin")?;
                (source, "<stdin>".to_string())
            }
        };
        let mut value = json_elm::value::parse(&source).with_context(|| format!("in {origin}"))?;

        if let Some(pointer) = &self.json_pointer {
            value = value
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| anyhow!("JSON pointer {pointer:?} matched nothing in {origin}"))?;
        }
        if let Some(jq_expr) = &self.jq_expr {
            value = crate::jq_exec::run_single(jq_expr, &value)
                .with_context(|| format!("failed to apply jq expression to {origin}"))?;
        }
        Ok(value)
    }

    fn convert(&self) -> Result<Artifacts> {
        let value = self.load()?;
        let options = Options { root_name: self.root.clone(), parallel: self.parallel };
        Ok(convert_value(value, &options)?)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Elm(target) => {
                let artifacts = target.input_settings.convert()?;
                let elm_src = artifacts.render_module(&target.module);
                write_output(target.out.as_ref(), &elm_src)
            }
            Command::Artifacts(target) => {
                let artifacts = target.input_settings.convert()?;
                let json_src = serde_json::to_string_pretty(&artifacts)?;
                write_output(target.out.as_ref(), &json_src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&PathBuf>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!(path = %out.display(), bytes = src.len(), "wrote output");
        }
        None => println!("{src}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_elm_subcommand() {
        let cli = CommandLineInterface::try_parse_from([
            "json-elm", "-vv", "elm", "data.json", "--module", "Api.User", "--root", "user",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.cmd {
            Command::Elm(target) => {
                assert_eq!(target.module, "Api.User");
                assert_eq!(target.input_settings.root, "user");
                assert_eq!(target.input_settings.input, Some(PathBuf::from("data.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn stdin_is_the_default_input() {
        let cli = CommandLineInterface::try_parse_from(["json-elm", "artifacts"]).unwrap();
        match cli.cmd {
            Command::Artifacts(target) => {
                assert!(target.input_settings.input.is_none());
                assert_eq!(target.input_settings.root, "Root");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
