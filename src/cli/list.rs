use std::path::Path;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::instrument;
use tree_map::{Tree, Workspace};

use super::terminal::{Colorize, fit};

/// Command arguments for `treemap list`.
#[derive(Debug, Parser)]
#[command(about = "List registered trees, optionally filtered by a search")]
pub struct List {
    /// Case-insensitive text matched against name, location, notes and tags
    /// (e.g. 운동장, 은행, 그늘).
    query: Option<String>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// A tree with its latest record, for JSON output.
#[derive(Debug, Serialize)]
struct Entry<'a> {
    id: &'a str,
    name: &'a str,
    location: &'a str,
    species: &'a str,
    tags: &'a [String],
    records: usize,
    latest: Option<Latest<'a>>,
}

#[derive(Debug, Serialize)]
struct Latest<'a> {
    time: String,
    title: &'a str,
}

impl<'a> From<&'a Tree> for Entry<'a> {
    fn from(tree: &'a Tree) -> Self {
        Self {
            id: tree.id().as_str(),
            name: tree.name(),
            location: tree.location(),
            species: tree.species(),
            tags: tree.tags(),
            records: tree.records().len(),
            latest: tree.latest().map(|record| Latest {
                time: record.time.to_string(),
                title: &record.title,
            }),
        }
    }
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root)?;
        let document = workspace.document();
        let matches = document.search(self.query.as_deref().unwrap_or_default());
        tracing::debug!(matches = matches.len(), total = document.len(), "searched");

        match self.output {
            OutputFormat::Json => {
                let entries: Vec<Entry<'_>> = matches.into_iter().map(Entry::from).collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
            OutputFormat::Table => {
                if document.is_empty() {
                    println!("No trees registered yet. Add one with 'treemap add'.");
                    return Ok(());
                }
                println!(
                    "Registered trees: {}",
                    format!("{} / {}", matches.len(), document.len()).heading()
                );
                for tree in matches {
                    println!();
                    output_tree(tree);
                }
            }
        }
        Ok(())
    }
}

fn output_tree(tree: &Tree) {
    println!("🌳 {}", tree.label().heading());
    if !tree.species().is_empty() {
        println!("   Species: {}", tree.species());
    }
    if !tree.tags().is_empty() {
        println!("   Tags:    {}", tree.tags().join(", "));
    }
    if !tree.notes().is_empty() {
        println!("   Notes:   {}", fit(tree.notes(), 12));
    }
    println!("   {}", format!("{} record(s)", tree.records().len()).dim());

    if let Some(latest) = tree.latest() {
        println!("   Latest:  {} · {}", latest.time, latest.title);
        if !latest.hypothesis.is_empty() {
            println!("     - Hypothesis: {}", fit(&latest.hypothesis, 19));
        }
        if !latest.evidence.is_empty() {
            println!("     - Evidence:   {}", fit(&latest.evidence, 19));
        }
    }
}
