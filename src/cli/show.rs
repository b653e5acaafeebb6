use std::path::Path;

use clap::Parser;
use tracing::instrument;
use tree_map::{Record, Tree, TreeId, Workspace};

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Display a tree and its observation records")]
pub struct Show {
    /// The id of the tree to display
    id: TreeId,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,

    /// List records oldest first, regardless of configuration
    #[arg(long)]
    oldest_first: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root)?;

        let Some(tree) = workspace.document().find(&self.id) else {
            anyhow::bail!("Tree #{} not found. Use 'treemap list' to see ids.", self.id);
        };

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tree)?),
            OutputFormat::Pretty => {
                let newest_first = workspace.config().newest_first && !self.oldest_first;
                output_pretty(tree, newest_first);
            }
        }
        Ok(())
    }
}

fn output_pretty(tree: &Tree, newest_first: bool) {
    println!("# 🌳 {}", tree.name());
    println!();

    println!("{}", "Details".dim());
    println!("  Id:       #{}", tree.id());
    println!("  Location: {}", tree.location());
    if !tree.species().is_empty() {
        println!("  Species:  {}", tree.species());
    }
    println!("  Created:  {}", tree.created());
    if !tree.tags().is_empty() {
        println!("  Tags:     {}", tree.tags().join(", "));
    }

    if !tree.notes().is_empty() {
        println!("\n{}", "Notes".dim());
        println!("{}", tree.notes());
    }

    let records = tree.records();
    println!("\n{}", format!("Records ({})", records.len()).dim());
    if records.is_empty() {
        println!(
            "  No records yet. Add one with 'treemap record {} --title ...'",
            tree.id()
        );
        return;
    }

    let ordered: Vec<&Record> = if newest_first {
        records.iter().rev().collect()
    } else {
        records.iter().collect()
    };
    for (number, record) in ordered.into_iter().enumerate() {
        output_record(number + 1, record);
    }
}

fn output_record(number: usize, record: &Record) {
    let mut head = format!("{number}. {} · {}", record.title, record.time);
    if record.has_topic() {
        head.push_str(&format!(" · [{}]", record.topic));
    }
    println!("\n{}", head.heading());

    let fields = [
        ("Observation", &record.observation),
        ("Hypothesis", &record.hypothesis),
        ("Evidence", &record.evidence),
        ("Result", &record.result),
        ("Photo note", &record.photo_note),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            println!("   {}: {value}", label.info());
        }
    }
}
