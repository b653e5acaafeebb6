use std::path::Path;

use clap::Parser;
use tracing::instrument;
use tree_map::Workspace;

use super::terminal::Colorize;

#[derive(Debug, Parser, Default)]
#[command(about = "Show tree and record totals")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root)?;
        let document = workspace.document();

        match self.output {
            OutputFormat::Json => {
                let summary = serde_json::json!({
                    "trees": document.len(),
                    "records": document.record_count(),
                    "path": workspace.store().path().display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Table => {
                if document.is_empty() {
                    println!("No trees registered yet. Add one with 'treemap add'.");
                    println!();
                    println!(
                        "{}",
                        "Tip: add a tree → record observations → learn with 'treemap learn'"
                            .dim()
                    );
                    return Ok(());
                }

                println!("{}", "🌳 School tree map".heading());
                println!("  Trees:   {}", document.len());
                println!("  Records: {}", document.record_count());
                println!(
                    "  {}",
                    format!("Data:    {}", workspace.store().path().display()).dim()
                );
            }
        }

        Ok(())
    }
}
