//! Backup, restore and reset of the whole data file.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use tracing::instrument;
use tree_map::{Workspace, storage::EXPORT_FILE_NAME};

use super::terminal::Colorize;

#[derive(Debug, Parser)]
pub struct Export {
    /// Where to write the export. Use '-' for standard output.
    #[arg(default_value = EXPORT_FILE_NAME)]
    path: PathBuf,
}

impl Export {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root)?;
        let bytes = workspace.export()?;

        if self.path.as_os_str() == "-" {
            io::stdout().write_all(&bytes)?;
            return Ok(());
        }

        fs::write(&self.path, &bytes)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        println!(
            "{}",
            format!(
                "💾 Exported {} trees to {}",
                workspace.document().len(),
                self.path.display()
            )
            .success()
        );
        println!("{}", "Keep this file somewhere safe to restore your records later.".dim());
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Import {
    /// A file previously written by 'treemap export'
    path: PathBuf,
}

impl Import {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let mut workspace = Workspace::open(root)?;
        let document = workspace.import(&bytes)?;

        println!(
            "{}",
            format!(
                "📥 Imported {} trees with {} records",
                document.len(),
                document.record_count()
            )
            .success()
        );
        println!("{}", "Run 'treemap list' to see them.".dim());
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Reset {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

impl Reset {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root)?;
        let document = workspace.document();

        if !self.yes {
            eprintln!(
                "{}",
                format!(
                    "⚠️  This deletes {} trees and {} records. It cannot be undone.",
                    document.len(),
                    document.record_count()
                )
                .warning()
            );
            let confirmed = dialoguer::Confirm::new()
                .with_prompt("Delete everything?")
                .default(false)
                .interact()?;
            if !confirmed {
                println!("Cancelled");
                return Ok(());
            }
        }

        workspace.reset()?;
        println!("{}", "🧹 All records deleted. You can start fresh.".success());
        Ok(())
    }
}
