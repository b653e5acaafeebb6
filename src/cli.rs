use std::path::{Path, PathBuf};

mod config;
mod data;
mod learn;
mod list;
mod show;
mod status;
mod terminal;

use clap::ArgAction;
use data::{Export, Import, Reset};
use learn::Learn;
use list::List;
use show::Show;
use status::Status;
use terminal::Colorize;
use tracing::instrument;
use tree_map::{LearningCard, RecordDraft, TreeDraft, TreeId, Workspace, catalog};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The directory holding the `data/` folder
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show how many trees and records there are (default)
    Status(Status),

    /// Register a new tree
    Add(Add),

    /// List registered trees, optionally filtered by a search
    ///
    /// This is the tree map: every tree with its latest record.
    List(List),

    /// Show a tree and all of its records
    Show(Show),

    /// Log an observation, hypothesis and evidence against a tree
    ///
    /// Records are append-only: they cannot be edited or deleted.
    Record(Observe),

    /// Learn how trees work
    Learn(Learn),

    /// Export all data as a JSON file
    Export(Export),

    /// Replace all data with a previously exported file
    Import(Import),

    /// Delete every tree and record
    Reset(Reset),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(&root)?,
            Self::Add(command) => command.run(&root)?,
            Self::List(command) => command.run(&root)?,
            Self::Show(command) => command.run(&root)?,
            Self::Record(command) => command.run(&root)?,
            Self::Learn(command) => command.run(),
            Self::Export(command) => command.run(&root)?,
            Self::Import(command) => command.run(&root)?,
            Self::Reset(command) => command.run(&root)?,
            Self::Config(command) => command.run(&root)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Add {
    /// Name of the tree (e.g. "운동장 은행나무")
    #[arg(long, short)]
    name: String,

    /// Where the tree stands (e.g. "운동장 동쪽, 급식실 옆")
    #[arg(long, short)]
    location: String,

    /// Species or classification (e.g. "은행나무")
    #[arg(long, short)]
    species: Option<String>,

    /// Comma separated tags (e.g. "그늘, 열매, 키큼")
    #[arg(long, short)]
    tags: Option<String>,

    /// Summary notes
    #[arg(long)]
    notes: Option<String>,
}

impl Add {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root)?;

        let tree = workspace.add_tree(TreeDraft {
            name: self.name,
            location: self.location,
            species: self.species,
            tags: self.tags,
            notes: self.notes,
        })?;

        println!("{}", format!("✅ Registered {}", tree.label()).success());
        println!(
            "{}",
            format!(
                "Next: treemap record {} --title \"What did you notice?\"",
                tree.id()
            )
            .dim()
        );
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Observe {
    /// The id of the tree (shown after '#' in `treemap list`)
    id: TreeId,

    /// Short title for the record (e.g. "잎 색이 달라요")
    #[arg(long, short)]
    title: String,

    /// Learning topic this record relates to (see `treemap learn`)
    #[arg(long)]
    topic: Option<String>,

    /// What did you see?
    #[arg(long, short)]
    observation: Option<String>,

    /// Why do you think it is so?
    #[arg(long)]
    hypothesis: Option<String>,

    /// How did you check?
    #[arg(long, short)]
    evidence: Option<String>,

    /// What did you learn?
    #[arg(long)]
    result: Option<String>,

    /// What photo did you take? (only the description is stored)
    #[arg(long)]
    photo_note: Option<String>,
}

impl Observe {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root)?;

        let record = workspace.add_record(
            &self.id,
            RecordDraft {
                title: self.title,
                topic: self.topic,
                observation: self.observation,
                hypothesis: self.hypothesis,
                evidence: self.evidence,
                result: self.result,
                photo_note: self.photo_note,
            },
        )?;

        println!(
            "{}",
            format!("✅ Saved '{}' at {}", record.title, record.time).success()
        );

        match Topic::of(&record.topic) {
            Topic::Unknown => {
                eprintln!(
                    "{}",
                    format!("⚠️  '{}' is not a known topic; saved as written", record.topic)
                        .warning()
                );
                eprintln!(
                    "{}",
                    format!(
                        "Known topics: {}",
                        catalog::keys().collect::<Vec<_>>().join(", ")
                    )
                    .dim()
                );
            }
            Topic::Known(card) if workspace.config().show_hints => {
                println!();
                println!("{}", format!("{} {} hint", card.emoji, card.key).info());
                println!("  {}", card.one_line);
                for idea in card.check {
                    println!("  • {idea}");
                }
            }
            Topic::None | Topic::Known(_) => {}
        }
        Ok(())
    }
}

/// How the topic of a saved record relates to the learning cards.
#[derive(Debug, PartialEq, Eq)]
enum Topic {
    None,
    Known(&'static LearningCard),
    Unknown,
}

impl Topic {
    fn of(topic: &str) -> Self {
        if topic.is_empty() {
            return Self::None;
        }
        catalog::by_key(topic).map_or(Self::Unknown, Self::Known)
    }
}
