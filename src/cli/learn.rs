use clap::Parser;
use tracing::instrument;
use tree_map::{LearningCard, catalog};

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Learn how trees work, one topic at a time")]
pub struct Learn {
    /// The topic to study. Lists every topic when omitted.
    topic: Option<String>,
}

impl Learn {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) {
        match self.topic.as_deref().map(str::trim) {
            Some(topic) if !topic.is_empty() => match catalog::by_key(topic) {
                Some(card) => output_card(card),
                None => {
                    eprintln!("{}", format!("⚠️  No topic named '{topic}'").warning());
                    eprintln!();
                    output_topics();
                }
            },
            _ => output_topics(),
        }
    }
}

fn output_topics() {
    println!("{}", "📚 Topics".heading());
    for card in catalog::all() {
        println!("  {} {} {}", card.emoji, card.key, format!("· {}", card.one_line).dim());
    }
    println!();
    println!("{}", "Run 'treemap learn <TOPIC>' to study one topic.".dim());
}

fn output_card(card: &LearningCard) {
    println!("{}", format!("## {} {}", card.emoji, card.key).heading());
    println!("{}", card.one_line.info());

    println!("\n{}", "🔎 Simple explanation".heading());
    for point in card.easy {
        println!("  • {point}");
    }

    println!("\n{}", "🧠 Hypothesis → check".heading());
    for idea in card.check {
        println!("  • {idea}");
    }

    println!("\n{}", "🌍 Role in the ecosystem".heading());
    println!("  {}", card.ecosystem);

    println!();
    println!(
        "{}",
        format!(
            "Link a record to this topic: treemap record <ID> --title ... --topic \"{}\"",
            card.key
        )
        .dim()
    );
}
