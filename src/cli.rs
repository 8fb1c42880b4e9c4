use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use common::WidgetKind;

pub mod commands;

use crate::config::ClientConfig;
use commands::{chart, clear_cache};

#[derive(Parser)]
#[command(name = "energia-dash")]
#[command(about = "Energy dashboard chart pipelines from the command line")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub config: ClientConfig,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load one dashboard chart and print its configuration as JSON
    ///
    /// The daily generation chart is served from the local cache while it
    /// is fresh. The capacity chart is always fetched.
    Chart {
        /// Which chart to load
        #[arg(value_enum)]
        widget: Widget,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Remove every cached chart from the local cache directory
    ClearCache,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Widget {
    /// Daily generation by technology
    Generation,
    /// Cumulative capacity by source type
    Capacity,
}

impl From<Widget> for WidgetKind {
    fn from(widget: Widget) -> Self {
        match widget {
            Widget::Generation => WidgetKind::DailyGeneration,
            Widget::Capacity => WidgetKind::ProjectCapacity,
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Chart { widget, pretty } => {
                chart(&self.config, widget.into(), pretty).await?;
            }
            Commands::ClearCache => {
                clear_cache(&self.config)?;
            }
        }
        Ok(())
    }
}
