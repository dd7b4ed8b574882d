//! Run the party simulation.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use party::prelude::*;

use crate::config::Config;

/// Command-line values that take precedence over party.toml.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub ticks: Option<u64>,
    pub normals: Option<usize>,
    pub zombies: Option<usize>,
    pub defenders: Option<usize>,
    pub seed: Option<u64>,
}

impl Overrides {
    /// Fold these overrides into `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ticks) = self.ticks {
            config.run.ticks = ticks;
        }
        let headcount = &mut config.party.headcount;
        if let Some(n) = self.normals {
            headcount.normals = n;
        }
        if let Some(n) = self.zombies {
            headcount.zombies = n;
        }
        if let Some(n) = self.defenders {
            headcount.defenders = n;
        }
        if let Some(seed) = self.seed {
            config.party.seed = seed;
        }
    }
}

/// Build a party from `config` and invite its guests.
pub fn prepare(config: &Config, verbose: bool) -> Result<Party> {
    let builder = PartyBuilder::new().with_config(config.party.clone());
    let builder = if verbose {
        builder.with_presenter(LogPresenter)
    } else {
        builder.with_presenter(NullPresenter)
    };
    let mut party = builder.build().context("Failed to set up the party")?;
    party.reset().context("Failed to invite the guests")?;
    Ok(party)
}

/// Run up to `config.run.ticks` ticks, reporting progress on `pb`.
pub fn simulate(party: &mut Party, config: &Config, pb: &ProgressBar) -> Result<Vec<TickReport>> {
    let mut reports = Vec::new();
    for _ in 0..config.run.ticks {
        let report = party
            .step()
            .with_context(|| format!("Tick {} failed", party.tick() + 1))?;
        if report.infected() > 0 {
            pb.set_message(format!("{} normals left", report.census.normals));
        }
        pb.inc(1);
        let overrun = report.census.normals == 0;
        reports.push(report);
        if config.run.stop_when_overrun && overrun {
            break;
        }
    }
    Ok(reports)
}

pub fn run(overrides: Overrides, json: bool, verbose: bool) -> Result<()> {
    let mut config = Config::load()?;
    overrides.apply(&mut config);

    let mut party = prepare(&config, verbose)?;
    let start = party.census();

    if !json {
        println!(
            "{} {} normals, {} zombies, {} defenders arrive",
            "→".blue(),
            start.normals.to_string().cyan(),
            start.zombies.to_string().cyan(),
            start.defenders.to_string().cyan()
        );
    }

    let pb = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(config.run.ticks)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks {msg}")?
            .progress_chars("#>-"),
    );

    let reports = simulate(&mut party, &config, &pb)?;
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&party.snapshot())?);
        return Ok(());
    }

    let stats = party.stats();
    let end = party.census();
    println!();
    println!(
        "{} Party over after {} ticks",
        "✓".green().bold(),
        reports.len().to_string().cyan()
    );
    println!(
        "  Normals:   {} → {}",
        start.normals.to_string().yellow(),
        end.normals.to_string().green()
    );
    println!(
        "  Zombies:   {} → {}",
        start.zombies.to_string().yellow(),
        end.zombies.to_string().red()
    );
    println!("  Defenders: {}", end.defenders.to_string().green());
    println!("  Infections: {}", stats.infections);
    println!("  Teleports:  {}", stats.teleports);
    println!("  Rejected moves: {}", stats.rejected_moves);
    if stats.absent > 0 {
        println!("  {} {} guests could not be placed", "•".yellow(), stats.absent);
    }

    Ok(())
}
