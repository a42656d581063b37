#![doc = include_str!("../README.md")]

use std::path::PathBuf;

use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use itertools::Itertools;
use miette::Result;

use crate::{config::Config, registry::Registry, state::RunType};

pub mod app_config;
pub mod config;
pub mod handler;
pub mod integrations;
pub mod registry;
mod review;
pub mod service;
mod state;

/// The main entry point for the application.
///
/// # Errors
///
/// 1. The config file can't be loaded
/// 2. A credential the matching handler needs is missing
/// 3. The remote fetch fails
pub fn run() -> Result<()> {
    let matches = build_cli().get_matches();
    let config = Config::load(matches.get_one::<PathBuf>(CONFIG).map(PathBuf::as_path))?;
    let registry = Registry::from_config(config);

    match matches.subcommand() {
        Some((REVIEW, sub_matches)) => run_review(sub_matches, &registry),
        Some((HANDLERS, _)) => {
            list_handlers(&registry);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn run_review(matches: &ArgMatches, registry: &Registry) -> Result<()> {
    let Some(query) = matches.get_one::<String>(QUERY) else {
        return Ok(());
    };
    let query = if matches.get_flag(DRY_RUN) {
        RunType::DryRun(query.as_str())
    } else {
        RunType::Real(query.as_str())
    };
    if let Some(line) = review::review(query, registry)? {
        println!("{line}");
    }
    Ok(())
}

fn list_handlers(registry: &Registry) {
    let listing = registry
        .variants()
        .enumerate()
        .map(|(index, variant)| format!("{}. {variant}", index + 1))
        .join("\n");
    if !listing.is_empty() {
        println!("{listing}");
    }
}

const CONFIG: &str = "config";
const REVIEW: &str = "review";
const HANDLERS: &str = "handlers";
const QUERY: &str = "query";
const DRY_RUN: &str = "dry-run";

fn build_cli() -> Command {
    command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(CONFIG)
                .long(CONFIG)
                .short('c')
                .env("REVLINK_CONFIG")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .help("Config file to use instead of the one in your platform config directory"),
        )
        .subcommand(
            Command::new(REVIEW)
                .about("Print a [[link|label]] review line for a Confluence page, Jira issue, or GitHub pull request or issue")
                .arg(
                    Arg::new(QUERY)
                        .required(true)
                        .value_name("QUERY")
                        .help("A URL, or a bare Jira key like PROJ-42"),
                )
                .arg(
                    Arg::new(DRY_RUN)
                        .long(DRY_RUN)
                        .action(ArgAction::SetTrue)
                        .help("Show which request would be made without making it"),
                ),
        )
        .subcommand(
            Command::new(HANDLERS).about("List the handlers queries are matched against, in order"),
        )
}
