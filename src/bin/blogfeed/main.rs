use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spdlog::{error, info, warn};

use blogfeed::check::Severity;
use blogfeed::config::Config;
use blogfeed::logger::configure_logger;
use blogfeed::pipeline::Pipeline;

use crate::config::{open_config, write_sample_cfg};

mod config;

const CFG_FILE_NAME: &str = "blogfeed.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Directory holding the category folders and assets, overrides the config
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Directory receiving the generated files, overrides the config
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Skip the git lookups of last modified dates
    #[arg(long)]
    no_git: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Writes archive.json
    Archive,
    /// Writes one feed file per category plus the combined feed.json
    Feeds,
    /// Writes the archive and every feed
    All,
    /// Reports posts breaking the content rules
    Check,
    /// Writes a sample configuration file
    Init {
        /// Where to write the sample. Defaults to ./blogfeed.toml
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(ref content_dir) = args.content_dir {
        config.paths.content_dir = content_dir.clone();
    }
    if let Some(ref out_dir) = args.out_dir {
        config.paths.out_dir = out_dir.clone();
    }
    if args.no_git {
        config.archive.last_modified = false;
    }
}

fn run_check(pipeline: &Pipeline) -> Result<bool> {
    let violations = pipeline.check()?;
    let mut failed = false;
    for violation in violations.iter() {
        match violation.rule.severity() {
            Severity::Warning => warn!("{}", violation),
            Severity::Error => {
                error!("{}", violation);
                failed = true;
            }
        }
    }
    info!("{} issues found", violations.len());
    Ok(!failed)
}

fn run(args: Args) -> Result<bool> {
    if let Command::Init { ref path } = args.command {
        let path = path.clone().unwrap_or_else(|| PathBuf::from(CFG_FILE_NAME));
        write_sample_cfg(&path)?;
        println!("Sample configuration written to {}", path.display());
        return Ok(true);
    }

    let mut config = open_config(args.config_path.as_ref().map(PathBuf::from))?;
    apply_overrides(&mut config, &args);

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Content from {}, writing to {}", config.paths.content_dir.display(), config.paths.out_dir.display());
    let pipeline = Pipeline::new(&config);

    match args.command {
        Command::Archive => pipeline.write_archive()?,
        Command::Feeds => pipeline.write_feeds()?,
        Command::All => {
            pipeline.write_archive()?;
            pipeline.write_feeds()?;
        }
        Command::Check => return run_check(&pipeline),
        Command::Init { .. } => {}
    }
    Ok(true)
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
