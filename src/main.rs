use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use git_bump::git::Git2Repository;
use git_bump::version::BumpKind;
use git_bump::{config, pipeline, ui};

#[derive(clap::Parser)]
#[command(
    name = "git-bump",
    about = "Compute and publish semantic version tags from git history"
)]
struct Args {
    #[arg(
        short,
        long,
        help = "Bump the minor version",
        conflicts_with = "major"
    )]
    minor: bool,

    #[arg(short = 'j', long, help = "Bump the major version")]
    major: bool,

    #[arg(short, long, help = "Override the settings file to rewrite")]
    settings: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,
}

impl Args {
    fn bump_kind(&self) -> BumpKind {
        // --minor and --major are mutually exclusive at the clap level;
        // major wins should both ever be set programmatically
        if self.major {
            BumpKind::Major
        } else if self.minor {
            BumpKind::Minor
        } else {
            BumpKind::Patch
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let kind = args.bump_kind();

    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    if let Some(path) = args.settings {
        config.settings_file = path;
    }

    ui::display_info(&format!("Starting {} version ...", kind));

    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match pipeline::run_bump(&repo, &config, kind) {
        Ok(outcome) => {
            ui::display_success(&format!(
                "Published {} (from {}) at {}",
                outcome.tag, outcome.previous, outcome.reference
            ));
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
