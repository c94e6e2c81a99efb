use anyhow::Result;
use clap::{Parser, Subcommand};

use git_release::config;
use git_release::runner::ReleaseRunner;
use git_release::store::MessageStore;
use git_release::ui::{formatter, AssumeYes, ConsolePrompt, ConsoleReporter, Prompt, Reporter};
use git_release::vcs::Git2Vcs;
use git_release::version::VersionId;
use git_release::ReleaseError;

#[derive(Parser)]
#[command(
    name = "git-release",
    about = "Stage, commit, push and tag releases from prepared message files"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Git remote to push to")]
    remote: Option<String>,

    #[arg(short, long, help = "Branch to push")]
    branch: Option<String>,

    #[arg(short = 'y', long, help = "Skip confirmation prompts")]
    yes: bool,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand)]
enum Action {
    /// List versions that have a prepared message file
    List,
    /// Show the working tree status
    Status,
    /// Stage all working tree changes
    Add,
    /// Commit staged changes using a version's message file
    Commit {
        #[arg(value_name = "VERSION")]
        version: Option<String>,
    },
    /// Push the configured branch to the remote
    Push,
    /// Create an annotated tag for a version and push it to the remote
    Tag {
        #[arg(value_name = "VERSION")]
        version: Option<String>,
    },
    /// Run the full release sequence: stage, commit, push, tag
    Release {
        #[arg(value_name = "VERSION")]
        version: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let reporter = ConsoleReporter;

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => fail(&reporter, e),
    };

    let remote = args.remote.unwrap_or_else(|| config.remote.clone());
    let branch = args.branch.unwrap_or_else(|| config.branch.clone());
    let store = MessageStore::new(config.resolved_message_dir());

    let action = args.action.unwrap_or(Action::List);

    // Listing has no repository precondition.
    if let Action::List = action {
        match store.list() {
            Ok(versions) if versions.is_empty() => {
                reporter.warning(&format!(
                    "No message files found in '{}'",
                    store.dir().display()
                ));
            }
            Ok(versions) => {
                let rendered: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
                formatter::display_versions(&rendered);
            }
            Err(e) => fail(&reporter, e),
        }
        return Ok(());
    }

    let vcs = match Git2Vcs::discover(&config.repository_root) {
        Ok(vcs) => vcs,
        Err(e) => fail(&reporter, e),
    };

    let prompt: Box<dyn Prompt> = if args.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(ConsolePrompt)
    };
    let runner = ReleaseRunner::new(vcs, prompt, ConsoleReporter, store);

    let result = match action {
        Action::List => unreachable!("handled above"),
        Action::Status => runner.show_status(),
        Action::Add => runner.stage_all(),
        Action::Commit { version } => {
            let version = require_version(version.as_deref(), "commit", runner.store());
            runner.commit(&version)
        }
        Action::Push => runner.push(&remote, &branch),
        Action::Tag { version } => {
            let version = require_version(version.as_deref(), "tag", runner.store());
            runner.tag(&version, &remote).map(|_| ())
        }
        Action::Release { version } => {
            let version = require_version(version.as_deref(), "release", runner.store());
            runner.release(&version, &remote, &branch).map(|_| ())
        }
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => fail(&reporter, e),
    }
}

/// Print the error (plus remediation hint, if any) and exit with code 1.
fn fail(reporter: &ConsoleReporter, error: ReleaseError) -> ! {
    reporter.error(&error.to_string());
    if let Some(hint) = error.remediation() {
        reporter.info(&hint);
    }
    std::process::exit(1);
}

/// Parse a required version argument, exiting with code 1 (and the list of
/// known versions as a hint) when it is missing or malformed.
fn require_version(raw: Option<&str>, action: &str, store: &MessageStore) -> VersionId {
    let reporter = ConsoleReporter;

    let Some(raw) = raw else {
        reporter.error(&format!("a version is required for '{}'", action));
        if let Ok(known) = store.list() {
            if !known.is_empty() {
                let rendered: Vec<String> = known.iter().map(|v| v.to_string()).collect();
                reporter.info(&format!("Known versions: {}", rendered.join(", ")));
            }
        }
        std::process::exit(1);
    };

    match raw.parse::<VersionId>() {
        Ok(version) => version,
        Err(e) => {
            reporter.error(&e.to_string());
            std::process::exit(1);
        }
    }
}
