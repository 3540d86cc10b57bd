mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use classphoto_core::{OrganizeOptions, TimeSource};
use tracing::{debug, error};

#[derive(Clone, Copy, ValueEnum)]
enum TimeSourceArg {
    /// File creation time, falling back to modification time
    Created,
    /// File modification time
    Modified,
}

impl From<TimeSourceArg> for TimeSource {
    fn from(arg: TimeSourceArg) -> Self {
        match arg {
            TimeSourceArg::Created => TimeSource::Created,
            TimeSourceArg::Modified => TimeSource::Modified,
        }
    }
}

#[derive(Parser)]
#[command(name = "classphoto", version, about = "Photo Organizer - Organize photos by student")]
struct Cli {
    /// The CSV file containing the student information
    roster: PathBuf,

    /// The source directory to read photos from
    source_dir: PathBuf,

    /// Perform a dry run
    #[arg(long, visible_alias = "dryrun")]
    dry_run: bool,

    /// Photo file extension
    #[arg(long, env = "CLASSPHOTO_EXTENSION", default_value = "jpg")]
    extension: String,

    /// Roster column holding the first name
    #[arg(long, env = "CLASSPHOTO_FIRST_COLUMN", default_value = classphoto_core::roster::DEFAULT_FIRST_NAME_COLUMN)]
    first_column: String,

    /// Roster column holding the last name
    #[arg(long, env = "CLASSPHOTO_LAST_COLUMN", default_value = classphoto_core::roster::DEFAULT_LAST_NAME_COLUMN)]
    last_column: String,

    /// Timestamp used to put photos in capture order
    #[arg(long, value_enum, default_value = "created")]
    time_source: TimeSourceArg,

    /// Write the decision log and summary as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log debug detail
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    if let Err(e) = logging::init(level) {
        eprintln!("failed to set up logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    let options = OrganizeOptions {
        roster: cli.roster,
        source_dir: cli.source_dir,
        simulate: cli.dry_run,
        extension: cli.extension,
        first_name_column: cli.first_column,
        last_name_column: cli.last_column,
        time_source: cli.time_source.into(),
        report: cli.report,
    };

    let outcome = classphoto_core::organize(&options, &|stage, current, total, message| {
        debug!("[{}] {}/{} {}", stage, current + 1, total, message);
    });

    match outcome {
        Ok(result) => {
            eprintln!(
                "Done! {} photos, {} moved, {} skipped, {} student directories missing",
                result.photos, result.moved, result.skipped, result.missing_targets
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_legacy_dryrun_flag() {
        let cli = Cli::try_parse_from(["classphoto", "roster.csv", "photos", "--dryrun"]).unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.extension, "jpg");
        assert_eq!(cli.first_column, "Child's First Name");
        assert!(matches!(cli.time_source, TimeSourceArg::Created));
    }

    #[test]
    fn test_roster_and_source_required() {
        assert!(Cli::try_parse_from(["classphoto", "roster.csv"]).is_err());
    }
}
