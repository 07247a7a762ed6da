//! dqdash CLI - data quality dashboard
//!
//! With no arguments the tool fetches the default dataset, writes the JSON
//! report and prints a summary. Flags only override defaults.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

use crate::{
    config::{
        DashboardConfig, SourceConfig, DEFAULT_LIMIT, DEFAULT_LOG_FILE, DEFAULT_ORDER,
        DEFAULT_REPORT_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_URL,
    },
    logging,
    metrics::DEFAULT_DATE_COLUMN,
    pipeline,
};

/// dqdash - completeness, timeliness and consistency metrics for tabular data
#[derive(Parser, Debug)]
#[command(name = "dqdash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Local dataset (CSV, TSV or JSON); fetches from --url when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// JSON endpoint to fetch records from
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Maximum number of records to fetch
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Sort expression sent to the endpoint
    #[arg(long, default_value = DEFAULT_ORDER)]
    pub order: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Column used for timeliness
    #[arg(long, default_value = DEFAULT_DATE_COLUMN)]
    pub date_column: String,

    /// Report output path
    #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
    pub output: PathBuf,

    /// Log file path
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log to stderr only
    #[arg(long)]
    pub no_log_file: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Maps arguments onto a [`DashboardConfig`].
    pub fn into_config(self) -> DashboardConfig {
        let source = match self.input {
            Some(path) => SourceConfig::File { path },
            None => SourceConfig::Http {
                url: self.url,
                limit: self.limit,
                order: Some(self.order).filter(|o| !o.trim().is_empty()),
                timeout_secs: self.timeout,
            },
        };

        DashboardConfig {
            source,
            date_column: self.date_column,
            output: Some(self.output),
            log_file: (!self.no_log_file).then_some(self.log_file),
        }
    }
}

/// Runs the dashboard with the given configuration and prints the summary.
///
/// # Errors
///
/// Returns the first configuration, fetch or I/O error.
pub fn execute(config: &DashboardConfig) -> crate::Result<()> {
    config.validate()?;
    let source = config.build_source()?;
    let engine = config.engine();

    let report = pipeline::run(source.as_ref(), &engine, config.output.as_deref())?;

    println!();
    print!("{}", pipeline::Summary(&report));
    Ok(())
}

/// Exit status for any failure other than a fetch.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status when the remote dataset could not be fetched.
pub const EXIT_FETCH_FAILURE: u8 = 2;

/// Maps a failed run onto the process exit status.
pub fn exit_status(err: &crate::Error) -> u8 {
    if err.is_fetch_failure() {
        EXIT_FETCH_FAILURE
    } else {
        EXIT_FAILURE
    }
}

/// Entry point for the `dqdash` binary.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.quiet;
    let config = cli.into_config();

    if let Err(e) = logging::init(config.log_file.as_deref(), quiet) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match execute(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_fetch_failure() {
                tracing::error!(error = %e, "failed to fetch data");
            } else {
                tracing::error!(error = %e, "dashboard run failed");
            }
            eprintln!("Error: {e}");
            ExitCode::from(exit_status(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_matches_defaults() {
        let cli = Cli::try_parse_from(["dqdash"]).unwrap();
        assert_eq!(cli.into_config(), DashboardConfig::default());
    }

    #[test]
    fn test_input_selects_file_source() {
        let cli = Cli::try_parse_from([
            "dqdash",
            "--input",
            "requests.csv",
            "--date-column",
            "closed_date",
            "--no-log-file",
        ])
        .unwrap();
        let config = cli.into_config();

        assert_eq!(
            config.source,
            SourceConfig::File {
                path: PathBuf::from("requests.csv")
            }
        );
        assert_eq!(config.date_column, "closed_date");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_empty_order_is_none() {
        let cli = Cli::try_parse_from(["dqdash", "--order", "", "--limit", "5"]).unwrap();
        match cli.into_config().source {
            SourceConfig::Http { order, limit, .. } => {
                assert!(order.is_none());
                assert_eq!(limit, 5);
            }
            SourceConfig::File { .. } => panic!("expected http source"),
        }
    }

    #[test]
    fn test_rejects_bad_limit() {
        assert!(Cli::try_parse_from(["dqdash", "--limit", "many"]).is_err());
    }

    #[test]
    fn test_exit_status_separates_fetch_failures() {
        let fetch = crate::Error::data_fetch("http://localhost/x.json", "status 503");
        assert_eq!(exit_status(&fetch), EXIT_FETCH_FAILURE);
        assert_eq!(
            exit_status(&crate::Error::invalid_config("limit must be positive")),
            EXIT_FAILURE
        );
    }

    #[test]
    fn test_execute_invalid_config() {
        let config = DashboardConfig {
            date_column: String::new(),
            ..DashboardConfig::default()
        };
        assert!(execute(&config).is_err());
    }
}
