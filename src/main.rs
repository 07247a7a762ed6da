//! dqdash CLI - data quality dashboard
//!
//! Command-line interface for computing data quality reports.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

fn main() -> ExitCode {
    dqdash::cli::run()
}
