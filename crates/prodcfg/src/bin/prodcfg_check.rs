//! Validate a product configuration snapshot.

use std::process::ExitCode;

fn main() -> ExitCode {
    prodcfg::cmd::check::main()
}
