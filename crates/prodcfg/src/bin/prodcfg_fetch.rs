//! Fetch reference data or a product configuration from a live API.

use std::process::ExitCode;

fn main() -> ExitCode {
    prodcfg::cmd::fetch::main()
}
