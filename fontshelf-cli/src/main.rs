use std::process::ExitCode;

use fontshelf_cli::app;

fn main() -> anyhow::Result<ExitCode> {
    app::run()
}
