use anyhow::Result;
use essaydoc_cli::run_cli;

fn main() -> Result<()> {
    run_cli()
}
