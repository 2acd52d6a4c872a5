mod app;
mod cli;
mod domain;
mod infra;
mod mvvm;
#[cfg(test)]
mod test_support;
mod ui;
mod usecases;
mod view_models;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    ui::install_panic_hook();

    let cli = cli::Cli::parse();
    app::run(cli)
}
