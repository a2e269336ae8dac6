//! `cabundle completions <shell>` and `cabundle man`.

use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use std::io;

pub fn run_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "cabundle", &mut io::stdout());
}

pub fn run_man() -> Result<()> {
    clap_mangen::Man::new(Cli::command()).render(&mut io::stdout())?;
    Ok(())
}
