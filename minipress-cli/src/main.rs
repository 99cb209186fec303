mod cmd;
mod config;

use anyhow::Result;
use clap::Command;

fn cli() -> Command {
    Command::new("minipress")
        .about("Press a folder of markdown posts into a tiny static blog")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::clean::make_subcommand())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        Some(("clean", args)) => cmd::clean::execute(args),
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}
