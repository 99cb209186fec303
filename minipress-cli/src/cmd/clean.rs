use anyhow::Result;
use clap::{Arg, ArgMatches, Command};

use crate::config::MinipressConfig;

pub fn make_subcommand() -> Command {
    Command::new("clean")
        .about("Remove generated pages and the stylesheet from the output directory")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Directory the generated site was written to [default: .]"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file [default: ./minipress.toml]"),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = MinipressConfig::load(args)?;
    let output = &config.build_config().output;

    minipress_core::clean_output(output)?;
    println!("Cleaned {}", output);

    Ok(())
}
