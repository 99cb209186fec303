use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use minipress_core::SiteBuilder;

use crate::config::load_build_config;

pub fn make_subcommand() -> Command {
    Command::new("build")
        .about("Build the blog from markdown posts")
        .arg(
            Arg::new("content")
                .short('C')
                .long("content")
                .value_name("DIR")
                .help("Directory containing markdown posts [default: ./content]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Directory the generated site is written to [default: .]"),
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
    let config = load_build_config(args)?;
    let build = config.build_config();

    let site = SiteBuilder::new()
        .content_dir(&build.content)
        .output_dir(&build.output)
        .site_config(config.site_config())
        .build()?;

    let count = site.render_all()?;
    println!("Built {} post(s)", count);

    Ok(())
}
