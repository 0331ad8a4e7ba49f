//! Blogmap - Sitemap generator for blogs that publish a paginated Atom feed.

mod cli;
mod config;
mod feed;
mod generator;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, generate::generate_sitemap};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Config::load(&cli)?;
    let summary = generate_sitemap(&config)?;

    println!("{summary}");
    Ok(())
}
