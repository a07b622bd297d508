use anyhow::Context;
use clap::Parser;
use quickaccess_browse::cli::{Cli, HELP, Input, parse_input};
use quickaccess_browse::config::EnvOverrides;
use quickaccess_browse::{BrowseConfig, Command, JsonChannel, Popup, Screen};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = EnvOverrides::from_env();
    let config = BrowseConfig::load(cli.config.as_deref(), &overrides)?;
    quickaccess_browse::tracing::init(config.log.format);
    overrides.warn_rejected();
    tracing::debug!("Using {:?}", config);

    if !cli.data.is_file() {
        anyhow::bail!("Export file not found: {}", cli.data.display());
    }
    tracing::info!("Opening popup over {}", cli.data.display());

    let channel = Arc::new(JsonChannel::new(&cli.data));
    let mut popup = Popup::new(channel, config);

    let screen = popup
        .execute(Command::Tags)
        .await
        .context("Failed to open the tag list")?;
    let screen = match cli.query {
        Some(query) => popup.execute(Command::Search(query)).await?,
        None => screen,
    };
    print_screen(&screen);
    println!("(type 'help' for commands)");

    // One command per line; reading stops at EOF or `quit`.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => println!("{}", HELP),
            Ok(Input::Command(command)) => match popup.execute(command).await {
                Ok(screen) => print_screen(&screen),
                Err(e) => eprintln!("{}", e),
            },
            Err(message) => eprintln!("{}", message),
        }
    }

    tracing::info!("Popup closed");
    Ok(())
}

fn print_screen(screen: &Screen) {
    match screen {
        Screen::Home => println!("Quick access home. Type 'tags' to browse by tag."),
        Screen::Page(view) => print!("{}", view),
        Screen::Resource(id) => println!("Opened password {}. Type 'back' to return.", id),
    }
}
