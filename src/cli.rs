use crate::app::Command;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quickaccess-browse")]
#[command(about = "Browse tagged passwords from a quick-access export", long_about = None)]
pub struct Cli {
    /// JSON export holding `tags` and `resources`
    #[arg(short, long)]
    pub data: PathBuf,
    /// Configuration file (defaults to the per-user config.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Initial search typed into the tag list
    #[arg(short, long)]
    pub query: Option<String>,
}

pub const HELP: &str = "\
commands:
  tags            open the tag list
  search <text>   filter the current list (no text clears the search)
  tag <n>         open the n-th tag
  open <n>        open the n-th password
  back            go back
  retry           retry a failed load
  show            render the current view
  quit            close the popup";

/// A line typed on the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Help,
    Quit,
}

/// Parse one prompt line. Blank lines re-render the current view.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim_start();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line.trim_end(), ""), |(word, rest)| (word, rest.trim()));

    let command = match word {
        "" | "show" => Command::Show,
        "tags" => Command::Tags,
        "search" | "/" => Command::Search(rest.to_string()),
        "clear" => Command::Search(String::new()),
        "tag" => Command::SelectTag(parse_row(rest)?),
        "open" => Command::SelectResource(parse_row(rest)?),
        "back" => Command::Back,
        "retry" => Command::Retry,
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" => return Ok(Input::Quit),
        other => return Err(format!("unknown command '{}', type 'help'", other)),
    };
    Ok(Input::Command(command))
}

fn parse_row(raw: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .map_err(|_| format!("expected a row number, got '{}'", raw))
}
