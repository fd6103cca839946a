//! Search prompt input.
//!
//! Plain text replaces the search term; lines starting with `:` change
//! filters or control the prompt.

use anyhow::{bail, Result};

use movielookup_core::{parse_year_filter, TitleType, Year, YEAR_OPTIONS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    Term(String),
    Year(Option<Year>),
    Type(TitleType),
    /// Scroll to the end of the list.
    More,
    Help,
    Quit,
}

pub const HELP: &str = "\
Type a title to search. Commands:
  :year YYYY   filter by year (`:year` alone clears it)
  :type T      movie, series or episode
  :more        load the next page
  :help        show this help
  :quit        exit";

pub fn parse(line: &str) -> Result<PromptCommand> {
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Ok(PromptCommand::Term(line.trim().to_string()));
    };

    let mut parts = command.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().unwrap_or_default().trim();

    match name {
        "year" | "y" => {
            let year = parse_year_filter(arg)?;
            if let Some(year) = &year {
                if !is_offered(year) {
                    bail!(
                        "Year {} is outside {}-{}",
                        year,
                        YEAR_OPTIONS.start(),
                        YEAR_OPTIONS.end()
                    );
                }
            }
            Ok(PromptCommand::Year(year))
        }
        "type" | "t" => Ok(PromptCommand::Type(arg.parse()?)),
        "more" | "m" => Ok(PromptCommand::More),
        "help" | "h" | "?" => Ok(PromptCommand::Help),
        "quit" | "q" => Ok(PromptCommand::Quit),
        other => bail!("Unknown command ':{}' (try :help)", other),
    }
}

fn is_offered(year: &Year) -> bool {
    year.as_str()
        .parse::<u16>()
        .is_ok_and(|y| YEAR_OPTIONS.contains(&y))
}
