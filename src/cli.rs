use std::str::FromStr;

use crate::{
    error::AppError,
    models::{MovieId, Shelf},
};

pub const HELP: &str = "\
commands:
  page <n> | next | prev | first | last | reload   navigate the movie grid
  search [text]                                  live search (empty clears)
  pick <n>                                       choose the n-th suggestion
  ask <text>                                     ask the recommendation bot
  shelf top|recent|<genre>                       load a movie shelf
  movie <id>                                     show movie details
  welcome                                        load the dashboard greeting
  help | quit";

/// One line typed at the terminal front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Page(u32),
    Next,
    Previous,
    First,
    Last,
    Reload,
    Search(String),
    /// Zero-based suggestion index
    Pick(usize),
    Ask(String),
    Shelf(Shelf),
    Movie(MovieId),
    Welcome,
    Help,
    Quit,
}

fn number<T: FromStr>(command: &str, arg: &str) -> Result<T, AppError> {
    arg.parse()
        .map_err(|_| AppError::InvalidInput(format!("{} expects a number, got '{}'", command, arg)))
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "page" => Ok(Command::Page(number("page", rest)?)),
            "next" => Ok(Command::Next),
            "prev" | "previous" => Ok(Command::Previous),
            "first" => Ok(Command::First),
            "last" => Ok(Command::Last),
            "reload" => Ok(Command::Reload),
            "search" => Ok(Command::Search(rest.to_string())),
            "pick" => {
                let position: usize = number("pick", rest)?;
                position
                    .checked_sub(1)
                    .map(Command::Pick)
                    .ok_or_else(|| AppError::InvalidInput("pick counts from 1".to_string()))
            }
            "ask" => Ok(Command::Ask(rest.to_string())),
            "shelf" => match rest.to_lowercase().as_str() {
                "" => Err(AppError::InvalidInput("shelf needs a name".to_string())),
                "top" => Ok(Command::Shelf(Shelf::TopRated)),
                "recent" => Ok(Command::Shelf(Shelf::RecentReleases)),
                genre => Ok(Command::Shelf(Shelf::Genre(genre.to_string()))),
            },
            "movie" => Ok(Command::Movie(number("movie", rest)?)),
            "welcome" => Ok(Command::Welcome),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err(AppError::InvalidInput("empty command".to_string())),
            other => Err(AppError::InvalidInput(format!("unknown command '{}'", other))),
        }
    }
}
