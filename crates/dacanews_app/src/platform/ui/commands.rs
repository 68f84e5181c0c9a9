//! Terminal input: each line stands in for one browser event.

use dacanews_core::{Msg, ENTER_KEY_CODE};

pub const HELP: &str = "\
commands:
  menu            click the hamburger button
  type <text>     set the search box text (empty to clear)
  key <code>      release a key in the search box
  enter           press Enter in the search box
  search          click the search button
  source <name>   click a source filter button
  page <n>        click the n-th pagination link
  dismiss         close the alert
  show            print the widget state
  html            print the current page HTML
  help            this text
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(Msg),
    /// 1-based index into the visible pagination links.
    Page(usize),
    Show,
    Html,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = match line.trim_start().split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (line.trim(), ""),
    };
    let arg = rest.trim();

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "menu" | "hamburger" => Command::Event(Msg::HamburgerClicked),
        // Keep inner spacing: the query is sent as typed.
        "type" => Command::Event(Msg::SearchInputChanged(rest.to_string())),
        "enter" => Command::Event(Msg::SearchKeyUp {
            key_code: ENTER_KEY_CODE,
        }),
        "key" => match arg.parse::<u32>() {
            Ok(key_code) => Command::Event(Msg::SearchKeyUp { key_code }),
            Err(_) => Command::Invalid(format!("`key` needs a numeric key code, got {arg:?}")),
        },
        "search" => Command::Event(Msg::SearchClicked),
        "source" if !arg.is_empty() => Command::Event(Msg::SourceClicked {
            name: arg.to_string(),
        }),
        "source" => Command::Invalid("`source` needs a source name".to_string()),
        "page" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => Command::Page(n),
            _ => Command::Invalid(format!("`page` needs a link number, got {arg:?}")),
        },
        "dismiss" | "ok" => Command::Event(Msg::AlertDismissed),
        "show" => Command::Show,
        "html" => Command::Html,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command `{other}`, try `help`")),
    }
}
