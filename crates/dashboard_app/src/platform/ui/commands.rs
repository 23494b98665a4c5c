//! Parses one line of terminal input into messages for the core.

use std::path::PathBuf;

use dashboard_core::{Msg, NewsCategory, ScrollMetrics};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("`{0}` is not a number")]
    NotANumber(String),
}

pub const HELP: &str = "\
login <user> <password>     sign in (also: user <name>, pass <pw>, login)
remember on|off             keep the username for next start
logout
news [topic]                reload the news feed, optionally filtered
category <name>|all         business, entertainment, health, science, sports, technology
more news | more search     load the next page
scroll news|search <height> <top> <client>
search <query>
stock <symbol>
upload <path>
download <filename>
history
report title|notes|symbol <text>
report pick <n>             toggle the n-th article
report attach <filename>    toggle an uploaded file
report build | report quick
dismiss <id>                close a toast
show | help | quit";

pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = split_word(line);
    let command = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "show" => Command::Show,
        "quit" | "exit" => Command::Quit,
        "user" => one(Msg::UsernameChanged(rest.to_string())),
        "pass" => one(Msg::PasswordChanged(rest.to_string())),
        "remember" => match rest {
            "on" => one(Msg::RememberMeToggled(true)),
            "off" => one(Msg::RememberMeToggled(false)),
            _ => return Err(CommandError::Usage("remember on|off")),
        },
        "login" => login(rest)?,
        "logout" => one(Msg::LogoutClicked),
        "news" => Command::Dispatch(vec![
            Msg::NewsTopicChanged(rest.to_string()),
            Msg::NewsSearchSubmitted,
        ]),
        "category" => category(rest)?,
        "more" => match rest {
            "news" => one(Msg::NewsLoadMore),
            "search" => one(Msg::SearchLoadMore),
            _ => return Err(CommandError::Usage("more news|search")),
        },
        "scroll" => scroll(rest)?,
        "search" => Command::Dispatch(vec![
            Msg::SearchQueryChanged(rest.to_string()),
            Msg::SearchSubmitted,
        ]),
        "stock" => Command::Dispatch(vec![
            Msg::StockSymbolChanged(rest.to_string()),
            Msg::StockSymbolSubmitted,
        ]),
        "upload" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("upload <path>"));
            }
            Command::Dispatch(vec![
                Msg::UploadFileChosen(Some(PathBuf::from(rest))),
                Msg::UploadSubmitted,
            ])
        }
        "download" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("download <filename>"));
            }
            one(Msg::DownloadRequested(rest.to_string()))
        }
        "history" => one(Msg::HistoryRefreshRequested),
        "report" => report(rest)?,
        "dismiss" => one(Msg::ToastDismissed(number(rest)?)),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn one(msg: Msg) -> Command {
    Command::Dispatch(vec![msg])
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn login(rest: &str) -> Result<Command, CommandError> {
    if rest.is_empty() {
        return Ok(one(Msg::LoginSubmitted));
    }
    let (user, password) = split_word(rest);
    if password.is_empty() {
        return Err(CommandError::Usage("login <user> <password>"));
    }
    Ok(Command::Dispatch(vec![
        Msg::UsernameChanged(user.to_string()),
        Msg::PasswordChanged(password.to_string()),
        Msg::LoginSubmitted,
    ]))
}

fn category(rest: &str) -> Result<Command, CommandError> {
    if rest.eq_ignore_ascii_case("all") || rest.is_empty() {
        return Ok(one(Msg::NewsCategoryChanged(None)));
    }
    let category =
        NewsCategory::parse(rest).ok_or_else(|| CommandError::UnknownCategory(rest.to_string()))?;
    Ok(one(Msg::NewsCategoryChanged(Some(category))))
}

fn scroll(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "scroll news|search <height> <top> <client>";
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let [target, height, top, client] = parts.as_slice() else {
        return Err(CommandError::Usage(USAGE));
    };
    let metrics = ScrollMetrics {
        scroll_height: number(height)?,
        scroll_top: number(top)?,
        client_height: number(client)?,
    };
    match *target {
        "news" => Ok(one(Msg::NewsScrolled(metrics))),
        "search" => Ok(one(Msg::SearchScrolled(metrics))),
        _ => Err(CommandError::Usage(USAGE)),
    }
}

fn report(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "report title|notes|symbol|pick|attach|build|quick";
    let (word, value) = split_word(rest);
    let msg = match word {
        "title" => Msg::ReportTitleChanged(value.to_string()),
        "notes" => Msg::ReportNotesChanged(value.to_string()),
        "symbol" => Msg::ReportSymbolChanged(value.to_string()),
        "pick" => {
            let position: usize = number(value)?;
            if position == 0 {
                return Err(CommandError::Usage("report pick <n> (counting from 1)"));
            }
            Msg::ReportNewsToggledAt(position - 1)
        }
        "attach" if !value.is_empty() => Msg::ReportUploadToggled(value.to_string()),
        "build" => Msg::ReportBuildClicked,
        "quick" => Msg::QuickReportClicked,
        _ => return Err(CommandError::Usage(USAGE)),
    };
    Ok(one(msg))
}

fn number<T: std::str::FromStr>(text: &str) -> Result<T, CommandError> {
    text.trim()
        .parse()
        .map_err(|_| CommandError::NotANumber(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn login_with_arguments_fills_the_form_first() {
        assert_eq!(
            parse("login alice secret1").unwrap(),
            Some(Command::Dispatch(vec![
                Msg::UsernameChanged("alice".into()),
                Msg::PasswordChanged("secret1".into()),
                Msg::LoginSubmitted,
            ]))
        );
        assert_eq!(
            parse("login").unwrap(),
            Some(Command::Dispatch(vec![Msg::LoginSubmitted]))
        );
    }

    #[test]
    fn search_keeps_the_whole_query() {
        assert_eq!(
            parse("search  rust async runtimes ").unwrap(),
            Some(Command::Dispatch(vec![
                Msg::SearchQueryChanged("rust async runtimes".into()),
                Msg::SearchSubmitted,
            ]))
        );
    }

    #[test]
    fn report_pick_counts_from_one() {
        assert_eq!(
            parse("report pick 2").unwrap(),
            Some(Command::Dispatch(vec![Msg::ReportNewsToggledAt(1)]))
        );
        assert!(parse("report pick 0").is_err());
        assert_eq!(
            parse("report pick two"),
            Err(CommandError::NotANumber("two".into()))
        );
    }

    #[test]
    fn category_accepts_names_and_all() {
        assert_eq!(
            parse("category Sports").unwrap(),
            Some(Command::Dispatch(vec![Msg::NewsCategoryChanged(Some(
                NewsCategory::Sports
            ))]))
        );
        assert_eq!(
            parse("category all").unwrap(),
            Some(Command::Dispatch(vec![Msg::NewsCategoryChanged(None)]))
        );
        assert!(matches!(
            parse("category weather"),
            Err(CommandError::UnknownCategory(_))
        ));
    }

    #[test]
    fn scroll_builds_metrics() {
        assert_eq!(
            parse("scroll news 1000 480 500").unwrap(),
            Some(Command::Dispatch(vec![Msg::NewsScrolled(ScrollMetrics {
                scroll_height: 1000.0,
                scroll_top: 480.0,
                client_height: 500.0,
            })]))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(
            parse("frobnicate"),
            Err(CommandError::Unknown("frobnicate".into()))
        );
        assert_eq!(parse("quit").unwrap(), Some(Command::Quit));
    }
}
