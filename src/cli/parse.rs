//! Turning user input into validated commands.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};
use clap::Parser;
use clap::error::ErrorKind;
use regex::Regex;
use std::sync::LazyLock;

use super::{EditArgs, Operation, ShellCommand, ShellLine};
use crate::command::{BookmarkChanges, Command, CommandError};
use crate::domain::{Bookmark, Name, Tag, Url, ValidationError};

static OFFSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*([mhd])$").expect("valid regex"));

const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Splits a shell line into words. Single or double quotes group words.
///
/// # Errors
///
/// Returns `CommandError::Parse` for an unterminated quote.
pub fn split_line(line: &str) -> Result<Vec<String>, CommandError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(CommandError::Parse(format!("unterminated {q} quote")));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parses one line of shell input.
///
/// # Errors
///
/// `Parse` for unknown commands or malformed arguments, `Validation` for
/// arguments that parse but are not acceptable values.
pub fn parse_line(line: &str, now: DateTime<Utc>) -> Result<Command, CommandError> {
    let words = split_line(line)?;
    if words.is_empty() {
        return Err(CommandError::Parse("empty command".to_string()));
    }

    let parsed = ShellLine::try_parse_from(words).map_err(clap_message)?;
    Ok(parsed.command.into_command(now)?)
}

fn clap_message(err: clap::Error) -> CommandError {
    let rendered = err.to_string();
    let message = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            rendered.trim_end().to_string()
        }
        _ => rendered
            .lines()
            .next()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .to_string(),
    };
    CommandError::Parse(message)
}

/// Parses a reminder time.
///
/// Accepts `YYYY-MM-DD HH:MM` in local time, an RFC 3339 timestamp, or an
/// offset from `now` such as `30m`, `3h` or `2d`.
///
/// # Errors
///
/// Returns `ValidationError::InvalidRemindTime` for anything else.
pub fn parse_remind_time(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
    let input = input.trim();
    let invalid = || ValidationError::InvalidRemindTime(input.to_string());

    if let Some(caps) = OFFSET_RE.captures(input) {
        let amount: i64 = caps[1].parse().map_err(|_| invalid())?;
        let offset = match &caps[2] {
            "m" => Duration::try_minutes(amount),
            "h" => Duration::try_hours(amount),
            _ => Duration::try_days(amount),
        }
        .ok_or_else(invalid)?;
        return now.checked_add_signed(offset).ok_or_else(invalid);
    }

    if let Ok(time) = DateTime::parse_from_rfc3339(input) {
        return Ok(time.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(input, LOCAL_FORMAT).map_err(|_| invalid())?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(invalid)
}

fn parse_tags(tags: &[String]) -> Result<Vec<Tag>, ValidationError> {
    tags.iter()
        .map(|t| Tag::new(t).map_err(ValidationError::from))
        .collect()
}

impl Operation {
    /// Validates the arguments and builds the engine command.
    pub fn into_command(self, now: DateTime<Utc>) -> Result<Command, ValidationError> {
        let command = match self {
            Self::Add(args) => {
                let bookmark = Bookmark::builder(Name::new(&args.name)?, Url::new(&args.url)?)
                    .remark(args.remark)
                    .tags(parse_tags(&args.tags)?)
                    .build();
                Command::Add(bookmark)
            }
            Self::Delete(args) => Command::Delete(args.index),
            Self::Edit(args) => {
                let index = args.index;
                Command::edit(index, changes_from(args)?)?
            }
            Self::Find(args) => Command::find(args.keywords)?,
            Self::List(_) => Command::List,
            Self::Clear => Command::Clear,
            Self::Goto(args) => Command::Goto(args.index),
            Self::Remind(args) => Command::AddReminder {
                index: args.index,
                note: args.note,
                remind_time: parse_remind_time(&args.at, now)?,
            },
            Self::Unremind(args) => Command::DeleteReminder(args.index),
            Self::Reminders(_) => Command::ListReminders,
        };
        Ok(command)
    }
}

fn changes_from(args: EditArgs) -> Result<BookmarkChanges, ValidationError> {
    let tags = if args.clear_tags {
        Some(Vec::new())
    } else if args.tags.is_empty() {
        None
    } else {
        Some(parse_tags(&args.tags)?)
    };

    Ok(BookmarkChanges {
        name: args.name.as_deref().map(Name::new).transpose()?,
        url: args.url.as_deref().map(Url::new).transpose()?,
        remark: args.remark,
        tags,
    })
}

impl ShellCommand {
    pub fn into_command(self, now: DateTime<Utc>) -> Result<Command, ValidationError> {
        match self {
            Self::Op(operation) => operation.into_command(now),
            Self::Help => Ok(Command::Help),
            Self::Exit => Ok(Command::Exit),
            Self::Tab { tab } => Ok(Command::SwitchTab(tab)),
            Self::Expand { levels } => Command::expand_folder(levels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Tab;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    // ===========================================
    // split_line
    // ===========================================

    #[test]
    fn split_line_on_whitespace() {
        assert_eq!(
            split_line("  add  NUSMods https://nusmods.com ").unwrap(),
            vec!["add", "NUSMods", "https://nusmods.com"]
        );
    }

    #[test]
    fn split_line_groups_quoted_words() {
        assert_eq!(
            split_line(r#"add "Rust Book" https://doc.rust-lang.org -r 'read it'"#).unwrap(),
            vec!["add", "Rust Book", "https://doc.rust-lang.org", "-r", "read it"]
        );
    }

    #[test]
    fn split_line_keeps_empty_quoted_word() {
        assert_eq!(
            split_line(r#"edit 1 -r """#).unwrap(),
            vec!["edit", "1", "-r", ""]
        );
    }

    #[test]
    fn split_line_rejects_unterminated_quote() {
        assert!(matches!(
            split_line(r#"add "Rust Book https://x.com"#),
            Err(CommandError::Parse(_))
        ));
    }

    // ===========================================
    // parse_line
    // ===========================================

    #[test]
    fn parse_add_with_remark_and_tags() {
        let command = parse_line(
            r#"add "Rust Book" https://doc.rust-lang.org -r reference -t rust -t Docs"#,
            now(),
        )
        .unwrap();

        let Command::Add(bookmark) = command else {
            panic!("expected add, got {command:?}");
        };
        assert_eq!(bookmark.name().as_str(), "Rust Book");
        assert_eq!(bookmark.remark(), Some("reference"));
        let tags: Vec<&str> = bookmark.tags().iter().map(Tag::as_str).collect();
        assert_eq!(tags, vec!["rust", "docs"]);
    }

    #[test]
    fn parse_add_with_bad_url_is_validation_error() {
        let err = parse_line("add NUSMods nusmods.com", now()).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Validation(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn parse_unknown_command_is_parse_error() {
        let err = parse_line("launch 1", now()).unwrap_err();
        let CommandError::Parse(message) = err else {
            panic!("expected parse error");
        };
        assert!(message.contains("launch"), "{message}");
    }

    #[test]
    fn parse_missing_index_is_parse_error() {
        assert!(matches!(
            parse_line("delete", now()),
            Err(CommandError::Parse(_))
        ));
    }

    #[test]
    fn parse_blank_line_is_parse_error() {
        assert!(matches!(parse_line("   ", now()), Err(CommandError::Parse(_))));
    }

    #[test]
    fn parse_shell_only_commands() {
        assert_eq!(parse_line("help", now()).unwrap(), Command::Help);
        assert_eq!(parse_line("exit", now()).unwrap(), Command::Exit);
        assert_eq!(
            parse_line("tab offline", now()).unwrap(),
            Command::SwitchTab(Tab::Offline)
        );
        assert_eq!(
            parse_line("expand 2", now()).unwrap(),
            Command::expand_folder(2).unwrap()
        );
    }

    #[test]
    fn parse_expand_zero_is_rejected() {
        assert!(matches!(
            parse_line("expand 0", now()),
            Err(CommandError::Validation(ValidationError::ZeroExpandLevels))
        ));
    }

    #[test]
    fn parse_edit_without_fields_is_rejected() {
        assert!(matches!(
            parse_line("edit 1", now()),
            Err(CommandError::Validation(ValidationError::NothingToEdit))
        ));
    }

    #[test]
    fn parse_edit_clear_tags() {
        let command = parse_line("edit 2 --clear-tags", now()).unwrap();
        assert_eq!(
            command,
            Command::Edit {
                index: 2,
                changes: BookmarkChanges {
                    tags: Some(Vec::new()),
                    ..BookmarkChanges::default()
                },
            }
        );
    }

    #[test]
    fn parse_find_keywords() {
        assert_eq!(
            parse_line("find rust NUS", now()).unwrap(),
            Command::Find(vec!["rust".to_string(), "NUS".to_string()])
        );
    }

    #[test]
    fn parse_remind_with_offset() {
        assert_eq!(
            parse_line(r#"remind 1 --at 3h --note "check grades""#, now()).unwrap(),
            Command::AddReminder {
                index: 1,
                note: "check grades".to_string(),
                remind_time: now() + Duration::hours(3),
            }
        );
    }

    // ===========================================
    // parse_remind_time
    // ===========================================

    #[test]
    fn remind_time_offsets() {
        assert_eq!(
            parse_remind_time("30m", now()).unwrap(),
            now() + Duration::minutes(30)
        );
        assert_eq!(
            parse_remind_time("2d", now()).unwrap(),
            now() + Duration::days(2)
        );
    }

    #[test]
    fn remind_time_rfc3339() {
        assert_eq!(
            parse_remind_time("2024-01-15T12:30:00Z", now()).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn remind_time_local_format() {
        let parsed = parse_remind_time("2024-03-01 08:15", now()).unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.format(LOCAL_FORMAT).to_string(), "2024-03-01 08:15");
    }

    #[test]
    fn remind_time_rejects_garbage() {
        for input in ["tomorrow", "3w", "", "2024-13-01 08:15"] {
            assert_eq!(
                parse_remind_time(input, now()),
                Err(ValidationError::InvalidRemindTime(input.to_string())),
                "{input}"
            );
        }
    }
}
