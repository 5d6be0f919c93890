//! User intents typed at the terminal, translated into store operations.
//!
//! DESIGN
//! ======
//! One line is one intent. Artifact ids may be abbreviated to any unique
//! prefix of their hyphenated or simple form; resolution happens against the
//! current snapshot so listings and commands stay in sync.
//!
//! Grammar:
//! - `create <kind>[:<language>] <title> [:: <content>]`
//! - `update <id> title|content|lang <value>` (`lang -` clears the language)
//! - `remove <id>` / `select <id>`
//! - `open` / `close` / `list` / `show` / `source` / `copy` / `download`
//! - `assistant <reply>` creates one artifact per fenced code block
//! - `help` / `quit`
//!
//! Content and replies accept `\n` and `\t` escapes.

use uuid::Uuid;

use crate::artifact::{ArtifactKind, ArtifactPatch, KindParseError, NewArtifact};
use crate::store::PanelSnapshot;

pub const HELP: &str = "\
commands:
  create <kind>[:<language>] <title> [:: <content>]
  update <id> title|content|lang <value>
  remove <id> | select <id>
  open | close | list | show | source | copy | download
  assistant <reply with ``` fenced blocks>
  help | quit";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Kind(#[from] KindParseError),
    #[error("unknown field: {0} (expected title, content or lang)")]
    UnknownField(String),
    #[error("no artifact matches id {0}")]
    NoMatch(String),
    #[error("id {0} matches more than one artifact")]
    Ambiguous(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Create(NewArtifact),
    Update { target: String, patch: ArtifactPatch },
    Remove(String),
    Select(String),
    Open,
    Close,
    List,
    Show,
    Source,
    Copy,
    Download,
    Assistant(String),
    Help,
    Quit,
}

impl Intent {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an [`IntentError`] describing the first problem in the line.
    pub fn parse(line: &str) -> Result<Option<Self>, IntentError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (command, rest) = split_word(line);

        let intent = match command {
            "create" => parse_create(rest)?,
            "update" => parse_update(rest)?,
            "remove" | "rm" => Self::Remove(require_word(rest, "artifact id")?),
            "select" => Self::Select(require_word(rest, "artifact id")?),
            "open" => Self::Open,
            "close" => Self::Close,
            "list" | "ls" => Self::List,
            "show" => Self::Show,
            "source" => Self::Source,
            "copy" => Self::Copy,
            "download" => Self::Download,
            "assistant" => {
                if rest.is_empty() {
                    return Err(IntentError::MissingArgument("reply text"));
                }
                Self::Assistant(unescape(rest))
            }
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(IntentError::UnknownCommand(other.to_owned())),
        };
        Ok(Some(intent))
    }
}

fn parse_create(rest: &str) -> Result<Intent, IntentError> {
    let (kind_arg, rest) = split_word(rest);
    if kind_arg.is_empty() {
        return Err(IntentError::MissingArgument("artifact kind"));
    }
    let (kind, language) = match kind_arg.split_once(':') {
        Some((kind, lang)) if !lang.is_empty() => (kind.parse::<ArtifactKind>()?, Some(lang.to_owned())),
        Some((kind, _)) => (kind.parse::<ArtifactKind>()?, None),
        None => (kind_arg.parse::<ArtifactKind>()?, None),
    };
    let (title, content) = match rest.split_once("::") {
        Some((title, content)) => (title.trim(), unescape(content.trim_start())),
        None => (rest.trim(), String::new()),
    };
    let mut draft = NewArtifact::new(kind, title, content);
    draft.language = language;
    Ok(Intent::Create(draft))
}

fn parse_update(rest: &str) -> Result<Intent, IntentError> {
    let (target, rest) = split_word(rest);
    if target.is_empty() {
        return Err(IntentError::MissingArgument("artifact id"));
    }
    let (field, value) = split_word(rest);
    let patch = match field {
        "" => return Err(IntentError::MissingArgument("field")),
        "title" => ArtifactPatch::title(value),
        "content" => ArtifactPatch::content(unescape(value)),
        "lang" | "language" => match value {
            "" | "-" => ArtifactPatch::language(None),
            lang => ArtifactPatch::language(Some(lang.to_owned())),
        },
        other => return Err(IntentError::UnknownField(other.to_owned())),
    };
    Ok(Intent::Update { target: target.to_owned(), patch })
}

/// Resolve an abbreviated id against the artifacts in `snapshot`.
///
/// # Errors
///
/// Returns [`IntentError::NoMatch`] or [`IntentError::Ambiguous`].
pub fn resolve_id(snapshot: &PanelSnapshot, prefix: &str) -> Result<Uuid, IntentError> {
    if let Ok(id) = Uuid::parse_str(prefix) {
        return Ok(id);
    }
    let needle = prefix.to_ascii_lowercase();
    let mut matches = snapshot.artifacts.iter().filter(|a| {
        a.id.hyphenated().to_string().starts_with(&needle) || a.id.simple().to_string().starts_with(&needle)
    });
    match (matches.next(), matches.next()) {
        (Some(a), None) => Ok(a.id),
        (Some(_), Some(_)) => Err(IntentError::Ambiguous(prefix.to_owned())),
        (None, _) => Err(IntentError::NoMatch(prefix.to_owned())),
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

fn require_word(s: &str, what: &'static str) -> Result<String, IntentError> {
    let (word, _) = split_word(s);
    if word.is_empty() {
        return Err(IntentError::MissingArgument(what));
    }
    Ok(word.to_owned())
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
#[path = "intent_test.rs"]
mod tests;
