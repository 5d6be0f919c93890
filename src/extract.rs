//! Turn fenced code blocks in assistant replies into artifact drafts.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

use crate::artifact::{ArtifactKind, NewArtifact};

/// Collect every non-empty fenced code block in `markdown` as a code artifact.
///
/// The first word of the fence info string becomes the language. Titles are
/// numbered in reply order.
#[must_use]
pub fn code_block_artifacts(markdown: &str) -> Vec<NewArtifact> {
    let mut out = Vec::new();
    let mut current: Option<(Option<String>, String)> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let language = info.split_whitespace().next().map(str::to_lowercase);
                current = Some((language, String::new()));
            }
            Event::Text(text) => {
                if let Some((_, body)) = current.as_mut() {
                    body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                let Some((language, body)) = current.take() else {
                    continue;
                };
                if body.trim().is_empty() {
                    continue;
                }
                let n = out.len() + 1;
                let title = match &language {
                    Some(lang) => format!("{lang} snippet {n}"),
                    None => format!("snippet {n}"),
                };
                let mut draft = NewArtifact::new(ArtifactKind::Code, title, body);
                draft.language = language;
                out.push(draft);
            }
            _ => {}
        }
    }
    out
}
