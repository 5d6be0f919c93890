use super::*;
use crate::store::ArtifactStore;

fn parse(line: &str) -> Intent {
    Intent::parse(line).unwrap().unwrap()
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn blank_and_comment_lines_are_skipped() {
    assert_eq!(Intent::parse("   "), Ok(None));
    assert_eq!(Intent::parse("# note"), Ok(None));
}

#[test]
fn create_with_language_title_and_content() {
    let intent = parse("create code:python Fizz Buzz :: for i in range(3):\\n    print(i)");
    let Intent::Create(draft) = intent else {
        panic!("expected create");
    };
    assert_eq!(draft.kind, ArtifactKind::Code);
    assert_eq!(draft.language.as_deref(), Some("python"));
    assert_eq!(draft.title, "Fizz Buzz");
    assert_eq!(draft.content, "for i in range(3):\n    print(i)");
}

#[test]
fn create_without_content_allows_empty_strings() {
    let Intent::Create(draft) = parse("create document") else {
        panic!("expected create");
    };
    assert_eq!(draft.kind, ArtifactKind::Document);
    assert_eq!(draft.title, "");
    assert_eq!(draft.content, "");
    assert_eq!(draft.language, None);
}

#[test]
fn create_with_empty_language_suffix() {
    let Intent::Create(draft) = parse("create code: Untitled") else {
        panic!("expected create");
    };
    assert_eq!(draft.language, None);
    assert_eq!(draft.title, "Untitled");
}

#[test]
fn create_rejects_unknown_kind() {
    let err = Intent::parse("create video Trailer").unwrap_err();
    assert_eq!(err, IntentError::Kind(KindParseError("video".into())));
}

#[test]
fn create_requires_kind() {
    assert_eq!(Intent::parse("create").unwrap_err(), IntentError::MissingArgument("artifact kind"));
}

#[test]
fn update_fields() {
    assert_eq!(
        parse("update ab12 title New Name"),
        Intent::Update { target: "ab12".into(), patch: ArtifactPatch::title("New Name") }
    );
    assert_eq!(
        parse("update ab12 content a\\tb"),
        Intent::Update { target: "ab12".into(), patch: ArtifactPatch::content("a\tb") }
    );
    assert_eq!(
        parse("update ab12 lang ts"),
        Intent::Update { target: "ab12".into(), patch: ArtifactPatch::language(Some("ts".into())) }
    );
    assert_eq!(
        parse("update ab12 lang -"),
        Intent::Update { target: "ab12".into(), patch: ArtifactPatch::language(None) }
    );
}

#[test]
fn update_errors() {
    assert_eq!(Intent::parse("update").unwrap_err(), IntentError::MissingArgument("artifact id"));
    assert_eq!(Intent::parse("update ab12").unwrap_err(), IntentError::MissingArgument("field"));
    assert_eq!(Intent::parse("update ab12 kind image").unwrap_err(), IntentError::UnknownField("kind".into()));
}

#[test]
fn simple_commands() {
    assert_eq!(parse("open"), Intent::Open);
    assert_eq!(parse("close"), Intent::Close);
    assert_eq!(parse("ls"), Intent::List);
    assert_eq!(parse("show"), Intent::Show);
    assert_eq!(parse("source"), Intent::Source);
    assert_eq!(parse("copy"), Intent::Copy);
    assert_eq!(parse("download"), Intent::Download);
    assert_eq!(parse("help"), Intent::Help);
    assert_eq!(parse("exit"), Intent::Quit);
    assert_eq!(parse("select 1f"), Intent::Select("1f".into()));
    assert_eq!(parse("rm 1f"), Intent::Remove("1f".into()));
}

#[test]
fn select_requires_id() {
    assert_eq!(Intent::parse("select").unwrap_err(), IntentError::MissingArgument("artifact id"));
}

#[test]
fn assistant_reply_is_unescaped() {
    assert_eq!(parse("assistant ```py\\nx\\n```"), Intent::Assistant("```py\nx\n```".into()));
    assert_eq!(Intent::parse("assistant").unwrap_err(), IntentError::MissingArgument("reply text"));
}

#[test]
fn unknown_command_is_reported() {
    assert_eq!(Intent::parse("frobnicate").unwrap_err(), IntentError::UnknownCommand("frobnicate".into()));
}

#[test]
fn unescape_keeps_unknown_sequences() {
    assert_eq!(unescape("a\\qb\\\\c\\"), "a\\qb\\c\\");
}

// =============================================================
// Id resolution
// =============================================================

#[test]
fn resolve_id_by_prefix_and_full_id() {
    let mut store = ArtifactStore::new();
    let a = store.create(NewArtifact::new(ArtifactKind::Code, "a", ""));
    let snapshot = store.snapshot();
    let simple = a.id.simple().to_string();

    assert_eq!(resolve_id(&snapshot, &simple[..6]), Ok(a.id));
    assert_eq!(resolve_id(&snapshot, &simple[..6].to_uppercase()), Ok(a.id));
    assert_eq!(resolve_id(&snapshot, &a.id.to_string()), Ok(a.id));
}

#[test]
fn resolve_id_reports_missing_and_ambiguous() {
    let mut store = ArtifactStore::new();
    store.create(NewArtifact::new(ArtifactKind::Code, "a", ""));
    store.create(NewArtifact::new(ArtifactKind::Code, "b", ""));
    let snapshot = store.snapshot();

    assert!(matches!(resolve_id(&snapshot, "zz"), Err(IntentError::NoMatch(_))));
    assert!(matches!(resolve_id(&snapshot, ""), Err(IntentError::Ambiguous(_))));
}
