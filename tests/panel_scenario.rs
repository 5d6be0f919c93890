use std::sync::{Arc, Mutex};

use artifact_panel::view::{PanelView, ViewMode, sidebar_entries};
use artifact_panel::{
    ArtifactKind, ArtifactPatch, ArtifactProvider, Context, NewArtifact, PanelConfig, PanelSnapshot, use_artifacts,
};

fn ids(snapshot: &PanelSnapshot) -> Vec<uuid::Uuid> {
    snapshot.artifacts.iter().map(|a| a.id).collect()
}

#[test]
fn chat_session_walkthrough() {
    let mut cx = Context::new();
    ArtifactProvider::mount(&mut cx, PanelConfig { close_keeps_focus: true, ..PanelConfig::default() });

    // A list view and a detail view observe the same store.
    let list = use_artifacts(&cx);
    let detail = use_artifacts(&cx);
    let list_seen: Arc<Mutex<Vec<Arc<PanelSnapshot>>>> = Arc::default();
    let detail_seen: Arc<Mutex<Vec<Arc<PanelSnapshot>>>> = Arc::default();
    let sink = Arc::clone(&list_seen);
    list.subscribe(move |s| sink.lock().unwrap().push(Arc::clone(s)));
    let sink = Arc::clone(&detail_seen);
    detail.subscribe(move |s| sink.lock().unwrap().push(Arc::clone(s)));

    let a = list.create(NewArtifact::new(ArtifactKind::Code, "A", "print(1)").with_language("python"));
    let b = list.create(NewArtifact::new(ArtifactKind::Document, "B", "notes"));
    let snap = detail.snapshot();
    assert_eq!(ids(&snap), vec![a.id, b.id]);
    assert_eq!(snap.focused, Some(b.id));

    detail.select(a.id);
    let snap = list.snapshot();
    assert_eq!(snap.focused, Some(a.id));
    assert_eq!(ids(&snap), vec![a.id, b.id]);
    let entries = sidebar_entries(&snap);
    assert!(entries[0].focused && !entries[1].focused);

    list.remove(b.id);
    let snap = detail.snapshot();
    assert_eq!(ids(&snap), vec![a.id]);
    assert_eq!(snap.focused, Some(a.id));

    detail.close();
    let snap = list.snapshot();
    assert!(!snap.panel_open);
    assert_eq!(snap.focused, Some(a.id));
    assert_eq!(PanelView::build(&snap, &PanelConfig::default(), ViewMode::Preview), PanelView::Closed);

    let list_seen = list_seen.lock().unwrap();
    let detail_seen = detail_seen.lock().unwrap();
    assert_eq!(list_seen.len(), 5);
    assert_eq!(detail_seen.len(), 5);
    for (l, d) in list_seen.iter().zip(detail_seen.iter()) {
        assert!(Arc::ptr_eq(l, d));
    }
    let revisions: Vec<u64> = list_seen.iter().map(|s| s.revision).collect();
    assert_eq!(revisions, vec![1, 2, 3, 4, 5]);
}

#[test]
fn focused_copy_tracks_updates() {
    let mut cx = Context::new();
    let handle = ArtifactProvider::mount(&mut cx, PanelConfig::default());
    let a = handle.create(NewArtifact::new(ArtifactKind::Code, "draft", "x").with_language("ts"));

    handle.update(a.id, ArtifactPatch { title: Some("final".into()), content: Some("y".into()), language: None });
    let snap = handle.snapshot();
    let focused = snap.focused().unwrap();
    assert_eq!(focused.title, "final");
    assert_eq!(focused.content, "y");
    assert_eq!(focused.language.as_deref(), Some("ts"));
    assert!(focused.updated_at > focused.created_at);
    assert_eq!(focused.download_file_name(), "final.ts");

    assert!(ArtifactProvider::unmount(&mut cx));
}
