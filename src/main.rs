use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use artifact_panel::export::{CopyFeedback, MemoryClipboard, copy_to_clipboard, download_best_effort};
use artifact_panel::extract::code_block_artifacts;
use artifact_panel::intent::{HELP, Intent, IntentError, resolve_id};
use artifact_panel::view::{PanelView, ViewMode, render_text, short_id};
use artifact_panel::{ArtifactHandle, ArtifactProvider, Context, PanelConfig, PanelSnapshot, use_artifacts};
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum DriverError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "artifact-panel", about = "Drive the artifact side panel from the terminal")]
struct Cli {
    #[arg(long, env = "ARTIFACT_DOWNLOAD_DIR")]
    download_dir: Option<PathBuf>,

    /// Keep focus when the panel closes. Overrides `ARTIFACT_CLOSE_KEEPS_FOCUS` only when given.
    #[arg(long)]
    close_keeps_focus: bool,

    #[arg(long, default_value = "-", help = "Command file path, or - for stdin")]
    script: String,
}

/// Layer command-line overrides on top of the environment config.
fn panel_config(cli: &Cli, mut config: PanelConfig) -> PanelConfig {
    if let Some(dir) = &cli.download_dir {
        config.download_dir.clone_from(dir);
    }
    if cli.close_keeps_focus {
        config.close_keeps_focus = true;
    }
    config
}

struct Session {
    handle: ArtifactHandle,
    clipboard: MemoryClipboard,
    feedback: CopyFeedback,
}

#[tokio::main]
async fn main() -> Result<(), DriverError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = panel_config(&cli, PanelConfig::from_env());

    let mut cx = Context::new();
    ArtifactProvider::mount(&mut cx, config);
    let handle = use_artifacts(&cx);

    // Re-render synchronously on every published snapshot.
    let render_config = handle.config().clone();
    handle.subscribe(move |snapshot: &Arc<PanelSnapshot>| {
        print!("{}", render_text(&PanelView::build(snapshot, &render_config, ViewMode::Preview)));
    });

    let (_watch_id, mut rx) = handle.watch();
    let watcher = tokio::spawn(async move {
        while let Some(snapshot) = rx.recv().await {
            info!(
                revision = snapshot.revision,
                artifacts = snapshot.artifacts.len(),
                panel_open = snapshot.panel_open,
                focused = ?snapshot.focused.map(short_id),
                "panel snapshot published"
            );
        }
    });

    let feedback = CopyFeedback::new(handle.config().copy_feedback);
    let mut session = Session { handle, clipboard: MemoryClipboard::default(), feedback };

    let input: Box<dyn AsyncBufRead + Unpin> = if cli.script == "-" {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        Box::new(BufReader::new(tokio::fs::File::open(&cli.script).await?))
    };
    info!(script = %cli.script, "artifact panel driver started");

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match Intent::parse(&line) {
            Ok(None) => {}
            Ok(Some(Intent::Quit)) => break,
            Ok(Some(intent)) => {
                if let Err(e) = session.apply(intent) {
                    eprintln!("error: {e}");
                }
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }

    drop(session);
    ArtifactProvider::unmount(&mut cx);
    if let Err(e) = watcher.await {
        warn!(error = %e, "snapshot watcher ended abnormally");
    }
    Ok(())
}

impl Session {
    fn apply(&mut self, intent: Intent) -> Result<(), IntentError> {
        match intent {
            Intent::Create(draft) => {
                let artifact = self.handle.create(draft);
                println!("created {}", short_id(artifact.id));
            }
            Intent::Update { target, patch } => {
                let id = resolve_id(&self.handle.snapshot(), &target)?;
                self.handle.update(id, patch);
            }
            Intent::Remove(target) => {
                let id = resolve_id(&self.handle.snapshot(), &target)?;
                self.handle.remove(id);
            }
            Intent::Select(target) => {
                let id = resolve_id(&self.handle.snapshot(), &target)?;
                self.handle.select(id);
            }
            Intent::Open => self.handle.open(),
            Intent::Close => self.handle.close(),
            Intent::List => {
                for a in &self.handle.snapshot().artifacts {
                    println!("{} {:<9} {}", short_id(a.id), a.kind, a.title);
                }
            }
            Intent::Show => self.print_view(ViewMode::Preview),
            Intent::Source => self.print_view(ViewMode::Source),
            Intent::Copy => {
                let snapshot = self.handle.snapshot();
                let Some(artifact) = snapshot.focused() else {
                    println!("nothing to copy");
                    return Ok(());
                };
                if copy_to_clipboard(&mut self.clipboard, artifact, &mut self.feedback) {
                    let lit = self.feedback.is_copied(Instant::now());
                    println!("copied {} bytes{}", artifact.content.len(), if lit { " ✓" } else { "" });
                }
            }
            Intent::Download => {
                let snapshot = self.handle.snapshot();
                let Some(artifact) = snapshot.focused() else {
                    println!("nothing to download");
                    return Ok(());
                };
                if let Some(path) = download_best_effort(artifact, &self.handle.config().download_dir) {
                    println!("saved {}", path.display());
                }
            }
            Intent::Assistant(reply) => {
                for draft in code_block_artifacts(&reply) {
                    let artifact = self.handle.create(draft);
                    println!("created {}", short_id(artifact.id));
                }
            }
            Intent::Help => println!("{HELP}"),
            Intent::Quit => {}
        }
        Ok(())
    }

    fn print_view(&self, mode: ViewMode) {
        let snapshot = self.handle.snapshot();
        print!("{}", render_text(&PanelView::build(&snapshot, self.handle.config(), mode)));
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
