use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::file_service::memory::MemoryFileService;
use crate::io::store::TargetStore;
use crate::model::{AppConfig, Target, TargetKind};
use crate::ops::registry::TargetRegistry;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App over an in-memory file service. The store record lives in
/// the returned temp dir as `targets.json` and is not written until the
/// first mutation.
pub fn app_with_targets(
    targets: &[(&str, &str, TargetKind, &str)],
) -> (App, MemoryFileService, TempDir) {
    let tmp = TempDir::new().unwrap();
    let files = MemoryFileService::new();
    let store = TargetStore::new(tmp.path().join("targets.json"));
    let targets = targets
        .iter()
        .map(|(path, name, kind, content)| Target {
            path: (*path).into(),
            display_name: (*name).to_string(),
            kind: *kind,
            content: (*content).to_string(),
        })
        .collect();
    let registry = TargetRegistry::with_targets(Box::new(files.clone()), store, targets);
    let app = App::new(registry, &AppConfig::default());
    (app, files, tmp)
}

/// A small mixed list used by render tests.
pub fn sample_app() -> (App, MemoryFileService, TempDir) {
    app_with_targets(&[
        ("/data/wins.txt", "Wins", TargetKind::Integer, "12"),
        ("/data/title.txt", "Stream title", TargetKind::String, "Speedrun\nany%"),
        ("/data/empty.txt", "Notes", TargetKind::String, ""),
    ])
}
