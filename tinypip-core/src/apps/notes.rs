//! NOTES: a persisted list of short notes plus a one-key-at-a-time editor
//!
//! The list view scrolls six notes at a time. A opens the shared
//! character editor and Y saves the draft as a new note.

use heapless::{String, Vec};
use tinypip_display::{Button, Screen};

use super::editor::CharEditor;
use super::text;
use crate::app::{App, AppContext, AppControl, CONTENT_TOP};
use crate::input::Press;
use crate::log::{info, warn};
use crate::persist;
use crate::traits::{Board, StorageKey};

/// Longest note
pub const NOTE_LEN: usize = 28;

/// Notes kept; the oldest is dropped to make room
pub const MAX_NOTES: usize = 16;

/// Notes shown at once
pub const VISIBLE_NOTES: usize = 6;

/// Characters the editor cycles through
pub const CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 .,-!?";

/// Stored note list, oldest first
pub type NoteList = Vec<String<NOTE_LEN>, MAX_NOTES>;

/// Append `note`, dropping the oldest when the list is full
pub fn push_note(notes: &mut NoteList, note: String<NOTE_LEN>) {
    if notes.is_full() {
        notes.remove(0);
    }
    let _ = notes.push(note);
}

#[derive(Debug, Default)]
pub struct NotesApp {
    notes: NoteList,
    scroll: usize,
    editor: Option<CharEditor<NOTE_LEN>>,
}

impl NotesApp {
    pub fn new() -> Self {
        Self::default()
    }

    fn max_scroll(&self) -> usize {
        self.notes.len().saturating_sub(VISIBLE_NOTES)
    }

    fn save(&mut self, board: &mut Board<'_>, draft: String<NOTE_LEN>) {
        if draft.trim().is_empty() {
            return;
        }
        push_note(&mut self.notes, draft);
        if !persist::save(&mut *board.storage, StorageKey::Notes, &self.notes) {
            warn!("notes: note kept in memory only");
        }
        info!("notes: {} stored", self.notes.len());
        self.scroll = self.max_scroll();
    }

    fn list_frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let now = board.clock.now_ticks_ms();
        match ctx.vertical(&mut *board.input, now) {
            Some(Press::Up) => self.scroll = self.scroll.saturating_sub(1),
            Some(Press::Down) => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            _ => {}
        }
        if ctx.pressed(&mut *board.input, Button::Confirm, now) {
            self.editor = Some(CharEditor::new(CHARSET));
            return self.editor_frame(ctx, board, screen);
        }

        if self.notes.is_empty() {
            screen.set_text(CONTENT_TOP, 1, "NO NOTES FOUND");
            return;
        }
        for (row, note) in self
            .notes
            .iter()
            .skip(self.scroll)
            .take(VISIBLE_NOTES)
            .enumerate()
        {
            screen.set_text(CONTENT_TOP + row, 1, note);
        }
        if self.notes.len() > VISIBLE_NOTES {
            screen.set_text(
                CONTENT_TOP + VISIBLE_NOTES + 1,
                1,
                &text(format_args!(
                    "{}-{} OF {}",
                    self.scroll + 1,
                    self.scroll + VISIBLE_NOTES,
                    self.notes.len()
                )),
            );
        }
    }

    fn editor_frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        let finished = editor.handle_input(ctx, board);
        editor.draw(screen, "NOTE:", "Y: SAVE  B: CANCEL");

        if finished {
            if let Some(editor) = self.editor.take() {
                self.save(board, editor.into_draft());
            }
        }
    }
}

impl App for NotesApp {
    fn title(&self) -> &'static str {
        if self.editor.is_some() {
            "ADD NOTE"
        } else {
            "NOTES"
        }
    }

    fn footer(&self) -> (&'static str, &'static str) {
        if self.editor.is_some() {
            ("A: ADD", "Y: SAVE")
        } else {
            ("B: BACK", "A: NEW NOTE")
        }
    }

    fn enter(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        self.notes = persist::load(&mut *board.storage, StorageKey::Notes).unwrap_or_default();
        self.scroll = 0;
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        if self.editor.is_some() {
            self.editor_frame(ctx, board, screen);
        } else {
            self.list_frame(ctx, board, screen);
        }
    }

    fn on_back(&mut self, _ctx: &mut AppContext, _board: &mut Board<'_>) -> AppControl {
        if self.editor.take().is_some() {
            AppControl::Continue
        } else {
            AppControl::Exit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::run_frame;
    use crate::config::{DeviceConfig, Settings};
    use crate::testing::FakeBoard;

    fn note(s: &str) -> String<NOTE_LEN> {
        String::try_from(s).unwrap()
    }

    fn setup() -> (FakeBoard, AppContext, Screen, NotesApp) {
        (
            FakeBoard::new(0),
            AppContext::new(DeviceConfig::default(), Settings::default(), 0),
            Screen::new(),
            NotesApp::new(),
        )
    }

    #[test]
    fn test_push_note_drops_oldest() {
        let mut notes = NoteList::new();
        for i in 0..MAX_NOTES + 2 {
            let mut n = String::new();
            core::fmt::write(&mut n, format_args!("N{}", i)).unwrap();
            push_note(&mut notes, n);
        }
        assert_eq!(notes.len(), MAX_NOTES);
        assert_eq!(notes[0].as_str(), "N2");
        assert_eq!(notes[MAX_NOTES - 1].as_str(), "N17");
    }

    #[test]
    fn test_empty_list() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        app.enter(&mut ctx, &mut fakes.board());
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(screen.contains("NO NOTES FOUND"));
    }

    #[test]
    fn test_scrolls_six_at_a_time() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        let mut stored = NoteList::new();
        for s in ["ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT"] {
            push_note(&mut stored, note(s));
        }
        assert!(persist::save(&mut fakes.storage, StorageKey::Notes, &stored));

        app.enter(&mut ctx, &mut fakes.board());
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(screen.contains("SIX"));
        assert!(!screen.contains("SEVEN"));
        assert!(screen.contains("1-6 OF 8"));

        // Holding Down stops once the last note is visible
        fakes.buttons.hold(Button::Down, fakes.clock.now_ms(), 1_000);
        for _ in 0..20 {
            run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        }
        assert_eq!(app.scroll, 2);
        assert!(screen.contains("EIGHT"));
        assert!(!screen.contains(" ONE"));
    }

    #[test]
    fn test_compose_and_save() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        // Open the editor, add "A", step to "B", add it, save
        fakes.buttons.tap(Button::Confirm, 0);
        fakes.buttons.tap(Button::Confirm, 250);
        fakes.buttons.tap(Button::Down, 500);
        fakes.buttons.tap(Button::Confirm, 750);
        fakes.buttons.tap(Button::Secondary, 1_000);
        let inspect = fakes.clone();

        app.enter(&mut ctx, &mut fakes.board());
        while fakes.clock.now_ms() < 1_100 {
            run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        }

        assert!(app.editor.is_none());
        assert_eq!(app.notes.len(), 1);
        assert_eq!(app.notes[0].as_str(), "AB");
        assert!(inspect.display.ever_showed("ADD NOTE"));

        let saved: Option<NoteList> = persist::load(&mut fakes.storage, StorageKey::Notes);
        assert_eq!(saved.map(|n| n.len()), Some(1));
    }

    #[test]
    fn test_back_cancels_editor_first() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        fakes.buttons.tap(Button::Confirm, 0);
        fakes.buttons.tap(Button::Back, 300);

        app.enter(&mut ctx, &mut fakes.board());
        let mut exited = false;
        while fakes.clock.now_ms() < 500 {
            if run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen) == AppControl::Exit {
                exited = true;
            }
        }
        assert!(!exited);
        assert!(app.editor.is_none());
        assert!(app.notes.is_empty());
    }
}
