use crate::tui::{
    inputs::{map_event, Action},
    views::{self, Screen},
};
use crossterm::{
    event::{self},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use noteminder_core::{
    save_notebook, summarize, today, CoreError, Feedback, Note, NoteId, NoteRepository, Notebook,
    ReviewEngine,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use tracing::{error, info};

pub struct TuiApp {
    repo: Box<dyn NoteRepository>,
    book: Notebook,
    engine: ReviewEngine,
    cursor: usize,
    due_only: bool,
    status: String,
}

impl TuiApp {
    pub fn new(repo: Box<dyn NoteRepository>, book: Notebook) -> Self {
        Self {
            repo,
            book,
            engine: ReviewEngine::default(),
            cursor: 0,
            due_only: false,
            status: String::new(),
        }
    }

    fn visible(&self) -> Vec<&Note> {
        if self.due_only {
            self.engine.list_due(self.book.notes(), today())
        } else {
            self.book.notes().iter().collect()
        }
    }

    fn visible_ids(&self) -> Vec<NoteId> {
        self.visible().iter().map(|n| n.id).collect()
    }

    fn pick(&mut self) {
        match self.engine.pick(&mut self.book, today(), &mut rand::thread_rng()) {
            Ok(note) => {
                if let Some(pos) = self.visible_ids().iter().position(|id| *id == note.id) {
                    self.cursor = pos;
                }
                self.status = format!("reviewing #{}", note.id);
            }
            Err(CoreError::EmptyCollection) => self.status = "nothing to review".into(),
            Err(e) => self.status = e.to_string(),
        }
    }

    fn open_at_cursor(&mut self) {
        if let Some(id) = self.visible_ids().get(self.cursor).copied() {
            if let Err(e) = self.book.select(id) {
                self.status = e.to_string();
            }
        }
    }

    fn feedback(&mut self, feedback: Feedback) {
        match self.engine.review_selected(&mut self.book, feedback, today()) {
            Ok(note) => {
                self.status = format!(
                    "{feedback}: strength {} next review {}",
                    note.streak, note.next_review
                );
            }
            Err(e) => self.status = e.to_string(),
        }
        let len = self.visible_ids().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        if !self.book.is_empty() {
            self.pick();
        }

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.mainloop(&mut terminal);

        disable_raw_mode().ok();
        let mut out: Stdout = std::io::stdout();
        execute!(out, LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();

        // Save on exit even when the loop failed.
        match save_notebook(&*self.repo, &self.book) {
            Ok(()) => info!(notes = self.book.len(), "notes saved on exit"),
            Err(e) => {
                error!(error = %e, "failed to save notes");
                eprintln!("failed to save notes: {e}");
            }
        }
        res
    }

    fn mainloop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        loop {
            let stats = summarize(self.book.notes(), today());
            terminal.draw(|f| {
                let notes = self.visible();
                let screen = Screen {
                    notes: &notes,
                    cursor: self.cursor,
                    current: self.book.selected_note(),
                    due_only: self.due_only,
                    today: today(),
                    stats: &stats,
                    status: &self.status,
                };
                views::draw_ui(f, f.size(), &screen);
            })?;

            if event::poll(std::time::Duration::from_millis(100))? {
                match map_event(event::read()?) {
                    Action::Quit => break,
                    Action::Up => self.cursor = self.cursor.saturating_sub(1),
                    Action::Down => {
                        if self.cursor + 1 < self.visible_ids().len() {
                            self.cursor += 1;
                        }
                    }
                    Action::Select => self.open_at_cursor(),
                    Action::Pick => self.pick(),
                    Action::Feedback(fb) => self.feedback(fb),
                    Action::ToggleDue => {
                        self.due_only = !self.due_only;
                        self.cursor = 0;
                    }
                    Action::None => {}
                }
            }
        }
        Ok(())
    }
}
