use crate::cli::opts::*;

use anyhow::{Context, Result};
use noteminder_core::{
    filter_by_tag, filter_by_text, filter_due, open_notebook, parse_tags, save_notebook, summarize,
    today, CoreError, Feedback, MemoryRepo, Note, NoteEdit, NoteRepository, Notebook,
    ReviewEngine,
};
use noteminder_json::{export_file, import_file, paths, JsonStore};
use serde::Serialize;
use std::io::{stdin, stdout, Write};
use std::path::Path;
use tracing::{error, warn};

pub fn run_cli(args: Cli) -> Result<()> {
    let repo = open_repo(&args)?;
    let mut book = load_notebook(&*repo);
    let engine = ReviewEngine::default();

    match args.cmd {
        Command::Note(cmd) => note_cmd(&*repo, &mut book, cmd),
        Command::Search { query } => {
            print_list(&filter_by_text(book.notes(), &query), "no notes found");
            Ok(())
        }
        Command::Tags => {
            for t in book.tags() {
                println!("{t}");
            }
            Ok(())
        }
        Command::Tag { name } => {
            print_list(&filter_by_tag(book.notes(), &name), "no notes with that tag");
            Ok(())
        }
        Command::Review(cmd) => review_cmd(&*repo, &mut book, &engine, cmd),
        Command::Pick => {
            match engine.pick(&mut book, today(), &mut rand::thread_rng()) {
                Ok(note) => print_note(&note),
                Err(CoreError::EmptyCollection) => println!("nothing to review"),
                Err(e) => return Err(e.into()),
            }
            Ok(())
        }
        Command::Feedback { id, feedback } => {
            book.select(id)?;
            let note = engine.review_selected(&mut book, feedback, today())?;
            save_notebook(&*repo, &book)?;
            println!("streak={} next_review={}", note.streak, note.next_review);
            Ok(())
        }
        Command::Due => {
            let due = engine.list_due(book.notes(), today());
            if due.is_empty() {
                println!("no notes due today");
            }
            for n in due {
                println!("{}\t{}\tstreak={}\t{}", n.id, n.next_review, n.streak, n.title);
            }
            Ok(())
        }
        Command::Stats => {
            let s = summarize(book.notes(), today());
            println!("Total Notes: {}", s.total_notes);
            println!("Total Tags: {}", s.total_tags);
            println!("Due Reviews: {}", s.due);
            println!("Avg. Strength: {:.1}", s.avg_streak);
            Ok(())
        }
        Command::Export(cmd) => export_cmd(&*repo, &book, cmd),
        Command::Import { path } => {
            let file = import_file(&path)
                .with_context(|| format!("failed to import {}", path.display()))?;
            book.replace(file)
                .with_context(|| format!("failed to import {}", path.display()))?;
            save_notebook(&*repo, &book)?;
            println!("imported {} notes", book.len());
            Ok(())
        }
        Command::Tui => unreachable!("routed by main"),
    }
}

pub fn open_repo(args: &Cli) -> Result<Box<dyn NoteRepository>> {
    match args.store {
        StoreKind::Json => {
            let (default_file, default_backups) = paths::default_store_file();
            let (file, backups) = match &args.data_file {
                Some(p) => (p.clone(), paths::backups_dir_for(p)),
                None => (default_file, default_backups),
            };
            let s = JsonStore::open_with(file, backups, args.backups)?;
            Ok(Box::new(s))
        }
        StoreKind::Memory => Ok(Box::new(MemoryRepo::new())),
    }
}

/// A store that cannot be read is copied aside, reported, and replaced by an
/// empty notebook.
pub fn load_notebook(repo: &dyn NoteRepository) -> Notebook {
    match open_notebook(repo) {
        Ok(book) => book,
        Err(e) => {
            warn!(error = %e, "failed to load notes, starting empty");
            eprintln!("failed to load notes: {e}");
            match repo.preserve_unreadable() {
                Ok(Some(copy)) => eprintln!("previous store kept at {}", copy.display()),
                Ok(None) => {}
                Err(err) => {
                    error!(error = %err, "could not preserve unreadable store");
                    eprintln!("could not preserve unreadable store: {err}");
                }
            }
            Notebook::new()
        }
    }
}

fn note_cmd(repo: &dyn NoteRepository, book: &mut Notebook, cmd: NoteCmd) -> Result<()> {
    match cmd {
        NoteCmd::Add(a) => {
            let tags = a.tags.as_deref().map(parse_tags).unwrap_or_default();
            let n = book.create(&a.title, &a.content, tags, today())?;
            save_notebook(repo, book)?;
            println!("{}", n.id);
        }
        NoteCmd::List => {
            let notes: Vec<&Note> = book.notes().iter().collect();
            print_list(&notes, "no notes yet");
        }
        NoteCmd::Show { id } => {
            let n = book.get(id).ok_or(CoreError::NotFound(id))?;
            print_note(n);
        }
        NoteCmd::Edit(e) => {
            let edit = NoteEdit {
                title: e.title,
                content: e.content,
                tags: e.tags.as_deref().map(parse_tags),
            };
            book.edit(e.id, edit)?;
            save_notebook(repo, book)?;
            println!("ok");
        }
        NoteCmd::Rm { id } => {
            book.delete(id)?;
            save_notebook(repo, book)?;
            println!("ok");
        }
    }
    Ok(())
}

fn review_cmd(
    repo: &dyn NoteRepository,
    book: &mut Notebook,
    engine: &ReviewEngine,
    cmd: ReviewCmd,
) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut count = 0usize;
    let mut reviewed = 0usize;

    while count < cmd.max {
        if count > 0 && filter_due(book.notes(), today()).is_empty() {
            println!("\nno more notes due");
            break;
        }
        let note = match engine.pick(book, today(), &mut rng) {
            Ok(n) => n,
            Err(CoreError::EmptyCollection) => {
                println!("nothing to review");
                break;
            }
            Err(e) => return Err(e.into()),
        };
        count += 1;

        println!("\n[{}/{}]", count, cmd.max);
        print_note(&note);
        println!("[e=easy, g=good, h=hard, s=skip, q=quit]");
        let fb = loop {
            let line = read_line("feedback> ")?;
            match line.trim().to_lowercase().as_str() {
                "s" | "skip" => break None,
                "q" | "quit" => {
                    save_notebook(repo, book)?;
                    println!("\nreviewed {}", reviewed);
                    return Ok(());
                }
                other => match other.parse::<Feedback>() {
                    Ok(f) => break Some(f),
                    Err(_) => println!("enter e/g/h, s, or q"),
                },
            }
        };

        if let Some(feedback) = fb {
            let updated = engine.review_selected(book, feedback, today())?;
            reviewed += 1;
            println!(
                "→ next review {} (in {} day(s))",
                updated.next_review,
                engine.schedule().offset_days(updated.streak)
            );
        }
    }

    save_notebook(repo, book)?;
    println!("\nreviewed {}", reviewed);
    Ok(())
}

fn export_cmd(repo: &dyn NoteRepository, book: &Notebook, cmd: ExportCmd) -> Result<()> {
    // Exporting also flushes the live store.
    save_notebook(repo, book)?;
    match cmd {
        ExportCmd::Json { path } => {
            export_file(&path, &book.to_file())?;
            println!("wrote {}", path.display());
        }
        ExportCmd::Csv { path } => {
            write_csv(&path, book.notes())?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: u64,
    title: &'a str,
    content: &'a str,
    tags: String,
    created: String,
    last_reviewed: String,
    next_review: String,
    streak: u32,
}

fn write_csv(path: &Path, notes: &[Note]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for n in notes {
        wtr.serialize(CsvRow {
            id: n.id,
            title: &n.title,
            content: &n.content,
            tags: n.tags.join(";"),
            created: n.created.to_string(),
            last_reviewed: n.last_reviewed.to_string(),
            next_review: n.next_review.to_string(),
            streak: n.streak,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

// ===== Helpers =====
fn print_list(notes: &[&Note], empty: &str) {
    if notes.is_empty() {
        println!("{empty}");
        return;
    }
    for n in notes {
        let tags = if n.tags.is_empty() { "-".to_string() } else { n.tags.join(", ") };
        println!("{}\t{}\ttags={}\tnext={}\tstreak={}", n.id, n.title, tags, n.next_review, n.streak);
    }
}

fn print_note(n: &Note) {
    println!("#{} {}", n.id, n.title);
    if !n.tags.is_empty() {
        println!("Tags: {}", n.tags.join(", "));
    }
    println!("\n{}\n", n.content);
    println!(
        "Created: {} | Last Reviewed: {} | Next Review: {} | Strength: {}",
        n.created, n.last_reviewed, n.next_review, n.streak
    );
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    stdout().flush().ok();
    let mut s = String::new();
    stdin().read_line(&mut s)?;
    Ok(s)
}
