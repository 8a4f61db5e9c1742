//! Interactive session: the input bar loop.
//!
//! Lines typed by the user are submitted as user ids unless they are one of
//! the few view commands. Submits never block input, so a new id can be
//! entered while a request is still in flight; the fetcher makes sure only
//! the latest one shows.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use api_client::PosterSource;
use app::{AppConfig, CardGrid, FetchSnapshot, InputBar, RecommendationFetcher};

use crate::display;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Submit(String),
    Explain(usize),
    ExplainAll,
    Hide,
    Help,
    Quit,
}

impl InputCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "quit" | "exit" | ":q" => return InputCommand::Quit,
            "hide" => return InputCommand::Hide,
            "help" | "?" => return InputCommand::Help,
            "explain all" => return InputCommand::ExplainAll,
            _ => {}
        }

        if let Some(arg) = trimmed.strip_prefix("explain ") {
            return match arg.trim().parse::<usize>() {
                Ok(n) if n > 0 => InputCommand::Explain(n),
                _ => InputCommand::Help,
            };
        }

        InputCommand::Submit(line.to_string())
    }
}

/// Keep the mounted grid in step with the fetch state.
///
/// A new successful generation mounts a fresh grid (dropping the old one
/// cancels its lookups); any non-success state unmounts.
fn sync_grid(
    grid: &mut Option<CardGrid>,
    snapshot: &FetchSnapshot,
    posters: &Option<Arc<dyn PosterSource>>,
) {
    match snapshot.state.results() {
        Some(results) => {
            if grid.as_ref().map(CardGrid::generation) != Some(snapshot.generation) {
                *grid = Some(CardGrid::mount(
                    snapshot.generation,
                    results,
                    posters.clone(),
                ));
            }
        }
        None => *grid = None,
    }
}

/// Resolves when the grid reports a poster update; never without a grid
async fn poster_update(grid: Option<&CardGrid>) {
    match grid {
        Some(grid) => grid.poster_changed().await,
        None => std::future::pending().await,
    }
}

fn redraw(snapshot: &FetchSnapshot, grid: Option<&CardGrid>) {
    if std::io::stdout().is_terminal() {
        // Clear screen and home the cursor
        print!("\x1b[2J\x1b[H");
        display::print_lines(&display::header_lines());
    } else {
        println!();
    }
    display::print_lines(&display::snapshot_lines(snapshot, grid));
    print!("> ");
    let _ = std::io::Write::flush(&mut std::io::stdout());
}

pub async fn run(config: AppConfig) -> Result<()> {
    let source = config
        .recommendation_source()
        .context("Failed to create recommendation client")?;
    let fetcher = RecommendationFetcher::new(source, config.top_k);
    let posters = config.poster_source();

    let mut input = InputBar::new();
    let mut grid: Option<CardGrid> = None;
    let mut updates = fetcher.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    display::print_lines(&display::header_lines());
    display::print_lines(&display::help_lines());
    redraw(&fetcher.snapshot(), None);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match InputCommand::parse(&line) {
                    InputCommand::Quit => break,
                    InputCommand::Help => {
                        display::print_lines(&display::help_lines());
                        print!("> ");
                        let _ = std::io::Write::flush(&mut std::io::stdout());
                    }
                    InputCommand::Explain(n) => {
                        if let Some(grid) = grid.as_mut() {
                            if !grid.focus_card(n - 1) {
                                debug!("No card {} to explain", n);
                            }
                        }
                        redraw(&fetcher.snapshot(), grid.as_ref());
                    }
                    InputCommand::ExplainAll => {
                        if let Some(grid) = grid.as_mut() {
                            grid.focus_all();
                        }
                        redraw(&fetcher.snapshot(), grid.as_ref());
                    }
                    InputCommand::Hide => {
                        if let Some(grid) = grid.as_mut() {
                            grid.blur();
                        }
                        redraw(&fetcher.snapshot(), grid.as_ref());
                    }
                    InputCommand::Submit(text) => {
                        input.set_text(text);
                        // Rejections are already in the snapshot as a notice
                        if let Ok(pending) = input.submit(&fetcher) {
                            tokio::spawn(pending.resolve());
                        }
                    }
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                sync_grid(&mut grid, &snapshot, &posters);
                redraw(&snapshot, grid.as_ref());
            }
            _ = poster_update(grid.as_ref()) => {
                redraw(&fetcher.snapshot(), grid.as_ref());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(InputCommand::parse("quit"), InputCommand::Quit);
        assert_eq!(InputCommand::parse(" exit "), InputCommand::Quit);
        assert_eq!(InputCommand::parse("hide"), InputCommand::Hide);
        assert_eq!(InputCommand::parse("explain 3"), InputCommand::Explain(3));
        assert_eq!(InputCommand::parse("explain all"), InputCommand::ExplainAll);
        assert_eq!(InputCommand::parse("explain 0"), InputCommand::Help);
        assert_eq!(InputCommand::parse("explain x"), InputCommand::Help);
    }

    #[test]
    fn test_everything_else_is_submitted_verbatim() {
        assert_eq!(InputCommand::parse("42"), InputCommand::Submit("42".to_string()));
        assert_eq!(InputCommand::parse(""), InputCommand::Submit(String::new()));
        assert_eq!(InputCommand::parse("  "), InputCommand::Submit("  ".to_string()));
    }

    #[test]
    fn test_sync_grid_mounts_and_unmounts() {
        let records = vec![model::Recommendation {
            movie_id: 1,
            title: "A".to_string(),
            poster: None,
            predicted_rating: 4.0,
            match_percentage: 80.0,
            genres: vec![],
            explanation: String::new(),
            tmdb_id: None,
        }];
        let mut grid = None;

        let success = FetchSnapshot {
            generation: 1,
            state: model::RequestState::Success(records),
            notice: None,
        };
        sync_grid(&mut grid, &success, &None);
        assert_eq!(grid.as_ref().map(CardGrid::generation), Some(1));

        grid.as_mut().unwrap().focus_all();
        sync_grid(&mut grid, &success, &None);
        assert_eq!(grid.as_ref().map(CardGrid::focus), Some(app::Focus::All));

        let loading = FetchSnapshot {
            generation: 2,
            state: model::RequestState::Loading,
            notice: None,
        };
        sync_grid(&mut grid, &loading, &None);
        assert!(grid.is_none());
    }
}
