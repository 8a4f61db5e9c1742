//! Terminal drawing of views.
//!
//! Everything is turned into lines first so the layout can be checked
//! without a terminal.

use colored::Colorize;

use api_client::ServiceStatus;
use app::{CardGrid, CardView, FetchSnapshot, PosterDisplay, View, render_view};

/// Cells in the match bar track
const BAR_WIDTH: usize = 20;

pub fn header_lines() -> Vec<String> {
    vec![
        format!(
            "{} {}",
            "🎬 ReelSense".red().bold(),
            "Explainable Movie Recommender".bright_black()
        ),
        String::new(),
        format!("{}", "Movies You'll Love".red().bold()),
        format!("{}", "Powered by AI + Explainability".bright_black()),
        String::new(),
    ]
}

pub fn help_lines() -> Vec<String> {
    vec![
        format!("{}", "Type a user id and press enter.".bright_black()),
        format!(
            "{}",
            "Commands: explain <n> | explain all | hide | help | quit".bright_black()
        ),
    ]
}

/// Lines for the current fetch state, drawn whether or not stdout is a tty
pub fn snapshot_lines(snapshot: &FetchSnapshot, grid: Option<&CardGrid>) -> Vec<String> {
    view_lines(&render_view(snapshot, grid))
}

pub fn view_lines(view: &View) -> Vec<String> {
    match view {
        View::Idle => vec![format!(
            "{}",
            "Enter a user id to get recommendations.".bright_black()
        )],
        View::Invalid(message) | View::Failed(message) => vec![format!("{}", message.red())],
        View::Loading { placeholders } => skeleton_lines(*placeholders),
        View::Empty => vec![
            format!("🔍 {}", "No recommendations found.".bright_black()),
            format!("   {}", "Try entering a User ID like 1, 4, or 10.".bright_black()),
        ],
        View::Grid(cards) => cards.iter().flat_map(card_lines).collect(),
    }
}

fn skeleton_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|_| format!("    {}", "░".repeat(BAR_WIDTH + 12).bright_black()))
        .collect()
}

fn match_bar(card: &CardView) -> String {
    let filled = card.match_bar.filled_cells(BAR_WIDTH).min(BAR_WIDTH);
    format!(
        "[{}{}]",
        "█".repeat(filled).red(),
        "░".repeat(BAR_WIDTH - filled).bright_black()
    )
}

pub fn card_lines(card: &CardView) -> Vec<String> {
    let mut lines = vec![format!(
        "{:>2}. {}",
        card.rank.to_string().green(),
        card.title.bold()
    )];

    lines.push(match &card.poster {
        PosterDisplay::Image(url) => format!("    🖼  {}", url.bright_black()),
        PosterDisplay::Loading => format!("    🖼  {}", "loading poster...".bright_black()),
        PosterDisplay::Placeholder => format!("    🎬 {}", "no poster".bright_black()),
    });

    lines.push(format!(
        "    {} {}   {} {}",
        "⭐".yellow(),
        card.rating,
        "🎯",
        format!("{} Match", card.match_label).red()
    ));
    lines.push(format!("    {}", match_bar(card)));

    if !card.genres.is_empty() {
        let tags: Vec<String> = card
            .genres
            .iter()
            .map(|genre| format!("[{}]", genre))
            .collect();
        lines.push(format!("    {}", tags.join(" ").cyan()));
    }

    if let Some(explanation) = &card.explanation {
        lines.push(format!("    ↳ {}", explanation.italic()));
    }

    lines.push(String::new());
    lines
}

pub fn status_lines(base_url: &str, status: &ServiceStatus) -> Vec<String> {
    let mut lines = vec![format!("{} {} ({})", "✓".green(), status.message, base_url)];
    for endpoint in &status.endpoints {
        lines.push(format!("  • {}", endpoint));
    }
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
