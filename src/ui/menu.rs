use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::game::DeathReason;
use crate::ui::Theme;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    best: u32,
    high_scores: &[u32],
    theme: &Theme,
) {
    let mut body = vec![
        String::from("SNAKE"),
        String::new(),
        format!("Best: {best}"),
        String::new(),
        String::from("[Enter] Start"),
        String::from("[Q] Quit"),
        String::new(),
        String::from("Arrows/WASD move, [Space] pause"),
    ];
    if high_scores.len() > 1 {
        body.insert(3, high_scores_line(high_scores));
    }

    render_popup(frame, area, " start ", &body, theme);
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let body = [
        String::from("PAUSED"),
        String::new(),
        String::from("[Space] Resume"),
        String::from("[R] Restart"),
        String::from("[Q] Quit"),
    ];

    render_popup(frame, area, " pause ", &body, theme);
}

/// Draws the game-over screen with the high-score table.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_scores: &[u32],
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let mut body = vec![
        String::from("GAME OVER"),
        String::new(),
        format!("Score: {score}"),
        String::from(match death_reason {
            Some(DeathReason::SelfCollision) => "Cause: hit yourself",
            Some(DeathReason::WallCollision) => "Cause: hit a wall",
            Some(DeathReason::GridFull) => "Cause: board is full",
            None => "",
        }),
        String::new(),
        String::from("High scores:"),
    ];
    body.extend(
        high_scores
            .iter()
            .enumerate()
            .map(|(index, value)| format!("{}. {value}", index + 1)),
    );
    body.extend([
        String::new(),
        String::from("[Enter] Play again"),
        String::from("[Q] Quit"),
    ]);

    render_popup(frame, area, " game over ", &body, theme);
}

fn high_scores_line(high_scores: &[u32]) -> String {
    let values: Vec<String> = high_scores.iter().map(u32::to_string).collect();
    format!("Top: {}", values.join(" / "))
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, body: &[String], theme: &Theme) {
    // Two border columns plus one column of padding on each side.
    let content_width = body.iter().map(|line| line.width()).max().unwrap_or(0);
    let width = u16::try_from(content_width + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(body.len() + 2).unwrap_or(u16::MAX);
    let popup = centered_popup(area, width, height);
    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line<'_>> = body.iter().map(|line| Line::from(line.as_str())).collect();
    if let Some(first) = lines.first_mut() {
        *first = first.clone().style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        );
    }
    if let Some(last) = lines.last_mut() {
        *last = last.clone().style(Style::default().fg(theme.menu_footer));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);

    center
}
