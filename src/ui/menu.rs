use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::game::EndReason;
use crate::theme::GameTheme;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32, theme: &GameTheme) {
    let lines = vec![
        Line::from("SNAKE").style(
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("High score: {high_score}")),
        Line::from(""),
        Line::from("[Space]/[Enter] Start"),
        Line::from("[Q] Quit"),
    ];

    render_popup(frame, area, " ready? ", lines, theme);
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &GameTheme) {
    let lines = vec![
        Line::from("PAUSED").style(Style::new().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("[Space]/[P] Resume"),
        Line::from("[Q] Quit"),
    ];

    render_popup(frame, area, " pause ", lines, theme);
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    end_reason: Option<EndReason>,
    theme: &GameTheme,
) {
    let is_new_high = score > high_score;
    let lines = vec![
        Line::from("GAME OVER").style(Style::new().fg(theme.food).add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("High score: {}", score.max(high_score))),
        Line::from(match end_reason {
            Some(EndReason::WallCollision) => "Cause: hit wall",
            Some(EndReason::SelfCollision) => "Cause: hit yourself",
            Some(EndReason::BoardFull) => "The board is full!",
            None => "",
        }),
        Line::from(if is_new_high { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[Space]/[Enter] Play Again"),
        Line::from("[Q] Quit"),
    ];

    render_popup(frame, area, " game over ", lines, theme);
}

fn render_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    lines: Vec<Line<'_>>,
    theme: &GameTheme,
) {
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0);
    let width = u16::try_from(content_width + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let popup = centered_rect(area, width, height);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.text).bg(theme.background))
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::new().fg(theme.snake_body)),
            ),
        popup,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);

    center
}
