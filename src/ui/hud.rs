use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::game::{GameStatus, Snapshot};
use crate::theme::GameTheme;

const HUD_SEPARATOR: &str = " │ ";
const ELLIPSIS: char = '…';

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    pub high_score: u32,
    /// High score as it stood when the current session started.
    pub reference_high_score: u32,
    pub theme: &'a GameTheme,
    /// Prompt of a palette still being generated.
    pub palette_prompt: Option<&'a str>,
}

/// Renders the top and bottom HUD rows and returns the area between them.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot<'_>,
    info: &HudInfo<'_>,
) -> Rect {
    let [top_row, play_area, bottom_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let theme = info.theme;
    let scores = score_line(snapshot, info);
    let scores_width = u16::try_from(scores.width()).unwrap_or(u16::MAX);
    let [name_area, scores_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(scores_width)])
            .areas(top_row);

    let name = truncate_to_width(&theme.name, usize::from(name_area.width));
    frame.render_widget(
        Paragraph::new(Line::from(name))
            .alignment(Alignment::Left)
            .style(Style::new().fg(theme.snake_head).bg(theme.background)),
        name_area,
    );
    frame.render_widget(
        Paragraph::new(scores)
            .alignment(Alignment::Right)
            .style(Style::new().fg(theme.text).bg(theme.background)),
        scores_area,
    );

    let hint = match info.palette_prompt {
        Some(prompt) => format!("Generating theme for \"{prompt}\"{ELLIPSIS}"),
        None => controls_hint(snapshot.status).to_owned(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(truncate_to_width(
            &hint,
            usize::from(bottom_row.width),
        )))
        .alignment(Alignment::Center)
        .style(Style::new().fg(theme.grid_line).bg(theme.background)),
        bottom_row,
    );

    play_area
}

fn score_line(snapshot: &Snapshot<'_>, info: &HudInfo<'_>) -> Line<'static> {
    let is_new_high = snapshot.score > info.reference_high_score;
    let high_style = if is_new_high {
        Style::new()
            .fg(info.theme.food)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::new().fg(info.theme.text)
    };

    Line::from(vec![
        Span::raw("Length: "),
        Span::styled(
            snapshot.snake.len().to_string(),
            Style::new().add_modifier(Modifier::BOLD),
        ),
        Span::raw(HUD_SEPARATOR),
        Span::raw("Score: "),
        Span::styled(
            snapshot.score.to_string(),
            Style::new().add_modifier(Modifier::BOLD),
        ),
        Span::raw(HUD_SEPARATOR),
        Span::raw("Hi: "),
        Span::styled(info.high_score.to_string(), high_style),
    ])
}

fn controls_hint(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle | GameStatus::GameOver => "[Space] start  [T] theme  [Q] quit",
        GameStatus::Playing => "arrows/WASD/drag steer  [Space] pause  [T] theme",
        GameStatus::Paused => "[Space] resume  [T] theme  [Q] quit",
    }
}

/// Cuts `text` to at most `max_width` terminal columns, ending with an
/// ellipsis when shortened. Wide characters count double.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut output = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        output.push(ch);
    }
    output.push(ELLIPSIS);
    output
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr;

    use super::truncate_to_width;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Ember", 10), "Ember");
        assert_eq!(truncate_to_width("Ember", 5), "Ember");
    }

    #[test]
    fn long_text_gets_ellipsis() {
        assert_eq!(truncate_to_width("Classic Neon", 8), "Classic…");
    }

    #[test]
    fn wide_characters_count_double() {
        let truncated = truncate_to_width("经典霓虹主题", 7);

        assert_eq!(truncated, "经典霓…");
        assert!(truncated.width() <= 7);
    }

    #[test]
    fn zero_width_yields_empty() {
        assert_eq!(truncate_to_width("Ember", 0), "");
    }
}
