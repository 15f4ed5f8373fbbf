use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{BORDER_BOARD, CELL_WIDTH, GLYPH_CELL_EMPTY, GLYPH_CELL_SOLID, GLYPH_FOOD};
use crate::game::{GameStatus, Snapshot};
use crate::grid::{Grid, Point};
use crate::theme::GameTheme;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>, hud_info: &HudInfo<'_>) {
    let theme = hud_info.theme;
    let area = frame.area();
    frame.render_widget(
        Block::new().style(Style::new().bg(theme.background).fg(theme.text)),
        area,
    );

    let play_area = render_hud(frame, area, snapshot, hud_info);
    let board_area = board_rect(play_area, snapshot.grid_size);

    let block = Block::bordered()
        .border_set(BORDER_BOARD)
        .border_style(Style::new().fg(theme.grid_line))
        .style(Style::new().bg(theme.background));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let grid = Grid::new(snapshot.grid_size);
    render_grid(frame, inner, grid, theme);
    if let Some(food) = snapshot.food {
        render_food(frame, inner, grid, food, theme);
    }
    render_snake(frame, inner, grid, snapshot, theme);

    match snapshot.status {
        GameStatus::Idle => render_start_menu(frame, board_area, hud_info.high_score, theme),
        GameStatus::Paused => render_pause_menu(frame, board_area, theme),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            board_area,
            snapshot.score,
            hud_info.reference_high_score,
            snapshot.end_reason,
            theme,
        ),
        GameStatus::Playing => {}
    }
}

/// Centres the bordered board inside `area`, clipping on small terminals.
fn board_rect(area: Rect, grid_size: u16) -> Rect {
    let width = grid_size.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = grid_size.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    board
}

fn render_grid(frame: &mut Frame<'_>, inner: Rect, grid: Grid, theme: &GameTheme) {
    let style = Style::new().fg(theme.grid_line).bg(theme.background);
    let buffer = frame.buffer_mut();

    for cell in grid.cells() {
        if let Some((x, y)) = logical_to_terminal(inner, grid, cell) {
            buffer.set_string(x, y, GLYPH_CELL_EMPTY, style);
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, grid: Grid, food: Point, theme: &GameTheme) {
    let Some((x, y)) = logical_to_terminal(inner, grid, food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(theme.food).bg(theme.background),
    );
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: Grid,
    snapshot: &Snapshot<'_>,
    theme: &GameTheme,
) {
    let head_style = Style::new()
        .fg(theme.snake_head)
        .bg(theme.background)
        .add_modifier(Modifier::BOLD);
    let body_style = Style::new().fg(theme.snake_body).bg(theme.background);

    let buffer = frame.buffer_mut();
    for (idx, segment) in snapshot.snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, grid, *segment) else {
            continue;
        };

        let style = if idx == 0 { head_style } else { body_style };
        buffer.set_string(x, y, GLYPH_CELL_SOLID, style);
    }
}

fn logical_to_terminal(inner: Rect, grid: Grid, position: Point) -> Option<(u16, u16)> {
    if !grid.is_in_bounds(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use super::{board_rect, logical_to_terminal, render};
    use crate::game::{GameState, GameStatus};
    use crate::grid::{Grid, Point};
    use crate::input::Direction;
    use crate::snake::Snake;
    use crate::theme::classic_neon;
    use crate::ui::hud::HudInfo;

    #[test]
    fn cells_map_to_two_columns_each() {
        let inner = Rect::new(5, 3, 40, 20);
        let grid = Grid::default();

        assert_eq!(logical_to_terminal(inner, grid, Point::new(0, 0)), Some((5, 3)));
        assert_eq!(
            logical_to_terminal(inner, grid, Point::new(19, 19)),
            Some((43, 22))
        );
        assert_eq!(logical_to_terminal(inner, grid, Point::new(20, 0)), None);
    }

    #[test]
    fn cells_outside_a_clipped_board_are_skipped() {
        let inner = Rect::new(0, 0, 10, 4);

        assert_eq!(
            logical_to_terminal(inner, Grid::default(), Point::new(5, 0)),
            None
        );
        assert_eq!(
            logical_to_terminal(inner, Grid::default(), Point::new(1, 5)),
            None
        );
    }

    #[test]
    fn board_is_centred() {
        let board = board_rect(Rect::new(0, 0, 80, 30), 20);

        assert_eq!(board, Rect::new(19, 4, 42, 22));
    }

    #[test]
    fn frame_renders_for_every_status() {
        let backend = TestBackend::new(60, 28);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        let theme = classic_neon();
        let info = HudInfo {
            high_score: 40,
            reference_high_score: 30,
            theme: &theme,
            palette_prompt: Some("aurora"),
        };
        let mut state = GameState::new_with_seed(Grid::default(), 21);
        let mut draw = |state: &GameState| {
            terminal
                .draw(|frame| render(frame, &state.snapshot(), &info))
                .expect("frame draws");
        };

        draw(&state);
        state.reset();
        draw(&state);
        state.toggle_pause();
        draw(&state);
        state.toggle_pause();
        state.set_snake(Snake::from_segments(
            vec![Point::new(0, 0), Point::new(0, 1), Point::new(0, 2)],
            Direction::Up,
        ));
        state.step();
        assert_eq!(state.status, GameStatus::GameOver);
        draw(&state);
    }

    #[test]
    fn snake_is_drawn_in_theme_colours() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        let theme = classic_neon();
        let info = HudInfo {
            high_score: 0,
            reference_high_score: 0,
            theme: &theme,
            palette_prompt: None,
        };
        let mut state = GameState::new_with_seed(Grid::default(), 22);
        state.reset();

        let completed = terminal
            .draw(|frame| render(frame, &state.snapshot(), &info))
            .expect("frame draws");

        let head_cells = completed
            .buffer
            .content
            .iter()
            .filter(|cell| cell.fg == theme.snake_head && cell.symbol() == "█")
            .count();
        let body_cells = completed
            .buffer
            .content
            .iter()
            .filter(|cell| cell.fg == theme.snake_body && cell.symbol() == "█")
            .count();
        assert_eq!(head_cells, 2);
        assert_eq!(body_cells, 4);
    }
}
