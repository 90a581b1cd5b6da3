use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::BoardConfig;
use crate::game::{GameState, GameStatus};
use crate::snake::Position;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::render_game_over_menu;

/// Terminal columns used per board cell, keeping cells roughly square.
pub const TERMINAL_COLUMNS_PER_CELL: u16 = 2;

const GLYPH_CELL: &str = "██";

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: &HudInfo) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, hud_info);

    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(Color::Gray));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state);
    render_snake(frame, inner, state);

    if state.status == GameStatus::GameOver {
        render_game_over_menu(frame, play_area, state.score());
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let Some((x, y)) = board_to_terminal(inner, state.board(), state.food.position) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_CELL, Style::new().fg(Color::Red));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let buffer = frame.buffer_mut();

    // Tail first so the head is drawn last and stays visible on overlap.
    for (index, segment) in state.snake.segments().enumerate().rev() {
        let Some((x, y)) = board_to_terminal(inner, state.board(), *segment) else {
            continue;
        };

        let style = if index == 0 {
            Style::new()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(Color::Green)
        };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

/// Maps a pixel position to the terminal cell drawing it.
///
/// Board y points up while terminal rows grow downward, so rows are flipped.
/// Returns `None` for positions that fall outside the board or the frame.
#[must_use]
pub fn board_to_terminal(inner: Rect, board: &BoardConfig, position: Position) -> Option<(u16, u16)> {
    let (column, row) = position.cell(board.cell_size_px());
    let column = u32::try_from(column).ok()?;
    let row = u32::try_from(row).ok()?;
    if column >= board.columns() || row >= board.rows() {
        return None;
    }

    let x_offset = u16::try_from(column).ok()?.checked_mul(TERMINAL_COLUMNS_PER_CELL)?;
    let y_offset = u16::try_from(board.rows() - 1 - row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(TERMINAL_COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
