use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::game::GameState;

const HUD_MARGIN_X: u16 = 1;

/// Supplemental values displayed by the HUD row.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo {
    /// Rounds finished since the program started.
    pub rounds_played: u32,
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let hud_area = inset_horizontal(hud_area, HUD_MARGIN_X);
    let board = state.board();
    let details = format!(
        "{}x{}px  cell {}px  {}ms  round {}",
        board.width(),
        board.height(),
        board.cell_size(),
        board.tick_interval().as_millis(),
        info.rounds_played + 1,
    );

    frame.render_widget(
        Paragraph::new(hud_line(
            state.score(),
            details.as_str(),
            usize::from(hud_area.width),
        )),
        hud_area,
    );

    play_area
}

/// Builds `Score: N` left-aligned with `details` right-aligned, dropping
/// the details when the row is too narrow for both.
fn hud_line(score: usize, details: &str, width: usize) -> Line<'static> {
    let score_text = format!("Score: {score}");
    let used = score_text.width() + details.width();

    let score_span = Span::styled(
        score_text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    if used >= width {
        return Line::from(score_span);
    }

    Line::from(vec![
        score_span,
        Span::raw(" ".repeat(width - used)),
        Span::styled(details.to_owned(), Style::default().fg(Color::DarkGray)),
    ])
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}
