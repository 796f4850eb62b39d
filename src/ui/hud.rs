use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::EdgePolicy;
use crate::game::{GamePhase, GameSnapshot};
use crate::renderer::Palette;

const SEPARATOR: &str = " │ ";

/// Renders the two HUD rows under the board and returns the area above them.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &GameSnapshot<'_>,
    palette: &Palette,
) -> Rect {
    let [play_area, stats_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(stats_line(snapshot, palette)).alignment(Alignment::Center),
        stats_area,
    );

    let status_style = match snapshot.phase {
        GamePhase::Over => Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(palette.hud_label),
    };
    frame.render_widget(
        Paragraph::new(Line::from(snapshot.message.as_str()))
            .alignment(Alignment::Center)
            .style(status_style),
        status_area,
    );

    play_area
}

fn stats_line(snapshot: &GameSnapshot<'_>, palette: &Palette) -> Line<'static> {
    let label = Style::default().fg(palette.hud_label);
    let value = Style::default().fg(palette.hud_value);
    let record = if snapshot.score > 0 && snapshot.score == snapshot.best_score {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        value
    };
    let edges = match snapshot.edge_policy {
        EdgePolicy::Wrap => "wrap",
        EdgePolicy::Wall => "walls",
    };

    Line::from(vec![
        Span::styled("Score: ", label),
        Span::styled(snapshot.score.to_string(), record),
        Span::styled(SEPARATOR, label),
        Span::styled("Best: ", label),
        Span::styled(snapshot.best_score.to_string(), record),
        Span::styled(SEPARATOR, label),
        Span::styled("Obstacles: ", label),
        Span::styled(
            snapshot.obstacle_count.to_string(),
            Style::default().fg(palette.obstacle),
        ),
        Span::styled(SEPARATOR, label),
        Span::styled(
            format!("{}ms", snapshot.tick_interval.as_millis()),
            value,
        ),
        Span::styled(SEPARATOR, label),
        Span::styled(
            format!(
                "{}x{} {edges}",
                snapshot.bounds.width, snapshot.bounds.height
            ),
            label,
        ),
    ])
}
