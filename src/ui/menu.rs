use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::game::GameSnapshot;
use crate::renderer::Palette;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &GameSnapshot<'_>,
    palette: &Palette,
) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("SNAKE").style(
            Style::default()
                .fg(palette.snake_head)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Best score: {}", snapshot.best_score)),
        Line::from(""),
        Line::from("Arrows/WASD to move"),
        Line::from("[R] Restart  [Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" start ")),
        popup,
    );
}

/// Draws the end-of-round popup, for both crashes and wins.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &GameSnapshot<'_>,
    palette: &Palette,
) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let won = snapshot.over_reason.is_some_and(|reason| reason.is_win());
    let (title, color) = if won {
        ("YOU WIN", palette.snake_head)
    } else {
        ("GAME OVER", palette.obstacle)
    };

    let lines = vec![
        Line::from(title).style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(format!("Score: {}", snapshot.score)),
        Line::from(format!("Best: {}", snapshot.best_score)),
        Line::from(""),
        Line::from(snapshot.message.as_str()),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" round over ")),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
