use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType};

use crate::config::{EdgePolicy, GridSize};
use crate::game::{GamePhase, GameSnapshot};
use crate::grid::direction_between;
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Terminal columns per grid cell; two columns keep cells roughly square.
pub const CELL_WIDTH: u16 = 2;

const GLYPH_CELL: &str = "██";
const GLYPH_FOOD: &str = "◆ ";
const GLYPH_OBSTACLE: &str = "▓▓";

/// Colors for every drawn element.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub board_bg: Color,
    pub border: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub obstacle: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub accent: Color,
}

pub const PALETTE: Palette = Palette {
    board_bg: Color::Rgb(11, 18, 32),
    border: Color::Rgb(88, 98, 128),
    snake_head: Color::Rgb(166, 218, 149),
    snake_body: Color::Rgb(139, 213, 202),
    food: Color::Rgb(239, 159, 118),
    obstacle: Color::Rgb(247, 118, 142),
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    accent: Color::Rgb(238, 212, 159),
};

/// Renders the full game frame from a snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &GameSnapshot<'_>) {
    let palette = &PALETTE;
    let play_area = render_hud(frame, frame.area(), snapshot, palette);
    let board_area = board_rect(play_area, snapshot.bounds);

    // Walls are lethal; draw them heavier than the wrap-around edge.
    let border_type = match snapshot.edge_policy {
        EdgePolicy::Wall => BorderType::Thick,
        EdgePolicy::Wrap => BorderType::Rounded,
    };
    let block = Block::bordered()
        .border_type(border_type)
        .border_style(Style::new().fg(palette.border))
        .style(Style::new().bg(palette.board_bg));

    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_obstacles(frame, inner, snapshot, palette);
    render_food(frame, inner, snapshot, palette);
    render_snake(frame, inner, snapshot, palette);

    match snapshot.phase {
        GamePhase::NotStarted => render_start_menu(frame, board_area, snapshot, palette),
        GamePhase::Over => render_game_over_menu(frame, board_area, snapshot, palette),
        GamePhase::Running => {}
    }
}

fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    board
}

fn render_obstacles(
    frame: &mut Frame<'_>,
    inner: Rect,
    snapshot: &GameSnapshot<'_>,
    palette: &Palette,
) {
    let style = Style::new().fg(palette.obstacle).bg(palette.board_bg);
    let buffer = frame.buffer_mut();

    for obstacle in snapshot.obstacles {
        if let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, *obstacle) {
            buffer.set_string(x, y, GLYPH_OBSTACLE, style);
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot<'_>, palette: &Palette) {
    let Some(food) = snapshot.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(palette.food).bg(palette.board_bg),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot<'_>, palette: &Palette) {
    let snake = snapshot.snake;
    let last_index = snake.len() - 1;

    // The segment before the tail tells which way the tail points.
    let tail_direction = snake
        .segments()
        .rev()
        .nth(1)
        .map(|towards| direction_between(snake.tail(), *towards, snapshot.bounds));

    let body_style = Style::new().fg(palette.snake_body).bg(palette.board_bg);
    let buffer = frame.buffer_mut();

    for (index, segment) in snake.segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_CELL,
                Style::new()
                    .fg(palette.snake_head)
                    .bg(palette.board_bg)
                    .add_modifier(Modifier::BOLD),
            );
        } else if index == last_index {
            let glyph = tail_direction.map_or(GLYPH_CELL, tail_glyph);
            buffer.set_string(x, y, glyph, body_style);
        } else {
            buffer.set_string(x, y, GLYPH_CELL, body_style);
        }
    }
}

fn tail_glyph(towards_body: Direction) -> &'static str {
    match towards_body {
        Direction::Up => "▀▀",
        Direction::Down => "▄▄",
        Direction::Left => "█▌",
        Direction::Right => "▐█",
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
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
