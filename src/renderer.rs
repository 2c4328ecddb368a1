use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::GridSize;
use crate::game::{GameSimulation, GameStatus};
use crate::snake::Position;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};
use crate::ui::{
    Theme, BORDER_HALF_BLOCK, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GLYPH_SNAKE_TAIL,
    GLYPH_WALL,
};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, sim: &GameSimulation, hud_info: HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, sim, &hud_info);

    let theme = hud_info.theme;
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_walls(frame, inner, sim, theme);
    render_food(frame, inner, sim, theme);
    render_snake(frame, inner, sim, theme);

    match sim.status() {
        GameStatus::Idle => render_start_menu(
            frame,
            play_area,
            sim.best_score(),
            sim.high_scores(),
            theme,
        ),
        GameStatus::Paused => render_pause_menu(frame, play_area, theme),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            play_area,
            sim.current_score(),
            sim.high_scores(),
            sim.death_reason(),
            theme,
        ),
        GameStatus::Running => {}
    }
}

fn render_walls(frame: &mut Frame<'_>, inner: Rect, sim: &GameSimulation, theme: &Theme) {
    let bounds = sim.grid_dimensions();
    let buffer = frame.buffer_mut();
    for wall in sim.walls().cells() {
        if let Some((x, y)) = logical_to_terminal(inner, bounds, *wall) {
            buffer.set_string(x, y, GLYPH_WALL, Style::new().fg(theme.wall));
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, sim: &GameSimulation, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, sim.grid_dimensions(), sim.food().position)
    else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, sim: &GameSimulation, theme: &Theme) {
    let bounds = sim.grid_dimensions();
    let last_index = sim.snake().len().saturating_sub(1);

    let buffer = frame.buffer_mut();
    // Tail first so the head wins when segments overlap on the death tick.
    for (index, segment) in sim.snake().segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index == last_index {
            (GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body))
        };
        buffer.set_string(x, y, glyph, style);
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    use crate::config::{GameConfig, GridSize};
    use crate::game::GameSimulation;
    use crate::snake::Position;
    use crate::ui::hud::{HudInfo, HudValueFlash};
    use crate::ui::THEME_CLASSIC;

    use super::{logical_to_terminal, render};

    #[test]
    fn positions_map_inside_the_inner_area() {
        let inner = Rect::new(2, 1, 10, 5);
        let bounds = GridSize {
            width: 10,
            height: 5,
        };

        assert_eq!(
            logical_to_terminal(inner, bounds, Position::new(0, 0)),
            Some((2, 1))
        );
        assert_eq!(
            logical_to_terminal(inner, bounds, Position::new(9, 4)),
            Some((11, 5))
        );
        assert_eq!(
            logical_to_terminal(inner, bounds, Position::new(10, 0)),
            None
        );
    }

    #[test]
    fn render_draws_every_status_without_panicking() {
        let mut terminal = Terminal::new(TestBackend::new(30, 20)).expect("test terminal");
        let mut sim = GameSimulation::new_with_seed(GameConfig::with_grid(12, 10), 3)
            .expect("valid config");
        let info = HudInfo {
            theme: &THEME_CLASSIC,
            now: Instant::now(),
            value_flash: HudValueFlash::default(),
        };

        terminal
            .draw(|frame| render(frame, &sim, info))
            .expect("idle frame draws");

        sim.start().expect("start succeeds");
        for _ in 0..20 {
            let _ = sim.tick();
            terminal
                .draw(|frame| render(frame, &sim, info))
                .expect("running frame draws");
        }

        sim.toggle_pause();
        terminal
            .draw(|frame| render(frame, &sim, info))
            .expect("paused frame draws");
    }
}
