use std::time::{Duration, Instant};

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::game::{GameEvent, GameSimulation};
use crate::ui::Theme;

const HUD_MARGIN_X: u16 = 1;
const VALUE_FLASH_DURATION: Duration = Duration::from_millis(800);
const SEPARATOR: &str = " │ ";

/// Last-change timestamps for HUD values, used to flash them briefly.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudValueFlash {
    pub score_changed_at: Option<Instant>,
    pub speed_changed_at: Option<Instant>,
    pub walls_changed_at: Option<Instant>,
}

impl HudValueFlash {
    /// Records the change timestamps carried by simulation events.
    pub fn observe(&mut self, event: &GameEvent, now: Instant) {
        match event {
            GameEvent::FoodEaten { .. } => self.score_changed_at = Some(now),
            GameEvent::LevelUp { .. } => self.speed_changed_at = Some(now),
            GameEvent::WallsRegenerated => self.walls_changed_at = Some(now),
            GameEvent::Started | GameEvent::Restarted => *self = Self::default(),
            GameEvent::Paused | GameEvent::Resumed | GameEvent::GameOver { .. } => {}
        }
    }
}

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    pub now: Instant,
    pub value_flash: HudValueFlash,
}

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    sim: &GameSimulation,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let score_area = inset_horizontal(score_area, HUD_MARGIN_X);
    let status_area = inset_horizontal(status_area, HUD_MARGIN_X);
    let theme = info.theme;

    // Score | Speed | Length | Best
    let score_color = flash_color(
        theme.hud_value,
        theme.hud_accent,
        info.value_flash.score_changed_at,
        info.now,
    );
    let speed_color = flash_color(
        theme.hud_value,
        theme.hud_accent,
        info.value_flash.speed_changed_at,
        info.now,
    );
    let best = sim.best_score();
    let top_line = Line::from(vec![
        Span::raw("Score: "),
        Span::styled(sim.current_score().to_string(), Style::default().fg(score_color)),
        Span::raw(SEPARATOR),
        Span::raw("Speed: "),
        Span::styled(
            format!("{:.1}", sim.current_speed_multiplier()),
            Style::default().fg(speed_color),
        ),
        Span::raw(SEPARATOR),
        Span::raw("Length: "),
        Span::styled(sim.snake().len().to_string(), Style::default().fg(theme.hud_value)),
        Span::raw(SEPARATOR),
        Span::raw("Best: "),
        Span::styled(best.to_string(), Style::default().fg(theme.hud_muted)),
    ]);
    frame.render_widget(
        Paragraph::new(top_line)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        score_area,
    );

    let bounds = sim.grid_dimensions();
    let walls_color = flash_color(
        theme.hud_muted,
        theme.hud_accent,
        info.value_flash.walls_changed_at,
        info.now,
    );
    let bottom_line = Line::from(vec![
        Span::raw(format!("{}x{}", bounds.width, bounds.height)),
        Span::raw(SEPARATOR),
        Span::raw("Walls: "),
        Span::styled(sim.walls().len().to_string(), Style::default().fg(walls_color)),
        Span::raw(SEPARATOR),
        Span::raw(format!("{} ms", sim.tick_interval_ms())),
    ]);
    frame.render_widget(
        Paragraph::new(bottom_line)
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.hud_muted)),
        status_area,
    );

    play_area
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

fn flash_color(base: Color, accent: Color, changed_at: Option<Instant>, now: Instant) -> Color {
    match changed_at {
        Some(changed_at) if now.saturating_duration_since(changed_at) < VALUE_FLASH_DURATION => {
            accent
        }
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::style::Color;

    use crate::game::{DeathReason, GameEvent};

    use super::{flash_color, HudValueFlash};

    #[test]
    fn flash_fades_back_to_base_color() {
        let changed = Instant::now();

        assert_eq!(
            flash_color(Color::White, Color::Yellow, Some(changed), changed),
            Color::Yellow
        );
        assert_eq!(
            flash_color(
                Color::White,
                Color::Yellow,
                Some(changed),
                changed + Duration::from_secs(1)
            ),
            Color::White
        );
        assert_eq!(
            flash_color(Color::White, Color::Yellow, None, changed),
            Color::White
        );
    }

    #[test]
    fn events_stamp_matching_values() {
        let now = Instant::now();
        let mut flash = HudValueFlash::default();

        flash.observe(&GameEvent::FoodEaten { score: 5 }, now);
        flash.observe(
            &GameEvent::GameOver {
                final_score: 5,
                reason: DeathReason::WallCollision,
            },
            now,
        );

        assert_eq!(flash.score_changed_at, Some(now));
        assert_eq!(flash.speed_changed_at, None);

        flash.observe(&GameEvent::Restarted, now);
        assert_eq!(flash.score_changed_at, None);
    }
}
