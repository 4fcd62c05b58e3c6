use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::time::Duration;

use crate::metrics::GameMetrics;
use crate::render::scene::{DrawColor, DrawCommand};

/// What a rasterized terminal cell holds, by descending draw priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Snake,
    Berry,
    Border,
}

/// Terminal backend for the scene: rasterizes the pixel-space draw list onto
/// a character grid, one grid cell per two-column terminal cell.
pub struct Renderer {
    cell_size: u32,
}

impl Renderer {
    pub fn new(cell_size: u32) -> Self {
        Self { cell_size }
    }

    pub fn render(&self, frame: &mut Frame, scene: &[DrawCommand], metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(scene, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let grid = self.render_grid(scene);
        frame.render_widget(grid, game_area);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Rasterize rect commands onto a character grid. Pixel coordinates snap
    /// to grid cells at the configured cell size; later commands win, except
    /// that border strips never overwrite the snake or the berry (the game
    /// keeps them inside the play area anyway).
    fn render_grid(&self, scene: &[DrawCommand]) -> Paragraph<'_> {
        let (cols, rows) = self.grid_extent(scene);
        let mut cells = vec![vec![Cell::Empty; cols]; rows];

        for command in scene {
            let DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } = command
            else {
                continue;
            };

            let kind = match color {
                DrawColor::Green => Cell::Snake,
                DrawColor::Red => Cell::Berry,
                DrawColor::White => Cell::Border,
                DrawColor::Blue => continue,
            };

            for (cx, cy) in self.covered_cells(*x, *y, *width, *height, cols, rows) {
                if kind == Cell::Border && cells[cy][cx] != Cell::Empty {
                    continue;
                }
                cells[cy][cx] = kind;
            }
        }

        let lines: Vec<Line> = cells
            .iter()
            .map(|row| Line::from(row.iter().map(|cell| self.cell_span(*cell)).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn cell_span(&self, cell: Cell) -> Span<'static> {
        match cell {
            Cell::Snake => Span::styled("■ ", Style::default().fg(Color::Green)),
            Cell::Berry => Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Border => Span::styled("██", Style::default().fg(Color::White)),
            Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }

    /// Grid dimensions covered by the scene, from the rect extents (the
    /// border strips always span the full viewport)
    fn grid_extent(&self, scene: &[DrawCommand]) -> (usize, usize) {
        let cell = self.cell_size as i32;
        let mut cols = 0;
        let mut rows = 0;

        for command in scene {
            if let DrawCommand::Rect {
                x, y, width, height, ..
            } = command
            {
                cols = cols.max((x + *width as i32) / cell);
                rows = rows.max((y + *height as i32) / cell);
            }
        }

        (cols.max(0) as usize, rows.max(0) as usize)
    }

    fn covered_cells(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        cols: usize,
        rows: usize,
    ) -> Vec<(usize, usize)> {
        let cell = self.cell_size as i32;
        let x0 = (x / cell).max(0);
        let y0 = (y / cell).max(0);
        let x1 = ((x + width as i32 + cell - 1) / cell).min(cols as i32);
        let y1 = ((y + height as i32 + cell - 1) / cell).min(rows as i32);

        (y0..y1)
            .flat_map(|cy| (x0..x1).map(move |cx| (cx as usize, cy as usize)))
            .collect()
    }

    /// Header: the scene's score label plus session stats
    fn render_stats(&self, scene: &[DrawCommand], metrics: &GameMetrics) -> Paragraph<'_> {
        let score_label = scene
            .iter()
            .find_map(|command| match command {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .unwrap_or("");

        let text = vec![Line::from(vec![
            Span::styled(
                score_label.to_owned(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format_clock(metrics.run_time()),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// mm:ss run clock for the header
fn format_clock(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, Viewport};
    use crate::render::scene::compose;

    #[test]
    fn test_grid_extent_matches_viewport() {
        let mut engine = GameEngine::new(GameConfig::default());
        let viewport = Viewport::new(400, 300);
        let state = engine.reset(viewport);
        let scene = compose(&state, viewport, engine.config());

        let renderer = Renderer::new(20);
        assert_eq!(renderer.grid_extent(&scene), (20, 15));
    }

    #[test]
    fn test_covered_cells_snap_to_grid() {
        let renderer = Renderer::new(20);

        // One 20x20 rect at pixel (100, 100) is exactly cell (5, 5)
        let cells = renderer.covered_cells(100, 100, 20, 20, 20, 15);
        assert_eq!(cells, vec![(5, 5)]);

        // A top border strip covers the whole first row
        let cells = renderer.covered_cells(0, 0, 400, 20, 20, 15);
        assert_eq!(cells.len(), 20);
        assert!(cells.iter().all(|&(_, cy)| cy == 0));
    }

    #[test]
    fn test_clock_formatting() {
        assert_eq!(format_clock(Duration::from_secs(0)), "00:00");
        assert_eq!(format_clock(Duration::from_secs(125)), "02:05");
        assert_eq!(format_clock(Duration::from_secs(3661)), "61:01");
    }
}
