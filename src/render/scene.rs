//! Renderable scene description
//!
//! `compose` is a pure function of the game state: it emits a list of
//! pixel-space draw primitives and mutates nothing. Any backend that can fill
//! rectangles and print text can consume the list; the terminal renderer in
//! this crate is one such backend.

use crate::game::{GameConfig, GameState, Viewport};

/// Palette used by the scene; backends map these to whatever color type
/// their graphics API wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawColor {
    /// Snake body
    Green,
    /// Berry
    Red,
    /// Border strips
    White,
    /// Score text
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One draw primitive, in pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled axis-aligned rectangle
    Rect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: DrawColor,
    },
    /// Text at a pixel position
    Text {
        x: i32,
        y: i32,
        font_size: u32,
        align: TextAlign,
        color: DrawColor,
        content: String,
    },
}

/// Pixel size of the score label font
const SCORE_FONT_SIZE: u32 = 18;

/// Produce the draw list for one frame: snake cells, berry, the four border
/// strips spanning the viewport, and the score label.
pub fn compose(state: &GameState, viewport: Viewport, config: &GameConfig) -> Vec<DrawCommand> {
    let cell = config.cell_size;
    let mut commands = Vec::with_capacity(state.snake.len() + 6);

    for segment in &state.snake.body {
        commands.push(DrawCommand::Rect {
            x: segment.x * cell as i32,
            y: segment.y * cell as i32,
            width: cell,
            height: cell,
            color: DrawColor::Green,
        });
    }

    commands.push(DrawCommand::Rect {
        x: state.berry.x * cell as i32,
        y: state.berry.y * cell as i32,
        width: cell,
        height: cell,
        color: DrawColor::Red,
    });

    commands.extend(border_strips(viewport, config));

    commands.push(DrawCommand::Text {
        x: 5,
        y: 15,
        font_size: SCORE_FONT_SIZE,
        align: TextAlign::Center,
        color: DrawColor::Blue,
        content: format!("Score: {}, Last Score: {}", state.score, state.last_score),
    });

    commands
}

/// Top, bottom, left and right strips of border thickness, spanning the
/// full viewport.
fn border_strips(viewport: Viewport, config: &GameConfig) -> [DrawCommand; 4] {
    let t = config.border_thickness;
    let (w, h) = (viewport.width, viewport.height);

    let strip = |x: i32, y: i32, width: u32, height: u32| DrawCommand::Rect {
        x,
        y,
        width,
        height,
        color: DrawColor::White,
    };

    [
        strip(0, 0, w, t),
        strip(0, h.saturating_sub(t) as i32, w, t),
        strip(0, 0, t, h),
        strip(w.saturating_sub(t) as i32, 0, t, h),
    ]
}
