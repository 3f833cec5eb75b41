//! Rendering glue
//!
//! Draws the board, snake, and food through the surface primitives.
//! Read-only over the state; all colors are plain CSS strings.

use crate::consts::CELL_SIZE;
use crate::platform::DrawSurface;
use crate::sim::GameState;

const BACKGROUND: &str = "#101418";
const BORDER: &str = "#2c3e50";
const SNAKE_HEAD: &str = "#8be06a";
const SNAKE_BODY: &str = "#4caf50";
const FOOD: &str = "#e74c3c";

pub(crate) fn draw(surface: &mut dyn DrawSurface, state: &GameState) {
    let cell = CELL_SIZE as f64;

    surface.clear(BACKGROUND);

    // Snake body first, then the head on top
    for (i, seg) in state.snake.iter().enumerate().rev() {
        let color = if i == 0 { SNAKE_HEAD } else { SNAKE_BODY };
        surface.fill_rect(
            seg.x as f64 * cell + 1.0,
            seg.y as f64 * cell + 1.0,
            cell - 2.0,
            cell - 2.0,
            color,
        );
    }

    surface.fill_circle(
        state.food.x as f64 * cell + cell / 2.0,
        state.food.y as f64 * cell + cell / 2.0,
        cell * 0.4,
        FOOD,
    );

    // Playfield border around the cell grid (may be inset from the canvas edge)
    let w = state.board.width as f64 * cell;
    let h = state.board.height as f64 * cell;
    surface.stroke_rect(0.5, 0.5, w - 1.0, h - 1.0, BORDER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::surface::RecordingSurface;
    use crate::sim::{BoardSize, Difficulty};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_draw_covers_snake_food_and_border() {
        let mut rng = Pcg32::seed_from_u64(3);
        let state = GameState::new(BoardSize::new(20, 20), Difficulty::Normal, 0, &mut rng);
        let mut surface = RecordingSurface::new(400, 400);

        draw(&mut surface, &state);

        let fills = surface
            .ops
            .iter()
            .filter(|op| op.starts_with("fill_rect"))
            .count();
        assert_eq!(fills, state.snake.len());
        assert_eq!(
            surface
                .ops
                .iter()
                .filter(|op| op.starts_with("fill_circle"))
                .count(),
            1
        );
        assert!(surface.ops.first().unwrap().starts_with("clear"));
        assert!(surface.ops.last().unwrap().starts_with("stroke_rect"));
    }
}
