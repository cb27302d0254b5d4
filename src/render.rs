// Translation from game state to whatever actually draws it. The drawing substrate (a terminal,
// a web page, a fake in tests) implements `RenderSurface`; `Renderer` is the only thing that
// talks to it about the board and the player panels.

use crate::coord::{BOARD_SIZE, Coord};
use crate::notice::BubbleSlot;
use crate::stone::{PlayerSide, StoneColor};


// Target element is not present on the surface. Callers treat this as "nothing to update".
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MissingTarget;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RenderError {
    OutOfBounds(Coord),
}

pub trait RenderSurface {
    // Creates `size * size` cells in row-major order. Activating a cell must end up in
    // `ClientState::activate_cell`.
    fn create_grid(&mut self, size: u8);
    fn clear_stones(&mut self);
    fn mark_cell(&mut self, cell_index: usize, color: StoneColor);

    fn set_player_active(&mut self, side: PlayerSide, active: bool);
    fn set_status(&mut self, text: &str);
    fn set_countdown(&mut self, text: &str);

    fn set_bubble(&mut self, slot: BubbleSlot, text: &str, visible: bool)
    -> Result<(), MissingTarget>;
    fn append_log_line(&mut self, text: &str) -> Result<(), MissingTarget>;

    // Blocking notice, e.g. a modal dialog.
    fn show_alert(&mut self, text: &str);
    fn navigate(&mut self, location: &str);
}

pub struct Renderer<S> {
    surface: S,
    grid_rendered: bool,
}

impl<S: RenderSurface> Renderer<S> {
    pub fn new(surface: S) -> Self { Renderer { surface, grid_rendered: false } }

    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    pub fn grid_rendered(&self) -> bool { self.grid_rendered }

    // Cells are built once. Later calls keep the cells and only wipe the stones.
    pub fn render_board_grid(&mut self) {
        if self.grid_rendered {
            self.clear_stones();
        } else {
            self.surface.create_grid(BOARD_SIZE);
            self.grid_rendered = true;
        }
    }

    pub fn clear_stones(&mut self) {
        if self.grid_rendered {
            self.surface.clear_stones();
        }
    }

    pub fn check_cell(&self, coord: Coord) -> Result<usize, RenderError> {
        match coord.cell_index() {
            Some(idx) if self.grid_rendered => Ok(idx),
            _ => Err(RenderError::OutOfBounds(coord)),
        }
    }

    pub fn draw_stone(&mut self, coord: Coord, color: StoneColor) -> Result<(), RenderError> {
        let idx = self.check_cell(coord)?;
        self.surface.mark_cell(idx, color);
        Ok(())
    }

    pub fn highlight_active_player(&mut self, color: Option<StoneColor>) {
        self.surface.set_player_active(PlayerSide::Left, false);
        self.surface.set_player_active(PlayerSide::Right, false);
        if let Some(color) = color {
            self.surface.set_player_active(color.side(), true);
        }
    }

    pub fn show_status(&mut self, text: &str) { self.surface.set_status(text); }

    pub fn show_countdown(&mut self, seconds: i64) {
        self.surface.set_countdown(&format!("Starting in {seconds}s"));
    }

    pub fn clear_countdown(&mut self) { self.surface.set_countdown(""); }

    pub fn show_alert(&mut self, text: &str) { self.surface.show_alert(text); }

    pub fn navigate(&mut self, location: &str) { self.surface.navigate(location); }
}
