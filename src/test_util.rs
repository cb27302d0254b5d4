// Test utilities that cannot be moved to the "tests" folder, because unit tests use them too.

use enum_map::EnumMap;

use crate::coord::{BOARD_SIZE, Coord};
use crate::notice::BubbleSlot;
use crate::render::{MissingTarget, RenderSurface};
use crate::stone::{PlayerSide, StoneColor};


// In-memory drawing substrate that records everything it is asked to show.
#[derive(Clone, Debug)]
pub struct FakeSurface {
    pub grids_created: usize,
    pub cells: Vec<Option<StoneColor>>,
    pub active: EnumMap<PlayerSide, bool>,
    pub status: String,
    pub countdown: String,
    pub bubbles: EnumMap<BubbleSlot, Option<(String, bool)>>,
    pub log_lines: Vec<String>,
    pub alerts: Vec<String>,
    pub navigations: Vec<String>,
    // Pretend the page lacks these elements.
    pub has_bubbles: bool,
    pub has_log: bool,
}

impl FakeSurface {
    pub fn new() -> Self {
        FakeSurface {
            grids_created: 0,
            cells: Vec::new(),
            active: EnumMap::default(),
            status: String::new(),
            countdown: String::new(),
            bubbles: EnumMap::default(),
            log_lines: Vec::new(),
            alerts: Vec::new(),
            navigations: Vec::new(),
            has_bubbles: true,
            has_log: true,
        }
    }

    pub fn cell(&self, coord: Coord) -> Option<StoneColor> {
        coord.cell_index().and_then(|idx| self.cells.get(idx).copied().flatten())
    }

    pub fn num_marked_cells(&self) -> usize { self.cells.iter().flatten().count() }

    pub fn bubble(&self, slot: BubbleSlot) -> Option<(String, bool)> { self.bubbles[slot].clone() }

    pub fn active_side(&self) -> Option<PlayerSide> {
        match (self.active[PlayerSide::Left], self.active[PlayerSide::Right]) {
            (true, false) => Some(PlayerSide::Left),
            (false, true) => Some(PlayerSide::Right),
            (false, false) => None,
            (true, true) => panic!("Both players highlighted"),
        }
    }
}

impl RenderSurface for FakeSurface {
    fn create_grid(&mut self, size: u8) {
        assert_eq!(size, BOARD_SIZE);
        self.grids_created += 1;
        self.cells = vec![None; size as usize * size as usize];
    }

    fn clear_stones(&mut self) { self.cells.fill(None); }

    fn mark_cell(&mut self, cell_index: usize, color: StoneColor) {
        self.cells[cell_index] = Some(color);
    }

    fn set_player_active(&mut self, side: PlayerSide, active: bool) { self.active[side] = active; }

    fn set_status(&mut self, text: &str) { self.status = text.to_owned(); }

    fn set_countdown(&mut self, text: &str) { self.countdown = text.to_owned(); }

    fn set_bubble(
        &mut self, slot: BubbleSlot, text: &str, visible: bool,
    ) -> Result<(), MissingTarget> {
        if !self.has_bubbles {
            return Err(MissingTarget);
        }
        self.bubbles[slot] = Some((text.to_owned(), visible));
        Ok(())
    }

    fn append_log_line(&mut self, text: &str) -> Result<(), MissingTarget> {
        if !self.has_log {
            return Err(MissingTarget);
        }
        self.log_lines.push(text.to_owned());
        Ok(())
    }

    fn show_alert(&mut self, text: &str) { self.alerts.push(text.to_owned()); }

    fn navigate(&mut self, location: &str) { self.navigations.push(location.to_owned()); }
}
