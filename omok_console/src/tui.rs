use std::collections::VecDeque;

use console::Style;
use enum_map::EnumMap;
use itertools::Itertools;
use omok_client::notice::BubbleSlot;
use omok_client::render::{MissingTarget, RenderSurface};
use omok_client::stone::{PlayerSide, StoneColor};


const MAX_VISIBLE_LOG_LINES: usize = 5;

// Terminal stand-in for the game page. Keeps the picture in memory; `render` turns it into text
// that the client loop prints on every repaint.
pub struct TerminalSurface {
    size: u8,
    cells: Vec<Option<StoneColor>>,
    active: EnumMap<PlayerSide, bool>,
    status: String,
    countdown: String,
    bubbles: EnumMap<BubbleSlot, Option<String>>,
    log: VecDeque<String>,
    alert: Option<String>,
    navigation: Option<String>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        TerminalSurface {
            size: 0,
            cells: Vec::new(),
            active: EnumMap::default(),
            status: "Connecting...".to_owned(),
            countdown: String::new(),
            bubbles: EnumMap::default(),
            log: VecDeque::new(),
            alert: None,
            navigation: None,
        }
    }

    pub fn navigation(&self) -> Option<&str> { self.navigation.as_deref() }

    // Alerts stay on screen until the user presses a key.
    pub fn dismiss_alert(&mut self) -> bool { self.alert.take().is_some() }

    pub fn render(&self, my_color: Option<StoneColor>) -> String {
        let mut ret = String::new();
        ret.push_str(&render_players(&self.active, my_color));
        ret.push('\n');
        for (slot, bubble) in &self.bubbles {
            if let Some(text) = bubble {
                let label = match slot {
                    BubbleSlot::Player1 => "P1",
                    BubbleSlot::Player2 => "P2",
                };
                ret.push_str(&format!("{label} says: {}\n", Style::new().italic().apply_to(text)));
            }
        }
        ret.push('\n');
        if self.size > 0 {
            ret.push_str(&render_grid(self.size, &self.cells));
        }
        ret.push('\n');
        ret.push_str(&self.status);
        if !self.countdown.is_empty() {
            ret.push_str(&format!("  {}", Style::new().bold().apply_to(&self.countdown)));
        }
        ret.push('\n');
        for line in &self.log {
            ret.push_str(&format!("{}\n", Style::new().dim().apply_to(line)));
        }
        if let Some(alert) = &self.alert {
            ret.push_str(&format!("\n{}\n", Style::new().magenta().bold().apply_to(alert)));
        }
        ret
    }
}

impl RenderSurface for TerminalSurface {
    fn create_grid(&mut self, size: u8) {
        self.size = size;
        self.cells = vec![None; size as usize * size as usize];
    }

    fn clear_stones(&mut self) { self.cells.fill(None); }

    fn mark_cell(&mut self, cell_index: usize, color: StoneColor) {
        if let Some(cell) = self.cells.get_mut(cell_index) {
            *cell = Some(color);
        }
    }

    fn set_player_active(&mut self, side: PlayerSide, active: bool) { self.active[side] = active; }

    fn set_status(&mut self, text: &str) { self.status = text.to_owned(); }

    fn set_countdown(&mut self, text: &str) { self.countdown = text.to_owned(); }

    fn set_bubble(
        &mut self, slot: BubbleSlot, text: &str, visible: bool,
    ) -> Result<(), MissingTarget> {
        self.bubbles[slot] = visible.then(|| text.to_owned());
        Ok(())
    }

    fn append_log_line(&mut self, text: &str) -> Result<(), MissingTarget> {
        self.log.push_back(text.to_owned());
        while self.log.len() > MAX_VISIBLE_LOG_LINES {
            self.log.pop_front();
        }
        Ok(())
    }

    fn show_alert(&mut self, text: &str) { self.alert = Some(text.to_owned()); }

    fn navigate(&mut self, location: &str) { self.navigation = Some(location.to_owned()); }
}

fn render_players(active: &EnumMap<PlayerSide, bool>, my_color: Option<StoneColor>) -> String {
    let panel = |side: PlayerSide, color: StoneColor| {
        let mut text = format!("{} {color}", stone_pictogram(Some(color)));
        if my_color == Some(color) {
            text.push_str(" (you)");
        }
        let style = if active[side] { Style::new().reverse() } else { Style::new() };
        style.apply_to(text).to_string()
    };
    format!(
        "{}    vs    {}",
        panel(PlayerSide::Left, StoneColor::Black),
        panel(PlayerSide::Right, StoneColor::White)
    )
}

fn render_grid(size: u8, cells: &[Option<StoneColor>]) -> String {
    let board_style = Style::new().color256(233).on_color256(180);
    let header = (0..size).map(|x| format!("{x:>2} ")).join("");
    let mut ret = format!("   {header}\n");
    for y in 0..size as usize {
        let row = (0..size as usize)
            .map(|x| {
                let cell = cells.get(y * size as usize + x).copied().flatten();
                format!(" {} ", stone_pictogram(cell))
            })
            .join("");
        ret.push_str(&format!("{y:>2} {}\n", board_style.apply_to(row)));
    }
    ret
}

fn stone_pictogram(stone: Option<StoneColor>) -> char {
    match stone {
        Some(StoneColor::Black) => '●',
        Some(StoneColor::White) => '○',
        None => '·',
    }
}
