use std::time::Duration;

use enum_map::{Enum, EnumMap};
use instant::Instant;
use strum::EnumIter;

use crate::expiry::ExpiryTimer;
use crate::render::RenderSurface;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter)]
pub enum BubbleSlot {
    Player1,
    Player2,
}

impl BubbleSlot {
    // Server numbers players starting from 1.
    pub fn from_player_index(index: i64) -> Option<Self> {
        match index {
            1 => Some(BubbleSlot::Player1),
            2 => Some(BubbleSlot::Player2),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Bubble {
    text: String,
    visible: bool,
    hide_timer: ExpiryTimer,
}

impl Bubble {
    pub fn text(&self) -> &str { &self.text }
    pub fn is_visible(&self) -> bool { self.visible }
}

// Chat bubbles next to the players and the spectator log.
//
// Bubbles hide themselves after a while. Each bubble owns exactly one timer; showing a new
// message in a bubble that is still visible re-arms that timer, so an old deadline can never hide
// a newer message.
#[derive(Clone, Debug)]
pub struct NoticeBoard {
    bubbles: EnumMap<BubbleSlot, Bubble>,
    log: Vec<String>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        NoticeBoard {
            bubbles: EnumMap::default(),
            log: Vec::new(),
        }
    }

    pub fn bubble(&self, slot: BubbleSlot) -> &Bubble { &self.bubbles[slot] }
    pub fn log(&self) -> &[String] { &self.log }

    pub fn show_bubble(
        &mut self, surface: &mut impl RenderSurface, slot: BubbleSlot, text: &str,
        duration: Duration, now: Instant,
    ) {
        if surface.set_bubble(slot, text, true).is_err() {
            log::debug!("No bubble element for {slot:?}, dropping chat message");
            return;
        }
        let bubble = &mut self.bubbles[slot];
        bubble.text = text.to_owned();
        bubble.visible = true;
        bubble.hide_timer.arm(now, duration);
    }

    pub fn append_log(&mut self, surface: &mut impl RenderSurface, text: &str) {
        if surface.append_log_line(text).is_err() {
            log::debug!("No chat log element, dropping spectator message");
            return;
        }
        self.log.push(text.to_owned());
    }

    pub fn tick(&mut self, surface: &mut impl RenderSurface, now: Instant) {
        for (slot, bubble) in self.bubbles.iter_mut() {
            if bubble.hide_timer.fire_if_expired(now) {
                bubble.visible = false;
                // The element existed when the bubble was shown; if it is gone now, there is
                // nothing left to hide.
                let _ = surface.set_bubble(slot, &bubble.text, false);
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.bubbles.values().filter_map(|b| b.hide_timer.deadline()).min()
    }

    // Hides every visible bubble right away and drops all pending timers. Log lines already
    // drawn stay on the surface: the log has no primitive to take them back.
    pub fn clear(&mut self, surface: &mut impl RenderSurface) {
        for (slot, bubble) in self.bubbles.iter() {
            if bubble.visible {
                let _ = surface.set_bubble(slot, &bubble.text, false);
            }
        }
        self.bubbles = EnumMap::default();
        self.log.clear();
    }
}
