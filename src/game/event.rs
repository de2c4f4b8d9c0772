//! Game events
//!
//! The simulation reports what happened during a frame by queueing
//! events; the scene drains them afterwards (logging, HUD flashes).
//! The simulation itself never reads them back.

use macroquad::prelude::Vec2;

/// FIFO queue for one event type, drained once per frame
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A star was picked up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarCollected {
    pub star: usize,
    pub position: Vec2,
    /// Score after this pickup
    pub score: u32,
}

/// The player touched a bomb; the round is over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BombHit {
    pub bomb: usize,
    pub position: Vec2,
    pub final_score: u32,
}

/// Every star was collected; they respawn and a bomb is released
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveCleared {
    /// Waves cleared so far, including this one
    pub wave: u32,
    pub bomb_spawn: Vec2,
}

/// All event queues for the platformer
#[derive(Debug, Default)]
pub struct Events {
    pub star_collected: EventQueue<StarCollected>,
    pub bomb_hit: EventQueue<BombHit>,
    pub wave_cleared: EventQueue<WaveCleared>,
    /// New value of the shader flag, one entry per toggle
    pub shader_toggled: EventQueue<bool>,
    pub restarted: EventQueue<()>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.star_collected.is_empty()
            && self.bomb_hit.is_empty()
            && self.wave_cleared.is_empty()
            && self.shader_toggled.is_empty()
            && self.restarted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue_is_fifo() {
        let mut queue: EventQueue<i32> = EventQueue::new();
        queue.send(1);
        queue.send(2);
        queue.send(3);
        assert!(!queue.is_empty());

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_empty_until_sent() {
        let mut events = Events::new();
        assert!(events.is_empty());
        events.restarted.send(());
        assert!(!events.is_empty());

        events.restarted.clear();
        assert!(events.is_empty());
    }
}
