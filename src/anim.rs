//! Sprite-sheet animation
//!
//! A clip is a list of sheet frame indices played at a fixed rate. The
//! player only tracks time and which clip is active; drawing looks the
//! frame up in the sheet.

/// Named frame sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub name: String,
    /// Sheet frame indices, in playback order
    pub frames: Vec<usize>,
    /// Frames per second
    pub frame_rate: f32,
    /// Loop forever, or hold the last frame
    pub looping: bool,
}

impl Animation {
    pub fn new(name: &str, frames: Vec<usize>, frame_rate: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frames,
            frame_rate,
            looping,
        }
    }

    /// Contiguous range of sheet frames (inclusive)
    pub fn range(name: &str, first: usize, last: usize, frame_rate: f32, looping: bool) -> Self {
        Self::new(name, (first..=last).collect(), frame_rate, looping)
    }

    /// Sheet frame shown `elapsed` seconds after the clip started
    pub fn frame_at(&self, elapsed: f32) -> usize {
        if self.frames.is_empty() {
            return 0;
        }
        if self.frame_rate <= 0.0 {
            return self.frames[0];
        }
        let step = (elapsed.max(0.0) * self.frame_rate) as usize;
        let idx = if self.looping {
            step % self.frames.len()
        } else {
            step.min(self.frames.len() - 1)
        };
        self.frames[idx]
    }
}

/// Collection of clips for one sprite sheet
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    clips: Vec<Animation>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clip, replacing any clip with the same name
    pub fn add(mut self, clip: Animation) -> Self {
        self.clips.retain(|c| c.name != clip.name);
        self.clips.push(clip);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Animation> {
        self.clips.iter().find(|c| c.name == name)
    }

    /// The standard walking character layout: 4 frames facing left,
    /// 1 frame facing the camera, 4 frames facing right.
    pub fn walker(frame_rate: f32) -> Self {
        Self::new()
            .add(Animation::range("left", 0, 3, frame_rate, true))
            .add(Animation::new("turn", vec![4], 20.0, false))
            .add(Animation::range("right", 5, 8, frame_rate, true))
    }
}

/// Playback state for one sprite
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    set: AnimationSet,
    current: Option<String>,
    elapsed: f32,
}

impl AnimationPlayer {
    pub fn new(set: AnimationSet) -> Self {
        Self {
            set,
            current: None,
            elapsed: 0.0,
        }
    }

    /// Switch to a clip.
    ///
    /// With `ignore_if_playing`, asking for the clip that is already running
    /// keeps its timing instead of restarting it. Unknown names are ignored.
    pub fn play(&mut self, name: &str, ignore_if_playing: bool) {
        if ignore_if_playing && self.current.as_deref() == Some(name) {
            return;
        }
        if self.set.get(name).is_none() {
            return;
        }
        self.current = Some(name.to_string());
        self.elapsed = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        if self.current.is_some() {
            self.elapsed += dt;
        }
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Sheet frame to draw (frame 0 before anything plays)
    pub fn current_frame(&self) -> usize {
        self.current
            .as_deref()
            .and_then(|name| self.set.get(name))
            .map(|clip| clip.frame_at(self.elapsed))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looping_clip_wraps() {
        let clip = Animation::range("right", 5, 8, 10.0, true);
        assert_eq!(clip.frame_at(0.0), 5);
        assert_eq!(clip.frame_at(0.15), 6);
        assert_eq!(clip.frame_at(0.35), 8);
        assert_eq!(clip.frame_at(0.45), 5);
    }

    #[test]
    fn test_non_looping_clip_holds_last_frame() {
        let clip = Animation::new("once", vec![1, 2, 3], 10.0, false);
        assert_eq!(clip.frame_at(10.0), 3);
    }

    #[test]
    fn test_degenerate_clips() {
        assert_eq!(Animation::new("empty", vec![], 10.0, true).frame_at(1.0), 0);
        assert_eq!(Animation::new("still", vec![7, 8], 0.0, true).frame_at(1.0), 7);
    }

    #[test]
    fn test_walker_layout() {
        let set = AnimationSet::walker(10.0);
        assert_eq!(set.get("left").unwrap().frames, vec![0, 1, 2, 3]);
        assert_eq!(set.get("turn").unwrap().frames, vec![4]);
        assert_eq!(set.get("right").unwrap().frames, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_player_ignore_if_playing_keeps_timing() {
        let mut player = AnimationPlayer::new(AnimationSet::walker(10.0));
        player.play("left", true);
        player.update(0.25);
        assert_eq!(player.current_frame(), 2);

        player.play("left", true);
        assert_eq!(player.current_frame(), 2);

        // Restart when explicitly asked
        player.play("left", false);
        assert_eq!(player.current_frame(), 0);

        player.play("turn", true);
        assert_eq!(player.current_name(), Some("turn"));
        assert_eq!(player.current_frame(), 4);
    }

    #[test]
    fn test_unknown_clip_is_ignored() {
        let mut player = AnimationPlayer::new(AnimationSet::walker(10.0));
        player.play("right", true);
        player.play("dance", true);
        assert_eq!(player.current_name(), Some("right"));
    }
}
