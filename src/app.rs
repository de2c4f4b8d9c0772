//! Application state and demo management
//!
//! Fixed set of demos, each with its own persistent scene.
//! Switch between them with Tab (or gamepad Select) - the inactive demo
//! keeps its state.

use crate::asset::{AssetManifest, AssetStore};
use crate::config::{FpsLimit, GameConfig, StartDemo};
use crate::game::PlatformerScene;
use crate::input::{FrameInput, InputState};
use crate::scene::{Scene, SceneSlot, Viewport};
use crate::tutorial::TutorialScene;
use macroquad::logging::info;
use macroquad::prelude::{vec2, Vec2};

/// The available demos (fixed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    Tutorial = 0,
    Platformer = 1,
}

impl Demo {
    pub const ALL: [Demo; 2] = [Demo::Tutorial, Demo::Platformer];

    pub fn label(&self) -> &'static str {
        match self {
            Demo::Tutorial => "Tutorial",
            Demo::Platformer => "Platformer",
        }
    }

    /// The demo Tab switches to
    pub fn next(&self) -> Demo {
        Demo::ALL[(*self as usize + 1) % Demo::ALL.len()]
    }
}

impl From<StartDemo> for Demo {
    fn from(start: StartDemo) -> Self {
        match start {
            StartDemo::Tutorial => Demo::Tutorial,
            StartDemo::Platformer => Demo::Platformer,
        }
    }
}

/// Main application state containing both demos
pub struct AppState {
    /// Currently shown demo
    pub active: Demo,

    tutorial: SceneSlot,
    platformer: SceneSlot,

    /// Textures shared by both demos, keyed by manifest key
    pub assets: AssetStore,

    /// Unified input state (keyboard + mouse + gamepad)
    pub input: InputState,

    pub fps_limit: FpsLimit,

    base_url: String,
    world_size: Vec2,
}

impl AppState {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self {
            active: config.start_demo.into(),
            tutorial: SceneSlot::new(Box::new(TutorialScene::new(config))),
            platformer: SceneSlot::new(Box::new(PlatformerScene::new(config, seed))),
            assets: AssetStore::new(),
            input: InputState::new(),
            fps_limit: config.fps_limit,
            base_url: config.assets.base_url.clone(),
            world_size: vec2(config.window.width, config.window.height),
        }
    }

    /// One manifest for both demos, the one shown first listed first
    pub fn manifest(&self) -> AssetManifest {
        combined_manifest(self.slot(self.active).scene.as_ref(), self.slot(self.active.next()).scene.as_ref())
    }

    /// Preload every demo's assets, then create both demos
    pub async fn start(&mut self) {
        let manifest = self.manifest();
        self.assets.load_manifest(&manifest, &self.base_url).await;
        info!("Loaded {} textures from {} manifest entries", self.assets.len(), manifest.len());

        for demo in [self.active, self.active.next()] {
            let slot = match demo {
                Demo::Tutorial => &mut self.tutorial,
                Demo::Platformer => &mut self.platformer,
            };
            slot.create(&self.assets);
            info!("{} ready", demo.label());
        }
    }

    fn slot(&self, demo: Demo) -> &SceneSlot {
        match demo {
            Demo::Tutorial => &self.tutorial,
            Demo::Platformer => &self.platformer,
        }
    }

    fn slot_mut(&mut self, demo: Demo) -> &mut SceneSlot {
        match demo {
            Demo::Tutorial => &mut self.tutorial,
            Demo::Platformer => &mut self.platformer,
        }
    }

    /// Switch to a different demo
    pub fn set_active(&mut self, demo: Demo) {
        if self.active != demo {
            info!("Switching to {}", demo.label());
            self.active = demo;
        }
    }

    /// Handle app-level input, then advance the active demo.
    /// A frame that switches demos is not forwarded to either scene.
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        if input.switch_demo {
            self.set_active(self.active.next());
            return;
        }
        let active = self.active;
        self.slot_mut(active).update(input, dt);
    }

    pub fn viewport(&self, screen_size: Vec2) -> Viewport {
        Viewport::fit(self.world_size, screen_size)
    }

    pub fn draw(&self, viewport: &Viewport) {
        self.slot(self.active).draw(&self.assets, viewport);
    }
}

fn combined_manifest(first: &dyn Scene, second: &dyn Scene) -> AssetManifest {
    first.preload().merge(second.preload())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::scene::DUDE_KEY;
    use crate::tutorial::BACKGROUND_KEY;

    #[test]
    fn test_combined_manifest_lists_first_demo_first() {
        let config = GameConfig::default();
        let tutorial = TutorialScene::new(&config);
        let platformer = PlatformerScene::new(&config, 1);

        let manifest = combined_manifest(&tutorial, &platformer);
        assert_eq!(manifest.len(), 6);
        assert_eq!(manifest.entries()[0].key, BACKGROUND_KEY);
        assert!(manifest.get(DUDE_KEY).is_some());

        let manifest = combined_manifest(&platformer, &tutorial);
        assert_eq!(manifest.len(), 6);
        assert_eq!(manifest.entries()[5].key, BACKGROUND_KEY);
    }

    #[test]
    fn test_demo_cycle() {
        assert_eq!(Demo::Tutorial.next(), Demo::Platformer);
        assert_eq!(Demo::Platformer.next(), Demo::Tutorial);
        for demo in Demo::ALL {
            assert_eq!(demo.next().next(), demo);
        }
    }

    #[test]
    fn test_start_demo_maps_to_demo() {
        assert_eq!(Demo::from(StartDemo::Tutorial), Demo::Tutorial);
        assert_eq!(Demo::from(StartDemo::default()), Demo::Platformer);
    }
}
