//! Game configuration
//!
//! All tunables live in a single RON file (`assets/config/game.ron`).
//! Every field has a default, so a partial file (or no file at all) still
//! yields the classic tutorial values.

use macroquad::logging::{error, info};
use serde::{Deserialize, Serialize};

/// Path of the configuration file, relative to the working directory / web root
pub const CONFIG_PATH: &str = "assets/config/game.ron";

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Which demo is shown first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StartDemo {
    Tutorial,
    #[default]
    Platformer,
}

/// Frame rate cap applied by the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    Fps30,
    #[default]
    Fps60,
    Unlocked,
}

impl FpsLimit {
    /// Target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical world width (the viewport letterboxes this into the window)
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Starfall".to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Where images come from.
///
/// Relative paths are joined onto `base_url`; absolute `http(s)://` URLs
/// are used as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub base_url: String,
    pub tutorial_background: String,
    pub sky: String,
    pub ground: String,
    pub star: String,
    pub bomb: String,
    pub dude: String,
    pub dude_frame_width: u32,
    pub dude_frame_height: u32,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://labs.phaser.io/assets".to_string(),
            tutorial_background: "skies/space3.png".to_string(),
            sky: "skies/sky4.png".to_string(),
            ground: "sprites/platform.png".to_string(),
            star: "demoscene/star.png".to_string(),
            bomb: "sprites/bomb.png".to_string(),
            dude: "sprites/dude.png".to_string(),
            dude_frame_width: 32,
            dude_frame_height: 48,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in world units per second squared
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { gravity: 300.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn point (centre of the body)
    pub spawn: (f32, f32),
    pub size: (f32, f32),
    pub run_speed: f32,
    pub jump_speed: f32,
    pub bounce: f32,
    pub frame_rate: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: (100.0, 450.0),
            size: (32.0, 48.0),
            run_speed: 160.0,
            jump_speed: 330.0,
            bounce: 0.2,
            frame_rate: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub count: usize,
    pub start_x: f32,
    pub step_x: f32,
    pub size: (f32, f32),
    pub bounce_min: f32,
    pub bounce_max: f32,
    pub score_per_star: u32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 12,
            start_x: 12.0,
            step_x: 70.0,
            size: (24.0, 22.0),
            bounce_min: 0.4,
            bounce_max: 0.8,
            score_per_star: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BombConfig {
    pub size: (f32, f32),
    /// Horizontal launch speed is drawn from this range
    pub speed_min: f32,
    pub speed_max: f32,
    pub fall_speed: f32,
    pub spawn_y: f32,
}

impl Default for BombConfig {
    fn default() -> Self {
        Self {
            size: (14.0, 14.0),
            speed_min: -200.0,
            speed_max: 200.0,
            fall_speed: 20.0,
            spawn_y: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    pub enabled_at_start: bool,
    /// Amount added to the `time` uniform every frame
    pub time_step: f32,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            enabled_at_start: false,
            time_step: 0.005,
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub stars: StarConfig,
    pub bombs: BombConfig,
    pub shader: ShaderConfig,
    pub fps_limit: FpsLimit,
    pub start_demo: StartDemo,
    /// Fixed RNG seed (None = seeded from the clock)
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Check values that would make the game unplayable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "world size must be positive, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.physics.gravity < 0.0 {
            return Err(ConfigError::Invalid(format!("gravity must be >= 0, got {}", self.physics.gravity)));
        }
        if self.stars.count == 0 {
            return Err(ConfigError::Invalid("at least one star is required".to_string()));
        }
        if self.stars.bounce_min > self.stars.bounce_max {
            return Err(ConfigError::Invalid(format!(
                "star bounce range is inverted ({} > {})",
                self.stars.bounce_min, self.stars.bounce_max
            )));
        }
        if self.bombs.speed_min > self.bombs.speed_max {
            return Err(ConfigError::Invalid(format!(
                "bomb speed range is inverted ({} > {})",
                self.bombs.speed_min, self.bombs.speed_max
            )));
        }
        if self.assets.dude_frame_width == 0 || self.assets.dude_frame_height == 0 {
            return Err(ConfigError::Invalid("sprite sheet frame size must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Parse and validate configuration text
pub fn parse_config(text: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = ron::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Read configuration from a file on disk
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config_file(path: &std::path::Path) -> Result<GameConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}

/// Load the game configuration, falling back to defaults.
///
/// A missing file is normal (defaults are logged at info level); a broken
/// file is reported as an error but never stops the game.
pub async fn load_config() -> GameConfig {
    #[cfg(not(target_arch = "wasm32"))]
    let result = {
        let path = std::path::Path::new(CONFIG_PATH);
        if !path.exists() {
            info!("No config at {}, using defaults", CONFIG_PATH);
            return GameConfig::default();
        }
        load_config_file(path)
    };

    #[cfg(target_arch = "wasm32")]
    let result = match macroquad::file::load_string(CONFIG_PATH).await {
        Ok(text) => parse_config(&text),
        Err(_) => {
            info!("No config at {}, using defaults", CONFIG_PATH);
            return GameConfig::default();
        }
    };

    match result {
        Ok(config) => {
            info!("Loaded config from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            error!("Failed to load {}: {}, using defaults", CONFIG_PATH, e);
            GameConfig::default()
        }
    }
}
