//! Custom shader pipeline
//!
//! A thin wrapper around a macroquad `Material`: GLSL ES 1.00 sources plus
//! one `time` uniform that advances by a fixed step every frame. The
//! fragment shader ripples the sprite horizontally and shifts its hue a
//! little, which reads as a heat-haze effect on the moving sprites.

use macroquad::logging::{error, info};
use macroquad::prelude::*;

pub const VERTEX_SHADER: &str = r#"#version 100
attribute vec3 position;
attribute vec2 texcoord;
attribute vec4 color0;

varying lowp vec2 uv;
varying lowp vec4 color;

uniform mat4 Model;
uniform mat4 Projection;

void main() {
    gl_Position = Projection * Model * vec4(position, 1.0);
    color = color0 / 255.0;
    uv = texcoord;
}
"#;

pub const FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;

varying lowp vec2 uv;
varying lowp vec4 color;

uniform sampler2D Texture;
uniform float time;

void main() {
    vec2 p = uv;
    p.x += sin(p.y * 40.0 + time * 30.0) * 0.004;
    vec4 texel = texture2D(Texture, p) * color;
    float shift = 0.5 + 0.5 * sin(time * 12.0);
    texel.rgb = mix(texel.rgb, texel.gbr, shift * 0.35);
    gl_FragColor = texel;
}
"#;

/// Name of the per-frame uniform
pub const TIME_UNIFORM: &str = "time";

/// Shader material plus its clock.
///
/// The clock runs whether or not the material compiled, so enabling the
/// effect later doesn't make it jump.
pub struct ShaderPipeline {
    material: Option<Material>,
    time: f32,
    time_step: f32,
}

impl ShaderPipeline {
    /// Compile the material. A compile failure is logged and leaves the
    /// pipeline inert (everything draws with the default material).
    pub fn new(time_step: f32) -> Self {
        let params = MaterialParams {
            uniforms: vec![UniformDesc::new(TIME_UNIFORM, UniformType::Float1)],
            ..Default::default()
        };
        let material = match load_material(
            ShaderSource::Glsl {
                vertex: VERTEX_SHADER,
                fragment: FRAGMENT_SHADER,
            },
            params,
        ) {
            Ok(material) => {
                info!("Shader pipeline compiled");
                Some(material)
            }
            Err(e) => {
                error!("Shader pipeline failed to compile: {}", e);
                None
            }
        };
        Self {
            material,
            time: 0.0,
            time_step,
        }
    }

    /// A pipeline with no material (no GL context needed)
    pub fn inert(time_step: f32) -> Self {
        Self {
            material: None,
            time: 0.0,
            time_step,
        }
    }

    /// Advance the clock by one frame
    pub fn tick(&mut self) {
        self.time += self.time_step;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_compiled(&self) -> bool {
        self.material.is_some()
    }

    /// Upload the uniform and bind the material for following draws.
    /// Returns false when there is nothing to bind.
    pub fn apply(&self) -> bool {
        match &self.material {
            Some(material) => {
                material.set_uniform(TIME_UNIFORM, self.time);
                gl_use_material(material);
                true
            }
            None => false,
        }
    }

    /// Back to the default material
    pub fn reset(&self) {
        gl_use_default_material();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let mut pipeline = ShaderPipeline::inert(0.005);
        let mut last = pipeline.time();
        for _ in 0..100 {
            pipeline.tick();
            assert!(pipeline.time() > last);
            last = pipeline.time();
        }
        assert!((pipeline.time() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_inert_pipeline_never_binds() {
        let pipeline = ShaderPipeline::inert(0.005);
        assert!(!pipeline.is_compiled());
        assert!(!pipeline.apply());
    }

    #[test]
    fn test_sources_declare_time_uniform() {
        assert!(FRAGMENT_SHADER.contains("uniform float time;"));
        assert!(VERTEX_SHADER.starts_with("#version 100"));
    }
}
