use crate::config::FieldConfig;
use crate::rng::RandomSource;
use crate::surface::{Rgb, Surface};
use crate::Vector2D;

/// Two-valued color tag fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    Violet,
    Cyan,
}

impl ColorTag {
    pub fn rgb(self) -> Rgb {
        match self {
            ColorTag::Violet => Rgb::VIOLET,
            ColorTag::Cyan => Rgb::CYAN,
        }
    }
}

/// A single particle in the field
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub radius: f64,
    pub opacity: f64,
    pub color: ColorTag,
}

impl Agent {
    pub fn new(
        position: Vector2D,
        velocity: Vector2D,
        radius: f64,
        opacity: f64,
        color: ColorTag,
    ) -> Self {
        Self {
            position,
            velocity,
            radius,
            opacity,
            color,
        }
    }

    /// Sample a fresh agent anywhere on a `width` x `height` surface.
    pub fn random<R: RandomSource>(
        rng: &mut R,
        width: f64,
        height: f64,
        config: &FieldConfig,
    ) -> Self {
        let position = Vector2D::new(rng.range(0.0, width), rng.range(0.0, height));
        let velocity = Vector2D::new(
            rng.range(-config.max_speed, config.max_speed),
            rng.range(-config.max_speed, config.max_speed),
        );
        let radius = rng.range(config.min_radius, config.max_radius);
        let opacity = rng.range(config.min_opacity, config.max_opacity);
        let color = if rng.coin() {
            ColorTag::Violet
        } else {
            ColorTag::Cyan
        };

        Self::new(position, velocity, radius, opacity, color)
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.fill_circle(self.position, self.radius, self.color.rgb(), self.opacity);
    }
}
