//! Per-frame physics step for a single agent.

use crate::agent::Agent;
use crate::config::FieldConfig;
use crate::Vector2D;

/// Advance `agent` by one frame.
///
/// Order matters: Euler step, then pointer repulsion, then boundary
/// reflection. The pointer is the driver's last known pointer position,
/// `None` until the first pointer move.
pub fn update(
    agent: &mut Agent,
    pointer: Option<Vector2D>,
    width: f64,
    height: f64,
    config: &FieldConfig,
) {
    agent.position += agent.velocity;

    if let Some(pointer) = pointer {
        agent.position -= repulsion(agent.position, pointer, config);
    }

    reflect(agent, width, height);
}

/// Displacement that pushes `position` away from `pointer`.
///
/// Linear falloff: full strength at the pointer, zero at `repel_radius` and
/// beyond. A coincident pointer has no direction and contributes nothing.
pub fn repulsion(position: Vector2D, pointer: Vector2D, config: &FieldConfig) -> Vector2D {
    let delta = pointer - position;
    let dist = delta.magnitude();

    if dist > 0.0 && dist < config.repel_radius {
        let force = (config.repel_radius - dist) / config.repel_radius;
        delta / dist * (force * config.repel_strength)
    } else {
        Vector2D::zero()
    }
}

/// Bounce off the surface edges.
///
/// A component outside `[0, extent]` has its velocity negated and its
/// position pulled back onto the edge, so the trigger fires once per crossing.
pub fn reflect(agent: &mut Agent, width: f64, height: f64) {
    let width = width.max(0.0);
    let height = height.max(0.0);

    if agent.position.x < 0.0 || agent.position.x > width {
        agent.velocity.x = -agent.velocity.x;
        agent.position.x = agent.position.x.clamp(0.0, width);
    }

    if agent.position.y < 0.0 || agent.position.y > height {
        agent.velocity.y = -agent.velocity.y;
        agent.position.y = agent.position.y.clamp(0.0, height);
    }
}
