use crate::agent::Agent;
use crate::config::FieldConfig;
use crate::surface::{Rgb, Surface};
use crate::Vector2D;

/// Opacity of the link between two positions, `None` when they are too far apart.
pub fn link_opacity(a: Vector2D, b: Vector2D, config: &FieldConfig) -> Option<f64> {
    let dist = a.distance(&b);
    if dist < config.link_distance {
        Some((1.0 - dist / config.link_distance) * config.link_opacity)
    } else {
        None
    }
}

/// Draw a line between every pair of agents closer than `link_distance`.
///
/// Visits each unordered pair once (`i < j`) and only reads positions.
/// Returns the number of links drawn.
pub fn draw_links<S: Surface>(agents: &[Agent], surface: &mut S, config: &FieldConfig) -> usize {
    let mut drawn = 0;

    for (i, a) in agents.iter().enumerate() {
        for b in &agents[i + 1..] {
            if let Some(alpha) = link_opacity(a.position, b.position, config) {
                surface.stroke_line(a.position, b.position, config.link_width, Rgb::VIOLET, alpha);
                drawn += 1;
            }
        }
    }

    drawn
}
