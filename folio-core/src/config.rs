/// Hard capacity of the agent set. Link drawing is pairwise, so this bounds
/// the per-frame cost at 150 * 149 / 2 pair tests.
pub const MAX_AGENTS: usize = 150;

/// Configuration for the particle field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Surface area (in square pixels) that accounts for one agent.
    pub area_per_agent: f64,
    /// Upper bound on the agent count, itself capped at [`MAX_AGENTS`].
    pub max_agents: usize,
    /// Per-axis speed bound used when seeding velocities.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    /// Radius around the pointer inside which agents are pushed away.
    pub repel_radius: f64,
    /// Displacement applied at full force, in pixels per frame.
    pub repel_strength: f64,
    /// Pairs closer than this are linked.
    pub link_distance: f64,
    /// Link opacity at zero distance.
    pub link_opacity: f64,
    pub link_width: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            area_per_agent: 8000.0,
            max_agents: MAX_AGENTS,
            max_speed: 0.25,
            min_radius: 0.5,
            max_radius: 2.5,
            min_opacity: 0.1,
            max_opacity: 0.6,
            repel_radius: 120.0,
            repel_strength: 1.5,
            link_distance: 130.0,
            link_opacity: 0.15,
            link_width: 0.5,
        }
    }
}

impl FieldConfig {
    /// Number of agents to seed for a surface of the given size:
    /// `clamp(floor(width * height / area_per_agent), 0, max_agents)`.
    pub fn agent_count(&self, width: f64, height: f64) -> usize {
        let cap = self.max_agents.min(MAX_AGENTS);
        if !(width > 0.0 && height > 0.0) || !(self.area_per_agent > 0.0) {
            return 0;
        }

        let raw = crate::floor(width * height / self.area_per_agent);
        if !raw.is_finite() {
            return cap;
        }

        // Float to int casts saturate, so huge surfaces still land on the cap.
        (raw as usize).min(cap)
    }
}
