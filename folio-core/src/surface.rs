use crate::Vector2D;

/// An opaque RGB triple; alpha is supplied per draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const VIOLET: Rgb = Rgb::new(139, 92, 246);
    pub const CYAN: Rgb = Rgb::new(6, 182, 212);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A 2D drawing target sized to the viewport
pub trait Surface {
    fn size(&self) -> (f64, f64);

    fn resize(&mut self, width: f64, height: f64);

    /// Wipe the whole surface to transparent.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Vector2D, radius: f64, color: Rgb, alpha: f64);

    fn stroke_line(&mut self, from: Vector2D, to: Vector2D, width: f64, color: Rgb, alpha: f64);
}

/// A single captured draw call
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vector2D,
        radius: f64,
        color: Rgb,
        alpha: f64,
    },
    Line {
        from: Vector2D,
        to: Vector2D,
        width: f64,
        color: Rgb,
        alpha: f64,
    },
}

/// Headless surface that records every draw call in order
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

#[cfg(feature = "std")]
impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Commands recorded since the most recent clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        match self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
        {
            Some(idx) => &self.commands[idx + 1..],
            None => &self.commands,
        }
    }
}

#[cfg(feature = "std")]
impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vector2D, radius: f64, color: Rgb, alpha: f64) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn stroke_line(&mut self, from: Vector2D, to: Vector2D, width: f64, color: Rgb, alpha: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
            alpha,
        });
    }
}
