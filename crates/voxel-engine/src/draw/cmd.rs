use crate::coords::Vec2;
use crate::paint::Color;

/// Filled triangle in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub points: [Vec2; 3],
    pub color: Color,
}

/// Filled convex quad in logical pixels, points in winding order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub points: [Vec2; 4],
    pub color: Color,
}

impl Quad {
    /// Axis-aligned rectangle.
    pub fn rect(origin: Vec2, size: Vec2, color: Color) -> Self {
        let Vec2 { x, y } = origin;
        Self {
            points: [
                Vec2::new(x, y),
                Vec2::new(x + size.x, y),
                Vec2::new(x + size.x, y + size.y),
                Vec2::new(x, y + size.y),
            ],
            color,
        }
    }

    /// Splits into two triangles sharing the 0–2 diagonal.
    pub fn triangles(&self) -> [Triangle; 2] {
        let [a, b, c, d] = self.points;
        [
            Triangle { points: [a, b, c], color: self.color },
            Triangle { points: [a, c, d], color: self.color },
        ]
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DrawCmd {
    Triangle(Triangle),
    Quad(Quad),
}

impl DrawCmd {
    /// Number of triangles this command tessellates into.
    pub fn triangle_count(&self) -> usize {
        match self {
            DrawCmd::Triangle(_) => 1,
            DrawCmd::Quad(_) => 2,
        }
    }
}
