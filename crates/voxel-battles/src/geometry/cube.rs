use nalgebra::{Point3, Vector3};
use voxel_engine::paint::Color;

/// Corners of the unit cube at the origin.
pub const CUBE_VERTICES: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
];

/// Faces as indices into `CUBE_VERTICES`, counter-clockwise seen from outside.
pub const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 3, 6, 4], // -z
    [2, 5, 6, 3], // +y
    [7, 5, 2, 1], // +z
    [1, 0, 4, 7], // -y
    [7, 4, 6, 5], // +x
    [2, 3, 0, 1], // -x
];

/// Per-face brightness so adjacent faces read apart without lighting.
const FACE_SHADE: [f32; 6] = [0.80, 1.00, 0.90, 0.55, 0.70, 0.65];

/// An axis-aligned unit cube.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cube {
    /// Minimum corner.
    pub origin: Point3<f32>,
    pub color: Color,
}

impl Cube {
    pub fn new(x: f32, y: f32, z: f32, color: Color) -> Self {
        Self {
            origin: Point3::new(x, y, z),
            color,
        }
    }

    /// World-space corners and shaded colour of every face.
    pub fn faces(&self) -> impl Iterator<Item = ([Point3<f32>; 4], Color)> + '_ {
        CUBE_FACES.iter().zip(FACE_SHADE).map(move |(face, shade)| {
            let corners = face.map(|i| self.origin + Vector3::from(CUBE_VERTICES[i]));
            (corners, self.color.shaded(shade))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn outward_normal(corners: &[Point3<f32>; 4]) -> Vector3<f32> {
        (corners[1] - corners[0]).cross(&(corners[2] - corners[0]))
    }

    #[test]
    fn faces_wind_counter_clockwise_from_outside() {
        let cube = Cube::new(0.0, 0.0, 0.0, Color::RED);
        let centre = Point3::new(0.5, 0.5, 0.5);

        for (corners, _) in cube.faces() {
            let face_centre = corners.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / 4.0;
            let outward = face_centre - centre.coords;
            assert!(outward_normal(&corners).dot(&outward) > 0.0, "face {corners:?} winds inward");
        }
    }

    #[test]
    fn faces_are_planar_unit_squares() {
        let cube = Cube::new(2.0, 0.0, 2.0, Color::GREEN);
        for (corners, _) in cube.faces() {
            assert_relative_eq!(outward_normal(&corners).norm(), 1.0, epsilon = 1e-6);
            for i in 0..4 {
                let edge = corners[(i + 1) % 4] - corners[i];
                assert_relative_eq!(edge.norm(), 1.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn faces_are_offset_by_origin() {
        let cube = Cube::new(1.0, 0.0, 1.0, Color::BLUE);
        let (corners, color) = cube.faces().next().unwrap();
        assert_eq!(corners[0], Point3::new(1.0, 0.0, 1.0));
        assert_eq!(corners[2], Point3::new(2.0, 1.0, 1.0));
        assert_eq!(color, Color::BLUE.shaded(0.80));
    }
}
