use nalgebra::{Matrix4, Point3, Vector3};

/// Degrees of turn per pixel of pointer travel.
pub const LOOK_SENSITIVITY: f32 = 1.0 / 8.0;

/// Movement intent for one step, each axis in `[-1, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Movement {
    /// +1 forward (W), -1 back (S).
    pub forward: f32,
    /// +1 left (A), -1 right (D).
    pub strafe: f32,
    /// +1 up (Space), -1 down (Shift).
    pub vertical: f32,
}

impl Movement {
    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0 && self.vertical == 0.0
    }
}

/// First-person camera with yaw/pitch mouse look.
///
/// `position` is the translation applied to the world, so the eye sits at
/// `-position`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    /// Degrees, wrapped to `[0, 360)`.
    pub yaw: f32,
    /// Degrees, clamped to `[-90, 90]`.
    pub pitch: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl FlyCamera {
    /// Camera whose eye is at `eye`, looking down -Z.
    pub fn at_eye(eye: Point3<f32>) -> Self {
        Self {
            position: -eye.coords,
            ..Self::default()
        }
    }

    pub fn eye(&self) -> Point3<f32> {
        Point3::from(-self.position)
    }

    /// Turns by a pointer offset in pixels.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw = (self.yaw + dx * LOOK_SENSITIVITY).rem_euclid(360.0);
        self.pitch = (self.pitch + dy * LOOK_SENSITIVITY).clamp(-90.0, 90.0);
    }

    /// Moves `distance` world units along the yaw-relative axes of `movement`.
    pub fn step(&mut self, movement: Movement, distance: f32) {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        let Movement { forward, strafe, vertical } = movement;

        self.position.x += (-sin * forward + cos * strafe) * distance;
        self.position.z += (cos * forward + sin * strafe) * distance;
        self.position.y -= vertical * distance;
    }

    /// World to view: pitch, then yaw, then the world translation.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let pitch = Matrix4::from_axis_angle(&Vector3::x_axis(), self.pitch.to_radians());
        let yaw = Matrix4::from_axis_angle(&Vector3::y_axis(), self.yaw.to_radians());
        pitch * yaw * Matrix4::new_translation(&self.position)
    }
}
