//! Demo geometry: unit cubes, a first-person camera and the projection that
//! turns cube faces into screen-space quads.

mod camera;
mod cube;
mod projection;

pub use camera::{FlyCamera, Movement};
pub use cube::{Cube, CUBE_FACES, CUBE_VERTICES};
pub use projection::{paint_faces, perspective, project_face, ProjectedFace};
