use nalgebra::{Matrix4, Point3};
use voxel_engine::coords::{Vec2, Viewport};
use voxel_engine::draw::{Frame, Quad, ZIndex};
use voxel_engine::paint::Color;

pub const FOV_Y_DEG: f32 = 45.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 50.0;

/// Perspective projection fitted to `viewport`.
///
/// `None` while the viewport is collapsed (a minimized window): there is no
/// meaningful aspect ratio and nothing would be visible anyway.
pub fn perspective(viewport: Viewport) -> Option<Matrix4<f32>> {
    viewport
        .is_valid()
        .then(|| Matrix4::new_perspective(viewport.aspect(), FOV_Y_DEG.to_radians(), NEAR, FAR))
}

/// A face ready to paint: screen-space corners plus its distance from the eye.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectedFace {
    pub points: [Vec2; 4],
    pub depth: f32,
    pub color: Color,
}

/// Projects one quad to logical pixels.
///
/// Returns `None` when any corner is in front of the near plane, the face is
/// beyond the far plane, or it faces away from the camera. Faces wound
/// counter-clockwise from outside are front-facing.
pub fn project_face(
    view_proj: &Matrix4<f32>,
    viewport: Viewport,
    corners: &[Point3<f32>; 4],
) -> Option<([Vec2; 4], f32)> {
    let mut ndc = [Vec2::zero(); 4];
    let mut depth = 0.0;

    for (out, corner) in ndc.iter_mut().zip(corners) {
        let clip = view_proj * corner.to_homogeneous();
        // Eye-space distance along the view axis.
        if clip.w < NEAR {
            return None;
        }
        *out = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        depth += clip.w;
    }

    let depth = depth / 4.0;
    if depth > FAR || signed_area(&ndc) <= 0.0 {
        return None;
    }

    Some((ndc.map(|p| viewport.ndc_to_screen(p.x, p.y)), depth))
}

/// Shoelace area; positive for counter-clockwise points in a +Y-up space.
fn signed_area(points: &[Vec2; 4]) -> f32 {
    let mut twice = 0.0;
    for i in 0..points.len() {
        twice += points[i].perp_dot(points[(i + 1) % points.len()]);
    }
    twice * 0.5
}

/// Projects `faces`, sorts them far to near and records them into `frame`.
///
/// Returns the number of faces drawn.
pub fn paint_faces<I>(frame: &mut Frame<'_>, view_proj: &Matrix4<f32>, faces: I) -> usize
where
    I: IntoIterator<Item = ([Point3<f32>; 4], Color)>,
{
    let mut projected: Vec<ProjectedFace> = faces
        .into_iter()
        .filter_map(|(corners, color)| {
            project_face(view_proj, frame.viewport, &corners)
                .map(|(points, depth)| ProjectedFace { points, depth, color })
        })
        .collect();

    projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    for face in &projected {
        frame.list.quad(ZIndex::WORLD, Quad { points: face.points, color: face.color });
    }
    projected.len()
}
