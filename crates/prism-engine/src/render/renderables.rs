use glam::{Mat4, Vec3, Vec4};

/// RGBA color, linear 0..1.
pub type Color = Vec4;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Line {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
}

/// Axis gizmo at `transform`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tripod {
    pub transform: Mat4,
    pub size: f32,
}

impl Default for Tripod {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            size: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cube {
    pub transform: Mat4,
    pub size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub transform: Mat4,
    pub radius: f32,
    pub color: Color,
}

/// Indexed triangle mesh in model space.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub transform: Mat4,
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub scale: f32,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            positions: Vec::new(),
            indices: Vec::new(),
            scale: 1.0,
        }
    }
}

/// What the frame producer hands to the renderer for one frame.
///
/// The renderer accepts it but only draws its fixed triangle; the lists are
/// not translated into draw calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Renderables {
    pub lines: Vec<Line>,
    pub tripods: Vec<Tripod>,
    pub cubes: Vec<Cube>,
    pub spheres: Vec<Sphere>,
    pub meshes: Vec<Mesh>,
}

impl Renderables {
    /// Total number of items across all lists.
    pub fn len(&self) -> usize {
        self.lines.len()
            + self.tripods.len()
            + self.cubes.len()
            + self.spheres.len()
            + self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(Renderables::default().is_empty());
    }

    #[test]
    fn len_counts_every_list() {
        let r = Renderables {
            lines: vec![Line {
                from: Vec3::ZERO,
                to: Vec3::X,
                color: Vec4::ONE,
            }],
            tripods: vec![Tripod::default(), Tripod::default()],
            meshes: vec![Mesh::default()],
            ..Default::default()
        };
        assert_eq!(r.len(), 4);
        assert!(!r.is_empty());
    }
}
