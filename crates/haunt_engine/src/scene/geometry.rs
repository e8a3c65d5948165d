//! Parameterized primitive shapes
//!
//! Geometry is described, not tessellated; the rendering backend builds the
//! vertex data. Counts below follow the usual UV-sphere and grid layouts so
//! headless backends can report realistic figures.

use std::rc::Rc;

/// Shape descriptor for a mesh node
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Flat rectangle in the XY plane
    Plane {
        /// Extent along X
        width: f32,
        /// Extent along Y
        height: f32,
        /// Subdivisions along X
        width_segments: u32,
        /// Subdivisions along Y
        height_segments: u32,
    },
    /// Axis-aligned box centered on the origin
    Cuboid {
        /// Extent along X
        width: f32,
        /// Extent along Y
        height: f32,
        /// Extent along Z
        depth: f32,
    },
    /// Cone around the Y axis, base at `-height / 2`
    Cone {
        /// Base radius
        radius: f32,
        /// Height along Y
        height: f32,
        /// Sides around the axis
        radial_segments: u32,
    },
    /// UV sphere
    Sphere {
        /// Radius
        radius: f32,
        /// Segments around the equator
        width_segments: u32,
        /// Segments from pole to pole
        height_segments: u32,
    },
    /// Unit sky box rendered from the inside with an atmospheric shader
    SkyDome,
}

/// Geometry shared between nodes
pub type GeometryHandle = Rc<Geometry>;

impl Geometry {
    /// Plane of one segment
    pub fn plane(width: f32, height: f32) -> Self {
        Self::subdivided_plane(width, height, 1, 1)
    }

    /// Plane subdivided into a grid, for displacement
    pub fn subdivided_plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Plane {
            width,
            height,
            width_segments: width_segments.max(1),
            height_segments: height_segments.max(1),
        }
    }

    /// Box with the given extents
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Cuboid { width, height, depth }
    }

    /// Cone with at least three sides
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Self::Cone {
            radius,
            height,
            radial_segments: radial_segments.max(3),
        }
    }

    /// UV sphere
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    /// Number of triangles a backend would emit
    pub fn triangle_count(&self) -> u32 {
        match *self {
            Self::Plane { width_segments, height_segments, .. } => 2 * width_segments * height_segments,
            Self::Cuboid { .. } | Self::SkyDome => 12,
            // Sides plus base fan
            Self::Cone { radial_segments, .. } => 2 * radial_segments,
            // Pole rows are single triangles
            Self::Sphere { width_segments, height_segments, .. } => {
                2 * width_segments * (height_segments - 1)
            }
        }
    }

    /// Number of vertices a backend would emit
    pub fn vertex_count(&self) -> u32 {
        match *self {
            Self::Plane { width_segments, height_segments, .. } => {
                (width_segments + 1) * (height_segments + 1)
            }
            Self::Cuboid { .. } | Self::SkyDome => 24,
            Self::Cone { radial_segments, .. } => 2 * (radial_segments + 1) + radial_segments + 1,
            Self::Sphere { width_segments, height_segments, .. } => {
                (width_segments + 1) * (height_segments + 1)
            }
        }
    }
}
