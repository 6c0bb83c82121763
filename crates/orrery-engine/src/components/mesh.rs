use glam::Vec3;

/// Handle to a texture the host has fetched (index into the manifest's texture list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Mesh geometry primitive. Shapes are centered on the node origin;
/// cylinders stand along the local Y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere { radius: f32 },
    Cylinder { radius: f32, height: f32 },
}

impl Geometry {
    pub const SPHERE_KIND: f32 = 0.0;
    pub const CYLINDER_KIND: f32 = 1.0;

    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    pub fn cylinder(radius: f32, height: f32) -> Self {
        Self::Cylinder { radius, height }
    }

    /// Radius of the smallest sphere around the node origin enclosing the shape.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Geometry::Sphere { radius } => radius,
            Geometry::Cylinder { radius, height } => (radius * radius + height * height / 4.0).sqrt(),
        }
    }

    /// Wire encoding: (kind, a, b).
    pub fn encode(&self) -> (f32, f32, f32) {
        match *self {
            Geometry::Sphere { radius } => (Self::SPHERE_KIND, radius, 0.0),
            Geometry::Cylinder { radius, height } => (Self::CYLINDER_KIND, radius, height),
        }
    }
}

/// Surface description for a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    /// Emissive color; black means the surface is only lit.
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub texture: Option<TextureId>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            emissive: Color::new(0.0, 0.0, 0.0),
            emissive_intensity: 0.0,
            texture: None,
        }
    }
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }
}

/// Component for mesh nodes: geometry plus material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub geometry: Geometry,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }
}

/// Component for polyline nodes (orbits, rays, tick marks).
/// Points are in the node's local space.
#[derive(Debug, Clone, PartialEq)]
pub struct LineComponent {
    pub points: Vec<Vec3>,
    pub color: Color,
    /// Connect the last point back to the first.
    pub closed: bool,
}

impl LineComponent {
    pub fn open(points: Vec<Vec3>, color: Color) -> Self {
        Self { points, color, closed: false }
    }

    pub fn closed(points: Vec<Vec3>, color: Color) -> Self {
        Self { points, color, closed: true }
    }

    /// A single straight segment.
    pub fn segment(from: Vec3, to: Vec3, color: Color) -> Self {
        Self::open(vec![from, to], color)
    }

    /// Number of line segments this component draws.
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }
}
