use bytemuck::{Pod, Zeroable};

/// Per-mesh render data read by the host each frame.
/// 20 floats = 80 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// Node id, so the host can keep one three.js mesh per node.
    pub node: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    /// Geometry kind (0 = sphere, 1 = cylinder) and its two parameters.
    pub shape: f32,
    pub shape_a: f32,
    pub shape_b: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub emissive_r: f32,
    pub emissive_g: f32,
    pub emissive_b: f32,
    pub emissive_intensity: f32,
    /// Texture index, or -1 for untextured.
    pub texture: f32,
    pub _pad: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One end of a line segment in world space.
/// 6 floats = 24 bytes per vertex; vertices come in segment pairs.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LineVertex {
    pub const FLOATS: usize = 6;
}

/// Buffer of mesh instances and line vertices rebuilt every frame.
pub struct RenderBuffer {
    instances: Vec<MeshInstance>,
    line_vertices: Vec<LineVertex>,
    max_instances: usize,
    max_line_vertices: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(128, 4096)
    }

    pub fn with_capacity(max_instances: usize, max_line_vertices: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            line_vertices: Vec::with_capacity(max_line_vertices),
            max_instances,
            max_line_vertices,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.line_vertices.clear();
    }

    /// Push a mesh instance. Returns false (and drops it) when full.
    pub fn push_instance(&mut self, instance: MeshInstance) -> bool {
        if self.instances.len() >= self.max_instances {
            return false;
        }
        self.instances.push(instance);
        true
    }

    /// Push one segment. Returns false (and drops it) when full.
    pub fn push_segment(&mut self, from: LineVertex, to: LineVertex) -> bool {
        if self.line_vertices.len() + 2 > self.max_line_vertices {
            return false;
        }
        self.line_vertices.push(from);
        self.line_vertices.push(to);
        true
    }

    pub fn instances(&self) -> &[MeshInstance] {
        &self.instances
    }

    pub fn line_vertices(&self) -> &[LineVertex] {
        &self.line_vertices
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.line_vertices.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn line_vertices_ptr(&self) -> *const f32 {
        self.line_vertices.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
