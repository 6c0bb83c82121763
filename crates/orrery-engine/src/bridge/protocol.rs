/// Frame buffer layout shared with the host.
/// Must stay in sync with the TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 12 floats]
/// [Camera: 36 floats]
/// [Instances: max_instances × 20 floats]
/// [Lines: max_line_vertices × 6 floats]
/// [Lights: max_lights × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::components::mesh::Color;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{LineVertex, MeshInstance};
use crate::systems::lighting::PointLight;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_LINE_VERTICES: usize = 4;
pub const HEADER_LINE_VERTEX_COUNT: usize = 5;
pub const HEADER_MAX_LIGHTS: usize = 6;
pub const HEADER_LIGHT_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_AMBIENT_PACKED: usize = 10;
pub const HEADER_RESERVED: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_line_vertices: usize,
    pub max_lights: usize,
    pub max_events: usize,

    /// Offset (in floats) where camera data begins.
    pub camera_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where line vertex data begins.
    pub line_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_line_vertices: usize, max_lights: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CameraUniform::FLOATS;
        let line_data_offset = instance_data_offset + max_instances * MeshInstance::FLOATS;
        let light_data_offset = line_data_offset + max_line_vertices * LineVertex::FLOATS;
        let event_data_offset = light_data_offset + max_lights * PointLight::FLOATS;
        let buffer_total_floats = event_data_offset + max_events * GameEvent::FLOATS;

        Self {
            max_instances,
            max_line_vertices,
            max_lights,
            max_events,
            camera_offset,
            instance_data_offset,
            line_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_line_vertices,
            config.max_lights,
            config.max_events,
        )
    }
}

/// Pack an ambient color into one float as `0xRRGGBB`.
pub fn pack_color(color: Color) -> f32 {
    let channel = |v: f32| ((v.clamp(0.0, 1.0) * 255.0).round() as u32) & 0xFF;
    ((channel(color.r) << 16) | (channel(color.g) << 8) | channel(color.b)) as f32
}

/// Per-frame counters written into the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCounts {
    pub frame: u64,
    pub instances: usize,
    pub line_vertices: usize,
    pub lights: usize,
    pub events: usize,
    pub ambient: f32,
}

impl ProtocolLayout {
    /// Fill a header slice for the current frame.
    pub fn write_header(&self, header: &mut [f32; HEADER_FLOATS], counts: FrameCounts) {
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        // f32 holds frame counts exactly up to 2^24; the host only checks for change.
        header[HEADER_FRAME_COUNTER] = (counts.frame % (1 << 24)) as f32;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = counts.instances.min(self.max_instances) as f32;
        header[HEADER_MAX_LINE_VERTICES] = self.max_line_vertices as f32;
        header[HEADER_LINE_VERTEX_COUNT] = counts.line_vertices.min(self.max_line_vertices) as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_LIGHT_COUNT] = counts.lights.min(self.max_lights) as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = counts.events.min(self.max_events) as f32;
        header[HEADER_AMBIENT_PACKED] = counts.ambient;
        header[HEADER_RESERVED] = 0.0;
    }
}
