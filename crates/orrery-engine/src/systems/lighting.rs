/// Point and ambient lights for the 3D scene.
///
/// Lights are persistent and stay until explicitly removed.
/// Each frame the runner serializes them for the host's light rig.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::Color;

/// Handle returned by `LightState::add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(pub u32);

/// A point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, distance]`
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Falloff distance; 0 means no falloff.
    pub distance: f32,
}

impl PointLight {
    pub const FLOATS: usize = 8;

    pub fn new(pos: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            distance: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn set_position(&mut self, pos: Vec3) {
        self.x = pos.x;
        self.y = pos.y;
        self.z = pos.z;
    }
}

/// Manages active point lights and the ambient color.
pub struct LightState {
    lights: Vec<(LightId, PointLight)>,
    /// Flat copy handed to the host.
    packed: Vec<PointLight>,
    ambient: Color,
    next_id: u32,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            packed: Vec::new(),
            ambient: Color::new(0.0, 0.0, 0.0),
            next_id: 0,
        }
    }

    /// Add a point light to the scene.
    pub fn add(&mut self, light: PointLight) -> LightId {
        let id = LightId(self.next_id);
        self.next_id += 1;
        self.lights.push((id, light));
        id
    }

    pub fn get(&self, id: LightId) -> Option<&PointLight> {
        self.lights.iter().find(|(lid, _)| *lid == id).map(|(_, l)| l)
    }

    pub fn get_mut(&mut self, id: LightId) -> Option<&mut PointLight> {
        self.lights.iter_mut().find(|(lid, _)| *lid == id).map(|(_, l)| l)
    }

    pub fn remove(&mut self, id: LightId) -> Option<PointLight> {
        let idx = self.lights.iter().position(|(lid, _)| *lid == id)?;
        Some(self.lights.remove(idx).1)
    }

    /// Remove all point lights.
    pub fn clear(&mut self) {
        self.lights.clear();
    }

    /// Number of active point lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: Color) {
        self.ambient = color;
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    /// Refresh the flat wire copy, keeping at most `max` lights.
    pub fn pack(&mut self, max: usize) {
        self.packed.clear();
        self.packed.extend(self.lights.iter().take(max).map(|(_, l)| *l));
    }

    pub fn packed(&self) -> &[PointLight] {
        &self.packed
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_is_32_bytes() {
        assert_eq!(std::mem::size_of::<PointLight>(), PointLight::FLOATS * 4);
    }

    #[test]
    fn add_move_remove() {
        let mut state = LightState::new();
        let id = state.add(PointLight::new(Vec3::ZERO, Color::WHITE, 1.0));
        state.get_mut(id).unwrap().set_position(Vec3::new(250.0, 0.0, 0.0));
        assert_eq!(state.get(id).unwrap().position(), Vec3::new(250.0, 0.0, 0.0));
        assert!(state.remove(id).is_some());
        assert!(state.remove(id).is_none());
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn pack_respects_capacity() {
        let mut state = LightState::new();
        for _ in 0..3 {
            state.add(PointLight::new(Vec3::ZERO, Color::WHITE, 1.0));
        }
        state.pack(2);
        assert_eq!(state.packed().len(), 2);
    }
}
