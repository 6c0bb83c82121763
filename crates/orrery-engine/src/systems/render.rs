use glam::Vec3;
use crate::components::mesh::Color;
use crate::core::scene::Scene;
use crate::renderer::instance::{LineVertex, MeshInstance, RenderBuffer};

fn line_vertex(p: Vec3, color: Color) -> LineVertex {
    LineVertex { x: p.x, y: p.y, z: p.z, r: color.r, g: color.g, b: color.b }
}

/// Build the render buffer from every visible node in the scene.
/// Mesh nodes become world-space instances; line nodes become segment pairs.
pub fn build_render_buffer(scene: &Scene, buffer: &mut RenderBuffer) {
    buffer.clear();
    let mut dropped = 0usize;

    for node in scene.iter() {
        if node.mesh.is_none() && node.line.is_none() {
            continue;
        }
        if !scene.is_visible(node.id) {
            continue;
        }
        let Some(world) = scene.world_transform(node.id) else { continue };

        if let Some(mesh) = &node.mesh {
            let (_, rotation, translation) = world.to_scale_rotation_translation();
            let (shape, shape_a, shape_b) = mesh.geometry.encode();
            let m = &mesh.material;
            let instance = MeshInstance {
                node: node.id.0 as f32,
                x: translation.x,
                y: translation.y,
                z: translation.z,
                qx: rotation.x,
                qy: rotation.y,
                qz: rotation.z,
                qw: rotation.w,
                shape,
                shape_a,
                shape_b,
                r: m.color.r,
                g: m.color.g,
                b: m.color.b,
                emissive_r: m.emissive.r,
                emissive_g: m.emissive.g,
                emissive_b: m.emissive.b,
                emissive_intensity: m.emissive_intensity,
                texture: m.texture.map_or(-1.0, |t| t.0 as f32),
                _pad: 0.0,
            };
            if !buffer.push_instance(instance) {
                dropped += 1;
            }
        }

        if let Some(line) = &node.line {
            let points: Vec<Vec3> = line.points.iter().map(|p| world.transform_point3(*p)).collect();
            let mut pairs: Vec<(Vec3, Vec3)> = points.windows(2).map(|w| (w[0], w[1])).collect();
            if line.closed && points.len() > 1 {
                pairs.push((points[points.len() - 1], points[0]));
            }
            for (a, b) in pairs {
                if !buffer.push_segment(line_vertex(a, line.color), line_vertex(b, line.color)) {
                    dropped += 1;
                }
            }
        }
    }

    if dropped > 0 {
        log::warn!("render buffer full: dropped {} items", dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::NodeId;
    use crate::components::mesh::{Geometry, LineComponent, Material, MeshComponent, TextureId};
    use crate::components::node::Node;

    #[test]
    fn mesh_child_is_emitted_in_world_space() {
        let mut scene = Scene::new();
        scene.spawn(Node::new(NodeId(1)).with_position(Vec3::new(250.0, 0.0, 0.0)));
        scene
            .attach(
                Node::new(NodeId(2))
                    .with_position(Vec3::new(0.0, 0.0, 60.0))
                    .with_mesh(MeshComponent::new(
                        Geometry::sphere(6.0),
                        Material::new(Color::from_hex(0x888888)).with_texture(Some(TextureId(2))),
                    )),
                Some(NodeId(1)),
            )
            .unwrap();

        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &mut buf);
        assert_eq!(buf.instance_count(), 1);
        let inst = buf.instances()[0];
        assert_eq!((inst.x, inst.y, inst.z), (250.0, 0.0, 60.0));
        assert_eq!(inst.node, 2.0);
        assert_eq!(inst.shape_a, 6.0);
        assert_eq!(inst.texture, 2.0);
    }

    #[test]
    fn closed_line_emits_wraparound_segment() {
        let mut scene = Scene::new();
        let pts = vec![Vec3::ZERO, Vec3::X, Vec3::Z];
        scene.spawn(Node::new(NodeId(1)).with_line(LineComponent::closed(pts, Color::WHITE)));
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &mut buf);
        assert_eq!(buf.line_vertex_count(), 6);
        let last = buf.line_vertices()[5];
        assert_eq!((last.x, last.y, last.z), (0.0, 0.0, 0.0));
    }

    #[test]
    fn hidden_nodes_are_skipped() {
        let mut scene = Scene::new();
        scene.spawn(
            Node::new(NodeId(1))
                .with_mesh(MeshComponent::new(Geometry::sphere(1.0), Material::default()))
                .hidden(),
        );
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &mut buf);
        assert_eq!(buf.instance_count(), 0);
    }
}
