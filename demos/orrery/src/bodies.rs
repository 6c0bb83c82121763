/// Celestial bodies: tags, geometry, and the registry that owns their nodes.
///
/// Sizes are in scene units and deliberately not to scale.

use std::collections::HashMap;
use glam::Vec3;
use orrery_engine::*;

// ── Tags ─────────────────────────────────────────────────────────────

/// Semantic identity of a pickable body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyTag {
    Sun,
    Earth,
    FlatEarth,
    Moon,
    Venus,
}

impl BodyTag {
    pub const ALL: [BodyTag; 5] = [
        BodyTag::Sun,
        BodyTag::Earth,
        BodyTag::FlatEarth,
        BodyTag::Moon,
        BodyTag::Venus,
    ];

    /// Node name, also used as the material and sidebar content key.
    pub fn name(self) -> &'static str {
        match self {
            BodyTag::Sun => "sun",
            BodyTag::Earth => "earth",
            BodyTag::FlatEarth => "flat_earth",
            BodyTag::Moon => "moon",
            BodyTag::Venus => "venus",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Wire value used in host events.
    pub fn code(self) -> f32 {
        match self {
            BodyTag::Sun => 1.0,
            BodyTag::Earth => 2.0,
            BodyTag::FlatEarth => 3.0,
            BodyTag::Moon => 4.0,
            BodyTag::Venus => 5.0,
        }
    }
}

// ── Geometry ─────────────────────────────────────────────────────────

pub const EARTH_RADIUS: f32 = 25.0;
pub const FLAT_EARTH_RADIUS: f32 = 50.0;
pub const FLAT_EARTH_HEIGHT: f32 = 10.0;
pub const SUN_RADIUS: f32 = 109.0;
pub const MOON_RADIUS_BIG: f32 = 15.0;
pub const MOON_RADIUS_SMALL: f32 = 6.0;
pub const VENUS_RADIUS: f32 = 12.0;

/// Moon offset inside the Earth system before the first frame.
pub const MOON_START: Vec3 = Vec3::new(60.0, 0.0, 0.0);

// Untextured fallbacks; the manifest replaces these with image maps.
const EARTH_COLOR: Color = Color::from_hex(0x3a6ea5);
const SUN_COLOR: Color = Color::from_hex(0xffcc33);
const SUN_EMISSIVE: Color = Color::from_hex(0xffd700);
const SUN_EMISSIVE_INTENSITY: f32 = 0.5;
const MOON_COLOR: Color = Color::from_hex(0xbbbbbb);
const VENUS_COLOR: Color = Color::from_hex(0xe3bb76);

pub fn moon_geometry(big: bool) -> Geometry {
    Geometry::sphere(if big { MOON_RADIUS_BIG } else { MOON_RADIUS_SMALL })
}

fn earth_mesh(flat: bool) -> MeshComponent {
    let geometry = if flat {
        Geometry::cylinder(FLAT_EARTH_RADIUS, FLAT_EARTH_HEIGHT)
    } else {
        Geometry::sphere(EARTH_RADIUS)
    };
    MeshComponent::new(geometry, Material::new(EARTH_COLOR))
}

fn sun_mesh() -> MeshComponent {
    MeshComponent::new(
        Geometry::sphere(SUN_RADIUS),
        Material::new(SUN_COLOR).with_emissive(SUN_EMISSIVE, SUN_EMISSIVE_INTENSITY),
    )
}

fn moon_mesh(big: bool) -> MeshComponent {
    MeshComponent::new(moon_geometry(big), Material::new(MOON_COLOR))
}

fn venus_mesh() -> MeshComponent {
    MeshComponent::new(Geometry::sphere(VENUS_RADIUS), Material::new(VENUS_COLOR))
}

// ── Registry ─────────────────────────────────────────────────────────

/// Which bodies to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodySetup {
    pub flat_earth: bool,
    pub big_moon: bool,
    pub venus: bool,
}

/// Owns the body nodes and the Earth-system group.
///
/// The Earth variant that is not shown is kept detached inside the registry,
/// so exactly one of `earth` / `flat_earth` is ever attached to the scene.
pub struct BodyRegistry {
    earth_system: NodeId,
    attached: HashMap<BodyTag, NodeId>,
    earth_variant: BodyTag,
    detached_earth: Option<Node>,
    big_moon: bool,
}

impl BodyRegistry {
    /// Create all body nodes and the Earth-system group.
    pub fn spawn(ctx: &mut EngineContext, setup: BodySetup) -> Self {
        let mut attached = HashMap::new();

        let sun = ctx.next_id();
        ctx.scene.spawn(Node::new(sun).with_name(BodyTag::Sun.name()).with_mesh(sun_mesh()));
        attached.insert(BodyTag::Sun, sun);

        let earth_system = ctx.next_id();
        ctx.scene.spawn(Node::new(earth_system).with_name("earth_system"));

        let (shown, hidden) = if setup.flat_earth {
            (BodyTag::FlatEarth, BodyTag::Earth)
        } else {
            (BodyTag::Earth, BodyTag::FlatEarth)
        };
        let earth = ctx.next_id();
        let earth_node = Node::new(earth)
            .with_name(shown.name())
            .with_mesh(earth_mesh(shown == BodyTag::FlatEarth));
        if ctx.scene.attach(earth_node, Some(earth_system)).is_ok() {
            attached.insert(shown, earth);
        }
        let detached_id = ctx.next_id();
        let detached_earth = Node::new(detached_id)
            .with_name(hidden.name())
            .with_mesh(earth_mesh(hidden == BodyTag::FlatEarth));

        let moon = ctx.next_id();
        let moon_node = Node::new(moon)
            .with_name(BodyTag::Moon.name())
            .with_position(MOON_START)
            .with_mesh(moon_mesh(setup.big_moon));
        if ctx.scene.attach(moon_node, Some(earth_system)).is_ok() {
            attached.insert(BodyTag::Moon, moon);
        }

        if setup.venus {
            let venus = ctx.next_id();
            ctx.scene.spawn(Node::new(venus).with_name(BodyTag::Venus.name()).with_mesh(venus_mesh()));
            attached.insert(BodyTag::Venus, venus);
        }

        log::info!(
            "bodies: {} attached, earth variant {}",
            attached.len(),
            shown.name()
        );

        Self {
            earth_system,
            attached,
            earth_variant: shown,
            detached_earth: Some(detached_earth),
            big_moon: setup.big_moon,
        }
    }

    /// Group node that carries the Earth variant, the Moon and the Moon's orbit.
    pub fn earth_system(&self) -> NodeId {
        self.earth_system
    }

    /// Tag of the Earth variant currently attached.
    pub fn earth_variant(&self) -> BodyTag {
        self.earth_variant
    }

    pub fn big_moon(&self) -> bool {
        self.big_moon
    }

    pub fn has_venus(&self) -> bool {
        self.attached.contains_key(&BodyTag::Venus)
    }

    /// Node of an attached body. The detached Earth variant is not found.
    pub fn get_by_tag(&self, tag: BodyTag) -> Option<NodeId> {
        self.attached.get(&tag).copied()
    }

    /// Reverse lookup used when resolving pick hits.
    pub fn tag_of(&self, node: NodeId) -> Option<BodyTag> {
        self.attached
            .iter()
            .find(|(_, id)| **id == node)
            .map(|(tag, _)| *tag)
    }

    /// The Earth node currently shown, whichever variant it is.
    pub fn earth(&self) -> Option<NodeId> {
        self.get_by_tag(self.earth_variant)
    }

    /// World position of an attached body.
    pub fn world_position(&self, scene: &Scene, tag: BodyTag) -> Option<Vec3> {
        scene.world_position(self.get_by_tag(tag)?)
    }

    /// Show the flat or the spherical Earth. The Earth-system group is not
    /// touched, so only the child changes.
    pub fn swap_earth_variant(&mut self, to_flat: bool, scene: &mut Scene) {
        let wanted = if to_flat { BodyTag::FlatEarth } else { BodyTag::Earth };
        if wanted == self.earth_variant {
            return;
        }
        let Some(mut incoming) = self.detached_earth.take() else {
            log::warn!("bodies: no detached earth variant to swap in");
            return;
        };
        if let Some(current) = self.attached.remove(&self.earth_variant) {
            self.detached_earth = scene.remove_child(Some(self.earth_system), current);
        }
        let id = incoming.id;
        incoming.visible = true;
        match scene.attach(incoming, Some(self.earth_system)) {
            Ok(()) => {
                self.attached.insert(wanted, id);
                self.earth_variant = wanted;
            }
            Err(node) => {
                log::warn!("bodies: earth system group missing, swap dropped");
                self.detached_earth = Some(node);
            }
        }
    }

    /// Change the Moon's size. Material, identity and position carry over.
    pub fn swap_moon_size(&mut self, big: bool, scene: &mut Scene) {
        self.big_moon = big;
        let Some(id) = self.get_by_tag(BodyTag::Moon) else { return };
        let Some(parent) = scene.get(id).map(|n| n.parent) else { return };
        let Some(mut moon) = scene.remove(id) else { return };
        let position = moon.position;
        if let Some(mesh) = moon.mesh.as_mut() {
            mesh.geometry = moon_geometry(big);
        }
        moon.position = position;
        if let Err(moon) = scene.attach(moon, parent) {
            scene.spawn(moon);
        }
    }

    /// Show or hide an attached body (overlays hide the real Moon).
    pub fn set_visible(&self, scene: &mut Scene, tag: BodyTag, visible: bool) {
        if let Some(node) = self.get_by_tag(tag).and_then(|id| scene.get_mut(id)) {
            node.visible = visible;
        }
    }

    /// Bind manifest textures to every body, attached or not.
    pub fn apply_manifest(&mut self, scene: &mut Scene, manifest: &AssetManifest) {
        let mut bound = 0;
        for (tag, id) in &self.attached {
            let texture = manifest.texture_for_material(tag.name());
            if let Some(mesh) = scene.get_mut(*id).and_then(|n| n.mesh.as_mut()) {
                mesh.material.texture = texture;
                bound += texture.is_some() as usize;
            }
        }
        if let Some(node) = self.detached_earth.as_mut() {
            let texture = manifest.texture_for_material(&node.name);
            if let Some(mesh) = node.mesh.as_mut() {
                mesh.material.texture = texture;
            }
        }
        log::info!("bodies: {} textures bound", bound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(flat: bool) -> (EngineContext, BodyRegistry) {
        let mut ctx = EngineContext::new();
        let registry = BodyRegistry::spawn(
            &mut ctx,
            BodySetup { flat_earth: flat, big_moon: true, venus: false },
        );
        (ctx, registry)
    }

    fn earth_children(ctx: &EngineContext, registry: &BodyRegistry) -> Vec<String> {
        ctx.scene
            .children(Some(registry.earth_system()))
            .filter(|n| n.name == "earth" || n.name == "flat_earth")
            .map(|n| n.name.clone())
            .collect()
    }

    #[test]
    fn tag_names_round_trip() {
        for tag in BodyTag::ALL {
            assert_eq!(BodyTag::from_name(tag.name()), Some(tag));
        }
        assert_eq!(BodyTag::from_name("orbit0"), None);
    }

    #[test]
    fn spawn_attaches_one_earth_variant() {
        let (ctx, registry) = setup(true);
        assert_eq!(earth_children(&ctx, &registry), vec!["flat_earth".to_string()]);
        assert!(registry.get_by_tag(BodyTag::Earth).is_none());
        assert!(registry.get_by_tag(BodyTag::Venus).is_none());
    }

    #[test]
    fn earth_swap_twice_is_identity() {
        let (mut ctx, mut registry) = setup(true);
        let group_pos = Vec3::new(250.0, 0.0, 0.0);
        ctx.scene.get_mut(registry.earth_system()).unwrap().position = group_pos;
        let original = registry.earth().unwrap();

        registry.swap_earth_variant(false, &mut ctx.scene);
        assert_eq!(registry.earth_variant(), BodyTag::Earth);
        assert_eq!(earth_children(&ctx, &registry), vec!["earth".to_string()]);
        assert_eq!(ctx.scene.get(registry.earth_system()).unwrap().position, group_pos);

        registry.swap_earth_variant(true, &mut ctx.scene);
        assert_eq!(registry.earth_variant(), BodyTag::FlatEarth);
        assert_eq!(registry.earth(), Some(original));
        assert_eq!(earth_children(&ctx, &registry), vec!["flat_earth".to_string()]);
    }

    #[test]
    fn earth_swap_to_same_variant_is_noop() {
        let (mut ctx, mut registry) = setup(false);
        let before = ctx.scene.len();
        registry.swap_earth_variant(false, &mut ctx.scene);
        assert_eq!(ctx.scene.len(), before);
        assert_eq!(registry.earth_variant(), BodyTag::Earth);
    }

    #[test]
    fn moon_swap_preserves_position_and_identity() {
        let (mut ctx, mut registry) = setup(false);
        let moon = registry.get_by_tag(BodyTag::Moon).unwrap();
        let pos = Vec3::new(-12.5, 0.0, 58.75);
        ctx.scene.get_mut(moon).unwrap().position = pos;

        registry.swap_moon_size(false, &mut ctx.scene);

        let node = ctx.scene.get(moon).unwrap();
        assert_eq!(node.position, pos);
        assert_eq!(node.parent, Some(registry.earth_system()));
        assert_eq!(node.mesh.unwrap().geometry, Geometry::sphere(MOON_RADIUS_SMALL));
        assert!(!registry.big_moon());
    }

    #[test]
    fn tag_of_resolves_attached_nodes() {
        let (ctx, registry) = setup(false);
        let sun = registry.get_by_tag(BodyTag::Sun).unwrap();
        assert_eq!(registry.tag_of(sun), Some(BodyTag::Sun));
        assert_eq!(registry.tag_of(registry.earth_system()), None);
        assert!(ctx.scene.contains(sun));
    }

    #[test]
    fn manifest_textures_follow_swaps() {
        let (mut ctx, mut registry) = setup(false);
        let manifest = AssetManifest::from_json(
            r#"{ "textures": [{ "name": "albedo", "path": "a.jpg" }],
                 "materials": { "earth": "albedo", "flat_earth": "albedo" } }"#,
        )
        .unwrap();
        registry.apply_manifest(&mut ctx.scene, &manifest);
        registry.swap_earth_variant(true, &mut ctx.scene);
        let earth = ctx.scene.get(registry.earth().unwrap()).unwrap();
        assert_eq!(earth.mesh.unwrap().material.texture, Some(TextureId(0)));
    }
}
