pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{NodeId, GameEvent};
pub use components::node::Node;
pub use components::mesh::{Color, Geometry, LineComponent, Material, MeshComponent, TextureId};
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use renderer::camera::{PerspectiveCamera, CameraUniform};
pub use renderer::instance::{MeshInstance, LineVertex, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue, KEY_ESCAPE};
pub use assets::manifest::{AssetManifest, TextureDescriptor, ColorSpace};
pub use bridge::protocol::ProtocolLayout;
pub use systems::lighting::{PointLight, LightState, LightId};
pub use systems::pick::{Ray, Hit, intersect_subtree};
pub use systems::render::build_render_buffer;
