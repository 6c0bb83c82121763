pub mod lighting;
pub mod pick;
pub mod render;
