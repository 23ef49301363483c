//! Engine-free physics: body storage, gravity, collisions and seeding.

pub mod cloud;
pub mod collision;
pub mod gravity;
pub mod store;

pub use cloud::{CloudSpec, spawn_cloud};
pub use collision::{CollisionParams, MergeOutcome, UnionFind, resolve_collisions};
pub use gravity::{GravityParams, integrate};
pub use store::BodyStore;
