//! Game-world entities. Each owns a [`Sprite`](sprite::Sprite) and draws
//! itself as one world-space quad.

pub mod bullet;
pub mod enemy;
pub mod player;
pub mod sprite;

pub use bullet::{Bullet, BulletMotion, BulletPool};
pub use enemy::Enemy;
pub use player::{Action, Player};
pub use sprite::{AtlasRect, Sprite, SpriteSheet};
