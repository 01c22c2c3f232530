//! Collision detection between the player and obstacles
//!
//! Both bodies share one abstract axis-aligned hitbox on the road plane,
//! independent of whatever meshes the renderer draws.

use glam::Vec2;

use super::player::Player;
use super::spawner::Obstacle;

/// Check whether two hitbox centers overlap
///
/// Touching exactly at the half extent is not a hit.
#[inline]
pub fn overlaps(a: Vec2, b: Vec2, half_extents: Vec2) -> bool {
    let delta = (a - b).abs();
    delta.x < half_extents.x && delta.y < half_extents.y
}

/// Check a single obstacle against the player
#[inline]
pub fn collides(player: &Player, obstacle: &Obstacle, half_extents: Vec2) -> bool {
    overlaps(player.pos(), obstacle.pos(), half_extents)
}

/// Check every obstacle, stopping at the first hit
pub fn any_collision(player: &Player, obstacles: &[Obstacle], half_extents: Vec2) -> bool {
    obstacles
        .iter()
        .any(|obstacle| collides(player, obstacle, half_extents))
}

/// Check an obstacle against the player over the depth it covered this tick
///
/// The obstacle moved from `z - step` to `z`. It hits if the lanes overlap and
/// that depth range overlaps the player's hitbox depth, so a fast obstacle
/// cannot jump over the player between two ticks. With `step == 0` this is
/// the same test as [`collides`].
pub fn sweeps(player: &Player, obstacle: &Obstacle, step: f32, half_extents: Vec2) -> bool {
    let lateral = (player.x - obstacle.x).abs() < half_extents.x;
    let front = player.z - half_extents.y;
    let back = player.z + half_extents.y;
    lateral && obstacle.z > front && obstacle.z - step < back
}

/// Swept version of [`any_collision`], stopping at the first hit
pub fn any_swept_collision(
    player: &Player,
    obstacles: &[Obstacle],
    step: f32,
    half_extents: Vec2,
) -> bool {
    obstacles
        .iter()
        .any(|obstacle| sweeps(player, obstacle, step, half_extents))
}
