//! Player physics: input response, gravity, canvas clamp and platform
//! resolution for one fixed tick.

use crate::config::PhysicsConfig;
use crate::entities::{Platform, Player, Rect};
use crate::input::InputState;

/// Max gap between the player's feet and a platform top that still counts as
/// standing on it.
const SUPPORT_EPSILON: f64 = 0.5;

/// Edge-triggered outcomes of one physics step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhysicsEvents {
    /// First tick of contact with a canvas side or a platform side.
    pub hit_wall: bool,
    /// Left the ground moving upwards (the jump instant).
    pub just_left_ground: bool,
    /// Left the ground without jumping (walked off a ledge).
    pub fell: bool,
    pub just_landed: bool,
    pub on_ground: bool,
}

/// Which face of a platform a collision was resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactFace {
    Top,
    Bottom,
    Left,
    Right,
}

/// Overlap depths of `a` into `b` along each face of `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlap {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Overlap {
    pub fn between(a: &Rect, b: &Rect) -> Self {
        Self {
            left: a.right() - b.x,
            right: b.right() - a.x,
            top: a.bottom() - b.y,
            bottom: b.bottom() - a.y,
        }
    }

    /// Face with the smallest penetration. Ties prefer top, then bottom,
    /// then left.
    pub fn min_face(&self) -> ContactFace {
        let mut face = ContactFace::Top;
        let mut depth = self.top;
        for (f, d) in [
            (ContactFace::Bottom, self.bottom),
            (ContactFace::Left, self.left),
            (ContactFace::Right, self.right),
        ] {
            if d < depth {
                face = f;
                depth = d;
            }
        }
        face
    }
}

/// Stateful integrator. Holds the jump timer and the bits needed to turn
/// level signals (grounded, touching a wall) into edge events.
#[derive(Clone, Debug)]
pub struct Physics {
    config: PhysicsConfig,
    is_jumping: bool,
    jump_hold_ms: f64,
    touching_wall: bool,
}

impl Physics {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            is_jumping: false,
            jump_hold_ms: 0.0,
            touching_wall: false,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    /// Forget jump and wall tracking, e.g. after a respawn.
    pub fn reset(&mut self) {
        self.is_jumping = false;
        self.jump_hold_ms = 0.0;
        self.touching_wall = false;
    }

    pub fn step(
        &mut self,
        player: &mut Player,
        input: &InputState,
        platforms: &[Platform],
        bounds: (f64, f64),
        dt_ms: f64,
    ) -> PhysicsEvents {
        let cfg = &self.config;
        let was_on_ground = player.on_ground;

        let dir = input.horizontal();
        if dir != 0.0 {
            player.vx = dir * cfg.horizontal_speed;
        } else {
            player.vx *= cfg.friction;
            if player.vx.abs() < cfg.rest_epsilon {
                player.vx = 0.0;
            }
        }

        if input.jump && player.on_ground && !self.is_jumping {
            player.vy = -cfg.jump_force;
            player.on_ground = false;
            self.is_jumping = true;
            self.jump_hold_ms = 0.0;
        } else if input.jump
            && self.is_jumping
            && !player.on_ground
            && self.jump_hold_ms < cfg.max_jump_hold_ms
            && player.vy < 0.0
        {
            self.jump_hold_ms += dt_ms;
            let factor = (1.0 - self.jump_hold_ms / cfg.max_jump_hold_ms).max(cfg.min_jump_hold_factor);
            player.vy = player.vy.min(-cfg.jump_force * factor);
        } else if !input.jump && self.is_jumping && player.vy < 0.0 {
            player.vy *= cfg.jump_release_damping;
        }

        if input.float && !player.on_ground && player.vy > 0.0 {
            let sideways = if dir != 0.0 { 0.5 } else { 1.0 };
            player.vy *= cfg.float_factor * sideways;
        }
        if input.fast_fall && !player.on_ground {
            player.vy += cfg.gravity / 2.0;
        }

        if !player.on_ground {
            player.vy = (player.vy + cfg.gravity).min(cfg.max_fall_speed);
        }

        player.x += player.vx;
        player.y += player.vy;

        let (width, height) = bounds;
        let mut wall_contact = false;
        if player.x < 0.0 {
            player.x = 0.0;
            player.vx = 0.0;
            wall_contact = true;
        } else if player.x + player.width > width {
            player.x = width - player.width;
            player.vx = 0.0;
            wall_contact = true;
        }
        if player.y < 0.0 {
            player.y = 0.0;
            player.vy = 0.0;
        } else if player.y + player.height > height {
            player.y = height - player.height;
            player.vy = 0.0;
        }

        player.on_ground = false;
        for plat in platforms {
            if !player.rect().intersects(plat) {
                continue;
            }
            match Overlap::between(&player.rect(), plat).min_face() {
                ContactFace::Top if player.vy > 0.0 => {
                    player.y = plat.y - player.height;
                    player.vy = 0.0;
                    player.on_ground = true;
                }
                ContactFace::Bottom if player.vy < 0.0 => {
                    player.y = plat.bottom();
                    player.vy = 0.0;
                }
                ContactFace::Left if player.vx > 0.0 => {
                    player.x = plat.x - player.width;
                    player.vx = 0.0;
                    wall_contact = true;
                }
                ContactFace::Right if player.vx < 0.0 => {
                    player.x = plat.right();
                    player.vx = 0.0;
                    wall_contact = true;
                }
                _ => {}
            }
        }

        if !player.on_ground && player.vy >= 0.0 {
            if let Some(plat) = platforms.iter().find(|p| supports(player, p)) {
                player.y = plat.y - player.height;
                player.vy = 0.0;
                player.on_ground = true;
            } else if player.y >= height - player.height - cfg.ground_tolerance {
                player.on_ground = true;
            }
        }

        if player.on_ground {
            self.is_jumping = false;
            self.jump_hold_ms = 0.0;
        }

        let events = PhysicsEvents {
            hit_wall: wall_contact && !self.touching_wall,
            just_left_ground: was_on_ground && !player.on_ground && player.vy < 0.0,
            fell: was_on_ground && !player.on_ground && player.vy >= 0.0,
            just_landed: !was_on_ground && player.on_ground,
            on_ground: player.on_ground,
        };
        self.touching_wall = wall_contact;
        log::trace!(
            "physics: pos=({:.2},{:.2}) vel=({:.2},{:.2}) {:?}",
            player.x,
            player.y,
            player.vx,
            player.vy,
            events
        );
        events
    }
}

fn supports(player: &Player, plat: &Platform) -> bool {
    (player.y + player.height - plat.y).abs() <= SUPPORT_EPSILON
        && player.x < plat.right()
        && player.x + player.width > plat.x
}
