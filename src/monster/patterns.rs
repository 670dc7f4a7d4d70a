use std::f64::consts::TAU;

use rand::{Rng, RngCore};

use super::{Monster, MovementPattern, PatternCtx};
use crate::physics::{ContactFace, Overlap};

fn normalize(dx: f64, dy: f64) -> (f64, f64) {
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 { (0.0, 0.0) } else { (dx / len, dy / len) }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn random_direction(rng: &mut dyn RngCore) -> (f64, f64) {
    let angle = rng.gen_range(0.0..TAU);
    (angle.cos(), angle.sin())
}

pub(super) fn horizontal_patrol(
    m: &mut Monster,
    pattern: &MovementPattern,
    speed: f64,
    ctx: &PatternCtx<'_>,
    _rng: &mut dyn RngCore,
) {
    let MovementPattern::HorizontalPatrol { distance, falls_after_cycles } = *pattern else {
        return;
    };

    let was_falling = m.ai.falling;
    let left = m.ai.origin.0;
    let right = (left + distance - m.width).max(left);
    m.x += m.vx;

    if m.x <= left && m.vx <= 0.0 {
        m.x = left;
        m.vx = speed;
        if !m.ai.falling {
            m.ai.patrol_cycles += 1;
            if falls_after_cycles.is_some_and(|n| m.ai.patrol_cycles >= n) {
                m.ai.falling = true;
                m.vy = 0.0;
            }
        }
    } else if m.x >= right && m.vx > 0.0 {
        m.x = right;
        m.vx = -speed;
    } else {
        m.vx = if m.vx > 0.0 { speed } else { -speed };
    }

    // keeps patrolling sideways while it drops
    if was_falling {
        m.vy = (m.vy + ctx.physics.monster_gravity).min(ctx.physics.monster_max_fall_speed);
        m.y += m.vy;
        let floor = ctx.bounds.1 - m.height;
        if m.y >= floor {
            m.y = floor;
            m.vy = 0.0;
        }
    }
}

pub(super) fn vertical_bounce(
    m: &mut Monster,
    pattern: &MovementPattern,
    speed: f64,
    _ctx: &PatternCtx<'_>,
    _rng: &mut dyn RngCore,
) {
    let MovementPattern::VerticalBounce { distance } = *pattern else {
        return;
    };
    if m.vy == 0.0 {
        m.vy = speed;
    }
    let top = m.ai.origin.1;
    let bottom = (top + distance - m.height).max(top);
    m.y += m.vy;

    if m.y <= top && m.vy < 0.0 {
        m.y = top;
        m.vy = speed;
    } else if m.y >= bottom && m.vy > 0.0 {
        m.y = bottom;
        m.vy = -speed;
    } else {
        m.vy = if m.vy > 0.0 { speed } else { -speed };
    }
}

pub(super) fn circular(
    m: &mut Monster,
    pattern: &MovementPattern,
    speed: f64,
    _ctx: &PatternCtx<'_>,
    _rng: &mut dyn RngCore,
) {
    let MovementPattern::Circular { radius, frequency } = *pattern else {
        return;
    };
    let angle = m.ai.time_alive_ms * frequency + m.ai.phase_offset;
    m.x = m.ai.origin.0 + angle.cos() * radius;
    m.y = m.ai.origin.1 + angle.sin() * radius;
    m.vx = -angle.sin() * radius * frequency * speed;
    m.vy = angle.cos() * radius * frequency * speed;
}

pub(super) fn sine_wave(
    m: &mut Monster,
    pattern: &MovementPattern,
    speed: f64,
    ctx: &PatternCtx<'_>,
    _rng: &mut dyn RngCore,
) {
    let MovementPattern::SineWave { amplitude, frequency } = *pattern else {
        return;
    };
    let phase = m.ai.time_alive_ms * frequency + m.ai.phase_offset;
    m.x += speed * m.ai.direction.0;
    m.y = m.ai.origin.1 + phase.sin() * amplitude;

    let dir = m.ai.direction.0;
    if (m.x <= 0.0 && dir < 0.0) || (m.x >= ctx.bounds.0 - m.width && dir > 0.0) {
        m.ai.direction.0 = -dir;
    }
    m.vx = speed * m.ai.direction.0;
    m.vy = phase.cos() * amplitude * frequency;
}

pub(super) fn follow_player(
    m: &mut Monster,
    pattern: &MovementPattern,
    speed: f64,
    ctx: &PatternCtx<'_>,
    _rng: &mut dyn RngCore,
) {
    let MovementPattern::FollowPlayer { detection_range } = *pattern else {
        return;
    };
    let d = distance(m.rect().center(), ctx.player.center());
    if d > 5.0 && d < detection_range {
        let (dx, dy) = normalize(ctx.player.x - m.x, ctx.player.y - m.y);
        m.vx = dx * speed;
        m.vy = dy * speed;
        m.x += m.vx;
        m.y += m.vy;
        m.ai.is_chasing = true;
    } else {
        m.ai.is_chasing = false;
        m.vx *= 0.9;
        m.vy *= 0.9;
    }
}

pub(super) fn random_walk(
    m: &mut Monster,
    pattern: &MovementPattern,
    speed: f64,
    ctx: &PatternCtx<'_>,
    rng: &mut dyn RngCore,
) {
    let MovementPattern::RandomWalk { turn_delay_ms, bounce_platforms } = *pattern else {
        return;
    };
    let (width, height) = ctx.bounds;
    let at_edge = m.x <= 0.0 || m.x >= width - m.width || m.y <= 0.0 || m.y >= height - m.height;
    if m.ai.time_alive_ms - m.ai.last_direction_change_ms > turn_delay_ms || at_edge {
        m.ai.direction = random_direction(rng);
        m.ai.last_direction_change_ms = m.ai.time_alive_ms;
    }

    m.vx = m.ai.direction.0 * speed;
    m.vy = m.ai.direction.1 * speed;
    m.x += m.vx;
    m.y += m.vy;

    if !bounce_platforms {
        return;
    }
    for plat in ctx.platforms {
        let body = m.rect();
        if !body.intersects(plat) {
            continue;
        }
        let dir = &mut m.ai.direction;
        match Overlap::between(&body, plat).min_face() {
            ContactFace::Left => {
                m.x = plat.x - m.width;
                m.vx = -m.vx.abs();
                dir.0 = -dir.0.abs();
            }
            ContactFace::Right => {
                m.x = plat.right();
                m.vx = m.vx.abs();
                dir.0 = dir.0.abs();
            }
            ContactFace::Top => {
                m.y = plat.y - m.height;
                m.vy = -m.vy.abs();
                dir.1 = -dir.1.abs();
            }
            ContactFace::Bottom => {
                m.y = plat.bottom();
                m.vy = m.vy.abs();
                dir.1 = dir.1.abs();
            }
        }
    }
}

pub(super) fn figure_eight(
    m: &mut Monster,
    pattern: &MovementPattern,
    speed: f64,
    _ctx: &PatternCtx<'_>,
    _rng: &mut dyn RngCore,
) {
    let MovementPattern::FigureEight { size, frequency } = *pattern else {
        return;
    };
    let t = m.ai.time_alive_ms * frequency + m.ai.phase_offset;
    m.x = m.ai.origin.0 + size * t.sin();
    m.y = m.ai.origin.1 + size * t.sin() * t.cos();
    m.vx = size * t.cos() * frequency * speed;
    m.vy = size * (t.cos() * t.cos() - t.sin() * t.sin()) * frequency * speed;
}

pub(super) fn guard_area(
    m: &mut Monster,
    pattern: &MovementPattern,
    speed: f64,
    ctx: &PatternCtx<'_>,
    rng: &mut dyn RngCore,
) {
    let MovementPattern::GuardArea { patrol_size, detection_range } = *pattern else {
        return;
    };
    let here = (m.x, m.y);
    if distance(here, (ctx.player.x, ctx.player.y)) < detection_range {
        let (dx, dy) = normalize(ctx.player.x - m.x, ctx.player.y - m.y);
        m.vx = dx * speed * 1.5;
        m.vy = dy * speed * 1.5;
        m.ai.is_chasing = true;
    } else {
        m.ai.is_chasing = false;
        let center = m.ai.origin;
        if distance(here, center) > patrol_size {
            let (dx, dy) = normalize(center.0 - m.x, center.1 - m.y);
            m.vx = dx * speed;
            m.vy = dy * speed;
        } else {
            if rng.gen_bool(0.02) {
                m.ai.direction = random_direction(rng);
            }
            m.vx = m.ai.direction.0 * speed * 0.5;
            m.vy = m.ai.direction.1 * speed * 0.5;
        }
    }
    m.x += m.vx;
    m.y += m.vy;
}
