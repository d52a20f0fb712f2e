use crate::engine::{Body, MapBounds, Obstacle};
use crate::geometry::{intersects_with, Aabb, EdgeRule};
use glam::Vec2;

/// Contact rule used by both the ground probe and collision resolution
pub const CONTACT_RULE: EdgeRule = EdgeRule::Exclusive;

/// How far below the body the ground probe looks
pub const GROUND_PROBE_DEPTH: f32 = 1.0;

/// What happened during a single physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// Index of the obstacle the body was snapped onto, if any
    pub landed_on: Option<usize>,
    /// The body left the map and was moved back to its spawn point
    pub respawned: bool,
    /// Grounded state committed at the end of the step
    pub grounded: bool,
}

/// True if `rect` shifted down by [`GROUND_PROBE_DEPTH`] overlaps any obstacle
pub fn probe_ground(rect: &Aabb, obstacles: &[Obstacle]) -> bool {
    let probe = rect.translated(Vec2::new(0.0, GROUND_PROBE_DEPTH));
    obstacles
        .iter()
        .any(|obstacle| intersects_with(&probe, obstacle.rect(), CONTACT_RULE))
}

/// Index of the last obstacle in iteration order that overlaps `rect`.
///
/// Earlier overlapping obstacles are ignored, so with several simultaneous
/// contacts the body is resolved against whichever comes last in the list.
pub fn last_intersecting(rect: &Aabb, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .rposition(|obstacle| intersects_with(rect, obstacle.rect(), CONTACT_RULE))
}

/// Horizontal velocity for the current controls; pressing both directions cancels out
fn walk_velocity(body: &Body) -> f32 {
    let controls = body.controls;
    if controls.left == controls.right {
        0.0
    } else if controls.left {
        -body.constants().walk_speed
    } else {
        body.constants().walk_speed
    }
}

/// Advance the body by `dt` seconds against a static set of obstacles.
///
/// Movement is integrated on both axes at once and then corrected vertically
/// only: any overlap puts the body on top of the overlapping obstacle. The
/// test is discrete, so a fast body can pass through thin geometry.
pub fn step(body: &mut Body, obstacles: &[Obstacle], bounds: &MapBounds, dt: f32) -> StepOutcome {
    let constants = *body.constants();
    let mut velocity = body.velocity;

    let mut grounded = probe_ground(&body.rect, obstacles);

    velocity.x = walk_velocity(body);

    if !grounded {
        velocity.y += constants.gravity * dt;
    }

    if body.controls.jump && grounded {
        velocity.y = -constants.jump_velocity;
        grounded = false;
    }

    // Downward only; a jump may exceed the limit upward.
    if velocity.y > constants.max_downward_velocity {
        velocity.y = constants.max_downward_velocity;
    }

    let mut moved = body.rect.translated(velocity * dt);

    let landed_on = last_intersecting(&moved, obstacles);
    if let Some(index) = landed_on {
        let surface = obstacles[index].rect().top();
        moved.min.y = surface - body.rect.height();
        grounded = true;
        velocity.y = 0.0;
        log::debug!("landed on obstacle {} at y = {}", index, surface);
    }

    let respawned = !bounds.contains(&moved);
    if respawned {
        log::debug!(
            "left the map at ({}, {}), respawning",
            moved.left(),
            moved.top()
        );
        moved = moved.with_min(body.spawn_point());
        grounded = false;
    }

    body.rect = moved;
    body.velocity = velocity;
    body.is_on_ground = grounded;

    StepOutcome {
        landed_on,
        respawned,
        grounded,
    }
}
