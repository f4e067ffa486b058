use crate::{
    bake::world::{BodyId, RigidBodySimulator},
    foundation::math::normalize_or_none,
    scene::physics::ForceSettings,
};

/// A scene object registered with the simulator.
#[derive(Clone, Debug, PartialEq)]
pub struct BakeBody {
    /// Scene object identifier.
    pub object_id: String,
    /// Simulator handle.
    pub handle: BodyId,
    /// Moves under simulation.
    pub dynamic: bool,
    /// Force preset of the object, if any.
    pub force: Option<ForceSettings>,
}

/// Apply the one-shot directional and radial impulses at t=0.
///
/// Only dynamic bodies receive impulses; a radial preset on a body sitting at the origin has no
/// direction and is skipped.
pub fn apply_initial_impulses<S: RigidBodySimulator + ?Sized>(sim: &mut S, bodies: &[BakeBody]) {
    for body in bodies.iter().filter(|b| b.dynamic) {
        let Some(force) = body.force else { continue };
        if force.preset.is_source_relative() {
            continue;
        }
        let Some(position) = sim.position(body.handle) else {
            continue;
        };
        match force.preset.impulse_direction(position) {
            Some(dir) => sim.apply_impulse(body.handle, dir * force.strength),
            None => tracing::trace!(object = %body.object_id, "radial impulse at origin skipped"),
        }
    }
}

/// Apply the continuous source-relative forces for the next step.
///
/// Every body with a `pull-toward-source`/`push-from-source` preset acts on every other dynamic
/// body along the normalized source-to-target direction. Coincident bodies are skipped.
pub fn apply_source_forces<S: RigidBodySimulator + ?Sized>(sim: &mut S, bodies: &[BakeBody]) {
    use crate::scene::physics::ForcePreset::{PullTowardSource, PushFromSource};

    for source in bodies {
        let Some(force) = source.force else { continue };
        let sign = match force.preset {
            PullTowardSource => -1.0,
            PushFromSource => 1.0,
            _ => continue,
        };
        let Some(origin) = sim.position(source.handle) else {
            continue;
        };
        for target in bodies
            .iter()
            .filter(|b| b.dynamic && b.handle != source.handle)
        {
            let Some(position) = sim.position(target.handle) else {
                continue;
            };
            match normalize_or_none(position - origin) {
                Some(dir) => sim.apply_force(target.handle, dir * (sign * force.strength)),
                None => tracing::trace!(
                    source = %source.object_id,
                    target = %target.object_id,
                    "coincident bodies, source force skipped"
                ),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bake/forces.rs"]
mod tests;
