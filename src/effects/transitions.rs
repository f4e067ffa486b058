use crate::{
    eval::evaluator::ResolvedState,
    foundation::math::deg_to_rad,
    scene::object::SceneObject,
    scene::property::{Property, PropertyValue},
    scene::transition::TransitionEffect,
};

/// Which clip edge a transition is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Measured forward from clip start.
    Intro,
    /// Measured backward from clip end.
    Outro,
}

/// Eased progress of `effect` at `local_time`, or `None` outside its window.
///
/// Intro windows are `[delay, delay + duration)`; outro windows are
/// `[clip - duration - delay, clip - delay)`.
pub fn window_progress(
    effect: &TransitionEffect,
    phase: TransitionPhase,
    local_time: f64,
    clip_duration: f64,
) -> Option<f64> {
    if !effect.is_active() {
        return None;
    }
    let start = match phase {
        TransitionPhase::Intro => effect.delay,
        TransitionPhase::Outro => clip_duration - effect.duration - effect.delay,
    };
    let elapsed = local_time - start;
    (0.0..effect.duration)
        .contains(&elapsed)
        .then(|| effect.easing.apply(elapsed / effect.duration))
}

/// Overlay `effect` at eased progress `eased`.
///
/// `weight` is how far the state is pushed toward the effect's far end: `1 - eased` for an
/// intro, `eased` for an outro.
fn overlay(state: &mut ResolvedState, effect: &TransitionEffect, weight: f64) {
    state.position += effect.position * weight;
    state.rotation += deg_to_rad(effect.rotation) * weight;
    state.scale *= weight * effect.scale + (1.0 - weight);
    if effect.fade
        && let Some(PropertyValue::Scalar(opacity)) = state.values.get_mut(&Property::Opacity)
    {
        *opacity *= 1.0 - weight;
    }
}

/// Apply the intro overlay if `local_time` is inside its window.
pub fn apply_intro(state: &mut ResolvedState, effect: &TransitionEffect, local_time: f64) {
    if let Some(eased) = window_progress(effect, TransitionPhase::Intro, local_time, 0.0) {
        overlay(state, effect, 1.0 - eased);
    }
}

/// Apply the outro overlay if `local_time` is inside its window.
pub fn apply_outro(
    state: &mut ResolvedState,
    effect: &TransitionEffect,
    local_time: f64,
    clip_duration: f64,
) {
    if let Some(eased) = window_progress(effect, TransitionPhase::Outro, local_time, clip_duration)
    {
        overlay(state, effect, eased);
    }
}

/// Apply `object`'s intro, then its outro, on top of the resolved state.
pub fn apply_transitions(state: &mut ResolvedState, object: &SceneObject, local_time: f64) {
    apply_intro(state, &object.intro, local_time);
    apply_outro(state, &object.outro, local_time, object.duration);
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
