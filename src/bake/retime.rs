use crate::{
    animation::ease::Ease,
    scene::keyframe::{Keyframe, TIME_EPSILON},
};

/// Remap keyframe times through `easing` over `[0, T]`, with `T` the last keyframe's time.
///
/// `t' = easing(t / T) * T`. The endpoints stay fixed and a monotonic curve preserves order.
/// Keys squeezed onto the time of an earlier key are dropped.
pub fn retime(keys: &mut Vec<Keyframe>, easing: Ease) {
    let Some(total) = keys.last().map(|k| k.time) else {
        return;
    };
    if total <= 0.0 {
        return;
    }
    for key in keys.iter_mut() {
        key.time = easing.apply(key.time / total) * total;
    }
    dedup_times(keys);
}

/// Drop keys within [`TIME_EPSILON`] of the previous kept key. The last key always survives.
pub(crate) fn dedup_times(keys: &mut Vec<Keyframe>) {
    let Some(last) = keys.pop() else {
        return;
    };
    keys.dedup_by(|next, kept| (next.time - kept.time).abs() <= TIME_EPSILON);
    while keys
        .last()
        .is_some_and(|k| (last.time - k.time).abs() <= TIME_EPSILON)
    {
        keys.pop();
    }
    keys.push(last);
}

#[cfg(test)]
#[path = "../../tests/unit/bake/retime.rs"]
mod tests;
