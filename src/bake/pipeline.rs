use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use serde::Serialize;

use crate::{
    bake::forces::{BakeBody, apply_initial_impulses, apply_source_forces},
    bake::retime::{dedup_times, retime},
    bake::simplify::simplify_indices,
    bake::world::{BodyDesc, RigidBodySimulator, World},
    eval::evaluator::Evaluator,
    foundation::core::{Quat, TimeRange, Vec3},
    foundation::error::{SceneError, SceneResult},
    foundation::math::quat_to_euler_deg,
    scene::keyframe::{Keyframe, TIME_EPSILON},
    scene::model::Scene,
    scene::physics::{BodyType, SimulationSettings},
    scene::property::Property,
};

/// Smallest collider half extent; keeps zero-scale objects collidable.
const MIN_HALF_EXTENT: f64 = 1e-3;

/// Shared flag that stops a running bake between simulation steps.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Return `true` once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress of a [`BakeSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BakeStage {
    /// Not started, or reset after cancellation.
    Idle,
    /// Bodies registered and stepping.
    Simulating,
    /// Turning raw samples into keyframes.
    Recording,
    /// Dropping samples within tolerance.
    Simplifying,
    /// Remapping keyframe times.
    Retiming,
    /// Keyframes spliced into the scene.
    Merged,
}

/// Baked keyframes of one object, in simulation-local time.
#[derive(Clone, Debug, PartialEq)]
pub struct BakedTrack {
    /// Scene object identifier.
    pub object_id: String,
    /// Samples recorded before simplification.
    pub recorded: usize,
    /// Surviving keyframes.
    pub keyframes: Vec<Keyframe>,
}

/// Result of running a bake, before it touches the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct BakeOutput {
    /// Absolute time the simulation started at.
    pub bake_start: f64,
    /// Simulated span in seconds.
    pub duration: f64,
    /// One track per dynamic body, in scene order.
    pub tracks: Vec<BakedTrack>,
}

/// Per-object outcome of a merge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BakedObjectReport {
    /// Scene object identifier.
    pub object_id: String,
    /// Samples recorded.
    pub recorded: usize,
    /// Keyframes written.
    pub kept: usize,
    /// Pre-existing keyframes removed from the baked window.
    pub replaced: usize,
}

/// Summary of a merged bake.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BakeReport {
    /// Absolute time the simulation started at.
    pub bake_start: f64,
    /// Simulated span in seconds.
    pub duration: f64,
    /// One entry per baked object.
    pub objects: Vec<BakedObjectReport>,
}

struct Sample {
    time: f64,
    position: Vec3,
    orientation: Quat,
}

/// One bake run: simulate physics-enabled objects and turn the motion into keyframes.
pub struct BakeSession {
    settings: SimulationSettings,
    bake_start: f64,
    stage: BakeStage,
    cancel: Option<CancelToken>,
}

impl BakeSession {
    /// Session starting at absolute time `bake_start`.
    pub fn new(settings: SimulationSettings, bake_start: f64) -> SceneResult<Self> {
        settings.validate()?;
        if !bake_start.is_finite() || bake_start < 0.0 {
            return Err(SceneError::simulation("bake start must be finite and >= 0"));
        }
        Ok(Self {
            settings,
            bake_start,
            stage: BakeStage::Idle,
            cancel: None,
        })
    }

    /// Observe `token` between simulation steps.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Current stage.
    pub fn stage(&self) -> BakeStage {
        self.stage
    }

    /// Simulation parameters.
    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    fn enter(&mut self, stage: BakeStage) {
        tracing::debug!(from = ?self.stage, to = ?stage, "bake stage");
        self.stage = stage;
    }

    /// Run against the built-in [`World`].
    pub fn run(&mut self, scene: &Scene) -> SceneResult<BakeOutput> {
        let mut world = World::new(self.settings.gravity_vector());
        self.run_with(scene, &mut world)
    }

    /// Run against `sim`, which must be empty.
    #[tracing::instrument(skip(self, scene, sim), fields(bake_start = self.bake_start))]
    pub fn run_with<S: RigidBodySimulator>(
        &mut self,
        scene: &Scene,
        sim: &mut S,
    ) -> SceneResult<BakeOutput> {
        self.enter(BakeStage::Simulating);
        let bodies = self.register_bodies(scene, sim);
        apply_initial_impulses(sim, &bodies);

        let samples = match self.simulate(sim, &bodies) {
            Ok(samples) => samples,
            Err(err) => {
                self.enter(BakeStage::Idle);
                return Err(err);
            }
        };

        self.enter(BakeStage::Recording);
        let mut tracks: Vec<BakedTrack> = bodies
            .iter()
            .filter(|b| b.dynamic)
            .zip(samples)
            .map(|(body, samples)| BakedTrack {
                object_id: body.object_id.clone(),
                recorded: samples.len(),
                keyframes: samples
                    .into_iter()
                    .map(|s| {
                        Keyframe::new(s.time)
                            .with(Property::Position, s.position)
                            .with(Property::Rotation, quat_to_euler_deg(s.orientation))
                    })
                    .collect(),
            })
            .collect();

        self.enter(BakeStage::Simplifying);
        let tolerance = self.settings.simplification_tolerance;
        for track in tracks.iter_mut() {
            if tolerance > 0.0 && track.keyframes.len() > 2 {
                let points: Vec<Vec3> = track
                    .keyframes
                    .iter()
                    .map(|k| {
                        k.values
                            .get(&Property::Position)
                            .and_then(|v| v.as_vec3())
                            .unwrap_or_default()
                    })
                    .collect();
                let mut kept = simplify_indices(&points, tolerance).into_iter().peekable();
                track.keyframes = std::mem::take(&mut track.keyframes)
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, key)| kept.next_if_eq(&i).map(|_| key))
                    .collect();
            }
        }

        self.enter(BakeStage::Retiming);
        if let Some(easing) = self.settings.post_easing.to_ease() {
            for track in tracks.iter_mut() {
                retime(&mut track.keyframes, easing);
            }
        }

        Ok(BakeOutput {
            bake_start: self.bake_start,
            duration: self.settings.duration,
            tracks,
        })
    }

    fn register_bodies<S: RigidBodySimulator>(&self, scene: &Scene, sim: &mut S) -> Vec<BakeBody> {
        let mut bodies = Vec::new();
        for object in &scene.objects {
            let Some(physics) = object.physics.as_ref().filter(|p| p.enabled) else {
                continue;
            };
            let local = (self.bake_start - object.start_time).max(0.0);
            let state = Evaluator::resolve_at(object, local);
            let dynamic = physics.body_type == BodyType::Dynamic;
            let half_extents = (state.scale.abs() * 0.5).max(Vec3::splat(MIN_HALF_EXTENT));
            let handle = sim.add_body(BodyDesc {
                orientation: state.orientation(),
                friction: physics.friction,
                restitution: physics.restitution,
                ..BodyDesc::cuboid(
                    state.position,
                    half_extents,
                    if dynamic { physics.mass } else { 0.0 },
                )
            });
            bodies.push(BakeBody {
                object_id: object.id.clone(),
                handle,
                dynamic,
                force: physics.force,
            });
        }
        tracing::debug!(bodies = bodies.len(), "registered bodies");
        bodies
    }

    fn simulate<S: RigidBodySimulator>(
        &self,
        sim: &mut S,
        bodies: &[BakeBody],
    ) -> SceneResult<Vec<Vec<Sample>>> {
        let steps = self.settings.step_count();
        let dt = self.settings.step_dt();
        let interval = self.settings.frame_interval();
        let dynamic: Vec<&BakeBody> = bodies.iter().filter(|b| b.dynamic).collect();
        let mut samples: Vec<Vec<Sample>> = dynamic.iter().map(|_| Vec::new()).collect();

        for step in 0..steps {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                tracing::debug!(step, steps, "bake cancelled");
                return Err(SceneError::Cancelled {
                    steps_completed: step,
                    steps_total: steps,
                });
            }
            apply_source_forces(sim, bodies);
            sim.step(dt);

            let time = f64::from(step) * interval;
            for (body, out) in dynamic.iter().zip(samples.iter_mut()) {
                let position = sim.position(body.handle);
                let orientation = sim.orientation(body.handle);
                let (Some(position), Some(orientation)) = (position, orientation) else {
                    return Err(SceneError::simulation(format!(
                        "simulator lost body for '{}'",
                        body.object_id
                    )));
                };
                if !position.is_finite() || !orientation.is_finite() {
                    return Err(SceneError::simulation(format!(
                        "non-finite state for '{}' at step {step}",
                        body.object_id
                    )));
                }
                out.push(Sample {
                    time,
                    position,
                    orientation,
                });
            }
            tracing::trace!(step, "simulated");
        }
        Ok(samples)
    }

    /// Splice `output` into `scene`, replacing keyframes inside each object's baked window.
    ///
    /// Times are shifted from simulation-local to clip-local time; baked keyframes that would
    /// land before the clip start are dropped.
    pub fn merge(&mut self, output: BakeOutput, scene: &mut Scene) -> SceneResult<BakeReport> {
        let report = output.merge_into(scene)?;
        self.enter(BakeStage::Merged);
        Ok(report)
    }
}

impl BakeOutput {
    /// Splice every track into `scene`. Nothing changes when any track is rejected.
    pub fn merge_into(self, scene: &mut Scene) -> SceneResult<BakeReport> {
        let mut staged = scene.clone();
        let mut objects = Vec::with_capacity(self.tracks.len());
        for track in self.tracks {
            let object = staged.require_mut(&track.object_id)?;
            let offset = self.bake_start - object.start_time;
            let mut keys: Vec<Keyframe> = track
                .keyframes
                .into_iter()
                .filter_map(|mut k| {
                    k.time += offset;
                    if k.time < -TIME_EPSILON {
                        return None;
                    }
                    k.time = k.time.max(0.0);
                    Some(k)
                })
                .collect();
            dedup_times(&mut keys);
            let kept = keys.len();
            let window = TimeRange::starting_at(offset, self.duration)?;
            let replaced = object.keyframes.splice_range(window, keys)?;
            objects.push(BakedObjectReport {
                object_id: track.object_id,
                recorded: track.recorded,
                kept,
                replaced,
            });
        }
        *scene = staged;
        Ok(BakeReport {
            bake_start: self.bake_start,
            duration: self.duration,
            objects,
        })
    }
}

/// Bake every physics-enabled object of `scene` starting at `bake_start` and merge the result.
pub fn bake_scene(
    scene: &mut Scene,
    settings: SimulationSettings,
    bake_start: f64,
    cancel: Option<CancelToken>,
) -> SceneResult<BakeReport> {
    let mut session = BakeSession::new(settings, bake_start)?;
    if let Some(token) = cancel {
        session = session.with_cancel(token);
    }
    let output = session.run(scene)?;
    session.merge(output, scene)
}

#[cfg(test)]
#[path = "../../tests/unit/bake/pipeline.rs"]
mod tests;
