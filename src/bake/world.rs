use rapier3d::{
    na::{Isometry3, Quaternion, Translation3, UnitQuaternion},
    prelude::{
        CCDSolver, CoefficientCombineRule, ColliderBuilder, ColliderSet, DefaultBroadPhase,
        ImpulseJointSet, IntegrationParameters, IslandManager, MassProperties, MultibodyJointSet,
        NarrowPhase, PhysicsPipeline, Real, RigidBodyBuilder, RigidBodyHandle, RigidBodySet,
        RigidBodyType, Vector, point, vector,
    },
};
use rapier3d::na as nalgebra;

use crate::foundation::core::{Quat, Vec3};

/// Handle of a body registered with a [`RigidBodySimulator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Initial state, shape and surface of a box body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDesc {
    /// Center position.
    pub position: Vec3,
    /// Orientation.
    pub orientation: Quat,
    /// Half extents of the box collider.
    pub half_extents: Vec3,
    /// Mass in kilograms; `0` makes the body static.
    pub mass: f64,
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Restitution in `[0, 1]`.
    pub restitution: f64,
}

impl BodyDesc {
    /// Axis-aligned box with friction `0.3` and no bounce.
    pub fn cuboid(position: Vec3, half_extents: Vec3, mass: f64) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            half_extents,
            mass,
            friction: 0.3,
            restitution: 0.0,
        }
    }

    fn is_dynamic(&self) -> bool {
        self.mass.is_finite() && self.mass > 0.0
    }
}

/// Rigid-body engine driven by the bake pipeline.
///
/// A contact between two bodies uses the smaller friction and the larger restitution of the
/// pair. Forces last for one `step`; impulses change velocity immediately.
pub trait RigidBodySimulator {
    /// Register a body.
    fn add_body(&mut self, desc: BodyDesc) -> BodyId;
    /// Apply an impulse through the center of mass.
    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3);
    /// Apply a force through the center of mass for the next step.
    fn apply_force(&mut self, body: BodyId, force: Vec3);
    /// Advance by `dt` seconds.
    fn step(&mut self, dt: f64);
    /// Current center position.
    fn position(&self, body: BodyId) -> Option<Vec3>;
    /// Current orientation.
    fn orientation(&self, body: BodyId) -> Option<Quat>;
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x as Real, v.y as Real, v.z as Real]
}

fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(f64::from(v.x), f64::from(v.y), f64::from(v.z))
}

fn to_isometry(position: Vec3, orientation: Quat) -> Isometry3<Real> {
    let q = orientation.normalize();
    Isometry3::from_parts(
        Translation3::from(to_vector(position)),
        UnitQuaternion::from_quaternion(Quaternion::new(
            q.w as Real,
            q.x as Real,
            q.y as Real,
            q.z as Real,
        )),
    )
}

// Solid box: I_x = m (h_y² + h_z²) / 3.
fn box_mass_properties(mass: f64, h: Vec3) -> MassProperties {
    let i = Vec3::new(h.y * h.y + h.z * h.z, h.x * h.x + h.z * h.z, h.x * h.x + h.y * h.y)
        * (mass / 3.0);
    MassProperties::new(point![0.0, 0.0, 0.0], mass as Real, to_vector(i))
}

/// Box-only rigid-body world backed by Rapier.
///
/// Colliders are cuboids; friction combines with `Min` and restitution with `Max` on every
/// contact pair.
pub struct World {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    handles: Vec<RigidBodyHandle>,
}

impl World {
    /// Empty world with the given gravity acceleration.
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity: to_vector(gravity),
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            handles: Vec::new(),
        }
    }

    /// Number of registered bodies.
    pub fn body_count(&self) -> usize {
        self.handles.len()
    }

    /// Current linear velocity of `body`.
    pub fn velocity(&self, body: BodyId) -> Option<Vec3> {
        let handle = self.handles.get(body.0)?;
        self.bodies.get(*handle).map(|b| from_vector(b.linvel()))
    }
}

impl RigidBodySimulator for World {
    fn add_body(&mut self, desc: BodyDesc) -> BodyId {
        let h = desc.half_extents.abs();
        let builder = if desc.is_dynamic() {
            RigidBodyBuilder::new(RigidBodyType::Dynamic)
                .additional_mass_properties(box_mass_properties(desc.mass, h))
        } else {
            RigidBodyBuilder::new(RigidBodyType::Fixed)
        };
        let handle = self
            .bodies
            .insert(builder.position(to_isometry(desc.position, desc.orientation)));

        // Mass comes from the body so colliders carry no density.
        let collider = ColliderBuilder::cuboid(h.x as Real, h.y as Real, h.z as Real)
            .density(0.0)
            .friction(desc.friction as Real)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .restitution(desc.restitution as Real)
            .restitution_combine_rule(CoefficientCombineRule::Max);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        if let Some(body) = self.bodies.get_mut(handle) {
            body.recompute_mass_properties_from_colliders(&self.colliders);
        }

        self.handles.push(handle);
        BodyId(self.handles.len() - 1)
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3) {
        if let Some(b) = self
            .handles
            .get(body.0)
            .and_then(|h| self.bodies.get_mut(*h))
        {
            b.apply_impulse(to_vector(impulse), true);
        }
    }

    fn apply_force(&mut self, body: BodyId, force: Vec3) {
        if let Some(b) = self
            .handles
            .get(body.0)
            .and_then(|h| self.bodies.get_mut(*h))
        {
            b.add_force(to_vector(force), true);
        }
    }

    fn step(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.params.dt = dt as Real;
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
        for handle in &self.handles {
            if let Some(b) = self.bodies.get_mut(*handle) {
                b.reset_forces(false);
            }
        }
    }

    fn position(&self, body: BodyId) -> Option<Vec3> {
        let handle = self.handles.get(body.0)?;
        self.bodies.get(*handle).map(|b| from_vector(b.translation()))
    }

    fn orientation(&self, body: BodyId) -> Option<Quat> {
        let handle = self.handles.get(body.0)?;
        self.bodies.get(*handle).map(|b| {
            let q = b.rotation();
            Quat::from_xyzw(
                f64::from(q.i),
                f64::from(q.j),
                f64::from(q.k),
                f64::from(q.w),
            )
            .normalize()
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bake/world.rs"]
mod tests;
