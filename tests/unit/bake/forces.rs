use super::*;
use crate::bake::world::{BodyDesc, World};
use crate::foundation::core::Vec3;
use crate::scene::physics::ForcePreset;

fn add(world: &mut World, id: &str, position: Vec3, mass: f64, force: Option<ForceSettings>) -> BakeBody {
    let handle = world.add_body(BodyDesc::cuboid(position, Vec3::splat(0.1), mass));
    BakeBody {
        object_id: id.into(),
        handle,
        dynamic: mass > 0.0,
        force,
    }
}

fn preset(preset: ForcePreset, strength: f64) -> Option<ForceSettings> {
    Some(ForceSettings { preset, strength })
}

#[test]
fn directional_impulse_sets_velocity() {
    let mut world = World::new(Vec3::ZERO);
    let body = add(&mut world, "a", Vec3::ZERO, 2.0, preset(ForcePreset::Up, 4.0));
    apply_initial_impulses(&mut world, std::slice::from_ref(&body));
    assert_eq!(world.velocity(body.handle), Some(Vec3::new(0.0, 2.0, 0.0)));
}

#[test]
fn radial_impulse_points_away_from_origin() {
    let mut world = World::new(Vec3::ZERO);
    let body = add(
        &mut world,
        "a",
        Vec3::new(0.0, 0.0, 5.0),
        1.0,
        preset(ForcePreset::PushFromCenter, 3.0),
    );
    let at_origin = add(
        &mut world,
        "b",
        Vec3::ZERO,
        1.0,
        preset(ForcePreset::PullToCenter, 3.0),
    );
    apply_initial_impulses(&mut world, &[body.clone(), at_origin.clone()]);
    assert_eq!(world.velocity(body.handle), Some(Vec3::new(0.0, 0.0, 3.0)));
    assert_eq!(world.velocity(at_origin.handle), Some(Vec3::ZERO));
}

#[test]
fn static_bodies_get_no_impulse() {
    let mut world = World::new(Vec3::ZERO);
    let body = add(&mut world, "a", Vec3::ZERO, 0.0, preset(ForcePreset::Up, 4.0));
    apply_initial_impulses(&mut world, std::slice::from_ref(&body));
    assert_eq!(world.velocity(body.handle), Some(Vec3::ZERO));
}

#[test]
fn pull_toward_source_attracts_other_dynamic_bodies() {
    let mut world = World::new(Vec3::ZERO);
    let source = add(
        &mut world,
        "src",
        Vec3::ZERO,
        0.0,
        preset(ForcePreset::PullTowardSource, 10.0),
    );
    let target = add(&mut world, "t", Vec3::new(4.0, 0.0, 0.0), 1.0, None);
    let bodies = [source, target.clone()];
    apply_source_forces(&mut world, &bodies);
    world.step(0.1);
    assert!(world.velocity(target.handle).unwrap().x < 0.0);
}

#[test]
fn push_from_source_repels_and_skips_itself() {
    let mut world = World::new(Vec3::ZERO);
    let source = add(
        &mut world,
        "src",
        Vec3::ZERO,
        1.0,
        preset(ForcePreset::PushFromSource, 10.0),
    );
    let target = add(&mut world, "t", Vec3::new(0.0, 0.0, -3.0), 1.0, None);
    let bodies = [source.clone(), target.clone()];
    apply_source_forces(&mut world, &bodies);
    world.step(0.1);
    assert!(world.velocity(target.handle).unwrap().z < 0.0);
    assert_eq!(world.velocity(source.handle), Some(Vec3::ZERO));
}

#[test]
fn source_presets_are_not_impulses() {
    let mut world = World::new(Vec3::ZERO);
    let body = add(
        &mut world,
        "a",
        Vec3::X,
        1.0,
        preset(ForcePreset::PushFromSource, 5.0),
    );
    apply_initial_impulses(&mut world, std::slice::from_ref(&body));
    assert_eq!(world.velocity(body.handle), Some(Vec3::ZERO));
}
