use super::*;

const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

fn cube(position: Vec3, mass: f64) -> BodyDesc {
    BodyDesc::cuboid(position, Vec3::splat(0.5), mass)
}

// Top face at y = 0.
fn ground(world: &mut World, friction: f64, restitution: f64) -> BodyId {
    world.add_body(BodyDesc {
        friction,
        restitution,
        ..BodyDesc::cuboid(Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 0.5, 20.0), 0.0)
    })
}

fn run(world: &mut World, steps: usize) {
    for _ in 0..steps {
        world.step(1.0 / 60.0);
    }
}

#[test]
fn free_fall_accelerates_downward() {
    let mut world = World::new(GRAVITY);
    let body = world.add_body(cube(Vec3::new(0.0, 10.0, 0.0), 1.0));
    let mut last = world.position(body).unwrap().y;
    let mut last_drop = 0.0;
    for _ in 0..30 {
        world.step(1.0 / 60.0);
        let y = world.position(body).unwrap().y;
        let drop = last - y;
        assert!(drop > last_drop);
        last_drop = drop;
        last = y;
    }
}

#[test]
fn static_bodies_never_move() {
    let mut world = World::new(GRAVITY);
    let fixed = world.add_body(cube(Vec3::ZERO, 0.0));
    world.apply_impulse(fixed, Vec3::X * 100.0);
    world.apply_force(fixed, Vec3::Y * 100.0);
    for _ in 0..10 {
        world.step(0.01);
    }
    assert_eq!(world.position(fixed), Some(Vec3::ZERO));
}

#[test]
fn impulse_changes_velocity_by_inverse_mass() {
    let mut world = World::new(Vec3::ZERO);
    let body = world.add_body(cube(Vec3::ZERO, 2.0));
    world.apply_impulse(body, Vec3::new(4.0, 0.0, 0.0));
    assert_eq!(world.velocity(body), Some(Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn forces_last_one_step() {
    let mut world = World::new(Vec3::ZERO);
    let body = world.add_body(cube(Vec3::ZERO, 1.0));
    world.apply_force(body, Vec3::new(10.0, 0.0, 0.0));
    world.step(0.1);
    let v1 = world.velocity(body).unwrap().x;
    world.step(0.1);
    let v2 = world.velocity(body).unwrap().x;
    assert!(v1 > 0.9);
    assert!(v2 <= v1 + 1e-6);
}

#[test]
fn box_comes_to_rest_on_ground() {
    let mut world = World::new(GRAVITY);
    ground(&mut world, 0.5, 0.2);
    let body = world.add_body(cube(Vec3::new(0.0, 2.0, 0.0), 1.0));
    run(&mut world, 240);
    let y = world.position(body).unwrap().y;
    assert!((y - 0.5).abs() < 0.05, "resting height {y}");
    assert!(world.velocity(body).unwrap().length() < 0.2);
}

#[test]
fn tilted_box_settles_on_a_face() {
    let mut world = World::new(GRAVITY);
    ground(&mut world, 0.5, 0.0);
    let body = world.add_body(BodyDesc {
        orientation: Quat::from_rotation_z(30f64.to_radians()),
        ..cube(Vec3::new(0.0, 1.5, 0.0), 1.0)
    });
    run(&mut world, 300);
    let y = world.position(body).unwrap().y;
    // Resting on an edge or its bounding box would leave the center near 0.68.
    assert!((y - 0.5).abs() < 0.05, "resting height {y}");
    let up = world.orientation(body).unwrap() * Vec3::Y;
    let aligned = up.x.abs().max(up.y.abs()).max(up.z.abs());
    assert!(aligned > 0.99, "face not down: {up}");
}

#[test]
fn bounce_uses_the_larger_restitution() {
    let peak = |body_restitution: f64| {
        let mut world = World::new(GRAVITY);
        ground(&mut world, 0.3, 0.0);
        let body = world.add_body(BodyDesc {
            restitution: body_restitution,
            ..cube(Vec3::new(0.0, 3.0, 0.0), 1.0)
        });
        // First contact lands around 0.71 s; sample the rebound after it.
        run(&mut world, 60);
        let mut peak = f64::MIN;
        for _ in 0..120 {
            world.step(1.0 / 60.0);
            peak = peak.max(world.position(body).unwrap().y);
        }
        peak
    };
    let bouncy = peak(0.9);
    let dead = peak(0.0);
    assert!(bouncy > 1.5, "bouncy rebound peak {bouncy}");
    assert!(dead < 0.7, "dead rebound peak {dead}");
}

#[test]
fn sliding_uses_the_smaller_friction() {
    let slide = |body_friction: f64| {
        let mut world = World::new(GRAVITY);
        ground(&mut world, 1.0, 0.0);
        let body = world.add_body(BodyDesc {
            friction: body_friction,
            ..cube(Vec3::new(0.0, 0.5, 0.0), 1.0)
        });
        run(&mut world, 10);
        world.apply_impulse(body, Vec3::new(5.0, 0.0, 0.0));
        let start = world.position(body).unwrap().x;
        run(&mut world, 60);
        world.position(body).unwrap().x - start
    };
    let slippery = slide(0.0);
    let grippy = slide(0.8);
    assert!(slippery > 4.5, "frictionless slide {slippery}");
    assert!(grippy < 2.0, "high friction slide {grippy}");
}

#[test]
fn unknown_body_is_ignored() {
    let mut world = World::new(Vec3::ZERO);
    world.apply_impulse(BodyId(3), Vec3::X);
    assert_eq!(world.position(BodyId(3)), None);
    assert_eq!(world.velocity(BodyId(3)), None);
    assert_eq!(world.body_count(), 0);
}
