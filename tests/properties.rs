//! Property-based tests for the sensor, policy and tick invariants.
//!
//! Run with: cargo test --test properties

use std::num::NonZeroU32;

use glam::Vec2;
use lidar_rover::settings::{SimConfig, Tunables};
use lidar_rover::sim::{
    Action, Arena, AvoidancePolicy, AvoidanceState, LayoutParams, Pose, Rect, Sector,
    SectorDistances, SensorReading, Simulation, TurnDirection, World, cast_ray, is_colliding,
    random_obstacles,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_tunables() -> impl Strategy<Value = Tunables> {
    (0.0..=10.0f32, 0.1..=10.0f32, 10.0..=150.0f32).prop_map(
        |(speed, turn_rate, avoidance_threshold)| Tunables {
            speed,
            turn_rate,
            avoidance_threshold,
        },
    )
}

fn arb_rect() -> impl Strategy<Value = Rect> {
    (0.0..700.0f32, 0.0..500.0f32, 5.0..100.0f32, 5.0..100.0f32)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn arb_readings() -> impl Strategy<Value = Vec<SensorReading>> {
    prop::collection::vec((0u32..72, 0.0..=150.0f32), 1..72).prop_map(|samples| {
        samples
            .into_iter()
            .map(|(i, distance)| {
                let offset_deg = (i * 5) as f32;
                SensorReading {
                    offset_deg,
                    angle_deg: offset_deg,
                    distance,
                    point: Vec2::ZERO,
                }
            })
            .collect()
    })
}

fn arb_direction() -> impl Strategy<Value = TurnDirection> {
    prop_oneof![Just(TurnDirection::Left), Just(TurnDirection::Right)]
}

// =============================================================================
// Geometry kernel
// =============================================================================

proptest! {
    #[test]
    fn clear_ray_reaches_max_range(
        ox in 0.0..800.0f32,
        oy in 0.0..600.0f32,
        angle in 0.0..360.0f32,
        max_range in 1.0..200.0f32,
    ) {
        // Only obstacle sits well outside the ray's reach
        let far = Rect::new(ox + 1000.0, oy + 1000.0, 10.0, 10.0);
        let hit = cast_ray(Vec2::new(ox, oy), angle, max_range, &[far]);

        let rad = angle.to_radians();
        let expected = Vec2::new(ox, oy) + Vec2::new(rad.cos(), rad.sin()) * max_range;
        prop_assert_eq!(hit.distance, max_range);
        prop_assert!((hit.point - expected).length() < 1e-3);
    }

    #[test]
    fn single_obstacle_distance_within_one_step(d in 1.0..149.0f32) {
        let obstacle = Rect::new(d, -10.0, 30.0, 20.0);
        let hit = cast_ray(Vec2::ZERO, 0.0, 150.0, &[obstacle]);
        prop_assert!(hit.distance >= d);
        prop_assert!(hit.distance - d < 1.0);
    }

    #[test]
    fn obstacle_order_does_not_change_ray(
        obstacles in prop::collection::vec(arb_rect(), 0..8),
        ox in 0.0..800.0f32,
        oy in 0.0..600.0f32,
        angle in 0.0..360.0f32,
    ) {
        let origin = Vec2::new(ox, oy);
        let forward = cast_ray(origin, angle, 150.0, &obstacles);
        let mut reversed = obstacles.clone();
        reversed.reverse();
        prop_assert_eq!(forward, cast_ray(origin, angle, 150.0, &reversed));
    }

    #[test]
    fn footprint_inside_obstacle_always_collides(
        x in 20.0..180.0f32,
        y in 20.0..180.0f32,
        heading in 0.0..360.0f32,
    ) {
        let big = Rect::new(0.0, 0.0, 200.0, 200.0);
        prop_assert!(is_colliding(&Pose::new(Vec2::new(x, y), heading), 10.0, &[big]));
    }

    #[test]
    fn footprint_far_from_obstacle_never_collides(
        x in 300.0..800.0f32,
        y in 0.0..600.0f32,
        heading in 0.0..360.0f32,
    ) {
        let obstacle = Rect::new(0.0, 0.0, 200.0, 600.0);
        prop_assert!(!is_colliding(&Pose::new(Vec2::new(x, y), heading), 10.0, &[obstacle]));
    }
}

// =============================================================================
// Policy
// =============================================================================

proptest! {
    #[test]
    fn sector_minimum_bounds_every_member(readings in arb_readings()) {
        for sector in [Sector::Front, Sector::Left, Sector::Right] {
            let min = sector.min_distance(&readings);
            for r in readings.iter().filter(|r| sector.contains(r.offset_deg)) {
                prop_assert!(min <= r.distance);
            }
        }
    }

    #[test]
    fn committed_turn_lasts_exactly_its_frames(
        frames in 1u32..60,
        direction in arb_direction(),
        fronts in prop::collection::vec(0.0..=150.0f32, 60),
        tunables in arb_tunables(),
    ) {
        let policy = AvoidancePolicy::new(NonZeroU32::new(frames).unwrap());
        let mut state = AvoidanceState::Turning {
            direction,
            frames_remaining: policy.turn_frames,
        };

        for i in 0..frames as usize {
            let sectors = SectorDistances { front: fronts[i], left: 150.0, right: 0.0 };
            let decision = policy.decide(state, &sectors, &tunables);
            prop_assert_eq!(decision.action, Action::Turn(direction));
            state = decision.next_state;
        }
        prop_assert_eq!(state, AvoidanceState::Idle);
    }
}

// =============================================================================
// Tick invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn pose_stays_normalized_and_in_bounds(
        seed in any::<u64>(),
        tunables in prop::collection::vec(arb_tunables(), 60),
    ) {
        let config = SimConfig {
            sensor_angle_step_deg: 10,
            ..SimConfig::default()
        };
        let arena = Arena::new(config.arena_width, config.arena_height);
        let obstacles = random_obstacles(seed, &arena, &LayoutParams::default());
        let mut sim = Simulation::new(&config, World::new(arena, obstacles)).unwrap();

        for t in &tunables {
            let frame = sim.tick(t);
            prop_assert!((0.0..360.0).contains(&frame.pose.heading_deg));
            prop_assert!(arena.contains(frame.pose.position));
        }
    }
}
