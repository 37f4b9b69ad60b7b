//! Tests for the simulation engine: determinism, speed regulation through
//! the full tick loop, turn processing, and clock adaptation.

use glam::DVec3;
use hecs::World;

use flotilla_core::commands::FleetCommand;
use flotilla_core::components::{Helm, KinematicProfile, ShipId};
use flotilla_core::enums::{RegulationState, ShipClass};
use flotilla_core::events::HelmEvent;
use flotilla_core::types::{Heading, Velocity};

use crate::clock::ClockEvent;
use crate::engine::{SimConfig, SimulationEngine};
use crate::scenario::{self, Scenario, ScenarioError, ScheduledOrder, ShipGroup};
use crate::systems::clock_adaptation;

fn single_frigate() -> Scenario {
    Scenario {
        name: "Single Frigate".to_string(),
        groups: vec![ShipGroup {
            class: ShipClass::Frigate,
            count: 1,
            bearing_deg: 0.0,
            station_nm: 0.0,
            spacing_nm: 0.0,
        }],
        orders: vec![],
    }
}

fn engine_with(scenario: Scenario) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        seed: 7,
        time_scale: 1.0,
        scenario,
    })
    .expect("valid scenario")
}

fn ship_velocity(world: &World, ship: u32) -> DVec3 {
    let mut query = world.query::<(&ShipId, &Velocity)>();
    query
        .iter()
        .find(|(_, (id, _))| id.0 == ship)
        .map(|(_, (_, vel))| vel.0)
        .expect("ship exists")
}

fn set_ship_velocity(world: &mut World, ship: u32, v: DVec3) {
    for (_entity, (id, vel)) in world.query_mut::<(&ShipId, &mut Velocity)>() {
        if id.0 == ship {
            vel.0 = v;
        }
    }
}

fn ship_helm(world: &World, ship: u32) -> Helm {
    let mut query = world.query::<(&ShipId, &Helm)>();
    query
        .iter()
        .find(|(_, (id, _))| id.0 == ship)
        .map(|(_, (_, helm))| helm.clone())
        .expect("ship exists")
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = || SimConfig {
        seed: 12345,
        time_scale: 1.0,
        scenario: scenario::patrol_exercise(),
    };
    let mut engine_a = SimulationEngine::new(config()).unwrap();
    let mut engine_b = SimulationEngine::new(config()).unwrap();

    for _ in 0..300 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds_diverge() {
    let config = |seed| SimConfig {
        seed,
        time_scale: 1.0,
        scenario: scenario::patrol_exercise(),
    };
    let mut engine_a = SimulationEngine::new(config(111)).unwrap();
    let mut engine_b = SimulationEngine::new(config(222)).unwrap();

    // Spawn jitter differs, so the very first snapshots already disagree.
    let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should produce divergent output");
}

// ---- Speed regulation through the engine ----

#[test]
fn test_speed_convergence_to_ordered() {
    let mut engine = engine_with(single_frigate());
    engine.queue_command(FleetCommand::SetSpeed {
        ship: 0,
        speed_kn: 24.0,
    });

    let mut last = engine.tick();
    for _ in 0..2000 {
        last = engine.tick();
    }

    let ship = &last.ships[0];
    assert!(
        (ship.speed_kn - 24.0).abs() / 24.0 < 0.005,
        "speed should settle near 24 kn, got {:.3}",
        ship.speed_kn
    );
    assert_eq!(ship.regulation, RegulationState::OnTarget);
}

#[test]
fn test_speed_settled_event_fires_once() {
    let mut engine = engine_with(single_frigate());
    engine.queue_command(FleetCommand::SetSpeed {
        ship: 0,
        speed_kn: 24.0,
    });

    let mut settled = 0;
    for _ in 0..2000 {
        let snap = engine.tick();
        settled += snap
            .events
            .iter()
            .filter(|e| matches!(e, HelmEvent::SpeedSettled { .. }))
            .count();
    }
    assert_eq!(settled, 1, "entering the on-target band should settle once");
}

#[test]
fn test_over_limit_order_clamps_and_reports() {
    let mut engine = engine_with(single_frigate());
    engine.queue_command(FleetCommand::SetSpeed {
        ship: 0,
        speed_kn: 99.0,
    });

    let snap = engine.tick();
    // Frigate top speed is 96 / (4 * 0.8) = 30 knots.
    assert_eq!(snap.ships[0].requested_speed_kn, 30.0);
    assert!(
        snap.events.iter().any(|e| matches!(
            e,
            HelmEvent::OrderClamped {
                ship: 0,
                clamped_kn,
                ..
            } if *clamped_kn == 30.0
        )),
        "clamp should be reported as an event"
    );

    // Re-ordering the clamped value is a duplicate: no recomputation, no
    // new clamp event.
    engine.queue_command(FleetCommand::SetSpeed {
        ship: 0,
        speed_kn: 30.0,
    });
    let snap = engine.tick();
    assert!(snap.events.is_empty());
    assert_eq!(snap.ships[0].requested_speed_kn, 30.0);
}

/// The worked scenario: mass 10, drag 1, max thrust 100 => top speed 10.
#[test]
fn test_concrete_band_scenario_through_engine() {
    let mut engine = engine_with(single_frigate());
    let ship = engine.spawn_test_ship(KinematicProfile::new(10.0, 1.0, 100.0, 2400.0));

    engine.queue_command(FleetCommand::SetSpeed {
        ship,
        speed_kn: 5.0,
    });
    engine.tick();

    let helm = ship_helm(engine.world(), ship);
    assert!((helm.bands.thrust_at_target_kn - 50.0).abs() < 1e-12);
    assert_eq!(helm.bands.max_thrust_kn, 100.0);

    // Way above target (ratio 1.2): zero thrust, drag alone slows the hull.
    set_ship_velocity(engine.world_mut(), ship, DVec3::new(0.0, 6.0, 0.0));
    engine.tick();
    let v = ship_velocity(engine.world(), ship);
    assert!(v.length() < 6.0, "coasting hull must shed speed, got {}", v.length());
    let helm = ship_helm(engine.world(), ship);
    assert_eq!(helm.regulation, RegulationState::Decelerating);

    // Way below target (ratio 0.4): full thrust accelerates the hull.
    set_ship_velocity(engine.world_mut(), ship, DVec3::new(0.0, 2.0, 0.0));
    engine.tick();
    let v = ship_velocity(engine.world(), ship);
    assert!(v.length() > 2.0, "full thrust must add speed, got {}", v.length());
    let helm = ship_helm(engine.world(), ship);
    assert_eq!(helm.regulation, RegulationState::Accelerating);
}

// ---- Turn processing ----

#[test]
fn test_turn_completes_in_expected_ticks() {
    let mut engine = engine_with(single_frigate());
    engine.queue_command(FleetCommand::SetCourse {
        ship: 0,
        heading: Heading::from_bearing_deg(90.0),
    });

    // Frigate turn rate 2700 deg/hr = 22.5 deg/tick: 90 degrees in 4 ticks.
    let mut reached_at = None;
    for i in 1..=10 {
        let snap = engine.tick();
        if snap
            .events
            .iter()
            .any(|e| matches!(e, HelmEvent::CourseReached { ship: 0, .. }))
        {
            reached_at = Some(i);
            break;
        }
        assert!(snap.ships[0].turn_underway, "turn should be underway at tick {i}");
    }
    assert_eq!(reached_at, Some(4));

    let snap = engine.tick();
    assert!(!snap.ships[0].turn_underway);
    assert!((snap.ships[0].bearing_deg - 90.0).abs() < 1e-9);
}

#[test]
fn test_duplicate_course_order_is_a_noop() {
    let mut engine = engine_with(single_frigate());
    let east = Heading::from_bearing_deg(90.0);

    engine.queue_command(FleetCommand::SetCourse { ship: 0, heading: east });
    for _ in 0..10 {
        engine.tick();
    }
    assert!(!engine.tick().ships[0].turn_underway);

    // Same course again: ignored, no restarted turn, no second event.
    engine.queue_command(FleetCommand::SetCourse { ship: 0, heading: east });
    let snap = engine.tick();
    assert!(!snap.ships[0].turn_underway);
    assert!(snap.events.is_empty());
}

// ---- Clock adaptation (direct, exact) ----

#[test]
fn test_pause_resume_restores_velocity_exactly() {
    let mut engine = engine_with(single_frigate());
    let v = DVec3::new(3.0, 4.0, 0.0);
    set_ship_velocity(engine.world_mut(), 0, v);

    clock_adaptation::run(engine.world_mut(), ClockEvent::Paused);
    assert_eq!(ship_velocity(engine.world(), 0), DVec3::ZERO);
    let helm = ship_helm(engine.world(), 0);
    assert_eq!(helm.pause_snapshot, Some(Velocity(v)));

    clock_adaptation::run(engine.world_mut(), ClockEvent::Resumed);
    assert_eq!(ship_velocity(engine.world(), 0), v);
    assert!(ship_helm(engine.world(), 0).pause_snapshot.is_none());
}

#[test]
fn test_rate_change_while_paused_rescales_snapshot() {
    let mut engine = engine_with(single_frigate());
    let v = DVec3::new(0.0, 10.0, 0.0);
    set_ship_velocity(engine.world_mut(), 0, v);

    clock_adaptation::run(engine.world_mut(), ClockEvent::Paused);
    clock_adaptation::run(engine.world_mut(), ClockEvent::RateChanged { old: 1.0, new: 2.0 });
    clock_adaptation::run(engine.world_mut(), ClockEvent::Resumed);

    assert_eq!(ship_velocity(engine.world(), 0), v * 2.0);
}

#[test]
fn test_rate_change_rescales_live_velocity_immediately() {
    let mut engine = engine_with(single_frigate());
    let v = DVec3::new(6.0, 8.0, 0.0);
    set_ship_velocity(engine.world_mut(), 0, v);

    clock_adaptation::run(engine.world_mut(), ClockEvent::RateChanged { old: 2.0, new: 1.0 });
    assert_eq!(ship_velocity(engine.world(), 0), v * 0.5);
}

// ---- Clock adaptation through the engine ----

#[test]
fn test_engine_pause_freezes_time_position_and_speed() {
    let mut engine = engine_with(single_frigate());
    engine.queue_command(FleetCommand::SetSpeed {
        ship: 0,
        speed_kn: 24.0,
    });
    for _ in 0..500 {
        engine.tick();
    }
    let before = engine.tick();
    let v_before = ship_velocity(engine.world(), 0);

    engine.queue_command(FleetCommand::Pause);
    let mut paused = engine.tick();
    for _ in 0..5 {
        paused = engine.tick();
    }
    assert!(paused.clock.paused);
    assert_eq!(paused.time.tick, before.time.tick, "time must not advance while paused");
    assert_eq!(
        paused.ships[0].position, before.ships[0].position,
        "hull must not drift while paused"
    );
    // The displayed speed comes from the pause snapshot.
    assert!((paused.ships[0].speed_kn - before.ships[0].speed_kn).abs() < 1e-9);

    engine.queue_command(FleetCommand::Resume);
    engine.tick();
    let v_after = ship_velocity(engine.world(), 0);
    assert!(
        (v_after - v_before).length() < 1e-3,
        "resume should restore the paused velocity"
    );
}

#[test]
fn test_engine_rate_change_keeps_displayed_speed() {
    let mut engine = engine_with(single_frigate());
    engine.queue_command(FleetCommand::SetSpeed {
        ship: 0,
        speed_kn: 24.0,
    });
    for _ in 0..1500 {
        engine.tick();
    }
    let v_before = ship_velocity(engine.world(), 0);

    engine.queue_command(FleetCommand::SetTimeScale { scale: 2.0 });
    let snap = engine.tick();

    // Live velocity doubled at the tick boundary, without waiting for the
    // regulator; the displayed (base-rate) speed is therefore unchanged.
    let v_after = ship_velocity(engine.world(), 0);
    assert!(
        (v_after.length() - 2.0 * v_before.length()).abs() / v_before.length() < 0.01,
        "scaled speed should double, got {} from {}",
        v_after.length(),
        v_before.length()
    );
    assert!(
        (snap.ships[0].speed_kn - 24.0).abs() / 24.0 < 0.01,
        "displayed speed should stay on the ordered value, got {:.3}",
        snap.ships[0].speed_kn
    );
    assert_eq!(snap.clock.multiplier, 2.0);
}

// ---- Scenarios and scheduled orders ----

#[test]
fn test_scheduled_order_fires_at_its_tick() {
    let mut scenario = single_frigate();
    scenario.orders.push(ScheduledOrder {
        at_tick: 5,
        command: FleetCommand::SetSpeed {
            ship: 0,
            speed_kn: 10.0,
        },
    });
    let mut engine = engine_with(scenario);

    for _ in 0..5 {
        let snap = engine.tick();
        assert_eq!(snap.ships[0].requested_speed_kn, 0.0);
    }
    let snap = engine.tick();
    assert_eq!(snap.ships[0].requested_speed_kn, 10.0);
}

#[test]
fn test_empty_fleet_is_rejected() {
    let scenario = Scenario {
        name: "Ghost Fleet".to_string(),
        groups: vec![],
        orders: vec![],
    };
    let result = SimulationEngine::new(SimConfig {
        seed: 1,
        time_scale: 1.0,
        scenario,
    });
    assert!(matches!(result, Err(ScenarioError::EmptyFleet { .. })));
}

#[test]
fn test_order_for_unknown_ship_is_rejected() {
    let mut scenario = single_frigate();
    scenario.orders.push(ScheduledOrder {
        at_tick: 0,
        command: FleetCommand::AllStop { ship: 9 },
    });
    assert!(matches!(
        scenario.validate(),
        Err(ScenarioError::UnknownShip { ship: 9, .. })
    ));
}

#[test]
fn test_snapshot_ships_sorted_by_id() {
    let mut engine = engine_with(scenario::convoy_run());
    let snap = engine.tick();
    let ids: Vec<u32> = snap.ships.iter().map(|s| s.ship).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn test_builtin_scenarios_validate() {
    scenario::patrol_exercise().validate().unwrap();
    scenario::convoy_run().validate().unwrap();
}
