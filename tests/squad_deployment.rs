// tests/squad_deployment.rs
use glam::I64Vec2;
use rover_squad::{
    Grid, Heading, MessageError, NavConfig, PathBounds, RoverState, SquadConfig, SquadCoordinator,
    SquadReport, Violation, ViolationKind, parse_squad_message, process,
};

fn deploy(lines: &[&str]) -> SquadReport {
    SquadCoordinator::default()
        .deploy(&lines.join("\n"))
        .expect("message should parse")
}

fn violations(lines: &[&str]) -> Vec<Violation> {
    match deploy(lines) {
        SquadReport::Rejected(violations) => violations,
        SquadReport::Deployed(states) => panic!("expected rejection, got {states:?}"),
    }
}

#[test]
fn test_two_rover_deployment() {
    let reply = process(&["5 5", "1 2 N", "LMLMLMLMM", "3 3 E", "MMRMMRMRRM"].join("\n"));
    assert_eq!(reply, "1 3 N\n5 1 E");
}

#[test]
fn test_loosely_spaced_message() {
    let reply = process(
        &[" 5 5   ", "  1 2 N    ", "LMLMLMLMM   ", "3 3 E   ", "   MMRMMRMRRM"].join("\n"),
    );
    assert_eq!(reply, "1 3 N\n5 1 E");
}

#[test]
fn test_single_cell_grid() {
    assert_eq!(
        deploy(&["0 0", "0 0 N", "RRRR"]),
        SquadReport::Deployed(vec![RoverState::new(0, 0, Heading::N)])
    );
}

#[test]
fn test_plans_keep_deployment_order() {
    let coordinator = SquadCoordinator::default();
    let message = parse_squad_message("5 5\n1 2 N\nLMLMLMLMM\n3 3 E\nMMRMMRMRRM\n0 0 N\nR").unwrap();
    let plan = coordinator.plan(&message);

    assert_eq!(plan.grid, Grid::new(5, 5));
    let orders: Vec<_> = plan.rovers.iter().map(|r| r.deployment_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(plan.rovers[1].waypoints.len(), 6);
    assert_eq!(plan.rover(2).map(|r| r.final_state.heading), Some(Heading::E));
}

#[test]
fn test_path_leaving_grid() {
    // East to (1,0), then south to (1,-1).
    assert_eq!(
        violations(&["5 5", "0 0 E", "MRMLMLMMM"]),
        vec![Violation::PathOutOfGrid {
            rover: 0,
            waypoint: I64Vec2::new(1, -1),
            grid: Grid::new(5, 5),
        }]
    );
}

#[test]
fn test_final_position_outside_grid() {
    let found = violations(&["5 5", "1 1 N", "MMMMMM"]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind(), ViolationKind::PathOutOfGrid);
}

#[test]
fn test_landing_outside_grid() {
    // Rover 0 lands off the grid; rover 1 drives off the top edge.
    assert_eq!(
        violations(&["5 5", "6 1 N", "MMMMMM", "2 2 N", "MMMMMM"]),
        vec![
            Violation::LandingOutOfGrid {
                rover: 0,
                position: I64Vec2::new(6, 1),
                grid: Grid::new(5, 5),
            },
            Violation::PathOutOfGrid {
                rover: 1,
                waypoint: I64Vec2::new(2, 6),
                grid: Grid::new(5, 5),
            },
        ]
    );
}

#[test]
fn test_landing_conflict_reported_for_both_rovers() {
    assert_eq!(
        violations(&["5 5", "1 1 E", "M", "1 1 N", "M"]),
        vec![
            Violation::LandingConflict {
                rover: 0,
                other: 1,
                position: I64Vec2::new(1, 1),
            },
            Violation::LandingConflict {
                rover: 1,
                other: 0,
                position: I64Vec2::new(1, 1),
            },
        ]
    );
}

#[test]
fn test_collision_with_parked_later_rover() {
    // Rover 1 drives onto (1,3), where rover 2 is still waiting to deploy.
    assert_eq!(
        violations(&["5 5", "1 1 E", "M", "1 2 N", "M", "1 3 N", "M"]),
        vec![Violation::Collision {
            rover: 1,
            others: vec![2],
        }]
    );
}

#[test]
fn test_collision_with_finished_earlier_rover() {
    // Rover 0 comes to rest on (2,0); rover 1 later drives into it.
    assert_eq!(
        violations(&["5 5", "0 0 E", "MM", "2 1 S", "M"]),
        vec![Violation::Collision {
            rover: 1,
            others: vec![0],
        }]
    );
}

#[test]
fn test_collision_names_every_blocking_rover() {
    // Rover 1 drives east across rover 0's resting cell and rover 2's landing cell.
    assert_eq!(
        violations(&["5 5", "1 1 N", "M", "0 2 E", "MMM", "3 2 W", "L"]),
        vec![Violation::Collision {
            rover: 1,
            others: vec![0, 2],
        }]
    );
}

#[test]
fn test_collisions_follow_deployment_order() {
    // Rover 0 crosses (1,0) while rover 1 is still parked at (1,1); rover 1
    // only reaches (1,0) after rover 0 has moved on to (3,0).
    assert_eq!(
        deploy(&["5 5", "0 0 E", "MMM", "1 1 S", "M"]),
        SquadReport::Deployed(vec![
            RoverState::new(3, 0, Heading::E),
            RoverState::new(1, 0, Heading::S),
        ])
    );
}

#[test]
fn test_rejection_withholds_every_position() {
    let reply = process(&["5 5", "1 2 N", "LMLMLMLMM", "6 6 N", "M"].join("\n"));

    assert_eq!(
        reply,
        "ERROR:\nLandingOutOfGrid: Rover [1]: coordinates [x: 6, y: 6] are outside the grid [5, 5] boundaries."
    );
    assert!(!reply.contains("1 3 N"));
}

#[test]
fn test_path_bounds_modes() {
    let tall = "2 5\n0 0 N\nMMMM";
    let wide = "5 2\n0 0 N\nMMM";

    let corrected = SquadCoordinator::default();
    assert_eq!(corrected.process(tall), "0 4 N");
    assert!(corrected.process(wide).starts_with("ERROR:\nPathOutOfGrid: Rover [0]"));

    let legacy = SquadCoordinator::new(SquadConfig {
        path_bounds: PathBounds::LegacyXAxis,
        ..Default::default()
    });
    assert_eq!(legacy.process(wide), "0 3 N");
    assert_eq!(
        legacy.deploy(tall),
        Ok(SquadReport::Rejected(vec![Violation::PathOutOfGrid {
            rover: 0,
            waypoint: I64Vec2::new(0, 3),
            grid: Grid::new(2, 5),
        }]))
    );
}

#[test]
fn test_malformed_messages() {
    let coordinator = SquadCoordinator::default();

    assert_eq!(
        coordinator.deploy("5 5\n1 2 N\nLMLM\n3 3 E"),
        Err(MessageError::IncompleteRover { lines: 3 })
    );
    assert!(matches!(
        coordinator.deploy("5 A\n1 2 N\nM"),
        Err(MessageError::InvalidGrid { .. })
    ));
    assert!(matches!(
        coordinator.deploy("5 5\n1 2 N\nLMLMB"),
        Err(MessageError::InvalidCommands { .. })
    ));
    assert_eq!(coordinator.deploy("5 5"), Err(MessageError::NoRovers));
    assert_eq!(coordinator.deploy("   \n"), Err(MessageError::Empty));

    let reply = coordinator.process("\n0 0 E\nMRMLMLMMM");
    assert!(reply.starts_with("ERROR: line 1"), "{reply}");
}

#[test]
fn test_move_past_largest_grid_edge() {
    // The landing cell sits on the widest grid the protocol admits; one step
    // east leaves it.
    let reply = process("2147483647 2147483647\n2147483647 0 E\nM");
    assert_eq!(
        reply,
        "ERROR:\nPathOutOfGrid: Rover [0]: with given commands would navigate outside the grid \
         [2147483647, 2147483647] at [x: 2147483648, y: 0]."
    );

    assert_eq!(
        process("2147483647 2147483647\n2147483646 2147483647 E\nM"),
        "2147483647 2147483647 E"
    );
}

#[test]
fn test_oversized_step_leaves_grid() {
    let coordinator = SquadCoordinator::new(SquadConfig {
        nav: NavConfig {
            step_length: i32::MAX,
        },
        ..Default::default()
    });

    assert_eq!(
        coordinator.deploy("2147483647 2147483647\n0 0 N\nMM"),
        Ok(SquadReport::Rejected(vec![Violation::PathOutOfGrid {
            rover: 0,
            waypoint: I64Vec2::new(0, 2 * i64::from(i32::MAX)),
            grid: Grid::new(i32::MAX, i32::MAX),
        }]))
    );
}

#[test]
fn test_coordinate_overflow_reply() {
    let reply = process("5 5\n99999999999 0 N\nM");
    assert!(reply.starts_with("ERROR: line 2"), "{reply}");
}
