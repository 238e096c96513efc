use alchemy_grid_core::{
    Catalog, CellCoord, Command, EffectRecord, ElementId, Event, Objective, ObjectiveId,
    ObjectiveKind, PatternKind, PlacementError, PuzzleKind,
};
use alchemy_grid_system_effects::EffectTuning;
use alchemy_grid_world::{self as world, query, World};

fn quiet_world(rows: u32, columns: u32) -> World {
    let mut world = World::with_config(Catalog::builtin(), EffectTuning::disabled(), 7);
    let mut events = Vec::new();
    world::apply(&mut world, Command::ConfigureBoard { rows, columns }, &mut events);
    world
}

fn place(world: &mut World, row: u32, column: u32, element: ElementId) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::PlaceElement {
            cell: CellCoord::new(row, column),
            element,
        },
        &mut events,
    );
    events
}

#[test]
fn fire_next_to_water_makes_steam() {
    let mut world = quiet_world(3, 3);
    let _ = place(&mut world, 2, 1, ElementId::Water);

    let events = place(&mut world, 1, 1, ElementId::Fire);

    assert_eq!(
        events,
        vec![
            Event::ElementPlaced {
                cell: CellCoord::new(1, 1),
                element: ElementId::Fire,
            },
            Event::ReactionOccurred {
                first: ElementId::Fire,
                second: ElementId::Water,
                result: ElementId::Steam,
                score: 100,
                position: CellCoord::new(2, 1),
            },
            Event::ElementDiscovered {
                element: ElementId::Steam,
            },
            Event::ScoreChanged {
                delta: 100,
                score: 100,
            },
        ]
    );
    assert_eq!(query::score(&world), 100);
    assert!(query::discovered(&world).contains(&ElementId::Steam));
    assert_eq!(query::grid(&world).render(), "...\n.F.\n.S.\n");
}

#[test]
fn earth_square_is_rewarded_and_stabilised() {
    let mut world = quiet_world(3, 3);
    let _ = place(&mut world, 0, 0, ElementId::Earth);
    let _ = place(&mut world, 0, 1, ElementId::Earth);
    let _ = place(&mut world, 1, 0, ElementId::Earth);

    let events = place(&mut world, 1, 1, ElementId::Earth);

    let square = [(0, 0), (0, 1), (1, 0), (1, 1)].map(|(r, c)| CellCoord::new(r, c));
    assert_eq!(
        events,
        vec![
            Event::ElementPlaced {
                cell: CellCoord::new(1, 1),
                element: ElementId::Earth,
            },
            Event::PatternMatched {
                kind: PatternKind::EarthSquare,
                score: 200,
                cells: square.to_vec(),
            },
            Event::ScoreChanged {
                delta: 200,
                score: 200,
            },
        ]
    );
    for cell in square {
        let earth = query::grid(&world).get(cell).expect("earth cell");
        assert!(earth.flags.stable, "{cell:?} should be stable");
        assert_eq!(earth.flags.strength, 1);
    }
}

#[test]
fn occupied_cells_reject_placements() {
    let mut world = quiet_world(2, 2);
    let _ = place(&mut world, 0, 0, ElementId::Earth);
    let before = query::grid(&world).clone();

    let events = place(&mut world, 0, 0, ElementId::Fire);

    assert_eq!(
        events,
        vec![Event::PlacementRejected {
            cell: CellCoord::new(0, 0),
            element: ElementId::Fire,
            reason: PlacementError::OccupiedCell {
                cell: CellCoord::new(0, 0)
            },
        }]
    );
    assert_eq!(query::grid(&world), &before);
    assert_eq!(query::score(&world), 0);
}

#[test]
fn combination_is_discovered_from_a_pattern() {
    let mut world = quiet_world(3, 3);
    let _ = place(&mut world, 0, 0, ElementId::Earth);
    let _ = place(&mut world, 0, 2, ElementId::Fire);

    let events = place(&mut world, 0, 1, ElementId::Metal);

    assert!(events.contains(&Event::ElementDiscovered {
        element: ElementId::Forge
    }));
    assert!(events.contains(&Event::PatternMatched {
        kind: PatternKind::ThreeElementCombo,
        score: 300,
        cells: vec![
            CellCoord::new(0, 0),
            CellCoord::new(0, 1),
            CellCoord::new(0, 2)
        ],
    }));
    assert_eq!(query::grid(&world).render(), ".G.\n...\n...\n");
    assert_eq!(query::score(&world), 300);
}

#[test]
fn certain_water_falls_and_spills() {
    let mut world = World::with_config(Catalog::builtin(), EffectTuning::certain(), 3);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureBoard { rows: 3, columns: 3 },
        &mut events,
    );

    let events = place(&mut world, 0, 1, ElementId::Water);

    assert_eq!(
        events,
        vec![
            Event::ElementPlaced {
                cell: CellCoord::new(0, 1),
                element: ElementId::Water,
            },
            Event::EffectApplied {
                effect: EffectRecord::WaterFell {
                    from: CellCoord::new(0, 1),
                    to: CellCoord::new(1, 1),
                },
            },
            Event::EffectApplied {
                effect: EffectRecord::WaterSpilled {
                    source: CellCoord::new(1, 1),
                    cell: CellCoord::new(1, 0),
                },
            },
            Event::EffectApplied {
                effect: EffectRecord::WaterSpilled {
                    source: CellCoord::new(1, 1),
                    cell: CellCoord::new(1, 2),
                },
            },
        ]
    );
    assert_eq!(query::grid(&world).render(), "...\nWWW\n...\n");
}

#[test]
fn objectives_complete_as_progress_is_made() {
    let mut world = quiet_world(3, 3);
    let objectives = vec![
        Objective::new(
            ObjectiveId::new(1),
            ObjectiveKind::CreateElement {
                element: ElementId::Steam,
            },
            50,
        ),
        Objective::new(
            ObjectiveId::new(2),
            ObjectiveKind::PlaceElement {
                element: ElementId::Water,
                count: 1,
            },
            10,
        ),
        Objective::new(ObjectiveId::new(3), ObjectiveKind::ReachScore { score: 150 }, 0),
        Objective::new(
            ObjectiveId::new(4),
            ObjectiveKind::SolvePuzzle {
                puzzle: PuzzleKind::Word,
            },
            25,
        ),
    ];
    let mut events = Vec::new();
    world::apply(&mut world, Command::SetObjectives { objectives }, &mut events);
    assert!(events.is_empty(), "nothing is satisfied yet");

    let events = place(&mut world, 2, 1, ElementId::Water);
    assert!(events.contains(&Event::ObjectiveCompleted {
        objective: ObjectiveId::new(2),
        points: 10
    }));
    assert_eq!(query::score(&world), 10);

    let events = place(&mut world, 1, 1, ElementId::Fire);
    let completed: Vec<ObjectiveId> = events
        .iter()
        .filter_map(|event| match event {
            Event::ObjectiveCompleted { objective, .. } => Some(*objective),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![ObjectiveId::new(1), ObjectiveId::new(3)]);
    assert_eq!(query::score(&world), 160);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::RecordPuzzleSolved {
            puzzle: PuzzleKind::Word,
        },
        &mut events,
    );
    assert_eq!(
        events,
        vec![
            Event::PuzzleRecorded {
                puzzle: PuzzleKind::Word
            },
            Event::ObjectiveCompleted {
                objective: ObjectiveId::new(4),
                points: 25
            },
            Event::ScoreChanged {
                delta: 25,
                score: 185
            },
        ]
    );
    assert!(query::objectives(&world).iter().all(|o| o.completed));
    assert_eq!(query::placements(&world, ElementId::Water), 1);
}
