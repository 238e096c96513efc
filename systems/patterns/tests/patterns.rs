use alchemy_grid_core::{CellCoord, ElementId, Grid, PatternKind};
use alchemy_grid_system_patterns::{scan, PatternMutation};

fn grid(text: &str) -> Grid {
    Grid::from_glyphs(text).expect("valid board")
}

#[test]
fn earth_square_reinforces_four_cells() {
    let mut board = grid(
        "EE.
         EE.
         ...",
    );
    let matches = scan(&mut board);

    assert_eq!(matches.len(), 1, "exactly one square: {matches:?}");
    let found = &matches[0];
    assert_eq!(found.kind, PatternKind::EarthSquare);
    assert_eq!(found.score, 200);
    assert_eq!(found.mutation, PatternMutation::Reinforced);
    let stable = board
        .occupied()
        .filter(|(_, cell)| cell.flags.stable && cell.flags.strength == 1)
        .count();
    assert_eq!(stable, 4, "all four earth cells are stable");
}

#[test]
fn overlapping_earth_squares_each_count() {
    let mut board = grid(
        "EEE
         EEE",
    );
    let matches = scan(&mut board);

    assert_eq!(matches.len(), 2);
    let middle = board.get(CellCoord::new(0, 1)).expect("earth");
    assert_eq!(middle.flags.strength, 2, "shared cells are reinforced twice");
}

#[test]
fn metal_fire_path_energizes_metal_in_both_orientations() {
    let mut board = grid(
        "FMM.
         ...M
         ...M
         ...F",
    );
    let matches = scan(&mut board);

    let kinds: Vec<PatternKind> = matches.iter().map(|m| m.kind).collect();
    assert_eq!(kinds, [PatternKind::MetalFirePath, PatternKind::MetalFirePath]);
    assert_eq!(matches.iter().map(|m| m.score).sum::<u32>(), 500);
    for cell in [
        CellCoord::new(0, 1),
        CellCoord::new(0, 2),
        CellCoord::new(1, 3),
        CellCoord::new(2, 3),
    ] {
        let metal = board.get(cell).expect("metal");
        assert!(metal.flags.conductive, "{cell:?} should conduct");
        assert_eq!(metal.flags.power, 2);
    }
    let fire = board.get(CellCoord::new(0, 0)).expect("fire");
    assert!(!fire.flags.conductive, "fire is not energized");
}

#[test]
fn broken_metal_run_does_not_match() {
    let mut board = grid("FM.M");
    assert!(scan(&mut board).is_empty());
}

#[test]
fn horizontal_combo_fuses_into_the_middle_cell() {
    let mut board = grid(
        "MEF
         ...",
    );
    let matches = scan(&mut board);

    assert_eq!(matches.len(), 1);
    let found = &matches[0];
    assert_eq!(found.kind, PatternKind::ThreeElementCombo);
    assert_eq!(found.score, 300);
    assert_eq!(
        found.mutation,
        PatternMutation::Combined {
            element: ElementId::Forge,
            cell: CellCoord::new(0, 1),
        }
    );
    assert_eq!(found.mutation.created(), Some(ElementId::Forge));
    assert_eq!(board.render(), ".G.\n...\n");
}

#[test]
fn l_shaped_and_triangle_templates_match() {
    let mut l_down = grid(
        "A.
         LM",
    );
    let mut triangle = grid(
        ".S.
         E.W",
    );

    let l_matches = scan(&mut l_down);
    let triangle_matches = scan(&mut triangle);

    assert_eq!(l_matches.len(), 1);
    assert_eq!(l_matches[0].score, 400);
    assert_eq!(l_down.render(), "..\nZ.\n", "lightning lands on the corner");
    assert_eq!(triangle_matches.len(), 1);
    assert_eq!(triangle_matches[0].score, 350);
    assert_eq!(triangle.render(), ".Y.\n...\n", "geyser lands on the apex");
}

#[test]
fn incomplete_combo_is_ignored() {
    let mut board = grid("EW.");
    assert!(scan(&mut board).is_empty());
    assert_eq!(board.render(), "EW.\n");
}

#[test]
fn water_flow_circuit_marks_every_water_cell() {
    let mut board = grid(
        "WW.
         WW.
         ..W",
    );
    let matches = scan(&mut board);

    assert_eq!(matches.len(), 1);
    let found = &matches[0];
    assert_eq!(found.kind, PatternKind::WaterFlowCircuit);
    assert_eq!(found.score, 300);
    assert!(found.cells.is_empty());
    for (_, cell) in board.occupied() {
        assert!(cell.flags.flowing, "every water cell flows, even detached ones");
        assert_eq!(cell.flags.power, 2);
    }
}

#[test]
fn a_water_line_is_not_a_circuit() {
    let mut board = grid("WWWWW");
    assert!(scan(&mut board).is_empty());
}

#[test]
fn fire_circle_ignites_plasma_in_the_centre() {
    let mut board = grid(
        ".....
         .FFF.
         .F.F.
         .FF..
         .....",
    );
    let matches = scan(&mut board);

    assert_eq!(matches.len(), 1);
    let found = &matches[0];
    assert_eq!(found.kind, PatternKind::FireCircle);
    assert_eq!(found.score, 400);
    assert_eq!(found.cells.len(), 7);
    assert_eq!(found.mutation.created(), Some(ElementId::Plasma));
    assert_eq!(board.element_at(CellCoord::new(2, 2)), Some(ElementId::Plasma));
}

#[test]
fn fire_circle_needs_a_margin_from_the_edges() {
    let mut board = grid(
        "FFF.
         F.F.
         FFF.
         ....",
    );
    assert!(scan(&mut board).is_empty(), "centre too close to the edge");
}

#[test]
fn fire_circle_needs_six_fire() {
    let mut board = grid(
        ".....
         .FF..
         .F.F.
         .FF..
         .....",
    );
    let matches = scan(&mut board);
    assert_eq!(matches.len(), 1);

    let mut sparse = grid(
        ".....
         .FF..
         .F.F.
         ..F..
         .....",
    );
    assert!(scan(&mut sparse).is_empty(), "five fire are not enough");
}
