use life_board::{patterns, Error, Grid, Simulation};
use rand::{rngs::StdRng, SeedableRng};

fn from_matrix(m: &[&[u8]]) -> Grid {
    Grid::from_rows(m.iter().map(|r| r.iter().map(|c| *c == 1).collect()).collect()).unwrap()
}

#[test]
fn step_is_deterministic_and_keeps_dimensions() {
    let mut rng = StdRng::seed_from_u64(11);
    for (rows, cols) in [(1, 1), (1, 7), (7, 1), (5, 9), (30, 30)] {
        let g = Grid::random(rows, cols, 0.5, &mut rng).unwrap();
        let snapshot = g.clone();
        let a = g.step();
        let b = g.step();
        assert_eq!(a, b);
        assert_eq!(a.dims(), (rows, cols));
        assert_eq!(g, snapshot);
    }
}

#[test]
fn all_dead_is_a_fixed_point() {
    for (rows, cols) in [(1, 1), (3, 4), (12, 12)] {
        let g = Grid::empty(rows, cols).unwrap();
        assert_eq!(g.step(), g);
    }
}

#[test]
fn blinker_turns_vertical() {
    let g = from_matrix(&[&[0, 0, 0], &[1, 1, 1], &[0, 0, 0]]);
    assert_eq!(
        g.step().to_matrix(),
        vec![vec![0, 1, 0], vec![0, 1, 0], vec![0, 1, 0]]
    );
}

#[test]
fn glider_moves_one_cell_diagonally_every_four_steps() {
    let glider = patterns::find("glider").unwrap();
    let mut start = Grid::empty(6, 6).unwrap();
    glider.stamp(&mut start, 0, 0).unwrap();
    let mut moved = Grid::empty(6, 6).unwrap();
    glider.stamp(&mut moved, 1, 1).unwrap();

    let mut sim = Simulation::from_grid(start, StdRng::seed_from_u64(0));
    sim.advance(4).unwrap();
    assert_eq!(sim.grid(), &moved);
    assert_eq!(sim.step(), 4);
}

#[test]
fn advance_equals_repeated_single_steps() {
    let mut sim = Simulation::seeded(15, 20, 0.3, 99).unwrap();
    sim.advance(2).unwrap();

    let mut expected = sim.grid().clone();
    for _ in 0..13 {
        expected = expected.step();
    }
    sim.advance(13).unwrap();
    assert_eq!(sim.grid(), &expected);
    assert_eq!(sim.step(), 15);
}

#[test]
fn resize_with_same_dimensions_is_a_no_op() {
    let mut sim = Simulation::seeded(8, 9, 0.4, 3).unwrap();
    sim.advance(5).unwrap();
    let before = sim.grid().clone();
    sim.resize(8, 9, 0.4).unwrap();
    assert_eq!(sim.grid(), &before);
    assert_eq!(sim.step(), 5);
}

#[test]
fn resets_put_step_back_to_zero() {
    let mut sim = Simulation::seeded(8, 8, 0.4, 3).unwrap();

    sim.advance(3).unwrap();
    sim.resize(10, 6, 0.4).unwrap();
    assert_eq!((sim.step(), sim.rows(), sim.cols()), (0, 10, 6));

    sim.advance(3).unwrap();
    sim.randomize(0.4).unwrap();
    assert_eq!(sim.step(), 0);

    sim.advance(3).unwrap();
    sim.clear();
    assert_eq!(sim.step(), 0);
    assert!(sim.grid().to_matrix().iter().flatten().all(|c| *c == 0));
}

#[test]
fn invalid_input_is_rejected_without_side_effects() {
    let mut sim = Simulation::seeded(6, 6, 0.5, 8).unwrap();
    sim.advance(1).unwrap();
    let before = sim.grid().clone();

    assert!(matches!(sim.advance(0), Err(Error::InvalidArgument { .. })));
    assert_eq!(sim.randomize(1.5), Err(Error::InvalidProbability(1.5)));
    assert_eq!(
        sim.resize(0, 6, 0.5),
        Err(Error::InvalidDimension { rows: 0, cols: 6 })
    );
    assert_eq!(sim.grid(), &before);
    assert_eq!(sim.step(), 1);

    assert_eq!(
        Simulation::seeded(0, 6, 0.5, 8).err(),
        Some(Error::InvalidDimension { rows: 0, cols: 6 })
    );
    assert_eq!(
        Grid::random(4, 4, 1.5, &mut StdRng::seed_from_u64(0)),
        Err(Error::InvalidProbability(1.5))
    );
}

#[test]
fn read_side_reports_zero_one_matrix() {
    let sim = Simulation::seeded(4, 5, 0.5, 21).unwrap();
    let m = sim.grid().to_matrix();
    assert_eq!(m.len(), 4);
    assert!(m.iter().all(|r| r.len() == 5));
    assert!(m.iter().flatten().all(|c| *c <= 1));
    assert_eq!(
        m.iter().flatten().filter(|c| **c == 1).count(),
        sim.grid().population()
    );
}
