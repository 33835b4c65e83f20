use katamari_core::{Cell, ClaimedSet, Direction, Location, Move, PlayerId};
use katamari_system_battle::{BattleAllocator, Config};
use katamari_world::{Frontier, Grid};

const ME: PlayerId = PlayerId::new(1);
const THEM: PlayerId = PlayerId::new(2);

/// Row 1 of a wide board: enemy, empty contact cell, then our line of cells.
fn front_line(width: u16, ours: &[u8]) -> Grid {
    let mut grid = Grid::from_fn(width, 3, |_| Cell::neutral(10))
        .expect("valid grid")
        .with_cell(Location::new(0, 1), Cell::new(THEM, 50, 1))
        .with_cell(Location::new(1, 1), Cell::neutral(0));
    for (offset, strength) in ours.iter().enumerate() {
        let x = 2 + offset as u16;
        grid = grid.with_cell(Location::new(x, 1), Cell::new(ME, *strength, 1));
    }
    grid
}

#[test]
fn line_cascades_toward_contact() {
    let grid = front_line(8, &[100, 100, 100]);
    let contact = Location::new(1, 1);
    assert_eq!(Frontier::classify(&grid, ME).contact(), &[contact]);

    let assignment = BattleAllocator::default()
        .assign(&grid, ME, contact, &ClaimedSet::new())
        .expect("pulls only between neighbours");

    assert_eq!(
        assignment.moves(),
        &[
            Move::new(Location::new(2, 1), Direction::West),
            Move::new(Location::new(3, 1), Direction::West),
            Move::new(Location::new(4, 1), Direction::West),
        ]
    );
    assert_eq!(assignment.claimed().len(), 3);
    assert!(!assignment.claimed().contains(&contact));
}

#[test]
fn pulls_stop_short_of_the_ceiling() {
    let contact = Location::new(2, 2);
    let grid = Grid::from_fn(5, 5, |_| Cell::neutral(10))
        .expect("valid grid")
        .with_cell(contact, Cell::neutral(0))
        .with_cell(Location::new(2, 1), Cell::new(THEM, 80, 1))
        .with_cell(Location::new(3, 2), Cell::new(ME, 200, 1))
        .with_cell(Location::new(2, 3), Cell::new(ME, 55, 1))
        .with_cell(Location::new(1, 2), Cell::new(ME, 40, 1));

    let assignment = BattleAllocator::default()
        .assign(&grid, ME, contact, &ClaimedSet::new())
        .expect("pulls only between neighbours");

    // 200 + 55 would land exactly on the ceiling, which is not allowed;
    // 200 + 40 stays under it.
    assert_eq!(
        assignment.moves(),
        &[
            Move::new(Location::new(3, 2), Direction::West),
            Move::new(Location::new(1, 2), Direction::East),
        ]
    );
    assert!(assignment.claimed().contains(&Location::new(2, 3)));
    assert_eq!(assignment.claimed().len(), 3);
}

#[test]
fn depth_limit_bounds_the_cascade() {
    let grid = front_line(12, &[1, 1, 1, 1, 1, 1]);
    let allocator = BattleAllocator::new(Config::new(1, 3, 255));

    let assignment = allocator
        .assign(&grid, ME, Location::new(1, 1), &ClaimedSet::new())
        .expect("pulls only between neighbours");

    let sources: Vec<_> = assignment.moves().iter().map(Move::source).collect();
    assert_eq!(
        sources,
        vec![
            Location::new(2, 1),
            Location::new(3, 1),
            Location::new(4, 1),
            Location::new(5, 1),
        ]
    );
    assert!(assignment
        .moves()
        .iter()
        .all(|step| step.direction() == Direction::West));
    assert!(!assignment.claimed().contains(&Location::new(6, 1)));
}

#[test]
fn claimed_cells_cut_the_cascade() {
    let grid = front_line(8, &[100, 100, 100]);
    let claimed: ClaimedSet = [Location::new(2, 1)].into_iter().collect();

    let assignment = BattleAllocator::default()
        .assign(&grid, ME, Location::new(1, 1), &claimed)
        .expect("pulls only between neighbours");

    assert!(assignment.moves().is_empty());
    assert!(assignment.claimed().is_empty());
}

#[test]
fn later_battles_respect_earlier_claims() {
    // Two contact points share our single column of cells.
    let grid = Grid::from_fn(5, 4, |_| Cell::neutral(10))
        .expect("valid grid")
        .with_cell(Location::new(0, 1), Cell::new(THEM, 20, 1))
        .with_cell(Location::new(1, 1), Cell::neutral(0))
        .with_cell(Location::new(2, 1), Cell::new(ME, 30, 1))
        .with_cell(Location::new(2, 2), Cell::new(ME, 30, 1))
        .with_cell(Location::new(1, 2), Cell::neutral(0))
        .with_cell(Location::new(0, 2), Cell::new(THEM, 20, 1));

    let contacts = Frontier::classify(&grid, ME).contact().to_vec();
    assert_eq!(contacts, vec![Location::new(1, 1), Location::new(1, 2)]);

    let mut claimed = ClaimedSet::new();
    let mut moves = Vec::new();
    let served = BattleAllocator::new(Config::new(2, 10, 255))
        .handle(&grid, ME, &contacts, &mut claimed, &mut moves)
        .expect("pulls only between neighbours");

    assert_eq!(served, 2);
    assert_eq!(
        moves,
        vec![
            Move::new(Location::new(2, 1), Direction::West),
            Move::new(Location::new(2, 2), Direction::North),
        ]
    );
    assert_eq!(claimed.len(), 2);
}

#[test]
fn single_battle_by_default() {
    let grid = front_line(8, &[100]);
    let contacts = [Location::new(1, 1), Location::new(1, 1)];
    let mut claimed = ClaimedSet::new();
    let mut moves = Vec::new();

    let served = BattleAllocator::default()
        .handle(&grid, ME, &contacts, &mut claimed, &mut moves)
        .expect("pulls only between neighbours");

    assert_eq!(served, 1);
    assert_eq!(moves.len(), 1);
}
