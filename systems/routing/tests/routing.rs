use katamari_core::{Cell, ClaimedSet, Direction, Location, Move, PlayerId};
use katamari_system_routing::{Config, FrontierRouter, OvercapLedger, RouteSummary};
use katamari_world::{Frontier, Grid};

const ME: PlayerId = PlayerId::new(1);

/// 6x3 board we own entirely except the neutral column at x = 0, so the
/// perimeter is the columns x = 1 and x = 5.
fn corridor(strength: u8) -> Grid {
    Grid::from_fn(6, 3, |location| {
        if location.x() == 0 {
            Cell::neutral(10)
        } else {
            Cell::new(ME, strength, 1)
        }
    })
    .expect("valid grid")
}

fn route(
    router: &FrontierRouter,
    grid: &Grid,
    interior: &[Location],
    claimed: &mut ClaimedSet,
    ledger: &mut OvercapLedger,
) -> (Vec<Move>, RouteSummary) {
    let frontier = Frontier::classify(grid, ME);
    let mut moves = Vec::new();
    let summary = router
        .route(grid, frontier.perimeter(), interior, claimed, ledger, &mut moves)
        .expect("router only steps onto neighbours");
    (moves, summary)
}

#[test]
fn strong_cells_step_toward_nearest_perimeter() {
    let grid = corridor(100);
    let frontier = Frontier::classify(&grid, ME);
    let mut claimed = ClaimedSet::new();
    let mut ledger = OvercapLedger::new();

    let (moves, summary) = route(
        &FrontierRouter::default(),
        &grid,
        frontier.interior(),
        &mut claimed,
        &mut ledger,
    );

    assert_eq!(summary, RouteSummary { moved: 9, held: 0 });
    assert_eq!(
        &moves[..3],
        &[
            Move::new(Location::new(2, 0), Direction::West),
            Move::new(Location::new(3, 0), Direction::West),
            Move::new(Location::new(4, 0), Direction::East),
        ]
    );
    assert_eq!(ledger.inbound(Location::new(1, 0)), 100);
    assert_eq!(claimed.len(), 9);
}

#[test]
fn ledger_vetoes_overcapping_steps() {
    let grid = corridor(100);
    let mut claimed = ClaimedSet::new();
    let mut ledger = OvercapLedger::new();
    ledger.add(Location::new(1, 0), 250);

    let (moves, _) = route(
        &FrontierRouter::default(),
        &grid,
        &[Location::new(2, 0)],
        &mut claimed,
        &mut ledger,
    );

    // West would put 350 on (1, 0); the remaining neighbours tie and the
    // first in cardinal order wins.
    assert_eq!(moves, vec![Move::new(Location::new(2, 0), Direction::North)]);
    assert_eq!(ledger.inbound(Location::new(2, 2)), 100);
}

#[test]
fn boxed_in_cells_hold_and_book_themselves() {
    let grid = corridor(100);
    let origin = Location::new(3, 1);
    let mut claimed = ClaimedSet::new();
    let mut ledger = OvercapLedger::new();
    for neighbor in grid.neighbors(origin) {
        ledger.add(neighbor, 250);
    }

    let (moves, summary) = route(
        &FrontierRouter::default(),
        &grid,
        &[origin],
        &mut claimed,
        &mut ledger,
    );

    assert!(moves.is_empty());
    assert_eq!(summary, RouteSummary { moved: 0, held: 1 });
    assert_eq!(ledger.inbound(origin), 100);
    assert!(claimed.contains(origin));
}

#[test]
fn weak_cells_are_booked_before_strong_cells_move() {
    let weak = Location::new(2, 0);
    let strong = Location::new(3, 0);
    let grid = corridor(100)
        .with_cell(weak, Cell::new(ME, 49, 1))
        .with_cell(strong, Cell::new(ME, 255, 1));
    let mut claimed = ClaimedSet::new();
    let mut ledger = OvercapLedger::new();

    // The strong cell is listed first, yet the weak cell still holds its spot.
    let (moves, summary) = route(
        &FrontierRouter::default(),
        &grid,
        &[strong, weak],
        &mut claimed,
        &mut ledger,
    );

    assert_eq!(moves, vec![Move::new(strong, Direction::North)]);
    assert_eq!(summary, RouteSummary { moved: 1, held: 1 });
    assert_eq!(ledger.inbound(weak), 49);
}

#[test]
fn claimed_interior_cells_are_skipped() {
    let grid = corridor(100);
    let frontier = Frontier::classify(&grid, ME);
    let mut claimed: ClaimedSet = frontier.interior().iter().copied().collect();
    let mut ledger = OvercapLedger::new();

    let (moves, summary) = route(
        &FrontierRouter::new(Config::new(50, 300)),
        &grid,
        frontier.interior(),
        &mut claimed,
        &mut ledger,
    );

    assert!(moves.is_empty());
    assert_eq!(summary, RouteSummary::default());
}

#[test]
fn no_perimeter_means_everything_holds() {
    let grid = Grid::from_fn(3, 3, |_| Cell::new(ME, 120, 1)).expect("valid grid");
    let frontier = Frontier::classify(&grid, ME);
    assert!(frontier.perimeter().is_empty());

    let mut claimed = ClaimedSet::new();
    let mut ledger = OvercapLedger::new();
    let (moves, summary) = route(
        &FrontierRouter::default(),
        &grid,
        frontier.interior(),
        &mut claimed,
        &mut ledger,
    );

    assert!(moves.is_empty());
    assert_eq!(summary.held, 9);
}
