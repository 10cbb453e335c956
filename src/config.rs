use crate::ship::ShipKind;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIP_KINDS: usize = 5;
pub const SHIP_KINDS: [ShipKind; NUM_SHIP_KINDS] = [
    ShipKind::AircraftCarrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

/// Total number of ship segments when one ship of each kind is placed.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// How many random anchors are tried before random placement gives up.
pub const PLACEMENT_ATTEMPTS: usize = 1000;

/// Returns `true` if `(x, y)` lies on the board.
pub fn in_bounds(x: i32, y: i32) -> bool {
    let n = BOARD_SIZE as i32;
    (0..n).contains(&x) && (0..n).contains(&y)
}
