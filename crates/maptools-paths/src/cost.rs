use maptools_core::Direction;
use rust_decimal::Decimal;

/// Cost of an orthogonal step: `1.0`.
pub const STRAIGHT_COST: Decimal = Decimal::from_parts(10, 0, 0, false, 1);

/// Cost of a diagonal step: √2 truncated to four decimal places, `1.4142`.
pub const DIAGONAL_COST: Decimal = Decimal::from_parts(14142, 0, 0, false, 4);

/// Cost of a single step in `dir`.
#[inline]
pub fn step_cost(dir: Direction) -> Decimal {
    if dir.is_diagonal() {
        DIAGONAL_COST
    } else {
        STRAIGHT_COST
    }
}
