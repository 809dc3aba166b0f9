//! Directional geometry for backstab detection.

use crate::state::{Facing, Position};

/// Side of the defender the attack arrives from.
///
/// Uses the dominant axis between the two cells; equal magnitudes resolve to
/// the row axis.
pub fn attack_side(attacker: Position, defender: Position) -> Facing {
    Facing::toward(defender, attacker)
}

/// An attack is a backstab when it arrives from directly behind the defender.
pub fn is_backstab(attacker: Position, defender: Position, defender_facing: Facing) -> bool {
    attack_side(attacker, defender) == defender_facing.opposite()
}
