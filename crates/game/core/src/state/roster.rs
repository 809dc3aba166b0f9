use super::common::{Position, Side, UnitId};
use super::unit::Unit;

/// Ordered collection of every unit in a battle.
///
/// Roster order is the scheduling order for the enemy phase and the
/// tie-breaking order for AI target selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    units: Vec<Unit>,
}

impl Roster {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    pub fn living(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| unit.is_alive())
    }

    pub fn living_on(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.living().filter(move |unit| unit.side == side)
    }

    pub(crate) fn units_on_mut(&mut self, side: Side) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut().filter(move |unit| unit.side == side)
    }

    /// The living unit standing on `position`, if any.
    pub fn occupant_at(&self, position: Position) -> Option<&Unit> {
        self.living().find(|unit| unit.position == position)
    }

    /// Whether `position` holds a living unit other than `mover`.
    pub fn is_blocked_for(&self, position: Position, mover: UnitId) -> bool {
        self.occupant_at(position)
            .is_some_and(|occupant| occupant.id != mover)
    }

    pub fn all_defeated(&self, side: Side) -> bool {
        self.living_on(side).next().is_none()
    }

    /// Returns true when no two living units share a cell.
    pub fn occupancy_is_consistent(&self) -> bool {
        let living: Vec<&Unit> = self.living().collect();
        living.iter().enumerate().all(|(index, unit)| {
            living[index + 1..]
                .iter()
                .all(|other| other.position != unit.position)
        })
    }
}
