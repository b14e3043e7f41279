//! The nine Lo Shu palaces and the flying walk that fills them.
//!
//! Flying starts at the ju palace and steps through palace numbers in
//! ascending order on a Yang board or descending order on a Yin board,
//! wrapping from 9 to 1 (or 1 to 9). Gates and deities skip the centre
//! palace without consuming an item.

use serde::{Deserialize, Serialize};

use crate::board::{BoardType, Ju};

/// One of the nine Lo Shu palaces, numbered 1-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Palace(u8);

/// All palaces in ascending number order.
pub const PALACES: [Palace; 9] = [
    Palace(1),
    Palace(2),
    Palace(3),
    Palace(4),
    Palace(5),
    Palace(6),
    Palace(7),
    Palace(8),
    Palace(9),
];

impl Palace {
    /// The centre palace, which never receives a gate or deity.
    pub const CENTER: Palace = Palace(5);

    /// Creates a [`Palace`], returning `None` outside `1..=9`.
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= 9 {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Palace number, 1-9.
    pub const fn number(self) -> u8 {
        self.0
    }

    const fn slot(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for Palace {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("palace must be in 1..=9, got {value}"))
    }
}

impl From<Palace> for u8 {
    fn from(p: Palace) -> u8 {
        p.0
    }
}

impl std::fmt::Display for Palace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PalaceMap
// ---------------------------------------------------------------------------

/// A fixed nine-slot mapping from palace to an optional item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PalaceMap<T> {
    slots: [Option<T>; 9],
}

impl<T> PalaceMap<T> {
    /// A map with every palace empty.
    pub fn empty() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// The item in `palace`, if any.
    pub fn get(&self, palace: Palace) -> Option<&T> {
        self.slots[palace.slot()].as_ref()
    }

    fn place(&mut self, palace: Palace, item: T) {
        self.slots[palace.slot()] = Some(item);
    }

    /// Every palace in ascending order with its item.
    pub fn iter(&self) -> impl Iterator<Item = (Palace, Option<&T>)> + '_ {
        PALACES.into_iter().zip(self.slots.iter().map(Option::as_ref))
    }

    /// Occupied palaces in ascending order.
    pub fn occupied(&self) -> impl Iterator<Item = (Palace, &T)> + '_ {
        self.iter().filter_map(|(p, item)| item.map(|i| (p, i)))
    }

    /// Number of occupied palaces.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether no palace is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for PalaceMap<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// ---------------------------------------------------------------------------
// Flying
// ---------------------------------------------------------------------------

/// The nine palaces in the order a board visits them starting from `ju`.
///
/// Yang ju 1: 1,2,3,4,5,6,7,8,9. Yin ju 1: 1,9,8,7,6,5,4,3,2.
pub fn flight_path(board_type: BoardType, ju: Ju) -> [Palace; 9] {
    let start = ju.start_offset();
    std::array::from_fn(|step| {
        let offset = match board_type {
            BoardType::Yang => (start + step) % 9,
            BoardType::Yin => (start + 9 - step) % 9,
        };
        PALACES[offset]
    })
}

/// Places `items` along the flight path, one palace per item.
///
/// Nine items fill every palace exactly once; items past the ninth are
/// ignored.
pub fn fly_items<T>(board_type: BoardType, ju: Ju, items: impl IntoIterator<Item = T>) -> PalaceMap<T> {
    let mut map = PalaceMap::empty();
    for (palace, item) in flight_path(board_type, ju).into_iter().zip(items) {
        map.place(palace, item);
    }
    map
}

/// Places `items` along the flight path, stepping over the centre palace
/// without consuming an item. At most eight items are placed.
pub fn fly_items_skipping_center<T>(
    board_type: BoardType,
    ju: Ju,
    items: impl IntoIterator<Item = T>,
) -> PalaceMap<T> {
    let mut map = PalaceMap::empty();
    let path = flight_path(board_type, ju)
        .into_iter()
        .filter(|palace| *palace != Palace::CENTER);
    for (palace, item) in path.zip(items) {
        map.place(palace, item);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ju(n: u8) -> Ju {
        Ju::new(n).unwrap()
    }

    fn numbers(path: [Palace; 9]) -> Vec<u8> {
        path.iter().map(|p| p.number()).collect()
    }

    #[test]
    fn yang_ju_one_ascends() {
        assert_eq!(
            numbers(flight_path(BoardType::Yang, ju(1))),
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9]
        );
    }

    #[test]
    fn yin_ju_one_descends_with_wrap() {
        assert_eq!(
            numbers(flight_path(BoardType::Yin, ju(1))),
            vec![1, 9, 8, 7, 6, 5, 4, 3, 2]
        );
    }

    #[test]
    fn path_starts_at_ju() {
        for n in 1..=9 {
            assert_eq!(flight_path(BoardType::Yang, ju(n))[0].number(), n);
            assert_eq!(flight_path(BoardType::Yin, ju(n))[0].number(), n);
        }
    }

    #[test]
    fn gates_skip_the_centre() {
        let map = fly_items_skipping_center(BoardType::Yang, ju(4), 'a'..='h');
        assert_eq!(map.len(), 8);
        assert!(map.get(Palace::CENTER).is_none());
        assert_eq!(map.get(Palace::new(4).unwrap()), Some(&'a'));
        assert_eq!(map.get(Palace::new(6).unwrap()), Some(&'b'));
    }

    #[test]
    fn extra_items_are_ignored() {
        let map = fly_items(BoardType::Yang, ju(1), 0..20);
        assert_eq!(map.len(), 9);
        assert_eq!(map.get(Palace::new(9).unwrap()), Some(&8));
    }

    #[test]
    fn iter_is_in_palace_order() {
        let map = fly_items(BoardType::Yin, ju(3), 0..9);
        let order: Vec<u8> = map.iter().map(|(p, _)| p.number()).collect();
        assert_eq!(order, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn palace_range() {
        assert!(Palace::new(0).is_none());
        assert!(Palace::new(10).is_none());
        assert_eq!(Palace::new(5), Some(Palace::CENTER));
    }
}
