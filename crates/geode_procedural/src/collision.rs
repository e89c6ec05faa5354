//! # Collision Index
//!
//! Axis-aligned occupancy and range queries over placed elements.
//!
//! The occupancy test is a box test, not a circular one: a point occupies
//! the square [x-r, x+r] x [y-r, y+r]. This matches the behavior the
//! placement rules were balanced against and is an intentional
//! approximation, not a bug.
//!
//! Queries are brute-force linear scans. At the documented scale (hundreds
//! to low thousands of elements) this beats maintaining a spatial index;
//! past ~10k elements a uniform grid should replace it.

use geode_core::PlacedElement;

/// In-memory index of placed elements supporting box queries.
#[derive(Clone, Debug, Default)]
pub struct CollisionIndex {
    elements: Vec<PlacedElement>,
}

impl CollisionIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index over already-placed elements (e.g. when generating
    /// without a full regeneration).
    #[must_use]
    pub fn from_elements(elements: Vec<PlacedElement>) -> Self {
        Self { elements }
    }

    /// Adds an element to the index.
    pub fn insert(&mut self, element: PlacedElement) {
        self.elements.push(element);
    }

    /// Whether any element lies within the box
    /// [x-radius, x+radius] x [y-radius, y+radius].
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32, radius: i32) -> bool {
        self.elements
            .iter()
            .any(|e| (e.x - x).abs() <= radius && (e.y - y).abs() <= radius)
    }

    /// All elements inside the inclusive axis-aligned range.
    #[must_use]
    pub fn query(&self, min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Vec<&PlacedElement> {
        self.elements
            .iter()
            .filter(|e| e.x >= min_x && e.x <= max_x && e.y >= min_y && e.y <= max_y)
            .collect()
    }

    /// Number of elements inside the inclusive axis-aligned range.
    #[must_use]
    pub fn count_in_area(&self, min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> usize {
        self.elements
            .iter()
            .filter(|e| e.x >= min_x && e.x <= max_x && e.y >= min_y && e.y <= max_y)
            .count()
    }

    /// Removes the first element (insertion order) within the tolerance box
    /// around (x, y). Returns whether anything was removed.
    pub fn remove_near(&mut self, x: i32, y: i32, tolerance: i32) -> bool {
        let found = self
            .elements
            .iter()
            .position(|e| (e.x - x).abs() <= tolerance && (e.y - y).abs() <= tolerance);
        match found {
            Some(idx) => {
                self.elements.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Number of indexed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The indexed elements, in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[PlacedElement] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geode_core::{Biome, DecayState};

    fn element(x: i32, y: i32) -> PlacedElement {
        PlacedElement {
            id: 0,
            element_type: 1,
            x,
            y,
            rotation: 0.0,
            scale: 1.0,
            variant: None,
            biome: Biome::Meadow,
            interactable: false,
            interactions: 0,
            decay_state: DecayState::Pristine,
            metadata: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_occupied_immediately_after_insert() {
        let mut index = CollisionIndex::new();
        index.insert(element(10, 10));

        assert!(index.is_occupied(10, 10, 2));
        // Inside the box on one axis only is still clear on the other
        assert!(!index.is_occupied(20, 10, 2));
        // More than the radius away in both axes is clear
        assert!(!index.is_occupied(13, 13, 2));
    }

    #[test]
    fn test_box_test_not_circle() {
        let mut index = CollisionIndex::new();
        index.insert(element(0, 0));

        // (2, 2) is Euclidean distance ~2.83 away but inside the radius-2 box
        assert!(
            index.is_occupied(2, 2, 2),
            "occupancy is a box test; the corner is occupied"
        );
    }

    #[test]
    fn test_query_and_count_agree() {
        let mut index = CollisionIndex::new();
        for (x, y) in [(0, 0), (5, 5), (10, 10), (5, 20)] {
            index.insert(element(x, y));
        }

        let hits = index.query(0, 10, 0, 10);
        assert_eq!(hits.len(), 3);
        assert_eq!(index.count_in_area(0, 10, 0, 10), 3);
        assert_eq!(index.count_in_area(6, 9, 6, 9), 0);
    }

    #[test]
    fn test_remove_near_takes_first_match() {
        let mut index = CollisionIndex::new();
        index.insert(element(4, 4));
        index.insert(element(5, 5));

        assert!(index.remove_near(5, 5, 1));
        assert_eq!(index.len(), 1, "only one element removed per call");
        assert_eq!(index.elements()[0].x, 5, "first match in insertion order goes first");

        assert!(!index.remove_near(50, 50, 2));
    }
}
