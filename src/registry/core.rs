use std::collections::{HashMap, HashSet};

use blake3::Hash;

use crate::container::ElementPlacement;
use crate::error::Result;
use crate::layout::ElementId;

#[derive(Debug, Clone)]
struct PlacementState {
    placement: ElementPlacement,
    hash: Hash,
    is_dirty: bool,
}

fn placement_hash(placement: &ElementPlacement) -> Result<Hash> {
    let bytes = serde_json::to_vec(placement)?;
    Ok(blake3::hash(&bytes))
}

/// Registry mapping elements to their last resolved placements.
///
/// A reflow produces the full placement set; `sync` diffs it against the
/// stored state by content hash so unchanged placements are never re-sent
/// to the host, and entries whose elements disappeared are dropped in the
/// same pass. There is no way for an entry to outlive its element.
#[derive(Debug, Default)]
pub struct PlacementRegistry {
    entries: HashMap<ElementId, PlacementState>,
    dirty: HashSet<ElementId>,
}

impl PlacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the registry with a freshly solved placement set.
    pub fn sync(&mut self, placements: &[ElementPlacement]) -> Result<()> {
        use std::collections::hash_map::Entry;

        let mut seen: HashSet<&str> = HashSet::with_capacity(placements.len());
        let mut newly_dirty = Vec::new();

        for placement in placements {
            seen.insert(placement.id.as_str());
            let hash = placement_hash(placement)?;
            match self.entries.entry(placement.id.clone()) {
                Entry::Occupied(mut entry) => {
                    let state = entry.get_mut();
                    if state.hash != hash {
                        state.placement = placement.clone();
                        state.hash = hash;
                        state.is_dirty = true;
                        newly_dirty.push(placement.id.clone());
                    }
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(PlacementState {
                        placement: placement.clone(),
                        hash,
                        is_dirty: true,
                    });
                    newly_dirty.push(placement.id.clone());
                }
            }
        }

        // Elements no longer placed (hidden or removed) leave the registry.
        let stale: Vec<ElementId> = self
            .entries
            .keys()
            .filter(|id| !seen.contains(id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            self.entries.remove(&id);
            self.dirty.remove(&id);
        }

        for id in newly_dirty {
            self.dirty.insert(id);
        }

        Ok(())
    }

    /// Drain the dirty set, returning the placements a host must re-apply.
    pub fn take_dirty(&mut self) -> Vec<ElementPlacement> {
        let mut ids: Vec<ElementId> = self.dirty.drain().collect();
        ids.sort();
        ids.into_iter()
            .filter_map(|id| {
                self.entries.get_mut(&id).map(|state| {
                    state.is_dirty = false;
                    state.placement.clone()
                })
            })
            .collect()
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn placement_of(&self, id: &str) -> Option<&ElementPlacement> {
        self.entries.get(id).map(|state| &state.placement)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::Breakpoint;
    use crate::container::{ContainerLayout, RowOptions};
    use crate::geometry::Size;
    use crate::layout::Column;
    use crate::margin::BoxMargin;
    use crate::span::Span;

    fn solved_placements(width: f64) -> Vec<ElementPlacement> {
        let mut container = ContainerLayout::new().with_margin(BoxMargin::none());
        container.attach(Size::new(width, 600.0), None, false);
        container.add_row(
            vec![
                Column::new("a", Span::of(4)),
                Column::new("b", Span::of(4)),
                Column::new("c", Span::of(4)).for_size(Breakpoint::Md, Span::ZERO),
            ],
            RowOptions::default(),
        );
        let class = Breakpoint::classify(width);
        container.solve(class).unwrap().placements
    }

    #[test]
    fn first_sync_marks_everything_dirty() {
        let mut registry = PlacementRegistry::new();
        registry.sync(&solved_placements(700.0)).unwrap();

        let dirty = registry.take_dirty();
        assert_eq!(dirty.len(), 3);
        assert!(!registry.has_dirty());
    }

    #[test]
    fn identical_sync_produces_no_dirty_entries() {
        let mut registry = PlacementRegistry::new();
        registry.sync(&solved_placements(700.0)).unwrap();
        registry.take_dirty();

        registry.sync(&solved_placements(700.0)).unwrap();
        assert!(!registry.has_dirty());
        assert!(registry.take_dirty().is_empty());
    }

    #[test]
    fn width_change_dirties_every_moved_placement() {
        let mut registry = PlacementRegistry::new();
        registry.sync(&solved_placements(700.0)).unwrap();
        registry.take_dirty();

        registry.sync(&solved_placements(1200.0)).unwrap();
        let dirty = registry.take_dirty();
        // 1200 is lg: "c" hides, the registry drops it, a/b move.
        assert_eq!(dirty.len(), 2);
        assert!(registry.placement_of("c").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn hidden_element_reappears_as_dirty() {
        let mut registry = PlacementRegistry::new();
        registry.sync(&solved_placements(1200.0)).unwrap();
        registry.take_dirty();
        assert!(registry.placement_of("c").is_none());

        registry.sync(&solved_placements(700.0)).unwrap();
        let dirty = registry.take_dirty();
        assert!(dirty.iter().any(|p| p.id == "c"));
    }
}
