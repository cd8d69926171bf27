//! Bounding-box spatial index over shape ids.
//!
//! An R-tree with quadratic node splitting. The index stores each shape's
//! id keyed by the bounding box it was inserted with; callers must pass the
//! same box back on removal, which is why the viewport re-derives boxes
//! from its document rather than from live geometry.

use crate::ShapeId;
use kurbo::Rect;

const MAX_ENTRIES: usize = 9;

/// Inclusive overlap test: boxes that merely touch still count as hits.
fn touches(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

fn enlargement(rect: &Rect, add: &Rect) -> f64 {
    rect.union(*add).area() - rect.area()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    rect: Rect,
    id: ShapeId,
}

#[derive(Debug)]
struct Node {
    rect: Rect,
    entries: Vec<Entry>,
    children: Vec<Node>,
}

impl Node {
    fn leaf() -> Self {
        Self {
            rect: Rect::ZERO,
            entries: Vec::new(),
            children: Vec::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn recompute_rect(&mut self) {
        let mut rects = self
            .entries
            .iter()
            .map(|e| e.rect)
            .chain(self.children.iter().map(|c| c.rect));
        self.rect = match rects.next() {
            Some(first) => rects.fold(first, |acc, r| acc.union(r)),
            None => Rect::ZERO,
        };
    }

    fn insert(&mut self, entry: Entry) -> Option<Node> {
        if self.is_leaf() {
            self.entries.push(entry);
            self.recompute_rect();
            if self.entries.len() > MAX_ENTRIES {
                return Some(self.split_entries());
            }
            return None;
        }

        // Least area enlargement, ties broken by smaller area.
        let mut best = 0;
        let mut best_key = (f64::INFINITY, f64::INFINITY);
        for (i, child) in self.children.iter().enumerate() {
            let key = (enlargement(&child.rect, &entry.rect), child.rect.area());
            if key < best_key {
                best_key = key;
                best = i;
            }
        }
        if let Some(sibling) = self.children[best].insert(entry) {
            self.children.push(sibling);
        }
        self.recompute_rect();
        if self.children.len() > MAX_ENTRIES {
            return Some(self.split_children());
        }
        None
    }

    /// Quadratic split: seed with the pair whose combined box wastes the
    /// most area, then assign the rest by least enlargement.
    fn split_entries(&mut self) -> Node {
        let items = std::mem::take(&mut self.entries);
        let (a, b) = pick_seeds(&items, |e| e.rect);
        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut left_rect = items[a].rect;
        let mut right_rect = items[b].rect;
        for (i, item) in items.into_iter().enumerate() {
            if i == a {
                left.push(item);
            } else if i == b {
                right.push(item);
            } else if enlargement(&left_rect, &item.rect) <= enlargement(&right_rect, &item.rect) {
                left_rect = left_rect.union(item.rect);
                left.push(item);
            } else {
                right_rect = right_rect.union(item.rect);
                right.push(item);
            }
        }
        self.entries = left;
        self.recompute_rect();
        let mut sibling = Node::leaf();
        sibling.entries = right;
        sibling.recompute_rect();
        sibling
    }

    fn split_children(&mut self) -> Node {
        let items = std::mem::take(&mut self.children);
        let (a, b) = pick_seeds(&items, |c| c.rect);
        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut left_rect = items[a].rect;
        let mut right_rect = items[b].rect;
        for (i, item) in items.into_iter().enumerate() {
            if i == a {
                left.push(item);
            } else if i == b {
                right.push(item);
            } else if enlargement(&left_rect, &item.rect) <= enlargement(&right_rect, &item.rect) {
                left_rect = left_rect.union(item.rect);
                left.push(item);
            } else {
                right_rect = right_rect.union(item.rect);
                right.push(item);
            }
        }
        self.children = left;
        self.recompute_rect();
        let mut sibling = Node::leaf();
        sibling.children = right;
        sibling.recompute_rect();
        sibling
    }

    fn search(&self, query: &Rect, out: &mut Vec<ShapeId>) {
        if self.is_leaf() {
            for entry in &self.entries {
                if touches(&entry.rect, query) {
                    out.push(entry.id);
                }
            }
            return;
        }
        for child in &self.children {
            if touches(&child.rect, query) {
                child.search(query, out);
            }
        }
    }

    fn remove(&mut self, id: ShapeId, rect: &Rect) -> bool {
        if self.is_leaf() {
            let before = self.entries.len();
            self.entries.retain(|e| e.id != id || e.rect != *rect);
            if self.entries.len() != before {
                self.recompute_rect();
                return true;
            }
            return false;
        }
        for i in 0..self.children.len() {
            if touches(&self.children[i].rect, rect) && self.children[i].remove(id, rect) {
                // Empty subtrees are pruned; partially-filled nodes below
                // the fill minimum are kept, which keeps removal cheap at
                // the cost of some balance.
                if self.children[i].entries.is_empty() && self.children[i].children.is_empty() {
                    self.children.remove(i);
                }
                self.recompute_rect();
                return true;
            }
        }
        false
    }
}

fn pick_seeds<T>(items: &[T], rect_of: impl Fn(&T) -> Rect) -> (usize, usize) {
    let mut worst = f64::NEG_INFINITY;
    let mut pair = (0, 1);
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            let ri = rect_of(&items[i]);
            let rj = rect_of(&items[j]);
            let waste = ri.union(rj).area() - ri.area() - rj.area();
            if waste > worst {
                worst = waste;
                pair = (i, j);
            }
        }
    }
    pair
}

/// R-tree of `(bounding box, shape id)` pairs.
#[derive(Debug)]
pub struct SpatialIndex {
    root: Node,
    len: usize,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            root: Node::leaf(),
            len: 0,
        }
    }

    /// Insert a shape id under the given bounding box.
    pub fn insert(&mut self, id: ShapeId, rect: Rect) {
        if let Some(sibling) = self.root.insert(Entry { rect, id }) {
            let old_root = std::mem::replace(&mut self.root, Node::leaf());
            self.root.children = vec![old_root, sibling];
            self.root.recompute_rect();
        }
        self.len += 1;
    }

    /// Remove the entry for `id` that was inserted under exactly `rect`.
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: ShapeId, rect: Rect) -> bool {
        let removed = self.root.remove(id, &rect);
        if removed {
            self.len -= 1;
            // Collapse a root left with a single child.
            if self.root.children.len() == 1 {
                if let Some(child) = self.root.children.pop() {
                    self.root = child;
                }
            }
        }
        removed
    }

    /// All ids whose boxes intersect (or touch) the query box.
    pub fn search(&self, query: Rect) -> Vec<ShapeId> {
        let mut out = Vec::new();
        if self.len > 0 {
            self.root.search(&query, &mut out);
        }
        out
    }

    pub fn clear(&mut self) {
        self.root = Node::leaf();
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::new(x0, y0, x1, y1)
    }

    #[test]
    fn test_insert_and_search() {
        let mut index = SpatialIndex::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        index.insert(a, rect(0.0, 0.0, 10.0, 10.0));
        index.insert(b, rect(100.0, 100.0, 110.0, 110.0));

        let hits = index.search(rect(5.0, 5.0, 6.0, 6.0));
        assert_eq!(hits, vec![a]);
        assert!(index.search(rect(50.0, 50.0, 60.0, 60.0)).is_empty());
    }

    #[test]
    fn test_touching_boxes_count_as_hits() {
        let mut index = SpatialIndex::new();
        let a = Uuid::new_v4();
        index.insert(a, rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(index.search(rect(10.0, 10.0, 20.0, 20.0)), vec![a]);
    }

    #[test]
    fn test_remove_requires_matching_rect() {
        let mut index = SpatialIndex::new();
        let a = Uuid::new_v4();
        index.insert(a, rect(0.0, 0.0, 10.0, 10.0));
        assert!(!index.remove(a, rect(0.0, 0.0, 9.0, 9.0)));
        assert!(index.remove(a, rect(0.0, 0.0, 10.0, 10.0)));
        assert!(index.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut index = SpatialIndex::new();
        index.insert(Uuid::new_v4(), rect(0.0, 0.0, 1.0, 1.0));
        index.clear();
        assert!(index.is_empty());
        assert!(index.search(rect(0.0, 0.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_thousand_entries_split_and_query() {
        let mut index = SpatialIndex::new();
        let mut expected = Vec::new();
        for i in 0..1000 {
            let x = (i % 100) as f64 * 10.0;
            let y = (i / 100) as f64 * 10.0;
            let id = Uuid::new_v4();
            index.insert(id, rect(x, y, x + 5.0, y + 5.0));
            if x < 30.0 && y < 30.0 {
                expected.push(id);
            }
        }
        assert_eq!(index.len(), 1000);

        let mut hits = index.search(rect(0.0, 0.0, 28.0, 28.0));
        hits.sort();
        expected.sort();
        assert_eq!(hits, expected);
    }

    #[test]
    fn test_single_hit_then_remove_then_none() {
        let mut index = SpatialIndex::new();
        let mut target = None;
        for i in 0..1000 {
            let x = (i % 100) as f64 * 100.0;
            let y = (i / 100) as f64 * 100.0;
            let id = Uuid::new_v4();
            index.insert(id, rect(x, y, x + 5.0, y + 5.0));
            if i == 577 {
                target = Some((id, rect(x, y, x + 5.0, y + 5.0)));
            }
        }
        let (id, r) = target.unwrap();

        let query = rect(r.x0 - 1.0, r.y0 - 1.0, r.x1 + 1.0, r.y1 + 1.0);
        assert_eq!(index.search(query), vec![id]);

        assert!(index.remove(id, r));
        assert!(index.search(query).is_empty());
    }

    #[test]
    fn test_remove_under_deep_tree() {
        let mut index = SpatialIndex::new();
        let mut items = Vec::new();
        for i in 0..200 {
            let x = i as f64;
            let id = Uuid::new_v4();
            let r = rect(x, 0.0, x + 0.5, 0.5);
            index.insert(id, r);
            items.push((id, r));
        }
        for (id, r) in &items {
            assert!(index.remove(*id, *r));
        }
        assert!(index.is_empty());
    }
}
