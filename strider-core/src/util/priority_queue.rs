/// an array-backed binary min-heap for the A* open set.
///
/// the standard library heap is a max-heap and the ecosystem queues do not
/// promise a stable order for equal priorities, so the search wraps its
/// entries in a struct whose `Ord` breaks priority ties by insertion
/// sequence and pushes them through this minimal sift-up/sift-down heap.
#[derive(Debug, Default)]
pub struct MinHeap<T: Ord> {
    items: Vec<T>,
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> MinHeap<T> {
        MinHeap { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// insert in O(log n) by sifting the new entry up toward the root
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// remove and return the minimum in O(log n)
    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        min
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.items[idx] >= self.items[parent] {
                break;
            }
            self.items.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            if left >= len {
                break;
            }
            // descend into the smaller child; equal children favor the left
            let child = if right < len && self.items[right] < self.items[left] {
                right
            } else {
                left
            };
            // parent/child equality ends the sift
            if self.items[child] >= self.items[idx] {
                break;
            }
            self.items.swap(idx, child);
            idx = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_empty() {
        let mut heap: MinHeap<i32> = MinHeap::new();
        assert_eq!(heap.pop(), None);
        assert_eq!(heap.peek(), None);
    }

    #[test]
    fn test_orders_ascending() {
        let mut heap = MinHeap::new();
        for v in [5, 3, 8, 1, 9, 2, 7] {
            heap.push(v);
        }
        let mut drained = Vec::new();
        while let Some(v) = heap.pop() {
            drained.push(v);
        }
        assert_eq!(drained, vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn test_duplicates_survive() {
        let mut heap = MinHeap::new();
        for v in [4, 4, 4, 1, 1] {
            heap.push(v);
        }
        assert_eq!(heap.len(), 5);
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(4));
    }

    /// entries with equal priority drain in insertion order when the
    /// element type breaks ties by a sequence number
    #[test]
    fn test_insertion_order_tie_break() {
        let mut heap = MinHeap::new();
        for seq in 0..10u64 {
            heap.push((1.0_f64.to_bits(), seq));
        }
        let mut sequences = Vec::new();
        while let Some((_, seq)) = heap.pop() {
            sequences.push(seq);
        }
        assert_eq!(sequences, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_peek_matches_pop() {
        let mut heap = MinHeap::new();
        for v in [10, 6, 2, 14] {
            heap.push(v);
        }
        assert_eq!(heap.peek(), Some(&2));
        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.peek(), Some(&6));
    }
}
