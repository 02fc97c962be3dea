use thiserror::Error;

/// Binary min-heap stored in a flat vector, 0-indexed.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap { elements: vec![] }
    }

    pub fn heap_size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeapErr {
    #[error("index {0} out of bounds for heap of size {1}")]
    KeyError(usize, usize),
    #[error("heap underflow")]
    HeapUnderflow,
}

impl<T: Ord> MinHeap<T> {
    /// Heapify `source` in place, bottom-up. O(n).
    pub fn build(source: Vec<T>) -> Result<Self, HeapErr> {
        let mut heap = MinHeap { elements: source };
        let n = heap.heap_size();
        for i in (0..n / 2).rev() {
            heap.min_heapify(i)?;
        }
        Ok(heap)
    }

    pub fn valid_min_heap(&self) -> bool {
        (1..self.heap_size()).all(|i| self.elements[Self::parent(i)] <= self.elements[i])
    }

    /// Sift the element at `i` down until both children are larger.
    pub fn min_heapify(&mut self, mut i: usize) -> Result<(), HeapErr> {
        let n = self.heap_size();
        if i >= n {
            return Err(HeapErr::KeyError(i, n));
        }
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;

            if l < n && self.elements[l] < self.elements[smallest] {
                smallest = l;
            }
            if r < n && self.elements[r] < self.elements[smallest] {
                smallest = r;
            }
            if smallest == i {
                return Ok(());
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let mut i = self.heap_size() - 1;
        while i > 0 {
            let p = Self::parent(i);
            if self.elements[p] <= self.elements[i] {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    pub fn extract_min(&mut self) -> Result<T, HeapErr> {
        if self.is_empty() {
            return Err(HeapErr::HeapUnderflow);
        }
        let result = self.elements.swap_remove(0);
        if !self.is_empty() {
            self.min_heapify(0)?;
        }
        Ok(result)
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn build_and_drain_in_order() {
        let mut heap = MinHeap::build(vec![9, 4, 7, 1, 8, 2, 2, 6]).unwrap();
        assert!(heap.valid_min_heap());

        let mut drained = Vec::new();
        while let Ok(x) = heap.extract_min() {
            drained.push(x);
        }
        assert_eq!(drained, vec![1, 2, 2, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn insert_keeps_heap_property() {
        let mut heap = MinHeap::new();
        for x in [5, 3, 8, 1, 9, 0] {
            heap.insert(x);
            assert!(heap.valid_min_heap());
        }
        assert_eq!(heap.peek(), Some(&0));
        assert_eq!(heap.heap_size(), 6);
    }

    #[test]
    fn extract_from_empty_underflows() {
        let mut heap: MinHeap<u32> = MinHeap::default();
        assert_eq!(heap.extract_min(), Err(HeapErr::HeapUnderflow));
    }

    #[test]
    fn heapify_out_of_bounds() {
        let mut heap = MinHeap::build(vec![1, 2]).unwrap();
        assert_eq!(heap.min_heapify(5), Err(HeapErr::KeyError(5, 2)));
    }
}
