use std::iter::FusedIterator;

use super::format::NodeFormat;
use super::graph::WordGraph;

/// An iterator over the node indices of one sibling list.
///
/// Starts at the list's first node and stops after the node carrying the
/// end-of-siblings flag. A list starting at index 0 is empty, since a child
/// pointer of 0 means "no children".
#[derive(Clone)]
pub struct Siblings<'g, F: NodeFormat> {
    graph: &'g WordGraph<F>,
    next: Option<u32>,
}

impl<'g, F: NodeFormat> Siblings<'g, F> {
    #[inline]
    pub(crate) fn new(graph: &'g WordGraph<F>, start: u32) -> Self {
        Siblings {
            graph,
            next: (start != 0).then_some(start),
        }
    }
}

impl<F: NodeFormat> Iterator for Siblings<'_, F> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        let idx = self.next?;
        self.next = if self.graph.is_end(idx) {
            None
        } else {
            idx.checked_add(1)
        };
        Some(idx)
    }
}

impl<F: NodeFormat> FusedIterator for Siblings<'_, F> {}

#[cfg(test)]
mod test {
    use super::super::format::Kwg;
    use super::*;

    fn graph() -> WordGraph<Kwg> {
        WordGraph::from_nodes(vec![
            Kwg::pack(0, false, true, 2),
            Kwg::pack(0, false, true, 2),
            Kwg::pack(1, false, false, 0),
            Kwg::pack(2, true, false, 0),
            Kwg::pack(3, false, true, 0),
            Kwg::pack(4, true, true, 0),
        ])
    }

    #[test]
    fn stops_after_end_flag() {
        let g = graph();
        assert_eq!(g.siblings(2).collect::<Vec<_>>(), [2, 3, 4]);
        assert_eq!(g.siblings(3).collect::<Vec<_>>(), [3, 4]);
        assert_eq!(g.siblings(5).collect::<Vec<_>>(), [5]);
    }

    #[test]
    fn zero_is_an_empty_list() {
        let g = graph();
        assert_eq!(g.siblings(0).next(), None);
    }

    #[test]
    fn fused() {
        let g = graph();
        let mut it = g.siblings(4);
        assert_eq!(it.next(), Some(4));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}
