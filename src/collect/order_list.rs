//! A doubly linked list that flattens all its nodes onto a `Vec`,
//! addressing them by index instead of by pointer.
//!
//! Handles stay valid until their node is removed,
//! which lets the owner of a handle unlink its node in `O(1)` without a scan.
//! Vacated slots are freelisted and reused by later pushes.
use std::iter;

/// The index of a node in the list's storage vec.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeHandle(usize);

#[derive(Clone)]
struct Node<T> {
    /// The value being stored, or `None` if this slot is on the freelist.
    value: Option<T>,
    prev: Option<NodeHandle>,
    next: Option<NodeHandle>,
}

#[derive(Clone)]
pub(crate) struct OrderList<T> {
    nodes: Vec<Node<T>>,
    /// Slots which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,
    head: Option<NodeHandle>,
    tail: Option<NodeHandle>,
}
impl<T> OrderList<T> {
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderList {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional.saturating_sub(self.free.len()))
    }
    #[inline]
    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        self.nodes.get(handle.0).and_then(|node| node.value.as_ref())
    }
    /// Append the value to the back of the list, returning the handle to its node.
    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let node = Node {
            value: Some(value),
            prev: self.tail,
            next: None,
        };
        let handle = match self.free.pop() {
            Some(handle) => {
                self.nodes[handle.0] = node;
                handle
            }
            None => {
                self.nodes.push(node);
                NodeHandle(self.nodes.len() - 1)
            }
        };
        match self.tail {
            Some(tail) => self.nodes[tail.0].next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
        handle
    }
    /// Unlink the node with the specified handle, returning its value.
    ///
    /// Returns `None` if the slot is already vacant.
    pub fn remove(&mut self, handle: NodeHandle) -> Option<T> {
        let node = self.nodes.get_mut(handle.0)?;
        let value = node.value.take()?;
        let prev = node.prev.take();
        let next = node.next.take();
        match prev {
            Some(prev) => self.nodes[prev.0].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next.0].prev = prev,
            None => self.tail = prev,
        }
        self.free.push(handle);
        Some(value)
    }
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.remove(head)
    }
    /// Clears this list, keeping the allocated buffers.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }
    #[inline]
    pub fn iter(&self) -> Iter<T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }
}
impl<T> Default for OrderList<T> {
    #[inline]
    fn default() -> Self {
        OrderList::with_capacity(0)
    }
}

/// Iterates over the values of an `OrderList` from front to back.
pub(crate) struct Iter<'a, T: 'a> {
    list: &'a OrderList<T>,
    front: Option<NodeHandle>,
    back: Option<NodeHandle>,
    remaining: usize,
}
impl<'a, T> Clone for Iter<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}
impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.front?.0];
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.back?.0];
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}
impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T: 'a> iter::FusedIterator for Iter<'a, T> {}
