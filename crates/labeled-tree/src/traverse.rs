//! Breadth-first enumeration over any [`FifoQueue`].

use labeled_tree_util::{DynamicQueue, FifoQueue};

/// Visit `start` and everything below it level by level, using `queue` as
/// the frontier.
///
/// `children` lists the direct children of a node in display order.
///
/// # Errors
///
/// Fails when the queue refuses an item (a bounded queue that is too small).
pub fn breadth_first_with<K, Q, F, I>(
    queue: &mut Q,
    start: K,
    mut children: F,
) -> Result<Vec<K>, Q::Error>
where
    Q: FifoQueue<K>,
    F: FnMut(&K) -> I,
    I: IntoIterator<Item = K>,
{
    let mut order = Vec::new();
    queue.enqueue(start)?;
    while let Some(node) = queue.dequeue() {
        for child in children(&node) {
            queue.enqueue(child)?;
        }
        order.push(node);
    }
    Ok(order)
}

/// [`breadth_first_with`] over an unbounded queue.
pub fn breadth_first<K, F, I>(start: K, children: F) -> Vec<K>
where
    F: FnMut(&K) -> I,
    I: IntoIterator<Item = K>,
{
    let mut queue = DynamicQueue::new();
    match breadth_first_with(&mut queue, start, children) {
        Ok(order) => order,
        Err(never) => match never {},
    }
}
