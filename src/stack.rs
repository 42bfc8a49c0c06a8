//! Growable LIFO stack shared by the precedence converter and the evaluator.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Stack { items: Vec::new() }
    }
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item, yielding them in pop order (top first)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.items.drain(..).rev()
    }

    /// The sole remaining item, or `None` when the stack does not hold exactly one
    pub fn into_single(mut self) -> Option<T> {
        if self.items.len() == 1 {
            self.items.pop()
        } else {
            None
        }
    }
}
