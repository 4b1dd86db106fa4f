//! Result of resolving a bare label or a path against a tree.

/// Outcome of a lookup that may match several nodes.
///
/// A bare label in a [`PathTree`](crate::PathTree) can end many paths, so
/// queries say explicitly whether they found nothing, exactly one node, or
/// several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    NotFound,
    Resolved(T),
    /// Two or more matches, in path order.
    Ambiguous(Vec<T>),
}

impl<T> Lookup<T> {
    /// Classify a list of matches by its length.
    pub fn from_matches(mut matches: Vec<T>) -> Self {
        match matches.len() {
            0 => Lookup::NotFound,
            1 => match matches.pop() {
                Some(only) => Lookup::Resolved(only),
                None => Lookup::NotFound,
            },
            _ => Lookup::Ambiguous(matches),
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Lookup::NotFound)
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Lookup::Ambiguous(_))
    }

    /// The single match, if there is exactly one.
    pub fn resolved(self) -> Option<T> {
        match self {
            Lookup::Resolved(value) => Some(value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Lookup::NotFound => 0,
            Lookup::Resolved(_) => 1,
            Lookup::Ambiguous(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Lookup<U> {
        match self {
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Resolved(value) => Lookup::Resolved(f(value)),
            Lookup::Ambiguous(values) => Lookup::Ambiguous(values.into_iter().map(f).collect()),
        }
    }

    /// Every match, regardless of how many there are.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Lookup::NotFound => Vec::new(),
            Lookup::Resolved(value) => vec![value],
            Lookup::Ambiguous(values) => values,
        }
    }
}
