//! The forest: a named, ordered collection of trees

use std::fmt;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::domain::{DomainError, DomainResult, Tree};

/// One replacement made by [`Forest::reap_and_replace`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reaping {
    pub index: usize,
    pub reaped: Tree,
    pub replacement: Tree,
}

/// A named, ordered sequence of trees.
///
/// Order is significant (trees are addressed by index) and duplicates are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    name: String,
    trees: Vec<Tree>,
}

impl Forest {
    /// Create an empty forest.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trees: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tree> {
        self.trees.get(index)
    }

    /// Append a tree at the end.
    pub fn push(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Append trees at the end, keeping their order.
    pub fn extend(&mut self, trees: impl IntoIterator<Item = Tree>) {
        self.trees.extend(trees);
    }

    /// Replace the whole sequence, returning the previous one.
    pub fn replace_trees(&mut self, trees: Vec<Tree>) -> Vec<Tree> {
        std::mem::replace(&mut self.trees, trees)
    }

    /// Append one randomly generated tree and return a reference to it.
    pub fn add_random_tree<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Tree {
        let tree = Tree::random(rng);
        debug!("add_random_tree: {}", tree);
        self.trees.push(tree);
        &self.trees[self.trees.len() - 1]
    }

    /// Remove the tree at `index`.
    ///
    /// An out-of-range index leaves the forest unchanged and returns
    /// `IndexOutOfRange`.
    pub fn remove_at(&mut self, index: usize) -> DomainResult<Tree> {
        if index < self.trees.len() {
            Ok(self.trees.remove(index))
        } else {
            warn!("Tree number {} does not exist", index);
            Err(DomainError::IndexOutOfRange {
                index,
                len: self.trees.len(),
            })
        }
    }

    /// Grow every tree by one year.
    pub fn simulate_year(&mut self) {
        self.trees.iter_mut().for_each(Tree::simulate_year);
    }

    /// Replace every tree taller than `threshold` with a fresh random tree at
    /// the same index.
    ///
    /// Single pass in index order: replacements are not checked against the
    /// threshold again.
    pub fn reap_and_replace<R: Rng + ?Sized>(
        &mut self,
        threshold: f64,
        rng: &mut R,
    ) -> Vec<Reaping> {
        let mut reapings = Vec::new();
        for (index, slot) in self.trees.iter_mut().enumerate() {
            if slot.height() > threshold {
                let replacement = Tree::random(rng);
                let reaped = std::mem::replace(slot, replacement.clone());
                info!("Reaping the tall tree {}", reaped);
                info!("Replaced with new tree {}", replacement);
                reapings.push(Reaping {
                    index,
                    reaped,
                    replacement,
                });
            }
        }
        reapings
    }

    /// Mean height rounded to two decimals (half away from zero); 0 when empty.
    pub fn average_height(&self) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self.trees.iter().map(Tree::height).sum();
        let average = total / self.trees.len() as f64;
        (average * 100.0).round() / 100.0
    }
}

/// The forest report: name, indexed trees, and a summary line.
impl fmt::Display for Forest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forest name: {}", self.name)?;
        for (index, tree) in self.trees.iter().enumerate() {
            writeln!(f, "     {} {}", index, tree)?;
        }
        write!(
            f,
            "There are {} trees, with an average height of {:?}",
            self.trees.len(),
            self.average_height()
        )
    }
}
