//! Disjoint-set forest over the sites, with weighted union and path compression.

use std::fmt::{self, Display};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::error::InvariantViolation;

/// State of a site in the [`Forest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum SiteState {
    /// The site is not occupied yet.
    Empty,
    /// The site is the root of a component of `size` sites.
    Root {
        /// number of sites of the component, at least 1
        size: usize,
    },
    /// The site is in the component of its `parent`.
    Child {
        /// next site on the way to the root
        parent: usize,
    },
}

impl SiteState {
    /// Whether the site is occupied.
    #[must_use]
    #[inline]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

impl Default for SiteState {
    #[inline]
    fn default() -> Self {
        Self::Empty
    }
}

/// How [`Forest::find`] shortens the paths it walks.
///
/// Both strategies are iterative and have the same amortized complexity,
/// they only differ by the shape of the trees they leave behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(rename_all = "snake_case"))]
pub enum FindStrategy {
    /// Every visited site is pointed to its grand parent, one pass.
    PathHalving,
    /// Every visited site is pointed directly to the root, two passes.
    FullCompression,
}

impl Default for FindStrategy {
    #[inline]
    fn default() -> Self {
        Self::PathHalving
    }
}

impl Display for FindStrategy {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathHalving => write!(f, "path halving"),
            Self::FullCompression => write!(f, "full path compression"),
        }
    }
}

/// Forest of inverted trees over the occupied sites.
///
/// Each component is a tree, identified by its root which stores the size of
/// the component. Components only grow: sites are activated and components merged,
/// never split.
///
/// # Example
/// ```
/// # use newman_ziff::percolation::{Forest, FindStrategy, SiteState};
/// let mut forest = Forest::new(4, FindStrategy::PathHalving);
/// forest.activate(0);
/// forest.activate(1);
/// let root = forest.union(0, 1);
/// assert_eq!(root, 0);
/// assert_eq!(forest.state(1), SiteState::Child { parent: 0 });
/// assert_eq!(forest.find(1), 0);
/// assert_eq!(forest.root_size(0), 2);
/// assert!(forest.check_consistency().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize))]
pub struct Forest {
    sites: Vec<SiteState>,
    strategy: FindStrategy,
    number_of_active_sites: usize,
}

impl Forest {
    /// A forest of `n` empty sites.
    #[must_use]
    pub fn new(n: usize, strategy: FindStrategy) -> Self {
        Self {
            sites: vec![SiteState::Empty; n],
            strategy,
            number_of_active_sites: 0,
        }
    }

    /// Number of sites, active or not.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the forest has no site.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    getter_copy!(
        const,
        /// The strategy used by [`Forest::find`].
        strategy,
        FindStrategy
    );

    getter_copy!(
        const,
        /// Number of occupied sites.
        number_of_active_sites,
        usize
    );

    /// State of `site`.
    ///
    /// # Panics
    /// Panics if `site` is out of range.
    #[must_use]
    #[inline]
    pub fn state(&self, site: usize) -> SiteState {
        self.sites[site]
    }

    /// States of all the sites.
    #[must_use]
    #[inline]
    pub fn states(&self) -> &[SiteState] {
        &self.sites
    }

    /// Whether `site` is occupied.
    ///
    /// # Panics
    /// Panics if `site` is out of range.
    #[must_use]
    #[inline]
    pub fn is_active(&self, site: usize) -> bool {
        self.sites[site].is_active()
    }

    /// Occupy `site`, it becomes a component of size 1.
    ///
    /// # Panics
    /// Panics if `site` is out of range or already occupied.
    #[inline]
    pub fn activate(&mut self, site: usize) {
        assert!(
            !self.sites[site].is_active(),
            "site {} is already occupied",
            site
        );
        self.sites[site] = SiteState::Root { size: 1 };
        self.number_of_active_sites += 1;
    }

    /// Size stored at `root`.
    ///
    /// # Panics
    /// Panics if `root` is not a root.
    #[must_use]
    #[inline]
    pub fn root_size(&self, root: usize) -> usize {
        match self.sites[root] {
            SiteState::Root { size } => size,
            state => panic!("site {} is not a root but {:?}", root, state),
        }
    }

    /// Root of the component of `site`, shortening the path with [`Forest::strategy`].
    ///
    /// # Panics
    /// Panics if `site` is out of range or empty.
    #[inline]
    pub fn find(&mut self, site: usize) -> usize {
        match self.strategy {
            FindStrategy::PathHalving => self.find_path_halving(site),
            FindStrategy::FullCompression => self.find_full_compression(site),
        }
    }

    /// Root of the component of `site` without modifying the forest.
    /// Returns [`None`] if the site is empty.
    ///
    /// # Panics
    /// Panics if `site` is out of range.
    #[must_use]
    pub fn root_of(&self, site: usize) -> Option<usize> {
        let mut current = site;
        loop {
            match self.sites[current] {
                SiteState::Empty => return None,
                SiteState::Root { .. } => return Some(current),
                SiteState::Child { parent } => current = parent,
            }
        }
    }

    /// Size of the component of `site`, [`None`] if the site is empty.
    ///
    /// # Panics
    /// Panics if `site` is out of range.
    #[must_use]
    pub fn component_size(&self, site: usize) -> Option<usize> {
        self.root_of(site).map(|root| self.root_size(root))
    }

    fn find_path_halving(&mut self, site: usize) -> usize {
        let mut current = site;
        loop {
            match self.sites[current] {
                SiteState::Root { .. } => return current,
                SiteState::Child { parent } => match self.sites[parent] {
                    SiteState::Root { .. } => return parent,
                    SiteState::Child { parent: grand_parent } => {
                        self.sites[current] = SiteState::Child {
                            parent: grand_parent,
                        };
                        current = grand_parent;
                    }
                    SiteState::Empty => {
                        panic!("site {} has the empty site {} as parent", current, parent)
                    }
                },
                SiteState::Empty => panic!("find called on the empty site {}", current),
            }
        }
    }

    fn find_full_compression(&mut self, site: usize) -> usize {
        let root = match self.root_of(site) {
            Some(root) => root,
            None => panic!("find called on the empty site {}", site),
        };
        let mut current = site;
        while let SiteState::Child { parent } = self.sites[current] {
            self.sites[current] = SiteState::Child { parent: root };
            current = parent;
        }
        root
    }

    /// Weighted union of the components rooted at `root` and `other`.
    ///
    /// The smaller tree is attached under the larger one. On equal sizes `root`
    /// survives. Returns the root of the merged component.
    ///
    /// # Panics
    /// Panics if `root` or `other` is not a root, or if they are the same site.
    pub fn union(&mut self, root: usize, other: usize) -> usize {
        assert_ne!(root, other, "cannot merge a component with itself");
        let size = self.root_size(root);
        let other_size = self.root_size(other);
        let (big, small) = if size < other_size {
            (other, root)
        } else {
            (root, other)
        };
        self.sites[big] = SiteState::Root {
            size: size + other_size,
        };
        self.sites[small] = SiteState::Child { parent: big };
        big
    }

    /// Iterator over the roots and the size of their component.
    pub fn components(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sites
            .iter()
            .enumerate()
            .filter_map(|(site, state)| match state {
                SiteState::Root { size } => Some((site, *size)),
                SiteState::Empty | SiteState::Child { .. } => None,
            })
    }

    /// The historical integer encoding of the forest, one entry per site:
    /// - `-N - 1` for an empty site;
    /// - `-size` for a root;
    /// - the index of the parent for other occupied sites.
    ///
    /// # Example
    /// ```
    /// # use newman_ziff::percolation::{Forest, FindStrategy};
    /// let mut forest = Forest::new(3, FindStrategy::PathHalving);
    /// forest.activate(2);
    /// forest.activate(1);
    /// forest.union(2, 1);
    /// assert_eq!(forest.to_pointer_encoding(), vec![-4, 2, -2]);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn to_pointer_encoding(&self) -> Vec<isize> {
        // indices and sizes are bounded by the length of a Vec, they fit in an isize
        let empty = -(self.sites.len() as isize) - 1;
        self.sites
            .iter()
            .map(|state| match state {
                SiteState::Empty => empty,
                SiteState::Root { size } => -(*size as isize),
                SiteState::Child { parent } => *parent as isize,
            })
            .collect()
    }

    /// Check the invariants of the forest:
    /// - every parent is an occupied site in range;
    /// - following the parents always ends on a root;
    /// - the size stored at each root is the number of sites in its tree;
    ///
    /// # Errors
    /// Returns the first [`InvariantViolation`] found. Any error is a bug of the caller
    /// of the low level API or of the engine.
    pub fn check_consistency(&self) -> Result<(), InvariantViolation> {
        let n = self.sites.len();
        let mut counted = vec![0_usize; n];
        for site in 0..n {
            let mut current = site;
            let mut hops = 0_usize;
            let root = loop {
                match self.sites[current] {
                    SiteState::Empty if current == site => break None,
                    SiteState::Empty => unreachable!("an empty parent is reported before"),
                    SiteState::Root { .. } => break Some(current),
                    SiteState::Child { parent } => {
                        if parent >= n {
                            return Err(InvariantViolation::ParentOutOfRange {
                                site: current,
                                parent,
                            });
                        }
                        if !self.sites[parent].is_active() {
                            return Err(InvariantViolation::ParentEmpty {
                                site: current,
                                parent,
                            });
                        }
                        hops += 1;
                        if hops > n {
                            return Err(InvariantViolation::Cycle { site });
                        }
                        current = parent;
                    }
                }
            };
            if let Some(root) = root {
                counted[root] += 1;
            }
        }
        for (root, stored) in self.components() {
            if counted[root] != stored {
                return Err(InvariantViolation::WrongSize {
                    root,
                    stored,
                    counted: counted[root],
                });
            }
        }
        Ok(())
    }
}
