//! One side of an order book: a [`SortedMap`] pinned to a fixed
//! direction and tagged with its role.

use std::ops::{Deref, DerefMut};

use crate::error::OrderBookError;
use crate::sorted_map::{Direction, SortedMap};
use crate::value::Value;

/// Which side of the book a [`Side`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Buy orders: best bid is the highest price.
    Bid,
    /// Sell orders: best ask is the lowest price.
    Ask,
}

impl Role {
    /// The directional order this role implies: bids walk descending
    /// (highest first), asks walk ascending (lowest first).
    pub fn direction(self) -> Direction {
        match self {
            Role::Bid => Direction::Desc,
            Role::Ask => Direction::Asc,
        }
    }

    /// The singular name used as the outer key in a book snapshot
    /// (`"bid"` / `"ask"`).
    pub fn singular_name(self) -> &'static str {
        match self {
            Role::Bid => "bid",
            Role::Ask => "ask",
        }
    }
}

/// A [`SortedMap<Value>`] fixed to its role's direction.
///
/// All [`SortedMap`] operations are available through `Deref`; `Side`
/// itself only adds the `role` tag and a constructor that picks the
/// right direction automatically.
#[derive(Debug, Clone)]
pub struct Side {
    role: Role,
    map: SortedMap<Value>,
}

impl Side {
    /// Creates an empty side for `role`, inheriting `max_depth` and
    /// `eager_truncate` from the owning book.
    pub fn new(role: Role, max_depth: usize, eager_truncate: bool) -> Result<Self, OrderBookError> {
        Ok(Self {
            role,
            map: SortedMap::new(role.direction(), max_depth, eager_truncate)?,
        })
    }

    /// The role this side represents.
    pub fn role(&self) -> Role {
        self.role
    }
}

impl Deref for Side {
    type Target = SortedMap<Value>;

    fn deref(&self) -> &Self::Target {
        &self.map
    }
}

impl DerefMut for Side {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.map
    }
}
