use serde::{Deserialize, Serialize};
use std::fmt;

/// The three staffed service points of the theater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolRole {
    Cashier,
    Usher,
    Server,
}

impl PoolRole {
    pub const ALL: [PoolRole; 3] = [PoolRole::Cashier, PoolRole::Usher, PoolRole::Server];

    pub fn name(self) -> &'static str {
        match self {
            PoolRole::Cashier => "cashier",
            PoolRole::Usher => "usher",
            PoolRole::Server => "server",
        }
    }

    /// Position in [`PoolRole::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PoolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A staffing configuration: how many cashiers, ushers and servers are working
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapacityTriple {
    pub cashiers: usize,
    pub ushers: usize,
    pub servers: usize,
}

impl CapacityTriple {
    pub fn new(cashiers: usize, ushers: usize, servers: usize) -> Self {
        Self {
            cashiers,
            ushers,
            servers,
        }
    }

    /// Staff assigned to `role`
    pub fn capacity(&self, role: PoolRole) -> usize {
        match role {
            PoolRole::Cashier => self.cashiers,
            PoolRole::Usher => self.ushers,
            PoolRole::Server => self.servers,
        }
    }

    /// Total number of employees
    pub fn total(&self) -> usize {
        self.cashiers + self.ushers + self.servers
    }

    /// Every pool needs at least one employee
    pub fn is_valid(&self) -> bool {
        self.total() > 0 && PoolRole::ALL.iter().all(|&role| self.capacity(role) >= 1)
    }

    /// Every triple whose total fits in `max_employees`, zero-staffed pools included
    ///
    /// Ordered by cashiers, then servers, then ushers, each ascending. Callers
    /// filter with [`CapacityTriple::is_valid`].
    pub fn candidates(max_employees: usize) -> impl Iterator<Item = CapacityTriple> {
        (0..=max_employees).flat_map(move |cashiers| {
            (0..=max_employees - cashiers).flat_map(move |servers| {
                (0..=max_employees - cashiers - servers)
                    .map(move |ushers| CapacityTriple::new(cashiers, ushers, servers))
            })
        })
    }
}

impl fmt::Display for CapacityTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cashiers, {} servers, {} ushers",
            self.cashiers, self.servers, self.ushers
        )
    }
}
