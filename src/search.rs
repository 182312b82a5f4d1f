use std::fmt;

use log::{debug, info};

use crate::{
    config::{self, Config},
    interior::{Cell, InnerTileSolver, InnerTiles, Layout},
    ring::{self, RingEnumerator},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Stop after this many ring advances. `None` searches the whole space.
    pub max_iterations: Option<u64>,
    /// Log the current ring every this many iterations.
    pub progress_every: Option<u64>,
}

/// Counters describing how much work a search has done so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    iterations: u64,
    edge_valid_rings: u64,
    permutations: u64,
}

impl SearchStats {
    /// Number of times the ring has been advanced.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Number of rings whose every edge summed correctly.
    pub fn edge_valid_rings(&self) -> u64 {
        self.edge_valid_rings
    }

    /// Number of interior arrangements checked.
    pub fn permutations(&self) -> u64 {
        self.permutations
    }
}

/// A complete hexagon: the ring in index order and the inner tiles in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    ring: Vec<u8>,
    inner: InnerTiles,
    layout: Layout,
}

impl Solution {
    pub fn ring(&self) -> &[u8] {
        &self.ring
    }

    pub fn inner(&self) -> &InnerTiles {
        &self.inner
    }

    /// Every checked line: the ring's edges first, then the layout's interior lines.
    pub fn lines(&self) -> Vec<Vec<u8>> {
        let len = self.ring.len();
        let edges = (0..len).step_by(2).map(|start| {
            (start..start + 3)
                .map(|idx| self.ring[idx % len])
                .collect::<Vec<u8>>()
        });
        let interior = self
            .layout
            .lines()
            .iter()
            .map(|line| line.values(&self.ring, self.inner.values()));
        edges.chain(interior).collect()
    }

    fn value(&self, cell: Cell) -> u8 {
        match cell {
            Cell::Ring(idx) => self.ring[idx],
            Cell::Inner(idx) => self.inner.values()[idx],
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.layout.rows();
        let widest = rows.iter().map(|row| row.len()).max().unwrap_or_default();
        for row in rows {
            write!(f, "{:indent$}", "", indent = (widest - row.len()) * 2)?;
            for &cell in row.iter() {
                write!(f, "{:4}", self.value(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Drives a [`RingEnumerator`], handing every edge-valid ring to an
/// [`InnerTileSolver`] until a full hexagon is found.
///
/// A search can be resumed after it returns a solution; it then continues
/// from the following ring. Once it fails, every later call fails the same way.
#[derive(Debug)]
pub struct Search {
    enumerator: RingEnumerator,
    solver: InnerTileSolver,
    options: SearchOptions,
    stats: SearchStats,
    examined_current: bool,
    finished: Option<Error>,
}

impl Search {
    /// Search the whole canonical space of the order-3 layout under `config`.
    pub fn new(config: Config, options: SearchOptions) -> Result<Self, Error> {
        let solver = InnerTileSolver::new(config, Layout::ORDER_3)?;
        Self::from_parts(RingEnumerator::new(config), solver, options)
    }

    /// Search from a fixed ring prefix onwards.
    pub fn with_prefix(
        config: Config,
        prefix: &[u8],
        options: SearchOptions,
    ) -> Result<Self, Error> {
        let solver = InnerTileSolver::new(config, Layout::ORDER_3)?;
        let enumerator = RingEnumerator::with_prefix(config, prefix)?;
        Self::from_parts(enumerator, solver, options)
    }

    /// Combine a prebuilt enumerator and solver, which must share a config.
    pub fn from_parts(
        enumerator: RingEnumerator,
        solver: InnerTileSolver,
        options: SearchOptions,
    ) -> Result<Self, Error> {
        let ring_config = enumerator.ring().config();
        let solver_config = solver.config();
        if ring_config.ring_size() != solver_config.ring_size()
            || ring_config.inner_count() != solver_config.inner_count()
        {
            return Err(config::Error::LayoutMismatch {
                expected_ring: solver_config.ring_size(),
                expected_inner: solver_config.inner_count(),
                ring: ring_config.ring_size(),
                inner: ring_config.inner_count(),
            }
            .into());
        }
        if ring_config.magic() != solver_config.magic() {
            return Err(config::Error::MagicMismatch {
                ring: ring_config.magic(),
                solver: solver_config.magic(),
            }
            .into());
        }
        Ok(Self {
            enumerator,
            solver,
            options,
            stats: SearchStats::default(),
            examined_current: false,
            finished: None,
        })
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Why the search stopped, if it has.
    pub fn finished(&self) -> Option<&Error> {
        self.finished.as_ref()
    }

    /// Run until the first solution.
    pub fn run(&mut self) -> Result<Solution, Error> {
        self.next_solution()
    }

    /// Iterate over every remaining solution.
    ///
    /// Iteration ends when the space is exhausted or the iteration limit is
    /// reached; [`finished`][Self::finished] tells which.
    pub fn solutions(&mut self) -> Solutions<'_> {
        Solutions { search: self }
    }

    /// Find the next solution, starting with the current ring if it has not
    /// been examined yet.
    pub fn next_solution(&mut self) -> Result<Solution, Error> {
        if let Some(err) = &self.finished {
            return Err(err.clone());
        }
        let result = self.search();
        if let Err(err) = &result {
            info!("search stopped: {err}");
            self.finished = Some(err.clone());
        }
        result
    }

    fn search(&mut self) -> Result<Solution, Error> {
        loop {
            if self.examined_current {
                self.step()?;
            }
            self.examined_current = true;

            let ring = self.enumerator.ring();
            if let Some(every) = self.options.progress_every {
                if every > 0 && self.stats.iterations % every == 0 {
                    info!("{}: {:?}", self.stats.iterations, ring.values());
                }
            }
            if !ring.is_correct() {
                continue;
            }

            self.stats.edge_valid_rings += 1;
            debug!("edges all correct: {:?}", ring.values());
            if let Some(inner) = self.solver.solve_counting(ring, &mut self.stats.permutations) {
                info!(
                    "solution found after {} iterations: ring {:?}, inner {:?}",
                    self.stats.iterations,
                    ring.values(),
                    inner.values()
                );
                return Ok(Solution {
                    ring: ring.values().to_vec(),
                    inner,
                    layout: *self.solver.layout(),
                });
            }
        }
    }

    fn step(&mut self) -> Result<(), Error> {
        if let Some(limit) = self.options.max_iterations {
            if self.stats.iterations >= limit {
                return Err(Error::IterationLimit { limit });
            }
        }
        if !self.enumerator.advance() {
            return Err(Error::Exhausted {
                iterations: self.stats.iterations,
            });
        }
        self.stats.iterations += 1;
        Ok(())
    }
}

/// Iterator over the solutions of a [`Search`].
#[derive(Debug)]
pub struct Solutions<'a> {
    search: &'a mut Search,
}

impl Iterator for Solutions<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Self::Item> {
        self.search.next_solution().ok()
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("search space exhausted after {iterations} iterations without a solution")]
    Exhausted { iterations: u64 },
    #[error("no solution found within {limit} iterations")]
    IterationLimit { limit: u64 },
    #[error(transparent)]
    Config(#[from] config::Error),
    #[error(transparent)]
    Ring(#[from] ring::Error),
}
