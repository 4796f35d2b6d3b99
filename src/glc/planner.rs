//! The GLC search core: scaling schedule, expansion loop, domain
//! refresh, and the planner driver
//!
//! One `expand()` call pops the best open node, integrates every
//! control from it, files the resulting candidates into their
//! partition cells, and then resolves each touched cell in cost order
//! against collisions. Admitted survivors enter the tree and the open
//! queue; the cheapest survivor relabels its cell. The search stops at
//! the first goal-reaching admission, on queue exhaustion, at the
//! depth limit, or at the iteration cap.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use crate::common::{
    floor_coords, CostFunction, DynamicalSystem, GoalRegion, Heuristic, ObstacleSet,
    PlannerError, PlannerResult, StateVec, Trajectory,
};

use super::domain::{CellCoord, Domain};
use super::node::{Node, NodeArena, NodeId, SENTINEL};
use super::queue::OpenQueue;

/// Parameter bundle fixed at construction
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// State space dimension `d`
    pub state_dim: usize,
    /// Resolution `R`; refining it jointly refines the expansion
    /// horizon, depth limit, cell size, and tolerance
    pub resolution: f64,
    /// Time scale `T`; the expansion horizon is `T / R`
    pub time_scale: f64,
    /// Depth scale `D`; the depth limit is `floor(D * R * ln R)`
    pub depth_scale: f64,
    /// Base partition scale, divided out of the cell-size schedule
    pub partition_scale: f64,
    /// Iteration cap on `expand()` calls
    pub max_iter: usize,
    /// Initial state
    pub x0: StateVec,
    /// Finite control grid; all entries share one dimension
    pub controls: Vec<crate::common::ControlVec>,
}

impl PlannerConfig {
    pub fn validate(&self) -> PlannerResult<()> {
        if self.resolution <= 0.0 {
            return Err(PlannerError::InvalidParameter(
                "resolution must be positive".to_string(),
            ));
        }
        if self.time_scale <= 0.0 {
            return Err(PlannerError::InvalidParameter(
                "time_scale must be positive".to_string(),
            ));
        }
        if self.depth_scale <= 0.0 {
            return Err(PlannerError::InvalidParameter(
                "depth_scale must be positive".to_string(),
            ));
        }
        if self.partition_scale <= 0.0 {
            return Err(PlannerError::InvalidParameter(
                "partition_scale must be positive".to_string(),
            ));
        }
        if self.state_dim == 0 {
            return Err(PlannerError::InvalidParameter(
                "state_dim must be positive".to_string(),
            ));
        }
        if self.x0.len() != self.state_dim {
            return Err(PlannerError::InvalidParameter(format!(
                "initial state has dimension {} but state_dim is {}",
                self.x0.len(),
                self.state_dim
            )));
        }
        if self.controls.is_empty() {
            return Err(PlannerError::InvalidParameter(
                "control grid is empty".to_string(),
            ));
        }
        let control_dim = self.controls[0].len();
        if control_dim == 0 {
            return Err(PlannerError::InvalidParameter(
                "controls must have at least one component".to_string(),
            ));
        }
        if self.controls.iter().any(|u| u.len() != control_dim) {
            return Err(PlannerError::InvalidParameter(
                "all controls must share one dimension".to_string(),
            ));
        }
        Ok(())
    }
}

/// Why the search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A goal-reaching node was admitted
    GoalReached,
    /// The open queue drained without reaching the goal
    QueueExhausted,
    /// A node at the depth limit reached the top of the open queue
    DepthLimit,
    /// The iteration cap was hit
    IterationLimit,
}

/// Summary returned by `plan()`
#[derive(Debug, Clone, Copy)]
pub struct PlannerOutput {
    /// Tail-corrected upper bound on the optimal cost to the goal;
    /// infinite when no goal was reached
    pub cost: f64,
    /// Wall-clock seconds until termination
    pub time: f64,
}

/// Resolution-complete trajectory planner over a controlled dynamical
/// system
pub struct GlcPlanner<D, C, H, O, G> {
    dynamics: D,
    cost: C,
    heuristic: H,
    obstacles: O,
    goal: G,
    config: PlannerConfig,

    // Scaling constants, fixed for the planner's lifetime
    expand_time: f64,
    depth_limit: usize,
    eta: f64,
    partition_scale: f64,
    eps: f64,

    // Search state
    arena: NodeArena,
    open: OpenQueue,
    partition: BTreeMap<CellCoord, Domain>,
    root: NodeId,
    best: NodeId,
    upper: f64,
    iterations: usize,
    sim_count: usize,
    candidate_seq: u64,
    live: bool,
    found_goal: bool,
    termination: Option<TerminationReason>,
    start_time: Instant,
    solve_time: Duration,
}

impl<D, C, H, O, G> GlcPlanner<D, C, H, O, G>
where
    D: DynamicalSystem,
    C: CostFunction,
    H: Heuristic,
    O: ObstacleSet,
    G: GoalRegion,
{
    /// Build a planner, derive the scaling schedule from the
    /// resolution, and seed the search containers with the root.
    pub fn new(
        config: PlannerConfig,
        dynamics: D,
        cost: C,
        heuristic: H,
        obstacles: O,
        goal: G,
    ) -> PlannerResult<Self> {
        config.validate()?;

        let r = config.resolution;
        let lip_flow = dynamics.lipschitz_flow();
        let lip_cost = cost.lipschitz_cost();

        let expand_time = config.time_scale / r;
        let depth_limit = (config.depth_scale * r * r.ln()).floor().max(0.0) as usize;
        let eta = r.ln().powi(2) * r.powf(lip_flow) / config.partition_scale;
        let partition_scale = eta / config.partition_scale;
        let eps = if lip_cost > 0.0 {
            ((config.state_dim as f64).sqrt() / partition_scale) * (lip_flow / lip_cost)
                * (r * lip_flow.exp() - 1.0)
        } else {
            0.0
        };

        let h0 = heuristic.cost_to_go(&config.x0);
        check_value(h0, "heuristic value at the initial state")?;

        let mut arena = NodeArena::new();
        let root = arena.insert(Node::root(config.x0.clone(), h0, config.controls.len()));

        let mut open = OpenQueue::new();
        open.push(root, h0, 0.0);

        let mut partition = BTreeMap::new();
        let coord = floor_coords(&(&config.x0 * partition_scale));
        let mut root_domain = Domain::new(coord.clone());
        root_domain.label = root;
        partition.insert(coord, root_domain);

        log::info!("pre-search summary:");
        log::info!("  tolerance: {:.6}", eps);
        log::info!("  expand time: {:.6}", expand_time);
        log::info!("  depth limit: {}", depth_limit);
        log::info!("  domain size: {:.6}", 1.0 / eta);
        log::info!("  max iterations: {}", config.max_iter);

        Ok(Self {
            dynamics,
            cost,
            heuristic,
            obstacles,
            goal,
            config,
            expand_time,
            depth_limit,
            eta,
            partition_scale,
            eps,
            arena,
            open,
            partition,
            root,
            best: SENTINEL,
            upper: f64::INFINITY,
            iterations: 0,
            sim_count: 0,
            candidate_seq: 0,
            live: true,
            found_goal: false,
            termination: None,
            start_time: Instant::now(),
            solve_time: Duration::ZERO,
        })
    }

    /// One unit of search progress: pop the best node, integrate every
    /// control from it, and resolve the touched partition cells.
    pub fn expand(&mut self) -> PlannerResult<()> {
        self.iterations += 1;
        if self.iterations > self.config.max_iter {
            self.finish(TerminationReason::IterationLimit);
            return Ok(());
        }

        let current = match self.open.pop() {
            Some(id) => id,
            None => {
                self.finish(TerminationReason::QueueExhausted);
                return Ok(());
            }
        };

        let (cur_x, cur_t, cur_cost, cur_depth) = {
            let n = self.arena.get(current);
            (n.x.clone(), n.t, n.cost, n.depth)
        };
        if cur_depth >= self.depth_limit {
            self.finish(TerminationReason::DepthLimit);
            return Ok(());
        }

        let num_controls = self.config.controls.len();
        let t1 = cur_t + self.expand_time;
        let mut touched: BTreeSet<CellCoord> = BTreeSet::new();

        for i in 0..num_controls {
            let arc = self
                .dynamics
                .sim(cur_t, t1, &cur_x, &self.config.controls[i]);
            self.sim_count += 1;
            if let Err(e) = check_arc(&arc, cur_t, t1, self.config.state_dim) {
                return Err(self.abort(e));
            }

            let arc_cost = self.cost.cost(&arc, &self.config.controls[i]);
            if let Err(e) = check_value(arc_cost, "arc cost") {
                return Err(self.abort(e));
            }
            let child_cost = cur_cost + arc_cost;

            let x_end = arc.states[arc.states.len() - 1].clone();
            let t_end = arc.time[arc.time.len() - 1];
            let h = self.heuristic.cost_to_go(&x_end);
            if let Err(e) = check_value(h, "heuristic value") {
                return Err(self.abort(e));
            }

            let node = Node::candidate(x_end, t_end, child_cost, child_cost + h, i, num_controls);

            let coord = floor_coords(&(&node.x * self.partition_scale));
            let domain = self
                .partition
                .entry(coord.clone())
                .or_insert_with(|| Domain::new(coord.clone()));
            let label_cost = self.arena.get(domain.label).cost;
            if node.cost < label_cost + self.eps {
                self.candidate_seq += 1;
                let seq = self.candidate_seq;
                domain.push_candidate(node, arc, seq);
            }
            touched.insert(coord);
        }

        for coord in &touched {
            self.refresh_domain(current, coord)?;
        }
        Ok(())
    }

    /// Drain a touched cell's candidate queue in cost order: admit
    /// collision-free candidates within the tolerance of the current
    /// label, relabel the cell with the cheapest survivor, and delete
    /// the cell if nothing was ever admitted to it.
    fn refresh_domain(&mut self, parent: NodeId, coord: &CellCoord) -> PlannerResult<()> {
        let mut found_best = false;
        loop {
            let domain = match self.partition.get_mut(coord) {
                Some(d) => d,
                None => return Ok(()),
            };
            let label_cost = self.arena.get(domain.label).cost;
            let within = match domain.candidates.peek() {
                Some(top) => top.node.cost < label_cost + self.eps,
                None => break,
            };
            if !within {
                // Labels only get cheaper, so nothing left here can
                // ever be admitted; dropping the tail also releases
                // the candidates' integrated arcs.
                domain.candidates.clear();
                break;
            }
            let candidate = match domain.candidates.pop() {
                Some(c) => c,
                None => break,
            };
            let (node, arc) = candidate.into_parts();

            if !self.obstacles.collision_free(&arc) {
                continue;
            }

            let id = self.arena.insert(node);
            self.arena.add_child(parent, id, self.expand_time);
            let (admitted_cost, admitted_merit) = {
                let n = self.arena.get(id);
                (n.cost, n.merit)
            };

            if !self.found_goal {
                self.open.push(id, admitted_merit, admitted_cost);
            }
            if !found_best {
                found_best = true;
                if let Some(d) = self.partition.get_mut(coord) {
                    d.label = id;
                }
            }

            if let Some(k) = self.goal.in_goal(&arc) {
                if k >= arc.len() {
                    return Err(self.abort(PlannerError::MalformedTrajectory(format!(
                        "goal sample index {} out of range for arc of length {}",
                        k,
                        arc.len()
                    ))));
                }
                if admitted_cost < self.arena.get(self.best).cost {
                    self.best = id;
                    self.found_goal = true;
                    let effort = match self.arena.get(id).u_idx {
                        Some(u) => self.config.controls[u].norm_squared(),
                        None => 0.0,
                    };
                    let tail = (arc.time[arc.len() - 1] - arc.time[k])
                        * (1.0 + self.cost.lipschitz_cost() * effort);
                    self.upper = admitted_cost - tail;
                    log::debug!(
                        "incumbent: cost {:.6}, tail {:.6}, upper bound {:.6}",
                        admitted_cost,
                        tail,
                        self.upper
                    );
                    self.finish(TerminationReason::GoalReached);
                }
            }
        }

        let unlabeled = match self.partition.get(coord) {
            Some(d) => d.is_unlabeled(),
            None => false,
        };
        if unlabeled {
            self.partition.remove(coord);
        }
        Ok(())
    }

    /// Run `expand()` to termination and report the upper bound and
    /// wall time.
    pub fn plan(&mut self) -> PlannerResult<PlannerOutput> {
        while self.live {
            self.expand()?;
        }
        Ok(PlannerOutput {
            cost: self.upper,
            time: self.solve_time.as_secs_f64(),
        })
    }

    /// Node path from `best` back to the root; `forward` reverses it
    /// into root-to-goal order.
    pub fn path_to_root(&self, forward: bool) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.best;
        path.push(current);
        while let Some(parent) = self.arena.get(current).parent {
            path.push(parent);
            current = parent;
        }
        if forward {
            path.reverse();
        }
        path
    }

    /// Re-integrate the arcs along a node path into one trajectory,
    /// dropping the duplicated first sample of each successor arc.
    /// Empty when the path holds fewer than two nodes.
    pub fn recover_trajectory(&self, path: &[NodeId]) -> Trajectory {
        let mut solution = Trajectory::new();
        if path.len() < 2 {
            return solution;
        }
        let mut t0 = self.arena.get(path[0]).t;
        for i in 0..path.len() - 1 {
            let u_idx = match self.arena.get(path[i + 1]).u_idx {
                Some(u) => u,
                None => continue,
            };
            let arc = self.dynamics.sim(
                t0,
                t0 + self.expand_time,
                &self.arena.get(path[i]).x,
                &self.config.controls[u_idx],
            );
            t0 = match arc.last_time() {
                Some(t) => t,
                None => t0 + self.expand_time,
            };
            solution.append(arc);
        }
        solution
    }

    /// The recovered root-to-goal trajectory, when a goal was reached
    pub fn solution(&self) -> Option<Trajectory> {
        if !self.found_goal {
            return None;
        }
        Some(self.recover_trajectory(&self.path_to_root(true)))
    }

    fn finish(&mut self, reason: TerminationReason) {
        self.live = false;
        self.termination = Some(reason);
        self.solve_time = self.start_time.elapsed();
        match reason {
            TerminationReason::GoalReached => {
                log::info!("goal reached at iteration {}", self.iterations)
            }
            TerminationReason::QueueExhausted => {
                log::info!("open queue exhausted at iteration {}", self.iterations)
            }
            TerminationReason::DepthLimit => log::info!(
                "depth limit {} reached at iteration {}",
                self.depth_limit,
                self.iterations
            ),
            TerminationReason::IterationLimit => {
                log::info!("iteration cap {} reached", self.config.max_iter)
            }
        }
    }

    fn abort(&mut self, e: PlannerError) -> PlannerError {
        self.live = false;
        e
    }

    // Read-only search state

    pub fn live(&self) -> bool {
        self.live
    }

    pub fn found_goal(&self) -> bool {
        self.found_goal
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of collaborator integration calls so far
    pub fn sim_count(&self) -> usize {
        self.sim_count
    }

    /// Tail-corrected upper bound on the optimal cost; infinite until
    /// a goal is reached
    pub fn upper_bound(&self) -> f64 {
        self.upper
    }

    pub fn epsilon(&self) -> f64 {
        self.eps
    }

    pub fn expand_time(&self) -> f64 {
        self.expand_time
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Scale factor applied to states before flooring to cell
    /// coordinates
    pub fn scale_factor(&self) -> f64 {
        self.partition_scale
    }

    /// Side length of one partition cell in state space
    pub fn cell_side(&self) -> f64 {
        1.0 / self.eta
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The goal-reaching node, when one was admitted
    pub fn best(&self) -> Option<NodeId> {
        if self.best == SENTINEL {
            None
        } else {
            Some(self.best)
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    /// Arena size including the sentinel and root
    pub fn num_nodes(&self) -> usize {
        self.arena.len()
    }

    pub fn num_domains(&self) -> usize {
        self.partition.len()
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Label of the cell at `coord`, if the cell is live
    pub fn domain_label(&self, coord: &[i64]) -> Option<NodeId> {
        self.partition.get(coord).map(|d| d.label)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

fn check_arc(arc: &Trajectory, t0: f64, t1: f64, state_dim: usize) -> PlannerResult<()> {
    if arc.len() < 2 {
        return Err(PlannerError::MalformedTrajectory(
            "integrated arc has fewer than two samples".to_string(),
        ));
    }
    if arc.states.iter().any(|x| x.len() != state_dim) {
        return Err(PlannerError::MalformedTrajectory(format!(
            "integrated arc state dimension does not match state_dim {}",
            state_dim
        )));
    }
    if !arc.has_monotone_time() {
        return Err(PlannerError::MalformedTrajectory(
            "integrated arc times are not strictly increasing".to_string(),
        ));
    }
    let first = arc.time[0];
    let last = arc.time[arc.len() - 1];
    if (first - t0).abs() > 1e-9 || (last - t1).abs() > 1e-9 {
        return Err(PlannerError::MalformedTrajectory(format!(
            "integrated arc spans [{}, {}] instead of [{}, {}]",
            first, last, t0, t1
        )));
    }
    Ok(())
}

fn check_value(value: f64, what: &str) -> PlannerResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlannerError::InvalidCost(format!(
            "{} must be finite and non-negative, got {}",
            what, value
        )));
    }
    Ok(())
}
