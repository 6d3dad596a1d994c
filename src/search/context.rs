//! Alpha-beta recursion.
//!
//! This module implements:
//! - Negamax fail-hard alpha-beta
//! - Null move pruning
//! - Table move first, then bucketed move order
//! - Transposition table lookups and stores around every node
//! - Cancellation by stop flag or deadline

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::constants::TIME_CHECK_INTERVAL;
use super::eval::evaluate;
use super::move_list::{MoveList, PRIORITIES};
use super::params::SearchParams;
use crate::board::Move;
use crate::position::Position;
use crate::tt::{Bound, StateInfo, TranspositionTable};

/// What a node hands back to the table wrapper.
#[derive(Clone, Copy, Debug)]
struct NodeResult {
    score: i32,
    best_move: Option<Move>,
    /// Depth actually searched, after any null-move reduction
    depth: i32,
}

/// Search context for a single top-level search
pub(crate) struct SearchContext<'a, P: Position> {
    pub pos: &'a mut P,
    pub table: &'a mut TranspositionTable<P>,
    pub lists: &'a mut Vec<MoveList>,
    pub params: &'a SearchParams,
    pub stop: &'a AtomicBool,
    pub start_time: Instant,
    pub time_limit: Option<Duration>,
    pub trace: bool,
    /// Depth of the current iterative deepening pass
    pub pass_depth: i32,
    /// Set once a pass has completed; until then nothing interrupts the search
    pub cancellable: bool,
    pub aborted: bool,
    pub nodes: u64,
    pub evaluations: u64,
    pub table_hits: u64,
    /// Best root move found so far in the current pass
    pub root_best: Option<Move>,
}

impl<'a, P: Position> SearchContext<'a, P> {
    pub fn begin_pass(&mut self, depth: i32) {
        self.pass_depth = depth;
        self.root_best = None;
    }

    /// Move to play from the root after a completed pass: the table's entry
    /// for the root if there is one, else the best root move of the pass.
    pub fn root_move(&self) -> Option<Move> {
        self.table
            .get(self.pos.identity())
            .filter(|entry| entry.state == *self.pos)
            .and_then(|entry| entry.best_move)
            .or(self.root_best)
    }

    fn should_stop(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if !self.cancellable {
            return false;
        }
        if self.stop.load(Ordering::Relaxed) {
            self.aborted = true;
        } else if let Some(limit) = self.time_limit {
            if self.nodes % TIME_CHECK_INTERVAL == 0 && self.start_time.elapsed() >= limit {
                self.aborted = true;
            }
        }
        self.aborted
    }

    /// Search the current position, answering from or recording into the
    /// transposition table.
    pub fn search_with_table(&mut self, depth: i32, alpha: i32, beta: i32, ply: usize) -> i32 {
        if !self.params.use_transposition_table {
            return self.search(depth, alpha, beta, ply, None).score;
        }

        let key = self.pos.identity();
        let mut pv_move = None;
        let mut known = false;
        if let Some(entry) = self.table.get(key).filter(|e| e.state == *self.pos) {
            if ply > 0 && entry.depth >= depth && entry.bound.settles(entry.score, alpha, beta) {
                self.table_hits += 1;
                return entry.score.clamp(alpha, beta);
            }
            pv_move = entry.best_move;
            known = true;
        }

        let result = self.search(depth, alpha, beta, ply, pv_move);
        if self.aborted {
            return result.score;
        }

        if known || depth >= self.pass_depth - self.params.transposition_depth {
            let bound = if result.score >= beta {
                Bound::Lower
            } else if result.score <= alpha {
                Bound::Upper
            } else {
                Bound::Exact
            };
            let updated = match self.table.get_mut(key) {
                Some(entry) if entry.state == *self.pos => {
                    entry.depth = result.depth;
                    entry.score = result.score;
                    entry.bound = bound;
                    if result.best_move.is_some() {
                        entry.best_move = result.best_move;
                    }
                    true
                }
                _ => false,
            };
            if !updated {
                self.table.put(StateInfo {
                    key,
                    state: self.pos.clone(),
                    depth: result.depth,
                    score: result.score,
                    bound,
                    best_move: result.best_move,
                });
            }
        }

        result.score
    }

    fn search(
        &mut self,
        mut depth: i32,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        pv_move: Option<Move>,
    ) -> NodeResult {
        self.nodes += 1;
        let mut best_move = None;

        if self.should_stop() {
            return NodeResult {
                score: alpha,
                best_move,
                depth,
            };
        }

        if depth <= 0 || !self.pos.both_kings_alive() {
            self.evaluations += 1;
            return NodeResult {
                score: evaluate(&*self.pos, depth),
                best_move,
                depth,
            };
        }

        // The root is always searched to full depth.
        if self.params.null_move && ply > 0 && depth > self.params.null_reduction {
            self.pos.null_move();
            let score = -self.search_with_table(
                depth - self.params.null_reduction - 1,
                -beta,
                -beta + 1,
                ply + 1,
            );
            self.pos.null_move();
            if self.aborted {
                return NodeResult {
                    score: alpha,
                    best_move,
                    depth,
                };
            }
            if score >= beta {
                depth = (depth - self.params.null_depth_reduction).max(1);
            }
        }

        if let Some(mv) = pv_move {
            alpha = self.search_move(depth, alpha, beta, ply, mv, &mut best_move);
            if alpha >= beta || self.aborted {
                return NodeResult {
                    score: beta.min(alpha),
                    best_move,
                    depth,
                };
            }
        }

        if self.lists.len() <= ply {
            self.lists.resize_with(ply + 1, MoveList::new);
        }
        self.lists[ply].populate(&*self.pos);

        for bucket in 0..PRIORITIES {
            for idx in 0..self.lists[ply].count(bucket) {
                let mv = self.lists[ply].get(bucket, idx);
                if Some(mv) == pv_move {
                    continue;
                }
                alpha = self.search_move(depth, alpha, beta, ply, mv, &mut best_move);
                if alpha >= beta || self.aborted {
                    return NodeResult {
                        score: beta.min(alpha),
                        best_move,
                        depth,
                    };
                }
            }
        }

        NodeResult {
            score: alpha,
            best_move,
            depth,
        }
    }

    fn search_move(
        &mut self,
        depth: i32,
        alpha: i32,
        beta: i32,
        ply: usize,
        mv: Move,
        best_move: &mut Option<Move>,
    ) -> i32 {
        let undo = self.pos.make_move(mv);
        let score = -self.search_with_table(depth - 1, -beta, -alpha, ply + 1);
        self.pos.unmake_move(mv, undo);

        if self.aborted || score <= alpha {
            return alpha;
        }

        *best_move = Some(mv);
        if ply == 0 {
            self.root_best = Some(mv);
            if self.trace {
                log::debug!(
                    "depth {} root {} score {} (static {})",
                    self.pass_depth,
                    mv,
                    score,
                    evaluate(&*self.pos, 0)
                );
            }
        }
        score
    }
}
