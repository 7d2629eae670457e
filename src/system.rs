/**
 * Bank-level dispatcher.
 *
 * Owns all elevators and a single backlog queue for calls no elevator
 * could currently accept. `take_request` is the sole entry point: it
 * applies the authoritative per-tick floor state to every elevator, then
 * (if a call is present) searches for an admissible, nearest cabin, or
 * else appends the call to the backlog. After every state application one
 * backlog entry is retried.
 *
 * # Fields
 * - `elevators`:  Bank of cabins, indices 0..n_elevators-1.
 * - `n_floors`:   Number of floors serviced.
 * - `wait`:       Grace period forwarded to every elevator.
 * - `backlog`:    Calls no elevator could accept at assignment time.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use chrono::{Duration, NaiveDateTime};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt::Write as _;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::call::Call;
use crate::elevator::Elevator;
use crate::error::DispatchError;
use crate::queue::ElevatorQueue;
use crate::request::{CallSpec, Request};

/***************************************/
/*             Public API              */
/***************************************/
#[derive(Debug, Clone)]
pub struct ElevatorSystem {
    pub elevators: Vec<Elevator>,
    pub n_floors: u32,
    pub wait: Duration,
    pub backlog: ElevatorQueue,
}

impl ElevatorSystem {
    pub fn new(n_elevators: u32, n_floors: u32, wait: Duration) -> ElevatorSystem {
        let elevators = (0..n_elevators).map(|id| Elevator::new(id, wait)).collect();
        ElevatorSystem {
            elevators,
            n_floors,
            wait,
            backlog: ElevatorQueue::new(),
        }
    }

    /// Elevators able to accept `call`, in index order.
    fn available(&self, call: &Call) -> Vec<usize> {
        self.elevators
            .iter()
            .enumerate()
            .filter(|(_, e)| e.can_accept(call))
            .map(|(i, _)| i)
            .collect()
    }

    /// Index, among `candidates`, of the elevator nearest to `call.floor`.
    /// Ties resolve to the lowest index.
    fn nearest(&self, candidates: &[usize], call: &Call) -> usize {
        let mut best = candidates[0];
        let mut best_distance = self.elevators[best].floor.abs_diff(call.floor);
        for &idx in &candidates[1..] {
            let distance = self.elevators[idx].floor.abs_diff(call.floor);
            if distance < best_distance {
                best = idx;
                best_distance = distance;
            }
        }
        best
    }

    /// Assign `call` to the nearest admissible elevator, or append it to the backlog.
    pub fn take_call(&mut self, call: Call) {
        let candidates = self.available(&call);
        if candidates.is_empty() {
            debug!("no elevator available for {:?}@{}, backlogged", call.call_type, call.floor);
            self.backlog.append(call);
        } else {
            let idx = self.nearest(&candidates, &call);
            info!("elevator {} assigned {:?}@{}", idx, call.call_type, call.floor);
            self.elevators[idx].take_call(call);
        }
    }

    /// Apply the authoritative floor of every cabin, then retry one backlog entry.
    pub fn update_state(
        &mut self,
        state: &HashMap<u32, u32>,
        now: NaiveDateTime,
    ) -> Result<(), DispatchError> {
        // Validate every id is present before mutating any elevator, so a
        // missing id leaves all elevator state untouched.
        for elevator in &self.elevators {
            if !state.contains_key(&elevator.elevator_id) {
                return Err(DispatchError::MissingElevatorState(elevator.elevator_id));
            }
        }
        for elevator in &mut self.elevators {
            let floor = state[&elevator.elevator_id];
            elevator.update_position(floor, now);
        }
        if !self.backlog.is_empty() {
            let call = self.backlog.pop();
            self.take_call(call);
        }
        Ok(())
    }

    /// Validate and ingest a `Request`. All validation happens before any
    /// mutation: a rejected request leaves every elevator's state unchanged.
    pub fn take_request(&mut self, request: Request) -> Result<(), DispatchError> {
        let call = request.call.map(CallSpec::into_call).transpose()?;

        if let Some(call) = &call {
            if call.floor > self.n_floors {
                warn!("rejected call at floor {} (n_floors={})", call.floor, self.n_floors);
                return Err(DispatchError::FloorOutOfRange {
                    floor: call.floor,
                    n_floors: self.n_floors,
                });
            }
        }

        self.update_state(&request.state, request.timestamp)?;

        if let Some(call) = call {
            self.take_call(call);
        }
        Ok(())
    }

    /// Human-readable multi-line summary, one line per elevator:
    /// `"<id>: [<floor>, <floor>, ...]\n"`, floors in service order (tail last).
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, elevator) in self.elevators.iter().enumerate() {
            let floors: Vec<String> = elevator.queue.iter().map(|c| c.floor.to_string()).collect();
            let _ = writeln!(out, "{}: [{}]", i, floors.join(", "));
        }
        out
    }
}
