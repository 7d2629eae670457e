/**
 * Per-cabin state machine.
 *
 * Tracks current floor, current direction of travel, the pending-stop
 * queue, and the grace period a cabin holds an answered OUT call while
 * waiting for the rider to press a destination.
 *
 * # Fields
 * - `elevator_id`:  Unique non-negative identifier.
 * - `floor`:        Current position, externally driven by each state tick.
 * - `sense`:        Direction of travel; IDLE iff the queue is empty.
 * - `queue`:        Pending calls, directionally sorted.
 * - `wait`:         Grace period before an unused OUT call is evicted.
 * - `timestamp`:    Wall-clock of the last `update_position`.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use chrono::{Duration, NaiveDateTime};
use log::debug;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::call::{Call, CallType, Sense};
use crate::queue::ElevatorQueue;

/***************************************/
/*             Public API              */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Travel {
    Idle,
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct Elevator {
    pub elevator_id: u32,
    pub floor: u32,
    pub sense: Travel,
    pub queue: ElevatorQueue,
    pub wait: Duration,
    pub timestamp: Option<NaiveDateTime>,
}

impl Elevator {
    pub fn new(elevator_id: u32, wait: Duration) -> Elevator {
        Elevator {
            elevator_id,
            floor: 1,
            sense: Travel::Idle,
            queue: ElevatorQueue::new(),
            wait,
            timestamp: None,
        }
    }

    /// Admission predicate: can this cabin accept `call` right now?
    pub fn can_accept(&self, call: &Call) -> bool {
        match call.call_type {
            CallType::In => self.can_accept_in(call),
            CallType::Out => self.can_accept_out(call),
        }
    }

    fn can_accept_in(&self, call: &Call) -> bool {
        if call.elevator_id != Some(self.elevator_id) {
            return false;
        }
        match self.queue.tail() {
            Some(tail) => tail.sense == call.sense,
            None => false,
        }
    }

    fn can_accept_out(&self, call: &Call) -> bool {
        if self.queue.is_empty() {
            return true;
        }
        match self.sense {
            Travel::Up => call.sense == Sense::Up && self.floor <= call.floor,
            Travel::Down => call.sense == Sense::Down && self.floor >= call.floor,
            Travel::Idle => false,
        }
    }

    /// Unchecked: the caller must only invoke this after `can_accept` returned true.
    pub fn take_call(&mut self, call: Call) {
        if call.call_type == CallType::In {
            self.reclaim_answered();
        }
        self.sense = if self.floor <= call.floor {
            Travel::Up
        } else {
            Travel::Down
        };
        debug!(
            "elevator {} takes {:?}@{} ({:?})",
            self.elevator_id, call.call_type, call.floor, self.sense
        );
        self.queue.append(call);
    }

    /// Pop the tail while the cabin has reached or passed it.
    pub fn reclaim_answered(&mut self) {
        loop {
            let answered = match self.queue.tail() {
                Some(tail) => match self.sense {
                    Travel::Up => self.floor >= tail.floor,
                    Travel::Down => self.floor <= tail.floor,
                    Travel::Idle => false,
                },
                None => break,
            };
            if !answered {
                break;
            }
            self.queue.pop();
        }
        if self.queue.is_empty() {
            self.sense = Travel::Idle;
        }
    }

    pub fn update_position(&mut self, new_floor: u32, now: NaiveDateTime) {
        self.floor = new_floor;
        self.timestamp = Some(now);

        if self.queue.is_empty() {
            return;
        }

        let reached = self.queue.tail().map(|t| t.floor) == Some(self.floor);
        if reached {
            if let Some(tail) = self.queue.tail_mut() {
                tail.attend(now);
            }
        }

        if self.tail_eligible_for_eviction(now) {
            self.reclaim_answered();
        }
    }

    fn tail_eligible_for_eviction(&self, now: NaiveDateTime) -> bool {
        let tail = match self.queue.tail() {
            Some(t) => t,
            None => return false,
        };
        if tail.not_attended() {
            return false;
        }
        match tail.call_type {
            CallType::In => true,
            CallType::Out => match tail.timestamp() {
                Some(ts) => self.wait < now - ts,
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::CallType;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn wait() -> Duration {
        Duration::seconds(10)
    }

    #[test]
    fn new_elevator_starts_idle_at_floor_one() {
        let e = Elevator::new(0, wait());
        assert_eq!(e.floor, 1);
        assert_eq!(e.sense, Travel::Idle);
        assert!(e.queue.is_empty());
    }

    #[test]
    fn out_call_accepted_when_queue_empty() {
        let e = Elevator::new(0, wait());
        let call = Call::new(CallType::Out, 7, Sense::Up, None);
        assert!(e.can_accept(&call));
    }

    #[test]
    fn out_call_rejected_when_moving_opposite_direction() {
        let mut e = Elevator::new(0, wait());
        e.take_call(Call::new(CallType::Out, 7, Sense::Up, None));
        let opposing = Call::new(CallType::Out, 3, Sense::Down, None);
        assert!(!e.can_accept(&opposing));
    }

    #[test]
    fn out_call_rejected_when_floor_behind_direction_of_travel() {
        let mut e = Elevator::new(0, wait());
        e.floor = 5;
        e.take_call(Call::new(CallType::Out, 7, Sense::Up, None));
        // Already moving up, past floor 2.
        let behind = Call::new(CallType::Out, 2, Sense::Up, None);
        assert!(!e.can_accept(&behind));
    }

    #[test]
    fn in_call_rejected_on_empty_queue() {
        let e = Elevator::new(0, wait());
        let call = Call::new(CallType::In, 7, Sense::Up, Some(0));
        assert!(!e.can_accept(&call));
    }

    #[test]
    fn in_call_rejected_for_wrong_elevator() {
        let mut e = Elevator::new(0, wait());
        e.take_call(Call::new(CallType::Out, 7, Sense::Up, None));
        let call = Call::new(CallType::In, 9, Sense::Up, Some(1));
        assert!(!e.can_accept(&call));
    }

    #[test]
    fn in_call_accepted_with_matching_tail_sense() {
        let mut e = Elevator::new(0, wait());
        e.take_call(Call::new(CallType::Out, 7, Sense::Up, None));
        let call = Call::new(CallType::In, 9, Sense::Up, Some(0));
        assert!(e.can_accept(&call));
    }

    #[test]
    fn take_call_sets_direction_from_current_floor() {
        let mut e = Elevator::new(0, wait());
        e.floor = 5;
        e.take_call(Call::new(CallType::Out, 2, Sense::Down, None));
        assert_eq!(e.sense, Travel::Down);
    }

    #[test]
    fn reclaim_answered_empties_queue_and_goes_idle() {
        let mut e = Elevator::new(0, wait());
        e.take_call(Call::new(CallType::Out, 3, Sense::Up, None));
        e.floor = 3;
        e.reclaim_answered();
        assert!(e.queue.is_empty());
        assert_eq!(e.sense, Travel::Idle);
    }

    #[test]
    fn update_position_attends_tail_on_arrival() {
        let mut e = Elevator::new(0, wait());
        e.take_call(Call::new(CallType::Out, 3, Sense::Up, None));
        e.update_position(3, now());
        assert!(!e.queue.tail().unwrap().not_attended());
    }

    #[test]
    fn update_position_evicts_in_call_immediately_on_attend() {
        let mut e = Elevator::new(0, wait());
        e.take_call(Call::new(CallType::Out, 3, Sense::Up, None));
        e.update_position(3, now());
        e.take_call(Call::new(CallType::In, 9, Sense::Up, Some(0)));
        e.update_position(9, now());
        assert!(e.queue.is_empty());
        assert_eq!(e.sense, Travel::Idle);
    }

    #[test]
    fn update_position_holds_out_call_until_wait_elapses() {
        let mut e = Elevator::new(0, wait());
        e.take_call(Call::new(CallType::Out, 3, Sense::Up, None));
        e.update_position(3, now());
        // Still within the wait window: call stays queued.
        e.update_position(3, now() + Duration::seconds(5));
        assert!(!e.queue.is_empty());
        // Past the wait window: call is evicted.
        e.update_position(3, now() + Duration::seconds(11));
        assert!(e.queue.is_empty());
    }
}
