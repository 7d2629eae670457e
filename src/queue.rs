/**
 * Directionally sorted sequence of pending calls for one elevator (or the
 * system backlog).
 *
 * After each `append` the sequence is sorted so the tail is the call to
 * service next: ascending by floor when the incoming call's sense is DOWN,
 * descending when it is UP. All queued calls share one direction of travel,
 * so the sort key stays unambiguous.
 */

/***************************************/
/*           Local modules             */
/***************************************/
use crate::call::{Call, Sense};

/***************************************/
/*             Public API              */
/***************************************/
#[derive(Debug, Clone, Default)]
pub struct ElevatorQueue {
    calls: Vec<Call>,
}

impl ElevatorQueue {
    pub fn new() -> ElevatorQueue {
        ElevatorQueue { calls: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// The call that will be serviced next, if any.
    pub fn tail(&self) -> Option<&Call> {
        self.calls.last()
    }

    pub fn tail_mut(&mut self) -> Option<&mut Call> {
        self.calls.last_mut()
    }

    /// Calls in service order, tail last. Used by `render()`.
    pub fn iter(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter()
    }

    pub fn append(&mut self, call: Call) {
        let sense = call.sense;
        self.calls.push(call);
        self.sort(sense);
    }

    /// Remove and return the tail. Precondition: queue is non-empty; this
    /// is a programmer-contract violation otherwise.
    pub fn pop(&mut self) -> Call {
        self.calls.pop().expect("pop on empty ElevatorQueue")
    }

    fn sort(&mut self, sense: Sense) {
        match sense {
            // Tail = smallest floor, so pop-next is the lowest floor going up.
            Sense::Up => self.calls.sort_by(|a, b| b.floor.cmp(&a.floor)),
            // Tail = largest floor, so pop-next is the highest floor going down.
            Sense::Down => self.calls.sort_by(|a, b| a.floor.cmp(&b.floor)),
        }
    }
}

impl PartialEq for ElevatorQueue {
    fn eq(&self, other: &ElevatorQueue) -> bool {
        self.calls.len() == other.calls.len()
            && self
                .calls
                .iter()
                .zip(other.calls.iter())
                .all(|(a, b)| a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::CallType;

    fn out_call(floor: u32, sense: Sense) -> Call {
        Call::new(CallType::Out, floor, sense, None)
    }

    #[test]
    fn append_sorts_ascending_for_down_tail_is_largest() {
        let mut q = ElevatorQueue::new();
        q.append(out_call(3, Sense::Down));
        q.append(out_call(7, Sense::Down));
        q.append(out_call(5, Sense::Down));
        assert_eq!(q.tail().unwrap().floor, 7);
    }

    #[test]
    fn append_sorts_descending_for_up_tail_is_smallest() {
        let mut q = ElevatorQueue::new();
        q.append(out_call(3, Sense::Up));
        q.append(out_call(7, Sense::Up));
        q.append(out_call(5, Sense::Up));
        assert_eq!(q.tail().unwrap().floor, 3);
    }

    #[test]
    fn pop_updates_is_empty() {
        let mut q = ElevatorQueue::new();
        q.append(out_call(3, Sense::Up));
        assert!(!q.is_empty());
        q.pop();
        assert!(q.is_empty());
    }

    #[test]
    fn resorting_an_already_sorted_queue_is_a_no_op() {
        let mut q = ElevatorQueue::new();
        q.append(out_call(3, Sense::Down));
        q.append(out_call(7, Sense::Down));
        let before: Vec<u32> = q.iter().map(|c| c.floor).collect();
        q.sort(Sense::Down);
        let after: Vec<u32> = q.iter().map(|c| c.floor).collect();
        assert_eq!(before, after);
    }
}
