/**
 * A single user request for elevator service.
 *
 * # Fields
 * - `call_type`:      IN (destination selection from inside a cabin) or OUT (hall call).
 * - `floor`:          Target floor, 1-indexed.
 * - `sense`:          Direction of travel the call implies.
 * - `timestamp`:      Set once, at the instant the owning elevator reaches `floor`.
 * - `elevator_id`:    Set for IN calls, binding the call to a specific cabin.
 * - `not_attended`:   True until `attend` latches, then permanently false.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use chrono::NaiveDateTime;

/***************************************/
/*             Public API              */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallType {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub call_type: CallType,
    pub floor: u32,
    pub sense: Sense,
    pub elevator_id: Option<u32>,
    timestamp: Option<NaiveDateTime>,
    not_attended: bool,
}

impl Call {
    pub fn new(call_type: CallType, floor: u32, sense: Sense, elevator_id: Option<u32>) -> Call {
        Call {
            call_type,
            floor,
            sense,
            elevator_id,
            timestamp: None,
            not_attended: true,
        }
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    pub fn not_attended(&self) -> bool {
        self.not_attended
    }

    /// One-shot latch: the first call reaching `floor` stamps `timestamp` and
    /// flips `not_attended`. Subsequent calls are a no-op.
    pub fn attend(&mut self, now: NaiveDateTime) {
        if self.not_attended {
            self.timestamp = Some(now);
            self.not_attended = false;
        }
    }
}

// Equality compares every field except `not_attended`.
impl PartialEq for Call {
    fn eq(&self, other: &Call) -> bool {
        self.call_type == other.call_type
            && self.floor == other.floor
            && self.sense == other.sense
            && self.elevator_id == other.elevator_id
            && self.timestamp == other.timestamp
    }
}
impl Eq for Call {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 5, 13)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn new_call_is_not_attended_with_no_timestamp() {
        let call = Call::new(CallType::Out, 7, Sense::Up, None);
        assert!(call.not_attended());
        assert_eq!(call.timestamp(), None);
    }

    #[test]
    fn attend_latches_once() {
        let mut call = Call::new(CallType::Out, 7, Sense::Up, None);
        call.attend(now());
        assert!(!call.not_attended());
        assert_eq!(call.timestamp(), Some(now()));

        // Attending again must not move the timestamp.
        let later = now() + chrono::Duration::seconds(30);
        call.attend(later);
        assert_eq!(call.timestamp(), Some(now()));
    }
}
