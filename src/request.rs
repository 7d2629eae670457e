/**
 * Wire types for the dispatcher's sole entry point.
 *
 * `Request` deserializes from the dispatcher's wire JSON shape. `state`
 * keys arrive as strings and are coerced to `u32`; a call's timestamp is
 * never accepted from the caller and is instead latched only once the
 * owning elevator reaches the requested floor.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::HashMap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::call::{Call, CallType, Sense};
use crate::error::DispatchError;

/***************************************/
/*       Wire (raw, untrusted) types   */
/***************************************/
#[derive(Debug, Deserialize)]
pub struct RawRequest {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub state: HashMap<String, u32>,
    #[serde(default)]
    pub call: Option<RawCallSpec>,
}

#[derive(Debug, Deserialize)]
pub struct RawCallSpec {
    pub call_type: String,
    pub floor: i64,
    pub sense: String,
    pub elevator_id: Option<u32>,
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/***************************************/
/*          Validated types            */
/***************************************/
#[derive(Debug, Clone)]
pub struct CallSpec {
    pub call_type: CallType,
    pub floor: u32,
    pub sense: Sense,
    pub elevator_id: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Request {
    pub timestamp: NaiveDateTime,
    pub state: HashMap<u32, u32>,
    pub call: Option<CallSpec>,
}

impl CallSpec {
    /// `Call.timestamp` is only ever set by `attend`, at the moment the
    /// owning elevator reaches `floor` — never at construction, so the wire
    /// contract gives callers no way to supply their own.
    pub fn into_call(self) -> Result<Call, DispatchError> {
        if self.call_type == CallType::In && self.elevator_id.is_none() {
            return Err(DispatchError::MissingElevatorId);
        }
        Ok(Call::new(self.call_type, self.floor, self.sense, self.elevator_id))
    }
}

impl TryFrom<RawCallSpec> for CallSpec {
    type Error = DispatchError;

    fn try_from(raw: RawCallSpec) -> Result<Self, Self::Error> {
        let call_type = match raw.call_type.as_str() {
            "in" => CallType::In,
            "out" => CallType::Out,
            other => return Err(DispatchError::InvalidCallType(other.to_string())),
        };
        let sense = match raw.sense.as_str() {
            "upward" => Sense::Up,
            "downward" => Sense::Down,
            other => return Err(DispatchError::InvalidSense(other.to_string())),
        };
        if raw.floor < 1 {
            return Err(DispatchError::NonPositiveFloor(raw.floor));
        }
        Ok(CallSpec {
            call_type,
            floor: raw.floor as u32,
            sense,
            elevator_id: raw.elevator_id,
        })
    }
}

impl TryFrom<RawRequest> for Request {
    type Error = DispatchError;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        let call = raw.call.map(CallSpec::try_from).transpose()?;
        let mut state = HashMap::with_capacity(raw.state.len());
        for (k, v) in raw.state {
            let id: u32 = k.parse().map_err(|_| DispatchError::InvalidStateKey(k))?;
            state.insert(id, v);
        }
        Ok(Request {
            timestamp: raw.timestamp,
            state,
            call,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_request_with_call() {
        let json = r#"{
            "timestamp": "2022-05-13 08:00:00",
            "state": {"0": 5, "1": 3, "2": 10},
            "call": {"call_type": "out", "floor": 2, "sense": "upward", "elevator_id": null}
        }"#;
        let raw: RawRequest = serde_json::from_str(json).unwrap();
        let request: Request = raw.try_into().unwrap();
        assert_eq!(request.state.get(&1), Some(&3));
        assert!(request.call.is_some());
    }

    #[test]
    fn rejects_invalid_call_type() {
        let raw = RawCallSpec {
            call_type: "sideways".to_string(),
            floor: 2,
            sense: "upward".to_string(),
            elevator_id: None,
        };
        let err = CallSpec::try_from(raw).unwrap_err();
        assert_eq!(err, DispatchError::InvalidCallType("sideways".to_string()));
    }

    #[test]
    fn rejects_in_call_without_elevator_id() {
        let spec = CallSpec {
            call_type: CallType::In,
            floor: 2,
            sense: Sense::Up,
            elevator_id: None,
        };
        let err = spec.into_call().unwrap_err();
        assert_eq!(err, DispatchError::MissingElevatorId);
    }
}
