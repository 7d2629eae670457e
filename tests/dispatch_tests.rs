//! Replays a scripted request sequence and checks the rendered elevator
//! state after each request against a golden trace.

use chrono::Duration;
use elevator_dispatch::request::{RawRequest, Request};
use elevator_dispatch::ElevatorSystem;

#[test]
fn replays_requests_json_against_golden_trace() {
    let requests_json = include_str!("../fixtures/requests.json");
    let golden = include_str!("../fixtures/system_states.txt");

    let raw_requests: Vec<RawRequest> = serde_json::from_str(requests_json).unwrap();

    let mut system = ElevatorSystem::new(2, 5, Duration::seconds(10));
    let mut trace = String::new();
    for raw in raw_requests {
        let request: Request = raw.try_into().unwrap();
        system.take_request(request).unwrap();
        trace.push_str(&system.render());
        trace.push('\n');
    }

    assert_eq!(trace, golden);
}
