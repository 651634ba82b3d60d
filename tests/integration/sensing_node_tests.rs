//! Sensing node controller against mock adapters.

use fanlink::app::events::NodeEvent;
use fanlink::app::sensing::{SensingHardware, SensingNode};
use fanlink::config::{SystemConfig, TimerConfig};
use fanlink::drivers::duty_cycle::DutyRequest;
use fanlink::error::{Error, LinkError};
use fanlink::protocol::{NodeRole, Phase, SpeedClass, TemperatureReport};

use super::mock_hw::{
    FanCall, FixedTemperature, MockDisplay, MockFan, MockLink, MockSwitch, RecordingSink,
};

type Node = SensingNode<MockLink, FixedTemperature, MockSwitch, MockFan, MockDisplay>;

fn make_node(celsius: u8, override_on: bool, inbound: &[u8]) -> (Node, RecordingSink) {
    let hw = SensingHardware {
        temperature: FixedTemperature::new(celsius),
        override_pin: MockSwitch(override_on),
        fan: MockFan::new(),
        display: MockDisplay::default(),
    };
    let node = SensingNode::new(MockLink::with(inbound), hw, SystemConfig::default());
    (node, RecordingSink::default())
}

#[test]
fn start_waits_for_partner_token_without_transmitting() {
    let (mut node, mut sink) = make_node(25, false, &[0x7f, 0x02]);
    node.start(&mut sink).unwrap();

    assert!(node.sequencer().link().outbound.is_empty());
    assert_eq!(node.sequencer().stats().discarded, 1);
    assert_eq!(sink.events, vec![NodeEvent::Started(NodeRole::Sensing)]);
}

#[test]
fn phase_one_reports_temperature() {
    let (mut node, mut sink) = make_node(45, false, &[0x02, 0x02]);
    node.start(&mut sink).unwrap();
    node.step(&mut sink).unwrap();

    assert_eq!(node.sequencer().link().outbound, vec![0x01, 45]);
    assert_eq!(node.phase(), Phase::Two);
    assert_eq!(node.hw().display.rows[0], "Temp = 45 C");
    assert_eq!(
        sink.events.last(),
        Some(&NodeEvent::TemperatureSent {
            phase: Phase::One,
            report: TemperatureReport::Reading(45),
        })
    );
}

#[test]
fn override_switch_sends_sentinel() {
    let (mut node, mut sink) = make_node(45, true, &[0x02, 0x02]);
    node.start(&mut sink).unwrap();
    node.step(&mut sink).unwrap();

    assert_eq!(node.sequencer().link().outbound, vec![0x01, 200]);
    assert_eq!(
        sink.events.last(),
        Some(&NodeEvent::TemperatureSent {
            phase: Phase::One,
            report: TemperatureReport::OverrideRequested,
        })
    );
}

#[test]
fn high_speed_class_starts_fan() {
    let (mut node, mut sink) = make_node(45, false, &[0x02, 0x02, 0x02, 70]);
    node.start(&mut sink).unwrap();
    node.step(&mut sink).unwrap();
    node.step(&mut sink).unwrap();

    assert_eq!(node.phase(), Phase::One);
    assert_eq!(node.sequencer().link().outbound, vec![0x01, 45, 0x01]);
    assert_eq!(
        node.hw().fan.calls,
        vec![
            FanCall::Configure(TimerConfig::default()),
            FanCall::Drive(DutyRequest::forward(100)),
        ]
    );
    assert_eq!(
        sink.events.last(),
        Some(&NodeEvent::SpeedClassReceived {
            phase: Phase::Two,
            class: SpeedClass::AtOrAboveThreshold,
            fan_running: true,
        })
    );
}

#[test]
fn low_speed_class_stops_fan() {
    let (mut node, mut sink) = make_node(10, false, &[0x02, 0x02, 0x02, 0]);
    node.start(&mut sink).unwrap();
    node.step(&mut sink).unwrap();
    node.step(&mut sink).unwrap();

    assert_eq!(node.hw().fan.calls, vec![FanCall::Stop]);
    assert!(!node.hw().fan.running());
}

#[test]
fn unexpected_class_byte_counts_as_low() {
    let (mut node, mut sink) = make_node(10, false, &[0x02, 0x02, 0x02, 69]);
    node.start(&mut sink).unwrap();
    node.step(&mut sink).unwrap();
    node.step(&mut sink).unwrap();

    assert_eq!(node.hw().fan.last_call(), Some(&FanCall::Stop));
}

#[test]
fn temperature_is_sampled_every_round() {
    let (mut node, mut sink) = make_node(30, false, &[0x02, 0x02, 0x02, 0]);
    node.start(&mut sink).unwrap();
    node.step(&mut sink).unwrap();
    node.step(&mut sink).unwrap();

    assert_eq!(node.hw().temperature.reads, 2);
    assert_eq!(node.hw().display.writes, 2);
}

#[test]
fn run_returns_when_link_goes_away() {
    let (mut node, mut sink) = make_node(30, false, &[0x02, 0x02]);
    node.start(&mut sink).unwrap();

    let err = node.run(&mut sink).unwrap_err();
    assert_eq!(err, Error::Link(LinkError::Disconnected));
    // Round one completed; round two stalled waiting for the partner.
    assert_eq!(node.sequencer().stats().rounds, 1);
    assert_eq!(node.phase(), Phase::Two);
}
