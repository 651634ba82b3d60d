//! Actuating node controller against mock adapters.

use fanlink::app::actuating::{ActuatingHardware, ActuatingNode};
use fanlink::app::events::NodeEvent;
use fanlink::config::{SystemConfig, TimerConfig};
use fanlink::drivers::duty_cycle::DutyRequest;
use fanlink::drivers::indicator::TemperatureBand;
use fanlink::protocol::{NodeRole, Phase, SpeedClass, TemperatureReport};
use fanlink::sensors::AnalogSample;

use super::mock_hw::{
    FanCall, FixedAnalog, MockDisplay, MockFan, MockIndicator, MockLink, RecordingSink,
};

type Node = ActuatingNode<MockLink, FixedAnalog, MockIndicator, MockFan, MockDisplay>;

fn make_node(raw: u16, inbound: &[u8]) -> (Node, RecordingSink) {
    let hw = ActuatingHardware {
        analog: FixedAnalog::new(raw),
        indicators: MockIndicator::default(),
        fan: MockFan::new(),
        display: MockDisplay::default(),
    };
    let node = ActuatingNode::new(MockLink::with(inbound), hw, SystemConfig::default());
    (node, RecordingSink::default())
}

/// Start, then run one full cycle for a single temperature byte.
fn run_cycle(raw: u16, temperature: u8) -> (Node, RecordingSink) {
    let (mut node, mut sink) = make_node(raw, &[0x01, temperature, 0x01]);
    node.start(&mut sink).unwrap();
    node.step(&mut sink).unwrap();
    node.step(&mut sink).unwrap();
    (node, sink)
}

#[test]
fn start_configures_timer_then_announces() {
    let (mut node, mut sink) = make_node(0, &[]);
    node.start(&mut sink).unwrap();

    assert_eq!(node.hw().fan.calls, vec![FanCall::Configure(TimerConfig::default())]);
    assert_eq!(node.sequencer().link().outbound, vec![0x02]);
    assert_eq!(node.hw().display.rows[0], "ADC VALUE = ");
    assert_eq!(sink.events, vec![NodeEvent::Started(NodeRole::Actuating)]);
}

#[test]
fn reading_samples_adc_and_lights_band() {
    let (mut node, mut sink) = make_node(800, &[0x01, 45]);
    node.start(&mut sink).unwrap();
    node.step(&mut sink).unwrap();

    assert_eq!(node.sample(), AnalogSample::new(800));
    assert_eq!(node.hw().indicators.shown, vec![TemperatureBand::High]);
    assert_eq!(node.phase(), Phase::Two);
    assert_eq!(
        sink.events.last(),
        Some(&NodeEvent::TemperatureReceived {
            phase: Phase::One,
            report: TemperatureReport::Reading(45),
            sample: AnalogSample::new(800),
            band: Some(TemperatureBand::High),
        })
    );
}

#[test]
fn override_forces_magnitude_and_skips_indicators() {
    let (mut node, mut sink) = make_node(900, &[0x01, 200]);
    node.start(&mut sink).unwrap();
    node.step(&mut sink).unwrap();

    assert_eq!(node.sample().value(), 256);
    assert_eq!(node.hw().analog.reads, 0);
    assert!(node.hw().indicators.shown.is_empty());
}

#[test]
fn phase_two_drives_fan_with_sample_and_reports_class() {
    let (node, sink) = run_cycle(800, 45);

    assert_eq!(node.sequencer().link().outbound, vec![0x02, 0x02, 0x02, 70]);
    assert_eq!(
        node.hw().fan.last_call(),
        Some(&FanCall::Drive(DutyRequest::forward(800)))
    );
    assert_eq!(
        sink.events.last(),
        Some(&NodeEvent::SpeedClassSent {
            phase: Phase::Two,
            request: DutyRequest::forward(800),
            class: SpeedClass::AtOrAboveThreshold,
        })
    );
    assert_eq!(node.phase(), Phase::One);
}

#[test]
fn speed_class_threshold_boundaries() {
    for (raw, wire) in [(715, 0), (716, 70), (1023, 70), (0, 0)] {
        let (node, _) = run_cycle(raw, 30);
        assert_eq!(
            node.sequencer().link().outbound.last(),
            Some(&wire),
            "sample {raw}"
        );
    }
}

#[test]
fn override_still_drives_fan_at_forced_magnitude() {
    let (node, _) = run_cycle(1000, 200);

    assert_eq!(
        node.hw().fan.last_call(),
        Some(&FanCall::Drive(DutyRequest::forward(256)))
    );
    assert_eq!(node.sequencer().link().outbound.last(), Some(&0));
}

#[test]
fn band_boundaries() {
    for (celsius, band) in [
        (19, TemperatureBand::Low),
        (20, TemperatureBand::Mid),
        (39, TemperatureBand::Mid),
        (40, TemperatureBand::High),
    ] {
        let (node, _) = run_cycle(500, celsius);
        assert_eq!(node.hw().indicators.shown, vec![band], "{celsius} °C");
    }
}

#[test]
fn display_shows_previous_sample_each_round() {
    let (mut node, mut sink) = make_node(800, &[0x01, 45, 0x01]);
    node.start(&mut sink).unwrap();

    node.step(&mut sink).unwrap();
    assert_eq!(node.hw().display.rows[1], "0   ");

    node.step(&mut sink).unwrap();
    assert_eq!(node.hw().display.rows[1], "800 ");
}
