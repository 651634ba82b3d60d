//! Both nodes on their own threads, connected by a loopback link.
//!
//! Each thread runs a fixed number of rounds and hands its hardware back
//! for inspection. Dropping one end of the link ends the partner's `run()`.

use std::thread;

use fanlink::adapters::loopback::LoopbackLink;
use fanlink::app::actuating::{ActuatingHardware, ActuatingNode};
use fanlink::app::sensing::{SensingHardware, SensingNode};
use fanlink::config::SystemConfig;
use fanlink::drivers::duty_cycle::DutyRequest;
use fanlink::drivers::indicator::TemperatureBand;
use fanlink::error::{Error, LinkError};
use fanlink::protocol::Phase;

use super::mock_hw::{
    FanCall, FixedAnalog, FixedTemperature, MockDisplay, MockFan, MockIndicator, MockSwitch,
    RecordingSink,
};

type SensingHw = SensingHardware<FixedTemperature, MockSwitch, MockFan, MockDisplay>;
type ActuatingHw = ActuatingHardware<FixedAnalog, MockIndicator, MockFan, MockDisplay>;

struct Outcome {
    sensing: SensingHw,
    actuating: ActuatingHw,
    actuating_sample: u16,
}

/// Run `cycles` full cycles (two rounds each) on both nodes.
fn run_pair(celsius: u8, override_on: bool, raw: u16, cycles: usize) -> Outcome {
    let (link_a, link_b) = LoopbackLink::pair();
    let config = SystemConfig::default();

    let sensing = thread::spawn(move || {
        let hw = SensingHardware {
            temperature: FixedTemperature::new(celsius),
            override_pin: MockSwitch(override_on),
            fan: MockFan::new(),
            display: MockDisplay::default(),
        };
        let mut node = SensingNode::new(link_a, hw, config);
        let mut sink = RecordingSink::default();
        node.start(&mut sink).unwrap();
        for _ in 0..cycles * 2 {
            node.step(&mut sink).unwrap();
        }
        assert_eq!(node.phase(), Phase::One);
        node.into_parts().1
    });

    let actuating = thread::spawn(move || {
        let hw = ActuatingHardware {
            analog: FixedAnalog::new(raw),
            indicators: MockIndicator::default(),
            fan: MockFan::new(),
            display: MockDisplay::default(),
        };
        let mut node = ActuatingNode::new(link_b, hw, config);
        let mut sink = RecordingSink::default();
        node.start(&mut sink).unwrap();
        for _ in 0..cycles * 2 {
            node.step(&mut sink).unwrap();
        }
        let sample = node.sample().value();
        (node.into_parts().1, sample)
    });

    let sensing = sensing.join().unwrap();
    let (actuating, actuating_sample) = actuating.join().unwrap();
    Outcome {
        sensing,
        actuating,
        actuating_sample,
    }
}

#[test]
fn hot_reading_with_high_sample_turns_both_fans_on() {
    let out = run_pair(45, false, 800, 1);

    assert_eq!(out.actuating.indicators.shown, vec![TemperatureBand::High]);
    assert_eq!(out.actuating_sample, 800);
    assert_eq!(
        out.actuating.fan.last_call(),
        Some(&FanCall::Drive(DutyRequest::forward(800)))
    );
    assert!(out.sensing.fan.running());
    assert_eq!(
        out.sensing.fan.last_call(),
        Some(&FanCall::Drive(DutyRequest::forward(100)))
    );
}

#[test]
fn cool_reading_with_low_sample_keeps_sensing_fan_stopped() {
    let out = run_pair(10, false, 300, 1);

    assert_eq!(out.actuating.indicators.shown, vec![TemperatureBand::Low]);
    assert_eq!(out.sensing.fan.calls, vec![FanCall::Stop]);
}

#[test]
fn override_forces_low_class_regardless_of_adc() {
    let out = run_pair(45, true, 1023, 1);

    assert_eq!(out.actuating_sample, 256);
    assert_eq!(out.actuating.analog.reads, 0);
    assert!(out.actuating.indicators.shown.is_empty());
    assert!(!out.sensing.fan.running());
}

#[test]
fn many_cycles_stay_in_lock_step() {
    let out = run_pair(25, false, 900, 20);

    assert_eq!(out.actuating.indicators.shown.len(), 20);
    assert!(out.actuating.indicators.shown.iter().all(|b| *b == TemperatureBand::Mid));
    assert_eq!(out.sensing.temperature.reads, 40);
    // configure is recorded every high round; the driver itself is idempotent.
    let drives = out
        .sensing
        .fan
        .calls
        .iter()
        .filter(|c| matches!(c, FanCall::Drive(_)))
        .count();
    assert_eq!(drives, 20);
}

#[test]
fn partner_gone_ends_run_with_disconnect() {
    let (link_a, link_b) = LoopbackLink::pair();
    let config = SystemConfig::default();

    let sensing = thread::spawn(move || {
        let hw = SensingHardware {
            temperature: FixedTemperature::new(30),
            override_pin: MockSwitch(false),
            fan: MockFan::new(),
            display: MockDisplay::default(),
        };
        let mut node = SensingNode::new(link_a, hw, config);
        let mut sink = RecordingSink::default();
        node.start(&mut sink).unwrap();
        node.run(&mut sink)
    });

    let hw = ActuatingHardware {
        analog: FixedAnalog::new(100),
        indicators: MockIndicator::default(),
        fan: MockFan::new(),
        display: MockDisplay::default(),
    };
    let mut node = ActuatingNode::new(link_b, hw, config);
    let mut sink = RecordingSink::default();
    node.start(&mut sink).unwrap();
    node.step(&mut sink).unwrap();
    node.step(&mut sink).unwrap();
    drop(node);

    let result = sensing.join().unwrap();
    assert_eq!(result, Err(Error::Link(LinkError::Disconnected)));
}
