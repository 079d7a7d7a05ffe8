//! Conversion of a configuration back into a document.
//!
//! The exported document lists every slot and every field, so applying it
//! onto any configuration reproduces the exported one.

use crate::document::Node;
use crate::keys;
use crate::model::{
    AdcChannelConfig, BlockConfig, ChannelConfig, DeviceConfig, GroupingConfig, ManagerConfig,
    TriggerConfig,
};

impl ManagerConfig {
    /// Full document describing this configuration.
    pub fn to_document(&self) -> Node {
        let devices = self
            .device_configs
            .iter()
            .enumerate()
            .map(|(index, device)| device_node(index, device));
        Node::mapping([(
            keys::MANAGER_CONFIG,
            Node::mapping([
                (keys::DEVICE_CONFIGS, Node::sequence(devices)),
                (keys::GROUPING, grouping_node(&self.grouping)),
            ]),
        )])
    }

    /// YAML rendering of [`ManagerConfig::to_document`].
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        self.to_document().to_yaml()
    }
}

fn indexed<T>(slots: &[T], element: impl Fn(&T) -> Vec<(&'static str, Node)>) -> Node {
    Node::sequence(slots.iter().enumerate().map(|(index, slot)| {
        Node::mapping(std::iter::once((keys::INDEX, Node::scalar(index))).chain(element(slot)))
    }))
}

fn device_node(index: usize, device: &DeviceConfig) -> Node {
    Node::mapping([
        (keys::INDEX, Node::scalar(index)),
        (
            keys::AUTO_TRIGGER_PERIOD,
            Node::scalar(device.auto_trigger_period),
        ),
        (
            keys::AUTO_TRIGGER_RANDOM_EXPONENT,
            Node::scalar(device.auto_trigger_random_exponent),
        ),
        (keys::SKIP_ALIGNMENT, Node::scalar(device.skip_alignment)),
        (
            keys::ALIGNMENT_SOURCE,
            Node::scalar(device.alignment_source as i32),
        ),
        (
            keys::ALIGNMENT_OFF_STATE,
            Node::scalar(device.alignment_off_state),
        ),
        (
            keys::TRIGGER_THRESHOLD,
            indexed(&device.trigger_threshold, |value| {
                vec![(keys::VALUE, Node::scalar(value))]
            }),
        ),
        (keys::TRIGGER, indexed(&device.trigger, trigger_fields)),
        (keys::GATING_BLOCK, indexed(&device.gating_block, block_fields)),
        (keys::TIGER_BLOCK, indexed(&device.tiger_block, block_fields)),
        (keys::CHANNEL, indexed(&device.channel, channel_fields)),
        (keys::ADC_CHANNEL, adc_node(&device.adc_channel)),
    ])
}

fn trigger_fields(trigger: &TriggerConfig) -> Vec<(&'static str, Node)> {
    vec![
        (keys::FALLING, Node::scalar(trigger.falling)),
        (keys::RISING, Node::scalar(trigger.rising)),
    ]
}

fn block_fields(block: &BlockConfig) -> Vec<(&'static str, Node)> {
    vec![
        (keys::MODE, Node::scalar(block.mode as i32)),
        (keys::NEGATE, Node::scalar(block.negate)),
        (keys::RETRIGGER, Node::scalar(block.retrigger)),
        (keys::EXTEND, Node::scalar(block.extend)),
        (keys::START, Node::scalar(block.start)),
        (keys::STOP, Node::scalar(block.stop)),
        (keys::SOURCES, Node::scalar(block.sources.bits())),
    ]
}

fn channel_fields(channel: &ChannelConfig) -> Vec<(&'static str, Node)> {
    vec![
        (keys::ENABLE, Node::scalar(channel.enable)),
        (keys::RISING, Node::scalar(channel.rising)),
    ]
}

fn adc_node(adc: &AdcChannelConfig) -> Node {
    Node::mapping([
        (keys::ENABLE, Node::scalar(adc.enable)),
        (keys::WATCHDOG_READOUT, Node::scalar(adc.watchdog_readout)),
        (keys::WATCHDOG_INTERVAL, Node::scalar(adc.watchdog_interval)),
        (keys::TRIGGER_THRESHOLD, Node::scalar(adc.trigger_threshold)),
    ])
}

fn grouping_node(grouping: &GroupingConfig) -> Node {
    Node::mapping([
        (keys::ENABLED, Node::scalar(grouping.enabled)),
        (keys::TRIGGER_CHANNEL, Node::scalar(grouping.trigger_channel)),
        (keys::ZERO_CHANNEL, Node::scalar(grouping.zero_channel)),
        (
            keys::ZERO_CHANNEL_OFFSET,
            Node::scalar(grouping.zero_channel_offset),
        ),
        (keys::RANGE_START, Node::scalar(grouping.range_start)),
        (keys::RANGE_STOP, Node::scalar(grouping.range_stop)),
        (keys::TRIGGER_DEADTIME, Node::scalar(grouping.trigger_deadtime)),
        (
            keys::REQUIRE_WINDOW_HIT,
            Node::scalar(grouping.require_window_hit),
        ),
        (keys::WINDOW_START, Node::scalar(grouping.window_start)),
        (keys::WINDOW_STOP, Node::scalar(grouping.window_stop)),
        (keys::VETO_MODE, Node::scalar(grouping.veto_mode as i32)),
        (keys::VETO_START, Node::scalar(grouping.veto_start)),
        (keys::VETO_STOP, Node::scalar(grouping.veto_stop)),
        (
            keys::VETO_RELATIVE_TO_ZERO,
            Node::scalar(grouping.veto_relative_to_zero),
        ),
        (keys::OVERLAP, Node::scalar(grouping.overlap)),
    ])
}
