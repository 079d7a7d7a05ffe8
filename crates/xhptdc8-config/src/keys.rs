//! Key names used in configuration documents.

pub(crate) const MANAGER_CONFIG: &str = "manager_config";
pub(crate) const DEVICE_CONFIGS: &str = "device_configs";
pub(crate) const GROUPING: &str = "grouping";
pub(crate) const INDEX: &str = "index";

pub(crate) const AUTO_TRIGGER_PERIOD: &str = "auto_trigger_period";
pub(crate) const AUTO_TRIGGER_RANDOM_EXPONENT: &str = "auto_trigger_random_exponent";
pub(crate) const SKIP_ALIGNMENT: &str = "skip_alignment";
pub(crate) const ALIGNMENT_SOURCE: &str = "alignment_source";
pub(crate) const ALIGNMENT_OFF_STATE: &str = "alignment_off_state";

pub(crate) const TRIGGER_THRESHOLD: &str = "trigger_threshold";
pub(crate) const VALUE: &str = "value";

pub(crate) const TRIGGER: &str = "trigger";
pub(crate) const FALLING: &str = "falling";
pub(crate) const RISING: &str = "rising";

pub(crate) const GATING_BLOCK: &str = "gating_block";
pub(crate) const TIGER_BLOCK: &str = "tiger_block";
pub(crate) const MODE: &str = "mode";
pub(crate) const NEGATE: &str = "negate";
pub(crate) const RETRIGGER: &str = "retrigger";
pub(crate) const EXTEND: &str = "extend";
pub(crate) const START: &str = "start";
pub(crate) const STOP: &str = "stop";
pub(crate) const SOURCES: &str = "sources";

pub(crate) const CHANNEL: &str = "channel";
pub(crate) const ENABLE: &str = "enable";

pub(crate) const ADC_CHANNEL: &str = "adc_channel";
pub(crate) const WATCHDOG_READOUT: &str = "watchdog_readout";
pub(crate) const WATCHDOG_INTERVAL: &str = "watchdog_interval";

pub(crate) const ENABLED: &str = "enabled";
pub(crate) const TRIGGER_CHANNEL: &str = "trigger_channel";
pub(crate) const ZERO_CHANNEL: &str = "zero_channel";
pub(crate) const ZERO_CHANNEL_OFFSET: &str = "zero_channel_offset";
pub(crate) const RANGE_START: &str = "range_start";
pub(crate) const RANGE_STOP: &str = "range_stop";
pub(crate) const TRIGGER_DEADTIME: &str = "trigger_deadtime";
pub(crate) const REQUIRE_WINDOW_HIT: &str = "require_window_hit";
pub(crate) const WINDOW_START: &str = "window_start";
pub(crate) const WINDOW_STOP: &str = "window_stop";
pub(crate) const VETO_MODE: &str = "veto_mode";
pub(crate) const VETO_START: &str = "veto_start";
pub(crate) const VETO_STOP: &str = "veto_stop";
pub(crate) const VETO_RELATIVE_TO_ZERO: &str = "veto_relative_to_zero";
pub(crate) const OVERLAP: &str = "overlap";
