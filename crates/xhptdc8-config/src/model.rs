//! Configuration structures of the xHPTDC8 manager.
//!
//! All arrays have a fixed capacity; documents address slots by index. The
//! [`Default`] impls reproduce the driver's default configuration.

use crate::error::CoercionError;

/// Maximum number of devices handled by one manager.
pub const MAX_DEVICES: usize = 6;
/// TDC input channels per device.
pub const CHANNEL_COUNT: usize = 8;
/// Trigger inputs per device.
pub const TRIGGER_COUNT: usize = 16;
/// Gating blocks per device.
pub const GATE_COUNT: usize = 8;
/// TiGeR blocks per device.
pub const TIGER_COUNT: usize = 9;

/// Lowest accepted input threshold in volts.
pub const THRESHOLD_MIN: f64 = -1.32;
/// Highest accepted input threshold in volts.
pub const THRESHOLD_MAX: f64 = 1.18;
/// Threshold for positive NIM signals.
pub const THRESHOLD_P_NIM: f64 = 0.35;
/// Threshold for negative NIM signals.
pub const THRESHOLD_N_NIM: f64 = -0.35;
/// Threshold for positive 1.8V LVCMOS signals.
pub const THRESHOLD_P_LVCMOS_18: f64 = 0.9;
/// Threshold for positive 1.5V LVCMOS signals.
pub const THRESHOLD_P_LVCMOS_15: f64 = 0.75;

/// Largest start/stop value of a gating or TiGeR block.
pub const BLOCK_TIME_MAX: i32 = 0xFFFF;
/// Largest accepted `auto_trigger_random_exponent`.
pub const AUTO_TRIGGER_RANDOM_EXPONENT_MAX: i32 = 31;
/// Grouping `zero_channel` value meaning "no zero channel".
pub const ZERO_CHANNEL_NONE: i32 = -1;

/// True when `value` is a usable input threshold.
pub fn is_valid_threshold(value: f64) -> bool {
    (THRESHOLD_MIN..=THRESHOLD_MAX).contains(&value)
}

/// Source used to align multiple boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum AlignmentSource {
    /// Align on the TiGeR output.
    #[default]
    Tiger = 0,
    /// Align on the dedicated alignment pin.
    Pin = 1,
}

impl TryFrom<i64> for AlignmentSource {
    type Error = CoercionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AlignmentSource::Tiger),
            1 => Ok(AlignmentSource::Pin),
            other => Err(CoercionError::OutOfRange(other)),
        }
    }
}

/// Operating mode of a gating or TiGeR block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum BlockMode {
    /// Block disabled.
    #[default]
    Off = 0,
    /// Drive the connector as an output.
    Output = 1,
    /// Drive the connector and read it back.
    Bidirectional = 2,
    /// Use the connector as an input.
    Input = 3,
}

impl TryFrom<i64> for BlockMode {
    type Error = CoercionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BlockMode::Off),
            1 => Ok(BlockMode::Output),
            2 => Ok(BlockMode::Bidirectional),
            3 => Ok(BlockMode::Input),
            other => Err(CoercionError::OutOfRange(other)),
        }
    }
}

/// How the grouping veto window filters hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum VetoMode {
    /// No veto.
    #[default]
    Off = 0,
    /// Drop hits inside the veto window.
    InsideVeto = 1,
    /// Drop hits outside the veto window.
    OutsideVeto = 2,
}

impl TryFrom<i64> for VetoMode {
    type Error = CoercionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VetoMode::Off),
            1 => Ok(VetoMode::InsideVeto),
            2 => Ok(VetoMode::OutsideVeto),
            other => Err(CoercionError::OutOfRange(other)),
        }
    }
}

/// Bitmask of trigger sources feeding a gating or TiGeR block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerSources(u32);

impl TriggerSources {
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const C: Self = Self(1 << 2);
    pub const D: Self = Self(1 << 3);
    pub const E: Self = Self(1 << 4);
    pub const F: Self = Self(1 << 5);
    pub const G: Self = Self(1 << 6);
    pub const H: Self = Self(1 << 7);
    /// Sync input.
    pub const I: Self = Self(1 << 8);
    /// Internal auto trigger.
    pub const AUTO: Self = Self(1 << 14);
    /// Constant high source.
    pub const ONE: Self = Self(1 << 15);
    /// No source.
    pub const NONE: Self = Self(0);

    /// Union of every known source bit.
    pub const ALL: Self = Self(0x1FF | Self::AUTO.0 | Self::ONE.0);

    /// Mask from raw bits; `None` when unknown bits are set.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for TriggerSources {
    fn default() -> Self {
        Self::A
    }
}

impl std::ops::BitOr for TriggerSources {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl TryFrom<i64> for TriggerSources {
    type Error = CoercionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .and_then(Self::from_bits)
            .ok_or(CoercionError::OutOfRange(value))
    }
}

/// Edge selection of one trigger input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerConfig {
    pub falling: bool,
    pub rising: bool,
}

/// Shared layout of gating blocks and TiGeR blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockConfig {
    pub mode: BlockMode,
    pub negate: bool,
    pub retrigger: bool,
    pub extend: bool,
    pub start: i32,
    /// Never earlier than `start` once applied from a document.
    pub stop: i32,
    pub sources: TriggerSources,
}

/// Per-channel acquisition settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelConfig {
    pub enable: bool,
    /// Timestamp rising edges instead of falling edges.
    pub rising: bool,
}

/// Settings of the on-board ADC channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcChannelConfig {
    pub enable: bool,
    pub watchdog_readout: bool,
    pub watchdog_interval: i32,
    pub trigger_threshold: f64,
}

impl Default for AdcChannelConfig {
    fn default() -> Self {
        Self {
            enable: false,
            watchdog_readout: false,
            watchdog_interval: 0,
            trigger_threshold: THRESHOLD_P_NIM,
        }
    }
}

/// Configuration of a single device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    pub auto_trigger_period: i32,
    pub auto_trigger_random_exponent: i32,
    pub skip_alignment: bool,
    pub alignment_source: AlignmentSource,
    pub alignment_off_state: i32,
    pub trigger_threshold: [f64; CHANNEL_COUNT],
    pub trigger: [TriggerConfig; TRIGGER_COUNT],
    pub gating_block: [BlockConfig; GATE_COUNT],
    pub tiger_block: [BlockConfig; TIGER_COUNT],
    pub channel: [ChannelConfig; CHANNEL_COUNT],
    pub adc_channel: AdcChannelConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            auto_trigger_period: 0,
            auto_trigger_random_exponent: 0,
            skip_alignment: false,
            alignment_source: AlignmentSource::Tiger,
            alignment_off_state: 0,
            trigger_threshold: [THRESHOLD_P_NIM; CHANNEL_COUNT],
            trigger: [TriggerConfig::default(); TRIGGER_COUNT],
            gating_block: [BlockConfig::default(); GATE_COUNT],
            tiger_block: [BlockConfig::default(); TIGER_COUNT],
            channel: [ChannelConfig::default(); CHANNEL_COUNT],
            adc_channel: AdcChannelConfig::default(),
        }
    }
}

/// Grouping of hits around a trigger channel, shared by all devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingConfig {
    pub enabled: bool,
    pub trigger_channel: i32,
    /// [`ZERO_CHANNEL_NONE`] when no zero channel is used.
    pub zero_channel: i32,
    pub zero_channel_offset: i64,
    pub range_start: i64,
    pub range_stop: i64,
    pub trigger_deadtime: i64,
    pub require_window_hit: bool,
    pub window_start: i64,
    pub window_stop: i64,
    pub veto_mode: VetoMode,
    pub veto_start: i64,
    pub veto_stop: i64,
    pub veto_relative_to_zero: bool,
    pub overlap: bool,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            trigger_channel: 0,
            zero_channel: ZERO_CHANNEL_NONE,
            zero_channel_offset: 0,
            range_start: 0,
            range_stop: 0,
            trigger_deadtime: 0,
            require_window_hit: false,
            window_start: 0,
            window_stop: 0,
            veto_mode: VetoMode::Off,
            veto_start: 0,
            veto_stop: 0,
            veto_relative_to_zero: false,
            overlap: false,
        }
    }
}

/// Root configuration handed to the device manager.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ManagerConfig {
    pub device_configs: [DeviceConfig; MAX_DEVICES],
    pub grouping: GroupingConfig,
}
