//! Error types for document application and loading.
//!
//! Every field of the schema owns exactly one [`ErrorCode`]. Codes are negative,
//! stable across releases and grouped numerically by section so clients can
//! dispatch on ranges.

use std::fmt;
use thiserror::Error;

/// Declares the error code table once and derives the enum, its numeric value,
/// its message and the ordered list of all codes from it.
macro_rules! error_codes {
    ($($(#[$doc:meta])* $name:ident = $code:literal => $message:literal,)+) => {
        /// Stable, per-field error code reported when a document is rejected.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum ErrorCode {
            $($(#[$doc])* $name = $code,)+
        }

        impl ErrorCode {
            /// Every code in ascending section order.
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$name,)+];

            /// Numeric value of the code (always negative).
            pub const fn code(self) -> i32 {
                self as i32
            }

            /// Human readable description of the violation.
            pub const fn message(self) -> &'static str {
                match self {
                    $(ErrorCode::$name => $message,)+
                }
            }

            /// Look up a code from its numeric value.
            pub fn from_code(code: i32) -> Option<Self> {
                Self::ALL.iter().copied().find(|candidate| candidate.code() == code)
            }
        }
    };
}

error_codes! {
    /// Blank document source or otherwise unusable argument.
    InvalidArgument = -1 => "invalid argument",
    /// Top-level `manager_config` missing.
    NoManagerConfig = -10 => "element \"manager_config\" is not found",
    /// `manager_config.device_configs` missing.
    EmptyManagerConfig = -11 => "element \"device_configs\" is not found",
    DeviceConfigsExceedMax = -22 => "\"device_configs\" array index exceeds the maximum device count",
    InvalidDeviceConfigsStruct = -23 => "\"device_configs\" is not an array map, or index is invalid",
    EmptyDeviceConfigs = -31 => "\"device_configs\" has no elements",
    InvalidAutoTriggerPeriod = -32 => "invalid value of \"auto_trigger_period\"",
    InvalidAutoTriggerRandomExponent = -33 => "invalid value of \"auto_trigger_random_exponent\"",
    InvalidSkipAlignment = -34 => "invalid value of \"skip_alignment\"",
    InvalidAlignmentSource = -35 => "invalid value of \"alignment_source\"",
    InvalidAlignmentOffState = -36 => "invalid value of \"alignment_off_state\"",
    ThresholdsExceedMax = -40 => "\"trigger_threshold\" array index exceeds the channel count",
    InvalidThreshold = -41 => "invalid value of \"trigger_threshold\" array element",
    InvalidThresholdStruct = -42 => "\"trigger_threshold\" is not an array map, or index is invalid",
    EmptyThresholds = -43 => "\"trigger_threshold\" has no elements",
    InvalidTriggerFalling = -51 => "invalid \"trigger\" value of \"falling\"",
    InvalidTriggerRising = -52 => "invalid \"trigger\" value of \"rising\"",
    InvalidTriggerStruct = -53 => "\"trigger\" is not an array map, or index is invalid",
    TriggerExceedMax = -54 => "\"trigger\" array index exceeds the trigger count",
    EmptyTriggers = -55 => "\"trigger\" has no elements",
    EmptyGatingBlocks = -59 => "\"gating_block\" has no elements",
    GatingBlockExceedMax = -60 => "\"gating_block\" array index exceeds the gate count",
    GatingBlockInvalidMode = -61 => "invalid \"gating_block\" value of \"mode\"",
    GatingBlockInvalidNegate = -62 => "invalid \"gating_block\" value of \"negate\"",
    GatingBlockInvalidRetrigger = -63 => "invalid \"gating_block\" value of \"retrigger\"",
    GatingBlockInvalidStart = -64 => "invalid \"gating_block\" value of \"start\"",
    GatingBlockInvalidStop = -65 => "invalid \"gating_block\" value of \"stop\"",
    GatingBlockStopBeforeStart = -66 => "\"gating_block\" value of \"stop\" is earlier than \"start\"",
    GatingBlockInvalidSources = -67 => "invalid \"gating_block\" value of \"sources\"",
    GatingBlockInvalidStruct = -68 => "\"gating_block\" is not an array map, or index is invalid",
    GatingBlockInvalidExtend = -69 => "invalid \"gating_block\" value of \"extend\"",
    ChannelsExceedMax = -70 => "\"channel\" array index exceeds the channel count",
    InvalidChannelEnable = -71 => "invalid \"channel\" value of \"enable\"",
    InvalidChannelRising = -72 => "invalid \"channel\" value of \"rising\"",
    InvalidChannelStruct = -73 => "\"channel\" is not an array map, or index is invalid",
    EmptyChannels = -74 => "\"channel\" has no elements",
    InvalidAdcChannelEnable = -80 => "invalid \"adc_channel\" value of \"enable\"",
    InvalidAdcChannelWatchdogReadout = -81 => "invalid \"adc_channel\" value of \"watchdog_readout\"",
    InvalidAdcChannelWatchdogInterval = -82 => "invalid \"adc_channel\" value of \"watchdog_interval\"",
    InvalidAdcChannelTriggerThreshold = -83 => "invalid \"adc_channel\" value of \"trigger_threshold\"",
    InvalidGroupingEnabled = -90 => "invalid \"grouping\" value of \"enabled\"",
    InvalidGroupingTriggerChannel = -91 => "invalid \"grouping\" value of \"trigger_channel\"",
    InvalidGroupingZeroChannel = -92 => "invalid \"grouping\" value of \"zero_channel\"",
    InvalidGroupingZeroChannelOffset = -93 => "invalid \"grouping\" value of \"zero_channel_offset\"",
    InvalidGroupingRequireWindowHit = -94 => "invalid \"grouping\" value of \"require_window_hit\"",
    InvalidGroupingTriggerDeadtime = -95 => "invalid \"grouping\" value of \"trigger_deadtime\"",
    InvalidGroupingOverlap = -96 => "invalid \"grouping\" value of \"overlap\"",
    InvalidGroupingVetoMode = -97 => "invalid \"grouping\" value of \"veto_mode\"",
    InvalidGroupingVetoRelativeToZero = -98 => "invalid \"grouping\" value of \"veto_relative_to_zero\"",
    InvalidGroupingRangeStart = -99 => "invalid \"grouping\" value of \"range_start\"",
    InvalidGroupingRangeStop = -100 => "invalid \"grouping\" value of \"range_stop\"",
    InvalidGroupingWindowStart = -101 => "invalid \"grouping\" value of \"window_start\"",
    InvalidGroupingWindowStop = -102 => "invalid \"grouping\" value of \"window_stop\"",
    InvalidGroupingVetoStart = -103 => "invalid \"grouping\" value of \"veto_start\"",
    InvalidGroupingVetoStop = -104 => "invalid \"grouping\" value of \"veto_stop\"",
    GroupingRangeStopBeforeStart = -105 => "\"grouping\" value of \"range_stop\" is earlier than \"range_start\"",
    GroupingWindowStopBeforeStart = -106 => "\"grouping\" value of \"window_stop\" is earlier than \"window_start\"",
    GroupingVetoStopBeforeStart = -107 => "\"grouping\" value of \"veto_stop\" is earlier than \"veto_start\"",
    EmptyTigerBlocks = -119 => "\"tiger_block\" has no elements",
    TigerBlockExceedMax = -120 => "\"tiger_block\" array index exceeds the TiGeR count",
    TigerBlockInvalidMode = -121 => "invalid \"tiger_block\" value of \"mode\"",
    TigerBlockInvalidNegate = -122 => "invalid \"tiger_block\" value of \"negate\"",
    TigerBlockInvalidRetrigger = -123 => "invalid \"tiger_block\" value of \"retrigger\"",
    TigerBlockInvalidStart = -124 => "invalid \"tiger_block\" value of \"start\"",
    TigerBlockInvalidStop = -125 => "invalid \"tiger_block\" value of \"stop\"",
    TigerBlockStopBeforeStart = -126 => "\"tiger_block\" value of \"stop\" is earlier than \"start\"",
    TigerBlockInvalidSources = -127 => "invalid \"tiger_block\" value of \"sources\"",
    TigerBlockInvalidStruct = -128 => "\"tiger_block\" is not an array map, or index is invalid",
    TigerBlockInvalidExtend = -129 => "invalid \"tiger_block\" value of \"extend\"",
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

/// First violation found while applying a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid config at {path}: {code}")]
pub struct ApplyError {
    /// Code identifying the field and violation class.
    pub code: ErrorCode,
    /// Dotted document path of the offending node.
    pub path: String,
}

impl ApplyError {
    /// Build an error for the node at `path`.
    pub fn new(code: ErrorCode, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.is_empty() {
            "root".to_string()
        } else {
            path
        };
        Self { code, path }
    }

    /// Numeric value of the error code.
    pub fn code(&self) -> i32 {
        self.code.code()
    }
}

/// Scalar coercion failures raised by the tree accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The node is a mapping or a sequence.
    #[error("expected a scalar")]
    NotScalar,
    /// The text is not an integer.
    #[error("expected integer, found {0:?}")]
    NotInteger(String),
    /// The text is not a number.
    #[error("expected number, found {0:?}")]
    NotNumber(String),
    /// The text is neither `true` nor `false`.
    #[error("expected `true` or `false`, found {0:?}")]
    NotBool(String),
    /// The integer does not fit the target field or enumeration.
    #[error("value {0} is out of range")]
    OutOfRange(i64),
}

/// Errors returned while loading and applying documents from text or disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a document file failed.
    #[error("failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing YAML text failed.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] yaml_rust2::scanner::ScanError),
    /// The YAML parsed but does not form a tree (duplicate or non-scalar
    /// keys, unknown aliases).
    #[error("invalid config document: {0}")]
    InvalidDocument(String),
    /// Parsing JSON text failed.
    #[error("failed to decode config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// The caller supplied no usable document.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The document was parsed but rejected by the schema.
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

impl ConfigError {
    /// Stable numeric code; failures outside the schema report
    /// [`ErrorCode::InvalidArgument`].
    pub fn code(&self) -> i32 {
        match self {
            ConfigError::Apply(err) => err.code(),
            _ => ErrorCode::InvalidArgument.code(),
        }
    }
}
