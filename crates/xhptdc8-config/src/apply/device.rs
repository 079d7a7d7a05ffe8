//! Per-device validation: scalar fields, indexed sections and the ADC channel.

use super::field::{FieldApplicator, ensure_ordered, join_path};
use super::section::{SectionCodes, apply_indexed_section};
use crate::document::Node;
use crate::error::{ApplyError, ErrorCode};
use crate::keys;
use crate::model::{
    AUTO_TRIGGER_RANDOM_EXPONENT_MAX, AdcChannelConfig, BLOCK_TIME_MAX, BlockConfig,
    ChannelConfig, DeviceConfig, TriggerConfig, is_valid_threshold,
};

const THRESHOLD_SECTION: SectionCodes = SectionCodes {
    invalid_struct: ErrorCode::InvalidThresholdStruct,
    empty: ErrorCode::EmptyThresholds,
    exceed_max: ErrorCode::ThresholdsExceedMax,
};

const TRIGGER_SECTION: SectionCodes = SectionCodes {
    invalid_struct: ErrorCode::InvalidTriggerStruct,
    empty: ErrorCode::EmptyTriggers,
    exceed_max: ErrorCode::TriggerExceedMax,
};

const CHANNEL_SECTION: SectionCodes = SectionCodes {
    invalid_struct: ErrorCode::InvalidChannelStruct,
    empty: ErrorCode::EmptyChannels,
    exceed_max: ErrorCode::ChannelsExceedMax,
};

/// Codes of a gating or TiGeR block section.
struct BlockCodes {
    section: SectionCodes,
    mode: ErrorCode,
    negate: ErrorCode,
    retrigger: ErrorCode,
    extend: ErrorCode,
    start: ErrorCode,
    stop: ErrorCode,
    stop_before_start: ErrorCode,
    sources: ErrorCode,
}

const GATING_BLOCK: BlockCodes = BlockCodes {
    section: SectionCodes {
        invalid_struct: ErrorCode::GatingBlockInvalidStruct,
        empty: ErrorCode::EmptyGatingBlocks,
        exceed_max: ErrorCode::GatingBlockExceedMax,
    },
    mode: ErrorCode::GatingBlockInvalidMode,
    negate: ErrorCode::GatingBlockInvalidNegate,
    retrigger: ErrorCode::GatingBlockInvalidRetrigger,
    extend: ErrorCode::GatingBlockInvalidExtend,
    start: ErrorCode::GatingBlockInvalidStart,
    stop: ErrorCode::GatingBlockInvalidStop,
    stop_before_start: ErrorCode::GatingBlockStopBeforeStart,
    sources: ErrorCode::GatingBlockInvalidSources,
};

const TIGER_BLOCK: BlockCodes = BlockCodes {
    section: SectionCodes {
        invalid_struct: ErrorCode::TigerBlockInvalidStruct,
        empty: ErrorCode::EmptyTigerBlocks,
        exceed_max: ErrorCode::TigerBlockExceedMax,
    },
    mode: ErrorCode::TigerBlockInvalidMode,
    negate: ErrorCode::TigerBlockInvalidNegate,
    retrigger: ErrorCode::TigerBlockInvalidRetrigger,
    extend: ErrorCode::TigerBlockInvalidExtend,
    start: ErrorCode::TigerBlockInvalidStart,
    stop: ErrorCode::TigerBlockInvalidStop,
    stop_before_start: ErrorCode::TigerBlockStopBeforeStart,
    sources: ErrorCode::TigerBlockInvalidSources,
};

/// Apply one `device_configs` element onto `device`.
pub(super) fn apply_device(
    applicator: &mut FieldApplicator,
    node: &Node,
    path: &str,
    device: &mut DeviceConfig,
) -> Result<(), ApplyError> {
    applicator.apply(
        node,
        path,
        keys::AUTO_TRIGGER_PERIOD,
        &mut device.auto_trigger_period,
        ErrorCode::InvalidAutoTriggerPeriod,
        |period| period >= 0,
    )?;
    applicator.apply(
        node,
        path,
        keys::AUTO_TRIGGER_RANDOM_EXPONENT,
        &mut device.auto_trigger_random_exponent,
        ErrorCode::InvalidAutoTriggerRandomExponent,
        |exponent| (0..=AUTO_TRIGGER_RANDOM_EXPONENT_MAX).contains(&exponent),
    )?;
    applicator.apply_any(
        node,
        path,
        keys::SKIP_ALIGNMENT,
        &mut device.skip_alignment,
        ErrorCode::InvalidSkipAlignment,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::ALIGNMENT_SOURCE,
        &mut device.alignment_source,
        ErrorCode::InvalidAlignmentSource,
    )?;
    applicator.apply(
        node,
        path,
        keys::ALIGNMENT_OFF_STATE,
        &mut device.alignment_off_state,
        ErrorCode::InvalidAlignmentOffState,
        |state| matches!(state, 0 | 1),
    )?;

    apply_indexed_section(
        applicator,
        node,
        path,
        keys::TRIGGER_THRESHOLD,
        &mut device.trigger_threshold,
        THRESHOLD_SECTION,
        |applicator, element, path, _, threshold| {
            applicator.apply(
                element,
                path,
                keys::VALUE,
                threshold,
                ErrorCode::InvalidThreshold,
                is_valid_threshold,
            )
        },
    )?;
    apply_indexed_section(
        applicator,
        node,
        path,
        keys::TRIGGER,
        &mut device.trigger,
        TRIGGER_SECTION,
        |applicator, element, path, _, trigger| apply_trigger(applicator, element, path, trigger),
    )?;
    apply_indexed_section(
        applicator,
        node,
        path,
        keys::GATING_BLOCK,
        &mut device.gating_block,
        GATING_BLOCK.section,
        |applicator, element, path, _, block| {
            apply_block(applicator, element, path, block, &GATING_BLOCK)
        },
    )?;
    apply_indexed_section(
        applicator,
        node,
        path,
        keys::TIGER_BLOCK,
        &mut device.tiger_block,
        TIGER_BLOCK.section,
        |applicator, element, path, _, block| {
            apply_block(applicator, element, path, block, &TIGER_BLOCK)
        },
    )?;
    apply_indexed_section(
        applicator,
        node,
        path,
        keys::CHANNEL,
        &mut device.channel,
        CHANNEL_SECTION,
        |applicator, element, path, _, channel| apply_channel(applicator, element, path, channel),
    )?;

    if let Some(adc) = node.find_child(keys::ADC_CHANNEL) {
        apply_adc_channel(
            applicator,
            adc,
            &join_path(path, keys::ADC_CHANNEL),
            &mut device.adc_channel,
        )?;
    }
    Ok(())
}

fn apply_trigger(
    applicator: &mut FieldApplicator,
    node: &Node,
    path: &str,
    trigger: &mut TriggerConfig,
) -> Result<(), ApplyError> {
    applicator.apply_any(
        node,
        path,
        keys::FALLING,
        &mut trigger.falling,
        ErrorCode::InvalidTriggerFalling,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::RISING,
        &mut trigger.rising,
        ErrorCode::InvalidTriggerRising,
    )
}

/// Gating and TiGeR blocks share one layout and differ only in their codes.
fn apply_block(
    applicator: &mut FieldApplicator,
    node: &Node,
    path: &str,
    block: &mut BlockConfig,
    codes: &BlockCodes,
) -> Result<(), ApplyError> {
    ensure_ordered(
        node,
        path,
        keys::START,
        keys::STOP,
        block.start,
        codes.stop_before_start,
    )?;

    applicator.apply_any(node, path, keys::MODE, &mut block.mode, codes.mode)?;
    applicator.apply_any(node, path, keys::NEGATE, &mut block.negate, codes.negate)?;
    applicator.apply_any(
        node,
        path,
        keys::RETRIGGER,
        &mut block.retrigger,
        codes.retrigger,
    )?;
    applicator.apply_any(node, path, keys::EXTEND, &mut block.extend, codes.extend)?;
    applicator.apply(
        node,
        path,
        keys::START,
        &mut block.start,
        codes.start,
        is_valid_block_time,
    )?;
    applicator.apply(
        node,
        path,
        keys::STOP,
        &mut block.stop,
        codes.stop,
        is_valid_block_time,
    )?;
    applicator.apply_any(node, path, keys::SOURCES, &mut block.sources, codes.sources)
}

fn is_valid_block_time(time: i32) -> bool {
    (0..=BLOCK_TIME_MAX).contains(&time)
}

fn apply_channel(
    applicator: &mut FieldApplicator,
    node: &Node,
    path: &str,
    channel: &mut ChannelConfig,
) -> Result<(), ApplyError> {
    applicator.apply_any(
        node,
        path,
        keys::ENABLE,
        &mut channel.enable,
        ErrorCode::InvalidChannelEnable,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::RISING,
        &mut channel.rising,
        ErrorCode::InvalidChannelRising,
    )
}

fn apply_adc_channel(
    applicator: &mut FieldApplicator,
    node: &Node,
    path: &str,
    adc: &mut AdcChannelConfig,
) -> Result<(), ApplyError> {
    applicator.apply_any(
        node,
        path,
        keys::ENABLE,
        &mut adc.enable,
        ErrorCode::InvalidAdcChannelEnable,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::WATCHDOG_READOUT,
        &mut adc.watchdog_readout,
        ErrorCode::InvalidAdcChannelWatchdogReadout,
    )?;
    applicator.apply(
        node,
        path,
        keys::WATCHDOG_INTERVAL,
        &mut adc.watchdog_interval,
        ErrorCode::InvalidAdcChannelWatchdogInterval,
        |interval| interval >= 0,
    )?;
    applicator.apply(
        node,
        path,
        keys::TRIGGER_THRESHOLD,
        &mut adc.trigger_threshold,
        ErrorCode::InvalidAdcChannelTriggerThreshold,
        is_valid_threshold,
    )
}
