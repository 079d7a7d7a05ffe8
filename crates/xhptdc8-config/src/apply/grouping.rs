//! Validation of the manager-wide `grouping` mapping.

use super::field::{FieldApplicator, ensure_ordered};
use crate::document::Node;
use crate::error::{ApplyError, ErrorCode};
use crate::keys;
use crate::model::{CHANNEL_COUNT, GroupingConfig, ZERO_CHANNEL_NONE};

/// Apply the grouping mapping onto `grouping`.
///
/// The three start/stop pairs are checked for ordering before any field is
/// written.
pub(super) fn apply_grouping(
    applicator: &mut FieldApplicator,
    node: &Node,
    path: &str,
    grouping: &mut GroupingConfig,
) -> Result<(), ApplyError> {
    ensure_ordered(
        node,
        path,
        keys::RANGE_START,
        keys::RANGE_STOP,
        grouping.range_start,
        ErrorCode::GroupingRangeStopBeforeStart,
    )?;
    ensure_ordered(
        node,
        path,
        keys::WINDOW_START,
        keys::WINDOW_STOP,
        grouping.window_start,
        ErrorCode::GroupingWindowStopBeforeStart,
    )?;
    ensure_ordered(
        node,
        path,
        keys::VETO_START,
        keys::VETO_STOP,
        grouping.veto_start,
        ErrorCode::GroupingVetoStopBeforeStart,
    )?;

    applicator.apply_any(
        node,
        path,
        keys::ENABLED,
        &mut grouping.enabled,
        ErrorCode::InvalidGroupingEnabled,
    )?;
    applicator.apply(
        node,
        path,
        keys::TRIGGER_CHANNEL,
        &mut grouping.trigger_channel,
        ErrorCode::InvalidGroupingTriggerChannel,
        is_channel,
    )?;
    applicator.apply(
        node,
        path,
        keys::ZERO_CHANNEL,
        &mut grouping.zero_channel,
        ErrorCode::InvalidGroupingZeroChannel,
        |channel| channel == ZERO_CHANNEL_NONE || is_channel(channel),
    )?;
    applicator.apply_any(
        node,
        path,
        keys::ZERO_CHANNEL_OFFSET,
        &mut grouping.zero_channel_offset,
        ErrorCode::InvalidGroupingZeroChannelOffset,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::RANGE_START,
        &mut grouping.range_start,
        ErrorCode::InvalidGroupingRangeStart,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::RANGE_STOP,
        &mut grouping.range_stop,
        ErrorCode::InvalidGroupingRangeStop,
    )?;
    applicator.apply(
        node,
        path,
        keys::TRIGGER_DEADTIME,
        &mut grouping.trigger_deadtime,
        ErrorCode::InvalidGroupingTriggerDeadtime,
        |deadtime| deadtime >= 0,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::REQUIRE_WINDOW_HIT,
        &mut grouping.require_window_hit,
        ErrorCode::InvalidGroupingRequireWindowHit,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::WINDOW_START,
        &mut grouping.window_start,
        ErrorCode::InvalidGroupingWindowStart,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::WINDOW_STOP,
        &mut grouping.window_stop,
        ErrorCode::InvalidGroupingWindowStop,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::VETO_MODE,
        &mut grouping.veto_mode,
        ErrorCode::InvalidGroupingVetoMode,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::VETO_START,
        &mut grouping.veto_start,
        ErrorCode::InvalidGroupingVetoStart,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::VETO_STOP,
        &mut grouping.veto_stop,
        ErrorCode::InvalidGroupingVetoStop,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::VETO_RELATIVE_TO_ZERO,
        &mut grouping.veto_relative_to_zero,
        ErrorCode::InvalidGroupingVetoRelativeToZero,
    )?;
    applicator.apply_any(
        node,
        path,
        keys::OVERLAP,
        &mut grouping.overlap,
        ErrorCode::InvalidGroupingOverlap,
    )
}

fn is_channel(channel: i32) -> bool {
    usize::try_from(channel).is_ok_and(|channel| channel < CHANNEL_COUNT)
}
