//! 有序 ID 生成器（Snowflake）
//!
//! 64 位布局：`0 | 41 位毫秒时间戳 | 5 位数据中心 | 5 位工作节点 | 12 位序列号`，
//! 时间戳相对自定义纪元计算，同一生成器产出的 ID 严格递增。
//!
//! 生成过程从不休眠：时钟回拨时沿用上一个时间戳继续分配序列号，
//! 序列号用尽时借用下一毫秒，逻辑时间戳始终单调不减。
//!
use crate::error::{DomainError, DomainResult};
use bon::bon;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, PoisonError};

/// 默认纪元：2020-01-01T00:00:00Z
pub const DEFAULT_EPOCH_MS: i64 = 1_577_836_800_000;

const SEQUENCE_BITS: u32 = 12;
const NODE_BITS: u32 = 5;
const MAX_NODE_ID: u8 = (1 << NODE_BITS) - 1;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const WORKER_SHIFT: u32 = SEQUENCE_BITS;
const DATA_CENTER_SHIFT: u32 = SEQUENCE_BITS + NODE_BITS;
const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + NODE_BITS * 2;

/// 标识生成器抽象
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> u64;
}

#[derive(Debug)]
struct State {
    /// 最近一次分配使用的逻辑时间戳（相对纪元的毫秒数）
    last_offset: u64,
    /// 最近一次读到的真实时钟
    last_clock: i64,
    sequence: u64,
}

#[derive(Debug)]
pub struct Snowflake {
    worker_id: u8,
    data_center_id: u8,
    epoch_ms: i64,
    clock: fn() -> i64,
    state: Mutex<State>,
}

#[bon]
impl Snowflake {
    /// 创建生成器，工作节点与数据中心编号均须在 `0..=31` 内，纪元不得晚于当前时间
    #[builder]
    pub fn new(
        worker_id: u8,
        data_center_id: u8,
        #[builder(default = DEFAULT_EPOCH_MS)] epoch_ms: i64,
    ) -> DomainResult<Self> {
        if worker_id > MAX_NODE_ID {
            return Err(DomainError::invalid_value(
                "worker_id",
                format!("must be within 0..={MAX_NODE_ID}, got {worker_id}"),
            ));
        }
        if data_center_id > MAX_NODE_ID {
            return Err(DomainError::invalid_value(
                "data_center_id",
                format!("must be within 0..={MAX_NODE_ID}, got {data_center_id}"),
            ));
        }

        let now = now_ms();
        if now < epoch_ms {
            return Err(DomainError::invalid_value(
                "epoch_ms",
                format!("must not be in the future, got {epoch_ms} at {now}"),
            ));
        }

        Ok(Self {
            worker_id,
            data_center_id,
            epoch_ms,
            clock: now_ms,
            state: Mutex::new(State {
                last_offset: 0,
                last_clock: i64::MIN,
                sequence: 0,
            }),
        })
    }
}

impl Snowflake {
    pub fn worker_id(&self) -> u8 {
        self.worker_id
    }

    pub fn data_center_id(&self) -> u8 {
        self.data_center_id
    }

    /// 还原 ID 中的生成时间
    pub fn timestamp_of(&self, id: u64) -> Option<DateTime<Utc>> {
        let offset = i64::try_from(id >> TIMESTAMP_SHIFT).ok()?;
        DateTime::from_timestamp_millis(self.epoch_ms + offset)
    }

    #[cfg(test)]
    fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }
}

impl IdGenerator for Snowflake {
    fn next_id(&self) -> u64 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let clock = (self.clock)();
        if clock < state.last_clock {
            tracing::warn!(
                drift_ms = state.last_clock - clock,
                "clock moved backwards, reusing last timestamp"
            );
        }
        state.last_clock = state.last_clock.max(clock);

        // 纪元之前的时钟读数按 0 处理，随后与上次时间戳取较大者
        let observed = u64::try_from(clock.saturating_sub(self.epoch_ms)).unwrap_or(0);
        let offset = if observed > state.last_offset {
            state.sequence = 0;
            observed
        } else {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                tracing::debug!(
                    timestamp = state.last_offset,
                    "sequence exhausted, borrowing next millisecond"
                );
                state.last_offset + 1
            } else {
                state.last_offset
            }
        };
        state.last_offset = offset;

        (offset << TIMESTAMP_SHIFT)
            | (u64::from(self.data_center_id) << DATA_CENTER_SHIFT)
            | (u64::from(self.worker_id) << WORKER_SHIFT)
            | state.sequence
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
