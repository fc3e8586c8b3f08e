use bookshelf::container::Container;
use bookshelf::persistence::InMemoryDatabase;
use bookshelf_domain::snowflake::IdGenerator;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 从 1 开始递增的标识生成器
#[derive(Default)]
pub struct SequentialIds(AtomicU64);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

pub fn container(db: &InMemoryDatabase) -> Container {
    Container::new(db, Arc::new(SequentialIds::default()))
}
