use bookshelf_domain::entity::Entity;
use bookshelf_domain::value_object::Version;
use dashmap::DashMap;

/// 唯一键约束
pub struct UniqueKey<E> {
    pub column: &'static str,
    pub extract: fn(&E) -> String,
}

/// 已提交数据表
///
/// 只保存已提交的行，写入只发生在工作单元提交时。
pub struct Table<E: Entity> {
    name: &'static str,
    rows: DashMap<E::Id, E>,
    unique_key: Option<UniqueKey<E>>,
}

impl<E: Entity> Table<E> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: DashMap::new(),
            unique_key: None,
        }
    }

    pub fn with_unique_key(mut self, column: &'static str, extract: fn(&E) -> String) -> Self {
        self.unique_key = Some(UniqueKey { column, extract });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, id: &E::Id) -> Option<E> {
        self.rows.get(id).map(|row| row.value().clone())
    }

    pub fn version_of(&self, id: &E::Id) -> Option<Version> {
        self.rows.get(id).map(|row| row.value().version())
    }

    /// 全部行的快照（无序）
    pub fn snapshot(&self) -> Vec<E> {
        self.rows.iter().map(|row| row.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn unique_key(&self) -> Option<&UniqueKey<E>> {
        self.unique_key.as_ref()
    }

    pub(crate) fn upsert(&self, entity: E) {
        self.rows.insert(entity.id().clone(), entity);
    }

    pub(crate) fn delete(&self, id: &E::Id) {
        self.rows.remove(id);
    }
}
