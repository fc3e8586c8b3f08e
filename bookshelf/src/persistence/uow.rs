use super::Table;
use async_trait::async_trait;
use bookshelf_application::{AppError, UnitOfWork};
use bookshelf_domain::entity::Entity;
use bookshelf_domain::error::{DomainError, DomainResult};
use bookshelf_domain::repository::Repository;
use bookshelf_domain::specification::Specification;
use bookshelf_domain::value_object::Version;
use std::collections::HashMap;
use std::mem;
use std::sync::Arc;
use tokio::sync::Mutex;

enum Staged<E> {
    Upsert(E),
    Remove(Version),
}

/// 单表内存工作单元
///
/// 读取优先看到本会话的暂存变更；提交时在库级提交锁内检查乐观锁版本与唯一键，
/// 全部通过后一次性写入并推进版本，否则一条也不写。
pub struct InMemoryUnitOfWork<E: Entity> {
    table: Arc<Table<E>>,
    commit_lock: Arc<Mutex<()>>,
    staged: HashMap<E::Id, Staged<E>>,
    active: bool,
}

impl<E: Entity> InMemoryUnitOfWork<E> {
    pub fn new(table: Arc<Table<E>>, commit_lock: Arc<Mutex<()>>) -> Self {
        Self {
            table,
            commit_lock,
            staged: HashMap::new(),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 暂存的变更条数
    pub fn pending_changes(&self) -> usize {
        self.staged.len()
    }

    fn ensure_active(&self) -> DomainResult<()> {
        if self.active {
            Ok(())
        } else {
            Err(DomainError::invalid_state(format!(
                "no active transaction on `{}`",
                self.table.name()
            )))
        }
    }

    fn current_version(&self, id: &E::Id) -> Option<Version> {
        match self.staged.get(id) {
            Some(Staged::Upsert(entity)) => Some(entity.version()),
            Some(Staged::Remove(_)) => None,
            None => self.table.version_of(id),
        }
    }

    fn check_versions(&self) -> DomainResult<()> {
        for (id, change) in &self.staged {
            let actual = self.table.version_of(id);
            match change {
                Staged::Upsert(entity) => {
                    let expected = entity.version();
                    match (expected.is_new(), actual) {
                        (true, None) => {}
                        (true, Some(_)) => {
                            return Err(DomainError::conflict(format!(
                                "{} `{id}` already exists",
                                self.table.name()
                            )));
                        }
                        (false, Some(actual)) if actual == expected => {}
                        (false, actual) => {
                            return Err(DomainError::VersionConflict {
                                expected: expected.value(),
                                actual: actual.map_or(0, |v| v.value()),
                            });
                        }
                    }
                }
                Staged::Remove(expected) => {
                    if let Some(actual) = actual
                        && actual != *expected
                    {
                        return Err(DomainError::VersionConflict {
                            expected: expected.value(),
                            actual: actual.value(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_unique_key(&self) -> DomainResult<()> {
        let Some(key) = self.table.unique_key() else {
            return Ok(());
        };

        let mut claimed: HashMap<String, &E::Id> = HashMap::new();
        for (id, change) in &self.staged {
            if let Staged::Upsert(entity) = change {
                let value = (key.extract)(entity);
                if claimed.insert(value.clone(), id).is_some() {
                    return Err(self.duplicate(key.column, &value));
                }
            }
        }

        for row in self.table.snapshot() {
            if self.staged.contains_key(row.id()) {
                continue;
            }
            let value = (key.extract)(&row);
            if claimed.contains_key(&value) {
                return Err(self.duplicate(key.column, &value));
            }
        }
        Ok(())
    }

    fn duplicate(&self, column: &str, value: &str) -> DomainError {
        DomainError::conflict(format!(
            "{}.{column} `{value}` already exists",
            self.table.name()
        ))
    }
}

#[async_trait]
impl<E: Entity> UnitOfWork for InMemoryUnitOfWork<E> {
    async fn begin(&mut self) -> Result<(), AppError> {
        if self.active {
            return Err(AppError::Transaction(format!(
                "transaction on `{}` already active",
                self.table.name()
            )));
        }
        self.staged.clear();
        self.active = true;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        self.ensure_active()?;

        let _guard = self.commit_lock.lock().await;
        self.check_versions()?;
        self.check_unique_key()?;

        let changes = mem::take(&mut self.staged);
        let count = changes.len();
        for (id, change) in changes {
            match change {
                Staged::Upsert(mut entity) => {
                    entity.set_version(entity.version().next());
                    self.table.upsert(entity);
                }
                Staged::Remove(_) => self.table.delete(&id),
            }
        }
        self.active = false;

        tracing::debug!(table = self.table.name(), changes = count, "changes committed");
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), AppError> {
        let discarded = self.staged.len();
        self.staged.clear();
        self.active = false;

        if discarded > 0 {
            tracing::debug!(table = self.table.name(), discarded, "changes rolled back");
        }
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), AppError> {
        self.ensure_active()?;
        self.staged.clear();
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryUnitOfWork<E> {
    async fn find_by_id(&self, id: &E::Id) -> DomainResult<Option<E>> {
        Ok(match self.staged.get(id) {
            Some(Staged::Upsert(entity)) => Some(entity.clone()),
            Some(Staged::Remove(_)) => None,
            None => self.table.get(id),
        })
    }

    async fn find_all(&self, spec: &dyn Specification<E>) -> DomainResult<Vec<E>> {
        let mut rows: Vec<E> = self
            .table
            .snapshot()
            .into_iter()
            .filter(|row| !self.staged.contains_key(row.id()))
            .collect();
        rows.extend(self.staged.values().filter_map(|change| match change {
            Staged::Upsert(entity) => Some(entity.clone()),
            Staged::Remove(_) => None,
        }));

        rows.retain(|row| spec.is_satisfied_by(row));
        rows.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(rows)
    }

    async fn add(&mut self, entity: E) -> DomainResult<()> {
        self.ensure_active()?;
        self.staged.insert(entity.id().clone(), Staged::Upsert(entity));
        Ok(())
    }

    async fn remove(&mut self, id: &E::Id) -> DomainResult<bool> {
        self.ensure_active()?;
        let Some(expected) = self.current_version(id) else {
            return Ok(false);
        };

        // 本会话新增且尚未提交的行直接撤销
        if expected.is_new() && self.table.version_of(id).is_none() {
            self.staged.remove(id);
        } else {
            self.staged.insert(id.clone(), Staged::Remove(expected));
        }
        Ok(true)
    }
}
