use crate::entity::Entity;
use crate::error::DomainResult;
use crate::specification::Specification;
use async_trait::async_trait;

/// 仓储：以聚合为单位读写，变更在所属工作单元提交时才生效
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: Entity,
{
    async fn find_by_id(&self, id: &E::Id) -> DomainResult<Option<E>>;

    /// 返回满足规约的全部实体，按标识升序
    async fn find_all(&self, spec: &dyn Specification<E>) -> DomainResult<Vec<E>>;

    /// 新增或更新（以实体版本区分）
    async fn add(&mut self, entity: E) -> DomainResult<()>;

    /// 删除实体，实体不存在时返回 `false`
    async fn remove(&mut self, id: &E::Id) -> DomainResult<bool>;
}
