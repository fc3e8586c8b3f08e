//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!
use crate::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// 校验字符串长度（按字符计）是否落在区间内
pub fn ensure_char_len(
    field: &'static str,
    value: &str,
    range: RangeInclusive<usize>,
) -> DomainResult<()> {
    let len = value.chars().count();
    if range.contains(&len) {
        return Ok(());
    }

    Err(DomainError::invalid_value(
        field,
        format!(
            "length must be within {}..={}, got {len}",
            range.start(),
            range.end()
        ),
    ))
}

/// 校验数值严格大于下界
pub fn ensure_greater_than<T>(field: &'static str, value: T, bound: T) -> DomainResult<()>
where
    T: PartialOrd + fmt::Display,
{
    if value > bound {
        return Ok(());
    }

    Err(DomainError::invalid_value(
        field,
        format!("must be greater than {bound}, got {value}"),
    ))
}

/// 版本号（用于乐观锁和并发控制）
///
/// # 示例
///
/// ```
/// use bookshelf_domain::value_object::Version;
///
/// let v1 = Version::new();
/// assert!(v1.is_new());
///
/// let v2 = v1.next();
/// assert_eq!(v2.value(), 1);
/// assert!(v2 > v1);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(usize);

impl Version {
    /// 创建初始版本（尚未持久化）
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_value(value: usize) -> Self {
        Self(value)
    }

    /// 获取下一个版本号
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn value(&self) -> usize {
        self.0
    }

    /// 检查是否为初始版本
    pub fn is_new(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for Version {
    fn from(value: usize) -> Self {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_starts_new_and_advances() {
        let v = Version::new();
        assert!(v.is_new());
        assert_eq!(v.next().next().value(), 2);
        assert!(!v.next().is_new());
    }

    #[test]
    fn version_display_and_serde() {
        let v = Version::from_value(42);
        assert_eq!(v.to_string(), "v42");
        assert_eq!(serde_json::to_string(&v).unwrap(), "42");
        assert_eq!(serde_json::from_str::<Version>("42").unwrap(), v);
    }

    #[test]
    fn char_len_counts_characters_not_bytes() {
        assert!(ensure_char_len("title", "가나다", 1..=3).is_ok());
        let err = ensure_char_len("title", "", 1..=3).unwrap_err();
        match err {
            DomainError::InvalidValue { field, .. } => assert_eq!(field, "title"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn lower_bound_is_exclusive() {
        assert!(ensure_greater_than("pages", 2u32, 1).is_ok());
        assert!(ensure_greater_than("pages", 1u32, 1).is_err());
        let err = ensure_greater_than("pages", 0u32, 1).unwrap_err();
        assert!(err.to_string().contains("must be greater than 1, got 0"));
    }
}
