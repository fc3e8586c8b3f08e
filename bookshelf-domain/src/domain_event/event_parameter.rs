use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// 事件参数的能力边界
///
/// 参数在暂存时序列化为 JSON，分发时再反序列化回具体类型；
/// 只有序列化结果为 JSON 对象的参数才能通过校验。
pub trait EventParameter: Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> EventParameter for T where T: Serialize + DeserializeOwned + Send + Sync + 'static {}

/// 不携带任何数据的参数（序列化为 `{}`）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoParameter {}
