use super::EventParameter;
use async_trait::async_trait;

/// 处理器参数是否必填
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRequirement {
    Required,
    Optional,
}

/// 处理器 `handle` 的签名描述
///
/// 合法的事件处理器恰好声明一个逻辑参数，该参数可以必填也可以带默认值（可选）。
/// 签名以常量形式挂在事件类型上，注册到 `EventRegistry` 后由 `EventValidator` 检查。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerSignature {
    params: &'static [ParamRequirement],
}

impl HandlerSignature {
    /// 单个必填参数
    pub const REQUIRED: Self = Self::new(&[ParamRequirement::Required]);
    /// 单个可选参数
    pub const OPTIONAL: Self = Self::new(&[ParamRequirement::Optional]);

    pub const fn new(params: &'static [ParamRequirement]) -> Self {
        Self { params }
    }

    pub const fn arity(&self) -> usize {
        self.params.len()
    }

    /// 仅当签名恰好声明一个参数时返回其约束
    pub fn requirement(&self) -> Option<ParamRequirement> {
        match self.params {
            [only] => Some(*only),
            _ => None,
        }
    }
}

/// 领域事件处理器契约
///
/// 事件的标识是处理器实例本身（同一类型的多个实例可以同时暂存），
/// `handle` 在请求的 `publish` 阶段被并发调用，参数缺省时为 `None`。
#[async_trait]
pub trait EventContract: Send + Sync + 'static {
    /// 事件类型名（用于注册、日志与失败报告）
    const NAME: &'static str;

    /// `handle` 的参数签名
    const SIGNATURE: HandlerSignature;

    /// 事件参数类型
    type Param: EventParameter;

    async fn handle(&self, param: Option<Self::Param>) -> anyhow::Result<()>;
}
