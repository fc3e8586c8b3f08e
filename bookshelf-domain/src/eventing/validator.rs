use super::EventRegistry;
use crate::domain_event::{HandlerSignature, ParamRequirement};
use crate::error::EventError;
use serde_json::Value;
use std::sync::Arc;

/// 事件校验器
///
/// 按顺序检查：
/// 1. 事件类型已注册，否则 `InvalidEventType`；
/// 2. 若提供了参数，参数必须是结构化对象，否则 `InvalidParameterType`；
/// 3. 处理器签名恰好声明一个参数，否则 `ParameterCount`；
/// 4. 必填参数未提供时返回 `RequiredParameter`。
///
/// 校验没有副作用，每次暂存都会重新执行。
#[derive(Debug, Clone)]
pub struct EventValidator {
    registry: Arc<EventRegistry>,
}

impl EventValidator {
    pub fn new(registry: Arc<EventRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<EventRegistry> {
        &self.registry
    }

    /// 第 1 条规则：事件类型已注册
    pub fn ensure_registered(&self, kind: &str) -> Result<HandlerSignature, EventError> {
        self.registry
            .signature(kind)
            .ok_or_else(|| EventError::InvalidEventType(kind.to_string()))
    }

    pub fn validate(&self, kind: &str, param: Option<&Value>) -> Result<(), EventError> {
        let signature = self.ensure_registered(kind)?;

        if let Some(value) = param
            && !value.is_object()
        {
            return Err(EventError::InvalidParameterType {
                event: kind.to_string(),
                found: json_kind(value),
            });
        }

        let requirement = signature
            .requirement()
            .ok_or_else(|| EventError::ParameterCount {
                event: kind.to_string(),
                found: signature.arity(),
            })?;

        if requirement == ParamRequirement::Required && param.is_none() {
            return Err(EventError::RequiredParameter(kind.to_string()));
        }

        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::{EventContract, HandlerSignature, NoParameter};
    use async_trait::async_trait;
    use serde_json::json;

    struct Optional;
    struct Required;
    struct TwoParams;

    #[async_trait]
    impl EventContract for Optional {
        const NAME: &'static str = "optional";
        const SIGNATURE: HandlerSignature = HandlerSignature::OPTIONAL;
        type Param = NoParameter;

        async fn handle(&self, _param: Option<NoParameter>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl EventContract for Required {
        const NAME: &'static str = "required";
        const SIGNATURE: HandlerSignature = HandlerSignature::REQUIRED;
        type Param = NoParameter;

        async fn handle(&self, _param: Option<NoParameter>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl EventContract for TwoParams {
        const NAME: &'static str = "two-params";
        const SIGNATURE: HandlerSignature = HandlerSignature::new(&[
            ParamRequirement::Optional,
            ParamRequirement::Optional,
        ]);
        type Param = NoParameter;

        async fn handle(&self, _param: Option<NoParameter>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn validator() -> EventValidator {
        let registry = EventRegistry::new()
            .register::<Optional>()
            .register::<Required>()
            .register::<TwoParams>();
        EventValidator::new(Arc::new(registry))
    }

    #[test]
    fn accepts_registered_kinds_with_valid_parameters() {
        let v = validator();
        assert!(v.validate("optional", None).is_ok());
        assert!(v.validate("optional", Some(&json!({}))).is_ok());
        assert!(v.validate("required", Some(&json!({"id": 1}))).is_ok());
    }

    #[test]
    fn rejects_unknown_kind_first() {
        let err = validator().validate("unknown", Some(&json!(1))).unwrap_err();
        assert!(matches!(err, EventError::InvalidEventType(kind) if kind == "unknown"));
    }

    #[test]
    fn rejects_primitive_parameter() {
        let err = validator()
            .validate("optional", Some(&json!("text")))
            .unwrap_err();
        assert!(matches!(
            err,
            EventError::InvalidParameterType { found: "string", .. }
        ));
    }

    #[test]
    fn rejects_wrong_arity() {
        let err = validator().validate("two-params", None).unwrap_err();
        assert!(matches!(err, EventError::ParameterCount { found: 2, .. }));
    }

    #[test]
    fn rejects_missing_required_parameter() {
        let err = validator().validate("required", None).unwrap_err();
        assert!(matches!(err, EventError::RequiredParameter(kind) if kind == "required"));
    }
}
