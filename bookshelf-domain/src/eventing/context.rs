use super::{EventRegistry, EventScope, EventValidator};
use crate::domain_event::EventContract;
use crate::error::{EventError, HandlerFailure};
use async_trait::async_trait;
use futures_util::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinSet;

/// 事件实例标识（处理器实例的地址）
type EventKey = usize;

struct PendingEvent {
    handler: Arc<dyn ErasedEvent>,
    param: Option<Value>,
}

/// 擦除参数类型后的事件处理器
#[async_trait]
trait ErasedEvent: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle_value(&self, param: Option<Value>) -> anyhow::Result<()>;
}

#[async_trait]
impl<E: EventContract> ErasedEvent for E {
    fn name(&self) -> &'static str {
        E::NAME
    }

    async fn handle_value(&self, param: Option<Value>) -> anyhow::Result<()> {
        let param = param
            .map(serde_json::from_value::<E::Param>)
            .transpose()?;
        self.handle(param).await
    }
}

/// 请求级事件处理上下文
///
/// 保存本次请求暂存的事件实例及其参数。同一实例重复暂存时覆盖参数，
/// 同类型的不同实例可以并存。上下文只属于当前请求，不加锁也不跨请求共享。
pub struct EventHandlerContext {
    validator: EventValidator,
    events: HashMap<EventKey, PendingEvent>,
}

impl EventHandlerContext {
    pub fn new(validator: EventValidator) -> Self {
        Self {
            validator,
            events: HashMap::new(),
        }
    }

    /// 校验并暂存事件；校验失败时上下文保持不变
    pub fn store<E: EventContract>(
        &mut self,
        event: Arc<E>,
        param: Option<E::Param>,
    ) -> Result<(), EventError> {
        // 参数序列化失败不能掩盖未注册的事件类型
        self.validator.ensure_registered(E::NAME)?;

        let param = param
            .map(serde_json::to_value)
            .transpose()
            .map_err(|_| EventError::InvalidParameterType {
                event: E::NAME.to_string(),
                found: "unserializable value",
            })?;

        self.validator.validate(E::NAME, param.as_ref())?;

        let key = Arc::as_ptr(&event).cast::<()>() as EventKey;
        self.events.insert(
            key,
            PendingEvent {
                handler: event,
                param,
            },
        );
        tracing::debug!(event = E::NAME, pending = self.events.len(), "event stored");
        Ok(())
    }

    /// 取出全部暂存事件，上下文随即为空
    pub fn drain(&mut self) -> PendingBatch {
        PendingBatch {
            events: self.events.drain().map(|(_, pending)| pending).collect(),
            registry: self.validator.registry().clone(),
        }
    }

    /// 并发执行全部暂存事件并清空上下文
    pub async fn publish(&mut self) -> Result<(), EventError> {
        self.drain().dispatch().await
    }

    /// 丢弃全部暂存事件而不执行
    pub fn clear(&mut self) {
        let discarded = self.events.len();
        self.events.clear();
        if discarded > 0 {
            tracing::debug!(discarded, "pending events discarded");
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// 从上下文中取出的一批待分发事件
pub struct PendingBatch {
    events: Vec<PendingEvent>,
    registry: Arc<EventRegistry>,
}

impl PendingBatch {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// 每个事件一个任务并发执行，等待全部结束后汇总失败
    ///
    /// 处理器在各自全新的 `EventScope` 中运行；返回错误或 panic 都只记为该处理器的失败。
    pub async fn dispatch(self) -> Result<(), EventError> {
        let Self { events, registry } = self;
        if events.is_empty() {
            return Ok(());
        }

        let total = events.len();
        let mut tasks = JoinSet::new();
        for PendingEvent { handler, param } in events {
            let registry = registry.clone();
            tasks.spawn(async move {
                let name = handler.name();
                let outcome = EventScope::run(
                    registry,
                    AssertUnwindSafe(handler.handle_value(param)).catch_unwind(),
                )
                .await;
                (name, outcome)
            });
        }

        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let failure = match joined {
                Ok((_, Ok(Ok(())))) => continue,
                Ok((name, Ok(Err(err)))) => HandlerFailure::new(name, format!("{err:#}")),
                Ok((name, Err(panic))) => HandlerFailure::new(name, panic_message(panic.as_ref())),
                Err(err) => HandlerFailure::new("unknown", err.to_string()),
            };
            tracing::warn!(handler = %failure.handler, reason = %failure.reason, "event handler failed");
            failures.push(failure);
        }

        if failures.is_empty() {
            tracing::debug!(total, "events published");
            Ok(())
        } else {
            tracing::error!(total, failed = failures.len(), "events published with failures");
            Err(EventError::HandlerFailures(failures))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::{HandlerSignature, NoParameter};
    use serde::{Deserialize, Serialize};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl EventContract for Recorder {
        const NAME: &'static str = "recorder";
        const SIGNATURE: HandlerSignature = HandlerSignature::OPTIONAL;
        type Param = Note;

        async fn handle(&self, param: Option<Note>) -> anyhow::Result<()> {
            self.seen.lock().unwrap().push(param.map(|n| n.text));
            Ok(())
        }
    }

    struct Unregistered;

    #[async_trait]
    impl EventContract for Unregistered {
        const NAME: &'static str = "unregistered";
        const SIGNATURE: HandlerSignature = HandlerSignature::OPTIONAL;
        type Param = NoParameter;

        async fn handle(&self, _param: Option<NoParameter>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    /// 序列化总是失败的参数
    #[derive(Debug, Deserialize)]
    struct Unserializable {}

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not serializable"))
        }
    }

    struct Opaque;

    #[async_trait]
    impl EventContract for Opaque {
        const NAME: &'static str = "opaque";
        const SIGNATURE: HandlerSignature = HandlerSignature::OPTIONAL;
        type Param = Unserializable;

        async fn handle(&self, _param: Option<Unserializable>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn context() -> EventHandlerContext {
        let registry = Arc::new(EventRegistry::new().register::<Recorder>());
        EventHandlerContext::new(EventValidator::new(registry))
    }

    fn note(text: &str) -> Note {
        Note { text: text.into() }
    }

    #[tokio::test]
    async fn same_instance_replaces_parameter() {
        let mut ctx = context();
        let recorder = Arc::new(Recorder::default());

        ctx.store(recorder.clone(), Some(note("first"))).unwrap();
        ctx.store(recorder.clone(), Some(note("second"))).unwrap();
        assert_eq!(ctx.len(), 1);

        ctx.publish().await.unwrap();
        assert_eq!(*recorder.seen.lock().unwrap(), vec![Some("second".to_string())]);
    }

    #[tokio::test]
    async fn distinct_instances_of_one_kind_coexist() {
        let mut ctx = context();
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());

        ctx.store(a.clone(), None).unwrap();
        ctx.store(b.clone(), Some(note("b"))).unwrap();
        assert_eq!(ctx.len(), 2);

        ctx.publish().await.unwrap();
        assert!(ctx.is_empty());
        assert_eq!(*a.seen.lock().unwrap(), vec![None]);
        assert_eq!(*b.seen.lock().unwrap(), vec![Some("b".to_string())]);
    }

    #[test]
    fn rejected_store_leaves_context_unchanged() {
        let mut ctx = context();
        ctx.store(Arc::new(Recorder::default()), None).unwrap();

        let err = ctx.store(Arc::new(Unregistered), None).unwrap_err();
        assert!(matches!(err, EventError::InvalidEventType(_)));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn unregistered_kind_is_reported_before_parameter_serialization() {
        let mut ctx = context();
        let err = ctx.store(Arc::new(Opaque), Some(Unserializable {})).unwrap_err();
        assert!(matches!(err, EventError::InvalidEventType(ref kind) if kind == "opaque"));

        let registry = Arc::new(EventRegistry::new().register::<Opaque>());
        let mut ctx = EventHandlerContext::new(EventValidator::new(registry));
        let err = ctx.store(Arc::new(Opaque), Some(Unserializable {})).unwrap_err();
        assert!(matches!(
            err,
            EventError::InvalidParameterType { found: "unserializable value", .. }
        ));
        assert!(ctx.is_empty());
    }

    #[tokio::test]
    async fn clear_discards_without_running() {
        let mut ctx = context();
        let recorder = Arc::new(Recorder::default());
        ctx.store(recorder.clone(), None).unwrap();

        ctx.clear();
        ctx.publish().await.unwrap();
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn panic_message_reads_str_and_string_payloads() {
        assert_eq!(panic_message(&"boom"), "panicked: boom");
        assert_eq!(panic_message(&"bang".to_string()), "panicked: bang");
        assert_eq!(panic_message(&1_u8), "panicked");
    }
}
