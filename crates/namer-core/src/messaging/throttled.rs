use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

use crate::{
    config::Config,
    domain::{Backend, MessageId, RoomId},
    messaging::{
        port::MessagingPort,
        types::{MessagingCapabilities, OutgoingMessage},
    },
    Result,
};

#[derive(Clone, Copy, Debug)]
pub struct ThrottleConfig {
    /// Minimum spacing between *any* two sends (host-wide flood control).
    pub global_min_interval: Duration,
    /// Minimum spacing between sends to one room.
    pub room_min_interval: Duration,
}

impl From<&Config> for ThrottleConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            global_min_interval: cfg.global_min_interval,
            room_min_interval: cfg.room_min_interval,
        }
    }
}

#[derive(Debug)]
struct IntervalLimiter {
    interval: Duration,
    next: Instant,
}

impl IntervalLimiter {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now(),
        }
    }

    /// Reserve the next slot and return the wait duration required before executing.
    fn reserve(&mut self) -> Duration {
        let now = Instant::now();
        let start = if now >= self.next { now } else { self.next };
        self.next = start + self.interval;
        start.saturating_duration_since(now)
    }
}

type RoomKey = (Backend, RoomId);

/// MessagingPort decorator that spaces outbound sends.
///
/// Chat hosts drop or rate-limit bursts; this keeps a batch of split replies
/// from tripping that.
pub struct ThrottledMessenger {
    inner: Arc<dyn MessagingPort>,
    cfg: ThrottleConfig,
    global: Mutex<IntervalLimiter>,
    per_room: Mutex<HashMap<RoomKey, Arc<Mutex<IntervalLimiter>>>>,
}

impl ThrottledMessenger {
    pub fn new(inner: Arc<dyn MessagingPort>, cfg: ThrottleConfig) -> Self {
        Self {
            inner,
            cfg,
            global: Mutex::new(IntervalLimiter::new(cfg.global_min_interval)),
            per_room: Mutex::new(HashMap::new()),
        }
    }

    async fn limiter_for_room(&self, key: RoomKey) -> Arc<Mutex<IntervalLimiter>> {
        let mut map = self.per_room.lock().await;
        evict_idle_rooms(&mut map, Instant::now());
        map.entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(IntervalLimiter::new(self.cfg.room_min_interval))))
            .clone()
    }

    async fn throttle_room(&self, backend: Backend, room_id: &RoomId) {
        let global_wait = { self.global.lock().await.reserve() };
        let room_wait = {
            let lim = self.limiter_for_room((backend, room_id.clone())).await;
            let mut guard = lim.lock().await;
            guard.reserve()
        };

        let wait = global_wait.max(room_wait);
        if wait > Duration::ZERO {
            sleep(wait).await;
        }
    }
}

/// Drop limiters nobody holds whose next slot is already due.
///
/// A fresh limiter for the same room would grant an immediate slot too, so
/// removing these does not change pacing.
fn evict_idle_rooms(map: &mut HashMap<RoomKey, Arc<Mutex<IntervalLimiter>>>, now: Instant) {
    map.retain(|_, lim| {
        if Arc::strong_count(lim) > 1 {
            return true;
        }
        match lim.try_lock() {
            Ok(guard) => guard.next > now,
            Err(_) => true,
        }
    });
}

#[async_trait::async_trait]
impl MessagingPort for ThrottledMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        self.inner.capabilities()
    }

    async fn send_message(&self, msg: &OutgoingMessage) -> Result<MessageId> {
        self.throttle_room(msg.backend, &msg.room_id).await;
        self.inner.send_message(msg).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct Recorder {
        sent: StdMutex<Vec<OutgoingMessage>>,
    }

    #[async_trait::async_trait]
    impl MessagingPort for Recorder {
        fn capabilities(&self) -> MessagingCapabilities {
            MessagingCapabilities {
                supports_reply: true,
                max_message_len: 100,
            }
        }

        async fn send_message(&self, msg: &OutgoingMessage) -> Result<MessageId> {
            let mut sent = self.sent.lock().unwrap();
            sent.push(msg.clone());
            Ok(MessageId(sent.len().to_string()))
        }
    }

    fn msg(room: &str) -> OutgoingMessage {
        OutgoingMessage {
            backend: Backend::Ica,
            room_id: RoomId(room.to_string()),
            reply_to: None,
            content: "x".to_string(),
        }
    }

    #[test]
    fn limiter_spaces_reservations() {
        let mut lim = IntervalLimiter::new(Duration::from_secs(10));
        assert_eq!(lim.reserve(), Duration::ZERO);
        let wait = lim.reserve();
        assert!(wait > Duration::from_secs(9));
    }

    #[tokio::test]
    async fn forwards_in_order() {
        let inner = Arc::new(Recorder::default());
        let throttled = ThrottledMessenger::new(
            inner.clone(),
            ThrottleConfig {
                global_min_interval: Duration::ZERO,
                room_min_interval: Duration::from_millis(1),
            },
        );

        let a = throttled.send_message(&msg("a")).await.unwrap();
        let b = throttled.send_message(&msg("b")).await.unwrap();
        assert_eq!(a, MessageId("1".to_string()));
        assert_eq!(b, MessageId("2".to_string()));
        assert_eq!(throttled.capabilities().max_message_len, 100);

        let rooms: Vec<_> = inner
            .sent
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.room_id.0.clone())
            .collect();
        assert_eq!(rooms, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn idle_rooms_are_evicted() {
        let inner = Arc::new(Recorder::default());
        let throttled = ThrottledMessenger::new(
            inner,
            ThrottleConfig {
                global_min_interval: Duration::ZERO,
                room_min_interval: Duration::ZERO,
            },
        );

        throttled.send_message(&msg("a")).await.unwrap();
        throttled.send_message(&msg("b")).await.unwrap();
        throttled.send_message(&msg("c")).await.unwrap();

        // Zero spacing means every earlier room is already due when the next send comes in.
        let rooms = throttled.per_room.lock().await;
        assert_eq!(rooms.len(), 1);
        assert!(rooms.contains_key(&(Backend::Ica, RoomId("c".to_string()))));
    }

    #[tokio::test]
    async fn busy_rooms_are_kept() {
        let inner = Arc::new(Recorder::default());
        let throttled = ThrottledMessenger::new(
            inner,
            ThrottleConfig {
                global_min_interval: Duration::ZERO,
                room_min_interval: Duration::from_secs(60),
            },
        );

        throttled.send_message(&msg("a")).await.unwrap();
        throttled.send_message(&msg("b")).await.unwrap();

        assert_eq!(throttled.per_room.lock().await.len(), 2);
    }
}
