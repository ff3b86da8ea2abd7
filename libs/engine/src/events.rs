//! Event publication
//!
//! Committed events are logged, kept in an in-process journal and fanned out
//! to every live subscriber. Subscribers whose receiver was dropped are pruned
//! on the next publish.

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::info;
use types::ExchangeEvent;

#[derive(Debug, Default)]
pub struct EventBus {
    journal: Vec<ExchangeEvent>,
    subscribers: Vec<Sender<ExchangeEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receiver for every event published from now on
    pub fn subscribe(&mut self) -> Receiver<ExchangeEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, event: ExchangeEvent) {
        match &event {
            ExchangeEvent::LiquidityAdded {
                provider,
                token_a,
                token_b,
                amount_a,
                amount_b,
                timestamp,
            } => info!(
                %provider, %token_a, %token_b, %amount_a, %amount_b, timestamp,
                "LiquidityAdded"
            ),
            ExchangeEvent::LiquidityRemoved {
                provider,
                token_a,
                token_b,
                amount_a,
                amount_b,
                timestamp,
            } => info!(
                %provider, %token_a, %token_b, %amount_a, %amount_b, timestamp,
                "LiquidityRemoved"
            ),
            ExchangeEvent::TradeExecuted {
                trader,
                token_in,
                token_out,
                amount_in,
                amount_out,
                timestamp,
            } => info!(
                %trader, %token_in, %token_out, %amount_in, %amount_out, timestamp,
                "TradeExecuted"
            ),
        }

        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
        self.journal.push(event);
    }

    /// Every event published so far, oldest first
    pub fn journal(&self) -> &[ExchangeEvent] {
        &self.journal
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{AccountId, TokenId, U256};

    fn trade_event(ts: u64) -> ExchangeEvent {
        ExchangeEvent::TradeExecuted {
            trader: AccountId::from_low_u64_be(1),
            token_in: TokenId::from_low_u64_be(2),
            token_out: TokenId::from_low_u64_be(3),
            amount_in: U256::from(10u64),
            amount_out: U256::from(9u64),
            timestamp: ts,
        }
    }

    #[test]
    fn test_subscribers_receive_published_events() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();

        bus.publish(trade_event(1));
        bus.publish(trade_event(2));

        assert_eq!(rx.try_recv().unwrap().timestamp(), 1);
        assert_eq!(rx.try_recv().unwrap().timestamp(), 2);
        assert_eq!(bus.journal().len(), 2);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(trade_event(1));

        assert_eq!(bus.subscriber_count(), 1);
        assert!(kept.try_recv().is_ok());
    }
}
