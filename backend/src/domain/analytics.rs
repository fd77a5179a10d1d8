//! Marketing analytics event sink.
//!
//! Events are fire-and-forget side effects of specific user actions. A sink
//! never returns an error and never blocks the primary operation.

use tracing::info;

/// Marketing events emitted by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsEvent {
    TrialStart,
    Lead,
    InitiateCheckout,
    AddPaymentInfo,
    Subscribe,
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::TrialStart => "trial_start",
            AnalyticsEvent::Lead => "lead",
            AnalyticsEvent::InitiateCheckout => "initiate_checkout",
            AnalyticsEvent::AddPaymentInfo => "add_payment_info",
            AnalyticsEvent::Subscribe => "subscribe",
        }
    }
}

/// Destination for analytics events
pub trait AnalyticsSink: Send + Sync {
    /// Record one event. Must not fail and must not block the caller's
    /// primary operation.
    fn track(
        &self,
        event: AnalyticsEvent,
        value: Option<f64>,
        currency: Option<&str>,
        email: Option<&str>,
    );
}

/// Sink that writes events to the structured log
#[derive(Clone, Default)]
pub struct LogAnalyticsSink;

impl AnalyticsSink for LogAnalyticsSink {
    fn track(
        &self,
        event: AnalyticsEvent,
        value: Option<f64>,
        currency: Option<&str>,
        email: Option<&str>,
    ) {
        info!(
            target: "analytics",
            event = event.name(),
            value,
            currency,
            email,
            "analytics event"
        );
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Sink that records events for assertions
    #[derive(Default)]
    pub struct RecordingSink {
        pub events: Mutex<Vec<(AnalyticsEvent, Option<f64>, Option<String>)>>,
    }

    impl AnalyticsSink for RecordingSink {
        fn track(
            &self,
            event: AnalyticsEvent,
            value: Option<f64>,
            currency: Option<&str>,
            _email: Option<&str>,
        ) {
            self.events
                .lock()
                .unwrap()
                .push((event, value, currency.map(|c| c.to_string())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingSink;
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(AnalyticsEvent::TrialStart.name(), "trial_start");
        assert_eq!(AnalyticsEvent::Subscribe.name(), "subscribe");
    }

    #[test]
    fn test_recording_sink_captures_events() {
        let sink = RecordingSink::default();
        sink.track(
            AnalyticsEvent::Subscribe,
            Some(29.9),
            Some("BRL"),
            Some("ana@example.com"),
        );

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, AnalyticsEvent::Subscribe);
        assert_eq!(events[0].1, Some(29.9));
    }
}
