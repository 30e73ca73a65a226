use client_core::deep_link::DeepLinkHub;

use std::time::Duration;

use tokio::time::timeout;

const RECV_TIMEOUT: Duration = Duration::from_secs(1);

/// **VALUE**: Verifies an "open with URL" event reaches a subscriber as decoded text.
///
/// **WHY THIS MATTERS**: This is how text selected in another app lands in the input box.
#[tokio::test]
async fn given_subscriber_when_url_with_text_published_then_receives_decoded_text() {
    // GIVEN: A hub with one subscriber
    let hub = DeepLinkHub::new();
    let mut subscription = hub.subscribe();

    // WHEN: Publishing a deep link
    let delivered = hub.publish("korektor://app?text=Hello%20world");

    // THEN: The subscriber gets the decoded text
    assert_eq!(delivered, 1);
    let text = timeout(RECV_TIMEOUT, subscription.next_shared_text())
        .await
        .expect("event arrives");
    assert_eq!(text.as_deref(), Some("Hello world"));
}

/// **VALUE**: Verifies events without text are skipped and later events still arrive in order.
///
/// **BUG THIS CATCHES**: Would catch the listener stopping (returning `None`) on the first
/// URL it cannot use, which would silently disable deep links for the rest of the session.
#[tokio::test]
async fn given_events_without_text_when_listening_then_skipped_and_latest_wins() {
    let hub = DeepLinkHub::new();
    let mut subscription = hub.subscribe();

    hub.publish("korektor://app");
    hub.publish("korektor://app?lang=pl");
    hub.publish("korektor://app?text=first");
    hub.publish("korektor://app?text=second");

    let first = timeout(RECV_TIMEOUT, subscription.next_shared_text()).await.unwrap();
    let second = timeout(RECV_TIMEOUT, subscription.next_shared_text()).await.unwrap();
    assert_eq!(first.as_deref(), Some("first"));
    assert_eq!(second.as_deref(), Some("second"));
}

/// **VALUE**: Verifies that dropping a subscription releases it.
///
/// **WHY THIS MATTERS**: Re-initializing the shell creates a new subscription. Leaked
/// ones would keep old listeners writing into stale state.
#[tokio::test]
async fn given_subscription_when_dropped_then_hub_has_no_subscribers() {
    let hub = DeepLinkHub::new();
    {
        let _first = hub.subscribe();
        let _second = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 2);
    }

    assert_eq!(hub.subscriber_count(), 0);
    assert_eq!(hub.publish("korektor://app?text=nobody"), 0, "No one to deliver to");
}

#[tokio::test]
async fn given_hub_dropped_when_waiting_then_subscription_ends() {
    let hub = DeepLinkHub::new();
    let mut subscription = hub.subscribe();

    drop(hub);

    let next = timeout(RECV_TIMEOUT, subscription.next_shared_text())
        .await
        .expect("closed channel resolves immediately");
    assert!(next.is_none());
}
