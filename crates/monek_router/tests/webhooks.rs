mod common;

use std::sync::Arc;

use actix_web::{test, web, App};
use monek_connector::types::CompletionMode;
use monek_router::{
    consts,
    db::OrderStore,
    routes,
    types::{OrderStatus, OrderUpdate},
    AppState,
};
use serde_json::{json, Value};

use self::common::{seeded_state, StubGateway};

/// Seeds order 42 with the given payment reference and returns the state.
async fn state_with_reference(reference: &str) -> (AppState, Arc<monek_router::db::InMemoryOrderStore>) {
    let gateway = Arc::new(StubGateway::approving());
    let (state, store) = seeded_state(gateway, CompletionMode::Embedded, 42).await;
    store
        .update_order(
            42,
            OrderUpdate {
                metadata: vec![(consts::META_PAYMENT_REFERENCE.to_string(), json!(reference))],
                ..Default::default()
            },
        )
        .await
        .unwrap();
    (state, store)
}

async fn post_webhook(state: AppState, body: &[u8]) -> (u16, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;
    let request = test::TestRequest::post()
        .uri("/webhook")
        .insert_header(("content-type", "application/json"))
        .set_payload(body.to_vec())
        .to_request();
    let response = test::call_service(&app, request).await;
    let status = response.status().as_u16();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}

#[actix_web::test]
async fn all_known_body_shapes_resolve_the_same_order() {
    let shapes = [
        json!({"paymentReference": "MNK-abc"}),
        json!({"Data": {"PaymentReference": "MNK-abc"}}),
        json!({"reference": "MNK-abc"}),
    ];
    for shape in shapes {
        let (state, _store) = state_with_reference("MNK-abc").await;
        let (status, body) = post_webhook(state, shape.to_string().as_bytes()).await;

        assert_eq!(status, 200, "{shape}");
        assert_eq!(body["ok"], true);
        assert_eq!(body["reference"], "MNK-abc");
        assert_eq!(body["order_id"], 42);
        assert_eq!(body["status"], "payment-confirmed");
    }
}

#[actix_web::test]
async fn duplicate_delivery_transitions_once_but_notes_twice() {
    let (state, store) = state_with_reference("MNK-abc").await;
    let body = json!({"paymentReference": "MNK-abc"}).to_string();

    let (first_status, _) = post_webhook(state.clone(), body.as_bytes()).await;
    let (second_status, second_body) = post_webhook(state, body.as_bytes()).await;

    assert_eq!(first_status, 200);
    assert_eq!(second_status, 200);
    assert_eq!(second_body["status"], "payment-confirmed");

    let order = store.find_order(42).await.unwrap();
    assert_eq!(order.status, OrderStatus::PaymentConfirmed);
    let confirmations = order
        .notes
        .iter()
        .filter(|n| n.note.contains("Payment confirmed by webhook"))
        .count();
    let duplicates = order
        .notes
        .iter()
        .filter(|n| n.note.contains("Duplicate payment webhook"))
        .count();
    assert_eq!(confirmations, 1);
    assert_eq!(duplicates, 1);
}

#[actix_web::test]
async fn raw_body_is_persisted_for_audit() {
    let (state, store) = state_with_reference("MNK-abc").await;
    let body = json!({"paymentReference": "MNK-abc", "amount": 2000});

    post_webhook(state, body.to_string().as_bytes()).await;

    let order = store.find_order(42).await.unwrap();
    assert_eq!(order.metadata.get(consts::META_LAST_WEBHOOK), Some(&body));
}

#[actix_web::test]
async fn unmatched_reference_is_a_404_and_mutates_nothing() {
    let (state, store) = state_with_reference("MNK-abc").await;

    let (status, body) =
        post_webhook(state, json!({"paymentReference": "MNK-other"}).to_string().as_bytes()).await;

    assert_eq!(status, 404);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "order_not_found");
    assert_eq!(body["reference"], "MNK-other");

    let order = store.find_order(42).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.notes.is_empty());
    assert!(!order.metadata.contains_key(consts::META_LAST_WEBHOOK));
}

#[actix_web::test]
async fn bodies_without_a_reference_are_rejected() {
    let (state, _store) = state_with_reference("MNK-abc").await;
    let (status, body) = post_webhook(state, json!({"event": "ping"}).to_string().as_bytes()).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "missing_reference");
}

#[actix_web::test]
async fn non_json_and_non_object_bodies_are_rejected() {
    for payload in [&b"not json"[..], b"[1, 2, 3]"] {
        let (state, _store) = state_with_reference("MNK-abc").await;
        let (status, body) = post_webhook(state, payload).await;

        assert_eq!(status, 400);
        assert_eq!(body["error"], "invalid_json");
    }
}
