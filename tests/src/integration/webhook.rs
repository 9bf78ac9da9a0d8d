//! # Webhook Integration
//!
//! Signed callbacks routed through the runtime's HTTP surface into a real
//! scan processor, with replies captured by a recording sink.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use bl_01_catalog::{Catalog, StaticCatalog};
    use bl_02_ledger::{DedupWindow, InMemoryStore, Ledger};
    use bl_03_scan_processor::{DeliveryError, ProcessorConfig, ReplySink, ScanProcessor};
    use inventory_runtime::adapters::{sign_body, SIGNATURE_HEADER};
    use inventory_runtime::webhook::{router, WebhookState};
    use serde_json::json;
    use shared_types::{CatalogEntry, ItemRecord, ManualClock};
    use tower::ServiceExt;

    const SECRET: &str = "integration-secret";

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingSink {
        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReplySink for RecordingSink {
        async fn deliver(&self, reply_token: &str, text: &str) -> Result<(), DeliveryError> {
            self.sent
                .lock()
                .unwrap()
                .push((reply_token.to_string(), text.to_string()));
            Ok(())
        }
    }

    struct Stack {
        app: Router,
        sink: Arc<RecordingSink>,
        ledger: Arc<InMemoryStore<Ledger>>,
    }

    fn stack() -> Stack {
        let catalog = Catalog::new(vec![CatalogEntry::new(
            "A1",
            10,
            vec![ItemRecord::new("P-1", "8801")],
        )]);
        let ledger = Arc::new(InMemoryStore::<Ledger>::new());
        let processor = Arc::new(ScanProcessor::new(
            Arc::new(StaticCatalog::new(catalog)),
            ledger.clone(),
            Arc::new(InMemoryStore::<DedupWindow>::new()),
            Arc::new(ManualClock::new(1_700_000_000)),
            ProcessorConfig::default(),
        ));
        let sink = Arc::new(RecordingSink::default());
        let app = router(WebhookState::new(processor, sink.clone(), Some(SECRET)));
        Stack { app, sink, ledger }
    }

    fn signed_callback(events: serde_json::Value) -> Request<Body> {
        let body = serde_json::to_vec(&json!({ "destination": "Ubot", "events": events })).unwrap();
        let signature = sign_body(SECRET.as_bytes(), &body).unwrap();
        Request::builder()
            .method("POST")
            .uri("/callback")
            .header(SIGNATURE_HEADER, signature)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn text(id: &str, token: &str, text: &str) -> serde_json::Value {
        json!({
            "type": "message",
            "mode": "active",
            "timestamp": 1_700_000_000_000u64,
            "replyToken": token,
            "source": { "type": "user", "userId": "U-scanner" },
            "message": { "type": "text", "id": id, "text": text },
        })
    }

    #[tokio::test]
    async fn test_scan_through_webhook_replies_with_count() {
        let stack = stack();

        let response = stack
            .app
            .clone()
            .oneshot(signed_callback(json!([text("m1", "r1", "8801")])))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let sent = stack.sink.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "r1");
        assert!(sent[0].1.contains("remaining count 9"));
        assert_eq!(stack.ledger.snapshot().get("A1"), Some(9));
    }

    #[tokio::test]
    async fn test_platform_redelivery_is_silent() {
        let stack = stack();
        let events = json!([text("m1", "r1", "8801")]);

        for _ in 0..2 {
            let response = stack
                .app
                .clone()
                .oneshot(signed_callback(events.clone()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert_eq!(stack.sink.sent().len(), 1);
        assert_eq!(stack.ledger.snapshot().get("A1"), Some(9));
    }

    #[tokio::test]
    async fn test_batch_events_processed_in_order() {
        let stack = stack();

        stack
            .app
            .clone()
            .oneshot(signed_callback(json!([
                text("m1", "r1", "set lotA1 2"),
                text("m2", "r2", "8801"),
                text("m3", "r3", "8801"),
            ])))
            .await
            .unwrap();

        let replies: Vec<String> = stack.sink.sent().into_iter().map(|(_, t)| t).collect();
        assert_eq!(replies[0], "set: lot A1 remaining count 2");
        assert!(replies[1].contains("remaining count 1"));
        assert!(replies[2].ends_with("\ncomplete"));
    }

    #[tokio::test]
    async fn test_forged_callback_has_no_effect() {
        let stack = stack();
        let mut request = signed_callback(json!([text("m1", "r1", "8801")]));
        request
            .headers_mut()
            .insert(SIGNATURE_HEADER, "Zm9yZ2Vk".parse().unwrap());

        let response = stack.app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(stack.sink.sent().is_empty());
        assert_eq!(stack.ledger.save_count(), 0);
    }
}
