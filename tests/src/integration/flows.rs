//! # Integration Test Flows
//!
//! Drives the scan processor over the real adapters: a file-sourced
//! [`CatalogCache`], JSON file stores in a temporary data directory and a
//! manual clock. Assertions read the documents back from disk.
//!
//! ## Flows Tested:
//!
//! 1. **Scan countdown**: a lot of ten boxes scanned to exhaustion and beyond
//! 2. **Redelivery**: a repeated message id leaves every file byte-identical
//! 3. **Rejected commands**: unknown lots never touch the ledger document
//! 4. **Overrides**: set and restore against catalog originals
//! 5. **Retention**: expired ids are pruned and processed again
//! 6. **Restart**: state survives rebuilding every component over one directory

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use bl_01_catalog::{CatalogCache, FileCatalogFetcher, CATALOG_FILE};
    use bl_02_ledger::{
        DataDirLock, DedupWindow, JsonFileStore, Ledger, StoreError, DEDUP_FILE, LEDGER_FILE,
    };
    use bl_03_scan_processor::{Locale, MessageHandler, ProcessorConfig, ScanProcessor};
    use shared_types::{InboundMessage, ManualClock, SystemTimeSource, SECONDS_PER_DAY};
    use tempfile::TempDir;

    const NOW: u64 = 1_700_000_000;

    const CATALOG: &str = r#"[
        {"編號": "A1", "箱數": 10, "資料": [{"商品編號": "P-1", "條碼": "8801"}]},
        {"編號": "B2", "箱數": "3", "資料": [{"商品編號": "P-2", "條碼": 9902}]},
        {"編號": "C3", "箱數": 4, "資料": null}
    ]"#;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// One data directory plus a processor wired over it.
    struct Deployment {
        dir: TempDir,
        source: PathBuf,
        clock: Arc<ManualClock>,
        processor: ScanProcessor,
    }

    impl Deployment {
        fn new(locale: Locale) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let source = dir.path().join("catalog-source.json");
            std::fs::write(&source, CATALOG).unwrap();
            let clock = Arc::new(ManualClock::new(NOW));
            let processor = build_processor(dir.path(), &source, clock.clone(), locale);
            Self {
                dir,
                source,
                clock,
                processor,
            }
        }

        /// Rebuilds every component over the same directory.
        fn restart(self) -> Self {
            let processor = build_processor(
                self.dir.path(),
                &self.source,
                self.clock.clone(),
                Locale::En,
            );
            Self { processor, ..self }
        }

        async fn send(&self, id: &str, text: &str) -> Option<String> {
            self.processor
                .handle(&InboundMessage::new(id, "U-test", text))
                .await
        }

        fn data_dir(&self) -> &Path {
            self.dir.path()
        }

        fn ledger_bytes(&self) -> Vec<u8> {
            std::fs::read(self.data_dir().join(LEDGER_FILE)).unwrap_or_default()
        }

        fn dedup_bytes(&self) -> Vec<u8> {
            std::fs::read(self.data_dir().join(DEDUP_FILE)).unwrap_or_default()
        }

        fn ledger(&self) -> Ledger {
            decode_or_default(&self.ledger_bytes())
        }

        fn dedup(&self) -> DedupWindow {
            decode_or_default(&self.dedup_bytes())
        }
    }

    fn decode_or_default<T: serde::de::DeserializeOwned + Default>(bytes: &[u8]) -> T {
        if bytes.is_empty() {
            T::default()
        } else {
            serde_json::from_slice(bytes).unwrap()
        }
    }

    fn build_processor(
        data_dir: &Path,
        source: &Path,
        clock: Arc<ManualClock>,
        locale: Locale,
    ) -> ScanProcessor {
        let catalog = CatalogCache::new(
            data_dir.join(CATALOG_FILE),
            Arc::new(FileCatalogFetcher::new(source)),
            Arc::new(SystemTimeSource),
        );
        ScanProcessor::new(
            Arc::new(catalog),
            Arc::new(JsonFileStore::<Ledger>::new(data_dir.join(LEDGER_FILE))),
            Arc::new(JsonFileStore::<DedupWindow>::new(data_dir.join(DEDUP_FILE))),
            clock,
            ProcessorConfig {
                locale,
                ..ProcessorConfig::default()
            },
        )
    }

    // =============================================================================
    // SCAN COUNTDOWN
    // =============================================================================

    #[tokio::test]
    async fn test_ten_box_lot_counts_down_to_completion() {
        let deployment = Deployment::new(Locale::En);

        for n in 1..=12u64 {
            let reply = deployment.send(&format!("m{n}"), "8801").await.unwrap();
            let remaining = 10u64.saturating_sub(n);

            assert!(
                reply.contains(&format!(
                    "lot A1, original count 10, remaining count {remaining}"
                )),
                "scan {n}: {reply}"
            );
            assert!(reply.contains(&format!("total remaining: {remaining}")));
            assert_eq!(reply.ends_with("\ncomplete"), remaining == 0, "scan {n}");
            assert_eq!(deployment.ledger().get("A1"), Some(remaining));
        }

        assert_eq!(deployment.dedup().len(), 12);
        assert!(deployment.data_dir().join(CATALOG_FILE).exists());
    }

    #[tokio::test]
    async fn test_product_code_and_numeric_barcode_both_match() {
        let deployment = Deployment::new(Locale::En);

        let by_product = deployment.send("m1", "P-2").await.unwrap();
        assert!(by_product.contains("lot B2, original count 3, remaining count 2"));

        // Barcode was a JSON number in the catalog.
        let by_barcode = deployment.send("m2", " 9902 ").await.unwrap();
        assert!(by_barcode.contains("remaining count 1"));
    }

    #[tokio::test]
    async fn test_no_match_records_the_message() {
        let deployment = Deployment::new(Locale::En);

        let reply = deployment.send("m1", "0000").await.unwrap();

        assert_eq!(reply, "no matching record");
        assert!(deployment.dedup().contains("m1"));
        assert!(deployment.ledger().is_empty());
    }

    // =============================================================================
    // REDELIVERY
    // =============================================================================

    #[tokio::test]
    async fn test_redelivery_leaves_files_byte_identical() {
        let deployment = Deployment::new(Locale::En);
        deployment.send("m1", "8801").await.unwrap();
        let ledger_before = deployment.ledger_bytes();
        let dedup_before = deployment.dedup_bytes();

        for _ in 0..3 {
            assert_eq!(deployment.send("m1", "8801").await, None);
        }

        assert_eq!(deployment.ledger_bytes(), ledger_before);
        assert_eq!(deployment.dedup_bytes(), dedup_before);
        assert_eq!(deployment.ledger().get("A1"), Some(9));
    }

    // =============================================================================
    // REJECTED COMMANDS
    // =============================================================================

    #[tokio::test]
    async fn test_unknown_lot_does_not_change_ledger_bytes() {
        let deployment = Deployment::new(Locale::En);
        deployment.send("m1", "8801").await.unwrap();
        let before = deployment.ledger_bytes();

        let restore = deployment.send("m2", "restore lotZ9").await.unwrap();
        let set = deployment.send("m3", "set Z9 4").await.unwrap();

        assert!(restore.starts_with("lot Z9 not found\nknown lots include: A1, B2, C3"));
        assert!(set.starts_with("lot Z9 not found"));
        assert_eq!(deployment.ledger_bytes(), before);
        assert!(deployment.dedup().contains("m2"));
        assert!(deployment.dedup().contains("m3"));
    }

    #[tokio::test]
    async fn test_usage_errors_are_replied_and_recorded() {
        let deployment = Deployment::new(Locale::En);

        assert_eq!(
            deployment.send("m1", "set A1 -2").await.unwrap(),
            "usage: set lot<ID> <count>"
        );
        assert_eq!(
            deployment.send("m2", "restore").await.unwrap(),
            "usage: restore lot<ID>"
        );
        assert_eq!(deployment.send("m1", "set A1 -2").await, None);
        assert_eq!(deployment.dedup().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_catalog_source_changes_nothing() {
        let deployment = Deployment::new(Locale::En);
        std::fs::remove_file(&deployment.source).unwrap();

        let reply = deployment.send("m1", "8801").await.unwrap();

        assert!(reply.starts_with("catalog download error:"), "{reply}");
        assert!(!deployment.data_dir().join(LEDGER_FILE).exists());
        assert!(!deployment.data_dir().join(DEDUP_FILE).exists());

        // Once the source is back the same message is processed normally.
        std::fs::write(&deployment.source, CATALOG).unwrap();
        let retry = deployment.send("m1", "8801").await.unwrap();
        assert!(retry.contains("remaining count 9"));
    }

    // =============================================================================
    // OVERRIDES
    // =============================================================================

    #[tokio::test]
    async fn test_set_then_restore_round_trip() {
        let deployment = Deployment::new(Locale::En);

        assert_eq!(
            deployment.send("m1", "set lotB2 7").await.unwrap(),
            "set: lot B2 remaining count 7"
        );
        deployment.send("m2", "9902").await.unwrap();
        assert_eq!(deployment.ledger().get("B2"), Some(6));

        assert_eq!(
            deployment.send("m3", "restore B2").await.unwrap(),
            "restored: lot B2 remaining count 3"
        );
        assert_eq!(deployment.ledger().get("B2"), Some(3));
    }

    #[tokio::test]
    async fn test_lot_without_items_can_be_overridden() {
        let deployment = Deployment::new(Locale::En);

        let reply = deployment.send("m1", "restore C3").await.unwrap();

        assert_eq!(reply, "restored: lot C3 remaining count 4");
    }

    // =============================================================================
    // RETENTION
    // =============================================================================

    #[tokio::test]
    async fn test_expired_ids_are_pruned_and_reprocessed() {
        let deployment = Deployment::new(Locale::En);
        deployment.send("old", "8801").await.unwrap();

        deployment.clock.advance(7 * SECONDS_PER_DAY - 1);
        deployment.send("fresh", "8801").await.unwrap();
        assert!(deployment.dedup().contains("old"));

        deployment.clock.advance(1);
        deployment.send("newer", "8801").await.unwrap();
        assert!(!deployment.dedup().contains("old"));

        let reply = deployment.send("old", "8801").await;
        assert!(reply.is_some());
        assert_eq!(deployment.ledger().get("A1"), Some(6));
    }

    // =============================================================================
    // RESTART
    // =============================================================================

    #[tokio::test]
    async fn test_state_survives_restart() {
        let deployment = Deployment::new(Locale::En);
        deployment.send("m1", "8801").await.unwrap();

        let deployment = deployment.restart();

        assert_eq!(deployment.send("m1", "8801").await, None);
        let reply = deployment.send("m2", "8801").await.unwrap();
        assert!(reply.contains("remaining count 8"));
    }

    #[test]
    fn test_data_dir_lock_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let first = DataDirLock::acquire(dir.path()).unwrap();

        match DataDirLock::acquire(dir.path()) {
            Err(StoreError::Locked { .. }) => {}
            other => panic!("expected Locked, got {other:?}"),
        }

        drop(first);
        assert!(DataDirLock::acquire(dir.path()).is_ok());
    }

    // =============================================================================
    // LOCALIZED REPLIES
    // =============================================================================

    #[tokio::test]
    async fn test_traditional_chinese_replies() {
        let deployment = Deployment::new(Locale::ZhTw);

        let scan = deployment.send("m1", "8801").await.unwrap();
        assert_eq!(
            scan,
            "✅ 查詢結果：\n- 編號 A1，原始箱數 10，剩餘箱數：9\n➕ 總剩餘箱數：9"
        );

        let set = deployment.send("m2", "設定 編號A1 0").await.unwrap();
        assert_eq!(set, "✅ 已設定：編號 A1 剩餘箱數為 0");

        let done = deployment.send("m3", "8801").await.unwrap();
        assert!(done.ends_with("\n✅ 下貨完畢"));

        assert_eq!(deployment.send("m4", "xyz").await.unwrap(), "❌ 查無資料");
    }
}
