//! SeaORM storage tests over SQLite in-memory

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{date, entitlement, print_test_header, sqlite_module};
use entitlement_service::{
    Config, EntitlementError, EntitlementPatch, EntitlementStatus, FieldMask, NewEntitlement,
    PageRequest, SearchCriteria,
};

async fn seeded_service(
    count: usize,
) -> std::sync::Arc<entitlement_service::domain::Service> {
    let (module, _db) = sqlite_module(Config::default()).await;
    let service = module.service().unwrap();
    for i in 0..count {
        service
            .create(entitlement(&format!("SKU{i}"), EntitlementStatus::Pending))
            .await
            .unwrap();
    }
    service
}

#[tokio::test]
async fn test_create_applies_defaults_and_reads_back() {
    print_test_header(
        "test_create_applies_defaults_and_reads_back",
        "create({sku}) stores PENDING, is_eval=false and nulls elsewhere",
    );
    let service = seeded_service(0).await;

    let created = service
        .create(NewEntitlement {
            sku: Some("X".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.sku.as_deref(), Some("X"));
    assert_eq!(created.status, EntitlementStatus::Pending);
    assert!(!created.is_eval);
    assert_eq!(created.quantity, None);
    assert_eq!(created.csp_id, None);
    assert_eq!(created.start_date, None);
    assert_eq!(created.end_date, None);

    let fetched = service.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_round_trips_every_column() {
    let service = seeded_service(0).await;

    let input = NewEntitlement {
        csp_id: Some("CSP-1".into()),
        quantity: Some(5),
        activation_date: Some(date("2025-01-02")),
        end_date: Some(date("2025-12-31")),
        is_eval: true,
        entitlement_version: Some("v2".into()),
        entitlement_group_id: Some("G-7".into()),
        uom: Some("SEAT".into()),
        product_type: Some("SOFTWARE".into()),
        term: Some("12M".into()),
        source_id: Some("SRC-1".into()),
        sku: Some("SKU1".into()),
        ship_date: Some(date("2025-01-03")),
        start_date: Some(date("2025-01-01")),
        status: EntitlementStatus::Fulfilled,
    };
    let created = service.create(input.clone()).await.unwrap();

    assert_eq!(created.csp_id, input.csp_id);
    assert_eq!(created.quantity, input.quantity);
    assert_eq!(created.activation_date, input.activation_date);
    assert_eq!(created.end_date, input.end_date);
    assert!(created.is_eval);
    assert_eq!(created.entitlement_version, input.entitlement_version);
    assert_eq!(created.entitlement_group_id, input.entitlement_group_id);
    assert_eq!(created.uom, input.uom);
    assert_eq!(created.product_type, input.product_type);
    assert_eq!(created.term, input.term);
    assert_eq!(created.source_id, input.source_id);
    assert_eq!(created.ship_date, input.ship_date);
    assert_eq!(created.start_date, input.start_date);
    assert_eq!(created.status, EntitlementStatus::Fulfilled);
}

#[tokio::test]
async fn test_pagination_count_matches_window() {
    print_test_header(
        "test_pagination_count_matches_window",
        "count == min(limit, max(0, total - offset)) for a grid of windows",
    );
    let total = 25u64;
    let service = seeded_service(total as usize).await;

    for limit in [1u64, 5, 10, 20, 30] {
        for offset in [0u64, 1, 10, 20, 24, 25, 40] {
            let page = service
                .get_all(PageRequest { limit, offset })
                .await
                .unwrap();

            let expected = limit.min(total.saturating_sub(offset));
            assert_eq!(page.count() as u64, expected, "limit={limit} offset={offset}");
            assert_eq!(page.total, total);
            assert_eq!(page.limit, limit);
            assert_eq!(page.offset, offset);
        }
    }
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let service = seeded_service(12).await;

    let first = service
        .get_all(PageRequest { limit: 5, offset: 0 })
        .await
        .unwrap();
    let second = service
        .get_all(PageRequest { limit: 5, offset: 5 })
        .await
        .unwrap();

    let ids: Vec<i32> = first
        .items
        .iter()
        .chain(second.items.iter())
        .map(|e| e.id)
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(ids, sorted, "pages must be ascending and disjoint");
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_search_filters_by_each_predicate() {
    let (module, _db) = sqlite_module(Config::default()).await;
    let service = module.service().unwrap();

    let fixtures = [
        ("SKU1", EntitlementStatus::Fulfilled, "CSP-A", "2025-01-01", "2025-06-30"),
        ("SKU1", EntitlementStatus::Pending, "CSP-B", "2025-03-01", "2025-12-31"),
        ("SKU2", EntitlementStatus::Fulfilled, "CSP-A", "2025-07-01", "2026-06-30"),
        ("SKU3", EntitlementStatus::Canceled, "CSP-C", "2024-01-01", "2024-12-31"),
    ];
    for (sku, status, csp, start, end) in fixtures {
        service
            .create(NewEntitlement {
                sku: Some(sku.into()),
                status,
                csp_id: Some(csp.into()),
                start_date: Some(date(start)),
                end_date: Some(date(end)),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let search = |criteria: SearchCriteria| {
        let service = service.clone();
        async move { service.search(&criteria, PageRequest::default()).await.unwrap() }
    };

    let by_status = search(SearchCriteria {
        status: Some(EntitlementStatus::Fulfilled),
        ..Default::default()
    })
    .await;
    assert_eq!(by_status.total, 2);
    assert!(by_status
        .items
        .iter()
        .all(|e| e.status == EntitlementStatus::Fulfilled));

    let by_sku = search(SearchCriteria {
        sku: Some("SKU1".into()),
        ..Default::default()
    })
    .await;
    assert_eq!(by_sku.total, 2);

    let by_csp = search(SearchCriteria {
        csp_id: Some("CSP-A".into()),
        ..Default::default()
    })
    .await;
    assert_eq!(by_csp.total, 2);

    // Bounds are inclusive
    let by_start = search(SearchCriteria {
        start_date_from: Some(date("2025-01-01")),
        start_date_to: Some(date("2025-03-01")),
        ..Default::default()
    })
    .await;
    assert_eq!(by_start.total, 2);

    let by_end = search(SearchCriteria {
        end_date_from: Some(date("2025-01-01")),
        end_date_to: Some(date("2025-12-31")),
        ..Default::default()
    })
    .await;
    assert_eq!(by_end.total, 2);

    let combined = search(SearchCriteria {
        sku: Some("SKU1".into()),
        status: Some(EntitlementStatus::Fulfilled),
        csp_id: Some("CSP-A".into()),
        ..Default::default()
    })
    .await;
    assert_eq!(combined.total, 1);
    assert_eq!(combined.count(), 1);

    let nothing = search(SearchCriteria {
        sku: Some("SKU3".into()),
        status: Some(EntitlementStatus::Fulfilled),
        ..Default::default()
    })
    .await;
    assert_eq!(nothing.total, 0);
    assert!(nothing.items.is_empty());
}

#[tokio::test]
async fn test_adding_criteria_never_widens_results() {
    print_test_header(
        "test_adding_criteria_never_widens_results",
        "search(C2).total <= search(C1).total whenever C2 extends C1",
    );
    let (module, _db) = sqlite_module(Config::default()).await;
    let service = module.service().unwrap();

    for i in 0..30 {
        let status = EntitlementStatus::ALL[i % 3];
        service
            .create(NewEntitlement {
                sku: Some(format!("SKU{}", i % 4)),
                status,
                csp_id: Some(format!("CSP-{}", i % 5)),
                start_date: Some(date("2025-01-01") + chrono::Days::new(i as u64 * 10)),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let steps = [
        SearchCriteria::default(),
        SearchCriteria {
            sku: Some("SKU1".into()),
            ..Default::default()
        },
        SearchCriteria {
            sku: Some("SKU1".into()),
            status: Some(EntitlementStatus::Fulfilled),
            ..Default::default()
        },
        SearchCriteria {
            sku: Some("SKU1".into()),
            status: Some(EntitlementStatus::Fulfilled),
            start_date_from: Some(date("2025-03-01")),
            ..Default::default()
        },
        SearchCriteria {
            sku: Some("SKU1".into()),
            status: Some(EntitlementStatus::Fulfilled),
            start_date_from: Some(date("2025-03-01")),
            csp_id: Some("CSP-0".into()),
            ..Default::default()
        },
    ];

    let mut previous = u64::MAX;
    for criteria in &steps {
        let page = service.search(criteria, PageRequest::default()).await.unwrap();
        assert!(page.total <= previous, "{criteria:?} widened the result");
        previous = page.total;
    }
}

#[tokio::test]
async fn test_masked_update_touches_only_masked_fields() {
    let service = seeded_service(1).await;
    let before = service.get_all(PageRequest::default()).await.unwrap().items[0].clone();

    let patch = EntitlementPatch {
        status: Some(EntitlementStatus::Canceled),
        sku: Some(Some("ignored".into())),
        quantity: Some(Some(9)),
        ..Default::default()
    };
    let mask = FieldMask::parse("status").unwrap();
    let after = service
        .update(before.id, &patch, Some(&mask))
        .await
        .unwrap();

    assert_eq!(after.status, EntitlementStatus::Canceled);
    assert_eq!(after.sku, before.sku);
    assert_eq!(after.quantity, before.quantity);
}

#[tokio::test]
async fn test_update_explicit_null_clears_column() {
    let (module, _db) = sqlite_module(Config::default()).await;
    let service = module.service().unwrap();
    let created = service
        .create(NewEntitlement {
            sku: Some("SKU1".into()),
            quantity: Some(5),
            end_date: Some(date("2025-12-31")),
            ..Default::default()
        })
        .await
        .unwrap();

    let patch = EntitlementPatch {
        quantity: Some(None),
        end_date: Some(None),
        is_eval: Some(true),
        ..Default::default()
    };
    let updated = service.update(created.id, &patch, None).await.unwrap();

    assert_eq!(updated.quantity, None);
    assert_eq!(updated.end_date, None);
    assert!(updated.is_eval);
    assert_eq!(updated.sku.as_deref(), Some("SKU1"));
}

#[tokio::test]
async fn test_empty_update_leaves_record_unchanged() {
    let service = seeded_service(1).await;
    let before = service.get_all(PageRequest::default()).await.unwrap().items[0].clone();

    let returned = service
        .update(before.id, &EntitlementPatch::default(), FieldMask::parse("sku,status").as_ref())
        .await
        .unwrap();

    assert_eq!(returned, before);
    assert_eq!(service.get_by_id(before.id).await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_removes_record() {
    let service = seeded_service(3).await;
    let victim = service.get_all(PageRequest::default()).await.unwrap().items[1].clone();

    service.delete(victim.id).await.unwrap();

    assert!(matches!(
        service.get_by_id(victim.id).await,
        Err(EntitlementError::NotFound { .. })
    ));
    assert_eq!(service.get_all(PageRequest::default()).await.unwrap().total, 2);

    // Second delete reports the same not-found kind
    assert!(matches!(
        service.delete(victim.id).await,
        Err(EntitlementError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let (module, db) = sqlite_module(Config::default()).await;
    module.migrate(&db).await.unwrap();

    let service = module.service().unwrap();
    service.create(entitlement("SKU1", EntitlementStatus::Pending)).await.unwrap();
    assert_eq!(service.get_all(PageRequest::default()).await.unwrap().total, 1);
}
