//! End-to-end order history flow over the memory and SQLite stores

use std::sync::Arc;

use async_trait::async_trait;
use order_history::history::ActorLookupError;
use order_history::{
    ActorDirectory, Config, DbService, HistoryStore, MemoryHistoryStore, OrderHistoryService,
    SqliteHistoryStore, StaticActorDirectory, TrackOutcome,
};
use shared::history::{
    ActorIdentity, ChangeOperation, FormattedEntry, ItemChangeCategory, SectionKind,
};
use shared::order::{
    CustomizationAction, ModifierRef, OrderAggregate, OrderItemAggregate, OrderType,
    PizzaCustomizationRef, PizzaCustomizationSelection, PizzaHalf, ProductRef, VariantRef,
};

fn actor(id: &str, first: &str, last: &str) -> ActorIdentity {
    ActorIdentity {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        username: first.to_lowercase(),
    }
}

fn pizza_order(id: &str) -> OrderAggregate {
    let mut order = OrderAggregate::new(id);
    order.table_id = Some("Mesa 4".to_string());
    order.items.push(
        OrderItemAggregate::new("1", ProductRef::new("p-pizza", "Pizza"), 189.0)
            .with_variant(VariantRef::new("v-large", "Pizza Grande"))
            .with_customization(PizzaCustomizationSelection::resolved(
                PizzaHalf::Half1,
                CustomizationAction::Add,
                PizzaCustomizationRef::flavor("c-haw", "Hawaiana"),
            ))
            .with_customization(PizzaCustomizationSelection::resolved(
                PizzaHalf::Half2,
                CustomizationAction::Add,
                PizzaCustomizationRef::flavor("c-mex", "Mexicana"),
            ))
            .with_customization(PizzaCustomizationSelection::resolved(
                PizzaHalf::Half2,
                CustomizationAction::Add,
                PizzaCustomizationRef::ingredient("c-chile", "Chile"),
            )),
    );
    order
}

fn service(
    store: Arc<dyn HistoryStore>,
    directory: Arc<dyn ActorDirectory>,
) -> OrderHistoryService {
    OrderHistoryService::new(store, directory, &Config::default())
}

fn section_kinds(entry: &shared::history::EnrichedChangeRecord) -> Vec<SectionKind> {
    entry
        .formatted_changes
        .sections
        .iter()
        .map(|s| s.kind)
        .collect()
}

#[tokio::test]
async fn test_modifier_added_and_item_added_end_to_end() {
    let store = Arc::new(MemoryHistoryStore::new());
    let directory = Arc::new(StaticActorDirectory::new([actor("u-1", "Ana", "López")]));
    let service = service(store, directory);

    let previous = pizza_order("o-1");
    let mut current = previous.clone();
    let item = current.items[0]
        .clone()
        .with_modifier(ModifierRef::new("m-queso", "Extra queso"));
    current.items[0] = item;
    current.items.push(OrderItemAggregate::new(
        "2",
        ProductRef::new("p-soda", "Refresco"),
        25.0,
    ));

    let outcome = service
        .track(ChangeOperation::Update, &current, Some(&previous), "u-1")
        .await;
    assert!(matches!(outcome, TrackOutcome::Recorded { .. }));

    let page = service.get_history("o-1", 1, 20).await.unwrap();
    assert_eq!(page.total_count, 1);
    let entry = &page.items[0];
    assert_eq!(entry.record.operation, ChangeOperation::Update);
    assert_eq!(entry.actor.name, "Ana López");

    let diff = entry.record.diff.as_ref().unwrap();
    let modified: Vec<&str> = diff.items.modified.iter().map(|m| m.id.as_str()).collect();
    let added: Vec<&str> = diff.items.added.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(modified, vec!["1"]);
    assert_eq!(added, vec!["2"]);
    assert!(diff.items.modified[0].changes.contains(&ItemChangeCategory::Modifiers));
    assert!(diff.order.is_empty());

    assert_eq!(
        section_kinds(entry),
        vec![SectionKind::AddedItems, SectionKind::ModifiedItems]
    );
    let added_section = entry
        .formatted_changes
        .section(SectionKind::AddedItems)
        .unwrap();
    assert_eq!(added_section.title, "Productos agregados");
    assert_eq!(
        added_section.entries[0],
        FormattedEntry::Item {
            id: "2".to_string(),
            description: "Refresco".to_string(),
        }
    );

    let modified_section = entry
        .formatted_changes
        .section(SectionKind::ModifiedItems)
        .unwrap();
    assert_eq!(modified_section.title, "Productos modificados");
    match &modified_section.entries[0] {
        FormattedEntry::ModifiedItem { after, changes, .. } => {
            assert_eq!(
                after,
                "Pizza Grande - Modificadores: Extra queso (Hawaiana / Mexicana - con Chile)"
            );
            assert_eq!(changes, &vec!["Modificadores: Ninguno → Extra queso".to_string()]);
        }
        other => panic!("unexpected entry {other:?}"),
    }
}

#[tokio::test]
async fn test_insert_record_lists_every_populated_field() {
    let store = Arc::new(MemoryHistoryStore::new());
    let service = service(store, Arc::new(StaticActorDirectory::default()));

    let mut order = pizza_order("o-1");
    order.order_type = OrderType::Delivery;
    order.is_from_whatsapp = true;
    service
        .track(ChangeOperation::Insert, &order, None, "u-1")
        .await;

    let page = service.get_history("o-1", 1, 20).await.unwrap();
    let entry = &page.items[0];
    assert_eq!(entry.formatted_changes.summary, "Pedido creado");

    let diff = entry.record.diff.as_ref().unwrap();
    assert_eq!(diff.items.added, entry.record.snapshot.items);

    let order_section = entry.formatted_changes.section(SectionKind::Order).unwrap();
    let texts: Vec<&str> = order_section
        .entries
        .iter()
        .filter_map(|e| match e {
            FormattedEntry::Field { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        texts,
        vec![
            "Se agregó Estado: Pendiente",
            "Se agregó Tipo de pedido: Domicilio",
            "Se agregó Mesa: Mesa 4",
            "Se agregó Pedido por WhatsApp: Sí",
        ]
    );
}

#[tokio::test]
async fn test_pagination_is_isolated_per_order() {
    let store = Arc::new(MemoryHistoryStore::new());
    let service = service(store, Arc::new(StaticActorDirectory::default()));

    for order_id in ["o-a", "o-b"] {
        let mut current = pizza_order(order_id);
        service
            .track(ChangeOperation::Insert, &current, None, "u-1")
            .await;
        for round in 0..4 {
            let previous = current.clone();
            current.notes = Some(format!("{order_id} ronda {round}"));
            service
                .track(ChangeOperation::Update, &current, Some(&previous), "u-1")
                .await;
        }
    }

    let first = service.get_history("o-a", 1, 2).await.unwrap();
    let second = service.get_history("o-a", 2, 2).await.unwrap();
    let third = service.get_history("o-a", 3, 2).await.unwrap();
    assert_eq!(first.total_count, 5);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.items.len(), 2);
    assert_eq!(second.items.len(), 2);
    assert_eq!(third.items.len(), 1);

    let all = [first.items, second.items, third.items].concat();
    assert!(all.iter().all(|r| r.record.order_id == "o-a"));
    assert_eq!(all[0].record.operation, ChangeOperation::Insert);
    assert!(all.windows(2).all(|w| w[0].record.timestamp <= w[1].record.timestamp));

    let empty = service.get_history("o-missing", 1, 10).await.unwrap();
    assert_eq!(empty.total_count, 0);
    assert!(empty.items.is_empty());
}

struct FlakyDirectory {
    inner: StaticActorDirectory,
}

#[async_trait]
impl ActorDirectory for FlakyDirectory {
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<ActorIdentity>, ActorLookupError> {
        // "u-gone" was deleted from the directory
        let known: Vec<String> = ids.iter().filter(|id| *id != "u-gone").cloned().collect();
        self.inner.find_by_ids(&known).await
    }
}

#[tokio::test]
async fn test_one_unresolvable_actor_does_not_break_the_page() {
    let store = Arc::new(MemoryHistoryStore::new());
    let directory = Arc::new(FlakyDirectory {
        inner: StaticActorDirectory::new([
            actor("u-1", "Ana", "López"),
            actor("u-gone", "Eva", "Ruiz"),
        ]),
    });
    let service = service(store, directory);

    let mut current = pizza_order("o-1");
    service
        .track(ChangeOperation::Insert, &current, None, "u-1")
        .await;
    let previous = current.clone();
    current.notes = Some("sin cebolla".to_string());
    service
        .track(ChangeOperation::Update, &current, Some(&previous), "u-gone")
        .await;
    let previous = current.clone();
    current.notes = None;
    service
        .track(ChangeOperation::Update, &current, Some(&previous), "u-1")
        .await;

    let page = service.get_history("o-1", 1, 10).await.unwrap();
    assert_eq!(page.items.len(), 3);
    let names: Vec<&str> = page.items.iter().map(|r| r.actor.name.as_str()).collect();
    assert_eq!(names, vec!["Ana López", "Usuario desconocido", "Ana López"]);
    assert!(!page.items[1].actor.resolved);
}

#[tokio::test]
async fn test_sqlite_store_round_trips_the_full_flow() {
    let db = DbService::in_memory().await.unwrap();
    let store = Arc::new(SqliteHistoryStore::new(db.pool.clone()));
    let directory = Arc::new(StaticActorDirectory::new([actor("u-1", "Ana", "López")]));
    let service = service(store, directory);

    let created = pizza_order("o-1");
    service
        .track(ChangeOperation::Insert, &created, None, "u-1")
        .await;
    let mut updated = created.clone();
    updated.items[0].final_price = 209.0;
    let outcome = service
        .track(ChangeOperation::Update, &updated, Some(&created), "u-1")
        .await;
    assert!(outcome.record_id().is_some());
    service
        .track(ChangeOperation::Delete, &updated, None, "u-1")
        .await;

    let page = service.get_history("o-1", 1, 50).await.unwrap();
    assert_eq!(page.total_count, 3);

    let update = &page.items[1];
    assert_eq!(Some(update.record.id), outcome.record_id());
    let modified = update
        .formatted_changes
        .section(SectionKind::ModifiedItems)
        .unwrap();
    match &modified.entries[0] {
        FormattedEntry::ModifiedItem { changes, .. } => {
            assert_eq!(changes, &vec!["Precio: $189.00 → $209.00".to_string()]);
        }
        other => panic!("unexpected entry {other:?}"),
    }

    let delete = &page.items[2];
    assert_eq!(delete.formatted_changes.summary, "Pedido eliminado");
    assert_eq!(
        section_kinds(delete),
        vec![SectionKind::Order, SectionKind::RemovedItems]
    );
}

#[tokio::test]
async fn test_file_backed_history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order_history.db");
    let path = path.to_str().unwrap();

    {
        let db = DbService::new(path).await.unwrap();
        let service = service(
            Arc::new(SqliteHistoryStore::new(db.pool.clone())),
            Arc::new(StaticActorDirectory::default()),
        );
        service
            .track(ChangeOperation::Insert, &pizza_order("o-1"), None, "u-1")
            .await;
        db.pool.close().await;
    }

    let db = DbService::new(path).await.unwrap();
    let service = service(
        Arc::new(SqliteHistoryStore::new(db.pool.clone())),
        Arc::new(StaticActorDirectory::default()),
    );
    let page = service.get_history("o-1", 1, 10).await.unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].actor.name, "Usuario desconocido");
}
