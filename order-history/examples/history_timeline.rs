//! Track a short order lifecycle and print its enriched history
//!
//! ```text
//! cargo run -p order-history --example history_timeline
//! ```

use std::sync::Arc;

use anyhow::Context;
use order_history::{
    Config, DbService, OrderHistoryService, SqliteHistoryStore, StaticActorDirectory,
    init_logger_with_file,
};
use shared::history::{ActorIdentity, ChangeOperation};
use shared::order::{
    CustomizationAction, DeliveryInfo, ModifierRef, OrderAggregate, OrderItemAggregate,
    OrderStatus, OrderType, PizzaCustomizationRef, PizzaCustomizationSelection, PizzaHalf,
    ProductRef, VariantRef,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let work_dir = tempfile::tempdir().context("create work dir")?;
    let config = Config::with_work_dir(work_dir.path().to_string_lossy());
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let db_path = config.db_path();
    let db = DbService::new(&db_path.to_string_lossy()).await?;

    let directory = Arc::new(StaticActorDirectory::new([ActorIdentity {
        id: "emp-1".to_string(),
        first_name: "Ana".to_string(),
        last_name: "López".to_string(),
        username: "ana".to_string(),
    }]));
    let service = OrderHistoryService::new(
        Arc::new(SqliteHistoryStore::new(db.pool.clone())),
        directory,
        &config,
    );

    let order_id = uuid::Uuid::new_v4().to_string();
    let mut order = OrderAggregate::new(&order_id);
    order.order_type = OrderType::Delivery;
    order.is_from_whatsapp = true;
    order.delivery_info = Some(DeliveryInfo {
        recipient_name: Some("Carlos Méndez".to_string()),
        full_address: Some("Av. Juárez 12, Centro".to_string()),
        ..Default::default()
    });
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
            )),
    );
    service
        .track(ChangeOperation::Insert, &order, None, "emp-1")
        .await;

    let previous = order.clone();
    order.status = OrderStatus::InPreparation;
    let item = order.items[0]
        .clone()
        .with_modifier(ModifierRef::new("m-queso", "Extra queso"));
    order.items[0] = item;
    order.items.push(OrderItemAggregate::new(
        "2",
        ProductRef::new("p-soda", "Refresco"),
        25.0,
    ));
    service
        .track(ChangeOperation::Update, &order, Some(&previous), "emp-1")
        .await;

    service
        .track(ChangeOperation::Delete, &order, None, "emp-404")
        .await;

    let page = service.get_history(&order_id, 1, config.max_page_limit).await?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
