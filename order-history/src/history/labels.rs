//! 展示标签表 (es-MX)
//!
//! 全部为模块级不可变 `match` 表。

use rust_decimal::prelude::*;
use shared::history::{ChangeOperation, DeliveryField, ItemChangeCategory, OrderField, SectionKind};
use shared::order::{OrderStatus, OrderType, PreparationStatus};

/// 无法解析的操作人
pub const UNKNOWN_ACTOR: &str = "Usuario desconocido";

pub const NO_VARIANT: &str = "Sin variante";
pub const NO_MODIFIERS: &str = "Ninguno";
pub const NO_CUSTOMIZATION: &str = "Ninguna";
pub const NO_NOTES: &str = "Sin notas";

/// 金额小数位
const DECIMAL_PLACES: u32 = 2;

pub fn operation_summary(operation: ChangeOperation) -> &'static str {
    match operation {
        ChangeOperation::Insert => "Pedido creado",
        ChangeOperation::Update => "Pedido actualizado",
        ChangeOperation::Delete => "Pedido eliminado",
    }
}

pub fn section_title(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Order => "Datos del pedido",
        SectionKind::DeliveryInfo => "Datos de entrega",
        SectionKind::AddedItems => "Productos agregados",
        SectionKind::ModifiedItems => "Productos modificados",
        SectionKind::RemovedItems => "Productos eliminados",
    }
}

pub fn order_status(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pendiente",
        OrderStatus::InProgress => "En progreso",
        OrderStatus::InPreparation => "En preparación",
        OrderStatus::Ready => "Listo",
        OrderStatus::InDelivery => "En camino",
        OrderStatus::Delivered => "Entregado",
        OrderStatus::Completed => "Completado",
        OrderStatus::Cancelled => "Cancelado",
    }
}

pub fn order_type(order_type: OrderType) -> &'static str {
    match order_type {
        OrderType::DineIn => "Comer aquí",
        OrderType::TakeAway => "Para llevar",
        OrderType::Delivery => "Domicilio",
    }
}

pub fn preparation_status(status: PreparationStatus) -> &'static str {
    match status {
        PreparationStatus::Pending => "Pendiente",
        PreparationStatus::InProgress => "En preparación",
        PreparationStatus::Ready => "Listo",
        PreparationStatus::Delivered => "Entregado",
        PreparationStatus::Cancelled => "Cancelado",
    }
}

pub fn order_field(field: OrderField) -> &'static str {
    match field {
        OrderField::Status => "Estado",
        OrderField::OrderType => "Tipo de pedido",
        OrderField::Notes => "Notas",
        OrderField::TableId => "Mesa",
        OrderField::CustomerId => "Cliente",
        OrderField::ScheduledAt => "Hora programada",
        OrderField::EstimatedDeliveryTime => "Tiempo estimado de entrega",
        OrderField::IsFromWhatsapp => "Pedido por WhatsApp",
    }
}

pub fn delivery_field(field: DeliveryField) -> &'static str {
    match field {
        DeliveryField::RecipientName => "Nombre del destinatario",
        DeliveryField::RecipientPhone => "Teléfono del destinatario",
        DeliveryField::FullAddress => "Dirección",
        DeliveryField::DeliveryInstructions => "Instrucciones de entrega",
    }
}

pub fn item_category(category: ItemChangeCategory) -> &'static str {
    match category {
        ItemChangeCategory::Product => "Producto",
        ItemChangeCategory::Variant => "Variante",
        ItemChangeCategory::Price => "Precio",
        ItemChangeCategory::Modifiers => "Modificadores",
        ItemChangeCategory::Customizations => "Personalización",
        ItemChangeCategory::Notes => "Notas",
        ItemChangeCategory::PreparationStatus => "Estado de preparación",
    }
}

pub fn boolean(value: bool) -> &'static str {
    if value { "Sí" } else { "No" }
}

/// 金额：前缀 + 两位小数 (四舍五入，远离零)
pub fn money(amount: f64, symbol: &str) -> String {
    let value = Decimal::from_f64(amount)
        .unwrap_or_default()
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    if value.is_sign_negative() && !value.is_zero() {
        format!("-{symbol}{:.2}", value.abs())
    } else {
        format!("{symbol}{:.2}", value.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(10.0, "$"), "$10.00");
        assert_eq!(money(12.5, "$"), "$12.50");
        assert_eq!(money(0.125, "$"), "$0.13");
        assert_eq!(money(-5.0, "$"), "-$5.00");
        assert_eq!(money(-0.001, "$"), "$0.00");
        assert_eq!(money(f64::NAN, "$"), "$0.00");
    }

    #[test]
    fn test_boolean() {
        assert_eq!(boolean(true), "Sí");
        assert_eq!(boolean(false), "No");
    }

    #[test]
    fn test_labels() {
        assert_eq!(order_status(OrderStatus::InPreparation), "En preparación");
        assert_eq!(order_type(OrderType::Delivery), "Domicilio");
        assert_eq!(section_title(SectionKind::ModifiedItems), "Productos modificados");
        assert_eq!(operation_summary(ChangeOperation::Delete), "Pedido eliminado");
    }
}
