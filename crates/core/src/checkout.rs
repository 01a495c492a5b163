//! Order assembly.
//!
//! Turns the current cart, joined with live product data, plus validated
//! customer details into an [`OrderDraft`]: the exact rows to persist for the
//! order and its items. Item drafts snapshot product name, image, and unit
//! price by value so historical orders stay stable when the catalog changes
//! or a product is deleted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{self, PricedLine, ShippingQuote};
use crate::types::{Email, EmailError, OrderStatus, ProductId};

/// A cart line resolved against the live catalog at checkout time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: Option<String>,
    pub unit_price: Decimal,
    pub shipping_price: Option<Decimal>,
    pub quantity: u32,
    pub size: Option<String>,
}

impl ResolvedLine {
    fn priced(&self) -> PricedLine {
        PricedLine {
            quantity: self.quantity,
            unit_price: self.unit_price,
            shipping_price: self.shipping_price,
        }
    }
}

/// A postal address captured on an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Customer input collected by the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub shipping_address: Address,
    /// Defaults to the shipping address when unspecified.
    pub billing_address: Option<Address>,
    pub notes: Option<String>,
}

/// Largest quantity a single order line may carry; orders persist quantities
/// as 32-bit signed integers.
pub const MAX_LINE_QUANTITY: u32 = i32::MAX.unsigned_abs();

/// Validation failures caught before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("line for product {product_id} has quantity 0")]
    ZeroQuantity { product_id: ProductId },
    #[error("line for product {product_id} exceeds the maximum quantity")]
    QuantityTooLarge { product_id: ProductId },
}

/// One order item row to persist, snapshotted by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItemDraft {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: Option<String>,
    pub quantity: u32,
    pub size: Option<String>,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// The order row and item rows to persist, with totals already computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub status: OrderStatus,
    pub customer_email: Email,
    pub customer_name: String,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub notes: Option<String>,
    pub subtotal: Decimal,
    pub shipping: ShippingQuote,
    pub items: Vec<OrderItemDraft>,
}

impl OrderDraft {
    /// `subtotal + shipping_cost`; never persisted inconsistently.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal + self.shipping.cost
    }
}

/// Validate checkout input and assemble the order to persist.
///
/// The shipping address's name fields default from the customer's name when
/// left blank; the billing address defaults to the shipping address.
///
/// # Errors
///
/// Returns [`CheckoutError`] when the cart is empty, the email is invalid, or
/// a required address field is missing. Nothing is partially assembled on
/// error.
pub fn build_order_draft(
    lines: &[ResolvedLine],
    details: &CustomerDetails,
) -> Result<OrderDraft, CheckoutError> {
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    for line in lines {
        if line.quantity == 0 {
            return Err(CheckoutError::ZeroQuantity {
                product_id: line.product_id,
            });
        }
        if line.quantity > MAX_LINE_QUANTITY {
            return Err(CheckoutError::QuantityTooLarge {
                product_id: line.product_id,
            });
        }
    }

    let email = Email::parse(details.email.trim())?;
    if details.shipping_address.address1.trim().is_empty() {
        return Err(CheckoutError::MissingField("address1"));
    }
    if details.shipping_address.city.trim().is_empty() {
        return Err(CheckoutError::MissingField("city"));
    }

    let mut shipping_address = details.shipping_address.clone();
    if shipping_address.first_name.trim().is_empty() {
        shipping_address.first_name = details.first_name.clone();
    }
    if shipping_address.last_name.trim().is_empty() {
        shipping_address.last_name = details.last_name.clone();
    }
    let billing_address = details
        .billing_address
        .clone()
        .unwrap_or_else(|| shipping_address.clone());

    let priced: Vec<PricedLine> = lines.iter().map(ResolvedLine::priced).collect();
    let subtotal = pricing::subtotal(&priced);
    let shipping = pricing::compute_shipping(&priced, subtotal);

    let items = lines
        .iter()
        .map(|line| OrderItemDraft {
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            product_image: line.product_image.clone(),
            quantity: line.quantity,
            size: line.size.clone(),
            unit_price: line.unit_price,
            total_price: line.unit_price * Decimal::from(line.quantity),
        })
        .collect();

    Ok(OrderDraft {
        status: OrderStatus::Pending,
        customer_email: email,
        customer_name: format!("{} {}", details.first_name.trim(), details.last_name.trim())
            .trim()
            .to_owned(),
        shipping_address,
        billing_address,
        notes: details.notes.clone(),
        subtotal,
        shipping,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(id: i32, price: i64, quantity: u32, size: Option<&str>) -> ResolvedLine {
        ResolvedLine {
            product_id: ProductId::new(id),
            product_name: format!("Product {id}"),
            product_image: Some(format!("/img/{id}.jpg")),
            unit_price: Decimal::new(price, 0),
            shipping_price: None,
            quantity,
            size: size.map(str::to_owned),
        }
    }

    fn details() -> CustomerDetails {
        CustomerDetails {
            email: "buyer@example.com".into(),
            first_name: "Nour".into(),
            last_name: "Hassan".into(),
            shipping_address: Address {
                address1: "12 Tahrir St".into(),
                city: "Cairo".into(),
                state: "C".into(),
                zip: "11511".into(),
                country: "EG".into(),
                ..Address::default()
            },
            billing_address: None,
            notes: None,
        }
    }

    #[test]
    fn two_lines_become_one_order_with_two_items() {
        let lines = [resolved(1, 500, 2, Some("M")), resolved(2, 750, 1, None)];
        let draft = build_order_draft(&lines, &details()).expect("valid draft");

        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.subtotal, Decimal::new(1750, 0));
        assert_eq!(draft.total(), draft.subtotal + draft.shipping.cost);
        assert_eq!(draft.status, OrderStatus::Pending);
        assert_eq!(
            draft.subtotal,
            draft
                .items
                .iter()
                .map(|item| item.unit_price * Decimal::from(item.quantity))
                .sum()
        );
    }

    #[test]
    fn item_snapshots_are_by_value() {
        let lines = [resolved(1, 500, 2, Some("M"))];
        let draft = build_order_draft(&lines, &details()).expect("valid draft");

        let item = &draft.items[0];
        assert_eq!(item.product_name, "Product 1");
        assert_eq!(item.product_image.as_deref(), Some("/img/1.jpg"));
        assert_eq!(item.unit_price, Decimal::new(500, 0));
        assert_eq!(item.total_price, Decimal::new(1000, 0));
        assert_eq!(item.size.as_deref(), Some("M"));
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert_eq!(
            build_order_draft(&[], &details()),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let lines = [resolved(1, 100, 1, None)];

        let mut no_email = details();
        no_email.email = String::new();
        assert!(matches!(
            build_order_draft(&lines, &no_email),
            Err(CheckoutError::InvalidEmail(_))
        ));

        let mut no_address = details();
        no_address.shipping_address.address1 = "  ".into();
        assert_eq!(
            build_order_draft(&lines, &no_address),
            Err(CheckoutError::MissingField("address1"))
        );

        let mut no_city = details();
        no_city.shipping_address.city = String::new();
        assert_eq!(
            build_order_draft(&lines, &no_city),
            Err(CheckoutError::MissingField("city"))
        );
    }

    #[test]
    fn out_of_range_quantities_are_rejected() {
        let zero = [resolved(1, 100, 0, None)];
        assert_eq!(
            build_order_draft(&zero, &details()),
            Err(CheckoutError::ZeroQuantity {
                product_id: ProductId::new(1)
            })
        );

        let oversized = [resolved(2, 100, MAX_LINE_QUANTITY + 1, None)];
        assert_eq!(
            build_order_draft(&oversized, &details()),
            Err(CheckoutError::QuantityTooLarge {
                product_id: ProductId::new(2)
            })
        );

        let at_limit = [resolved(3, 100, MAX_LINE_QUANTITY, None)];
        assert!(build_order_draft(&at_limit, &details()).is_ok());
    }

    #[test]
    fn billing_defaults_to_shipping() {
        let lines = [resolved(1, 100, 1, None)];
        let draft = build_order_draft(&lines, &details()).expect("valid draft");
        assert_eq!(draft.billing_address, draft.shipping_address);

        let mut with_billing = details();
        with_billing.billing_address = Some(Address {
            address1: "9 Nile Corniche".into(),
            city: "Giza".into(),
            ..Address::default()
        });
        let draft = build_order_draft(&lines, &with_billing).expect("valid draft");
        assert_ne!(draft.billing_address, draft.shipping_address);
        assert_eq!(draft.billing_address.address1, "9 Nile Corniche");
    }

    #[test]
    fn address_name_defaults_from_customer() {
        let lines = [resolved(1, 100, 1, None)];
        let draft = build_order_draft(&lines, &details()).expect("valid draft");
        assert_eq!(draft.shipping_address.first_name, "Nour");
        assert_eq!(draft.shipping_address.last_name, "Hassan");
        assert_eq!(draft.customer_name, "Nour Hassan");
    }

    #[test]
    fn address_uses_camel_case_on_the_wire() {
        let address = details().shipping_address;
        let json = serde_json::to_value(&address).expect("serialize");
        assert_eq!(json["address1"], "12 Tahrir St");
        assert_eq!(json["firstName"], "");
        // Optional fields are omitted entirely
        assert!(json.get("address2").is_none());
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn free_shipping_above_threshold() {
        let lines = [resolved(1, 3000, 1, None)];
        let draft = build_order_draft(&lines, &details()).expect("valid draft");
        assert_eq!(draft.shipping.cost, Decimal::ZERO);
        assert_eq!(draft.total(), Decimal::new(3000, 0));
    }

    #[test]
    fn doubled_shipping_below_threshold_with_many_items() {
        // 6 units at 100 each: subtotal 600, base shipping 6 x 299, doubled
        let lines = [resolved(1, 100, 6, Some("L"))];
        let draft = build_order_draft(&lines, &details()).expect("valid draft");
        assert!(draft.shipping.is_doubled);
        assert_eq!(
            draft.shipping.cost,
            Decimal::new(6 * 299 * 2, 0)
        );
    }
}
