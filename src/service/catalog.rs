//! Event catalogues for the random log generator.

/// Vocabulary one service draws its fabricated log lines from.
#[derive(Debug)]
pub struct EventCatalog {
    /// Event names, picked uniformly.
    pub events: &'static [&'static str],
    /// Key used in the message, e.g. `orderId`.
    pub entity_key: &'static str,
    /// Prefix of the fabricated entity id, e.g. `ORD-`.
    pub entity_prefix: &'static str,
    /// Appended to WARN lines.
    pub warn_suffix: &'static str,
    /// Appended to ERROR lines.
    pub error_suffix: &'static str,
    /// Attach a random amount to the message.
    pub with_amount: bool,
}

pub static ORDER_CATALOG: EventCatalog = EventCatalog {
    events: &[
        "Order created",
        "Order validated",
        "Inventory check completed",
        "Order confirmed",
        "Order dispatched",
        "Order delivered",
    ],
    entity_key: "orderId",
    entity_prefix: "ORD-",
    warn_suffix: " - potential delay detected",
    error_suffix: " - validation failed",
    with_amount: false,
};

pub static PAYMENT_CATALOG: EventCatalog = EventCatalog {
    events: &[
        "Payment initiated",
        "Payment authorized",
        "Payment captured",
        "Payment settled",
        "Refund processed",
        "Payment failed",
    ],
    entity_key: "paymentId",
    entity_prefix: "PAY-",
    warn_suffix: " - fraud check pending",
    error_suffix: " - insufficient funds",
    with_amount: true,
};
