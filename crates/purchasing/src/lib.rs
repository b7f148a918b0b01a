//! Purchasing documents: orders, recorded payments, payment-intent amounts.
//!
//! Pure data and deterministic rules only (no IO, no HTTP, no storage).

pub mod intent;
pub mod payment;
pub mod purchase;

pub use intent::{to_minor_units, PaymentIntentRequest, PAYMENT_CURRENCY};
pub use payment::{Payment, RecordPayment};
pub use purchase::{NewPurchase, Purchase};
