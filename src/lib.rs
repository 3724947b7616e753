//! BillBuddy invoice pipeline
//!
//! Compose a line-itemized invoice, compute its totals, persist append-only
//! snapshots, render a PDF artifact, store it durably and dispatch the link
//! to the customer over messaging and email.
//!
//! The crate owns no wire protocol or UI. An embedding application provides
//! the authenticated session, drives the use cases in [`application`] and
//! wires the ports in [`domain::invoice::ports`] to the adapters in
//! [`infrastructure`].

pub mod application;
pub mod domain;
pub mod infrastructure;
