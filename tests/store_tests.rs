// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneymesh::db;
use moneymesh::models::{Category, ColorTag, CreditCard, Status, Transaction};
use moneymesh::store::{CardStore, TransactionStore};
use rust_decimal::Decimal;

fn entry(name: &str, category: Category, amount: i64, date: &str) -> Transaction {
    Transaction {
        id: 0,
        account_name: name.to_string(),
        category,
        kind: "Bills".to_string(),
        status: Status::NotStarted,
        actual_amount: Decimal::from(amount),
        budget_amount: Decimal::ZERO,
        transaction_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        mode_of_payment: "UPI".to_string(),
        platform: "Phonepe".to_string(),
        credit_card_id: None,
    }
}

fn card(name: &str, day: i64) -> CreditCard {
    CreditCard {
        id: 0,
        name: name.to_string(),
        number: "4123 xxxx".to_string(),
        color_tag: ColorTag::Teal,
        settlement_day: day,
    }
}

#[test]
fn upsert_assigns_id_and_lists_the_record() {
    let conn = db::open_in_memory().unwrap();
    let store = TransactionStore::new(&conn);

    let saved = store
        .upsert(&entry("Groceries", Category::Expense, 250, "2025-04-02"))
        .unwrap();
    assert!(saved.id > 0);

    let all = store.list().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, saved.id);
    assert_eq!(all[0].account_name, "Groceries");
    assert_eq!(all[0].category, Category::Expense);
    assert_eq!(all[0].actual_amount, Decimal::from(250));
    assert_eq!(all[0].mode_of_payment, "UPI");
}

#[test]
fn reupsert_with_same_id_replaces_instead_of_duplicating() {
    let conn = db::open_in_memory().unwrap();
    let store = TransactionStore::new(&conn);

    let saved = store
        .upsert(&entry("Groceries", Category::Expense, 250, "2025-04-02"))
        .unwrap();
    let mut edited = saved.clone();
    edited.account_name = "Groceries (edited)".to_string();
    edited.actual_amount = Decimal::from(300);
    store.upsert(&edited).unwrap();

    let all = store.list().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, saved.id);
    assert_eq!(all[0].account_name, "Groceries (edited)");
    assert_eq!(all[0].actual_amount, Decimal::from(300));
}

#[test]
fn upsert_with_unknown_id_appends_with_a_fresh_id() {
    let conn = db::open_in_memory().unwrap();
    let store = TransactionStore::new(&conn);

    let mut stray = entry("Stray", Category::Other, 10, "2025-04-02");
    stray.id = 9999;
    let saved = store.upsert(&stray).unwrap();

    assert_ne!(saved.id, 9999);
    assert_eq!(store.list().unwrap().len(), 1);
    assert!(store.get(9999).unwrap().is_none());
    assert!(store.get(saved.id).unwrap().is_some());
}

#[test]
fn remove_is_a_noop_for_absent_ids() {
    let conn = db::open_in_memory().unwrap();
    let store = TransactionStore::new(&conn);

    store.remove(42).unwrap();
    let saved = store
        .upsert(&entry("Rent", Category::Expense, 1200, "2025-04-01"))
        .unwrap();
    store.remove(42).unwrap();
    assert_eq!(store.list().unwrap().len(), 1);

    store.remove(saved.id).unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn ids_are_never_reused_after_delete() {
    let conn = db::open_in_memory().unwrap();
    let store = TransactionStore::new(&conn);

    let first = store
        .upsert(&entry("One", Category::Other, 1, "2025-04-01"))
        .unwrap();
    store.remove(first.id).unwrap();
    let second = store
        .upsert(&entry("Two", Category::Other, 2, "2025-04-01"))
        .unwrap();
    assert!(second.id > first.id);
}

#[test]
fn removing_a_card_cascades_to_its_ledger_entries() {
    let conn = db::open_in_memory().unwrap();
    let cards = CardStore::new(&conn);
    let txs = TransactionStore::new(&conn);

    let visa = cards.upsert(&card("Visa", 13)).unwrap();
    let amex = cards.upsert(&card("Amex", 5)).unwrap();

    let mut on_visa = entry("Dinner", Category::Expense, 80, "2025-04-03");
    on_visa.credit_card_id = Some(visa.id);
    txs.upsert(&on_visa).unwrap();
    let mut on_amex = entry("Flight", Category::Expense, 400, "2025-04-04");
    on_amex.credit_card_id = Some(amex.id);
    let on_amex = txs.upsert(&on_amex).unwrap();
    let plain = txs
        .upsert(&entry("Salary", Category::Income, 5000, "2025-04-01"))
        .unwrap();

    cards.remove(visa.id).unwrap();

    assert!(cards.get(visa.id).unwrap().is_none());
    let remaining = txs.list().unwrap();
    let ids: Vec<i64> = remaining.iter().map(|t| t.id).collect();
    assert_eq!(remaining.len(), 2);
    assert!(ids.contains(&on_amex.id));
    assert!(ids.contains(&plain.id));
}

#[test]
fn removing_a_transaction_never_touches_cards() {
    let conn = db::open_in_memory().unwrap();
    let cards = CardStore::new(&conn);
    let txs = TransactionStore::new(&conn);

    let visa = cards.upsert(&card("Visa", 13)).unwrap();
    let mut on_visa = entry("Dinner", Category::Expense, 80, "2025-04-03");
    on_visa.credit_card_id = Some(visa.id);
    let on_visa = txs.upsert(&on_visa).unwrap();

    txs.remove(on_visa.id).unwrap();

    assert!(txs.list().unwrap().is_empty());
    assert_eq!(cards.list().unwrap().len(), 1);
}

#[test]
fn dangling_card_reference_is_tolerated_on_read() {
    let conn = db::open_in_memory().unwrap();
    let txs = TransactionStore::new(&conn);

    let mut stray = entry("Old card spend", Category::Expense, 60, "2025-04-03");
    stray.credit_card_id = Some(777);
    txs.upsert(&stray).unwrap();

    let all = txs.list().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].credit_card_id, Some(777));
    assert!(all[0].is_credit_card_transaction());
}

#[test]
fn card_upsert_replaces_by_id() {
    let conn = db::open_in_memory().unwrap();
    let cards = CardStore::new(&conn);

    let visa = cards.upsert(&card("Visa", 13)).unwrap();
    let mut edited = visa.clone();
    edited.settlement_day = 21;
    cards.upsert(&edited).unwrap();

    let all = cards.list().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].settlement_day, 21);
    assert_eq!(cards.id_for_name("Visa").unwrap(), Some(visa.id));
    assert_eq!(cards.id_for_name("Nope").unwrap(), None);
}
