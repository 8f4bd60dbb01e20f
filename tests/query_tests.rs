// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneymesh::models::{Category, Status, Transaction};
use moneymesh::query::{
    SortColumn, SortDirection, SortState, TransactionFilter, month_window, sort_transactions,
};
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

#[test]
fn month_window_uses_calendar_months() {
    let txs = vec![
        entry("March 31st", Category::Expense, 10, "2025-03-31"),
        entry("April 1st", Category::Expense, 20, "2025-04-01"),
        entry("April 30th", Category::Expense, 30, "2025-04-30"),
        entry("May 1st", Category::Expense, 40, "2025-05-01"),
        entry("April last year", Category::Expense, 50, "2024-04-15"),
    ];
    let windowed = month_window(&txs, 4, 2025);
    let names: Vec<&str> = windowed.iter().map(|t| t.account_name.as_str()).collect();
    assert_eq!(names, vec!["April 1st", "April 30th"]);
}

#[test]
fn filters_compose_with_and_semantics() {
    let mut done = entry("Netflix", Category::Expense, 15, "2025-04-02");
    done.status = Status::Done;
    let txs = vec![
        done,
        entry("Netflix refund", Category::Income, 15, "2025-04-03"),
        entry("Rent", Category::Expense, 1200, "2025-04-01"),
    ];

    let filter = TransactionFilter {
        category: Some(Category::Expense),
        status: Some(Status::Done),
        search: Some("netflix".to_string()),
    };
    let hits = filter.apply(&txs);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].account_name, "Netflix");
}

#[test]
fn absent_predicates_are_always_true() {
    let txs = vec![
        entry("Rent", Category::Expense, 1200, "2025-04-01"),
        entry("Salary", Category::Income, 5000, "2025-04-01"),
    ];
    assert_eq!(TransactionFilter::default().apply(&txs).len(), 2);
}

#[test]
fn search_is_case_insensitive_substring() {
    let txs = vec![
        entry("Electricity Bill", Category::Expense, 90, "2025-04-05"),
        entry("Water bill", Category::Expense, 30, "2025-04-06"),
        entry("Rent", Category::Expense, 1200, "2025-04-01"),
    ];
    let filter = TransactionFilter {
        search: Some("BILL".to_string()),
        ..Default::default()
    };
    assert_eq!(filter.apply(&txs).len(), 2);
}

#[test]
fn amounts_sort_numerically_not_lexically() {
    let mut txs = vec![
        entry("Ten", Category::Expense, 10, "2025-04-01"),
        entry("Nine", Category::Expense, 9, "2025-04-01"),
        entry("Hundred", Category::Expense, 100, "2025-04-01"),
    ];
    let mut sort = SortState::default();
    sort.toggle(SortColumn::Actual);
    sort_transactions(&mut txs, &sort);
    let names: Vec<&str> = txs.iter().map(|t| t.account_name.as_str()).collect();
    assert_eq!(names, vec!["Nine", "Ten", "Hundred"]);
}

#[test]
fn dates_sort_by_calendar_value() {
    let mut txs = vec![
        entry("B", Category::Expense, 1, "2025-04-10"),
        entry("A", Category::Expense, 1, "2025-03-28"),
        entry("C", Category::Expense, 1, "2025-04-02"),
    ];
    let sort = SortState {
        column: Some(SortColumn::Date),
        direction: SortDirection::Descending,
    };
    sort_transactions(&mut txs, &sort);
    let names: Vec<&str> = txs.iter().map(|t| t.account_name.as_str()).collect();
    assert_eq!(names, vec!["B", "C", "A"]);
}

#[test]
fn sort_is_stable_and_idempotent() {
    let mut txs = vec![
        entry("first", Category::Expense, 10, "2025-04-02"),
        entry("second", Category::Income, 20, "2025-04-02"),
        entry("third", Category::Other, 30, "2025-04-02"),
        entry("earlier", Category::Expense, 5, "2025-04-01"),
    ];
    let sort = SortState {
        column: Some(SortColumn::Date),
        direction: SortDirection::Ascending,
    };
    sort_transactions(&mut txs, &sort);
    let once: Vec<String> = txs.iter().map(|t| t.account_name.clone()).collect();
    // Ties on 04-02 keep their pre-sort relative order.
    assert_eq!(once, vec!["earlier", "first", "second", "third"]);

    sort_transactions(&mut txs, &sort);
    let twice: Vec<String> = txs.iter().map(|t| t.account_name.clone()).collect();
    assert_eq!(once, twice);
}

#[test]
fn toggling_flips_direction_then_resets_on_new_column() {
    let mut sort = SortState::default();
    sort.toggle(SortColumn::Date);
    assert_eq!(sort.column, Some(SortColumn::Date));
    assert_eq!(sort.direction, SortDirection::Ascending);

    sort.toggle(SortColumn::Date);
    assert_eq!(sort.direction, SortDirection::Descending);

    sort.toggle(SortColumn::Date);
    assert_eq!(sort.direction, SortDirection::Ascending);

    sort.toggle(SortColumn::Date);
    sort.toggle(SortColumn::AccountName);
    assert_eq!(sort.column, Some(SortColumn::AccountName));
    assert_eq!(sort.direction, SortDirection::Ascending);
}

#[test]
fn unsorted_state_preserves_input_order() {
    let mut txs = vec![
        entry("z", Category::Expense, 1, "2025-04-09"),
        entry("a", Category::Expense, 1, "2025-04-01"),
    ];
    sort_transactions(&mut txs, &SortState::default());
    assert_eq!(txs[0].account_name, "z");
}

mod cli_rows {
    use moneymesh::db;
    use moneymesh::store::TransactionStore;
    use moneymesh::{cli, commands::transactions};

    #[test]
    fn tx_list_respects_filters_sort_and_limit() {
        let conn = db::open_in_memory().unwrap();
        let store = TransactionStore::new(&conn);
        store
            .upsert(&super::entry("Rent", super::Category::Expense, 1200, "2025-04-01"))
            .unwrap();
        store
            .upsert(&super::entry("Groceries", super::Category::Expense, 250, "2025-04-07"))
            .unwrap();
        store
            .upsert(&super::entry("Salary", super::Category::Income, 5000, "2025-04-05"))
            .unwrap();
        store
            .upsert(&super::entry("March rent", super::Category::Expense, 1200, "2025-03-01"))
            .unwrap();

        let matches = cli::build_cli().get_matches_from([
            "moneymesh", "tx", "list", "--month", "4", "--year", "2025", "--category", "Expense",
            "--sort", "date", "--desc", "--limit", "1",
        ]);
        let Some(("tx", tx_m)) = matches.subcommand() else {
            panic!("no tx subcommand");
        };
        let Some(("list", list_m)) = tx_m.subcommand() else {
            panic!("no list subcommand");
        };
        let rows = transactions::query_rows(&conn, list_m).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Groceries");
        assert_eq!(rows[0].date, "2025-04-07");
        assert_eq!(rows[0].card, "None");
    }
}
