// ═══════════════════════════════════════════════════════════════════
// Service Tests: LedgerService, SummaryService, RenderService
// ═══════════════════════════════════════════════════════════════════

use chrono::{DateTime, Local, TimeZone, Utc};
use uuid::Uuid;

use expense_tracker_core::errors::CoreError;
use expense_tracker_core::models::expense::Expense;
use expense_tracker_core::models::ledger::Ledger;
use expense_tracker_core::models::settings::Settings;
use expense_tracker_core::models::view::{DeleteHandle, ListView, SummaryView};
use expense_tracker_core::services::ledger_service::LedgerService;
use expense_tracker_core::services::render_service::{
    RenderService, EMPTY_LIST_PLACEHOLDER, EMPTY_SUMMARY_PLACEHOLDER, SUMMARY_HEADING,
};
use expense_tracker_core::services::summary_service::SummaryService;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn ledger_of(entries: &[(f64, &str, &str)]) -> Ledger {
    let service = LedgerService::new();
    let mut ledger = Ledger::new();
    for (amount, category, description) in entries {
        let expense = service.create_expense(*amount, category, description).unwrap();
        service.add(&mut ledger, expense).unwrap();
    }
    ledger
}

fn three_entries() -> Ledger {
    ledger_of(&[(10.0, "Food", "A"), (5.0, "Food", "B"), (20.0, "Transport", "C")])
}

// ═══════════════════════════════════════════════════════════════════
// LedgerService: validation
// ═══════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    #[test]
    fn parse_amount_accepts_decimals() {
        let service = LedgerService::new();
        assert_eq!(service.parse_amount("12.50").unwrap(), 12.5);
        assert_eq!(service.parse_amount("  7 ").unwrap(), 7.0);
        assert_eq!(service.parse_amount("0.01").unwrap(), 0.01);
    }

    #[test]
    fn parse_amount_rejects_empty() {
        let err = LedgerService::new().parse_amount("   ").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref m) if m.contains("required")));
    }

    #[test]
    fn parse_amount_rejects_non_numbers() {
        let service = LedgerService::new();
        for text in ["abc", "12kr", "1,5", "--3"] {
            let err = service.parse_amount(text).unwrap_err();
            assert!(err.is_invalid_input(), "{text} should be rejected");
        }
    }

    #[test]
    fn parse_amount_rejects_non_positive_and_non_finite() {
        let service = LedgerService::new();
        for text in ["0", "-5", "-0.01", "NaN", "inf", "-inf"] {
            assert!(service.parse_amount(text).is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn create_expense_trims_text_fields() {
        let e = LedgerService::new()
            .create_expense(12.5, "  Food ", "\tLunch\n")
            .unwrap();
        assert_eq!(e.category, "Food");
        assert_eq!(e.description, "Lunch");
    }

    #[test]
    fn create_expense_rejects_blank_category() {
        let err = LedgerService::new().create_expense(5.0, "   ", "Lunch").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref m) if m.contains("Category")));
    }

    #[test]
    fn create_expense_rejects_blank_description() {
        let err = LedgerService::new().create_expense(5.0, "Food", "").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref m) if m.contains("Description")));
    }

    #[test]
    fn create_expense_rejects_bad_amounts() {
        let service = LedgerService::new();
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(service.create_expense(amount, "Food", "X").is_err());
        }
    }

    #[test]
    fn add_rejects_invalid_expense_and_leaves_ledger() {
        let service = LedgerService::new();
        let mut ledger = three_entries();
        let before = ledger.clone();
        let err = service
            .add(&mut ledger, Expense::new(-1.0, "Food", "Refund"))
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(ledger, before);
    }
}

// ═══════════════════════════════════════════════════════════════════
// LedgerService: add / delete
// ═══════════════════════════════════════════════════════════════════

mod mutation {
    use super::*;

    #[test]
    fn add_appends_at_end() {
        let service = LedgerService::new();
        let mut ledger = three_entries();
        let e = Expense::new(1.5, "Coffee", "Espresso");
        service.add(&mut ledger, e.clone()).unwrap();
        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.last(), Some(&e));
    }

    #[test]
    fn add_allows_duplicates() {
        let service = LedgerService::new();
        let mut ledger = Ledger::new();
        for _ in 0..2 {
            let e = service.create_expense(3.0, "Food", "Same").unwrap();
            service.add(&mut ledger, e).unwrap();
        }
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(0).unwrap().description, ledger.get(1).unwrap().description);
    }

    #[test]
    fn delete_first_shifts_rest_down() {
        let service = LedgerService::new();
        let mut ledger = three_entries();
        let b = ledger.get(1).unwrap().clone();
        let c = ledger.get(2).unwrap().clone();

        let removed = service.delete(&mut ledger, 0).unwrap();
        assert_eq!(removed.description, "A");
        assert_eq!(ledger.expenses(), &[b, c]);
    }

    #[test]
    fn delete_middle_and_last() {
        let service = LedgerService::new();
        let mut ledger = three_entries();
        assert_eq!(service.delete(&mut ledger, 1).unwrap().description, "B");
        assert_eq!(service.delete(&mut ledger, 1).unwrap().description, "C");
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(0).unwrap().description, "A");
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let service = LedgerService::new();
        let mut ledger = three_entries();
        let before = ledger.clone();
        assert!(service.delete(&mut ledger, 3).is_none());
        assert!(service.delete(&mut ledger, usize::MAX).is_none());
        assert_eq!(ledger, before);

        let mut empty = Ledger::new();
        assert!(service.delete(&mut empty, 0).is_none());
    }

    #[test]
    fn delete_by_id() {
        let service = LedgerService::new();
        let mut ledger = three_entries();
        let id = ledger.get(2).unwrap().id;
        assert_eq!(service.delete_by_id(&mut ledger, id).unwrap().description, "C");
        assert!(service.delete_by_id(&mut ledger, id).is_none());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn delete_handle_matching_entry() {
        let service = LedgerService::new();
        let mut ledger = three_entries();
        let handle = DeleteHandle { index: 1, id: ledger.get(1).unwrap().id };
        assert_eq!(service.delete_handle(&mut ledger, handle).unwrap().description, "B");
    }

    #[test]
    fn stale_delete_handle_is_noop() {
        let service = LedgerService::new();
        let mut ledger = three_entries();
        // Handle for "C" at index 2, rendered before "A" was deleted.
        let stale = DeleteHandle { index: 2, id: ledger.get(2).unwrap().id };
        service.delete(&mut ledger, 0).unwrap();

        let before = ledger.clone();
        assert!(service.delete_handle(&mut ledger, stale).is_none());
        assert_eq!(ledger, before);

        let unknown = DeleteHandle { index: 0, id: Uuid::new_v4() };
        assert!(service.delete_handle(&mut ledger, unknown).is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// SummaryService
// ═══════════════════════════════════════════════════════════════════

mod summary_service {
    use super::*;

    #[test]
    fn empty_ledger_gives_zero_summary() {
        let s = SummaryService::new().compute_summary(&Ledger::new());
        assert!(s.is_empty());
        assert_eq!(s.count, 0);
        assert_eq!(s.total, 0.0);
        assert!(s.by_category.is_empty());
    }

    #[test]
    fn single_expense() {
        let s = SummaryService::new().compute_summary(&ledger_of(&[(12.5, "Food", "Lunch")]));
        assert_eq!(s.total, 12.5);
        assert_eq!(s.categories(), vec!["Food"]);
        assert_eq!(s.category_total("Food"), Some(12.5));
    }

    #[test]
    fn groups_in_first_occurrence_order() {
        let s = SummaryService::new().compute_summary(&three_entries());
        assert_eq!(s.count, 3);
        assert_eq!(s.total, 35.0);
        assert_eq!(s.categories(), vec!["Food", "Transport"]);
        assert_eq!(s.category_total("Food"), Some(15.0));
        assert_eq!(s.category_total("Transport"), Some(20.0));
    }

    #[test]
    fn order_is_not_alphabetical() {
        let ledger = ledger_of(&[(1.0, "Zoo", "z"), (1.0, "Apple", "a"), (1.0, "Zoo", "z2")]);
        let s = SummaryService::new().compute_summary(&ledger);
        assert_eq!(s.categories(), vec!["Zoo", "Apple"]);
        assert_eq!(s.category_total("Zoo"), Some(2.0));
    }

    #[test]
    fn categories_are_case_sensitive() {
        let ledger = ledger_of(&[(1.0, "Food", "a"), (2.0, "food", "b"), (3.0, "FOOD", "c")]);
        let s = SummaryService::new().compute_summary(&ledger);
        assert_eq!(s.by_category.len(), 3);
        assert_eq!(s.category_total("food"), Some(2.0));
    }

    #[test]
    fn recomputation_is_stable() {
        let service = SummaryService::new();
        let ledger = three_entries();
        assert_eq!(service.compute_summary(&ledger), service.compute_summary(&ledger));
    }

    #[test]
    fn total_equals_sum_of_category_totals() {
        let ledger = ledger_of(&[
            (0.1, "A", "x"),
            (0.2, "B", "x"),
            (0.3, "A", "x"),
            (99.99, "C", "x"),
        ]);
        let s = SummaryService::new().compute_summary(&ledger);
        let expected: f64 = ledger.iter().map(|e| e.amount).sum();
        assert_eq!(s.total, expected);
        let by_cat: f64 = s.by_category.iter().map(|c| c.total).sum();
        assert!((by_cat - s.total).abs() < 1e-9);
    }
}

// ═══════════════════════════════════════════════════════════════════
// RenderService: formatting
// ═══════════════════════════════════════════════════════════════════

mod formatting {
    use super::*;

    fn fmt(amount: f64) -> String {
        RenderService::new().format_amount(&Settings::default(), amount)
    }

    #[test]
    fn two_decimals_with_comma() {
        assert_eq!(fmt(12.5), "12,50\u{a0}kr");
        assert_eq!(fmt(5.0), "5,00\u{a0}kr");
        assert_eq!(fmt(0.0), "0,00\u{a0}kr");
    }

    #[test]
    fn groups_thousands_with_no_break_space() {
        assert_eq!(fmt(1234.5), "1\u{a0}234,50\u{a0}kr");
        assert_eq!(fmt(1_000_000.0), "1\u{a0}000\u{a0}000,00\u{a0}kr");
        assert_eq!(fmt(999.99), "999,99\u{a0}kr");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(fmt(0.125), "0,13\u{a0}kr");
        assert_eq!(fmt(2.499), "2,50\u{a0}kr");
        assert_eq!(fmt(0.004), "0,00\u{a0}kr");
    }

    #[test]
    fn amounts_beyond_integer_range_keep_all_digits() {
        // Above u64::MAX / 100 any cents-as-integer scheme saturates.
        assert_eq!(
            fmt(1e20),
            "100\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000,00\u{a0}kr"
        );
        assert_eq!(
            fmt(-2.5e20),
            "\u{2212}250\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000,00\u{a0}kr"
        );
    }

    #[test]
    fn large_summary_total_is_not_clamped() {
        let summary = SummaryService::new()
            .compute_summary(&ledger_of(&[(1e20, "Big", "a"), (1e20, "Big", "b")]));
        let view = RenderService::new().render_summary(&Settings::default(), &summary);
        assert_eq!(
            view.lines()[0],
            "Total Expenses: 200\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000,00\u{a0}kr"
        );
    }

    #[test]
    fn negative_uses_minus_sign() {
        assert_eq!(fmt(-12.5), "\u{2212}12,50\u{a0}kr");
        assert_eq!(fmt(-0.001), "0,00\u{a0}kr");
    }

    #[test]
    fn respects_custom_settings() {
        let settings = Settings {
            currency_symbol: "USD".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            ..Settings::default()
        };
        let out = RenderService::new().format_amount(&settings, 1234.5);
        assert_eq!(out, "1,234.50\u{a0}USD");
    }

    #[test]
    fn empty_symbol_omits_suffix() {
        let settings = Settings {
            currency_symbol: String::new(),
            ..Settings::default()
        };
        assert_eq!(RenderService::new().format_amount(&settings, 3.0), "3,00");
    }

    #[test]
    fn date_in_local_time_zone() {
        let date = at(2025, 1, 15, 12);
        let expected = date.with_timezone(&Local).format("%Y-%m-%d").to_string();
        assert_eq!(
            RenderService::new().format_date(&Settings::default(), date),
            expected
        );
    }

    #[test]
    fn invalid_date_format_falls_back() {
        let settings = Settings {
            date_format: "%!".into(),
            ..Settings::default()
        };
        let date = at(2025, 1, 15, 12);
        let expected = date.with_timezone(&Local).format("%Y-%m-%d").to_string();
        assert_eq!(RenderService::new().format_date(&settings, date), expected);
    }
}

// ═══════════════════════════════════════════════════════════════════
// RenderService: views
// ═══════════════════════════════════════════════════════════════════

mod rendering {
    use super::*;

    #[test]
    fn empty_list_renders_placeholder() {
        let view = RenderService::new().render_list(&Settings::default(), &Ledger::new());
        assert_eq!(
            view,
            ListView::Empty { placeholder: EMPTY_LIST_PLACEHOLDER.to_string() }
        );
    }

    #[test]
    fn list_line_format() {
        let service = LedgerService::new();
        let mut ledger = Ledger::new();
        let date = at(2025, 1, 15, 12);
        let expense = Expense::recorded_at(12.5, "Food", "Lunch", date);
        let id = expense.id;
        service.add(&mut ledger, expense).unwrap();

        let view = RenderService::new().render_list(&Settings::default(), &ledger);
        let items = view.items();
        assert_eq!(items.len(), 1);
        let local = date.with_timezone(&Local).format("%Y-%m-%d").to_string();
        assert_eq!(items[0].line, format!("Lunch - 12,50\u{a0}kr (Food) - {local}"));
        assert_eq!(items[0].delete, DeleteHandle { index: 0, id });
    }

    #[test]
    fn list_handles_follow_ledger_positions() {
        let ledger = three_entries();
        let view = RenderService::new().render_list(&Settings::default(), &ledger);
        for (i, item) in view.items().iter().enumerate() {
            assert_eq!(item.delete.index, i);
            assert_eq!(item.delete.id, ledger.get(i).unwrap().id);
        }
    }

    #[test]
    fn empty_summary_renders_placeholder() {
        let summary = SummaryService::new().compute_summary(&Ledger::new());
        let view = RenderService::new().render_summary(&Settings::default(), &summary);
        assert_eq!(
            view,
            SummaryView::Empty { placeholder: EMPTY_SUMMARY_PLACEHOLDER.to_string() }
        );
    }

    #[test]
    fn summary_lines() {
        let summary = SummaryService::new().compute_summary(&three_entries());
        let view = RenderService::new().render_summary(&Settings::default(), &summary);
        assert_eq!(
            view,
            SummaryView::Totals {
                total_line: "Total Expenses: 35,00\u{a0}kr".into(),
                heading: SUMMARY_HEADING.into(),
                category_lines: vec![
                    "Food: 15,00\u{a0}kr".into(),
                    "Transport: 20,00\u{a0}kr".into(),
                ],
            }
        );
    }
}
