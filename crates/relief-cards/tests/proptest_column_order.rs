use proptest::prelude::*;
use proptest::test_runner::Config;
use relief_cards::cards::DiscountRow;
use relief_cards::{map_row, ColumnMap};
use relief_model::{Cell, LinkedText, RawRow};

const LABELS: [&str; 6] = ["Company", "Discount", "Code", "Details", "Expiration", "Notes"];

fn values() -> [&'static str; 6] {
    ["Acme", "20% off", "RELIEF20", "Online only", "3/7/24", "Stack with coupons"]
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn column_order_does_not_change_the_mapped_row(
        order in Just((0..LABELS.len()).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let header: RawRow = order.iter().map(|&i| Some(Cell::text(LABELS[i]))).collect();
        let row: RawRow = order.iter().map(|&i| Some(Cell::text(values()[i]))).collect();
        let columns = ColumnMap::from_header(&header);

        let mapped = map_row(&DiscountRow::shape(), &row, &columns).expect("row maps");
        prop_assert_eq!(mapped.company, LinkedText::new("Acme", ""));
        prop_assert_eq!(mapped.discount, "20% off");
        prop_assert_eq!(mapped.code, "RELIEF20");
        prop_assert_eq!(mapped.details, "Online only");
        prop_assert_eq!(mapped.notes, "Stack with coupons");
        prop_assert_eq!(
            mapped.expiration.date().map(|d| d.to_string()),
            Some("2024-03-07".to_string())
        );
    }

    #[test]
    fn short_rows_never_fail(len in 0usize..=6) {
        let header: RawRow = LABELS.iter().map(|l| Some(Cell::text(*l))).collect();
        let row: RawRow = values()[..len].iter().map(|v| Some(Cell::text(*v))).collect();
        let columns = ColumnMap::from_header(&header);
        let mapped = map_row(&DiscountRow::shape(), &row, &columns).expect("row maps");
        prop_assert_eq!(mapped.expiration.is_zero(), len < 5);
    }
}
