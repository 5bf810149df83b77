use budget_ledger::audit::Operation;
use budget_ledger::config::paths::LedgerPaths;
use budget_ledger::models::{
    AddIncomeArgs, AddMonthlyPaymentArgs, AddSpendArgs, AddSpendTypeArgs, EditSpendArgs,
    EditSpendTypeArgs, Money, SearchSpendsArgs, SpendTypeId,
};
use budget_ledger::reports::{CostIntervalsReport, SpentByDayReport, SpentByTypeReport};
use budget_ledger::services::{
    IncomeService, MonthService, MonthlyPaymentService, SearchService, SpendService,
    SpendTypeService,
};
use budget_ledger::storage::Storage;
use chrono::NaiveDate;
use tempfile::TempDir;

fn open_storage(dir: &TempDir) -> Storage {
    Storage::open(LedgerPaths::with_base_dir(dir.path().to_path_buf())).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn month_figures_follow_every_change() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir);
    let months = MonthService::new(&storage);

    let february = months.init(2024, 2).unwrap();
    assert_eq!(february.days.len(), 29);

    IncomeService::new(&storage)
        .add(&AddIncomeArgs {
            month_id: february.id,
            title: "Salary".into(),
            notes: String::new(),
            income: Money::from_int(2900),
        })
        .unwrap();
    MonthlyPaymentService::new(&storage)
        .add(&AddMonthlyPaymentArgs {
            month_id: february.id,
            title: "Internet".into(),
            type_id: None,
            notes: String::new(),
            cost: Money::from_int(290),
        })
        .unwrap();

    let first = months.day_by_date(date(2024, 2, 1)).unwrap();
    let spends = SpendService::new(&storage);
    let spend = spends
        .add(&AddSpendArgs {
            day_id: first.id,
            title: "Groceries".into(),
            type_id: None,
            notes: String::new(),
            cost: Money::from_int(10),
        })
        .unwrap();

    let month = months.get(february.id).unwrap();
    assert_eq!(month.daily_budget, Money::from_int(90));
    assert_eq!(month.total_spend, Money::from_int(-300));
    assert_eq!(month.result, Money::from_int(2600));
    assert_eq!(month.days[0].saldo, Money::from_int(80));
    assert_eq!(month.days[28].saldo, Money::from_int(2600));

    spends
        .edit(&EditSpendArgs {
            id: spend.id,
            title: None,
            type_id: None,
            notes: None,
            cost: Some(Money::from_int(100)),
        })
        .unwrap();
    let month = months.get(february.id).unwrap();
    assert_eq!(month.days[0].saldo, Money::from_int(-10));
    assert_eq!(month.result, Money::from_int(2510));
}

#[test]
fn data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let storage = open_storage(&dir);
        let day = MonthService::new(&storage)
            .day_for_date(date(2024, 4, 2))
            .unwrap();
        SpendService::new(&storage)
            .add(&AddSpendArgs {
                day_id: day.id,
                title: "Coffee".into(),
                type_id: None,
                notes: "oat milk".into(),
                cost: Money::from_minor(450),
            })
            .unwrap();
    }

    let storage = open_storage(&dir);
    let rows = SearchService::new(&storage)
        .search(&SearchSpendsArgs {
            notes: "OAT".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Coffee");
    assert_eq!(rows[0].cost, Money::from_minor(450));

    let operations: Vec<Operation> = storage
        .audit()
        .read_all()
        .unwrap()
        .into_iter()
        .map(|e| e.operation)
        .collect();
    assert_eq!(operations, vec![Operation::Create, Operation::Create]);
}

#[test]
fn spend_type_hierarchy_and_reports() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir);
    let types = SpendTypeService::new(&storage);

    let food = types
        .add(&AddSpendTypeArgs {
            name: "Food".into(),
            parent_id: None,
        })
        .unwrap();
    let cafe = types
        .add(&AddSpendTypeArgs {
            name: "Cafe".into(),
            parent_id: Some(food.id),
        })
        .unwrap();

    let err = types
        .edit(&EditSpendTypeArgs {
            id: food.id,
            name: None,
            parent_id: Some(cafe.id),
        })
        .unwrap_err();
    assert!(err.is_conflict());

    let months = MonthService::new(&storage);
    let spends = SpendService::new(&storage);
    for (day, title, cost, type_id) in [
        (1, "Latte", 5, Some(cafe.id)),
        (1, "Bread", 3, Some(food.id)),
        (3, "Taxi", 12, None),
    ] {
        let day = months.day_for_date(date(2024, 4, day)).unwrap();
        spends
            .add(&AddSpendArgs {
                day_id: day.id,
                title: title.into(),
                type_id,
                notes: String::new(),
                cost: Money::from_int(cost),
            })
            .unwrap();
    }

    let by_day = SpentByDayReport::generate(&storage, date(2024, 4, 1), date(2024, 4, 3)).unwrap();
    let totals: Vec<Money> = by_day.days.iter().map(|d| d.spent).collect();
    assert_eq!(
        totals,
        vec![Money::from_int(8), Money::ZERO, Money::from_int(12)]
    );

    let by_type = SpentByTypeReport::generate(&storage, None, None, 15).unwrap();
    let rows: Vec<(&str, Money)> = by_type
        .types
        .iter()
        .map(|t| (t.name.as_str(), t.spent))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("No Type", Money::from_int(12)),
            ("Food", Money::from_int(8)),
            ("Cafe", Money::from_int(5)),
        ]
    );

    let intervals = CostIntervalsReport::generate(&storage, None, None, 3).unwrap();
    assert_eq!(intervals.spend_count, 3);
    let counted: usize = intervals.intervals.iter().map(|i| i.count).sum();
    assert_eq!(counted, 3);

    let err = types.remove(cafe.id).unwrap_err();
    assert!(err.is_conflict());

    let untyped = SearchService::new(&storage)
        .search(&SearchSpendsArgs {
            type_ids: vec![SpendTypeId::NONE],
            ..Default::default()
        })
        .unwrap();
    assert_eq!(untyped.len(), 1);
    assert_eq!(untyped[0].title, "Taxi");
}
