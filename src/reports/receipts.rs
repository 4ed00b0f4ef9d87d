//! Receipts built from house records and the ledger

use chrono::{Datelike, NaiveDate};

use crate::documents::format::month_name;
use crate::documents::{AssociationInfo, ReceiptData};
use crate::error::{HoaError, HoaResult};
use crate::models::{AssociationConfig, House, IncomeRecord, IncomeStatus, Money};
use crate::services::{ConfigService, HouseService, IncomeService};
use crate::storage::Storage;

/// Day of the month payments are due
pub const DUE_DAY: u32 = 10;

fn belongs_to(income: &IncomeRecord, house: &House) -> bool {
    income.house == house.name || income.house == house.number
}

/// Receipt of `house` for `month` of `year`
///
/// The fee comes from the association settings. Pending fines and event
/// charges of the month are added on top; the status is paid once the
/// month's fee has been paid.
pub fn build_receipt(
    house: &House,
    association: &AssociationConfig,
    incomes: &[IncomeRecord],
    year: &str,
    month: u32,
) -> HoaResult<ReceiptData> {
    let name = month_name(month)
        .ok_or_else(|| HoaError::Validation(format!("Month must be 1-12 (got {})", month)))?;

    let in_month: Vec<&IncomeRecord> = incomes
        .iter()
        .filter(|i| i.date.month() == month && belongs_to(i, house))
        .collect();
    let pending_of = |kind: &str| -> Money {
        in_month
            .iter()
            .filter(|i| i.kind == kind && i.status == IncomeStatus::Pending)
            .map(|i| i.amount)
            .sum()
    };
    let fee_paid = in_month
        .iter()
        .any(|i| i.kind == "cuota" && i.status == IncomeStatus::Paid);

    let due_date = year
        .parse::<i32>()
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, DUE_DAY))
        .map(crate::documents::format::short_date);

    let mut receipt = ReceiptData {
        house: house.name.clone(),
        owner: house.owner.clone(),
        email: house.email.clone(),
        phone: house.phone.clone(),
        month: Some(name.to_string()),
        year: Some(year.to_string()),
        monthly_fee: Some(association.monthly_fee),
        fines: Some(pending_of("multa")),
        events: Some(pending_of("evento")),
        total: None,
        due_date,
        status: Some(if fee_paid { "Pagado" } else { "Pendiente" }.to_string()),
        association: Some(AssociationInfo::from(association)),
    };
    receipt.total = Some(receipt.computed_total());
    Ok(receipt)
}

/// Receipt for the house found by number, id or name
pub fn receipt_for(storage: &Storage, house: &str, year: &str, month: u32) -> HoaResult<ReceiptData> {
    let house = HouseService::new(storage)
        .find(house)?
        .ok_or_else(|| HoaError::house_not_found(house))?;
    let association = ConfigService::new(storage).association()?;
    let incomes = IncomeService::new(storage, year)?.list()?;
    build_receipt(&house, &association, &incomes, year, month)
}

/// Receipts for every active house
pub fn receipts_for_active(storage: &Storage, year: &str, month: u32) -> HoaResult<Vec<ReceiptData>> {
    let association = ConfigService::new(storage).association()?;
    let incomes = IncomeService::new(storage, year)?.list()?;
    HouseService::new(storage)
        .active()?
        .iter()
        .map(|house| build_receipt(house, &association, &incomes, year, month))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewIncome;

    #[test]
    fn test_receipt_adds_pending_charges() {
        let storage = Storage::in_memory();
        let incomes = IncomeService::new(&storage, "2024").unwrap();
        let jan = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        incomes
            .create(NewIncome::new("multa", "Casa 1", Money::from_units(250), jan))
            .unwrap();
        incomes
            .create(NewIncome::new("evento", "1", Money::from_units(100), jan))
            .unwrap();
        // other house and other month are ignored
        incomes
            .create(NewIncome::new("multa", "Casa 2", Money::from_units(500), jan))
            .unwrap();

        let receipt = receipt_for(&storage, "1", "2024", 1).unwrap();

        assert_eq!(receipt.house, "Casa 1");
        assert_eq!(receipt.owner, "Propietario 1");
        assert_eq!(receipt.month.as_deref(), Some("Enero"));
        assert_eq!(receipt.monthly_fee, Some(Money::from_units(2500)));
        assert_eq!(receipt.fines, Some(Money::from_units(250)));
        assert_eq!(receipt.events, Some(Money::from_units(100)));
        assert_eq!(receipt.total, Some(Money::from_units(2850)));
        assert_eq!(receipt.due_date.as_deref(), Some("10/1/2024"));
        assert_eq!(receipt.status.as_deref(), Some("Pendiente"));
    }

    #[test]
    fn test_paid_fee_marks_receipt_paid() {
        let storage = Storage::in_memory();
        let incomes = IncomeService::new(&storage, "2024").unwrap();
        let fee = incomes
            .create(NewIncome::new(
                "cuota",
                "Casa 7",
                Money::from_units(2500),
                NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            ))
            .unwrap();
        incomes.mark_paid(fee.id.as_str()).unwrap();

        let receipt = receipt_for(&storage, "7", "2024", 2).unwrap();
        assert_eq!(receipt.status.as_deref(), Some("Pagado"));
    }

    #[test]
    fn test_unknown_house() {
        let storage = Storage::in_memory();
        let err = receipt_for(&storage, "99", "2024", 1).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_receipts_for_active() {
        let storage = Storage::in_memory();
        let receipts = receipts_for_active(&storage, "2024", 5).unwrap();
        assert_eq!(receipts.len(), 45);
    }
}
