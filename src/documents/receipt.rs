//! Fee receipts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::format::{amount, or_placeholder, short_date};
use crate::models::{AssociationConfig, Money};

/// Letterhead printed on a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl From<&AssociationConfig> for AssociationInfo {
    fn from(config: &AssociationConfig) -> Self {
        Self {
            name: config.name.clone(),
            address: config.address.clone(),
            phone: config.phone.clone(),
            email: config.email.clone(),
        }
    }
}

/// Everything a fee receipt shows; absent fields print placeholders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptData {
    pub house: String,
    pub owner: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Spanish month name
    pub month: Option<String>,
    pub year: Option<String>,
    pub monthly_fee: Option<Money>,
    pub fines: Option<Money>,
    pub events: Option<Money>,
    pub total: Option<Money>,
    pub due_date: Option<String>,
    pub status: Option<String>,
    pub association: Option<AssociationInfo>,
}

impl ReceiptData {
    /// Fee plus fines plus events
    pub fn computed_total(&self) -> Money {
        [self.monthly_fee, self.fines, self.events]
            .into_iter()
            .flatten()
            .sum()
    }

    /// `recibo_<casa>_<mes>_<año>.txt`
    pub fn file_name(&self) -> String {
        format!(
            "recibo_{}_{}_{}.txt",
            self.house.replace(' ', "_"),
            self.month.as_deref().unwrap_or("mes"),
            self.year.as_deref().unwrap_or("año")
        )
    }
}

/// Render a receipt issued on `issued`
pub fn receipt_text(data: &ReceiptData, issued: NaiveDate) -> String {
    let issued = short_date(issued);
    let (name, address, phone, email) = match &data.association {
        Some(info) => (
            info.name.as_str(),
            info.address.as_str(),
            info.phone.as_str(),
            info.email.as_str(),
        ),
        None => (
            "Mi Residencial",
            "Calle Principal #123",
            "+52 555 0000",
            "admin@residencial.com",
        ),
    };

    format!(
        "RECIBO DE CUOTAS MENSUALES
=========================================

INFORMACIÓN DEL RESIDENCIAL
---------------------------
{name}
{address}
Tel: {phone}
Email: {email}

INFORMACIÓN DEL PROPIETARIO
---------------------------
Casa: {house}
Propietario: {owner}
Email: {owner_email}
Teléfono: {owner_phone}

DETALLE DE CUOTAS - {month}
---------------------------
Cuota Mensual:           {fee}
Multas:                  {fines}
Eventos Especiales:      {events}
                        -------------------------
TOTAL A PAGAR:          {total}

INFORMACIÓN DE PAGO
---------------------------
Fecha de Emisión: {issued}
Fecha Límite: {due}
Estado: {status}

INSTRUCCIONES DE PAGO
---------------------------
• Realizar el pago antes de la fecha límite
• Conservar este recibo como comprobante
• En caso de dudas, contactar a la administración

NOTAS IMPORTANTES
---------------------------
• El pago tardío genera multas adicionales
• Este recibo es válido únicamente para el período indicado
• Favor de reportar cualquier discrepancia

=========================================
Documento generado automáticamente
{issued}",
        house = data.house,
        owner = data.owner,
        owner_email = or_placeholder(data.email.as_deref(), "No especificado"),
        owner_phone = or_placeholder(data.phone.as_deref(), "No especificado"),
        month = or_placeholder(data.month.as_deref(), "Mes Actual"),
        fee = amount(data.monthly_fee),
        fines = amount(data.fines),
        events = amount(data.events),
        total = amount(data.total),
        due = or_placeholder(data.due_date.as_deref(), "No especificada"),
        status = or_placeholder(data.status.as_deref(), "Pendiente"),
    )
}

/// Several receipts in one document, numbered from 1
pub fn bulk_receipts_text(receipts: &[ReceiptData], issued: NaiveDate) -> String {
    let mut out = String::from("RECIBOS MASIVOS\n");
    out.push_str(&"=".repeat(37));
    out.push_str("\n\n");

    for (index, receipt) in receipts.iter().enumerate() {
        out.push_str(&format!("RECIBO {}\n", index + 1));
        out.push_str(&receipt_text(receipt, issued));
        out.push_str("\n\n");
        out.push_str(&"=".repeat(50));
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn full() -> ReceiptData {
        let mut data = ReceiptData {
            house: "Casa 1".into(),
            owner: "Propietario 1".into(),
            email: Some("casa1@email.com".into()),
            phone: Some("+52 555 0001".into()),
            month: Some("Enero".into()),
            year: Some("2024".into()),
            monthly_fee: Some(Money::from_units(2500)),
            fines: Some(Money::from_units(250)),
            events: None,
            total: None,
            due_date: Some("10/1/2024".into()),
            status: None,
            association: Some(AssociationInfo::from(&AssociationConfig::default())),
        };
        data.total = Some(data.computed_total());
        data
    }

    #[test]
    fn test_receipt_layout() {
        let text = receipt_text(&full(), issued());

        assert!(text.starts_with("RECIBO DE CUOTAS MENSUALES\n"));
        assert!(text.contains("Casa: Casa 1\n"));
        assert!(text.contains("DETALLE DE CUOTAS - Enero\n"));
        assert!(text.contains("Cuota Mensual:           $2,500\n"));
        assert!(text.contains("Eventos Especiales:      $0\n"));
        assert!(text.contains("TOTAL A PAGAR:          $2,750\n"));
        assert!(text.contains("Fecha de Emisión: 5/1/2024\n"));
        assert!(text.contains("Estado: Pendiente\n"));
        assert!(text.ends_with("Documento generado automáticamente\n5/1/2024"));
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let data = ReceiptData {
            house: "Casa 9".into(),
            owner: "Propietario 9".into(),
            ..Default::default()
        };
        let text = receipt_text(&data, issued());

        assert!(text.contains("Email: No especificado\n"));
        assert!(text.contains("Teléfono: No especificado\n"));
        assert!(text.contains("DETALLE DE CUOTAS - Mes Actual\n"));
        assert!(text.contains("TOTAL A PAGAR:          $0\n"));
        assert!(text.contains("Fecha Límite: No especificada\n"));
        assert!(text.contains("Mi Residencial\nCalle Principal #123\n"));
    }

    #[test]
    fn test_bulk_receipts() {
        let text = bulk_receipts_text(&[full(), full()], issued());

        assert!(text.starts_with("RECIBOS MASIVOS\n=====================================\n\nRECIBO 1\n"));
        assert!(text.contains("RECIBO 2\nRECIBO DE CUOTAS MENSUALES"));
        assert_eq!(text.matches(&"=".repeat(50)).count(), 2);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(full().file_name(), "recibo_Casa_1_Enero_2024.txt");
    }
}
