//! Association and communication settings

use crate::models::{AssociationConfig, CommunicationConfig};

pub fn format_association(config: &AssociationConfig) -> String {
    let mut output = String::new();
    output.push_str(&format!("Association: {}\n", config.name));
    output.push_str(&format!("  Address:     {}\n", config.address));
    output.push_str(&format!("  Phone:       {}\n", config.phone));
    output.push_str(&format!("  Email:       {}\n", config.email));
    output.push_str(&format!(
        "  Monthly fee: {} {}\n",
        config.monthly_fee, config.currency
    ));
    output
}

pub fn format_communication(config: &CommunicationConfig) -> String {
    let mut output = String::new();
    output.push_str("Communication\n");
    output.push_str(&format!(
        "  From:      {} <{}>\n",
        config.from_name, config.from_email
    ));
    output.push_str(&format!("  WhatsApp:  {}\n", config.whatsapp_number));
    output.push_str("  Signature:\n");
    for line in config.signature.lines() {
        output.push_str(&format!("    {}\n", line));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_defaults() {
        let association = format_association(&AssociationConfig::default());
        assert!(association.contains("Monthly fee: $2,500.00 MXN"));

        let communication = format_communication(&CommunicationConfig::default());
        assert!(communication.contains("Administración Residencial <admin@miresidencial.com>"));
        assert!(communication.contains("    Saludos cordiales,\n"));
    }
}
