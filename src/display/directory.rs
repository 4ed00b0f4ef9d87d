//! Houses, fine definitions and categories

use super::{render_table, Align};
use crate::models::{Category, FineDefinition, House};

pub fn format_house_list(houses: &[House]) -> String {
    if houses.is_empty() {
        return "No houses found.".to_string();
    }

    let rows: Vec<Vec<String>> = houses
        .iter()
        .map(|h| {
            vec![
                h.number.clone(),
                h.name.clone(),
                h.owner.clone(),
                h.status.to_string(),
                h.email.clone().unwrap_or_default(),
                h.phone.clone().unwrap_or_default(),
            ]
        })
        .collect();

    render_table(
        &[
            ("No.", Align::Right),
            ("Name", Align::Left),
            ("Owner", Align::Left),
            ("Status", Align::Left),
            ("Email", Align::Left),
            ("Phone", Align::Left),
        ],
        &rows,
    )
}

pub fn format_house_details(house: &House) -> String {
    let mut output = String::new();
    output.push_str(&format!("House: {}\n", house.name));
    output.push_str(&format!("  ID:     {}\n", house.id));
    output.push_str(&format!("  Number: {}\n", house.number));
    output.push_str(&format!("  Owner:  {}\n", house.owner));
    output.push_str(&format!("  Status: {}\n", house.status));
    if let Some(email) = &house.email {
        output.push_str(&format!("  Email:  {}\n", email));
    }
    if let Some(phone) = &house.phone {
        output.push_str(&format!("  Phone:  {}\n", phone));
    }
    output
}

pub fn format_fine_list(fines: &[FineDefinition]) -> String {
    if fines.is_empty() {
        return "No fines defined.".to_string();
    }

    let rows: Vec<Vec<String>> = fines
        .iter()
        .map(|f| {
            vec![
                f.id.to_string(),
                f.name.clone(),
                f.category.clone(),
                f.amount.to_string(),
                if f.active { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();

    render_table(
        &[
            ("ID", Align::Left),
            ("Name", Align::Left),
            ("Category", Align::Left),
            ("Amount", Align::Right),
            ("Active", Align::Left),
        ],
        &rows,
    )
}

pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.color.clone().unwrap_or_default(),
                if c.active { "yes" } else { "no" }.to_string(),
                c.description.clone().unwrap_or_default(),
            ]
        })
        .collect();

    render_table(
        &[
            ("ID", Align::Left),
            ("Name", Align::Left),
            ("Color", Align::Left),
            ("Active", Align::Left),
            ("Description", Align::Left),
        ],
        &rows,
    )
}
