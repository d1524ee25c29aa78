//! Customer routes

use axum::{extract::State, Json};

use crate::db::Database;
use crate::error::ServerResult;
use crate::models::{Customer, CustomerSummary, CustomersResponse};

/// GET /customers - List customers with a flattened address line
pub async fn list_customers(State(db): State<Database>) -> ServerResult<Json<CustomersResponse>> {
    let customers = db.list_customers()?;

    let summaries = customers
        .iter()
        .map(|c| CustomerSummary {
            id: c.customer_id.clone(),
            name: c.company_name.clone(),
            full_address: full_address(c),
        })
        .collect();

    Ok(Json(CustomersResponse {
        customers: summaries,
    }))
}

/// GET /customers_details - Full customer rows
pub async fn customers_details(State(db): State<Database>) -> ServerResult<Json<Vec<Customer>>> {
    Ok(Json(db.list_customers()?))
}

/// Address, postal code, city and country joined with single spaces.
/// NULL columns render as empty strings, so separators are preserved.
fn full_address(customer: &Customer) -> String {
    [
        customer.address.as_deref(),
        customer.postal_code.as_deref(),
        customer.city.as_deref(),
        customer.country.as_deref(),
    ]
    .iter()
    .map(|part| part.unwrap_or(""))
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address_keeps_separators() {
        let customer = Customer {
            customer_id: "ALFKI".to_string(),
            company_name: "Alfreds Futterkiste".to_string(),
            contact_name: None,
            contact_title: None,
            address: Some("Obere Str. 57".to_string()),
            city: Some("Berlin".to_string()),
            region: None,
            postal_code: None,
            country: Some("Germany".to_string()),
            phone: None,
            fax: None,
        };

        // Missing postal code leaves a double space, as the original did
        assert_eq!(full_address(&customer), "Obere Str. 57  Berlin Germany");
    }
}
