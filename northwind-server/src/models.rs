//! Request and response models for the Northwind catalog API
//!
//! Full entity rows keep the classic PascalCase Northwind column names on the
//! wire; shaped list summaries use the compact lowercase keys the original
//! API exposed (`id`, `name`, `full_address`, ...).

use serde::{Deserialize, Serialize};

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Category {
    #[serde(rename = "CategoryID")]
    pub category_id: i64,
    pub category_name: String,
    pub description: Option<String>,
}

/// Compact shape for the category listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCategoryRequest {
    pub category_name: String,
    pub description: Option<String>,
}

/// Partial update: only the fields present in the body are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCategoryRequest {
    #[serde(rename = "CategoryID")]
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub description: Option<String>,
}

// ============================================================================
// Customers
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub contact_title: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: String,
    pub name: String,
    pub full_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomersResponse {
    pub customers: Vec<CustomerSummary>,
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ProductID")]
    pub product_id: i64,
    pub product_name: String,
    #[serde(rename = "SupplierID")]
    pub supplier_id: Option<i64>,
    #[serde(rename = "CategoryID")]
    pub category_id: Option<i64>,
    pub quantity_per_unit: Option<String>,
    pub unit_price: Option<f64>,
    pub units_in_stock: Option<i64>,
    pub units_on_order: Option<i64>,
    pub reorder_level: Option<i64>,
    pub discontinued: i64,
}

/// Name roster plus count, as the original listing returned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<String>,
    pub products_counter: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
}

/// Product joined with its category and supplier names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtendedProduct {
    #[serde(rename = "ProductID")]
    pub product_id: i64,
    pub product_name: String,
    pub category_name: String,
    pub company_name: String,
}

/// One order line for a product, as stored (price math happens at the edge)
#[derive(Debug, Clone)]
pub struct ProductOrderRow {
    pub order_id: i64,
    pub company_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub discount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOrder {
    pub id: i64,
    pub customer: String,
    pub quantity: i64,
    pub total_price: f64,
}

// ============================================================================
// Employees
// ============================================================================

/// Projected employee row for the paginated listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeRow {
    #[serde(rename = "EmployeeID")]
    pub employee_id: i64,
    pub last_name: String,
    pub first_name: String,
    pub city: Option<String>,
}

/// Sort keys accepted by the employee listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeOrder {
    Id,
    LastName,
    FirstName,
    City,
}

impl EmployeeOrder {
    /// Column the sort key maps to. Fixed whitelist: user input never
    /// reaches the SQL text directly.
    pub fn column(self) -> &'static str {
        match self {
            EmployeeOrder::Id => "EmployeeID",
            EmployeeOrder::LastName => "LastName",
            EmployeeOrder::FirstName => "FirstName",
            EmployeeOrder::City => "City",
        }
    }
}

impl std::str::FromStr for EmployeeOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(EmployeeOrder::Id),
            "last_name" => Ok(EmployeeOrder::LastName),
            "first_name" => Ok(EmployeeOrder::FirstName),
            "city" => Ok(EmployeeOrder::City),
            _ => Err(format!("Unknown order: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeQueryParams {
    /// Limit results (0 = unbounded)
    pub limit: Option<i64>,
    /// Offset for pagination
    pub offset: Option<i64>,
    /// Sort key: id, last_name, first_name, city
    pub order: Option<String>,
}

// ============================================================================
// Shippers
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Shipper {
    #[serde(rename = "ShipperID")]
    pub shipper_id: i64,
    pub company_name: String,
    pub phone: Option<String>,
}

// ============================================================================
// Suppliers
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Supplier {
    #[serde(rename = "SupplierID")]
    pub supplier_id: i64,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub contact_title: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub home_page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSupplierRequest {
    pub company_name: String,
    pub contact_name: Option<String>,
    pub contact_title: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

/// Partial update: only the fields present in the body are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateSupplierRequest {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_title: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub home_page: Option<String>,
}

/// Product listed under a supplier, with its category nested
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SupplierProduct {
    #[serde(rename = "ProductID")]
    pub product_id: i64,
    pub product_name: String,
    pub category: CategoryRef,
    pub discontinued: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryRef {
    #[serde(rename = "CategoryID")]
    pub category_id: i64,
    pub category_name: String,
    pub description: Option<String>,
}

// ============================================================================
// Health Check
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    pub path: String,
    pub size_bytes: Option<u64>,
}
