//! SQLite database layer for the Northwind catalog
//!
//! Uses rusqlite with idempotent schema migrations on startup. Every public
//! method maps to exactly one query shape; all user values travel as bind
//! parameters.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::ServerResult;
use crate::models::*;

/// Thread-safe database wrapper
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> ServerResult<Self> {
        let path = path.into();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };

        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> ServerResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get database file size in bytes
    pub fn size_bytes(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// Run schema migrations
    fn run_migrations(&self) -> ServerResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(INDEXES)?;

        Ok(())
    }

    // ========================================================================
    // Categories
    // ========================================================================

    pub fn list_categories(&self) -> ServerResult<Vec<Category>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT CategoryID, CategoryName, Description FROM Categories ORDER BY CategoryID",
        )?;

        let categories = stmt
            .query_map([], map_category)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    pub fn get_category(&self, id: i64) -> ServerResult<Option<Category>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT CategoryID, CategoryName, Description FROM Categories WHERE CategoryID = ?",
        )?;

        let category = stmt.query_row([id], map_category).optional()?;
        Ok(category)
    }

    /// Insert a category with a max-plus-one surrogate key. The id is
    /// computed inside the INSERT so an empty table yields id 1.
    pub fn create_category(&self, req: &CreateCategoryRequest) -> ServerResult<Category> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO Categories (CategoryID, CategoryName, Description)
            SELECT COALESCE(MAX(CategoryID), 0) + 1, ?, ? FROM Categories
            "#,
            params![req.category_name, req.description],
        )?;

        Ok(Category {
            category_id: conn.last_insert_rowid(),
            category_name: req.category_name.clone(),
            description: req.description.clone(),
        })
    }

    /// Apply the non-null fields of the request; returns None if the row
    /// does not exist.
    pub fn update_category(
        &self,
        id: i64,
        req: &UpdateCategoryRequest,
    ) -> ServerResult<Option<Category>> {
        let mut category = match self.get_category(id)? {
            Some(c) => c,
            None => return Ok(None),
        };

        if let Some(new_id) = req.category_id {
            category.category_id = new_id;
        }
        if let Some(name) = &req.category_name {
            category.category_name = name.clone();
        }
        if let Some(description) = &req.description {
            category.description = Some(description.clone());
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE Categories SET CategoryID = ?, CategoryName = ?, Description = ? WHERE CategoryID = ?",
            params![
                category.category_id,
                category.category_name,
                category.description,
                id
            ],
        )?;

        Ok(Some(category))
    }

    pub fn delete_category(&self, id: i64) -> ServerResult<bool> {
        let conn = self.conn.lock().unwrap();
        let rows_affected =
            conn.execute("DELETE FROM Categories WHERE CategoryID = ?", params![id])?;
        Ok(rows_affected > 0)
    }

    // ========================================================================
    // Customers
    // ========================================================================

    pub fn list_customers(&self) -> ServerResult<Vec<Customer>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT CustomerID, CompanyName, ContactName, ContactTitle, Address,
                   City, Region, PostalCode, Country, Phone, Fax
            FROM Customers
            ORDER BY CustomerID
            "#,
        )?;

        let customers = stmt
            .query_map([], map_customer)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(customers)
    }

    // ========================================================================
    // Products
    // ========================================================================

    pub fn list_products(&self) -> ServerResult<Vec<Product>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT ProductID, ProductName, SupplierID, CategoryID, QuantityPerUnit,
                   UnitPrice, UnitsInStock, UnitsOnOrder, ReorderLevel, Discontinued
            FROM Products
            ORDER BY ProductID
            "#,
        )?;

        let products = stmt
            .query_map([], map_product)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    pub fn get_product(&self, id: i64) -> ServerResult<Option<Product>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT ProductID, ProductName, SupplierID, CategoryID, QuantityPerUnit,
                   UnitPrice, UnitsInStock, UnitsOnOrder, ReorderLevel, Discontinued
            FROM Products
            WHERE ProductID = ?
            "#,
        )?;

        let product = stmt.query_row([id], map_product).optional()?;
        Ok(product)
    }

    /// Products joined with their category and supplier names
    pub fn list_products_extended(&self) -> ServerResult<Vec<ExtendedProduct>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT p.ProductID, p.ProductName, c.CategoryName, s.CompanyName
            FROM Products p
            JOIN Categories c ON c.CategoryID = p.CategoryID
            JOIN Suppliers s ON s.SupplierID = p.SupplierID
            ORDER BY p.ProductID
            "#,
        )?;

        let products = stmt
            .query_map([], |row| {
                Ok(ExtendedProduct {
                    product_id: row.get(0)?,
                    product_name: row.get(1)?,
                    category_name: row.get(2)?,
                    company_name: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    /// Order lines for one product, joined through to the ordering customer
    pub fn list_product_orders(&self, product_id: i64) -> ServerResult<Vec<ProductOrderRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT od.OrderID, c.CompanyName, od.Quantity, od.UnitPrice, od.Discount
            FROM OrderDetails od
            JOIN Orders o ON o.OrderID = od.OrderID
            JOIN Customers c ON c.CustomerID = o.CustomerID
            WHERE od.ProductID = ?
            ORDER BY od.OrderID
            "#,
        )?;

        let orders = stmt
            .query_map([product_id], |row| {
                Ok(ProductOrderRow {
                    order_id: row.get(0)?,
                    company_name: row.get(1)?,
                    quantity: row.get(2)?,
                    unit_price: row.get(3)?,
                    discount: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(orders)
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Projected employee listing with whitelisted ordering. A limit of 0
    /// means unbounded (SQLite treats LIMIT -1 as no limit).
    pub fn list_employees(
        &self,
        limit: i64,
        offset: i64,
        order: EmployeeOrder,
    ) -> ServerResult<Vec<EmployeeRow>> {
        let conn = self.conn.lock().unwrap();

        let query = format!(
            "SELECT EmployeeID, LastName, FirstName, City FROM Employees ORDER BY {} LIMIT ? OFFSET ?",
            order.column()
        );
        let limit = if limit == 0 { -1 } else { limit };

        let mut stmt = conn.prepare(&query)?;
        let employees = stmt
            .query_map(params![limit, offset], |row| {
                Ok(EmployeeRow {
                    employee_id: row.get(0)?,
                    last_name: row.get(1)?,
                    first_name: row.get(2)?,
                    city: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(employees)
    }

    // ========================================================================
    // Shippers
    // ========================================================================

    pub fn list_shippers(&self) -> ServerResult<Vec<Shipper>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT ShipperID, CompanyName, Phone FROM Shippers ORDER BY ShipperID",
        )?;

        let shippers = stmt
            .query_map([], map_shipper)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(shippers)
    }

    pub fn get_shipper(&self, id: i64) -> ServerResult<Option<Shipper>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT ShipperID, CompanyName, Phone FROM Shippers WHERE ShipperID = ?")?;

        let shipper = stmt.query_row([id], map_shipper).optional()?;
        Ok(shipper)
    }

    // ========================================================================
    // Suppliers
    // ========================================================================

    pub fn list_suppliers(&self) -> ServerResult<Vec<Supplier>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT SupplierID, CompanyName, ContactName, ContactTitle, Address,
                   City, Region, PostalCode, Country, Phone, Fax, HomePage
            FROM Suppliers
            ORDER BY SupplierID
            "#,
        )?;

        let suppliers = stmt
            .query_map([], map_supplier)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(suppliers)
    }

    pub fn get_supplier(&self, id: i64) -> ServerResult<Option<Supplier>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT SupplierID, CompanyName, ContactName, ContactTitle, Address,
                   City, Region, PostalCode, Country, Phone, Fax, HomePage
            FROM Suppliers
            WHERE SupplierID = ?
            "#,
        )?;

        let supplier = stmt.query_row([id], map_supplier).optional()?;
        Ok(supplier)
    }

    /// Insert a supplier with a max-plus-one surrogate key
    pub fn create_supplier(&self, req: &CreateSupplierRequest) -> ServerResult<Supplier> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO Suppliers (SupplierID, CompanyName, ContactName, ContactTitle,
                                   Address, City, PostalCode, Country, Phone)
            SELECT COALESCE(MAX(SupplierID), 0) + 1, ?, ?, ?, ?, ?, ?, ?, ? FROM Suppliers
            "#,
            params![
                req.company_name,
                req.contact_name,
                req.contact_title,
                req.address,
                req.city,
                req.postal_code,
                req.country,
                req.phone
            ],
        )?;

        Ok(Supplier {
            supplier_id: conn.last_insert_rowid(),
            company_name: req.company_name.clone(),
            contact_name: req.contact_name.clone(),
            contact_title: req.contact_title.clone(),
            address: req.address.clone(),
            city: req.city.clone(),
            region: None,
            postal_code: req.postal_code.clone(),
            country: req.country.clone(),
            phone: req.phone.clone(),
            fax: None,
            home_page: None,
        })
    }

    /// Apply the non-null fields of the request; returns None if the row
    /// does not exist.
    pub fn update_supplier(
        &self,
        id: i64,
        req: &UpdateSupplierRequest,
    ) -> ServerResult<Option<Supplier>> {
        let mut supplier = match self.get_supplier(id)? {
            Some(s) => s,
            None => return Ok(None),
        };

        if let Some(company_name) = &req.company_name {
            supplier.company_name = company_name.clone();
        }
        if let Some(contact_name) = &req.contact_name {
            supplier.contact_name = Some(contact_name.clone());
        }
        if let Some(contact_title) = &req.contact_title {
            supplier.contact_title = Some(contact_title.clone());
        }
        if let Some(address) = &req.address {
            supplier.address = Some(address.clone());
        }
        if let Some(city) = &req.city {
            supplier.city = Some(city.clone());
        }
        if let Some(postal_code) = &req.postal_code {
            supplier.postal_code = Some(postal_code.clone());
        }
        if let Some(country) = &req.country {
            supplier.country = Some(country.clone());
        }
        if let Some(phone) = &req.phone {
            supplier.phone = Some(phone.clone());
        }
        if let Some(fax) = &req.fax {
            supplier.fax = Some(fax.clone());
        }
        if let Some(home_page) = &req.home_page {
            supplier.home_page = Some(home_page.clone());
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            UPDATE Suppliers
            SET CompanyName = ?, ContactName = ?, ContactTitle = ?, Address = ?,
                City = ?, PostalCode = ?, Country = ?, Phone = ?, Fax = ?, HomePage = ?
            WHERE SupplierID = ?
            "#,
            params![
                supplier.company_name,
                supplier.contact_name,
                supplier.contact_title,
                supplier.address,
                supplier.city,
                supplier.postal_code,
                supplier.country,
                supplier.phone,
                supplier.fax,
                supplier.home_page,
                id
            ],
        )?;

        Ok(Some(supplier))
    }

    pub fn delete_supplier(&self, id: i64) -> ServerResult<bool> {
        let conn = self.conn.lock().unwrap();
        let rows_affected =
            conn.execute("DELETE FROM Suppliers WHERE SupplierID = ?", params![id])?;
        Ok(rows_affected > 0)
    }

    /// Test helper: run arbitrary SQL to load fixtures
    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> ServerResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Products of one supplier with their category nested, newest product
    /// id first
    pub fn list_supplier_products(&self, supplier_id: i64) -> ServerResult<Vec<SupplierProduct>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT p.ProductID, p.ProductName, c.CategoryID, c.CategoryName,
                   c.Description, p.Discontinued
            FROM Products p
            JOIN Categories c ON c.CategoryID = p.CategoryID
            WHERE p.SupplierID = ?
            ORDER BY p.ProductID DESC
            "#,
        )?;

        let products = stmt
            .query_map([supplier_id], |row| {
                Ok(SupplierProduct {
                    product_id: row.get(0)?,
                    product_name: row.get(1)?,
                    category: CategoryRef {
                        category_id: row.get(2)?,
                        category_name: row.get(3)?,
                        description: row.get(4)?,
                    },
                    discontinued: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }
}

// ============================================================================
// Row mappers
// ============================================================================

fn map_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        category_id: row.get(0)?,
        category_name: row.get(1)?,
        description: row.get(2)?,
    })
}

fn map_customer(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        customer_id: row.get(0)?,
        company_name: row.get(1)?,
        contact_name: row.get(2)?,
        contact_title: row.get(3)?,
        address: row.get(4)?,
        city: row.get(5)?,
        region: row.get(6)?,
        postal_code: row.get(7)?,
        country: row.get(8)?,
        phone: row.get(9)?,
        fax: row.get(10)?,
    })
}

fn map_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        product_id: row.get(0)?,
        product_name: row.get(1)?,
        supplier_id: row.get(2)?,
        category_id: row.get(3)?,
        quantity_per_unit: row.get(4)?,
        unit_price: row.get(5)?,
        units_in_stock: row.get(6)?,
        units_on_order: row.get(7)?,
        reorder_level: row.get(8)?,
        discontinued: row.get(9)?,
    })
}

fn map_shipper(row: &Row<'_>) -> rusqlite::Result<Shipper> {
    Ok(Shipper {
        shipper_id: row.get(0)?,
        company_name: row.get(1)?,
        phone: row.get(2)?,
    })
}

fn map_supplier(row: &Row<'_>) -> rusqlite::Result<Supplier> {
    Ok(Supplier {
        supplier_id: row.get(0)?,
        company_name: row.get(1)?,
        contact_name: row.get(2)?,
        contact_title: row.get(3)?,
        address: row.get(4)?,
        city: row.get(5)?,
        region: row.get(6)?,
        postal_code: row.get(7)?,
        country: row.get(8)?,
        phone: row.get(9)?,
        fax: row.get(10)?,
        home_page: row.get(11)?,
    })
}

// ============================================================================
// Schema
// ============================================================================

const SCHEMA: &str = r#"
-- Categories table
CREATE TABLE IF NOT EXISTS Categories (
    CategoryID INTEGER PRIMARY KEY,
    CategoryName TEXT NOT NULL,
    Description TEXT
);

-- Customers table (text surrogate keys, e.g. 'ALFKI')
CREATE TABLE IF NOT EXISTS Customers (
    CustomerID TEXT PRIMARY KEY,
    CompanyName TEXT NOT NULL,
    ContactName TEXT,
    ContactTitle TEXT,
    Address TEXT,
    City TEXT,
    Region TEXT,
    PostalCode TEXT,
    Country TEXT,
    Phone TEXT,
    Fax TEXT
);

-- Employees table
CREATE TABLE IF NOT EXISTS Employees (
    EmployeeID INTEGER PRIMARY KEY,
    LastName TEXT NOT NULL,
    FirstName TEXT NOT NULL,
    Title TEXT,
    City TEXT,
    Country TEXT
);

-- Suppliers table
CREATE TABLE IF NOT EXISTS Suppliers (
    SupplierID INTEGER PRIMARY KEY,
    CompanyName TEXT NOT NULL,
    ContactName TEXT,
    ContactTitle TEXT,
    Address TEXT,
    City TEXT,
    Region TEXT,
    PostalCode TEXT,
    Country TEXT,
    Phone TEXT,
    Fax TEXT,
    HomePage TEXT
);

-- Products table
CREATE TABLE IF NOT EXISTS Products (
    ProductID INTEGER PRIMARY KEY,
    ProductName TEXT NOT NULL,
    SupplierID INTEGER REFERENCES Suppliers(SupplierID),
    CategoryID INTEGER REFERENCES Categories(CategoryID),
    QuantityPerUnit TEXT,
    UnitPrice REAL,
    UnitsInStock INTEGER,
    UnitsOnOrder INTEGER,
    ReorderLevel INTEGER,
    Discontinued INTEGER NOT NULL DEFAULT 0
);

-- Shippers table
CREATE TABLE IF NOT EXISTS Shippers (
    ShipperID INTEGER PRIMARY KEY,
    CompanyName TEXT NOT NULL,
    Phone TEXT
);

-- Orders table
CREATE TABLE IF NOT EXISTS Orders (
    OrderID INTEGER PRIMARY KEY,
    CustomerID TEXT REFERENCES Customers(CustomerID),
    EmployeeID INTEGER REFERENCES Employees(EmployeeID),
    OrderDate TEXT,
    ShipVia INTEGER REFERENCES Shippers(ShipperID)
);

-- Order lines table
CREATE TABLE IF NOT EXISTS OrderDetails (
    OrderID INTEGER NOT NULL REFERENCES Orders(OrderID),
    ProductID INTEGER NOT NULL REFERENCES Products(ProductID),
    UnitPrice REAL NOT NULL,
    Quantity INTEGER NOT NULL,
    Discount REAL NOT NULL DEFAULT 0,
    PRIMARY KEY (OrderID, ProductID)
);
"#;

const INDEXES: &str = r#"
-- Indexes for the join-heavy listings
CREATE INDEX IF NOT EXISTS idx_products_category ON Products(CategoryID);
CREATE INDEX IF NOT EXISTS idx_products_supplier ON Products(SupplierID);
CREATE INDEX IF NOT EXISTS idx_orders_customer ON Orders(CustomerID);
CREATE INDEX IF NOT EXISTS idx_orderdetails_product ON OrderDetails(ProductID);
"#;
