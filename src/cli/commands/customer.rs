use chrono::NaiveDate;
use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_optional};
use crate::db::{Customer, CustomerRepository, Database};

#[derive(Tabled)]
pub(crate) struct CustomerDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Email")]
    pub(crate) email: String,
    #[tabled(rename = "Balance")]
    pub(crate) balance: i32,
    #[tabled(rename = "Rating")]
    pub(crate) rating: f64,
    #[tabled(rename = "Birth Date")]
    pub(crate) birth_date: String,
    #[tabled(rename = "Married")]
    pub(crate) married: bool,
    #[tabled(rename = "Created")]
    pub(crate) created_at: String,
}

impl From<&Customer> for CustomerDisplay {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            email: format_optional(customer.email.as_ref()),
            balance: customer.balance,
            rating: customer.rating,
            birth_date: format_optional(customer.birth_date.as_ref()),
            married: customer.married,
            created_at: format_optional(customer.created_at.as_ref()),
        }
    }
}

/// Values for a new customer row, as collected from the command line
#[derive(Debug, Default)]
pub struct NewCustomer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub balance: i32,
    pub rating: f64,
    pub birth_date: Option<NaiveDate>,
    pub married: bool,
}

impl From<NewCustomer> for Customer {
    fn from(new: NewCustomer) -> Self {
        Customer {
            id: new.id,
            name: new.name,
            // An empty flag value means "no email", not an empty string.
            email: new.email.filter(|e| !e.is_empty()),
            balance: new.balance,
            rating: new.rating,
            birth_date: new.birth_date,
            married: new.married,
            created_at: None,
        }
    }
}

/// Insert one customer
pub async fn add_customer<D: Database>(db: &D, new: NewCustomer) -> CliResult<String> {
    let customer: Customer = new.into();
    db.customers().create(&customer).await?;
    Ok(format!("✓ Inserted customer {}", customer.id))
}

/// List every customer
pub async fn list_customers<D: Database>(db: &D, format: &str) -> CliResult<String> {
    let customers = db.customers().list().await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&customers)?),
        _ => Ok(format_table(&customers)),
    }
}

pub(crate) fn format_table(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return "No customers found.".to_string();
    }

    let display: Vec<CustomerDisplay> = customers.iter().map(|c| c.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}
