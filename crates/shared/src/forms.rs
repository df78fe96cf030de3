//! Form payloads submitted by the registration and record pages.
//!
//! Every form deserializes with defaults for missing fields so that an
//! incomplete submission re-renders the page with field messages instead of
//! failing at the extractor.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::types::{Currency, RoleGroup};

/// Company part of the company + manager registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CompanyForm {
    /// Company name.
    #[validate(length(min = 1, max = 200, message = "Company name is required."))]
    pub name: String,
    /// Tax identification number.
    #[validate(length(max = 32, message = "Tax ID is too long."))]
    pub tax_id: Option<String>,
    /// Base currency code; revenue totals are reported in it.
    #[validate(custom(function = "supported_currency"))]
    pub base_currency: String,
}

/// Manager part of the company + manager registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ManagerForm {
    /// Login name.
    #[validate(length(min = 3, max = 150, message = "Username must be 3-150 characters."))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    /// First name.
    #[validate(length(min = 1, max = 150, message = "First name is required."))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1, max = 150, message = "Last name is required."))]
    pub last_name: String,
    /// Password.
    #[serde(skip_serializing)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
    /// Password confirmation.
    #[serde(skip_serializing)]
    pub password_repeated: String,
}

impl ManagerForm {
    /// Returns true if both password fields hold the same value.
    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.password == self.password_repeated
    }
}

/// Body of `POST /register`: both forms are submitted together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationRequest {
    /// Company form.
    pub company: CompanyForm,
    /// Manager form.
    pub manager: ManagerForm,
}

/// Form a manager fills in to onboard an employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EmployeeForm {
    /// Login name.
    #[validate(length(min = 3, max = 150, message = "Username must be 3-150 characters."))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    /// First name.
    #[validate(length(min = 1, max = 150, message = "First name is required."))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1, max = 150, message = "Last name is required."))]
    pub last_name: String,
    /// Role group name (`Managers` or `Employees`).
    #[validate(custom(function = "known_role_group"))]
    pub group: String,
}

impl EmployeeForm {
    /// Returns the parsed role group, if the name is known.
    #[must_use]
    pub fn role_group(&self) -> Option<RoleGroup> {
        RoleGroup::from_str(&self.group).ok()
    }
}

/// Add-revenue form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RevenueForm {
    /// Invoice or document number.
    #[validate(length(min = 1, max = 64, message = "Document number is required."))]
    pub document_number: String,
    /// Customer name.
    #[validate(length(max = 200))]
    pub customer: Option<String>,
    /// Document (issue) date.
    #[validate(required(message = "Document date is required."))]
    pub document_date: Option<NaiveDate>,
    /// Date the payment is expected.
    pub expected_payment_date: Option<NaiveDate>,
    /// Document currency code.
    #[validate(custom(function = "supported_currency"))]
    pub currency: String,
    /// Net amount in the document currency.
    #[validate(custom(function = "non_negative"))]
    pub net_amount: Decimal,
    /// Net amount converted to the company base currency.
    #[validate(custom(function = "non_negative"))]
    pub net_amount_converted: Decimal,
    /// Whether the payment has cleared.
    pub settlement_status: bool,
}

/// Add-expense form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ExpenseForm {
    /// Invoice or document number.
    #[validate(length(min = 1, max = 64, message = "Document number is required."))]
    pub document_number: String,
    /// Vendor name.
    #[validate(length(max = 200))]
    pub vendor: Option<String>,
    /// Expense category.
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// Document (issue) date.
    #[validate(required(message = "Document date is required."))]
    pub document_date: Option<NaiveDate>,
    /// Date the payment is expected.
    pub expected_payment_date: Option<NaiveDate>,
    /// Net amount.
    #[validate(custom(function = "non_negative"))]
    pub net_amount: Decimal,
    /// Whether the payment has cleared.
    pub settlement_status: bool,
}

fn supported_currency(code: &str) -> Result<(), ValidationError> {
    Currency::from_str(code).map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("currency");
        error.message = Some("Unsupported currency.".into());
        error
    })
}

fn known_role_group(name: &str) -> Result<(), ValidationError> {
    RoleGroup::from_str(name).map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("group");
        error.message = Some("Choose Managers or Employees.".into());
        error
    })
}

fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("Amount cannot be negative.".into());
        return Err(error);
    }
    Ok(())
}

/// Flattens validator output into `field -> messages`, sorted by field name.
#[must_use]
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| format!("Invalid value ({}).", e.code), ToString::to_string)
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
