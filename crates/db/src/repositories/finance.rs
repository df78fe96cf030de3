//! Finance repository: revenue and expense records and the dashboard totals.
//!
//! Totals narrow the rows in SQL by company and date, then hand them to the
//! calculators in `finboard_core::aggregation`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use finboard_core::aggregation::{self, DateRange, ExpenseRecord, RevenueRecord};
use finboard_core::dashboard::{
    CashFlowStatement, IncomeStatement, MainDashboard, ManagerDashboard,
};
use finboard_core::period;
use finboard_shared::types::{CompanyId, PageRequest};

use crate::entities::{expenses, revenues};

/// Input for recording a revenue document.
#[derive(Debug, Clone)]
pub struct NewRevenue {
    /// Invoice number.
    pub document_number: String,
    /// Customer name.
    pub customer: Option<String>,
    /// Issue date.
    pub document_date: NaiveDate,
    /// Expected payment date.
    pub expected_payment_date: Option<NaiveDate>,
    /// ISO 4217 code of the document currency.
    pub currency: String,
    /// Net amount in the document currency.
    pub net_amount: Decimal,
    /// Net amount in the company base currency.
    pub net_amount_converted: Decimal,
    /// Whether the payment has cleared.
    pub settlement_status: bool,
}

/// Input for recording an expense document.
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// Invoice number.
    pub document_number: String,
    /// Vendor name.
    pub vendor: Option<String>,
    /// Expense category.
    pub category: Option<String>,
    /// Issue date.
    pub document_date: NaiveDate,
    /// Expected payment date.
    pub expected_payment_date: Option<NaiveDate>,
    /// Net amount.
    pub net_amount: Decimal,
    /// Whether the payment has cleared.
    pub settlement_status: bool,
}

fn revenue_record(model: revenues::Model) -> RevenueRecord {
    RevenueRecord {
        company_id: CompanyId::from_uuid(model.company_id),
        document_date: model.document_date,
        expected_payment_date: model.expected_payment_date,
        settlement_status: model.settlement_status,
        net_amount: model.net_amount,
        net_amount_converted: model.net_amount_converted,
    }
}

fn expense_record(model: expenses::Model) -> ExpenseRecord {
    ExpenseRecord {
        company_id: CompanyId::from_uuid(model.company_id),
        document_date: model.document_date,
        expected_payment_date: model.expected_payment_date,
        settlement_status: model.settlement_status,
        net_amount: model.net_amount,
    }
}

/// Finance repository.
#[derive(Debug, Clone)]
pub struct FinanceRepository {
    db: DatabaseConnection,
}

impl FinanceRepository {
    /// Creates a new finance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Totals
    // ========================================================================

    async fn revenues_by_document_date(
        &self,
        company_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<RevenueRecord>, DbErr> {
        let rows = revenues::Entity::find()
            .filter(revenues::Column::CompanyId.eq(company_id))
            .filter(revenues::Column::DocumentDate.between(range.start(), range.end()))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(revenue_record).collect())
    }

    async fn settled_revenues_by_payment_date(
        &self,
        company_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<RevenueRecord>, DbErr> {
        let rows = revenues::Entity::find()
            .filter(revenues::Column::CompanyId.eq(company_id))
            .filter(revenues::Column::SettlementStatus.eq(true))
            .filter(revenues::Column::ExpectedPaymentDate.between(range.start(), range.end()))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(revenue_record).collect())
    }

    async fn expenses_by_document_date(
        &self,
        company_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<ExpenseRecord>, DbErr> {
        let rows = expenses::Entity::find()
            .filter(expenses::Column::CompanyId.eq(company_id))
            .filter(expenses::Column::DocumentDate.between(range.start(), range.end()))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(expense_record).collect())
    }

    async fn settled_expenses_by_payment_date(
        &self,
        company_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<ExpenseRecord>, DbErr> {
        let rows = expenses::Entity::find()
            .filter(expenses::Column::CompanyId.eq(company_id))
            .filter(expenses::Column::SettlementStatus.eq(true))
            .filter(expenses::Column::ExpectedPaymentDate.between(range.start(), range.end()))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(expense_record).collect())
    }

    /// Revenue in the company base currency, by document date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revenue_total(
        &self,
        company_id: Uuid,
        range: &DateRange,
    ) -> Result<Decimal, DbErr> {
        let records = self.revenues_by_document_date(company_id, range).await?;
        Ok(aggregation::revenue_total(
            CompanyId::from_uuid(company_id),
            range,
            &records,
        ))
    }

    /// Expenses by document date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn expense_total(
        &self,
        company_id: Uuid,
        range: &DateRange,
    ) -> Result<Decimal, DbErr> {
        let records = self.expenses_by_document_date(company_id, range).await?;
        Ok(aggregation::expense_total(
            CompanyId::from_uuid(company_id),
            range,
            &records,
        ))
    }

    /// Settled revenue by expected payment date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn receipt_total(
        &self,
        company_id: Uuid,
        range: &DateRange,
    ) -> Result<Decimal, DbErr> {
        let records = self
            .settled_revenues_by_payment_date(company_id, range)
            .await?;
        Ok(aggregation::receipt_total(
            CompanyId::from_uuid(company_id),
            range,
            &records,
        ))
    }

    /// Settled expenses by expected payment date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn expenditure_total(
        &self,
        company_id: Uuid,
        range: &DateRange,
    ) -> Result<Decimal, DbErr> {
        let records = self
            .settled_expenses_by_payment_date(company_id, range)
            .await?;
        Ok(aggregation::expenditure_total(
            CompanyId::from_uuid(company_id),
            range,
            &records,
        ))
    }

    // ========================================================================
    // Dashboards
    // ========================================================================

    /// Builds the main dashboard as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if any database query fails.
    pub async fn main_dashboard(
        &self,
        company_id: Uuid,
        today: NaiveDate,
    ) -> Result<MainDashboard, DbErr> {
        Ok(MainDashboard {
            current_month_revenue: self.revenue_total(company_id, &period::month(today)).await?,
            last_month_revenue: self
                .revenue_total(company_id, &period::previous_month(today))
                .await?,
            annual_revenue: self.revenue_total(company_id, &period::year(today)).await?,
        })
    }

    /// Builds the manager dashboard for `today`'s year.
    ///
    /// # Errors
    ///
    /// Returns an error if any database query fails.
    pub async fn manager_dashboard(
        &self,
        company_id: Uuid,
        today: NaiveDate,
    ) -> Result<ManagerDashboard, DbErr> {
        let year = period::year(today);

        Ok(ManagerDashboard::new(
            self.revenue_total(company_id, &year).await?,
            self.expense_total(company_id, &year).await?,
            self.receipt_total(company_id, &year).await?,
            self.expenditure_total(company_id, &year).await?,
        ))
    }

    /// Builds the income statement for `today`'s year.
    ///
    /// # Errors
    ///
    /// Returns an error if any database query fails.
    pub async fn income_statement(
        &self,
        company_id: Uuid,
        today: NaiveDate,
    ) -> Result<IncomeStatement, DbErr> {
        let year = period::year(today);
        let revenues = self.revenue_total(company_id, &year).await?;
        let expenses = self.expense_total(company_id, &year).await?;

        Ok(IncomeStatement::new(&year, revenues, expenses))
    }

    /// Builds the cash flow statement for `today`'s year.
    ///
    /// # Errors
    ///
    /// Returns an error if any database query fails.
    pub async fn cash_flow(
        &self,
        company_id: Uuid,
        today: NaiveDate,
    ) -> Result<CashFlowStatement, DbErr> {
        let year = period::year(today);
        let receipts = self.receipt_total(company_id, &year).await?;
        let expenditures = self.expenditure_total(company_id, &year).await?;

        Ok(CashFlowStatement::new(&year, receipts, expenditures))
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Lists a company's revenues by document date, oldest first.
    ///
    /// Returns the page of rows and the total row count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_revenues(
        &self,
        company_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<revenues::Model>, u64), DbErr> {
        let query = revenues::Entity::find().filter(revenues::Column::CompanyId.eq(company_id));
        let total = query.clone().count(&self.db).await?;

        let rows = query
            .order_by_asc(revenues::Column::DocumentDate)
            .order_by_asc(revenues::Column::DocumentNumber)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Lists a company's expenses by document date, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_expenses(
        &self,
        company_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<expenses::Model>, u64), DbErr> {
        let query = expenses::Entity::find().filter(expenses::Column::CompanyId.eq(company_id));
        let total = query.clone().count(&self.db).await?;

        let rows = query
            .order_by_asc(expenses::Column::DocumentDate)
            .order_by_asc(expenses::Column::DocumentNumber)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Records a revenue document for a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_revenue(
        &self,
        company_id: Uuid,
        input: NewRevenue,
    ) -> Result<revenues::Model, DbErr> {
        let revenue = revenues::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            document_number: Set(input.document_number),
            customer: Set(input.customer),
            document_date: Set(input.document_date),
            expected_payment_date: Set(input.expected_payment_date),
            currency: Set(input.currency),
            net_amount: Set(input.net_amount),
            net_amount_converted: Set(input.net_amount_converted),
            settlement_status: Set(input.settlement_status),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(%company_id, revenue_id = %revenue.id, "revenue recorded");
        Ok(revenue)
    }

    /// Records an expense document for a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_expense(
        &self,
        company_id: Uuid,
        input: NewExpense,
    ) -> Result<expenses::Model, DbErr> {
        let expense = expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            document_number: Set(input.document_number),
            vendor: Set(input.vendor),
            category: Set(input.category),
            document_date: Set(input.document_date),
            expected_payment_date: Set(input.expected_payment_date),
            net_amount: Set(input.net_amount),
            settlement_status: Set(input.settlement_status),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(%company_id, expense_id = %expense.id, "expense recorded");
        Ok(expense)
    }
}
