//! Accounting: ledger accounts, transactions, invoices, transfers and the
//! financial report.

use bizportal_api::endpoints::accounting;
use bizportal_api::types::{
    Account, FinancialReportRow, Invoice, Page, RecordId, Transaction, TransferRequest,
};
use bizportal_api::{unwrap_record, Client};
use reqwest::Method;

use crate::error::PortalError;
use crate::messages::report;
use crate::resource::{optional_listing, Resource};
use crate::validation::check_amount;

pub struct Accounting<'a> {
    client: &'a Client,
}

impl<'a> Accounting<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn accounts(&self) -> Resource<'a, Account> {
        Resource::new(self.client, accounting::ACCOUNTS, "accounts")
    }

    pub fn transactions(&self) -> Resource<'a, Transaction> {
        Resource::new(self.client, accounting::TRANSACTIONS, "transactions")
    }

    pub fn invoices(&self) -> Resource<'a, Invoice> {
        Resource::new(self.client, accounting::INVOICES, "invoices")
    }

    /// Moves money between two accounts.
    ///
    /// Rejects amounts below 1 and transfers to the same account without
    /// contacting the backend. Returns the resulting transaction.
    pub async fn transfer_funds(
        &self,
        from: RecordId,
        to: RecordId,
        amount: f64,
        description: Option<&str>,
    ) -> Result<Transaction, PortalError> {
        let amount = check_amount(amount)?;
        if from == to {
            return Err(PortalError::InvalidInput(
                "source and destination accounts must differ".to_string(),
            ));
        }
        let request = TransferRequest {
            from_account_id: from,
            to_account_id: to,
            amount,
            description: description.map(str::to_string),
        };
        let value = self
            .client
            .send_json(Method::POST, accounting::TRANSFER, Some(&request))
            .await
            .map_err(|e| report("transfer funds", e))?;
        Ok(serde_json::from_value(unwrap_record(value))?)
    }

    /// Revenue and expenses per period. Empty when the report is not available.
    pub async fn financial_report(
        &self,
        period: Option<&str>,
    ) -> Result<Page<FinancialReportRow>, PortalError> {
        let query = period
            .map(|p| vec![("period".to_string(), p.to_string())])
            .unwrap_or_default();
        optional_listing(self.client, accounting::REPORT, "financial report", query).await
    }
}
