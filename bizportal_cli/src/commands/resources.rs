use clap::ValueEnum;

use crate::output::{date, money, text, Column};

/// Collections reachable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Employees,
    Departments,
    LeaveRequests,
    Customers,
    Orders,
    Assets,
    Tickets,
    Campaigns,
    Leads,
    Inventory,
    Suppliers,
    PurchaseOrders,
    Accounts,
    Transactions,
    Invoices,
}

impl ResourceKind {
    /// Plural label used in page summaries.
    pub fn label(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Departments => "departments",
            Self::LeaveRequests => "leave requests",
            Self::Customers => "customers",
            Self::Orders => "orders",
            Self::Assets => "assets",
            Self::Tickets => "tickets",
            Self::Campaigns => "campaigns",
            Self::Leads => "leads",
            Self::Inventory => "inventory items",
            Self::Suppliers => "suppliers",
            Self::PurchaseOrders => "purchase orders",
            Self::Accounts => "accounts",
            Self::Transactions => "transactions",
            Self::Invoices => "invoices",
        }
    }

    pub fn columns(self) -> &'static [Column] {
        match self {
            Self::Employees => EMPLOYEES,
            Self::Departments => DEPARTMENTS,
            Self::LeaveRequests => LEAVE_REQUESTS,
            Self::Customers => CUSTOMERS,
            Self::Orders => ORDERS,
            Self::Assets => ASSETS,
            Self::Tickets => TICKETS,
            Self::Campaigns => CAMPAIGNS,
            Self::Leads => LEADS,
            Self::Inventory => INVENTORY,
            Self::Suppliers => SUPPLIERS,
            Self::PurchaseOrders => PURCHASE_ORDERS,
            Self::Accounts => ACCOUNTS,
            Self::Transactions => TRANSACTIONS,
            Self::Invoices => INVOICES,
        }
    }
}

const EMPLOYEES: &[Column] = &[
    text("id", "ID"),
    text("firstName", "First Name"),
    text("lastName", "Last Name"),
    text("email", "Email"),
    text("position", "Position"),
    text("department", "Department"),
    text("status", "Status"),
];

const DEPARTMENTS: &[Column] = &[
    text("id", "ID"),
    text("name", "Name"),
    text("manager", "Manager"),
    text("employeeCount", "Employees"),
];

const LEAVE_REQUESTS: &[Column] = &[
    text("id", "ID"),
    text("employeeId", "Employee"),
    text("leaveType", "Type"),
    date("startDate", "From"),
    date("endDate", "To"),
    text("status", "Status"),
];

const CUSTOMERS: &[Column] = &[
    text("id", "ID"),
    text("name", "Name"),
    text("company", "Company"),
    text("email", "Email"),
    text("phone", "Phone"),
    text("status", "Status"),
];

const ORDERS: &[Column] = &[
    text("id", "ID"),
    text("orderNumber", "Order"),
    text("customerId", "Customer"),
    money("totalAmount", "Total"),
    date("orderDate", "Date"),
    text("status", "Status"),
];

const ASSETS: &[Column] = &[
    text("id", "ID"),
    text("name", "Name"),
    text("assetType", "Type"),
    text("serialNumber", "Serial"),
    text("assignedTo", "Assigned To"),
    text("status", "Status"),
];

const TICKETS: &[Column] = &[
    text("id", "ID"),
    text("title", "Title"),
    text("priority", "Priority"),
    text("assignedTo", "Assigned To"),
    date("createdAt", "Opened"),
    text("status", "Status"),
];

const CAMPAIGNS: &[Column] = &[
    text("id", "ID"),
    text("name", "Name"),
    text("channel", "Channel"),
    money("budget", "Budget"),
    date("startDate", "Start"),
    date("endDate", "End"),
    text("status", "Status"),
];

const LEADS: &[Column] = &[
    text("id", "ID"),
    text("name", "Name"),
    text("email", "Email"),
    text("source", "Source"),
    text("status", "Status"),
];

const INVENTORY: &[Column] = &[
    text("id", "ID"),
    text("sku", "SKU"),
    text("name", "Name"),
    text("quantity", "Qty"),
    text("reorderLevel", "Reorder At"),
    money("unitPrice", "Unit Price"),
];

const SUPPLIERS: &[Column] = &[
    text("id", "ID"),
    text("name", "Name"),
    text("contactName", "Contact"),
    text("email", "Email"),
    text("rating", "Rating"),
];

const PURCHASE_ORDERS: &[Column] = &[
    text("id", "ID"),
    text("poNumber", "PO"),
    text("supplierId", "Supplier"),
    money("totalAmount", "Total"),
    date("expectedDate", "Expected"),
    text("status", "Status"),
];

const ACCOUNTS: &[Column] = &[
    text("id", "ID"),
    text("accountNumber", "Number"),
    text("name", "Name"),
    text("accountType", "Type"),
    money("balance", "Balance"),
    text("currency", "Currency"),
];

const TRANSACTIONS: &[Column] = &[
    text("id", "ID"),
    date("date", "Date"),
    text("accountId", "Account"),
    text("transactionType", "Type"),
    money("amount", "Amount"),
    text("description", "Description"),
];

const INVOICES: &[Column] = &[
    text("id", "ID"),
    text("invoiceNumber", "Invoice"),
    text("customer", "Customer"),
    money("amount", "Amount"),
    date("dueDate", "Due"),
    text("status", "Status"),
];

/// Binds `$r` to the typed [`Resource`](bizportal_lib::Resource) for `$kind`
/// and evaluates `$body` with it. Every arm must produce the same type.
macro_rules! with_resource {
    ($client:expr, $kind:expr, |$r:ident| $body:expr) => {{
        use $crate::commands::resources::ResourceKind as K;
        let client = $client;
        match $kind {
            K::Employees => {
                let $r = client.hr().employees();
                $body
            }
            K::Departments => {
                let $r = client.hr().departments();
                $body
            }
            K::LeaveRequests => {
                let $r = client.hr().leave_requests();
                $body
            }
            K::Customers => {
                let $r = client.sales().customers();
                $body
            }
            K::Orders => {
                let $r = client.sales().orders();
                $body
            }
            K::Assets => {
                let $r = client.it().assets();
                $body
            }
            K::Tickets => {
                let $r = client.it().tickets();
                $body
            }
            K::Campaigns => {
                let $r = client.marketing().campaigns();
                $body
            }
            K::Leads => {
                let $r = client.marketing().leads();
                $body
            }
            K::Inventory => {
                let $r = client.operations().inventory();
                $body
            }
            K::Suppliers => {
                let $r = client.operations().suppliers();
                $body
            }
            K::PurchaseOrders => {
                let $r = client.operations().purchase_orders();
                $body
            }
            K::Accounts => {
                let $r = client.accounting().accounts();
                $body
            }
            K::Transactions => {
                let $r = client.accounting().transactions();
                $body
            }
            K::Invoices => {
                let $r = client.accounting().invoices();
                $body
            }
        }
    }};
}

pub(crate) use with_resource;
