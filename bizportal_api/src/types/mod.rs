mod common;
pub use self::common::{lenient_f64, lenient_u64, RecordId};

mod meta;
pub use self::meta::Page;

mod auth;
pub use self::auth::{LoginRequest, User};

mod hr;
pub use self::hr::{Department, Employee, HeadcountRow, LeaveRequest};

mod sales;
pub use self::sales::{Customer, Order, SalesReportRow};

mod it;
pub use self::it::{Asset, Ticket};

mod marketing;
pub use self::marketing::{Campaign, CampaignPerformance, Lead};

mod operations;
pub use self::operations::{InventoryItem, PurchaseOrder, Supplier};

mod accounting;
pub use self::accounting::{Account, FinancialReportRow, Invoice, Transaction, TransferRequest};

mod dashboard;
pub use self::dashboard::{ActivityEntry, DashboardSummary};
