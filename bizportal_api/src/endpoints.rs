//! Static registry of logical endpoint names and their URL paths.

pub mod auth {
    pub const LOGIN: &str = "/auth/login";
    pub const LOGOUT: &str = "/auth/logout";
    pub const PROFILE: &str = "/auth/me";
}

pub mod hr {
    pub const EMPLOYEES: &str = "/hr/employees";
    pub const DEPARTMENTS: &str = "/hr/departments";
    pub const LEAVE_REQUESTS: &str = "/hr/leave-requests";
    pub const REPORT: &str = "/hr/reports";
}

pub mod sales {
    pub const CUSTOMERS: &str = "/sales/customers";
    pub const ORDERS: &str = "/sales/orders";
    pub const REPORT: &str = "/sales/reports";
}

pub mod it {
    pub const ASSETS: &str = "/it/assets";
    pub const TICKETS: &str = "/it/tickets";
}

pub mod marketing {
    pub const CAMPAIGNS: &str = "/marketing/campaigns";
    pub const LEADS: &str = "/marketing/leads";
    pub const PERFORMANCE: &str = "/marketing/campaigns/performance";
}

pub mod operations {
    pub const INVENTORY: &str = "/operations/inventory";
    pub const SUPPLIERS: &str = "/operations/suppliers";
    pub const PURCHASE_ORDERS: &str = "/operations/purchase-orders";
}

pub mod accounting {
    pub const ACCOUNTS: &str = "/accounting/accounts";
    pub const TRANSACTIONS: &str = "/accounting/transactions";
    pub const INVOICES: &str = "/accounting/invoices";
    pub const TRANSFER: &str = "/accounting/transfer";
    pub const REPORT: &str = "/accounting/reports";
}

pub mod dashboard {
    pub const SUMMARY: &str = "/dashboard/stats";
    pub const ACTIVITY: &str = "/dashboard/activity";
}

/// Logical name to path mapping, e.g. `("sales.customers", "/sales/customers")`.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("auth.login", auth::LOGIN),
    ("auth.logout", auth::LOGOUT),
    ("auth.profile", auth::PROFILE),
    ("hr.employees", hr::EMPLOYEES),
    ("hr.departments", hr::DEPARTMENTS),
    ("hr.leave_requests", hr::LEAVE_REQUESTS),
    ("hr.report", hr::REPORT),
    ("sales.customers", sales::CUSTOMERS),
    ("sales.orders", sales::ORDERS),
    ("sales.report", sales::REPORT),
    ("it.assets", it::ASSETS),
    ("it.tickets", it::TICKETS),
    ("marketing.campaigns", marketing::CAMPAIGNS),
    ("marketing.leads", marketing::LEADS),
    ("marketing.performance", marketing::PERFORMANCE),
    ("operations.inventory", operations::INVENTORY),
    ("operations.suppliers", operations::SUPPLIERS),
    ("operations.purchase_orders", operations::PURCHASE_ORDERS),
    ("accounting.accounts", accounting::ACCOUNTS),
    ("accounting.transactions", accounting::TRANSACTIONS),
    ("accounting.invoices", accounting::INVOICES),
    ("accounting.transfer", accounting::TRANSFER),
    ("accounting.report", accounting::REPORT),
    ("dashboard.summary", dashboard::SUMMARY),
    ("dashboard.activity", dashboard::ACTIVITY),
];

/// Looks up the path registered for a logical endpoint name.
pub fn lookup(name: &str) -> Option<&'static str> {
    ENDPOINTS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, path)| *path)
}

/// Path of a single record below a collection endpoint.
pub fn record_path(collection: &str, id: impl std::fmt::Display) -> String {
    format!("{}/{}", collection.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_name() {
        assert_eq!(lookup("sales.customers"), Some("/sales/customers"));
        assert_eq!(lookup("auth.login"), Some(auth::LOGIN));
    }

    #[test]
    fn lookup_unknown_name() {
        assert_eq!(lookup("sales.unicorns"), None);
    }

    #[test]
    fn registry_names_are_unique() {
        let mut names: Vec<&str> = ENDPOINTS.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn record_path_joins_id() {
        assert_eq!(record_path("/hr/employees", 42), "/hr/employees/42");
        assert_eq!(record_path("/hr/employees/", "abc"), "/hr/employees/abc");
    }
}
