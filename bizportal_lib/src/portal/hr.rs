//! HR: employees, departments, leave requests and the headcount report.

use bizportal_api::endpoints::hr;
use bizportal_api::types::{Department, Employee, HeadcountRow, LeaveRequest, Page};
use bizportal_api::Client;

use crate::error::PortalError;
use crate::resource::{optional_listing, Resource};

pub struct Hr<'a> {
    client: &'a Client,
}

impl<'a> Hr<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn employees(&self) -> Resource<'a, Employee> {
        Resource::new(self.client, hr::EMPLOYEES, "employees")
    }

    pub fn departments(&self) -> Resource<'a, Department> {
        Resource::new(self.client, hr::DEPARTMENTS, "departments")
    }

    pub fn leave_requests(&self) -> Resource<'a, LeaveRequest> {
        Resource::new(self.client, hr::LEAVE_REQUESTS, "leave requests")
    }

    /// Headcount per department. Empty when the report is not available.
    pub async fn headcount_report(&self) -> Result<Page<HeadcountRow>, PortalError> {
        optional_listing(self.client, hr::REPORT, "HR report", Vec::new()).await
    }
}
