use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bizportal_lib::types::RecordId;
use bizportal_lib::{
    load_page, FailureKind, ListQuery, PaginationMode, PaginationState, PortalClient, PortalError,
    Session,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn signed_in(server: &MockServer) -> PortalClient {
    let session = Session::in_memory();
    session.begin("tok-123", Some(&json!({"name": "Dana", "role": "admin"})));
    PortalClient::with_base_url(&server.uri(), session).unwrap()
}

fn customers(n: usize) -> Vec<serde_json::Value> {
    (1..=n)
        .map(|i| json!({"id": i, "name": format!("Customer {}", i)}))
        .collect()
}

#[tokio::test]
async fn bare_array_listing_is_decoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/it/tickets"))
        .and(query_param("status", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("tickets_bare.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let page = client
        .it()
        .tickets()
        .list(&ListQuery::default().with_filter("status", "open"))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total, 5);
    assert_eq!(page.items[0].title.as_deref(), Some("VPN drops every hour"));
    assert_eq!(page.items[1].id, Some(RecordId::Int(2)));
}

#[tokio::test]
async fn search_and_sort_are_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hr/employees"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "25"))
        .and(query_param("search", "smith"))
        .and(query_param("sortBy", "lastName"))
        .and(query_param("sortOrder", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "data": [{"firstName": "Ann", "lastName": "Smith"}],
                "pagination": {"total": 26, "pages": 2}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let query = ListQuery::default()
        .with_page(2)
        .with_limit(25)
        .with_search("  smith ")
        .with_sort_by("lastName")
        .with_sort_direction(bizportal_lib::SortDirection::Asc);
    let page = client.hr().employees().list(&query).await.unwrap();

    assert_eq!(page.total, 26);
    assert_eq!(page.items[0].full_name(), "Ann Smith");
}

#[tokio::test]
async fn missing_report_is_an_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sales/reports"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let page = client.sales().report(Some("monthly")).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn unauthorized_report_is_not_swallowed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounting/reports"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let err = client.accounting().financial_report(None).await.unwrap_err();
    assert_eq!(err.kind(), Some(FailureKind::Unauthorized));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn dashboard_summary_defaults_when_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let summary = client.dashboard().summary().await.unwrap();
    assert_eq!(summary, Default::default());
}

#[tokio::test]
async fn transfer_below_minimum_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounting/transfer"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let err = client
        .accounting()
        .transfer_funds(RecordId::Int(1), RecordId::Int(2), 0.5, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::InvalidInput(_)));

    let err = client
        .accounting()
        .transfer_funds(RecordId::Int(3), RecordId::Int(3), 50.0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::InvalidInput(_)));
}

#[tokio::test]
async fn transfer_posts_accounts_and_amount() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounting/transfer"))
        .and(body_json(json!({
            "fromAccountId": 1,
            "toAccountId": "acc-9",
            "amount": 250.0,
            "description": "Quarterly top-up"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 77, "amount": 250.0, "type": "transfer"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let tx = client
        .accounting()
        .transfer_funds(
            RecordId::Int(1),
            RecordId::from("acc-9"),
            250.0,
            Some("Quarterly top-up"),
        )
        .await
        .unwrap();
    assert_eq!(tx.id, Some(RecordId::Int(77)));
    assert_eq!(tx.amount, Some(250.0));
}

#[tokio::test]
async fn validation_errors_surface_the_first_field_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sales/customers"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(load_fixture("validation_error.json")),
        )
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let err = client
        .sales()
        .customers()
        .create(&json!({"name": "Initech", "email": "dup@initech.test"}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(FailureKind::Validation));
    assert_eq!(err.to_string(), "Email is already registered");
    assert_eq!(err.field_errors().len(), 2);
    assert_eq!(err.field_errors()[1].field, "phone");
}

#[tokio::test]
async fn status_change_patches_the_status_route() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/it/tickets/7/status"))
        .and(body_json(json!({"status": "resolved"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 7, "title": "Reset MFA token", "status": "resolved"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let ticket = client
        .it()
        .tickets()
        .update_status(&RecordId::Int(7), "resolved")
        .await
        .unwrap();
    assert_eq!(ticket.status.as_deref(), Some("resolved"));
}

#[tokio::test]
async fn update_puts_the_record_route() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/hr/departments/12"))
        .and(body_json(json!({"name": "Finance", "description": "Ledger and payroll"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 12, "name": "Finance", "employeeCount": "14"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let department = client
        .hr()
        .departments()
        .update(
            &RecordId::from("12"),
            &json!({"name": "Finance", "description": "Ledger and payroll"}),
        )
        .await
        .unwrap();
    assert_eq!(department.name.as_deref(), Some("Finance"));
    assert_eq!(department.employee_count, Some(14));
}

#[tokio::test]
async fn delete_accepts_an_empty_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/operations/suppliers/sup-4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    client
        .operations()
        .suppliers()
        .delete(&RecordId::from("sup-4"))
        .await
        .unwrap();
}

#[tokio::test]
async fn login_starts_a_session_without_sending_the_old_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "dana@corp.test", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "fresh-token",
            "user": {"id": 3, "name": "Dana", "email": "dana@corp.test", "role": "manager"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let user = client
        .auth()
        .login(" dana@corp.test ", "hunter2")
        .await
        .unwrap();

    assert_eq!(user.display_name(), "Dana");
    assert_eq!(client.session().token().as_deref(), Some("fresh-token"));
    assert_eq!(
        client.auth().cached_user().and_then(|u| u.role),
        Some("manager".to_string())
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(requests[0].headers.get("x-auth-token").is_none());
}

#[tokio::test]
async fn login_without_token_keeps_previous_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let err = client.auth().login("dana@corp.test", "pw").await.unwrap_err();
    assert_eq!(err.kind(), Some(FailureKind::Application));
    assert_eq!(client.session().token().as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn logout_clears_session_without_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let redirects = Arc::new(AtomicUsize::new(0));
    let counter = redirects.clone();
    let client = signed_in(&mock_server).on_unauthorized(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    assert!(client.auth().logout().await);
    assert!(!client.session().is_authenticated());
    assert_eq!(redirects.load(Ordering::SeqCst), 0);
    assert!(!client.auth().logout().await);
}

#[tokio::test]
async fn expired_session_fires_redirect_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
        .mount(&mock_server)
        .await;

    let redirects = Arc::new(AtomicUsize::new(0));
    let counter = redirects.clone();
    let client = signed_in(&mock_server).on_unauthorized(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let err = client.auth().current_user().await.unwrap_err();
    assert_eq!(err.to_string(), "jwt expired");
    let _ = client.auth().current_user().await.unwrap_err();
    assert_eq!(redirects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn full_first_page_without_totals_probes_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sales/customers"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(customers(10))))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sales/customers"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(customers(23))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let sales = client.sales();
    let resource = sales.customers();
    let resource = &resource;
    let mut state = PaginationState::new(10);

    let items = load_page(&mut state, 1, |page, limit| {
        let query = ListQuery::default().with_page(page).with_limit(limit);
        async move { resource.list(&query).await }
    })
    .await
    .unwrap();

    assert_eq!(items.len(), 10);
    assert_eq!(state.mode, PaginationMode::Estimated);
    assert_eq!((state.total_items, state.total_pages), (23, 3));
}

#[tokio::test]
async fn server_totals_skip_the_probe() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/marketing/leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": customers(10),
            "total": 57,
            "totalPages": 6
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let marketing = client.marketing();
    let resource = marketing.leads();
    let resource = &resource;
    let mut state = PaginationState::new(10);

    load_page(&mut state, 1, |page, limit| {
        let query = ListQuery::default().with_page(page).with_limit(limit);
        async move { resource.list(&query).await }
    })
    .await
    .unwrap();

    assert!(state.is_authoritative());
    assert_eq!((state.total_items, state.total_pages), (57, 6));
}

#[tokio::test]
async fn named_endpoint_resolves_to_its_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/operations/suppliers"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": customers(3),
            "total": 13
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let listing = client
        .list_named("operations.suppliers", &ListQuery::default().with_page(2))
        .await
        .unwrap();

    assert_eq!(listing.items.len(), 3);
    assert_eq!(listing.total, 13);
}

#[tokio::test]
async fn unknown_endpoint_name_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = signed_in(&mock_server);
    let err = client
        .list_named("sales.unicorns", &ListQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PortalError::InvalidInput(_)));
}
