//! The built-in catalog: three independently deployed backends sharing one dashboard.
use crate::{EndpointSpec, ServiceGroup};

/// Base URLs of the built-in services. `None` or an empty string leaves that service out of the
/// benchmark.
#[derive(Debug, Clone, Default)]
pub struct ServiceUrls {
    pub flask: Option<String>,
    pub go: Option<String>,
    pub express: Option<String>,
}

pub const FLASK_SERVICE: &str = "Flask API";
pub const GO_SERVICE: &str = "Go API";
pub const EXPRESS_SERVICE: &str = "Express API";

pub fn default_groups(urls: &ServiceUrls) -> Vec<ServiceGroup> {
    vec![
        flask_group(urls.flask.as_deref().unwrap_or_default()),
        go_group(urls.go.as_deref().unwrap_or_default()),
        express_group(urls.express.as_deref().unwrap_or_default()),
    ]
}

fn flask_group(base_url: &str) -> ServiceGroup {
    ServiceGroup::new(FLASK_SERVICE, base_url)
        .tech("Flask", "Python")
        .color("#3b82f6")
        .endpoint(EndpointSpec::get(
            "flask-root",
            "",
            "API Root",
            "Service information and list of available endpoints.",
        ))
        .endpoint(EndpointSpec::get(
            "flask-health",
            "/health",
            "Health Check",
            "Health status of the Flask API service.",
        ))
        .endpoint(EndpointSpec::get(
            "flask-revenue",
            "/revenue",
            "Monthly Revenue",
            "Monthly revenue for the current year with growth percentages.",
        ))
        .endpoint(EndpointSpec::get(
            "flask-revenue-summary",
            "/revenue/summary",
            "Revenue Summary",
            "Total revenue, MRR, ARR, net profit and runway.",
        ))
        .endpoint(EndpointSpec::get(
            "flask-expenses",
            "/expenses",
            "Expenses",
            "Expenses by category with percentages.",
        ))
        .endpoint(EndpointSpec::get(
            "flask-transactions",
            "/transactions",
            "Transactions",
            "Recent transactions with amounts, types and dates.",
        ))
        .endpoint(EndpointSpec::get(
            "flask-projections",
            "/projections",
            "Projections",
            "Revenue projections for next quarter and year.",
        ))
        .endpoint(EndpointSpec::post(
            "flask-add-revenue",
            "/revenue",
            "Add Revenue",
            "Create a new revenue entry.",
        ))
        .endpoint(EndpointSpec::post(
            "flask-add-expense",
            "/expenses",
            "Add Expense",
            "Create a new expense entry.",
        ))
}

fn go_group(base_url: &str) -> ServiceGroup {
    ServiceGroup::new(GO_SERVICE, base_url)
        .tech("Go", "Go")
        .color("#00c853")
        .endpoint(EndpointSpec::get(
            "go-root",
            "",
            "API Root",
            "Service information and list of available endpoints.",
        ))
        .endpoint(EndpointSpec::get(
            "go-health",
            "/health",
            "Health Check",
            "Health status of the Go API service.",
        ))
        .endpoint(EndpointSpec::get(
            "go-realtime",
            "/analytics/realtime",
            "Real-time Analytics",
            "Active users, request rate, CPU/memory usage and error rates.",
        ))
        .endpoint(EndpointSpec::get(
            "go-risk",
            "/analytics/risk",
            "Risk Analysis",
            "Monte Carlo risk assessment with VaR and risk factors.",
        ))
        .endpoint(EndpointSpec::get(
            "go-forecast",
            "/analytics/forecast",
            "Revenue Forecast",
            "12 month revenue forecast with confidence intervals.",
        ))
        .endpoint(EndpointSpec::get(
            "go-benchmark",
            "/analytics/benchmark",
            "Industry Benchmark",
            "Company metrics against industry medians.",
        ))
}

fn express_group(base_url: &str) -> ServiceGroup {
    ServiceGroup::new(EXPRESS_SERVICE, base_url)
        .tech("Express", "Node.js")
        .color("#f59e0b")
        .endpoint(EndpointSpec::get(
            "express-root",
            "",
            "API Root",
            "Service information and list of available endpoints.",
        ))
        .endpoint(EndpointSpec::get(
            "express-health",
            "/health",
            "Health Check",
            "Health status of the Express API service.",
        ))
        .endpoint(EndpointSpec::get(
            "express-users",
            "/users",
            "Users",
            "Users with plan, status and spend details.",
        ))
        .endpoint(EndpointSpec::get(
            "express-user-stats",
            "/users/stats",
            "User Stats",
            "Total, active, trial and churned users with activation rate.",
        ))
        .endpoint(EndpointSpec::get(
            "express-subscriptions",
            "/subscriptions",
            "Subscriptions",
            "Subscription plans with active counts and MRR per plan.",
        ))
        .endpoint(EndpointSpec::get(
            "express-mrr",
            "/subscriptions/mrr",
            "MRR Breakdown",
            "Total MRR, ARR, paying customers, ARPU and MRR trend.",
        ))
        .endpoint(EndpointSpec::get(
            "express-churn",
            "/churn",
            "Churn Analysis",
            "Monthly churn rates, recovered users and top churn reasons.",
        ))
        .endpoint(EndpointSpec::post(
            "express-add-user",
            "/users",
            "Add User",
            "Create a new user account.",
        ))
}
