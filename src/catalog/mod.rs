//! Plans shown on the public pricing page

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "usd", rename_all = "snake_case")]
pub enum PlanPrice {
    Free,
    /// Whole US dollars per month
    Monthly(u32),
    Custom,
}

impl fmt::Display for PlanPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanPrice::Free => write!(f, "Free"),
            PlanPrice::Monthly(usd) => write!(f, "${}/month", usd),
            PlanPrice::Custom => write!(f, "Custom"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiLimits {
    pub requests: &'static str,
    pub rate_limit: &'static str,
    pub features: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub name: &'static str,
    pub price: PlanPrice,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub api_limits: ApiLimits,
    pub cta: &'static str,
    pub cta_link: &'static str,
    pub popular: bool,
}

static PLANS: [Plan; 3] = [
    Plan {
        name: "Starter",
        price: PlanPrice::Free,
        description: "Perfect for small businesses getting started with carbon tracking",
        features: &[
            "Up to 100 emission entries per month",
            "Basic emission tracking",
            "Standard marketplace access",
            "Email support",
            "Basic analytics dashboard",
            "Up to 5 team members",
        ],
        api_limits: ApiLimits {
            requests: "1,000 requests/month",
            rate_limit: "10 requests/minute",
            features: &["Emission estimation API", "Basic offset API"],
        },
        cta: "Get Started Free",
        cta_link: "/register",
        popular: false,
    },
    Plan {
        name: "Professional",
        price: PlanPrice::Monthly(99),
        description: "Ideal for growing companies with serious sustainability goals",
        features: &[
            "Up to 1,000 emission entries per month",
            "Advanced emission tracking with categorization",
            "Priority marketplace access",
            "AI-powered recommendations",
            "Advanced analytics and reporting",
            "Up to 25 team members",
            "Blockchain verification certificates",
            "Email & chat support",
        ],
        api_limits: ApiLimits {
            requests: "10,000 requests/month",
            rate_limit: "100 requests/minute",
            features: &["Full API access", "Webhook notifications", "Bulk operations"],
        },
        cta: "Start Free Trial",
        cta_link: "/register?plan=professional",
        popular: true,
    },
    Plan {
        name: "Enterprise",
        price: PlanPrice::Custom,
        description: "For large organizations with complex sustainability requirements",
        features: &[
            "Unlimited emission entries",
            "Custom emission factors and categories",
            "White-label marketplace",
            "Advanced AI insights and predictions",
            "Custom reporting and dashboards",
            "Unlimited team members",
            "Dedicated blockchain infrastructure",
            "Premium support with SLA",
            "Custom integrations",
            "Compliance audit support",
        ],
        api_limits: ApiLimits {
            requests: "Unlimited requests",
            rate_limit: "Custom rate limits",
            features: &["Full API access", "Custom endpoints", "Dedicated infrastructure"],
        },
        cta: "Contact Sales",
        cta_link: "/contact",
        popular: false,
    },
];

pub fn plans() -> &'static [Plan] {
    &PLANS
}

/// Case-insensitive lookup by plan name
pub fn find_plan(name: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}
