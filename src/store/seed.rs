//! Demo pipeline loaded when `SEED_DEMO_DATA` is enabled.

use crate::domain::{
    Approval, ApprovalStatus, Approvals, BuyingRole, Contact, Deal, Decimal, Gate, HealthStatus, LineItem,
    Qualification, Role, Stage, User, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};

pub fn users() -> Vec<User> {
    vec![
        User::new("u1", "Alex Sales", Role::SalesRep)
            .with_email("alex@edvolution.com")
            .with_department("Sales"),
        User::new("u2", "Sarah Finance", Role::Finance)
            .with_email("sarah@edvolution.com")
            .with_department("Finance"),
        User::new("u3", "Mike Ops", Role::SalesOps)
            .with_email("mike@edvolution.com")
            .with_department("Operations"),
        User::new("u4", "Jessica PS", Role::PsManager)
            .with_email("jess@edvolution.com")
            .with_department("Professional Services"),
        User::new("u5", "David Delivery", Role::DeliveryManager)
            .with_email("david@edvolution.com")
            .with_department("Delivery"),
        User::new("u6", "Admin User", Role::Admin)
            .with_email("admin@edvolution.com")
            .with_department("IT"),
    ]
}

pub fn contacts() -> Vec<Contact> {
    vec![
        Contact::new("c1", "John Doe", "Acme Corp", "john@acme.com")
            .with_title("CTO")
            .with_tags(&["Decision Maker", "Technical"])
            .with_buying_role(BuyingRole::EconomicBuyer),
        Contact::new("c2", "Sarah Connor", "Acme Corp", "sarah@acme.com")
            .with_title("VP Engineering")
            .with_tags(&["Influencer"])
            .with_buying_role(BuyingRole::TechnicalEvaluator),
        Contact::new("c3", "Jane Smith", "Globex Inc", "jane@globex.com")
            .with_title("VP Marketing")
            .with_tags(&["Budget Holder"])
            .with_buying_role(BuyingRole::Champion),
        Contact::new("c4", "Harry Green", "Soylent Corp", "h.green@soylent.com")
            .with_title("CISO")
            .with_tags(&["Blocker", "Security"])
            .with_buying_role(BuyingRole::Blocker),
        Contact::new("c5", "Alice Wesker", "Umbrella Corp", "alice@umbrella.com")
            .with_title("Procurement Director")
            .with_tags(&["Procurement", "Negotiator"])
            .with_buying_role(BuyingRole::EconomicBuyer),
        Contact::new("c6", "Miles Dyson", "Cyberdyne", "miles@cyberdyne.com")
            .with_title("Director of R&D")
            .with_tags(&["Visionary"])
            .with_buying_role(BuyingRole::Coach),
    ]
}

fn on(date: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn approved_by(id: &str, date: &str) -> Approval {
    Approval::approved(UserId::new(id), on(date))
}

fn all_approved() -> Approvals {
    Gate::ALL.into_iter().fold(Approvals::new(), |acc, gate| {
        acc.with(
            gate,
            Approval {
                status: ApprovalStatus::Approved,
                approver_id: None,
                timestamp: None,
            },
        )
    })
}

#[allow(clippy::too_many_arguments)]
fn qualification(
    metrics: &str,
    economic_buyer: &str,
    decision_criteria: &str,
    decision_process: &str,
    paper_process: &str,
    identified_pain: &str,
    champion: &str,
    competition: &str,
) -> Qualification {
    Qualification {
        metrics: metrics.into(),
        economic_buyer: economic_buyer.into(),
        decision_criteria: decision_criteria.into(),
        decision_process: decision_process.into(),
        paper_process: paper_process.into(),
        identified_pain: identified_pain.into(),
        champion: champion.into(),
        competition: competition.into(),
    }
}

pub fn deals() -> Vec<Deal> {
    let mut cloud = Deal::new(
        "1",
        "u1",
        "Enterprise Cloud Migration",
        "Acme Corp",
        "United States",
        Decimal::from_i64(125000),
        Stage::Understand,
    )
    .with_probability(40)
    .with_contact("John Doe", &["c1", "c2"])
    .with_tags(&["Cloud", "Enterprise"])
    .with_line_item(LineItem::new("SRV-ENT-01", "Enterprise Cloud Server Instance", 5, 15000, 0))
    .with_line_item(LineItem::new("SVC-MIG-01", "Migration Services (Hours)", 200, 200, 0))
    .with_line_item(LineItem::new("SUP-247-01", "24/7 Premium Support", 1, 10000, 0))
    .with_approvals(Approvals::new().with(Gate::SalesOps, approved_by("u3", "2023-10-25")));
    cloud.qualification = qualification(
        "Reduce TCO by 20% ($500k/yr)",
        "John Doe (CTO) has signing authority",
        "Security (SOC2), Latency < 20ms, Hybrid support",
        "Tech Eval -> Architecture Review -> Board Approval",
        "Standard MSA, 30 days net",
        "Current legacy ERP is crashing during peak loads",
        "Sarah Connor (VP Eng) is pushing for us",
        "AWS Direct, Azure",
    );
    cloud.days_dormant = 2;

    let mut marketing = Deal::new(
        "2",
        "u1",
        "Q3 Marketing Automation",
        "Globex Inc",
        "United Kingdom",
        Decimal::from_i64(45000),
        Stage::Discover,
    )
    .with_probability(20)
    .with_contact("Jane Smith", &["c3"])
    .with_tags(&["Marketing", "SaaS"])
    .with_line_item(LineItem::new("SAAS-MKT-PRO", "Marketing Pro License (Annual)", 1, 45000, 20));
    marketing.qualification = qualification(
        "Save 20hrs/week of manual entry",
        "TBD",
        "Integration with Salesforce, Ease of use",
        "Demo -> Trial -> Purchase",
        "Credit Card / Online T&C",
        "Manual email nurture is error prone",
        "Jane Smith",
        "HubSpot, Mailchimp",
    );
    marketing.health = HealthStatus::AtRisk;
    marketing.days_dormant = 7;

    let mut audit = Deal::new(
        "3",
        "u2",
        "Security Audit 2024",
        "Soylent Corp",
        "Spain",
        Decimal::from_i64(15000),
        Stage::Proposal,
    )
    .with_probability(70)
    .with_contact("Harry Green", &["c4"])
    .with_tags(&["Security", "Service"])
    .with_line_item(LineItem::new("SVC-SEC-AUD", "Security Audit Package", 1, 15000, 21))
    .with_approvals(
        Approvals::new()
            .with(Gate::Finance, approved_by("u2", "2023-10-26"))
            .with(Gate::SalesOps, approved_by("u3", "2023-10-26"))
            .with(Gate::Delivery, approved_by("u5", "2023-10-26")),
    );
    audit.qualification = qualification(
        "Compliance with ISO 27001",
        "CFO",
        "Price, Speed",
        "Direct Award",
        "PO",
        "Audit due next month",
        "Harry Green",
        "None",
    );
    audit.days_dormant = 1;

    let mut license = Deal::new(
        "4",
        "u1",
        "500 User License Deal",
        "Umbrella Corp",
        "Germany",
        Decimal::from_i64(500000),
        Stage::Negotiating,
    )
    .with_probability(90)
    .with_contact("Alice Wesker", &["c5"])
    .with_tags(&["License", "Global"])
    .with_line_item(LineItem::new("LIC-ENT-VOL", "Enterprise Volume License", 500, 1000, 19))
    .with_approvals(all_approved());
    license.qualification = qualification(
        "Consolidate 4 vendors into 1",
        "Board of Directors",
        "Global support, SLA",
        "Legal Review",
        "Custom Contract",
        "Fragmented IT landscape",
        "Alice Wesker",
        "Oracle, SAP",
    );

    let mut retainer = Deal::new(
        "5",
        "u3",
        "AI Consulting Retainer",
        "Cyberdyne",
        "United States",
        Decimal::from_i64(200000),
        Stage::Closed,
    )
    .with_probability(100)
    .with_contact("Miles Dyson", &["c6"])
    .with_tags(&["AI", "Consulting"])
    .with_line_item(LineItem::new("SVC-AI-RET", "AI Research Retainer (Q4)", 1, 200000, 0))
    .with_approvals(all_approved());
    retainer.qualification = qualification(
        "Develop Skynet V1",
        "Miles Dyson",
        "Innovation capability",
        "Single Signer",
        "Completed",
        "Need advanced neural nets",
        "Miles Dyson",
        "None",
    );
    retainer.days_dormant = 1;

    vec![cloud, marketing, audit, license, retainer]
}
