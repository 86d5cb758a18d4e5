use super::data::*;
use super::data::DocumentStatus::{Pending, Uploaded};
use crate::deals::data::{DealInfo, DealStatus};

fn documents(prefix: &str, entries: &[(&str, DocumentStatus, &str)]) -> Vec<FolderItem> {
    entries
        .iter()
        .enumerate()
        .map(|(num, (name, status, file_type))| {
            FolderItem::document(&format!("{}-{}", prefix, num + 1), name, *status, file_type)
        })
        .collect()
}

/// The standard due-diligence checklist a new deal room starts from.
pub fn demo_categories() -> Vec<CategorySeed> {
    vec![
        CategorySeed {
            id: Some("financial".to_string()),
            name: "Financial Documents".to_string(),
            icon: "financial".to_string(),
            required: 8,
            folder_structure: vec![
                FolderItem::folder(
                    "financial-statements",
                    "Financial Statements",
                    documents(
                        "financial-statements",
                        &[
                            ("Audited Financials (3 years)", Uploaded, "pdf"),
                            ("Management Accounts", Uploaded, "xlsx"),
                            ("Cash Flow Projections", Uploaded, "xlsx"),
                        ],
                    ),
                ),
                FolderItem::folder(
                    "financial-tax",
                    "Tax & Banking",
                    documents(
                        "financial-tax",
                        &[
                            ("Tax Returns", Uploaded, "pdf"),
                            ("Working Capital Analysis", Uploaded, "xlsx"),
                            ("Debt Schedule", Uploaded, "xlsx"),
                            ("Insurance Documentation", Pending, "pdf"),
                            ("Banking Agreements", Pending, "pdf"),
                        ],
                    ),
                ),
            ],
        },
        CategorySeed {
            id: Some("legal".to_string()),
            name: "Legal Documents".to_string(),
            icon: "legal".to_string(),
            required: 6,
            folder_structure: documents(
                "legal",
                &[
                    ("Articles of Incorporation", Uploaded, "pdf"),
                    ("Board Resolutions", Uploaded, "pdf"),
                    ("Material Contracts", Uploaded, "pdf"),
                    ("IP Documentation", Uploaded, "pdf"),
                    ("Employment Agreements", Pending, "pdf"),
                    ("Compliance Certificates", Pending, "pdf"),
                ],
            ),
        },
        CategorySeed {
            id: Some("operational".to_string()),
            name: "Operational Documents".to_string(),
            icon: "operational".to_string(),
            required: 5,
            folder_structure: documents(
                "operational",
                &[
                    ("Organization Chart", Uploaded, "pdf"),
                    ("Key Personnel CVs", Uploaded, "pdf"),
                    ("Customer List", Uploaded, "xlsx"),
                    ("Supplier Agreements", Uploaded, "pdf"),
                    ("Business Plan", Uploaded, "pdf"),
                ],
            ),
        },
    ]
}

pub fn demo_deal_info() -> DealInfo {
    DealInfo {
        name: "TechCorp Acquisition".to_string(),
        client: "TechCorp Inc.".to_string(),
        status: DealStatus::Active,
        phase: "Due Diligence".to_string(),
        value: 25_000_000.0,
        close_date: Some("2024-06-30".to_string()),
        description: "Acquisition of TechCorp's SaaS division".to_string(),
    }
}
