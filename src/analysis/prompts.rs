use super::data::DocumentDescriptor;

pub const ANALYST_ROLE: &str =
    "You are a financial analyst expert specializing in M&A deal analysis.";

pub const TEASER_ROLE: &str = "You are an expert investment banking analyst who creates compelling teaser documents for M&A transactions.";

pub fn document_list(documents: &[DocumentDescriptor]) -> String {
    documents
        .iter()
        .map(|document| {
            if document.size.is_empty() {
                format!("- {} ({})", document.name, document.file_type)
            } else {
                format!("- {} ({}, {})", document.name, document.file_type, document.size)
            }
        })
        .collect::<Vec<String>>()
        .join("\n")
}

pub fn summary_prompt(documents: &[DocumentDescriptor]) -> String {
    format!(
        "{}

Analyze these documents and provide a structured summary:
{}

Write the analysis in these sections:

**KEY FINDINGS**
Four to six bullet points with the most important insights.

**FINANCIALS**
Revenue trends and projections, profit margins, cash flow and the key financial metrics suggested by the financial documents.

**MARKET POSITION**
Market share, competitive advantages, industry trends and customer segments.

**OPPORTUNITIES**
Market expansion, product development, strategic advantages and synergy potential.

**RISKS**
Market, operational, financial and regulatory or compliance concerns.

Base the analysis on what these document types usually reveal in an M&A process. Be specific and actionable.",
        ANALYST_ROLE,
        document_list(documents)
    )
}

pub fn teaser_prompt(instructions: &str, summary: &str) -> String {
    format!(
        "{}

Here is the analysis summary to base the teaser on:

{}

Produce a professional teaser document in markdown with clear headers, sections and bullet points, suitable for potential investors or acquirers.",
        instructions, summary
    )
}
