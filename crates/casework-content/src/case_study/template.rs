//! Authoring template offered for download.

/// Starter case-study file documenting every supported field.
///
/// The template is itself a valid case study.
pub const TEMPLATE: &str = r##"---
# ----------------------------------------------------------------------------
# Required
# ----------------------------------------------------------------------------
title: "Warehouse Scheduling Overhaul"
# Lowercase kebab-case, used in the page URL.
slug: warehouse-scheduling-overhaul
# One of: AI & Automation, Operations, Web Development, Data & Analytics,
#         Cloud & Infrastructure, Digital Strategy
category: "Operations"
short_description: "How a regional distributor cut picking delays in half."

# ----------------------------------------------------------------------------
# Optional
# ----------------------------------------------------------------------------
client_name: "Northwind Supply"
# One of: Healthcare, Finance, Retail, Manufacturing, Technology, Education,
#         Real Estate, Hospitality, Logistics, Professional Services,
#         Non-Profit, Other
industry: "Logistics"
hero_image: "/images/case-studies/warehouse-scheduling.jpg"
duration: "12 weeks"
# true or false
published: false
featured: false

# Lists: one "  - " item per line (a comma-separated value also works).
technologies:
  - "Rust"
  - "PostgreSQL"
services:
  - "Process Automation"
  - "Dashboard Design"

# Headline results: each item needs label and value; context is optional.
# Items missing label or value are skipped.
results:
  - label: "Picking delays"
    value: "-52%"
    context: "first quarter after launch"
  - label: "Orders per shift"
    value: "1.8x"

# Questions and answers: each item needs question and answer.
faqs:
  - question: "How long did the rollout take?"
    answer: "Twelve weeks from kickoff to the last site going live."
---

## Client & Context

Who the client is and what they do. **Bold**, *italic*, `code` and
[links](https://example.com) are supported.

## Problem

What was going wrong, and what it cost the business.

## Goals

- What success looked like
- Measurable targets agreed up front

## Solution

What was built and why this approach was chosen.

## Implementation

1. Discovery
2. Build
3. Rollout

## Results

> The numbers above in prose, with any quotes from the client.

## Next Steps

Where the engagement goes from here.
"##;
