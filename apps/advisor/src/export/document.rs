//! Export Transform: renders a plan as a self-contained printable HTML document.
//!
//! Pure function of the plan. Milestones are rendered in stored order; their
//! month / week fields are labels, never a sort key.

use std::fmt::Write;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::plan::{Milestone, Plan, Resource};

pub const CONTENT_TYPE: &str = "text/html; charset=utf-8";
const FILE_EXTENSION: &str = "html";
const UNTITLED_PATH: &str = "learning_plan";

/// A rendered plan, ready to hand to an export sink.
#[derive(Debug, Clone)]
pub struct PlanDocument {
    pub user_id: String,
    pub filename: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl PlanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PlanStatus::NotStarted => "Not Started",
            PlanStatus::InProgress => "In Progress",
            PlanStatus::Completed => "Completed",
        }
    }
}

/// Percentage of completed milestones, rounded; 0 when there are none.
pub fn progress(plan: &Plan) -> u32 {
    let total = plan.milestones.len();
    if total == 0 {
        return 0;
    }
    ((plan.completed_count() as f64 / total as f64) * 100.0).round() as u32
}

pub fn status(progress: u32) -> PlanStatus {
    match progress {
        0 => PlanStatus::NotStarted,
        p if p >= 100 => PlanStatus::Completed,
        _ => PlanStatus::InProgress,
    }
}

/// `<selected path, whitespace runs → "_", control characters dropped>_Learning_Plan.html`
pub fn export_filename(selected_path: &str) -> String {
    let base = if selected_path.is_empty() {
        UNTITLED_PATH.to_string()
    } else {
        let mut out = String::with_capacity(selected_path.len());
        let mut in_space = false;
        for c in selected_path.chars() {
            if c.is_whitespace() {
                if !in_space {
                    out.push('_');
                }
                in_space = true;
            } else if !c.is_control() {
                out.push(c);
                in_space = false;
            }
        }
        out
    };
    format!("{base}_Learning_Plan.{FILE_EXTENSION}")
}

/// e.g. "March 5, 2026"
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Renders `plan` without modifying it. `generated_on` is the export date shown in the footer.
pub fn render_document(plan: &Plan, generated_on: DateTime<Utc>) -> PlanDocument {
    PlanDocument {
        user_id: plan.user_id.clone(),
        filename: export_filename(&plan.selected_path),
        content_type: CONTENT_TYPE,
        body: Bytes::from(render_html(plan, generated_on)),
    }
}

fn render_html(plan: &Plan, generated_on: DateTime<Utc>) -> String {
    let progress = progress(plan);
    let title = escape(&plan.selected_path);
    let mut html = String::with_capacity(4096);

    // `write!` into a String cannot fail.
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} Learning Plan</title>
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #1a1a1a; line-height: 1.6; padding: 20px; background: white;">
<header style="border-bottom: 3px solid #1a73e8; padding-bottom: 20px; margin-bottom: 30px;">
  <h1 style="color: #1a73e8; margin: 0; font-size: 32px;">{title}</h1>
  <p style="color: #666; margin: 10px 0 0 0;">Personalized Learning Plan &bull; Generated {created}</p>
</header>
<section id="overview">
  <h2>Plan Overview</h2>
  <p class="status">Status: {status}</p>
  <table>
    <tr><th>Progress</th><th>Months</th><th>Milestones</th><th>Est. Cost</th></tr>
    <tr><td>{progress}%</td><td>{months}</td><td>{count}</td><td>${mid}</td></tr>
  </table>
</section>
<section id="investment">
  <h2>Investment Options</h2>
  <div class="track"><h3>Budget Track</h3><strong>${low}</strong><p>Free and low-cost resources</p></div>
  <div class="track"><h3>Balanced Track</h3><strong>${mid}</strong><p>Mix of free and paid resources</p></div>
  <div class="track"><h3>Premium Track</h3><strong>${high}</strong><p>Premium courses and bootcamps</p></div>
</section>
<section id="timeline">
  <h2>Learning Timeline</h2>
"#,
        created = format_date(plan.created_at),
        status = status(progress).label(),
        months = plan.total_duration_months,
        count = plan.milestones.len(),
        low = plan.cost_estimate.low,
        mid = plan.cost_estimate.mid,
        high = plan.cost_estimate.high,
    );

    if plan.milestones.is_empty() {
        html.push_str("  <p class=\"empty\">No milestones available.</p>\n");
    }
    for milestone in &plan.milestones {
        render_milestone(&mut html, milestone);
    }

    let _ = write!(
        html,
        r#"</section>
<footer style="margin-top: 40px; padding-top: 20px; border-top: 2px solid #f0f0f0; text-align: center;">
  <p>Generated by Career Advisor &bull; {exported}</p>
</footer>
</body>
</html>
"#,
        exported = format_date(generated_on),
    );

    html
}

fn render_milestone(html: &mut String, milestone: &Milestone) {
    let (accent, badge, icon) = if milestone.completed {
        ("#34a853", "COMPLETED", "&#9989;")
    } else {
        ("#1a73e8", "PENDING", "&#128203;")
    };

    let _ = write!(
        html,
        r#"  <article class="milestone" style="margin-bottom: 25px; padding: 20px; border-left: 4px solid {accent};">
    <h3>{icon} {title}</h3>
    <p class="when">Month {month}, Week {week} &bull; {hours} hours</p>
    <p>{description}</p>
    <span class="badge">{badge}</span>
"#,
        title = escape(&milestone.title),
        month = milestone.month,
        week = milestone.week,
        hours = milestone.hours,
        description = escape(&milestone.description),
    );

    if !milestone.resources.is_empty() {
        html.push_str("    <h4>Resources:</h4>\n    <ul>\n");
        for resource in &milestone.resources {
            let _ = writeln!(
                html,
                "      <li><strong>{}</strong> <span>{} &bull; {}</span> <span>{}</span></li>",
                escape(&resource.title),
                resource.resource_type.as_str(),
                cost_label(resource),
                escape(&resource.url),
            );
        }
        html.push_str("    </ul>\n");
    }

    html.push_str("  </article>\n");
}

fn cost_label(resource: &Resource) -> String {
    if resource.is_free() {
        "Free".to_string()
    } else {
        format!("${}", resource.cost)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::{PlanDraft, ResourceType};
    use crate::models::suggestion::CostRange;
    use chrono::TimeZone;

    fn milestone(title: &str, month: u32, completed: bool) -> Milestone {
        Milestone {
            month,
            week: 1,
            title: title.to_string(),
            description: format!("{title} description"),
            hours: 10,
            resources: vec![],
            completed,
            completed_at: None,
        }
    }

    fn plan_with(milestones: Vec<Milestone>) -> Plan {
        Plan::from_draft(
            PlanDraft {
                selected_path: "Full Stack Developer".to_string(),
                milestones,
                cost_estimate: CostRange::new(120, 850, 2400),
                total_duration_months: 6,
                weekly_hours: 15,
            },
            "u1",
            Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap(),
        )
    }

    fn body(doc: &PlanDocument) -> &str {
        std::str::from_utf8(&doc.body).unwrap()
    }

    #[test]
    fn test_progress_zero_milestones() {
        assert_eq!(progress(&plan_with(vec![])), 0);
    }

    #[test]
    fn test_progress_half_complete() {
        let plan = plan_with(vec![
            milestone("a", 1, true),
            milestone("b", 1, true),
            milestone("c", 1, false),
            milestone("d", 1, false),
        ]);
        assert_eq!(progress(&plan), 50);
        assert_eq!(status(50), PlanStatus::InProgress);
    }

    #[test]
    fn test_progress_rounds() {
        let plan = plan_with(vec![
            milestone("a", 1, true),
            milestone("b", 1, true),
            milestone("c", 1, false),
        ]);
        assert_eq!(progress(&plan), 67);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status(0).label(), "Not Started");
        assert_eq!(status(100).label(), "Completed");
    }

    #[test]
    fn test_render_preserves_stored_order() {
        let plan = plan_with(vec![milestone("Alpha", 2, false), milestone("Beta", 1, false)]);
        let doc = render_document(&plan, Utc::now());
        let html = body(&doc);

        let a = html.find("Alpha").unwrap();
        let b = html.find("Beta").unwrap();
        assert!(a < b, "Alpha (month 2) must render before Beta (month 1)");
    }

    #[test]
    fn test_render_does_not_mutate_plan() {
        let plan = plan_with(vec![milestone("Alpha", 1, true)]);
        let before = plan.clone();
        let _ = render_document(&plan, Utc::now());
        assert_eq!(plan, before);
    }

    #[test]
    fn test_filename_replaces_whitespace_runs() {
        assert_eq!(
            export_filename("Full Stack Developer"),
            "Full_Stack_Developer_Learning_Plan.html"
        );
        assert_eq!(export_filename("UX/UI  Designer"), "UX/UI_Designer_Learning_Plan.html");
        assert_eq!(export_filename(""), "learning_plan_Learning_Plan.html");
    }

    #[test]
    fn test_filename_drops_control_characters() {
        assert_eq!(
            export_filename("Data\u{1}Scientist\r\n"),
            "DataScientist__Learning_Plan.html"
        );
    }

    #[test]
    fn test_render_contains_overview_and_dates() {
        let plan = plan_with(vec![milestone("a", 1, true), milestone("b", 1, false)]);
        let exported = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        let doc = render_document(&plan, exported);
        let html = body(&doc);

        assert_eq!(doc.filename, "Full_Stack_Developer_Learning_Plan.html");
        assert_eq!(doc.content_type, CONTENT_TYPE);
        assert!(html.contains("Generated March 5, 2026"));
        assert!(html.contains("October 19, 2026"));
        assert!(html.contains("<td>50%</td>"));
        assert!(html.contains("$850"));
        assert!(html.contains("$2400"));
        assert!(html.contains("COMPLETED"));
        assert!(html.contains("PENDING"));
    }

    #[test]
    fn test_empty_plan_renders_placeholder() {
        let doc = render_document(&plan_with(vec![]), Utc::now());
        assert!(body(&doc).contains("No milestones available."));
    }

    #[test]
    fn test_resource_cost_labels() {
        let mut m = milestone("a", 1, false);
        m.resources = vec![
            Resource {
                title: "Free Guide".to_string(),
                url: "https://example.com/free".to_string(),
                cost: 0,
                resource_type: ResourceType::Guide,
                description: None,
                duration: None,
                rating: None,
            },
            Resource {
                title: "Paid Course".to_string(),
                url: "https://example.com/paid".to_string(),
                cost: 89,
                resource_type: ResourceType::Course,
                description: None,
                duration: None,
                rating: None,
            },
        ];
        let doc = render_document(&plan_with(vec![m]), Utc::now());
        let html = body(&doc);
        assert!(html.contains("guide &bull; Free"));
        assert!(html.contains("course &bull; $89"));
    }

    #[test]
    fn test_text_is_escaped() {
        let plan = plan_with(vec![milestone("<script>alert(1)</script>", 1, false)]);
        let doc = render_document(&plan, Utc::now());
        let html = body(&doc);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
