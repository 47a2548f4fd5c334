//! Renders a career plan as a structured markdown document, the client-side
//! replacement for the original's in-browser PDF export.

use crate::models::CareerPath;

pub fn export_plan_markdown(career: &CareerPath) -> String {
    let mut md = format!("# Career Plan — {}\n\n", career.title);
    md.push_str(&format!("{}\n\n", career.description));

    if let Some(pct) = career.match_percentage {
        md.push_str(&format!("- **Match:** {pct}%\n"));
    }
    if let Some(salary) = &career.salary_range {
        md.push_str(&format!("- **Salary Range:** {salary}\n"));
    }
    md.push('\n');

    if !career.role_overview.is_empty() {
        md.push_str("## Role Overview\n\n");
        for line in &career.role_overview {
            md.push_str(&format!("- {line}\n"));
        }
        md.push('\n');
    }

    if !career.required_skills.is_empty() {
        md.push_str("## Required Skills\n\n");
        md.push_str(&career.required_skills.join(", "));
        md.push_str("\n\n");
    }

    if !career.roadmap.is_empty() {
        md.push_str("## Learning Roadmap\n\n");
        for (i, s) in career.roadmap.iter().enumerate() {
            md.push_str(&format!("### {}. {}\n", i + 1, s.title));
            if let Some(duration) = &s.duration {
                md.push_str(&format!("*{duration}*\n\n"));
            }
            md.push_str(&format!("{}\n\n", s.description));
        }
    }

    if !career.resources.is_empty() {
        md.push_str("## Resources\n\n");
        for r in &career.resources {
            match &r.duration {
                Some(d) => md.push_str(&format!("- [{}]({}) — {} ({d})\n", r.title, r.url, r.kind)),
                None => md.push_str(&format!("- [{}]({}) — {}\n", r.title, r.url, r.kind)),
            }
        }
        md.push('\n');
    }

    md
}
