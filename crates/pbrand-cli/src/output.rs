//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use pbrand_core::package::ComplianceStatus;
use pbrand_core::project::Project;
use pbrand_core::{PackageField, ProjectStore};
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Spinner on stderr while a backend call is outstanding.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn failure(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

fn compliance_colored(status: &ComplianceStatus) -> ColoredString {
    match status {
        ComplianceStatus::Approved => "approved".green().bold(),
        ComplianceStatus::Rejected => "rejected".red().bold(),
        ComplianceStatus::Pending => "pending".yellow(),
        ComplianceStatus::Other(s) => s.as_str().normal(),
    }
}

/// Print projects as a table.
pub fn print_projects_table(projects: &[Project]) {
    if projects.is_empty() {
        println!("{}", "No projects found.".dimmed());
        return;
    }

    println!("{:<38} {:<32} {:<24}", "ID", "Title", "Therapeutic Area");
    println!("{}", "─".repeat(94));

    for project in projects {
        println!(
            "{:<38} {} {}",
            project.id.dimmed(),
            pad_right(&truncate_visual(project.display_title(), 30), 32),
            truncate_visual(project.therapeutic_area.as_deref().unwrap_or("-"), 24)
        );
    }

    println!();
    println!("{} project(s) total", projects.len());
}

/// Print the loaded project, its insights and brand package.
pub fn print_project(store: &ProjectStore) {
    let Some(detail) = store.detail() else {
        println!("{}", "Project not found.".dimmed());
        return;
    };
    let project = &detail.project;

    println!("{} {}", project.display_title().cyan().bold(), format!("({})", project.id).dimmed());
    println!();
    println!(
        "{}: {}",
        "Therapeutic Area".bold(),
        project.therapeutic_area.as_deref().unwrap_or("-")
    );
    println!("{}: {}", "Molecule(s)".bold(), project.molecule.as_deref().unwrap_or("-"));
    if let Some(benefits) = project.benefits.as_deref().filter(|b| !b.is_empty()) {
        println!("{}: {}", "Benefits".bold(), benefits);
    }

    let insights = &detail.insights;
    println!();
    println!("{}", "Strategic Insights".bold());
    println!("  Competitors: {}", insights.competitors.join(", "));
    println!(
        "  Brand Positioning: {}",
        insights.brand_positioning.as_deref().unwrap_or("-")
    );
    let colors: Vec<String> = insights
        .valid_colors()
        .map(|c| format!("{} {}", c.name, c.hex.dimmed()))
        .collect();
    println!("  Color Palette: {}", colors.join(", "));
    println!("  Clinical Trials: {}", insights.trial_names().join(", "));

    let package = &detail.brand_package;
    println!();
    println!("{}", "Brand Package".bold());
    for field in [PackageField::BrandName, PackageField::Slogan] {
        print_field(store, field);
    }
    for (i, logo) in package.logo_concepts.iter().enumerate() {
        println!("  Logo {}: {}", i, logo.url.underline());
    }
    print_field(store, PackageField::Leaflet);
    for section in package.leaflet_json.sections.entries() {
        println!("    {}", section.title.bold());
        println!("    {}", section.content);
    }
    println!();
    println!(
        "{}: {}",
        "Compliance Status".bold(),
        compliance_colored(store.compliance().status())
    );
}

fn print_field(store: &ProjectStore, field: PackageField) {
    let editor = store.editor(field);
    let marker = if editor.is_saved() {
        "".normal()
    } else {
        " (unsaved)".yellow()
    };
    println!("  {}: {}{}", field.label(), editor.value(), marker);
    if let Some(error) = editor.error() {
        println!("    {}", error.red());
    }
}

pub fn print_compliance(status: &ComplianceStatus) {
    println!("{}: {}", "Compliance Status".bold(), compliance_colored(status));
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
