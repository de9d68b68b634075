//! Markdown rendering of the module tree
//!
//! Modules become level-2 sections and submodules level-3 sections under a
//! single document title.

use crate::output::records::ModuleRecord;

/// Renders module records as a markdown document
pub fn render_markdown(records: &[ModuleRecord]) -> String {
    let mut md = String::new();

    md.push_str("# Documentation Modules\n\n");

    if records.is_empty() {
        md.push_str("_No modules found._\n");
        return md;
    }

    for record in records {
        md.push_str(&format!("## {}\n\n", record.module));
        push_description(&mut md, &record.description);

        for (name, description) in record.submodules.iter() {
            md.push_str(&format!("### {}\n\n", name));
            push_description(&mut md, description);
        }
    }

    md
}

fn push_description(md: &mut String, description: &str) {
    if description.is_empty() {
        md.push_str("_No description._\n\n");
    } else {
        md.push_str(description);
        md.push_str("\n\n");
    }
}
